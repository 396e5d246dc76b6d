//! Browser sign-in with a loopback callback.
//!
//! 1. Bind `tiny_http` on `127.0.0.1:0`
//! 2. Open the provider's sign-in page with a random `state`
//! 3. Wait (in `spawn_blocking`) for `/callback?code=..&state=..`
//! 4. Exchange the code, decode the ID token, check the allow-list
//! 5. Store the session

use std::time::{Duration, Instant};

use chrono::Utc;

use crate::error::AuthError;
use crate::gate::ensure_allowed;
use crate::id_token::decode_id_token;
use crate::oauth::{OAuthSettings, authorize_url, exchange_code};
use crate::session::Session;
use crate::session_store;

/// Run the full login and persist the session.
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` if the callback server cannot bind
/// or the callback times out, `TokenExchange`/`IdToken` on provider issues,
/// and `NotAllowed` when the email is not on the allow-list.
pub async fn login(
    settings: &OAuthSettings,
    allowed_emails: &[String],
    timeout: Duration,
) -> Result<Session, AuthError> {
    let server = tiny_http::Server::http("127.0.0.1:0")
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to bind: {e}")))?;
    let port = server
        .server_addr()
        .to_ip()
        .map(|a| a.port())
        .ok_or_else(|| AuthError::BrowserFlowFailed("no port".into()))?;

    let state = random_state()?;
    let redirect_uri = format!("http://localhost:{port}/callback");
    let sign_in_url = authorize_url(settings, &redirect_uri, &state);

    eprintln!("Opening browser to: {sign_in_url}");
    if let Err(error) = open::that(&sign_in_url) {
        eprintln!("Failed to open browser: {error}");
        eprintln!("Open the URL above manually, then return here.");
    }

    let code = tokio::task::spawn_blocking(move || wait_for_callback(&server, timeout, &state))
        .await
        .map_err(|e| AuthError::BrowserFlowFailed(format!("spawn_blocking join: {e}")))??;

    let http = reqwest::Client::builder().timeout(Duration::from_secs(30)).build()?;
    let tokens = exchange_code(&http, settings, &code, &redirect_uri).await?;
    let claims = decode_id_token(&tokens.id_token)?;
    ensure_allowed(&claims.email, allowed_emails)?;

    let session = Session::from_claims(claims, Utc::now());
    session_store::store(&session)?;
    tracing::info!(email = %session.email, "logged in");
    Ok(session)
}

/// 16 random bytes as hex.
fn random_state() -> Result<String, AuthError> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes)
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate state: {e}")))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

/// What a callback request carried.
#[derive(Debug, PartialEq, Eq)]
enum Callback {
    Code(String),
    Denied(String),
    StateMismatch,
    Incomplete,
}

/// Read `code`, `state`, and `error` from a callback query string.
fn parse_callback(query: &str, expected_state: &str) -> Callback {
    let mut code = None;
    let mut state = None;
    let mut error = None;
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(value).map_or_else(|_| value.to_string(), |v| v.into_owned());
        match key {
            "code" => code = Some(value),
            "state" => state = Some(value),
            "error_description" => error = Some(value),
            "error" => {
                if error.is_none() {
                    error = Some(value);
                }
            }
            _ => {}
        }
    }

    if state.as_deref() != Some(expected_state) {
        return if code.is_some() || error.is_some() {
            Callback::StateMismatch
        } else {
            Callback::Incomplete
        };
    }
    match (code, error) {
        (_, Some(error)) => Callback::Denied(error),
        (Some(code), None) => Callback::Code(code),
        (None, None) => Callback::Incomplete,
    }
}

fn html(body: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let response = tiny_http::Response::from_string(format!("<html><body>{body}</body></html>"));
    match tiny_http::Header::from_bytes("Content-Type", "text/html; charset=utf-8") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

/// Block until the callback carries a code, an error, or the timeout passes.
/// Requests for other paths (favicon, retries) are answered and ignored.
fn wait_for_callback(
    server: &tiny_http::Server,
    timeout: Duration,
    expected_state: &str,
) -> Result<String, AuthError> {
    let deadline = Instant::now() + timeout;
    let timed_out =
        || AuthError::BrowserFlowFailed(format!("browser callback timed out after {}s", timeout.as_secs()));

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(timed_out());
        }
        let request = match server.recv_timeout(remaining) {
            Ok(Some(request)) => request,
            Ok(None) => return Err(timed_out()),
            Err(e) => return Err(AuthError::BrowserFlowFailed(format!("recv error: {e}"))),
        };

        let url = request.url().to_string();
        let Some(query) = url.strip_prefix("/callback?") else {
            let _ = request.respond(tiny_http::Response::from_string("").with_status_code(204));
            continue;
        };

        match parse_callback(query, expected_state) {
            Callback::Code(code) => {
                let _ = request.respond(html("<h1>Signed in</h1><p>You can close this tab.</p>"));
                return Ok(code);
            }
            Callback::Denied(reason) => {
                let _ = request.respond(html("<h1>Sign-in failed</h1><p>Check the terminal.</p>"));
                return Err(AuthError::BrowserFlowFailed(format!("provider returned an error: {reason}")));
            }
            Callback::StateMismatch => {
                let _ = request.respond(html("<h1>Sign-in failed</h1><p>State mismatch.</p>"));
                return Err(AuthError::BrowserFlowFailed("state mismatch in callback".into()));
            }
            Callback::Incomplete => {
                let _ = request.respond(html("<h1>Waiting for sign-in…</h1>"));
            }
        }
    }
}
