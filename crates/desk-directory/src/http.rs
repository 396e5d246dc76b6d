//! Shared response checks for Slack Web API calls.
//!
//! Slack reports most failures as HTTP 200 with `"ok": false`, so a call goes
//! through two gates: [`check_response`] for the transport status and
//! [`slack_payload`] for the envelope.

use serde::de::DeserializeOwned;

use crate::error::DirectoryError;

/// Check an HTTP response for rate limiting and non-success status codes.
///
/// - **429** → [`DirectoryError::RateLimited`], `Retry-After` in seconds
///   (60 s when absent or unparseable).
/// - **Non-success** → [`DirectoryError::Api`] with the response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, DirectoryError> {
    if resp.status() == 429 {
        return Err(DirectoryError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(DirectoryError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// Unwrap a Slack envelope: `ok: false` becomes [`DirectoryError::Slack`],
/// anything else is deserialized into `T`.
pub fn slack_payload<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, DirectoryError> {
    if body.get("ok").and_then(serde_json::Value::as_bool) != Some(true) {
        let code = body
            .get("error")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown_error");
        return Err(DirectoryError::Slack(code.to_string()));
    }
    serde_json::from_value(body).map_err(|e| DirectoryError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn mock_response(status: u16, retry_after: Option<&str>) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body("").unwrap())
    }

    #[test]
    fn retry_after_header_is_parsed() {
        assert_eq!(parse_retry_after(&mock_response(429, Some("120"))), 120);
        assert_eq!(parse_retry_after(&mock_response(429, None)), 60);
        assert_eq!(parse_retry_after(&mock_response(429, Some("soon"))), 60);
    }

    #[tokio::test]
    async fn rate_limited_response() {
        let err = check_response(mock_response(429, Some("30"))).await.unwrap_err();
        assert!(matches!(err, DirectoryError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn server_error_response() {
        let err = check_response(mock_response(503, None)).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn success_response_passes() {
        assert!(check_response(mock_response(200, None)).await.is_ok());
    }

    #[derive(Debug, Deserialize)]
    struct Sample {
        value: u32,
    }

    #[test]
    fn ok_false_maps_to_slack_error() {
        let err = slack_payload::<Sample>(json!({"ok": false, "error": "user_not_found"})).unwrap_err();
        assert!(matches!(err, DirectoryError::Slack(ref code) if code == "user_not_found"));
    }

    #[test]
    fn missing_ok_is_unknown_error() {
        let err = slack_payload::<Sample>(json!({"value": 1})).unwrap_err();
        assert!(matches!(err, DirectoryError::Slack(ref code) if code == "unknown_error"));
    }

    #[test]
    fn malformed_payload_is_parse_error() {
        let err = slack_payload::<Sample>(json!({"ok": true, "value": "x"})).unwrap_err();
        assert!(matches!(err, DirectoryError::Parse(_)));
    }

    #[test]
    fn ok_payload_deserializes() {
        let sample: Sample = slack_payload(json!({"ok": true, "value": 7})).unwrap();
        assert_eq!(sample.value, 7);
    }
}
