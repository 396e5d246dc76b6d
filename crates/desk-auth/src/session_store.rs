//! Session persistence: OS keychain first, `~/.deskboard/session.json` as a
//! fallback.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;
use crate::session::Session;

const DEFAULT_KEYRING_SERVICE: &str = "deskboard";
const KEYRING_USER: &str = "session";
const SESSION_FILE_NAME: &str = "session.json";

/// Keyring service name; `DESK_KEYRING_SERVICE` overrides it for tests.
fn keyring_service() -> String {
    std::env::var("DESK_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Store a session. Falls back to the session file if the keyring fails.
///
/// # Errors
///
/// Returns `AuthError::SessionStore` if serialization or both stores fail.
pub fn store(session: &Session) -> Result<(), AuthError> {
    let json = serde_json::to_string(session)
        .map_err(|e| AuthError::SessionStore(format!("serialize session: {e}")))?;
    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(&json) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file(&session_path()?, &json)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file(&session_path()?, &json)
        }
    }
}

/// Load the stored session, keyring first. Unreadable entries count as absent.
#[must_use]
pub fn load() -> Option<Session> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        if let Ok(json) = entry.get_password() {
            if let Some(session) = parse(&json) {
                return Some(session);
            }
        }
    }
    load_file(&session_path().ok()?)
}

/// Remove the session from the keyring and the session file.
///
/// # Errors
///
/// Returns `AuthError::SessionStore` if the session file cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        let _ = entry.delete_credential();
    }
    let path = session_path()?;
    if path.exists() {
        fs::remove_file(&path)
            .map_err(|e| AuthError::SessionStore(format!("failed to delete {}: {e}", path.display())))?;
    }
    Ok(())
}

/// Where the fallback session file lives.
///
/// # Errors
///
/// Returns `AuthError::SessionStore` if there is no home directory.
pub fn session_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".deskboard").join(SESSION_FILE_NAME))
        .ok_or_else(|| AuthError::SessionStore("home directory not found".into()))
}

fn parse(json: &str) -> Option<Session> {
    if json.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(json) {
        Ok(session) => Some(session),
        Err(error) => {
            tracing::debug!(%error, "ignoring unreadable stored session");
            None
        }
    }
}

fn store_file(path: &Path, json: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::SessionStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, json).map_err(|e| AuthError::SessionStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::SessionStore(format!("chmod {}: {e}", path.display())))?;
    }
    Ok(())
}

fn load_file(path: &Path) -> Option<Session> {
    fs::read_to_string(path).ok().and_then(|json| parse(&json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> Session {
        Session {
            email: "ana@example.com".into(),
            name: Some("Ana Souza".into()),
            logged_in_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            expires_at: Utc.with_ymd_and_hms(2025, 6, 1, 13, 0, 0).unwrap(),
        }
    }

    #[test]
    fn session_path_is_under_home() {
        let path = session_path().expect("should resolve");
        assert!(path.ends_with(".deskboard/session.json"));
    }

    #[test]
    fn file_roundtrip_with_private_permissions() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("nested").join(SESSION_FILE_NAME);
        let json = serde_json::to_string(&sample()).unwrap();

        store_file(&path, &json).unwrap();
        assert_eq!(load_file(&path), Some(sample()));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o600, "session file should be 0600");
        }
    }

    #[test]
    fn unreadable_file_is_absent() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join(SESSION_FILE_NAME);
        fs::write(&path, "   \n").unwrap();
        assert!(load_file(&path).is_none());
        fs::write(&path, "{not json").unwrap();
        assert!(load_file(&path).is_none());
        assert!(load_file(&tmp.path().join("missing.json")).is_none());
    }
}
