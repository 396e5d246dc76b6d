//! Email allow-list.

use crate::error::AuthError;

/// Accept `email` only if it appears in `allowed` (case-insensitive, trimmed).
/// An empty list admits nobody.
///
/// # Errors
///
/// Returns `AuthError::NotAllowed` when the email is not listed.
pub fn ensure_allowed(email: &str, allowed: &[String]) -> Result<(), AuthError> {
    let email = email.trim().to_lowercase();
    let listed = !email.is_empty() && allowed.iter().any(|a| a.trim().to_lowercase() == email);
    if listed {
        Ok(())
    } else {
        tracing::warn!(email = %email, "login rejected by allow-list");
        Err(AuthError::NotAllowed { email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(emails: &[&str]) -> Vec<String> {
        emails.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn matches_case_insensitively() {
        let allowed = list(&["ana@example.com", " Bruno@Example.com "]);
        assert!(ensure_allowed("ANA@example.com", &allowed).is_ok());
        assert!(ensure_allowed("bruno@example.com", &allowed).is_ok());
    }

    #[test]
    fn rejects_unlisted_and_empty() {
        let allowed = list(&["ana@example.com"]);
        assert!(matches!(
            ensure_allowed("eve@example.com", &allowed),
            Err(AuthError::NotAllowed { .. })
        ));
        assert!(ensure_allowed("", &list(&[""])).is_err());
    }

    #[test]
    fn empty_list_denies_everyone() {
        assert!(ensure_allowed("ana@example.com", &[]).is_err());
    }
}
