use tracing::debug;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// Replace every occurrence of each secret with [REDACTED]. Secrets shorter
/// than four characters are left alone.
pub fn redact_credentials(text: &str, secrets: &[&str]) -> String {
    let mut result = text.to_string();
    for secret in secrets {
        if secret.len() >= 4 {
            result = result.replace(secret, "[REDACTED]");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_literal() {
        assert_eq!(resolve_credential("AIzaSyLiteral"), "AIzaSyLiteral");
    }

    #[test]
    fn test_resolve_credential_env_var() {
        std::env::set_var("TEST_PROSPECTOR_CRED", "secret123");
        assert_eq!(resolve_credential("$TEST_PROSPECTOR_CRED"), "secret123");
        std::env::remove_var("TEST_PROSPECTOR_CRED");
    }

    #[test]
    fn test_resolve_credential_missing_env_var() {
        assert_eq!(resolve_credential("$NONEXISTENT_PROSPECTOR_CRED"), "$NONEXISTENT_PROSPECTOR_CRED");
    }

    #[test]
    fn test_redact_key_in_url() {
        let text = "error sending request for url (https://maps.googleapis.com/maps/api/place/details/json?place_id=x&key=AIzaSecret)";
        let redacted = redact_credentials(text, &["AIzaSecret"]);
        assert!(!redacted.contains("AIzaSecret"));
        assert!(redacted.contains("key=[REDACTED]"));
    }

    #[test]
    fn test_redact_short_secret_ignored() {
        assert_eq!(redact_credentials("key=ab", &["ab"]), "key=ab");
    }
}
