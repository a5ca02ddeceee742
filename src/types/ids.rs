use serde::{Deserialize, Serialize};

/// Signaturit API access token, sent as a bearer credential.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Result<Self, String> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err("AccessToken must not be empty".to_string());
        }
        if token.chars().any(char::is_whitespace) {
            return Err("AccessToken must not contain whitespace".to_string());
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_valid() {
        let token = "a_token_1234567890".to_string();
        let access_token = AccessToken::new(token.clone()).unwrap();
        assert_eq!(access_token.as_str(), token);
    }

    #[test]
    fn test_access_token_empty() {
        assert!(AccessToken::new("").is_err());
        assert!(AccessToken::new("   ").is_err());
    }

    #[test]
    fn test_access_token_whitespace() {
        let result = AccessToken::new("a token");
        assert!(result.unwrap_err().contains("whitespace"));
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("super_secret").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("super_secret"));
        assert!(debug.contains("REDACTED"));
    }
}
