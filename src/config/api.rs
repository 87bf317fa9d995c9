//! API client configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Omise API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Secret API key
    pub secret_key: String,

    /// Base URL of the API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API version to pin with the `Omise-Version` header
    pub api_version: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Check if using a test-mode key
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("skey_test_")
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("SECRET_KEY"));
        }

        // Verify key prefix so a public key is never used server-side
        if !self.secret_key.starts_with("skey_") {
            return Err(ValidationError::InvalidSecretKey);
        }

        if !(self.api_url.starts_with("https://") || self.api_url.starts_with("http://")) {
            return Err(ValidationError::InvalidApiUrl);
        }

        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            api_url: default_api_url(),
            api_version: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.omise.co".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ApiConfig {
        ApiConfig {
            secret_key: "skey_test_abcd1234".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.api_url, "https://api.omise.co");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_version.is_none());
    }

    #[test]
    fn test_is_test_mode() {
        assert!(valid().is_test_mode());
        let live = ApiConfig {
            secret_key: "skey_5xyz".to_string(),
            ..Default::default()
        };
        assert!(!live.is_test_mode());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_secret_key() {
        assert!(matches!(
            ApiConfig::default().validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validation_public_key_rejected() {
        let config = ApiConfig {
            secret_key: "pkey_test_xxx".to_string(), // Wrong prefix
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidSecretKey)));
    }

    #[test]
    fn test_validation_invalid_url() {
        let config = ApiConfig {
            api_url: "ftp://api.omise.co".to_string(),
            ..valid()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidApiUrl)));
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let zero = ApiConfig {
            timeout_secs: 0,
            ..valid()
        };
        let huge = ApiConfig {
            timeout_secs: 301,
            ..valid()
        };
        assert!(zero.validate().is_err());
        assert!(huge.validate().is_err());
    }
}
