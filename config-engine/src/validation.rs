use crate::error::{ConfigError, Result};
use crate::settings::SgcConfig;

/// Post-load checks that the type system cannot express
pub trait ConfigValidator {
    fn validate(&self) -> Result<()>;
}

impl ConfigValidator for SgcConfig {
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }

        let base_url = self.genai.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "genai.base_url must be an http(s) URL, got '{base_url}'"
            )));
        }

        if self.genai.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "genai.timeout_secs must be greater than 0 when set".to_string(),
            ));
        }

        if self.mock_data.start_date > self.mock_data.end_date {
            return Err(ConfigError::ValidationError(format!(
                "mock_data.start_date ({}) is after mock_data.end_date ({})",
                self.mock_data.start_date, self.mock_data.end_date
            )));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SgcConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = SgcConfig::default();
        config.genai.base_url = "flows.internal".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_mock_range() {
        let mut config = SgcConfig::default();
        std::mem::swap(
            &mut config.mock_data.start_date,
            &mut config.mock_data.end_date,
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = SgcConfig::default();
        config.genai.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }
}
