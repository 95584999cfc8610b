use crate::error::Result;
use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Prefix of environment variables read by [`SgcConfig::load`]
pub const ENV_PREFIX: &str = "SGC";

/// Root configuration of the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SgcConfig {
    pub server: ServerSettings,
    pub genai: GenAiSettings,
    pub database: DatabaseSettings,
    pub mock_data: MockDataSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub name: String,
    pub host: String,
    pub port: u16,
    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "SGC_USB".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:9002".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

/// External LLM flow service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenAiSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Request timeout; no timeout when unset
    pub timeout_secs: Option<u64>,
    pub linear_programming_flow: String,
    pub branded_pdf_flow: String,
}

impl Default for GenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3400".to_string(),
            api_key: None,
            timeout_secs: None,
            linear_programming_flow: "solveLinearProgrammingFlow".to_string(),
            branded_pdf_flow: "generateBrandedPdfFlow".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

/// Range and seed of the generated expenses and audit logs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MockDataSettings {
    /// Fixed RNG seed; a fresh random dataset on every start when unset
    pub seed: Option<u64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for MockDataSettings {
    fn default() -> Self {
        Self {
            seed: None,
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2025, 10, 27).unwrap_or_default(),
        }
    }
}

impl SgcConfig {
    /// Load defaults, then the optional file, then `SGC__*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Self::environment())
    }

    /// Same as [`SgcConfig::load`] with an explicit environment source
    pub fn load_with(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            debug!(path = %path.display(), "Adding configuration file source");
            builder = builder.add_source(File::from(path).required(false));
        }

        let config = builder.add_source(environment).build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        SgcConfig::environment().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = SgcConfig::load_with(None, env(&[])).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.genai.linear_programming_flow, "solveLinearProgrammingFlow");
        assert!(config.genai.timeout_secs.is_none());
        assert_eq!(
            config.mock_data.start_date,
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
        );
    }

    #[test]
    fn test_environment_overrides() {
        let config = SgcConfig::load_with(
            None,
            env(&[
                ("SGC__SERVER__PORT", "9100"),
                ("SGC__GENAI__BASE_URL", "http://flows.internal:3400"),
                ("SGC__GENAI__TIMEOUT_SECS", "45"),
                ("SGC__MOCK_DATA__SEED", "7"),
            ]),
        )
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.genai.base_url, "http://flows.internal:3400");
        assert_eq!(config.genai.timeout_secs, Some(45));
        assert_eq!(config.mock_data.seed, Some(7));
    }

    #[test]
    fn test_file_source() {
        let path = std::env::temp_dir().join(format!("sgc-config-{}.yaml", std::process::id()));
        std::fs::write(
            &path,
            "server:\n  port: 7070\nmock_data:\n  start_date: 2025-01-01\n  end_date: 2025-01-31\n",
        )
        .unwrap();

        let config = SgcConfig::load_with(Some(&path), env(&[])).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.port, 7070);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(
            config.mock_data.end_date,
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = Path::new("/nonexistent/sgc.yaml");
        let config = SgcConfig::load_with(Some(path), env(&[])).unwrap();
        assert_eq!(config.server.name, "SGC_USB");
    }
}
