//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `PAYTRACK_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `PAYTRACK_` override YAML values
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `PAYTRACK_SAMPLE_DATA__COUNT=50` sets the `sample_data.count` field.
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use paytrack::config::{Args, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let args = Args::parse();
//! let config = Config::load(&args)?;
//!
//! println!("Server will bind to {}:{}", config.host, config.port);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration Structure
//!
//! - **Server**: `host`, `port` - HTTP server binding configuration
//! - **CORS**: `cors.allowed_origins`, `cors.allow_credentials` - Browser access for the dashboard
//! - **Sample data**: `sample_data.seed_on_startup`, `sample_data.count`, `sample_data.span`
//! - **Alerts**: `alerts.warning_threshold`, `alerts.critical_threshold` - Defaults used until
//!   settings are saved through the API
//! - **Features**: `enable_metrics`, `enable_otel_export` - Optional feature toggles
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! PAYTRACK_PORT=8080
//! PAYTRACK_SAMPLE_DATA__SEED_ON_STARTUP=true
//! PAYTRACK_ALERTS__WARNING_THRESHOLD=60
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::db::models::alert_settings::validate_thresholds;
use crate::errors::Error;
use crate::sample_data::SampleDataConfig;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "PAYTRACK_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// All fields have defaults, so an empty or missing file yields a working server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// CORS configuration for the dashboard frontend
    pub cors: CorsConfig,
    /// Sample payments generated at startup or on request
    pub sample_data: SampleDataConfig,
    /// Alert thresholds used when none have been saved yet
    pub alerts: AlertsConfig,
    /// Enable Prometheus metrics endpoint at `/internal/metrics`
    pub enable_metrics: bool,
    /// Export traces over OTLP (configured through the standard `OTEL_*` variables)
    pub enable_otel_export: bool,
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests
    pub allowed_origins: Vec<CorsOrigin>,
    /// Allow credentials (cookies) in CORS requests
    pub allow_credentials: bool,
    /// Cache preflight requests for this many seconds
    pub max_age: Option<u64>,
}

/// CORS origin specification.
///
/// Can be either a wildcard (`*`) to allow all origins, or a specific URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorsOrigin {
    /// Allow all origins (`*`)
    #[serde(deserialize_with = "parse_wildcard")]
    Wildcard,
    /// Specific origin URL (e.g., `https://dashboard.example.com`)
    #[serde(deserialize_with = "parse_url")]
    Url(Url),
}

fn parse_wildcard<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s == "*" {
        Ok(())
    } else {
        Err(serde::de::Error::custom("Expected '*'"))
    }
}

fn parse_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Url::parse(&s).map_err(serde::de::Error::custom)
}

/// Default alert thresholds, as percentages.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlertsConfig {
    pub warning_threshold: i32,
    pub critical_threshold: i32,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            warning_threshold: 75,
            critical_threshold: 100,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![CorsOrigin::Wildcard],
            allow_credentials: false,
            max_age: Some(3600), // Cache preflight for 1 hour
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors: CorsConfig::default(),
            sample_data: SampleDataConfig::default(),
            alerts: AlertsConfig::default(),
            enable_metrics: true,
            enable_otel_export: false,
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.cors.allowed_origins.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: cors.allowed_origins is empty. Add '*' or the dashboard's origin.".to_string(),
            });
        }

        // Validate that wildcard is not used with credentials
        let has_wildcard = self.cors.allowed_origins.iter().any(|origin| matches!(origin, CorsOrigin::Wildcard));
        if has_wildcard && self.cors.allow_credentials {
            return Err(Error::Internal {
                operation: "Config validation: CORS cannot use wildcard origin '*' with allow_credentials=true. Specify explicit origins."
                    .to_string(),
            });
        }

        if self.sample_data.count == 0 {
            return Err(Error::Internal {
                operation: "Config validation: sample_data.count must be greater than 0".to_string(),
            });
        }
        if self.sample_data.span.is_zero() {
            return Err(Error::Internal {
                operation: "Config validation: sample_data.span must be greater than 0".to_string(),
            });
        }

        validate_thresholds(self.alerts.warning_threshold, self.alerts.critical_threshold).map_err(|message| Error::Internal {
            operation: format!("Config validation: alerts: {message}"),
        })?;

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables override file values; PAYTRACK_CONFIG names the file itself
            .merge(Env::prefixed("PAYTRACK_").ignore(&["config"]).split("__"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::time::Duration;

    fn args(path: &str) -> Args {
        Args {
            config: path.to_string(),
            validate: false,
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load(&args("does-not-exist.yaml"))?;

            assert_eq!(config.port, 8080);
            assert_eq!(config.alerts.warning_threshold, 75);
            assert_eq!(config.alerts.critical_threshold, 100);
            assert_eq!(config.sample_data.count, 200);
            assert_eq!(config.sample_data.span, Duration::from_secs(1440 * 60 * 60));
            assert!(!config.sample_data.seed_on_startup);
            Ok(())
        });
    }

    #[test]
    fn test_yaml_values() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
host: 127.0.0.1
port: 9000
cors:
  allowed_origins:
    - "http://localhost:3000"
  allow_credentials: true
sample_data:
  seed_on_startup: true
  count: 25
  span: 7d
alerts:
  warning_threshold: 40
  critical_threshold: 90
"#,
            )?;

            let config = Config::load(&args("test.yaml"))?;

            assert_eq!(config.bind_address(), "127.0.0.1:9000");
            assert!(matches!(&config.cors.allowed_origins[0], CorsOrigin::Url(url) if url.as_str() == "http://localhost:3000/"));
            assert!(config.sample_data.seed_on_startup);
            assert_eq!(config.sample_data.count, 25);
            assert_eq!(config.sample_data.span, Duration::from_secs(7 * 24 * 60 * 60));
            assert_eq!(config.alerts.warning_threshold, 40);
            Ok(())
        });
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
port: 9000
sample_data:
  count: 25
"#,
            )?;

            jail.set_env("PAYTRACK_HOST", "127.0.0.1");
            jail.set_env("PAYTRACK_PORT", "8081");
            jail.set_env("PAYTRACK_ALERTS__WARNING_THRESHOLD", "50");

            let config = Config::load(&args("test.yaml"))?;

            // Env vars should override
            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 8081);
            assert_eq!(config.alerts.warning_threshold, 50);

            // YAML values should be preserved
            assert_eq!(config.sample_data.count, 25);
            Ok(())
        });
    }

    #[test]
    fn test_config_path_env_is_not_a_field() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.yaml", "port: 9100\n")?;
            jail.set_env("PAYTRACK_CONFIG", "custom.yaml");

            let config = Config::load(&args("custom.yaml"))?;
            assert_eq!(config.port, 9100);
            Ok(())
        });
    }

    #[test]
    fn test_unknown_fields_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "database_url: postgres://localhost/payments\n")?;
            assert!(Config::load(&args("test.yaml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_config_validation_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_wildcard_with_credentials() {
        let mut config = Config::default();
        config.cors.allow_credentials = true;

        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("wildcard"));
    }

    #[test]
    fn test_config_validation_empty_origins() {
        let mut config = Config::default();
        config.cors.allowed_origins.clear();

        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("allowed_origins"));
    }

    #[test]
    fn test_config_validation_zero_sample_count() {
        let mut config = Config::default();
        config.sample_data.count = 0;

        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("sample_data.count"));
    }

    #[test]
    fn test_config_validation_threshold_order() {
        let mut config = Config::default();
        config.alerts.warning_threshold = 100;
        config.alerts.critical_threshold = 100;

        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("less than critical"));
    }
}
