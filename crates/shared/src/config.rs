//! Application configuration management.

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::RoundingMode;

/// Application configuration.
///
/// Every field has a default, so an empty environment yields a usable config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Billing configuration.
    #[serde(default)]
    pub billing: BillingConfig,
    /// Reporting configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Billing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Rounding policy for paise and whole-rupee totals.
    #[serde(default)]
    pub rounding: RoundingMode,
    /// Symbol printed in front of formatted amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::default(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

/// Reporting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// IANA time zone used to decide which calendar day a record falls on.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "Asia/Kolkata".to_string()
}

impl ReportingConfig {
    /// Parses the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if the name is not a known IANA zone.
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::Configuration(format!("Unknown time zone: {}", self.timezone)))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "agrobill=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("AGROBILL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.billing.rounding, RoundingMode::HalfUp);
        assert_eq!(config.billing.currency_symbol, "₹");
        assert_eq!(config.reporting.timezone, "Asia/Kolkata");
        assert_eq!(config.log.filter, "agrobill=info");
        assert!(!config.log.json);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "AGROBILL__BILLING__ROUNDING",
                "AGROBILL__REPORTING__TIMEZONE",
                "RUN_MODE",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.billing.rounding, RoundingMode::HalfUp);
                assert_eq!(config.reporting.tz().unwrap(), chrono_tz::Asia::Kolkata);
            },
        );
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("AGROBILL__BILLING__ROUNDING", Some("half_even")),
                ("AGROBILL__REPORTING__TIMEZONE", Some("Asia/Dubai")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.billing.rounding, RoundingMode::HalfEven);
                assert_eq!(config.reporting.tz().unwrap(), chrono_tz::Asia::Dubai);
            },
        );
    }

    #[test]
    fn test_unknown_timezone_is_configuration_error() {
        let reporting = ReportingConfig {
            timezone: "Mars/Olympus".to_string(),
        };
        let err = reporting.tz().unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
