//! User settings for fintrack
//!
//! Manages display currency, exchange rates, report defaults and the date
//! format used for terminal output.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::paths::FintrackPaths;
use crate::analytics::DEFAULT_TREND_WINDOW;
use crate::error::FintrackError;
use crate::models::{Currency, CurrencyFormatter, FALLBACK_CATEGORY};

/// Keys accepted by [`Settings::set_value`]
pub const SETTING_KEYS: &[&str] = &[
    "base_currency",
    "display_currency",
    "trend_window_months",
    "fallback_category",
    "date_format",
    "rate.<CODE>",
];

/// User settings for fintrack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency every amount is stored in
    #[serde(default)]
    pub base_currency: Currency,

    /// Currency amounts are shown in
    #[serde(default)]
    pub display_currency: Currency,

    /// Units of each currency per one unit of the base currency, keyed by code
    #[serde(default)]
    pub exchange_rates: BTreeMap<String, f64>,

    /// Number of months in trend series
    #[serde(default = "default_trend_window")]
    pub trend_window_months: usize,

    /// Label for records without a category
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_trend_window() -> usize {
    DEFAULT_TREND_WINDOW
}

fn default_fallback_category() -> String {
    FALLBACK_CATEGORY.to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            base_currency: Currency::default(),
            display_currency: Currency::default(),
            exchange_rates: BTreeMap::new(),
            trend_window_months: default_trend_window(),
            fallback_category: default_fallback_category(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FintrackPaths) -> Result<Self, FintrackError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FintrackError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FintrackError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            log::debug!("Loaded settings from {}", settings_path.display());
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FintrackPaths) -> Result<(), FintrackError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FintrackError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            FintrackError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Rate from the base currency to `currency`
    ///
    /// The base currency is always 1.0; a currency without a configured rate
    /// is shown unconverted.
    pub fn rate_for(&self, currency: Currency) -> f64 {
        if currency == self.base_currency {
            return 1.0;
        }
        self.exchange_rates
            .get(currency.code())
            .copied()
            .unwrap_or(1.0)
    }

    /// Formatter for the display currency
    pub fn formatter(&self) -> CurrencyFormatter {
        let rate = self.rate_for(self.display_currency);
        if self.display_currency != self.base_currency
            && !self.exchange_rates.contains_key(self.display_currency.code())
        {
            log::warn!(
                "No exchange rate configured for {}; showing {} amounts unconverted",
                self.display_currency,
                self.base_currency
            );
        }
        CurrencyFormatter::new(self.display_currency, rate)
    }

    /// Update one setting from its textual form
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), FintrackError> {
        let invalid = |reason: String| FintrackError::Config(format!("{}: {}", key, reason));

        match key {
            "base_currency" => {
                self.base_currency = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            }
            "display_currency" => {
                self.display_currency = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            }
            "trend_window_months" => {
                let months: usize = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid(format!("'{}' is not a whole number", value)))?;
                if months == 0 {
                    return Err(invalid("must be at least 1".into()));
                }
                self.trend_window_months = months;
            }
            "fallback_category" => {
                if value.trim().is_empty() {
                    return Err(invalid("cannot be empty".into()));
                }
                self.fallback_category = value.trim().to_string();
            }
            "date_format" => {
                if value.trim().is_empty() {
                    return Err(invalid("cannot be empty".into()));
                }
                if StrftimeItems::new(value).any(|item| matches!(item, Item::Error)) {
                    return Err(invalid(format!("'{}' is not a valid date format", value)));
                }
                self.date_format = value.to_string();
            }
            _ => {
                let code = key
                    .strip_prefix("rate.")
                    .ok_or_else(|| {
                        FintrackError::Config(format!(
                            "Unknown setting '{}'. Expected one of: {}",
                            key,
                            SETTING_KEYS.join(", ")
                        ))
                    })?;
                let currency: Currency = code.parse().map_err(|e| invalid(format!("{}", e)))?;
                let rate: f64 = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid(format!("'{}' is not a number", value)))?;
                if !rate.is_finite() || rate <= 0.0 {
                    return Err(invalid("rate must be a positive number".into()));
                }
                self.exchange_rates.insert(currency.code().to_string(), rate);
            }
        }
        Ok(())
    }

    /// Settings as `key = value` lines
    pub fn describe(&self) -> String {
        let mut lines = vec![
            format!("base_currency = {}", self.base_currency),
            format!("display_currency = {}", self.display_currency),
            format!("trend_window_months = {}", self.trend_window_months),
            format!("fallback_category = {}", self.fallback_category),
            format!("date_format = {}", self.date_format),
        ];
        for (code, rate) in &self.exchange_rates {
            lines.push(format!("rate.{} = {}", code, rate));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.display_currency, Currency::Usd);
        assert_eq!(settings.trend_window_months, 6);
        assert_eq!(settings.fallback_category, "Other");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.set_value("display_currency", "inr").unwrap();
        settings.set_value("rate.INR", "83.0").unwrap();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.rate_for(Currency::Inr), 83.0);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"display_currency":"EUR"}"#).unwrap();
        assert_eq!(settings.display_currency, Currency::Eur);
        assert_eq!(settings.trend_window_months, 6);
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_formatter_applies_rate() {
        let mut settings = Settings::default();
        settings.set_value("display_currency", "EUR").unwrap();
        settings.set_value("rate.eur", "0.5").unwrap();

        let fmt = settings.formatter();
        assert_eq!(fmt.format(Money::from_units(10)), "€5.00");
    }

    #[test]
    fn test_formatter_without_rate_is_unconverted() {
        let mut settings = Settings::default();
        settings.set_value("display_currency", "GBP").unwrap();
        assert_eq!(settings.formatter().rate(), 1.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut settings = Settings::default();
        assert!(settings.set_value("trend_window_months", "0").is_err());
        assert!(settings.set_value("trend_window_months", "six").is_err());
        assert!(settings.set_value("rate.EUR", "-1").is_err());
        assert!(settings.set_value("rate.XYZ", "1").is_err());
        assert!(settings.set_value("colour", "blue").is_err());
        assert!(settings.set_value("fallback_category", "  ").is_err());
        assert!(settings.set_value("date_format", "%Q").is_err());
        assert!(settings.set_value("date_format", "%d/%m/%Y").is_ok());
    }
}
