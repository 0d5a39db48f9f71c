use crate::error::{BillSplitError, Result};
use crate::utils::DEFAULT_TIMESTAMP_FORMATS;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const START_TIME_COLUMN: &str = "Charging Start Time";
pub const ENERGY_COLUMN: &str = "Energy Delivered (kWh)";
pub const DEFAULT_CURRENCY: &str = "CHF";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum Language {
    #[default]
    German,
    English,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SplitConfig {
    #[schemars(description = "Exact header name of the session start column")]
    pub start_time_column: String,

    #[schemars(description = "Exact header name of the delivered energy column (kWh)")]
    pub energy_column: String,

    #[schemars(description = "Field delimiter of the usage export")]
    pub delimiter: char,

    #[schemars(
        description = "chrono format strings tried in order for the start column. RFC 3339 is always accepted."
    )]
    pub timestamp_formats: Vec<String>,

    #[schemars(description = "Currency label printed in front of amounts, e.g. CHF")]
    pub currency: String,

    #[schemars(description = "Language of the notification message")]
    pub language: Language,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            start_time_column: START_TIME_COLUMN.to_string(),
            energy_column: ENERGY_COLUMN.to_string(),
            delimiter: ',',
            timestamp_formats: DEFAULT_TIMESTAMP_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            currency: DEFAULT_CURRENCY.to_string(),
            language: Language::German,
        }
    }
}

impl SplitConfig {
    /// Reads a (possibly partial) JSON document; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The delimiter has to be a single ASCII character other than a line break.
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '\n' | '\r') {
            return Err(BillSplitError::InvalidConfig(format!(
                "delimiter {:?} must be a single ASCII character other than a line break",
                self.delimiter
            )));
        }
        Ok(())
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// The delimiter as the single byte the CSV reader expects. A config built
    /// by hand that skipped [`SplitConfig::validate`] falls back to a comma.
    pub(crate) fn delimiter_byte(&self) -> u8 {
        if self.validate().is_ok() {
            self.delimiter as u8
        } else {
            warn!(
                "Unusable delimiter {:?} in config, reading the export as comma-separated",
                self.delimiter
            );
            b','
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SplitConfig::default();
        assert_eq!(config.start_time_column, "Charging Start Time");
        assert_eq!(config.energy_column, "Energy Delivered (kWh)");
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.currency, "CHF");
        assert_eq!(config.language, Language::German);
        assert!(!config.timestamp_formats.is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            SplitConfig::from_json_str(r#"{ "currency": "EUR", "language": "English" }"#).unwrap();
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.language, Language::English);
        assert_eq!(config.energy_column, ENERGY_COLUMN);
        assert_eq!(config.delimiter_byte(), b',');
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let err = SplitConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, crate::BillSplitError::Serialization(_)));
    }

    #[test]
    fn test_unusable_delimiter_is_rejected() {
        let err = SplitConfig::from_json_str(r#"{ "delimiter": "§" }"#).unwrap_err();
        assert!(matches!(err, BillSplitError::InvalidConfig(_)));
        assert!(SplitConfig::from_json_str(r#"{ "delimiter": "\n" }"#).is_err());

        let semicolon = SplitConfig::from_json_str(r#"{ "delimiter": ";" }"#).unwrap();
        assert_eq!(semicolon.delimiter_byte(), b';');

        let by_hand = SplitConfig {
            delimiter: '§',
            ..SplitConfig::default()
        };
        assert!(by_hand.validate().is_err());
        assert_eq!(by_hand.delimiter_byte(), b',');
    }

    #[test]
    fn test_builders() {
        let config = SplitConfig::default()
            .with_language(Language::English)
            .with_currency("EUR");
        assert_eq!(config.language, Language::English);
        assert_eq!(config.currency, "EUR");
    }
}
