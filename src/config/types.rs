//! Configuration types for the engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the `engine.yaml` file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// When a semi-annual benefit's monthly payment counts as received.
///
/// Benefits are paid in arrears near month end. With no `payment_day`, the
/// current month never counts; with `payment_day = Some(d)`, the current month
/// counts once the as-of date reaches day `d`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrearsConvention {
    /// Day of month from which the current month's payment counts.
    #[serde(default)]
    pub payment_day: Option<u32>,
}

/// Largest `validation.max_amount` the engine accepts. Totals are summed over a
/// year of weekly periods across many sources and must stay far from the
/// `Decimal` range.
pub const MAX_AMOUNT_CEILING: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Bounds applied to every date and amount of an income source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// The earliest accepted year.
    #[serde(default = "default_min_year")]
    pub min_year: i32,
    /// The latest accepted year.
    #[serde(default = "default_max_year")]
    pub max_year: i32,
    /// The largest accepted per-period amount.
    #[serde(default = "default_max_amount")]
    pub max_amount: Decimal,
}

fn default_min_year() -> i32 {
    1900
}

fn default_max_year() -> i32 {
    2200
}

fn default_max_amount() -> Decimal {
    Decimal::from(1_000_000_000)
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            max_year: default_max_year(),
            max_amount: default_max_amount(),
        }
    }
}

impl ValidationRules {
    /// Returns whether `year` is inside the accepted range.
    pub fn contains_year(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }
}

/// The complete engine configuration.
///
/// # Example
///
/// ```
/// use accrual_engine::config::EngineConfig;
///
/// let config = EngineConfig::from_yaml_str("semi_annual:\n  payment_day: 25\n").unwrap();
/// assert_eq!(config.semi_annual.payment_day, Some(25));
/// assert_eq!(config.validation.min_year, 1900);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Semi-annual benefit payment convention.
    #[serde(default)]
    pub semi_annual: ArrearsConvention,
    /// Date validation bounds.
    #[serde(default)]
    pub validation: ValidationRules,
}

impl EngineConfig {
    /// Parses and validates a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        let config: EngineConfig =
            serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every configured value is usable.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(day) = self.semi_annual.payment_day {
            if !(1..=31).contains(&day) {
                return Err(EngineError::InvalidConfig {
                    field: "semi_annual.payment_day".to_string(),
                    message: format!("must be between 1 and 31, got {}", day),
                });
            }
        }
        if self.validation.min_year > self.validation.max_year {
            return Err(EngineError::InvalidConfig {
                field: "validation.min_year".to_string(),
                message: format!(
                    "{} is after validation.max_year {}",
                    self.validation.min_year, self.validation.max_year
                ),
            });
        }
        let max_amount = self.validation.max_amount;
        if max_amount <= Decimal::ZERO || max_amount > MAX_AMOUNT_CEILING {
            return Err(EngineError::InvalidConfig {
                field: "validation.max_amount".to_string(),
                message: format!(
                    "must be positive and at most {}, got {}",
                    MAX_AMOUNT_CEILING, max_amount
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.semi_annual.payment_day, None);
        assert_eq!(config.validation, ValidationRules::default());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_validation_section_keeps_other_default() {
        let config = EngineConfig::from_yaml_str("validation:\n  min_year: 1950\n").unwrap();
        assert_eq!(config.validation.min_year, 1950);
        assert_eq!(config.validation.max_year, 2200);
    }

    #[test]
    fn test_out_of_range_payment_day_is_rejected() {
        match EngineConfig::from_yaml_str("semi_annual:\n  payment_day: 32\n") {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "semi_annual.payment_day")
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_year_range_is_rejected() {
        let yaml = "validation:\n  min_year: 2100\n  max_year: 2000\n";
        assert!(matches!(
            EngineConfig::from_yaml_str(yaml),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_max_amount_is_read_from_yaml() {
        let config = EngineConfig::from_yaml_str("validation:\n  max_amount: \"250000\"\n").unwrap();
        assert_eq!(config.validation.max_amount, Decimal::from(250_000));
        assert_eq!(config.validation.min_year, 1900);
    }

    #[test]
    fn test_non_positive_max_amount_is_rejected() {
        match EngineConfig::from_yaml_str("validation:\n  max_amount: \"0\"\n") {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "validation.max_amount")
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_max_amount_above_ceiling_is_rejected() {
        let mut config = EngineConfig::default();
        config.validation.max_amount = MAX_AMOUNT_CEILING + Decimal::ONE;
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig { .. })
        ));
        config.validation.max_amount = MAX_AMOUNT_CEILING;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        assert!(matches!(
            EngineConfig::from_yaml_str("semi_annual: [unclosed"),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_contains_year_is_inclusive() {
        let rules = ValidationRules::default();
        assert!(rules.contains_year(1900));
        assert!(rules.contains_year(2200));
        assert!(!rules.contains_year(1899));
        assert_eq!(rules.max_amount, Decimal::from(1_000_000_000));
    }
}
