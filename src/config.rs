use crate::error::{FinanceError, FinanceResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_LEDGER_FILE: &str = "finlog.csv";
pub const DEFAULT_CONFIG_FILE: &str = "finlog.json";

/// Thresholds the report's warnings are computed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Expense/income ratio above which spending is flagged.
    #[serde(with = "rust_decimal::serde::str")]
    pub expense_ratio_threshold: Decimal,
    /// Ratings at or below this count as low-necessity.
    pub low_necessity_rating: u8,
    /// Share of rated spending that may be low-necessity before it is flagged.
    #[serde(with = "rust_decimal::serde::str")]
    pub low_necessity_share: Decimal,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            expense_ratio_threshold: Decimal::new(7, 1),
            low_necessity_rating: 2,
            low_necessity_share: Decimal::new(3, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub payment_methods: Vec<String>,
    #[serde(flatten)]
    pub thresholds: Thresholds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            payment_methods: vec![
                "transferencia".to_string(),
                "depósito".to_string(),
                "efectivo".to_string(),
            ],
            thresholds: Thresholds::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> FinanceResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| FinanceError::io(path, e))?;
        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FinanceError::Settings(format!("{}: {}", path.display(), e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> FinanceResult<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Settings(e.to_string()))?;
        fs::write(path, contents).map_err(|e| FinanceError::io(path, e))?;
        info!(path = %path.display(), "settings saved");
        Ok(())
    }

    fn validate(&self) -> FinanceResult<()> {
        let t = &self.thresholds;
        if t.expense_ratio_threshold < Decimal::ZERO {
            return Err(FinanceError::Settings(
                "expense_ratio_threshold cannot be negative".to_string(),
            ));
        }
        if !(1..=6).contains(&t.low_necessity_rating) {
            return Err(FinanceError::Settings(
                "low_necessity_rating must be between 1 and 6".to_string(),
            ));
        }
        if t.low_necessity_share < Decimal::ZERO || t.low_necessity_share > Decimal::ONE {
            return Err(FinanceError::Settings(
                "low_necessity_share must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn knows_payment_method(&self, method: &str) -> bool {
        self.payment_methods
            .iter()
            .any(|m| m.to_lowercase() == method.trim().to_lowercase())
    }

    /// Registers `method`; returns false when it was already known.
    pub fn add_payment_method(&mut self, method: &str) -> bool {
        if self.knows_payment_method(method) {
            return false;
        }
        self.payment_methods.push(method.trim().to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("missing.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.payment_methods.len(), 3);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finlog.json");
        let mut settings = Settings::default();
        settings.add_payment_method("tarjeta");
        settings.thresholds.expense_ratio_threshold = Decimal::new(85, 2);
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finlog.json");
        fs::write(&path, r#"{ "expense_ratio_threshold": "0.5" }"#).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.thresholds.expense_ratio_threshold, Decimal::new(5, 1));
        assert_eq!(loaded.thresholds.low_necessity_rating, 2);
        assert_eq!(loaded.payment_methods, Settings::default().payment_methods);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finlog.json");
        fs::write(&path, r#"{ "low_necessity_rating": 9 }"#).unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(err.to_string().contains("low_necessity_rating"));
    }

    #[test]
    fn test_add_payment_method_is_case_insensitive() {
        let mut settings = Settings::default();
        assert!(!settings.add_payment_method("Efectivo"));
        assert!(settings.add_payment_method("tarjeta"));
        assert!(settings.knows_payment_method("TARJETA"));
    }
}
