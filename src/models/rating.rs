use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::fmt;
use std::str::FromStr;

/// Self-assessed necessity of an expense, 1 (dispensable) to 6 (essential).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NecessityRating(u8);

impl NecessityRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(value: u8) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!(
                "Necessity rating {} out of range. Use a value between {} and {}.",
                value,
                Self::MIN,
                Self::MAX
            ))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Parses a rating cell. Blank and NaN-like cells mean "not rated".
    pub fn parse_cell(raw: &str) -> Result<Option<Self>, String> {
        let raw = raw.trim();
        if raw.is_empty() || matches!(raw.to_lowercase().as_str(), "nan" | "none" | "null") {
            return Ok(None);
        }

        // Spreadsheet exports turn integer columns with gaps into floats ("4.0").
        let number = Decimal::from_str(raw)
            .map_err(|_| format!("Invalid necessity rating '{}'. Use a whole number.", raw))?;
        if !number.fract().is_zero() {
            return Err(format!("Invalid necessity rating '{}'. Use a whole number.", raw));
        }
        let whole = number.to_u8().ok_or_else(|| {
            format!("Necessity rating {} out of range. Use a value between 1 and 6.", raw)
        })?;
        Self::new(whole).map(Some)
    }
}

impl fmt::Display for NecessityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_bounds() {
        assert_eq!(NecessityRating::new(1).unwrap().value(), 1);
        assert_eq!(NecessityRating::new(6).unwrap().value(), 6);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(NecessityRating::new(0).is_err());
        assert!(NecessityRating::new(7).unwrap_err().contains("out of range"));
    }

    #[test]
    fn test_parse_cell_blank_and_nan() {
        assert_eq!(NecessityRating::parse_cell("").unwrap(), None);
        assert_eq!(NecessityRating::parse_cell("  ").unwrap(), None);
        assert_eq!(NecessityRating::parse_cell("NaN").unwrap(), None);
    }

    #[test]
    fn test_parse_cell_float_with_zero_fraction() {
        let rating = NecessityRating::parse_cell("4.0").unwrap().unwrap();
        assert_eq!(rating.value(), 4);
    }

    #[test]
    fn test_parse_cell_rejects_fraction_and_garbage() {
        assert!(NecessityRating::parse_cell("4.5").is_err());
        assert!(NecessityRating::parse_cell("high").is_err());
        assert!(NecessityRating::parse_cell("-2").is_err());
        assert!(NecessityRating::parse_cell("9").is_err());
    }
}
