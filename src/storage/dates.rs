use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

// Ledgers written by different tools disagree on date layout, so the shape of
// the cell picks the chrono formats to try, in order. Year-last dates are
// month-first unless the first field cannot be a month.
static DATE_SHAPES: LazyLock<Vec<(Regex, &'static [&'static str])>> = LazyLock::new(|| {
    let shapes: [(&str, &'static [&'static str]); 4] = [
        (r"^\d{4}-\d{1,2}-\d{1,2}$", &["%Y-%m-%d"]),
        (r"^\d{4}/\d{1,2}/\d{1,2}$", &["%Y/%m/%d"]),
        (r"^\d{1,2}/\d{1,2}/\d{4}$", &["%m/%d/%Y", "%d/%m/%Y"]),
        (r"^\d{1,2}-\d{1,2}-\d{4}$", &["%m-%d-%Y", "%d-%m-%Y"]),
    ];
    shapes
        .into_iter()
        .map(|(pattern, formats)| (Regex::new(pattern).expect("static date pattern"), formats))
        .collect()
});

static TIME_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{1,2}-\d{1,2})[ T]\d{1,2}:\d{2}(:\d{2}(\.\d+)?)?$")
        .expect("static time pattern")
});

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    let date_part = match TIME_SUFFIX.captures(raw) {
        Some(caps) => caps.get(1).map_or(raw, |m| m.as_str()),
        None => raw,
    };

    DATE_SHAPES
        .iter()
        .find(|(shape, _)| shape.is_match(date_part))
        .and_then(|(_, formats)| {
            formats
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
        })
        .ok_or_else(|| format!("Invalid date '{}'. Please use YYYY-MM-DD.", raw))
}

/// Inclusive date window; an open side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Parses `FROM..TO` (or `FROM,TO`); either side may be left empty and
    /// each side takes any layout [`parse_date`] accepts.
    pub fn parse(input: &str) -> Result<Self, String> {
        let s = input.trim();
        let (left, right) = if let Some((a, b)) = s.split_once("..") {
            (a.trim(), b.trim())
        } else if let Some((a, b)) = s.split_once(',') {
            (a.trim(), b.trim())
        } else {
            return Err("Invalid date range. Use YYYY-MM-DD..YYYY-MM-DD".to_string());
        };

        let bound = |side: &str| (!side.is_empty()).then(|| parse_date(side)).transpose();
        let from = bound(left)?;
        let to = bound(right)?;

        if let (Some(f), Some(t)) = (from, to)
            && f > t
        {
            return Err("Invalid range: start date must be <= end date".to_string());
        }

        Ok(Self { from, to })
    }
}
