//! Date-of-birth validation
//!
//! The only fallible normalizer. Validation is deliberately relaxed: the
//! day is bounds-checked to 1..=31 without per-month or leap-year rules,
//! so `1999-02-31` is accepted.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

const MIN_YEAR: u32 = 1800;
const MAX_YEAR: u32 = 2100;

static DOB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("static DOB pattern is valid")
});

/// Date-of-birth validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DobError {
    #[error("date of birth must be YYYY-MM-DD")]
    Pattern,

    #[error("year {0} outside 1800..=2100")]
    Year(u32),

    #[error("month {0} outside 1..=12")]
    Month(u32),

    #[error("day {0} outside 1..=31")]
    Day(u32),
}

/// Validate a date of birth and return its canonical `YYYY-MM-DD` form.
///
/// Surrounding whitespace is ignored; anything else that deviates from the
/// pattern is rejected.
pub fn normalize_dob(dob: &str) -> Result<String, DobError> {
    let dob = dob.trim();
    let caps = DOB_PATTERN.captures(dob).ok_or(DobError::Pattern)?;

    let field = |i: usize| -> Result<u32, DobError> {
        caps[i].parse::<u32>().map_err(|_| DobError::Pattern)
    };
    let (year, month, day) = (field(1)?, field(2)?, field(3)?);

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(DobError::Year(year));
    }
    if !(1..=12).contains(&month) {
        return Err(DobError::Month(month));
    }
    if !(1..=31).contains(&day) {
        return Err(DobError::Day(day));
    }

    Ok(dob.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dob() {
        assert_eq!(normalize_dob("1892-01-03").unwrap(), "1892-01-03");
        assert_eq!(normalize_dob(" 2000-12-31\n").unwrap(), "2000-12-31");
    }

    #[test]
    fn test_relaxed_calendar() {
        assert_eq!(normalize_dob("1999-02-31").unwrap(), "1999-02-31");
        assert_eq!(normalize_dob("1900-02-29").unwrap(), "1900-02-29");
    }

    #[test]
    fn test_pattern_mismatch() {
        for bad in ["", "1892-1-03", "03/01/1892", "18920103", "1892-01-03T00:00", "１８９２-01-03"] {
            assert_eq!(normalize_dob(bad), Err(DobError::Pattern), "{bad:?}");
        }
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(normalize_dob("1799-12-31"), Err(DobError::Year(1799)));
        assert_eq!(normalize_dob("2101-01-01"), Err(DobError::Year(2101)));
        assert_eq!(normalize_dob("2000-00-10"), Err(DobError::Month(0)));
        assert_eq!(normalize_dob("2000-13-10"), Err(DobError::Month(13)));
        assert_eq!(normalize_dob("2000-01-00"), Err(DobError::Day(0)));
        assert_eq!(normalize_dob("2000-01-32"), Err(DobError::Day(32)));
    }

    #[test]
    fn test_bounds_inclusive() {
        assert!(normalize_dob("1800-01-01").is_ok());
        assert!(normalize_dob("2100-12-31").is_ok());
    }
}
