//! Date normalization for the two date renderings the dashboard uses.
//!
//! Listing pages write expiry dates as `March 05, 2024`; order-detail pages
//! write purchase dates as `5th March, 2024`. Both carry a full
//! year/month/day, so parsing needs no reference instant. The canonical
//! output form is ISO `YYYY-MM-DD`, which keeps the exported lines stable
//! across machines and locales.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::ScrapeError;

/// The date layout a raw fragment is expected to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `March 05, 2024`: card expiry dates on listing pages.
    MonthDayYear,
    /// `5th March, 2024`: purchase dates on order-detail pages. The
    /// ordinal suffix is stripped before parsing.
    OrdinalDayMonthYear,
}

impl SourceFormat {
    fn chrono_pattern(self) -> &'static str {
        match self {
            Self::MonthDayYear => "%B %d, %Y",
            Self::OrdinalDayMonthYear => "%d %B, %Y",
        }
    }
}

/// Ordinal day suffix at the start of a purchase date: `1st`, `22nd`, `3rd`,
/// `15th`.
static ORDINAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)").expect("ordinal suffix pattern is valid")
});

/// Normalizes a raw date fragment to `YYYY-MM-DD`.
///
/// Absent, empty, or whitespace-only input resolves to `Ok(None)` without
/// touching the parser; an optional field that simply is not there.
///
/// # Errors
///
/// Returns [`ScrapeError::DateParse`] when present text does not parse
/// strictly under `format`. A malformed date means the site changed its
/// rendering and every other extracted date is suspect, so this is fatal
/// rather than a soft `None`.
pub fn normalize(raw: Option<&str>, format: SourceFormat) -> Result<Option<String>, ScrapeError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let prepared = match format {
        SourceFormat::MonthDayYear => trimmed.to_owned(),
        SourceFormat::OrdinalDayMonthYear => ORDINAL_SUFFIX.replace(trimmed, "$1").into_owned(),
    };

    let parsed = NaiveDate::parse_from_str(&prepared, format.chrono_pattern()).map_err(|_| {
        ScrapeError::DateParse {
            input: trimmed.to_owned(),
            format: format.chrono_pattern(),
        }
    })?;

    Ok(Some(parsed.format("%Y-%m-%d").to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_input_is_none() {
        assert_eq!(normalize(None, SourceFormat::MonthDayYear).unwrap(), None);
    }

    #[test]
    fn empty_input_is_none() {
        assert_eq!(normalize(Some(""), SourceFormat::MonthDayYear).unwrap(), None);
    }

    #[test]
    fn whitespace_input_is_none() {
        assert_eq!(
            normalize(Some("   \n"), SourceFormat::OrdinalDayMonthYear).unwrap(),
            None
        );
    }

    #[test]
    fn parses_month_day_year() {
        assert_eq!(
            normalize(Some("March 05, 2024"), SourceFormat::MonthDayYear).unwrap(),
            Some("2024-03-05".to_owned())
        );
    }

    #[test]
    fn parses_month_day_year_without_zero_padding() {
        assert_eq!(
            normalize(Some("March 5, 2024"), SourceFormat::MonthDayYear).unwrap(),
            Some("2024-03-05".to_owned())
        );
    }

    #[test]
    fn parses_ordinal_day_month_year() {
        assert_eq!(
            normalize(Some("5th March, 2024"), SourceFormat::OrdinalDayMonthYear).unwrap(),
            Some("2024-03-05".to_owned())
        );
    }

    #[test]
    fn strips_each_ordinal_suffix() {
        for (raw, expected) in [
            ("1st January, 2025", "2025-01-01"),
            ("2nd February, 2025", "2025-02-02"),
            ("3rd March, 2025", "2025-03-03"),
            ("4th April, 2025", "2025-04-04"),
            ("21st December, 2025", "2025-12-21"),
            ("22nd December, 2025", "2025-12-22"),
        ] {
            assert_eq!(
                normalize(Some(raw), SourceFormat::OrdinalDayMonthYear).unwrap(),
                Some(expected.to_owned()),
                "failed for input {raw:?}"
            );
        }
    }

    #[test]
    fn trims_surrounding_whitespace_before_parsing() {
        assert_eq!(
            normalize(Some("  March 05, 2024 "), SourceFormat::MonthDayYear).unwrap(),
            Some("2024-03-05".to_owned())
        );
    }

    #[test]
    fn malformed_input_is_a_hard_error() {
        let err = normalize(Some("sometime soon"), SourceFormat::MonthDayYear).unwrap_err();
        assert!(
            matches!(err, ScrapeError::DateParse { ref input, .. } if input == "sometime soon"),
            "expected ScrapeError::DateParse, got: {err:?}"
        );
    }

    #[test]
    fn format_mismatch_is_a_hard_error() {
        // An ordinal purchase date fed through the expiry format must not
        // silently produce a wrong-but-plausible date.
        let result = normalize(Some("5th March, 2024"), SourceFormat::MonthDayYear);
        assert!(result.is_err(), "expected Err, got: {result:?}");
    }
}
