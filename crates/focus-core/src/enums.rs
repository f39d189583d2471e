//! Field enums for the task entity.
//!
//! Each enum has a lowercase (or, for weekdays, two-letter uppercase) storage
//! string that matches its serde representation, so the same text is used on
//! the wire and in SQL columns.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Urgency
// ---------------------------------------------------------------------------

/// Priority label. Presentation only; it has no effect on listing or recurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Critical,
    High,
    Medium,
    #[default]
    Low,
}

impl Urgency {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// Lifecycle bucket a task is listed under.
///
/// ```text
/// any ──complete──→ done
/// any ──activate──→ active
/// any ──update────→ any
/// ```
///
/// There is no forbidden transition, unlike status machines elsewhere: the
/// client moves tasks freely between buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Active,
    Future,
    Done,
}

impl Section {
    pub const ALL: [Self; 3] = [Self::Active, Self::Future, Self::Done];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Future => "future",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "unknown section '{s}' (expected one of: active, future, done)"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Weekday
// ---------------------------------------------------------------------------

/// Weekday tag used in a task's regularity set.
///
/// Variants are declared in ISO order (Monday first), so the derived `Ord`
/// sorts a regularity set into calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Mo,
    Tu,
    We,
    Th,
    Fr,
    Sa,
    Su,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Mo,
        Self::Tu,
        Self::We,
        Self::Th,
        Self::Fr,
        Self::Sa,
        Self::Su,
    ];

    /// Map a zero-based ISO weekday index (Monday = 0) to its tag.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Internal` for an index outside `0..=6`. A correct
    /// calendar computation never produces one.
    pub fn from_iso_index(index: u32) -> Result<Self, CoreError> {
        match index {
            0 => Ok(Self::Mo),
            1 => Ok(Self::Tu),
            2 => Ok(Self::We),
            3 => Ok(Self::Th),
            4 => Ok(Self::Fr),
            5 => Ok(Self::Sa),
            6 => Ok(Self::Su),
            other => Err(CoreError::Internal(format!(
                "weekday index {other} has no tag"
            ))),
        }
    }

    /// Tag for the weekday a calendar date falls on.
    ///
    /// # Errors
    ///
    /// See [`Weekday::from_iso_index`].
    pub fn for_date(date: NaiveDate) -> Result<Self, CoreError> {
        Self::from_iso_index(date.weekday().num_days_from_monday())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mo => "MO",
            Self::Tu => "TU",
            Self::We => "WE",
            Self::Th => "TH",
            Self::Fr => "FR",
            Self::Sa => "SA",
            Self::Su => "SU",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // --- Serde roundtrip tests ---

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(urgency_critical, Urgency, Urgency::Critical, "critical");
    test_serde_roundtrip!(urgency_low, Urgency, Urgency::Low, "low");
    test_serde_roundtrip!(section_future, Section, Section::Future, "future");
    test_serde_roundtrip!(weekday_we, Weekday, Weekday::We, "WE");
    test_serde_roundtrip!(weekday_su, Weekday, Weekday::Su, "SU");

    // --- as_str matches serde ---

    #[test]
    fn as_str_matches_serde() {
        for section in Section::ALL {
            let json = serde_json::to_string(&section).unwrap();
            assert_eq!(json, format!("\"{}\"", section.as_str()));
        }
        for day in Weekday::ALL {
            let json = serde_json::to_string(&day).unwrap();
            assert_eq!(json, format!("\"{}\"", day.as_str()));
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(Urgency::default(), Urgency::Low);
        assert_eq!(Section::default(), Section::Active);
    }

    #[test]
    fn section_from_str() {
        assert_eq!("done".parse::<Section>().unwrap(), Section::Done);
        assert!(matches!(
            "archived".parse::<Section>(),
            Err(CoreError::Validation(_))
        ));
    }

    // --- Weekday mapping ---

    #[rstest]
    #[case(0, Weekday::Mo)]
    #[case(1, Weekday::Tu)]
    #[case(2, Weekday::We)]
    #[case(3, Weekday::Th)]
    #[case(4, Weekday::Fr)]
    #[case(5, Weekday::Sa)]
    #[case(6, Weekday::Su)]
    fn iso_index_maps_to_tag(#[case] index: u32, #[case] expected: Weekday) {
        assert_eq!(Weekday::from_iso_index(index).unwrap(), expected);
    }

    #[test]
    fn out_of_range_index_is_internal_error() {
        assert!(matches!(
            Weekday::from_iso_index(7),
            Err(CoreError::Internal(_))
        ));
    }

    #[rstest]
    #[case(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(), Weekday::Mo)]
    #[case(NaiveDate::from_ymd_opt(2026, 10, 21).unwrap(), Weekday::We)]
    #[case(NaiveDate::from_ymd_opt(2026, 10, 24).unwrap(), Weekday::Sa)]
    #[case(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), Weekday::Th)]
    fn date_maps_to_weekday(#[case] date: NaiveDate, #[case] expected: Weekday) {
        assert_eq!(Weekday::for_date(date).unwrap(), expected);
    }

    #[test]
    fn weekday_ord_is_iso_order() {
        let mut days = vec![Weekday::Su, Weekday::We, Weekday::Mo];
        days.sort();
        assert_eq!(days, vec![Weekday::Mo, Weekday::We, Weekday::Su]);
    }
}
