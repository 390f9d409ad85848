//! Calendar day arithmetic.
//!
//! A [`DayKey`] identifies one calendar day in the user's local timezone,
//! formatted as `YYYY-MM-DD`. Streak logic compares days by whole-day
//! distance, never by raw string difference.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// One calendar day in the user's local timezone.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

const DAY_FORMAT: &str = "%Y-%m-%d";

impl DayKey {
    /// Derive the key for the current day from the local wall clock.
    ///
    /// Never memoized -- reflects real elapsed time, including when the
    /// process is reopened after being suspended for multiple days.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a stored key. Malformed input yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)
            .ok()
            .map(Self)
    }

    /// Whole-day signed distance from `self` to `other`.
    pub fn distance_to(&self, other: DayKey) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// The following day. Panics only at the end of the representable
    /// calendar range.
    pub fn next(&self) -> Self {
        Self(self.0.succ_opt().expect("date out of range"))
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DAY_FORMAT).map(Self)
    }
}

/// Whole-day difference between two keys; used for gap detection only.
pub fn day_distance(from: DayKey, to: DayKey) -> i64 {
    from.distance_to(to)
}

/// Conservative gap test for streak resets.
///
/// `None` stands for an absent or unparseable stored day and counts as
/// "more than one day elapsed", so a malformed marker is always reset
/// eligible.
pub fn gap_exceeds_one(last: Option<DayKey>, today: DayKey) -> bool {
    match last {
        Some(day) => day.distance_to(today) > 1,
        None => true,
    }
}
