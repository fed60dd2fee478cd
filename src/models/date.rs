//! Calendar date model.
//!
//! A simplified calendar with twelve 30-day months. Dates form a total
//! order (year, then month, then day) and advance with month and year
//! rollover.
//!
//! # Time Model
//! Day differences are exact under this calendar: a year is 360 days, so a
//! date maps one-to-one onto a day ordinal. Advancing works on that ordinal
//! and fails with [`DateError::Overflow`] past the last representable year.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Days in every month.
pub const DAYS_IN_MONTH: u32 = 30;
/// Months in every year.
pub const MONTHS_IN_YEAR: u32 = 12;

/// Error returned for out-of-range date components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Day outside `1..=30`.
    #[error("day {0} is out of range 1..=30")]
    InvalidDay(u32),
    /// Month outside `1..=12`.
    #[error("month {0} is out of range 1..=12")]
    InvalidMonth(u32),
    /// The result would lie past the representable year range.
    #[error("date arithmetic overflowed the year range")]
    Overflow,
}

/// A calendar date.
///
/// Field order matters: the derived `Ord` compares year, then month, then day.
/// Deserialization goes through [`Date::new`], so out-of-range input is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDate")]
pub struct Date {
    year: i32,
    month: u32,
    day: u32,
}

/// Unchecked wire form of [`Date`].
#[derive(Deserialize)]
struct RawDate {
    year: i32,
    month: u32,
    day: u32,
}

impl TryFrom<RawDate> for Date {
    type Error = DateError;

    fn try_from(raw: RawDate) -> Result<Self, Self::Error> {
        Date::new(raw.day, raw.month, raw.year)
    }
}

impl Date {
    /// Creates a date, validating day and month.
    pub fn new(day: u32, month: u32, year: i32) -> Result<Self, DateError> {
        if !(1..=DAYS_IN_MONTH).contains(&day) {
            return Err(DateError::InvalidDay(day));
        }
        if !(1..=MONTHS_IN_YEAR).contains(&month) {
            return Err(DateError::InvalidMonth(month));
        }
        Ok(Self { year, month, day })
    }

    /// Day of month (1-30).
    #[inline]
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Month (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Year.
    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Moves to the next day, rolling over month and year.
    ///
    /// Leaves the date unchanged on overflow.
    pub fn tick(&mut self) -> Result<(), DateError> {
        self.advance_by(1)
    }

    /// Advances in place by `days` calendar days.
    ///
    /// Leaves the date unchanged on overflow.
    pub fn advance_by(&mut self, days: u32) -> Result<(), DateError> {
        *self = self.plus_days(days)?;
        Ok(())
    }

    /// Returns a copy advanced by `days`.
    pub fn plus_days(self, days: u32) -> Result<Self, DateError> {
        Self::from_ordinal(self.ordinal() + i64::from(days))
    }

    /// Signed day difference `self - other`.
    ///
    /// Negative when `self` is before `other`, zero when equal.
    pub fn compare(&self, other: &Self) -> i64 {
        self.ordinal() - other.ordinal()
    }

    /// Whether `self` falls strictly before `other`.
    #[inline]
    pub fn is_before(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Less
    }

    fn ordinal(&self) -> i64 {
        i64::from(self.year) * i64::from(MONTHS_IN_YEAR * DAYS_IN_MONTH)
            + i64::from(self.month - 1) * i64::from(DAYS_IN_MONTH)
            + i64::from(self.day - 1)
    }

    fn from_ordinal(ordinal: i64) -> Result<Self, DateError> {
        let per_year = i64::from(MONTHS_IN_YEAR * DAYS_IN_MONTH);
        let year = i32::try_from(ordinal.div_euclid(per_year)).map_err(|_| DateError::Overflow)?;
        let in_year = ordinal.rem_euclid(per_year);
        let per_month = i64::from(DAYS_IN_MONTH);
        // Both remainders are below 360, so the casts are lossless.
        Ok(Self {
            year,
            month: (in_year / per_month) as u32 + 1,
            day: (in_year % per_month) as u32 + 1,
        })
    }
}

impl Default for Date {
    /// `1.1.0`, the first day of the calendar.
    fn default() -> Self {
        Self {
            year: 0,
            month: 1,
            day: 1,
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.day, self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_validation() {
        assert!(Date::new(1, 1, 2020).is_ok());
        assert!(Date::new(30, 12, 2020).is_ok());
        assert_eq!(Date::new(0, 1, 2020), Err(DateError::InvalidDay(0)));
        assert_eq!(Date::new(31, 1, 2020), Err(DateError::InvalidDay(31)));
        assert_eq!(Date::new(1, 13, 2020), Err(DateError::InvalidMonth(13)));
        assert_eq!(Date::new(1, 0, 2020), Err(DateError::InvalidMonth(0)));
    }

    #[test]
    fn test_tick_rollover() {
        let mut d = Date::new(29, 11, 2020).unwrap();
        d.tick().unwrap();
        assert_eq!(d, Date::new(30, 11, 2020).unwrap());
        d.tick().unwrap();
        assert_eq!(d, Date::new(1, 12, 2020).unwrap());

        let mut end = Date::new(30, 12, 2020).unwrap();
        end.tick().unwrap();
        assert_eq!(end, Date::new(1, 1, 2021).unwrap());
    }

    #[test]
    fn test_advance_by() {
        let start = Date::new(15, 6, 2021).unwrap();
        assert_eq!(start.plus_days(0).unwrap(), start);
        assert_eq!(start.plus_days(20).unwrap(), Date::new(5, 7, 2021).unwrap());
        assert_eq!(start.plus_days(360).unwrap(), Date::new(15, 6, 2022).unwrap());

        let mut d = Date::new(1, 1, -1).unwrap();
        d.advance_by(359).unwrap();
        assert_eq!(d, Date::new(30, 12, -1).unwrap());
        d.advance_by(1).unwrap();
        assert_eq!(d, Date::new(1, 1, 0).unwrap());
    }

    #[test]
    fn test_advance_matches_repeated_ticks() {
        let start = Date::new(17, 9, 2023).unwrap();
        let mut ticked = start;
        for _ in 0..1000 {
            ticked.tick().unwrap();
        }
        assert_eq!(start.plus_days(1000).unwrap(), ticked);
        assert_eq!(ticked.compare(&start), 1000);
    }

    #[test]
    fn test_overflow_at_last_year() {
        let last = Date::new(30, 12, i32::MAX).unwrap();
        assert_eq!(last.plus_days(1), Err(DateError::Overflow));

        let mut d = last;
        assert_eq!(d.tick(), Err(DateError::Overflow));
        assert_eq!(d, last);

        let mut early = Date::new(1, 1, i32::MAX).unwrap();
        early.advance_by(359).unwrap();
        assert_eq!(early, last);
        assert_eq!(early.advance_by(u32::MAX), Err(DateError::Overflow));
        assert_eq!(early, last);
    }

    #[test]
    fn test_large_advance() {
        let start = Date::new(1, 1, 2000).unwrap();
        let far = start.plus_days(u32::MAX).unwrap();
        assert_eq!(far.compare(&start), i64::from(u32::MAX));
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let ok: Date = serde_json::from_str(r#"{"year":2025,"month":3,"day":30}"#).unwrap();
        assert_eq!(ok, Date::new(30, 3, 2025).unwrap());

        for bad in [
            r#"{"year":2025,"month":0,"day":0}"#,
            r#"{"year":2025,"month":13,"day":1}"#,
            r#"{"year":2025,"month":1,"day":31}"#,
        ] {
            assert!(serde_json::from_str::<Date>(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_serialize_round_trip() {
        let d = Date::new(4, 11, 1999).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), d);
    }

    #[test]
    fn test_compare_and_order() {
        let a = Date::new(30, 12, 2020).unwrap();
        let b = Date::new(1, 1, 2021).unwrap();
        assert_eq!(a.compare(&b), -1);
        assert_eq!(b.compare(&a), 1);
        assert_eq!(a.compare(&a), 0);
        assert!(a < b);
        assert!(a.is_before(&b));
        assert!(!a.is_before(&a));

        let c = Date::new(1, 2, 2020).unwrap();
        assert!(c < a);
        assert_eq!(a.compare(&c), 329);
    }

    #[test]
    fn test_display() {
        let d = Date::new(5, 3, 2024).unwrap();
        assert_eq!(d.to_string(), "5.3.2024");
    }
}
