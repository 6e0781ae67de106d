/*
SPDX-License-Identifier: MIT
*/

//! Calendar value type used as the registry's ordering key.
//!
//! [`Date`] is a fixed-format day/month/year value: every month has exactly
//! 30 days.  That makes it an ordering key, not a civil calendar — the
//! registry only ever compares dates and steps them forward one day at a
//! time, and the fixed month length keeps both operations trivially
//! deterministic.
//!
//! Ordering is defined by the linear ordinal `day + month·30 + year·365`.
//! Within the validated domain the ordinal is collision-free, so ordinal
//! equality coincides with field equality.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ── Domain constants ──────────────────────────────────────────────────────────

/// Every month has exactly this many days.
pub const DAYS_PER_MONTH: u8 = 30;

/// Months per year.
pub const MONTHS_PER_YEAR: u8 = 12;

/// Year weight in the ordering ordinal.  Deliberately 365 rather than
/// `30 × 12`: the ordinal is an ordering key only, never day arithmetic.
const ORDINAL_DAYS_PER_YEAR: i64 = 365;

// ── Error type ────────────────────────────────────────────────────────────────

/// Construction failure for [`Date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateError {
    /// Day outside `1..=30`.
    #[error("day {0} is outside the valid range 1..=30")]
    DayOutOfRange(i32),

    /// Month outside `1..=12`.
    #[error("month {0} is outside the valid range 1..=12")]
    MonthOutOfRange(i32),
}

// ── Date ──────────────────────────────────────────────────────────────────────

/// A day/month/year value with a total order and a one-day step.
///
/// Immutable after construction except through [`advance`](Date::advance);
/// hand-offs copy the value (`Copy`), so no two holders ever share mutable
/// calendar state.  `Serialize` is derived for report export; `Deserialize`
/// is intentionally absent so the range validation in [`Date::new`] cannot
/// be bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Date {
    day: u8,
    month: u8,
    year: i32,
}

impl Date {
    /// Create a date, validating `day ∈ 1..=30` and `month ∈ 1..=12`.
    ///
    /// The year is unconstrained — negative years order before year zero,
    /// as the ordinal dictates.
    pub fn new(day: i32, month: i32, year: i32) -> Result<Self, DateError> {
        if day < 1 || day > i32::from(DAYS_PER_MONTH) {
            return Err(DateError::DayOutOfRange(day));
        }
        if month < 1 || month > i32::from(MONTHS_PER_YEAR) {
            return Err(DateError::MonthOutOfRange(month));
        }
        Ok(Self {
            day: day as u8,
            month: month as u8,
            year,
        })
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Linear ordering ordinal: `day + month·30 + year·365`.
    fn ordinal(&self) -> i64 {
        i64::from(self.day)
            + i64::from(self.month) * i64::from(DAYS_PER_MONTH)
            + i64::from(self.year) * ORDINAL_DAYS_PER_YEAR
    }

    /// Step forward one day in place: day 31 wraps to the next month,
    /// month 13 wraps to the next year.  No failure path.
    pub fn advance(&mut self) {
        self.day += 1;
        if self.day > DAYS_PER_MONTH {
            self.day = 1;
            self.month += 1;
            if self.month > MONTHS_PER_YEAR {
                self.month = 1;
                self.year += 1;
            }
        }
    }

    /// The date `days` single-day steps after `self`.
    pub fn advanced_by(mut self, days: u32) -> Self {
        for _ in 0..days {
            self.advance();
        }
        self
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Date {
    /// Renders `day.month.year`, the shape the report writers emit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.day, self.month, self.year)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: i32, month: i32, year: i32) -> Date {
        Date::new(day, month, year).unwrap()
    }

    // ── construction ──────────────────────────────────────────────────────────

    #[test]
    fn new_accepts_full_domain_boundaries() {
        assert!(Date::new(1, 1, 2024).is_ok());
        assert!(Date::new(30, 12, 2024).is_ok());
        assert!(Date::new(15, 6, -50).is_ok(), "negative years are allowed");
    }

    #[test]
    fn new_rejects_day_out_of_range() {
        assert_eq!(Date::new(0, 5, 2024), Err(DateError::DayOutOfRange(0)));
        assert_eq!(Date::new(31, 5, 2024), Err(DateError::DayOutOfRange(31)));
        assert_eq!(Date::new(-3, 5, 2024), Err(DateError::DayOutOfRange(-3)));
    }

    #[test]
    fn new_rejects_month_out_of_range() {
        assert_eq!(Date::new(10, 0, 2024), Err(DateError::MonthOutOfRange(0)));
        assert_eq!(Date::new(10, 13, 2024), Err(DateError::MonthOutOfRange(13)));
    }

    #[test]
    fn day_is_checked_before_month() {
        // Both fields invalid – the day error wins
        assert_eq!(Date::new(0, 0, 2024), Err(DateError::DayOutOfRange(0)));
    }

    // ── ordering ──────────────────────────────────────────────────────────────

    #[test]
    fn equal_fields_compare_equal() {
        assert_eq!(d(7, 3, 2024).cmp(&d(7, 3, 2024)), Ordering::Equal);
        assert_eq!(d(7, 3, 2024), d(7, 3, 2024));
    }

    #[test]
    fn day_orders_within_a_month() {
        assert!(d(5, 1, 2024) < d(6, 1, 2024));
    }

    #[test]
    fn month_outweighs_day() {
        assert!(d(30, 1, 2024) < d(1, 2, 2024));
    }

    #[test]
    fn year_outweighs_month_and_day() {
        assert!(d(30, 12, 2023) < d(1, 1, 2024));
        assert!(d(1, 1, -1) < d(1, 1, 0));
    }

    // ── advance ───────────────────────────────────────────────────────────────

    #[test]
    fn advance_steps_within_a_month() {
        let mut date = d(14, 2, 2024);
        date.advance();
        assert_eq!(date, d(15, 2, 2024));
    }

    #[test]
    fn advance_wraps_month_after_day_30() {
        let mut date = d(30, 4, 2024);
        date.advance();
        assert_eq!(date, d(1, 5, 2024));
    }

    #[test]
    fn advance_wraps_year_after_month_12() {
        let mut date = d(30, 12, 2024);
        date.advance();
        assert_eq!(date, d(1, 1, 2025));
    }

    #[test]
    fn advanced_by_zero_is_identity() {
        assert_eq!(d(9, 9, 2024).advanced_by(0), d(9, 9, 2024));
    }

    #[test]
    fn advanced_by_crosses_month_boundary() {
        // 25.3 + 10 days = 5.4 in a 30-day month
        assert_eq!(d(25, 3, 2024).advanced_by(10), d(5, 4, 2024));
    }

    #[test]
    fn advance_covers_ordinal_distance_within_a_year() {
        // Within one year every advance() moves the ordinal by exactly 1,
        // so stepping ordinal(b) - ordinal(a) times lands on b.
        let a = d(5, 1, 2024);
        let b = d(17, 8, 2024);
        let distance = b.ordinal() - a.ordinal();
        assert_eq!(a.advanced_by(distance as u32), b);
    }

    #[test]
    fn advance_never_decreases_order() {
        let mut date = d(28, 12, 2023);
        for _ in 0..70 {
            let before = date;
            date.advance();
            assert!(before < date);
        }
    }

    // ── display ───────────────────────────────────────────────────────────────

    #[test]
    fn display_renders_day_month_year() {
        assert_eq!(d(5, 1, 2024).to_string(), "5.1.2024");
        assert_eq!(d(30, 12, 1999).to_string(), "30.12.1999");
    }
}
