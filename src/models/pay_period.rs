//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type produced by the calendar
//! generator and consumed by the accrual calculator.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::PayCadence;

/// A labor period and the pay date that compensates it.
///
/// Pay is in arrears: `work_end` is always the day before `pay_date`. The first
/// period of a year may start in the prior calendar year.
///
/// # Example
///
/// ```
/// use accrual_engine::models::{PayCadence, PayPeriod};
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     period_number: 1,
///     work_start: NaiveDate::from_ymd_opt(2024, 12, 19).unwrap(),
///     work_end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     pay_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
///     is_full_period: true,
///     year: 2025,
///     cadence: PayCadence::Biweekly,
/// };
///
/// assert_eq!(period.day_count(), 14);
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The 1-based position of the period within its year.
    pub period_number: u32,
    /// The first day of the labor period (inclusive).
    pub work_start: NaiveDate,
    /// The last day of the labor period (inclusive).
    pub work_end: NaiveDate,
    /// The date the period is paid.
    pub pay_date: NaiveDate,
    /// Whether the labor period spans at least the cadence's nominal length.
    pub is_full_period: bool,
    /// The calendar year the pay date belongs to.
    pub year: i32,
    /// The cadence that produced this period.
    pub cadence: PayCadence,
}

impl PayPeriod {
    /// Builds a period from its work range and pay date, deriving `is_full_period`.
    pub fn new(
        period_number: u32,
        work_start: NaiveDate,
        work_end: NaiveDate,
        pay_date: NaiveDate,
        cadence: PayCadence,
    ) -> Self {
        let mut period = Self {
            period_number,
            work_start,
            work_end,
            pay_date,
            is_full_period: false,
            year: pay_date.year(),
            cadence,
        };
        period.is_full_period = period.day_count() >= cadence.nominal_days();
        period
    }

    /// The number of calendar days in `[work_start, work_end]`.
    pub fn day_count(&self) -> u32 {
        inclusive_days(self.work_start, self.work_end)
    }

    /// Checks if a given date falls within the labor period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.work_start && date <= self.work_end
    }

    /// Narrows the labor period to the days between `start` and `end`.
    ///
    /// Returns `None` when no day of the period lies inside the window. The
    /// returned period keeps its pay date and recomputes `is_full_period`.
    ///
    /// # Example
    ///
    /// ```
    /// use accrual_engine::models::{PayCadence, PayPeriod};
    /// use chrono::NaiveDate;
    ///
    /// let period = PayPeriod::new(
    ///     5,
    ///     NaiveDate::from_ymd_opt(2025, 2, 13).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 2, 26).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 2, 27).unwrap(),
    ///     PayCadence::Biweekly,
    /// );
    ///
    /// let clipped = period
    ///     .clipped_to(None, NaiveDate::from_ymd_opt(2025, 2, 20))
    ///     .unwrap();
    /// assert_eq!(clipped.day_count(), 8);
    /// assert!(!clipped.is_full_period);
    /// ```
    pub fn clipped_to(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Self> {
        let work_start = start.map_or(self.work_start, |s| s.max(self.work_start));
        let work_end = end.map_or(self.work_end, |e| e.min(self.work_end));
        if work_start > work_end {
            return None;
        }
        Some(Self::new(
            self.period_number,
            work_start,
            work_end,
            self.pay_date,
            self.cadence,
        ))
    }
}

/// The number of calendar days in `[start, end]`, or zero when `end < start`.
fn inclusive_days(start: NaiveDate, end: NaiveDate) -> u32 {
    match end.checked_add_days(Days::new(1)) {
        Some(after_end) if after_end > start => {
            u32::try_from((after_end - start).num_days()).unwrap_or(u32::MAX)
        }
        _ => 0,
    }
}
