//! Pay cadence model.
//!
//! A [`PayCadence`] is the recurrence rule of a paying source: how long a
//! nominal period is and how far apart consecutive pay dates fall.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The recurrence rule governing how often a source pays.
///
/// # Example
///
/// ```
/// use accrual_engine::models::PayCadence;
///
/// let cadence: PayCadence = "biweekly".parse().unwrap();
/// assert_eq!(cadence, PayCadence::Biweekly);
/// assert_eq!(cadence.nominal_days(), 14);
/// assert_eq!(cadence.periods_per_year(), 26);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayCadence {
    /// Every 7 days.
    Weekly,
    /// Every 14 days.
    Biweekly,
    /// Twice a month, approximated as every 15 days.
    Semimonthly,
    /// Once per calendar month.
    Monthly,
}

impl PayCadence {
    /// All supported cadences.
    pub const ALL: [PayCadence; 4] = [
        PayCadence::Weekly,
        PayCadence::Biweekly,
        PayCadence::Semimonthly,
        PayCadence::Monthly,
    ];

    /// The minimum number of days a period must span to count as full.
    pub fn nominal_days(self) -> u32 {
        match self {
            PayCadence::Weekly => 7,
            PayCadence::Biweekly => 14,
            PayCadence::Semimonthly => 15,
            PayCadence::Monthly => 28,
        }
    }

    /// The number of pay dates in a year, used to annualize amounts.
    pub fn periods_per_year(self) -> u32 {
        match self {
            PayCadence::Weekly => 52,
            PayCadence::Biweekly => 26,
            PayCadence::Semimonthly => 24,
            PayCadence::Monthly => 12,
        }
    }

    /// The fixed step between pay dates in days, or `None` for calendar months.
    pub fn step_days(self) -> Option<u64> {
        match self {
            PayCadence::Weekly => Some(7),
            PayCadence::Biweekly => Some(14),
            PayCadence::Semimonthly => Some(15),
            PayCadence::Monthly => None,
        }
    }

    /// Returns the `n`-th pay date counted from `anchor` (`n = 0` is the anchor).
    ///
    /// Monthly dates are computed from the anchor rather than from the previous
    /// date, so an anchor on the 31st returns to the 31st after a short month.
    pub fn pay_date_at(self, anchor: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self.step_days() {
            Some(step) => anchor.checked_add_days(Days::new(step * u64::from(n))),
            None => anchor.checked_add_months(Months::new(n)),
        }
    }

    /// Returns the first day of the labor period compensated by `pay_date`
    /// when no earlier pay date is known.
    pub fn work_start_for(self, pay_date: NaiveDate) -> Option<NaiveDate> {
        match self.step_days() {
            Some(step) => pay_date.checked_sub_days(Days::new(step)),
            None => pay_date.checked_sub_months(Months::new(1)),
        }
    }

    /// Returns the snake_case name of the cadence.
    pub fn as_str(self) -> &'static str {
        match self {
            PayCadence::Weekly => "weekly",
            PayCadence::Biweekly => "biweekly",
            PayCadence::Semimonthly => "semimonthly",
            PayCadence::Monthly => "monthly",
        }
    }
}

impl fmt::Display for PayCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayCadence {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "weekly" => Ok(PayCadence::Weekly),
            "biweekly" | "fortnightly" => Ok(PayCadence::Biweekly),
            "semimonthly" => Ok(PayCadence::Semimonthly),
            "monthly" => Ok(PayCadence::Monthly),
            _ => Err(EngineError::InvalidCadence {
                value: s.to_string(),
            }),
        }
    }
}
