//! Accrual-to-date over a pay calendar.
//!
//! This module sums what a salary has earned as of a reference date: only
//! periods already paid count, each at the amount in force on its pay date,
//! and periods cut by the employment window are prorated by days worked.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{AccrualLine, AccrualResult, PayPeriod, RateRevision};

/// Rounds a money amount to cents, halves away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A base amount and its revisions, ordered by effective date.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::RevisionSchedule;
/// use accrual_engine::models::RateRevision;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let revisions = vec![RateRevision {
///     effective_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
///     new_amount: Decimal::from(3000),
/// }];
/// let schedule = RevisionSchedule::new(Decimal::from(2800), &revisions);
///
/// assert_eq!(schedule.amount_on(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()), Decimal::from(2800));
/// assert_eq!(schedule.amount_on(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()), Decimal::from(3000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionSchedule {
    base_amount: Decimal,
    revisions: Vec<RateRevision>,
}

impl RevisionSchedule {
    /// Builds a schedule; `revisions` may be in any order.
    pub fn new(base_amount: Decimal, revisions: &[RateRevision]) -> Self {
        let mut revisions = revisions.to_vec();
        // Stable sort: of two revisions on the same date, the later-listed wins.
        revisions.sort_by_key(|r| r.effective_date);
        Self {
            base_amount,
            revisions,
        }
    }

    /// The amount in force on `date`: the latest revision effective on or
    /// before `date`, otherwise the base amount.
    pub fn amount_on(&self, date: NaiveDate) -> Decimal {
        self.revisions
            .iter()
            .rev()
            .find(|r| r.effective_date <= date)
            .map_or(self.base_amount, |r| r.new_amount)
    }
}

/// The days an employee was on the payroll; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentBounds {
    /// First day of employment.
    pub start: Option<NaiveDate>,
    /// Last day of employment.
    pub end: Option<NaiveDate>,
}

/// Computes the amount earned as of `as_of` over `periods`.
///
/// Only periods paid on or before `as_of` count. Each is valued at
/// `base_amount` or, when revisions apply, at the latest revision effective on
/// or before its pay date. When `employment_end` falls inside a period, that
/// period is prorated by days worked; periods entirely after it are left out of
/// the result.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::{compute_accrual, generate_calendar};
/// use accrual_engine::models::PayCadence;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let periods = generate_calendar(
///     NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
///     PayCadence::Biweekly,
///     2025,
/// );
/// let result = compute_accrual(
///     &periods,
///     Decimal::from_str("2720.73").unwrap(),
///     NaiveDate::from_ymd_opt(2025, 4, 7).unwrap(),
///     &[],
///     None,
/// );
///
/// assert_eq!(result.periods_counted, 7);
/// assert_eq!(result.total_to_date, Decimal::from_str("19045.11").unwrap());
/// ```
pub fn compute_accrual(
    periods: &[PayPeriod],
    base_amount: Decimal,
    as_of: NaiveDate,
    revisions: &[RateRevision],
    employment_end: Option<NaiveDate>,
) -> AccrualResult {
    compute_accrual_within(
        periods,
        base_amount,
        as_of,
        revisions,
        EmploymentBounds {
            start: None,
            end: employment_end,
        },
    )
}

/// Computes the amount earned as of `as_of`, prorating at both ends of
/// employment.
///
/// A period whose labor range is cut by `bounds` to fewer days than the
/// cadence's nominal length contributes `amount × days_worked / nominal_days`,
/// rounded to cents. A cut period that still spans the nominal length is paid
/// in full. Periods with no day inside `bounds` are excluded.
pub fn compute_accrual_within(
    periods: &[PayPeriod],
    base_amount: Decimal,
    as_of: NaiveDate,
    revisions: &[RateRevision],
    bounds: EmploymentBounds,
) -> AccrualResult {
    let schedule = RevisionSchedule::new(base_amount, revisions);

    let lines = periods
        .iter()
        .filter(|period| period.pay_date <= as_of)
        .filter_map(|period| {
            let worked = period.clipped_to(bounds.start, bounds.end)?;
            let amount = schedule.amount_on(period.pay_date);
            let days_worked = worked.day_count();
            let nominal_days = period.cadence.nominal_days();

            let is_prorated = days_worked < nominal_days;
            let amount = if is_prorated {
                round_money(amount * Decimal::from(days_worked) / Decimal::from(nominal_days))
            } else {
                amount
            };

            Some(AccrualLine {
                unit: period.period_number,
                date: period.pay_date,
                days_worked: Some(days_worked),
                amount,
                is_prorated,
            })
        })
        .collect();

    AccrualResult::from_lines(lines)
}
