//! Pension accrual.
//!
//! A pension pays its full amount on every pay date from its start date on;
//! there is no proration and no labor period. Accrual is year-to-date.

use chrono::{Datelike, NaiveDate};

use crate::models::{AccrualLine, AccrualResult, Pension};

use super::calendar::first_pay_index_on_or_after;

/// Computes the pension payments received between 1 January of `as_of`'s year
/// and `as_of`, inclusive.
///
/// Payments fall on `start_date + n × step` of the pension's cadence.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::compute_pension_accrual;
/// use accrual_engine::models::{PayCadence, Pension};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let pension = Pension {
///     id: "employer_plan".to_string(),
///     is_active: true,
///     amount: Decimal::from(1500),
///     cadence: PayCadence::Monthly,
///     start_date: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
/// };
///
/// let result = compute_pension_accrual(&pension, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap());
/// assert_eq!(result.periods_counted, 4);
/// assert_eq!(result.total_to_date, Decimal::from(6000));
/// ```
pub fn compute_pension_accrual(pension: &Pension, as_of: NaiveDate) -> AccrualResult {
    let Some(year_start) = NaiveDate::from_ymd_opt(as_of.year(), 1, 1) else {
        return AccrualResult::empty();
    };

    let first = first_pay_index_on_or_after(pension.cadence, pension.start_date, year_start);
    let lines = (first..)
        .map_while(|n| {
            pension
                .cadence
                .pay_date_at(pension.start_date, n)
                .filter(|pay_date| *pay_date <= as_of)
        })
        .enumerate()
        .map(|(i, date)| AccrualLine {
            unit: u32::try_from(i + 1).unwrap_or(u32::MAX),
            date,
            days_worked: None,
            amount: pension.amount,
            is_prorated: false,
        })
        .collect();

    AccrualResult::from_lines(lines)
}
