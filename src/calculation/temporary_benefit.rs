//! Temporary benefit accrual.
//!
//! Temporary benefits are paid by the week from their start date until the
//! entitlement of `eligible_weeks_cap` weeks is used up. No pay calendar is
//! involved: week `i` is dated `start_date + 7i` days.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AccrualLine, AccrualResult, TemporaryBenefit};

use super::accrual::RevisionSchedule;

/// Accrual of a temporary benefit and its entitlement usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryBenefitAccrual {
    /// Whole weeks between the start date and the as-of date.
    pub weeks_elapsed: u32,
    /// Weeks paid: `weeks_elapsed` capped at the entitlement.
    pub weeks_counted: u32,
    /// The entitlement in weeks.
    pub eligible_weeks_cap: u32,
    /// Whether the entitlement is used up; never set before the claim starts.
    pub cap_reached: bool,
    /// Weekly amount in force on the as-of date.
    pub current_weekly_amount: Decimal,
    /// The week-by-week accrual.
    pub accrual: AccrualResult,
}

/// Computes what a temporary benefit has paid as of `as_of`.
///
/// Elapsed whole weeks are capped at `eligible_weeks_cap`; weeks past the cap
/// are simply not paid. Each paid week is valued at the revision-aware weekly
/// amount on its date.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::compute_temporary_benefit_accrual;
/// use accrual_engine::models::TemporaryBenefit;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let benefit = TemporaryBenefit {
///     id: "ei".to_string(),
///     is_active: true,
///     weekly_net_amount: Decimal::from(1270),
///     start_date: NaiveDate::from_ymd_opt(2025, 4, 6).unwrap(),
///     eligible_weeks_cap: 35,
///     revisions: vec![],
/// };
///
/// // 50 weeks after the start date.
/// let as_of = NaiveDate::from_ymd_opt(2026, 3, 22).unwrap();
/// let result = compute_temporary_benefit_accrual(&benefit, as_of);
///
/// assert_eq!(result.weeks_elapsed, 50);
/// assert_eq!(result.weeks_counted, 35);
/// assert_eq!(result.accrual.total_to_date, Decimal::from(44450));
/// ```
pub fn compute_temporary_benefit_accrual(
    benefit: &TemporaryBenefit,
    as_of: NaiveDate,
) -> TemporaryBenefitAccrual {
    let schedule = RevisionSchedule::new(benefit.weekly_net_amount, &benefit.revisions);

    let weeks_elapsed = if as_of < benefit.start_date {
        0
    } else {
        u32::try_from((as_of - benefit.start_date).num_weeks()).unwrap_or(u32::MAX)
    };
    let weeks_counted = weeks_elapsed.min(benefit.eligible_weeks_cap);

    let lines = (1..=weeks_counted)
        .map_while(|week| {
            let date = benefit
                .start_date
                .checked_add_days(Days::new(7 * u64::from(week)))?;
            Some(AccrualLine {
                unit: week,
                date,
                days_worked: None,
                amount: schedule.amount_on(date),
                is_prorated: false,
            })
        })
        .collect();

    TemporaryBenefitAccrual {
        weeks_elapsed,
        weeks_counted,
        eligible_weeks_cap: benefit.eligible_weeks_cap,
        cap_reached: as_of >= benefit.start_date && weeks_elapsed >= benefit.eligible_weeks_cap,
        current_weekly_amount: schedule.amount_on(as_of),
        accrual: AccrualResult::from_lines(lines),
    }
}
