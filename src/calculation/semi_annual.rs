//! Semi-annual benefit accrual.
//!
//! Some government benefits are paid monthly at a rate fixed for January to
//! June and revised for July to December. They are paid in arrears, so a month
//! only counts once it is over (or, under a configured payment day, once that
//! day is reached).

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ArrearsConvention;
use crate::models::SemiAnnualBenefit;

/// Months in each half of the year.
const MONTHS_PER_HALF: u32 = 6;

/// The year-to-date accrual of a semi-annual benefit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemiAnnualAccrual {
    /// Months of the current year already paid.
    pub completed_months: u32,
    /// Paid months at the January-June rate.
    pub months_h1: u32,
    /// Paid months at the July-December rate.
    pub months_h2: u32,
    /// `months_h1 × h1 + months_h2 × h2`.
    pub total: Decimal,
}

/// Computes the year-to-date accrual of `benefit`, excluding the current month.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::compute_semi_annual_accrual;
/// use accrual_engine::models::SemiAnnualBenefit;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let benefit = SemiAnnualBenefit {
///     id: "oas".to_string(),
///     is_active: true,
///     period_h1_amount: Decimal::from_str("692.89").unwrap(),
///     period_h2_amount: Decimal::from_str("324.91").unwrap(),
/// };
///
/// let total = compute_semi_annual_accrual(&benefit, NaiveDate::from_ymd_opt(2025, 9, 15).unwrap());
/// assert_eq!(total, Decimal::from_str("4807.16").unwrap());
/// ```
pub fn compute_semi_annual_accrual(benefit: &SemiAnnualBenefit, as_of: NaiveDate) -> Decimal {
    compute_semi_annual_breakdown(benefit, as_of, &ArrearsConvention::default()).total
}

/// Computes the year-to-date accrual of `benefit` under `convention`.
///
/// Without a payment day, completed months are the months strictly before
/// `as_of`'s month. With `payment_day = Some(d)`, the current month is added
/// once `as_of` reaches day `d`.
pub fn compute_semi_annual_breakdown(
    benefit: &SemiAnnualBenefit,
    as_of: NaiveDate,
    convention: &ArrearsConvention,
) -> SemiAnnualAccrual {
    let current_month_paid = convention
        .payment_day
        .is_some_and(|day| as_of.day() >= day);
    let completed_months = as_of.month0() + u32::from(current_month_paid);

    let months_h1 = completed_months.min(MONTHS_PER_HALF);
    let months_h2 = completed_months.saturating_sub(MONTHS_PER_HALF);
    let total = Decimal::from(months_h1) * benefit.period_h1_amount
        + Decimal::from(months_h2) * benefit.period_h2_amount;

    SemiAnnualAccrual {
        completed_months,
        months_h1,
        months_h2,
        total,
    }
}

/// The annual amount of `benefit`: six months at each rate.
pub fn semi_annual_annual_amount(benefit: &SemiAnnualBenefit) -> Decimal {
    Decimal::from(MONTHS_PER_HALF) * (benefit.period_h1_amount + benefit.period_h2_amount)
}
