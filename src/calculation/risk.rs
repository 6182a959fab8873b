//! Risk classification of an aggregated income mix.
//!
//! Each risk is a share of the total annual income mapped onto a band by fixed
//! thresholds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AggregatedIncome, IncomeKind};

/// Temporary income share above which the risk is high (0.5).
const TEMPORARY_HIGH: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
/// Temporary income share above which the risk is medium (0.25).
const TEMPORARY_MEDIUM: Decimal = Decimal::from_parts(25, 0, 0, false, 2);
/// Largest source share above which the risk is high (0.8).
const CONCENTRATION_HIGH: Decimal = Decimal::from_parts(8, 0, 0, false, 1);
/// Largest source share above which the risk is medium (0.6).
const CONCENTRATION_MEDIUM: Decimal = Decimal::from_parts(6, 0, 0, false, 1);
/// Temporary benefit share above which the dependency is high (0.7).
const DEPENDENCY_HIGH: Decimal = Decimal::from_parts(7, 0, 0, false, 1);
/// Temporary benefit share above which the dependency is medium (0.4).
const DEPENDENCY_MEDIUM: Decimal = Decimal::from_parts(4, 0, 0, false, 1);

/// A qualitative risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// The risk does not apply.
    None,
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
}

impl RiskLevel {
    /// Returns the snake_case name of the level.
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::None => "none",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    fn from_ratio(ratio: Decimal, high: Decimal, medium: Decimal) -> Self {
        if ratio > high {
            RiskLevel::High
        } else if ratio > medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// The risk bands of an income mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// How much of the income is temporary.
    pub temporary_income_risk: RiskLevel,
    /// How much of the income comes from a single source.
    pub concentration_risk: RiskLevel,
    /// How much of the income comes from temporary benefits.
    pub benefit_dependency_risk: RiskLevel,
}

impl RiskAssessment {
    /// The most severe of the three bands.
    pub fn highest(&self) -> RiskLevel {
        self.temporary_income_risk
            .max(self.concentration_risk)
            .max(self.benefit_dependency_risk)
    }
}

/// Classifies the income mix of `income`.
///
/// Zero total income is low temporary and concentration risk, and no
/// benefit dependency.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::{RiskLevel, aggregate, classify};
/// use accrual_engine::models::{IncomeSource, PayCadence, Salary};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let salary = Salary {
///     id: "salary_1".to_string(),
///     is_active: true,
///     cadence: PayCadence::Biweekly,
///     anchor_pay_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
///     net_amount_per_period: Decimal::from(2500),
///     start_date: NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
///     end_date: None,
///     revisions: vec![],
/// };
/// let income = aggregate(&[IncomeSource::Salary(salary)], NaiveDate::from_ymd_opt(2025, 4, 7).unwrap()).unwrap();
/// let risk = classify(&income);
///
/// assert_eq!(risk.concentration_risk, RiskLevel::High);
/// assert_eq!(risk.temporary_income_risk, RiskLevel::Low);
/// assert_eq!(risk.benefit_dependency_risk, RiskLevel::None);
/// ```
pub fn classify(income: &AggregatedIncome) -> RiskAssessment {
    let total = income.total_annual;
    let share = |amount: Decimal| {
        if total > Decimal::ZERO {
            amount / total
        } else {
            Decimal::ZERO
        }
    };

    let temporary_share = share(income.temporary_income.total_annual);
    let concentration_share = share(income.largest_source_annual());
    let benefit_share = share(income.annual_for(IncomeKind::TemporaryBenefit));

    let benefit_dependency_risk = if benefit_share.is_zero() {
        RiskLevel::None
    } else {
        RiskLevel::from_ratio(benefit_share, DEPENDENCY_HIGH, DEPENDENCY_MEDIUM)
    };

    RiskAssessment {
        temporary_income_risk: RiskLevel::from_ratio(
            temporary_share,
            TEMPORARY_HIGH,
            TEMPORARY_MEDIUM,
        ),
        concentration_risk: RiskLevel::from_ratio(
            concentration_share,
            CONCENTRATION_HIGH,
            CONCENTRATION_MEDIUM,
        ),
        benefit_dependency_risk,
    }
}
