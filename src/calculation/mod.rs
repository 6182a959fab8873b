//! Calculation logic for the accrual engine.
//!
//! This module contains pay calendar generation, accrual-to-date for salaries,
//! temporary benefits and pensions, semi-annual benefit accrual, multi-source
//! aggregation and risk classification of the resulting income mix.

mod accrual;
mod aggregation;
mod calendar;
mod pension;
mod risk;
mod semi_annual;
mod temporary_benefit;

pub use accrual::{
    EmploymentBounds, RevisionSchedule, compute_accrual, compute_accrual_within, round_money,
};
pub use aggregation::{aggregate, aggregate_household, aggregate_with_config};
pub use calendar::generate_calendar;
pub use pension::compute_pension_accrual;
pub use risk::{RiskAssessment, RiskLevel, classify};
pub use semi_annual::{
    SemiAnnualAccrual, compute_semi_annual_accrual, compute_semi_annual_breakdown,
    semi_annual_annual_amount,
};
pub use temporary_benefit::{TemporaryBenefitAccrual, compute_temporary_benefit_accrual};
