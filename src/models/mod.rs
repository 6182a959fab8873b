//! Core data models for the Income Accrual Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod accrual_result;
mod aggregated_income;
mod income_source;
mod pay_cadence;
mod pay_period;

pub use accrual_result::{AccrualLine, AccrualResult, AuditStep, AuditTrace};
pub use aggregated_income::{
    AggregatedIncome, Diagnostic, DiagnosticCode, HouseholdIncome, SourceSummary,
    TemporaryIncome, TemporaryIncomeDetail,
};
pub use income_source::{
    IncomeKind, IncomeSource, Pension, RateRevision, Salary, SemiAnnualBenefit, TemporaryBenefit,
};
pub use pay_cadence::PayCadence;
pub use pay_period::PayPeriod;
