//! Accrual result models.
//!
//! This module contains the [`AccrualResult`] returned by every accrual path,
//! and the [`AuditStep`]/[`AuditTrace`] records the aggregator keeps for each
//! source it processes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One counted unit (pay period, week or payment) of an accrual.
///
/// # Example
///
/// ```
/// use accrual_engine::models::AccrualLine;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let line = AccrualLine {
///     unit: 1,
///     date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
///     days_worked: Some(14),
///     amount: Decimal::new(272073, 2),
///     is_prorated: false,
/// };
/// assert_eq!(line.amount.to_string(), "2720.73");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualLine {
    /// The period number, week number or payment number.
    pub unit: u32,
    /// The date the unit is paid.
    pub date: NaiveDate,
    /// Days of the labor period inside the employment window, for pay periods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_worked: Option<u32>,
    /// The amount earned for the unit.
    pub amount: Decimal,
    /// Whether the amount was scaled down for a partially worked period.
    pub is_prorated: bool,
}

/// The cumulative amount earned as of a reference date.
///
/// `total_to_date` is the sum of the `breakdown` amounts and is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualResult {
    /// Total earned as of the reference date.
    pub total_to_date: Decimal,
    /// Number of units in `breakdown`.
    pub periods_counted: u32,
    /// Each counted unit, in pay date order.
    pub breakdown: Vec<AccrualLine>,
}

impl AccrualResult {
    /// A result with nothing accrued.
    pub fn empty() -> Self {
        Self {
            total_to_date: Decimal::ZERO,
            periods_counted: 0,
            breakdown: Vec::new(),
        }
    }

    /// Builds a result from its lines, deriving the total and count.
    pub fn from_lines(breakdown: Vec<AccrualLine>) -> Self {
        let total_to_date = breakdown.iter().map(|l| l.amount).sum();
        Self {
            total_to_date,
            periods_counted: u32::try_from(breakdown.len()).unwrap_or(u32::MAX),
            breakdown,
        }
    }
}

/// A single step in the audit trace recording how a source was valued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// The audit trace of an aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of valuation steps.
    pub steps: Vec<AuditStep>,
}

impl AuditTrace {
    /// Appends a step, numbering it after the existing ones.
    pub fn push(&mut self, mut step: AuditStep) {
        step.step_number = u32::try_from(self.steps.len()).unwrap_or(u32::MAX - 1) + 1;
        self.steps.push(step);
    }
}
