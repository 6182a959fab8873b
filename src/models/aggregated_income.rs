//! Aggregated income models.
//!
//! This module contains the per-person [`AggregatedIncome`], the two-person
//! [`HouseholdIncome`] view, and the [`Diagnostic`] records that report sources
//! excluded from a computation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::round_money;
use crate::error::EngineError;

use super::{AuditTrace, IncomeKind};

/// Machine-readable category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// A date was unparsable or out of range.
    InvalidDate,
    /// A cadence name was not recognized.
    InvalidCadence,
    /// An amount was negative, above the configured maximum, non-finite or
    /// unparsable.
    InvalidAmount,
    /// The source was inconsistent in some other way.
    InvalidSource,
}

/// A per-source problem that excluded the source from totals.
///
/// # Example
///
/// ```
/// use accrual_engine::error::EngineError;
/// use accrual_engine::models::{Diagnostic, DiagnosticCode};
///
/// let error = EngineError::InvalidCadence { value: "yearly".to_string() };
/// let diagnostic = Diagnostic::from_error("pension_1", &error);
///
/// assert_eq!(diagnostic.code, DiagnosticCode::InvalidCadence);
/// assert_eq!(diagnostic.message, "Invalid pay cadence: yearly");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The ID of the excluded source.
    pub source_id: String,
    /// The category of the problem.
    pub code: DiagnosticCode,
    /// A human-readable description for display next to the source.
    pub message: String,
}

impl Diagnostic {
    /// Builds a diagnostic for `source_id` from the error that excluded it.
    pub fn from_error(source_id: impl Into<String>, error: &EngineError) -> Self {
        let code = match error {
            EngineError::InvalidDate { .. } | EngineError::AsOfDateOutOfRange { .. } => {
                DiagnosticCode::InvalidDate
            }
            EngineError::InvalidCadence { .. } => DiagnosticCode::InvalidCadence,
            EngineError::InvalidAmount { .. } => DiagnosticCode::InvalidAmount,
            _ => DiagnosticCode::InvalidSource,
        };
        Self {
            source_id: source_id.into(),
            code,
            message: error.to_string(),
        }
    }
}

/// The valuation of one aggregated source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    /// The ID of the source.
    pub source_id: String,
    /// The kind of the source.
    pub kind: IncomeKind,
    /// Annualized run rate as of the reference date.
    pub annual: Decimal,
    /// `annual / 12`, rounded to cents.
    pub monthly: Decimal,
    /// Amount accrued as of the reference date.
    pub accrued_to_date: Decimal,
    /// Number of pay periods, weeks or payments accrued.
    pub periods_counted: u32,
}

/// Entitlement usage of one temporary benefit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryIncomeDetail {
    /// The ID of the benefit.
    pub source_id: String,
    /// Weekly amount in force on the reference date.
    pub weekly_amount: Decimal,
    /// Weeks paid so far, never above `weeks_cap`.
    pub weeks_used: u32,
    /// Maximum number of paid weeks.
    pub weeks_cap: u32,
    /// Whether the entitlement is exhausted.
    pub cap_reached: bool,
    /// Amount paid so far.
    pub accrued_to_date: Decimal,
    /// Annualized amount of the benefit.
    pub annual: Decimal,
}

/// Temporary income carried by an aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryIncome {
    /// Whether any temporary benefit was aggregated.
    pub has_any: bool,
    /// Sum of the temporary benefits' annual amounts.
    pub total_annual: Decimal,
    /// One entry per temporary benefit.
    pub detail: Vec<TemporaryIncomeDetail>,
}

/// Income totals of one person (or of a combined household) as of a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedIncome {
    /// The reference date of the computation.
    pub as_of: NaiveDate,
    /// Sum of annual amounts over all aggregated sources.
    pub total_annual: Decimal,
    /// `total_annual / 12`, rounded to cents.
    pub total_monthly: Decimal,
    /// Sum of amounts accrued as of `as_of`.
    pub accrued_to_date: Decimal,
    /// Annual amount per income kind.
    pub by_type: BTreeMap<IncomeKind, Decimal>,
    /// One summary per aggregated source, in input order.
    pub sources: Vec<SourceSummary>,
    /// Temporary benefit totals and usage.
    pub temporary_income: TemporaryIncome,
    /// Sources excluded from the totals and why.
    pub diagnostics: Vec<Diagnostic>,
    /// How each source was valued.
    pub audit_trace: AuditTrace,
}

impl AggregatedIncome {
    /// An aggregate with no sources.
    pub fn empty(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            total_annual: Decimal::ZERO,
            total_monthly: Decimal::ZERO,
            accrued_to_date: Decimal::ZERO,
            by_type: BTreeMap::new(),
            sources: Vec::new(),
            temporary_income: TemporaryIncome::default(),
            diagnostics: Vec::new(),
            audit_trace: AuditTrace::default(),
        }
    }

    /// The annual amount of the given kind, zero when absent.
    pub fn annual_for(&self, kind: IncomeKind) -> Decimal {
        self.by_type.get(&kind).copied().unwrap_or(Decimal::ZERO)
    }

    /// The largest annual amount of any single source.
    pub fn largest_source_annual(&self) -> Decimal {
        self.sources
            .iter()
            .map(|s| s.annual)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Merges two aggregates into a household view.
    ///
    /// Totals and per-kind amounts are summed; sources, temporary income
    /// details, diagnostics and audit steps are concatenated (`self` first).
    /// The reference date is taken from `self`.
    pub fn combine(&self, other: &AggregatedIncome) -> AggregatedIncome {
        let mut combined = self.clone();

        combined.total_annual += other.total_annual;
        combined.total_monthly = round_money(combined.total_annual / Decimal::from(12));
        combined.accrued_to_date += other.accrued_to_date;
        for (kind, annual) in &other.by_type {
            *combined.by_type.entry(*kind).or_insert(Decimal::ZERO) += *annual;
        }
        combined.sources.extend(other.sources.iter().cloned());

        let temporary = &mut combined.temporary_income;
        temporary.has_any |= other.temporary_income.has_any;
        temporary.total_annual += other.temporary_income.total_annual;
        temporary
            .detail
            .extend(other.temporary_income.detail.iter().cloned());

        combined.diagnostics.extend(other.diagnostics.iter().cloned());
        for step in &other.audit_trace.steps {
            combined.audit_trace.push(step.clone());
        }

        combined
    }
}

/// Aggregates of a primary person, an optional partner, and both combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdIncome {
    /// The primary person's income.
    pub primary: AggregatedIncome,
    /// The partner's income, when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<AggregatedIncome>,
    /// Both persons combined (equal to `primary` without a partner).
    pub combined: AggregatedIncome,
}
