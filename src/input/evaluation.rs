//! End-to-end evaluation of form state.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculation::{RiskAssessment, aggregate_household, classify};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Diagnostic, HouseholdIncome, IncomeSource};

use super::request::{SourceRequest, parse_date};

/// The form state of one household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The reference date, `YYYY-MM-DD`.
    #[serde(default)]
    pub as_of_date: Option<String>,
    /// The primary person's income sources.
    #[serde(default)]
    pub sources: Vec<SourceRequest>,
    /// The partner's income sources, when a partner is declared.
    #[serde(default)]
    pub partner_sources: Option<Vec<SourceRequest>>,
}

/// The household aggregates and the risk bands of the combined income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Per-person and combined aggregates.
    pub household: HouseholdIncome,
    /// Risk bands of the combined aggregate.
    pub risk: RiskAssessment,
}

/// Converts `requests` into typed sources.
///
/// Inactive requests are dropped unparsed. A request that fails to convert is
/// replaced by a diagnostic.
pub fn parse_sources(requests: &[SourceRequest]) -> (Vec<IncomeSource>, Vec<Diagnostic>) {
    let mut sources = Vec::with_capacity(requests.len());
    let mut diagnostics = Vec::new();

    for request in requests.iter().filter(|r| r.is_active()) {
        match IncomeSource::try_from(request.clone()) {
            Ok(source) => sources.push(source),
            Err(err) => {
                warn!(
                    source_id = %request.id(),
                    error = %err,
                    "Source could not be parsed"
                );
                diagnostics.push(Diagnostic::from_error(request.id(), &err));
            }
        }
    }

    (sources, diagnostics)
}

/// Evaluates a household's form state.
///
/// Sources are parsed, aggregated per person and combined; the combined view
/// is classified. Parse failures show up in the diagnostics of the person they
/// belong to and of the combined view.
///
/// # Errors
///
/// Returns [`EngineError::MissingAsOfDate`] when no reference date is given,
/// [`EngineError::InvalidDate`] when it does not parse, and
/// [`EngineError::AsOfDateOutOfRange`] when it falls outside the configured
/// year range.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::RiskLevel;
/// use accrual_engine::config::EngineConfig;
/// use accrual_engine::input::{EvaluationRequest, evaluate_request};
///
/// let request: EvaluationRequest = serde_json::from_str(r#"{
///     "as_of_date": "2025-09-15",
///     "sources": [
///         { "kind": "semi_annual_benefit", "id": "oas",
///           "period_h1_amount": "692.89", "period_h2_amount": "324.91" }
///     ]
/// }"#).unwrap();
///
/// let evaluation = evaluate_request(&request, &EngineConfig::default()).unwrap();
/// assert_eq!(evaluation.household.combined.accrued_to_date.to_string(), "4807.16");
/// assert_eq!(evaluation.risk.concentration_risk, RiskLevel::High);
/// ```
pub fn evaluate_request(
    request: &EvaluationRequest,
    config: &EngineConfig,
) -> EngineResult<Evaluation> {
    let as_of = request
        .as_of_date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(EngineError::MissingAsOfDate)?;
    let as_of = parse_date("as_of_date", as_of)?;

    let (primary, primary_diagnostics) = parse_sources(&request.sources);
    let partner = request.partner_sources.as_deref().map(parse_sources);

    let mut household = aggregate_household(
        &primary,
        partner.as_ref().map(|(sources, _)| sources.as_slice()),
        as_of,
        config,
    )?;

    prepend_diagnostics(&mut household.primary.diagnostics, primary_diagnostics);
    let mut combined_diagnostics = household.primary.diagnostics.clone();
    if let (Some(partner_income), Some((_, partner_diagnostics))) =
        (household.partner.as_mut(), partner)
    {
        prepend_diagnostics(&mut partner_income.diagnostics, partner_diagnostics);
        combined_diagnostics.extend(partner_income.diagnostics.iter().cloned());
    }
    household.combined.diagnostics = combined_diagnostics;

    let risk = classify(&household.combined);

    debug!(
        as_of = %as_of,
        has_partner = household.partner.is_some(),
        total_annual = %household.combined.total_annual,
        diagnostics = household.combined.diagnostics.len(),
        "Evaluated household"
    );

    Ok(Evaluation { household, risk })
}

fn prepend_diagnostics(target: &mut Vec<Diagnostic>, mut parsed: Vec<Diagnostic>) {
    parsed.append(target);
    *target = parsed;
}
