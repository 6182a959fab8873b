//! Form-state request types.
//!
//! Income declarations arrive from the form layer as JSON with string-typed
//! dates, amounts and cadences. These types mirror that shape and convert into
//! the typed [`IncomeSource`] models, failing on the first unparsable field.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    IncomeSource, PayCadence, Pension, RateRevision, Salary, SemiAnnualBenefit, TemporaryBenefit,
};

/// The date format accepted in form state.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn default_active() -> bool {
    true
}

/// A rate revision as entered in a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRequest {
    /// The first pay date of the new amount, `YYYY-MM-DD`.
    pub effective_date: String,
    /// The new amount as a decimal string.
    pub new_amount: String,
}

/// A salary as entered in a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRequest {
    /// Identifier of the source.
    pub id: String,
    /// Whether the source is switched on; defaults to `true`.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Cadence name, e.g. `"biweekly"`.
    pub cadence: String,
    /// Any known pay date.
    pub anchor_pay_date: String,
    /// Net amount per period.
    pub net_amount_per_period: String,
    /// First day of employment.
    pub start_date: String,
    /// Last day of employment; blank means still employed.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Rate revisions.
    #[serde(default)]
    pub revisions: Vec<RevisionRequest>,
}

/// A temporary benefit as entered in a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryBenefitRequest {
    /// Identifier of the source.
    pub id: String,
    /// Whether the source is switched on; defaults to `true`.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Net amount per week.
    pub weekly_net_amount: String,
    /// The day the benefit period opened.
    pub start_date: String,
    /// Maximum number of paid weeks.
    pub eligible_weeks_cap: u32,
    /// Rate revisions.
    #[serde(default)]
    pub revisions: Vec<RevisionRequest>,
}

/// A pension as entered in a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionRequest {
    /// Identifier of the source.
    pub id: String,
    /// Whether the source is switched on; defaults to `true`.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Amount per payment.
    pub amount: String,
    /// Cadence name.
    pub cadence: String,
    /// The first pay date.
    pub start_date: String,
}

/// A semi-annual benefit as entered in a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemiAnnualBenefitRequest {
    /// Identifier of the source.
    pub id: String,
    /// Whether the source is switched on; defaults to `true`.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Monthly amount for January through June.
    pub period_h1_amount: String,
    /// Monthly amount for July through December.
    pub period_h2_amount: String,
}

/// One income declaration as entered in a form, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceRequest {
    /// A salary.
    Salary(SalaryRequest),
    /// A temporary benefit.
    TemporaryBenefit(TemporaryBenefitRequest),
    /// A pension.
    Pension(PensionRequest),
    /// A semi-annual benefit.
    SemiAnnualBenefit(SemiAnnualBenefitRequest),
}

impl SourceRequest {
    /// Returns the source identifier.
    pub fn id(&self) -> &str {
        match self {
            SourceRequest::Salary(r) => &r.id,
            SourceRequest::TemporaryBenefit(r) => &r.id,
            SourceRequest::Pension(r) => &r.id,
            SourceRequest::SemiAnnualBenefit(r) => &r.id,
        }
    }

    /// Returns whether the source is switched on.
    pub fn is_active(&self) -> bool {
        match self {
            SourceRequest::Salary(r) => r.is_active,
            SourceRequest::TemporaryBenefit(r) => r.is_active,
            SourceRequest::Pension(r) => r.is_active,
            SourceRequest::SemiAnnualBenefit(r) => r.is_active,
        }
    }
}

/// Parses a `YYYY-MM-DD` date from form state.
///
/// # Example
///
/// ```
/// use accrual_engine::input::parse_date;
///
/// assert!(parse_date("start_date", "2025-04-06").is_ok());
/// assert!(parse_date("start_date", "06/04/2025").is_err());
/// ```
pub fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| EngineError::InvalidDate {
        field: field.to_string(),
        message: format!("expected YYYY-MM-DD, got '{}'", value),
    })
}

/// Parses a decimal amount from form state.
///
/// `NaN` and infinities are rejected as non-finite; anything else that is not
/// a decimal number is rejected as unparsable. Sign is checked later by
/// validation.
pub fn parse_amount(field: &str, value: &str) -> EngineResult<Decimal> {
    let value = value.trim();
    let lowered = value.trim_start_matches(['+', '-']).to_lowercase();
    if lowered == "nan" || lowered == "inf" || lowered == "infinity" {
        return Err(EngineError::InvalidAmount {
            field: field.to_string(),
            message: format!("must be finite, got '{}'", value),
        });
    }
    Decimal::from_str(value).map_err(|_| EngineError::InvalidAmount {
        field: field.to_string(),
        message: format!("expected a decimal number, got '{}'", value),
    })
}

fn parse_optional_date(field: &str, value: Option<&str>) -> EngineResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(field, value).map(Some),
    }
}

fn parse_revisions(revisions: &[RevisionRequest]) -> EngineResult<Vec<RateRevision>> {
    revisions
        .iter()
        .map(|r| {
            Ok(RateRevision {
                effective_date: parse_date("revisions.effective_date", &r.effective_date)?,
                new_amount: parse_amount("revisions.new_amount", &r.new_amount)?,
            })
        })
        .collect()
}

impl TryFrom<SalaryRequest> for Salary {
    type Error = EngineError;

    fn try_from(req: SalaryRequest) -> Result<Self, Self::Error> {
        Ok(Salary {
            cadence: PayCadence::from_str(&req.cadence)?,
            anchor_pay_date: parse_date("anchor_pay_date", &req.anchor_pay_date)?,
            net_amount_per_period: parse_amount(
                "net_amount_per_period",
                &req.net_amount_per_period,
            )?,
            start_date: parse_date("start_date", &req.start_date)?,
            end_date: parse_optional_date("end_date", req.end_date.as_deref())?,
            revisions: parse_revisions(&req.revisions)?,
            id: req.id,
            is_active: req.is_active,
        })
    }
}

impl TryFrom<TemporaryBenefitRequest> for TemporaryBenefit {
    type Error = EngineError;

    fn try_from(req: TemporaryBenefitRequest) -> Result<Self, Self::Error> {
        Ok(TemporaryBenefit {
            weekly_net_amount: parse_amount("weekly_net_amount", &req.weekly_net_amount)?,
            start_date: parse_date("start_date", &req.start_date)?,
            eligible_weeks_cap: req.eligible_weeks_cap,
            revisions: parse_revisions(&req.revisions)?,
            id: req.id,
            is_active: req.is_active,
        })
    }
}

impl TryFrom<PensionRequest> for Pension {
    type Error = EngineError;

    fn try_from(req: PensionRequest) -> Result<Self, Self::Error> {
        Ok(Pension {
            amount: parse_amount("amount", &req.amount)?,
            cadence: PayCadence::from_str(&req.cadence)?,
            start_date: parse_date("start_date", &req.start_date)?,
            id: req.id,
            is_active: req.is_active,
        })
    }
}

impl TryFrom<SemiAnnualBenefitRequest> for SemiAnnualBenefit {
    type Error = EngineError;

    fn try_from(req: SemiAnnualBenefitRequest) -> Result<Self, Self::Error> {
        Ok(SemiAnnualBenefit {
            period_h1_amount: parse_amount("period_h1_amount", &req.period_h1_amount)?,
            period_h2_amount: parse_amount("period_h2_amount", &req.period_h2_amount)?,
            id: req.id,
            is_active: req.is_active,
        })
    }
}

impl TryFrom<SourceRequest> for IncomeSource {
    type Error = EngineError;

    fn try_from(req: SourceRequest) -> Result<Self, Self::Error> {
        Ok(match req {
            SourceRequest::Salary(r) => IncomeSource::Salary(r.try_into()?),
            SourceRequest::TemporaryBenefit(r) => IncomeSource::TemporaryBenefit(r.try_into()?),
            SourceRequest::Pension(r) => IncomeSource::Pension(r.try_into()?),
            SourceRequest::SemiAnnualBenefit(r) => IncomeSource::SemiAnnualBenefit(r.try_into()?),
        })
    }
}
