//! Income source models.
//!
//! This module defines the [`IncomeSource`] tagged union and the concrete shape
//! of each kind of income the engine understands, plus [`RateRevision`].

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ValidationRules;
use crate::error::{EngineError, EngineResult};

use super::PayCadence;

/// A change of per-period amount effective from a given date.
///
/// A revision applies to every pay date on or after `effective_date`; earlier
/// pay dates keep the prior amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRevision {
    /// The first pay date the new amount applies to.
    pub effective_date: NaiveDate,
    /// The amount paid from `effective_date` on.
    pub new_amount: Decimal,
}

/// The kind of an income source, used as the `by_type` key in aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeKind {
    /// Employment income paid on a cadence.
    Salary,
    /// Capped weekly benefit (e.g. unemployment insurance).
    TemporaryBenefit,
    /// Recurring annuity.
    Pension,
    /// Government benefit with one rate per half-year.
    SemiAnnualBenefit,
}

impl IncomeKind {
    /// Returns the snake_case name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            IncomeKind::Salary => "salary",
            IncomeKind::TemporaryBenefit => "temporary_benefit",
            IncomeKind::Pension => "pension",
            IncomeKind::SemiAnnualBenefit => "semi_annual_benefit",
        }
    }
}

/// Employment income paid in arrears on a cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    /// Identifier of the source within the user's record.
    pub id: String,
    /// Inactive sources are ignored by every computation.
    pub is_active: bool,
    /// How often the salary is paid.
    pub cadence: PayCadence,
    /// Any known pay date; the calendar is aligned on it.
    pub anchor_pay_date: NaiveDate,
    /// Net amount paid per period before any revision.
    pub net_amount_per_period: Decimal,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Last day of employment, if known.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Rate revisions, in any order.
    #[serde(default)]
    pub revisions: Vec<RateRevision>,
}

/// A weekly benefit paid for at most `eligible_weeks_cap` weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryBenefit {
    /// Identifier of the source within the user's record.
    pub id: String,
    /// Inactive sources are ignored by every computation.
    pub is_active: bool,
    /// Net amount paid per week before any revision.
    pub weekly_net_amount: Decimal,
    /// The day the benefit period opened.
    pub start_date: NaiveDate,
    /// Maximum number of paid weeks.
    pub eligible_weeks_cap: u32,
    /// Rate revisions, in any order.
    #[serde(default)]
    pub revisions: Vec<RateRevision>,
}

/// A recurring annuity paid in full on every pay date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pension {
    /// Identifier of the source within the user's record.
    pub id: String,
    /// Inactive sources are ignored by every computation.
    pub is_active: bool,
    /// Amount paid on each pay date.
    pub amount: Decimal,
    /// How often the pension is paid.
    pub cadence: PayCadence,
    /// The first pay date.
    pub start_date: NaiveDate,
}

/// A monthly government benefit whose rate is fixed per half-year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemiAnnualBenefit {
    /// Identifier of the source within the user's record.
    pub id: String,
    /// Inactive sources are ignored by every computation.
    pub is_active: bool,
    /// Monthly amount for January through June.
    pub period_h1_amount: Decimal,
    /// Monthly amount for July through December.
    pub period_h2_amount: Decimal,
}

/// One declared income source.
///
/// # Example
///
/// ```
/// use accrual_engine::models::{IncomeKind, IncomeSource, SemiAnnualBenefit};
/// use rust_decimal::Decimal;
///
/// let source = IncomeSource::SemiAnnualBenefit(SemiAnnualBenefit {
///     id: "oas".to_string(),
///     is_active: true,
///     period_h1_amount: Decimal::new(69289, 2),
///     period_h2_amount: Decimal::new(32491, 2),
/// });
///
/// assert_eq!(source.kind(), IncomeKind::SemiAnnualBenefit);
/// assert_eq!(source.id(), "oas");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncomeSource {
    /// Employment income.
    Salary(Salary),
    /// Capped weekly benefit.
    TemporaryBenefit(TemporaryBenefit),
    /// Recurring annuity.
    Pension(Pension),
    /// Half-year rated government benefit.
    SemiAnnualBenefit(SemiAnnualBenefit),
}

impl IncomeSource {
    /// Returns the source identifier.
    pub fn id(&self) -> &str {
        match self {
            IncomeSource::Salary(s) => &s.id,
            IncomeSource::TemporaryBenefit(b) => &b.id,
            IncomeSource::Pension(p) => &p.id,
            IncomeSource::SemiAnnualBenefit(b) => &b.id,
        }
    }

    /// Returns the kind of the source.
    pub fn kind(&self) -> IncomeKind {
        match self {
            IncomeSource::Salary(_) => IncomeKind::Salary,
            IncomeSource::TemporaryBenefit(_) => IncomeKind::TemporaryBenefit,
            IncomeSource::Pension(_) => IncomeKind::Pension,
            IncomeSource::SemiAnnualBenefit(_) => IncomeKind::SemiAnnualBenefit,
        }
    }

    /// Returns whether the source takes part in computations.
    pub fn is_active(&self) -> bool {
        match self {
            IncomeSource::Salary(s) => s.is_active,
            IncomeSource::TemporaryBenefit(b) => b.is_active,
            IncomeSource::Pension(p) => p.is_active,
            IncomeSource::SemiAnnualBenefit(b) => b.is_active,
        }
    }

    /// Checks amounts and dates of the source.
    ///
    /// Amounts must be non-negative, dates must fall inside the configured
    /// year range, and a salary may not end before it starts.
    pub fn validate(&self, rules: &ValidationRules) -> EngineResult<()> {
        match self {
            IncomeSource::Salary(s) => {
                check_amount(rules, "net_amount_per_period", s.net_amount_per_period)?;
                check_date(rules, "anchor_pay_date", s.anchor_pay_date)?;
                check_date(rules, "start_date", s.start_date)?;
                if let Some(end) = s.end_date {
                    check_date(rules, "end_date", end)?;
                    if end < s.start_date {
                        return Err(EngineError::InvalidSource {
                            source_id: s.id.clone(),
                            message: format!(
                                "end date {} is before start date {}",
                                end, s.start_date
                            ),
                        });
                    }
                }
                check_revisions(rules, &s.revisions)
            }
            IncomeSource::TemporaryBenefit(b) => {
                check_amount(rules, "weekly_net_amount", b.weekly_net_amount)?;
                check_date(rules, "start_date", b.start_date)?;
                check_revisions(rules, &b.revisions)
            }
            IncomeSource::Pension(p) => {
                check_amount(rules, "amount", p.amount)?;
                check_date(rules, "start_date", p.start_date)
            }
            IncomeSource::SemiAnnualBenefit(b) => {
                check_amount(rules, "period_h1_amount", b.period_h1_amount)?;
                check_amount(rules, "period_h2_amount", b.period_h2_amount)
            }
        }
    }
}

fn check_amount(rules: &ValidationRules, field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            field: field.to_string(),
            message: format!("must not be negative, got {}", amount),
        });
    }
    if amount > rules.max_amount {
        return Err(EngineError::InvalidAmount {
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", rules.max_amount, amount),
        });
    }
    Ok(())
}

fn check_date(rules: &ValidationRules, field: &str, date: NaiveDate) -> EngineResult<()> {
    if !rules.contains_year(date.year()) {
        return Err(EngineError::InvalidDate {
            field: field.to_string(),
            message: format!(
                "{} is outside the supported range {}-{}",
                date, rules.min_year, rules.max_year
            ),
        });
    }
    Ok(())
}

fn check_revisions(rules: &ValidationRules, revisions: &[RateRevision]) -> EngineResult<()> {
    for revision in revisions {
        check_date(rules, "revisions.effective_date", revision.effective_date)?;
        check_amount(rules, "revisions.new_amount", revision.new_amount)?;
    }
    Ok(())
}
