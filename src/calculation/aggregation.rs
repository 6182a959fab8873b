//! Multi-source income aggregation.
//!
//! This module values every active income source of a person as of a reference
//! date and folds the results into an [`AggregatedIncome`]. Invalid sources do
//! not abort the computation: they are left out of the totals and reported as
//! [`Diagnostic`]s.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AccrualResult, AggregatedIncome, AuditStep, Diagnostic, HouseholdIncome, IncomeSource,
    Pension, Salary, SemiAnnualBenefit, SourceSummary, TemporaryBenefit, TemporaryIncome,
    TemporaryIncomeDetail,
};

use super::accrual::{EmploymentBounds, RevisionSchedule, compute_accrual_within, round_money};
use super::calendar::generate_calendar;
use super::pension::compute_pension_accrual;
use super::semi_annual::{compute_semi_annual_breakdown, semi_annual_annual_amount};
use super::temporary_benefit::compute_temporary_benefit_accrual;

/// Weeks in a year, the most a temporary benefit can pay in one.
const WEEKS_PER_YEAR: u32 = 52;

/// The valuation of one source before it is folded into the aggregate.
struct Valuation {
    annual: Decimal,
    accrued_to_date: Decimal,
    periods_counted: u32,
    temporary: Option<TemporaryIncomeDetail>,
    step: AuditStep,
}

/// Aggregates `sources` as of `as_of` with the default configuration.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::aggregate;
/// use accrual_engine::models::{IncomeKind, IncomeSource, PayCadence, Pension};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let sources = vec![IncomeSource::Pension(Pension {
///     id: "employer_plan".to_string(),
///     is_active: true,
///     amount: Decimal::from(1500),
///     cadence: PayCadence::Monthly,
///     start_date: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
/// })];
///
/// let income = aggregate(&sources, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()).unwrap();
///
/// assert_eq!(income.total_annual, Decimal::from(18000));
/// assert_eq!(income.total_monthly, Decimal::from(1500));
/// assert_eq!(income.accrued_to_date, Decimal::from(6000));
/// assert_eq!(income.annual_for(IncomeKind::Pension), Decimal::from(18000));
/// ```
pub fn aggregate(sources: &[IncomeSource], as_of: NaiveDate) -> EngineResult<AggregatedIncome> {
    aggregate_with_config(sources, as_of, &EngineConfig::default())
}

/// Aggregates `sources` as of `as_of`.
///
/// Inactive sources are skipped. Each active source is validated against
/// `config.validation`; a failing source contributes nothing and yields a
/// diagnostic. Sources are valued in input order and each leaves one audit
/// step.
///
/// # Errors
///
/// Returns [`EngineError::AsOfDateOutOfRange`] when `as_of` falls outside the
/// configured year range.
pub fn aggregate_with_config(
    sources: &[IncomeSource],
    as_of: NaiveDate,
    config: &EngineConfig,
) -> EngineResult<AggregatedIncome> {
    let rules = &config.validation;
    if !rules.contains_year(as_of.year()) {
        return Err(EngineError::AsOfDateOutOfRange {
            date: as_of,
            min_year: rules.min_year,
            max_year: rules.max_year,
        });
    }

    let mut income = AggregatedIncome::empty(as_of);
    let mut by_type: BTreeMap<_, Decimal> = BTreeMap::new();
    let mut temporary = TemporaryIncome::default();

    for source in sources.iter().filter(|s| s.is_active()) {
        if let Err(err) = source.validate(rules) {
            warn!(
                source_id = %source.id(),
                kind = source.kind().as_str(),
                error = %err,
                "Source excluded from aggregation"
            );
            income.diagnostics.push(Diagnostic::from_error(source.id(), &err));
            continue;
        }

        let valuation = match source {
            IncomeSource::Salary(salary) => value_salary(salary, as_of),
            IncomeSource::TemporaryBenefit(benefit) => value_temporary_benefit(benefit, as_of),
            IncomeSource::Pension(pension) => value_pension(pension, as_of),
            IncomeSource::SemiAnnualBenefit(benefit) => {
                value_semi_annual(benefit, as_of, config)
            }
        };

        income.total_annual += valuation.annual;
        income.accrued_to_date += valuation.accrued_to_date;
        *by_type.entry(source.kind()).or_insert(Decimal::ZERO) += valuation.annual;

        if let Some(detail) = valuation.temporary {
            temporary.has_any = true;
            temporary.total_annual += detail.annual;
            temporary.detail.push(detail);
        }

        income.sources.push(SourceSummary {
            source_id: source.id().to_string(),
            kind: source.kind(),
            annual: valuation.annual,
            monthly: monthly_of(valuation.annual),
            accrued_to_date: valuation.accrued_to_date,
            periods_counted: valuation.periods_counted,
        });
        income.audit_trace.push(valuation.step);
    }

    income.total_monthly = monthly_of(income.total_annual);
    income.by_type = by_type;
    income.temporary_income = temporary;

    debug!(
        as_of = %as_of,
        sources = income.sources.len(),
        excluded = income.diagnostics.len(),
        total_annual = %income.total_annual,
        accrued_to_date = %income.accrued_to_date,
        "Aggregated income"
    );

    Ok(income)
}

/// Aggregates a primary person and an optional partner, and combines both.
///
/// Without a partner, `combined` equals `primary`.
///
/// # Errors
///
/// Returns [`EngineError::AsOfDateOutOfRange`] when `as_of` falls outside the
/// configured year range.
pub fn aggregate_household(
    primary: &[IncomeSource],
    partner: Option<&[IncomeSource]>,
    as_of: NaiveDate,
    config: &EngineConfig,
) -> EngineResult<HouseholdIncome> {
    let primary = aggregate_with_config(primary, as_of, config)?;
    let partner = partner
        .map(|sources| aggregate_with_config(sources, as_of, config))
        .transpose()?;

    let combined = match &partner {
        Some(partner) => primary.combine(partner),
        None => primary.clone(),
    };

    Ok(HouseholdIncome {
        primary,
        partner,
        combined,
    })
}

fn monthly_of(annual: Decimal) -> Decimal {
    round_money(annual / Decimal::from(12))
}

fn value_salary(salary: &Salary, as_of: NaiveDate) -> Valuation {
    let periods = generate_calendar(salary.anchor_pay_date, salary.cadence, as_of.year());
    let bounds = EmploymentBounds {
        start: Some(salary.start_date),
        end: salary.end_date,
    };
    let accrual = compute_accrual_within(
        &periods,
        salary.net_amount_per_period,
        as_of,
        &salary.revisions,
        bounds,
    );

    let current_amount =
        RevisionSchedule::new(salary.net_amount_per_period, &salary.revisions).amount_on(as_of);
    let annual = current_amount * Decimal::from(salary.cadence.periods_per_year());

    let step = AuditStep {
        step_number: 0,
        rule_id: "salary_accrual".to_string(),
        rule_name: "Salary Accrual".to_string(),
        input: serde_json::json!({
            "source_id": salary.id,
            "cadence": salary.cadence.as_str(),
            "anchor_pay_date": salary.anchor_pay_date.to_string(),
            "net_amount_per_period": salary.net_amount_per_period.to_string(),
            "start_date": salary.start_date.to_string(),
            "end_date": salary.end_date.map(|d| d.to_string()),
            "revisions": salary.revisions.len(),
            "as_of": as_of.to_string()
        }),
        output: serde_json::json!({
            "calendar_periods": periods.len(),
            "periods_counted": accrual.periods_counted,
            "accrued_to_date": accrual.total_to_date.to_string(),
            "current_amount": current_amount.to_string(),
            "annual": annual.to_string()
        }),
        reasoning: format!(
            "{} of {} {} periods paid by {}; annual = {} x {}",
            accrual.periods_counted,
            periods.len(),
            salary.cadence,
            as_of,
            current_amount,
            salary.cadence.periods_per_year()
        ),
    };

    Valuation {
        annual,
        accrued_to_date: accrual.total_to_date,
        periods_counted: accrual.periods_counted,
        temporary: None,
        step,
    }
}

fn value_temporary_benefit(benefit: &TemporaryBenefit, as_of: NaiveDate) -> Valuation {
    let result = compute_temporary_benefit_accrual(benefit, as_of);
    let annual_weeks = benefit.eligible_weeks_cap.min(WEEKS_PER_YEAR);
    let annual = result.current_weekly_amount * Decimal::from(annual_weeks);

    let step = AuditStep {
        step_number: 0,
        rule_id: "temporary_benefit_accrual".to_string(),
        rule_name: "Temporary Benefit Accrual".to_string(),
        input: serde_json::json!({
            "source_id": benefit.id,
            "weekly_net_amount": benefit.weekly_net_amount.to_string(),
            "start_date": benefit.start_date.to_string(),
            "eligible_weeks_cap": benefit.eligible_weeks_cap,
            "revisions": benefit.revisions.len(),
            "as_of": as_of.to_string()
        }),
        output: serde_json::json!({
            "weeks_elapsed": result.weeks_elapsed,
            "weeks_counted": result.weeks_counted,
            "cap_reached": result.cap_reached,
            "accrued_to_date": result.accrual.total_to_date.to_string(),
            "annual": annual.to_string()
        }),
        reasoning: if result.cap_reached {
            format!(
                "{} weeks elapsed, entitlement of {} weeks exhausted",
                result.weeks_elapsed, benefit.eligible_weeks_cap
            )
        } else {
            format!(
                "{} of {} weeks paid",
                result.weeks_counted, benefit.eligible_weeks_cap
            )
        },
    };

    let detail = TemporaryIncomeDetail {
        source_id: benefit.id.clone(),
        weekly_amount: result.current_weekly_amount,
        weeks_used: result.weeks_counted,
        weeks_cap: benefit.eligible_weeks_cap,
        cap_reached: result.cap_reached,
        accrued_to_date: result.accrual.total_to_date,
        annual,
    };

    Valuation {
        annual,
        accrued_to_date: result.accrual.total_to_date,
        periods_counted: result.weeks_counted,
        temporary: Some(detail),
        step,
    }
}

fn value_pension(pension: &Pension, as_of: NaiveDate) -> Valuation {
    let accrual: AccrualResult = compute_pension_accrual(pension, as_of);
    let annual = pension.amount * Decimal::from(pension.cadence.periods_per_year());

    let step = AuditStep {
        step_number: 0,
        rule_id: "pension_accrual".to_string(),
        rule_name: "Pension Accrual".to_string(),
        input: serde_json::json!({
            "source_id": pension.id,
            "amount": pension.amount.to_string(),
            "cadence": pension.cadence.as_str(),
            "start_date": pension.start_date.to_string(),
            "as_of": as_of.to_string()
        }),
        output: serde_json::json!({
            "payments_counted": accrual.periods_counted,
            "accrued_to_date": accrual.total_to_date.to_string(),
            "annual": annual.to_string()
        }),
        reasoning: format!(
            "{} payments of {} since 1 January",
            accrual.periods_counted, pension.amount
        ),
    };

    Valuation {
        annual,
        accrued_to_date: accrual.total_to_date,
        periods_counted: accrual.periods_counted,
        temporary: None,
        step,
    }
}

fn value_semi_annual(
    benefit: &SemiAnnualBenefit,
    as_of: NaiveDate,
    config: &EngineConfig,
) -> Valuation {
    let accrual = compute_semi_annual_breakdown(benefit, as_of, &config.semi_annual);
    let annual = semi_annual_annual_amount(benefit);

    let step = AuditStep {
        step_number: 0,
        rule_id: "semi_annual_accrual".to_string(),
        rule_name: "Semi-Annual Benefit Accrual".to_string(),
        input: serde_json::json!({
            "source_id": benefit.id,
            "period_h1_amount": benefit.period_h1_amount.to_string(),
            "period_h2_amount": benefit.period_h2_amount.to_string(),
            "payment_day": config.semi_annual.payment_day,
            "as_of": as_of.to_string()
        }),
        output: serde_json::json!({
            "completed_months": accrual.completed_months,
            "months_h1": accrual.months_h1,
            "months_h2": accrual.months_h2,
            "accrued_to_date": accrual.total.to_string(),
            "annual": annual.to_string()
        }),
        reasoning: format!(
            "{} months at {} and {} months at {}",
            accrual.months_h1,
            benefit.period_h1_amount,
            accrual.months_h2,
            benefit.period_h2_amount
        ),
    };

    Valuation {
        annual,
        accrued_to_date: accrual.total,
        periods_counted: accrual.completed_months,
        temporary: None,
        step,
    }
}
