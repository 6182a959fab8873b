//! Integration tests for the accrual engine.
//!
//! This test suite covers end-to-end evaluations including:
//! - Salary accrual over a generated pay calendar
//! - Semi-annual benefit accrual
//! - Capped temporary benefits
//! - Risk classification
//! - Household aggregation
//! - Diagnostics and error cases

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;

use accrual_engine::calculation::{
    RiskLevel, aggregate, aggregate_with_config, classify, compute_accrual, generate_calendar,
};
use accrual_engine::config::{ConfigLoader, EngineConfig};
use accrual_engine::error::EngineError;
use accrual_engine::input::{Evaluation, EvaluationRequest, evaluate_request};
use accrual_engine::models::{
    DiagnosticCode, IncomeKind, IncomeSource, PayCadence, Salary, SemiAnnualBenefit,
    TemporaryBenefit,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn default_config() -> EngineConfig {
    ConfigLoader::load("./config/default")
        .expect("Failed to load config")
        .into_config()
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

fn evaluate(body: Value) -> Result<Evaluation, EngineError> {
    let request: EvaluationRequest = serde_json::from_value(body).unwrap();
    evaluate_request(&request, &default_config())
}

fn salary_json(id: &str, amount: &str) -> Value {
    json!({
        "kind": "salary",
        "id": id,
        "cadence": "biweekly",
        "anchor_pay_date": "2025-01-02",
        "net_amount_per_period": amount,
        "start_date": "2020-01-06"
    })
}

fn semi_annual_json(id: &str) -> Value {
    json!({
        "kind": "semi_annual_benefit",
        "id": id,
        "period_h1_amount": "692.89",
        "period_h2_amount": "324.91"
    })
}

fn temporary_benefit_json(id: &str) -> Value {
    json!({
        "kind": "temporary_benefit",
        "id": id,
        "weekly_net_amount": "1270",
        "start_date": "2025-04-06",
        "eligible_weeks_cap": 35
    })
}

fn assert_money(actual: Decimal, expected: &str) {
    let actual = normalize_decimal(&actual.to_string());
    let expected = normalize_decimal(expected);
    assert_eq!(actual, expected, "Expected {}, got {}", expected, actual);
}

// =============================================================================
// SECTION 1: Salary accrual
// =============================================================================

#[test]
fn test_biweekly_salary_accrues_seven_periods() {
    // Pay dates Jan 2, 16, 30, Feb 13, 27, Mar 13, 27 fall on or before Apr 7.
    let result = evaluate(json!({
        "as_of_date": "2025-04-07",
        "sources": [salary_json("salary_1", "2720.73")]
    }))
    .unwrap();

    let primary = &result.household.primary;
    assert_money(primary.accrued_to_date, "19045.11");
    assert_eq!(primary.sources[0].periods_counted, 7);
    assert_money(primary.total_annual, "70738.98");
    assert_money(primary.total_monthly, "5894.92");
}

#[test]
fn test_salary_ending_mid_period_is_prorated() {
    let mut salary = salary_json("salary_1", "2720.73");
    salary["end_date"] = json!("2025-02-20");

    let result = evaluate(json!({
        "as_of_date": "2025-04-07",
        "sources": [salary]
    }))
    .unwrap();

    assert_money(result.household.primary.accrued_to_date, "12437.62");
}

#[test]
fn test_salary_revision_is_applied_from_effective_date() {
    let mut salary = salary_json("salary_1", "2720.73");
    salary["revisions"] = json!([
        { "effective_date": "2025-02-01", "new_amount": "3000" }
    ]);

    let result = evaluate(json!({
        "as_of_date": "2025-04-07",
        "sources": [salary]
    }))
    .unwrap();

    assert_money(result.household.primary.accrued_to_date, "20162.19");
    assert_money(result.household.primary.total_annual, "78000");
}

#[test]
fn test_calendar_and_accrual_compose_directly() {
    let periods = generate_calendar(date(2025, 1, 2), PayCadence::Biweekly, 2025);
    let early = compute_accrual(&periods, decimal("2720.73"), date(2025, 4, 7), &[], None);
    let later = compute_accrual(&periods, decimal("2720.73"), date(2025, 12, 31), &[], None);

    assert_eq!(early.periods_counted, 7);
    assert_eq!(later.periods_counted, 26);
    assert!(later.total_to_date >= early.total_to_date);
}

// =============================================================================
// SECTION 2: Semi-annual and temporary benefits
// =============================================================================

#[test]
fn test_semi_annual_benefit_in_september() {
    let result = evaluate(json!({
        "as_of_date": "2025-09-15",
        "sources": [semi_annual_json("oas")]
    }))
    .unwrap();

    let primary = &result.household.primary;
    assert_money(primary.accrued_to_date, "4807.16");
    assert_eq!(primary.sources[0].periods_counted, 8);
}

#[test]
fn test_semi_annual_payment_day_from_config() {
    let config = EngineConfig::from_yaml_str("semi_annual:\n  payment_day: 25\n").unwrap();
    let sources = vec![IncomeSource::SemiAnnualBenefit(SemiAnnualBenefit {
        id: "oas".to_string(),
        is_active: true,
        period_h1_amount: decimal("692.89"),
        period_h2_amount: decimal("324.91"),
    })];

    let income = aggregate_with_config(&sources, date(2025, 9, 26), &config).unwrap();
    assert_money(income.accrued_to_date, "5132.07");
}

#[test]
fn test_temporary_benefit_stops_at_cap() {
    // 2026-03-22 is 50 weeks after 2025-04-06.
    let result = evaluate(json!({
        "as_of_date": "2026-03-22",
        "sources": [temporary_benefit_json("ei")]
    }))
    .unwrap();

    let temporary = &result.household.primary.temporary_income;
    assert!(temporary.has_any);
    assert_eq!(temporary.detail[0].weeks_used, 35);
    assert_eq!(temporary.detail[0].weeks_cap, 35);
    assert!(temporary.detail[0].cap_reached);
    assert_money(temporary.detail[0].accrued_to_date, "44450");
    assert_money(temporary.total_annual, "44450");
}

// =============================================================================
// SECTION 3: Risk classification
// =============================================================================

#[test]
fn test_single_salary_is_highly_concentrated() {
    let result = evaluate(json!({
        "as_of_date": "2025-04-07",
        "sources": [salary_json("salary_1", "2720.73")]
    }))
    .unwrap();

    assert_eq!(result.risk.concentration_risk, RiskLevel::High);
    assert_eq!(result.risk.temporary_income_risk, RiskLevel::Low);
    assert_eq!(result.risk.benefit_dependency_risk, RiskLevel::None);
}

#[test]
fn test_diversified_income_has_low_concentration() {
    let result = evaluate(json!({
        "as_of_date": "2025-04-07",
        "sources": [
            salary_json("salary_1", "1000"),
            salary_json("salary_2", "1000"),
            salary_json("salary_3", "1000")
        ]
    }))
    .unwrap();

    assert_eq!(result.risk.concentration_risk, RiskLevel::Low);
}

#[test]
fn test_no_income_is_low_risk() {
    let result = evaluate(json!({ "as_of_date": "2025-04-07", "sources": [] })).unwrap();

    assert_eq!(result.risk.temporary_income_risk, RiskLevel::Low);
    assert_eq!(result.risk.concentration_risk, RiskLevel::Low);
    assert_eq!(result.risk.benefit_dependency_risk, RiskLevel::None);
}

// =============================================================================
// SECTION 4: Household
// =============================================================================

#[test]
fn test_household_combines_partner_income() {
    let result = evaluate(json!({
        "as_of_date": "2025-09-15",
        "sources": [salary_json("salary_1", "2720.73")],
        "partner_sources": [semi_annual_json("oas"), temporary_benefit_json("ei")]
    }))
    .unwrap();

    let household = &result.household;
    let partner = household.partner.as_ref().unwrap();
    assert_eq!(partner.sources.len(), 2);

    let combined = &household.combined;
    assert_money(
        combined.total_annual,
        &(household.primary.total_annual + partner.total_annual).to_string(),
    );
    assert_eq!(combined.by_type.len(), 3);
    assert_eq!(combined.audit_trace.steps.len(), 3);
    assert_eq!(combined.audit_trace.steps[2].step_number, 3);
    assert!(combined.temporary_income.has_any);
}

#[test]
fn test_household_serializes_without_absent_partner() {
    let result = evaluate(json!({
        "as_of_date": "2025-04-07",
        "sources": [salary_json("salary_1", "2720.73")]
    }))
    .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["household"].get("partner").is_none());
    assert_eq!(json["risk"]["concentration_risk"], "high");
    assert_eq!(json["household"]["primary"]["accrued_to_date"], "19045.11");
    assert_eq!(json["household"]["primary"]["by_type"]["salary"], "70738.98");
}

// =============================================================================
// SECTION 5: Diagnostics and errors
// =============================================================================

#[test]
fn test_invalid_sources_are_reported_not_fatal() {
    let mut negative = salary_json("negative", "-100");
    negative["cadence"] = json!("weekly");
    let mut ancient = semi_annual_json("ancient");
    ancient["kind"] = json!("pension");
    ancient["amount"] = json!("500");
    ancient["cadence"] = json!("monthly");
    ancient["start_date"] = json!("1850-01-01");

    let result = evaluate(json!({
        "as_of_date": "2025-04-07",
        "sources": [
            negative,
            ancient,
            { "kind": "salary", "id": "bad_date", "cadence": "biweekly",
              "anchor_pay_date": "02/01/2025", "net_amount_per_period": "100",
              "start_date": "2020-01-06" },
            salary_json("salary_1", "2720.73")
        ]
    }))
    .unwrap();

    let primary = &result.household.primary;
    let codes: Vec<(&str, DiagnosticCode)> = primary
        .diagnostics
        .iter()
        .map(|d| (d.source_id.as_str(), d.code))
        .collect();

    assert_eq!(codes.len(), 3);
    assert!(codes.contains(&("negative", DiagnosticCode::InvalidAmount)));
    assert!(codes.contains(&("ancient", DiagnosticCode::InvalidDate)));
    assert!(codes.contains(&("bad_date", DiagnosticCode::InvalidDate)));
    assert_money(primary.accrued_to_date, "19045.11");
}

#[test]
fn test_amounts_beyond_maximum_are_reported_not_fatal() {
    let largest = Decimal::MAX.to_string();
    let mut salary = salary_json("huge_salary", &largest);
    salary["cadence"] = json!("weekly");
    let mut benefit = temporary_benefit_json("huge_benefit");
    benefit["weekly_net_amount"] = json!(largest);
    let mut semi_annual = semi_annual_json("huge_semi_annual");
    semi_annual["period_h2_amount"] = json!(largest);

    let result = evaluate(json!({
        "as_of_date": "2025-12-31",
        "sources": [salary, benefit, semi_annual]
    }))
    .unwrap();

    let primary = &result.household.primary;
    assert_eq!(primary.diagnostics.len(), 3);
    assert!(primary
        .diagnostics
        .iter()
        .all(|d| d.code == DiagnosticCode::InvalidAmount));
    assert_eq!(primary.accrued_to_date, Decimal::ZERO);
    assert_eq!(primary.total_annual, Decimal::ZERO);
    assert!(primary.sources.is_empty());
}

#[test]
fn test_missing_as_of_date_is_rejected() {
    let result = evaluate(json!({ "sources": [salary_json("salary_1", "2720.73")] }));
    assert!(matches!(result, Err(EngineError::MissingAsOfDate)));
}

#[test]
fn test_as_of_date_outside_range_is_rejected() {
    let result = evaluate(json!({ "as_of_date": "2300-01-01", "sources": [] }));
    match result {
        Err(EngineError::AsOfDateOutOfRange { min_year, max_year, .. }) => {
            assert_eq!(min_year, 1900);
            assert_eq!(max_year, 2200);
        }
        other => panic!("Expected AsOfDateOutOfRange, got {:?}", other),
    }
}

// =============================================================================
// SECTION 6: Determinism
// =============================================================================

#[test]
fn test_aggregate_is_idempotent() {
    let sources = vec![
        IncomeSource::Salary(Salary {
            id: "salary_1".to_string(),
            is_active: true,
            cadence: PayCadence::Monthly,
            anchor_pay_date: date(2024, 1, 31),
            net_amount_per_period: decimal("4100"),
            start_date: date(2025, 2, 10),
            end_date: Some(date(2025, 10, 15)),
            revisions: vec![],
        }),
        IncomeSource::TemporaryBenefit(TemporaryBenefit {
            id: "ei".to_string(),
            is_active: true,
            weekly_net_amount: decimal("640"),
            start_date: date(2025, 1, 5),
            eligible_weeks_cap: 20,
            revisions: vec![],
        }),
    ];

    let first = aggregate(&sources, date(2025, 11, 3)).unwrap();
    let second = aggregate(&sources, date(2025, 11, 3)).unwrap();

    assert_eq!(first, second);
    assert_eq!(classify(&first), classify(&second));
    assert!(first.annual_for(IncomeKind::TemporaryBenefit) > Decimal::ZERO);
}
