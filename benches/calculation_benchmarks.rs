//! Performance benchmarks for the accrual engine.
//!
//! This benchmark suite tracks the cost of the main engine paths:
//! - Calendar generation for one year: < 10μs mean
//! - Year-to-date salary accrual: < 20μs mean
//! - Household evaluation from form state: < 200μs mean
//! - Batch of 100 household evaluations: < 20ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use accrual_engine::calculation::{aggregate, compute_accrual, generate_calendar};
use accrual_engine::config::{ConfigLoader, EngineConfig};
use accrual_engine::input::{EvaluationRequest, evaluate_request};
use accrual_engine::models::{IncomeSource, PayCadence, Salary, TemporaryBenefit};

/// Loads the default configuration.
fn create_test_config() -> EngineConfig {
    ConfigLoader::load("./config/default")
        .expect("Failed to load config")
        .into_config()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Creates a household form in which each person declares two sources.
fn create_household_request(id: usize) -> EvaluationRequest {
    serde_json::from_value(serde_json::json!({
        "as_of_date": "2025-09-15",
        "sources": [
            {
                "kind": "salary",
                "id": format!("salary_{}", id),
                "cadence": "biweekly",
                "anchor_pay_date": "2025-01-02",
                "net_amount_per_period": "2720.73",
                "start_date": "2020-01-06",
                "revisions": [{ "effective_date": "2025-06-01", "new_amount": "2850.00" }]
            },
            {
                "kind": "semi_annual_benefit",
                "id": format!("oas_{}", id),
                "period_h1_amount": "692.89",
                "period_h2_amount": "324.91"
            }
        ],
        "partner_sources": [
            {
                "kind": "pension",
                "id": format!("pension_{}", id),
                "amount": "1500",
                "cadence": "monthly",
                "start_date": "2018-03-01"
            },
            {
                "kind": "temporary_benefit",
                "id": format!("ei_{}", id),
                "weekly_net_amount": "640",
                "start_date": "2025-04-06",
                "eligible_weeks_cap": 35
            }
        ]
    }))
    .unwrap()
}

/// Creates `count` active sources, alternating salaries and temporary benefits.
fn create_sources(count: usize) -> Vec<IncomeSource> {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                IncomeSource::Salary(Salary {
                    id: format!("salary_{}", i),
                    is_active: true,
                    cadence: PayCadence::ALL[i % PayCadence::ALL.len()],
                    anchor_pay_date: date(2025, 1, 2),
                    net_amount_per_period: Decimal::new(272073, 2),
                    start_date: date(2020, 1, 6),
                    end_date: None,
                    revisions: vec![],
                })
            } else {
                IncomeSource::TemporaryBenefit(TemporaryBenefit {
                    id: format!("ei_{}", i),
                    is_active: true,
                    weekly_net_amount: Decimal::from(640),
                    start_date: date(2025, 4, 6),
                    eligible_weeks_cap: 35,
                    revisions: vec![],
                })
            }
        })
        .collect()
}

/// Benchmark: One year of weekly pay periods.
///
/// Target: < 10μs mean
fn bench_calendar(c: &mut Criterion) {
    c.bench_function("calendar_weekly_year", |b| {
        b.iter(|| {
            black_box(generate_calendar(
                black_box(date(2025, 1, 3)),
                PayCadence::Weekly,
                2025,
            ))
        })
    });
}

/// Benchmark: Year-to-date accrual of a biweekly salary.
///
/// Target: < 20μs mean
fn bench_salary_accrual(c: &mut Criterion) {
    let periods = generate_calendar(date(2025, 1, 2), PayCadence::Biweekly, 2025);

    c.bench_function("salary_accrual", |b| {
        b.iter(|| {
            black_box(compute_accrual(
                &periods,
                Decimal::new(272073, 2),
                black_box(date(2025, 12, 31)),
                &[],
                Some(date(2025, 11, 20)),
            ))
        })
    });
}

/// Benchmark: Household evaluation from form state.
///
/// Target: < 200μs mean
fn bench_household_evaluation(c: &mut Criterion) {
    let config = create_test_config();
    let request = create_household_request(0);

    c.bench_function("household_evaluation", |b| {
        b.iter(|| black_box(evaluate_request(black_box(&request), &config).unwrap()))
    });
}

/// Benchmark: Batch of 100 household evaluations.
///
/// Target: < 20ms mean
fn bench_batch_100(c: &mut Criterion) {
    let config = create_test_config();
    let requests: Vec<EvaluationRequest> = (0..100).map(create_household_request).collect();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(requests.len() as u64));
    group.bench_function("households_100", |b| {
        b.iter(|| {
            for request in &requests {
                black_box(evaluate_request(request, &config).unwrap());
            }
        })
    });
    group.finish();
}

/// Benchmark: Various source counts to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for source_count in [1, 2, 4, 8, 16].iter() {
        let sources = create_sources(*source_count);

        group.throughput(Throughput::Elements(*source_count as u64));
        group.bench_with_input(
            BenchmarkId::new("sources", source_count),
            &sources,
            |b, sources| b.iter(|| black_box(aggregate(sources, date(2025, 9, 15)).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_calendar,
    bench_salary_accrual,
    bench_household_evaluation,
    bench_batch_100,
    bench_scaling,
);
criterion_main!(benches);
