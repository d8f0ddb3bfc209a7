//! Performance benchmarks for the household tax engine.
//!
//! This benchmark suite covers:
//! - The pure pipeline for a single earner with no investments
//! - The pure pipeline for a couple with a mixed portfolio
//! - Scaling with the number of investments
//! - The full HTTP path, including JSON parsing and serialization
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use household_tax_engine::api::{AppState, CalculationRequest, create_router};
use household_tax_engine::calculation::calculate_household;
use household_tax_engine::config::{ConfigLoader, TaxConfig};
use household_tax_engine::models::HouseholdInput;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/au_2024_25").expect("Failed to load config")
}

/// Builds a couple with `investment_count` investments, alternating
/// negatively geared property and shares.
fn create_request(investment_count: usize) -> CalculationRequest {
    let investments: Vec<serde_json::Value> = (0..investment_count)
        .map(|i| {
            if i % 2 == 0 {
                serde_json::json!({
                    "name": format!("Property {}", i + 1),
                    "type": "property",
                    "rent_per_week": 550,
                    "vacancy_weeks": 3,
                    "interest": 32000,
                    "other_deductions": 4500,
                    "ownership_pct": 60
                })
            } else {
                serde_json::json!({
                    "name": format!("Shares {}", i + 1),
                    "type": "shares_or_funds",
                    "gross_income": 3200,
                    "ownership_pct": 50
                })
            }
        })
        .collect();

    let request_json = serde_json::json!({
        "household": { "is_couple": true, "dependent_children": 2, "tax_year": "2024-25" },
        "person_a": {
            "base_salary": 145000,
            "uplift_pct": 20,
            "weeks_away": 10,
            "extra_concessional": 5000
        },
        "person_b": {
            "base_salary": 78000,
            "salary_includes_guarantee": true,
            "reportable_fringe_benefits": 4000
        },
        "investments": investments
    });

    serde_json::from_value(request_json).expect("Failed to create request")
}

fn create_input(investment_count: usize) -> HouseholdInput {
    create_request(investment_count).into()
}

/// Benchmark: the pure pipeline for a single earner.
fn bench_single_earner(c: &mut Criterion) {
    let loader = load_config();
    let config: &TaxConfig = loader.config();
    let mut input = create_input(0);
    input.household.is_couple = false;

    c.bench_function("single_earner", |b| {
        b.iter(|| black_box(calculate_household(black_box(&input), config)))
    });
}

/// Benchmark: the pure pipeline for a couple with four investments.
fn bench_couple_with_portfolio(c: &mut Criterion) {
    let loader = load_config();
    let input = create_input(4);

    c.bench_function("couple_with_portfolio", |b| {
        b.iter(|| black_box(calculate_household(black_box(&input), loader.config())))
    });
}

/// Benchmark: pipeline cost as the portfolio grows.
fn bench_investment_scaling(c: &mut Criterion) {
    let loader = load_config();
    let mut group = c.benchmark_group("investment_scaling");

    for count in [1usize, 10, 100, 1000].iter() {
        let input = create_input(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("investments", count), &input, |b, input| {
            b.iter(|| black_box(calculate_household(input, loader.config())))
        });
    }

    group.finish();
}

/// Benchmark: a full request through the router.
fn bench_http_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = serde_json::to_string(&create_request(4)).unwrap();

    c.bench_function("http_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: a batch of 100 households through the pure pipeline.
fn bench_batch_100(c: &mut Criterion) {
    let loader = load_config();
    let inputs: Vec<HouseholdInput> = (0..100).map(|i| create_input(i % 6)).collect();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(100));
    group.bench_function("households_100", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(calculate_household(input, loader.config()));
            }
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_single_earner,
    bench_couple_with_portfolio,
    bench_investment_scaling,
    bench_http_request,
    bench_batch_100,
);
criterion_main!(benches);
