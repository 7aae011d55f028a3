use std::collections::BTreeSet;

use budget_engine::config::Config;
use budget_engine::core::{
    build_trend, category_breakdown, daily_spending, filter_transactions, window_for,
    BudgetService, BudgetSnapshot, SnapshotContext,
};
use budget_engine::domain::{Budget, BudgetDraft, BudgetPeriod, CategoryDirectory, Transaction};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const CATEGORIES: [&str; 4] = ["food", "fuel", "fun", "rent"];

fn build_sample_transactions(txn_count: usize) -> Vec<Transaction> {
    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..txn_count)
        .map(|idx| {
            let date = start_date + Duration::days((idx % 365) as i64);
            let category = CATEGORIES[idx % CATEGORIES.len()];
            let account = if idx % 2 == 0 { "checking" } else { "card" };
            if idx % 11 == 0 {
                Transaction::income(500.0, category, account, date)
            } else {
                Transaction::expense(5.0 + (idx % 100) as f64, category, account, date)
            }
        })
        .collect()
}

fn sample_budget(period: BudgetPeriod) -> Budget {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let draft = BudgetDraft::new("bench", "Everyday", 12_000.0)
        .with_category("food")
        .with_category("fuel")
        .with_period(period)
        .starting(start);
    BudgetService::build(draft, &Config::default(), start).expect("bench budget")
}

fn bench_window_pipeline(c: &mut Criterion) {
    let transactions = build_sample_transactions(black_box(10_000));
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let budget = sample_budget(BudgetPeriod::Yearly);
    let window = window_for(&budget, today, 0);
    let categories = budget.categories();

    c.bench_function("filter_year_10k", |b| {
        b.iter(|| {
            let filtered =
                filter_transactions(&transactions, &categories, &BTreeSet::new(), window);
            black_box(filtered);
        })
    });

    let filtered = filter_transactions(&transactions, &categories, &BTreeSet::new(), window);
    let directory = CategoryDirectory::new();

    c.bench_function("aggregate_year_10k", |b| {
        b.iter(|| {
            black_box(daily_spending(&filtered));
            black_box(category_breakdown(&filtered, &directory));
        })
    });

    c.bench_function("trend_year_10k", |b| {
        b.iter(|| {
            let trend = build_trend(&filtered, budget.amount, window, budget.period, today);
            black_box(trend);
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let transactions = build_sample_transactions(black_box(10_000));
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let ctx = SnapshotContext::from_config(&Config::default());

    for period in [BudgetPeriod::Monthly, BudgetPeriod::Yearly] {
        let budget = sample_budget(period);
        c.bench_function(&format!("snapshot_{}", period.to_string().to_lowercase()), |b| {
            b.iter(|| {
                let snapshot =
                    BudgetSnapshot::compute(budget.clone(), &transactions, today, 0, &ctx);
                black_box(snapshot);
            })
        });
    }
}

criterion_group!(benches, bench_window_pipeline, bench_snapshot);
criterion_main!(benches);
