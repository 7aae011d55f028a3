mod common;

use budget_engine::core::build_trend;
use budget_engine::domain::{BudgetPeriod, PeriodWindow, Transaction};
use chrono::Duration;
use common::date;

fn january() -> PeriodWindow {
    PeriodWindow::new(date(2025, 1, 1), date(2025, 1, 31))
}

fn spend(amount: f64, day: chrono::NaiveDate) -> Transaction {
    Transaction::expense(amount, "food", "checking", day)
}

#[test]
fn recommended_and_average_follow_days_passed() {
    let window = january();
    let today = window.start + Duration::days(1);
    let filtered = vec![spend(10.0, window.start), spend(20.0, today)];

    let trend = build_trend(&filtered, 310.0, window, BudgetPeriod::Monthly, today);
    assert!((trend.daily_recommended - 10.0).abs() < 1e-9);
    assert!((trend.daily_average - 15.0).abs() < 1e-9);
    assert_eq!(trend.total_spent, 30.0);
    assert_eq!(trend.limit, 310.0);
}

#[test]
fn actual_series_accumulates_through_today() {
    let window = january();
    let today = date(2025, 1, 5);
    let filtered = vec![
        spend(10.0, date(2025, 1, 1)),
        spend(5.0, date(2025, 1, 3)),
        spend(2.5, date(2025, 1, 3)),
    ];
    let trend = build_trend(&filtered, 310.0, window, BudgetPeriod::Monthly, today);

    let values: Vec<f64> = trend.actual.iter().map(|point| point.value).collect();
    assert_eq!(values, vec![10.0, 10.0, 17.5, 17.5, 17.5]);
    assert_eq!(trend.actual.last().unwrap().date, today);
}

#[test]
fn forecast_continues_from_actual_total() {
    let window = january();
    let today = date(2025, 1, 10);
    let filtered = vec![spend(42.0, date(2025, 1, 4))];
    let trend = build_trend(&filtered, 310.0, window, BudgetPeriod::Monthly, today);

    let last_actual = trend.actual.last().unwrap();
    let first_forecast = trend.forecast.first().unwrap();
    assert_eq!(last_actual.date, first_forecast.date);
    assert_eq!(last_actual.value, first_forecast.value);

    assert_eq!(trend.forecast.len(), 22);
    assert_eq!(trend.forecast.last().unwrap().date, window.end);
    for pair in trend.forecast.windows(2) {
        assert!((pair[1].value - pair[0].value - 10.0).abs() < 1e-9);
    }
    assert!((trend.projected_total() - (42.0 + 21.0 * 10.0)).abs() < 1e-9);
    assert_eq!(trend.days_remaining(), 21);
}

#[test]
fn past_window_has_no_forecast() {
    let window = january();
    let filtered = vec![spend(100.0, date(2025, 1, 20))];
    let trend = build_trend(&filtered, 310.0, window, BudgetPeriod::Monthly, date(2025, 3, 1));

    assert!(trend.forecast.is_empty());
    assert_eq!(trend.actual.len(), 31);
    assert_eq!(trend.actual.last().unwrap().value, 100.0);
    assert_eq!(trend.projected_total(), 100.0);
    assert_eq!(trend.days_remaining(), 0);
}

#[test]
fn future_window_projects_from_zero() {
    let window = PeriodWindow::new(date(2025, 2, 1), date(2025, 2, 28));
    let trend = build_trend(&[], 280.0, window, BudgetPeriod::Monthly, date(2025, 1, 20));

    assert!(trend.actual.is_empty());
    assert_eq!(trend.forecast.first().unwrap().date, window.start);
    assert_eq!(trend.forecast.first().unwrap().value, 0.0);
    assert_eq!(trend.forecast.len(), 28);
    assert_eq!(trend.daily_average, 0.0);
}

#[test]
fn overrun_reports_first_day_above_limit() {
    let window = january();
    let filtered = vec![spend(50.0, date(2025, 1, 2))];
    let trend = build_trend(&filtered, 62.0, window, BudgetPeriod::Monthly, date(2025, 1, 3));
    // 2.0 per day from 50.0 crosses 62.0 on day 7 after today.
    assert_eq!(trend.projected_overrun(), Some(date(2025, 1, 10)));

    let calm = build_trend(&[], 310.0, window, BudgetPeriod::Monthly, date(2025, 1, 3));
    assert!(calm.projected_overrun().is_none());
}

#[test]
fn weekly_trend_reports_calendar_week_range() {
    // Wednesday-anchored accounting week.
    let window = PeriodWindow::new(date(2025, 3, 12), date(2025, 3, 18));
    let trend = build_trend(&[], 70.0, window, BudgetPeriod::Weekly, date(2025, 3, 14));
    assert_eq!(trend.visible, PeriodWindow::new(date(2025, 3, 10), date(2025, 3, 16)));
    assert!((trend.daily_recommended - 10.0).abs() < 1e-9);
}

#[test]
fn identical_inputs_yield_identical_trends() {
    let window = january();
    let filtered: Vec<Transaction> = (1..=20)
        .map(|day| spend(f64::from(day) * 0.7, date(2025, 1, day)))
        .collect();
    let today = date(2025, 1, 18);
    let first = build_trend(&filtered, 123.45, window, BudgetPeriod::Monthly, today);
    let second = build_trend(&filtered, 123.45, window, BudgetPeriod::Monthly, today);
    assert_eq!(first, second);
}
