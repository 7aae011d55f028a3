//! Cumulative spend and straight-line forecast series for a budget window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{
    aggregate::{spend_by_date, total_spent},
    period::visible_range,
};
use crate::domain::{BudgetPeriod, PeriodWindow, Transaction};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Chart-ready trend for one budget window. Values are unrounded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetTrendData {
    pub total_spent: f64,
    pub daily_average: f64,
    pub daily_recommended: f64,
    /// Running total per day from the window start through today.
    pub actual: Vec<TrendPoint>,
    /// Projection from today to the window end at `daily_recommended` per day.
    pub forecast: Vec<TrendPoint>,
    pub visible: PeriodWindow,
    pub limit: f64,
}

pub fn build_trend(
    filtered: &[Transaction],
    budget_amount: f64,
    window: PeriodWindow,
    period: BudgetPeriod,
    today: NaiveDate,
) -> BudgetTrendData {
    let total = total_spent(filtered);
    let days_passed = (today - window.start).num_days().max(0) + 1;
    let daily_average = total / days_passed as f64;
    let daily_recommended = budget_amount / window.days() as f64;

    let by_date = spend_by_date(filtered);
    let mut running = 0.0;
    let mut actual = Vec::new();
    if today >= window.start {
        let walked = PeriodWindow::new(window.start, today.min(window.end));
        actual.reserve(walked.days() as usize);
        for date in walked.iter_days() {
            running += by_date.get(&date).copied().unwrap_or(0.0);
            actual.push(TrendPoint {
                date,
                value: running,
            });
        }
    }

    let forecast_start = today.max(window.start);
    let mut forecast = Vec::new();
    if forecast_start <= window.end {
        let projected = PeriodWindow::new(forecast_start, window.end);
        forecast.reserve(projected.days() as usize);
        let mut value = running;
        for (step, date) in projected.iter_days().enumerate() {
            if step > 0 {
                value += daily_recommended;
            }
            forecast.push(TrendPoint { date, value });
        }
    }

    BudgetTrendData {
        total_spent: total,
        daily_average,
        daily_recommended,
        actual,
        forecast,
        visible: visible_range(window, period),
        limit: budget_amount,
    }
}

impl BudgetTrendData {
    /// Projected total at the window end, or the actual total when the window is over.
    pub fn projected_total(&self) -> f64 {
        self.forecast
            .last()
            .or_else(|| self.actual.last())
            .map(|point| point.value)
            .unwrap_or(0.0)
    }

    /// First day on which the cumulative series (actual, then forecast) exceeds the limit.
    pub fn projected_overrun(&self) -> Option<NaiveDate> {
        self.actual
            .iter()
            .chain(self.forecast.iter())
            .find(|point| point.value > self.limit)
            .map(|point| point.date)
    }

    /// Number of days still covered by the forecast after today.
    pub fn days_remaining(&self) -> i64 {
        match (self.forecast.first(), self.forecast.last()) {
            (Some(first), Some(last)) => (last.date - first.date).num_days(),
            _ => 0,
        }
    }
}
