//! Calendar arithmetic for budget period windows.
//!
//! Offsets count whole periods away from the anchor window: `0` is the anchor
//! window itself, negative values walk into the past and positive values into
//! the future.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{Budget, BudgetPeriod, PeriodWindow};

/// Resolves the concrete window for `period` shifted by `offset` periods from
/// the window anchored at `anchor_start`.
///
/// ONCE windows ignore `offset`; when `anchor_end` is missing they run from
/// `anchor_start` through `today` (or collapse to a single day when today
/// precedes the start).
pub fn resolve_window(
    period: BudgetPeriod,
    anchor_start: NaiveDate,
    anchor_end: Option<NaiveDate>,
    today: NaiveDate,
    offset: i32,
) -> PeriodWindow {
    match period {
        BudgetPeriod::Daily => {
            PeriodWindow::single_day(shift_days(anchor_start, i64::from(offset)))
        }
        BudgetPeriod::Weekly => {
            let start = shift_days(anchor_start, i64::from(offset) * 7);
            PeriodWindow::new(start, shift_days(start, 6))
        }
        BudgetPeriod::Monthly => month_window(anchor_start, offset),
        BudgetPeriod::Yearly => year_window(anchor_start, offset),
        BudgetPeriod::Once => {
            let end = anchor_end.unwrap_or_else(|| today.max(anchor_start));
            PeriodWindow::new(anchor_start, end)
        }
    }
}

/// Resolves the window for `budget` at `offset` periods from the window that
/// contains `today`.
pub fn window_for(budget: &Budget, today: NaiveDate, offset: i32) -> PeriodWindow {
    let (start, end) = current_anchor(budget, today);
    resolve_window(budget.period, start, end, today, offset)
}

/// Anchor dates that make offset `0` denote the window containing `today`.
///
/// Weekly budgets keep the weekday of their `start_date`; ONCE budgets are
/// anchored to their own fixed range.
pub fn current_anchor(budget: &Budget, today: NaiveDate) -> (NaiveDate, Option<NaiveDate>) {
    match budget.period {
        BudgetPeriod::Weekly => (cycle_start_linear(budget.start_date, today, 7), None),
        BudgetPeriod::Once => (budget.start_date, budget.end_date),
        BudgetPeriod::Daily | BudgetPeriod::Monthly | BudgetPeriod::Yearly => (today, None),
    }
}

/// Range shown on charts. Weekly windows snap to the Monday–Sunday calendar
/// week containing `window.start`, independent of the accounting window.
pub fn visible_range(window: PeriodWindow, period: BudgetPeriod) -> PeriodWindow {
    match period {
        BudgetPeriod::Weekly => {
            let delta = i64::from(window.start.weekday().num_days_from_monday());
            let monday = shift_days(window.start, -delta);
            PeriodWindow::new(monday, shift_days(monday, 6))
        }
        _ => window,
    }
}

/// Whether the session may step to the previous window.
pub fn can_navigate_previous(period: BudgetPeriod) -> bool {
    period.is_recurring()
}

/// Whether the session may step to the next window: ONCE never moves, other
/// periods stop at the window containing `today` unless `allow_future` is set.
pub fn can_navigate_next(
    budget: &Budget,
    today: NaiveDate,
    offset: i32,
    allow_future: bool,
) -> bool {
    if !budget.period.is_recurring() {
        return false;
    }
    if allow_future {
        return true;
    }
    match offset.checked_add(1) {
        Some(next) => window_for(budget, today, next).start <= today,
        None => false,
    }
}

fn month_window(anchor: NaiveDate, offset: i32) -> PeriodWindow {
    let index = i64::from(anchor.year()) * 12 + i64::from(anchor.month0()) + i64::from(offset);
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let first = i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, 1));
    match first {
        Some(start) => PeriodWindow::new(start, last_day_of_month(start)),
        None => month_window_containing(anchor),
    }
}

fn month_window_containing(date: NaiveDate) -> PeriodWindow {
    let start = date.with_day(1).unwrap_or(date);
    PeriodWindow::new(start, last_day_of_month(start))
}

fn year_window(anchor: NaiveDate, offset: i32) -> PeriodWindow {
    let bounds = anchor.year().checked_add(offset).and_then(|year| {
        Some((
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year, 12, 31)?,
        ))
    });
    match bounds {
        Some((start, end)) => PeriodWindow::new(start, end),
        None => PeriodWindow::single_day(anchor),
    }
}

/// Last calendar day of the month containing `date`.
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .unwrap_or(date)
}

fn cycle_start_linear(anchor: NaiveDate, reference: NaiveDate, interval_days: i64) -> NaiveDate {
    let diff = reference - anchor;
    let steps = diff.num_days().div_euclid(interval_days);
    shift_days(anchor, steps * interval_days)
}

fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}
