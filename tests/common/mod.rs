#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use budget_engine::{
    config::{Config, ConfigManager},
    core::BudgetService,
    domain::{Budget, BudgetDraft, BudgetPeriod, Transaction},
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const USER: &str = "user-1";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

pub fn at_noon(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).expect("valid time"))
}

/// Validated budget over the `food` category for every account.
pub fn food_budget(period: BudgetPeriod, start: NaiveDate, amount: f64) -> Budget {
    let draft = BudgetDraft::new(USER, "Food", amount)
        .with_category("food")
        .with_period(period)
        .starting(start);
    BudgetService::build(draft, &Config::default(), start).expect("build sample budget")
}

pub fn once_budget(start: NaiveDate, end: NaiveDate, amount: f64) -> Budget {
    let draft = BudgetDraft::new(USER, "Trip", amount)
        .with_category("travel")
        .with_period(BudgetPeriod::Once)
        .starting(start)
        .ending(end);
    BudgetService::build(draft, &Config::default(), start).expect("build one-off budget")
}

pub fn food_expense(amount: f64, day: NaiveDate) -> Transaction {
    Transaction::expense(amount, "food", "checking", day).created(at_noon(day))
}

/// Isolated config manager backed by a unique temporary directory.
pub fn setup_config_env() -> (ConfigManager, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    let manager = ConfigManager::with_base_dir(base.clone()).expect("create config manager");
    (manager, base)
}
