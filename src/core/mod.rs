//! Pure budget computations plus the session that coordinates them.

pub mod aggregate;
pub mod filter;
pub mod label;
pub mod period;
pub mod services;
pub mod session;
pub mod storage;
pub mod time;
pub mod trend;

pub use aggregate::{
    account_breakdown, category_breakdown, daily_spending, total_spent, AccountBreakdown,
    BudgetProgress, BudgetStatus, CategoryBreakdown, DailySpend,
};
pub use filter::filter_transactions;
pub use label::period_label;
pub use services::{BudgetOverview, BudgetService};
pub use period::{current_anchor, resolve_window, visible_range, window_for};
pub use session::{
    BudgetSession, BudgetSnapshot, Completion, FetchedInputs, RecomputeRequest, RequestId,
    SessionState, SnapshotContext,
};
pub use storage::{BudgetStore, MemoryStore, TransactionSource};
pub use time::{Clock, FixedClock, SystemClock};
pub use trend::{build_trend, BudgetTrendData, TrendPoint};
