//! Budget, transaction and lookup models consumed by the engine.

pub mod account;
pub mod budget;
pub mod category;
pub mod transaction;
pub mod window;

pub use account::{AccountDirectory, AccountInfo};
pub use budget::{Budget, BudgetDraft, BudgetPeriod};
pub use category::{CategoryDirectory, CategoryInfo};
pub use transaction::{Transaction, TransactionType};
pub use window::{PeriodWindow, WindowScope};
