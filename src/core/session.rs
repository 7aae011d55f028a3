//! Budget detail session: re-runs the period, filter, aggregate and trend
//! stages whenever its inputs change and publishes one consolidated snapshot.
//!
//! Every trigger issues a fresh request id and only the latest request may
//! publish. Callers that fetch on another task can split a recompute into
//! [`BudgetSession::pending_request`], [`BudgetSession::fetch`] and
//! [`BudgetSession::complete`]; completions for superseded requests are
//! dropped.

use std::{cmp::Reverse, sync::Arc};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::core::{
    aggregate::{
        account_breakdown, category_breakdown, daily_spending, total_spent, AccountBreakdown,
        BudgetProgress, CategoryBreakdown, DailySpend,
    },
    filter::filter_transactions,
    label::period_label,
    period::{can_navigate_next, can_navigate_previous, visible_range, window_for},
    services::BudgetService,
    storage::{BudgetStore, TransactionSource},
    time::Clock,
    trend::{build_trend, BudgetTrendData},
};
use crate::domain::{
    AccountDirectory, Budget, CategoryDirectory, PeriodWindow, Transaction, WindowScope,
};
use crate::errors::Result;

pub type RequestId = u64;

/// Everything a budget detail view renders for one window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetSnapshot {
    /// Record as loaded; `spent`/`transaction_count` are refreshed when the
    /// snapshot shows the current window.
    pub budget: Budget,
    pub offset: i32,
    pub window: PeriodWindow,
    pub visible: PeriodWindow,
    pub scope: WindowScope,
    pub label: String,
    /// Matched expenses, newest first by creation time.
    pub transactions: Vec<Transaction>,
    pub total_spent: f64,
    pub daily_spending: Vec<DailySpend>,
    pub categories: Vec<CategoryBreakdown>,
    pub accounts: Vec<AccountBreakdown>,
    pub trend: BudgetTrendData,
    pub progress: BudgetProgress,
    pub can_navigate_previous: bool,
    pub can_navigate_next: bool,
}

/// Lookup tables and preferences used to enrich snapshots.
#[derive(Debug, Clone, Default)]
pub struct SnapshotContext {
    pub categories: CategoryDirectory,
    pub accounts: AccountDirectory,
    pub allow_future_navigation: bool,
}

impl SnapshotContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            categories: config.category_directory(),
            accounts: AccountDirectory::new(),
            allow_future_navigation: config.allow_future_navigation,
        }
    }
}

impl BudgetSnapshot {
    /// Runs every pure stage for `budget` at `offset`. `transactions` may be
    /// any superset of the window's transactions.
    pub fn compute(
        mut budget: Budget,
        transactions: &[Transaction],
        today: NaiveDate,
        offset: i32,
        ctx: &SnapshotContext,
    ) -> Self {
        let window = window_for(&budget, today, offset);
        let mut matched =
            filter_transactions(transactions, &budget.categories(), &budget.account_ids, window);
        matched.sort_by_key(|txn| Reverse(txn.created_at));

        let total = total_spent(&matched);
        if window.contains(today) {
            BudgetService::recalculate_spent(&mut budget, &matched, today);
        }

        Self {
            offset,
            window,
            visible: visible_range(window, budget.period),
            scope: window.scope(today),
            label: period_label(window, budget.period, today),
            total_spent: total,
            daily_spending: daily_spending(&matched),
            categories: category_breakdown(&matched, &ctx.categories),
            accounts: account_breakdown(&matched, &ctx.accounts),
            trend: build_trend(&matched, budget.amount, window, budget.period, today),
            progress: BudgetProgress::from_parts(budget.amount, total, budget.alert_threshold),
            can_navigate_previous: can_navigate_previous(budget.period),
            can_navigate_next: can_navigate_next(
                &budget,
                today,
                offset,
                ctx.allow_future_navigation,
            ),
            transactions: matched,
            budget,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unselected,
    Loading { request: RequestId },
    Ready(Box<BudgetSnapshot>),
}

/// Work order for one recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecomputeRequest {
    pub id: RequestId,
    pub budget_id: String,
    pub offset: i32,
}

/// Results of the suspending part of a recompute.
#[derive(Debug, Clone)]
pub struct FetchedInputs {
    pub request: RequestId,
    pub offset: i32,
    pub today: NaiveDate,
    /// `None` when the budget no longer exists.
    pub budget: Option<Budget>,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A new snapshot is now the session state.
    Published,
    /// A newer request superseded this one; nothing was published.
    Stale,
    /// The selected budget is gone and the session is unselected.
    BudgetMissing,
    /// No recompute was pending.
    Idle,
}

/// Coordinates one budget detail view over its collaborators.
pub struct BudgetSession {
    transactions: Arc<dyn TransactionSource>,
    budgets: Arc<dyn BudgetStore>,
    clock: Arc<dyn Clock>,
    ctx: SnapshotContext,
    state: SessionState,
    selected: Option<String>,
    known_budget: Option<Budget>,
    offset: i32,
    last_request: RequestId,
    pending: Option<RecomputeRequest>,
    seen_revisions: (u64, u64),
}

impl BudgetSession {
    pub fn new(
        transactions: Arc<dyn TransactionSource>,
        budgets: Arc<dyn BudgetStore>,
        clock: Arc<dyn Clock>,
        ctx: SnapshotContext,
    ) -> Self {
        Self {
            transactions,
            budgets,
            clock,
            ctx,
            state: SessionState::Unselected,
            selected: None,
            known_budget: None,
            offset: 0,
            last_request: 0,
            pending: None,
            seen_revisions: (0, 0),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&BudgetSnapshot> {
        match &self.state {
            SessionState::Ready(snapshot) => Some(snapshot.as_ref()),
            _ => None,
        }
    }

    pub fn selected_budget_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn pending_request(&self) -> Option<RecomputeRequest> {
        self.pending.clone()
    }

    /// Selects `budget_id` at the window containing today.
    pub fn select_budget(&mut self, budget_id: impl Into<String>) -> RequestId {
        let budget_id = budget_id.into();
        if self.selected.as_deref() != Some(budget_id.as_str()) {
            self.known_budget = None;
        }
        self.selected = Some(budget_id);
        self.offset = 0;
        self.issue("select")
    }

    /// Steps one window back. Refused for ONCE budgets and before the first
    /// snapshot has identified the budget's period.
    pub fn navigate_previous(&mut self) -> Option<RequestId> {
        let budget = self.known_budget.as_ref()?;
        if !can_navigate_previous(budget.period) {
            return None;
        }
        self.offset = self.offset.checked_sub(1)?;
        Some(self.issue("previous"))
    }

    /// Steps one window forward, never past the window containing today
    /// unless future navigation is enabled.
    pub fn navigate_next(&mut self) -> Option<RequestId> {
        let budget = self.known_budget.as_ref()?;
        let today = self.clock.today();
        if !can_navigate_next(budget, today, self.offset, self.ctx.allow_future_navigation) {
            return None;
        }
        self.offset = self.offset.checked_add(1)?;
        Some(self.issue("next"))
    }

    /// Returns to the window containing today.
    pub fn reset_offset(&mut self) -> Option<RequestId> {
        self.selected.as_ref()?;
        self.offset = 0;
        Some(self.issue("reset"))
    }

    pub fn transactions_changed(&mut self) -> Option<RequestId> {
        self.selected.as_ref()?;
        Some(self.issue("transactions"))
    }

    pub fn budget_changed(&mut self) -> Option<RequestId> {
        self.selected.as_ref()?;
        Some(self.issue("budget"))
    }

    /// Issues a recompute when either collaborator reports a new revision.
    pub fn poll_changes(&mut self) -> Option<RequestId> {
        self.selected.as_ref()?;
        if self.current_revisions() == self.seen_revisions {
            return None;
        }
        Some(self.issue("revision"))
    }

    /// Drops the selection and any in-flight recompute.
    pub fn clear(&mut self) {
        debug!("budget session cleared");
        self.reset_to_unselected();
    }

    /// Fetches the budget record and the window's transactions for `request`.
    pub fn fetch(&self, request: &RecomputeRequest) -> Result<FetchedInputs> {
        let today = self.clock.today();
        let budget = self.budgets.budget_by_id(&request.budget_id)?;
        let transactions = match &budget {
            Some(budget) => {
                let window = window_for(budget, today, request.offset);
                self.transactions
                    .transactions_between(window.start, window.end)?
            }
            None => Vec::new(),
        };
        Ok(FetchedInputs {
            request: request.id,
            offset: request.offset,
            today,
            budget,
            transactions,
        })
    }

    /// Publishes the snapshot for `inputs` if its request is still the latest.
    pub fn complete(&mut self, inputs: FetchedInputs) -> Completion {
        let is_latest = self
            .pending
            .as_ref()
            .map(|pending| pending.id == inputs.request)
            .unwrap_or(false);
        if !is_latest {
            debug!(request = inputs.request, "dropping stale budget recompute");
            return Completion::Stale;
        }

        let Some(budget) = inputs.budget else {
            warn!(
                budget_id = self.selected.as_deref().unwrap_or_default(),
                "selected budget disappeared; clearing session"
            );
            self.reset_to_unselected();
            return Completion::BudgetMissing;
        };

        let snapshot = BudgetSnapshot::compute(
            budget,
            &inputs.transactions,
            inputs.today,
            inputs.offset,
            &self.ctx,
        );
        debug!(
            request = inputs.request,
            window = %snapshot.window,
            total = snapshot.total_spent,
            "budget snapshot published"
        );
        self.known_budget = Some(snapshot.budget.clone());
        self.pending = None;
        self.state = SessionState::Ready(Box::new(snapshot));
        Completion::Published
    }

    /// Runs the pending recompute synchronously.
    pub fn refresh(&mut self) -> Result<Completion> {
        let Some(request) = self.pending.clone() else {
            return Ok(Completion::Idle);
        };
        let inputs = self.fetch(&request)?;
        Ok(self.complete(inputs))
    }

    /// Validates and stores an edited budget, then recomputes if it is selected.
    pub fn update_budget(&mut self, budget: Budget) -> Result<Option<RequestId>> {
        let id = budget.id.clone();
        BudgetService::update(self.budgets.as_ref(), budget)?;
        if self.selected.as_deref() == Some(id.as_str()) {
            return Ok(self.budget_changed());
        }
        Ok(None)
    }

    /// Deletes a budget; deleting the selected one clears the session.
    pub fn delete_budget(&mut self, id: &str) -> Result<()> {
        BudgetService::delete(self.budgets.as_ref(), id)?;
        if self.selected.as_deref() == Some(id) {
            self.reset_to_unselected();
        }
        Ok(())
    }

    /// Asks the store to refresh every stored `spent` projection for `user_id`.
    pub fn recalculate_spent_amounts(&mut self, user_id: &str) -> Result<usize> {
        let today = self.clock.today();
        let refreshed = self.budgets.recalculate_all_budgets(user_id, today)?;
        self.budget_changed();
        Ok(refreshed)
    }

    fn issue(&mut self, trigger: &'static str) -> RequestId {
        self.last_request += 1;
        let id = self.last_request;
        let budget_id = self.selected.clone().unwrap_or_default();
        debug!(
            request = id,
            trigger,
            budget_id = %budget_id,
            offset = self.offset,
            "budget recompute requested"
        );
        self.pending = Some(RecomputeRequest {
            id,
            budget_id,
            offset: self.offset,
        });
        self.seen_revisions = self.current_revisions();
        self.state = SessionState::Loading { request: id };
        id
    }

    fn current_revisions(&self) -> (u64, u64) {
        (self.transactions.revision(), self.budgets.revision())
    }

    fn reset_to_unselected(&mut self) {
        self.state = SessionState::Unselected;
        self.selected = None;
        self.known_budget = None;
        self.offset = 0;
        self.pending = None;
    }
}
