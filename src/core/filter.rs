use std::collections::BTreeSet;

use crate::domain::{PeriodWindow, Transaction};

/// Selects the expenses inside `window` that fall under the category and
/// account scopes. Empty scopes match everything; income never matches.
///
/// The output keeps input order; callers sort as they need.
pub fn filter_transactions(
    transactions: &[Transaction],
    category_ids: &BTreeSet<String>,
    account_ids: &BTreeSet<String>,
    window: PeriodWindow,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|txn| matches(txn, category_ids, account_ids, window))
        .cloned()
        .collect()
}

fn matches(
    txn: &Transaction,
    category_ids: &BTreeSet<String>,
    account_ids: &BTreeSet<String>,
    window: PeriodWindow,
) -> bool {
    txn.is_expense()
        && window.contains(txn.date)
        && (category_ids.is_empty() || category_ids.contains(&txn.category_id))
        && (account_ids.is_empty() || account_ids.contains(&txn.account_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn window() -> PeriodWindow {
        PeriodWindow::new(date(1), date(31))
    }

    #[test]
    fn income_is_excluded() {
        let txns = vec![
            Transaction::expense(10.0, "food", "cash", date(2)),
            Transaction::income(50.0, "food", "cash", date(2)),
        ];
        let matched = filter_transactions(&txns, &set(&["food"]), &BTreeSet::new(), window());
        assert_eq!(matched.len(), 1);
        assert!(matched[0].is_expense());
    }

    #[test]
    fn empty_scopes_match_every_expense_in_window() {
        let txns = vec![
            Transaction::expense(10.0, "food", "cash", date(1)),
            Transaction::expense(20.0, "fuel", "card", date(31)),
            Transaction::expense(30.0, "fuel", "card", NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()),
        ];
        let matched = filter_transactions(&txns, &BTreeSet::new(), &BTreeSet::new(), window());
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn account_scope_narrows_matches() {
        let txns = vec![
            Transaction::expense(10.0, "food", "cash", date(3)),
            Transaction::expense(20.0, "food", "card", date(3)),
        ];
        let matched = filter_transactions(&txns, &set(&["food"]), &set(&["card"]), window());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].account_id, "card");
    }

    #[test]
    fn unknown_category_scope_yields_nothing() {
        let txns = vec![Transaction::expense(10.0, "food", "cash", date(3))];
        let matched = filter_transactions(&txns, &set(&["rent"]), &BTreeSet::new(), window());
        assert!(matched.is_empty());
    }
}
