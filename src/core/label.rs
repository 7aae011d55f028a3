use chrono::NaiveDate;

use crate::domain::{BudgetPeriod, PeriodWindow};

/// Human-readable title for a resolved window, e.g. `Jan 2025`,
/// `12/3/2025 - 12/10/2025` or `Aug 12, Today`.
pub fn period_label(window: PeriodWindow, period: BudgetPeriod, today: NaiveDate) -> String {
    match period {
        BudgetPeriod::Monthly => window.start.format("%b %Y").to_string(),
        BudgetPeriod::Yearly => window.start.format("%Y").to_string(),
        BudgetPeriod::Daily => {
            let day = window.start.format("%b %-d").to_string();
            if window.start == today {
                format!("{day}, Today")
            } else {
                day
            }
        }
        BudgetPeriod::Weekly | BudgetPeriod::Once => format!(
            "{} - {}",
            window.start.format("%-m/%-d/%Y"),
            window.end.format("%-m/%-d/%Y")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_label_uses_short_month() {
        let window = PeriodWindow::new(date(2025, 1, 1), date(2025, 1, 31));
        assert_eq!(
            period_label(window, BudgetPeriod::Monthly, date(2025, 1, 9)),
            "Jan 2025"
        );
    }

    #[test]
    fn weekly_label_spells_both_ends() {
        let window = PeriodWindow::new(date(2025, 12, 3), date(2025, 12, 10));
        assert_eq!(
            period_label(window, BudgetPeriod::Weekly, date(2025, 12, 4)),
            "12/3/2025 - 12/10/2025"
        );
    }

    #[test]
    fn daily_label_marks_today() {
        let today = date(2025, 8, 12);
        let window = PeriodWindow::single_day(today);
        assert_eq!(period_label(window, BudgetPeriod::Daily, today), "Aug 12, Today");
        assert_eq!(
            period_label(window, BudgetPeriod::Daily, date(2025, 8, 13)),
            "Aug 12"
        );
    }

    #[test]
    fn yearly_label_is_the_year() {
        let window = PeriodWindow::new(date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(period_label(window, BudgetPeriod::Yearly, date(2025, 1, 1)), "2024");
    }
}
