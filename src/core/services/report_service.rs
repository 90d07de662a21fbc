use chrono::NaiveDate;

use crate::core::services::StatsService;
use crate::core::time::{Clock, Window};
use crate::domain::UserId;
use crate::report;
use crate::store::ExpenseStore;

/// Builds the user-facing report texts. Interactive replies always return a
/// string (empty data renders the fixed "no data" sentence); the scheduled
/// broadcast returns `None` on empty data so the trigger stays silent.
pub struct ReportService;

impl ReportService {
    /// Reply for "my expenses this week".
    pub fn personal_week(store: &dyn ExpenseStore, clock: &dyn Clock, user: UserId) -> String {
        let rows = StatsService::by_category(store, clock, user, Window::CurrentWeek);
        report::personal_week_report(&rows)
    }

    /// Reply for the shared "weekly overview" request.
    pub fn shared_week(store: &dyn ExpenseStore, clock: &dyn Clock) -> String {
        let rows = StatsService::by_user_and_category(store, clock, Window::CurrentWeek);
        report::shared_week_report(&rows)
    }

    /// Reply for a calendar-date lookup.
    pub fn day(store: &dyn ExpenseStore, user: UserId, date: NaiveDate) -> String {
        let rows = StatsService::on_date(store, user, date);
        report::day_report(date, &rows)
    }

    /// Weekly broadcast body, or `None` when there is nothing to report.
    /// The external timer calls this and sends the text to the shared
    /// channel only when it is `Some`.
    pub fn weekly_broadcast(store: &dyn ExpenseStore, clock: &dyn Clock) -> Option<String> {
        let rows = StatsService::by_user_and_category(store, clock, Window::CurrentWeek);
        if rows.is_empty() {
            return None;
        }
        Some(report::shared_week_report(&rows))
    }
}
