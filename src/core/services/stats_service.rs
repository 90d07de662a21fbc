use chrono::NaiveDate;

use crate::core::time::{Clock, Window};
use crate::domain::{ExpenseRecord, UserId};
use crate::store::{CategoryTotal, ExpenseStore, ExportExpense, UserCategoryTotal};

/// Aggregation queries over the expense ledger.
///
/// A failing store degrades to an empty result after a warning log; callers
/// render "no data" and "query failed" identically, by design of the
/// original system.
pub struct StatsService;

impl StatsService {
    /// One user's spending grouped by category, largest total first.
    pub fn by_category(
        store: &dyn ExpenseStore,
        clock: &dyn Clock,
        user: UserId,
        window: Window,
    ) -> Vec<CategoryTotal> {
        match store.totals_by_category(user, window.start(clock)) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(%user, ?window, error = %err, "category totals query failed");
                Vec::new()
            }
        }
    }

    /// Everyone's spending grouped by (display name, category); names
    /// ascending, each user's categories by total descending.
    pub fn by_user_and_category(
        store: &dyn ExpenseStore,
        clock: &dyn Clock,
        window: Window,
    ) -> Vec<UserCategoryTotal> {
        match store.totals_by_user_and_category(window.start(clock)) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(?window, error = %err, "shared totals query failed");
                Vec::new()
            }
        }
    }

    /// One user's expenses on a single UTC calendar day, newest first.
    pub fn on_date(store: &dyn ExpenseStore, user: UserId, date: NaiveDate) -> Vec<ExpenseRecord> {
        match store.expenses_on(user, date) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(%user, %date, error = %err, "date lookup query failed");
                Vec::new()
            }
        }
    }

    /// The full ledger joined with owner names, newest first.
    pub fn all(store: &dyn ExpenseStore) -> Vec<ExportExpense> {
        match store.all_expenses() {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(error = %err, "full ledger query failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::domain::{Category, NewExpense, NewUser};
    use crate::errors::{ExpenseError, Result};
    use crate::store::JsonStorage;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Store double whose every query fails.
    struct BrokenStore;

    impl ExpenseStore for BrokenStore {
        fn add_user(&self, _user: &NewUser) -> Result<()> {
            Err(ExpenseError::Storage("connection refused".into()))
        }
        fn add_expense(&self, _user: UserId, _expense: &NewExpense) -> Result<bool> {
            Err(ExpenseError::Storage("connection refused".into()))
        }
        fn totals_by_category(
            &self,
            _user: UserId,
            _since: Option<DateTime<Utc>>,
        ) -> Result<Vec<CategoryTotal>> {
            Err(ExpenseError::Storage("connection refused".into()))
        }
        fn totals_by_user_and_category(
            &self,
            _since: Option<DateTime<Utc>>,
        ) -> Result<Vec<UserCategoryTotal>> {
            Err(ExpenseError::Storage("connection refused".into()))
        }
        fn expenses_on(&self, _user: UserId, _date: NaiveDate) -> Result<Vec<ExpenseRecord>> {
            Err(ExpenseError::Storage("connection refused".into()))
        }
        fn all_expenses(&self) -> Result<Vec<ExportExpense>> {
            Err(ExpenseError::Storage("connection refused".into()))
        }
    }

    fn wednesday_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn seeded_storage(dir: &TempDir) -> JsonStorage {
        let storage = JsonStorage::with_clock(
            dir.path().join("ledger.json"),
            Arc::new(FixedClock::new(wednesday_noon())),
        )
        .expect("create storage");
        storage.add_user(&NewUser::new(UserId(1), "Alice")).expect("user");
        storage
    }

    fn insert(storage: &JsonStorage, amount: f64, category: Category, what: &str) {
        let draft = NewExpense::new(amount, category, what, None).expect("valid draft");
        assert!(storage.add_expense(UserId(1), &draft).expect("insert"));
    }

    #[test]
    fn broken_store_degrades_to_empty_results() {
        let clock = FixedClock::new(wednesday_noon());
        assert!(StatsService::by_category(&BrokenStore, &clock, UserId(1), Window::CurrentWeek)
            .is_empty());
        assert!(StatsService::by_user_and_category(&BrokenStore, &clock, Window::CurrentWeek)
            .is_empty());
        let date = NaiveDate::from_ymd_opt(2025, 8, 20).expect("valid date");
        assert!(StatsService::on_date(&BrokenStore, UserId(1), date).is_empty());
        assert!(StatsService::all(&BrokenStore).is_empty());
    }

    #[test]
    fn weekly_totals_match_the_inserted_expenses() {
        let dir = TempDir::new().expect("temp dir");
        let storage = seeded_storage(&dir);
        insert(&storage, 15000.0, Category::Food, "groceries");
        insert(&storage, 5000.0, Category::Snacks, "coffee beans");

        let clock = FixedClock::new(wednesday_noon());
        let rows = StatsService::by_category(&storage, &clock, UserId(1), Window::CurrentWeek);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].category.as_str(), rows[0].total_amount, rows[0].expense_count),
            ("food", 15000.0, 1));
        assert_eq!((rows[1].category.as_str(), rows[1].total_amount, rows[1].expense_count),
            ("snacks", 5000.0, 1));

        let grand: f64 = rows.iter().map(|r| r.total_amount).sum();
        assert_eq!(grand, 20000.0);
    }

    #[test]
    fn sum_of_group_totals_equals_sum_of_amounts() {
        let dir = TempDir::new().expect("temp dir");
        let storage = seeded_storage(&dir);
        let amounts = [120.0, 80.5, 999.99, 4500.0, 12.01];
        let categories = [
            Category::Food,
            Category::Food,
            Category::Home,
            Category::Entertainment,
            Category::Other,
        ];
        for (amount, category) in amounts.iter().zip(categories) {
            insert(&storage, *amount, category, "item");
        }

        let clock = FixedClock::new(wednesday_noon());
        let rows = StatsService::by_category(&storage, &clock, UserId(1), Window::AllTime);
        let grouped: f64 = rows.iter().map(|r| r.total_amount).sum();
        let raw: f64 = amounts.iter().sum();
        assert!((grouped - raw).abs() < 1e-9);
        let count: u64 = rows.iter().map(|r| r.expense_count).sum();
        assert_eq!(count, amounts.len() as u64);
    }

    #[test]
    fn expenses_before_monday_fall_out_of_the_current_week() {
        let dir = TempDir::new().expect("temp dir");
        let sunday = Utc
            .with_ymd_and_hms(2025, 8, 17, 22, 0, 0)
            .single()
            .expect("valid timestamp");
        let early = JsonStorage::with_clock(
            dir.path().join("ledger.json"),
            Arc::new(FixedClock::new(sunday)),
        )
        .expect("create storage");
        early.add_user(&NewUser::new(UserId(1), "Alice")).expect("user");
        let draft = NewExpense::new(777.0, Category::Food, "sunday dinner", None).expect("draft");
        assert!(early.add_expense(UserId(1), &draft).expect("insert"));

        let storage = seeded_storage(&dir);
        insert(&storage, 15000.0, Category::Food, "groceries");

        let clock = FixedClock::new(wednesday_noon());
        let rows = StatsService::by_category(&storage, &clock, UserId(1), Window::CurrentWeek);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_amount, 15000.0);

        let all = StatsService::by_category(&storage, &clock, UserId(1), Window::AllTime);
        assert_eq!(all[0].total_amount, 15777.0);
    }
}
