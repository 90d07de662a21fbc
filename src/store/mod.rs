pub mod json_backend;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{ExpenseRecord, NewExpense, NewUser, UserId};
use crate::errors::Result;

pub use json_backend::JsonStorage;

/// One grouped row of a single user's spending.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total_amount: f64,
    pub expense_count: u64,
}

/// One grouped row of the shared weekly overview.
#[derive(Debug, Clone, PartialEq)]
pub struct UserCategoryTotal {
    pub display_name: String,
    pub category: String,
    pub total_amount: f64,
    pub expense_count: u64,
}

/// A full expense row joined with its owner, as consumed by the export
/// adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportExpense {
    pub display_name: String,
    pub username: Option<String>,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Abstraction over the expense ledger. Grouping, filtering, and ordering
/// happen inside the store, mirroring the query contract the original
/// database exposed; services pass results through unchanged.
///
/// Ordering contract:
/// - `totals_by_category`: descending by total, stable on ties.
/// - `totals_by_user_and_category`: ascending by display name, then
///   descending by total within each user.
/// - `expenses_on` and `all_expenses`: newest first.
///
/// Grouped rows are never empty: a key with no matching expenses is omitted
/// rather than emitted with zero values.
pub trait ExpenseStore: Send + Sync {
    /// Registers a user. Idempotent no-op when the id already exists.
    fn add_user(&self, user: &NewUser) -> Result<()>;

    /// Appends an expense for `user`. Returns `false` without writing when
    /// the user is unknown.
    fn add_expense(&self, user: UserId, expense: &NewExpense) -> Result<bool>;

    /// Sums one user's expenses per category, optionally restricted to
    /// `created_at >= since`.
    fn totals_by_category(
        &self,
        user: UserId,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<CategoryTotal>>;

    /// Sums all expenses per (owner display name, category), optionally
    /// restricted to `created_at >= since`.
    fn totals_by_user_and_category(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<UserCategoryTotal>>;

    /// All of one user's expenses whose UTC calendar date equals `date`.
    fn expenses_on(&self, user: UserId, date: NaiveDate) -> Result<Vec<ExpenseRecord>>;

    /// The whole ledger joined with owner names, for export.
    fn all_expenses(&self) -> Result<Vec<ExportExpense>>;
}
