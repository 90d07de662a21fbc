//! Pure data types shared across the storage, aggregation, and report layers.

pub mod category;
pub mod expense;
pub mod user;

pub use category::{category_label, Category};
pub use expense::{ExpenseRecord, NewExpense};
pub use user::{NewUser, UserId};
