use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Category, UserId};
use crate::errors::{ExpenseError, Result};

/// Validated expense draft. The conversational entry flow re-prompts on bad
/// input and hands the core only values that pass these checks; `new`
/// enforces them again at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub category: Category,
    pub description: String,
    pub comment: Option<String>,
}

impl NewExpense {
    pub fn new(
        amount: f64,
        category: Category,
        description: impl Into<String>,
        comment: Option<String>,
    ) -> Result<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ExpenseError::InvalidInput(format!(
                "amount must be positive, got {amount}"
            )));
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ExpenseError::InvalidInput(
                "description must not be empty".into(),
            ));
        }
        Ok(Self {
            amount: round_money(amount),
            category,
            description,
            comment: comment.filter(|c| !c.trim().is_empty()),
        })
    }
}

/// Persisted expense row. Immutable once written; the category is kept as a
/// raw code string so rows created by a newer build survive round-trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub amount: f64,
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Rounds to two decimal places, the smallest currency subdivision stored.
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
