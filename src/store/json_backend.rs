use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::time::{Clock, SystemClock};
use crate::domain::{ExpenseRecord, NewExpense, NewUser, UserId};
use crate::errors::{ExpenseError, Result};
use crate::store::{CategoryTotal, ExpenseStore, ExportExpense, UserCategoryTotal};

const TMP_SUFFIX: &str = "tmp";

/// Ledger persisted as a single pretty-JSON file. Every query loads a fresh
/// snapshot; writes replace the file atomically (write sibling, then rename).
pub struct JsonStorage {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl JsonStorage {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    /// Builds a storage whose record timestamps come from `clock`.
    pub fn with_clock(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            clock,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<LedgerFile> {
        if !self.path.exists() {
            return Ok(LedgerFile::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, ledger: &LedgerFile) -> Result<()> {
        let data = serde_json::to_string_pretty(ledger)?;
        write_atomic(&self.path, &data)
    }
}

impl ExpenseStore for JsonStorage {
    fn add_user(&self, user: &NewUser) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ExpenseError::Storage("ledger write lock poisoned".into()))?;
        let mut ledger = self.load()?;
        if ledger.users.iter().any(|u| u.id == user.id) {
            return Ok(());
        }
        ledger.users.push(StoredUser {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: self.clock.now(),
        });
        self.save(&ledger)
    }

    fn add_expense(&self, user: UserId, expense: &NewExpense) -> Result<bool> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ExpenseError::Storage("ledger write lock poisoned".into()))?;
        let mut ledger = self.load()?;
        if !ledger.users.iter().any(|u| u.id == user) {
            return Ok(false);
        }
        ledger.expenses.push(ExpenseRecord {
            id: Uuid::new_v4(),
            user_id: user,
            amount: expense.amount,
            category: expense.category.code().to_string(),
            description: expense.description.clone(),
            comment: expense.comment.clone(),
            created_at: self.clock.now(),
        });
        self.save(&ledger)?;
        Ok(true)
    }

    fn totals_by_category(
        &self,
        user: UserId,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<CategoryTotal>> {
        let ledger = self.load()?;
        let mut rows: Vec<CategoryTotal> = Vec::new();
        for expense in ledger
            .expenses
            .iter()
            .filter(|e| e.user_id == user && in_window(e, since))
        {
            match rows.iter_mut().find(|r| r.category == expense.category) {
                Some(row) => {
                    row.total_amount += expense.amount;
                    row.expense_count += 1;
                }
                None => rows.push(CategoryTotal {
                    category: expense.category.clone(),
                    total_amount: expense.amount,
                    expense_count: 1,
                }),
            }
        }
        // Stable sort keeps encounter order on equal totals.
        rows.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));
        Ok(rows)
    }

    fn totals_by_user_and_category(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<UserCategoryTotal>> {
        let ledger = self.load()?;
        let mut rows: Vec<UserCategoryTotal> = Vec::new();
        for expense in ledger.expenses.iter().filter(|e| in_window(e, since)) {
            let name = ledger.display_name(expense.user_id);
            match rows
                .iter_mut()
                .find(|r| r.display_name == name && r.category == expense.category)
            {
                Some(row) => {
                    row.total_amount += expense.amount;
                    row.expense_count += 1;
                }
                None => rows.push(UserCategoryTotal {
                    display_name: name.to_string(),
                    category: expense.category.clone(),
                    total_amount: expense.amount,
                    expense_count: 1,
                }),
            }
        }
        rows.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then(b.total_amount.total_cmp(&a.total_amount))
        });
        Ok(rows)
    }

    fn expenses_on(&self, user: UserId, date: NaiveDate) -> Result<Vec<ExpenseRecord>> {
        let ledger = self.load()?;
        let mut rows: Vec<ExpenseRecord> = ledger
            .expenses
            .iter()
            .filter(|e| e.user_id == user && e.created_at.date_naive() == date)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    fn all_expenses(&self) -> Result<Vec<ExportExpense>> {
        let ledger = self.load()?;
        let mut rows: Vec<ExportExpense> = ledger
            .expenses
            .iter()
            .map(|e| {
                let owner = ledger.users.iter().find(|u| u.id == e.user_id);
                ExportExpense {
                    display_name: owner
                        .map(|u| u.first_name.clone())
                        .unwrap_or_else(|| e.user_id.to_string()),
                    username: owner.and_then(|u| u.username.clone()),
                    amount: e.amount,
                    category: e.category.clone(),
                    description: e.description.clone(),
                    comment: e.comment.clone(),
                    created_at: e.created_at,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

fn in_window(expense: &ExpenseRecord, since: Option<DateTime<Utc>>) -> bool {
    match since {
        Some(start) => expense.created_at >= start,
        None => true,
    }
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = path.with_extension(TMP_SUFFIX);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(default)]
    users: Vec<StoredUser>,
    #[serde(default)]
    expenses: Vec<ExpenseRecord>,
}

impl LedgerFile {
    fn display_name(&self, id: UserId) -> &str {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.first_name.as_str())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredUser {
    id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    created_at: DateTime<Utc>,
}
