use std::io::Write;

use tempfile::NamedTempFile;

use crate::core::services::StatsService;
use crate::domain::category_label;
use crate::errors::Result;
use crate::report::{format_amount, CURRENCY_UNIT};
use crate::store::{ExpenseStore, ExportExpense};

const EXPORT_HEADERS: [&str; 6] = [
    "User",
    "Amount",
    "Category",
    "Description",
    "Comment",
    "Date",
];

/// One line of the export table, ready for the spreadsheet adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub display_name: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub comment: String,
    pub date: String,
}

/// Prepares the full-ledger export: ordered rows, their tabular emission,
/// and the temp-file hand-off whose cleanup survives a failed transmission.
pub struct ExportService;

impl ExportService {
    /// The export table, newest expense first. Category codes are replaced
    /// by labels (raw code when unknown) and missing comments become empty
    /// cells.
    pub fn rows(store: &dyn ExpenseStore) -> Vec<ExportRow> {
        StatsService::all(store)
            .into_iter()
            .map(ExportRow::from)
            .collect()
    }

    /// Writes the table as CSV with a fixed header row.
    pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(EXPORT_HEADERS)?;
        for row in rows {
            csv.write_record([
                row.display_name.as_str(),
                &format!("{:.2}", row.amount),
                row.category.as_str(),
                row.description.as_str(),
                row.comment.as_str(),
                row.date.as_str(),
            ])?;
        }
        csv.flush()
            .map_err(|err| crate::errors::ExpenseError::Export(err.to_string()))?;
        Ok(())
    }

    /// Writes the table into a named temp file and hands the guard to the
    /// caller. Dropping the guard deletes the file, so cleanup happens even
    /// when the transmission that follows fails.
    pub fn create_export_file(rows: &[ExportRow]) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        Self::write_csv(rows, &mut file)?;
        file.flush()?;
        Ok(file)
    }

    /// Caption line for the export message.
    pub fn summary(rows: &[ExportRow]) -> String {
        let total: f64 = rows.iter().map(|r| r.amount).sum();
        format!(
            "{} records, total {} {}",
            rows.len(),
            format_amount(total),
            CURRENCY_UNIT
        )
    }
}

impl From<ExportExpense> for ExportRow {
    fn from(expense: ExportExpense) -> Self {
        Self {
            display_name: expense.display_name,
            amount: expense.amount,
            category: category_label(&expense.category).to_string(),
            description: expense.description,
            comment: expense.comment.unwrap_or_default(),
            date: expense.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}
