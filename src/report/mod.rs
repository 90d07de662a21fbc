//! Turns aggregation rows into the fixed report texts the chat shell sends.
//! Every function here is pure; the service layer decides what to render.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::domain::{category_label, ExpenseRecord};
use crate::store::{CategoryTotal, UserCategoryTotal};

/// Currency unit word appended after every amount.
pub const CURRENCY_UNIT: &str = "sum";
/// Count word in grouped lines. Not inflected.
pub const COUNT_WORD: &str = "purchases";

/// Fixed reply when a user's weekly aggregation has no groups.
pub const NO_PERSONAL_DATA: &str = "No expenses recorded this week.";
/// Fixed reply when the shared weekly aggregation has no groups.
pub const NO_SHARED_DATA: &str = "No expense data for this week.";

/// Formats an amount with no fractional units and a space between digit
/// groups: `1234567.0` renders as `"1 234 567"`.
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ' ');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    if rounded < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

fn grouped_line(category: &str, total: f64, count: u64) -> String {
    format!(
        "{}: {} {} ({} {})",
        category_label(category),
        format_amount(total),
        CURRENCY_UNIT,
        count,
        COUNT_WORD
    )
}

/// One user's weekly breakdown with a trailing total.
pub fn personal_week_report(rows: &[CategoryTotal]) -> String {
    if rows.is_empty() {
        return NO_PERSONAL_DATA.to_string();
    }
    let mut out = String::from("Your expenses this week:\n\n");
    let mut total = 0.0;
    for row in rows {
        total += row.total_amount;
        out.push_str(&grouped_line(&row.category, row.total_amount, row.expense_count));
        out.push('\n');
    }
    out.push_str(&format!(
        "\nTotal: {} {}",
        format_amount(total),
        CURRENCY_UNIT
    ));
    out
}

/// The shared weekly overview: one block per user in the order the rows
/// arrive (names ascending, categories by spend), then a grand total.
pub fn shared_week_report(rows: &[UserCategoryTotal]) -> String {
    if rows.is_empty() {
        return NO_SHARED_DATA.to_string();
    }
    let mut out = String::from("Weekly expense report\n");
    let mut grand_total = 0.0;
    let mut index = 0;
    while index < rows.len() {
        let name = &rows[index].display_name;
        out.push_str(&format!("\n{name}:\n"));
        let mut user_total = 0.0;
        while index < rows.len() && rows[index].display_name == *name {
            let row = &rows[index];
            user_total += row.total_amount;
            out.push_str("  ");
            out.push_str(&grouped_line(&row.category, row.total_amount, row.expense_count));
            out.push('\n');
            index += 1;
        }
        grand_total += user_total;
        out.push_str(&format!(
            "  Total: {} {}\n",
            format_amount(user_total),
            CURRENCY_UNIT
        ));
    }
    out.push_str(&format!(
        "\nGrand total: {} {}",
        format_amount(grand_total),
        CURRENCY_UNIT
    ));
    out
}

/// Numbered listing of one day's expenses with a day total. The comment line
/// appears only when a comment exists; the time line only when the timestamp
/// carries a non-midnight time.
pub fn day_report(date: NaiveDate, rows: &[ExpenseRecord]) -> String {
    if rows.is_empty() {
        return format!("No expenses on {}.", date.format("%Y-%m-%d"));
    }
    let mut out = format!("Expenses on {}:\n\n", date.format("%Y-%m-%d"));
    let mut total = 0.0;
    for (position, row) in rows.iter().enumerate() {
        total += row.amount;
        out.push_str(&format!(
            "{}. {}: {} {} - {}\n",
            position + 1,
            category_label(&row.category),
            format_amount(row.amount),
            CURRENCY_UNIT,
            row.description
        ));
        if let Some(comment) = &row.comment {
            out.push_str(&format!("   Comment: {comment}\n"));
        }
        let time = row.created_at.time();
        if time != NaiveTime::MIN {
            out.push_str(&format!("   Time: {:02}:{:02}\n", time.hour(), time.minute()));
        }
    }
    out.push_str(&format!(
        "\nTotal: {} {}",
        format_amount(total),
        CURRENCY_UNIT
    ));
    out
}
