//! Report rendering for a sequence of expenses.
//!
//! The report is a count line, one row per expense, a separator rule and a
//! total computed with exact integer-cents addition.

use crate::{Amount, Expense};

const RULE_WIDTH: usize = 50;

/// Formats a set of expenses for terminal output.
pub fn render(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "There are no expenses.".to_string();
    }

    let mut out = String::new();
    if expenses.len() == 1 {
        out.push_str("There is 1 expense.");
    } else {
        out.push_str(&format!("There are {} expenses.", expenses.len()));
    }

    for expense in expenses {
        out.push('\n');
        out.push_str(&expense.to_string());
    }

    let total: Amount = expenses.iter().map(|e| e.amount).sum();
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push_str(&format!("\nTotal {:>10}", total.to_string()));
    out
}
