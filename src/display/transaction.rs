//! Transaction display formatting
//!
//! Register-style lists and a detail view. Income is shown with "+",
//! expenses with "-".

use std::collections::HashMap;

use crate::models::{Category, CategoryId, Transaction};

use super::report::truncate;

/// Signed amount with currency, e.g. "-KES 250.00"
pub fn format_signed_amount(txn: &Transaction, currency: &str) -> String {
    format!(
        "{}{}",
        txn.transaction_type.sign(),
        txn.amount.format_with_currency(currency)
    )
}

/// One-line summary used by the dashboard
pub fn format_transaction_line(txn: &Transaction, currency: &str) -> String {
    format!(
        "{}  {:<24} {:>16}",
        txn.transaction_date.format("%Y-%m-%d").to_string(),
        truncate(description_or_placeholder(txn), 24),
        format_signed_amount(txn, currency)
    )
}

/// Format a list of transactions as a register
///
/// `categories` resolves category names; unknown ids show the raw id.
pub fn format_transaction_register(
    transactions: &[&Transaction],
    categories: &[Category],
    currency: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:10}  {:28}  {:16}  {:>16}\n",
        "ID", "Date", "Description", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(83));
    output.push('\n');

    for txn in transactions {
        let category = names
            .get(&txn.category_id)
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("#{}", txn.category_id));
        let marker = if txn.is_automated { "*" } else { " " };

        output.push_str(&format!(
            "{:>5}{} {:10}  {:28}  {:16}  {:>16}\n",
            txn.id.to_string(),
            marker,
            txn.transaction_date.format("%Y-%m-%d").to_string(),
            truncate(description_or_placeholder(txn), 28),
            truncate(&category, 16),
            format_signed_amount(txn, currency)
        ));
    }

    output.push_str(&format!("\n{} transaction(s)\n", transactions.len()));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    category_name: Option<&str>,
    currency: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!(
        "Date:        {}\n",
        txn.transaction_date.format("%Y-%m-%d")
    ));
    output.push_str(&format!("Type:        {}\n", txn.transaction_type));
    output.push_str(&format!(
        "Amount:      {}\n",
        format_signed_amount(txn, currency)
    ));
    output.push_str(&format!("Account:     {}\n", txn.account_id));

    match category_name {
        Some(name) => output.push_str(&format!("Category:    {}\n", name)),
        None => output.push_str(&format!("Category:    #{}\n", txn.category_id)),
    }

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    if txn.is_automated {
        output.push_str("Source:      automatic detection\n");
        if let Some(raw) = &txn.raw_text {
            output.push_str(&format!("Raw text:    {}\n", raw));
        }
    }

    output
}

fn description_or_placeholder(txn: &Transaction) -> &str {
    if txn.description.is_empty() {
        "(no description)"
    } else {
        &txn.description
    }
}
