//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, Money};
use crate::reports::total_balance;

/// Format a list of accounts as a table with a total row
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(5);

    let type_width = accounts
        .iter()
        .map(|a| a.account_type.to_string().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {:<type_width$}  {:>14}  {:<8}  {}\n",
        "ID",
        "Name",
        "Type",
        "Balance",
        "Currency",
        "Status",
        name_width = name_width,
        type_width = type_width,
    ));

    output.push_str(&format!(
        "{:->4}  {:-<name_width$}  {:-<type_width$}  {:->14}  {:-<8}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        type_width = type_width,
    ));

    for account in accounts {
        let status = if account.is_active { "" } else { "Inactive" };
        output.push_str(&format!(
            "{:>4}  {:<name_width$}  {:<type_width$}  {:>14}  {:<8}  {}\n",
            account.id.to_string(),
            account.name,
            account.account_type.to_string(),
            account.current_balance.to_string(),
            account.currency,
            status,
            name_width = name_width,
            type_width = type_width,
        ));
    }

    let total: Money = total_balance(accounts);
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {:<type_width$}  {:>14}\n",
        "",
        "TOTAL",
        "",
        total.to_string(),
        name_width = name_width,
        type_width = type_width,
    ));

    output
}

/// Format a single account's details
pub fn format_account_details(account: &Account) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  ID:               {}\n", account.id));
    output.push_str(&format!("  Type:             {}\n", account.account_type));
    output.push_str(&format!("  Currency:         {}\n", account.currency));
    output.push_str(&format!(
        "  Active:           {}\n",
        if account.is_active { "Yes" } else { "No" }
    ));
    output.push('\n');
    output.push_str(&format!(
        "  Initial Balance:  {}\n",
        account.initial_balance.format_with_currency(&account.currency)
    ));
    output.push_str(&format!(
        "  Current Balance:  {}\n",
        account.current_balance.format_with_currency(&account.currency)
    ));
    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        account.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        account.updated_at.format("%Y-%m-%d %H:%M")
    ));

    output
}
