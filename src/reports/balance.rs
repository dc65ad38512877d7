//! Balance totals across accounts

use crate::models::{Account, AccountType, Money};

/// Sum of every account's current balance
pub fn total_balance(accounts: &[Account]) -> Money {
    accounts.iter().map(|a| a.current_balance).sum()
}

/// Total balance per account type, in checking/savings/credit order
///
/// Types with no accounts are left out.
pub fn balance_by_type(accounts: &[Account]) -> Vec<(AccountType, Money)> {
    [AccountType::Checking, AccountType::Savings, AccountType::Credit]
        .into_iter()
        .filter_map(|account_type| {
            let mut of_type = accounts
                .iter()
                .filter(|a| a.account_type == account_type)
                .peekable();
            of_type.peek()?;
            Some((account_type, of_type.map(|a| a.current_balance).sum()))
        })
        .collect()
}
