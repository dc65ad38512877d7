//! Dashboard summary: greeting, total balance, income and expense totals,
//! and the most recent transactions.

use crate::display::transaction::format_transaction_line;
use crate::models::{Account, Money, Transaction, User};

use super::balance::total_balance;

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub greeting_name: String,
    pub total_balance: Money,
    pub total_income: Money,
    pub total_expenses: Money,
    pub account_count: usize,
    /// Newest first
    pub recent: Vec<Transaction>,
}

impl DashboardSummary {
    /// `recent_limit` bounds the recent transaction list
    pub fn generate(
        user: &User,
        accounts: &[Account],
        transactions: &[Transaction],
        recent_limit: usize,
    ) -> Self {
        let total_income = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let total_expenses = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        let mut recent = transactions.to_vec();
        recent.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then(b.id.cmp(&a.id))
        });
        recent.truncate(recent_limit);

        Self {
            greeting_name: user.greeting_name().to_string(),
            total_balance: total_balance(accounts),
            total_income,
            total_expenses,
            account_count: accounts.len(),
            recent,
        }
    }

    /// Income minus expenses
    pub fn net_flow(&self) -> Money {
        self.total_income - self.total_expenses
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Welcome back, {}!\n\n", self.greeting_name));
        output.push_str(&format!(
            "Total Balance:  {}  ({} accounts)\n",
            self.total_balance.format_with_currency(currency),
            self.account_count
        ));
        output.push_str(&format!(
            "Income:         {}\n",
            self.total_income.format_with_currency(currency)
        ));
        output.push_str(&format!(
            "Expenses:       {}\n",
            self.total_expenses.format_with_currency(currency)
        ));
        output.push_str(&format!(
            "Net:            {}\n\n",
            self.net_flow().format_with_currency(currency)
        ));

        output.push_str("Recent Transactions\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');
        if self.recent.is_empty() {
            output.push_str("No transactions yet.\n");
        }
        for txn in &self.recent {
            output.push_str(&format_transaction_line(txn, currency));
            output.push('\n');
        }

        output
    }
}
