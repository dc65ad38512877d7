//! Spending Report
//!
//! Sums EXPENSE transactions per category. Every known category gets a row,
//! even with nothing spent; expenses pointing at a category that is not in
//! the list are reported separately as uncategorized.

use std::collections::HashMap;

use crate::display::report::{format_bar, format_percentage};
use crate::models::{Category, CategoryId, Money, Transaction};

/// Spending for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub category_id: CategoryId,
    pub category_name: String,
    /// Canonical system name, "other" when unset
    pub system_name: String,
    /// Sum of expense amounts (non-negative)
    pub total: Money,
    pub transaction_count: usize,
    /// Share of total spending, 0-100
    pub percentage: f64,
}

/// Spending broken down by category
#[derive(Debug, Clone)]
pub struct SpendingReport {
    /// One row per category, in category list order
    pub categories: Vec<CategorySpending>,
    /// Expenses whose category is not in the list
    pub uncategorized: Money,
    pub uncategorized_count: usize,
    /// All expenses, including uncategorized
    pub total_spending: Money,
    /// All income, for context
    pub total_income: Money,
}

impl SpendingReport {
    /// Aggregate `transactions` over `categories`
    pub fn generate(categories: &[Category], transactions: &[Transaction]) -> Self {
        let mut by_category: HashMap<CategoryId, (Money, usize)> = categories
            .iter()
            .map(|c| (c.id, (Money::zero(), 0)))
            .collect();

        let mut uncategorized = Money::zero();
        let mut uncategorized_count = 0;
        let mut total_spending = Money::zero();
        let mut total_income = Money::zero();

        for txn in transactions {
            if txn.is_income() {
                total_income += txn.amount;
                continue;
            }

            total_spending += txn.amount;
            match by_category.get_mut(&txn.category_id) {
                Some(entry) => {
                    entry.0 += txn.amount;
                    entry.1 += 1;
                }
                None => {
                    uncategorized += txn.amount;
                    uncategorized_count += 1;
                }
            }
        }

        let rows = categories
            .iter()
            .map(|category| {
                let (total, count) = by_category
                    .get(&category.id)
                    .copied()
                    .unwrap_or((Money::zero(), 0));

                CategorySpending {
                    category_id: category.id,
                    category_name: category.name.clone(),
                    system_name: category.system_name_or_default().to_string(),
                    total,
                    transaction_count: count,
                    percentage: share(total, total_spending),
                }
            })
            .collect();

        Self {
            categories: rows,
            uncategorized,
            uncategorized_count,
            total_spending,
            total_income,
        }
    }

    /// Spending for one category; zero if the category is unknown
    pub fn spent_in(&self, category_id: CategoryId) -> Money {
        self.categories
            .iter()
            .find(|row| row.category_id == category_id)
            .map(|row| row.total)
            .unwrap_or_default()
    }

    /// Categories with spending, largest first
    pub fn top_categories(&self, limit: usize) -> Vec<&CategorySpending> {
        let mut rows: Vec<_> = self
            .categories
            .iter()
            .filter(|row| !row.total.is_zero())
            .collect();
        rows.sort_by(|a, b| b.total.cmp(&a.total));
        rows.into_iter().take(limit).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Spending by Category\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "Total Spending: {}\n",
            self.total_spending.format_with_currency(currency)
        ));
        output.push_str(&format!(
            "Total Income:   {}\n\n",
            self.total_income.format_with_currency(currency)
        ));

        output.push_str(&format!(
            "{:<24} {:>14} {:>6} {:>6}  {}\n",
            "Category", "Spent", "Count", "%", ""
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        let max = self
            .categories
            .iter()
            .map(|row| row.total.as_f64())
            .fold(0.0, f64::max);

        for row in &self.categories {
            output.push_str(&format!(
                "{:<24} {:>14} {:>6} {:>6}  {}\n",
                row.category_name,
                row.total.to_string(),
                row.transaction_count,
                format_percentage(row.percentage),
                format_bar(row.total.as_f64(), max, 16),
            ));
        }

        if self.uncategorized_count > 0 {
            output.push_str(&format!(
                "{:<24} {:>14} {:>6}\n",
                "Uncategorized",
                self.uncategorized.to_string(),
                self.uncategorized_count
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            "TOTAL",
            self.total_spending.to_string()
        ));

        output
    }
}

/// `part` as a percentage of `whole`, 0 when `whole` is zero
pub(crate) fn share(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{timestamp, AccountId, TransactionId, TransactionType, UserId};

    pub(crate) fn category(id: i64, name: &str, system_name: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.into(),
            system_name: Some(system_name.into()),
            is_custom: false,
            user_id: None,
        }
    }

    pub(crate) fn txn(
        id: i64,
        cents: i64,
        transaction_type: TransactionType,
        category_id: i64,
        date: &str,
    ) -> Transaction {
        let ts = timestamp::parse(date).unwrap();
        Transaction {
            id: TransactionId::new(id),
            user_id: UserId::new(3),
            amount: Money::from_cents(cents),
            transaction_type,
            account_id: AccountId::new(1),
            category_id: CategoryId::new(category_id),
            description: format!("txn {}", id),
            transaction_date: ts,
            is_automated: false,
            raw_text: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn sample() -> (Vec<Category>, Vec<Transaction>) {
        let categories = vec![
            category(1, "Food", "food"),
            category(2, "Transport", "transport"),
            category(3, "Fun", "entertainment"),
        ];
        let transactions = vec![
            txn(1, 25000, TransactionType::Expense, 1, "2024-03-01"),
            txn(2, 5000, TransactionType::Expense, 1, "2024-03-02"),
            txn(3, 10000, TransactionType::Expense, 2, "2024-03-03"),
            txn(4, 500000, TransactionType::Income, 1, "2024-03-04"),
            txn(5, 2000, TransactionType::Expense, 99, "2024-03-05"),
        ];
        (categories, transactions)
    }

    #[test]
    fn test_sums_expenses_per_category() {
        let (categories, transactions) = sample();
        let report = SpendingReport::generate(&categories, &transactions);

        assert_eq!(report.spent_in(CategoryId::new(1)), Money::from_cents(30000));
        assert_eq!(report.spent_in(CategoryId::new(2)), Money::from_cents(10000));
        assert_eq!(report.categories[0].transaction_count, 2);
    }

    #[test]
    fn test_categories_without_expenses_report_zero() {
        let (categories, transactions) = sample();
        let report = SpendingReport::generate(&categories, &transactions);

        assert_eq!(report.categories.len(), 3);
        assert_eq!(report.spent_in(CategoryId::new(3)), Money::zero());
        assert_eq!(report.categories[2].percentage, 0.0);
    }

    #[test]
    fn test_income_is_ignored_and_unknown_category_is_uncategorized() {
        let (categories, transactions) = sample();
        let report = SpendingReport::generate(&categories, &transactions);

        assert_eq!(report.total_income, Money::from_cents(500000));
        assert_eq!(report.uncategorized, Money::from_cents(2000));
        assert_eq!(report.uncategorized_count, 1);
        assert_eq!(report.total_spending, Money::from_cents(42000));
    }

    #[test]
    fn test_empty_inputs() {
        let report = SpendingReport::generate(&[], &[]);
        assert!(report.categories.is_empty());
        assert!(report.total_spending.is_zero());
        assert!(report.top_categories(3).is_empty());
    }

    #[test]
    fn test_top_categories_largest_first() {
        let (categories, transactions) = sample();
        let report = SpendingReport::generate(&categories, &transactions);

        let top = report.top_categories(5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].category_name, "Food");
    }

    #[test]
    fn test_format_terminal() {
        let (categories, transactions) = sample();
        let output = SpendingReport::generate(&categories, &transactions).format_terminal("KES");

        assert!(output.contains("Spending by Category"));
        assert!(output.contains("KES 420.00"));
        assert!(output.contains("Uncategorized"));
        assert!(output.contains("Fun"));
    }
}
