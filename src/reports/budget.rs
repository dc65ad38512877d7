//! 50/30/20 budget view
//!
//! Targets are 50% (needs), 30% (wants) and 20% (savings) of total income.
//! Actual needs and wants are EXPENSE totals bucketed by the category's
//! system name; actual savings is whatever income was not spent.

use std::collections::HashMap;
use std::fmt;

use crate::display::report::{format_bar, format_percentage};
use crate::models::{Category, CategoryId, Money, Transaction};

use super::spending::share;

/// System names that count as needs; everything else is a want
pub const NEEDS_SYSTEM_NAMES: &[&str] = &["food", "transport", "bills", "health", "education"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetBucket {
    Needs,
    Wants,
    Savings,
}

impl BudgetBucket {
    /// Target share of income, in percent
    pub fn target_percent(&self) -> i64 {
        match self {
            Self::Needs => 50,
            Self::Wants => 30,
            Self::Savings => 20,
        }
    }

    /// Bucket for an expense in a category with this system name
    pub fn for_system_name(system_name: &str) -> Self {
        let name = system_name.trim().to_lowercase();
        if NEEDS_SYSTEM_NAMES.contains(&name.as_str()) {
            Self::Needs
        } else {
            Self::Wants
        }
    }
}

impl fmt::Display for BudgetBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Needs => write!(f, "Needs"),
            Self::Wants => write!(f, "Wants"),
            Self::Savings => write!(f, "Savings"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketRow {
    pub bucket: BudgetBucket,
    pub target: Money,
    pub actual: Money,
    /// Actual as a share of income, 0 when there is no income
    pub percent_of_income: f64,
}

impl BucketRow {
    /// Target minus actual. For savings a negative value means a shortfall;
    /// for needs and wants it means overspending.
    pub fn remaining(&self) -> Money {
        self.target - self.actual
    }

    pub fn is_over(&self) -> bool {
        match self.bucket {
            BudgetBucket::Savings => self.actual < self.target,
            _ => self.actual > self.target,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BudgetReport {
    pub total_income: Money,
    pub total_expenses: Money,
    /// Needs, wants, savings
    pub rows: Vec<BucketRow>,
}

impl BudgetReport {
    pub fn generate(categories: &[Category], transactions: &[Transaction]) -> Self {
        let buckets: HashMap<CategoryId, BudgetBucket> = categories
            .iter()
            .map(|c| (c.id, BudgetBucket::for_system_name(c.system_name_or_default())))
            .collect();

        let mut total_income = Money::zero();
        let mut needs = Money::zero();
        let mut wants = Money::zero();

        for txn in transactions {
            if txn.is_income() {
                total_income += txn.amount;
                continue;
            }
            match buckets.get(&txn.category_id) {
                Some(BudgetBucket::Needs) => needs += txn.amount,
                _ => wants += txn.amount,
            }
        }

        let total_expenses = needs + wants;
        let savings = total_income - total_expenses;

        let row = |bucket: BudgetBucket, actual: Money| BucketRow {
            bucket,
            target: total_income.percent(bucket.target_percent()),
            actual,
            percent_of_income: share(actual, total_income),
        };

        Self {
            total_income,
            total_expenses,
            rows: vec![
                row(BudgetBucket::Needs, needs),
                row(BudgetBucket::Wants, wants),
                row(BudgetBucket::Savings, savings),
            ],
        }
    }

    pub fn row(&self, bucket: BudgetBucket) -> Option<&BucketRow> {
        self.rows.iter().find(|r| r.bucket == bucket)
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("50/30/20 Budget\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "Income: {}   Expenses: {}\n\n",
            self.total_income.format_with_currency(currency),
            self.total_expenses.format_with_currency(currency)
        ));

        if self.total_income.is_zero() {
            output.push_str("No income recorded yet; targets are zero.\n\n");
        }

        output.push_str(&format!(
            "{:<8} {:>6} {:>14} {:>14} {:>7}  {}\n",
            "Bucket", "Target", "Planned", "Actual", "Share", ""
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.rows {
            let flag = if row.is_over() { "  !" } else { "" };
            output.push_str(&format!(
                "{:<8} {:>5}% {:>14} {:>14} {:>7}  {}{}\n",
                row.bucket.to_string(),
                row.bucket.target_percent(),
                row.target.to_string(),
                row.actual.to_string(),
                format_percentage(row.percent_of_income.max(0.0)),
                format_bar(row.actual.as_f64(), row.target.as_f64(), 12),
                flag,
            ));
        }

        output
    }
}
