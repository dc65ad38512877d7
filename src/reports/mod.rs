//! Reports computed client-side from cached API data
//!
//! Balance totals, spending by category, the dashboard summary and the
//! 50/30/20 budget view. All of them are pure functions of the fetched
//! lists; nothing here talks to the network.

pub mod balance;
pub mod budget;
pub mod dashboard;
pub mod spending;

pub use balance::{balance_by_type, total_balance};
pub use budget::{BucketRow, BudgetBucket, BudgetReport};
pub use dashboard::DashboardSummary;
pub use spending::{CategorySpending, SpendingReport};
