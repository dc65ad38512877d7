//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for accounts, categories and
//! transactions, plus helpers shared by the report views.

pub mod account;
pub mod category;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use category::{format_category_details, format_category_list};
pub use transaction::{
    format_transaction_details, format_transaction_line, format_transaction_register,
};
