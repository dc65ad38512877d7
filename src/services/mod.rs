//! Service layer for the Akiba client
//!
//! Services sit between the CLI and the API client: they validate form
//! input before anything is sent, submit the request, and invalidate the
//! cached queries a successful write has made stale.

pub mod account;
pub mod auth;
pub mod category;
pub mod transaction;

pub use account::AccountService;
pub use auth::AuthService;
pub use category::CategoryService;
pub use transaction::{TransactionForm, TransactionService};
