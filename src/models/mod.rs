//! Typed contracts for the Akiba API
//!
//! Every resource the API exposes (users, accounts, categories,
//! transactions) has a response type and, where the API accepts writes, a
//! create/update payload. Decoding is strict: a response that does not match
//! these shapes is an error, not a half-filled struct.

pub mod account;
pub mod category;
pub mod ids;
pub mod money;
pub mod timestamp;
pub mod transaction;
pub mod user;
pub mod validation;

pub use account::{Account, AccountCreate, AccountType, AccountUpdate};
pub use category::{Category, CategoryCreate};
pub use ids::{AccountId, CategoryId, TransactionId, UserId};
pub use money::Money;
pub use transaction::{
    Transaction, TransactionCreate, TransactionFilter, TransactionType, TransactionUpdate,
    TypeFilter,
};
pub use user::{LoginRequest, Token, User, UserCreate};
pub use validation::{ErrorPayload, ValidationDetail};
