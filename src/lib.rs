//! Akiba - terminal client for the AkibaFlow personal finance API
//!
//! All financial data lives on the server. This crate provides typed request
//! and response contracts, a query client that caches and deduplicates
//! reads, a persisted auth session, and the client-side reports (total
//! balance, spending by category, the 50/30/20 budget) that the server does
//! not compute.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: API contracts (accounts, transactions, categories, users)
//! - `session` / `storage`: the auth session and its on-disk copy
//! - `api`: transport, query cache and typed endpoint client
//! - `context`: the object that wires the above together
//! - `services`: form validation, mutations and cache invalidation
//! - `reports`: client-side aggregation
//! - `display` / `cli`: terminal formatting and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use akiba::config::AkibaPaths;
//! use akiba::context::AppContext;
//! use akiba::services::AccountService;
//!
//! let ctx = AppContext::init(AkibaPaths::new()?, None)?;
//! let accounts = AccountService::new(ctx.client()).list().await?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{AkibaError, AkibaResult};
