//! Configuration module for the Akiba client
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - API base URL overrides

pub mod paths;
pub mod settings;

pub use paths::AkibaPaths;
pub use settings::Settings;
