//! Category model
//!
//! Categories are either system-provided or custom. A category may carry a
//! `system_name`, a canonical tag ("food", "bills", ...) that maps it onto a
//! predefined budgeting category.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};

/// System names the budgeting view knows about
pub const KNOWN_SYSTEM_NAMES: &[&str] = &[
    "food",
    "transport",
    "entertainment",
    "shopping",
    "bills",
    "health",
    "education",
    "other",
];

/// A transaction category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub system_name: Option<String>,
    pub is_custom: bool,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

impl Category {
    /// The system name, or "other" when unset
    pub fn system_name_or_default(&self) -> &str {
        match self.system_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Payload for `POST /categories`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCreate {
    pub name: String,
    pub system_name: String,
}

impl CategoryCreate {
    /// Build a create payload from raw form input
    ///
    /// Both fields are required. The system name is normalized to lowercase.
    pub fn from_form(name: &str, system_name: &str) -> Result<Self, CategoryValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(name.len()));
        }

        let system_name = system_name.trim().to_lowercase();
        if system_name.is_empty() {
            return Err(CategoryValidationError::EmptySystemName);
        }

        Ok(Self {
            name: name.to_string(),
            system_name,
        })
    }
}

/// Validation errors for category forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    EmptySystemName,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::EmptySystemName => write!(f, "System name cannot be empty"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
