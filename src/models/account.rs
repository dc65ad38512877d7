//! Account model
//!
//! Represents financial accounts (checking, savings, credit cards) as the API
//! returns them, plus the create and update payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, UserId};
use super::money::{self, Money};
use super::timestamp;

/// Currency used when the user does not pick one
pub const DEFAULT_CURRENCY: &str = "KES";

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Checking account
    #[default]
    Checking,
    /// Savings account
    Savings,
    /// Credit card
    Credit,
}

impl AccountType {
    /// Returns true if this account type carries debt
    pub fn is_liability(&self) -> bool {
        matches!(self, Self::Credit)
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit" | "credit_card" | "creditcard" => Some(Self::Credit),
            _ => None,
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Credit => "credit",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::Credit => write!(f, "Credit Card"),
        }
    }
}

/// A financial account owned by the session user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,

    pub user_id: UserId,

    /// Account name (e.g., "M-Pesa")
    pub name: String,

    /// Balance the account was opened with
    pub initial_balance: Money,

    /// Balance as computed by the server
    pub current_balance: Money,

    pub currency: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    pub is_active: bool,

    #[serde(default)]
    pub created_by: Option<UserId>,

    #[serde(default)]
    pub updated_by: Option<UserId>,

    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,

    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Payload for `POST /accounts/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountCreate {
    pub name: String,
    #[serde(with = "money::as_number")]
    pub initial_balance: Money,
    pub currency: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

impl AccountCreate {
    /// Build a create payload from raw form input
    ///
    /// Rejects an empty name or a balance that is not a number, so nothing
    /// is sent to the API for an invalid form.
    pub fn from_form(
        name: &str,
        initial_balance: &str,
        currency: &str,
        account_type: &str,
    ) -> Result<Self, AccountValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AccountValidationError::EmptyName);
        }
        if name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(name.len()));
        }

        if initial_balance.trim().is_empty() {
            return Err(AccountValidationError::InvalidBalance(
                initial_balance.to_string(),
            ));
        }
        let initial_balance = Money::parse(initial_balance)
            .map_err(|_| AccountValidationError::InvalidBalance(initial_balance.to_string()))?;

        let account_type = AccountType::parse(account_type)
            .ok_or_else(|| AccountValidationError::InvalidType(account_type.to_string()))?;

        let currency = currency.trim().to_uppercase();
        let currency = if currency.is_empty() {
            DEFAULT_CURRENCY.to_string()
        } else {
            currency
        };

        Ok(Self {
            name: name.to_string(),
            initial_balance,
            currency,
            account_type,
        })
    }
}

/// Payload for `PATCH /accounts/{id}`; unset fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl AccountUpdate {
    /// True if no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.currency.is_none()
            && self.account_type.is_none()
            && self.is_active.is_none()
    }

    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AccountValidationError::EmptyName);
            }
            if name.len() > 100 {
                return Err(AccountValidationError::NameTooLong(name.len()));
            }
        }
        Ok(())
    }
}

/// Validation errors for account forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidBalance(String),
    InvalidType(String),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::InvalidBalance(raw) => write!(
                f,
                "Invalid balance '{}'. Use a number like '1000' or '1000.00'",
                raw
            ),
            Self::InvalidType(raw) => write!(
                f,
                "Invalid account type '{}'. Valid types: checking, savings, credit",
                raw
            ),
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT_JSON: &str = r#"{
        "id": 1,
        "user_id": 3,
        "name": "M-Pesa",
        "initial_balance": "1000.00",
        "current_balance": "750.50",
        "currency": "KES",
        "type": "savings",
        "is_active": true,
        "created_by": 3,
        "updated_by": 3,
        "created_at": "2024-01-05T10:00:00",
        "updated_at": "2024-01-06T10:00:00"
    }"#;

    #[test]
    fn test_deserialize_account() {
        let account: Account = serde_json::from_str(ACCOUNT_JSON).unwrap();
        assert_eq!(account.id, AccountId::new(1));
        assert_eq!(account.account_type, AccountType::Savings);
        assert_eq!(account.current_balance.cents(), 75050);
        assert_eq!(account.to_string(), "M-Pesa (Savings)");
    }

    #[test]
    fn test_unknown_account_type_fails_decoding() {
        let json = ACCOUNT_JSON.replace("\"savings\"", "\"brokerage\"");
        assert!(serde_json::from_str::<Account>(&json).is_err());
    }

    #[test]
    fn test_missing_is_active_fails_decoding() {
        let json = ACCOUNT_JSON.replace("\"is_active\": true,", "");
        assert!(serde_json::from_str::<Account>(&json).is_err());
    }

    #[test]
    fn test_bad_balance_fails_decoding() {
        let json = ACCOUNT_JSON.replace("\"750.50\"", "\"lots\"");
        assert!(serde_json::from_str::<Account>(&json).is_err());
    }

    #[test]
    fn test_create_from_form() {
        let create = AccountCreate::from_form("  Savings  ", "1000", "", "savings").unwrap();
        assert_eq!(create.name, "Savings");
        assert_eq!(create.initial_balance.cents(), 100000);
        assert_eq!(create.currency, DEFAULT_CURRENCY);

        let body = serde_json::to_value(&create).unwrap();
        assert_eq!(body["initial_balance"], serde_json::json!(1000.0));
        assert_eq!(body["type"], "savings");
    }

    #[test]
    fn test_create_rejects_empty_name() {
        assert_eq!(
            AccountCreate::from_form("   ", "10", "KES", "checking"),
            Err(AccountValidationError::EmptyName)
        );
    }

    #[test]
    fn test_create_rejects_non_numeric_balance() {
        assert!(matches!(
            AccountCreate::from_form("Cash", "ten", "KES", "checking"),
            Err(AccountValidationError::InvalidBalance(_))
        ));
        assert!(matches!(
            AccountCreate::from_form("Cash", "", "KES", "checking"),
            Err(AccountValidationError::InvalidBalance(_))
        ));
        assert!(matches!(
            AccountCreate::from_form("Cash", "10.005", "KES", "checking"),
            Err(AccountValidationError::InvalidBalance(_))
        ));
    }

    #[test]
    fn test_create_rejects_unknown_type() {
        assert!(matches!(
            AccountCreate::from_form("Cash", "10", "KES", "investment"),
            Err(AccountValidationError::InvalidType(_))
        ));
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = AccountUpdate {
            name: Some("Renamed".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"name":"Renamed"}"#);
        assert!(!update.is_empty());
        assert!(AccountUpdate::default().is_empty());
    }

    #[test]
    fn test_account_type_parsing() {
        assert_eq!(AccountType::parse("checking"), Some(AccountType::Checking));
        assert_eq!(AccountType::parse("SAVINGS"), Some(AccountType::Savings));
        assert_eq!(AccountType::parse("credit_card"), Some(AccountType::Credit));
        assert_eq!(AccountType::parse("invalid"), None);
        assert!(AccountType::Credit.is_liability());
    }
}
