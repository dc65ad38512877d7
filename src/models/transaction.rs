//! Transaction model
//!
//! Represents income and expense transactions, the create/update payloads,
//! and the client-side filter used by the transaction list.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, TransactionId, UserId};
use super::money::{self, Money};
use super::timestamp;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }

    /// "+" for income, "-" for expenses
    pub fn sign(&self) -> &'static str {
        match self {
            Self::Income => "+",
            Self::Expense => "-",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "INCOME"),
            Self::Expense => write!(f, "EXPENSE"),
        }
    }
}

/// A transaction as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    pub user_id: UserId,

    /// Always non-negative; direction comes from `transaction_type`
    pub amount: Money,

    pub transaction_type: TransactionType,

    pub account_id: AccountId,

    pub category_id: CategoryId,

    pub description: String,

    #[serde(with = "timestamp")]
    pub transaction_date: NaiveDateTime,

    /// Set when the transaction was recorded by automatic detection
    pub is_automated: bool,

    /// Source text for automated transactions
    #[serde(default)]
    pub raw_text: Option<String>,

    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,

    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// Amount with its direction applied (expenses negative)
    pub fn signed_amount(&self) -> Money {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{} {}",
            self.transaction_date.format("%Y-%m-%d"),
            self.transaction_type.sign(),
            self.amount,
            self.description
        )
    }
}

/// Payload for `POST /transactions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionCreate {
    #[serde(with = "money::as_number")]
    pub amount: Money,
    pub transaction_type: TransactionType,
    pub account_id: AccountId,
    pub category_id: CategoryId,
    pub description: String,
    #[serde(with = "timestamp")]
    pub transaction_date: NaiveDateTime,
}

impl TransactionCreate {
    /// Build a create payload from raw form input
    ///
    /// `date` may be empty, in which case `today` is used.
    pub fn from_form(
        amount: &str,
        transaction_type: TransactionType,
        account_id: Option<AccountId>,
        category_id: Option<CategoryId>,
        description: &str,
        date: &str,
        today: NaiveDate,
    ) -> Result<Self, TransactionValidationError> {
        if amount.trim().is_empty() {
            return Err(TransactionValidationError::MissingAmount);
        }
        let amount = Money::parse(amount)
            .map_err(|_| TransactionValidationError::InvalidAmount(amount.to_string()))?;
        if !amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount);
        }

        let account_id = account_id.ok_or(TransactionValidationError::MissingAccount)?;
        let category_id = category_id.ok_or(TransactionValidationError::MissingCategory)?;

        let transaction_date = if date.trim().is_empty() {
            today.and_time(chrono::NaiveTime::MIN)
        } else {
            timestamp::parse(date)
                .ok_or_else(|| TransactionValidationError::InvalidDate(date.to_string()))?
        };

        Ok(Self {
            amount,
            transaction_type,
            account_id,
            category_id,
            description: description.trim().to_string(),
            transaction_date,
        })
    }
}

/// Payload for `PATCH /transactions/{id}`; unset fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_date: Option<NaiveDateTime>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none() && self.description.is_none() && self.transaction_date.is_none()
    }
}

/// Which transaction types the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl TypeFilter {
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        TransactionType::parse(s).map(Self::Only)
    }
}

/// Client-side filter over the cached transaction page
///
/// All criteria must match.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description
    pub search: String,
    pub transaction_type: TypeFilter,
    pub category_id: Option<CategoryId>,
    pub account_id: Option<AccountId>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search =
            search.is_empty() || txn.description.to_lowercase().contains(&search);

        let matches_type = match self.transaction_type {
            TypeFilter::All => true,
            TypeFilter::Only(t) => txn.transaction_type == t,
        };

        let matches_category = self.category_id.map_or(true, |id| txn.category_id == id);
        let matches_account = self.account_id.map_or(true, |id| txn.account_id == id);

        matches_search && matches_type && matches_category && matches_account
    }

    /// Keep matching transactions, preserving order
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.transaction_type == TypeFilter::All
            && self.category_id.is_none()
            && self.account_id.is_none()
    }
}

/// Validation errors for transaction forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    MissingAmount,
    InvalidAmount(String),
    NonPositiveAmount,
    MissingAccount,
    MissingCategory,
    InvalidDate(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAmount => write!(f, "Amount is required"),
            Self::InvalidAmount(raw) => write!(
                f,
                "Invalid amount '{}'. Use a number like '250' or '250.00'",
                raw
            ),
            Self::NonPositiveAmount => write!(f, "Amount must be greater than zero"),
            Self::MissingAccount => write!(f, "An account is required"),
            Self::MissingCategory => write!(f, "A category is required"),
            Self::InvalidDate(raw) => {
                write!(f, "Invalid date '{}'. Use YYYY-MM-DD", raw)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(id: i64, kind: TransactionType, cents: i64, category: i64, desc: &str) -> Transaction {
        let ts = timestamp::parse("2024-03-01T09:00:00").unwrap();
        Transaction {
            id: TransactionId::new(id),
            user_id: UserId::new(1),
            amount: Money::from_cents(cents),
            transaction_type: kind,
            account_id: AccountId::new(1),
            category_id: CategoryId::new(category),
            description: desc.to_string(),
            transaction_date: ts,
            is_automated: false,
            raw_text: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_deserialize_transaction() {
        let json = r#"{
            "id": 9, "user_id": 3, "amount": "250.00", "transaction_type": "EXPENSE",
            "account_id": 1, "category_id": 4, "description": "Grocery shopping",
            "transaction_date": "2024-03-01T00:00:00", "is_automated": false,
            "raw_text": null, "created_at": "2024-03-01T08:00:00",
            "updated_at": "2024-03-01T08:00:00"
        }"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert!(t.is_expense());
        assert_eq!(t.amount.cents(), 25000);
        assert_eq!(t.signed_amount().cents(), -25000);
        assert_eq!(t.to_string(), "2024-03-01 -250.00 Grocery shopping");
    }

    #[test]
    fn test_missing_required_field_fails_decoding() {
        let complete = serde_json::json!({
            "id": 9, "user_id": 3, "amount": "250.00", "transaction_type": "EXPENSE",
            "account_id": 1, "category_id": 4, "description": "Grocery shopping",
            "transaction_date": "2024-03-01T00:00:00", "is_automated": false,
            "created_at": "2024-03-01T08:00:00", "updated_at": "2024-03-01T08:00:00"
        });
        assert!(serde_json::from_value::<Transaction>(complete.clone()).is_ok());

        for field in ["description", "is_automated"] {
            let mut json = complete.clone();
            json.as_object_mut().unwrap().remove(field);
            assert!(
                serde_json::from_value::<Transaction>(json).is_err(),
                "decoded without {}",
                field
            );
        }
    }

    #[test]
    fn test_lowercase_type_fails_decoding() {
        let json = r#"{"id": 9, "user_id": 3, "amount": "1", "transaction_type": "expense",
            "account_id": 1, "category_id": 4, "transaction_date": "2024-03-01",
            "created_at": "2024-03-01", "updated_at": "2024-03-01"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn test_create_from_form() {
        let create = TransactionCreate::from_form(
            "250.00",
            TransactionType::Expense,
            Some(AccountId::new(1)),
            Some(CategoryId::new(4)),
            " Grocery shopping ",
            "2024-03-01",
            today(),
        )
        .unwrap();

        let body = serde_json::to_value(&create).unwrap();
        assert_eq!(body["amount"], serde_json::json!(250.0));
        assert_eq!(body["transaction_type"], "EXPENSE");
        assert_eq!(body["account_id"], 1);
        assert_eq!(body["category_id"], 4);
        assert_eq!(body["description"], "Grocery shopping");
        assert_eq!(body["transaction_date"], "2024-03-01T00:00:00");
    }

    #[test]
    fn test_create_defaults_to_today() {
        let create = TransactionCreate::from_form(
            "10",
            TransactionType::Income,
            Some(AccountId::new(1)),
            Some(CategoryId::new(2)),
            "",
            "",
            today(),
        )
        .unwrap();
        assert_eq!(create.transaction_date.date(), today());
    }

    #[test]
    fn test_create_validation() {
        let acc = Some(AccountId::new(1));
        let cat = Some(CategoryId::new(1));
        let kind = TransactionType::Expense;

        assert_eq!(
            TransactionCreate::from_form("", kind, acc, cat, "", "", today()),
            Err(TransactionValidationError::MissingAmount)
        );
        assert!(matches!(
            TransactionCreate::from_form("12x", kind, acc, cat, "", "", today()),
            Err(TransactionValidationError::InvalidAmount(_))
        ));
        assert_eq!(
            TransactionCreate::from_form("0", kind, acc, cat, "", "", today()),
            Err(TransactionValidationError::NonPositiveAmount)
        );
        assert_eq!(
            TransactionCreate::from_form("5", kind, None, cat, "", "", today()),
            Err(TransactionValidationError::MissingAccount)
        );
        assert_eq!(
            TransactionCreate::from_form("5", kind, acc, None, "", "", today()),
            Err(TransactionValidationError::MissingCategory)
        );
        assert!(matches!(
            TransactionCreate::from_form("5", kind, acc, cat, "", "03/01/2024", today()),
            Err(TransactionValidationError::InvalidDate(_))
        ));
        assert_eq!(
            TransactionCreate::from_form("1.999", kind, acc, cat, "", "", today()),
            Err(TransactionValidationError::InvalidAmount("1.999".into()))
        );
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = TransactionUpdate {
            description: Some("Lunch".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"description":"Lunch"}"#
        );

        let update = TransactionUpdate {
            transaction_date: timestamp::parse("2024-03-02"),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"transaction_date":"2024-03-02T00:00:00"}"#
        );
    }

    #[test]
    fn test_filter_by_search_type_and_category() {
        let list = vec![
            txn(1, TransactionType::Expense, 25000, 4, "Grocery shopping"),
            txn(2, TransactionType::Income, 150000, 7, "Salary deposit"),
            txn(3, TransactionType::Expense, 4500, 5, "Uber ride"),
        ];

        let all = TransactionFilter::default();
        assert!(all.is_empty());
        assert_eq!(all.apply(&list).len(), 3);

        let search = TransactionFilter {
            search: "GROCERY".into(),
            ..Default::default()
        };
        assert_eq!(search.apply(&list)[0].id, TransactionId::new(1));

        let expenses = TransactionFilter {
            transaction_type: TypeFilter::Only(TransactionType::Expense),
            ..Default::default()
        };
        let ids: Vec<_> = expenses.apply(&list).iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);

        let combined = TransactionFilter {
            transaction_type: TypeFilter::Only(TransactionType::Expense),
            category_id: Some(CategoryId::new(7)),
            ..Default::default()
        };
        assert!(combined.apply(&list).is_empty());
    }

    #[test]
    fn test_type_filter_parse() {
        assert_eq!(TypeFilter::parse("ALL"), Some(TypeFilter::All));
        assert_eq!(
            TypeFilter::parse("income"),
            Some(TypeFilter::Only(TransactionType::Income))
        );
        assert_eq!(TypeFilter::parse("transfer"), None);
    }
}
