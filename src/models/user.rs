//! User and authentication contracts
//!
//! Shapes exchanged with the `/auth` endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;
use super::timestamp;

/// The authenticated user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub active: bool,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

impl User {
    /// First and last name joined
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Name used in greetings, falling back to "User"
    pub fn greeting_name(&self) -> &str {
        if self.first_name.trim().is_empty() {
            "User"
        } else {
            &self.first_name
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.full_name(), self.email)
    }
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
}

impl UserCreate {
    /// Every field is required
    pub fn validate(&self) -> Result<(), UserValidationError> {
        let fields = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("password", &self.password),
            ("phone number", &self.phone_number),
        ];

        for (label, value) in fields {
            if value.trim().is_empty() {
                return Err(UserValidationError::MissingField(label));
            }
        }

        if !self.email.contains('@') {
            return Err(UserValidationError::InvalidEmail(self.email.clone()));
        }

        Ok(())
    }
}

/// Access token returned by `/auth/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Credentials for the OAuth2 password flow, sent form-encoded
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub grant_type: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            grant_type: "password".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.username.trim().is_empty() {
            return Err(UserValidationError::MissingField("username"));
        }
        if self.password.is_empty() {
            return Err(UserValidationError::MissingField("password"));
        }
        Ok(())
    }

    /// Form fields in wire order
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.username.trim().to_string()),
            ("password".to_string(), self.password.clone()),
            ("grant_type".to_string(), self.grant_type.clone()),
        ]
    }
}

/// Validation errors for auth forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    MissingField(&'static str),
    InvalidEmail(String),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Please fill in the {} field", field),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
        }
    }
}

impl std::error::Error for UserValidationError {}
