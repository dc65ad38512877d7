//! Error bodies returned by the API on 4xx responses
//!
//! FastAPI-style services send either `{"detail": [{loc, msg, type}, ...]}`
//! for request validation failures or `{"detail": "message"}` for handled
//! errors.

use serde::{Deserialize, Serialize};

/// One entry of a structured validation failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationDetail {
    /// Path to the offending field; segments may be strings or indexes
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ValidationDetail {
    /// Field path joined with dots, e.g. "body.amount"
    pub fn location(&self) -> String {
        self.loc
            .iter()
            .map(|segment| match segment {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Detail {
    Entries(Vec<ValidationDetail>),
    Message(String),
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    detail: Detail,
}

/// What could be recovered from an error response body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorPayload {
    /// First human-readable message, if any
    pub message: Option<String>,
    /// All structured entries
    pub details: Vec<ValidationDetail>,
}

impl ErrorPayload {
    /// Parse an error body; bodies of any other shape yield an empty payload
    pub fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody {
                detail: Detail::Entries(details),
            }) => Self {
                message: details.first().map(|d| d.msg.clone()),
                details,
            },
            Ok(ErrorBody {
                detail: Detail::Message(message),
            }) => Self {
                message: Some(message),
                details: Vec::new(),
            },
            Err(_) => Self::default(),
        }
    }
}
