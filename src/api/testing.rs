//! In-memory transport and JSON fixtures for tests

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::error::AkibaError;

use super::request::{ApiRequest, ApiResponse, Method};
use super::transport::Transport;

/// Answers requests from canned responses and records what it was sent
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<(Method, String), ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and a JSON body
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, body.to_string());
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), ApiResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AkibaError> {
        let key = (request.method, request.path.clone());
        self.requests.lock().unwrap().push(request);

        // Give concurrent callers a chance to observe the request in flight
        tokio::task::yield_now().await;

        self.routes
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| AkibaError::Transport(format!("no route for {} {}", key.0, key.1)))
    }
}

pub fn user_json() -> Value {
    json!({
        "id": 3,
        "first_name": "Amani",
        "last_name": "Otieno",
        "email": "amani@example.com",
        "phone_number": "+254700000000",
        "active": true,
        "created_at": "2024-01-05T10:00:00",
        "updated_at": "2024-01-05T10:00:00"
    })
}

pub fn account_json(id: i64, name: &str, balance: &str) -> Value {
    json!({
        "id": id,
        "user_id": 3,
        "name": name,
        "initial_balance": balance,
        "current_balance": balance,
        "currency": "KES",
        "type": "checking",
        "is_active": true,
        "created_by": 3,
        "updated_by": 3,
        "created_at": "2024-01-05T10:00:00",
        "updated_at": "2024-01-05T10:00:00"
    })
}

pub fn category_json(id: i64, name: &str, system_name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "system_name": system_name,
        "is_custom": false,
        "user_id": null
    })
}

pub fn transaction_json(
    id: i64,
    amount: &str,
    transaction_type: &str,
    category_id: i64,
    description: &str,
) -> Value {
    json!({
        "id": id,
        "user_id": 3,
        "amount": amount,
        "transaction_type": transaction_type,
        "account_id": 1,
        "category_id": category_id,
        "description": description,
        "transaction_date": "2024-03-01T00:00:00",
        "is_automated": false,
        "raw_text": null,
        "created_at": "2024-03-01T08:00:00",
        "updated_at": "2024-03-01T08:00:00"
    })
}

pub fn validation_error_json(field: &str, msg: &str) -> Value {
    json!({
        "detail": [
            {"loc": ["body", field], "msg": msg, "type": "value_error"}
        ]
    })
}
