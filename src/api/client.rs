//! Typed accessors for every API endpoint
//!
//! Authorized calls read the bearer token from the [`SessionStore`] at call
//! time; without a session they fail with `NotAuthenticated` before anything
//! is sent. List queries and `whoami` go through a [`QueryCache`]; mutations
//! never touch the caches, so callers invalidate what a write made stale.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{AkibaError, AkibaResult};
use crate::models::{
    Account, AccountCreate, AccountId, AccountUpdate, Category, CategoryCreate, CategoryId,
    ErrorPayload, LoginRequest, Token, Transaction, TransactionCreate, TransactionId,
    TransactionUpdate, User, UserCreate,
};
use crate::storage::SessionStore;

use super::cache::{QueryCache, QueryKey, QueryStatus};
use super::request::{ApiRequest, ApiResponse};
use super::transport::Transport;

const ACCOUNTS: &str = "accounts";
const CATEGORIES: &str = "categories";
const TRANSACTIONS: &str = "transactions";
const WHOAMI: &str = "whoami";

/// `skip`/`limit` window over the transaction list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// The first `limit` items
    pub fn first(limit: u32) -> Self {
        Self { skip: 0, limit }
    }

    fn key(&self) -> QueryKey {
        QueryKey::new(TRANSACTIONS)
            .param("skip", self.skip)
            .param("limit", self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(100)
    }
}

/// Client for the Akiba REST API
pub struct ApiClient<T: Transport> {
    transport: Arc<T>,
    session: Arc<SessionStore>,
    accounts: QueryCache<Vec<Account>>,
    categories: QueryCache<Vec<Category>>,
    transactions: QueryCache<Vec<Transaction>>,
    whoami: QueryCache<User>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, session: Arc<SessionStore>) -> Self {
        Self {
            transport: Arc::new(transport),
            session,
            accounts: QueryCache::new(ACCOUNTS),
            categories: QueryCache::new(CATEGORIES),
            transactions: QueryCache::new(TRANSACTIONS),
            whoami: QueryCache::new(WHOAMI),
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Attach the session's bearer token, or refuse to build the request
    fn authorized(&self, request: ApiRequest) -> AkibaResult<ApiRequest> {
        match self.session.authorization_header()? {
            Some(header) => Ok(request.bearer(header)),
            None => {
                tracing::warn!(request = %request.label(), "blocked: not logged in");
                Err(AkibaError::NotAuthenticated)
            }
        }
    }

    // ----- auth -----

    /// Exchange credentials for a token (`POST /auth/login`, form-encoded)
    pub async fn login(&self, credentials: &LoginRequest) -> AkibaResult<Token> {
        let request = ApiRequest::post("/auth/login").form(credentials.form_fields());
        execute(&*self.transport, request, "Login failed").await
    }

    /// Create a user (`POST /auth/register`)
    pub async fn register(&self, user: &UserCreate) -> AkibaResult<User> {
        let request = ApiRequest::post("/auth/register").json(user)?;
        execute(&*self.transport, request, "Registration failed").await
    }

    /// Profile for an explicit token, used right after login before the
    /// session exists. Not cached.
    pub async fn whoami_with_token(&self, token: &str) -> AkibaResult<User> {
        let request = ApiRequest::get("/auth/whoami").bearer(format!("Bearer {}", token));
        execute(&*self.transport, request, "Failed to fetch user info").await
    }

    /// Profile of the session user (`GET /auth/whoami`), cached
    pub async fn whoami(&self) -> AkibaResult<Arc<User>> {
        let request = self.authorized(ApiRequest::get("/auth/whoami"))?;
        let transport = Arc::clone(&self.transport);
        self.whoami
            .fetch(QueryKey::new(WHOAMI), move || async move {
                execute(&*transport, request, "Failed to fetch user info").await
            })
            .await
    }

    // ----- accounts -----

    /// `GET /accounts/`, cached
    pub async fn list_accounts(&self) -> AkibaResult<Arc<Vec<Account>>> {
        let request = self.authorized(ApiRequest::get("/accounts/"))?;
        let transport = Arc::clone(&self.transport);
        self.accounts
            .fetch(QueryKey::new(ACCOUNTS), move || async move {
                execute(&*transport, request, "Failed to fetch accounts").await
            })
            .await
    }

    /// `GET /accounts/{id}`
    pub async fn get_account(&self, id: AccountId) -> AkibaResult<Account> {
        let request = self.authorized(ApiRequest::get(format!("/accounts/{}", id)))?;
        execute(&*self.transport, request, "Failed to fetch account").await
    }

    /// `POST /accounts/`
    pub async fn create_account(&self, account: &AccountCreate) -> AkibaResult<Account> {
        let request = self.authorized(ApiRequest::post("/accounts/").json(account)?)?;
        execute(&*self.transport, request, "Failed to create account").await
    }

    /// `PATCH /accounts/{id}`
    pub async fn update_account(
        &self,
        id: AccountId,
        update: &AccountUpdate,
    ) -> AkibaResult<Account> {
        let request =
            self.authorized(ApiRequest::patch(format!("/accounts/{}", id)).json(update)?)?;
        execute(&*self.transport, request, "Failed to update account").await
    }

    /// `DELETE /accounts/{id}`
    pub async fn delete_account(&self, id: AccountId) -> AkibaResult<()> {
        let request = self.authorized(ApiRequest::delete(format!("/accounts/{}", id)))?;
        execute_unit(&*self.transport, request, "Failed to delete account").await
    }

    // ----- categories -----

    /// `GET /categories`, cached
    pub async fn list_categories(&self) -> AkibaResult<Arc<Vec<Category>>> {
        let request = self.authorized(ApiRequest::get("/categories"))?;
        let transport = Arc::clone(&self.transport);
        self.categories
            .fetch(QueryKey::new(CATEGORIES), move || async move {
                execute(&*transport, request, "Failed to fetch categories").await
            })
            .await
    }

    /// `GET /categories/{id}`
    pub async fn get_category(&self, id: CategoryId) -> AkibaResult<Category> {
        let request = self.authorized(ApiRequest::get(format!("/categories/{}", id)))?;
        execute(&*self.transport, request, "Failed to fetch category").await
    }

    /// `POST /categories`
    pub async fn create_category(&self, category: &CategoryCreate) -> AkibaResult<Category> {
        let request = self.authorized(ApiRequest::post("/categories").json(category)?)?;
        execute(&*self.transport, request, "Failed to create category").await
    }

    // ----- transactions -----

    /// `GET /transactions?skip=&limit=`, cached per page
    pub async fn list_transactions(&self, page: Page) -> AkibaResult<Arc<Vec<Transaction>>> {
        let request = self.authorized(
            ApiRequest::get("/transactions")
                .query("skip", page.skip)
                .query("limit", page.limit),
        )?;
        let transport = Arc::clone(&self.transport);
        self.transactions
            .fetch(page.key(), move || async move {
                execute(&*transport, request, "Failed to fetch transactions").await
            })
            .await
    }

    /// `GET /transactions/{id}`
    pub async fn get_transaction(&self, id: TransactionId) -> AkibaResult<Transaction> {
        let request = self.authorized(ApiRequest::get(format!("/transactions/{}", id)))?;
        execute(&*self.transport, request, "Failed to fetch transaction").await
    }

    /// `POST /transactions`
    pub async fn create_transaction(
        &self,
        transaction: &TransactionCreate,
    ) -> AkibaResult<Transaction> {
        let request = self.authorized(ApiRequest::post("/transactions").json(transaction)?)?;
        execute(&*self.transport, request, "Failed to create transaction").await
    }

    /// `PATCH /transactions/{id}`
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> AkibaResult<Transaction> {
        let request = self
            .authorized(ApiRequest::patch(format!("/transactions/{}", id)).json(update)?)?;
        execute(&*self.transport, request, "Failed to update transaction").await
    }

    /// `DELETE /transactions/{id}`
    pub async fn delete_transaction(&self, id: TransactionId) -> AkibaResult<()> {
        let request = self.authorized(ApiRequest::delete(format!("/transactions/{}", id)))?;
        execute_unit(&*self.transport, request, "Failed to delete transaction").await
    }

    // ----- cache control -----

    pub fn accounts_status(&self) -> AkibaResult<QueryStatus<Vec<Account>>> {
        self.accounts.status(&QueryKey::new(ACCOUNTS))
    }

    pub fn categories_status(&self) -> AkibaResult<QueryStatus<Vec<Category>>> {
        self.categories.status(&QueryKey::new(CATEGORIES))
    }

    pub fn transactions_status(&self, page: Page) -> AkibaResult<QueryStatus<Vec<Transaction>>> {
        self.transactions.status(&page.key())
    }

    pub fn invalidate_accounts(&self) -> AkibaResult<()> {
        self.accounts.invalidate(&QueryKey::new(ACCOUNTS))
    }

    pub fn invalidate_categories(&self) -> AkibaResult<()> {
        self.categories.invalidate(&QueryKey::new(CATEGORIES))
    }

    /// Drops every cached transaction page
    pub fn invalidate_transactions(&self) -> AkibaResult<()> {
        self.transactions.clear()
    }

    pub fn invalidate_whoami(&self) -> AkibaResult<()> {
        self.whoami.invalidate(&QueryKey::new(WHOAMI))
    }

    /// Forget everything; used on logout so no data outlives the session
    pub fn clear_cache(&self) -> AkibaResult<()> {
        self.accounts.clear()?;
        self.categories.clear()?;
        self.transactions.clear()?;
        self.whoami.clear()
    }
}

/// Send a request and decode a 2xx body as `R`
async fn execute<T, R>(transport: &T, request: ApiRequest, failure: &str) -> AkibaResult<R>
where
    T: Transport,
    R: DeserializeOwned,
{
    let label = request.label();
    let response = transport.send(request).await?;
    let response = check_status(response, &label, failure)?;

    serde_json::from_slice(&response.body).map_err(|e| {
        tracing::error!(request = %label, "response did not match schema: {}", e);
        AkibaError::Decode {
            endpoint: label,
            message: e.to_string(),
        }
    })
}

/// Send a request whose success body is ignored
async fn execute_unit<T: Transport>(
    transport: &T,
    request: ApiRequest,
    failure: &str,
) -> AkibaResult<()> {
    let label = request.label();
    let response = transport.send(request).await?;
    check_status(response, &label, failure).map(|_| ())
}

fn check_status(response: ApiResponse, label: &str, failure: &str) -> AkibaResult<ApiResponse> {
    if response.is_success() {
        return Ok(response);
    }

    let payload = ErrorPayload::parse(&response.body);
    let message = payload.message.unwrap_or_else(|| failure.to_string());
    tracing::warn!(request = %label, status = response.status, "{}", message);

    Err(AkibaError::Api {
        status: response.status,
        message,
        details: payload.details,
    })
}
