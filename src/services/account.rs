//! Account service
//!
//! Validates account forms, submits them to the API and invalidates the
//! cached account list after every write.

use std::sync::Arc;

use crate::api::{ApiClient, Transport};
use crate::error::{AkibaError, AkibaResult};
use crate::models::{Account, AccountCreate, AccountId, AccountUpdate};

/// Service for account management
pub struct AccountService<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AccountService<'a, T> {
    /// Create a new account service
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// All accounts of the session user
    pub async fn list(&self) -> AkibaResult<Arc<Vec<Account>>> {
        self.client.list_accounts().await
    }

    /// Get an account by ID
    pub async fn get(&self, id: AccountId) -> AkibaResult<Account> {
        self.client.get_account(id).await.map_err(|e| {
            if e.status() == Some(404) {
                AkibaError::account_not_found(id.to_string())
            } else {
                e
            }
        })
    }

    /// Find an account by name (case-insensitive) or ID string
    pub async fn find(&self, identifier: &str) -> AkibaResult<Account> {
        let accounts = self.list().await?;

        if let Some(account) = accounts
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(identifier.trim()))
        {
            return Ok(account.clone());
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            if let Some(account) = accounts.iter().find(|a| a.id == id) {
                return Ok(account.clone());
            }
        }

        Err(AkibaError::account_not_found(identifier))
    }

    /// Create a new account from raw form input
    pub async fn create(
        &self,
        name: &str,
        initial_balance: &str,
        currency: &str,
        account_type: &str,
    ) -> AkibaResult<Account> {
        let form = AccountCreate::from_form(name, initial_balance, currency, account_type)
            .map_err(|e| AkibaError::Validation(e.to_string()))?;

        let account = self.client.create_account(&form).await?;
        self.client.invalidate_accounts()?;

        tracing::info!(account = %account.id, name = %account.name, "account created");
        Ok(account)
    }

    /// Update an account
    pub async fn update(&self, id: AccountId, update: &AccountUpdate) -> AkibaResult<Account> {
        if update.is_empty() {
            return Err(AkibaError::Validation("No changes specified".into()));
        }
        update
            .validate()
            .map_err(|e| AkibaError::Validation(e.to_string()))?;

        let account = self.client.update_account(id, update).await?;
        self.client.invalidate_accounts()?;
        Ok(account)
    }

    /// Delete an account
    pub async fn delete(&self, id: AccountId) -> AkibaResult<()> {
        self.client.delete_account(id).await?;

        // The server may drop the account's transactions with it
        self.client.invalidate_accounts()?;
        self.client.invalidate_transactions()?;

        tracing::info!(account = %id, "account deleted");
        Ok(())
    }
}
