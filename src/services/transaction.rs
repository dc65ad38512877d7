//! Transaction service
//!
//! Listing with client-side filtering, and the add/update/delete flows.
//! Writes that move money also invalidate the account list, since the
//! server recomputes balances.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::api::{ApiClient, Page, Transport};
use crate::error::{AkibaError, AkibaResult};
use crate::models::{
    AccountId, CategoryId, Transaction, TransactionCreate, TransactionFilter, TransactionId,
    TransactionType, TransactionUpdate,
};

/// Raw input of the add-transaction form
#[derive(Debug, Clone)]
pub struct TransactionForm<'a> {
    pub amount: &'a str,
    pub transaction_type: TransactionType,
    pub account_id: Option<AccountId>,
    pub category_id: Option<CategoryId>,
    pub description: &'a str,
    /// Empty means today
    pub date: &'a str,
}

/// Service for transaction management
pub struct TransactionService<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> TransactionService<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// One page of transactions, as the server orders them
    pub async fn list(&self, page: Page) -> AkibaResult<Arc<Vec<Transaction>>> {
        self.client.list_transactions(page).await
    }

    /// One page of transactions, narrowed by `filter`
    pub async fn list_filtered(
        &self,
        page: Page,
        filter: &TransactionFilter,
    ) -> AkibaResult<Vec<Transaction>> {
        let transactions = self.list(page).await?;
        Ok(filter.apply(&transactions).into_iter().cloned().collect())
    }

    pub async fn get(&self, id: TransactionId) -> AkibaResult<Transaction> {
        self.client.get_transaction(id).await.map_err(|e| {
            if e.status() == Some(404) {
                AkibaError::transaction_not_found(id.to_string())
            } else {
                e
            }
        })
    }

    /// Record a transaction dated today unless the form says otherwise
    pub async fn create(&self, form: &TransactionForm<'_>) -> AkibaResult<Transaction> {
        self.create_on(form, Local::now().date_naive()).await
    }

    /// Record a transaction, with `today` as the default date
    pub async fn create_on(
        &self,
        form: &TransactionForm<'_>,
        today: NaiveDate,
    ) -> AkibaResult<Transaction> {
        let payload = TransactionCreate::from_form(
            form.amount,
            form.transaction_type,
            form.account_id,
            form.category_id,
            form.description,
            form.date,
            today,
        )
        .map_err(|e| AkibaError::Validation(e.to_string()))?;

        let transaction = self.client.create_transaction(&payload).await?;
        self.invalidate_after_write()?;

        tracing::info!(
            transaction = %transaction.id,
            amount = %transaction.amount,
            "transaction created"
        );
        Ok(transaction)
    }

    pub async fn update(
        &self,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> AkibaResult<Transaction> {
        if update.is_empty() {
            return Err(AkibaError::Validation("No changes specified".into()));
        }

        let transaction = self.client.update_transaction(id, update).await?;
        self.client.invalidate_transactions()?;
        Ok(transaction)
    }

    pub async fn delete(&self, id: TransactionId) -> AkibaResult<()> {
        self.client.delete_transaction(id).await?;
        self.invalidate_after_write()?;
        tracing::info!(transaction = %id, "transaction deleted");
        Ok(())
    }

    fn invalidate_after_write(&self) -> AkibaResult<()> {
        self.client.invalidate_transactions()?;
        self.client.invalidate_accounts()
    }
}
