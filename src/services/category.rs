//! Category service
//!
//! Lists system and custom categories and creates custom ones.

use std::sync::Arc;

use crate::api::{ApiClient, Transport};
use crate::error::{AkibaError, AkibaResult};
use crate::models::{Category, CategoryCreate, CategoryId};

/// Service for category management
pub struct CategoryService<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> CategoryService<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AkibaResult<Arc<Vec<Category>>> {
        self.client.list_categories().await
    }

    pub async fn get(&self, id: CategoryId) -> AkibaResult<Category> {
        self.client.get_category(id).await.map_err(|e| {
            if e.status() == Some(404) {
                AkibaError::category_not_found(id.to_string())
            } else {
                e
            }
        })
    }

    /// Find a category by name (case-insensitive) or ID string
    pub async fn find(&self, identifier: &str) -> AkibaResult<Category> {
        let categories = self.list().await?;
        let wanted = identifier.trim();

        if let Some(category) = categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(wanted))
        {
            return Ok(category.clone());
        }

        if let Ok(id) = wanted.parse::<CategoryId>() {
            if let Some(category) = categories.iter().find(|c| c.id == id) {
                return Ok(category.clone());
            }
        }

        Err(AkibaError::category_not_found(identifier))
    }

    /// Create a custom category
    pub async fn create(&self, name: &str, system_name: &str) -> AkibaResult<Category> {
        let form = CategoryCreate::from_form(name, system_name)
            .map_err(|e| AkibaError::Validation(e.to_string()))?;

        let category = self.client.create_category(&form).await?;
        self.client.invalidate_categories()?;

        tracing::info!(category = %category.id, name = %category.name, "category created");
        Ok(category)
    }
}
