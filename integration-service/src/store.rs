//! In-memory integration store.
//!
//! Integrations are kept ordered by name so listing can resume from a key.

use std::collections::BTreeMap;
use std::ops::Bound;

use common::errors::{AppError, AppResult};
use common::models::{IntegrationResource, IntegrationV1};
use tokio::sync::RwLock;

/// Stores integrations indexed by name.
#[derive(Default)]
pub struct IntegrationStore {
    items: RwLock<BTreeMap<String, IntegrationV1>>,
}

impl IntegrationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new integration.
    ///
    /// # Errors
    /// Returns `AppError::AlreadyExists` if the name is taken.
    pub async fn create(&self, ig: IntegrationV1) -> AppResult<IntegrationV1> {
        let mut items = self.items.write().await;
        if items.contains_key(ig.name()) {
            return Err(AppError::AlreadyExists(format!("integration {:?}", ig.name())));
        }
        items.insert(ig.name().to_string(), ig.clone());
        Ok(ig)
    }

    /// Fetches an integration by name.
    pub async fn get(&self, name: &str) -> AppResult<IntegrationV1> {
        self.items
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| not_found(name))
    }

    /// Replaces an existing integration.
    pub async fn update(&self, ig: IntegrationV1) -> AppResult<IntegrationV1> {
        let mut items = self.items.write().await;
        let slot = items.get_mut(ig.name()).ok_or_else(|| not_found(ig.name()))?;
        *slot = ig.clone();
        Ok(ig)
    }

    /// Removes an integration.
    pub async fn delete(&self, name: &str) -> AppResult<()> {
        self.items
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| not_found(name))
    }

    /// Lists up to `limit` integrations starting at `start_key` (inclusive).
    ///
    /// Returns the page and the key of the next page, empty when exhausted.
    pub async fn list(&self, limit: usize, start_key: &str) -> (Vec<IntegrationV1>, String) {
        let items = self.items.read().await;
        let start = if start_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start_key.to_string())
        };

        let mut range = items.range((start, Bound::Unbounded));
        let page: Vec<IntegrationV1> = range.by_ref().take(limit).map(|(_, ig)| ig.clone()).collect();
        let next_key = range.next().map(|(name, _)| name.clone()).unwrap_or_default();
        (page, next_key)
    }

    /// Number of stored integrations.
    pub async fn integration_count(&self) -> usize {
        self.items.read().await.len()
    }
}

fn not_found(name: &str) -> AppError {
    AppError::NotFound(format!("integration {name:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(names: &[&str]) -> IntegrationStore {
        let store = IntegrationStore::new();
        for name in names {
            store.create(IntegrationV1::new(*name, "test")).await.unwrap();
        }
        store
    }

    fn names(page: &[IntegrationV1]) -> Vec<&str> {
        page.iter().map(|ig| ig.name()).collect()
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates() {
        let store = seeded(&["a"]).await;
        let err = store.create(IntegrationV1::new("a", "test")).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(store.integration_count().await, 1);
    }

    #[tokio::test]
    async fn test_get_update_delete_unknown() {
        let store = IntegrationStore::new();
        assert!(matches!(store.get("x").await, Err(AppError::NotFound(_))));
        assert!(matches!(
            store.update(IntegrationV1::new("x", "test")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(store.delete("x").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_replaces() {
        let store = seeded(&["a"]).await;
        store.update(IntegrationV1::new("a", "other")).await.unwrap();
        assert_eq!(store.get("a").await.unwrap().sub_kind(), "other");
    }

    #[tokio::test]
    async fn test_list_pages_in_name_order() {
        let store = seeded(&["c", "a", "d", "b"]).await;

        let (page, next) = store.list(3, "").await;
        assert_eq!(names(&page), vec!["a", "b", "c"]);
        assert_eq!(next, "d");

        let (page, next) = store.list(3, &next).await;
        assert_eq!(names(&page), vec!["d"]);
        assert!(next.is_empty());
    }

    #[tokio::test]
    async fn test_list_exact_fit_has_no_next_key() {
        let store = seeded(&["a", "b"]).await;
        let (page, next) = store.list(2, "").await;
        assert_eq!(page.len(), 2);
        assert!(next.is_empty());
    }

    #[tokio::test]
    async fn test_list_start_key_between_names() {
        let store = seeded(&["a", "c"]).await;
        let (page, _) = store.list(10, "b").await;
        assert_eq!(names(&page), vec!["c"]);
    }
}
