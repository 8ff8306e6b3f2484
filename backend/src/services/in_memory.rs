//! # In-Memory Scheme Store
//!
//! `SchemeStore` over a `BTreeMap` guarded by a tokio `RwLock`. Used by the
//! handler tests and by `SCHEME_STORE=memory` for running without
//! PostgreSQL. Nothing survives a restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::Scheme;

use super::{SchemeStore, StoreError};

#[derive(Default)]
struct Inner {
    /// Last id handed out; ids start at 1 like a `SERIAL` column.
    last_id: i32,
    schemes: BTreeMap<i32, Scheme>,
}

/// Thread-safe in-memory scheme store.
///
/// Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct InMemorySchemeStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemorySchemeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn filter<F>(&self, predicate: F) -> Vec<Scheme>
    where
        F: Fn(&Scheme) -> bool + Send,
    {
        self.inner
            .read()
            .await
            .schemes
            .values()
            .filter(|scheme| predicate(scheme))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SchemeStore for InMemorySchemeStore {
    async fn add_scheme(&self, mut scheme: Scheme) -> Result<Scheme, StoreError> {
        let mut inner = self.inner.write().await;
        let scheme_id = inner
            .last_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;
        inner.last_id = scheme_id;

        scheme.scheme_id = Some(scheme_id);
        inner.schemes.insert(scheme_id, scheme.clone());

        debug!("Stored scheme {} in memory", scheme_id);
        Ok(scheme)
    }

    async fn update_scheme(&self, scheme: Scheme) -> Result<Scheme, StoreError> {
        let scheme_id = scheme.scheme_id.ok_or(StoreError::MissingId)?;
        let mut inner = self.inner.write().await;

        match inner.schemes.get_mut(&scheme_id) {
            Some(existing) => {
                *existing = scheme.clone();
                Ok(scheme)
            }
            None => Err(StoreError::NotFound(scheme_id)),
        }
    }

    async fn view_scheme(&self, scheme_id: i32) -> Result<Scheme, StoreError> {
        self.inner
            .read()
            .await
            .schemes
            .get(&scheme_id)
            .cloned()
            .ok_or(StoreError::NotFound(scheme_id))
    }

    async fn view_all_schemes(&self) -> Result<Vec<Scheme>, StoreError> {
        Ok(self.filter(|_| true).await)
    }

    async fn delete_scheme(&self, scheme_id: i32) -> Result<Scheme, StoreError> {
        self.inner
            .write()
            .await
            .schemes
            .remove(&scheme_id)
            .ok_or(StoreError::NotFound(scheme_id))
    }

    async fn view_schemes_by_type(&self, scheme_type: &str) -> Result<Vec<Scheme>, StoreError> {
        Ok(self.filter(|s| s.scheme_type == scheme_type).await)
    }

    async fn view_schemes_by_launch_date(
        &self,
        scheme_launch_date: NaiveDate,
    ) -> Result<Vec<Scheme>, StoreError> {
        Ok(self
            .filter(|s| s.scheme_launch_date == scheme_launch_date)
            .await)
    }

    async fn view_schemes_by_eligibility(
        &self,
        scheme_eligibility: &str,
    ) -> Result<Vec<Scheme>, StoreError> {
        Ok(self
            .filter(|s| s.scheme_eligibility == scheme_eligibility)
            .await)
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme(name: &str, scheme_type: &str, date: (i32, u32, u32), eligibility: &str) -> Scheme {
        Scheme {
            scheme_id: None,
            scheme_name: name.to_string(),
            scheme_type: scheme_type.to_string(),
            scheme_launch_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            scheme_eligibility: eligibility.to_string(),
            scheme_description: None,
        }
    }

    #[tokio::test]
    async fn test_add_assigns_sequential_ids_and_ignores_input_id() {
        let store = InMemorySchemeStore::new();

        let mut first = scheme("Old Age Pension", "Pension", (2023, 5, 1), "Senior");
        first.scheme_id = Some(99);
        let first = store.add_scheme(first).await.unwrap();
        let second = store
            .add_scheme(scheme("Kisan Credit", "Agriculture", (2024, 1, 1), "Farmer"))
            .await
            .unwrap();

        assert_eq!(first.scheme_id, Some(1));
        assert_eq!(second.scheme_id, Some(2));
        assert_eq!(store.view_all_schemes().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = InMemorySchemeStore::new();
        let first = store
            .add_scheme(scheme("A", "Pension", (2023, 5, 1), "Senior"))
            .await
            .unwrap();
        store.delete_scheme(first.scheme_id.unwrap()).await.unwrap();

        let second = store
            .add_scheme(scheme("B", "Pension", (2023, 5, 1), "Senior"))
            .await
            .unwrap();
        assert_eq!(second.scheme_id, Some(2));
    }

    #[tokio::test]
    async fn test_add_fails_cleanly_when_ids_run_out() {
        let store = InMemorySchemeStore::new();
        store.inner.write().await.last_id = i32::MAX;

        let result = store
            .add_scheme(scheme("A", "Pension", (2023, 5, 1), "Senior"))
            .await;

        assert!(matches!(result, Err(StoreError::IdsExhausted)));
        assert!(store.view_all_schemes().await.unwrap().is_empty());
        assert_eq!(store.inner.read().await.last_id, i32::MAX);
    }

    #[tokio::test]
    async fn test_update_requires_existing_id() {
        let store = InMemorySchemeStore::new();

        let missing_id = store
            .update_scheme(scheme("A", "Pension", (2023, 5, 1), "Senior"))
            .await;
        assert!(matches!(missing_id, Err(StoreError::MissingId)));

        let mut unknown = scheme("A", "Pension", (2023, 5, 1), "Senior");
        unknown.scheme_id = Some(42);
        assert!(matches!(
            store.update_scheme(unknown).await,
            Err(StoreError::NotFound(42))
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = InMemorySchemeStore::new();
        let mut stored = store
            .add_scheme(scheme("A", "Pension", (2023, 5, 1), "Senior"))
            .await
            .unwrap();

        stored.scheme_eligibility = "Widow".to_string();
        store.update_scheme(stored.clone()).await.unwrap();

        let reloaded = store.view_scheme(stored.scheme_id.unwrap()).await.unwrap();
        assert_eq!(reloaded.scheme_eligibility, "Widow");
    }

    #[tokio::test]
    async fn test_filters_are_exact_and_ordered_by_id() {
        let store = InMemorySchemeStore::new();
        store
            .add_scheme(scheme("A", "Pension", (2023, 5, 1), "Senior"))
            .await
            .unwrap();
        store
            .add_scheme(scheme("B", "pension", (2024, 1, 1), "Senior"))
            .await
            .unwrap();
        store
            .add_scheme(scheme("C", "Pension", (2024, 1, 1), "Farmer"))
            .await
            .unwrap();

        let by_type = store.view_schemes_by_type("Pension").await.unwrap();
        let names: Vec<_> = by_type.iter().map(|s| s.scheme_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);

        let by_date = store
            .view_schemes_by_launch_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(by_date.len(), 2);

        let by_eligibility = store.view_schemes_by_eligibility("Senior").await.unwrap();
        assert_eq!(by_eligibility.len(), 2);
        assert!(store.view_schemes_by_eligibility("Nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_scheme() {
        let store = InMemorySchemeStore::new();
        let stored = store
            .add_scheme(scheme("A", "Pension", (2023, 5, 1), "Senior"))
            .await
            .unwrap();
        let id = stored.scheme_id.unwrap();

        assert_eq!(store.delete_scheme(id).await.unwrap(), stored);
        assert!(matches!(store.view_scheme(id).await, Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete_scheme(id).await, Err(StoreError::NotFound(_))));
    }
}
