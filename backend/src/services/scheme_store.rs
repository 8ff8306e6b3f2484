//! # Scheme Store
//!
//! The persistence contract consumed by the REST API.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::DatabaseError;
use crate::models::Scheme;

/// Errors that can occur in store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No scheme has the given id.
    #[error("Scheme not found with id: {0}")]
    NotFound(i32),

    /// An update payload did not carry `schemeId`.
    #[error("Scheme id is required to update a scheme")]
    MissingId,

    /// Every positive `i32` id has already been handed out.
    #[error("No scheme ids left to assign")]
    IdsExhausted,

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// CRUD and filtered lookups over [`Scheme`] records.
///
/// Implementations assign ids on insert and enforce existence. List
/// operations return schemes ordered by id ascending. Filters are exact,
/// case-sensitive matches.
#[async_trait]
pub trait SchemeStore: Send + Sync {
    /// Persist a new scheme. Any `scheme_id` in the input is ignored.
    async fn add_scheme(&self, scheme: Scheme) -> Result<Scheme, StoreError>;

    /// Replace the scheme whose id matches `scheme.scheme_id`.
    async fn update_scheme(&self, scheme: Scheme) -> Result<Scheme, StoreError>;

    /// Look up one scheme.
    async fn view_scheme(&self, scheme_id: i32) -> Result<Scheme, StoreError>;

    async fn view_all_schemes(&self) -> Result<Vec<Scheme>, StoreError>;

    /// Remove a scheme and return it as it was.
    async fn delete_scheme(&self, scheme_id: i32) -> Result<Scheme, StoreError>;

    async fn view_schemes_by_type(&self, scheme_type: &str) -> Result<Vec<Scheme>, StoreError>;

    async fn view_schemes_by_launch_date(
        &self,
        scheme_launch_date: NaiveDate,
    ) -> Result<Vec<Scheme>, StoreError>;

    async fn view_schemes_by_eligibility(
        &self,
        scheme_eligibility: &str,
    ) -> Result<Vec<Scheme>, StoreError>;

    /// Whether the backing storage is reachable.
    async fn is_healthy(&self) -> bool;
}
