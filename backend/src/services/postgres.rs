//! # PostgreSQL Scheme Store
//!
//! `SchemeStore` backed by the `schemes` table. Each method is one query
//! from `db::queries`; missing rows become `StoreError::NotFound`.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::db::queries;
use crate::db::{Database, SchemeRecord};
use crate::models::Scheme;

use super::{SchemeStore, StoreError};

/// Scheme store over a PostgreSQL connection pool.
///
/// ## Usage
///
/// ```rust,ignore
/// let db = Database::connect(&url, 10).await?;
/// db.run_migrations().await?;
/// let store = PostgresSchemeStore::new(db);
/// let scheme = store.view_scheme(7).await?;
/// ```
#[derive(Clone)]
pub struct PostgresSchemeStore {
    db: Database,
}

impl PostgresSchemeStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn into_schemes(records: Vec<SchemeRecord>) -> Vec<Scheme> {
    records.into_iter().map(Scheme::from).collect()
}

#[async_trait]
impl SchemeStore for PostgresSchemeStore {
    async fn add_scheme(&self, scheme: Scheme) -> Result<Scheme, StoreError> {
        if let Some(id) = scheme.scheme_id {
            debug!("Ignoring client-supplied scheme id {} on insert", id);
        }

        let record = queries::insert_scheme(
            self.db.pool(),
            &scheme.scheme_name,
            &scheme.scheme_type,
            scheme.scheme_launch_date,
            &scheme.scheme_eligibility,
            scheme.scheme_description.as_deref(),
        )
        .await?;

        Ok(record.into())
    }

    async fn update_scheme(&self, scheme: Scheme) -> Result<Scheme, StoreError> {
        let scheme_id = scheme.scheme_id.ok_or(StoreError::MissingId)?;
        let record = SchemeRecord {
            scheme_id,
            scheme_name: scheme.scheme_name,
            scheme_type: scheme.scheme_type,
            scheme_launch_date: scheme.scheme_launch_date,
            scheme_eligibility: scheme.scheme_eligibility,
            scheme_description: scheme.scheme_description,
        };

        queries::update_scheme(self.db.pool(), &record)
            .await?
            .map(Scheme::from)
            .ok_or(StoreError::NotFound(scheme_id))
    }

    async fn view_scheme(&self, scheme_id: i32) -> Result<Scheme, StoreError> {
        queries::get_scheme_by_id(self.db.pool(), scheme_id)
            .await?
            .map(Scheme::from)
            .ok_or(StoreError::NotFound(scheme_id))
    }

    async fn view_all_schemes(&self) -> Result<Vec<Scheme>, StoreError> {
        let records = queries::get_all_schemes(self.db.pool()).await?;
        Ok(into_schemes(records))
    }

    async fn delete_scheme(&self, scheme_id: i32) -> Result<Scheme, StoreError> {
        queries::delete_scheme(self.db.pool(), scheme_id)
            .await?
            .map(Scheme::from)
            .ok_or(StoreError::NotFound(scheme_id))
    }

    async fn view_schemes_by_type(&self, scheme_type: &str) -> Result<Vec<Scheme>, StoreError> {
        let records = queries::get_schemes_by_type(self.db.pool(), scheme_type).await?;
        Ok(into_schemes(records))
    }

    async fn view_schemes_by_launch_date(
        &self,
        scheme_launch_date: NaiveDate,
    ) -> Result<Vec<Scheme>, StoreError> {
        let records =
            queries::get_schemes_by_launch_date(self.db.pool(), scheme_launch_date).await?;
        Ok(into_schemes(records))
    }

    async fn view_schemes_by_eligibility(
        &self,
        scheme_eligibility: &str,
    ) -> Result<Vec<Scheme>, StoreError> {
        let records =
            queries::get_schemes_by_eligibility(self.db.pool(), scheme_eligibility).await?;
        Ok(into_schemes(records))
    }

    async fn is_healthy(&self) -> bool {
        match self.db.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        }
    }
}

// Needs a live database:
// DATABASE_URL=postgres://localhost/scheme_test cargo test -- --ignored
#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    async fn connect() -> Option<PostgresSchemeStore> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let db = Database::connect(&url, 2).await.unwrap();
        db.run_migrations().await.unwrap();
        Some(PostgresSchemeStore::new(db))
    }

    fn scheme(name: &str, scheme_type: &str, eligibility: &str) -> Scheme {
        Scheme {
            scheme_id: None,
            scheme_name: name.to_string(),
            scheme_type: scheme_type.to_string(),
            scheme_launch_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            scheme_eligibility: eligibility.to_string(),
            scheme_description: Some("integration".to_string()),
        }
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_crud_round_trip_against_postgres() {
        let Some(store) = connect().await else {
            return;
        };
        assert!(store.is_healthy().await);

        // Unique per run so rows left by other runs don't match the filters.
        let tag = format!("type-{}", Utc::now().timestamp_micros());
        let eligibility = format!("elig-{}", tag);

        let mut input = scheme("First", &tag, &eligibility);
        input.scheme_id = Some(-1);
        let first = store.add_scheme(input).await.unwrap();
        let second = store
            .add_scheme(scheme("Second", &tag, &eligibility))
            .await
            .unwrap();

        let first_id = first.scheme_id.unwrap();
        let second_id = second.scheme_id.unwrap();
        assert!(first_id > 0);
        assert!(second_id > first_id);
        assert_eq!(first.scheme_description.as_deref(), Some("integration"));

        assert_eq!(store.view_scheme(first_id).await.unwrap(), first);

        let by_type = store.view_schemes_by_type(&tag).await.unwrap();
        assert_eq!(by_type, vec![first.clone(), second.clone()]);

        let all_ids: Vec<i32> = store
            .view_all_schemes()
            .await
            .unwrap()
            .iter()
            .filter_map(|s| s.scheme_id)
            .collect();
        assert!(all_ids.windows(2).all(|w| w[0] < w[1]));
        assert!(all_ids.contains(&first_id) && all_ids.contains(&second_id));

        let by_date = store
            .view_schemes_by_launch_date(first.scheme_launch_date)
            .await
            .unwrap();
        assert!(by_date.iter().any(|s| s.scheme_id == Some(second_id)));

        let mut changed = first.clone();
        changed.scheme_eligibility = format!("{}-updated", eligibility);
        changed.scheme_description = None;
        assert_eq!(store.update_scheme(changed.clone()).await.unwrap(), changed);
        assert_eq!(
            store.view_schemes_by_eligibility(&eligibility).await.unwrap(),
            vec![second.clone()]
        );

        let mut missing = changed.clone();
        missing.scheme_id = None;
        assert!(matches!(
            store.update_scheme(missing).await,
            Err(StoreError::MissingId)
        ));

        assert_eq!(store.delete_scheme(first_id).await.unwrap(), changed);
        assert!(matches!(
            store.view_scheme(first_id).await,
            Err(StoreError::NotFound(id)) if id == first_id
        ));
        assert!(matches!(
            store.delete_scheme(first_id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.update_scheme(changed).await,
            Err(StoreError::NotFound(id)) if id == first_id
        ));

        store.delete_scheme(second_id).await.unwrap();
    }
}
