//! # Database Queries
//!
//! SQL for the `schemes` table. Each function checks a client out of the
//! pool, runs one statement and maps the rows.
//!
//! ## Error Handling
//!
//! All queries return `Result<T, DatabaseError>`. A missing row is not an
//! error at this level: single-row lookups and writes return `Option`.

use chrono::NaiveDate;
use deadpool_postgres::{Client, Pool};
use tokio_postgres::Row;
use tracing::{debug, info};

use super::models::SchemeRecord;
use super::DatabaseError;

// ============================================
// HELPER FUNCTIONS
// ============================================

const SCHEME_COLUMNS: &str = "scheme_id, scheme_name, scheme_type, scheme_launch_date, \
                              scheme_eligibility, scheme_description";

/// Helper to convert a database row to SchemeRecord
fn row_to_scheme(row: &Row) -> Result<SchemeRecord, DatabaseError> {
    Ok(SchemeRecord {
        scheme_id: row.try_get("scheme_id")?,
        scheme_name: row.try_get("scheme_name")?,
        scheme_type: row.try_get("scheme_type")?,
        scheme_launch_date: row.try_get("scheme_launch_date")?,
        scheme_eligibility: row.try_get("scheme_eligibility")?,
        scheme_description: row.try_get("scheme_description")?,
    })
}

fn rows_to_schemes(rows: &[Row]) -> Result<Vec<SchemeRecord>, DatabaseError> {
    rows.iter().map(row_to_scheme).collect()
}

async fn client(pool: &Pool) -> Result<Client, DatabaseError> {
    pool.get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))
}

// ============================================
// WRITES
// ============================================

/// Insert a scheme and return the stored row with its new id.
pub async fn insert_scheme(
    pool: &Pool,
    scheme_name: &str,
    scheme_type: &str,
    scheme_launch_date: NaiveDate,
    scheme_eligibility: &str,
    scheme_description: Option<&str>,
) -> Result<SchemeRecord, DatabaseError> {
    debug!("Inserting scheme: {} ({})", scheme_name, scheme_type);

    let client = client(pool).await?;
    let sql = format!(
        r#"
        INSERT INTO schemes (
            scheme_name, scheme_type, scheme_launch_date,
            scheme_eligibility, scheme_description
        )
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {}
        "#,
        SCHEME_COLUMNS
    );

    let row = client
        .query_one(
            sql.as_str(),
            &[
                &scheme_name,
                &scheme_type,
                &scheme_launch_date,
                &scheme_eligibility,
                &scheme_description,
            ],
        )
        .await?;

    let record = row_to_scheme(&row)?;
    info!("Scheme inserted with id: {}", record.scheme_id);
    Ok(record)
}

/// Overwrite every column of an existing scheme.
///
/// Returns `None` when no row has `scheme_id`.
pub async fn update_scheme(
    pool: &Pool,
    record: &SchemeRecord,
) -> Result<Option<SchemeRecord>, DatabaseError> {
    debug!("Updating scheme: {}", record.scheme_id);

    let client = client(pool).await?;
    let sql = format!(
        r#"
        UPDATE schemes
        SET
            scheme_name = $2,
            scheme_type = $3,
            scheme_launch_date = $4,
            scheme_eligibility = $5,
            scheme_description = $6
        WHERE scheme_id = $1
        RETURNING {}
        "#,
        SCHEME_COLUMNS
    );

    let row = client
        .query_opt(
            sql.as_str(),
            &[
                &record.scheme_id,
                &record.scheme_name,
                &record.scheme_type,
                &record.scheme_launch_date,
                &record.scheme_eligibility,
                &record.scheme_description,
            ],
        )
        .await?;

    row.as_ref().map(row_to_scheme).transpose()
}

/// Delete a scheme, returning the row as it was before removal.
pub async fn delete_scheme(
    pool: &Pool,
    scheme_id: i32,
) -> Result<Option<SchemeRecord>, DatabaseError> {
    debug!("Deleting scheme: {}", scheme_id);

    let client = client(pool).await?;
    let sql = format!(
        "DELETE FROM schemes WHERE scheme_id = $1 RETURNING {}",
        SCHEME_COLUMNS
    );

    let row = client.query_opt(sql.as_str(), &[&scheme_id]).await?;
    row.as_ref().map(row_to_scheme).transpose()
}

// ============================================
// READS
// ============================================

/// Get a scheme by id.
pub async fn get_scheme_by_id(
    pool: &Pool,
    scheme_id: i32,
) -> Result<Option<SchemeRecord>, DatabaseError> {
    debug!("Fetching scheme: {}", scheme_id);

    let client = client(pool).await?;
    let sql = format!("SELECT {} FROM schemes WHERE scheme_id = $1", SCHEME_COLUMNS);

    let row = client.query_opt(sql.as_str(), &[&scheme_id]).await?;
    row.as_ref().map(row_to_scheme).transpose()
}

/// Get every scheme, ordered by id.
pub async fn get_all_schemes(pool: &Pool) -> Result<Vec<SchemeRecord>, DatabaseError> {
    debug!("Fetching all schemes");

    let client = client(pool).await?;
    let sql = format!("SELECT {} FROM schemes ORDER BY scheme_id", SCHEME_COLUMNS);

    let rows = client.query(sql.as_str(), &[]).await?;
    rows_to_schemes(&rows)
}

/// Get schemes with an exact `scheme_type` match.
pub async fn get_schemes_by_type(
    pool: &Pool,
    scheme_type: &str,
) -> Result<Vec<SchemeRecord>, DatabaseError> {
    debug!("Fetching schemes by type: {}", scheme_type);

    let client = client(pool).await?;
    let sql = format!(
        "SELECT {} FROM schemes WHERE scheme_type = $1 ORDER BY scheme_id",
        SCHEME_COLUMNS
    );

    let rows = client.query(sql.as_str(), &[&scheme_type]).await?;
    rows_to_schemes(&rows)
}

/// Get schemes launched on the given date.
pub async fn get_schemes_by_launch_date(
    pool: &Pool,
    scheme_launch_date: NaiveDate,
) -> Result<Vec<SchemeRecord>, DatabaseError> {
    debug!("Fetching schemes by launch date: {}", scheme_launch_date);

    let client = client(pool).await?;
    let sql = format!(
        "SELECT {} FROM schemes WHERE scheme_launch_date = $1 ORDER BY scheme_id",
        SCHEME_COLUMNS
    );

    let rows = client.query(sql.as_str(), &[&scheme_launch_date]).await?;
    rows_to_schemes(&rows)
}

/// Get schemes with an exact `scheme_eligibility` match.
pub async fn get_schemes_by_eligibility(
    pool: &Pool,
    scheme_eligibility: &str,
) -> Result<Vec<SchemeRecord>, DatabaseError> {
    debug!("Fetching schemes by eligibility: {}", scheme_eligibility);

    let client = client(pool).await?;
    let sql = format!(
        "SELECT {} FROM schemes WHERE scheme_eligibility = $1 ORDER BY scheme_id",
        SCHEME_COLUMNS
    );

    let rows = client.query(sql.as_str(), &[&scheme_eligibility]).await?;
    rows_to_schemes(&rows)
}
