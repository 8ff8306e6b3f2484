//! # Database Models
//!
//! Structs that map to rows of the `schemes` table.
//!
//! | Column | SQL type | Rust type |
//! |--------|----------|-----------|
//! | scheme_id | SERIAL (PK) | i32 |
//! | scheme_name | TEXT | String |
//! | scheme_type | TEXT | String |
//! | scheme_launch_date | DATE | NaiveDate |
//! | scheme_eligibility | TEXT | String |
//! | scheme_description | TEXT NULL | Option<String> |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Scheme;

/// A persisted scheme row.
///
/// Unlike the API model the id is always present here: a row only exists
/// once PostgreSQL has assigned its `SERIAL` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeRecord {
    pub scheme_id: i32,
    pub scheme_name: String,
    pub scheme_type: String,
    pub scheme_launch_date: NaiveDate,
    pub scheme_eligibility: String,
    pub scheme_description: Option<String>,
}

impl From<SchemeRecord> for Scheme {
    fn from(record: SchemeRecord) -> Self {
        Self {
            scheme_id: Some(record.scheme_id),
            scheme_name: record.scheme_name,
            scheme_type: record.scheme_type,
            scheme_launch_date: record.scheme_launch_date,
            scheme_eligibility: record.scheme_eligibility,
            scheme_description: record.scheme_description,
        }
    }
}
