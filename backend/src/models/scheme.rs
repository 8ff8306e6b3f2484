//! # Scheme Resource
//!
//! The single resource exposed by the API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scheme: a named program or plan with a type, a launch date and an
/// eligibility criterion.
///
/// ## Example JSON
///
/// ```json
/// {
///     "schemeId": 7,
///     "schemeName": "Old Age Pension",
///     "schemeType": "Pension",
///     "schemeLaunchDate": "2023-05-01",
///     "schemeEligibility": "Senior",
///     "schemeDescription": "Monthly pension for citizens over 60"
/// }
/// ```
///
/// `schemeId` is assigned by the store. It is ignored when creating a
/// scheme and required when updating one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    /// Store-assigned identifier.
    #[serde(default)]
    pub scheme_id: Option<i32>,

    /// Display name.
    pub scheme_name: String,

    /// Category tag, e.g. "Pension". Not unique.
    pub scheme_type: String,

    /// Launch date, serialized as `YYYY-MM-DD`.
    pub scheme_launch_date: NaiveDate,

    /// Who may apply, e.g. "Senior".
    pub scheme_eligibility: String,

    /// Free-form description.
    #[serde(default)]
    pub scheme_description: Option<String>,
}
