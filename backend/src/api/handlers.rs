//! # API Request Handlers
//!
//! This module contains the handler functions for each API endpoint.
//! Each handler:
//! 1. Parses path segments or the JSON body
//! 2. Makes exactly one call on the `SchemeStore`
//! 3. Wraps the result in a `SchemeResponse` (body + `message` header + status)
//!
//! Logging happens in `api::logging`, not here.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};

use super::ApiError;
use crate::models::{HealthResponse, Scheme, SchemeResponse};
use crate::AppState;

type SchemeResult<T> = Result<SchemeResponse<T>, ApiError>;

/// Parse a `{schemeId}` path segment.
fn parse_scheme_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::MalformedId(raw.to_string()))
}

/// Parse a `{schemeLaunchDate}` path segment.
///
/// Only the zero-padded `YYYY-MM-DD` form is accepted.
fn parse_launch_date(raw: &str) -> Result<NaiveDate, ApiError> {
    let well_formed = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });

    well_formed
        .then(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .flatten()
        .ok_or_else(|| ApiError::MalformedDate(raw.to_string()))
}

/// Health check endpoint.
///
/// ## Endpoint
///
/// `GET /health`
///
/// ## Response
///
/// ```json
/// {
///     "status": "healthy",
///     "store": true,
///     "backend": "postgres",
///     "version": "0.1.0",
///     "timestamp": "2025-12-08T12:00:00Z"
/// }
/// ```
pub async fn health_check(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let store_healthy = state.store.is_healthy().await;

    let response = HealthResponse {
        status: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
        store: store_healthy,
        backend: state.config.store_backend.as_str().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    };

    let status_code = if store_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    HttpResponse::build(status_code).json(response)
}

/// Add a scheme.
///
/// ## Endpoint
///
/// `POST /addscheme`
///
/// ## Example
///
/// ```bash
/// curl -i -X POST http://127.0.0.1:8082/addscheme \
///   -H "Content-Type: application/json" \
///   -d '{
///     "schemeName": "Old Age Pension",
///     "schemeType": "Pension",
///     "schemeLaunchDate": "2023-05-01",
///     "schemeEligibility": "Senior"
///   }'
/// ```
///
/// Responds `201 Created` with the stored scheme (including its new
/// `schemeId`) and `message: Scheme added successfully.`
pub async fn add_scheme(
    state: web::Data<Arc<AppState>>,
    body: web::Json<Scheme>,
) -> SchemeResult<Scheme> {
    let scheme = state.store.add_scheme(body.into_inner()).await?;
    Ok(SchemeResponse::created(scheme, "Scheme added successfully."))
}

/// Update a scheme.
///
/// ## Endpoint
///
/// `PUT /updatescheme`
///
/// The body must carry `schemeId`; every other field replaces the stored
/// value. `400` without an id, `404` for an unknown id.
pub async fn update_scheme(
    state: web::Data<Arc<AppState>>,
    body: web::Json<Scheme>,
) -> SchemeResult<Scheme> {
    let scheme = state.store.update_scheme(body.into_inner()).await?;
    Ok(SchemeResponse::ok(scheme, "Scheme updated successfully."))
}

/// Get one scheme.
///
/// ## Endpoint
///
/// `GET /viewschemebyid/{schemeId}`
///
/// ## Example
///
/// ```bash
/// curl -i http://127.0.0.1:8082/viewschemebyid/7
/// ```
pub async fn view_scheme_by_id(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> SchemeResult<Scheme> {
    let scheme_id = parse_scheme_id(&path)?;
    let scheme = state.store.view_scheme(scheme_id).await?;
    Ok(SchemeResponse::ok(
        scheme,
        format!("Scheme having id \"{}\" available in database.", scheme_id),
    ))
}

/// Get every scheme, ordered by id.
///
/// ## Endpoint
///
/// `GET /viewallschemes`
pub async fn get_all_schemes(state: web::Data<Arc<AppState>>) -> SchemeResult<Vec<Scheme>> {
    let schemes = state.store.view_all_schemes().await?;
    Ok(SchemeResponse::ok(schemes, "All Schemes details are retrieved."))
}

/// Delete a scheme and return it.
///
/// ## Endpoint
///
/// `DELETE /deleteschemebyid/{schemeId}`
pub async fn delete_scheme_by_id(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> SchemeResult<Scheme> {
    let scheme_id = parse_scheme_id(&path)?;
    let scheme = state.store.delete_scheme(scheme_id).await?;
    Ok(SchemeResponse::ok(
        scheme,
        format!("Scheme having id \"{}\" deleted successfully.", scheme_id),
    ))
}

/// Get schemes of one type (exact match).
///
/// ## Endpoint
///
/// `GET /viewbytype/{schemeType}`
pub async fn get_scheme_by_type(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> SchemeResult<Vec<Scheme>> {
    let scheme_type = path.into_inner();
    let schemes = state.store.view_schemes_by_type(&scheme_type).await?;
    Ok(SchemeResponse::ok(
        schemes,
        format!("Schemes with type \"{}\" retrieved from database.", scheme_type),
    ))
}

/// Get schemes launched on a date.
///
/// ## Endpoint
///
/// `GET /viewbylaunchdate/{schemeLaunchDate}`
///
/// ## Example
///
/// ```bash
/// curl -i http://127.0.0.1:8082/viewbylaunchdate/2024-01-01
/// ```
///
/// Anything other than `YYYY-MM-DD` is rejected with `400` before the
/// store is consulted.
pub async fn get_scheme_by_launch_date(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> SchemeResult<Vec<Scheme>> {
    let launch_date = parse_launch_date(&path)?;
    let schemes = state.store.view_schemes_by_launch_date(launch_date).await?;
    Ok(SchemeResponse::ok(
        schemes,
        format!(
            "Schemes with launch date \"{}\" retrieved from database.",
            launch_date
        ),
    ))
}

/// Get schemes with one eligibility criterion (exact match).
///
/// ## Endpoint
///
/// `GET /viewbyeligibility/{schemeEligibility}`
pub async fn get_scheme_by_eligibility(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> SchemeResult<Vec<Scheme>> {
    let eligibility = path.into_inner();
    let schemes = state.store.view_schemes_by_eligibility(&eligibility).await?;
    Ok(SchemeResponse::ok(
        schemes,
        format!(
            "Schemes with eligibility \"{}\" retrieved from database.",
            eligibility
        ),
    ))
}
