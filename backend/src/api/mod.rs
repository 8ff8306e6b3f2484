//! # REST API Module
//!
//! This module defines all HTTP endpoints for the Scheme API.
//!
//! ## Endpoint Overview
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/addscheme` | Create a scheme |
//! | PUT | `/updatescheme` | Replace a scheme (id in body) |
//! | GET | `/viewschemebyid/{schemeId}` | One scheme |
//! | GET | `/viewallschemes` | Every scheme |
//! | DELETE | `/deleteschemebyid/{schemeId}` | Remove a scheme |
//! | GET | `/viewbytype/{schemeType}` | Filter by type |
//! | GET | `/viewbylaunchdate/{schemeLaunchDate}` | Filter by launch date |
//! | GET | `/viewbyeligibility/{schemeEligibility}` | Filter by eligibility |
//! | GET | `/health` | Health check |
//!
//! ## Request/Response Format
//!
//! Bodies are the bare `Scheme` JSON (or an array of them). Every scheme
//! response also carries a `message` header:
//!
//! ```text
//! HTTP/1.1 200 OK
//! message: Scheme having id "7" available in database.
//!
//! {"schemeId":7,"schemeType":"Pension", ...}
//! ```
//!
//! Failures use actix-web's default plain-text error rendering with the
//! status chosen by [`ApiError`].

pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;

pub use error::ApiError;
pub use logging::log_request;
pub use routes::configure_routes;
