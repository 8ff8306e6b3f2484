//! # API Models
//!
//! This module defines the request and response structures for the REST API.
//! These are separate from database models to allow API-specific formatting.
//!
//! ## Organization
//!
//! - `scheme.rs` - The `Scheme` resource, used as request and response body
//! - `responses.rs` - Response envelope and auxiliary response bodies
//!
//! ## Serialization
//!
//! All models use Serde for JSON serialization/deserialization.
//! Field names are converted to camelCase for JavaScript clients.

pub mod responses;
pub mod scheme;

pub use responses::*;
pub use scheme::*;
