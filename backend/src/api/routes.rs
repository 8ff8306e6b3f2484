//! # API Route Configuration
//!
//! This module sets up all the HTTP routes for the API.

use actix_web::{web, Route};

use super::handlers;

/// Route table: resource name, path pattern, method + handler.
///
/// The resource name is what the request logger reports.
fn scheme_routes() -> Vec<(&'static str, &'static str, Route)> {
    vec![
        ("addScheme", "/addscheme", web::post().to(handlers::add_scheme)),
        ("updateScheme", "/updatescheme", web::put().to(handlers::update_scheme)),
        (
            "viewSchemeById",
            "/viewschemebyid/{schemeId}",
            web::get().to(handlers::view_scheme_by_id),
        ),
        ("getAllSchemes", "/viewallschemes", web::get().to(handlers::get_all_schemes)),
        (
            "deleteSchemeById",
            "/deleteschemebyid/{schemeId}",
            web::delete().to(handlers::delete_scheme_by_id),
        ),
        (
            "getSchemeByType",
            "/viewbytype/{schemeType}",
            web::get().to(handlers::get_scheme_by_type),
        ),
        (
            "getSchemeByLaunchDate",
            "/viewbylaunchdate/{schemeLaunchDate}",
            web::get().to(handlers::get_scheme_by_launch_date),
        ),
        (
            "getSchemeByEligibility",
            "/viewbyeligibility/{schemeEligibility}",
            web::get().to(handlers::get_scheme_by_eligibility),
        ),
    ]
}

/// Configure all API routes.
///
/// ## Route Structure
///
/// ```text
/// /
/// ├── /health                                  GET
/// ├── /addscheme                               POST
/// ├── /updatescheme                            PUT
/// ├── /viewschemebyid/{schemeId}               GET
/// ├── /viewallschemes                          GET
/// ├── /deleteschemebyid/{schemeId}             DELETE
/// ├── /viewbytype/{schemeType}                 GET
/// ├── /viewbylaunchdate/{schemeLaunchDate}     GET
/// └── /viewbyeligibility/{schemeEligibility}   GET
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/health")
            .name("healthCheck")
            .route(web::get().to(handlers::health_check)),
    );

    for (name, path, route) in scheme_routes() {
        cfg.service(web::resource(path).name(name).route(route));
    }
}
