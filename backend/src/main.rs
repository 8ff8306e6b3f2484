//! # Scheme Backend Service
//!
//! REST service for managing schemes: named programs with a type, a launch
//! date and an eligibility criterion. It provides:
//!
//! - CRUD endpoints for schemes
//! - Lookups by type, launch date and eligibility
//! - PostgreSQL storage (or an in-memory store for local runs)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               BACKEND SERVICE                │
//! │                                              │
//! │  ┌────────────────────────────────────────┐  │
//! │  │          REST API (Actix)              │  │
//! │  │  request logging → handlers            │  │
//! │  │  /addscheme  /viewschemebyid/{id} ...  │  │
//! │  └───────────────────┬────────────────────┘  │
//! │                      │                       │
//! │  ┌───────────────────┴────────────────────┐  │
//! │  │        SchemeStore (trait object)      │  │
//! │  └─────────┬──────────────────┬───────────┘  │
//! │            │                  │              │
//! │     ┌──────┴──────┐    ┌──────┴──────┐       │
//! │     │ PostgreSQL  │    │  In-memory  │       │
//! │     └─────────────┘    └─────────────┘       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! 1. Set up PostgreSQL and create the database
//! 2. Put `DATABASE_URL` in `.env` (or run with `SCHEME_STORE=memory`)
//! 3. Start the server: `cargo run`
//!
//! The schema is created on startup.

use std::sync::Arc;

use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod db;
mod models;
mod services;

use config::{AppConfig, StoreBackend};
use db::Database;
use services::{InMemorySchemeStore, PostgresSchemeStore, SchemeStore};

/// Application state shared across all handlers.
///
/// Handlers only see the store through the trait, so the backend can be
/// swapped without touching them.
pub struct AppState {
    /// Persistence for schemes.
    pub store: Arc<dyn SchemeStore>,
    /// Configuration the service was started with.
    pub config: AppConfig,
}

/// Main entry point for the backend service.
///
/// This function:
/// 1. Initializes logging
/// 2. Loads configuration from environment
/// 3. Builds the configured scheme store
/// 4. Launches the HTTP server
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // =========================================
    // STEP 1: Initialize Logging
    // =========================================
    // Load .env first so it can set RUST_LOG
    dotenvy::dotenv().ok(); // It's okay if .env doesn't exist

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("🚀 Starting Scheme Backend Service");

    // =========================================
    // STEP 2: Load Configuration
    // =========================================
    let config = AppConfig::from_env().expect("Failed to load configuration");

    info!("📋 Configuration loaded");
    info!("   Store backend: {:?}", config.store_backend);

    // =========================================
    // STEP 3: Initialize Store
    // =========================================
    let store: Arc<dyn SchemeStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL is required for the postgres store");

            let db = Database::connect(database_url, config.database_pool_size)
                .await
                .expect("Failed to connect to database");
            info!("🗄️  Database connected");

            db.run_migrations()
                .await
                .expect("Failed to run migrations");
            info!("📦 Database migrations complete");

            Arc::new(PostgresSchemeStore::new(db))
        }
        StoreBackend::Memory => {
            info!("🧠 Using in-memory scheme store (data is not persisted)");
            Arc::new(InMemorySchemeStore::new())
        }
    };

    let app_state = Arc::new(AppState {
        store,
        config: config.clone(),
    });

    // =========================================
    // STEP 4: Start HTTP Server
    // =========================================
    let bind_address = config.bind_address();
    info!("🌐 Starting HTTP server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            // Attach shared application state
            .app_data(web::Data::new(app_state.clone()))
            // Log every request on entry and on response
            .wrap(from_fn(api::log_request))
            // Configure API routes
            .configure(api::configure_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
