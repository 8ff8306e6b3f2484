//! # Services Module
//!
//! The store layer the REST API delegates to. Handlers only ever see the
//! [`SchemeStore`] trait; the concrete backend is chosen at startup.
//!
//! ## Services Overview
//!
//! | Service | Responsibility |
//! |---------|---------------|
//! | `SchemeStore` | Trait: CRUD and filtered lookups over schemes |
//! | `PostgresSchemeStore` | `SchemeStore` over the PostgreSQL pool |
//! | `InMemorySchemeStore` | `SchemeStore` over a process-local map |
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 REST handlers                │
//! └──────────────────────┬───────────────────────┘
//!                        │ Arc<dyn SchemeStore>
//!          ┌─────────────┴─────────────┐
//!          ▼                           ▼
//!  ┌───────────────┐           ┌───────────────┐
//!  │   Postgres    │           │   In-memory   │
//!  │  SchemeStore  │           │  SchemeStore  │
//!  └───────────────┘           └───────────────┘
//! ```

pub mod in_memory;
pub mod postgres;
pub mod scheme_store;

pub use in_memory::InMemorySchemeStore;
pub use postgres::PostgresSchemeStore;
pub use scheme_store::{SchemeStore, StoreError};
