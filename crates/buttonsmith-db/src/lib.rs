//! # buttonsmith-db: Database Layer for Buttonsmith
//!
//! This crate provides database access for the Buttonsmith shop.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Buttonsmith Data Flow                             │
//! │                                                                         │
//! │  Route Handler (category page)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  buttonsmith-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (category.rs) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CategoryRepo  │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │ ButtonRepo    │    │              │  │   │
//! │  │   │ Management    │    │ OrderRepo     │    │              │  │   │
//! │  │   └───────────────┘    │ SettingsRepo  │    └──────────────┘  │   │
//! │  │                        └───────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fetched snapshot ──► buttonsmith-core::catalog / pricing              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (category, button, order, settings)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use buttonsmith_db::{Database, DbConfig};
//! use buttonsmith_core::catalog;
//!
//! let db = Database::new(DbConfig::new("shop.db")).await?;
//!
//! // Fetch the snapshot the aggregator consumes
//! let categories = db.categories().list_active().await?;
//! let buttons = db.buttons().list_active().await?;
//! let counts = catalog::count_buttons_by_category(&categories, &buttons);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::button::ButtonRepository;
pub use repository::category::CategoryRepository;
pub use repository::order::OrderRepository;
pub use repository::settings::SettingsRepository;
