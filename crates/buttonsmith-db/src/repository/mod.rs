//! # Repository Module
//!
//! Database repository implementations for Buttonsmith.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Route Handler                                                         │
//! │       │                                                                 │
//! │       │  db.categories().list_active()                                 │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  CategoryRepository                                                    │
//! │  ├── list_active(&self)                                                │
//! │  ├── get_by_slug(&self, slug)                                          │
//! │  ├── insert(&self, category)                                           │
//! │  └── update(&self, category)                                           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (in-memory database)                                   │
//! │  • SQL is isolated in one place                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Category tree CRUD
//! - [`ButtonRepository`](button::ButtonRepository) - Button catalog CRUD
//! - [`OrderRepository`](order::OrderRepository) - Order creation and lifecycle
//! - [`SettingsRepository`](settings::SettingsRepository) - Pricing configuration store

pub mod button;
pub mod category;
pub mod order;
pub mod settings;
