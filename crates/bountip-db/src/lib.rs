//! # bountip-db: Database Layer for Outlet Price Tiers
//!
//! SQLite storage for outlets, their price tiers and the products priced
//! through them, using sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Settings Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (POST /outlet/{id}/price-tier)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bountip-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ OutletRepo    │    │ 001_init.sql │  │   │
//! │  │   │ SqlitePool    │◄───│ PriceTierRepo │    │              │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (DATABASE_PATH)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Outlet, price tier and product repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bountip_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/bountip.db")).await?;
//!
//! let tiers = db.price_tiers().list_by_outlet(outlet_id).await?;
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

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::outlet::OutletRepository;
pub use repository::price_tier::PriceTierRepository;
pub use repository::product::ProductRepository;
