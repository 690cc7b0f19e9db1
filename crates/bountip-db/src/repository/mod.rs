//! # Repository Module
//!
//! Database repository implementations for outlet settings.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                          │
//! │       │  db.price_tiers().create(outlet_id, &new_tier)                 │
//! │       ▼                                                                 │
//! │  PriceTierRepository                                                   │
//! │  ├── create(outlet_id, tier)                                           │
//! │  ├── get(outlet_id, tier_id)                                           │
//! │  ├── list_by_outlet(outlet_id)                                         │
//! │  ├── update(outlet_id, tier_id, patch)                                 │
//! │  └── delete(outlet_id, tier_id)                                        │
//! │       │  SQL, always filtered by outlet                                │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`OutletRepository`](outlet::OutletRepository) - Outlets per business
//! - [`PriceTierRepository`](price_tier::PriceTierRepository) - Tier CRUD
//! - [`ProductRepository`](product::ProductRepository) - Products and tier assignment

pub mod outlet;
pub mod price_tier;
pub mod product;
