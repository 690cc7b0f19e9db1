//! # bountip-core: Pure Pricing Logic for Outlet Price Tiers
//!
//! This crate holds the business rules behind outlet price tiers as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bountip Settings Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 settings-api (actix-web REST)                   │   │
//! │  │   /outlet/{id}/price-tier, /preview, /batch, /product           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ bountip-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │  selector │  │  drafts   │  │ validation│  │   │
//! │  │   │ Rule/Calc │  │  Options  │  │ DraftBook │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bountip-db (Database Layer)                     │   │
//! │  │        SQLite outlets, price tiers, products, migrations        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer minor units
//! - [`pricing`] - `PricingRule`, `Percentage`, `calculate_tier_price`
//! - [`types`] - Outlets, price tiers, products and their inputs
//! - [`selector`] - Tier options for a draft price, single selection
//! - [`drafts`] - Unsaved tiers with sentinel ids
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bountip_core::pricing::{calculate_tier_price, Percentage, PricingRule};
//!
//! let rule = PricingRule::Markup { percent: Percentage::from_bps(1000) };
//! let price = calculate_tier_price(100.0, &rule).unwrap();
//!
//! assert_eq!(price.cents(), 11000);
//! assert_eq!(price.format_grouped(), "110.00");
//! ```

pub mod drafts;
pub mod error;
pub mod money;
pub mod pricing;
pub mod selector;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Amount, Money};
pub use pricing::{calculate_tier_price, BasePrice, Percentage, PricingRule, PricingRuleInput};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound for markup and discount percentages, in basis points (100%).
pub const MAX_PERCENTAGE_BPS: u32 = 10_000;

/// Maximum length of a price tier name.
pub const MAX_TIER_NAME_LEN: usize = 100;

/// Maximum length of a free-text description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Maximum length of an outlet or product name.
pub const MAX_NAME_LEN: usize = 200;

/// Currency used for outlets created without one.
pub const DEFAULT_CURRENCY: &str = "NGN";
