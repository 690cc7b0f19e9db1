//! # HTTP Handlers
//!
//! ## Routes
//! ```text
//! GET    /health
//! GET    /outlet                                      list the caller's outlets
//! POST   /outlet                                      create an outlet
//! GET    /outlet/{outletId}/price-tier                list tiers
//! POST   /outlet/{outletId}/price-tier                create one tier
//! POST   /outlet/{outletId}/price-tier/batch          save drafts
//! GET    /outlet/{outletId}/price-tier/preview        tier options for a base price
//! GET    /outlet/{outletId}/price-tier/{tierId}
//! PATCH  /outlet/{outletId}/price-tier/{tierId}       partial update
//! DELETE /outlet/{outletId}/price-tier/{tierId}
//! GET    /outlet/{outletId}/product
//! POST   /outlet/{outletId}/product
//! GET    /outlet/{outletId}/product/{productId}
//! PATCH  /outlet/{outletId}/product/{productId}/price-tier
//! ```

pub mod health;
pub mod outlet;
pub mod price_tier;
pub mod product;

/// Milliseconds since `start`, for timing fields in log events.
pub(crate) fn elapsed_ms(start: std::time::Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
