//! # Bountip Settings API
//!
//! REST server that persists an outlet's price tiers and lets products pick
//! one of them.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Settings API                                    │
//! │                                                                         │
//! │  HTTP ──► TracingLogger ──► BusinessContext ──► handlers                │
//! │                             (X-Business-Id)        │                    │
//! │                                                    ├─► bountip-core     │
//! │                                                    │   (rules, drafts)  │
//! │                                                    └─► bountip-db       │
//! │                                                        (SQLite)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `BIND_ADDRESS` - Interface to listen on (default `127.0.0.1`)
//! - `PORT` - Port (default `8080`)
//! - `DATABASE_PATH` - SQLite file (default `./bountip.db`)
//! - `DB_MAX_CONNECTIONS` - Pool size (default `5`)
//! - `DEFAULT_CURRENCY` - Currency for new outlets (default `NGN`)
//!
//! Every response uses the `{ status, data?, message? }` envelope.

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod response;

use actix_web::web;

use crate::error::{json_error_handler, path_error_handler, query_error_handler};

/// Registers extractor error handlers and every route.
///
/// Callers supply `web::Data<Database>` and `web::Data<AppConfig>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .configure(handlers::health::configure)
        .configure(handlers::outlet::configure)
        .configure(handlers::price_tier::configure)
        .configure(handlers::product::configure);
}
