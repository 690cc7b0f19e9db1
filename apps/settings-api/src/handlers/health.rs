//! Liveness and database health.

use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::warn;

use bountip_db::migrations::migration_status;
use bountip_db::Database;

use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub service: &'static str,
    pub version: &'static str,
    pub database: bool,
    pub migrations_applied: usize,
    pub migrations_total: usize,
}

/// GET /health
pub async fn health_check(db: web::Data<Database>) -> HttpResponse {
    let mut database = db.health_check().await;
    let (total, applied) = match migration_status(db.pool()).await {
        Ok(status) => status,
        Err(e) => {
            warn!(error = %e, "Health check could not read migration status");
            database = false;
            (0, 0)
        }
    };

    let health = HealthDto {
        service: "settings-api",
        version: env!("CARGO_PKG_VERSION"),
        database,
        migrations_applied: applied,
        migrations_total: total,
    };

    if database {
        ApiResponse::ok(health)
    } else {
        warn!("Health check failed: database unavailable");
        ApiResponse::new(false, Some(health), Some("Database unavailable".to_string()))
            .respond(actix_web::http::StatusCode::SERVICE_UNAVAILABLE)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
