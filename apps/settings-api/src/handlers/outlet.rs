//! # Outlet Handlers
//!
//! Outlets of the caller's business.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use bountip_core::{NewOutlet, Outlet};
use bountip_db::Database;

use crate::config::AppConfig;
use crate::context::BusinessContext;
use crate::error::ApiResult;
use crate::handlers::elapsed_ms;
use crate::response::ApiResponse;

/// Outlet DTO for the settings front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutletDto {
    pub id: i64,
    pub business_id: String,
    pub name: String,
    pub currency: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Outlet> for OutletDto {
    fn from(o: Outlet) -> Self {
        OutletDto {
            id: o.id,
            business_id: o.business_id,
            name: o.name,
            currency: o.currency,
            created_at: o.created_at.to_rfc3339(),
            updated_at: o.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutletRequest {
    pub name: String,
    #[serde(default)]
    pub currency: Option<String>,
}

/// POST /outlet
pub async fn create_outlet(
    ctx: BusinessContext,
    db: web::Data<Database>,
    config: web::Data<AppConfig>,
    body: web::Json<CreateOutletRequest>,
) -> ApiResult<HttpResponse> {
    let start = Instant::now();
    let new_outlet = NewOutlet::parse(
        &body.name,
        body.currency.as_deref(),
        &config.default_currency,
    )?;

    let outlet = db.outlets().create(&ctx.business_id, &new_outlet).await?;

    info!(
        elapsed_ms = elapsed_ms(start),
        business_id = %ctx.business_id,
        outlet_id = outlet.id,
        "create_outlet complete"
    );
    Ok(ApiResponse::created(OutletDto::from(outlet), "Outlet created"))
}

/// GET /outlet
pub async fn list_outlets(
    ctx: BusinessContext,
    db: web::Data<Database>,
) -> ApiResult<HttpResponse> {
    debug!(business_id = %ctx.business_id, "list_outlets");
    let outlets = db.outlets().list_by_business(&ctx.business_id).await?;
    let dtos: Vec<OutletDto> = outlets.into_iter().map(OutletDto::from).collect();
    Ok(ApiResponse::ok(dtos))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/outlet")
            .route(web::get().to(list_outlets))
            .route(web::post().to(create_outlet)),
    );
}
