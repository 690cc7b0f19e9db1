//! # Product Handlers
//!
//! Products of an outlet and their single price tier.
//!
//! ```text
//! PATCH /outlet/7/product/3/price-tier  { "priceTierId": 12 }
//!        │
//!        ▼
//! TierSelection::from_tiers(active tiers of outlet 7)
//!        │
//!        ├── 12 offered ──► products.price_tier_id = 12
//!        └── otherwise  ──► 400 VALIDATION_ERROR
//! ```

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use bountip_core::selector::TierSelection;
use bountip_core::{PriceTier, Product, ProductInput};
use bountip_db::Database;

use crate::context::BusinessContext;
use crate::error::ApiResult;
use crate::handlers::elapsed_ms;
use crate::response::ApiResponse;

/// Product DTO with the price after its tier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub outlet_id: i64,
    pub name: String,
    pub price_cents: i64,
    pub price_tier_id: Option<i64>,
    /// Selling price under the assigned tier; equals `priceCents` without one.
    pub tier_price_cents: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl ProductDto {
    fn new(p: Product, tier: Option<&PriceTier>) -> Self {
        ProductDto {
            tier_price_cents: p.tier_price(tier).cents(),
            id: p.id,
            outlet_id: p.outlet_id,
            name: p.name,
            price_cents: p.price_cents,
            price_tier_id: p.price_tier_id,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutletPath {
    pub outlet_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ProductPath {
    pub outlet_id: i64,
    pub product_id: i64,
}

/// `null` or an omitted id clears the assignment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTierRequest {
    #[serde(default)]
    pub price_tier_id: Option<i64>,
}

async fn with_tier(db: &Database, product: Product) -> ApiResult<ProductDto> {
    let tier = match product.price_tier_id {
        Some(tier_id) => db.price_tiers().get(product.outlet_id, tier_id).await?,
        None => None,
    };
    Ok(ProductDto::new(product, tier.as_ref()))
}

/// POST /outlet/{outlet_id}/product
///
/// A tier given at creation goes through the same selection as a later
/// assignment: it must be an active tier of the outlet.
pub async fn create_product(
    ctx: BusinessContext,
    db: web::Data<Database>,
    path: web::Path<OutletPath>,
    body: web::Json<ProductInput>,
) -> ApiResult<HttpResponse> {
    let start = Instant::now();
    let outlet = ctx.outlet(&db, path.outlet_id).await?;
    let new_product = body.validate()?;

    let tiers = db.price_tiers().list_by_outlet(outlet.id).await?;
    if let Some(tier_id) = new_product.price_tier_id {
        TierSelection::from_tiers(&tiers).select(tier_id)?;
    }

    let product = db.products().create(outlet.id, &new_product).await?;
    let tier = tiers.iter().find(|t| Some(t.id) == product.price_tier_id);
    let dto = ProductDto::new(product, tier);

    info!(
        elapsed_ms = elapsed_ms(start),
        outlet_id = outlet.id,
        product_id = dto.id,
        "create_product complete"
    );
    Ok(ApiResponse::created(dto, "Product created"))
}

/// GET /outlet/{outlet_id}/product
pub async fn list_products(
    ctx: BusinessContext,
    db: web::Data<Database>,
    path: web::Path<OutletPath>,
) -> ApiResult<HttpResponse> {
    let outlet = ctx.outlet(&db, path.outlet_id).await?;
    let tiers = db.price_tiers().list_by_outlet(outlet.id).await?;
    let products = db.products().list_by_outlet(outlet.id).await?;

    debug!(outlet_id = outlet.id, count = products.len(), "list_products");

    let dtos: Vec<ProductDto> = products
        .into_iter()
        .map(|p| {
            let tier = tiers.iter().find(|t| Some(t.id) == p.price_tier_id);
            ProductDto::new(p, tier)
        })
        .collect();
    Ok(ApiResponse::ok(dtos))
}

/// GET /outlet/{outlet_id}/product/{product_id}
pub async fn get_product(
    ctx: BusinessContext,
    db: web::Data<Database>,
    path: web::Path<ProductPath>,
) -> ApiResult<HttpResponse> {
    let outlet = ctx.outlet(&db, path.outlet_id).await?;
    let product = db.products().require(outlet.id, path.product_id).await?;
    Ok(ApiResponse::ok(with_tier(&db, product).await?))
}

/// PATCH /outlet/{outlet_id}/product/{product_id}/price-tier
///
/// Only active tiers of the outlet can be chosen.
pub async fn assign_price_tier(
    ctx: BusinessContext,
    db: web::Data<Database>,
    path: web::Path<ProductPath>,
    body: web::Json<AssignTierRequest>,
) -> ApiResult<HttpResponse> {
    let start = Instant::now();
    let outlet = ctx.outlet(&db, path.outlet_id).await?;
    let product = db.products().require(outlet.id, path.product_id).await?;

    let tiers = db.price_tiers().list_by_outlet(outlet.id).await?;
    let mut selection = TierSelection::from_tiers(&tiers);
    match body.price_tier_id {
        Some(tier_id) => selection.select(tier_id)?,
        None => selection.clear(),
    }

    let product = db
        .products()
        .assign_tier(outlet.id, product.id, selection.selected())
        .await?;
    let tier = tiers.iter().find(|t| Some(t.id) == product.price_tier_id);
    let dto = ProductDto::new(product, tier);

    info!(
        elapsed_ms = elapsed_ms(start),
        outlet_id = outlet.id,
        product_id = dto.id,
        price_tier_id = ?dto.price_tier_id,
        "assign_price_tier complete"
    );
    Ok(ApiResponse::ok(dto))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/outlet/{outlet_id}/product")
            .service(
                web::resource("")
                    .route(web::get().to(list_products))
                    .route(web::post().to(create_product)),
            )
            .route("/{product_id}", web::get().to(get_product))
            .route("/{product_id}/price-tier", web::patch().to(assign_price_tier)),
    );
}
