//! # Price Tier Handlers
//!
//! CRUD for an outlet's price tiers, batch saving of drafts, and the tier
//! preview used by the product form.
//!
//! ## Batch Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /outlet/7/price-tier/batch                                        │
//! │  { "tiers": [ {id:-1, VIP}, {id:-2, ""}, {id:-3, Staff} ] }             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DraftBook::add each ── invalid ──► failed[{index:1, draftId:-2}]       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  create each pending draft, one at a time                               │
//! │       ├── ok  ──► saved[{draftId:-1, tier}]                             │
//! │       └── err ──► failed[...]                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  status = any saved                                                     │
//! │  message = "1 tier(s) failed to save."                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use bountip_core::drafts::{is_draft_id, DraftBook};
use bountip_core::pricing::PricingRules;
use bountip_core::selector::tier_options;
use bountip_core::{
    BasePrice, PriceTier, PricingRule, PricingRuleInput, TierInput, TierPatchInput,
    ValidationError,
};
use bountip_db::Database;

use crate::context::BusinessContext;
use crate::error::{ApiError, ApiResult};
use crate::handlers::elapsed_ms;
use crate::response::ApiResponse;

// =============================================================================
// DTOs
// =============================================================================

/// Price tier DTO.
///
/// Carries the rule twice: `pricingRules` in the two-field shape the
/// settings forms read, and `rule` in tagged form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTierDto {
    pub id: i64,
    pub outlet_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub pricing_rules: PricingRules,
    pub rule: PricingRule,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PriceTier> for PriceTierDto {
    fn from(t: PriceTier) -> Self {
        PriceTierDto {
            id: t.id,
            outlet_id: t.outlet_id,
            name: t.name,
            description: t.description,
            pricing_rules: PricingRules::from(t.rule),
            rule: t.rule,
            is_active: t.is_active,
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

/// One row of the tier preview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierOptionDto {
    pub tier_id: i64,
    pub name: String,
    pub is_active: bool,
    pub rule: PricingRule,
    pub price_cents: i64,
    /// Grouped two-decimal form, e.g. `"950,000.00"`.
    pub price: String,
    pub effect: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OutletPath {
    pub outlet_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TierPath {
    pub outlet_id: i64,
    pub tier_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewQuery {
    #[serde(default)]
    pub base_price: Option<String>,
}

/// A draft tier inside a batch. `id` is the client's negative sentinel.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pricing_rules: Option<PricingRuleInput>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl BatchItem {
    fn to_input(&self) -> TierInput {
        TierInput {
            name: self.name.clone(),
            description: self.description.clone(),
            pricing_rules: self.pricing_rules.clone(),
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub tiers: Vec<BatchItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDraftDto {
    pub index: usize,
    pub draft_id: i64,
    pub tier: PriceTierDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedDraftDto {
    pub index: usize,
    pub draft_id: i64,
    pub name: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResultDto {
    pub saved: Vec<SavedDraftDto>,
    pub failed: Vec<FailedDraftDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTierDto {
    pub id: i64,
    pub products_cleared: u64,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /outlet/{outlet_id}/price-tier
pub async fn list_tiers(
    ctx: BusinessContext,
    db: web::Data<Database>,
    path: web::Path<OutletPath>,
) -> ApiResult<HttpResponse> {
    let outlet = ctx.outlet(&db, path.outlet_id).await?;
    let tiers = db.price_tiers().list_by_outlet(outlet.id).await?;

    debug!(outlet_id = outlet.id, count = tiers.len(), "list_tiers");
    let dtos: Vec<PriceTierDto> = tiers.into_iter().map(PriceTierDto::from).collect();
    Ok(ApiResponse::ok(dtos))
}

/// GET /outlet/{outlet_id}/price-tier/{tier_id}
pub async fn get_tier(
    ctx: BusinessContext,
    db: web::Data<Database>,
    path: web::Path<TierPath>,
) -> ApiResult<HttpResponse> {
    let outlet = ctx.outlet(&db, path.outlet_id).await?;
    let tier = db.price_tiers().require(outlet.id, path.tier_id).await?;
    Ok(ApiResponse::ok(PriceTierDto::from(tier)))
}

/// POST /outlet/{outlet_id}/price-tier
pub async fn create_tier(
    ctx: BusinessContext,
    db: web::Data<Database>,
    path: web::Path<OutletPath>,
    body: web::Json<TierInput>,
) -> ApiResult<HttpResponse> {
    let start = Instant::now();
    let outlet = ctx.outlet(&db, path.outlet_id).await?;
    let new_tier = body.validate()?;

    let tier = db.price_tiers().create(outlet.id, &new_tier).await?;

    info!(
        elapsed_ms = elapsed_ms(start),
        outlet_id = outlet.id,
        tier_id = tier.id,
        "create_tier complete"
    );
    Ok(ApiResponse::created(PriceTierDto::from(tier), "Price tier created"))
}

/// POST /outlet/{outlet_id}/price-tier/batch
///
/// Each draft is validated and saved on its own; one failure never blocks
/// the rest. A supplied `id` must be a draft id; saved tiers are edited
/// through PATCH instead.
///
/// The `DraftBook` lives for this request only. It validates each draft and
/// assigns a sentinel id when the client sent none. After `mark_saved` it
/// holds exactly the drafts whose insert failed, which is what `pending`
/// logs.
pub async fn save_batch(
    ctx: BusinessContext,
    db: web::Data<Database>,
    path: web::Path<OutletPath>,
    body: web::Json<BatchRequest>,
) -> ApiResult<HttpResponse> {
    let start = Instant::now();
    let outlet = ctx.outlet(&db, path.outlet_id).await?;

    if body.tiers.is_empty() {
        return Err(ValidationError::NothingToSave.into());
    }

    let mut book = DraftBook::new();
    let mut queued = Vec::with_capacity(body.tiers.len());
    let mut failed = Vec::new();

    for (index, item) in body.tiers.iter().enumerate() {
        if let Some(id) = item.id.filter(|id| !is_draft_id(*id)) {
            failed.push(FailedDraftDto {
                index,
                draft_id: id,
                name: item.name.clone(),
                message: ValidationError::invalid_format("id", "must be a negative draft id")
                    .to_string(),
            });
            continue;
        }
        match book.add(&item.to_input()) {
            Ok(draft) => queued.push((index, item.id.unwrap_or(draft.id), draft.id)),
            Err(err) => failed.push(FailedDraftDto {
                index,
                draft_id: item.id.unwrap_or(-(index as i64) - 1),
                name: item.name.clone(),
                message: err.to_string(),
            }),
        }
    }

    let mut saved = Vec::with_capacity(queued.len());
    let mut saved_ids = Vec::with_capacity(queued.len());

    for (index, client_id, book_id) in queued {
        let Some(draft) = book.get(book_id) else {
            continue;
        };
        match db.price_tiers().create(outlet.id, &draft.tier).await {
            Ok(tier) => {
                saved_ids.push(book_id);
                saved.push(SavedDraftDto {
                    index,
                    draft_id: client_id,
                    tier: PriceTierDto::from(tier),
                });
            }
            Err(err) => {
                warn!(outlet_id = outlet.id, index, error = %err, "Draft tier failed to save");
                failed.push(FailedDraftDto {
                    index,
                    draft_id: client_id,
                    name: draft.tier.name.clone(),
                    message: ApiError::from(err).message,
                });
            }
        }
    }

    book.mark_saved(&saved_ids);
    failed.sort_by_key(|f| f.index);

    info!(
        elapsed_ms = elapsed_ms(start),
        outlet_id = outlet.id,
        saved = saved.len(),
        failed = failed.len(),
        pending = book.len(),
        "save_batch complete"
    );

    let any_saved = !saved.is_empty();
    let message = if failed.is_empty() {
        format!("{} tier(s) saved.", saved.len())
    } else {
        format!("{} tier(s) failed to save.", failed.len())
    };
    let status = if any_saved {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    Ok(ApiResponse::new(any_saved, Some(BatchResultDto { saved, failed }), Some(message)).respond(status))
}

/// PATCH /outlet/{outlet_id}/price-tier/{tier_id}
pub async fn update_tier(
    ctx: BusinessContext,
    db: web::Data<Database>,
    path: web::Path<TierPath>,
    body: web::Json<TierPatchInput>,
) -> ApiResult<HttpResponse> {
    let start = Instant::now();
    let outlet = ctx.outlet(&db, path.outlet_id).await?;
    let patch = body.validate()?;

    let tier = db.price_tiers().update(outlet.id, path.tier_id, &patch).await?;

    info!(
        elapsed_ms = elapsed_ms(start),
        outlet_id = outlet.id,
        tier_id = tier.id,
        "update_tier complete"
    );
    Ok(ApiResponse::ok_with_message(PriceTierDto::from(tier), "Price tier updated"))
}

/// DELETE /outlet/{outlet_id}/price-tier/{tier_id}
pub async fn delete_tier(
    ctx: BusinessContext,
    db: web::Data<Database>,
    path: web::Path<TierPath>,
) -> ApiResult<HttpResponse> {
    let outlet = ctx.outlet(&db, path.outlet_id).await?;
    let products_cleared = db.price_tiers().delete(outlet.id, path.tier_id).await?;

    let deleted = DeletedTierDto {
        id: path.tier_id,
        products_cleared,
    };
    Ok(ApiResponse::ok_with_message(deleted, "Price tier deleted"))
}

/// GET /outlet/{outlet_id}/price-tier/preview?basePrice=...
///
/// Prices every tier of the outlet against a draft base price. A missing or
/// empty base price previews at zero.
pub async fn preview_tiers(
    ctx: BusinessContext,
    db: web::Data<Database>,
    path: web::Path<OutletPath>,
    query: web::Query<PreviewQuery>,
) -> ApiResult<HttpResponse> {
    let outlet = ctx.outlet(&db, path.outlet_id).await?;
    let tiers = db.price_tiers().list_by_outlet(outlet.id).await?;

    let base = BasePrice::from(query.base_price.clone().unwrap_or_default());
    let options = tier_options(base, &tiers)?;

    let dtos: Vec<TierOptionDto> = options
        .into_iter()
        .map(|o| TierOptionDto {
            tier_id: o.tier_id,
            name: o.name,
            is_active: o.is_active,
            rule: o.rule,
            price_cents: o.price.cents(),
            price: o.price.format_grouped(),
            effect: o.effect,
        })
        .collect();

    Ok(ApiResponse::ok(dtos))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/outlet/{outlet_id}/price-tier")
            .service(
                web::resource("")
                    .route(web::get().to(list_tiers))
                    .route(web::post().to(create_tier)),
            )
            .route("/batch", web::post().to(save_batch))
            .route("/preview", web::get().to(preview_tiers))
            .service(
                web::resource("/{tier_id}")
                    .route(web::get().to(get_tier))
                    .route(web::patch().to(update_tier))
                    .route(web::delete().to(delete_tier)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bountip_core::Percentage;
    use chrono::Utc;

    #[test]
    fn test_dto_carries_both_rule_shapes() {
        let tier = PriceTier {
            id: 4,
            outlet_id: 1,
            name: "Wholesale".to_string(),
            description: None,
            rule: PricingRule::discount(Percentage::from_bps(1250)),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let body = serde_json::to_value(PriceTierDto::from(tier)).unwrap();
        assert_eq!(body["pricingRules"]["discountPercentage"], 12.5);
        assert!(body["pricingRules"].get("markupPercentage").is_none());
        assert_eq!(body["rule"]["kind"], "discount");
        assert_eq!(body["rule"]["percent"], 12.5);
        assert_eq!(body["outletId"], 1);
    }

    #[test]
    fn test_batch_item_accepts_either_rule_shape() {
        let items: BatchRequest = serde_json::from_value(serde_json::json!({
            "tiers": [
                { "id": -1, "name": "VIP", "pricingRules": { "markupPercentage": 10 } },
                { "name": "Staff", "pricingRules": { "kind": "discount", "percent": 5 } }
            ]
        }))
        .unwrap();

        assert_eq!(items.tiers[0].id, Some(-1));
        assert_eq!(items.tiers[1].id, None);

        let vip = items.tiers[0].to_input().validate().unwrap();
        assert_eq!(vip.rule, PricingRule::markup(Percentage::from_bps(1000)));
        let staff = items.tiers[1].to_input().validate().unwrap();
        assert_eq!(staff.rule, PricingRule::discount(Percentage::from_bps(500)));
    }
}
