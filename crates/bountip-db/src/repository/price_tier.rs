//! # Price Tier Repository
//!
//! Database operations for outlet price tiers.
//!
//! ## Rule Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PricingRule                      price_tiers columns                   │
//! │  ───────────                      ───────────────────                   │
//! │  None                        ──►  rule_kind = 'none',     rule_bps NULL │
//! │  Markup   { percent: 10% }   ──►  rule_kind = 'markup',   rule_bps 1000 │
//! │  Discount { percent: 5% }    ──►  rule_kind = 'discount', rule_bps 500  │
//! │                                                                         │
//! │  A CHECK constraint keeps kind and bps consistent.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every query filters by `outlet_id`, so a tier id from another outlet
//! behaves as if it does not exist.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use bountip_core::pricing::RuleKind;
use bountip_core::{NewPriceTier, Percentage, PriceTier, PriceTierPatch, PricingRule};

const TIER_COLUMNS: &str = "id, outlet_id, name, description, rule_kind, rule_bps, is_active, created_at, updated_at";

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw `price_tiers` row.
#[derive(Debug, sqlx::FromRow)]
struct PriceTierRow {
    id: i64,
    outlet_id: i64,
    name: String,
    description: Option<String>,
    rule_kind: RuleKind,
    rule_bps: Option<i64>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PriceTierRow> for PriceTier {
    type Error = DbError;

    fn try_from(row: PriceTierRow) -> DbResult<Self> {
        let id = row.id;
        let corrupt = move |reason: String| DbError::CorruptRow {
            entity: "PriceTier".to_string(),
            id,
            reason,
        };

        let percent = row
            .rule_bps
            .map(|bps| {
                u32::try_from(bps)
                    .map_err(|e| corrupt(e.to_string()))
                    .and_then(|bps| Percentage::try_from_bps(bps).map_err(|e| corrupt(e.to_string())))
            })
            .transpose()?;
        let rule = PricingRule::from_parts(row.rule_kind, percent).map_err(|e| corrupt(e.to_string()))?;

        Ok(PriceTier {
            id: row.id,
            outlet_id: row.outlet_id,
            name: row.name,
            description: row.description,
            rule,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn rule_columns(rule: &PricingRule) -> (RuleKind, Option<i64>) {
    (rule.kind(), rule.percent().map(|p| i64::from(p.bps())))
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for price tier database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.price_tiers();
///
/// let tier = repo.create(outlet_id, &new_tier).await?;
/// let tiers = repo.list_by_outlet(outlet_id).await?;
/// repo.delete(outlet_id, tier.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PriceTierRepository {
    pool: SqlitePool,
}

impl PriceTierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PriceTierRepository { pool }
    }

    /// Inserts a validated tier and returns it with its server id.
    ///
    /// ## Returns
    /// * `Ok(PriceTier)` - Persisted tier
    /// * `Err(DbError::ForeignKeyViolation)` - Outlet doesn't exist
    pub async fn create(&self, outlet_id: i64, tier: &NewPriceTier) -> DbResult<PriceTier> {
        debug!(outlet_id = %outlet_id, name = %tier.name, "Inserting price tier");

        let (rule_kind, rule_bps) = rule_columns(&tier.rule);
        let now = Utc::now();

        let row = sqlx::query_as::<_, PriceTierRow>(&format!(
            r#"
            INSERT INTO price_tiers (
                outlet_id, name, description, rule_kind, rule_bps,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            RETURNING {TIER_COLUMNS}
            "#
        ))
        .bind(outlet_id)
        .bind(&tier.name)
        .bind(&tier.description)
        .bind(rule_kind)
        .bind(rule_bps)
        .bind(tier.is_active)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        let created = PriceTier::try_from(row)?;
        info!(outlet_id = %outlet_id, tier_id = created.id, "Price tier created");
        Ok(created)
    }

    /// Gets a tier by ID within an outlet.
    ///
    /// ## Returns
    /// * `Ok(Some(PriceTier))` - Tier found
    /// * `Ok(None)` - Missing or belongs to another outlet
    pub async fn get(&self, outlet_id: i64, tier_id: i64) -> DbResult<Option<PriceTier>> {
        let row = sqlx::query_as::<_, PriceTierRow>(&format!(
            "SELECT {TIER_COLUMNS} FROM price_tiers WHERE id = ?1 AND outlet_id = ?2"
        ))
        .bind(tier_id)
        .bind(outlet_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PriceTier::try_from).transpose()
    }

    /// Like [`get`](Self::get) but a missing tier is `DbError::NotFound`.
    pub async fn require(&self, outlet_id: i64, tier_id: i64) -> DbResult<PriceTier> {
        self.get(outlet_id, tier_id)
            .await?
            .ok_or_else(|| DbError::not_found("PriceTier", tier_id))
    }

    /// Lists an outlet's tiers in creation order.
    pub async fn list_by_outlet(&self, outlet_id: i64) -> DbResult<Vec<PriceTier>> {
        let rows = sqlx::query_as::<_, PriceTierRow>(&format!(
            "SELECT {TIER_COLUMNS} FROM price_tiers WHERE outlet_id = ?1 ORDER BY id"
        ))
        .bind(outlet_id)
        .fetch_all(&self.pool)
        .await?;

        let tiers = rows
            .into_iter()
            .map(PriceTier::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        debug!(outlet_id = %outlet_id, count = tiers.len(), "Listed price tiers");
        Ok(tiers)
    }

    /// Applies a partial update.
    ///
    /// Absent fields keep their stored value; a present rule replaces the
    /// stored rule as a whole. Runs as one `UPDATE`, so concurrent patches
    /// to different fields both survive.
    ///
    /// ## Returns
    /// * `Ok(PriceTier)` - Tier after the update
    /// * `Err(DbError::NotFound)` - Tier doesn't exist in this outlet
    pub async fn update(
        &self,
        outlet_id: i64,
        tier_id: i64,
        patch: &PriceTierPatch,
    ) -> DbResult<PriceTier> {
        debug!(outlet_id = %outlet_id, tier_id = %tier_id, "Updating price tier");

        if patch.is_empty() {
            return self.require(outlet_id, tier_id).await;
        }

        let (rule_kind, rule_bps) = match &patch.rule {
            Some(rule) => {
                let (kind, bps) = rule_columns(rule);
                (Some(kind), bps)
            }
            None => (None, None),
        };

        let row = sqlx::query_as::<_, PriceTierRow>(&format!(
            r#"
            UPDATE price_tiers SET
                name = COALESCE(?3, name),
                description = CASE WHEN ?4 THEN ?5 ELSE description END,
                rule_kind = COALESCE(?6, rule_kind),
                rule_bps = CASE WHEN ?6 IS NOT NULL THEN ?7 ELSE rule_bps END,
                is_active = COALESCE(?8, is_active),
                updated_at = ?9
            WHERE id = ?1 AND outlet_id = ?2
            RETURNING {TIER_COLUMNS}
            "#
        ))
        .bind(tier_id)
        .bind(outlet_id)
        .bind(&patch.name)
        .bind(patch.description.is_some())
        .bind(patch.description.clone().flatten())
        .bind(rule_kind)
        .bind(rule_bps)
        .bind(patch.is_active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("PriceTier", tier_id))?;

        let updated = PriceTier::try_from(row)?;
        info!(outlet_id = %outlet_id, tier_id = %tier_id, "Price tier updated");
        Ok(updated)
    }

    /// Deletes a tier and unassigns it from the outlet's products.
    ///
    /// ## Returns
    /// * `Ok(n)` - Number of products that fell back to their base price
    /// * `Err(DbError::NotFound)` - Tier doesn't exist in this outlet
    pub async fn delete(&self, outlet_id: i64, tier_id: i64) -> DbResult<u64> {
        debug!(outlet_id = %outlet_id, tier_id = %tier_id, "Deleting price tier");

        let mut tx = self.pool.begin().await?;

        let exists: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM price_tiers WHERE id = ?1 AND outlet_id = ?2")
                .bind(tier_id)
                .bind(outlet_id)
                .fetch_one(&mut *tx)
                .await?;
        if exists == 0 {
            return Err(DbError::not_found("PriceTier", tier_id));
        }

        let cleared = sqlx::query(
            "UPDATE products SET price_tier_id = NULL, updated_at = ?2 WHERE price_tier_id = ?1",
        )
        .bind(tier_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM price_tiers WHERE id = ?1 AND outlet_id = ?2")
            .bind(tier_id)
            .bind(outlet_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            outlet_id = %outlet_id,
            tier_id = %tier_id,
            products_cleared = cleared,
            "Price tier deleted"
        );
        Ok(cleared)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
