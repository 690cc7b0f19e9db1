//! # Product Repository
//!
//! Database operations for products and their tier assignment.
//!
//! ## Tier Assignment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  assign_tier(outlet, product, Some(tier))                               │
//! │       │                                                                 │
//! │       ├── product not in outlet ──► NotFound(Product)                  │
//! │       ├── tier not in outlet    ──► NotFound(PriceTier)                │
//! │       ▼                                                                 │
//! │  products.price_tier_id = tier   (at most one tier per product)        │
//! │                                                                         │
//! │  assign_tier(outlet, product, None) ──► back to the base price         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bountip_core::{NewProduct, Product};

const PRODUCT_COLUMNS: &str = "id, outlet_id, name, price_cents, price_tier_id, created_at, updated_at";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product
    /// * `Err(DbError::NotFound)` - The referenced tier is not in this outlet
    pub async fn create(&self, outlet_id: i64, product: &NewProduct) -> DbResult<Product> {
        debug!(outlet_id = %outlet_id, name = %product.name, "Inserting product");

        if let Some(tier_id) = product.price_tier_id {
            self.ensure_tier_in_outlet(outlet_id, tier_id).await?;
        }

        let now = Utc::now();

        let created = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (
                outlet_id, name, price_cents, price_tier_id, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(outlet_id)
        .bind(&product.name)
        .bind(product.price.cents())
        .bind(product.price_tier_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Gets a product by ID within an outlet.
    pub async fn get(&self, outlet_id: i64, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1 AND outlet_id = ?2"
        ))
        .bind(id)
        .bind(outlet_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Like [`get`](Self::get) but a missing product is `DbError::NotFound`.
    pub async fn require(&self, outlet_id: i64, id: i64) -> DbResult<Product> {
        self.get(outlet_id, id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    pub async fn list_by_outlet(&self, outlet_id: i64) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE outlet_id = ?1 ORDER BY name"
        ))
        .bind(outlet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Assigns a tier to a product, or clears it with `None`.
    pub async fn assign_tier(
        &self,
        outlet_id: i64,
        id: i64,
        tier_id: Option<i64>,
    ) -> DbResult<Product> {
        debug!(outlet_id = %outlet_id, id = %id, tier_id = ?tier_id, "Assigning price tier");

        if let Some(tier_id) = tier_id {
            self.ensure_tier_in_outlet(outlet_id, tier_id).await?;
        }

        let updated = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products SET price_tier_id = ?3, updated_at = ?4
            WHERE id = ?1 AND outlet_id = ?2
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(outlet_id)
        .bind(tier_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| DbError::not_found("Product", id))
    }

    async fn ensure_tier_in_outlet(&self, outlet_id: i64, tier_id: i64) -> DbResult<()> {
        let found: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM price_tiers WHERE id = ?1 AND outlet_id = ?2")
                .bind(tier_id)
                .bind(outlet_id)
                .fetch_one(&self.pool)
                .await?;

        if found == 0 {
            return Err(DbError::not_found("PriceTier", tier_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use bountip_core::{Money, NewOutlet, NewPriceTier, Percentage, PricingRule};

    async fn setup() -> (Database, i64, i64, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let outlet = NewOutlet::parse("Lekki", None, "NGN").unwrap();
        let a = db.outlets().create("biz-1", &outlet).await.unwrap().id;
        let b = db.outlets().create("biz-1", &outlet).await.unwrap().id;

        let tier = db
            .price_tiers()
            .create(
                a,
                &NewPriceTier {
                    name: "Wholesale".to_string(),
                    description: None,
                    rule: PricingRule::discount(Percentage::from_bps(500)),
                    is_active: true,
                },
            )
            .await
            .unwrap();

        (db, a, b, tier.id)
    }

    fn new_product(price_tier_id: Option<i64>) -> NewProduct {
        NewProduct {
            name: "Suya".to_string(),
            price: Money::from_cents(100_000_000),
            price_tier_id,
        }
    }

    #[tokio::test]
    async fn test_create_with_tier() {
        let (db, outlet, _, tier_id) = setup().await;
        let product = db
            .products()
            .create(outlet, &new_product(Some(tier_id)))
            .await
            .unwrap();

        assert_eq!(product.price_tier_id, Some(tier_id));
        assert_eq!(product.price().cents(), 100_000_000);

        let tier = db.price_tiers().require(outlet, tier_id).await.unwrap();
        assert_eq!(product.tier_price(Some(&tier)).format_grouped(), "950,000.00");
        let listed = db.products().list_by_outlet(outlet).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].price_tier_id, Some(tier_id));
    }

    #[tokio::test]
    async fn test_tier_from_other_outlet_rejected() {
        let (db, _, other, tier_id) = setup().await;
        let err = db
            .products()
            .create(other, &new_product(Some(tier_id)))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_assign_and_clear_tier() {
        let (db, outlet, other, tier_id) = setup().await;
        let repo = db.products();
        let product = repo.create(outlet, &new_product(None)).await.unwrap();

        let assigned = repo.assign_tier(outlet, product.id, Some(tier_id)).await.unwrap();
        assert_eq!(assigned.price_tier_id, Some(tier_id));

        let cleared = repo.assign_tier(outlet, product.id, None).await.unwrap();
        assert_eq!(cleared.price_tier_id, None);

        assert!(repo
            .assign_tier(other, product.id, None)
            .await
            .unwrap_err()
            .is_not_found());
        assert_eq!(repo.list_by_outlet(outlet).await.unwrap().len(), 1);
    }
}
