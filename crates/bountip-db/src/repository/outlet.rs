//! # Outlet Repository
//!
//! Outlets are always looked up through their owning business; an outlet of
//! another business is indistinguishable from a missing one.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bountip_core::{NewOutlet, Outlet};

/// Repository for outlet database operations.
#[derive(Debug, Clone)]
pub struct OutletRepository {
    pool: SqlitePool,
}

impl OutletRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OutletRepository { pool }
    }

    /// Inserts an outlet for `business_id`.
    pub async fn create(&self, business_id: &str, outlet: &NewOutlet) -> DbResult<Outlet> {
        debug!(business_id = %business_id, name = %outlet.name, "Inserting outlet");

        let now = Utc::now();

        let created = sqlx::query_as::<_, Outlet>(
            r#"
            INSERT INTO outlets (business_id, name, currency, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING id, business_id, name, currency, created_at, updated_at
            "#,
        )
        .bind(business_id)
        .bind(&outlet.name)
        .bind(&outlet.currency)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Gets an outlet by ID within a business.
    ///
    /// ## Returns
    /// * `Ok(Some(Outlet))` - Outlet found and owned by `business_id`
    /// * `Ok(None)` - Missing or owned by another business
    pub async fn get(&self, business_id: &str, id: i64) -> DbResult<Option<Outlet>> {
        let outlet = sqlx::query_as::<_, Outlet>(
            r#"
            SELECT id, business_id, name, currency, created_at, updated_at
            FROM outlets
            WHERE id = ?1 AND business_id = ?2
            "#,
        )
        .bind(id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(outlet)
    }

    /// Like [`get`](Self::get) but a missing outlet is `DbError::NotFound`.
    pub async fn require(&self, business_id: &str, id: i64) -> DbResult<Outlet> {
        self.get(business_id, id)
            .await?
            .ok_or_else(|| DbError::not_found("Outlet", id))
    }

    /// Lists the outlets of a business, oldest first.
    pub async fn list_by_business(&self, business_id: &str) -> DbResult<Vec<Outlet>> {
        let outlets = sqlx::query_as::<_, Outlet>(
            r#"
            SELECT id, business_id, name, currency, created_at, updated_at
            FROM outlets
            WHERE business_id = ?1
            ORDER BY id
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(outlets)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use bountip_core::NewOutlet;

    #[tokio::test]
    async fn test_outlets_are_scoped_by_business() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.outlets();

        let lekki = repo
            .create("biz-1", &NewOutlet::parse("Lekki", None, "NGN").unwrap())
            .await
            .unwrap();
        assert_eq!(lekki.business_id, "biz-1");
        assert_eq!(lekki.currency, "NGN");

        assert!(repo.get("biz-1", lekki.id).await.unwrap().is_some());
        assert!(repo.get("biz-2", lekki.id).await.unwrap().is_none());
        assert!(repo.require("biz-2", lekki.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_by_business() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.outlets();

        for name in ["Ikeja", "Yaba"] {
            repo.create("biz-1", &NewOutlet::parse(name, Some("usd"), "NGN").unwrap())
                .await
                .unwrap();
        }
        repo.create("biz-2", &NewOutlet::parse("Abuja", None, "NGN").unwrap())
            .await
            .unwrap();

        let outlets = repo.list_by_business("biz-1").await.unwrap();
        assert_eq!(outlets.len(), 2);
        assert_eq!(outlets[0].name, "Ikeja");
        assert_eq!(outlets[1].currency, "USD");
    }
}
