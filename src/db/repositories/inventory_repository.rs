use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::entitlement::ports::InventoryStore;

/// COUNT-class aggregate queries over the countable domain entities,
/// filtered by a set of owning-principal ids.
pub struct InventoryRepository {
    db_pool: PgPool,
}

impl InventoryRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    async fn count(&self, query_str: &str, owner_ids: &[Uuid]) -> AppResult<i64> {
        if owner_ids.is_empty() {
            return Ok(0);
        }

        let (count,): (i64,) = sqlx::query_as(query_str)
            .bind(owner_ids)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to count entities: {}", e)))?;

        Ok(count)
    }
}

#[async_trait]
impl InventoryStore for InventoryRepository {
    async fn count_properties(&self, owner_ids: &[Uuid]) -> AppResult<i64> {
        self.count(
            "SELECT COUNT(*) FROM properties WHERE owner_id = ANY($1) AND archived = false",
            owner_ids,
        )
        .await
    }

    async fn count_customers(&self, owner_ids: &[Uuid]) -> AppResult<i64> {
        self.count(
            "SELECT COUNT(*) FROM customers WHERE owner_id = ANY($1)",
            owner_ids,
        )
        .await
    }

    async fn count_requests(&self, owner_ids: &[Uuid]) -> AppResult<i64> {
        self.count(
            "SELECT COUNT(*) FROM requests WHERE owner_id = ANY($1)",
            owner_ids,
        )
        .await
    }
}
