use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Subscription, SubscriptionStatus};
use crate::services::entitlement::ports::SubscriptionStore;

pub struct SubscriptionRepository {
    db_pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    fn map_subscription(row: PgRow) -> Result<Subscription, sqlx::Error> {
        let status: String = row.get("status");
        let status = SubscriptionStatus::parse(&status)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Subscription {
            id: row.get("id"),
            owner_id: row.get("owner_id"),
            plan_id: row.get("plan_id"),
            status,
            starts_at: row.get("starts_at"),
            ends_at: row.get("ends_at"),
            auto_renew: row.get("auto_renew"),
            stripe_customer_id: row.get("stripe_customer_id"),
            stripe_subscription_id: row.get("stripe_subscription_id"),
        })
    }
}

#[async_trait]
impl SubscriptionStore for SubscriptionRepository {
    // The engine assumes at most one active subscription per owner; recency
    // ordering breaks ties if billing ever leaves two behind.
    async fn active_subscription_for_owner(
        &self,
        owner_id: &Uuid,
    ) -> AppResult<Option<Subscription>> {
        let query_str = r#"
            SELECT id, owner_id, plan_id, status, starts_at, ends_at,
                   auto_renew, stripe_customer_id, stripe_subscription_id
            FROM subscriptions
            WHERE owner_id = $1
              AND status = 'active'
              AND ends_at > now()
            ORDER BY starts_at DESC
            LIMIT 1
        "#;

        let record = sqlx::query(query_str)
            .bind(owner_id)
            .try_map(Self::map_subscription)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to fetch subscription: {}", e)))?;

        Ok(record)
    }
}
