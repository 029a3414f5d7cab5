use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::error::{AppError, AppResult};
use crate::models::{Plan, PlanFeature};
use crate::services::entitlement::ports::PlanStore;

#[derive(Debug)]
pub struct PlanRepository {
    db_pool: PgPool,
}

impl PlanRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    fn map_plan(row: PgRow) -> Plan {
        Plan {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            price: row.get("price"),
            billing_period: row.get("billing_period"),
            active: row.get("active"),
            stripe_price_id: row.get("stripe_price_id"),
        }
    }

    fn map_feature(row: PgRow) -> PlanFeature {
        PlanFeature {
            id: row.get("id"),
            plan_id: row.get("plan_id"),
            name: row.get("name"),
            value: row.get("value"),
            description: row.get("description"),
        }
    }
}

#[async_trait]
impl PlanStore for PlanRepository {
    async fn plan_by_id(&self, plan_id: i32) -> AppResult<Option<Plan>> {
        let query_str = "SELECT id, name, description, price, billing_period, active, stripe_price_id FROM plans WHERE id = $1";

        let record = sqlx::query(query_str)
            .bind(plan_id)
            .map(Self::map_plan)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to fetch plan: {}", e)))?;

        Ok(record)
    }

    async fn plan_by_name(&self, name: &str) -> AppResult<Option<Plan>> {
        let query_str = "SELECT id, name, description, price, billing_period, active, stripe_price_id FROM plans WHERE lower(name) = lower($1) LIMIT 1";

        let record = sqlx::query(query_str)
            .bind(name)
            .map(Self::map_plan)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to fetch plan by name: {}", e)))?;

        Ok(record)
    }

    async fn features_of(&self, plan_id: i32) -> AppResult<Vec<PlanFeature>> {
        let query_str = "SELECT id, plan_id, name, value, description FROM plan_features WHERE plan_id = $1 ORDER BY id";

        let records = sqlx::query(query_str)
            .bind(plan_id)
            .map(Self::map_feature)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to fetch plan features: {}", e)))?;

        Ok(records)
    }

    async fn list_active_plans(&self) -> AppResult<Vec<Plan>> {
        let query_str = "SELECT id, name, description, price, billing_period, active, stripe_price_id FROM plans WHERE active = true ORDER BY price, id";

        let records = sqlx::query(query_str)
            .map(Self::map_plan)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to fetch plans: {}", e)))?;

        Ok(records)
    }
}
