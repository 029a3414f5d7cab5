use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Principal, PrincipalRole};
use crate::services::entitlement::ports::OrgDirectory;

/// Hierarchy lookups over the `principals` table (id, role, parent_id).
/// Role storage is free text at the edge; rows with a role string the
/// engine does not know are surfaced as validation errors rather than
/// silently skipped.
pub struct OrgRepository {
    db_pool: PgPool,
}

impl OrgRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OrgDirectory for OrgRepository {
    async fn principal_by_id(&self, principal_id: &Uuid) -> AppResult<Option<Principal>> {
        let record: Option<(Uuid, String, Option<Uuid>)> =
            sqlx::query_as("SELECT id, role, parent_id FROM principals WHERE id = $1")
                .bind(principal_id)
                .fetch_optional(&self.db_pool)
                .await
                .map_err(|e| AppError::Database(format!("Failed to fetch principal: {}", e)))?;

        record
            .map(|(id, role, parent_id)| {
                Ok(Principal {
                    id,
                    role: PrincipalRole::parse(&role)?,
                    parent_id,
                })
            })
            .transpose()
    }

    async fn direct_children_with_role(
        &self,
        parent_id: &Uuid,
        role: PrincipalRole,
    ) -> AppResult<Vec<Uuid>> {
        let records = sqlx::query("SELECT id FROM principals WHERE parent_id = $1 AND role = $2")
            .bind(parent_id)
            .bind(role.as_str())
            .map(|row: sqlx::postgres::PgRow| row.get::<Uuid, _>("id"))
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to fetch principals: {}", e)))?;

        Ok(records)
    }
}
