use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Plan, PlanFeature, Principal, PrincipalRole, Subscription};

/// Lookup surface for the organizational hierarchy. The engine never reads
/// role claims or parent links directly; everything goes through this trait
/// so the decision logic can be exercised without a database.
#[async_trait]
pub trait OrgDirectory: Send + Sync {
    /// The hierarchy node for the given id, `None` if unknown.
    async fn principal_by_id(&self, principal_id: &Uuid) -> AppResult<Option<Principal>>;

    /// Ids of the principals directly under `parent_id` holding `role`.
    async fn direct_children_with_role(
        &self,
        parent_id: &Uuid,
        role: PrincipalRole,
    ) -> AppResult<Vec<Uuid>>;

    /// Role of the given principal, `None` if the principal is unknown.
    async fn role_of(&self, principal_id: &Uuid) -> AppResult<Option<PrincipalRole>> {
        Ok(self.principal_by_id(principal_id).await?.map(|p| p.role))
    }

    /// Direct parent of the given principal. Admins have no parent.
    async fn parent_of(&self, principal_id: &Uuid) -> AppResult<Option<Uuid>> {
        Ok(self
            .principal_by_id(principal_id)
            .await?
            .and_then(|p| p.parent_id))
    }
}

/// Read access to plans and their feature rows.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn plan_by_id(&self, plan_id: i32) -> AppResult<Option<Plan>>;

    /// Case-insensitive lookup by plan name.
    async fn plan_by_name(&self, name: &str) -> AppResult<Option<Plan>>;

    /// Raw feature rows owned by the plan. Callers outside the engine should
    /// go through `PlanResolver::resolve_features` instead, which applies the
    /// Free -> Basic inheritance rule.
    async fn features_of(&self, plan_id: i32) -> AppResult<Vec<PlanFeature>>;

    /// Plans currently offered, for plan-management flows.
    async fn list_active_plans(&self) -> AppResult<Vec<Plan>>;
}

/// Read access to subscriptions.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// The currently active subscription owned by exactly this principal,
    /// if any. Recency and status filtering are the store's responsibility;
    /// at most one row is returned.
    async fn active_subscription_for_owner(&self, owner_id: &Uuid)
        -> AppResult<Option<Subscription>>;
}

/// Aggregate counts over the countable domain entities, filtered by a set
/// of owning-principal ids.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Non-archived properties owned by any of the given principals.
    async fn count_properties(&self, owner_ids: &[Uuid]) -> AppResult<i64>;

    async fn count_customers(&self, owner_ids: &[Uuid]) -> AppResult<i64>;

    async fn count_requests(&self, owner_ids: &[Uuid]) -> AppResult<i64>;
}
