//! The subscription entitlement engine: resolves which plan governs a
//! hierarchy, counts usage across its tiers, and decides whether gated
//! actions and plan downgrades may proceed.
//!
//! Pure read side. Nothing here mutates plans, features or subscriptions,
//! and the checks are advisory (the count and the subsequent create are not
//! atomic).

pub mod downgrade;
pub mod feature_name;
pub mod limit_checker;
pub mod limit_value;
pub mod plan_resolver;
pub mod ports;
pub mod responses;
pub mod subscription_resolver;
pub mod usage_counter;

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::repositories::inventory_repository::InventoryRepository;
use crate::db::repositories::org_repository::OrgRepository;
use crate::db::repositories::plan_repository::PlanRepository;
use crate::db::repositories::subscription_repository::SubscriptionRepository;
use crate::error::AppResult;

use feature_name::FeatureKind;
use plan_resolver::PlanResolver;
use ports::{InventoryStore, OrgDirectory, PlanStore, SubscriptionStore};
use responses::{FeatureUsage, PlanSummary, SubscriptionOverviewResponse};
use subscription_resolver::SubscriptionResolver;
use usage_counter::UsageCounter;

pub use limit_value::FeatureLimit;
pub use plan_resolver::EffectiveFeature;
pub use responses::{
    DowngradeCompatibilityResponse, FeatureCompatibility, SubscriptionLimitStatusResponse,
};
pub use subscription_resolver::ResolvedSubscription;

/// Facade over the engine's components, wired once at startup and shared by
/// the business services that guard create operations.
#[derive(Clone)]
pub struct EntitlementService {
    plan_resolver: PlanResolver,
    subscription_resolver: SubscriptionResolver,
    usage_counter: UsageCounter,
}

impl EntitlementService {
    pub fn new(
        plans: Arc<dyn PlanStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        org: Arc<dyn OrgDirectory>,
        inventory: Arc<dyn InventoryStore>,
    ) -> Self {
        let plan_resolver = PlanResolver::new(plans);
        let subscription_resolver =
            SubscriptionResolver::new(subscriptions, org.clone(), plan_resolver.clone());
        let usage_counter = UsageCounter::new(org, inventory);
        Self {
            plan_resolver,
            subscription_resolver,
            usage_counter,
        }
    }

    /// Wire the engine against the sqlx repositories.
    pub fn from_pool(db_pool: PgPool) -> Self {
        Self::new(
            Arc::new(PlanRepository::new(db_pool.clone())),
            Arc::new(SubscriptionRepository::new(db_pool.clone())),
            Arc::new(OrgRepository::new(db_pool.clone())),
            Arc::new(InventoryRepository::new(db_pool)),
        )
    }

    /// The active plan governing a principal plus current usage for each of
    /// its effective features, for account dashboards. `None` when no
    /// subscription governs the principal.
    pub async fn subscription_overview(
        &self,
        principal_id: &Uuid,
        agency_override: Option<&Uuid>,
    ) -> AppResult<Option<SubscriptionOverviewResponse>> {
        let resolved = self
            .subscription_resolver
            .active_subscription_for(principal_id, agency_override)
            .await?;
        let Some(resolved) = resolved else {
            return Ok(None);
        };

        let owner = resolved.owner_id();
        let mut features = Vec::with_capacity(resolved.features.len());
        for feature in &resolved.features {
            let usage = match FeatureKind::from_name(&feature.name) {
                Some(kind) => self.usage_counter.usage(kind, &owner).await?,
                None => 0,
            };
            features.push(FeatureUsage {
                feature_name: feature.name.clone(),
                feature_display_name: feature.display_name.clone(),
                limit: feature.raw_value.clone(),
                current_usage: usage,
                remaining: feature.limit.remaining(usage),
            });
        }

        Ok(Some(SubscriptionOverviewResponse {
            plan_id: resolved.plan.id,
            plan_name: resolved.plan.name.clone(),
            status: resolved.subscription.status,
            ends_at: resolved.subscription.ends_at,
            auto_renew: resolved.subscription.auto_renew,
            features,
        }))
    }

    /// Plans currently offered, each with its effective feature table, for
    /// plan-management flows.
    pub async fn plan_catalog(&self) -> AppResult<Vec<PlanSummary>> {
        let plans = self.plan_resolver.list_active_plans().await?;
        let mut catalog = Vec::with_capacity(plans.len());
        for plan in plans {
            let features = self.plan_resolver.resolve_features(&plan).await?;
            catalog.push(PlanSummary { plan, features });
        }
        Ok(catalog)
    }
}
