use std::sync::Arc;

use log::{debug, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Plan, PrincipalRole, Subscription};
use super::plan_resolver::{EffectiveFeature, PlanResolver};
use super::ports::{OrgDirectory, SubscriptionStore};

/// An active subscription together with its plan and the plan's effective
/// feature table. The feature table always comes from `PlanResolver`, never
/// from raw rows.
#[derive(Debug, Clone)]
pub struct ResolvedSubscription {
    pub subscription: Subscription,
    pub plan: Plan,
    pub features: Vec<EffectiveFeature>,
}

impl ResolvedSubscription {
    pub fn owner_id(&self) -> Uuid {
        self.subscription.owner_id
    }
}

/// Finds the subscription governing a principal by walking up the hierarchy
/// towards the root Admin.
#[derive(Clone)]
pub struct SubscriptionResolver {
    subscriptions: Arc<dyn SubscriptionStore>,
    org: Arc<dyn OrgDirectory>,
    plan_resolver: PlanResolver,
}

impl SubscriptionResolver {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        org: Arc<dyn OrgDirectory>,
        plan_resolver: PlanResolver,
    ) -> Self {
        Self {
            subscriptions,
            org,
            plan_resolver,
        }
    }

    /// Resolve the active subscription governing `principal_id`, probing the
    /// principal itself and then each ancestor in turn. When
    /// `agency_override` is given the walk starts from that agency instead
    /// of the acting principal.
    ///
    /// `None` is a valid, common state: a hierarchy without an active
    /// subscription is simply unrestricted.
    pub async fn active_subscription_for(
        &self,
        principal_id: &Uuid,
        agency_override: Option<&Uuid>,
    ) -> AppResult<Option<ResolvedSubscription>> {
        let start = *agency_override.unwrap_or(principal_id);
        let mut cursor = Some(start);
        let mut hops = 0;

        while let Some(node) = cursor {
            if let Some(subscription) =
                self.subscriptions.active_subscription_for_owner(&node).await?
            {
                debug!(
                    "Active subscription {} (plan {}) found on principal {} while resolving {}",
                    subscription.id, subscription.plan_id, node, principal_id
                );
                return Ok(Some(self.resolve(subscription).await?));
            }

            cursor = self.org.parent_of(&node).await?;
            hops += 1;
            // Hierarchy depth is bounded at two; anything deeper means a
            // corrupted parent chain.
            if hops > 4 {
                warn!(
                    "Aborting subscription resolution for {}: parent chain exceeds hierarchy depth",
                    principal_id
                );
                break;
            }
        }

        Ok(None)
    }

    async fn resolve(&self, subscription: Subscription) -> AppResult<ResolvedSubscription> {
        // Subscriptions are expected to sit on the root Admin; anything else
        // is a data problem worth surfacing, but usage still rolls up to
        // whatever owner the subscription names.
        if let Some(role) = self.org.role_of(&subscription.owner_id).await? {
            if role != PrincipalRole::Admin {
                warn!(
                    "Subscription {} is owned by {} with role {:?}; expected Admin",
                    subscription.id, subscription.owner_id, role
                );
            }
        }

        let plan = self
            .plan_resolver
            .plan_by_id(subscription.plan_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Plan {} referenced by subscription {} not found",
                    subscription.plan_id, subscription.id
                ))
            })?;
        let features = self.plan_resolver.resolve_features(&plan).await?;
        Ok(ResolvedSubscription {
            subscription,
            plan,
            features,
        })
    }
}
