use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::error::AppResult;
use crate::models::{Plan, PlanFeature};
use super::feature_name::display_name;
use super::limit_value::FeatureLimit;
use super::ports::PlanStore;

/// A feature row after resolution: limit parsed once, display name
/// precomputed, and `plan_id` always pointing at the plan the caller asked
/// about even when the row was inherited from another plan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveFeature {
    pub plan_id: i32,
    pub name: String,
    pub display_name: String,
    pub raw_value: Option<String>,
    #[serde(skip)]
    pub limit: FeatureLimit,
    pub description: Option<String>,
}

impl EffectiveFeature {
    fn from_row(row: PlanFeature) -> Self {
        let limit = FeatureLimit::parse(row.value.as_deref());
        EffectiveFeature {
            plan_id: row.plan_id,
            display_name: display_name(&row.name),
            name: row.name,
            raw_value: row.value,
            limit,
            description: row.description,
        }
    }
}

/// The single entry point for a plan's effective feature table. Nothing else
/// in the engine reads raw `PlanFeature` rows.
#[derive(Clone)]
pub struct PlanResolver {
    plans: Arc<dyn PlanStore>,
}

impl PlanResolver {
    pub fn new(plans: Arc<dyn PlanStore>) -> Self {
        Self { plans }
    }

    pub async fn plan_by_id(&self, plan_id: i32) -> AppResult<Option<Plan>> {
        self.plans.plan_by_id(plan_id).await
    }

    pub async fn list_active_plans(&self) -> AppResult<Vec<Plan>> {
        self.plans.list_active_plans().await
    }

    /// Resolve the plan's effective features.
    ///
    /// The Free plan is a short trial that mirrors Basic's limits instead of
    /// duplicating them in seed data, so a Free plan with no feature rows of
    /// its own borrows Basic's rows. The borrowed rows are rewritten to
    /// carry the Free plan's id, so callers never see Basic leak through.
    /// Evaluated per call; nothing is cached here.
    pub async fn resolve_features(&self, plan: &Plan) -> AppResult<Vec<EffectiveFeature>> {
        let mut rows = self.plans.features_of(plan.id).await?;

        if rows.is_empty() && plan.is_free_plan() {
            if let Some(basic) = self.plans.plan_by_name("Basic").await? {
                rows = self.plans.features_of(basic.id).await?;
                for row in &mut rows {
                    row.plan_id = plan.id;
                }
                debug!(
                    "Plan '{}' ({}) has no features; inheriting {} feature(s) from '{}'",
                    plan.name,
                    plan.id,
                    rows.len(),
                    basic.name
                );
            }
        }

        Ok(rows.into_iter().map(EffectiveFeature::from_row).collect())
    }
}
