use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Plan, SubscriptionStatus};
use super::plan_resolver::EffectiveFeature;

/// Answer to "can this gated action proceed?". `limit` carries the raw
/// stored value string; `remaining` is absent for uncapped features.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionLimitStatusResponse {
    pub can_proceed: bool,
    pub feature_name: String,
    pub limit: Option<String>,
    pub current_usage: i64,
    pub limit_reached: bool,
    pub remaining: Option<i64>,
    pub message: Option<String>,
}

/// Per-feature entry of a downgrade compatibility report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCompatibility {
    pub feature_name: String,
    pub feature_display_name: String,
    pub new_plan_limit: Option<i64>,
    pub current_usage: i64,
    pub is_exceeded: bool,
    pub message: String,
}

/// Answer to "is switching to this plan safe given current usage?".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DowngradeCompatibilityResponse {
    pub can_downgrade: bool,
    pub target_plan_id: i32,
    pub target_plan_name: String,
    pub features: Vec<FeatureCompatibility>,
    pub exceeded_limits_count: usize,
    pub message: Option<String>,
}

/// Current usage of one effective feature, for account dashboards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureUsage {
    pub feature_name: String,
    pub feature_display_name: String,
    pub limit: Option<String>,
    pub current_usage: i64,
    pub remaining: Option<i64>,
}

/// A plan offered for purchase together with its effective feature table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub plan: Plan,
    pub features: Vec<EffectiveFeature>,
}

/// The active plan governing a principal plus per-feature usage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionOverviewResponse {
    pub plan_id: i32,
    pub plan_name: String,
    pub status: SubscriptionStatus,
    pub ends_at: DateTime<Utc>,
    pub auto_renew: bool,
    pub features: Vec<FeatureUsage>,
}
