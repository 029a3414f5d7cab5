use log::debug;
use uuid::Uuid;

use crate::error::AppResult;
use super::EntitlementService;
use super::feature_name::{FeatureKind, names_match};
use super::responses::SubscriptionLimitStatusResponse;

impl EntitlementService {
    /// Decide whether a gated create operation may proceed for the acting
    /// principal. Advisory only: the caller performs the actual create, and
    /// two concurrent passes can jointly overshoot a cap by one.
    ///
    /// Fail-open throughout: no active subscription means no restriction,
    /// and a feature the active plan does not configure never blocks.
    pub async fn check_feature_limit(
        &self,
        principal_id: &Uuid,
        feature_name: &str,
        agency_override: Option<&Uuid>,
    ) -> AppResult<SubscriptionLimitStatusResponse> {
        let resolved = self
            .subscription_resolver
            .active_subscription_for(principal_id, agency_override)
            .await?;

        let Some(resolved) = resolved else {
            debug!(
                "No active subscription governs {}; allowing '{}'",
                principal_id, feature_name
            );
            return Ok(SubscriptionLimitStatusResponse {
                can_proceed: true,
                feature_name: feature_name.to_string(),
                limit: None,
                current_usage: 0,
                limit_reached: false,
                remaining: None,
                message: Some("No active subscription; no limits apply".to_string()),
            });
        };

        let feature = resolved
            .features
            .iter()
            .find(|f| names_match(&f.name, feature_name));

        let Some(feature) = feature else {
            let known: Vec<&str> = resolved.features.iter().map(|f| f.name.as_str()).collect();
            debug!(
                "Feature '{}' not configured on plan '{}'; allowing",
                feature_name, resolved.plan.name
            );
            return Ok(SubscriptionLimitStatusResponse {
                can_proceed: true,
                feature_name: feature_name.to_string(),
                limit: None,
                current_usage: 0,
                limit_reached: false,
                remaining: None,
                message: Some(format!(
                    "Feature '{}' is not configured on plan '{}'; known features: [{}]",
                    feature_name,
                    resolved.plan.name,
                    known.join(", ")
                )),
            });
        };

        let usage = match FeatureKind::from_name(feature_name) {
            Some(kind) => self.usage_counter.usage(kind, &resolved.owner_id()).await?,
            None => 0,
        };

        let limit_reached = feature.limit.is_reached(usage);
        let remaining = feature.limit.remaining(usage);
        let message = if limit_reached {
            Some(format!(
                "{} limit reached on plan '{}': {} in use, limit is {}",
                feature.display_name,
                resolved.plan.name,
                usage,
                feature.limit.cap().unwrap_or_default()
            ))
        } else {
            None
        };

        Ok(SubscriptionLimitStatusResponse {
            can_proceed: !limit_reached,
            feature_name: feature_name.to_string(),
            limit: feature.raw_value.clone(),
            current_usage: usage,
            limit_reached,
            remaining,
            message,
        })
    }
}
