use log::{debug, info};
use uuid::Uuid;

use crate::error::AppResult;
use super::EntitlementService;
use super::feature_name::FeatureKind;
use super::responses::{DowngradeCompatibilityResponse, FeatureCompatibility};

impl EntitlementService {
    /// Decide whether switching the hierarchy governing `principal_id` to
    /// `target_plan_id` is safe given current usage.
    ///
    /// Unlike `check_feature_limit` this is fail-closed: a plan switch
    /// affects billing, so an unknown target plan blocks the change instead
    /// of waving it through. Being exactly at a new cap is compatible; only
    /// strictly exceeding one blocks (existing resources stay, only future
    /// creation is gated).
    pub async fn check_downgrade_compatibility(
        &self,
        principal_id: &Uuid,
        target_plan_id: i32,
        agency_override: Option<&Uuid>,
    ) -> AppResult<DowngradeCompatibilityResponse> {
        let Some(target) = self.plan_resolver.plan_by_id(target_plan_id).await? else {
            info!(
                "Downgrade check for {} refused: target plan {} not found",
                principal_id, target_plan_id
            );
            return Ok(DowngradeCompatibilityResponse {
                can_downgrade: false,
                target_plan_id,
                target_plan_name: String::new(),
                features: Vec::new(),
                exceeded_limits_count: 0,
                message: Some(format!("Target plan {} not found", target_plan_id)),
            });
        };

        let features = self.plan_resolver.resolve_features(&target).await?;
        if features.is_empty() {
            return Ok(DowngradeCompatibilityResponse {
                can_downgrade: true,
                target_plan_id,
                target_plan_name: target.name,
                features: Vec::new(),
                exceeded_limits_count: 0,
                message: Some("Target plan has no feature limits".to_string()),
            });
        }

        // Usage is always measured against the hierarchy of the current
        // subscription owner; without one, the acting principal is the root.
        let owner = self
            .subscription_resolver
            .active_subscription_for(principal_id, agency_override)
            .await?
            .map(|resolved| resolved.owner_id())
            .unwrap_or(*principal_id);

        let mut report = Vec::with_capacity(features.len());
        let mut exceeded_limits_count = 0;

        for feature in &features {
            let usage = match FeatureKind::from_name(&feature.name) {
                Some(kind) => self.usage_counter.usage(kind, &owner).await?,
                None => 0,
            };
            let is_exceeded = feature.limit.is_exceeded_by(usage);
            if is_exceeded {
                exceeded_limits_count += 1;
            }

            let message = if is_exceeded {
                format!(
                    "Current usage {} exceeds the new limit of {}",
                    usage,
                    feature.limit.cap().unwrap_or_default()
                )
            } else {
                "Within the new limit".to_string()
            };

            report.push(FeatureCompatibility {
                feature_name: feature.name.clone(),
                feature_display_name: feature.display_name.clone(),
                new_plan_limit: feature.limit.cap(),
                current_usage: usage,
                is_exceeded,
                message,
            });
        }

        let can_downgrade = exceeded_limits_count == 0;
        let message = if can_downgrade {
            format!("Downgrade to '{}' is compatible with current usage", target.name)
        } else {
            format!(
                "{} feature limit(s) would be exceeded after downgrading to '{}'",
                exceeded_limits_count, target.name
            )
        };

        debug!(
            "Downgrade check for {} to plan '{}': {} exceeded",
            principal_id, target.name, exceeded_limits_count
        );

        Ok(DowngradeCompatibilityResponse {
            can_downgrade,
            target_plan_id,
            target_plan_name: target.name,
            features: report,
            exceeded_limits_count,
            message: Some(message),
        })
    }
}
