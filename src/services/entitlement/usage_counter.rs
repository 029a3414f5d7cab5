use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::PrincipalRole;
use super::feature_name::FeatureKind;
use super::ports::{InventoryStore, OrgDirectory};

/// Counts current usage for a feature kind across the hierarchy rooted at an
/// Admin. Usage always rolls up to the Admin no matter which tier created
/// the resource, but the tiers considered differ by kind:
///
/// - agencies: direct children of the Admin with role Agency;
/// - agents: only those under a counted Agency. An Agent created directly
///   under the Admin is not counted here;
/// - properties, customers, requests: owned by the Admin, a direct Agency,
///   or an Agent under a direct Agency (three-tier union).
#[derive(Clone)]
pub struct UsageCounter {
    org: Arc<dyn OrgDirectory>,
    inventory: Arc<dyn InventoryStore>,
}

impl UsageCounter {
    pub fn new(org: Arc<dyn OrgDirectory>, inventory: Arc<dyn InventoryStore>) -> Self {
        Self { org, inventory }
    }

    pub async fn usage(&self, kind: FeatureKind, admin_root: &Uuid) -> AppResult<i64> {
        let count = match kind {
            FeatureKind::MaxAgencies => self.direct_agencies(admin_root).await?.len() as i64,
            FeatureKind::MaxAgents => {
                let mut total = 0i64;
                for agency in self.direct_agencies(admin_root).await? {
                    total += self
                        .org
                        .direct_children_with_role(&agency, PrincipalRole::Agent)
                        .await?
                        .len() as i64;
                }
                total
            }
            FeatureKind::MaxProperties => {
                let owners = self.rollup_owners(admin_root).await?;
                self.inventory.count_properties(&owners).await?
            }
            FeatureKind::MaxCustomers => {
                let owners = self.rollup_owners(admin_root).await?;
                self.inventory.count_customers(&owners).await?
            }
            FeatureKind::MaxRequests => {
                let owners = self.rollup_owners(admin_root).await?;
                self.inventory.count_requests(&owners).await?
            }
        };

        debug!(
            "Usage for {} under root {}: {}",
            kind.canonical_name(),
            admin_root,
            count
        );
        Ok(count)
    }

    async fn direct_agencies(&self, admin_root: &Uuid) -> AppResult<Vec<Uuid>> {
        self.org
            .direct_children_with_role(admin_root, PrincipalRole::Agency)
            .await
    }

    /// The owner ids whose entities count against the root Admin: the Admin
    /// itself, its direct Agencies and the Agents under those Agencies.
    async fn rollup_owners(&self, admin_root: &Uuid) -> AppResult<Vec<Uuid>> {
        let mut owners = vec![*admin_root];
        let agencies = self.direct_agencies(admin_root).await?;
        for agency in &agencies {
            let agents = self
                .org
                .direct_children_with_role(agency, PrincipalRole::Agent)
                .await?;
            owners.extend(agents);
        }
        owners.extend(agencies);
        Ok(owners)
    }
}
