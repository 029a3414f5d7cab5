use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// A subscription plan as stored in the `plans` table. One plan governs an
/// entire Admin hierarchy through the subscription its root Admin holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub billing_period: String,
    pub active: bool,
    pub stripe_price_id: Option<String>,
}

impl Plan {
    /// The trial plan mirrors Basic's limits instead of carrying its own
    /// seed rows (see PlanResolver).
    pub fn is_free_plan(&self) -> bool {
        self.name.eq_ignore_ascii_case("Free")
    }
}

/// A single named capacity limit owned by a plan.
///
/// `name` is a free-text key; seed data historically uses snake_case
/// (`max_agencies`) while some call sites query PascalCase (`MaxAgencies`).
/// `value` is a string-encoded limit: empty, `unlimited` or `-1` mean
/// uncapped, anything else is expected to parse as an integer cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFeature {
    pub id: i32,
    pub plan_id: i32,
    pub name: String,
    pub value: Option<String>,
    pub description: Option<String>,
}
