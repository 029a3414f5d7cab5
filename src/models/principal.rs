use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Role of a node in the organizational hierarchy. The hierarchy is a
/// forest of depth at most two: Admin -> Agency -> Agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrincipalRole {
    Admin,
    Agency,
    Agent,
}

impl PrincipalRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalRole::Admin => "Admin",
            PrincipalRole::Agency => "Agency",
            PrincipalRole::Agent => "Agent",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "Admin" => Ok(PrincipalRole::Admin),
            "Agency" => Ok(PrincipalRole::Agency),
            "Agent" => Ok(PrincipalRole::Agent),
            other => Err(AppError::Validation(format!(
                "Unknown principal role: {}",
                other
            ))),
        }
    }
}

/// A hierarchy node. Admins have no parent; Agencies and Agents point at
/// the node that created them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: Uuid,
    pub role: PrincipalRole,
    pub parent_id: Option<Uuid>,
}
