//! EstateDesk Core Library
//!
//! Subscription entitlement and limit enforcement for the EstateDesk
//! multi-tenant real-estate platform. One root Admin holds the subscription
//! governing its whole Admin -> Agency -> Agent hierarchy; this crate
//! resolves the governing plan, counts hierarchy-scoped usage and decides
//! whether gated create operations and plan downgrades may proceed.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::AppSettings;
pub use error::{AppError, AppResult};
pub use services::entitlement::EntitlementService;
pub use services::entitlement::{DowngradeCompatibilityResponse, SubscriptionLimitStatusResponse};
