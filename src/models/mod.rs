pub mod plan;
pub mod principal;
pub mod subscription;

pub use plan::{Plan, PlanFeature};
pub use principal::{Principal, PrincipalRole};
pub use subscription::{Subscription, SubscriptionStatus};
