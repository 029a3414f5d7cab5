pub mod inventory_repository;
pub mod org_repository;
pub mod plan_repository;
pub mod subscription_repository;

pub use inventory_repository::InventoryRepository;
pub use org_repository::OrgRepository;
pub use plan_repository::PlanRepository;
pub use subscription_repository::SubscriptionRepository;
