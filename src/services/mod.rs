pub mod entitlement;

// Re-export commonly used types
pub use entitlement::EntitlementService;
