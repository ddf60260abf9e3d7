// Entitlement commands

pub mod create_entitlement;
pub mod get_entitlement;
pub mod list_entitlements;
pub mod revoke_entitlement;

pub use create_entitlement::CreateEntitlementCommand;
pub use revoke_entitlement::RevokeOutcome;
