// Application layer - use cases
// Orchestrates domain logic, depends on domain layer only

pub mod entitlements;
pub mod discussion;
pub mod ports;
