// Entitlement lifecycle use cases

pub mod commands;
