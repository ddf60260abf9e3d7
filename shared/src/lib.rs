//! Wire types shared between the entitlements server and its clients.

pub mod protocol;

pub use protocol::*;
