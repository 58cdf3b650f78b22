//! Shared types for the RAMP client
//!
//! Wire-level request/response types for the auth service and the
//! case-management resource APIs, plus the permission tags gated views
//! declare.

pub mod client;
pub mod models;
pub mod permission;
pub mod response;

// Re-exports
pub use permission::Permission;
pub use response::ErrorBody;
pub use serde::{Deserialize, Serialize};
