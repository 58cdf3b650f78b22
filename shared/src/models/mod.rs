//! Resource models
//!
//! Payloads of the case-management resource APIs. Field names follow the
//! server's snake_case JSON exactly; nothing is renamed on the way through.
//! All IDs are `i64`.

pub mod audit;
pub mod pii;
pub mod plan;

// Re-exports
pub use audit::*;
pub use pii::*;
pub use plan::*;
