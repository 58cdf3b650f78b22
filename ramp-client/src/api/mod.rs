//! Resource APIs
//!
//! Thin typed wrappers over the case-management endpoints. They go through
//! [`SecureHttpClient`](crate::http::SecureHttpClient) like everything else
//! and return server errors untouched; session handling is left to the
//! caller.

mod audit;
mod plans;
mod users;
