//! RAMP Client - session & secure-request layer
//!
//! Cookie-session client for the RAMP case-management API. Keeps the
//! authentication state for the client's lifetime and applies the CSRF
//! double-submit protocol to every state-changing request.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod csrf;
pub mod error;
pub mod http;
pub mod session;
pub mod views;

pub use auth::AuthService;
pub use client::RampClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{OutboundRequest, SecureHttpClient};
pub use session::{AuthenticatedUser, SessionHandle, SessionState, SessionStatus, SessionStore};

// Re-export shared types for convenience
pub use shared::Permission;
pub use shared::client::{LoginRequest, LoginResponse};
pub use shared::models::{
    ActivatePlanResponse, AddGoalRequest, AddGoalResponse, CreatePlanResponse, SystemLogEntry,
    UserPii, UserPiiResponse,
};
