//! Permission tags
//!
//! Codes the server checks in its permission decorators. The client never
//! enforces them; views only declare which one they expect the current role
//! to hold.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Decrypting and reading a user's personal information
    ViewPii,
    /// Creating support plan drafts and their goals
    #[serde(rename = "CREATE_PLAN")]
    PlanCreate,
    /// Reading the audit trail
    SystemLogRead,
}

impl Permission {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ViewPii => "VIEW_PII",
            Self::PlanCreate => "CREATE_PLAN",
            Self::SystemLogRead => "SYSTEM_LOG_READ",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
