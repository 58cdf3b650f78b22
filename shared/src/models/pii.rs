//! User PII Model

use serde::{Deserialize, Serialize};

/// Response of `GET /users/{id}/pii` (requires `VIEW_PII`)
///
/// A user without a PII record comes back with `pii` absent and a `msg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPiiResponse {
    pub id: i64,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pii: Option<UserPii>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

/// Decrypted personal information of a service user
///
/// Every column is nullable server-side; nulls are kept as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPii {
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name_kana: Option<String>,
    #[serde(default)]
    pub first_name_kana: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    /// 受給者証番号
    #[serde(default)]
    pub certificate_number: Option<String>,
}
