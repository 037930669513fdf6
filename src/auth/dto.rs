use serde::{Deserialize, Serialize};

/// Request body for user registration. Fields are optional at the serde
/// layer so that a missing field surfaces as a validation message naming
/// the field rather than a body-deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "type")]
    pub role: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Bare status message returned on success; no token or credential
/// artifact is issued.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
