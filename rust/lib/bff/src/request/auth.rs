//! Auth requests.

use serde::{Deserialize, Serialize};

/// Login with email + password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

impl LoginReq {
    pub const PATH: &'static str = "auth/login";
}

/// Logout: revoke the stored token and clear the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutReq;

impl LogoutReq {
    pub const PATH: &'static str = "auth/logout";
}
