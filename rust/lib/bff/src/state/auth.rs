//! Auth state: stored at `auth/state`.

use serde::Serialize;

/// Authentication state: the UI reads this to decide what to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub phase: AuthPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthPhase {
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    pub const PATH: &'static str = "auth/state";

    pub fn signed_out() -> Self {
        Self {
            phase: AuthPhase::Unauthenticated,
            user_id: None,
            busy: false,
            error: None,
        }
    }

    pub fn signed_in(user_id: Option<String>) -> Self {
        Self {
            phase: AuthPhase::Authenticated,
            user_id,
            busy: false,
            error: None,
        }
    }
}
