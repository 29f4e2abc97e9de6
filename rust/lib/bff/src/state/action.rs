//! Progress of one-shot mutations that own no card or modal.
//!
//! Stored at `action/{name}`. Prior view state is never rolled back; a
//! shell that wants to show a spinner or an inline error reads these.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionState {
    pub busy: bool,
    pub error: Option<String>,
}

impl ActionState {
    pub const CONNECT: &'static str = "action/connect";
    pub const JOIN_GROUP: &'static str = "action/group/join";
    pub const SHARE: &'static str = "action/share";
    pub const LOGOUT: &'static str = "action/logout";

    pub fn busy() -> Self {
        Self {
            busy: true,
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            busy: false,
            error: Some(error.to_string()),
        }
    }
}
