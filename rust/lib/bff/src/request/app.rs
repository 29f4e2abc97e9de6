//! App-level requests.

use serde::{Deserialize, Serialize};

/// Restore the session and pick the first route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitializeReq;

impl InitializeReq {
    pub const PATH: &'static str = "app/initialize";
}

/// Load the signed-in user for the profile menu.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadUserInfoReq;

impl LoadUserInfoReq {
    pub const PATH: &'static str = "user/info/load";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenProfileReq {
    pub user_id: String,
}

impl OpenProfileReq {
    pub const PATH: &'static str = "profile/open";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGroupReq {
    pub group_id: String,
}

impl OpenGroupReq {
    pub const PATH: &'static str = "group/open";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DismissToastReq {
    pub id: u64,
}

impl DismissToastReq {
    pub const PATH: &'static str = "toast/dismiss";
}
