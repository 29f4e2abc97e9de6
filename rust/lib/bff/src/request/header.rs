//! Header requests: search, follow, groups and viewport.

use serde::{Deserialize, Serialize};

use crate::state::SearchMode;

/// A keystroke in the search box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInputReq {
    pub term: String,
}

impl SearchInputReq {
    pub const PATH: &'static str = "header/search/input";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchModeReq {
    pub mode: SearchMode,
}

impl SearchModeReq {
    pub const PATH: &'static str = "header/search/mode";
}

/// Click outside the search panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchClearReq;

impl SearchClearReq {
    pub const PATH: &'static str = "header/search/clear";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOpenReq;

impl SearchOpenReq {
    pub const PATH: &'static str = "header/search/open";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCloseReq;

impl SearchCloseReq {
    pub const PATH: &'static str = "header/search/close";
}

/// Follow or unfollow a user from a search row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectUserReq {
    pub user_id: String,
    pub last_name: String,
    /// Whether the viewer follows the user right now.
    pub connected: bool,
}

impl ConnectUserReq {
    pub const PATH: &'static str = "header/connect";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupReq {
    pub group_id: String,
}

impl JoinGroupReq {
    pub const PATH: &'static str = "header/group/join";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeReq {
    pub width: u32,
}

impl ResizeReq {
    pub const PATH: &'static str = "viewport/resize";
}
