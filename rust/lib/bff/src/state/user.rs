//! Signed-in user chrome: the profile menu at `user/menu`.
//!
//! Raw user info lives at `user/info` as `QueryState<UserInfo>`.

use clover_client::UserInfo;
use serde::Serialize;

/// Avatar, full name and `@lastname` handle shown in the header menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileMenu {
    pub avatar: Option<String>,
    pub name: String,
    pub handle: String,
}

impl ProfileMenu {
    pub const PATH: &'static str = "user/menu";
    pub const INFO_PATH: &'static str = "user/info";

    pub fn from_info(info: &UserInfo) -> Self {
        let name = format!("{} {}", info.firstname, info.lastname)
            .trim()
            .to_string();
        Self {
            avatar: info.avatar.clone(),
            name,
            handle: format!("@{}", info.lastname),
        }
    }
}

/// Where a viewed profile lands.
pub fn profile_path(user_id: &str) -> String {
    format!("profile/{}", user_id)
}

/// Where a viewed group lands.
pub fn group_path(group_id: &str) -> String {
    format!("group/{}", group_id)
}
