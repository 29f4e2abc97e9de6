//! Endpoint paths, relative to the base URL.

pub const LOGIN: &str = "/api/v1/user/login";
pub const REGISTER: &str = "/api/v1/user/register";
pub const LOGOUT: &str = "/api/v1/user/logout";
pub const USER_INFO: &str = "/api/v1/user/info";
pub const UPDATE_PROFILE: &str = "/api/v1/user/update-profile";
pub const UPDATE_AVATAR: &str = "/api/v1/user/update-avatar";
pub const SEARCH: &str = "/api/v1/user/search";
pub const FOLLOWERS: &str = "/api/v1/user/followers";
pub const FOLLOWING: &str = "/api/v1/user/following";
pub const CONNECT: &str = "/api/v1/user/connect";

pub const FEED_DETAIL: &str = "/api/v1/feed/detail";
pub const FEED_LINK: &str = "/api/v1/feed/link";
pub const FEED_COMMENT: &str = "/api/v1/feed/comment";
pub const FEED_COMMENTS: &str = "/api/v1/feed/comments";
pub const FEED_REACT: &str = "/api/v1/feed/react";
pub const FEED_REACT_CHECK: &str = "/api/v1/feed/react/check";

pub const GROUP_JOIN: &str = "/api/v1/group/join";

pub fn user_profile(user_id: &str) -> String {
    format!("/api/v1/user/profile/{}", user_id)
}

pub fn group(group_id: &str) -> String {
    format!("/api/v1/group/{}", group_id)
}
