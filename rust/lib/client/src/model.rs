//! Wire types of the Clover API.
//!
//! Field names follow the backend's camelCase JSON. Every response body
//! is wrapped in an [`Envelope`].

use serde::{Deserialize, Serialize};

/// Response envelope: `{"data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

// ── Feed ────────────────────────────────────────────────────────────

/// A post as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub feed_id: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub content: String,
    /// Image URLs in display order. The backend sends `null` for none.
    #[serde(default)]
    pub feed_images: Option<Vec<String>>,
    #[serde(default)]
    pub created_time: String,
    /// Audience tag, e.g. `PUBLIC`, `FRIENDS`, `ONLY_ME`.
    #[serde(default)]
    pub privacy_type: String,
    /// Shareable link to the post.
    #[serde(default)]
    pub dynamic_link: String,
}

impl FeedItem {
    pub fn images(&self) -> &[String] {
        self.feed_images.as_deref().unwrap_or(&[])
    }
}

/// Author snapshot denormalized onto a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_img_url: Option<String>,
}

/// A feed plus its aggregates, as rendered by a feed card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedGroupData {
    pub feed_item: FeedItem,
    pub author_profile: AuthorProfile,
    #[serde(default)]
    pub total_react: u64,
    #[serde(default)]
    pub total_comment: u64,
    /// The viewer's reaction tag, `null` when the viewer has not reacted.
    #[serde(default)]
    pub current_user_react: Option<String>,
}

/// Reaction kinds. Only `LIKE` exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactKind {
    Like,
}

impl ReactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactKind::Like => "LIKE",
        }
    }

    /// Parse a backend reaction tag. Unknown tags are `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "LIKE" => Some(ReactKind::Like),
            _ => None,
        }
    }
}

/// Body of the react mutation. `status` is 1 to add, 0 to remove.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactForm {
    pub feed_id: String,
    pub react_type: ReactKind,
    pub status: u8,
}

/// Result of the check-like call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub current_user_like: bool,
}

/// A new comment. `level` 0 is a top-level reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentForm {
    pub feed_id: String,
    pub author_id: String,
    pub content: String,
    pub level: u32,
}

/// A listed comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentItem {
    #[serde(default)]
    pub comment_id: String,
    pub feed_id: String,
    pub author_id: String,
    pub content: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub author_profile: Option<AuthorProfile>,
    #[serde(default)]
    pub created_time: String,
}

// ── Users ───────────────────────────────────────────────────────────

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Another user's profile as seen by the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub total_followers: u64,
    #[serde(default)]
    pub total_following: u64,
}

/// One row of a user search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUser {
    pub user_id: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub connected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub group_id: String,
    pub group_name: String,
    #[serde(default)]
    pub banner_url: Option<String>,
}

/// The viewer's membership in a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRole {
    /// e.g. `APPROVED`, `PENDING`.
    pub status: String,
}

/// One row of a group search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchGroup {
    pub group: GroupSummary,
    #[serde(default)]
    pub current_user_role: Option<GroupRole>,
}

impl SearchGroup {
    /// True when the viewer is an approved member.
    pub fn is_member(&self) -> bool {
        self.current_user_role
            .as_ref()
            .is_some_and(|r| r.status == "APPROVED")
    }
}

/// Search response. A `null` list means nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub users: Option<Vec<SearchUser>>,
    #[serde(default)]
    pub groups: Option<Vec<SearchGroup>>,
}

/// Group detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
    pub group: GroupSummary,
    #[serde(default)]
    pub total_member: u64,
    #[serde(default)]
    pub current_user_role: Option<GroupRole>,
}

/// Follow/unfollow body. `status` is 1 to follow, 0 to unfollow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectForm {
    pub target_user_id: String,
    pub status: u8,
}

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login result; `tokenId` is both the bearer token and the logout handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

/// Profile edit, sent as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_birth: Option<String>,
}

/// Paged follower/following query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowQuery {
    pub user_id: String,
    pub page: u32,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowPage {
    #[serde(default)]
    pub users: Vec<SearchUser>,
    #[serde(default)]
    pub total: u64,
}
