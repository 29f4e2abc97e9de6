//! Feed card requests.

use clover_client::FeedGroupData;
use serde::{Deserialize, Serialize};

/// Seed a card from server data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountFeedReq {
    pub data: FeedGroupData,
}

impl MountFeedReq {
    pub const PATH: &'static str = "feed/mount";
}

/// Toggle the viewer's like.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeFeedReq {
    pub feed_id: String,
}

impl LikeFeedReq {
    pub const PATH: &'static str = "feed/like";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenCommentsReq {
    pub feed_id: String,
}

impl OpenCommentsReq {
    pub const PATH: &'static str = "feed/comment/open";
}

/// Replace the comment draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCommentReq {
    pub content: String,
}

impl UpdateCommentReq {
    pub const PATH: &'static str = "feed/comment/update";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitCommentReq;

impl SubmitCommentReq {
    pub const PATH: &'static str = "feed/comment/submit";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloseCommentsReq;

impl CloseCommentsReq {
    pub const PATH: &'static str = "feed/comment/close";
}

/// Copy the feed's link to the clipboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareFeedReq {
    pub feed_id: String,
}

impl ShareFeedReq {
    pub const PATH: &'static str = "feed/share";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPhotoReq {
    pub feed_id: String,
    pub url: String,
}

impl OpenPhotoReq {
    pub const PATH: &'static str = "feed/photo/open";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePhotoReq {
    pub feed_id: String,
}

impl ClosePhotoReq {
    pub const PATH: &'static str = "feed/photo/close";
}
