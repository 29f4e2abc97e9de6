//! Feed card state: stored at `feed/{feed_id}/card`.
//!
//! Comments for an open feed live at `feed/{feed_id}/comments` as
//! `QueryState<Vec<CommentItem>>`.

use clover_client::{FeedGroupData, ReactKind};
use serde::Serialize;

pub fn card_path(feed_id: &str) -> String {
    format!("feed/{}/card", feed_id)
}

pub fn comments_path(feed_id: &str) -> String {
    format!("feed/{}/comments", feed_id)
}

/// How a card arranges its images.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImageLayout {
    None,
    /// One large tile.
    Single { url: String },
    /// Two equal tiles.
    Pair { first: String, second: String },
    /// One large tile, the rest in a grid below.
    HeroGrid { hero: String, grid: Vec<String> },
}

impl ImageLayout {
    pub fn from_images(images: &[String]) -> Self {
        match images {
            [] => ImageLayout::None,
            [url] => ImageLayout::Single { url: url.clone() },
            [first, second] => ImageLayout::Pair {
                first: first.clone(),
                second: second.clone(),
            },
            [hero, rest @ ..] => ImageLayout::HeroGrid {
                hero: hero.clone(),
                grid: rest.to_vec(),
            },
        }
    }

    pub fn tile_count(&self) -> usize {
        match self {
            ImageLayout::None => 0,
            ImageLayout::Single { .. } => 1,
            ImageLayout::Pair { .. } => 2,
            ImageLayout::HeroGrid { grid, .. } => 1 + grid.len(),
        }
    }
}

/// Everything one feed card renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedCardState {
    pub data: FeedGroupData,
    pub is_like: Option<ReactKind>,
    pub total_like: u64,
    pub total_comment: u64,
    /// Image open in the full-screen viewer.
    pub photo_view: Option<String>,
    /// A like toggle is in flight; further toggles are ignored.
    pub like_pending: bool,
    /// Why the last toggle failed. Cleared by the next success.
    pub like_error: Option<String>,
    pub layout: ImageLayout,
}

impl FeedCardState {
    pub fn from_feed(data: FeedGroupData) -> Self {
        let is_like = data
            .current_user_react
            .as_deref()
            .and_then(ReactKind::parse);
        let layout = ImageLayout::from_images(data.feed_item.images());
        Self {
            is_like,
            total_like: data.total_react,
            total_comment: data.total_comment,
            photo_view: None,
            like_pending: false,
            like_error: None,
            layout,
            data,
        }
    }

    pub fn feed_id(&self) -> &str {
        &self.data.feed_item.feed_id
    }
}

/// The comment modal: stored at `feed/comment/modal`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentModalState {
    pub open: bool,
    pub feed: FeedGroupData,
    pub draft: String,
    pub busy: bool,
    /// Why the last post failed.
    pub error: Option<String>,
}

impl CommentModalState {
    pub const PATH: &'static str = "feed/comment/modal";

    pub fn feed_id(&self) -> &str {
        &self.feed.feed_item.feed_id
    }
}
