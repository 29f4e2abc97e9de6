//! Feed commands: like, comment, share.

use anyhow::Result;
use clover_bff::request::*;
use clover_bff::state::feed::{card_path, comments_path};
use clover_bff::state::{ActionState, CommentModalState, FeedCardState, ToastList};
use clover_client::CommentItem;
use clover_flux::QueryState;

use super::{Engine, print_json};

/// Mount the feed's card, toggle the like and print the card.
pub async fn like(engine: &Engine, feed_id: &str) -> Result<()> {
    let data = engine.api.get_feed_detail(feed_id).await?;
    engine.flux.emit(MountFeedReq::PATH, MountFeedReq { data }).await;
    engine
        .flux
        .emit(
            LikeFeedReq::PATH,
            LikeFeedReq {
                feed_id: feed_id.to_string(),
            },
        )
        .await;

    let card = engine
        .flux
        .get_as::<FeedCardState>(&card_path(feed_id))
        .ok_or_else(|| anyhow::anyhow!("Feed {} not mounted", feed_id))?;
    if let Some(error) = &card.like_error {
        anyhow::bail!("Like failed: {}", error);
    }
    print_json(&card)
}

/// Open the comment modal, post `content` and print the refreshed list.
pub async fn comment(engine: &Engine, feed_id: &str, content: &str) -> Result<()> {
    if content.trim().is_empty() {
        anyhow::bail!("Comment cannot be empty.");
    }

    engine
        .flux
        .emit(
            OpenCommentsReq::PATH,
            OpenCommentsReq {
                feed_id: feed_id.to_string(),
            },
        )
        .await;
    if !engine.flux.contains(CommentModalState::PATH) {
        anyhow::bail!("Could not load feed {}.", feed_id);
    }

    engine
        .flux
        .emit(
            UpdateCommentReq::PATH,
            UpdateCommentReq {
                content: content.to_string(),
            },
        )
        .await;
    engine.flux.emit(SubmitCommentReq::PATH, SubmitCommentReq).await;

    let modal = engine
        .flux
        .get_as::<CommentModalState>(CommentModalState::PATH)
        .ok_or_else(|| anyhow::anyhow!("Comment modal disappeared"))?;
    if let Some(error) = &modal.error {
        anyhow::bail!("Comment was not posted: {}", error);
    }
    if !modal.draft.is_empty() {
        anyhow::bail!("Comment was not posted. Are you logged in?");
    }

    let comments = engine
        .flux
        .get_as::<QueryState<Vec<CommentItem>>>(&comments_path(feed_id));
    engine.flux.emit(CloseCommentsReq::PATH, CloseCommentsReq).await;
    match comments {
        Some(comments) => print_json(&comments),
        None => Ok(()),
    }
}

/// Copy the share link (printed to stdout) and report the toast.
pub async fn share(engine: &Engine, feed_id: &str) -> Result<()> {
    engine
        .flux
        .emit(
            ShareFeedReq::PATH,
            ShareFeedReq {
                feed_id: feed_id.to_string(),
            },
        )
        .await;

    let toasts = engine
        .flux
        .get_as::<ToastList>(ToastList::PATH)
        .unwrap_or_default();
    if let Some(error) = engine
        .flux
        .get_as::<ActionState>(ActionState::SHARE)
        .and_then(|a| a.error)
    {
        anyhow::bail!("Could not share feed {}: {}", feed_id, error);
    }
    if toasts.items.is_empty() {
        anyhow::bail!("Could not share feed {}.", feed_id);
    }
    for toast in &toasts.items {
        eprintln!("{}", toast.message);
    }
    Ok(())
}
