//! Feed card handlers: like, comments, share and the photo viewer.

use std::sync::Arc;

use clover_client::{CommentForm, CommentItem, ReactKind};
use clover_flux::{CacheKey, QueryState, StateStore};
use tracing::{debug, error, info, warn};

use crate::error::{BffError, Result};
use crate::request::*;
use crate::state::feed::{card_path, comments_path};
use crate::state::*;

use super::CloverBff;
use super::helpers::{push_toast, track};

pub const SHARE_TOAST: &str = "Copy path successfully!";

fn comments_query_id(feed_id: &str) -> String {
    format!("ListComment/{}", feed_id)
}

impl CloverBff {
    /// Handle `feed/mount`.
    pub(super) async fn handle_mount(self: Arc<Self>, req: MountFeedReq, store: Arc<StateStore>) {
        let card = FeedCardState::from_feed(req.data);
        store.set(&card_path(card.feed_id()), card);
    }

    /// Handle `feed/like`.
    ///
    /// The toggle is check-then-act: the server's current reaction decides
    /// whether to add or remove, and the count shown is the server's.
    pub(super) async fn handle_like(self: Arc<Self>, req: LikeFeedReq, store: Arc<StateStore>) {
        let path = card_path(&req.feed_id);
        let mut started = false;
        let mounted = store.update::<FeedCardState, _>(&path, |card| {
            if !card.like_pending {
                card.like_pending = true;
                started = true;
            }
        });
        if !mounted {
            warn!(feed_id = %req.feed_id, "like on unmounted card");
            return;
        }
        if !started {
            debug!(feed_id = %req.feed_id, "like already pending");
            return;
        }

        let outcome = self.toggle_like(&req.feed_id).await;
        if let Err(e) = &outcome {
            warn!(feed_id = %req.feed_id, error = %e, "like failed");
        }
        store.update::<FeedCardState, _>(&path, |card| {
            card.like_pending = false;
            match outcome {
                Ok((is_like, total)) => {
                    card.is_like = is_like;
                    card.total_like = total;
                    card.like_error = None;
                }
                Err(e) => card.like_error = Some(e.to_string()),
            }
        });
    }

    async fn toggle_like(&self, feed_id: &str) -> Result<(Option<ReactKind>, u64)> {
        let status = self.api.check_like(feed_id).await?;
        if status.current_user_like {
            let total = self.api.post_like(feed_id, 0).await?;
            Ok((None, total))
        } else {
            let total = self.api.post_like(feed_id, 1).await?;
            Ok((Some(ReactKind::Like), total))
        }
    }

    /// Handle `feed/comment/open`.
    pub(super) async fn handle_comment_open(
        self: Arc<Self>,
        req: OpenCommentsReq,
        store: Arc<StateStore>,
    ) {
        let feed = match self.api.get_feed_detail(&req.feed_id).await {
            Ok(feed) => feed,
            Err(e) => {
                warn!(feed_id = %req.feed_id, error = %e, "load feed detail failed");
                return;
            }
        };
        let previous = store
            .get_as::<CommentModalState>(CommentModalState::PATH)
            .map(|m| m.feed_id().to_string());
        if let Some(previous) = previous.filter(|id| *id != req.feed_id) {
            self.release_comments(&store, &previous);
        }
        store.set(
            CommentModalState::PATH,
            CommentModalState {
                open: true,
                feed,
                draft: String::new(),
                busy: false,
                error: None,
            },
        );

        let api = Arc::clone(&self.api);
        let feed_id = req.feed_id.clone();
        self.queries
            .register(
                CacheKey::ListComment,
                comments_query_id(&req.feed_id),
                comments_path(&req.feed_id),
                move || {
                    let api = Arc::clone(&api);
                    let feed_id = feed_id.clone();
                    async move { api.list_comments(&feed_id).await }
                },
            )
            .await;
    }

    /// Handle `feed/comment/update`.
    pub(super) async fn handle_comment_update(
        self: Arc<Self>,
        req: UpdateCommentReq,
        store: Arc<StateStore>,
    ) {
        store.update::<CommentModalState, _>(CommentModalState::PATH, |modal| {
            modal.draft = req.content;
        });
    }

    /// Handle `feed/comment/submit`.
    ///
    /// Blank drafts are ignored. Success invalidates `ListComment` once and
    /// clears the draft unless it was edited while the post was in flight;
    /// failure keeps the draft for another try.
    pub(super) async fn handle_comment_submit(
        self: Arc<Self>,
        _req: SubmitCommentReq,
        store: Arc<StateStore>,
    ) {
        let Some(modal) = store.get_as::<CommentModalState>(CommentModalState::PATH) else {
            return;
        };
        if !modal.open || modal.busy {
            return;
        }
        let content = modal.draft.trim();
        if content.is_empty() {
            debug!("blank comment ignored");
            return;
        }
        let Some(author_id) = self.current_user_id(&store) else {
            warn!("comment without a signed-in user");
            return;
        };

        let form = CommentForm {
            feed_id: modal.feed_id().to_string(),
            author_id,
            content: content.to_string(),
            level: 0,
        };
        store.update::<CommentModalState, _>(CommentModalState::PATH, |m| {
            m.busy = true;
            m.error = None;
        });

        match self.api.post_comment(&form).await {
            Ok(()) => {
                info!(feed_id = %form.feed_id, "comment posted");
                store.update::<CommentModalState, _>(CommentModalState::PATH, |m| {
                    m.busy = false;
                    if m.draft.trim() == form.content {
                        m.draft.clear();
                    }
                });
                self.queries.invalidate(CacheKey::ListComment).await;
            }
            Err(e) => {
                warn!(feed_id = %form.feed_id, error = %e, "post comment failed");
                store.update::<CommentModalState, _>(CommentModalState::PATH, |m| {
                    m.busy = false;
                    m.error = Some(e.to_string());
                });
            }
        }
    }

    /// Handle `feed/comment/close`.
    pub(super) async fn handle_comment_close(
        self: Arc<Self>,
        _req: CloseCommentsReq,
        store: Arc<StateStore>,
    ) {
        let Some(modal) = store.get_as::<CommentModalState>(CommentModalState::PATH) else {
            return;
        };
        self.release_comments(&store, modal.feed_id());
        store.update::<CommentModalState, _>(CommentModalState::PATH, |m| {
            m.open = false;
            m.draft.clear();
            m.busy = false;
            m.error = None;
        });
    }

    /// Drop the comment query of `feed_id`. Observers of its path see an
    /// idle state before the path goes away.
    fn release_comments(&self, store: &StateStore, feed_id: &str) {
        self.queries.remove(&comments_query_id(feed_id));
        let path = comments_path(feed_id);
        store.set(&path, QueryState::<Vec<CommentItem>>::idle());
        store.remove(&path);
    }

    /// Handle `feed/share`. Failures are logged and published at
    /// `action/share`, never toasted.
    pub(super) async fn handle_share(self: Arc<Self>, req: ShareFeedReq, store: Arc<StateStore>) {
        match track(&store, ActionState::SHARE, self.copy_link(&req.feed_id)).await {
            Ok(()) => push_toast(&store, ToastKind::Success, SHARE_TOAST),
            Err(e @ BffError::Clipboard(_)) => {
                error!(feed_id = %req.feed_id, error = %e, "clipboard write failed")
            }
            Err(e) => warn!(feed_id = %req.feed_id, error = %e, "fetch share link failed"),
        }
    }

    async fn copy_link(&self, feed_id: &str) -> Result<()> {
        let link = self.api.get_feed_link(feed_id).await?;
        self.clipboard.write(&link)
    }

    /// Handle `feed/photo/open`.
    pub(super) async fn handle_photo_open(
        self: Arc<Self>,
        req: OpenPhotoReq,
        store: Arc<StateStore>,
    ) {
        let path = card_path(&req.feed_id);
        if !store.update::<FeedCardState, _>(&path, |card| card.photo_view = Some(req.url)) {
            debug!(feed_id = %req.feed_id, "photo open on unmounted card");
        }
    }

    /// Handle `feed/photo/close`.
    pub(super) async fn handle_photo_close(
        self: Arc<Self>,
        req: ClosePhotoReq,
        store: Arc<StateStore>,
    ) {
        store.update::<FeedCardState, _>(&card_path(&req.feed_id), |card| card.photo_view = None);
    }
}
