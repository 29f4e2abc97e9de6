//! Main header handlers: debounced search, follow, groups and viewport.

use std::sync::Arc;

use clover_flux::{CacheKey, StateStore};
use tracing::{debug, info, warn};

use crate::request::*;
use crate::state::header::SEARCH_RESULT_PATH;
use crate::state::*;

use super::CloverBff;
use super::helpers::{edit_header, push_toast, track};

/// Query id of the header search. One search is live at a time.
pub const SEARCH_QUERY_ID: &str = "SearchUserInfo";

pub const JOIN_TOAST: &str = "Joined the group successfully";

/// Normalized keyword a search is issued for.
pub fn search_key(term: &str) -> String {
    term.trim().to_string()
}

impl CloverBff {
    /// Handle `header/search/input`. The search itself runs once input
    /// has been quiet for the configured delay.
    pub(super) async fn handle_search_input(
        self: Arc<Self>,
        req: SearchInputReq,
        store: Arc<StateStore>,
    ) {
        edit_header(&store, |h| h.search_term = req.term);

        let bff = Arc::clone(&self);
        self.search_debounce.call(move || async move {
            bff.run_search(&store).await;
        });
    }

    /// Debounce target: publish the settled term and (re)issue the query.
    async fn run_search(&self, store: &Arc<StateStore>) {
        let header = store.get_as::<HeaderState>(HeaderState::PATH).unwrap_or_default();
        let key = search_key(&header.search_term);

        if key.is_empty() {
            self.reset_search(store);
            return;
        }

        edit_header(store, |h| h.debounced_term = key.clone());
        debug!(term = %key, "search");

        let api = Arc::clone(&self.api);
        self.queries
            .register(
                CacheKey::SearchUserInfo,
                SEARCH_QUERY_ID,
                SEARCH_RESULT_PATH,
                move || {
                    let api = Arc::clone(&api);
                    let key = key.clone();
                    async move { api.search(&key).await }
                },
            )
            .await;
    }

    /// Drop the term, any pending keystroke and the live search query.
    fn reset_search(&self, store: &StateStore) {
        self.search_debounce.cancel();
        self.queries.remove(SEARCH_QUERY_ID);
        store.remove(SEARCH_RESULT_PATH);
        edit_header(store, |h| {
            h.search_term.clear();
            h.debounced_term.clear();
        });
    }

    /// Handle `header/search/mode`. Local only; both lists come back in
    /// one response.
    pub(super) async fn handle_search_mode(
        self: Arc<Self>,
        req: SearchModeReq,
        store: Arc<StateStore>,
    ) {
        edit_header(&store, |h| h.search_mode = req.mode);
    }

    /// Handle `header/search/clear`.
    pub(super) async fn handle_search_clear(
        self: Arc<Self>,
        _req: SearchClearReq,
        store: Arc<StateStore>,
    ) {
        self.reset_search(&store);
    }

    /// Handle `header/search/open`.
    pub(super) async fn handle_search_open(
        self: Arc<Self>,
        _req: SearchOpenReq,
        store: Arc<StateStore>,
    ) {
        edit_header(&store, |h| h.open_search = true);
    }

    /// Handle `header/search/close`.
    pub(super) async fn handle_search_close(
        self: Arc<Self>,
        _req: SearchCloseReq,
        store: Arc<StateStore>,
    ) {
        edit_header(&store, |h| h.open_search = false);
        self.reset_search(&store);
    }

    /// Handle `header/connect`: unfollow when connected, follow otherwise.
    pub(super) async fn handle_connect(
        self: Arc<Self>,
        req: ConnectUserReq,
        store: Arc<StateStore>,
    ) {
        let status = if req.connected { 0 } else { 1 };
        let outcome = track(
            &store,
            ActionState::CONNECT,
            self.api.connect(&req.user_id, status),
        )
        .await;
        if let Err(e) = outcome {
            warn!(user_id = %req.user_id, error = %e, "connect failed");
            return;
        }

        let message = if req.connected {
            format!("You have unfollowed {}", req.last_name)
        } else {
            format!("Already follow {}", req.last_name)
        };
        info!(user_id = %req.user_id, status, "connect");
        push_toast(&store, ToastKind::Success, message);

        self.queries.invalidate(CacheKey::SearchUserInfo).await;
        self.queries.invalidate(CacheKey::UserProfile).await;
    }

    /// Handle `header/group/join`. Members see "Leave" on the row, but the
    /// backend only exposes join, so the same call is made either way.
    pub(super) async fn handle_join_group(
        self: Arc<Self>,
        req: JoinGroupReq,
        store: Arc<StateStore>,
    ) {
        let outcome = track(
            &store,
            ActionState::JOIN_GROUP,
            self.api.join_group(&req.group_id),
        )
        .await;
        if let Err(e) = outcome {
            warn!(group_id = %req.group_id, error = %e, "join group failed");
            return;
        }

        info!(group_id = %req.group_id, "joined group");
        push_toast(&store, ToastKind::Success, JOIN_TOAST);

        self.queries.invalidate(CacheKey::SearchUserInfo).await;
        self.queries.invalidate(CacheKey::GroupInfo).await;
    }

    /// Handle `viewport/resize`. The search term survives layout changes.
    pub(super) async fn handle_resize(self: Arc<Self>, req: ResizeReq, store: Arc<StateStore>) {
        let is_mobile = req.width <= self.config.mobile_breakpoint;
        let current = store
            .get_as::<HeaderState>(HeaderState::PATH)
            .map(|h| h.is_mobile);
        if current != Some(is_mobile) {
            edit_header(&store, |h| h.is_mobile = is_mobile);
        }
    }
}
