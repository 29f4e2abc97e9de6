//! App-level handlers: startup, user info, navigation and toasts.

use std::sync::Arc;

use clover_flux::{CacheKey, StateStore};
use tracing::{info, warn};

use crate::request::*;
use crate::session::load_session;
use crate::state::user::{group_path, profile_path};
use crate::state::*;

use super::CloverBff;
use super::helpers::route;

pub const USER_INFO_QUERY_ID: &str = "UserInfo";

impl CloverBff {
    /// Handle `app/initialize`.
    pub(super) async fn handle_initialize(
        self: Arc<Self>,
        _req: InitializeReq,
        store: Arc<StateStore>,
    ) {
        if !store.contains(ToastList::PATH) {
            store.set(ToastList::PATH, ToastList::default());
        }
        if !store.contains(HeaderState::PATH) {
            store.set(HeaderState::PATH, HeaderState::default());
        }

        let session = match load_session(self.session.as_ref()) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "stored session unreadable");
                None
            }
        };
        match session {
            Some(session) => {
                info!(user_id = ?session.user_id, "session restored");
                store.set(AuthState::PATH, AuthState::signed_in(session.user_id));
                route(&store, AppRoute("/".into()));
            }
            None => {
                store.set(AuthState::PATH, AuthState::signed_out());
                route(&store, AppRoute("/login".into()));
            }
        }
    }

    /// Handle `user/info/load`.
    pub(super) async fn handle_load_user_info(
        self: Arc<Self>,
        _req: LoadUserInfoReq,
        _store: Arc<StateStore>,
    ) {
        let api = Arc::clone(&self.api);
        self.queries
            .register(
                CacheKey::UserInfo,
                USER_INFO_QUERY_ID,
                ProfileMenu::INFO_PATH,
                move || {
                    let api = Arc::clone(&api);
                    async move { api.get_user_info().await }
                },
            )
            .await;
    }

    /// Handle `profile/open`.
    pub(super) async fn handle_open_profile(
        self: Arc<Self>,
        req: OpenProfileReq,
        store: Arc<StateStore>,
    ) {
        route(&store, AppRoute::profile(&req.user_id));

        let api = Arc::clone(&self.api);
        let user_id = req.user_id.clone();
        self.queries
            .register(
                CacheKey::UserProfile,
                format!("UserProfile/{}", req.user_id),
                profile_path(&req.user_id),
                move || {
                    let api = Arc::clone(&api);
                    let user_id = user_id.clone();
                    async move { api.get_user_profile(&user_id).await }
                },
            )
            .await;
    }

    /// Handle `group/open`.
    pub(super) async fn handle_open_group(
        self: Arc<Self>,
        req: OpenGroupReq,
        store: Arc<StateStore>,
    ) {
        route(&store, AppRoute::group(&req.group_id));

        let api = Arc::clone(&self.api);
        let group_id = req.group_id.clone();
        self.queries
            .register(
                CacheKey::GroupInfo,
                format!("GroupInfo/{}", req.group_id),
                group_path(&req.group_id),
                move || {
                    let api = Arc::clone(&api);
                    let group_id = group_id.clone();
                    async move { api.get_group(&group_id).await }
                },
            )
            .await;
    }

    /// Handle `toast/dismiss`.
    pub(super) async fn handle_dismiss_toast(
        self: Arc<Self>,
        req: DismissToastReq,
        store: Arc<StateStore>,
    ) {
        store.update::<ToastList, _>(ToastList::PATH, |list| {
            list.dismiss(req.id);
        });
    }
}
