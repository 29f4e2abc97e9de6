//! Handler implementations and Flux wiring.
//!
//! Every request type is registered on its `PATH`. The wiring downcasts
//! the payload and calls the matching `CloverBff` method with the store.

mod app_handlers;
mod auth_handlers;
mod feed_handlers;
mod header_handlers;
mod helpers;

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use clover_client::{CloverApi, SearchResult, UserInfo};
use clover_flux::{Flux, Payload, QueryCache, QueryState, StateStore, StateValue};
use tracing::warn;

use crate::clipboard::Clipboard;
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::request::*;
use crate::session::SessionStorage;
use crate::state::header::SEARCH_RESULT_PATH;
use crate::state::*;

/// Client context shared by every handler.
pub struct CloverBff {
    api: Arc<dyn CloverApi>,
    queries: Arc<QueryCache>,
    session: Arc<dyn SessionStorage>,
    clipboard: Arc<dyn Clipboard>,
    config: ClientConfig,
    search_debounce: Debouncer,
}

impl CloverBff {
    pub fn new(
        flux: &Flux,
        api: Arc<dyn CloverApi>,
        session: Arc<dyn SessionStorage>,
        clipboard: Arc<dyn Clipboard>,
        config: ClientConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            queries: Arc::clone(flux.queries()),
            session,
            clipboard,
            search_debounce: Debouncer::new(config.search_debounce()),
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Register all handlers and derived-state subscribers with a Flux instance.
    pub fn register(self: &Arc<Self>, flux: &Flux) {
        // app
        self.on(flux, InitializeReq::PATH, Self::handle_initialize);
        self.on(flux, LoadUserInfoReq::PATH, Self::handle_load_user_info);
        self.on(flux, OpenProfileReq::PATH, Self::handle_open_profile);
        self.on(flux, OpenGroupReq::PATH, Self::handle_open_group);
        self.on(flux, DismissToastReq::PATH, Self::handle_dismiss_toast);

        // auth
        self.on(flux, LoginReq::PATH, Self::handle_login);
        self.on(flux, LogoutReq::PATH, Self::handle_logout);

        // feed
        self.on(flux, MountFeedReq::PATH, Self::handle_mount);
        self.on(flux, LikeFeedReq::PATH, Self::handle_like);
        self.on(flux, OpenCommentsReq::PATH, Self::handle_comment_open);
        self.on(flux, UpdateCommentReq::PATH, Self::handle_comment_update);
        self.on(flux, SubmitCommentReq::PATH, Self::handle_comment_submit);
        self.on(flux, CloseCommentsReq::PATH, Self::handle_comment_close);
        self.on(flux, ShareFeedReq::PATH, Self::handle_share);
        self.on(flux, OpenPhotoReq::PATH, Self::handle_photo_open);
        self.on(flux, ClosePhotoReq::PATH, Self::handle_photo_close);

        // header
        self.on(flux, SearchInputReq::PATH, Self::handle_search_input);
        self.on(flux, SearchModeReq::PATH, Self::handle_search_mode);
        self.on(flux, SearchClearReq::PATH, Self::handle_search_clear);
        self.on(flux, SearchOpenReq::PATH, Self::handle_search_open);
        self.on(flux, SearchCloseReq::PATH, Self::handle_search_close);
        self.on(flux, ConnectUserReq::PATH, Self::handle_connect);
        self.on(flux, JoinGroupReq::PATH, Self::handle_join_group);
        self.on(flux, ResizeReq::PATH, Self::handle_resize);

        // Derived views. Each writes a path it does not watch.
        let store = Arc::clone(flux.store());
        let rows = move |_: &str, _: &StateValue| {
            let header = store.get_as::<HeaderState>(HeaderState::PATH).unwrap_or_default();
            let result = store.get_as::<QueryState<SearchResult>>(SEARCH_RESULT_PATH);
            store.set(SearchRows::PATH, SearchRows::derive(&header, result.as_ref()));
        };
        let rows = Arc::new(rows);
        let r = Arc::clone(&rows);
        flux.subscribe(HeaderState::PATH, move |path, value| r(path, value));
        flux.subscribe(SEARCH_RESULT_PATH, move |path, value| rows(path, value));

        let store = Arc::clone(flux.store());
        flux.subscribe(ProfileMenu::INFO_PATH, move |_, value| {
            let info = value
                .downcast_ref::<QueryState<UserInfo>>()
                .and_then(|s| s.data.as_ref());
            if let Some(info) = info {
                store.set(ProfileMenu::PATH, ProfileMenu::from_info(info));
            }
        });
    }

    /// Route `path` to `handler` with the payload downcast to `R`.
    fn on<R, F, Fut>(self: &Arc<Self>, flux: &Flux, path: &'static str, handler: F)
    where
        R: Any + Clone + Send + Sync,
        F: Fn(Arc<Self>, R, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let bff = Arc::clone(self);
        flux.on(path, move |_: String, payload: Payload, store: Arc<StateStore>| {
            let run = payload
                .downcast_ref::<R>()
                .map(|req| handler(Arc::clone(&bff), req.clone(), store));
            async move {
                match run {
                    Some(run) => run.await,
                    None => warn!(path, "unexpected payload type"),
                }
            }
        });
    }
}
