//! Shared helpers for handlers.

use std::fmt::Display;
use std::future::Future;

use clover_client::UserInfo;
use clover_flux::{QueryState, StateStore};
use tracing::debug;

use crate::session::load_session;
use crate::state::*;

use super::CloverBff;

/// Append a toast to `toast/list`.
pub fn push_toast(store: &StateStore, kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    debug!(?kind, %message, "toast");
    store.update_or_default::<ToastList, _>(ToastList::PATH, |list| {
        list.push(kind, message);
    });
}

/// Atomically edit the header, starting from defaults if it is unset.
pub fn edit_header(store: &StateStore, f: impl FnOnce(&mut HeaderState)) -> HeaderState {
    store.update_or_default(HeaderState::PATH, f)
}

/// Run a mutation, publishing its progress as an [`ActionState`] at `path`.
pub async fn track<T, E, Fut>(store: &StateStore, path: &str, mutation: Fut) -> Result<T, E>
where
    E: Display,
    Fut: Future<Output = Result<T, E>>,
{
    store.set(path, ActionState::busy());
    let outcome = mutation.await;
    match &outcome {
        Ok(_) => store.set(path, ActionState::default()),
        Err(e) => store.set(path, ActionState::failed(e)),
    }
    outcome
}

pub fn route(store: &StateStore, to: AppRoute) {
    debug!(route = %to.0, "navigate");
    store.set(AppRoute::PATH, to);
}

impl CloverBff {
    /// Id of the signed-in user: the session first, then loaded user info.
    pub(super) fn current_user_id(&self, store: &StateStore) -> Option<String> {
        let from_session = load_session(self.session.as_ref())
            .ok()
            .flatten()
            .and_then(|s| s.user_id);
        from_session.or_else(|| {
            store
                .get_as::<QueryState<UserInfo>>(ProfileMenu::INFO_PATH)
                .and_then(|s| s.data)
                .map(|info| info.user_id)
        })
    }
}
