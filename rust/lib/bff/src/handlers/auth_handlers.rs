//! Auth handler implementations.

use std::sync::Arc;

use clover_client::LoginForm;
use clover_flux::StateStore;
use tracing::{info, warn};

use crate::request::*;
use crate::session::{SESSION_KEY, SessionData, load_session, save_session};
use crate::state::*;

use super::CloverBff;
use super::helpers::{route, track};

impl CloverBff {
    /// Handle `auth/login`.
    pub(super) async fn handle_login(self: Arc<Self>, req: LoginReq, store: Arc<StateStore>) {
        // Set busy.
        store.set(
            AuthState::PATH,
            AuthState {
                busy: true,
                ..AuthState::signed_out()
            },
        );

        let form = LoginForm {
            email: req.email,
            password: req.password,
        };
        let data = match self.api.login(&form).await {
            Ok(data) => data,
            Err(e) => {
                warn!(email = %form.email, error = %e, "login failed");
                store.set(
                    AuthState::PATH,
                    AuthState {
                        error: Some(e.to_string()),
                        ..AuthState::signed_out()
                    },
                );
                return;
            }
        };

        let session = SessionData {
            token_id: data.token_id,
            user_id: data.user_id,
        };
        if let Err(e) = save_session(self.session.as_ref(), &session) {
            warn!(error = %e, "persist session failed");
            store.set(
                AuthState::PATH,
                AuthState {
                    error: Some(e.to_string()),
                    ..AuthState::signed_out()
                },
            );
            return;
        }

        info!(user_id = ?session.user_id, "logged in");
        store.set(AuthState::PATH, AuthState::signed_in(session.user_id));
        route(&store, AppRoute("/".into()));
    }

    /// Handle `auth/logout`.
    ///
    /// Without a stored session there is nothing to revoke, so no request
    /// is made.
    pub(super) async fn handle_logout(self: Arc<Self>, _req: LogoutReq, store: Arc<StateStore>) {
        let session = match load_session(self.session.as_ref()) {
            Ok(Some(session)) => session,
            Ok(None) => {
                warn!("logout without a stored session");
                return;
            }
            Err(e) => {
                warn!(error = %e, "read session failed");
                return;
            }
        };

        let outcome = track(
            &store,
            ActionState::LOGOUT,
            self.api.logout(&session.token_id),
        )
        .await;
        if let Err(e) = outcome {
            warn!(error = %e, "logout failed");
            return;
        }

        if let Err(e) = self.session.remove(SESSION_KEY) {
            warn!(error = %e, "clear session failed");
        }
        info!("logged out");
        store.set(AuthState::PATH, AuthState::signed_out());
        route(&store, AppRoute("/login".into()));
    }
}
