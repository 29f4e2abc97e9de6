//! Login / logout commands.

use anyhow::Result;
use clover_bff::request::{LoginReq, LogoutReq};
use clover_bff::session::load_session;
use clover_bff::state::{ActionState, AppRoute, AuthPhase, AuthState};

use super::Engine;

pub async fn login(engine: &Engine, email: &str, password: &str) -> Result<()> {
    engine
        .flux
        .emit(
            LoginReq::PATH,
            LoginReq {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await;

    let auth = engine
        .flux
        .get_as::<AuthState>(AuthState::PATH)
        .ok_or_else(|| anyhow::anyhow!("No auth state after login"))?;
    if auth.phase != AuthPhase::Authenticated {
        anyhow::bail!(
            "Login failed: {}",
            auth.error.unwrap_or_else(|| "unknown error".into())
        );
    }

    println!("Logged in as {}.", email);
    Ok(())
}

pub async fn logout(engine: &Engine) -> Result<()> {
    if load_session(engine.session.as_ref())?.is_none() {
        println!("Not logged in.");
        return Ok(());
    }

    engine.flux.emit(LogoutReq::PATH, LogoutReq).await;

    match engine.flux.get_as::<AppRoute>(AppRoute::PATH) {
        Some(AppRoute(route)) if route == "/login" => {
            println!("Logged out.");
            Ok(())
        }
        _ => {
            let reason = engine
                .flux
                .get_as::<ActionState>(ActionState::LOGOUT)
                .and_then(|a| a.error)
                .unwrap_or_else(|| "unknown error".into());
            anyhow::bail!("Logout failed; session kept: {}", reason)
        }
    }
}
