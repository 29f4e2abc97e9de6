//! Subcommand implementations.

pub mod auth;
pub mod feed;
pub mod search;

use std::sync::Arc;

use anyhow::Result;
use clover_bff::error::Result as BffResult;
use clover_bff::{
    Clipboard, ClientConfig, CloverBff, FileStorage, SessionStorage, SessionToken,
};
use clover_client::{CloverApi, CloverClient};
use clover_flux::Flux;
use serde::Serialize;
use tracing::debug;

/// A terminal has no clipboard; shared links go to stdout.
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write(&self, text: &str) -> BffResult<()> {
        println!("{}", text);
        Ok(())
    }
}

/// A registered engine talking to the configured server.
pub struct Engine {
    pub flux: Flux,
    pub api: Arc<dyn CloverApi>,
    pub session: Arc<dyn SessionStorage>,
    pub config: ClientConfig,
}

impl Engine {
    pub fn new(config: &ClientConfig) -> Self {
        let session: Arc<dyn SessionStorage> = Arc::new(FileStorage::new(config.session_file()));
        let api: Arc<dyn CloverApi> = Arc::new(CloverClient::new(
            &config.api_url,
            Arc::new(SessionToken::new(Arc::clone(&session))),
        ));

        let flux = Flux::new();
        let bff = CloverBff::new(
            &flux,
            Arc::clone(&api),
            Arc::clone(&session),
            Arc::new(StdoutClipboard),
            config.clone(),
        );
        bff.register(&flux);
        let session_file = config.session_file();
        debug!(api_url = %config.api_url, session = %session_file.display(), "engine ready");

        Self {
            flux,
            api,
            session,
            config: config.clone(),
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
