//! Search command.

use std::time::Duration;

use anyhow::Result;
use clover_bff::request::{SearchInputReq, SearchModeReq};
use clover_bff::state::{SearchMode, SearchRows};
use tracing::{debug, warn};

use super::{Engine, print_json};

const POLL: Duration = Duration::from_millis(50);
const MAX_POLLS: usize = 200;

/// Type `term` into the header search and print the rows once settled.
pub async fn search(engine: &Engine, term: &str, groups: bool) -> Result<()> {
    if groups {
        engine
            .flux
            .emit(
                SearchModeReq::PATH,
                SearchModeReq {
                    mode: SearchMode::Groups,
                },
            )
            .await;
    }
    engine
        .flux
        .emit(
            SearchInputReq::PATH,
            SearchInputReq {
                term: term.to_string(),
            },
        )
        .await;

    tokio::time::sleep(engine.config.search_debounce()).await;
    for poll in 0..MAX_POLLS {
        match engine.flux.get_as::<SearchRows>(SearchRows::PATH) {
            Some(SearchRows::Loading) | None => tokio::time::sleep(POLL).await,
            Some(rows) => {
                debug!(polls = poll, "search settled");
                return print_json(&rows);
            }
        }
    }
    warn!(term, "search still loading after {} polls", MAX_POLLS);
    anyhow::bail!("Search timed out.")
}
