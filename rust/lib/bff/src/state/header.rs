//! Main header state: stored at `header/state`.
//!
//! The raw search result lives at `header/search/result` as
//! `QueryState<SearchResult>`; the rows a shell renders are derived into
//! `header/search/rows`.

use clover_client::{SearchResult, SearchUser};
use clover_flux::QueryState;
use serde::{Deserialize, Serialize};

pub const SEARCH_RESULT_PATH: &str = "header/search/result";

/// Which list the search panel shows. Numbered like the tab index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchMode {
    #[default]
    Users = 0,
    Groups = 1,
}

impl SearchMode {
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(SearchMode::Users),
            1 => Some(SearchMode::Groups),
            _ => None,
        }
    }

    pub fn not_found_message(&self) -> &'static str {
        match self {
            SearchMode::Users => "User not found!",
            SearchMode::Groups => "Group not found!",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderState {
    pub is_mobile: bool,
    pub open_search: bool,
    pub search_term: String,
    pub search_mode: SearchMode,
    /// Term the current search query was issued for.
    pub debounced_term: String,
}

impl HeaderState {
    pub const PATH: &'static str = "header/state";

    /// The full-screen search overlay is a mobile-only affordance.
    pub fn show_overlay(&self) -> bool {
        self.is_mobile && self.open_search
    }
}

/// A group search row with its action label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRow {
    pub group_id: String,
    pub group_name: String,
    pub banner_url: Option<String>,
    /// "Leave" for approved members, "Join" otherwise.
    pub label: &'static str,
}

/// What the search dropdown shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum SearchRows {
    Hidden,
    Loading,
    NotFound(&'static str),
    Users(Vec<SearchUser>),
    Groups(Vec<GroupRow>),
}

impl SearchRows {
    pub const PATH: &'static str = "header/search/rows";

    pub fn derive(header: &HeaderState, result: Option<&QueryState<SearchResult>>) -> Self {
        if header.search_term.trim().is_empty() {
            return SearchRows::Hidden;
        }
        let Some(result) = result else {
            return SearchRows::Loading;
        };
        if result.loading {
            return SearchRows::Loading;
        }
        let data = result.data.as_ref();
        let not_found = SearchRows::NotFound(header.search_mode.not_found_message());
        match header.search_mode {
            SearchMode::Users => match data.and_then(|d| d.users.as_ref()) {
                Some(users) if !users.is_empty() => SearchRows::Users(users.clone()),
                _ => not_found,
            },
            SearchMode::Groups => match data.and_then(|d| d.groups.as_ref()) {
                Some(groups) if !groups.is_empty() => SearchRows::Groups(
                    groups
                        .iter()
                        .map(|g| GroupRow {
                            group_id: g.group.group_id.clone(),
                            group_name: g.group.group_name.clone(),
                            banner_url: g.group.banner_url.clone(),
                            label: if g.is_member() { "Leave" } else { "Join" },
                        })
                        .collect(),
                ),
                _ => not_found,
            },
        }
    }
}
