//! App-level state: stored at `app/route`.

use serde::Serialize;

/// Navigation route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppRoute(pub String);

impl AppRoute {
    pub const PATH: &'static str = "app/route";

    pub fn profile(user_id: &str) -> Self {
        Self(format!("/profile/{}", user_id))
    }

    pub fn group(group_id: &str) -> Self {
        Self(format!("/groups/{}", group_id))
    }
}
