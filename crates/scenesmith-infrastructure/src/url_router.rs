//! In-memory URL router.
//!
//! Implements [`Navigator`] over a browser-like history of locations.
//! Locations look like `/create` (project selection) and
//! `/create?sessionId=<id>&tab=<tab>` (workspace).

use reqwest::Url;
use scenesmith_core::navigation::{Navigator, Route};
use scenesmith_core::{Result, ScenesmithError, TabId};
use std::sync::{Mutex, PoisonError};

/// Path of the creation/selection page that also hosts the workspace.
pub const CREATE_PATH: &str = "/create";

const BASE: &str = "http://scenesmith.local/";

/// Parses a location (path plus query) or a full URL into a [`Route`].
///
/// Empty query values read as absent.
pub fn parse_location(location: &str) -> Result<Route> {
    let base = Url::parse(BASE).map_err(|e| ScenesmithError::internal(e.to_string()))?;
    let url = base
        .join(location.trim())
        .map_err(|e| ScenesmithError::invalid("location", format!("'{location}': {e}")))?;

    let mut route = Route::default();
    for (key, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "sessionId" => route.session_id = Some(value.into_owned()),
            "tab" => route.tab = Some(value.into_owned()),
            _ => {}
        }
    }
    Ok(route)
}

/// Formats a route as a location string.
pub fn format_location(route: &Route) -> String {
    let Some(session_id) = route.session_id.as_deref() else {
        return CREATE_PATH.to_string();
    };
    let mut url = match Url::parse(BASE).and_then(|base| base.join(CREATE_PATH)) {
        Ok(url) => url,
        Err(_) => return CREATE_PATH.to_string(),
    };
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("sessionId", session_id);
        if let Some(tab) = route.tab.as_deref() {
            query.append_pair("tab", tab);
        }
    }
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

#[derive(Debug)]
struct History {
    entries: Vec<Route>,
    index: usize,
}

/// Navigator keeping its own history stack.
#[derive(Debug)]
pub struct UrlRouter {
    history: Mutex<History>,
}

impl UrlRouter {
    pub fn new(initial: Route) -> Self {
        Self {
            history: Mutex::new(History {
                entries: vec![initial],
                index: 0,
            }),
        }
    }

    /// Starts at the given location string.
    pub fn from_location(location: &str) -> Result<Self> {
        Ok(Self::new(parse_location(location)?))
    }

    /// The current location string.
    pub fn location(&self) -> String {
        format_location(&self.current())
    }

    /// Steps back one entry. Returns `false` at the start of history.
    pub fn back(&self) -> bool {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        if history.index == 0 {
            return false;
        }
        history.index -= 1;
        true
    }

    /// Steps forward one entry. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        if history.index + 1 >= history.entries.len() {
            return false;
        }
        history.index += 1;
        true
    }

    pub fn history_len(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    fn push(&self, route: Route) {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        let next = history.index + 1;
        history.entries.truncate(next);
        history.entries.push(route);
        history.index = next;
        tracing::debug!(
            "[UrlRouter] -> {}",
            format_location(&history.entries[history.index])
        );
    }
}

impl Default for UrlRouter {
    fn default() -> Self {
        Self::new(Route::selection())
    }
}

impl Navigator for UrlRouter {
    fn current(&self) -> Route {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.entries[history.index].clone()
    }

    fn push_workspace(&self, session_id: &str, tab: TabId) {
        self.push(Route::workspace(session_id, tab));
    }

    fn push_selection(&self) {
        self.push(Route::selection());
    }
}
