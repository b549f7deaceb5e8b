//! Router adapter seam.
//!
//! The URL is the durable record of where the user is: which project session
//! is open and which tab is showing. [`Navigator`] abstracts whatever owns the
//! URL (a browser history, an in-memory history, ...).

use crate::tab::TabId;
use serde::{Deserialize, Serialize};

/// Navigation state as read from a location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Session (project) id, if the location names one
    pub session_id: Option<String>,
    /// Raw tab value exactly as found in the location
    pub tab: Option<String>,
}

impl Route {
    /// The project selection route.
    pub fn selection() -> Self {
        Self::default()
    }

    pub fn workspace(session_id: impl Into<String>, tab: TabId) -> Self {
        Self {
            session_id: Some(session_id.into()),
            tab: Some(tab.to_string()),
        }
    }

    /// Parsed tab, with unknown or disabled values falling back to overview.
    pub fn tab_or_default(&self) -> TabId {
        TabId::from_url_value(self.tab.as_deref())
    }
}

/// Reads and writes navigation state to the URL.
pub trait Navigator: Send + Sync {
    /// The route of the current location.
    fn current(&self) -> Route;

    /// Pushes a new history entry for the given session and tab.
    fn push_workspace(&self, session_id: &str, tab: TabId);

    /// Pushes the project creation/selection route.
    fn push_selection(&self);
}
