//! Project domain model.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A campaign-authoring project as returned by `/api/projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque project identifier, shared with the session context store
    pub id: String,
    /// Human-readable project title
    pub title: String,
    /// Timestamp when the project was created (ISO 8601 format)
    #[serde(default)]
    pub created_at: String,
    /// Timestamp when the project was last updated (ISO 8601 format)
    #[serde(default)]
    pub updated_at: String,
}

impl Project {
    /// Parses `updated_at`.
    ///
    /// The backend emits both offset-aware RFC 3339 strings and naive local
    /// timestamps; naive values are read as UTC.
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }

    /// Ordering for project lists: most recently updated first, unparsable
    /// timestamps last, ties broken by title.
    pub fn recent_first(a: &Project, b: &Project) -> Ordering {
        let by_time = match (a.updated_at_utc(), b.updated_at_utc()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_time.then_with(|| a.title.cmp(&b.title))
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
