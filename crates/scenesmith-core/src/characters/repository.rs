//! Character roster repository trait.

use super::model::CharacterRoster;
use crate::context::SessionContext;
use crate::error::Result;
use async_trait::async_trait;

/// Remote access to the `/api/characters/*` endpoints.
#[async_trait]
pub trait CharactersRepository: Send + Sync {
    /// Fetches the character roster of a session.
    async fn list(&self, session_id: &str) -> Result<CharacterRoster>;

    /// Sets the characters lock and returns the fresh context document.
    async fn set_locked(&self, session_id: &str, locked: bool) -> Result<SessionContext>;
}
