//! Character roster domain module.
//!
//! The roster is the `characters` block as the characters endpoints present
//! it: the character list plus the session-level lock flag and version.

mod model;
mod repository;

pub use model::CharacterRoster;
pub use repository::CharactersRepository;
