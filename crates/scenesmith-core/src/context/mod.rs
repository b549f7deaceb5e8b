//! Session context domain module.
//!
//! # Module Structure
//!
//! - `model`: The context document (`SessionContext`) and its blocks
//! - `block_type`: Block names accepted by the context endpoints
//! - `snapshot`: `BlockState` per block, derived once per document
//! - `health`: Summary the context store reports for a session
//! - `repository`: Repository trait for the remote context store

mod block_type;
mod health;
mod model;
mod repository;
mod snapshot;

pub use block_type::BlockType;
pub use health::ContextHealth;
pub(crate) use model::{lenient_default, lenient_option};
pub use model::{
    CharactersBlock, ContentStatus, ContextBlocks, CustomBlock, SceneDetail, SessionContext,
};
pub use repository::ContextRepository;
pub use snapshot::{BlockState, ContextSnapshot};
