//! Domain layer for Scenesmith.
//!
//! Models of the campaign workspace (projects, session context, macro
//! chains, character rosters), the pure status derivation over them, and the
//! traits the outer layers implement to reach the remote API and the URL.

pub mod chain;
pub mod characters;
pub mod context;
pub mod error;
pub mod navigation;
pub mod project;
pub mod retry;
pub mod status;
pub mod tab;

// Re-export common error type
pub use error::{Result, ScenesmithError};
pub use retry::RetryPolicy;
pub use tab::TabId;
