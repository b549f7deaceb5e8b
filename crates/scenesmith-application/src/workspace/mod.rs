//! Workspace state and tab navigation.
//!
//! [`WorkspaceSession`] is the one place the active project, tab and context
//! live; [`TabNavigationController`] keeps it in step with the URL.

mod navigation;
mod session;

pub use navigation::{MountOutcome, TabNavigationController, TabView};
pub use session::{SessionTarget, WorkspaceSession, WorkspaceState};
