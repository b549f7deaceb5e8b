//! Project domain module.
//!
//! A project is one campaign-authoring workspace. Its id doubles as the
//! session id under which the backend stores the session context.

mod model;
mod repository;

pub use model::Project;
pub use repository::ProjectRepository;
