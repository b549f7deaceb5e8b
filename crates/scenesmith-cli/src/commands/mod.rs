pub mod projects;
pub mod workspace;
