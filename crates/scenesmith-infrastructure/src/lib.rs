//! Infrastructure layer for Scenesmith.
//!
//! HTTP implementations of the core repository traits, the in-memory URL
//! router, and configuration file handling.

pub mod api;
pub mod config;
pub mod config_service;
pub mod http_chain_generator;
pub mod http_characters_repository;
pub mod http_context_repository;
pub mod http_project_repository;
pub mod paths;
pub mod url_router;

pub use crate::api::ApiClient;
pub use crate::config::ClientConfig;
pub use crate::config_service::ConfigService;
pub use crate::http_chain_generator::HttpChainGenerator;
pub use crate::http_characters_repository::HttpCharactersRepository;
pub use crate::http_context_repository::HttpContextRepository;
pub use crate::http_project_repository::HttpProjectRepository;
pub use crate::paths::ScenesmithPaths;
pub use crate::url_router::UrlRouter;
