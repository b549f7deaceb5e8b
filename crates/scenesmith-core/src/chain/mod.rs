//! Macro chain domain module.
//!
//! A macro chain is the ordered outline of scenes generated from a story
//! concept. The same shape is stored under `blocks.custom.macroChain`.

mod generator;
mod model;

pub use generator::ChainGenerator;
pub use model::{GenerateChainRequest, MacroChain, MacroScene};
