//! Reasoning engine infrastructure
//!
//! # Structure
//! - `types` - engine error type
//! - `traits` - the [`ReasoningEngine`] seam the orchestration loop calls
//! - `adapter` - turn and catalog conversion to provider wire formats
//! - `factory` - builds an engine from [`EngineConfig`](crate::config::EngineConfig)
//! - `clients` - Anthropic and OpenAI-compatible implementations

pub mod adapter;
pub mod clients;
pub mod factory;
pub mod traits;
pub mod types;

pub use factory::EngineFactory;
pub use traits::ReasoningEngine;
pub use types::ModelError;
