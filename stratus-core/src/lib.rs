//! # Stratus Core
//!
//! Answers natural-language questions by letting a reasoning engine call tools
//! that live behind an MCP server. The crate discovers the server's tools,
//! turns their schemas into string-typed invocation contracts, and drives the
//! bounded engine/tool loop.
//!
//! ## Layout
//!
//! - [`domain`] - catalog, turn, and result types shared by every layer
//! - [`application`] - catalog adapter, tool invoker, conversation log,
//!   orchestration loop, and the [`Assistant`] session
//! - [`infrastructure`] - MCP stdio transport, JSON-RPC types, engine clients
//! - [`config`] - TOML configuration and model selection

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, catalog, client, conversation, invoker, tooling};
pub use application::client::{Assistant, SessionOptions};
pub use config::{AppConfig, ConfigError};
pub use domain::types;
pub use infrastructure::{model, rpc};
