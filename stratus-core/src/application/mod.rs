//! # Application Module
//!
//! The orchestration core.
//!
//! ## Submodules
//!
//! - [`tooling`] - the tool host seam and its MCP stdio implementation
//! - [`catalog`] - turns the host's tool listing into invocation contracts
//! - [`invoker`] - dispatches one tool call and folds faults into [`invoker::ToolError`]
//! - [`conversation`] - the append-only turn log and the system turn
//! - [`agent`] - the bounded engine/tool state machine
//! - [`client`] - the [`client::Assistant`] session exposing `ask`

pub mod agent;
pub mod catalog;
pub mod client;
pub mod conversation;
pub mod invoker;
pub mod tooling;
