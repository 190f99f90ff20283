//! # Infrastructure Module
//!
//! Adapters to the outside world: the JSON-RPC message types spoken to and by
//! MCP servers, and the HTTP clients for reasoning engines.

pub mod model;
pub mod rpc;
