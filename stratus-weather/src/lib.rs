//! # Stratus Weather
//!
//! A mock weather service exposed as an MCP server over stdio. It serves a
//! fixed table of five cities and is what `stratus` launches by default.
//!
//! - [`data`] - the city table
//! - [`tools`] - tool definitions and handlers
//! - [`server`] - the newline-delimited JSON-RPC loop

pub mod data;
pub mod server;
pub mod tools;

pub use server::{ServerError, WeatherServer, serve};
