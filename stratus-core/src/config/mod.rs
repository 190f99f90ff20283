pub mod app;
pub mod engine;
pub mod error;
pub mod loader;
pub mod server;

pub use crate::constants::CONFIG_PATH;
pub use app::AppConfig;
pub use engine::{EngineConfig, EngineKind, resolve_model};
pub use error::ConfigError;
pub use server::ServerConfig;
