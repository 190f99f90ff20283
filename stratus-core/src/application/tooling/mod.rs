mod error;
mod interface;
mod process;

pub use error::HostError;
pub use interface::{RemoteTool, ToolHost};
pub use process::McpProcess;
