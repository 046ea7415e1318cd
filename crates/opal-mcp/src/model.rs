//! MCP model types consumed by the tool registries.
//!
//! Thin re-export of the `rmcp` model so tool code has one import path.

pub use rmcp::model::{CallToolResult, Content, ErrorData, ListToolsResult, Tool};
