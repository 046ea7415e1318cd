//! Opal MCP — the tool server.
//!
//! # Key Abstractions
//!
//! - [`ToolRegistry`]: tool families declare and dispatch their tools
//! - [`CompositeRegistry`]: families composed in registration order
//! - [`OpalMcpServer`]: generic `rmcp` server over a composed registry
//!
//! Tool families: [`DefinitionTools`] (content type and language branch
//! definitions), [`ContentTools`] (content management passthrough), and
//! [`AskTools`] (free-text ask resolution).

#![doc = include_str!("../README.md")]

pub mod error;
pub mod model;
mod providers;
pub mod registry;
pub mod server;
pub mod tools;
pub mod traits;

pub use error::McpErrorExt;
pub use registry::{CompositeRegistry, ToolRegistry, ToolResult};
pub use server::{OpalMcpServer, serve_stdio};
pub use tools::{AskTools, ContentTools, DefinitionTools};
