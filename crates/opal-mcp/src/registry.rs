//! Tool registration.
//!
//! Tool families implement [`ToolRegistry`]; the server composes them with
//! a [`CompositeRegistry`] and dispatches calls by tool name.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::model::{CallToolResult, ErrorData, Tool};

/// The future a tool call resolves to.
pub type ToolResult =
    Pin<Box<dyn Future<Output = Result<CallToolResult, ErrorData>> + Send + 'static>>;

/// A named family of MCP tools.
pub trait ToolRegistry: Send + Sync {
    /// Declare the family's tools.
    fn tools(&self) -> Vec<Tool>;

    /// Dispatch a call by tool name.
    ///
    /// Returns `None` when the name belongs to another family, so
    /// registries can be chained.
    fn call(&self, name: &str, args: Value) -> Option<ToolResult>;

    /// Whether this family declares a tool with the given name.
    fn has_tool(&self, name: &str) -> bool {
        self.tools().iter().any(|tool| tool.name == name)
    }

    /// Number of declared tools.
    fn tool_count(&self) -> usize {
        self.tools().len()
    }
}

/// Registries merged in registration order.
#[derive(Default)]
pub struct CompositeRegistry {
    registries: Vec<Box<dyn ToolRegistry>>,
}

impl CompositeRegistry {
    /// An empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool family; earlier families win on (unexpected) name clashes.
    pub fn with(mut self, registry: impl ToolRegistry + 'static) -> Self {
        self.registries.push(Box::new(registry));
        self
    }
}

impl ToolRegistry for CompositeRegistry {
    fn tools(&self) -> Vec<Tool> {
        self.registries.iter().flat_map(|r| r.tools()).collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        self.registries
            .iter()
            .find_map(|r| r.call(name, args.clone()))
    }
}

// ============================================================================
// Tests
// ============================================================================
