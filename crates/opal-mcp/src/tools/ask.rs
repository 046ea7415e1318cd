//! The ask tool: free-text instruction resolution.

use std::sync::Arc;

use opal_ask::{AskRequest, AskResolver};
use serde_json::Value;

use super::{make_tool, serialize_response};
use crate::error::McpErrorExt;
use crate::model::{ErrorData, Tool};
use crate::registry::{ToolRegistry, ToolResult};

/// Name of the ask tool.
pub const ASK_TOOL_NAME: &str = "cms_content_ask";

/// MCP tool wrapping the [`AskResolver`] pipeline.
///
/// The reply is either the delegate's `{status, body}` result or a
/// clarification object `{message, proposals?}`; a clarification is a
/// successful tool call, not an error.
pub struct AskTools {
    resolver: Arc<AskResolver>,
}

impl AskTools {
    /// Wrap a resolver.
    pub fn new(resolver: AskResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

impl ToolRegistry for AskTools {
    fn tools(&self) -> Vec<Tool> {
        let schema = schemars::schema_for!(AskRequest);
        vec![make_tool(
            ASK_TOOL_NAME,
            "Resolve a free-text instruction into a content operation: move existing \
             content, create new content of the best-matching type under a suitable \
             parent, or ask for clarification with ranked parent proposals",
            serde_json::to_value(schema).unwrap_or_default(),
        )]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        if name != ASK_TOOL_NAME {
            return None;
        }

        let resolver = Arc::clone(&self.resolver);
        Some(Box::pin(async move {
            let request: AskRequest = serde_json::from_value(args)
                .map_err(|e| ErrorData::invalid_params(e.to_string(), None))?;
            let outcome = resolver
                .resolve(&request)
                .await
                .map_err(|e| e.to_mcp_error())?;
            serialize_response(&outcome)
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================
