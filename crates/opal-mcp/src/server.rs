//! The MCP server over a composed tool registry.

use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::transport::stdio;
use rmcp::{RoleServer, ServerHandler, ServiceExt};
use serde_json::Value;

use opal_core::{Error, Result};

use crate::registry::{CompositeRegistry, ToolRegistry};

/// Generic MCP server over a [`CompositeRegistry`].
pub struct OpalMcpServer {
    registry: CompositeRegistry,
}

impl OpalMcpServer {
    /// Wrap a composed registry.
    pub fn new(registry: CompositeRegistry) -> Self {
        Self { registry }
    }
}

impl ServerHandler for OpalMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "opal-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::default()
            },
            instructions: Some(
                "Tools for a hierarchical content-management API: content type and \
                 language branch definitions, content CRUD passthrough, and free-text \
                 ask resolution (cms_content_ask)."
                    .to_string(),
            ),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.registry.tools(),
            ..ListToolsResult::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        tracing::debug!(tool = %request.name, "tool call");
        let args = request
            .arguments
            .map(Value::Object)
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        match self.registry.call(&request.name, args) {
            Some(pending) => pending.await,
            None => Err(ErrorData::invalid_params(
                format!("unknown tool: {}", request.name),
                None,
            )),
        }
    }
}

/// Serve the registry over stdio until the client disconnects.
///
/// stdout carries the protocol; logging must go to stderr.
pub async fn serve_stdio(server: OpalMcpServer) -> Result<()> {
    let service = server
        .serve(stdio())
        .await
        .map_err(|e| Error::http_with_source("MCP serve failed", e))?;
    service
        .waiting()
        .await
        .map_err(|e| Error::http_with_source("MCP server terminated abnormally", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_info_enables_tools() {
        let server = OpalMcpServer::new(CompositeRegistry::new());
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "opal-mcp");
        assert!(info.instructions.is_some());
    }
}
