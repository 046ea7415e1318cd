//! Content-definition tools (schemas and language branches).

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::{make_tool, serialize_response};
use crate::error::McpErrorExt;
use crate::model::{ErrorData, Tool};
use crate::registry::{ToolRegistry, ToolResult};
use crate::traits::DefinitionOps;

// ---------------------------------------------------------------------------
// Argument types
// ---------------------------------------------------------------------------

/// Arguments for the content-type lookup tool.
#[derive(Debug, Deserialize)]
pub struct GetContentTypeArgs {
    /// Content type identifier.
    pub id: String,
}

/// Arguments for the language-branch lookup tool.
#[derive(Debug, Deserialize)]
pub struct GetLanguageBranchArgs {
    /// Language branch name (for example `en`, `sv`).
    pub name: String,
}

// ---------------------------------------------------------------------------
// DefinitionTools<P>
// ---------------------------------------------------------------------------

/// MCP tools backed by a [`DefinitionOps`] provider.
///
/// Generates four tools:
/// - `cms_content_types_list` — list all content types
/// - `cms_content_type_get` — get one content type by id
/// - `cms_language_branches_list` — list language branch definitions
/// - `cms_language_branch_get` — get one language branch by name
pub struct DefinitionTools<P: DefinitionOps> {
    provider: Arc<P>,
}

impl<P: DefinitionOps + 'static> DefinitionTools<P> {
    /// Create definition tools with the given provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Create definition tools with a shared provider reference.
    pub fn with_shared(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

impl<P: DefinitionOps + 'static> ToolRegistry for DefinitionTools<P> {
    fn tools(&self) -> Vec<Tool> {
        vec![
            make_tool(
                "cms_content_types_list",
                "List all content types known to the CMS",
                serde_json::json!({
                    "type": "object",
                    "properties": {}
                }),
            ),
            make_tool(
                "cms_content_type_get",
                "Get all details about a specific content type by its id",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "string",
                            "description": "The id of the content type to retrieve"
                        }
                    },
                    "required": ["id"]
                }),
            ),
            make_tool(
                "cms_language_branches_list",
                "List all language branch definitions in the system",
                serde_json::json!({
                    "type": "object",
                    "properties": {}
                }),
            ),
            make_tool(
                "cms_language_branch_get",
                "Get a specific language branch definition by its name",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "The language branch name to retrieve (for example en, sv)"
                        }
                    },
                    "required": ["name"]
                }),
            ),
        ]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let provider = Arc::clone(&self.provider);

        match name {
            "cms_content_types_list" => Some(Box::pin(async move {
                let reply = provider
                    .content_types()
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&reply)
            })),

            "cms_content_type_get" => Some(Box::pin(async move {
                let args: GetContentTypeArgs = serde_json::from_value(args)
                    .map_err(|e| ErrorData::invalid_params(e.to_string(), None))?;
                let reply = provider
                    .content_type(&args.id)
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&reply)
            })),

            "cms_language_branches_list" => Some(Box::pin(async move {
                let reply = provider
                    .language_branches()
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&reply)
            })),

            "cms_language_branch_get" => Some(Box::pin(async move {
                let args: GetLanguageBranchArgs = serde_json::from_value(args)
                    .map_err(|e| ErrorData::invalid_params(e.to_string(), None))?;
                let reply = provider
                    .language_branch(&args.name)
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&reply)
            })),

            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use opal_core::{ApiReply, Error, Result};
    use serde_json::json;

    struct MockDefinitions;

    #[async_trait]
    impl DefinitionOps for MockDefinitions {
        async fn content_types(&self) -> Result<ApiReply> {
            Ok(ApiReply {
                status: 200,
                body: json!([{"name": "CtaCardBlock"}]),
            })
        }

        async fn content_type(&self, id: &str) -> Result<ApiReply> {
            if id == "CtaCardBlock" {
                Ok(ApiReply {
                    status: 200,
                    body: json!({"name": "CtaCardBlock"}),
                })
            } else {
                Err(Error::upstream(404, "not found"))
            }
        }

        async fn language_branches(&self) -> Result<ApiReply> {
            Ok(ApiReply {
                status: 200,
                body: json!([{"name": "en"}]),
            })
        }

        async fn language_branch(&self, name: &str) -> Result<ApiReply> {
            Ok(ApiReply {
                status: 200,
                body: json!({"name": name}),
            })
        }
    }

    #[test]
    fn test_tool_names() {
        let tools = DefinitionTools::new(MockDefinitions);
        assert_eq!(tools.tool_count(), 4);
        assert!(tools.has_tool("cms_content_types_list"));
        assert!(tools.has_tool("cms_content_type_get"));
        assert!(tools.has_tool("cms_language_branches_list"));
        assert!(tools.has_tool("cms_language_branch_get"));
    }

    #[tokio::test]
    async fn test_list_content_types() {
        let tools = DefinitionTools::new(MockDefinitions);
        let result = tools
            .call("cms_content_types_list", json!({}))
            .unwrap()
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
    }

    #[tokio::test]
    async fn test_get_content_type_requires_id() {
        let tools = DefinitionTools::new(MockDefinitions);
        let result = tools.call("cms_content_type_get", json!({})).unwrap().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_content_type_not_found_is_error() {
        let tools = DefinitionTools::new(MockDefinitions);
        let result = tools
            .call("cms_content_type_get", json!({"id": "Missing"}))
            .unwrap()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_language_branch() {
        let tools = DefinitionTools::new(MockDefinitions);
        let result = tools
            .call("cms_language_branch_get", json!({"name": "sv"}))
            .unwrap()
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
    }

    #[test]
    fn test_unknown_tool() {
        let tools = DefinitionTools::new(MockDefinitions);
        assert!(tools.call("cms_definitions_delete", json!({})).is_none());
    }
}
