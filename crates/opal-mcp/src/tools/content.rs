//! Pass-through content management tools.
//!
//! Each tool forwards the caller-supplied fields to the remote API and
//! surfaces its `{status, body}` reply; no inference happens here.

use std::sync::Arc;

use opal_core::ParentLink;
use serde::Deserialize;
use serde_json::Value;

use super::{make_tool, serialize_response};
use crate::error::McpErrorExt;
use crate::model::{ErrorData, Tool};
use crate::registry::{ToolRegistry, ToolResult};
use crate::traits::ContentOps;

// ---------------------------------------------------------------------------
// Argument types
// ---------------------------------------------------------------------------

/// Arguments naming one content item.
#[derive(Debug, Deserialize)]
pub struct ContentIdArgs {
    /// Content identifier (numeric id or guid).
    pub id: String,
}

/// Arguments for the create tool.
#[derive(Debug, Deserialize)]
pub struct CreateContentArgs {
    /// Full create payload, forwarded verbatim.
    pub payload: Value,
}

/// Arguments for the patch tool.
#[derive(Debug, Deserialize)]
pub struct PatchContentArgs {
    /// Content identifier (numeric id or guid).
    pub id: String,
    /// Fields to patch, forwarded verbatim.
    pub patch: Value,
}

/// Arguments for the move tool.
#[derive(Debug, Deserialize)]
pub struct MoveContentArgs {
    /// Content identifier (numeric id or guid).
    pub id: String,
    /// Destination parent link (`{"id": n}` or `{"guidValue": "..."}`).
    pub parent_link: ParentLink,
}

// ---------------------------------------------------------------------------
// ContentTools<P>
// ---------------------------------------------------------------------------

/// MCP tools backed by a [`ContentOps`] provider.
///
/// Generates six tools: `cms_content_get`, `cms_content_children`,
/// `cms_content_create`, `cms_content_patch`, `cms_content_delete`, and
/// `cms_content_move`.
pub struct ContentTools<P: ContentOps> {
    provider: Arc<P>,
}

impl<P: ContentOps + 'static> ContentTools<P> {
    /// Create content tools with the given provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Create content tools with a shared provider reference.
    pub fn with_shared(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

impl<P: ContentOps + 'static> ToolRegistry for ContentTools<P> {
    fn tools(&self) -> Vec<Tool> {
        let id_schema = |description: &str| {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": description
                    }
                },
                "required": ["id"]
            })
        };

        vec![
            make_tool(
                "cms_content_get",
                "Get a content item by id or guid",
                id_schema("Identifier of the content item"),
            ),
            make_tool(
                "cms_content_children",
                "List the children of a content item",
                id_schema("Identifier of the parent content item"),
            ),
            make_tool(
                "cms_content_create",
                "Create a content item from a complete payload",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "payload": {
                            "type": "object",
                            "description": "Create payload forwarded to the management API"
                        }
                    },
                    "required": ["payload"]
                }),
            ),
            make_tool(
                "cms_content_patch",
                "Patch fields on a content item",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "string",
                            "description": "Identifier of the content item"
                        },
                        "patch": {
                            "type": "object",
                            "description": "Fields to update, forwarded to the management API"
                        }
                    },
                    "required": ["id", "patch"]
                }),
            ),
            make_tool(
                "cms_content_delete",
                "Delete a content item",
                id_schema("Identifier of the content item to delete"),
            ),
            make_tool(
                "cms_content_move",
                "Move a content item under a new parent",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "string",
                            "description": "Identifier of the content item to move"
                        },
                        "parent_link": {
                            "type": "object",
                            "description": "Destination parent: exactly one of {\"id\": n} or {\"guidValue\": \"...\"}"
                        }
                    },
                    "required": ["id", "parent_link"]
                }),
            ),
        ]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let provider = Arc::clone(&self.provider);

        match name {
            "cms_content_get" => Some(Box::pin(async move {
                let args: ContentIdArgs = parse(args)?;
                let reply = provider.get(&args.id).await.map_err(|e| e.to_mcp_error())?;
                serialize_response(&reply)
            })),

            "cms_content_children" => Some(Box::pin(async move {
                let args: ContentIdArgs = parse(args)?;
                let reply = provider
                    .children(&args.id)
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&reply)
            })),

            "cms_content_create" => Some(Box::pin(async move {
                let args: CreateContentArgs = parse(args)?;
                let reply = provider
                    .create(args.payload)
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&reply)
            })),

            "cms_content_patch" => Some(Box::pin(async move {
                let args: PatchContentArgs = parse(args)?;
                let reply = provider
                    .patch(&args.id, args.patch)
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&reply)
            })),

            "cms_content_delete" => Some(Box::pin(async move {
                let args: ContentIdArgs = parse(args)?;
                let reply = provider
                    .delete(&args.id)
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&reply)
            })),

            "cms_content_move" => Some(Box::pin(async move {
                let args: MoveContentArgs = parse(args)?;
                let reply = provider
                    .move_to(&args.id, args.parent_link)
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&reply)
            })),

            _ => None,
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, ErrorData> {
    serde_json::from_value(args).map_err(|e| ErrorData::invalid_params(e.to_string(), None))
}

// ============================================================================
// Tests
// ============================================================================
