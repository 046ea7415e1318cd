//! Provider traits for the passthrough tool families.
//!
//! The passthrough tools forward caller-supplied fields to the remote API
//! and surface its `{status, body}` reply untouched. These traits keep the
//! tool families mockable; the production implementation wraps
//! [`opal_client::CmsClient`].

use async_trait::async_trait;
use opal_core::{ApiReply, ParentLink, Result};
use serde_json::Value;

/// Read access to the content-definition APIs.
#[async_trait]
pub trait DefinitionOps: Send + Sync {
    /// List all content types.
    async fn content_types(&self) -> Result<ApiReply>;

    /// Get one content type by id.
    async fn content_type(&self, id: &str) -> Result<ApiReply>;

    /// List all language branch definitions.
    async fn language_branches(&self) -> Result<ApiReply>;

    /// Get one language branch by name.
    async fn language_branch(&self, name: &str) -> Result<ApiReply>;
}

/// Pass-through content management operations.
#[async_trait]
pub trait ContentOps: Send + Sync {
    /// Get a content item.
    async fn get(&self, id: &str) -> Result<ApiReply>;

    /// List a content item's children.
    async fn children(&self, id: &str) -> Result<ApiReply>;

    /// Create a content item from a caller-supplied payload.
    async fn create(&self, payload: Value) -> Result<ApiReply>;

    /// Patch a content item with caller-supplied fields.
    async fn patch(&self, id: &str, patch: Value) -> Result<ApiReply>;

    /// Delete a content item.
    async fn delete(&self, id: &str) -> Result<ApiReply>;

    /// Move a content item under a new parent.
    async fn move_to(&self, id: &str, parent_link: ParentLink) -> Result<ApiReply>;
}
