//! Collaborator traits for the ask pipeline.
//!
//! These traits are the pipeline's only view of the remote CMS. The
//! production implementation lives in `opal-client`; tests substitute
//! mocks. All traits are object safe so collaborators can be held as
//! `Arc<dyn ...>`.

use async_trait::async_trait;
use opal_core::{ApiReply, ContentCreatePayload, ContentTypeDescriptor, ParentLink, Result, StructureNode};

/// Source of content-type schemas.
///
/// The returned sequence is treated as fully materialized; pagination, if
/// the backing API uses it, is the implementation's concern.
#[async_trait]
pub trait ContentTypeDirectory: Send + Sync {
    /// List every content type the CMS knows about.
    async fn list(&self) -> Result<Vec<ContentTypeDescriptor>>;
}

/// Access to the remote content tree.
#[async_trait]
pub trait ContentTree: Send + Sync {
    /// Fetch one node by identifier, with its children embedded inline.
    async fn fetch(&self, identifier: &str) -> Result<StructureNode>;
}

/// Resolution of the default tree root.
///
/// Kept separate from [`ContentTree`] so the redirect-following mechanics
/// stay mockable independent of document fetching.
#[async_trait]
pub trait RootResolver: Send + Sync {
    /// Resolve the identifier of the default root node.
    async fn resolve_default_root(&self) -> Result<String>;
}

/// The state-mutating delegates.
///
/// Neither call is idempotent; the ask pipeline performs at most one of
/// them per invocation.
#[async_trait]
pub trait ContentActions: Send + Sync {
    /// Create a content item from a fully resolved payload.
    async fn create(&self, payload: ContentCreatePayload) -> Result<ApiReply>;

    /// Move existing content under a new parent.
    async fn move_content(&self, content_identifier: &str, parent_link: ParentLink)
    -> Result<ApiReply>;
}
