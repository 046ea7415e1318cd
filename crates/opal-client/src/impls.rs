//! Production implementations of the ask collaborator traits.

use async_trait::async_trait;
use opal_ask::traits::{ContentActions, ContentTree, ContentTypeDirectory, RootResolver};
use opal_core::{
    ApiReply, ContentCreatePayload, ContentTypeDescriptor, ParentLink, Result, StructureNode,
};
use serde_json::json;

use crate::client::{
    CONTENT_MANAGEMENT_PATH, CONTENT_STRUCTURE_PATH, CONTENT_TYPES_PATH, CmsClient,
};

#[async_trait]
impl ContentTypeDirectory for CmsClient {
    async fn list(&self) -> Result<Vec<ContentTypeDescriptor>> {
        let reply = self.get_json(CONTENT_TYPES_PATH, &[]).await?;
        Ok(serde_json::from_value(reply.body)?)
    }
}

#[async_trait]
impl ContentTree for CmsClient {
    async fn fetch(&self, identifier: &str) -> Result<StructureNode> {
        let path = format!("{CONTENT_STRUCTURE_PATH}/{identifier}");
        let reply = self.get_json(&path, &[("expand", "children")]).await?;
        Ok(serde_json::from_value(reply.body)?)
    }
}

#[async_trait]
impl RootResolver for CmsClient {
    async fn resolve_default_root(&self) -> Result<String> {
        self.probe_default_root().await
    }
}

#[async_trait]
impl ContentActions for CmsClient {
    async fn create(&self, payload: ContentCreatePayload) -> Result<ApiReply> {
        self.post_json(CONTENT_MANAGEMENT_PATH, &payload).await
    }

    async fn move_content(
        &self,
        content_identifier: &str,
        parent_link: ParentLink,
    ) -> Result<ApiReply> {
        let path = format!("{CONTENT_MANAGEMENT_PATH}/{content_identifier}/move");
        self.post_json(&path, &json!({ "parentLink": parent_link }))
            .await
    }
}
