//! Production providers backed by the CMS client.

use async_trait::async_trait;
use opal_client::CmsClient;
use opal_client::client::{
    CONTENT_MANAGEMENT_PATH, CONTENT_TYPES_PATH, LANGUAGE_BRANCHES_PATH,
};
use opal_core::{ApiReply, ParentLink, Result};
use serde_json::{Value, json};

use crate::traits::{ContentOps, DefinitionOps};

#[async_trait]
impl DefinitionOps for CmsClient {
    async fn content_types(&self) -> Result<ApiReply> {
        self.get_json(CONTENT_TYPES_PATH, &[]).await
    }

    async fn content_type(&self, id: &str) -> Result<ApiReply> {
        self.get_json(&format!("{CONTENT_TYPES_PATH}/{id}"), &[])
            .await
    }

    async fn language_branches(&self) -> Result<ApiReply> {
        self.get_json(LANGUAGE_BRANCHES_PATH, &[]).await
    }

    async fn language_branch(&self, name: &str) -> Result<ApiReply> {
        self.get_json(&format!("{LANGUAGE_BRANCHES_PATH}/{name}"), &[])
            .await
    }
}

#[async_trait]
impl ContentOps for CmsClient {
    async fn get(&self, id: &str) -> Result<ApiReply> {
        self.get_json(&format!("{CONTENT_MANAGEMENT_PATH}/{id}"), &[])
            .await
    }

    async fn children(&self, id: &str) -> Result<ApiReply> {
        self.get_json(&format!("{CONTENT_MANAGEMENT_PATH}/{id}/children"), &[])
            .await
    }

    async fn create(&self, payload: Value) -> Result<ApiReply> {
        self.post_json(CONTENT_MANAGEMENT_PATH, &payload).await
    }

    async fn patch(&self, id: &str, patch: Value) -> Result<ApiReply> {
        self.patch_json(&format!("{CONTENT_MANAGEMENT_PATH}/{id}"), &patch)
            .await
    }

    async fn delete(&self, id: &str) -> Result<ApiReply> {
        self.delete_json(&format!("{CONTENT_MANAGEMENT_PATH}/{id}"))
            .await
    }

    async fn move_to(&self, id: &str, parent_link: ParentLink) -> Result<ApiReply> {
        self.post_json(
            &format!("{CONTENT_MANAGEMENT_PATH}/{id}/move"),
            &json!({ "parentLink": parent_link }),
        )
        .await
    }
}
