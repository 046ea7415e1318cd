//! Request and outcome types for the ask pipeline.

use opal_core::{ApiReply, ParentCandidate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

/// One free-text instruction to resolve into a content operation.
#[derive(Clone, Debug, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AskRequest {
    /// The instruction, e.g. `create a CTA card block under parent 4187`.
    pub ask: String,

    /// Root identifier for structure discovery; defaults to the site root.
    pub discovery_root: Option<String>,

    /// Maximum traversal depth below the discovery root.
    pub max_depth: usize,

    /// Maximum number of nodes visited during discovery.
    pub max_nodes: usize,

    /// Language branch for created content.
    pub language: String,

    /// Target status for created content.
    pub status: String,

    /// Select the top-scoring parent proposal automatically instead of
    /// asking for clarification.
    pub auto_select_parent: bool,
}

impl Default for AskRequest {
    fn default() -> Self {
        Self {
            ask: String::new(),
            discovery_root: None,
            max_depth: crate::traverse::DEFAULT_MAX_DEPTH,
            max_nodes: crate::traverse::DEFAULT_MAX_NODES,
            language: "en".to_string(),
            status: "Published".to_string(),
            auto_select_parent: false,
        }
    }
}

impl AskRequest {
    /// Build a request with defaults for everything but the ask text.
    pub fn new(ask: impl Into<String>) -> Self {
        Self {
            ask: ask.into(),
            ..Self::default()
        }
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of resolving an ask.
///
/// A clarification is a successful outcome, not an error: the pipeline
/// refuses to guess and hands ranked proposals back to the caller.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum AskOutcome {
    /// A delegate performed the operation; its reply is passed through.
    Completed(ApiReply),
    /// More specific input is needed before anything is mutated.
    NeedsClarification(Clarification),
}

/// Guidance returned when the ask is ambiguous.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Clarification {
    /// Human-readable explanation of what is missing.
    pub message: String,
    /// Ranked parent proposals, when parent selection is the blocker.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proposals: Vec<ParentCandidate>,
}

impl Clarification {
    /// A clarification with no proposals.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            proposals: Vec::new(),
        }
    }

    /// A clarification carrying ranked parent proposals.
    pub fn with_proposals(message: impl Into<String>, proposals: Vec<ParentCandidate>) -> Self {
        Self {
            message: message.into(),
            proposals,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use opal_core::ParentLink;
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let request: AskRequest = serde_json::from_value(json!({"ask": "make a block"})).unwrap();
        assert_eq!(request.max_depth, 2);
        assert_eq!(request.max_nodes, 50);
        assert_eq!(request.language, "en");
        assert_eq!(request.status, "Published");
        assert!(!request.auto_select_parent);
        assert!(request.discovery_root.is_none());
    }

    #[test]
    fn test_outcome_serializes_reply_untagged() {
        let outcome = AskOutcome::Completed(ApiReply {
            status: 201,
            body: json!({"id": 1}),
        });
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": 201, "body": {"id": 1}})
        );
    }

    #[test]
    fn test_clarification_omits_empty_proposals() {
        let outcome = AskOutcome::NeedsClarification(Clarification::new("need a parent"));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"message": "need a parent"})
        );
    }

    #[test]
    fn test_clarification_with_proposals() {
        let clarification = Clarification::with_proposals(
            "choose one",
            vec![ParentCandidate {
                identifier: "10".into(),
                name: Some("Global Blocks".into()),
                score: 3,
                parent_link: ParentLink::Id(10),
            }],
        );
        let value = serde_json::to_value(&clarification).unwrap();
        assert_eq!(value["proposals"][0]["parentLink"], json!({"id": 10}));
    }
}
