//! Bounded traversal of the remote content tree.
//!
//! One fetch returns the root document with children embedded; everything
//! after that is in-memory breadth-first traversal with depth and node
//! bounds. Hitting a bound terminates the walk without an error; the
//! partial snapshot is a valid result.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use opal_core::{Result, StructureNode};

use crate::traits::{ContentTree, RootResolver};

// ============================================================================
// Limits
// ============================================================================

/// Default maximum traversal depth below the root.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Default maximum number of distinct visited nodes (root included).
pub const DEFAULT_MAX_NODES: usize = 50;

/// Default root identifier used when root resolution fails.
pub const DEFAULT_FALLBACK_ROOT: &str = "1";

/// Bounds for one traversal run.
#[derive(Clone, Debug)]
pub struct TraversalLimits {
    /// Nodes at this depth are visited but their children are not expanded.
    pub max_depth: usize,
    /// Soft cutoff on distinct visited nodes; the partial result is valid.
    pub max_nodes: usize,
    /// Root identifier to use when default-root resolution fails.
    pub fallback_root: String,
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
            fallback_root: DEFAULT_FALLBACK_ROOT.to_string(),
        }
    }
}

// ============================================================================
// Node keys
// ============================================================================

/// Key synthesis for nodes that carry neither an id nor a guid.
///
/// Pluggable because the two strategies trade differently: positional keys
/// make de-duplication deterministic across runs of the same tree, random
/// keys never merge distinct anonymous nodes.
pub trait NodeKeyStrategy: Send + Sync {
    /// Produce a key for the `child_index`-th child of `parent_identifier`.
    fn key(&self, parent_identifier: &str, child_index: usize) -> String;
}

/// Stable keys derived from structural position (the default).
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionalKeys;

impl NodeKeyStrategy for PositionalKeys {
    fn key(&self, parent_identifier: &str, child_index: usize) -> String {
        format!("{parent_identifier}/{child_index}")
    }
}

/// A fresh random token per node.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomKeys;

impl NodeKeyStrategy for RandomKeys {
    fn key(&self, _parent_identifier: &str, _child_index: usize) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

// ============================================================================
// Snapshot types
// ============================================================================

/// A visited node, flattened out of the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatNode {
    /// The node's identifier (id, guid, or synthesized key).
    pub identifier: String,
    /// Numeric id, when present.
    pub id: Option<i64>,
    /// GUID, when present.
    pub guid: Option<String>,
    /// Node name, when present.
    pub name: Option<String>,
}

/// Bounded, partially-materialized view of the content tree.
///
/// The hierarchy below the root collapses into one flat list; consumers
/// score containers, they do not re-walk structure.
#[derive(Clone, Debug)]
pub struct StructureSnapshot {
    /// Identifier of the traversal root.
    pub identifier: String,
    /// Name of the traversal root, when present.
    pub name: Option<String>,
    /// Every child node encountered, in breadth-first order.
    pub children: Vec<FlatNode>,
}

// ============================================================================
// Traverser
// ============================================================================

/// Fetches a subtree and flattens it under the configured bounds.
pub struct Traverser {
    tree: Arc<dyn ContentTree>,
    roots: Arc<dyn RootResolver>,
    keys: Arc<dyn NodeKeyStrategy>,
}

impl Traverser {
    /// Create a traverser with the default (positional) key strategy.
    pub fn new(tree: Arc<dyn ContentTree>, roots: Arc<dyn RootResolver>) -> Self {
        Self {
            tree,
            roots,
            keys: Arc::new(PositionalKeys),
        }
    }

    /// Replace the key strategy for anonymous nodes.
    pub fn with_key_strategy(mut self, keys: Arc<dyn NodeKeyStrategy>) -> Self {
        self.keys = keys;
        self
    }

    /// Take a bounded snapshot of the tree under `root`.
    ///
    /// With no `root` given, the default root is resolved via the
    /// [`RootResolver`]; if that fails the configured fallback identifier
    /// is used instead of failing the whole ask.
    pub async fn snapshot(
        &self,
        root: Option<&str>,
        limits: &TraversalLimits,
    ) -> Result<StructureSnapshot> {
        let root_identifier = match root {
            Some(explicit) => explicit.to_string(),
            None => match self.roots.resolve_default_root().await {
                Ok(resolved) => resolved,
                Err(err) => {
                    tracing::warn!(%err, fallback = %limits.fallback_root, "root resolution failed");
                    limits.fallback_root.clone()
                }
            },
        };

        let document = self.tree.fetch(&root_identifier).await?;
        Ok(self.flatten(root_identifier, document, limits))
    }

    fn flatten(
        &self,
        fetched_identifier: String,
        document: StructureNode,
        limits: &TraversalLimits,
    ) -> StructureSnapshot {
        let root_identifier = document
            .id
            .map(|id| id.to_string())
            .or_else(|| document.guid.clone())
            .unwrap_or(fetched_identifier);

        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(root_identifier.clone());

        let mut queue: VecDeque<(StructureNode, usize, String, usize)> = VecDeque::new();
        // The root sits at depth 0 and is subject to the same expansion rule
        // as any other node.
        if limits.max_depth > 0 {
            for (index, child) in document.children.into_iter().enumerate() {
                queue.push_back((child, 1, root_identifier.clone(), index));
            }
        }

        let mut children = Vec::new();
        while let Some((node, depth, parent_identifier, index)) = queue.pop_front() {
            if visited.len() >= limits.max_nodes {
                tracing::debug!(max_nodes = limits.max_nodes, "node budget reached");
                break;
            }

            let identifier = node
                .id
                .map(|id| id.to_string())
                .or_else(|| node.guid.clone())
                .unwrap_or_else(|| self.keys.key(&parent_identifier, index));
            if !visited.insert(identifier.clone()) {
                continue;
            }

            children.push(FlatNode {
                identifier: identifier.clone(),
                id: node.id,
                guid: node.guid,
                name: node.name.clone(),
            });

            if depth < limits.max_depth {
                for (child_index, child) in node.children.into_iter().enumerate() {
                    queue.push_back((child, depth + 1, identifier.clone(), child_index));
                }
            }
        }

        StructureSnapshot {
            identifier: root_identifier,
            name: document.name,
            children,
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
    use opal_core::Error;

    struct FixedTree {
        root: StructureNode,
    }

    #[async_trait]
    impl ContentTree for FixedTree {
        async fn fetch(&self, _identifier: &str) -> Result<StructureNode> {
            Ok(self.root.clone())
        }
    }

    struct FixedRoot(Option<String>);

    #[async_trait]
    impl RootResolver for FixedRoot {
        async fn resolve_default_root(&self) -> Result<String> {
            self.0
                .clone()
                .ok_or_else(|| Error::http("redirect not followed"))
        }
    }

    fn node(id: i64, name: &str, children: Vec<StructureNode>) -> StructureNode {
        StructureNode {
            id: Some(id),
            guid: None,
            name: Some(name.to_string()),
            children,
        }
    }

    fn traverser(root: StructureNode, resolved_root: Option<String>) -> Traverser {
        Traverser::new(
            Arc::new(FixedTree { root }),
            Arc::new(FixedRoot(resolved_root)),
        )
    }

    #[tokio::test]
    async fn test_snapshot_flattens_depth() {
        let tree = node(
            1,
            "Root",
            vec![
                node(2, "Blocks", vec![node(4, "Promos", vec![])]),
                node(3, "Pages", vec![]),
            ],
        );
        let snapshot = traverser(tree, None)
            .snapshot(Some("1"), &TraversalLimits::default())
            .await
            .unwrap();

        assert_eq!(snapshot.identifier, "1");
        assert_eq!(snapshot.name.as_deref(), Some("Root"));
        let names: Vec<_> = snapshot
            .children
            .iter()
            .map(|c| c.name.as_deref().unwrap())
            .collect();
        // Breadth-first: both level-1 nodes before the level-2 node.
        assert_eq!(names, vec!["Blocks", "Pages", "Promos"]);
    }

    #[tokio::test]
    async fn test_snapshot_depth_bound() {
        let tree = node(
            1,
            "Root",
            vec![node(2, "L1", vec![node(3, "L2", vec![node(4, "L3", vec![])])])],
        );
        let limits = TraversalLimits {
            max_depth: 2,
            ..TraversalLimits::default()
        };
        let snapshot = traverser(tree, None)
            .snapshot(Some("1"), &limits)
            .await
            .unwrap();

        let names: Vec<_> = snapshot
            .children
            .iter()
            .map(|c| c.name.as_deref().unwrap())
            .collect();
        // L2 sits at max_depth: visited, but its children are not expanded.
        assert_eq!(names, vec!["L1", "L2"]);
    }

    #[tokio::test]
    async fn test_snapshot_node_budget_is_soft() {
        let children = (0..20).map(|i| node(10 + i, "Child", vec![])).collect();
        let tree = node(1, "Root", children);
        let limits = TraversalLimits {
            max_nodes: 5,
            ..TraversalLimits::default()
        };
        let snapshot = traverser(tree, None)
            .snapshot(Some("1"), &limits)
            .await
            .unwrap();

        // Root plus four children reaches the budget; the result is
        // returned rather than an error.
        assert_eq!(snapshot.children.len(), 4);
    }

    #[tokio::test]
    async fn test_snapshot_depth_zero_keeps_root_only() {
        let tree = node(1, "Root", vec![node(2, "L1", vec![])]);
        let limits = TraversalLimits {
            max_depth: 0,
            ..TraversalLimits::default()
        };
        let snapshot = traverser(tree, None)
            .snapshot(Some("1"), &limits)
            .await
            .unwrap();
        assert!(snapshot.children.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_dedupes_by_identifier() {
        let tree = node(
            1,
            "Root",
            vec![node(2, "First", vec![]), node(2, "Duplicate", vec![])],
        );
        let snapshot = traverser(tree, None)
            .snapshot(Some("1"), &TraversalLimits::default())
            .await
            .unwrap();

        assert_eq!(snapshot.children.len(), 1);
        assert_eq!(snapshot.children[0].name.as_deref(), Some("First"));
    }

    #[tokio::test]
    async fn test_snapshot_positional_keys_for_anonymous_nodes() {
        let anonymous = StructureNode {
            id: None,
            guid: None,
            name: Some("Anon".to_string()),
            children: vec![],
        };
        let tree = node(1, "Root", vec![anonymous.clone(), anonymous]);
        let snapshot = traverser(tree, None)
            .snapshot(Some("1"), &TraversalLimits::default())
            .await
            .unwrap();

        // Positional keys keep distinct anonymous siblings distinct, and
        // are stable across runs of the same tree.
        assert_eq!(snapshot.children.len(), 2);
        assert_eq!(snapshot.children[0].identifier, "1/0");
        assert_eq!(snapshot.children[1].identifier, "1/1");
    }

    #[tokio::test]
    async fn test_snapshot_random_keys_never_merge_anonymous_nodes() {
        let anonymous = StructureNode {
            id: None,
            guid: None,
            name: Some("Anon".to_string()),
            children: vec![],
        };
        let tree = node(1, "Root", vec![anonymous.clone(), anonymous]);
        let snapshot = traverser(tree, None)
            .with_key_strategy(Arc::new(RandomKeys))
            .snapshot(Some("1"), &TraversalLimits::default())
            .await
            .unwrap();

        assert_eq!(snapshot.children.len(), 2);
        assert_ne!(
            snapshot.children[0].identifier,
            snapshot.children[1].identifier
        );
    }

    #[tokio::test]
    async fn test_snapshot_resolves_default_root() {
        let tree = node(7, "Start", vec![]);
        let snapshot = traverser(tree, Some("7".to_string()))
            .snapshot(None, &TraversalLimits::default())
            .await
            .unwrap();
        assert_eq!(snapshot.identifier, "7");
    }

    #[tokio::test]
    async fn test_snapshot_falls_back_when_resolution_fails() {
        let tree = node(1, "Root", vec![]);
        let limits = TraversalLimits {
            fallback_root: "99".to_string(),
            ..TraversalLimits::default()
        };
        // Resolution fails; the fetch still runs against the fallback id.
        let snapshot = traverser(tree, None).snapshot(None, &limits).await.unwrap();
        assert_eq!(snapshot.identifier, "1");
    }

    #[tokio::test]
    async fn test_snapshot_guid_identifier() {
        let tree = StructureNode {
            id: None,
            guid: Some("aa-bb".to_string()),
            name: Some("Root".to_string()),
            children: vec![StructureNode {
                id: None,
                guid: Some("cc-dd".to_string()),
                name: Some("Child".to_string()),
                children: vec![],
            }],
        };
        let snapshot = traverser(tree, None)
            .snapshot(Some("aa-bb"), &TraversalLimits::default())
            .await
            .unwrap();
        assert_eq!(snapshot.identifier, "aa-bb");
        assert_eq!(snapshot.children[0].identifier, "cc-dd");
    }
}
