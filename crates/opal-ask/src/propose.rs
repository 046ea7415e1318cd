//! Container scoring for parent proposals.

use opal_core::{ContentTypeDescriptor, ParentCandidate, ParentLink, Result};
use regex::Regex;

use crate::traverse::StructureSnapshot;

// ============================================================================
// Rules
// ============================================================================

/// Most proposals returned from one pass.
pub const MAX_PROPOSALS: usize = 5;

/// Score for a block-ish container when the target type is a block.
pub const BLOCK_CONTAINER_SCORE: u32 = 3;

/// Score for a generic container name.
pub const GENERIC_CONTAINER_SCORE: u32 = 1;

/// Pattern marking the target type as a block.
pub const BLOCK_TYPE_PATTERN: &str = r"(?i)block";

/// Container names that suit block content.
pub const BLOCK_CONTAINER_PATTERN: &str = r"(?i)block|widgets|components|assets|global";

/// Generic container names.
pub const GENERIC_CONTAINER_PATTERN: &str = r"(?i)folder|container|library";

/// Compiled container-scoring rules.
#[derive(Clone, Debug)]
pub struct ProposalRules {
    block_type: Regex,
    block_containers: Regex,
    generic_containers: Regex,
}

impl ProposalRules {
    /// Compile the default rule set.
    pub fn compile() -> Result<Self> {
        Ok(Self {
            block_type: compile(BLOCK_TYPE_PATTERN)?,
            block_containers: compile(BLOCK_CONTAINER_PATTERN)?,
            generic_containers: compile(GENERIC_CONTAINER_PATTERN)?,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| opal_core::Error::config(format!("bad pattern: {e}")))
}

// ============================================================================
// Proposal pass
// ============================================================================

/// Score the snapshot's children as containers for a new `target` item.
///
/// Returns at most [`MAX_PROPOSALS`] candidates, sorted non-increasing by
/// score (stable, so input order breaks ties), zero-score children
/// discarded. Every candidate carries a usable [`ParentLink`], preferring
/// the numeric id over the guid; nodes with neither are not addressable
/// and are skipped.
pub fn propose_parents(
    snapshot: &StructureSnapshot,
    target: &ContentTypeDescriptor,
    rules: &ProposalRules,
) -> Vec<ParentCandidate> {
    let desired_is_block = rules.block_type.is_match(&target.name);

    let mut candidates: Vec<ParentCandidate> = snapshot
        .children
        .iter()
        .filter_map(|child| {
            let name = child.name.as_deref().unwrap_or("");
            let score = if desired_is_block && rules.block_containers.is_match(name) {
                BLOCK_CONTAINER_SCORE
            } else if rules.generic_containers.is_match(name) {
                GENERIC_CONTAINER_SCORE
            } else {
                return None;
            };

            let parent_link = match (child.id, child.guid.as_ref()) {
                (Some(id), _) => ParentLink::Id(id),
                (None, Some(guid)) => ParentLink::Guid(guid.clone()),
                (None, None) => return None,
            };

            Some(ParentCandidate {
                identifier: child.identifier.clone(),
                name: child.name.clone(),
                score,
                parent_link,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(MAX_PROPOSALS);
    candidates
}

// ============================================================================
// Tests
// ============================================================================
