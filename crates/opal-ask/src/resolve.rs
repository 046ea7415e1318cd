//! Heuristic scoring of content types against the ask text.

use opal_core::{ContentTypeDescriptor, Error, Result};
use regex::Regex;

use crate::signals::tokenize;

// ============================================================================
// Weights
// ============================================================================

/// Awarded per token found in the type's display name.
pub const DISPLAY_NAME_WEIGHT: u32 = 3;

/// Awarded per token found in any property name.
pub const PROPERTY_NAME_WEIGHT: u32 = 1;

/// Awarded per family hint word (`block`/`page`/`media`) whose pattern
/// matches the type name.
pub const FAMILY_HINT_WEIGHT: u32 = 2;

/// Family hint words and the name patterns they reinforce.
pub const FAMILY_HINTS: &[(&str, &str)] = &[
    ("block", r"(?i)block"),
    ("page", r"(?i)page"),
    ("media", r"(?i)media"),
];

// ============================================================================
// Scorer
// ============================================================================

/// Token-overlap scorer for content types.
#[derive(Clone, Debug)]
pub struct TypeScorer {
    families: Vec<(&'static str, Regex)>,
}

impl TypeScorer {
    /// Compile the default family hints.
    pub fn compile() -> Result<Self> {
        let mut families = Vec::with_capacity(FAMILY_HINTS.len());
        for (hint, pattern) in FAMILY_HINTS {
            let regex = Regex::new(pattern)
                .map_err(|e| Error::config(format!("bad pattern: {e}")))?;
            families.push((*hint, regex));
        }
        Ok(Self { families })
    }

    /// Score one content type against the ask.
    ///
    /// Deterministic: depends only on the ask tokens and the descriptor.
    pub fn score(&self, ask: &str, descriptor: &ContentTypeDescriptor) -> u32 {
        let tokens = tokenize(ask);
        let display = descriptor.display_or_name().to_lowercase();
        let properties: Vec<String> = descriptor
            .properties
            .iter()
            .map(|p| p.name.to_lowercase())
            .collect();

        let mut score = 0;
        for token in &tokens {
            if display.contains(token.as_str()) {
                score += DISPLAY_NAME_WEIGHT;
            }
            if properties.iter().any(|p| p.contains(token.as_str())) {
                score += PROPERTY_NAME_WEIGHT;
            }
        }

        for (hint, pattern) in &self.families {
            if tokens.iter().any(|t| t == hint) && pattern.is_match(&descriptor.name) {
                score += FAMILY_HINT_WEIGHT;
            }
        }

        score
    }

    /// Pick the best-scoring type.
    ///
    /// Ties break to the earliest candidate in the input sequence, so the
    /// result does not depend on evaluation order. An empty list is fatal:
    /// without any schema the request cannot proceed at all.
    pub fn resolve<'a>(
        &self,
        ask: &str,
        types: &'a [ContentTypeDescriptor],
    ) -> Result<&'a ContentTypeDescriptor> {
        let (mut best, rest) = types
            .split_first()
            .ok_or_else(|| Error::no_candidates("content type list is empty"))?;
        let mut best_score = self.score(ask, best);

        for candidate in rest {
            let score = self.score(ask, candidate);
            if score > best_score {
                best = candidate;
                best_score = score;
            }
        }

        tracing::debug!(best = %best.name, score = best_score, "resolved content type");
        Ok(best)
    }
}

// ============================================================================
// Tests
// ============================================================================
