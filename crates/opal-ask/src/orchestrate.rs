//! Sequencing of the ask pipeline.
//!
//! Detect move vs. create, resolve type/parent/fields, build the payload,
//! and delegate to the create or move collaborator. The resolution order is
//! a documented contract: move intent first, then the explicit parent
//! reference, and only then ranked proposals from a tree snapshot. At most
//! one state-mutating delegate call happens per invocation.

use std::sync::Arc;

use opal_core::{
    ApiReply, ContentCreatePayload, ContentLanguage, ContentTypeDescriptor, Error, Result,
};

use crate::classify::TypeClassifier;
use crate::propose::{ProposalRules, propose_parents};
use crate::request::{AskOutcome, AskRequest, Clarification};
use crate::resolve::TypeScorer;
use crate::signals::{self, SignalConfig};
use crate::traits::{ContentActions, ContentTree, ContentTypeDirectory, RootResolver};
use crate::traverse::{NodeKeyStrategy, TraversalLimits, Traverser};

/// Clarification text when a move has no recognizable destination.
pub const MOVE_DESTINATION_MISSING: &str = "Move intent detected but destination parent not \
     found. Re-run with a destination such as 'under parent 123'.";

/// Clarification text when no parent was given and nothing suitable exists.
pub const NO_SUITABLE_PARENTS: &str = "Parent not provided and no suitable parents found. \
     Re-run with an explicit parent reference.";

/// Clarification text accompanying ranked parent proposals.
pub const CHOOSE_A_PARENT: &str = "Please choose a parent for the new content and re-run with \
     an explicit parent reference, or set auto_select_parent.";

/// Resolves asks into content operations.
pub struct AskResolver {
    directory: Arc<dyn ContentTypeDirectory>,
    actions: Arc<dyn ContentActions>,
    traverser: Traverser,
    signals: SignalConfig,
    scorer: TypeScorer,
    classifier: TypeClassifier,
    proposal_rules: ProposalRules,
    fallback_root: String,
}

impl AskResolver {
    /// Wire a resolver from its collaborators, compiling the heuristics.
    pub fn new(
        directory: Arc<dyn ContentTypeDirectory>,
        tree: Arc<dyn ContentTree>,
        roots: Arc<dyn RootResolver>,
        actions: Arc<dyn ContentActions>,
    ) -> Result<Self> {
        Ok(Self {
            directory,
            actions,
            traverser: Traverser::new(tree, roots),
            signals: SignalConfig::compile()?,
            scorer: TypeScorer::compile()?,
            classifier: TypeClassifier::compile()?,
            proposal_rules: ProposalRules::compile()?,
            fallback_root: crate::traverse::DEFAULT_FALLBACK_ROOT.to_string(),
        })
    }

    /// Override the root identifier used when default-root resolution fails.
    pub fn with_fallback_root(mut self, root: impl Into<String>) -> Self {
        self.fallback_root = root.into();
        self
    }

    /// Override the key strategy for anonymous tree nodes.
    pub fn with_key_strategy(mut self, keys: Arc<dyn NodeKeyStrategy>) -> Self {
        self.traverser = self.traverser.with_key_strategy(keys);
        self
    }

    /// Resolve one ask into a move, a create, or a clarification.
    pub async fn resolve(&self, request: &AskRequest) -> Result<AskOutcome> {
        let ask = request.ask.trim();
        if ask.is_empty() {
            return Err(Error::validation("ask must not be empty"));
        }

        if let Some(intent) = signals::move_intent(ask, &self.signals) {
            let Some(parent_link) = intent.parent_link else {
                return Ok(AskOutcome::NeedsClarification(Clarification::new(
                    MOVE_DESTINATION_MISSING,
                )));
            };
            tracing::info!(content = %intent.content_identifier, "delegating move");
            let reply = self
                .actions
                .move_content(&intent.content_identifier, parent_link)
                .await?;
            return Ok(AskOutcome::Completed(reply));
        }

        // Create path. An explicit parent reference wins over proposals and
        // makes the tree snapshot unnecessary.
        if let Some(parent_link) = signals::parent_reference(ask, &self.signals) {
            let types = self.directory.list().await?;
            let best = self.scorer.resolve(ask, &types)?;
            let reply = self.create(ask, request, best, parent_link).await?;
            return Ok(AskOutcome::Completed(reply));
        }

        let limits = TraversalLimits {
            max_depth: request.max_depth,
            max_nodes: request.max_nodes,
            fallback_root: self.fallback_root.clone(),
        };
        // The two fetches are independent; nothing else runs concurrently.
        let (types, snapshot) = tokio::join!(
            self.directory.list(),
            self.traverser
                .snapshot(request.discovery_root.as_deref(), &limits),
        );
        let types = types?;
        let snapshot = snapshot?;
        let best = self.scorer.resolve(ask, &types)?;

        let proposals = propose_parents(&snapshot, best, &self.proposal_rules);
        if proposals.is_empty() {
            return Ok(AskOutcome::NeedsClarification(Clarification::new(
                NO_SUITABLE_PARENTS,
            )));
        }
        if !request.auto_select_parent {
            return Ok(AskOutcome::NeedsClarification(Clarification::with_proposals(
                CHOOSE_A_PARENT,
                proposals,
            )));
        }

        let parent_link = proposals[0].parent_link.clone();
        let reply = self.create(ask, request, best, parent_link).await?;
        Ok(AskOutcome::Completed(reply))
    }

    /// Build the create payload and delegate it.
    async fn create(
        &self,
        ask: &str,
        request: &AskRequest,
        best: &ContentTypeDescriptor,
        parent_link: opal_core::ParentLink,
    ) -> Result<ApiReply> {
        let property_names: Vec<&str> = best.properties.iter().map(|p| p.name.as_str()).collect();
        let properties = signals::field_assignments(ask, &property_names, &self.signals);

        // The name is the first quoted string not already claimed by an
        // explicit `set ... to ...` clause, else the type's display name.
        let claimed = signals::set_clause_values(ask, &self.signals);
        let name = signals::quoted_strings(ask, &self.signals)
            .into_iter()
            .find(|quoted| !claimed.contains(quoted))
            .unwrap_or_else(|| best.display_or_name().to_string());

        let payload = ContentCreatePayload {
            name,
            language: ContentLanguage::new(request.language.clone()),
            content_type: [
                self.classifier.payload_base_type(&best.name).to_string(),
                best.name.clone(),
            ],
            parent_link,
            status: request.status.clone(),
            properties,
        };

        tracing::info!(content_type = %best.name, "delegating create");
        self.actions.create(payload).await
    }
}

// ============================================================================
// Tests
// ============================================================================
