//! Opal Ask — free-text ask resolution.
//!
//! Turns instructions like `create a CTA card block under parent 4187 and
//! set heading to "Viva Opal"` into structured content operations against
//! the management API, without a language-understanding stack.
//!
//! # Modules
//!
//! - [`signals`]: rule-based text extraction (tokens, quotes, references,
//!   field assignments, move intent)
//! - [`classify`]: the shared base-type rule table
//! - [`resolve`]: content-type scoring
//! - [`traverse`]: bounded traversal of the remote content tree
//! - [`propose`]: container scoring for parent proposals
//! - [`orchestrate`]: the pipeline sequencing all of the above
//! - [`traits`]: collaborator traits implemented by `opal-client`

#![doc = include_str!("../README.md")]

pub mod classify;
pub mod orchestrate;
pub mod propose;
pub mod request;
pub mod resolve;
pub mod signals;
pub mod traits;
pub mod traverse;

// Re-export key types at crate root for convenience
pub use classify::{BaseType, TypeClassifier};
pub use orchestrate::AskResolver;
pub use propose::{ProposalRules, propose_parents};
pub use request::{AskOutcome, AskRequest, Clarification};
pub use resolve::TypeScorer;
pub use signals::{MoveIntent, SignalConfig};
pub use traits::{ContentActions, ContentTree, ContentTypeDirectory, RootResolver};
pub use traverse::{
    FlatNode, NodeKeyStrategy, PositionalKeys, RandomKeys, StructureSnapshot, TraversalLimits,
    Traverser,
};
