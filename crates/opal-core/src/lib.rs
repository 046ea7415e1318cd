//! Opal Core — shared types, errors, and settings.
//!
//! This crate provides the foundational types used across all Opal crates.
//! It has no internal workspace dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`settings`]: CMS connection settings and loading
//! - [`types`]: Wire types for the content-management API

#![doc = include_str!("../README.md")]

pub mod error;
pub mod settings;
pub mod types;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use settings::CmsSettings;
pub use types::{
    ApiReply, ContentCreatePayload, ContentLanguage, ContentTypeDescriptor, FieldValue,
    ParentCandidate, ParentLink, PropertyDescriptor, StructureNode,
};
