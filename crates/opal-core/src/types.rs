//! Wire types for the content-management API.
//!
//! These types mirror the JSON the remote API exchanges (camelCase field
//! names). Unknown fields are ignored on deserialize so that API additions
//! do not break the tools.

use std::collections::BTreeMap;

use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Content type schema
// ============================================================================

/// A property declared on a content type.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Property name as used in create payloads.
    pub name: String,
    /// Editor-facing display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Schema describing one kind of content item.
///
/// Fetched fresh per invocation; never cached across invocations.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeDescriptor {
    /// Model name (e.g. `CtaCardBlock`).
    pub name: String,
    /// Editor-facing display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Declared properties, in schema order.
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
}

impl ContentTypeDescriptor {
    /// The display name when present, else the model name.
    pub fn display_or_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

// ============================================================================
// Structure tree
// ============================================================================

/// A node of the remote content tree, with children embedded inline.
///
/// The fetch endpoint returns the whole subtree in one document; traversal
/// over `children` performs no further network calls.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructureNode {
    /// Numeric identifier, when assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// GUID identifier, when assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// Node name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Embedded child nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StructureNode>,
}

// ============================================================================
// Parent link
// ============================================================================

/// Reference to the container node under which content is placed.
///
/// The wire format sets exactly one of `id` or `guidValue`. Representing
/// this as an enum makes the both-or-neither states unconstructible;
/// deserializing such a document fails instead of producing a bad link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParentLink {
    /// Numeric node id.
    Id(i64),
    /// GUID node identifier.
    Guid(String),
}

impl ParentLink {
    /// String form of the underlying identifier.
    pub fn identifier(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Guid(guid) => guid.clone(),
        }
    }
}

impl Serialize for ParentLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Id(id) => map.serialize_entry("id", id)?,
            Self::Guid(guid) => map.serialize_entry("guidValue", guid)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ParentLink {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            id: Option<i64>,
            guid_value: Option<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        match (raw.id, raw.guid_value) {
            (Some(id), None) => Ok(Self::Id(id)),
            (None, Some(guid)) => Ok(Self::Guid(guid)),
            _ => Err(D::Error::custom(
                "parent link must set exactly one of id or guidValue",
            )),
        }
    }
}

// ============================================================================
// Parent proposals
// ============================================================================

/// A scored candidate container for new content.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentCandidate {
    /// String form of the candidate's id or guid.
    pub identifier: String,
    /// Candidate name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Heuristic score, always >= 1 (zero-score candidates are discarded).
    pub score: u32,
    /// Link to use when selecting this candidate.
    pub parent_link: ParentLink,
}

// ============================================================================
// Create payload
// ============================================================================

/// Language selector on a create payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLanguage {
    /// Language branch name (e.g. `en`).
    pub name: String,
}

impl ContentLanguage {
    /// Build a language selector from a branch name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Value assigned to a single content property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    /// The property value, as extracted from the ask text.
    pub value: String,
}

impl FieldValue {
    /// Wrap a string as a property value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Payload for creating a content item.
///
/// Property assignments serialize flattened at the top level, next to the
/// fixed fields, as the management API expects:
///
/// ```json
/// {
///   "name": "CTA Card Block",
///   "language": { "name": "en" },
///   "contentType": ["Block", "CtaCardBlock"],
///   "parentLink": { "id": 4187 },
///   "status": "Published",
///   "Heading": { "value": "Viva Opal" }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCreatePayload {
    /// Item name.
    pub name: String,
    /// Language branch.
    pub language: ContentLanguage,
    /// Ordered pair of base type and model name.
    pub content_type: [String; 2],
    /// Container to create under.
    pub parent_link: ParentLink,
    /// Target status (e.g. `Published`).
    pub status: String,
    /// Property assignments, flattened into the payload.
    #[serde(flatten)]
    pub properties: BTreeMap<String, FieldValue>,
}

// ============================================================================
// API replies
// ============================================================================

/// Status and body reported by a remote API call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body (JSON when the API returned JSON, else a string).
    pub body: serde_json::Value,
}

// ============================================================================
// Tests
// ============================================================================
