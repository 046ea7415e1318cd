//! Coarse classification of content types.
//!
//! One rule table maps model names to a [`BaseType`]. The create payload
//! only accepts two base classes, so [`TypeClassifier::payload_base_type`]
//! collapses the richer classification down to `Block`/`Page`; both views
//! share the same table.

use opal_core::Result;
use regex::Regex;

/// Base-type rule table: patterns are checked in this order, first match
/// wins. `Folder` is checked before `Media` so folder types that mention
/// media still classify as folders.
pub const BASE_TYPE_RULES: &[(&str, BaseType)] = &[
    (r"(?i)block", BaseType::Block),
    (r"(?i)page", BaseType::Page),
    (r"(?i)folder", BaseType::Folder),
    (r"(?i)media|image|video|asset", BaseType::Media),
];

/// Coarse content classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseType {
    /// Routable page content.
    Page,
    /// Shared block content.
    Block,
    /// Media assets (images, video, files).
    Media,
    /// Container folders.
    Folder,
}

impl BaseType {
    /// Wire name of the base type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "Page",
            Self::Block => "Block",
            Self::Media => "Media",
            Self::Folder => "Folder",
        }
    }
}

/// Classifier over the shared rule table.
#[derive(Clone, Debug)]
pub struct TypeClassifier {
    rules: Vec<(Regex, BaseType)>,
}

impl TypeClassifier {
    /// Compile the default rule table.
    pub fn compile() -> Result<Self> {
        let mut rules = Vec::with_capacity(BASE_TYPE_RULES.len());
        for (pattern, base) in BASE_TYPE_RULES {
            let regex = Regex::new(pattern)
                .map_err(|e| opal_core::Error::config(format!("bad pattern: {e}")))?;
            rules.push((regex, *base));
        }
        Ok(Self { rules })
    }

    /// Classify a model name; unmatched names default to `Page`.
    pub fn classify(&self, type_name: &str) -> BaseType {
        self.rules
            .iter()
            .find(|(regex, _)| regex.is_match(type_name))
            .map(|(_, base)| *base)
            .unwrap_or(BaseType::Page)
    }

    /// The base-type string for a create payload.
    ///
    /// The management API's create call distinguishes only blocks and
    /// pages; everything that is not a block is created as a page.
    pub fn payload_base_type(&self, type_name: &str) -> &'static str {
        match self.classify(type_name) {
            BaseType::Block => "Block",
            _ => "Page",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TypeClassifier {
        TypeClassifier::compile().unwrap()
    }

    #[test]
    fn test_classify_table() {
        let c = classifier();
        assert_eq!(c.classify("CtaCardBlock"), BaseType::Block);
        assert_eq!(c.classify("ArticlePage"), BaseType::Page);
        assert_eq!(c.classify("ImageMediaFile"), BaseType::Media);
        assert_eq!(c.classify("AssetsFolder"), BaseType::Folder);
    }

    #[test]
    fn test_classify_folder_before_media() {
        assert_eq!(classifier().classify("MediaFolder"), BaseType::Folder);
    }

    #[test]
    fn test_classify_defaults_to_page() {
        assert_eq!(classifier().classify("StandardContent"), BaseType::Page);
    }

    #[test]
    fn test_payload_base_type_collapses() {
        let c = classifier();
        assert_eq!(c.payload_base_type("CtaCardBlock"), "Block");
        assert_eq!(c.payload_base_type("ArticlePage"), "Page");
        assert_eq!(c.payload_base_type("ImageMediaFile"), "Page");
        assert_eq!(c.payload_base_type("AssetsFolder"), "Page");
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(classifier().classify("HEROBLOCK"), BaseType::Block);
    }
}
