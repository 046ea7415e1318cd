//! Rule-based extraction of signals from the ask text.
//!
//! This is pattern matching, not language understanding: an ordered list of
//! independent matcher functions, each returning an optional typed result.
//! Matching order is part of the contract: a numeric parent reference
//! always wins over a GUID, and an explicit parent reference always wins
//! over proposals downstream.
//!
//! All regexes live in [`SignalConfig`], compiled once from the named
//! pattern constants below. Nothing here performs I/O or touches global
//! state, so tests can vary the patterns freely.

use std::collections::BTreeMap;

use opal_core::{FieldValue, ParentLink, Result};
use regex::Regex;

// ============================================================================
// Pattern constants
// ============================================================================

/// A substring enclosed by a matching pair of single or double quotes.
pub const QUOTED_PATTERN: &str = r#""([^"]*)"|'([^']*)'"#;

/// RFC-4122-shaped GUID (8-4-4-4-12 hex groups), anywhere in the text.
pub const GUID_PATTERN: &str =
    r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}";

/// The word `parent`, optionally followed by `link`/`id`, then 1-10 digits.
pub const NUMERIC_PARENT_PATTERN: &str =
    r"(?i)\bparent(?:\s+(?:link|id))?\s*[:#]?\s*([0-9]{1,10})\b";

/// `set <words> to <quoted value>`.
pub const SET_FIELD_PATTERN: &str = r#"(?i)\bset\s+(.+?)\s+to\s+(?:"([^"]*)"|'([^']*)')"#;

/// Property names that receive the first quoted string when no explicit
/// `set ... to ...` clause matched.
pub const NAME_LIKE_PROPERTY_PATTERN: &str = r"(?i)heading|title";

/// The standalone word `move`, required before any move extraction runs.
pub const MOVE_WORD_PATTERN: &str = r"(?i)\bmove\b";

/// Digits naming the moved item, optionally prefixed with `content`/`id`.
pub const MOVE_NUMERIC_SOURCE_PATTERN: &str =
    r"(?i)\bmove\b\s+(?:(?:content|id)\s*[:#]?\s*)?([0-9]+)\b";

/// A GUID naming the moved item, anywhere after `move`.
pub const MOVE_GUID_SOURCE_PATTERN: &str = r"(?i)\bmove\b.*?([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})";

/// Destination after `under`/`to`, optionally `parent`/`id`, then digits or
/// a GUID. The GUID alternative is listed first so a leading hex digit of a
/// GUID is never mistaken for a numeric id.
pub const MOVE_DESTINATION_PATTERN: &str = r"(?i)\b(?:under|to)\b\s+(?:(?:the\s+)?(?:parent|id)\s*[:#]?\s*)?([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}|[0-9]{1,10}\b)";

// ============================================================================
// Config
// ============================================================================

/// Compiled matcher set for signal extraction.
#[derive(Clone, Debug)]
pub struct SignalConfig {
    quoted: Regex,
    guid: Regex,
    numeric_parent: Regex,
    set_field: Regex,
    name_like_property: Regex,
    move_word: Regex,
    move_numeric_source: Regex,
    move_guid_source: Regex,
    move_destination: Regex,
}

impl SignalConfig {
    /// Compile the default pattern set.
    pub fn compile() -> Result<Self> {
        Ok(Self {
            quoted: compile(QUOTED_PATTERN)?,
            guid: compile(GUID_PATTERN)?,
            numeric_parent: compile(NUMERIC_PARENT_PATTERN)?,
            set_field: compile(SET_FIELD_PATTERN)?,
            name_like_property: compile(NAME_LIKE_PROPERTY_PATTERN)?,
            move_word: compile(MOVE_WORD_PATTERN)?,
            move_numeric_source: compile(MOVE_NUMERIC_SOURCE_PATTERN)?,
            move_guid_source: compile(MOVE_GUID_SOURCE_PATTERN)?,
            move_destination: compile(MOVE_DESTINATION_PATTERN)?,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| opal_core::Error::config(format!("bad pattern: {e}")))
}

// ============================================================================
// Intent types
// ============================================================================

/// A parsed instruction to relocate existing content.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveIntent {
    /// Identifier of the item to move (digits or GUID, as written).
    pub content_identifier: String,
    /// Destination container; absence is signaled, not an error.
    pub parent_link: Option<ParentLink>,
}

// ============================================================================
// Extractors
// ============================================================================

/// Split the text into lowercase alphanumeric tokens.
///
/// Every character outside `[a-z0-9\s]` becomes a space, then the text is
/// split on whitespace runs with empty tokens dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Every quoted substring, in left-to-right order, quotes stripped.
///
/// No escape processing: a quote character always closes the nearest open
/// quote of the same kind.
pub fn quoted_strings(text: &str, cfg: &SignalConfig) -> Vec<String> {
    cfg.quoted
        .captures_iter(text)
        .filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Extract an explicit parent reference.
///
/// A numeric `parent [link|id] NNN` match strictly takes priority over a
/// GUID found anywhere in the text. Returns `None` when neither matches.
pub fn parent_reference(text: &str, cfg: &SignalConfig) -> Option<ParentLink> {
    if let Some(caps) = cfg.numeric_parent.captures(text) {
        if let Ok(id) = caps[1].parse::<i64>() {
            return Some(ParentLink::Id(id));
        }
    }
    cfg.guid
        .find(text)
        .map(|m| ParentLink::Guid(m.as_str().to_string()))
}

/// Extract property assignments from the ask text.
///
/// Rule (a): every `set <words> to <quoted value>` clause whose words,
/// normalized by dropping whitespace and case, equal a normalized property
/// name. Rule (b): when no `set ... to ...` clause matched at all and the
/// text contains quoted strings, the first quoted string goes to the first
/// property matching `heading`/`title`, else to the first property. A
/// property is never assigned twice.
pub fn field_assignments(
    text: &str,
    property_names: &[&str],
    cfg: &SignalConfig,
) -> BTreeMap<String, FieldValue> {
    let mut assignments = BTreeMap::new();
    let mut set_clause_matched = false;

    for caps in cfg.set_field.captures_iter(text) {
        set_clause_matched = true;
        let target = normalize(&caps[1]);
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();
        if let Some(name) = property_names.iter().find(|n| normalize(n) == target) {
            assignments
                .entry(name.to_string())
                .or_insert_with(|| FieldValue::new(value));
        }
    }

    if !set_clause_matched {
        if let Some(first_quoted) = quoted_strings(text, cfg).into_iter().next() {
            let target = property_names
                .iter()
                .find(|n| cfg.name_like_property.is_match(n))
                .or_else(|| property_names.first());
            if let Some(name) = target {
                assignments.insert(name.to_string(), FieldValue::new(first_quoted));
            }
        }
    }

    assignments
}

/// The quoted values claimed by explicit `set ... to ...` clauses, in order.
///
/// Used when deriving the new item's name: a quoted string that an explicit
/// clause already assigned to a property is not also used as the name.
pub fn set_clause_values(text: &str, cfg: &SignalConfig) -> Vec<String> {
    cfg.set_field
        .captures_iter(text)
        .filter_map(|caps| {
            caps.get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Detect a move instruction.
///
/// Requires the standalone word `move`. The moved item's identifier is
/// digits following `move` (optionally prefixed `content`/`id`), else a
/// GUID after `move`; without an identifier there is no move intent. The
/// destination (`under`/`to` ...) is optional.
pub fn move_intent(text: &str, cfg: &SignalConfig) -> Option<MoveIntent> {
    if !cfg.move_word.is_match(text) {
        return None;
    }

    let content_identifier = cfg
        .move_numeric_source
        .captures(text)
        .or_else(|| cfg.move_guid_source.captures(text))
        .map(|caps| caps[1].to_string())?;

    let parent_link = cfg.move_destination.captures(text).map(|caps| {
        let raw = &caps[1];
        match raw.parse::<i64>() {
            Ok(id) => ParentLink::Id(id),
            Err(_) => ParentLink::Guid(raw.to_string()),
        }
    });

    Some(MoveIntent {
        content_identifier,
        parent_link,
    })
}

/// Normalize a property name or captured words for comparison: no
/// whitespace, no case.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SignalConfig {
        SignalConfig::compile().unwrap()
    }

    // -- tokenize -----------------------------------------------------------

    #[test]
    fn test_tokenize_strips_punctuation() {
        assert_eq!(tokenize("Find a CTA-Card!"), vec!["find", "a", "cta", "card"]);
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  two \t words \n"), vec!["two", "words"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("!?!").is_empty());
    }

    // -- quoted_strings -----------------------------------------------------

    #[test]
    fn test_quoted_strings_double() {
        assert_eq!(
            quoted_strings(r#"set Heading to "Viva Opal""#, &cfg()),
            vec!["Viva Opal"]
        );
    }

    #[test]
    fn test_quoted_strings_mixed_in_order() {
        assert_eq!(
            quoted_strings(r#"first "one" then 'two'"#, &cfg()),
            vec!["one", "two"]
        );
    }

    #[test]
    fn test_quoted_strings_none() {
        assert!(quoted_strings("no quotes here", &cfg()).is_empty());
    }

    // -- parent_reference ---------------------------------------------------

    #[test]
    fn test_parent_reference_numeric() {
        assert_eq!(
            parent_reference("under parent 4187", &cfg()),
            Some(ParentLink::Id(4187))
        );
    }

    #[test]
    fn test_parent_reference_numeric_variants() {
        assert_eq!(
            parent_reference("parent link 12", &cfg()),
            Some(ParentLink::Id(12))
        );
        assert_eq!(
            parent_reference("Parent ID: 55", &cfg()),
            Some(ParentLink::Id(55))
        );
    }

    #[test]
    fn test_parent_reference_guid() {
        let guid = "9b1d8f3c-1a2b-4c5d-8e9f-0a1b2c3d4e5f";
        assert_eq!(
            parent_reference(&format!("put it under {guid}"), &cfg()),
            Some(ParentLink::Guid(guid.to_string()))
        );
    }

    #[test]
    fn test_parent_reference_numeric_wins_over_guid() {
        let text = "under parent 42 near 9b1d8f3c-1a2b-4c5d-8e9f-0a1b2c3d4e5f";
        assert_eq!(parent_reference(text, &cfg()), Some(ParentLink::Id(42)));
    }

    #[test]
    fn test_parent_reference_absent() {
        assert_eq!(parent_reference("no reference here", &cfg()), None);
    }

    // -- field_assignments --------------------------------------------------

    #[test]
    fn test_field_assignments_set_clause() {
        let fields = field_assignments(
            r#"set heading to "Viva Opal""#,
            &["Heading", "Body"],
            &cfg(),
        );
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["Heading"], FieldValue::new("Viva Opal"));
    }

    #[test]
    fn test_field_assignments_normalizes_spaces() {
        let fields = field_assignments(
            r#"set sub title to 'Hello'"#,
            &["SubTitle", "Heading"],
            &cfg(),
        );
        assert_eq!(fields["SubTitle"], FieldValue::new("Hello"));
    }

    #[test]
    fn test_field_assignments_multiple_clauses() {
        let fields = field_assignments(
            r#"set heading to "One" and set body to "Two""#,
            &["Heading", "Body"],
            &cfg(),
        );
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["Heading"], FieldValue::new("One"));
        assert_eq!(fields["Body"], FieldValue::new("Two"));
    }

    #[test]
    fn test_field_assignments_never_overwrites() {
        let fields = field_assignments(
            r#"set heading to "First" then set heading to "Second""#,
            &["Heading"],
            &cfg(),
        );
        assert_eq!(fields["Heading"], FieldValue::new("First"));
    }

    #[test]
    fn test_field_assignments_fallback_prefers_heading() {
        let fields = field_assignments(r#"a block called "Promo""#, &["Body", "Heading"], &cfg());
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["Heading"], FieldValue::new("Promo"));
    }

    #[test]
    fn test_field_assignments_fallback_first_property() {
        let fields = field_assignments(r#"a block called "Promo""#, &["Body", "Teaser"], &cfg());
        assert_eq!(fields["Body"], FieldValue::new("Promo"));
    }

    #[test]
    fn test_field_assignments_no_fallback_when_set_matched() {
        // Rule (b) contributes nothing once rule (a) has matched.
        let fields = field_assignments(
            r#"set body to "Text" named "Promo""#,
            &["Body", "Heading"],
            &cfg(),
        );
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["Body"], FieldValue::new("Text"));
    }

    #[test]
    fn test_field_assignments_empty_without_signals() {
        assert!(field_assignments("make a block", &["Heading"], &cfg()).is_empty());
        assert!(field_assignments(r#"call it "X""#, &[], &cfg()).is_empty());
    }

    #[test]
    fn test_field_assignments_no_fallback_after_unmatched_set_clause() {
        // A set clause naming an unknown property still suppresses the
        // quoted-string fallback.
        let fields = field_assignments(
            r#"set tagline to "Catchy""#,
            &["Heading"],
            &cfg(),
        );
        assert!(fields.is_empty());
    }

    #[test]
    fn test_set_clause_values_in_order() {
        let values = set_clause_values(
            r#"set heading to "One" and set unknown to 'Two'"#,
            &cfg(),
        );
        // Clause values are collected even when no property matches the words.
        assert_eq!(values, vec!["One", "Two"]);
    }

    // -- move_intent --------------------------------------------------------

    #[test]
    fn test_move_intent_with_numeric_destination() {
        let intent = move_intent("move 123 under parent 456", &cfg()).unwrap();
        assert_eq!(intent.content_identifier, "123");
        assert_eq!(intent.parent_link, Some(ParentLink::Id(456)));
    }

    #[test]
    fn test_move_intent_requires_move_word() {
        assert_eq!(move_intent("create something", &cfg()), None);
        // "removed" contains "move" but not as a standalone word.
        assert_eq!(move_intent("removed 1 under 2", &cfg()), None);
    }

    #[test]
    fn test_move_intent_requires_source() {
        assert_eq!(move_intent("move it somewhere nice", &cfg()), None);
    }

    #[test]
    fn test_move_intent_guid_source() {
        let guid = "9b1d8f3c-1a2b-4c5d-8e9f-0a1b2c3d4e5f";
        let intent = move_intent(&format!("move {guid} under parent 7"), &cfg()).unwrap();
        assert_eq!(intent.content_identifier, guid);
        assert_eq!(intent.parent_link, Some(ParentLink::Id(7)));
    }

    #[test]
    fn test_move_intent_guid_destination() {
        let guid = "0a1b2c3d-4e5f-6789-abcd-ef0123456789";
        let intent = move_intent(&format!("move content 55 to {guid}"), &cfg()).unwrap();
        assert_eq!(intent.content_identifier, "55");
        assert_eq!(intent.parent_link, Some(ParentLink::Guid(guid.to_string())));
    }

    #[test]
    fn test_move_intent_destination_optional() {
        let intent = move_intent("move 55", &cfg()).unwrap();
        assert_eq!(intent.content_identifier, "55");
        assert_eq!(intent.parent_link, None);
    }

    #[test]
    fn test_move_intent_id_prefix() {
        let intent = move_intent("move id 99 under parent 3", &cfg()).unwrap();
        assert_eq!(intent.content_identifier, "99");
    }
}
