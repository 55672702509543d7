//! Commentary text keyed by verse key.
//!
//! The upstream dataset maps `"{surah}:{ayah}"` either to a plain string or
//! to an object carrying a `text` field. [`CommentaryIndex`] normalizes both
//! shapes to trimmed strings at load time so the segmenter only ever sees
//! text.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::models::VerseKey;
use crate::text::trim_space;

/// Lookup of commentary text for one ayah.
///
/// A missing key is not an error: implementations return `""`, which
/// contributes no words and no sentences to a lesson.
pub trait CommentarySource {
    fn text_for(&self, key: &VerseKey) -> &str;
}

/// In-memory commentary index built from the commentary JSON object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "HashMap<String, Value>")]
pub struct CommentaryIndex {
    entries: HashMap<String, String>,
}

impl CommentaryIndex {
    /// Insert (or replace) the commentary for `key`. The text is trimmed.
    pub fn insert(&mut self, key: impl Into<String>, text: &str) {
        self.entries.insert(key.into(), trim_space(text).to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose normalized text is non-empty.
    pub fn non_empty(&self) -> usize {
        self.entries.values().filter(|t| !t.is_empty()).count()
    }
}

impl From<HashMap<String, Value>> for CommentaryIndex {
    fn from(raw: HashMap<String, Value>) -> Self {
        let entries = raw
            .into_iter()
            .map(|(key, value)| (key, normalize_text(&value)))
            .collect();
        Self { entries }
    }
}

impl CommentarySource for CommentaryIndex {
    fn text_for(&self, key: &VerseKey) -> &str {
        self.entries
            .get(&key.to_string())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Reduce one raw commentary value to trimmed text.
///
/// Strings are used as-is, objects contribute their `text` field, `null`
/// is empty, and any other scalar is rendered as its JSON text.
pub fn normalize_text(value: &Value) -> String {
    match value {
        Value::String(s) => trim_space(s).to_string(),
        Value::Object(map) => {
            trim_space(map.get("text").and_then(Value::as_str).unwrap_or("")).to_string()
        }
        Value::Null => String::new(),
        other => trim_space(&other.to_string()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_string_and_object_values() {
        let index: CommentaryIndex = serde_json::from_value(json!({
            "1:1": "  In the name of Allah.  ",
            "1:2": {"text": "All praise is for Allah.", "resource_id": 171},
            "1:3": {"resource_id": 171},
            "1:4": null,
        }))
        .unwrap();

        assert_eq!(index.len(), 4);
        assert_eq!(index.non_empty(), 2);
        assert_eq!(index.text_for(&VerseKey::new(1, 1)), "In the name of Allah.");
        assert_eq!(
            index.text_for(&VerseKey::new(1, 2)),
            "All praise is for Allah."
        );
        assert_eq!(index.text_for(&VerseKey::new(1, 3)), "");
        assert_eq!(index.text_for(&VerseKey::new(1, 4)), "");
    }

    #[test]
    fn missing_key_is_empty_text() {
        let index = CommentaryIndex::default();
        assert_eq!(index.text_for(&VerseKey::new(114, 6)), "");
    }

    #[test]
    fn scalar_values_render_as_text() {
        assert_eq!(normalize_text(&json!(42)), "42");
        assert_eq!(normalize_text(&json!(true)), "true");
    }

    #[test]
    fn trims_information_separators() {
        let index: CommentaryIndex = serde_json::from_value(json!({
            "2:1": "\u{001c}Alif Lam Mim.\u{001f} ",
            "2:2": {"text": "\u{001d}\u{001e}"},
        }))
        .unwrap();
        assert_eq!(index.text_for(&VerseKey::new(2, 1)), "Alif Lam Mim.");
        assert_eq!(index.text_for(&VerseKey::new(2, 2)), "");
        assert_eq!(index.non_empty(), 1);
    }
}
