//! Topic tagging by keyword substring match.

/// Tag used when no topic keyword occurs in the text.
pub const GENERAL_TAG: &str = "general";

/// Topic → trigger substrings, evaluated in this order so tag order is
/// stable across runs.
pub const TOPIC_RULES: &[(&str, &[&str])] = &[
    ("mercy", &["mercy", "merciful", "compassion"]),
    ("patience", &["patience", "patient", "steadfast"]),
    ("prayer", &["prayer", "salah", "supplication"]),
    ("gratitude", &["gratitude", "thank", "thanks", "grateful"]),
    ("tawheed", &["tawhid", "tawheed", "oneness", "monotheism"]),
];

/// Topics whose triggers occur anywhere in `text`, case-insensitively.
///
/// Matching is plain substring search, so `"merciful"` inside
/// `"unmerciful"` still tags `mercy`. Returns `["general"]` when nothing
/// matches; never empty.
pub fn tags_for_text(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tags: Vec<String> = TOPIC_RULES
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|t| lowered.contains(t)))
        .map(|(tag, _)| tag.to_string())
        .collect();

    if tags.is_empty() {
        vec![GENERAL_TAG.to_string()]
    } else {
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_is_general() {
        assert_eq!(tags_for_text("Alif Lam Mim."), vec!["general"]);
        assert_eq!(tags_for_text(""), vec!["general"]);
    }

    #[test]
    fn case_insensitive_substring() {
        assert_eq!(tags_for_text("The MERCIFUL Lord"), vec!["mercy"]);
        assert_eq!(tags_for_text("they were thankful"), vec!["gratitude"]);
    }

    #[test]
    fn multiple_topics_in_table_order() {
        let text = "Be grateful, establish the Salah, and be steadfast; He is Most Merciful.";
        assert_eq!(
            tags_for_text(text),
            vec!["mercy", "patience", "prayer", "gratitude"]
        );
    }

    #[test]
    fn tawheed_spellings() {
        assert_eq!(tags_for_text("the Oneness of Allah"), vec!["tawheed"]);
        assert_eq!(tags_for_text("pure monotheism"), vec!["tawheed"]);
    }
}
