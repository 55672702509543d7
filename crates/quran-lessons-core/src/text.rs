//! Text derivation helpers: sentence splitting, word counting, and the
//! title / short body / takeaways extracted from a lesson's full body.
//!
//! Sentence boundaries are deliberately naive: a `.`, `!` or `?` followed
//! by whitespace ends a sentence. Abbreviations and decimals inside the
//! commentary will split early; lesson output depends on this exact rule.
//!
//! "Whitespace" throughout is Unicode `White_Space` plus the ASCII
//! information separators U+001C..=U+001F, which the upstream tooling also
//! splits and trims on.

use once_cell::sync::Lazy;
use regex::Regex;

/// Terminal punctuation followed by a whitespace run.
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?][\s\x1C-\x1F]+").expect("sentence boundary pattern is valid")
});

/// Whitespace for splitting and trimming: see the module docs.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// `text` without leading and trailing whitespace.
pub fn trim_space(text: &str) -> &str {
    text.trim_matches(is_space)
}

/// Whitespace-separated words of `text`.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_space).filter(|w| !w.is_empty())
}

/// Split `text` into sentences.
///
/// The terminator stays with its sentence and the whitespace run after it
/// is dropped. Empty (or whitespace-only) text yields no sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let text = trim_space(text);
    if text.is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // Terminators are single-byte ASCII.
        sentences.push(&text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    sentences.push(&text[start..]);
    sentences
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    words(text).count()
}

/// Keep at most `limit` words.
///
/// Text already within the limit is returned trimmed but otherwise
/// untouched; longer text is rebuilt from its first `limit` words joined by
/// single spaces.
pub fn truncate_words(text: &str, limit: usize) -> String {
    if word_count(text) <= limit {
        return trim_space(text).to_string();
    }
    words(text)
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title from the first sentence, capped at `max_words` words, or
/// `fallback` when there are no sentences.
pub fn make_title(sentences: &[&str], max_words: usize, fallback: &str) -> String {
    match sentences.first() {
        None => fallback.to_string(),
        Some(first) => truncate_words(first, max_words),
    }
}

/// Limits for the greedy short-body selection.
#[derive(Debug, Clone, Copy)]
pub struct SummaryLimits {
    /// Hard cap on the number of sentences taken.
    pub max_sentences: usize,
    /// Sentences required before the word target may stop selection.
    pub min_sentences: usize,
    /// Word count at which selection stops once `min_sentences` are taken.
    pub word_target: usize,
    /// Final truncation limit in words.
    pub word_limit: usize,
}

/// Greedy leading-sentence summary.
///
/// Takes sentences in order until `min_sentences` are selected and the
/// selection reaches `word_target` words, or `max_sentences` are selected.
/// The joined selection is then truncated to `word_limit` words.
pub fn make_body_short(sentences: &[&str], limits: SummaryLimits) -> String {
    let mut selection: Vec<&str> = Vec::new();
    let mut words = 0;
    for &sentence in sentences {
        if selection.len() >= limits.max_sentences {
            break;
        }
        selection.push(sentence);
        words += word_count(sentence);
        if selection.len() >= limits.min_sentences && words >= limits.word_target {
            break;
        }
    }

    truncate_words(&selection.join(" "), limits.word_limit)
}

/// The closing sentence(s) of the passage: the last two in order, or the
/// only one.
pub fn make_takeaways(sentences: &[&str]) -> Vec<String> {
    let tail = sentences.len().saturating_sub(2);
    sentences[tail..]
        .iter()
        .map(|s| trim_space(s).to_string())
        .collect()
}
