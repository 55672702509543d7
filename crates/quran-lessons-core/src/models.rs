//! Core data models shared by the segmenter, the validator and the CLI.
//!
//! Input records mirror the JSON assets produced upstream (`ayahs_full.json`,
//! `surahs.json`); [`DailyLesson`] is the persisted output shape written to
//! `daily_lessons.json`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of surahs, processed in id order `1..=SURAH_COUNT`.
pub const SURAH_COUNT: u32 = 114;

/// One ayah reference from the ayah list. Extra fields in the source JSON
/// (Arabic text, page numbers, ...) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AyahRecord {
    pub surah_id: u32,
    pub ayah_number: u32,
}

impl AyahRecord {
    pub fn new(surah_id: u32, ayah_number: u32) -> Self {
        Self {
            surah_id,
            ayah_number,
        }
    }

    pub fn verse_key(&self) -> VerseKey {
        VerseKey::new(self.surah_id, self.ayah_number)
    }
}

/// `"{surah}:{ayah}"` identifier of a single ayah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VerseKey {
    pub surah_id: u32,
    pub ayah_number: u32,
}

impl VerseKey {
    pub fn new(surah_id: u32, ayah_number: u32) -> Self {
        Self {
            surah_id,
            ayah_number,
        }
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surah_id, self.ayah_number)
    }
}

/// Entry of `surahs.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurahInfo {
    pub id: u32,
    pub name_english: String,
}

/// Surah id → English display name lookup.
#[derive(Debug, Clone, Default)]
pub struct SurahNames {
    names: BTreeMap<u32, String>,
}

impl SurahNames {
    pub fn from_infos(infos: &[SurahInfo]) -> Self {
        let names = infos
            .iter()
            .map(|s| (s.id, s.name_english.clone()))
            .collect();
        Self { names }
    }

    /// Display name for `surah_id`, or `"Surah {id}"` when unknown.
    pub fn display_name(&self, surah_id: u32) -> String {
        self.names
            .get(&surah_id)
            .cloned()
            .unwrap_or_else(|| format!("Surah {}", surah_id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Attribution record attached to every lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSource {
    pub work: String,
    pub author: String,
    pub dataset: String,
    pub version: String,
}

impl Default for LessonSource {
    fn default() -> Self {
        Self {
            work: "Abridged Explanation of the Quran".to_string(),
            author: "Al-Mukhtasar Committee".to_string(),
            dataset: "QUL".to_string(),
            version: "qul-abridged-v1".to_string(),
        }
    }
}

/// One day of study content covering a contiguous ayah range of one surah.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLesson {
    pub id: String,
    pub day_index: usize,
    pub surah_id: u32,
    pub ayah_start: u32,
    pub ayah_end: u32,
    pub verse_keys: Vec<String>,
    pub title: String,
    pub body_short: String,
    pub body_full: String,
    pub takeaways: Vec<String>,
    pub tags: Vec<String>,
    pub source: LessonSource,
}

/// Lesson id for a 0-based day index: `DL-` plus the 1-based sequence
/// number padded to six digits.
pub fn lesson_id(day_index: usize) -> String {
    format!("DL-{:06}", day_index + 1)
}
