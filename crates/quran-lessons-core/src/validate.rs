//! Structural validation of an emitted lessons file.
//!
//! The validator reads lessons leniently ([`LessonRecord`]) so that a
//! missing or null field is reported as a rule violation instead of a parse
//! error. Checks stop at the first violation.

use serde::Deserialize;
use thiserror::Error;

use crate::text::{trim_space, word_count};

/// Thresholds applied by [`validate_lessons`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub min_lessons: usize,
    pub body_short_max_words: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_lessons: 500,
            body_short_max_words: 400,
        }
    }
}

/// The subset of a lesson the validator inspects.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LessonRecord {
    pub id: Option<String>,
    pub day_index: Option<i64>,
    pub surah_id: Option<i64>,
    pub verse_keys: Option<Vec<String>>,
    pub body_short: Option<String>,
    pub body_full: Option<String>,
}

impl LessonRecord {
    fn label(&self) -> String {
        self.id.clone().unwrap_or_else(|| "<no id>".to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expected at least {min} lessons, found {found}")]
    TooFewLessons { found: usize, min: usize },

    #[error("dayIndex mismatch at {position} (found {found:?})")]
    DayIndexMismatch { position: usize, found: Option<i64> },

    #[error("missing verseKeys at {id}")]
    MissingVerseKeys { id: String },

    #[error("malformed verse key '{key}' in {id}")]
    MalformedVerseKey { id: String, key: String },

    #[error("cross-surah lesson {id}: verse key '{key}' does not belong to surah {surah_id:?}")]
    CrossSurah {
        id: String,
        key: String,
        surah_id: Option<i64>,
    },

    #[error("body short too long at {id} ({words} words, max {max})")]
    BodyShortTooLong { id: String, words: usize, max: usize },

    #[error("empty body full at {id}")]
    EmptyBodyFull { id: String },
}

/// Summary of a successful validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub lessons: usize,
}

/// Check `lessons` against the output contract.
pub fn validate_lessons(
    lessons: &[LessonRecord],
    config: &ValidationConfig,
) -> Result<ValidationReport, ValidationError> {
    if lessons.len() < config.min_lessons {
        return Err(ValidationError::TooFewLessons {
            found: lessons.len(),
            min: config.min_lessons,
        });
    }

    for (position, lesson) in lessons.iter().enumerate() {
        validate_lesson(position, lesson, config)?;
    }

    Ok(ValidationReport {
        lessons: lessons.len(),
    })
}

fn validate_lesson(
    position: usize,
    lesson: &LessonRecord,
    config: &ValidationConfig,
) -> Result<(), ValidationError> {
    if lesson.day_index != Some(position as i64) {
        return Err(ValidationError::DayIndexMismatch {
            position,
            found: lesson.day_index,
        });
    }

    let verse_keys = lesson.verse_keys.as_deref().unwrap_or_default();
    if verse_keys.is_empty() {
        return Err(ValidationError::MissingVerseKeys { id: lesson.label() });
    }

    for key in verse_keys {
        let surah = verse_key_surah(key).ok_or_else(|| ValidationError::MalformedVerseKey {
            id: lesson.label(),
            key: key.clone(),
        })?;
        if Some(surah) != lesson.surah_id {
            return Err(ValidationError::CrossSurah {
                id: lesson.label(),
                key: key.clone(),
                surah_id: lesson.surah_id,
            });
        }
    }

    let words = word_count(lesson.body_short.as_deref().unwrap_or(""));
    if words > config.body_short_max_words {
        return Err(ValidationError::BodyShortTooLong {
            id: lesson.label(),
            words,
            max: config.body_short_max_words,
        });
    }

    if lesson.body_full.as_deref().unwrap_or("").is_empty() {
        return Err(ValidationError::EmptyBodyFull { id: lesson.label() });
    }

    Ok(())
}

/// Surah component of `"{surah}:{ayah}"`, or of the whole key when it has
/// no colon.
fn verse_key_surah(key: &str) -> Option<i64> {
    trim_space(key.split(':').next()?).parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lesson(day_index: i64, surah_id: i64, keys: &[&str]) -> LessonRecord {
        LessonRecord {
            id: Some(format!("DL-{:06}", day_index + 1)),
            day_index: Some(day_index),
            surah_id: Some(surah_id),
            verse_keys: Some(keys.iter().map(|k| k.to_string()).collect()),
            body_short: Some("Short body.".to_string()),
            body_full: Some("Short body. And more.".to_string()),
        }
    }

    fn relaxed() -> ValidationConfig {
        ValidationConfig {
            min_lessons: 1,
            ..ValidationConfig::default()
        }
    }

    #[test]
    fn accepts_well_formed_lessons() {
        let lessons = vec![lesson(0, 1, &["1:1", "1:2"]), lesson(1, 2, &["2:1"])];
        let report = validate_lessons(&lessons, &relaxed()).unwrap();
        assert_eq!(report.lessons, 2);
    }

    #[test]
    fn rejects_too_few_lessons() {
        let lessons = vec![lesson(0, 1, &["1:1"])];
        let err = validate_lessons(&lessons, &ValidationConfig::default()).unwrap_err();
        assert_eq!(err, ValidationError::TooFewLessons { found: 1, min: 500 });
    }

    #[test]
    fn rejects_day_index_gap() {
        let lessons = vec![lesson(0, 1, &["1:1"]), lesson(2, 1, &["1:2"])];
        let err = validate_lessons(&lessons, &relaxed()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DayIndexMismatch {
                position: 1,
                found: Some(2)
            }
        );
    }

    #[test]
    fn rejects_missing_verse_keys() {
        let mut bad = lesson(0, 1, &[]);
        bad.verse_keys = None;
        let err = validate_lessons(&[bad], &relaxed()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingVerseKeys {
                id: "DL-000001".to_string()
            }
        );
    }

    #[test]
    fn rejects_cross_surah_key() {
        let err = validate_lessons(&[lesson(0, 1, &["1:7", "2:1"])], &relaxed()).unwrap_err();
        assert!(matches!(err, ValidationError::CrossSurah { ref key, .. } if key == "2:1"));
    }

    #[test]
    fn malformed_key_names_the_lesson() {
        let err = validate_lessons(&[lesson(0, 1, &["one:1"])], &relaxed()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed verse key 'one:1' in DL-000001"
        );
    }

    #[test]
    fn rejects_long_body_short() {
        let mut bad = lesson(0, 1, &["1:1"]);
        bad.body_short = Some(vec!["w"; 401].join(" "));
        let err = validate_lessons(&[bad], &relaxed()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::BodyShortTooLong { words: 401, max: 400, .. }
        ));
    }

    #[test]
    fn rejects_empty_body_full() {
        let mut bad = lesson(0, 1, &["1:1"]);
        bad.body_full = Some(String::new());
        let err = validate_lessons(&[bad], &relaxed()).unwrap_err();
        assert_eq!(err.to_string(), "empty body full at DL-000001");
    }

    #[test]
    fn lenient_parse_reports_missing_fields_as_violations() {
        let lessons: Vec<LessonRecord> =
            serde_json::from_value(json!([{ "id": "DL-000001", "surahId": 1 }])).unwrap();
        let err = validate_lessons(&lessons, &relaxed()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DayIndexMismatch {
                position: 0,
                found: None
            }
        );
    }
}
