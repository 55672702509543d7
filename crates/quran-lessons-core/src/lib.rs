//! # Quran Lessons Core
//!
//! Pure logic for the Quran Lessons ETL: data models, the commentary
//! index, text derivation, topic tagging, the daily-lesson segmenter, and
//! the lesson validator.
//!
//! This crate performs no filesystem or network I/O. Callers load the
//! input files, hand the parsed records to [`segment::build_lessons`], and
//! write the result themselves.
//!
//! ```rust
//! use quran_lessons_core::commentary::CommentaryIndex;
//! use quran_lessons_core::models::{AyahRecord, LessonSource, SurahNames};
//! use quran_lessons_core::segment::{build_lessons, SegmenterConfig};
//!
//! let mut commentary = CommentaryIndex::default();
//! commentary.insert("1:1", "In the name of Allah, the Most Merciful.");
//! let ayahs = vec![AyahRecord::new(1, 1)];
//!
//! let lessons = build_lessons(
//!     &commentary,
//!     &ayahs,
//!     &SurahNames::default(),
//!     &LessonSource::default(),
//!     &SegmenterConfig::default(),
//! );
//! assert_eq!(lessons.len(), 1);
//! assert_eq!(lessons[0].id, "DL-000001");
//! assert_eq!(lessons[0].tags, vec!["mercy".to_string()]);
//! ```

pub mod commentary;
pub mod models;
pub mod segment;
pub mod tags;
pub mod text;
pub mod validate;
