//! Lessons file statistics.
//!
//! Provides a quick summary of a built lessons file: size, freshness,
//! content hash, lesson and surah counts, and the tag distribution. Used by
//! `qv-etl stats` to sanity-check a build before shipping the asset.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use quran_lessons_core::models::DailyLesson;
use quran_lessons_core::tags::{GENERAL_TAG, TOPIC_RULES};
use quran_lessons_core::text::word_count;

use crate::build::sha256_hex;
use crate::config::Config;
use crate::progress::format_number;

/// Aggregate counts over a set of lessons.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonStats {
    pub lessons: usize,
    pub surahs: usize,
    pub ayahs: usize,
    pub empty_bodies: usize,
    pub avg_ayahs_per_lesson: f64,
    pub avg_short_words: f64,
    pub max_short_words: usize,
    /// Tag → lesson count, in topic-table order followed by `general`.
    pub tags: Vec<(String, usize)>,
}

pub fn compute_stats(lessons: &[DailyLesson]) -> LessonStats {
    let ayahs: usize = lessons.iter().map(|l| l.verse_keys.len()).sum();
    let short_words: Vec<usize> = lessons.iter().map(|l| word_count(&l.body_short)).collect();

    let mut tag_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for lesson in lessons {
        for tag in &lesson.tags {
            *tag_counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    let tags = TOPIC_RULES
        .iter()
        .map(|(tag, _)| *tag)
        .chain(std::iter::once(GENERAL_TAG))
        .map(|tag| (tag.to_string(), tag_counts.get(tag).copied().unwrap_or(0)))
        .collect();

    LessonStats {
        lessons: lessons.len(),
        surahs: lessons
            .iter()
            .map(|l| l.surah_id)
            .collect::<BTreeSet<_>>()
            .len(),
        ayahs,
        empty_bodies: lessons.iter().filter(|l| l.body_full.is_empty()).count(),
        avg_ayahs_per_lesson: average(ayahs, lessons.len()),
        avg_short_words: average(short_words.iter().sum(), lessons.len()),
        max_short_words: short_words.iter().copied().max().unwrap_or(0),
        tags,
    }
}

fn average(total: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Run the stats command: read the lessons file and print a summary.
pub fn run_stats(config: &Config, path: Option<&Path>) -> Result<()> {
    let path = path.unwrap_or(config.output.lessons.as_path());
    let bytes = std::fs::read(path).with_context(|| format!("Missing {}", path.display()))?;
    let lessons: Vec<DailyLesson> = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(|t| chrono::DateTime::<chrono::Utc>::from(t).timestamp());

    let stats = compute_stats(&lessons);

    println!("Quran Lessons — Daily Lessons Stats");
    println!("===================================");
    println!();
    println!("  File:        {}", path.display());
    println!("  Size:        {}", format_bytes(bytes.len() as u64));
    println!(
        "  Modified:    {}",
        modified
            .map(format_ts_relative)
            .unwrap_or_else(|| "unknown".to_string())
    );
    println!("  SHA-256:     {}", sha256_hex(&bytes));
    println!();
    println!("  Lessons:     {}", format_number(stats.lessons as u64));
    println!("  Surahs:      {}", stats.surahs);
    println!("  Ayahs:       {}", format_number(stats.ayahs as u64));
    println!("  Ayahs/day:   {:.2}", stats.avg_ayahs_per_lesson);
    println!(
        "  Short body:  {:.1} words avg, {} max",
        stats.avg_short_words, stats.max_short_words
    );
    println!("  Empty body:  {}", stats.empty_bodies);

    println!();
    println!("  By tag:");
    println!("  {:<12} {:>8}", "TAG", "LESSONS");
    println!("  {}", "-".repeat(21));
    for (tag, count) in &stats.tags {
        println!("  {:<12} {:>8}", tag, count);
    }
    println!();

    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Format a Unix timestamp as a relative time string (e.g. "3 hours ago").
fn format_ts_relative(ts: i64) -> String {
    let delta = chrono::Utc::now().timestamp() - ts;

    if delta < 0 {
        return format_ts_iso(ts);
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if delta < 86400 * 30 {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        format_ts_iso(ts)
    }
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
