//! `qv-etl validate`: re-read a lessons file and check its structure.

use anyhow::{Context, Result};
use std::path::Path;

use quran_lessons_core::validate::{validate_lessons, LessonRecord, ValidationReport};

use crate::config::Config;
use crate::inputs::read_json;

/// Validate the lessons file at `path` (or the configured output).
///
/// `min_lessons` overrides `validation.min_lessons` from the config.
pub fn run_validate(
    config: &Config,
    path: Option<&Path>,
    min_lessons: Option<usize>,
) -> Result<ValidationReport> {
    let path = path.unwrap_or(config.output.lessons.as_path());
    let lessons: Vec<LessonRecord> = read_json(path)?;

    let mut rules = config.validation.clone();
    if let Some(min) = min_lessons {
        rules.min_lessons = min;
    }

    let report = validate_lessons(&lessons, &rules)
        .with_context(|| format!("Validation failed for {}", path.display()))?;

    println!("Validated {} lessons", report.lessons);
    Ok(report)
}
