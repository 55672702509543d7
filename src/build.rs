//! Daily-lesson build pipeline.
//!
//! Coordinates the full build: load inputs → segment every surah → render
//! JSON → write the output file. The whole batch is rendered in memory
//! first and then written through a temporary sibling file that is renamed
//! into place, so a failed run never leaves a partial lessons file behind.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use quran_lessons_core::models::DailyLesson;
use quran_lessons_core::segment::{build_lessons_with, out_of_range_ayahs};

use crate::config::Config;
use crate::inputs::{load_inputs, LessonInputs};
use crate::progress::{BuildProgressEvent, BuildProgressReporter, ProgressMode};

/// Counts reported after a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub lessons: usize,
    pub surahs: usize,
    pub ayahs: usize,
    pub skipped_ayahs: usize,
    pub empty_bodies: usize,
}

impl BuildSummary {
    fn of(lessons: &[DailyLesson], skipped_ayahs: usize) -> Self {
        Self {
            lessons: lessons.len(),
            surahs: lessons
                .iter()
                .map(|l| l.surah_id)
                .collect::<BTreeSet<_>>()
                .len(),
            ayahs: lessons.iter().map(|l| l.verse_keys.len()).sum(),
            skipped_ayahs,
            empty_bodies: lessons.iter().filter(|l| l.body_full.is_empty()).count(),
        }
    }
}

/// Segment already-loaded inputs into lessons.
pub fn build_from_inputs(
    config: &Config,
    inputs: &LessonInputs,
    reporter: &dyn BuildProgressReporter,
) -> (Vec<DailyLesson>, BuildSummary) {
    reporter.report(BuildProgressEvent::Loaded {
        ayahs: inputs.ayahs.len() as u64,
        commentary: inputs.commentary.len() as u64,
        with_text: inputs.commentary.non_empty() as u64,
        surahs: inputs.surahs.len() as u64,
    });

    let lessons = build_lessons_with(
        &inputs.commentary,
        &inputs.ayahs,
        &inputs.surahs,
        &config.source,
        &config.segmenter,
        |summary| reporter.report(BuildProgressEvent::Surah(*summary)),
    );

    let summary = BuildSummary::of(&lessons, out_of_range_ayahs(&inputs.ayahs));
    (lessons, summary)
}

/// Render lessons exactly as they are written to disk: two-space indented
/// JSON, non-ASCII kept literal, no trailing newline.
pub fn render_lessons(lessons: &[DailyLesson]) -> Result<String> {
    Ok(serde_json::to_string_pretty(lessons)?)
}

pub fn run_build(
    config: &Config,
    output: Option<&Path>,
    dry_run: bool,
    progress: ProgressMode,
) -> Result<()> {
    let inputs = load_inputs(config)?;
    warn_on_sparse_inputs(&inputs);
    let reporter = progress.reporter();
    let (lessons, summary) = build_from_inputs(config, &inputs, reporter.as_ref());

    if summary.skipped_ayahs > 0 {
        eprintln!(
            "Warning: skipped {} ayahs with a surah id outside 1..114",
            summary.skipped_ayahs
        );
    }

    if dry_run {
        println!("build (dry-run)");
        print_summary(&summary);
        return Ok(());
    }

    let path = output.unwrap_or(config.output.lessons.as_path());
    let json = render_lessons(&lessons)?;
    write_atomic(path, json.as_bytes())?;

    println!("Wrote {} lessons to {}", summary.lessons, path.display());
    print_summary(&summary);
    println!("  sha256: {}", sha256_hex(json.as_bytes()));
    println!("ok");
    Ok(())
}

fn warn_on_sparse_inputs(inputs: &LessonInputs) {
    if inputs.commentary.is_empty() {
        eprintln!("Warning: commentary file has no entries; every lesson body will be empty");
    } else if inputs.commentary.non_empty() == 0 {
        eprintln!("Warning: commentary has no non-empty entries; every lesson body will be empty");
    }
    if inputs.surahs.is_empty() {
        eprintln!("Warning: surah list is empty; titles fall back to \"Surah N\"");
    }
}

fn print_summary(summary: &BuildSummary) {
    println!("  lessons: {}", summary.lessons);
    println!("  surahs: {}", summary.surahs);
    println!("  ayahs: {}", summary.ayahs);
    println!("  empty bodies: {}", summary.empty_bodies);
    if summary.skipped_ayahs > 0 {
        println!("  skipped ayahs: {}", summary.skipped_ayahs);
    }
}

/// Write `bytes` to `path` via a temporary file in the same directory.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create {}", parent.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    // The temp file is created 0600; give the output its usual mode.
    #[cfg(unix)]
    tmp.as_file()
        .set_permissions(output_permissions(path))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Mode of the file being replaced, or `0644` for a new file.
#[cfg(unix)]
fn output_permissions(path: &Path) -> std::fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.permissions())
        .unwrap_or_else(|_| std::fs::Permissions::from_mode(0o644))
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
