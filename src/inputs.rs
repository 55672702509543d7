//! Loading of the input JSON assets and the `inputs` status listing.
//!
//! All three inputs must exist and parse before anything else happens;
//! a missing or malformed file aborts the run with its path in the error.

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

use quran_lessons_core::commentary::CommentaryIndex;
use quran_lessons_core::models::{AyahRecord, SurahInfo, SurahNames};

use crate::config::Config;

/// Parsed contents of the three input files.
#[derive(Debug)]
pub struct LessonInputs {
    pub commentary: CommentaryIndex,
    pub ayahs: Vec<AyahRecord>,
    pub surahs: SurahNames,
}

pub fn load_inputs(config: &Config) -> Result<LessonInputs> {
    let commentary: CommentaryIndex = read_json(&config.inputs.commentary)?;
    let ayahs: Vec<AyahRecord> = read_json(&config.inputs.ayahs)?;
    let surah_infos: Vec<SurahInfo> = read_json(&config.inputs.surahs)?;

    Ok(LessonInputs {
        commentary,
        ayahs,
        surahs: SurahNames::from_infos(&surah_infos),
    })
}

/// Read and deserialize a UTF-8 JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        bail!("Missing {}", path.display());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Print each configured file with its status.
pub fn list_inputs(config: &Config) -> Result<()> {
    let entries = [
        ("commentary", &config.inputs.commentary),
        ("ayahs", &config.inputs.ayahs),
        ("surahs", &config.inputs.surahs),
        ("lessons (out)", &config.output.lessons),
    ];

    println!("{:<16} {:<10} PATH", "FILE", "STATUS");
    for (name, path) in entries {
        println!("{:<16} {:<10} {}", name, file_status(path), path.display());
    }

    Ok(())
}

fn file_status(path: &Path) -> &'static str {
    if path.is_file() {
        "OK"
    } else if path.exists() {
        "NOT A FILE"
    } else {
        "MISSING"
    }
}
