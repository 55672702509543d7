use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use quran_lessons_core::models::LessonSource;
use quran_lessons_core::segment::SegmenterConfig;
use quran_lessons_core::validate::ValidationConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub inputs: InputsConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub segmenter: SegmenterConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub source: LessonSource,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputsConfig {
    /// Commentary JSON object keyed by verse key.
    pub commentary: PathBuf,
    /// Ayah list (`surah_id`, `ayah_number`).
    pub ayahs: PathBuf,
    /// Surah list (`id`, `name_english`).
    pub surahs: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub lessons: PathBuf,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    let seg = &config.segmenter;

    // Validate segmenter
    if seg.group_word_target == 0 {
        anyhow::bail!("segmenter.group_word_target must be > 0");
    }
    if seg.max_ayahs_per_group == 0 {
        anyhow::bail!("segmenter.max_ayahs_per_group must be > 0");
    }
    if seg.title_max_words == 0 {
        anyhow::bail!("segmenter.title_max_words must be > 0");
    }
    if seg.summary_max_sentences == 0 || seg.summary_word_limit == 0 {
        anyhow::bail!("segmenter.summary_max_sentences and summary_word_limit must be > 0");
    }
    if seg.summary_min_sentences > seg.summary_max_sentences {
        anyhow::bail!(
            "segmenter.summary_min_sentences ({}) must be <= summary_max_sentences ({})",
            seg.summary_min_sentences,
            seg.summary_max_sentences
        );
    }

    // The validator must accept everything the segmenter emits
    if config.validation.body_short_max_words < seg.summary_word_limit {
        anyhow::bail!(
            "validation.body_short_max_words ({}) must be >= segmenter.summary_word_limit ({})",
            config.validation.body_short_max_words,
            seg.summary_word_limit
        );
    }

    Ok(())
}
