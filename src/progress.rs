//! Build progress reporting.
//!
//! Reports per-surah progress during `qv-etl build` so long runs show where
//! they are. Progress is emitted on **stderr** so stdout stays parseable.

use std::io::Write;

use quran_lessons_core::models::SURAH_COUNT;
use quran_lessons_core::segment::SurahSummary;

/// A single progress event for a build.
#[derive(Clone, Debug)]
pub enum BuildProgressEvent {
    /// Inputs parsed; segmentation is about to start.
    Loaded {
        ayahs: u64,
        commentary: u64,
        /// Commentary entries with non-empty text after normalization.
        with_text: u64,
        surahs: u64,
    },
    /// One surah segmented.
    Surah(SurahSummary),
}

/// Reports build progress. Implementations write to stderr (human or JSON).
pub trait BuildProgressReporter {
    fn report(&self, event: BuildProgressEvent);
}

/// Human-friendly progress: "build  surah 2/114  86 ayahs -> 29 lessons  (30 total)".
pub struct StderrProgress;

impl BuildProgressReporter for StderrProgress {
    fn report(&self, event: BuildProgressEvent) {
        let line = match &event {
            BuildProgressEvent::Loaded {
                ayahs,
                commentary,
                with_text,
                surahs,
            } => format!(
                "build  loaded {} ayahs, {} commentary entries ({} with text), {} surah names\n",
                format_number(*ayahs),
                format_number(*commentary),
                format_number(*with_text),
                surahs
            ),
            BuildProgressEvent::Surah(s) => format!(
                "build  surah {}/{}  {} ayahs -> {} lessons  ({} total)\n",
                s.surah_id,
                SURAH_COUNT,
                s.ayahs,
                s.lessons,
                format_number(s.total_lessons as u64)
            ),
        };
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl BuildProgressReporter for JsonProgress {
    fn report(&self, event: BuildProgressEvent) {
        let obj = match &event {
            BuildProgressEvent::Loaded {
                ayahs,
                commentary,
                with_text,
                surahs,
            } => serde_json::json!({
                "event": "progress",
                "phase": "loaded",
                "ayahs": ayahs,
                "commentary": commentary,
                "with_text": with_text,
                "surahs": surahs
            }),
            BuildProgressEvent::Surah(s) => serde_json::json!({
                "event": "progress",
                "phase": "segmenting",
                "surah": s.surah_id,
                "of": SURAH_COUNT,
                "ayahs": s.ayahs,
                "lessons": s.lessons,
                "total": s.total_lessons
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{}", line);
            let _ = stderr.flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl BuildProgressReporter for NoProgress {
    fn report(&self, _event: BuildProgressEvent) {}
}

pub(crate) fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn BuildProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
