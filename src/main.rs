//! # Quran Lessons CLI (`qv-etl`)
//!
//! Builds, validates and summarizes the daily-lessons asset of the Quran
//! vocabulary app.
//!
//! ## Usage
//!
//! ```bash
//! qv-etl --config ./config/lessons.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `qv-etl build` | Segment the commentary into daily lessons and write the JSON asset |
//! | `qv-etl validate` | Check a lessons file against the app's structural contract |
//! | `qv-etl stats` | Print a summary of a lessons file |
//! | `qv-etl inputs` | List configured input/output files and whether they exist |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use quran_lessons::progress::ProgressMode;
use quran_lessons::{build, config, inputs, stats, validate};

/// Quran Lessons CLI — offline ETL for the daily-lessons asset.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/lessons.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "qv-etl",
    about = "Quran Lessons — offline ETL for the vocabulary app's daily lessons",
    version,
    long_about = "Reads verse-keyed commentary, the ayah list and the surah list, groups each surah's \
    ayahs into short daily lessons with a title, summary, takeaways and topic tags, and writes them \
    as a JSON asset. The output can then be validated and summarized."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/lessons.toml`. Input paths, the output path,
    /// segmenter limits and validation thresholds are read from this file.
    #[arg(long, global = true, default_value = "./config/lessons.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Build the daily lessons file.
    ///
    /// Loads all inputs, segments surahs 1..114 in order, and writes the
    /// complete lesson array in one step. Output from a previous run is
    /// replaced only after the new batch has been fully computed.
    Build {
        /// Write to this path instead of `[output].lessons`.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Dry run — print lesson counts without writing the output file.
        #[arg(long)]
        dry_run: bool,

        /// Progress on stderr: `human`, `json`, or `off`.
        /// Defaults to `human` when stderr is a terminal, `off` otherwise.
        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },

    /// Validate a lessons file.
    ///
    /// Fails on the first violation: too few lessons, a dayIndex out of
    /// sequence, missing or cross-surah verse keys, an oversized short body,
    /// or an empty full body.
    Validate {
        /// Lessons file to check. Defaults to `[output].lessons`.
        #[arg(long)]
        path: Option<PathBuf>,

        /// Override `validation.min_lessons`.
        #[arg(long)]
        min_lessons: Option<usize>,
    },

    /// Show statistics for a lessons file.
    Stats {
        /// Lessons file to read. Defaults to `[output].lessons`.
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// List the configured input and output files and their status.
    Inputs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Build {
            output,
            dry_run,
            progress,
        } => {
            let mode = progress.unwrap_or_else(ProgressMode::default_for_tty);
            build::run_build(&cfg, output.as_deref(), dry_run, mode)?;
        }
        Commands::Validate { path, min_lessons } => {
            validate::run_validate(&cfg, path.as_deref(), min_lessons)?;
        }
        Commands::Stats { path } => {
            stats::run_stats(&cfg, path.as_deref())?;
        }
        Commands::Inputs => {
            inputs::list_inputs(&cfg)?;
        }
    }

    Ok(())
}
