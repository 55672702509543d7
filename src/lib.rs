//! # Quran Lessons
//!
//! Offline ETL for the Quran vocabulary app's daily-lesson asset.
//!
//! The pipeline reads three JSON inputs (commentary keyed by verse key, the
//! ayah list, and the surah list), segments every surah into short daily
//! lessons, and writes `daily_lessons.json`. A validator re-reads the file
//! and checks the contract the mobile app relies on.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌────────────────────┐
//! │ Inputs       │──▶│  Segmenter   │──▶│ daily_lessons.json │
//! │ commentary   │   │ group+derive │   └─────────┬──────────┘
//! │ ayahs/surahs │   └──────────────┘             │
//! └──────────────┘                     ┌──────────┴─────────┐
//!                                      ▼                    ▼
//!                                ┌──────────┐         ┌──────────┐
//!                                │ validate │         │  stats   │
//!                                └──────────┘         └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! qv-etl inputs                 # check the configured files exist
//! qv-etl build                  # write daily_lessons.json
//! qv-etl validate               # check the written file
//! qv-etl stats                  # summarize it
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`inputs`] | Input file loading and status |
//! | [`build`] | Build pipeline and atomic output |
//! | [`validate`] | Output validation command |
//! | [`stats`] | Output statistics |
//! | [`progress`] | Build progress reporting |
//!
//! Segmentation, text derivation and validation rules live in
//! [`quran_lessons_core`].

pub mod build;
pub mod config;
pub mod inputs;
pub mod progress;
pub mod stats;
pub mod validate;
