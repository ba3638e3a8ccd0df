//! # trackprep - cleaning for media track/collection tables
//!
//! trackprep takes a [`polars`] `DataFrame` of track or collection records
//! (the iTunes search schema: `releaseDate`, `trackPrice`, `isStreamable`,
//! ...) and returns a model-ready copy: dates parsed, a few columns derived,
//! missing prices imputed, and identifier columns dropped.
//!
//! ## Quick Start
//!
//! ```no_run
//! use polars::prelude::*;
//! use trackprep::clean_and_engineer;
//!
//! # fn example() -> anyhow::Result<()> {
//! let df = df!(
//!     "trackPrice" => [Some(1.29), None, Some(0.99)],
//!     "trackTimeMillis" => [210_000_i64, 180_000, 240_000],
//!     "trackId" => [1_i64, 2, 3],
//! )?;
//!
//! let cleaned = clean_and_engineer(&df)?;
//! assert!(cleaned.column("trackId").is_err());
//! assert!(cleaned.column("trackDurationMinutes").is_ok());
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`features`]: the column-gated steps and the pipeline running them
//!   - [`features::pipeline`]: [`FeaturePipeline`], [`clean_and_engineer`]
//!   - [`features::report`]: per-run summary
//! - [`config`]: [`PrepConfig`]
//! - [`error`]: [`PrepError`] and the `Result` alias
//! - [`logging`]: optional `tracing` subscriber setup
//!
//! ## Missing values
//!
//! Missingness is the polars null of each cell, for every dtype. Float
//! `NaN` in `trackPrice` is also treated as missing.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod features;
pub mod logging;

pub use config::PrepConfig;
pub use error::{PrepError, Result};
pub use features::pipeline::{FeaturePipeline, Prepared, clean_and_engineer};
pub use features::report::{PrepReport, StepStatus};
