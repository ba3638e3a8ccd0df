//! Feature steps for track/collection tables.
//!
//! Each step owns one recognized source column and is skipped when that
//! column is absent. [`pipeline::FeaturePipeline`] runs them in a fixed
//! order:
//!
//! | Step | Source column | Effect |
//! |---|---|---|
//! | `release_year` | `releaseDate` | parse dates, append `releaseYear` |
//! | `duration` | `trackTimeMillis` | append `trackDurationMinutes` |
//! | `collection_price` | `collectionPrice` | sentinel to missing |
//! | `track_price` | `trackPrice` | append `trackPrice_missing`, median imputation |
//! | `streamable` | `isStreamable` | boolean-like to 0/1 |
//! | `prune` | identifier columns | drop them |

pub mod columns;
pub mod dates;
pub mod duration;
pub mod pipeline;
pub mod prices;
pub mod prune;
pub mod release_year;
pub mod report;
pub mod streamable;

use anyhow::Result;
use polars::prelude::DataFrame;

use columns::ColumnPresence;
use report::PrepReport;

/// A single column-gated transformation.
///
/// Steps must not add or remove rows and must leave columns they do not
/// own untouched.
pub trait FeatureStep: Send + Sync {
    /// Stable identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Human-readable summary of the step
    fn description(&self) -> String;

    /// Whether the step has anything to do for a frame with these columns
    fn is_applicable(&self, presence: &ColumnPresence) -> bool;

    /// Apply the step, recording any statistics in `report`.
    ///
    /// `presence` is the column set of the pipeline's input frame.
    fn apply(
        &self,
        df: DataFrame,
        presence: &ColumnPresence,
        report: &mut PrepReport,
    ) -> Result<DataFrame>;
}
