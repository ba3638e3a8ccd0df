use super::FeatureStep;
use super::columns::{ColumnPresence, TrackColumn};
use super::report::PrepReport;
use anyhow::{Context as _, Result};
use polars::prelude::*;

pub const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Appends `trackDurationMinutes = trackTimeMillis / 60000`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationStep;

impl FeatureStep for DurationStep {
    fn name(&self) -> &'static str {
        "duration"
    }

    fn description(&self) -> String {
        format!(
            "Derive {} from {}",
            TrackColumn::TrackDurationMinutes,
            TrackColumn::TrackTimeMillis
        )
    }

    fn is_applicable(&self, presence: &ColumnPresence) -> bool {
        presence.has(TrackColumn::TrackTimeMillis)
    }

    fn apply(
        &self,
        df: DataFrame,
        _presence: &ColumnPresence,
        _report: &mut PrepReport,
    ) -> Result<DataFrame> {
        let millis = col(TrackColumn::TrackTimeMillis.as_str()).cast(DataType::Float64);

        df.lazy()
            .with_column(
                (millis / lit(MILLIS_PER_MINUTE))
                    .alias(TrackColumn::TrackDurationMinutes.as_str()),
            )
            .collect()
            .context("Failed to derive track duration")
    }
}
