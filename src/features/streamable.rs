use super::FeatureStep;
use super::columns::{ColumnPresence, TrackColumn};
use super::report::PrepReport;
use anyhow::{Context as _, Result};
use polars::prelude::*;

/// Normalizes `isStreamable` to 0/1.
///
/// Only the text `"true"` (any case) maps to 1. `"false"`, unrecognized
/// text and missing values all map to 0, so the output has no nulls.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamableStep;

impl FeatureStep for StreamableStep {
    fn name(&self) -> &'static str {
        "streamable"
    }

    fn description(&self) -> String {
        format!("Map {} to 0/1", TrackColumn::IsStreamable)
    }

    fn is_applicable(&self, presence: &ColumnPresence) -> bool {
        presence.has(TrackColumn::IsStreamable)
    }

    fn apply(
        &self,
        df: DataFrame,
        _presence: &ColumnPresence,
        _report: &mut PrepReport,
    ) -> Result<DataFrame> {
        let name = TrackColumn::IsStreamable.as_str();

        let flag = col(name)
            .cast(DataType::String)
            .str()
            .to_lowercase()
            .eq(lit("true"))
            .fill_null(lit(false))
            .cast(DataType::Int64)
            .alias(name);

        let out = df
            .lazy()
            .with_column(flag)
            .collect()
            .context("Failed to normalize streamability")?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let streamable = out.column(name)?.as_materialized_series().i64()?.sum();
            tracing::debug!("{} of {} rows streamable", streamable.unwrap_or(0), out.height());
        }
        Ok(out)
    }
}
