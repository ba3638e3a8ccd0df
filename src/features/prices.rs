//! Collection price sentinel handling and track price imputation.

use super::FeatureStep;
use super::columns::{ColumnPresence, TrackColumn};
use super::report::PrepReport;
use anyhow::{Context as _, Result};
use polars::prelude::*;

/// Replaces the in-band "no price" sentinel in `collectionPrice` with missing.
#[derive(Debug, Clone, Copy)]
pub struct CollectionPriceStep {
    sentinel: f64,
}

impl CollectionPriceStep {
    pub fn new(sentinel: f64) -> Self {
        Self { sentinel }
    }
}

impl FeatureStep for CollectionPriceStep {
    fn name(&self) -> &'static str {
        "collection_price"
    }

    fn description(&self) -> String {
        format!(
            "Treat {} == {} as missing",
            TrackColumn::CollectionPrice,
            self.sentinel
        )
    }

    fn is_applicable(&self, presence: &ColumnPresence) -> bool {
        presence.has(TrackColumn::CollectionPrice)
    }

    fn apply(
        &self,
        df: DataFrame,
        _presence: &ColumnPresence,
        report: &mut PrepReport,
    ) -> Result<DataFrame> {
        let name = TrackColumn::CollectionPrice.as_str();

        let cleared = {
            let column = df.column(name)?;
            if !column.dtype().is_numeric() {
                tracing::warn!(
                    "{name} has non-numeric type {}; leaving it untouched",
                    column.dtype()
                );
                return Ok(df);
            }
            let prices = column.as_materialized_series().cast(&DataType::Float64)?;
            prices
                .f64()?
                .into_iter()
                .filter(|value| *value == Some(self.sentinel))
                .count()
        };
        report.cleared_collection_prices = cleared;

        if cleared == 0 {
            return Ok(df);
        }
        tracing::debug!("Clearing {cleared} sentinel values in {name}");

        let is_sentinel = col(name).cast(DataType::Float64).eq(lit(self.sentinel));
        df.lazy()
            .with_column(
                when(is_sentinel)
                    .then(lit(NULL))
                    .otherwise(col(name))
                    .alias(name),
            )
            .collect()
            .context("Failed to clear collection price sentinels")
    }
}

/// Flags missing `trackPrice` values, then fills them with the median.
///
/// `NaN` counts as missing. When nothing was observed the median is
/// undefined and `fallback` is used instead; without a fallback the values
/// stay missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackPriceStep {
    fallback: Option<f64>,
}

impl TrackPriceStep {
    pub fn new(fallback: Option<f64>) -> Self {
        Self { fallback }
    }
}

impl FeatureStep for TrackPriceStep {
    fn name(&self) -> &'static str {
        "track_price"
    }

    fn description(&self) -> String {
        format!(
            "Flag missing {} in {} and impute the median",
            TrackColumn::TrackPrice,
            TrackColumn::TrackPriceMissing
        )
    }

    fn is_applicable(&self, presence: &ColumnPresence) -> bool {
        presence.has(TrackColumn::TrackPrice)
    }

    fn apply(
        &self,
        df: DataFrame,
        _presence: &ColumnPresence,
        report: &mut PrepReport,
    ) -> Result<DataFrame> {
        let name = TrackColumn::TrackPrice.as_str();

        let (mut observed, missing) = {
            let prices = df
                .column(name)?
                .as_materialized_series()
                .cast(&DataType::Float64)
                .context("Track prices are not numeric")?;
            let mut observed = Vec::with_capacity(prices.len());
            let mut missing = 0;
            for value in prices.f64()? {
                match value {
                    Some(v) if !v.is_nan() => observed.push(v),
                    _ => missing += 1,
                }
            }
            (observed, missing)
        };

        let median = median(&mut observed);
        let fill = median.or(self.fallback);

        report.track_price_median = median;
        report.missing_track_prices = missing;
        report.imputed_track_prices = if fill.is_some() { missing } else { 0 };

        match (median, fill) {
            (None, None) if missing > 0 => {
                tracing::warn!("No {name} observed; {missing} values stay missing");
            }
            (None, Some(v)) if missing > 0 => {
                tracing::warn!("No {name} observed; filling {missing} values with fallback {v}");
            }
            (Some(m), _) => tracing::debug!("Imputing {missing} {name} values with median {m}"),
            _ => {}
        }

        let price = col(name).cast(DataType::Float64).fill_nan(lit(NULL));
        let indicator = price
            .clone()
            .is_null()
            .cast(DataType::Int64)
            .alias(TrackColumn::TrackPriceMissing.as_str());
        let imputed = match fill {
            Some(v) => price.fill_null(lit(v)),
            None => price,
        }
        .alias(name);

        // both expressions see the pre-imputation column
        df.lazy()
            .with_columns([indicator, imputed])
            .collect()
            .context("Failed to impute track prices")
    }
}

/// Median of finite values; `None` for an empty slice.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values.get(mid - 1)? + values.get(mid)?) / 2.0)
    } else {
        values.get(mid).copied()
    }
}
