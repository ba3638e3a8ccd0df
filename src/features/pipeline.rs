//! Fixed-order feature pipeline

use super::FeatureStep;
use super::columns::ColumnPresence;
use super::duration::DurationStep;
use super::prices::{CollectionPriceStep, TrackPriceStep};
use super::prune::PruneStep;
use super::release_year::ReleaseYearStep;
use super::report::{PrepReport, StepStatus};
use super::streamable::StreamableStep;
use crate::config::PrepConfig;
use crate::error::{PrepError, Result};
use anyhow::Context as _;
use polars::prelude::DataFrame;

/// Cleaned frame plus the summary of how it was produced
#[derive(Debug, Clone)]
pub struct Prepared {
    pub frame: DataFrame,
    pub report: PrepReport,
}

/// The track cleaning steps, applied in a fixed order.
pub struct FeaturePipeline {
    steps: Vec<Box<dyn FeatureStep>>,
}

impl FeaturePipeline {
    pub fn new(config: &PrepConfig) -> Self {
        Self {
            steps: vec![
                Box::new(ReleaseYearStep),
                Box::new(DurationStep),
                Box::new(CollectionPriceStep::new(config.price_sentinel)),
                Box::new(TrackPriceStep::new(config.price_fallback)),
                Box::new(StreamableStep),
                Box::new(PruneStep::new(config.drop_columns.clone())),
            ],
        }
    }

    pub fn step_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|s| s.name())
    }

    /// Run every applicable step over a copy of `df`.
    ///
    /// Presence is checked once against the input's columns; a step whose
    /// source column is absent is recorded as skipped. `df` itself is never
    /// modified.
    ///
    /// # Errors
    ///
    /// Returns [`PrepError::Step`] if the dataframe engine fails inside a
    /// step, or if a step changed the row count.
    #[tracing::instrument(skip_all, fields(rows = df.height(), columns = df.width()))]
    pub fn run(&self, df: &DataFrame) -> Result<Prepared> {
        let presence = ColumnPresence::of(df);
        let mut report = PrepReport::new(df.height());
        let mut frame = df.clone();

        for step in &self.steps {
            if !step.is_applicable(&presence) {
                tracing::debug!("Skipping step {}", step.name());
                report.record(step.name(), StepStatus::Skipped, step.description());
                continue;
            }

            frame = step
                .apply(frame, &presence, &mut report)
                .with_context(|| format!("Failed to apply step '{}'", step.name()))?;

            if frame.height() != report.rows {
                return Err(PrepError::Step(format!(
                    "step '{}' changed the row count from {} to {}",
                    step.name(),
                    report.rows,
                    frame.height()
                )));
            }
            report.record(step.name(), StepStatus::Applied, step.description());
        }

        tracing::info!(
            "Prepared {} rows: {} of {} steps applied, {} columns out",
            report.rows,
            report.applied().count(),
            self.steps.len(),
            frame.width()
        );

        Ok(Prepared { frame, report })
    }
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::new(&PrepConfig::default())
    }
}

impl std::fmt::Debug for FeaturePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.step_names()).finish()
    }
}

/// Clean a track/collection table with the default configuration.
///
/// # Errors
///
/// See [`FeaturePipeline::run`].
pub fn clean_and_engineer(df: &DataFrame) -> Result<DataFrame> {
    Ok(FeaturePipeline::default().run(df)?.frame)
}
