use super::FeatureStep;
use super::columns::ColumnPresence;
use super::report::PrepReport;
use anyhow::{Context as _, Result};
use polars::prelude::DataFrame;

/// Drops identifier and free-text columns.
///
/// Only names present in the input frame are dropped; absent ones are skipped.
#[derive(Debug, Clone, Default)]
pub struct PruneStep {
    columns: Vec<String>,
}

impl PruneStep {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

impl FeatureStep for PruneStep {
    fn name(&self) -> &'static str {
        "prune"
    }

    fn description(&self) -> String {
        format!("Drop {}", self.columns.join(", "))
    }

    fn is_applicable(&self, presence: &ColumnPresence) -> bool {
        self.columns.iter().any(|c| presence.has_name(c))
    }

    fn apply(
        &self,
        mut df: DataFrame,
        presence: &ColumnPresence,
        report: &mut PrepReport,
    ) -> Result<DataFrame> {
        for name in &self.columns {
            // a name listed twice is already gone from the frame
            if !presence.has_name(name) || df.column(name).is_err() {
                continue;
            }
            df = df
                .drop(name)
                .with_context(|| format!("Failed to drop column {name}"))?;
            report.dropped_columns.push(name.clone());
        }
        tracing::debug!("Dropped columns: {:?}", report.dropped_columns);
        Ok(df)
    }
}
