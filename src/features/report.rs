//! Summary of what a pipeline run did

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Applied,
    Skipped,
}

/// Outcome of a single step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: String,
    pub status: StepStatus,
    pub description: String,
}

/// Run summary returned alongside the cleaned frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrepReport {
    pub rows: usize,
    pub steps: Vec<StepRecord>,
    /// Non-missing release dates that could not be parsed
    pub unparsed_release_dates: usize,
    /// Collection prices equal to the sentinel, now missing
    pub cleared_collection_prices: usize,
    /// Median of the observed track prices, if any were observed
    pub track_price_median: Option<f64>,
    /// Track prices that were missing before imputation
    pub missing_track_prices: usize,
    /// Missing track prices that received a fill value
    pub imputed_track_prices: usize,
    pub dropped_columns: Vec<String>,
}

impl PrepReport {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn record(&mut self, step: &str, status: StepStatus, description: String) {
        self.steps.push(StepRecord {
            step: step.to_owned(),
            status,
            description,
        });
    }

    pub fn applied(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .filter(|r| r.status == StepStatus::Applied)
            .map(|r| r.step.as_str())
    }

    /// Get the status of a step by name
    pub fn status_of(&self, step: &str) -> Option<StepStatus> {
        self.steps.iter().find(|r| r.step == step).map(|r| r.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_records_steps_in_order() {
        let mut report = PrepReport::new(3);
        report.record("release_year", StepStatus::Skipped, "no column".to_owned());
        report.record("duration", StepStatus::Applied, "minutes".to_owned());

        assert_eq!(report.applied().collect::<Vec<_>>(), vec!["duration"]);
        assert_eq!(report.status_of("release_year"), Some(StepStatus::Skipped));
        assert_eq!(report.status_of("prune"), None);
    }

    #[test]
    fn test_report_serializes_status_snake_case() -> anyhow::Result<()> {
        let mut report = PrepReport::new(1);
        report.record("prune", StepStatus::Applied, "drop".to_owned());

        let json = serde_json::to_value(&report)?;
        assert_eq!(json["steps"][0]["status"], "applied");
        assert_eq!(json["rows"], 1);
        Ok(())
    }
}
