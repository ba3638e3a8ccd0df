use crate::error::{PrepError, Result, ResultExt as _};
use crate::features::columns::TrackColumn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a cleaning run.
///
/// `Default` gives the standard behaviour: the six identifier/text columns
/// are dropped, `-1` marks a missing collection price, and an all-missing
/// track price column is left missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    /// Columns removed by the pruning step when present
    pub drop_columns: Vec<String>,
    /// In-band value meaning "no collection price"
    pub price_sentinel: f64,
    /// Fill value for `trackPrice` when no price was observed at all
    pub price_fallback: Option<f64>,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            drop_columns: TrackColumn::IDENTIFIERS
                .iter()
                .map(|c| c.as_str().to_owned())
                .collect(),
            price_sentinel: -1.0,
            price_fallback: None,
        }
    }
}

impl PrepConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PrepError::Config`] if the document is not valid JSON or the
    /// sentinel/fallback values are not finite.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PrepError::Io`] if the file cannot be read, otherwise the
    /// errors of [`PrepConfig::from_json`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PrepError::Config`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }

    fn validate(&self) -> Result<()> {
        if !self.price_sentinel.is_finite() {
            return Err(PrepError::Config(format!(
                "price_sentinel must be finite, got {}",
                self.price_sentinel
            )));
        }
        if let Some(fallback) = self.price_fallback
            && !fallback.is_finite()
        {
            return Err(PrepError::Config(format!(
                "price_fallback must be finite, got {fallback}"
            )));
        }
        Ok(())
    }
}
