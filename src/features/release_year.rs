use super::FeatureStep;
use super::columns::{ColumnPresence, TrackColumn};
use super::dates::parse_release_date;
use super::report::PrepReport;
use anyhow::{Context as _, Result};
use chrono::{DateTime, Datelike as _, Utc};
use polars::prelude::*;

/// Parses `releaseDate` in place and appends `releaseYear`.
///
/// `releaseDate` holds the UTC instant; `releaseYear` is the calendar year
/// at the offset the value was written with. Unparseable values become
/// missing in both columns; the step never fails because of a bad date.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseYearStep;

impl FeatureStep for ReleaseYearStep {
    fn name(&self) -> &'static str {
        "release_year"
    }

    fn description(&self) -> String {
        format!(
            "Parse {} as a timestamp and derive {}",
            TrackColumn::ReleaseDate,
            TrackColumn::ReleaseYear
        )
    }

    fn is_applicable(&self, presence: &ColumnPresence) -> bool {
        presence.has(TrackColumn::ReleaseDate)
    }

    fn apply(
        &self,
        mut df: DataFrame,
        _presence: &ColumnPresence,
        report: &mut PrepReport,
    ) -> Result<DataFrame> {
        let name = TrackColumn::ReleaseDate.as_str();
        let source = df
            .column(name)
            .context("Release date column disappeared")?
            .as_materialized_series()
            .clone();

        let parsed = parse_releases(&source)?;
        let parsed_count = parsed.iter().filter(|p| p.is_some()).count();
        let unparsed = (source.len() - source.null_count()).saturating_sub(parsed_count);
        if unparsed > 0 {
            tracing::warn!("{unparsed} release dates could not be parsed and are now missing");
        }
        report.unparsed_release_dates = unparsed;

        let (millis, years): (Vec<Option<i64>>, Vec<Option<i32>>) = parsed
            .iter()
            .map(|p| (p.map(|r| r.utc_millis), p.map(|r| r.year)))
            .unzip();

        let timestamps = Series::new(name.into(), millis)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .context("Failed to build release timestamps")?;

        df.with_column(timestamps)?;
        df.with_column(Series::new(TrackColumn::ReleaseYear.as_str().into(), years))?;

        tracing::debug!("Parsed {parsed_count} release dates");
        Ok(df)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Release {
    utc_millis: i64,
    year: i32,
}

/// One entry per row, `None` where missing or unparseable.
fn parse_releases(source: &Series) -> Result<Vec<Option<Release>>> {
    if matches!(source.dtype(), DataType::Date | DataType::Datetime(_, _)) {
        let ms = source
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
            .cast(&DataType::Int64)?;
        return Ok(ms
            .i64()?
            .into_iter()
            .map(|m| {
                let dt = DateTime::<Utc>::from_timestamp_millis(m?)?;
                Some(Release {
                    utc_millis: dt.timestamp_millis(),
                    year: dt.year(),
                })
            })
            .collect());
    }

    let text = match source.cast(&DataType::String) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(
                "releaseDate of type {} cannot be read as text ({err}); treating all values as missing",
                source.dtype()
            );
            return Ok(vec![None; source.len()]);
        }
    };

    Ok(text
        .str()?
        .into_iter()
        .map(|value| {
            value.and_then(parse_release_date).map(|dt| Release {
                utc_millis: dt.timestamp_millis(),
                year: dt.year(),
            })
        })
        .collect())
}
