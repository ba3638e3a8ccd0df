//! End-to-end tests for the track cleaning pipeline
//!
//! These drive the public API with small catalogue-shaped frames and check
//! the output schema and values.

use anyhow::Result;
use polars::prelude::*;
use trackprep::{FeaturePipeline, PrepConfig, StepStatus, clean_and_engineer};

fn catalogue() -> Result<DataFrame> {
    Ok(df!(
        "trackId" => [Some(99_i64), Some(100), Some(101), Some(102)],
        "trackName" => ["Intro", "Song", "Outro", "Bonus"],
        "primaryGenreName" => ["Rock", "Rock", "Pop", "Jazz"],
        "releaseDate" => [
            Some("2019-11-01T08:00:00Z"),
            Some("2005-06-28T07:00:00Z"),
            Some("unknown"),
            None,
        ],
        "trackTimeMillis" => [Some(210_000_i64), Some(180_000), None, Some(45_000)],
        "collectionPrice" => [Some(-1.0), Some(9.99), Some(9.99), Some(-1.0)],
        "trackPrice" => [None, Some(0.99), Some(1.29), Some(1.29)],
        "isStreamable" => [Some("True"), Some("false"), None, Some("maybe")],
    )?)
}

fn names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect()
}

#[test]
fn test_reference_row() -> Result<()> {
    let out = clean_and_engineer(&catalogue()?)?;

    let price = out.column("trackPrice")?.as_materialized_series();
    assert_eq!(price.f64()?.get(0), Some(1.29));

    let missing = out.column("trackPrice_missing")?.as_materialized_series();
    assert_eq!(missing.i64()?.get(0), Some(1));

    let minutes = out.column("trackDurationMinutes")?.as_materialized_series();
    assert_eq!(minutes.f64()?.get(0), Some(3.5));

    let streamable = out.column("isStreamable")?.as_materialized_series();
    assert_eq!(streamable.i64()?.get(0), Some(1));

    let collection = out.column("collectionPrice")?.as_materialized_series();
    assert_eq!(collection.f64()?.get(0), None);

    assert!(out.column("trackId").is_err());
    Ok(())
}

#[test]
fn test_output_schema() -> Result<()> {
    let input = catalogue()?;
    let out = clean_and_engineer(&input)?;

    assert_eq!(out.height(), input.height());
    assert_eq!(
        names(&out),
        vec![
            "primaryGenreName",
            "releaseDate",
            "trackTimeMillis",
            "collectionPrice",
            "trackPrice",
            "isStreamable",
            "releaseYear",
            "trackDurationMinutes",
            "trackPrice_missing",
        ]
    );
    Ok(())
}

#[test]
fn test_row_order_preserved() -> Result<()> {
    let out = clean_and_engineer(&catalogue()?)?;

    let genres = out.column("primaryGenreName")?.as_materialized_series();
    let genres: Vec<Option<&str>> = genres.str()?.into_iter().collect();
    assert_eq!(genres, vec![Some("Rock"), Some("Rock"), Some("Pop"), Some("Jazz")]);

    let years = out.column("releaseYear")?.as_materialized_series();
    let years: Vec<Option<i32>> = years.i32()?.into_iter().collect();
    assert_eq!(years, vec![Some(2019), Some(2005), None, None]);
    Ok(())
}

#[test]
fn test_values_per_column() -> Result<()> {
    let out = clean_and_engineer(&catalogue()?)?;

    let collection = out.column("collectionPrice")?.as_materialized_series();
    let collection: Vec<Option<f64>> = collection.f64()?.into_iter().collect();
    assert_eq!(collection, vec![None, Some(9.99), Some(9.99), None]);

    let minutes = out.column("trackDurationMinutes")?.as_materialized_series();
    let minutes: Vec<Option<f64>> = minutes.f64()?.into_iter().collect();
    assert_eq!(minutes, vec![Some(3.5), Some(3.0), None, Some(0.75)]);

    let flags = out.column("trackPrice_missing")?.as_materialized_series();
    let flags: Vec<Option<i64>> = flags.i64()?.into_iter().collect();
    assert_eq!(flags, vec![Some(1), Some(0), Some(0), Some(0)]);

    let streamable = out.column("isStreamable")?.as_materialized_series();
    let streamable: Vec<Option<i64>> = streamable.i64()?.into_iter().collect();
    assert_eq!(streamable, vec![Some(1), Some(0), Some(0), Some(0)]);
    Ok(())
}

#[test]
fn test_release_year_uses_written_offset() -> Result<()> {
    let input = df!(
        "releaseDate" => ["2001-01-01T00:30:00+02:00", "1999-12-31T23:00:00-05:00"],
    )?;

    let out = clean_and_engineer(&input)?;

    let years = out.column("releaseYear")?.as_materialized_series();
    let years: Vec<Option<i32>> = years.i32()?.into_iter().collect();
    assert_eq!(years, vec![Some(2001), Some(1999)]);
    Ok(())
}

#[test]
fn test_absent_columns_are_skipped() -> Result<()> {
    let input = df!(
        "kind" => ["song", "podcast"],
        "trackPrice" => [Some(0.99), None],
    )?;

    let prepared = FeaturePipeline::default().run(&input)?;
    let out = &prepared.frame;

    assert!(out.column("releaseYear").is_err());
    assert!(out.column("trackDurationMinutes").is_err());
    assert!(out.column("isStreamable").is_err());
    assert!(out.column("trackPrice_missing").is_ok());
    assert_eq!(names(out), vec!["kind", "trackPrice", "trackPrice_missing"]);

    let report = &prepared.report;
    assert_eq!(report.status_of("release_year"), Some(StepStatus::Skipped));
    assert_eq!(report.status_of("track_price"), Some(StepStatus::Applied));
    assert_eq!(report.status_of("prune"), Some(StepStatus::Skipped));
    Ok(())
}

#[test]
fn test_report_summary() -> Result<()> {
    let prepared = FeaturePipeline::default().run(&catalogue()?)?;
    let report = &prepared.report;

    assert_eq!(report.rows, 4);
    assert_eq!(report.unparsed_release_dates, 1);
    assert_eq!(report.cleared_collection_prices, 2);
    assert_eq!(report.track_price_median, Some(1.29));
    assert_eq!(report.missing_track_prices, 1);
    assert_eq!(report.imputed_track_prices, 1);
    assert_eq!(report.dropped_columns, vec!["trackName", "trackId"]);
    assert_eq!(report.applied().count(), 6);
    Ok(())
}

#[test]
fn test_custom_config() -> Result<()> {
    let config = PrepConfig::from_json(
        r#"{ "drop_columns": ["primaryGenreName"], "price_fallback": 0.5 }"#,
    )?;
    let input = df!(
        "primaryGenreName" => ["Rock", "Pop"],
        "trackId" => [1_i64, 2],
        "trackPrice" => [None::<f64>, None],
    )?;

    let out = FeaturePipeline::new(&config).run(&input)?.frame;

    assert!(out.column("primaryGenreName").is_err());
    assert!(out.column("trackId").is_ok(), "only configured columns are dropped");
    let prices = out.column("trackPrice")?.as_materialized_series();
    let prices: Vec<Option<f64>> = prices.f64()?.into_iter().collect();
    assert_eq!(prices, vec![Some(0.5), Some(0.5)]);
    Ok(())
}

#[test]
fn test_empty_frame() -> Result<()> {
    let input = df!(
        "trackPrice" => Vec::<Option<f64>>::new(),
        "isStreamable" => Vec::<Option<&str>>::new(),
        "trackId" => Vec::<i64>::new(),
    )?;

    let out = clean_and_engineer(&input)?;

    assert_eq!(out.height(), 0);
    assert_eq!(names(&out), vec!["trackPrice", "isStreamable", "trackPrice_missing"]);
    Ok(())
}
