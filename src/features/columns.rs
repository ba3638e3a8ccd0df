//! The known track/collection column set and presence detection.

use polars::prelude::DataFrame;
use std::collections::HashSet;
use std::fmt;

/// Columns the pipeline reads, writes or drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackColumn {
    ReleaseDate,
    ReleaseYear,
    TrackTimeMillis,
    TrackDurationMinutes,
    CollectionPrice,
    TrackPrice,
    TrackPriceMissing,
    IsStreamable,
    TrackName,
    CollectionName,
    ArtistName,
    TrackViewUrl,
    TrackId,
    CollectionId,
}

impl TrackColumn {
    /// Identifier and free-text columns that are unsuitable as model features.
    pub const IDENTIFIERS: [Self; 6] = [
        Self::TrackName,
        Self::CollectionName,
        Self::ArtistName,
        Self::TrackViewUrl,
        Self::TrackId,
        Self::CollectionId,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReleaseDate => "releaseDate",
            Self::ReleaseYear => "releaseYear",
            Self::TrackTimeMillis => "trackTimeMillis",
            Self::TrackDurationMinutes => "trackDurationMinutes",
            Self::CollectionPrice => "collectionPrice",
            Self::TrackPrice => "trackPrice",
            Self::TrackPriceMissing => "trackPrice_missing",
            Self::IsStreamable => "isStreamable",
            Self::TrackName => "trackName",
            Self::CollectionName => "collectionName",
            Self::ArtistName => "artistName",
            Self::TrackViewUrl => "trackViewUrl",
            Self::TrackId => "trackId",
            Self::CollectionId => "collectionId",
        }
    }
}

impl fmt::Display for TrackColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of which column names a frame carried when the run started.
#[derive(Debug, Clone, Default)]
pub struct ColumnPresence {
    names: HashSet<String>,
}

impl ColumnPresence {
    pub fn of(df: &DataFrame) -> Self {
        Self {
            names: df
                .get_column_names()
                .into_iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    pub fn has(&self, column: TrackColumn) -> bool {
        self.names.contains(column.as_str())
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}
