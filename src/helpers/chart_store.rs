use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use thiserror::Error;

use crate::data::{Chart, ChartEntry};
use crate::helpers::chart_date::ChartKind;

#[derive(Debug, Error)]
pub enum ChartStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Existing chart {0} has no date")]
    MissingDate(PathBuf),

    #[error("Existing chart {path} has invalid date '{date}'")]
    InvalidDate { path: PathBuf, date: String },
}

/// Stores charts in a directory as `latest*.json` plus dated archives
#[derive(Debug, Clone)]
pub struct ChartStore {
    directory: PathBuf,
}

impl ChartStore {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn latest_path(&self, kind: ChartKind) -> PathBuf {
        self.directory.join(kind.latest_file_name())
    }

    pub fn archive_path(&self, kind: ChartKind, date: &str) -> PathBuf {
        self.directory.join(format!("{}{}.json", kind.archive_prefix(), date))
    }

    /// Move the current latest chart to its dated archive file
    ///
    /// Returns the archive path, or None if there was no latest chart.
    pub fn rotate(&self, kind: ChartKind) -> Result<Option<PathBuf>, ChartStoreError> {
        let latest = self.latest_path(kind);
        if !latest.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&latest).map_err(|source| ChartStoreError::Io {
            path: latest.clone(),
            source,
        })?;
        let existing: Value = serde_json::from_str(&content).map_err(|source| ChartStoreError::Json {
            path: latest.clone(),
            source,
        })?;
        let date = existing
            .get("date")
            .and_then(|d| d.as_str())
            .ok_or_else(|| ChartStoreError::MissingDate(latest.clone()))?;
        // the date becomes part of a file name
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ChartStoreError::InvalidDate {
                path: latest.clone(),
                date: date.to_string(),
            })?
            .format("%Y-%m-%d")
            .to_string();

        let archive = self.archive_path(kind, &date);
        if archive.exists() {
            warn!("Overwriting existing archive {}", archive.display());
        }
        fs::rename(&latest, &archive).map_err(|source| ChartStoreError::Io {
            path: archive.clone(),
            source,
        })?;
        info!("Renaming {} {} chart to {}", date, kind.display_name(), archive.display());
        Ok(Some(archive))
    }

    /// Rotate the previous chart and write the new one as the latest chart
    pub fn save(&self, kind: ChartKind, chart: &Chart) -> Result<PathBuf, ChartStoreError> {
        self.rotate(kind)?;

        let latest = self.latest_path(kind);
        let json = to_tab_indented_json(chart).map_err(|source| ChartStoreError::Json {
            path: latest.clone(),
            source,
        })?;
        fs::write(&latest, json).map_err(|source| ChartStoreError::Io {
            path: latest.clone(),
            source,
        })?;
        info!("New {} chart data saved to {}", kind.display_name(), latest.display());
        Ok(latest)
    }
}

/// Serialize with tab indentation, matching the files consumers already read
pub fn to_tab_indented_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Read chart rows produced by the scraper
pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<ChartEntry>, ChartStoreError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ChartStoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_entries(&content).map_err(|source| ChartStoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse chart rows, either a bare array or an object with an `entries` array
pub fn parse_entries(content: &str) -> Result<Vec<ChartEntry>, serde_json::Error> {
    let value: Value = serde_json::from_str(content)?;
    let rows = match value {
        Value::Object(mut map) => map.remove("entries").unwrap_or(Value::Array(Vec::new())),
        other => other,
    };
    let mut entries: Vec<ChartEntry> = serde_json::from_value(rows)?;
    crate::data::chart_entry::assign_missing_ranks(&mut entries);
    Ok(entries)
}
