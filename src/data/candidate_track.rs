use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Deserialize};

/// Album type as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlbumType {
    Album,
    Single,
    Compilation,
    /// Any value the catalog returns that we don't know about
    Other(String),
}

impl AlbumType {
    pub fn as_str(&self) -> &str {
        match self {
            AlbumType::Album => "album",
            AlbumType::Single => "single",
            AlbumType::Compilation => "compilation",
            AlbumType::Other(s) => s.as_str(),
        }
    }

    pub fn is_album(&self) -> bool {
        *self == AlbumType::Album
    }
}

impl From<&str> for AlbumType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "album" => AlbumType::Album,
            "single" => AlbumType::Single,
            "compilation" => AlbumType::Compilation,
            _ => AlbumType::Other(s.to_string()),
        }
    }
}

impl From<String> for AlbumType {
    fn from(s: String) -> Self {
        AlbumType::from(s.as_str())
    }
}

impl From<AlbumType> for String {
    fn from(album_type: AlbumType) -> Self {
        album_type.as_str().to_string()
    }
}

impl fmt::Display for AlbumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One track returned by the catalog search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateTrack {
    pub id: String,
    pub name: String,
    /// Credited artists in catalog order
    pub artists: Vec<String>,
    pub album_name: String,
    pub album_type: AlbumType,
    /// Release date with year, month or day precision ("2012", "2012-05", "2012-05-01")
    pub release_date: String,
    pub isrc: Option<String>,
}

impl CandidateTrack {
    /// Parse the release date, padding year or month precision to the first day
    pub fn parsed_release_date(&self) -> Option<NaiveDate> {
        parse_release_date(&self.release_date)
    }
}

pub fn parse_release_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    let padded = match date.len() {
        4 => format!("{}-01-01", date),
        7 => format!("{}-01", date),
        _ => date.to_string(),
    };
    // the catalog reports "0000" when the release date is unknown
    NaiveDate::parse_from_str(&padded, "%Y-%m-%d")
        .ok()
        .filter(|d| d.year() > 0)
}

/// Sort candidates by release date, oldest first
///
/// The sort is stable, candidates without a usable date keep their search
/// order and go after all dated candidates.
pub fn sort_by_release_date(candidates: &mut [CandidateTrack]) {
    candidates.sort_by(|a, b| {
        match (a.parsed_release_date(), b.parsed_release_date()) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
