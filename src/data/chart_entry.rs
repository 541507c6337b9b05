use serde::{Serialize, Deserialize};

use crate::data::resolution::Resolution;

/// One ranked row of a weekly chart as delivered by the chart scraper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEntry {
    /// Track title as printed on the chart
    #[serde(alias = "name", alias = "trackTitle")]
    pub title: String,
    /// Artist credit as printed on the chart
    #[serde(alias = "artistName")]
    pub artist: String,
    /// Position this week (1-based)
    #[serde(default, alias = "positionThisWeek")]
    pub rank: u32,
    /// Position last week, None for new entries
    #[serde(default, alias = "last_week_rank", alias = "positionLastWeek")]
    pub last_week_rank: Option<u32>,
    #[serde(default, alias = "peak_rank", alias = "positionPeak")]
    pub peak_rank: u32,
    #[serde(default, alias = "weeks_on_chart", alias = "weeksInChart")]
    pub weeks_on_chart: u32,
    /// Cover image scraped from the chart page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Country of origin (Countrytown only)
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "countryOfOrigin")]
    pub country: Option<String>,
    /// Record label (Countrytown only)
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "labelName")]
    pub label: Option<String>,
}

impl ChartEntry {
    /// Create a new chart entry with the minimum set of fields
    pub fn new(title: &str, artist: &str, rank: u32) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            rank,
            last_week_rank: None,
            peak_rank: rank,
            weeks_on_chart: 1,
            image: None,
            country: None,
            label: None,
        }
    }
}

/// A chart entry together with the catalog data resolved for it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEntry {
    #[serde(flatten)]
    pub entry: ChartEntry,
    /// None when no catalog track could be matched
    pub spotify_data: Option<Resolution>,
}

impl ResolvedEntry {
    pub fn new(entry: ChartEntry, spotify_data: Option<Resolution>) -> Self {
        Self { entry, spotify_data }
    }
}

/// A complete chart as written to disk
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    /// Chart week in ISO format (YYYY-MM-DD)
    pub date: String,
    pub entries: Vec<ResolvedEntry>,
}

/// Assign ranks from sequence order to entries that don't carry one
pub fn assign_missing_ranks(entries: &mut [ChartEntry]) {
    for (index, entry) in entries.iter_mut().enumerate() {
        if entry.rank == 0 {
            entry.rank = (index + 1) as u32;
        }
    }
}

/// Set `image` on entries that have no cover of their own
pub fn fill_missing_images(entries: &mut [ChartEntry], image: &str) {
    for entry in entries.iter_mut() {
        if entry.image.as_deref().map_or(true, |i| i.trim().is_empty()) {
            entry.image = Some(image.to_string());
        }
    }
}
