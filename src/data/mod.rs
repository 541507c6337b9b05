pub mod candidate_track;
pub mod chart_entry;
pub mod match_tier;
pub mod resolution;

pub use candidate_track::{AlbumType, CandidateTrack};
pub use chart_entry::{Chart, ChartEntry, ResolvedEntry};
pub use match_tier::MatchTier;
pub use resolution::{Resolution, PREVIEW_NOT_FOUND};

/// Query derived from a chart row, used for both the search and the comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub title: String,
    pub artist: String,
}

impl NormalizedQuery {
    pub fn new(title: &str, artist: &str) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
        }
    }

    /// Keyword string sent to the search index
    pub fn search_string(&self) -> String {
        format!("{} {}", self.title, self.artist)
    }
}
