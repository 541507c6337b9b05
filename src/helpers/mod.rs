pub mod chart_date;
pub mod chart_store;
pub mod http_client;
pub mod preview;
pub mod retry;
pub mod spotify;

use thiserror::Error;

use crate::data::CandidateTrack;
use crate::helpers::http_client::HttpClientError;

pub use retry::RetryPolicy;

/// Errors raised by a track search backend
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Http(#[from] HttpClientError),

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),
}

/// Trait for catalog services that can search tracks by keyword
pub trait TrackSearch {
    /// Search the catalog
    ///
    /// # Arguments
    /// * `query` - Free text query, usually "title artist"
    ///
    /// # Returns
    /// Candidate tracks in the order the service ranked them
    fn search(&self, query: &str) -> Result<Vec<CandidateTrack>, SearchError>;
}

/// Trait for services that provide short audio previews
pub trait PreviewLookup {
    /// Look up a preview URL
    ///
    /// Returns `data::PREVIEW_NOT_FOUND` when nothing was found. This is a
    /// normal value, not an error.
    fn lookup_preview(&self, title: &str, artist: &str) -> String;
}
