// Common helpers for integration tests

use std::cell::RefCell;

use chartmatch::data::{AlbumType, CandidateTrack, PREVIEW_NOT_FOUND};
use chartmatch::helpers::http_client::HttpClientError;
use chartmatch::helpers::{PreviewLookup, SearchError, TrackSearch};

pub fn track(id: &str, name: &str, artists: &[&str], album_type: AlbumType, release_date: &str) -> CandidateTrack {
    CandidateTrack {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        album_name: format!("{} album", name),
        album_type,
        release_date: release_date.to_string(),
        isrc: Some(format!("ISRC-{}", id)),
    }
}

/// Search index answering from a list of (query substring, candidates) rules
///
/// Queries containing `fail_on` produce a network error.
#[derive(Default)]
pub struct ScriptedSearch {
    rules: Vec<(String, Vec<CandidateTrack>)>,
    fail_on: Option<String>,
    pub queries: RefCell<Vec<String>>,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, query_part: &str, candidates: Vec<CandidateTrack>) -> Self {
        self.rules.push((query_part.to_string(), candidates));
        self
    }

    pub fn fail_on(mut self, query_part: &str) -> Self {
        self.fail_on = Some(query_part.to_string());
        self
    }
}

impl TrackSearch for ScriptedSearch {
    fn search(&self, query: &str) -> Result<Vec<CandidateTrack>, SearchError> {
        self.queries.borrow_mut().push(query.to_string());
        if let Some(fail) = &self.fail_on {
            if query.contains(fail.as_str()) {
                return Err(SearchError::Http(HttpClientError::RequestError(
                    "connection reset".to_string(),
                )));
            }
        }
        Ok(self
            .rules
            .iter()
            .find(|(part, _)| query.contains(part.as_str()))
            .map(|(_, candidates)| candidates.clone())
            .unwrap_or_default())
    }
}

/// Preview service that records its calls and knows a fixed set of titles
#[derive(Default)]
pub struct RecordingPreview {
    known: Vec<String>,
    pub calls: RefCell<Vec<(String, String)>>,
}

impl RecordingPreview {
    pub fn knowing(titles: &[&str]) -> Self {
        Self {
            known: titles.iter().map(|t| t.to_string()).collect(),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl PreviewLookup for RecordingPreview {
    fn lookup_preview(&self, title: &str, artist: &str) -> String {
        self.calls.borrow_mut().push((title.to_string(), artist.to_string()));
        if self.known.iter().any(|t| t == title) {
            format!("https://previews.example/{}.m4a", title.replace(' ', "-"))
        } else {
            PREVIEW_NOT_FOUND.to_string()
        }
    }
}
