// Spotify helper functions
// This module acquires client-credentials access tokens and searches the
// Spotify catalog for tracks

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::data::{AlbumType, CandidateTrack};
use crate::helpers::http_client::{self, HttpClient, HttpClientError};
use crate::helpers::{SearchError, TrackSearch};

pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_SEARCH_URL: &str = "https://api.spotify.com/v1/search";
pub const DEFAULT_SEARCH_LIMIT: u32 = 5;

const CLIENT_ID_ENV: &str = "SPOTIFY_CLIENT_ID";
const CLIENT_SECRET_ENV: &str = "SPOTIFY_CLIENT_SECRET";

// Spotify API error types
#[derive(Error, Debug)]
pub enum SpotifyError {
    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] HttpClientError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, SpotifyError>;

/// Spotify configuration structure
#[derive(Debug, Clone, PartialEq)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_url: String,
    pub search_url: String,
    /// Number of candidates requested per search
    pub search_limit: u32,
    /// Optional market (ISO country code) restricting search results
    pub market: Option<String>,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token_url: SPOTIFY_TOKEN_URL.to_string(),
            search_url: SPOTIFY_SEARCH_URL.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            market: None,
        }
    }
}

impl SpotifyConfig {
    pub fn from_json(spotify_config: &Value) -> Self {
        let defaults = SpotifyConfig::default();
        let get_str = |key: &str| {
            spotify_config
                .get(key)
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.to_string())
        };
        SpotifyConfig {
            client_id: get_str("client_id"),
            client_secret: get_str("client_secret"),
            token_url: get_str("token_url").unwrap_or(defaults.token_url),
            search_url: get_str("search_url").unwrap_or(defaults.search_url),
            search_limit: spotify_config
                .get("search_limit")
                .and_then(|v| v.as_u64())
                .map(|v| v.clamp(1, 50) as u32)
                .unwrap_or(defaults.search_limit),
            market: get_str("market"),
        }
    }

    /// Fill missing credentials from SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET
    pub fn with_env_credentials(mut self) -> Self {
        if self.client_id.is_none() {
            self.client_id = std::env::var(CLIENT_ID_ENV).ok().filter(|s| !s.is_empty());
        }
        if self.client_secret.is_none() {
            self.client_secret = std::env::var(CLIENT_SECRET_ENV).ok().filter(|s| !s.is_empty());
        }
        self
    }
}

/// Values acquired once per run and shared read-only by every lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub access_token: String,
}

impl RunContext {
    pub fn new(access_token: &str) -> Self {
        Self {
            access_token: access_token.to_string(),
        }
    }

    fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Request an access token with the client credentials flow
pub fn acquire_access_token(http: &dyn HttpClient, config: &SpotifyConfig) -> Result<RunContext> {
    let client_id = config
        .client_id
        .as_deref()
        .ok_or_else(|| SpotifyError::ConfigError(format!("client_id missing (set {})", CLIENT_ID_ENV)))?;
    let client_secret = config
        .client_secret
        .as_deref()
        .ok_or_else(|| SpotifyError::ConfigError(format!("client_secret missing (set {})", CLIENT_SECRET_ENV)))?;

    let response = http.post_form(
        &config.token_url,
        &[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ],
    )?;

    match response.get("access_token").and_then(|v| v.as_str()) {
        Some(token) if !token.is_empty() => {
            info!("Acquired Spotify access token");
            Ok(RunContext::new(token))
        }
        _ => {
            let reason = response
                .get("error_description")
                .or_else(|| response.get("error"))
                .and_then(|v| v.as_str())
                .unwrap_or("no access_token in response");
            Err(SpotifyError::AuthError(reason.to_string()))
        }
    }
}

// Raw search response, every field optional so malformed items can be skipped
#[derive(Debug, Deserialize)]
struct SpotifyTrackItem {
    id: Option<String>,
    name: Option<String>,
    artists: Option<Vec<SpotifyArtist>>,
    album: Option<SpotifyAlbum>,
    external_ids: Option<SpotifyExternalIds>,
}

#[derive(Debug, Deserialize)]
struct SpotifyArtist {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpotifyAlbum {
    name: Option<String>,
    album_type: Option<String>,
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpotifyExternalIds {
    isrc: Option<String>,
}

impl SpotifyTrackItem {
    fn into_candidate(self) -> Option<CandidateTrack> {
        let album = self.album?;
        let artists: Vec<String> = self
            .artists?
            .into_iter()
            .filter_map(|a| a.name)
            .collect();
        if artists.is_empty() {
            return None;
        }
        Some(CandidateTrack {
            id: self.id?,
            name: self.name?,
            artists,
            album_name: album.name?,
            album_type: AlbumType::from(album.album_type?),
            release_date: album.release_date.unwrap_or_default(),
            isrc: self.external_ids.and_then(|ids| ids.isrc),
        })
    }
}

/// Extract candidate tracks from a search response body
///
/// Items missing the id, name, artists or album are dropped.
pub fn parse_search_response(response: &Value) -> std::result::Result<Vec<CandidateTrack>, SearchError> {
    let items = response
        .get("tracks")
        .and_then(|t| t.get("items"))
        .and_then(|i| i.as_array())
        .ok_or_else(|| SearchError::MalformedResponse("missing tracks.items".to_string()))?;

    let mut candidates = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let candidate = serde_json::from_value::<SpotifyTrackItem>(item.clone())
            .ok()
            .and_then(|raw| raw.into_candidate());
        match candidate {
            Some(track) => candidates.push(track),
            None => warn!("Skipping malformed search result at index {}", index),
        }
    }
    Ok(candidates)
}

/// Track search against the Spotify Web API
pub struct SpotifySearchClient {
    http: Box<dyn HttpClient>,
    context: RunContext,
    config: SpotifyConfig,
}

impl SpotifySearchClient {
    pub fn new(http: Box<dyn HttpClient>, context: RunContext, config: SpotifyConfig) -> Self {
        Self { http, context, config }
    }

    fn search_url(&self, query: &str) -> String {
        let mut url = format!(
            "{}?q={}&type=track&limit={}",
            self.config.search_url,
            urlencoding::encode(query),
            self.config.search_limit
        );
        if let Some(market) = &self.config.market {
            url.push_str(&format!("&market={}", urlencoding::encode(market)));
        }
        url
    }
}

impl TrackSearch for SpotifySearchClient {
    fn search(&self, query: &str) -> std::result::Result<Vec<CandidateTrack>, SearchError> {
        let url = self.search_url(query);
        debug!("Searching Spotify for '{}'", query);
        let authorization = self.context.authorization_header();
        let response = http_client::get_json(
            self.http.as_ref(),
            &url,
            &[("Authorization", authorization.as_str())],
        )?;
        let candidates = parse_search_response(&response)?;
        debug!("Spotify returned {} candidates for '{}'", candidates.len(), query);
        Ok(candidates)
    }
}
