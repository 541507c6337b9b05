use log::{debug, warn};
use regex::Regex;

use crate::matching::normalizer::JOIN_MARKER;

/// Artists whose name contains the join marker
pub static DEFAULT_ARTIST_ALIASES: &[&str] = &[
    "Brooks & Dunn",
    "Hootie & the Blowfish",
    "Maddie & Tae",
];

/// Artist names that must not be split at their join character
#[derive(Debug, Clone)]
pub struct ArtistAliasTable {
    aliases: Vec<String>,
    // case-insensitive literal pattern per alias, same order as `aliases`
    patterns: Vec<Regex>,
}

fn alias_pattern(alias: &str) -> Option<Regex> {
    match Regex::new(&format!("(?i){}", regex::escape(alias))) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            warn!("Ignoring artist alias '{}': {}", alias, e);
            None
        }
    }
}

impl ArtistAliasTable {
    pub fn new(aliases: Vec<String>) -> Self {
        let mut table = Self {
            aliases: Vec::new(),
            patterns: Vec::new(),
        };
        for alias in &aliases {
            table.add(alias);
        }
        table
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_ARTIST_ALIASES.iter().map(|a| a.to_string()).collect())
    }

    pub fn add(&mut self, alias: &str) {
        if self.aliases.iter().any(|a| a.to_lowercase() == alias.to_lowercase()) {
            return;
        }
        if let Some(pattern) = alias_pattern(alias) {
            self.aliases.push(alias.to_string());
            self.patterns.push(pattern);
        }
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Find the first alias contained in `artist` (case-insensitive)
    ///
    /// Returns the byte range of the alias inside `artist`.
    fn find_alias(&self, artist: &str) -> Option<(usize, usize)> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.find(artist).map(|m| (m.start(), m.end())))
    }

    /// Reduce an artist credit to its primary artist
    ///
    /// Without a known alias the credit is cut at the first join marker. With
    /// one, the alias survives intact: whatever precedes it is truncated on
    /// its own, otherwise the alias is the result.
    pub fn truncate_artist(&self, artist: &str) -> String {
        let truncated = match self.find_alias(artist) {
            Some((start, end)) => {
                let before = artist[..start].trim().trim_end_matches(JOIN_MARKER).trim();
                if before.is_empty() {
                    artist[start..end].trim().to_string()
                } else {
                    first_segment(before)
                }
            }
            None => first_segment(artist),
        };
        if truncated != artist {
            debug!("Truncated artist '{}' to '{}'", artist, truncated);
        }
        truncated
    }
}

impl PartialEq for ArtistAliasTable {
    fn eq(&self, other: &Self) -> bool {
        self.aliases == other.aliases
    }
}

impl Default for ArtistAliasTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn first_segment(artist: &str) -> String {
    match artist.split_once(JOIN_MARKER) {
        Some((first, _)) => first.trim().to_string(),
        None => artist.to_string(),
    }
}
