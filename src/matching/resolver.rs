use log::{debug, info, warn};

use crate::data::candidate_track::sort_by_release_date;
use crate::data::{ChartEntry, NormalizedQuery, Resolution, ResolvedEntry};
use crate::helpers::{PreviewLookup, SearchError, TrackSearch};
use crate::matching::alias_table::ArtistAliasTable;
use crate::matching::matcher::{lookup_name, match_candidate};
use crate::matching::normalizer::{split_artists, Normalizer};

/// Result of one resolution call with some bookkeeping for diagnostics
#[derive(Debug, Clone)]
pub struct ResolveReport {
    pub resolution: Option<Resolution>,
    /// Number of candidates returned by the search
    pub candidates_total: usize,
    /// Number of candidates run through the matcher before iteration stopped
    pub candidates_evaluated: usize,
}

/// Picks the catalog track for a chart row
///
/// Candidates are evaluated oldest release first. The first accepted album
/// release wins immediately. If no album is accepted, the first accepted
/// single is returned.
pub struct Resolver<'a> {
    search: &'a dyn TrackSearch,
    preview: &'a dyn PreviewLookup,
    normalizer: Normalizer,
    aliases: ArtistAliasTable,
}

impl<'a> Resolver<'a> {
    pub fn new(search: &'a dyn TrackSearch, preview: &'a dyn PreviewLookup) -> Self {
        Self::with_tables(search, preview, Normalizer::default(), ArtistAliasTable::default())
    }

    pub fn with_tables(
        search: &'a dyn TrackSearch,
        preview: &'a dyn PreviewLookup,
        normalizer: Normalizer,
        aliases: ArtistAliasTable,
    ) -> Self {
        Self {
            search,
            preview,
            normalizer,
            aliases,
        }
    }

    /// Resolve a (title, artist) pair, never failing
    ///
    /// Search failures are logged and reported as no match so one bad entry
    /// doesn't stop the rest of the chart.
    pub fn resolve(&self, title: &str, artist: &str) -> Option<Resolution> {
        match self.resolve_detailed(title, artist) {
            Ok(report) => report.resolution,
            Err(e) => {
                warn!("Could not resolve '{}' by '{}': {}", title, artist, e);
                None
            }
        }
    }

    /// Resolve a (title, artist) pair, returning search errors to the caller
    pub fn resolve_detailed(&self, title: &str, artist: &str) -> Result<ResolveReport, SearchError> {
        let query = self.normalizer.normalize_query(title, artist);
        debug!("Credited artists for '{}': {:?}", title, split_artists(&query.artist));
        let mut candidates = self.search.search(&query.search_string())?;
        sort_by_release_date(&mut candidates);

        let candidates_total = candidates.len();
        let mut candidates_evaluated = 0;
        let mut current_artist = query.artist.clone();
        let mut fallback: Option<Resolution> = None;
        let mut result: Option<Resolution> = None;

        for candidate in candidates {
            candidates_evaluated += 1;
            current_artist = self.aliases.truncate_artist(&current_artist);
            let comparison = NormalizedQuery::new(&query.title, &current_artist);

            let tier = match_candidate(&comparison, &candidate, fallback.is_some());
            if !tier.is_accepted() {
                continue;
            }

            let preview = self.preview.lookup_preview(&lookup_name(&candidate), &current_artist);
            let is_album = tier.is_album();
            let resolution = Resolution::new(tier, candidate, current_artist.clone(), preview);

            if is_album {
                result = Some(resolution);
                break;
            } else if fallback.is_none() {
                fallback = Some(resolution);
            }
        }

        if result.is_none() && fallback.is_some() {
            debug!("No album match for '{}', using single", title);
            result = fallback;
        }

        match &result {
            Some(resolution) => info!(
                "Matched '{}' by '{}' to {} ({})",
                title, artist, resolution.candidate.id, resolution.tier
            ),
            None => info!("No track found for '{}' by '{}'", title, current_artist),
        }

        Ok(ResolveReport {
            resolution: result,
            candidates_total,
            candidates_evaluated,
        })
    }

    /// Resolve every entry of a chart in order, one at a time
    pub fn resolve_entries(&self, entries: Vec<ChartEntry>) -> Vec<ResolvedEntry> {
        let total = entries.len();
        let mut resolved = Vec::with_capacity(total);
        for entry in entries {
            let spotify_data = self.resolve(&entry.title, &entry.artist);
            info!("Resolved entry {}/{}: '{}' by '{}'", entry.rank, total, entry.title, entry.artist);
            resolved.push(ResolvedEntry::new(entry, spotify_data));
        }
        let matched = resolved.iter().filter(|e| e.spotify_data.is_some()).count();
        info!("Matched {} of {} chart entries", matched, total);
        resolved
    }
}
