use log::debug;

use crate::data::{CandidateTrack, MatchTier, NormalizedQuery};
use crate::matching::normalizer::{clean_names, normalize_quotes, strip_featured_suffix};

/// Check whether any credited artist contains `artist`
///
/// Articles are handled in both directions: "Band Perry" matches "The Band
/// Perry" and "The Band Perry" matches "Band Perry". An empty artist matches
/// nothing.
pub fn artist_credit_matches(credits: &[String], artist: &str) -> bool {
    let artist = artist.trim().to_uppercase();
    if artist.is_empty() {
        return false;
    }
    let with_article = format!("THE {}", artist);
    let without_article = artist.strip_prefix("THE ").unwrap_or(&artist).to_string();

    credits.iter().any(|credit| {
        let credit = credit.to_uppercase();
        credit.contains(&artist) || credit.contains(&with_article) || credit.contains(&without_article)
    })
}

fn titles_equal(a: &str, b: &str) -> bool {
    a.to_uppercase() == b.to_uppercase()
}

/// Tier to assign to an accepted candidate for the given pass
fn tier_for(candidate: &CandidateTrack, stripped: bool, fallback_recorded: bool) -> MatchTier {
    match (candidate.album_type.is_album(), stripped) {
        (true, false) => MatchTier::ExactAlbum,
        (true, true) => MatchTier::StrippedAlbum,
        // a later single never replaces an earlier one
        (false, _) if fallback_recorded => MatchTier::None,
        (false, false) => MatchTier::ExactSingle,
        (false, true) => MatchTier::StrippedSingle,
    }
}

/// Classify one candidate against the query
///
/// `query.artist` must already be the truncated primary artist. The exact pass
/// compares the quote-normalized candidate name with the title. The stripped
/// pass only runs when the exact pass fails, removes a featured-artist or
/// "Spotify Singles" suffix from the name and compares using the
/// alphanumeric-folded artist.
pub fn match_candidate(query: &NormalizedQuery, candidate: &CandidateTrack, fallback_recorded: bool) -> MatchTier {
    let clean_name = normalize_quotes(&candidate.name);

    if titles_equal(&query.title, &clean_name) && artist_credit_matches(&candidate.artists, &query.artist) {
        let tier = tier_for(candidate, false, fallback_recorded);
        debug!("Exact pass accepted '{}' ({}): {}", candidate.name, candidate.album_type, tier);
        return tier;
    }

    if let Some(stripped_name) = strip_featured_suffix(&clean_name) {
        let folded_artist = clean_names(&query.artist);
        if titles_equal(&query.title, &stripped_name) && artist_credit_matches(&candidate.artists, &folded_artist) {
            let tier = tier_for(candidate, true, fallback_recorded);
            debug!("Stripped pass accepted '{}' ({}): {}", candidate.name, candidate.album_type, tier);
            return tier;
        }
    }

    debug!("Rejected '{}' by {:?}", candidate.name, candidate.artists);
    MatchTier::None
}

/// Track name passed to the preview lookup for an accepted candidate
pub fn lookup_name(candidate: &CandidateTrack) -> String {
    let clean_name = normalize_quotes(&candidate.name);
    strip_featured_suffix(&clean_name).unwrap_or(clean_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AlbumType;

    fn candidate(name: &str, artists: &[&str], album_type: AlbumType) -> CandidateTrack {
        CandidateTrack {
            id: format!("id-{}", name),
            name: name.to_string(),
            artists: artists.iter().map(|a| a.to_string()).collect(),
            album_name: "Album".to_string(),
            album_type,
            release_date: "2020-01-01".to_string(),
            isrc: None,
        }
    }

    #[test]
    fn test_exact_album() {
        let query = NormalizedQuery::new("Fly Over States", "Jason Aldean");
        let track = candidate("Fly Over States", &["Jason Aldean"], AlbumType::Album);
        assert_eq!(match_candidate(&query, &track, false), MatchTier::ExactAlbum);
        assert_eq!(match_candidate(&query, &track, true), MatchTier::ExactAlbum);
    }

    #[test]
    fn test_exact_single_only_without_fallback() {
        let query = NormalizedQuery::new("fly over states", "JASON ALDEAN");
        let track = candidate("Fly Over States", &["Jason Aldean"], AlbumType::Single);
        assert_eq!(match_candidate(&query, &track, false), MatchTier::ExactSingle);
        assert_eq!(match_candidate(&query, &track, true), MatchTier::None);
    }

    #[test]
    fn test_curly_quotes_in_candidate_name() {
        let query = NormalizedQuery::new("Don't Think Jesus", "Morgan Wallen");
        let track = candidate("Don\u{2019}t Think Jesus", &["Morgan Wallen"], AlbumType::Album);
        assert_eq!(match_candidate(&query, &track, false), MatchTier::ExactAlbum);
    }

    #[test]
    fn test_article_handling() {
        let query = NormalizedQuery::new("If I Die Young", "Band Perry");
        let track = candidate("If I Die Young", &["The Band Perry"], AlbumType::Album);
        assert_eq!(match_candidate(&query, &track, false), MatchTier::ExactAlbum);

        let query = NormalizedQuery::new("Cruise", "The Florida Georgia Line");
        let track = candidate("Cruise", &["Florida Georgia Line"], AlbumType::Album);
        assert_eq!(match_candidate(&query, &track, false), MatchTier::ExactAlbum);
    }

    #[test]
    fn test_artist_mismatch_rejected() {
        let query = NormalizedQuery::new("Fly Over States", "Jason Aldean");
        let track = candidate("Fly Over States", &["Some Cover Band"], AlbumType::Album);
        assert_eq!(match_candidate(&query, &track, false), MatchTier::None);
    }

    #[test]
    fn test_empty_artist_rejected() {
        let credits = vec!["Cher".to_string()];
        assert!(!artist_credit_matches(&credits, ""));
        assert!(!artist_credit_matches(&credits, "  "));

        let query = NormalizedQuery::new("Believe", "");
        let track = candidate("Believe", &["Cher"], AlbumType::Album);
        assert_eq!(match_candidate(&query, &track, false), MatchTier::None);

        // folds to nothing in the stripped pass
        let query = NormalizedQuery::new("Believe", "!!!");
        let track = candidate("Believe (feat. !!!)", &["Cher"], AlbumType::Album);
        assert_eq!(match_candidate(&query, &track, false), MatchTier::None);
    }

    #[test]
    fn test_title_mismatch_rejected() {
        let query = NormalizedQuery::new("Fly Over States", "Jason Aldean");
        let track = candidate("Fly Over States (Live)", &["Jason Aldean"], AlbumType::Album);
        assert_eq!(match_candidate(&query, &track, false), MatchTier::None);
    }

    #[test]
    fn test_stripped_pass() {
        let query = NormalizedQuery::new("Title", "X");
        let track = candidate("Title (feat. X)", &["Main Artist", "X"], AlbumType::Album);
        assert_eq!(match_candidate(&query, &track, false), MatchTier::StrippedAlbum);

        let single = candidate("Title (feat. X)", &["Main Artist", "X"], AlbumType::Single);
        assert_eq!(match_candidate(&query, &single, false), MatchTier::StrippedSingle);
        assert_eq!(match_candidate(&query, &single, true), MatchTier::None);
    }

    #[test]
    fn test_exact_pass_wins_over_stripped() {
        // the full name with suffix is the chart title, so the exact pass accepts
        let query = NormalizedQuery::new("Title (feat. X)", "X");
        let track = candidate("Title (feat. X)", &["X"], AlbumType::Album);
        assert_eq!(match_candidate(&query, &track, false), MatchTier::ExactAlbum);
    }

    #[test]
    fn test_stripped_pass_uses_folded_artist() {
        let query = NormalizedQuery::new("Pretty Heart", "P.D.");
        let track = candidate("Pretty Heart - Spotify Singles", &["PD Band"], AlbumType::Single);
        assert_eq!(match_candidate(&query, &track, false), MatchTier::StrippedSingle);
    }

    #[test]
    fn test_lookup_name() {
        let track = candidate("You\u{2019}re Mine (with Y)", &["X"], AlbumType::Album);
        assert_eq!(lookup_name(&track), "You're Mine");
        let track = candidate("Plain", &["X"], AlbumType::Album);
        assert_eq!(lookup_name(&track), "Plain");
    }
}
