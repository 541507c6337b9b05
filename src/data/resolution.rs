use serde::{Serialize, Serializer};
use serde::ser::SerializeStruct;

use crate::data::candidate_track::CandidateTrack;
use crate::data::match_tier::MatchTier;

/// Sentinel returned by the preview lookup when no preview could be found
pub const PREVIEW_NOT_FOUND: &str = "Not found";

/// The catalog track chosen for a chart entry
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub tier: MatchTier,
    pub candidate: CandidateTrack,
    /// Artist string used for the comparison that accepted the candidate
    pub artist_queried: String,
    /// Preview URL or PREVIEW_NOT_FOUND
    pub preview_url: String,
}

impl Resolution {
    pub fn new(tier: MatchTier, candidate: CandidateTrack, artist_queried: String, preview_url: String) -> Self {
        Self {
            tier,
            candidate,
            artist_queried,
            preview_url,
        }
    }

    pub fn has_preview(&self) -> bool {
        self.preview_url != PREVIEW_NOT_FOUND
    }
}

// Flattened layout expected by chart consumers
impl Serialize for Resolution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Resolution", 9)?;
        state.serialize_field("artistQueried", &self.artist_queried)?;
        state.serialize_field("id", &self.candidate.id)?;
        state.serialize_field("name", &self.candidate.name)?;
        state.serialize_field("artists", &self.candidate.artists)?;
        state.serialize_field("albumName", &self.candidate.album_name)?;
        state.serialize_field("type", self.candidate.album_type.as_str())?;
        state.serialize_field("artistMatch", &self.tier)?;
        state.serialize_field("isrc", &self.candidate.isrc)?;
        state.serialize_field("preview", &self.preview_url)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::candidate_track::AlbumType;

    #[test]
    fn test_serialized_layout() {
        let candidate = CandidateTrack {
            id: "4AFs".to_string(),
            name: "Fly Over States".to_string(),
            artists: vec!["Jason Aldean".to_string()],
            album_name: "My Kinda Party".to_string(),
            album_type: AlbumType::Album,
            release_date: "2010-11-02".to_string(),
            isrc: Some("USBBV1000123".to_string()),
        };
        let resolution = Resolution::new(
            MatchTier::ExactAlbum,
            candidate,
            "Jason Aldean".to_string(),
            PREVIEW_NOT_FOUND.to_string(),
        );
        let value = serde_json::to_value(&resolution).unwrap();
        assert_eq!(value["artistQueried"], "Jason Aldean");
        assert_eq!(value["albumName"], "My Kinda Party");
        assert_eq!(value["type"], "album");
        assert_eq!(value["artistMatch"], "step1 (album)");
        assert_eq!(value["isrc"], "USBBV1000123");
        assert_eq!(value["preview"], "Not found");
        assert!(value.get("release_date").is_none());
        assert!(!resolution.has_preview());
    }
}
