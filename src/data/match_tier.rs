use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter};

/// Quality classification of a candidate match
///
/// Variants are ordered best first: exact title matches beat matches that
/// needed a featured-artist suffix stripped, and within a pass album releases
/// beat singles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, AsRefStr, EnumIter)]
pub enum MatchTier {
    #[serde(rename = "step1 (album)")]
    #[strum(serialize = "step1 (album)")]
    ExactAlbum,
    #[serde(rename = "step1 (single)")]
    #[strum(serialize = "step1 (single)")]
    ExactSingle,
    #[serde(rename = "step2 (album)")]
    #[strum(serialize = "step2 (album)")]
    StrippedAlbum,
    #[serde(rename = "step2 (single)")]
    #[strum(serialize = "step2 (single)")]
    StrippedSingle,
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    None,
}

impl MatchTier {
    pub fn is_accepted(&self) -> bool {
        *self != MatchTier::None
    }

    pub fn is_album(&self) -> bool {
        matches!(self, MatchTier::ExactAlbum | MatchTier::StrippedAlbum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tier_ordering() {
        let tiers: Vec<MatchTier> = MatchTier::iter().collect();
        let mut sorted = tiers.clone();
        sorted.sort();
        assert_eq!(tiers, sorted);
        assert!(MatchTier::ExactSingle < MatchTier::StrippedAlbum);
        assert!(MatchTier::StrippedSingle < MatchTier::None);
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(MatchTier::ExactAlbum.to_string(), "step1 (album)");
        assert_eq!(MatchTier::StrippedSingle.as_ref(), "step2 (single)");
        assert_eq!(serde_json::to_value(MatchTier::ExactSingle).unwrap(), "step1 (single)");
    }

    #[test]
    fn test_tier_predicates() {
        assert!(MatchTier::ExactAlbum.is_album());
        assert!(!MatchTier::StrippedSingle.is_album());
        assert!(MatchTier::StrippedAlbum.is_album());
        assert!(!MatchTier::None.is_accepted());
    }
}
