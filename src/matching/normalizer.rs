/// Text normalization for chart queries and catalog track names
///
/// Chart pages are typed by humans, catalog entries by labels. This module
/// removes the cosmetic differences between the two: curly quotes, missing
/// accents on well-known artist names and the many ways of writing a
/// collaboration ("feat.", "with", "/", ",").

use std::collections::BTreeMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::NormalizedQuery;

/// Marker that replaces every collaboration separator in an artist string
pub const JOIN_MARKER: &str = "&";

/// Default spellings rewritten before an artist name is sent to the search index
pub static DEFAULT_DIACRITIC_CORRECTIONS: &[(&str, &str)] = &[
    ("Buble", "Bublé"),
    ("Celine Dion", "Céline Dion"),
    ("Blue Oyster Cult", "Blue Öyster Cult"),
    ("Beyonce", "Beyoncé"),
    ("Jose Feliciano", "José Feliciano"),
];

static JOIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:featuring|feat|with)\b\.?|\s*/\s*|\s*,\s*")
        .expect("join pattern is valid")
});

static FEATURED_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*\((?:f(?:ea)?t(?:uring)?\.?\s.*?|.*?\s?with\s.*?)\)|\s*- Spotify Singles(?: Holiday)?")
        .expect("featured suffix pattern is valid")
});

/// Ordered substitution table for unaccented artist spellings
#[derive(Debug, Clone, PartialEq)]
pub struct DiacriticTable {
    corrections: Vec<(String, String)>,
}

impl DiacriticTable {
    pub fn new() -> Self {
        Self {
            corrections: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for (plain, accented) in DEFAULT_DIACRITIC_CORRECTIONS {
            table.add(plain, accented);
        }
        table
    }

    /// Add a correction, replacing an existing one for the same spelling
    pub fn add(&mut self, plain: &str, accented: &str) {
        if let Some(existing) = self.corrections.iter_mut().find(|(p, _)| p == plain) {
            existing.1 = accented.to_string();
        } else {
            self.corrections.push((plain.to_string(), accented.to_string()));
        }
    }

    pub fn extend(&mut self, corrections: &BTreeMap<String, String>) {
        for (plain, accented) in corrections {
            self.add(plain, accented);
        }
    }

    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }

    /// Rewrite every known unaccented spelling in `artist`
    pub fn apply(&self, artist: &str) -> String {
        let mut result = artist.to_string();
        for (plain, accented) in &self.corrections {
            if result.contains(plain.as_str()) {
                result = result.replace(plain.as_str(), accented);
            }
        }
        result
    }
}

impl Default for DiacriticTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Pure text transforms applied to queries and candidate names
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    diacritics: DiacriticTable,
}

impl Normalizer {
    pub fn new(diacritics: DiacriticTable) -> Self {
        Self { diacritics }
    }

    pub fn diacritics(&self) -> &DiacriticTable {
        &self.diacritics
    }

    /// Build the query for a chart row
    ///
    /// The title only gets quote normalization. The artist gets diacritic
    /// correction, collaboration separators rewritten to the join marker and
    /// quote normalization.
    pub fn normalize_query(&self, title: &str, artist: &str) -> NormalizedQuery {
        let joined = normalize_joins(&self.diacritics.apply(artist));
        let query = NormalizedQuery::new(
            &normalize_quotes(title.trim()),
            &normalize_quotes(joined.trim()),
        );
        debug!("Normalized '{}' by '{}' to {:?}", title, artist, query);
        query
    }

    /// Candidate track name as used for comparison
    pub fn clean_track_name(&self, name: &str) -> String {
        normalize_quotes(name)
    }
}

/// Replace curly quotes and the grave accent with straight ASCII quotes
pub fn normalize_quotes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{0060}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect()
}

/// Rewrite "featuring", "feat.", "with", "/" and "," to the join marker
pub fn normalize_joins(artist: &str) -> String {
    JOIN_REGEX.replace_all(artist, JOIN_MARKER).into_owned()
}

/// Keep only letters, digits and whitespace, then trim
pub fn clean_names(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Remove a "(feat. X)", "(... with ...)" or "- Spotify Singles" suffix
///
/// The name is cut at the first match. Returns None if the name carries no
/// such suffix.
pub fn strip_featured_suffix(name: &str) -> Option<String> {
    FEATURED_SUFFIX_REGEX.find(name).map(|m| {
        let stripped = name[..m.start()].trim().to_string();
        debug!("Stripped '{}' from '{}'", m.as_str(), name);
        stripped
    })
}

/// Split a join-normalized artist string into its individual artists
pub fn split_artists(artist: &str) -> Vec<String> {
    normalize_joins(artist)
        .split(JOIN_MARKER)
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}
