//! Entity resolution between chart rows and catalog search results

pub mod alias_table;
pub mod matcher;
pub mod normalizer;
pub mod resolver;

pub use alias_table::ArtistAliasTable;
pub use matcher::match_candidate;
pub use normalizer::{DiacriticTable, Normalizer};
pub use resolver::{ResolveReport, Resolver};
