/// Chart rows, catalog candidates and resolutions
pub mod data;

/// Normalization, candidate matching and resolution
pub mod matching;

/// Catalog search, preview lookup and chart file I/O
pub mod helpers;

/// Configuration loading
pub mod config;

/// Logging configuration
pub mod logging;

pub use data::{Chart, ChartEntry, MatchTier, Resolution, ResolvedEntry};
pub use matching::Resolver;
