//! # filterbrr-rules
//!
//! Filter definitions and the engine that matches parsed releases against them.
//!
//! ## Overview
//!
//! - [`wildcard`] -- glob patterns compiled to anchored regexes.
//! - [`matching`] -- CSV, list, range, HDR and regex membership primitives.
//! - [`PatternCache`] -- TTL-bounded cache of compiled patterns.
//! - [`Rejections`] -- ordered ledger explaining a non-match.
//! - [`Filter`] -- the criteria a release is matched against.
//! - [`evaluate`] -- checks one filter against one release.
//! - [`FilterEngine`] -- evaluates a release against priority-sorted filters.
//!
//! ```
//! use filterbrr_parser::parse_release;
//! use filterbrr_rules::{evaluate, Filter};
//!
//! let mut release = parse_release("That Movie 2020 2160p BluRay DD5.1 x264-GROUP1", None);
//! release.category = "Movies".to_string();
//!
//! let filter = Filter {
//!     match_categories: "*tv*".to_string(),
//!     ..Filter::new("tv")
//! };
//!
//! let (rejections, matched) = evaluate(&filter, &release);
//! assert!(!matched);
//! assert_eq!(rejections.render(), "category not matching. got: Movies want: *tv*");
//! ```

pub mod cache;
pub mod check;
pub mod engine;
pub mod filter;
pub mod matching;
pub mod rejection;
pub mod wildcard;

pub use cache::PatternCache;
pub use check::{evaluate, evaluate_with};
pub use engine::{FilterEngine, FilterResult};
pub use filter::{Filter, FilterDownloads, MatchLogic, MaxDownloadsUnit};
pub use rejection::{Rejection, Rejections};

/// Deserialize a list of filters from a JSON string.
pub fn filters_from_json(json: &str) -> Result<Vec<Filter>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a list of filters to a pretty-printed JSON string.
pub fn filters_to_json(filters: &[Filter]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(filters)
}
