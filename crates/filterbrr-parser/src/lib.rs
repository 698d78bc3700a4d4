//! # filterbrr-parser
//!
//! Turns announced release names and tracker tag strings into structured
//! [`Release`] records.
//!
//! ## Quick Start
//!
//! ```
//! use filterbrr_parser::parse_release;
//!
//! let release = parse_release("That Movie 2020 2160p BluRay DD5.1 x264-GROUP1", None);
//!
//! assert_eq!(release.title, "That Movie");
//! assert_eq!(release.year, 2020);
//! assert_eq!(release.resolution, "2160p");
//! assert_eq!(release.group, "GROUP1");
//! ```
//!
//! ## Music tag strings
//!
//! ```
//! use filterbrr_parser::parse_release;
//!
//! let release = parse_release("Artist - Album", Some("FLAC / Lossless / Log / 100% / Cue / CD"));
//! assert_eq!(release.artists, "Artist");
//! assert_eq!(release.log_score, 100);
//! assert!(release.has_cue);
//! ```

pub mod config;
pub mod lexer;
pub mod model;
pub mod normalize;
pub mod release_tags;
pub mod size;
pub mod tags;
pub mod vars;

mod parser;

pub use config::ParserConfig;
pub use model::Release;
pub use normalize::{NormalizeError, Normalized, Normalizer};
pub use release_tags::{clean_release_tags, parse_release_tags, ReleaseTags};
pub use size::{parse_size, SizeError};
pub use tags::{TagCategory, TagDictionary, TagInfo};
pub use vars::{map_vars, AnnounceVars, MapOptions};

/// Parse a release name and optional tracker tag string with default settings.
pub fn parse_release(title: &str, tag_string: Option<&str>) -> Release {
    Parser::default().parse(title, tag_string)
}

/// A configurable release parser bound to a borrowed tag dictionary.
///
/// ```
/// use filterbrr_parser::{Parser, ParserConfig};
///
/// let parser = Parser::new(ParserConfig::builder().detect_music(false).build());
/// let release = parser.parse("Artist - Album 2020 FLAC", None);
/// assert!(release.artists.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'d> {
    config: ParserConfig,
    dict: &'d TagDictionary,
}

impl Parser<'static> {
    /// Create a parser using the process-wide tag dictionary.
    pub fn new(config: ParserConfig) -> Self {
        Self::with_dictionary(config, TagDictionary::global())
    }
}

impl<'d> Parser<'d> {
    /// Create a parser using an explicit tag dictionary.
    pub fn with_dictionary(config: ParserConfig, dict: &'d TagDictionary) -> Self {
        Self { config, dict }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &'d TagDictionary {
        self.dict
    }

    /// Parse a release name into a new [`Release`].
    pub fn parse(&self, title: &str, tag_string: Option<&str>) -> Release {
        let mut release = Release::new(title, tag_string.unwrap_or_default());
        self.parse_into(&mut release);
        release
    }

    /// Parse `release.torrent_name` into `release` in place.
    pub fn parse_into(&self, release: &mut Release) {
        let name = release.torrent_name.clone();
        self.parse_name_into(release, &name);
    }

    /// Parse `name` into `release`, leaving `release.torrent_name` untouched.
    ///
    /// Used when a normalizer rebuilt the name handed to the parser.
    pub fn parse_name_into(&self, release: &mut Release, name: &str) {
        parser::parse_into(release, name, self.dict, &self.config);
    }

    /// Classify a tag string and merge it into `release`.
    pub fn apply_release_tags(&self, release: &mut Release, tag_string: &str) {
        let tags = parse_release_tags(self.dict, tag_string);
        parser::merge_release_tags(release, tags);
    }
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}
