//! The [`Filter`] definition a release is matched against.
//!
//! Every criterion is optional. Empty strings, empty lists, `false` and `0`
//! all mean "no constraint", so `Filter::default()` matches every release.

use filterbrr_common::{Error, Result};
use filterbrr_parser::parse_size;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::matching::split_regex_list;

/// Period a download quota applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaxDownloadsUnit {
    Hour,
    Day,
    Week,
    Month,
    Ever,
}

impl MaxDownloadsUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "HOUR",
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
            Self::Ever => "EVER",
        }
    }
}

impl fmt::Display for MaxDownloadsUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a comma-separated tag list is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchLogic {
    /// At least one entry must match.
    #[default]
    Any,
    /// Every entry must match.
    All,
}

/// Download counts for one filter, supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterDownloads {
    pub hour_count: i32,
    pub day_count: i32,
    pub week_count: i32,
    pub month_count: i32,
    pub total_count: i32,
}

impl FilterDownloads {
    /// Count for the given quota period.
    pub fn count(&self, unit: MaxDownloadsUnit) -> i32 {
        match unit {
            MaxDownloadsUnit::Hour => self.hour_count,
            MaxDownloadsUnit::Day => self.day_count,
            MaxDownloadsUnit::Week => self.week_count,
            MaxDownloadsUnit::Month => self.month_count,
            MaxDownloadsUnit::Ever => self.total_count,
        }
    }
}

/// A user-authored set of criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub id: i64,
    pub name: String,
    pub enabled: bool,
    /// Higher values are evaluated first.
    pub priority: i32,
    /// Indexer identifiers this filter applies to; empty means all.
    pub indexers: Vec<String>,

    // Size, parsed with the size parser ("10 GB", "1.5TB", ...)
    pub min_size: String,
    pub max_size: String,

    // Release name
    pub match_releases: String,
    pub except_releases: String,
    pub use_regex: bool,
    pub match_release_groups: String,
    pub except_release_groups: String,
    pub match_release_tags: String,
    pub except_release_tags: String,
    pub use_regex_release_tags: bool,
    pub match_description: String,
    pub except_description: String,
    pub use_regex_description: bool,

    // Tracker context
    pub match_categories: String,
    pub except_categories: String,
    pub match_uploaders: String,
    pub except_uploaders: String,
    pub scene: bool,
    pub origins: Vec<String>,
    pub except_origins: Vec<String>,
    pub freeleech: bool,
    pub freeleech_percent: String,
    pub bonus: Vec<String>,
    pub min_seeders: i32,
    pub max_seeders: i32,
    pub min_leechers: i32,
    pub max_leechers: i32,

    // Video
    pub resolutions: Vec<String>,
    pub sources: Vec<String>,
    pub codecs: Vec<String>,
    pub containers: Vec<String>,
    pub match_hdr: Vec<String>,
    pub except_hdr: Vec<String>,
    pub match_other: Vec<String>,
    pub except_other: Vec<String>,
    pub match_language: Vec<String>,
    pub except_language: Vec<String>,

    // TV / movies, int range syntax ("1,3-5")
    pub shows: String,
    pub years: String,
    pub months: String,
    pub days: String,
    pub seasons: String,
    pub episodes: String,
    pub match_release_types: Vec<String>,
    pub except_release_types: Vec<String>,

    // Tags
    pub tags: String,
    pub except_tags: String,
    pub tags_match_logic: MatchLogic,
    pub except_tags_match_logic: MatchLogic,
    pub tags_any: String,
    pub except_tags_any: String,

    // Music
    pub artists: String,
    pub albums: String,
    pub formats: Vec<String>,
    pub quality: Vec<String>,
    pub media: Vec<String>,
    pub log: bool,
    pub log_score: i32,
    pub cue: bool,
    pub perfect_flac: bool,

    // Quota
    pub max_downloads: i32,
    pub max_downloads_unit: Option<MaxDownloadsUnit>,
    /// Counter snapshot injected at evaluation time, never persisted.
    #[serde(skip)]
    pub downloads: Option<FilterDownloads>,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            enabled: true,
            priority: 0,
            indexers: Vec::new(),
            min_size: String::new(),
            max_size: String::new(),
            match_releases: String::new(),
            except_releases: String::new(),
            use_regex: false,
            match_release_groups: String::new(),
            except_release_groups: String::new(),
            match_release_tags: String::new(),
            except_release_tags: String::new(),
            use_regex_release_tags: false,
            match_description: String::new(),
            except_description: String::new(),
            use_regex_description: false,
            match_categories: String::new(),
            except_categories: String::new(),
            match_uploaders: String::new(),
            except_uploaders: String::new(),
            scene: false,
            origins: Vec::new(),
            except_origins: Vec::new(),
            freeleech: false,
            freeleech_percent: String::new(),
            bonus: Vec::new(),
            min_seeders: 0,
            max_seeders: 0,
            min_leechers: 0,
            max_leechers: 0,
            resolutions: Vec::new(),
            sources: Vec::new(),
            codecs: Vec::new(),
            containers: Vec::new(),
            match_hdr: Vec::new(),
            except_hdr: Vec::new(),
            match_other: Vec::new(),
            except_other: Vec::new(),
            match_language: Vec::new(),
            except_language: Vec::new(),
            shows: String::new(),
            years: String::new(),
            months: String::new(),
            days: String::new(),
            seasons: String::new(),
            episodes: String::new(),
            match_release_types: Vec::new(),
            except_release_types: Vec::new(),
            tags: String::new(),
            except_tags: String::new(),
            tags_match_logic: MatchLogic::Any,
            except_tags_match_logic: MatchLogic::Any,
            tags_any: String::new(),
            except_tags_any: String::new(),
            artists: String::new(),
            albums: String::new(),
            formats: Vec::new(),
            quality: Vec::new(),
            media: Vec::new(),
            log: false,
            log_score: 0,
            cue: false,
            perfect_flac: false,
            max_downloads: 0,
            max_downloads_unit: None,
            downloads: None,
        }
    }
}

impl Filter {
    /// Create an enabled filter with no criteria.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether this filter applies to announces from `indexer`.
    pub fn applies_to(&self, indexer: &str) -> bool {
        self.indexers.is_empty() || self.indexers.iter().any(|i| i.eq_ignore_ascii_case(indexer))
    }

    /// Check the definition for values that can never be evaluated.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::config("filter has no name"));
        }
        for (field, value) in [("min_size", &self.min_size), ("max_size", &self.max_size)] {
            if !value.is_empty() {
                parse_size(value).map_err(|e| {
                    Error::config(format!("filter '{}': invalid {}: {}", self.name, field, e))
                })?;
            }
        }
        if self.max_downloads > 0 && self.max_downloads_unit.is_none() {
            return Err(Error::config(format!(
                "filter '{}': max_downloads requires max_downloads_unit",
                self.name
            )));
        }
        Ok(())
    }

    /// Regex-mode patterns that fail to compile, as `(field, pattern, error)`.
    pub fn invalid_regexes(&self) -> Vec<(&'static str, String, String)> {
        let fields = [
            (self.use_regex, "match_releases", &self.match_releases),
            (self.use_regex, "except_releases", &self.except_releases),
            (self.use_regex_release_tags, "match_release_tags", &self.match_release_tags),
            (self.use_regex_release_tags, "except_release_tags", &self.except_release_tags),
            (self.use_regex_description, "match_description", &self.match_description),
            (self.use_regex_description, "except_description", &self.except_description),
        ];

        let mut invalid = Vec::new();
        for (enabled, field, list) in fields {
            if !enabled {
                continue;
            }
            for pattern in split_regex_list(list) {
                if let Err(err) = regex::Regex::new(&format!("(?i)(?:{pattern})")) {
                    invalid.push((field, pattern, err.to_string()));
                }
            }
        }
        invalid
    }
}
