//! Shared builders for integration tests.

#![allow(dead_code)]

use filterbrr::config::{self, Config};
use filterbrr_parser::AnnounceVars;
use filterbrr_rules::Filter;

/// A configuration with two indexers and a small set of filters.
pub const SAMPLE_CONFIG: &str = r#"
[parser]
min_year = 1900
max_year = 2099

[engine]
pattern_cache_ttl_secs = 60
pattern_cache_capacity = 64

[[indexers]]
identifier = "ops"

[[indexers]]
identifier = "tl"
force_size_unit = "MB"

[[filters]]
id = 1
name = "UHD Movies"
priority = 20
match_categories = "Movies*"
resolutions = ["2160p"]
codecs = ["x265"]
max_size = "80GB"

[[filters]]
id = 2
name = "HD TV"
priority = 10
match_categories = "TV*"
resolutions = ["1080p", "720p"]
except_release_groups = "BADGRP"

[[filters]]
id = 3
name = "Perfect FLAC"
priority = 5
indexers = ["ops"]
perfect_flac = true

[[filters]]
id = 4
name = "Disabled"
enabled = false
"#;

pub fn sample_config() -> Config {
    config::parse_config(SAMPLE_CONFIG).expect("sample config is valid")
}

pub fn vars(pairs: &[(&str, &str)]) -> AnnounceVars {
    AnnounceVars::from_iter(pairs.iter().copied())
}

/// A filter accepting 2160p x265 movies under 80 GB.
pub fn uhd_movie_filter() -> Filter {
    Filter {
        id: 1,
        priority: 20,
        match_categories: "Movies*".to_string(),
        resolutions: vec!["2160p".to_string()],
        codecs: vec!["x265".to_string()],
        max_size: "80GB".to_string(),
        ..Filter::new("UHD Movies")
    }
}
