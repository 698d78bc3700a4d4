use filterbrr_parser::{MapOptions, Normalizer, ParserConfig};
use filterbrr_rules::Filter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub indexers: Vec<IndexerConfig>,

    #[serde(default)]
    pub filters: Vec<Filter>,
}

impl Config {
    /// Settings for `identifier`, if the indexer is configured.
    pub fn indexer(&self, identifier: &str) -> Option<&IndexerConfig> {
        self.indexers
            .iter()
            .find(|i| i.identifier.eq_ignore_ascii_case(identifier))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Seconds a compiled pattern stays cached (0 disables the cache)
    #[serde(default = "default_cache_ttl")]
    pub pattern_cache_ttl_secs: u64,

    /// Maximum number of cached patterns
    #[serde(default = "default_cache_capacity")]
    pub pattern_cache_capacity: usize,

    /// Render rejection reports truncated to 1024 characters
    #[serde(default = "default_true")]
    pub truncate_rejections: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pattern_cache_ttl_secs: default_cache_ttl(),
            pattern_cache_capacity: default_cache_capacity(),
            truncate_rejections: true,
        }
    }
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_cache_capacity() -> usize {
    1024
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexerConfig {
    pub identifier: String,

    /// Announce grammar (`default`, `ggn`, `ops`, `red`); resolved from the
    /// identifier when unset
    #[serde(default)]
    pub normalizer: Option<String>,

    /// Unit appended to sizes announced without one, e.g. "MB"
    #[serde(default)]
    pub force_size_unit: Option<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl IndexerConfig {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            normalizer: None,
            force_size_unit: None,
            enabled: true,
        }
    }

    /// Normalizer for this indexer. An unknown configured name falls back to
    /// the identifier lookup; `validate_config` rejects those up front.
    pub fn normalizer(&self) -> Normalizer {
        self.normalizer
            .as_deref()
            .and_then(Normalizer::from_name)
            .unwrap_or_else(|| Normalizer::for_indexer(&self.identifier))
    }

    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            indexer: self.identifier.clone(),
            force_size_unit: self.force_size_unit.clone(),
        }
    }
}
