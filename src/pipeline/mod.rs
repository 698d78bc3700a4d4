//! Announce pipeline: map announce variables, normalize, parse, then
//! evaluate every enabled filter.

use std::sync::Arc;

use chrono::Utc;
use filterbrr_common::{Error, Result};
use filterbrr_parser::{map_vars, AnnounceVars, NormalizeError, Parser, Release};
use filterbrr_rules::{Filter, FilterDownloads, FilterEngine, FilterResult, PatternCache, Rejections};

use crate::config::{Config, IndexerConfig};

/// A parsed announce and the verdict of every applicable filter, in
/// priority order.
#[derive(Debug, Clone)]
pub struct Announce {
    pub release: Release,
    pub results: Vec<FilterResult>,
}

impl Announce {
    /// Results of the filters that accepted the release.
    pub fn matched(&self) -> impl Iterator<Item = &FilterResult> {
        self.results.iter().filter(|r| r.matched)
    }

    /// The highest-priority filter that accepted the release.
    pub fn first_match(&self) -> Option<&FilterResult> {
        self.matched().next()
    }
}

/// Turns announce variables into evaluated releases.
#[derive(Debug, Clone)]
pub struct Pipeline {
    parser: Parser<'static>,
    engine: FilterEngine,
    indexers: Vec<IndexerConfig>,
    truncate_rejections: bool,
}

impl Pipeline {
    pub fn new(config: &Config) -> Self {
        let cache = Arc::new(PatternCache::new(
            config.engine.pattern_cache_capacity,
            config.engine.pattern_cache_ttl_secs,
        ));
        Self {
            parser: Parser::new(config.parser.clone()),
            engine: FilterEngine::with_cache(config.filters.clone(), cache),
            indexers: config.indexers.clone(),
            truncate_rejections: config.engine.truncate_rejections,
        }
    }

    /// Build a pipeline over `filters` with default settings.
    pub fn with_filters(filters: Vec<Filter>) -> Self {
        Self::new(&Config {
            filters,
            ..Config::default()
        })
    }

    pub fn parser(&self) -> &Parser<'static> {
        &self.parser
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    /// Settings for `identifier`. Unconfigured indexers get defaults.
    pub fn indexer(&self, identifier: &str) -> IndexerConfig {
        self.indexers
            .iter()
            .find(|i| i.identifier.eq_ignore_ascii_case(identifier))
            .cloned()
            .unwrap_or_else(|| IndexerConfig::new(identifier))
    }

    /// Map, normalize and parse an announce from `indexer` into a release.
    pub fn build_release(&self, indexer: &str, vars: &AnnounceVars) -> Result<Release> {
        let settings = self.indexer(indexer);
        if !settings.enabled {
            return Err(Error::invalid_input(format!(
                "indexer '{}' is disabled",
                settings.identifier
            )));
        }

        let mut release = Release {
            indexer: settings.identifier.clone(),
            timestamp: Some(Utc::now()),
            ..Release::default()
        };
        map_vars(&mut release, vars, &settings.map_options()).map_err(normalize_error)?;

        let normalizer = settings.normalizer();
        let normalized = normalizer
            .normalize(vars, self.parser.dictionary())
            .map_err(normalize_error)?;

        if let Some(tags) = normalized.release_tags {
            release.release_tags = tags;
        }

        if vars.get("torrentName") == Some(normalized.release_name.as_str()) {
            self.parser.parse_into(&mut release);
        } else {
            // The announced title describes the raw name, not the rebuilt one
            release.title.clear();
            release.artists.clear();
            tracing::trace!(
                normalizer = %normalizer,
                name = %normalized.release_name,
                "parsing rebuilt release name"
            );
            self.parser.parse_name_into(&mut release, &normalized.release_name);
        }

        if let Some(title) = normalized.title {
            release.title = title;
        }

        Ok(release)
    }

    /// Process an announce using the download counters stored on each filter.
    pub fn process(&self, indexer: &str, vars: &AnnounceVars) -> Result<Announce> {
        self.process_with(indexer, vars, |_| None)
    }

    /// Process an announce, asking `downloads` for each filter's counters.
    pub fn process_with<D>(&self, indexer: &str, vars: &AnnounceVars, downloads: D) -> Result<Announce>
    where
        D: Fn(&Filter) -> Option<FilterDownloads> + Sync,
    {
        let release = self.build_release(indexer, vars)?;
        let results = self.engine.evaluate_all(&release, downloads);

        match results.iter().find(|r| r.matched) {
            Some(hit) => tracing::info!(
                indexer = %release.indexer,
                release = %release.torrent_name,
                filter = %hit.filter_name,
                "release matched filter"
            ),
            None => tracing::debug!(
                indexer = %release.indexer,
                release = %release.torrent_name,
                filters = results.len(),
                "no filter matched"
            ),
        }

        Ok(Announce { release, results })
    }

    /// Render a rejection ledger the way reports show it.
    pub fn render_rejections(&self, rejections: &Rejections) -> String {
        if self.truncate_rejections {
            rejections.render_truncated()
        } else {
            rejections.render()
        }
    }
}

fn normalize_error(err: NormalizeError) -> Error {
    Error::normalize(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn vars(pairs: &[(&str, &str)]) -> AnnounceVars {
        AnnounceVars::from_iter(pairs.iter().copied())
    }

    #[test]
    fn test_build_release_default_normalizer() {
        let pipeline = Pipeline::with_filters(vec![]);
        let release = pipeline
            .build_release(
                "tracker",
                &vars(&[
                    ("torrentName", "The.Matrix.1999.1080p.BluRay.x264-GROUP"),
                    ("category", "Movies"),
                    ("torrentSize", "10 GB"),
                ]),
            )
            .unwrap();
        assert_eq!(release.indexer, "tracker");
        assert_eq!(release.title, "The Matrix");
        assert_eq!(release.category, "Movies");
        assert_eq!(release.size, 10 * 1024 * 1024 * 1024);
        assert!(release.timestamp.is_some());
    }

    #[test]
    fn test_missing_torrent_name_is_normalize_error() {
        let pipeline = Pipeline::with_filters(vec![]);
        let result = pipeline.build_release("tracker", &vars(&[("category", "Movies")]));
        assert_matches!(result, Err(Error::Normalize(_)));
    }

    #[test]
    fn test_disabled_indexer_rejected() {
        let mut indexer = IndexerConfig::new("off");
        indexer.enabled = false;
        let pipeline = Pipeline::new(&Config {
            indexers: vec![indexer],
            ..Config::default()
        });
        let result = pipeline.build_release("off", &vars(&[("torrentName", "X")]));
        assert_matches!(result, Err(Error::InvalidInput(_)));
    }

    #[test]
    fn test_first_match_follows_priority() {
        let low = Filter {
            priority: 1,
            ..Filter::new("low")
        };
        let high = Filter {
            priority: 9,
            ..Filter::new("high")
        };
        let pipeline = Pipeline::with_filters(vec![low, high]);
        let announce = pipeline
            .process("tracker", &vars(&[("torrentName", "Some.Show.S01E01.720p.HDTV.x264-GRP")]))
            .unwrap();
        assert_eq!(announce.matched().count(), 2);
        assert_eq!(announce.first_match().unwrap().filter_name, "high");
    }

    #[test]
    fn test_render_respects_truncation_setting() {
        let rejections = Rejections::new();
        rejections.add("size", "x".repeat(2000), "small");

        let mut config = Config::default();
        let truncated = Pipeline::new(&config).render_rejections(&rejections);
        config.engine.truncate_rejections = false;
        let full = Pipeline::new(&config).render_rejections(&rejections);

        assert!(truncated.len() < full.len());
        assert!(!truncated.contains(&"x".repeat(1025)));
        assert!(full.contains(&"x".repeat(2000)));
    }
}
