//! The [`FilterEngine`] evaluates releases against a priority-ordered set of filters.

use filterbrr_parser::Release;
use rayon::prelude::*;
use std::sync::Arc;

use crate::cache::PatternCache;
use crate::check::evaluate_with;
use crate::filter::{Filter, FilterDownloads};
use crate::rejection::Rejections;

/// Outcome of evaluating one filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult {
    pub filter_id: i64,
    pub filter_name: String,
    pub priority: i32,
    pub matched: bool,
    pub rejections: Rejections,
}

/// Holds enabled filters sorted by priority, highest first.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    filters: Vec<Filter>,
    cache: Arc<PatternCache>,
}

impl FilterEngine {
    /// Create an engine over the enabled `filters`, using a fresh pattern cache.
    pub fn new(filters: Vec<Filter>) -> Self {
        Self::with_cache(filters, Arc::new(PatternCache::default()))
    }

    /// Create an engine sharing an existing pattern cache.
    pub fn with_cache(filters: Vec<Filter>, cache: Arc<PatternCache>) -> Self {
        let mut filters: Vec<Filter> = filters.into_iter().filter(|f| f.enabled).collect();
        // Stable sort keeps definition order among equal priorities
        filters.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self { filters, cache }
    }

    /// Return a reference to the internal filters slice.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filters that apply to announces from `indexer`, in priority order.
    pub fn applicable<'a>(&'a self, indexer: &'a str) -> impl Iterator<Item = &'a Filter> + 'a {
        self.filters.iter().filter(move |f| f.applies_to(indexer))
    }

    /// Evaluate every applicable filter in parallel.
    ///
    /// `downloads` supplies the counter snapshot for a filter; when it returns
    /// `None` the snapshot stored on the filter is used. Results keep
    /// priority order.
    pub fn evaluate_all<D>(&self, release: &Release, downloads: D) -> Vec<FilterResult>
    where
        D: Fn(&Filter) -> Option<FilterDownloads> + Sync,
    {
        let filters: Vec<&Filter> = self.applicable(&release.indexer).collect();
        let results: Vec<FilterResult> = filters
            .par_iter()
            .map(|filter| self.evaluate_one(filter, release, &downloads))
            .collect();

        tracing::debug!(
            release = %release.torrent_name,
            filters = results.len(),
            matched = results.iter().filter(|r| r.matched).count(),
            "evaluated filters"
        );
        results
    }

    /// Return the highest-priority filter that matches `release`.
    pub fn find_first_match<D>(&self, release: &Release, downloads: D) -> Option<FilterResult>
    where
        D: Fn(&Filter) -> Option<FilterDownloads>,
    {
        self.applicable(&release.indexer)
            .map(|filter| self.evaluate_one(filter, release, &downloads))
            .find(|result| result.matched)
    }

    fn evaluate_one<D>(&self, filter: &Filter, release: &Release, downloads: &D) -> FilterResult
    where
        D: Fn(&Filter) -> Option<FilterDownloads>,
    {
        let snapshot = downloads(filter).or(filter.downloads);
        let (rejections, matched) = evaluate_with(filter, release, snapshot.as_ref(), &self.cache);
        if !matched {
            tracing::debug!(
                filter = %filter.name,
                release = %release.torrent_name,
                reasons = %rejections.render_truncated(),
                "filter rejected release"
            );
        }
        FilterResult {
            filter_id: filter.id,
            filter_name: filter.name.clone(),
            priority: filter.priority,
            matched,
            rejections,
        }
    }
}
