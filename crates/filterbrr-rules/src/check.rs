//! Evaluation of one [`Filter`] against one parsed [`Release`].
//!
//! Every criterion is checked, in a fixed order, and each failing criterion
//! adds exactly one entry to the ledger. Nothing returns early, so the
//! rejections always explain every reason a release was turned down.

use filterbrr_parser::{parse_size, Release};

use crate::cache::PatternCache;
use crate::filter::{Filter, FilterDownloads, MatchLogic};
use crate::matching::{
    check_freeleech_percent, contains, contains_all, contains_any, contains_bounded,
    contains_fuzzy, contains_int_strings, contains_match_basic, contains_slice, match_hdr,
    match_regex, slice_contains_slice, split_csv,
};
use crate::rejection::{display_list, Rejections};
use crate::wildcard::is_wildcard;

/// Qualities accepted by the perfect FLAC shortcut.
const PERFECT_FLAC_QUALITY: &[&str] = &["Lossless", "24bit Lossless"];

/// Evaluate `filter` against `release`.
///
/// Uses the counter snapshot stored on the filter and the process-wide
/// pattern cache. `matched` is true exactly when no rejection was recorded.
/// The `enabled` flag is not consulted; callers skip disabled filters.
pub fn evaluate(filter: &Filter, release: &Release) -> (Rejections, bool) {
    evaluate_with(filter, release, filter.downloads.as_ref(), PatternCache::global())
}

/// Evaluate with an explicit counter snapshot and pattern cache.
pub fn evaluate_with(
    filter: &Filter,
    release: &Release,
    downloads: Option<&FilterDownloads>,
    cache: &PatternCache,
) -> (Rejections, bool) {
    let check = Check {
        filter,
        release,
        cache,
        rejections: Rejections::new(),
    };

    check.size();
    check.categories();
    check.release_name();
    check.release_group();
    check.freeleech();
    check.scene();
    check.origins();
    check.video();
    check.hdr();
    check.other();
    check.ranges();
    check.names();
    check.release_types();
    check.uploaders();
    check.tags();
    check.music();
    check.peers();
    check.downloads(downloads);

    let matched = check.rejections.is_empty();
    tracing::trace!(
        filter = %filter.name,
        release = %release.torrent_name,
        matched,
        rejections = check.rejections.len(),
        "evaluated filter"
    );
    (check.rejections, matched)
}

struct Check<'a> {
    filter: &'a Filter,
    release: &'a Release,
    cache: &'a PatternCache,
    rejections: Rejections,
}

impl Check<'_> {
    fn size(&self) {
        let (f, r) = (self.filter, self.release);
        if (f.min_size.is_empty() && f.max_size.is_empty()) || r.size == 0 {
            return;
        }

        let bound = |value: &str| -> Result<Option<u64>, String> {
            if value.is_empty() {
                return Ok(None);
            }
            parse_size(value).map(Some).map_err(|e| e.to_string())
        };

        let (min, max) = match (bound(&f.min_size), bound(&f.max_size)) {
            (Ok(min), Ok(max)) => (min, max),
            (Err(err), _) | (_, Err(err)) => {
                tracing::debug!(filter = %f.name, error = %err, "unparsable size bound");
                self.rejections.addf(
                    "size",
                    "size: error checking release size against filter: {want}",
                    r.size,
                    err,
                );
                return;
            }
        };

        let too_small = min.is_some_and(|min| r.size <= min);
        let too_large = max.is_some_and(|max| r.size >= max);
        if too_small || too_large {
            self.rejections.addf(
                "size",
                "size not matching. got: {got} want {want}",
                r.size,
                format!("min: {} max: {}", f.min_size, f.max_size),
            );
        }
    }

    fn categories(&self) {
        let (f, r, c) = (self.filter, self.release, self.cache);
        if f.match_categories.is_empty() && f.except_categories.is_empty() {
            return;
        }
        let categories: Vec<&str> = r.all_categories().collect();

        if !f.match_categories.is_empty()
            && !contains(c, &r.category, &f.match_categories)
            && !contains_any(c, &categories, &f.match_categories)
        {
            self.rejections.addf(
                "category",
                "category not matching. got: {got} want: {want}",
                categories.join(","),
                &f.match_categories,
            );
        }

        if !f.except_categories.is_empty()
            && contains(c, &r.category, &f.except_categories)
            && contains_any(c, &categories, &f.except_categories)
        {
            self.rejections.addf(
                "except_category",
                "category unwanted. got: {got} unwanted: {want}",
                categories.join(","),
                &f.except_categories,
            );
        }
    }

    fn release_name(&self) {
        let f = self.filter;
        let r = self.release;
        self.text_criterion(
            "match_releases",
            "release",
            &r.torrent_name,
            &f.match_releases,
            &f.except_releases,
            f.use_regex,
        );
        self.text_criterion(
            "match_release_tags",
            "release tags",
            &r.release_tags,
            &f.match_release_tags,
            &f.except_release_tags,
            f.use_regex_release_tags,
        );
        self.text_criterion(
            "match_description",
            "description",
            &r.description,
            &f.match_description,
            &f.except_description,
            f.use_regex_description,
        );
    }

    /// Match/except pair over free text, either fuzzy wildcard or regex.
    fn text_criterion(
        &self,
        key: &str,
        label: &str,
        text: &str,
        want: &str,
        unwanted: &str,
        use_regex: bool,
    ) {
        let c = self.cache;
        let (mode, matches): (&str, fn(&PatternCache, &str, &str) -> bool) = if use_regex {
            (" regex", match_regex)
        } else {
            ("", contains_fuzzy)
        };

        if !want.is_empty() && !matches(c, text, want) {
            self.rejections.addf(
                key,
                format!("match {label}{mode} not matching. got: {{got}} want: {{want}}"),
                text,
                want,
            );
        }
        if !unwanted.is_empty() && matches(c, text, unwanted) {
            self.rejections.addf(
                &key.replacen("match", "except", 1),
                format!("except {label}{mode}: unwanted. got: {{got}} unwanted: {{want}}"),
                text,
                unwanted,
            );
        }
    }

    fn release_group(&self) {
        let (f, r) = (self.filter, self.release);
        if !f.match_release_groups.is_empty() && !self.group_matches(&f.match_release_groups) {
            self.rejections.addf(
                "match_release_groups",
                "release groups not matching. got: {got} want: {want}",
                &r.group,
                &f.match_release_groups,
            );
        }
        if !f.except_release_groups.is_empty() && self.group_matches(&f.except_release_groups) {
            self.rejections.addf(
                "except_release_groups",
                "unwanted release group. got: {got} unwanted: {want}",
                &r.group,
                &f.except_release_groups,
            );
        }
    }

    /// Parsed group first; without one, a literal group must appear in the
    /// name at token boundaries.
    fn group_matches(&self, groups: &str) -> bool {
        let r = self.release;
        if contains(self.cache, &r.group, groups) {
            return true;
        }
        r.group.is_empty()
            && split_csv(groups)
                .into_iter()
                .filter(|g| !is_wildcard(g))
                .any(|g| contains_bounded(&r.torrent_name, g))
    }

    fn freeleech(&self) {
        let (f, r) = (self.filter, self.release);
        if f.freeleech && !r.freeleech {
            self.rejections.addf("freeleech", "wanted: freeleech", r.freeleech, f.freeleech);
        }
        if !f.freeleech_percent.is_empty()
            && !check_freeleech_percent(r.freeleech_percent, &f.freeleech_percent)
        {
            self.rejections.addf(
                "freeleech_percent",
                "freeleech percent not matching. got: {got} want: {want}",
                r.freeleech_percent,
                &f.freeleech_percent,
            );
        }
        if !f.bonus.is_empty() && !slice_contains_slice(&r.bonus, &f.bonus) {
            self.rejections.addf(
                "bonus",
                "bonus not matching. got: {got} want: {want}",
                display_list(&r.bonus),
                display_list(&f.bonus),
            );
        }
    }

    fn scene(&self) {
        let (f, r) = (self.filter, self.release);
        if f.scene && !r.origin.eq_ignore_ascii_case("SCENE") {
            self.rejections.addf("scene", "wanted: scene. got: {got}", &r.origin, "SCENE");
        }
    }

    fn origins(&self) {
        let (f, r, c) = (self.filter, self.release, self.cache);
        if !f.origins.is_empty() && !contains_slice(c, &r.origin, &f.origins) {
            self.rejections.addf(
                "origins",
                "origin not matching. got: {got} want: {want}",
                &r.origin,
                display_list(&f.origins),
            );
        }
        if !f.except_origins.is_empty() && contains_slice(c, &r.origin, &f.except_origins) {
            self.rejections.addf(
                "except_origins",
                "except origin not matching. got: {got} unwanted: {want}",
                &r.origin,
                display_list(&f.except_origins),
            );
        }
    }

    fn video(&self) {
        let (f, r, c) = (self.filter, self.release, self.cache);
        if !f.resolutions.is_empty() && !contains_slice(c, &r.resolution, &f.resolutions) {
            self.rejections.addf(
                "resolutions",
                "resolution not matching. got: {got} want: {want}",
                &r.resolution,
                display_list(&f.resolutions),
            );
        }
        if !f.sources.is_empty() && !contains_slice(c, &r.source, &f.sources) {
            self.rejections.addf(
                "sources",
                "source not matching. got: {got} want: {want}",
                &r.source,
                display_list(&f.sources),
            );
        }
        if !f.codecs.is_empty() && !slice_contains_slice(&r.codec, &f.codecs) {
            self.rejections.addf(
                "codecs",
                "codec not matching. got: {got} want: {want}",
                display_list(&r.codec),
                display_list(&f.codecs),
            );
        }
        if !f.containers.is_empty() && !contains_slice(c, &r.container, &f.containers) {
            self.rejections.addf(
                "containers",
                "container not matching. got: {got} want: {want}",
                &r.container,
                display_list(&f.containers),
            );
        }
    }

    fn hdr(&self) {
        let (f, r) = (self.filter, self.release);
        if !f.match_hdr.is_empty() && !match_hdr(&r.hdr, &f.match_hdr) {
            self.rejections.addf(
                "match_hdr",
                "hdr not matching. got: {got} want: {want}",
                display_list(&r.hdr),
                display_list(&f.match_hdr),
            );
        }
        if !f.except_hdr.is_empty() && match_hdr(&r.hdr, &f.except_hdr) {
            self.rejections.addf(
                "except_hdr",
                "hdr unwanted. got: {got} unwanted: {want}",
                display_list(&r.hdr),
                display_list(&f.except_hdr),
            );
        }
    }

    fn other(&self) {
        let (f, r) = (self.filter, self.release);
        let pairs = [
            ("other", &r.other, &f.match_other, &f.except_other),
            ("language", &r.language, &f.match_language, &f.except_language),
        ];
        for (label, got, want, unwanted) in pairs {
            if !want.is_empty() && !slice_contains_slice(got, want) {
                self.rejections.addf(
                    &format!("match_{label}"),
                    format!("{label} not matching. got: {{got}} want: {{want}}"),
                    display_list(got),
                    display_list(want),
                );
            }
            if !unwanted.is_empty() && slice_contains_slice(got, unwanted) {
                self.rejections.addf(
                    &format!("except_{label}"),
                    format!("{label} unwanted. got: {{got}} unwanted: {{want}}"),
                    display_list(got),
                    display_list(unwanted),
                );
            }
        }
    }

    fn ranges(&self) {
        let (f, r) = (self.filter, self.release);
        let ranges = [
            ("years", "year", r.year, &f.years),
            ("months", "month", r.month, &f.months),
            ("days", "day", r.day, &f.days),
            ("seasons", "season", r.season, &f.seasons),
            ("episodes", "episode", r.episode, &f.episodes),
        ];
        for (key, label, value, want) in ranges {
            if !want.is_empty() && !contains_int_strings(value, want) {
                self.rejections.addf(
                    key,
                    format!("{label} not matching. got: {{got}} want: {{want}}"),
                    value,
                    want,
                );
            }
        }
    }

    fn names(&self) {
        let (f, r, c) = (self.filter, self.release, self.cache);
        let names = [
            ("shows", &r.title, &f.shows),
            ("artists", &r.artists, &f.artists),
            ("albums", &r.title, &f.albums),
        ];
        for (key, got, want) in names {
            if !want.is_empty() && !contains(c, got, want) {
                self.rejections.addf(
                    key,
                    format!("{key} not matching. got: {{got}} want: {{want}}"),
                    got,
                    want,
                );
            }
        }
    }

    fn release_types(&self) {
        let (f, r, c) = (self.filter, self.release, self.cache);
        let got = r.release_type.as_str();
        if !f.match_release_types.is_empty() && !contains_slice(c, got, &f.match_release_types) {
            self.rejections.addf(
                "match_release_types",
                "release type not matching. got: {got} want: {want}",
                got,
                display_list(&f.match_release_types),
            );
        }
        if !f.except_release_types.is_empty() && contains_slice(c, got, &f.except_release_types) {
            self.rejections.addf(
                "except_release_types",
                "release type unwanted. got: {got} unwanted: {want}",
                got,
                display_list(&f.except_release_types),
            );
        }
    }

    fn uploaders(&self) {
        let (f, r, c) = (self.filter, self.release, self.cache);
        if !f.match_uploaders.is_empty() && !contains(c, &r.uploader, &f.match_uploaders) {
            self.rejections.addf(
                "match_uploaders",
                "uploaders not matching. got: {got} want: {want}",
                &r.uploader,
                &f.match_uploaders,
            );
        }
        if !f.except_uploaders.is_empty() && contains(c, &r.uploader, &f.except_uploaders) {
            self.rejections.addf(
                "except_uploaders",
                "unwanted uploaders. got: {got} unwanted: {want}",
                &r.uploader,
                &f.except_uploaders,
            );
        }
    }

    fn tags(&self) {
        let (f, r, c) = (self.filter, self.release, self.cache);
        let got = || display_list(&r.tags);

        if !f.tags.is_empty() {
            let (ok, format) = match f.tags_match_logic {
                MatchLogic::All => (
                    contains_all(c, &r.tags, &f.tags),
                    "tags not matching. got: {got} want(all): {want}",
                ),
                MatchLogic::Any => (
                    contains_any(c, &r.tags, &f.tags),
                    "tags not matching. got: {got} want: {want}",
                ),
            };
            if !ok {
                self.rejections.addf("tags", format, got(), &f.tags);
            }
        }

        if !f.except_tags.is_empty() {
            let unwanted = match f.except_tags_match_logic {
                MatchLogic::All => contains_all(c, &r.tags, &f.except_tags),
                MatchLogic::Any => contains_any(c, &r.tags, &f.except_tags),
            };
            if unwanted {
                self.rejections.addf(
                    "except_tags",
                    "tags unwanted. got: {got} don't want: {want}",
                    got(),
                    &f.except_tags,
                );
            }
        }

        if !f.tags_any.is_empty() && !contains_any(c, &r.tags, &f.tags_any) {
            self.rejections.addf(
                "tags_any",
                "tags any not matching. got: {got} want: {want}",
                got(),
                &f.tags_any,
            );
        }

        if !f.except_tags_any.is_empty() && contains_any(c, &r.tags, &f.except_tags_any) {
            self.rejections.addf(
                "except_tags_any",
                "tags any unwanted. got: {got} don't want: {want}",
                got(),
                &f.except_tags_any,
            );
        }
    }

    fn music(&self) {
        let (f, r, c) = (self.filter, self.release, self.cache);

        if f.perfect_flac {
            if !is_perfect_flac(r) {
                self.rejections.addf(
                    "perfect_flac",
                    "wanted: perfect flac. got: {got}",
                    display_list(&r.audio),
                    "perfect flac",
                );
            }
            return;
        }

        if !f.formats.is_empty() {
            let formats = with_scalar(&r.audio, &r.audio_format);
            if !slice_contains_slice(&formats, &f.formats) {
                self.rejections.addf(
                    "formats",
                    "formats not matching. got: {got} want: {want}",
                    display_list(&formats),
                    display_list(&f.formats),
                );
            }
        }

        if !f.quality.is_empty() {
            let quality = with_scalar(&r.audio, &r.bitrate);
            if !contains_match_basic(&quality, &f.quality) {
                self.rejections.addf(
                    "quality",
                    "quality not matching. got: {got} want: {want}",
                    display_list(&quality),
                    display_list(&f.quality),
                );
            }
        }

        if !f.media.is_empty() && !contains_slice(c, &r.source, &f.media) {
            self.rejections.addf(
                "media",
                "media not matching. got: {got} want: {want}",
                &r.source,
                display_list(&f.media),
            );
        }

        if f.log {
            if !has_log(r) {
                self.rejections.addf("log", "wanted: log", r.has_log, f.log);
            }
            if f.log_score != 0 && r.log_score < f.log_score {
                self.rejections.addf(
                    "log_score",
                    "log score. got: {got} want: {want}",
                    r.log_score,
                    f.log_score,
                );
            }
        }

        if f.cue && !has_cue(r) {
            self.rejections.addf("cue", "wanted: cue", r.has_cue, f.cue);
        }
    }

    fn peers(&self) {
        let (f, r) = (self.filter, self.release);
        let limits = [
            ("min_seeders", f.min_seeders, r.seeders, r.seeders < f.min_seeders),
            ("max_seeders", f.max_seeders, r.seeders, r.seeders > f.max_seeders),
            ("min_leechers", f.min_leechers, r.leechers, r.leechers < f.min_leechers),
            ("max_leechers", f.max_leechers, r.leechers, r.leechers > f.max_leechers),
        ];
        for (key, limit, got, outside) in limits {
            if limit > 0 && outside {
                self.rejections.addf(
                    key,
                    format!("{} not matching. got: {{got}} want: {{want}}", key.replace('_', " ")),
                    got,
                    limit,
                );
            }
        }
    }

    fn downloads(&self, downloads: Option<&FilterDownloads>) {
        let f = self.filter;
        if f.max_downloads <= 0 {
            return;
        }

        let unit = f
            .max_downloads_unit
            .map(|u| u.as_str())
            .unwrap_or("UNSET");
        let count = match (downloads, f.max_downloads_unit) {
            (Some(d), Some(u)) => Some(d.count(u)),
            _ => None,
        };

        if count.map_or(true, |n| n >= f.max_downloads) {
            self.rejections.addf(
                "max_downloads",
                format!("max downloads ({{want}}) this ({unit}) reached. got: {{got}}"),
                count.map_or_else(|| "unknown".to_string(), |n| n.to_string()),
                f.max_downloads,
            );
        }
    }
}

fn with_scalar(list: &[String], scalar: &str) -> Vec<String> {
    let mut out = list.to_vec();
    if !scalar.is_empty() && !out.iter().any(|v| v.eq_ignore_ascii_case(scalar)) {
        out.push(scalar.to_string());
    }
    out
}

fn has_log(r: &Release) -> bool {
    r.has_log || r.has_audio("Log")
}

fn has_cue(r: &Release) -> bool {
    r.has_cue || r.has_audio("Cue")
}

/// FLAC, lossless quality, a log scoring 100 and a cue file.
fn is_perfect_flac(r: &Release) -> bool {
    let flac = r.audio_format.eq_ignore_ascii_case("FLAC") || r.has_audio("FLAC");
    let lossless = contains_match_basic(&with_scalar(&r.audio, &r.bitrate), PERFECT_FLAC_QUALITY);
    flac && lossless && has_log(r) && r.log_score >= 100 && has_cue(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::MaxDownloadsUnit;
    use filterbrr_parser::parse_release;

    fn movie() -> Release {
        let mut release = parse_release("That Movie 2020 2160p BluRay DD5.1 x264-GROUP1", None);
        release.category = "Movies".to_string();
        release.freeleech = true;
        release.size = 30_000_000_001;
        release
    }

    fn movie_filter() -> Filter {
        Filter {
            name: "4k".to_string(),
            match_categories: "Movies".to_string(),
            freeleech: true,
            min_size: "10 GB".to_string(),
            max_size: "40 GB".to_string(),
            resolutions: vec!["2160p".to_string()],
            sources: vec!["BluRay".to_string()],
            codecs: vec!["x264".to_string()],
            years: "2020".to_string(),
            match_release_groups: "GROUP1".to_string(),
            ..Filter::default()
        }
    }

    fn run(filter: &Filter, release: &Release) -> (Rejections, bool) {
        evaluate_with(filter, release, filter.downloads.as_ref(), &PatternCache::disabled())
    }

    #[test]
    fn test_end_to_end_match() {
        let (rejections, matched) = run(&movie_filter(), &movie());
        assert!(matched, "unexpected rejections: {}", rejections);
        assert!(rejections.is_empty());
    }

    #[test]
    fn test_end_to_end_category_rejection() {
        let filter = Filter {
            match_categories: "*tv*".to_string(),
            ..movie_filter()
        };
        let (rejections, matched) = run(&filter, &movie());
        assert!(!matched);
        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections.render(), "category not matching. got: Movies want: *tv*");
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = Filter::default();
        for release in [movie(), Release::default(), parse_release("Artist - Album", None)] {
            let (rejections, matched) = run(&filter, &release);
            assert!(matched);
            assert!(rejections.is_empty());
        }
    }

    #[test]
    fn test_no_early_return() {
        let filter = Filter {
            match_categories: "*tv*".to_string(),
            resolutions: vec!["720p".to_string()],
            years: "1999".to_string(),
            ..movie_filter()
        };
        let (rejections, matched) = run(&filter, &movie());
        assert!(!matched);
        assert_eq!(rejections.keys(), vec!["category", "resolutions", "years"]);
    }

    #[test]
    fn test_wildcard_and_regex_modes() {
        let mut filter = Filter {
            match_releases: "*2160p*".to_string(),
            ..Filter::default()
        };
        assert!(run(&filter, &movie()).1);

        filter.use_regex = true;
        let (rejections, matched) = run(&filter, &movie());
        assert!(!matched);
        assert_eq!(rejections.keys(), vec!["match_releases"]);

        filter.match_releases = r"2160p.*x264".to_string();
        assert!(run(&filter, &movie()).1);
    }

    #[test]
    fn test_except_releases() {
        let filter = Filter {
            except_releases: "bluray".to_string(),
            ..Filter::default()
        };
        let (rejections, matched) = run(&filter, &movie());
        assert!(!matched);
        assert!(rejections.render().starts_with("except release: unwanted."));
    }

    #[test]
    fn test_size_bounds() {
        let mut release = movie();
        let filter = Filter {
            min_size: "10 GB".to_string(),
            max_size: "20 GB".to_string(),
            ..Filter::default()
        };
        let (rejections, matched) = run(&filter, &release);
        assert!(!matched);
        assert_eq!(
            rejections.render(),
            "size not matching. got: 30000000001 want min: 10 GB max: 20 GB"
        );

        release.size = 0;
        assert!(run(&filter, &release).1);
    }

    #[test]
    fn test_unparsable_size_bound() {
        let filter = Filter {
            max_size: "lots".to_string(),
            ..Filter::default()
        };
        let (rejections, matched) = run(&filter, &movie());
        assert!(!matched);
        assert!(rejections.render().starts_with("size: error checking release size"));
    }

    #[test]
    fn test_release_group_boundaries() {
        let filter = Filter {
            match_release_groups: "ift".to_string(),
            ..Filter::default()
        };
        let release = parse_release("Some.Show.S01E01.1080p.WEB.h264-ift", None);
        assert!(run(&filter, &release).1);

        let release = parse_release("Some.Show.S01E01.1080p.WEB.h264-SWIFT", None);
        assert!(!run(&filter, &release).1);

        let mut release = Release::new("[iFT] Some Show 01", "");
        release.title = "Some Show".to_string();
        assert!(run(&filter, &release).1);
    }

    #[test]
    fn test_explicit_resolution_with_uhd_source() {
        let filter = Filter {
            resolutions: vec!["1080p".to_string()],
            ..Filter::default()
        };
        let release = parse_release("Movie.2019.1080p.UHD.BluRay.DD+7.1.HDR.x264-DON", None);
        let (rejections, matched) = run(&filter, &release);
        assert!(matched, "unexpected rejections: {}", rejections);

        let uhd = Filter {
            resolutions: vec!["2160p".to_string()],
            ..Filter::default()
        };
        let (rejections, matched) = run(&uhd, &release);
        assert!(!matched);
        assert_eq!(rejections.keys(), vec!["resolutions".to_string()]);
    }

    #[test]
    fn test_unicode_release_group() {
        let filter = Filter {
            match_release_groups: "GRÜP".to_string(),
            ..Filter::default()
        };
        let release = parse_release("Ünïcödé.Fïlm.2020.1080p.BluRay.x264-GRÜP", None);
        assert_eq!(release.group, "GRÜP");
        assert!(run(&filter, &release).1);
    }

    #[test]
    fn test_category_additional() {
        let mut release = movie();
        release.category = "Movies".to_string();
        release.categories = vec!["Movies/UHD".to_string()];
        let filter = Filter {
            match_categories: "*uhd*".to_string(),
            ..Filter::default()
        };
        assert!(run(&filter, &release).1);

        let filter = Filter {
            except_categories: "Movies".to_string(),
            ..Filter::default()
        };
        let (rejections, _) = run(&filter, &release);
        assert_eq!(rejections.keys(), vec!["except_category"]);
    }

    #[test]
    fn test_freeleech_percent_and_bonus() {
        let mut release = movie();
        release.freeleech_percent = 50;
        release.bonus = vec!["Freeleech".to_string(), "Freeleech50".to_string()];
        let filter = Filter {
            freeleech_percent: "50-100".to_string(),
            bonus: vec!["freeleech50".to_string()],
            ..Filter::default()
        };
        assert!(run(&filter, &release).1);

        release.freeleech_percent = 25;
        let (rejections, _) = run(&filter, &release);
        assert_eq!(rejections.keys(), vec!["freeleech_percent"]);
    }

    #[test]
    fn test_hdr_and_other() {
        let release = parse_release("Movie.2020.2160p.UHD.BluRay.REMUX.DV.HDR10.TrueHD.7.1-GRP", None);
        let filter = Filter {
            match_hdr: vec!["DV HDR10".to_string()],
            match_other: vec!["REMUX".to_string()],
            ..Filter::default()
        };
        let (rejections, matched) = run(&filter, &release);
        assert!(matched, "unexpected rejections: {}", rejections);

        let filter = Filter {
            except_hdr: vec!["DV".to_string()],
            ..Filter::default()
        };
        assert!(!run(&filter, &release).1);
    }

    #[test]
    fn test_ranges_and_release_type() {
        let release = parse_release("Breaking.Bad.S01E05.720p.BluRay.x264-DEMAND", None);
        let filter = Filter {
            shows: "Breaking Bad".to_string(),
            seasons: "1".to_string(),
            episodes: "1-10".to_string(),
            match_release_types: vec!["episode".to_string()],
            ..Filter::default()
        };
        assert!(run(&filter, &release).1);

        let filter = Filter {
            episodes: "6-10".to_string(),
            except_release_types: vec!["epi*".to_string()],
            ..Filter::default()
        };
        let (rejections, _) = run(&filter, &release);
        assert_eq!(rejections.keys(), vec!["episodes", "except_release_types"]);
    }

    #[test]
    fn test_tags_logic() {
        let mut release = movie();
        release.tags = vec!["action".to_string(), "drama".to_string()];

        let mut filter = Filter {
            tags: "action, comedy".to_string(),
            ..Filter::default()
        };
        assert!(run(&filter, &release).1);

        filter.tags_match_logic = MatchLogic::All;
        let (rejections, _) = run(&filter, &release);
        assert!(rejections.render().contains("want(all)"));

        let filter = Filter {
            except_tags: "drama".to_string(),
            tags_any: "sci-fi".to_string(),
            ..Filter::default()
        };
        let (rejections, _) = run(&filter, &release);
        assert_eq!(rejections.keys(), vec!["except_tags", "tags_any"]);
    }

    #[test]
    fn test_perfect_flac() {
        let filter = Filter {
            perfect_flac: true,
            ..Filter::default()
        };

        let release = parse_release("Artist - Album", Some("FLAC / Lossless / Log / 100% / Cue / CD"));
        let (rejections, matched) = run(&filter, &release);
        assert!(matched, "unexpected rejections: {}", rejections);

        let release = parse_release("Artist - Album", Some("MP3 / 320 / WEB"));
        let (rejections, matched) = run(&filter, &release);
        assert!(!matched);
        assert_eq!(rejections.len(), 1);
        assert!(rejections.render().starts_with("wanted: perfect flac. got: ["));
    }

    #[test]
    fn test_perfect_flac_needs_full_log_score() {
        let filter = Filter {
            perfect_flac: true,
            ..Filter::default()
        };
        let release = parse_release("Artist - Album", Some("FLAC / Lossless / Log / 95% / Cue / CD"));
        assert!(!run(&filter, &release).1);
    }

    #[test]
    fn test_music_criteria() {
        let release = parse_release("Artist - Album", Some("FLAC / Lossless / Log / 100% / Cue / CD"));
        let filter = Filter {
            artists: "Artist".to_string(),
            albums: "Album".to_string(),
            formats: vec!["FLAC".to_string()],
            quality: vec!["Lossless".to_string()],
            media: vec!["CD".to_string()],
            log: true,
            log_score: 100,
            cue: true,
            ..Filter::default()
        };
        let (rejections, matched) = run(&filter, &release);
        assert!(matched, "unexpected rejections: {}", rejections);

        let release = parse_release("Artist - Album", Some("MP3 / 320 / WEB"));
        let (rejections, _) = run(&filter, &release);
        assert_eq!(
            rejections.keys(),
            vec!["formats", "quality", "media", "log", "log_score", "cue"]
        );
    }

    #[test]
    fn test_seeders() {
        let mut release = movie();
        release.seeders = 3;
        let filter = Filter {
            min_seeders: 5,
            max_leechers: 10,
            ..Filter::default()
        };
        let (rejections, _) = run(&filter, &release);
        assert_eq!(rejections.keys(), vec!["min_seeders"]);
        assert_eq!(rejections.render(), "min seeders not matching. got: 3 want: 5");
    }

    #[test]
    fn test_max_downloads() {
        let mut filter = Filter {
            max_downloads: 2,
            max_downloads_unit: Some(MaxDownloadsUnit::Day),
            ..Filter::default()
        };

        // No snapshot means the quota cannot be verified
        let (rejections, matched) = run(&filter, &movie());
        assert!(!matched);
        assert_eq!(rejections.keys(), vec!["max_downloads"]);

        filter.downloads = Some(FilterDownloads {
            day_count: 1,
            ..Default::default()
        });
        assert!(run(&filter, &movie()).1);

        filter.downloads = Some(FilterDownloads {
            day_count: 2,
            ..Default::default()
        });
        let (rejections, _) = run(&filter, &movie());
        assert_eq!(rejections.render(), "max downloads (2) this (DAY) reached. got: 2");
    }

    #[test]
    fn test_quota_checked_last() {
        let filter = Filter {
            resolutions: vec!["720p".to_string()],
            max_downloads: 1,
            max_downloads_unit: Some(MaxDownloadsUnit::Ever),
            downloads: Some(FilterDownloads {
                total_count: 1,
                ..Default::default()
            }),
            ..Filter::default()
        };
        let (rejections, _) = run(&filter, &movie());
        assert_eq!(rejections.keys(), vec!["resolutions", "max_downloads"]);
    }

    #[test]
    fn test_filter_is_not_mutated() {
        let filter = movie_filter();
        let before = filter.clone();
        let _ = evaluate(&filter, &movie());
        assert_eq!(filter, before);
    }
}
