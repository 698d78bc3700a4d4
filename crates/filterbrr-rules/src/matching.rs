//! Matching primitives used by the filter engine.
//!
//! Filter values come either as comma-separated strings or as lists. All
//! comparisons ignore case. Entries containing `*`, `?` or `|` are treated
//! as wildcards; everything else is compared literally.

use crate::cache::PatternCache;
use crate::wildcard;

/// Split a comma-separated filter value into trimmed, non-empty entries.
pub fn split_csv(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Any tag equals, or wildcard-matches, any filter entry.
pub fn contains_match<T: AsRef<str>, F: AsRef<str>>(
    cache: &PatternCache,
    tags: &[T],
    filters: &[F],
) -> bool {
    match_with(cache, tags, filters, |tag, filter| tag == filter)
}

/// Like [`contains_match`], but a literal entry only has to be a substring.
pub fn contains_match_fuzzy<T: AsRef<str>, F: AsRef<str>>(
    cache: &PatternCache,
    tags: &[T],
    filters: &[F],
) -> bool {
    match_with(cache, tags, filters, |tag, filter| tag.contains(filter))
}

fn match_with<T: AsRef<str>, F: AsRef<str>>(
    cache: &PatternCache,
    tags: &[T],
    filters: &[F],
    literal: impl Fn(&str, &str) -> bool,
) -> bool {
    let mut advanced = Vec::with_capacity(filters.len());
    for tag in tags.iter().map(AsRef::as_ref).filter(|t| !t.is_empty()) {
        let tag = tag.to_lowercase();

        advanced.clear();
        for filter in filters.iter().map(|f| f.as_ref().trim()) {
            if filter.is_empty() {
                continue;
            }
            let filter = filter.to_lowercase();
            if wildcard::is_wildcard(&filter) {
                advanced.push(filter);
            } else if literal(tag.as_str(), filter.as_str()) {
                return true;
            }
        }

        if wildcard::match_any(cache, &advanced, &tag) {
            return true;
        }
    }
    false
}

/// Every filter entry is equal to, or wildcard-matches, at least one tag.
pub fn contains_all_match<T: AsRef<str>, F: AsRef<str>>(
    cache: &PatternCache,
    tags: &[T],
    filters: &[F],
) -> bool {
    filters
        .iter()
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty())
        .all(|filter| {
            let filter = filter.to_lowercase();
            let wild = wildcard::is_wildcard(&filter);
            tags.iter()
                .map(AsRef::as_ref)
                .filter(|t| !t.is_empty())
                .any(|tag| {
                    let tag = tag.to_lowercase();
                    tag == filter || (wild && wildcard::is_match(cache, &filter, &tag))
                })
        })
}

/// Plain case-insensitive equality between any tag and any filter entry.
pub fn contains_match_basic<T: AsRef<str>, F: AsRef<str>>(tags: &[T], filters: &[F]) -> bool {
    tags.iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .any(|tag| {
            filters
                .iter()
                .map(|f| f.as_ref().trim())
                .filter(|f| !f.is_empty())
                .any(|filter| tag.eq_ignore_ascii_case(filter))
        })
}

/// `tag` matches an entry of the comma-separated `filter`.
pub fn contains(cache: &PatternCache, tag: &str, filter: &str) -> bool {
    contains_match(cache, &[tag], &split_csv(filter))
}

/// `tag` contains, or wildcard-matches, an entry of the comma-separated `filter`.
pub fn contains_fuzzy(cache: &PatternCache, tag: &str, filter: &str) -> bool {
    contains_match_fuzzy(cache, &[tag], &split_csv(filter))
}

/// `tag` matches an element of `filters`.
pub fn contains_slice<F: AsRef<str>>(cache: &PatternCache, tag: &str, filters: &[F]) -> bool {
    contains_match(cache, &[tag], filters)
}

/// Any of `tags` matches an entry of the comma-separated `filter`.
pub fn contains_any<T: AsRef<str>>(cache: &PatternCache, tags: &[T], filter: &str) -> bool {
    contains_match(cache, tags, &split_csv(filter))
}

/// Every entry of the comma-separated `filter` matches one of `tags`.
pub fn contains_all<T: AsRef<str>>(cache: &PatternCache, tags: &[T], filter: &str) -> bool {
    contains_all_match(cache, tags, &split_csv(filter))
}

/// Any of `tags` equals any of `filters`.
pub fn slice_contains_slice<T: AsRef<str>, F: AsRef<str>>(tags: &[T], filters: &[F]) -> bool {
    contains_match_basic(tags, filters)
}

/// Whether `value` is listed in `"1,3-5,9"` style range syntax.
///
/// `%` signs are ignored. Any malformed entry, or a range whose start
/// exceeds its end, makes the whole list fail.
pub fn contains_int_strings(value: i32, list: &str) -> bool {
    for entry in list.split(',') {
        let entry = entry.replace('%', "");
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        if let Some((min, max)) = entry.split_once('-') {
            let (Ok(min), Ok(max)) = (min.trim().parse::<i32>(), max.trim().parse::<i32>()) else {
                return false;
            };
            if min > max {
                return false;
            }
            if (min..=max).contains(&value) {
                return true;
            }
            continue;
        }

        match entry.parse::<i32>() {
            Ok(n) if n == value => return true,
            Ok(_) => {}
            Err(_) => return false,
        }
    }
    false
}

/// Freeleech percent against a `"25,50-100"` style filter.
pub fn check_freeleech_percent(percent: i32, filter: &str) -> bool {
    contains_int_strings(percent, filter)
}

/// HDR membership. A two-word entry such as `"DV HDR10"` needs both words.
pub fn match_hdr<R: AsRef<str>, F: AsRef<str>>(release: &[R], filters: &[F]) -> bool {
    let has = |part: &str| release.iter().any(|tag| tag.as_ref().eq_ignore_ascii_case(part));

    filters
        .iter()
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty())
        .any(|filter| {
            let parts: Vec<&str> = filter.split(' ').collect();
            if parts.len() == 2 {
                parts.iter().all(|part| has(part))
            } else {
                has(filter)
            }
        })
}

/// Match `tag` against a comma-separated list of regexes.
///
/// Each pattern is compiled as `(?i)(?:pattern)`. An empty tag never
/// matches, and a pattern that fails to compile fails the whole list.
pub fn match_regex(cache: &PatternCache, tag: &str, list: &str) -> bool {
    if tag.is_empty() {
        return false;
    }

    for pattern in split_regex_list(list) {
        match cache.compile(&format!("(?i)(?:{pattern})")) {
            Ok(re) if re.is_match(tag) => return true,
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(pattern = %pattern, error = %err, "could not compile filter regex");
                return false;
            }
        }
    }
    false
}

/// Split a regex list on commas outside quotes and brackets.
pub fn split_regex_list(list: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quoted = false;

    for c in list.chars() {
        match c {
            '"' => quoted = !quoted,
            '(' | '[' | '{' if !quoted => depth += 1,
            ')' | ']' | '}' if !quoted => depth = depth.saturating_sub(1),
            ',' if !quoted && depth == 0 => {
                parts.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    parts.push(current);

    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Case-insensitive search for `needle` delimited by non-alphanumerics (or
/// the string edges) on both sides.
pub fn contains_bounded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let haystack = haystack.to_lowercase();
    let needle = needle.to_lowercase();

    let is_word = |c: Option<char>| c.is_some_and(char::is_alphanumeric);
    haystack.match_indices(&needle).any(|(start, m)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + m.len()..].chars().next();
        !is_word(before) && !is_word(after)
    })
}
