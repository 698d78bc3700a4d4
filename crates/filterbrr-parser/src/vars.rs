//! Announce variables and their mapping onto a [`Release`].

use std::collections::HashMap;

use crate::model::Release;
use crate::normalize::NormalizeError;
use crate::size::parse_size_with_unit;

/// Named values captured from an announce line. Keys are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnounceVars {
    values: HashMap<String, String>,
}

impl AnnounceVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any value stored under the same key.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.values
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for AnnounceVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = AnnounceVars::new();
        for (key, value) in iter {
            vars.insert(key, value);
        }
        vars
    }
}

/// Per-indexer settings used by [`map_vars`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapOptions {
    /// Indexer identifier.
    pub indexer: String,
    /// Unit appended to sizes announced without one.
    pub force_size_unit: Option<String>,
}

fn is_one_of(value: &str, accepted: &[&str]) -> bool {
    accepted.iter().any(|a| a.eq_ignore_ascii_case(value.trim()))
}

/// Decode the HTML entities trackers leave in announced names.
pub fn html_unescape(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate.find(';').and_then(|end| {
            let entity = &candidate[1..end];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            }?;
            Some((ch, end + 1))
        });
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &candidate[consumed..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Copy announce variables onto `release`.
///
/// `torrentName` is required. Every other key is optional and unparsable
/// numbers leave the field at zero.
pub fn map_vars(release: &mut Release, vars: &AnnounceVars, options: &MapOptions) -> Result<(), NormalizeError> {
    let torrent_name = vars
        .get("torrentName")
        .filter(|n| !n.trim().is_empty())
        .ok_or(NormalizeError::MissingTorrentName)?;
    release.torrent_name = html_unescape(torrent_name);
    if release.indexer.is_empty() {
        release.indexer = options.indexer.clone();
    }

    if let Some(id) = vars.get("torrentId") {
        release.torrent_id = id.to_string();
    }
    if let Some(category) = vars.get("category") {
        release.category = category.to_string();
    }

    if let Some(freeleech) = vars.get("freeleech") {
        if is_one_of(freeleech, &["freeleech", "freeleech!", "yes", "1", "VIP"]) {
            release.freeleech = true;
            release.freeleech_percent = 100;
            push_unique(&mut release.bonus, "Freeleech");
        }
    }

    if let Some(percent) = vars.get("freeleechPercent") {
        let mut percent = percent.to_string();
        if options.indexer == "beyondhd" {
            if percent == "Capped FL" {
                percent = "100%".to_string();
            } else if percent.contains("% FL") {
                percent = percent.replace(" FL", "");
            }
        }
        let value: i32 = percent.replace('%', "").trim().parse().unwrap_or_else(|_| {
            tracing::debug!(value = %percent, "bad freeleechPercent var");
            0
        });
        if value > 0 {
            release.freeleech = true;
            release.freeleech_percent = value;
            push_unique(&mut release.bonus, "Freeleech");
            if matches!(value, 25 | 50 | 75 | 100) {
                push_unique(&mut release.bonus, &format!("Freeleech{}", value));
            }
        }
    }

    if let Some(uploader) = vars.get("uploader") {
        release.uploader = uploader.to_string();
    }
    if let Some(label) = vars.get("record_label") {
        release.record_label = label.to_string();
    }

    if let Some(size) = vars.get("torrentSize") {
        match parse_size_with_unit(size, options.force_size_unit.as_deref()) {
            Ok(bytes) => release.size = bytes,
            Err(err) => tracing::debug!(value = size, error = %err, "could not parse torrentSize"),
        }
    }

    if let Some(scene) = vars.get("scene") {
        if is_one_of(scene, &["true", "yes", "1"]) {
            release.origin = "SCENE".to_string();
        }
    }
    if let Some(origin) = vars.get("origin") {
        release.origin = origin.to_string();
    }
    if let Some(internal) = vars.get("internal") {
        if is_one_of(internal, &["internal", "yes", "1"]) {
            release.origin = "INTERNAL".to_string();
        }
    }

    if let Some(year) = vars.get("year") {
        release.year = parse_int(year);
    }
    if let Some(tags) = vars.get("tags") {
        release.tags = tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(title) = vars.get("title") {
        release.title = title.to_string();
    }
    if let Some(tags) = vars.get("releaseTags") {
        release.release_tags = tags.to_string();
    }
    if let Some(resolution) = vars.get("resolution") {
        release.resolution = resolution.to_string();
    }
    if let Some(group) = vars.get("releaseGroup") {
        release.group = group.to_string();
    }
    if let Some(episode) = vars.get("releaseEpisode") {
        release.episode = parse_int(episode);
    }
    if let Some(description) = vars.get("description") {
        release.description = description.to_string();
    }
    if let Some(seeders) = vars.get("seeders") {
        release.seeders = parse_int(seeders);
    }
    if let Some(leechers) = vars.get("leechers") {
        release.leechers = parse_int(leechers);
    }

    Ok(())
}

fn parse_int(value: &str) -> i32 {
    value.trim().parse().unwrap_or(0)
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn map(pairs: &[(&str, &str)], indexer: &str) -> Release {
        let mut release = Release::default();
        let options = MapOptions {
            indexer: indexer.to_string(),
            force_size_unit: None,
        };
        map_vars(&mut release, &AnnounceVars::from_iter(pairs.iter().copied()), &options).unwrap();
        release
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let vars = AnnounceVars::from_iter([("TorrentName", "X"), ("CATEGORY", "Movies")]);
        assert_eq!(vars.get("torrentname"), Some("X"));
        assert_eq!(vars.get("category"), Some("Movies"));
        assert_eq!(vars.get("missing"), None);
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_torrent_name_required() {
        let mut release = Release::default();
        let result = map_vars(&mut release, &AnnounceVars::default(), &MapOptions::default());
        assert_matches!(result, Err(NormalizeError::MissingTorrentName));
    }

    #[test]
    fn test_html_unescape() {
        assert_eq!(html_unescape("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(html_unescape("It&#39;s &quot;here&quot;"), "It's \"here\"");
        assert_eq!(html_unescape("&#x41;&lt;&gt;"), "A<>");
        assert_eq!(html_unescape("R&B & more &bogus;"), "R&B & more &bogus;");
    }

    #[test]
    fn test_map_basic_fields() {
        let r = map(
            &[
                ("torrentName", "That Movie 2020 2160p BluRay DD5.1 x264-GROUP1"),
                ("torrentId", "12345"),
                ("category", "Movies"),
                ("uploader", "Anonymous"),
                ("torrentSize", "30000000001"),
                ("tags", "action, drama ,"),
                ("seeders", "12"),
                ("leechers", "nope"),
            ],
            "mock",
        );
        assert_eq!(r.indexer, "mock");
        assert_eq!(r.torrent_id, "12345");
        assert_eq!(r.category, "Movies");
        assert_eq!(r.uploader, "Anonymous");
        assert_eq!(r.size, 30_000_000_001);
        assert_eq!(r.tags, vec!["action", "drama"]);
        assert_eq!(r.seeders, 12);
        assert_eq!(r.leechers, 0);
    }

    #[test]
    fn test_freeleech_flag() {
        let r = map(&[("torrentName", "X"), ("freeleech", "VIP")], "mock");
        assert!(r.freeleech);
        assert_eq!(r.freeleech_percent, 100);
        assert_eq!(r.bonus, vec!["Freeleech"]);

        let r = map(&[("torrentName", "X"), ("freeleech", "no")], "mock");
        assert!(!r.freeleech);
    }

    #[test]
    fn test_freeleech_percent() {
        let r = map(&[("torrentName", "X"), ("freeleechPercent", "50%")], "mock");
        assert!(r.freeleech);
        assert_eq!(r.freeleech_percent, 50);
        assert_eq!(r.bonus, vec!["Freeleech", "Freeleech50"]);

        let r = map(&[("torrentName", "X"), ("freeleechPercent", "Capped FL")], "beyondhd");
        assert_eq!(r.freeleech_percent, 100);
        assert_eq!(r.bonus, vec!["Freeleech", "Freeleech100"]);

        let r = map(&[("torrentName", "X"), ("freeleechPercent", "25% FL")], "beyondhd");
        assert_eq!(r.freeleech_percent, 25);

        let r = map(&[("torrentName", "X"), ("freeleechPercent", "0%")], "mock");
        assert!(!r.freeleech);
        assert!(r.bonus.is_empty());
    }

    #[test]
    fn test_origin_precedence() {
        let r = map(&[("torrentName", "X"), ("scene", "yes")], "mock");
        assert_eq!(r.origin, "SCENE");

        let r = map(&[("torrentName", "X"), ("scene", "yes"), ("internal", "1")], "mock");
        assert_eq!(r.origin, "INTERNAL");

        let r = map(&[("torrentName", "X"), ("origin", "P2P")], "mock");
        assert_eq!(r.origin, "P2P");
    }

    #[test]
    fn test_force_size_unit() {
        let mut release = Release::default();
        let options = MapOptions {
            indexer: "ar".to_string(),
            force_size_unit: Some("MB".to_string()),
        };
        let vars = AnnounceVars::from_iter([("torrentName", "X"), ("torrentSize", "700")]);
        map_vars(&mut release, &vars, &options).unwrap();
        assert_eq!(release.size, 700 * 1024 * 1024);
    }
}
