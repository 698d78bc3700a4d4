//! Tracker tag strings such as `"FLAC / Lossless / Log / 100% / Cue / CD"`.

use std::sync::LazyLock;

use regex::Regex;

use crate::tags::{TagCategory, TagDictionary};

/// Classification of a tracker tag string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseTags {
    pub audio: Vec<String>,
    pub audio_bitrate: String,
    pub audio_format: String,
    pub bonus: Vec<String>,
    pub channels: String,
    pub codec: String,
    pub container: String,
    pub hdr: Vec<String>,
    pub origin: String,
    pub other: Vec<String>,
    pub resolution: String,
    pub source: String,
    pub has_log: bool,
    pub log_score: i32,
    pub has_cue: bool,
}

static DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[|/,]\s*").expect("valid tag delimiter regex"));

/// Replace `|`, `/` and `,` delimiters (and surrounding whitespace) with a single space.
pub fn clean_release_tags(tags: &str) -> String {
    DELIMITER.replace_all(tags.trim(), " ").into_owned()
}

/// Split a tag string into its trimmed, non-empty segments.
pub fn split_release_tags(tags: &str) -> Vec<&str> {
    DELIMITER
        .split(tags)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Classify a tracker tag string.
///
/// Scalar categories are resolved per segment and the first segment that
/// yields a tag wins. List categories and the log score are scanned across
/// the whole cleaned string.
pub fn parse_release_tags(dict: &TagDictionary, tags: &str) -> ReleaseTags {
    let mut out = ReleaseTags::default();
    if tags.trim().is_empty() {
        return out;
    }

    let segments = split_release_tags(tags);
    let cleaned = clean_release_tags(tags);

    let scalar = |category: TagCategory| -> String {
        segments
            .iter()
            .find_map(|segment| dict.scan_first(category, segment))
            .map(|m| m.tag)
            .unwrap_or_default()
    };
    out.audio_bitrate = scalar(TagCategory::AudioBitrate);
    out.audio_format = scalar(TagCategory::AudioFormat);
    out.channels = scalar(TagCategory::Channels);
    out.codec = scalar(TagCategory::Codecs);
    out.container = scalar(TagCategory::Container);
    out.origin = scalar(TagCategory::Origin);
    out.resolution = scalar(TagCategory::Resolution);
    out.source = scalar(TagCategory::Source);

    let list = |category: TagCategory| -> Vec<String> {
        dict.scan(category, &cleaned).into_iter().map(|m| m.tag).collect()
    };
    out.audio = list(TagCategory::Audio);
    out.bonus = list(TagCategory::Bonus);
    out.hdr = list(TagCategory::Hdr);
    out.other = list(TagCategory::Other);

    if let Some(score) = dict.log_score(&cleaned) {
        out.has_log = true;
        out.log_score = score as i32;
    }
    out.has_log |= out.audio.iter().any(|a| a == "Log");
    out.has_cue = out.audio.iter().any(|a| a == "Cue");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tags: &str) -> ReleaseTags {
        parse_release_tags(TagDictionary::global(), tags)
    }

    #[test]
    fn test_clean_release_tags() {
        assert_eq!(
            clean_release_tags("FLAC / Lossless / Log / 100% / Cue / CD"),
            "FLAC Lossless Log 100% Cue CD"
        );
        assert_eq!(clean_release_tags("MKV | H.264,WEB-DL"), "MKV H.264 WEB-DL");
    }

    #[test]
    fn test_split_release_tags() {
        assert_eq!(
            split_release_tags("MP3 / 320 / WEB"),
            vec!["MP3", "320", "WEB"]
        );
        assert!(split_release_tags("  ").is_empty());
    }

    #[test]
    fn test_perfect_flac_tags() {
        let tags = parse("FLAC / Lossless / Log / 100% / Cue / CD");
        assert_eq!(tags.audio_format, "FLAC");
        assert_eq!(tags.audio_bitrate, "Lossless");
        assert_eq!(tags.source, "CD");
        assert!(tags.has_log);
        assert_eq!(tags.log_score, 100);
        assert!(tags.has_cue);
        assert!(tags.audio.contains(&"Log100".to_string()));
        assert!(tags.audio.contains(&"Cue".to_string()));
        assert!(tags.audio.contains(&"Lossless".to_string()));
    }

    #[test]
    fn test_mp3_tags() {
        let tags = parse("MP3 / 320 / WEB");
        assert_eq!(tags.audio_format, "MP3");
        assert_eq!(tags.audio_bitrate, "320");
        assert_eq!(tags.source, "WEB");
        assert!(!tags.has_log);
        assert!(!tags.has_cue);
    }

    #[test]
    fn test_first_segment_wins() {
        let tags = parse("WEB / CD / 24bit Lossless / FLAC");
        assert_eq!(tags.source, "WEB");
        assert_eq!(tags.audio_bitrate, "24BIT Lossless");
    }

    #[test]
    fn test_video_tags() {
        let tags = parse("MKV | H.264 | WEB-DL | 1080p | Internal | Freeleech");
        assert_eq!(tags.container, "mkv");
        assert_eq!(tags.codec, "H.264");
        assert_eq!(tags.source, "WEB-DL");
        assert_eq!(tags.resolution, "1080p");
        assert_eq!(tags.origin, "Internal");
        assert_eq!(tags.bonus, vec!["Freeleech"]);
    }

    #[test]
    fn test_empty_tags() {
        assert_eq!(parse(""), ReleaseTags::default());
    }
}
