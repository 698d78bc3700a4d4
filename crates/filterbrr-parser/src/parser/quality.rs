//! Quality extraction from the free-text part of a release name.
//!
//! Everything here runs the tag dictionary in bounded-scan mode, so a tag only
//! matches as a whole word ("mov" never matches inside "Movie").

use std::sync::LazyLock;

use regex::Regex;

use crate::tags::{TagCategory, TagDictionary};

/// Quality fields found in a title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Quality {
    pub resolution: String,
    pub source: String,
    pub codec: Vec<String>,
    pub container: String,
    pub hdr: Vec<String>,
    pub audio: Vec<String>,
    pub channels: String,
    pub other: Vec<String>,
    pub audio_format: String,
    pub bitrate: String,
    pub log_score: Option<u32>,
}

impl Quality {
    /// Whether any video-only marker was found.
    pub fn is_video(&self) -> bool {
        !self.resolution.is_empty() || !self.codec.is_empty() || !self.hdr.is_empty()
    }
}

// Categories whose first hit marks the end of the title.
const TITLE_STOPPERS: &[TagCategory] = &[
    TagCategory::Resolution,
    TagCategory::Source,
    TagCategory::Codecs,
    TagCategory::Hdr,
    TagCategory::AudioFormat,
    TagCategory::Container,
    TagCategory::Other,
];

// Formats that only show up on music releases.
const MUSIC_FORMATS: &[&str] = &["FLAC", "MP3", "OGG", "OPUS"];

/// Byte offset of the first quality tag after `after`.
pub fn first_marker(dict: &TagDictionary, text: &str, after: usize) -> Option<usize> {
    TITLE_STOPPERS
        .iter()
        .flat_map(|&category| dict.scan(category, text))
        .map(|m| m.span.start)
        .filter(|&start| start > after)
        .min()
}

fn tags(dict: &TagDictionary, category: TagCategory, text: &str) -> Vec<String> {
    dict.scan(category, text).into_iter().map(|m| m.tag).collect()
}

fn first(dict: &TagDictionary, category: TagCategory, text: &str) -> String {
    dict.scan_first(category, text)
        .map(|m| m.tag)
        .unwrap_or_default()
}

// Written-out resolutions ("1080p", "1920x1080"); "UHD", "4K" and friends are synonyms.
static EXPLICIT_RESOLUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d{3,4}[pi]|\d{3,4}x\d{3,4})$").expect("valid explicit resolution regex")
});

/// Resolution of a title: the earliest written-out one, otherwise the first synonym.
fn resolution(dict: &TagDictionary, text: &str) -> String {
    dict.scan(TagCategory::Resolution, text)
        .into_iter()
        .filter(|m| EXPLICIT_RESOLUTION.is_match(&text[m.span.clone()]))
        .min_by_key(|m| m.span.start)
        .map(|m| m.tag)
        .unwrap_or_else(|| first(dict, TagCategory::Resolution, text))
}

/// Classify every quality category found in `text`.
pub fn extract(dict: &TagDictionary, text: &str) -> Quality {
    let audio_format = first(dict, TagCategory::AudioFormat, text);
    let is_music_format = MUSIC_FORMATS.contains(&audio_format.as_str());

    Quality {
        resolution: resolution(dict, text),
        source: first(dict, TagCategory::Source, text),
        codec: tags(dict, TagCategory::Codecs, text),
        container: first(dict, TagCategory::Container, text),
        hdr: tags(dict, TagCategory::Hdr, text),
        audio: tags(dict, TagCategory::Audio, text),
        channels: first(dict, TagCategory::Channels, text),
        other: tags(dict, TagCategory::Other, text),
        bitrate: if is_music_format {
            first(dict, TagCategory::AudioBitrate, text)
        } else {
            String::new()
        },
        audio_format,
        log_score: dict.log_score(text),
    }
}

/// Whether the classified format is a music-only one.
pub fn is_music_format(format: &str) -> bool {
    MUSIC_FORMATS.contains(&format)
}
