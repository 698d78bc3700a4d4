//! The release record produced by the parser.

use chrono::{DateTime, Utc};
use filterbrr_common::ReleaseType;

/// One parsed announce.
///
/// Constructed empty with the raw title (and optionally the tracker tag string)
/// set, filled in by [`Parser::parse_into`](crate::Parser::parse_into) and read-only
/// afterwards. Zero values mean "not detected".
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Release {
    // Identity
    /// Indexer identifier the announce came from
    pub indexer: String,
    /// When the announce was received
    pub timestamp: Option<DateTime<Utc>>,
    /// Tracker-side torrent id
    pub torrent_id: String,
    /// Raw release name, verbatim
    pub torrent_name: String,
    /// Release name with separators replaced by spaces
    pub normalized: String,
    /// Raw tracker tag string (e.g. "FLAC / Lossless / Log / 100% / Cue / CD")
    pub release_tags: String,
    /// Free-text description
    pub description: String,

    // Classification
    /// Human title (show, movie, album)
    pub title: String,
    /// Primary category
    pub category: String,
    /// Additional categories
    pub categories: Vec<String>,
    /// Coarse release type
    pub release_type: ReleaseType,
    pub season: i32,
    pub episode: i32,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub resolution: String,
    pub source: String,
    pub codec: Vec<String>,
    pub container: String,
    pub hdr: Vec<String>,
    /// Audio tags, including `Cue`, `Log` and `Log{score}` for music
    pub audio: Vec<String>,
    pub audio_channels: String,
    pub audio_format: String,
    pub bitrate: String,
    /// Release group
    pub group: String,
    pub region: String,
    pub language: Vec<String>,
    /// Streaming service (AMZN, NF, ...)
    pub website: String,
    pub proper: bool,
    pub repack: bool,
    /// HYBRID, REMUX and similar
    pub other: Vec<String>,

    // Tracker context
    /// Size in bytes, 0 when unknown
    pub size: u64,
    pub uploader: String,
    pub record_label: String,
    /// SCENE, INTERNAL, P2P, ...
    pub origin: String,
    pub freeleech: bool,
    pub freeleech_percent: i32,
    /// Freeleech, Freeleech50, ...
    pub bonus: Vec<String>,
    pub tags: Vec<String>,
    pub seeders: i32,
    pub leechers: i32,

    // Music
    pub artists: String,
    pub has_log: bool,
    pub log_score: i32,
    pub has_cue: bool,
}

impl Release {
    /// Empty release carrying only the raw name and tag string.
    pub fn new(torrent_name: impl Into<String>, release_tags: impl Into<String>) -> Self {
        Self {
            torrent_name: torrent_name.into(),
            release_tags: release_tags.into(),
            ..Self::default()
        }
    }

    /// Whether any video marker was detected.
    pub fn has_video_markers(&self) -> bool {
        !self.resolution.is_empty()
            || !self.codec.is_empty()
            || !self.hdr.is_empty()
            || !self.container.is_empty()
    }

    /// Whether `tag` is among the audio tags, ignoring case.
    pub fn has_audio(&self, tag: &str) -> bool {
        self.audio.iter().any(|a| a.eq_ignore_ascii_case(tag))
    }

    /// Primary category followed by the additional ones.
    pub fn all_categories(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.category.as_str())
            .filter(|c| !c.is_empty())
            .chain(self.categories.iter().map(String::as_str))
    }
}
