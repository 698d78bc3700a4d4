//! Orpheus and Redacted announces.
//!
//! Their announced names are ambiguous to the parser, so the name is rebuilt
//! as `"{title} [{year}] ({source} {format} {bitrate})"` from the announce
//! title, year and tag string.

use std::sync::LazyLock;

use regex::Regex;

use super::{NormalizeError, Normalized};
use crate::release_tags::{clean_release_tags, parse_release_tags};
use crate::tags::TagDictionary;
use crate::vars::AnnounceVars;

static LAST_DECIMAL_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}$|^100$").expect("valid decimal tag regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flavor {
    /// En-dash separators; a bare trailing number in the tags is a log score.
    Orpheus,
    Redacted,
}

fn replace_separator(s: &str) -> String {
    s.replace('–', "-")
}

pub(super) fn normalize(
    vars: &AnnounceVars,
    dict: &TagDictionary,
    flavor: Flavor,
) -> Result<Normalized, NormalizeError> {
    let raw_title = vars.get("title").unwrap_or_default();
    let year = vars.get("year").unwrap_or_default();
    let raw_tags = vars.get("releaseTags").unwrap_or_default();

    let (title, tags) = match flavor {
        Flavor::Orpheus => {
            let mut segments: Vec<String> = raw_tags.split('/').map(str::to_string).collect();
            if let Some(last) = segments.last_mut() {
                if LAST_DECIMAL_TAG.is_match(last) {
                    last.push('%');
                }
            }
            (replace_separator(raw_title), clean_release_tags(&segments.join(" ")))
        }
        Flavor::Redacted => (raw_title.to_string(), clean_release_tags(raw_tags)),
    };

    if title.is_empty() {
        // Nothing to rebuild from; fall back to the announced name.
        let name = vars
            .get("torrentName")
            .filter(|n| !n.is_empty())
            .ok_or(NormalizeError::MissingTorrentName)?;
        let name = match flavor {
            Flavor::Orpheus => replace_separator(name),
            Flavor::Redacted => name.to_string(),
        };
        return Ok(Normalized {
            release_name: name,
            title: None,
            release_tags: Some(tags).filter(|t| !t.is_empty()),
        });
    }

    let parsed = parse_release_tags(dict, &tags);
    let audio: Vec<&str> = [
        parsed.source.as_str(),
        parsed.audio_format.as_str(),
        parsed.audio_bitrate.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect();

    Ok(Normalized {
        release_name: format!("{} [{}] ({})", title, year, audio.join(" ")),
        title: None,
        release_tags: Some(tags),
    })
}
