//! GazelleGames announces: `"<release name> in <game title>"`.

use std::sync::LazyLock;

use regex::Regex;

use super::{NormalizeError, Normalized};
use crate::vars::AnnounceVars;

static IOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<releaseName>.+) (v?(?P<major>0|[1-9]\d*)\.(?P<minor>0|[1-9]\d*)\.(?P<patch>0|[1-9]\d*)(?:-(?P<prerelease>(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+(?P<buildmetadata>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?) in (?P<title>.+)",
    )
    .expect("valid iOS regex")
});

static SWITCH_WINDOWS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<releaseName>.+?)(?:\s*-\s*(?P<update>Update))?(?:\s*-\s*(?P<version>Version\s.+))?\s+in\s+(?P<title>.+)$",
    )
    .expect("valid Switch/Windows regex")
});

static SWITCH_WINDOWS_FALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<releaseName>.+?)(?:\s*-\s*(?P<version>Version\s.+))?$")
        .expect("valid Switch/Windows fallback regex")
});

const SEPARATOR: &str = " in ";

/// Split at the middle occurrence of `sep`, so a separator inside the title
/// ("Trouble in Paradise") stays with the title.
pub fn split_in_middle(s: &str, sep: &str) -> (String, String) {
    if s.is_empty() {
        return (String::new(), String::new());
    }
    let parts: Vec<&str> = s.split(sep).collect();
    if parts.len() == 1 {
        return (s.to_string(), String::new());
    }
    let mid = parts.len() / 2;
    (parts[..mid].join(sep), parts[mid..].join(sep))
}

fn captures(re: &Regex, text: &str) -> Option<(String, String)> {
    let caps = re.captures(text)?;
    let name = caps.name("releaseName").map_or("", |m| m.as_str());
    let title = caps.name("title").map_or("", |m| m.as_str());
    Some((name.to_string(), title.to_string()))
}

fn unparsable(category: &str, name: &str) -> NormalizeError {
    NormalizeError::Unparsable {
        category: category.to_string(),
        name: name.to_string(),
    }
}

pub(super) fn normalize(vars: &AnnounceVars) -> Result<Normalized, NormalizeError> {
    let torrent_name = vars
        .get("torrentName")
        .filter(|n| !n.is_empty())
        .ok_or(NormalizeError::MissingTorrentName)?;
    let category = vars.get("category").unwrap_or_default();

    let (release_name, title) = match category {
        "OST" => (torrent_name.to_string(), String::new()),
        "Switch" | "Windows" => match captures(&SWITCH_WINDOWS, torrent_name) {
            Some(found) => found,
            None => {
                let (name, _) = captures(&SWITCH_WINDOWS_FALLBACK, torrent_name)
                    .ok_or_else(|| unparsable(category, torrent_name))?;
                let title = name.clone();
                (name, title)
            }
        },
        "iOS" => captures(&IOS, torrent_name).ok_or_else(|| unparsable(category, torrent_name))?,
        _ => {
            let (name, title) = split_in_middle(torrent_name, SEPARATOR);
            if name.is_empty() {
                (torrent_name.to_string(), title)
            } else {
                (name, title)
            }
        }
    };

    Ok(Normalized {
        release_name,
        title: Some(title).filter(|t| !t.is_empty()),
        release_tags: None,
    })
}
