//! Indexer announce normalizers.
//!
//! Some trackers pack more than a release name into their announce line. A
//! normalizer turns the announce variables into the release name handed to
//! the parser, plus an optional title that overrides the parsed one. It never
//! sets classification fields itself.

mod gazelle_games;
mod gazelle_music;

use phf::phf_map;
use thiserror::Error;

use crate::tags::TagDictionary;
use crate::vars::AnnounceVars;

/// Errors from normalizing an announce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("announce has no torrentName")]
    MissingTorrentName,

    #[error("failed to parse {category} torrentName: {name}")]
    Unparsable { category: String, name: String },
}

/// What a normalizer hands to the release parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Name to parse.
    pub release_name: String,
    /// Title that replaces the parsed one.
    pub title: Option<String>,
    /// Cleaned tag string that replaces the announced one.
    pub release_tags: Option<String>,
}

impl Normalized {
    fn name(release_name: impl Into<String>) -> Self {
        Self {
            release_name: release_name.into(),
            ..Self::default()
        }
    }
}

/// Announce grammar of an indexer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Normalizer {
    /// The announced name is the release name.
    #[default]
    Default,
    /// GazelleGames: `"<release> in <title>"` with per-category grammars.
    GazelleGames,
    /// Orpheus: en-dash separators, synthesized music name.
    Orpheus,
    /// Redacted: synthesized music name.
    Redacted,
}

static BY_INDEXER: phf::Map<&'static str, Normalizer> = phf_map! {
    "ggn" => Normalizer::GazelleGames,
    "gazellegames" => Normalizer::GazelleGames,
    "ops" => Normalizer::Orpheus,
    "orpheus" => Normalizer::Orpheus,
    "red" => Normalizer::Redacted,
    "redacted" => Normalizer::Redacted,
};

impl Normalizer {
    /// Normalizer used for an indexer identifier; unknown indexers get [`Normalizer::Default`].
    pub fn for_indexer(identifier: &str) -> Self {
        BY_INDEXER
            .get(identifier.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or_default()
    }

    /// Parse a configured normalizer name (`default`, `ggn`, `ops`, `red`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let key = name.to_ascii_lowercase();
        if key == "default" {
            return Some(Normalizer::Default);
        }
        BY_INDEXER.get(key.as_str()).copied()
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Normalizer::Default => "default",
            Normalizer::GazelleGames => "ggn",
            Normalizer::Orpheus => "ops",
            Normalizer::Redacted => "red",
        }
    }

    /// Turn announce variables into the parser input.
    pub fn normalize(
        &self,
        vars: &AnnounceVars,
        dict: &TagDictionary,
    ) -> Result<Normalized, NormalizeError> {
        match self {
            Normalizer::Default => {
                let name = vars
                    .get("torrentName")
                    .filter(|n| !n.is_empty())
                    .ok_or(NormalizeError::MissingTorrentName)?;
                Ok(Normalized::name(name))
            }
            Normalizer::GazelleGames => gazelle_games::normalize(vars),
            Normalizer::Orpheus => gazelle_music::normalize(vars, dict, gazelle_music::Flavor::Orpheus),
            Normalizer::Redacted => gazelle_music::normalize(vars, dict, gazelle_music::Flavor::Redacted),
        }
    }
}

impl std::fmt::Display for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
