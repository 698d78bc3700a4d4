//! Shared type definitions.
//!
//! Enums in this module are serialized in lowercase so they read the same in
//! TOML filter definitions and JSON output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of a parsed release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    /// Nothing in the name identified the release.
    #[default]
    Unknown,
    /// A single film.
    Movie,
    /// A single TV episode.
    Episode,
    /// A full season pack.
    Season,
    /// A music release.
    Album,
}

impl ReleaseType {
    /// Lowercase name, as used in filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Movie => "movie",
            Self::Episode => "episode",
            Self::Season => "season",
            Self::Album => "album",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReleaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unknown" => Ok(Self::Unknown),
            "movie" => Ok(Self::Movie),
            "episode" => Ok(Self::Episode),
            "season" => Ok(Self::Season),
            "album" => Ok(Self::Album),
            _ => Err(format!("Invalid release type: {}", s)),
        }
    }
}
