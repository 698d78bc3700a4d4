//! Metadata extraction: year, air date, release group, language, streaming
//! service, region and the PROPER flag.

use std::ops::Range;
use std::sync::LazyLock;

use phf::phf_map;
use regex::Regex;

use crate::config::ParserConfig;
use crate::lexer::{Lexer, Token};
use crate::tags::{TagCategory, TagDictionary};

/// Language keywords. Keys are lowercase.
static LANGUAGES: phf::Map<&'static str, &'static str> = phf_map! {
    "multi" => "MULTi",
    "dual" => "DUAL",
    "english" => "ENGLiSH",
    "french" => "FRENCH",
    "truefrench" => "TRUEFRENCH",
    "vff" => "VFF",
    "vostfr" => "VOSTFR",
    "german" => "GERMAN",
    "nordic" => "NORDiC",
    "swedish" => "SWEDiSH",
    "danish" => "DANiSH",
    "norwegian" => "NORWEGiAN",
    "finnish" => "FiNNiSH",
    "dutch" => "DUTCH",
    "flemish" => "FLEMiSH",
    "italian" => "iTALiAN",
    "spanish" => "SPANiSH",
    "castellano" => "CASTELLANO",
    "latino" => "LATiNO",
    "portuguese" => "PORTUGUESE",
    "polish" => "POLiSH",
    "russian" => "RUSSiAN",
    "czech" => "CZECH",
    "hungarian" => "HUNGARiAN",
    "turkish" => "TURKiSH",
    "japanese" => "JAPANESE",
    "korean" => "KOREAN",
    "chinese" => "CHiNESE",
    "hindi" => "HiNDi",
    "subbed" => "SUBBED",
    "dubbed" => "DUBBED",
};

/// Streaming service abbreviations. Keys are lowercase.
static WEBSITES: phf::Map<&'static str, &'static str> = phf_map! {
    "amzn" => "AMZN",
    "nf" => "NF",
    "dsnp" => "DSNP",
    "atvp" => "ATVP",
    "hmax" => "HMAX",
    "hulu" => "HULU",
    "pcok" => "PCOK",
    "pmtp" => "PMTP",
    "stan" => "STAN",
    "crav" => "CRAV",
    "itunes" => "iTunes",
    "red" => "RED",
    "cr" => "CR",
    "hidi" => "HIDI",
    "sho" => "SHO",
    "bcore" => "BCORE",
};

/// Disc and game regions. Keys are lowercase.
static REGIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "usa" => "USA",
    "eur" => "EUR",
    "pal" => "PAL",
    "jpn" => "JPN",
    "kor" => "KOR",
    "chn" => "CHN",
    "ntsc" => "NTSC",
    "r1" => "R1",
    "r2" => "R2",
    "r3" => "R3",
    "r4" => "R4",
    "r5" => "R5",
    "r6" => "R6",
};

static TRAILING_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"-(?P<group>[\p{L}\p{N}][\p{L}\p{N}_]*)(?:\[[^\]]*\])?(?:\.(?i:mkv|mp4|avi|m2ts|ts|iso|nzb|torrent))?\s*$",
    )
    .expect("valid trailing group regex")
});

static FILE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(?:mkv|mp4|avi|m2ts|ts|iso|nzb|torrent)\s*$").expect("valid file extension regex")
});

static LEADING_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[(?P<group>[^\]\d][^\]]*)\]\s*").expect("valid leading group regex"));

// Suffixes of hyphenated quality tags that are never a group (WEB-DL, BD-RiP, DTS-HD).
const NOT_A_GROUP: &[&str] = &["DL", "HD", "RIP", "SCR", "MA", "X", "LC", "AUDIO", "RAY"];

/// An air date such as `2024.03.15`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirDate {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub span: Range<usize>,
}

/// Find a `YYYY.MM.DD` (or `YYYY-MM-DD`) date.
pub fn extract_date(lexer: &Lexer) -> Option<AirDate> {
    let tokens = lexer.tokens();
    tokens.windows(5).find_map(|w| {
        let (Token::Year(y), Token::Number(m), Token::Number(d)) = (&w[0].0, &w[2].0, &w[4].0) else {
            return None;
        };
        let separated = matches!(w[1].0, Token::Dot | Token::Hyphen) && matches!(w[3].0, Token::Dot | Token::Hyphen);
        if !separated || m.len() != 2 || d.len() != 2 {
            return None;
        }
        let month: i32 = m.parse().ok()?;
        let day: i32 = d.parse().ok()?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(AirDate {
            year: y.parse().ok()?,
            month,
            day,
            span: w[0].1.start..w[4].1.end,
        })
    })
}

fn is_skippable(token: &Token<'_>) -> bool {
    token.is_delimiter()
        || matches!(
            token,
            Token::BracketOpen | Token::BracketClose | Token::ParenOpen | Token::ParenClose
        )
}

/// Pick the release year.
///
/// With a season/episode marker, the year right before the marker wins,
/// otherwise the last year before it. Without one, the last year before the
/// resolution tag wins. A year that is the first word of the title is never
/// picked, so "2012.2009.1080p" keeps "2012" as title.
pub fn extract_year(
    lexer: &Lexer,
    title_start: usize,
    marker: Option<usize>,
    resolution_start: Option<usize>,
    config: &ParserConfig,
) -> Option<(i32, Range<usize>)> {
    let tokens = lexer.tokens();
    let first_word = tokens
        .iter()
        .position(|(t, span)| span.start >= title_start && !is_skippable(t));

    let candidates: Vec<(usize, i32, Range<usize>)> = tokens
        .iter()
        .enumerate()
        .filter(|(idx, _)| Some(*idx) != first_word)
        .filter_map(|(idx, (token, span))| match token {
            Token::Year(text) => {
                let year: i32 = text.parse().ok()?;
                config.accepts_year(year).then(|| (idx, year, span.clone()))
            }
            _ => None,
        })
        .collect();

    if let Some(marker) = marker {
        let marker_idx = tokens.iter().position(|(_, span)| span.start == marker)?;
        let adjacent = (0..marker_idx).rev().find(|&i| !is_skippable(&tokens[i].0));
        if let Some(found) = candidates.iter().find(|(idx, _, _)| Some(*idx) == adjacent) {
            return Some((found.1, found.2.clone()));
        }
        return candidates
            .iter()
            .rev()
            .find(|(_, _, span)| span.start < marker)
            .map(|(_, year, span)| (*year, span.clone()));
    }

    let limit = resolution_start.unwrap_or(usize::MAX);
    candidates
        .iter()
        .rev()
        .find(|(_, _, span)| span.start < limit)
        .or_else(|| candidates.last())
        .map(|(_, year, span)| (*year, span.clone()))
}

/// Trailing `-GROUP` of a release name whose hyphen is at or after `after`.
pub fn extract_group(dict: &TagDictionary, name: &str, after: usize) -> Option<(String, Range<usize>)> {
    let caps = TRAILING_GROUP.captures(name)?;
    let group = caps.name("group")?;
    if group.start() <= after {
        return None;
    }

    let text = group.as_str();
    if NOT_A_GROUP.iter().any(|tag| tag.eq_ignore_ascii_case(text)) {
        return None;
    }
    let is_tag = [TagCategory::Codecs, TagCategory::Source, TagCategory::Resolution]
        .into_iter()
        .filter_map(|category| dict.scan_first(category, text))
        .any(|m| m.span == (0..text.len()));
    if is_tag {
        return None;
    }

    Some((text.to_string(), group.start() - 1..name.len()))
}

/// Start of a trailing file extension such as `.mkv`.
pub fn extension_start(name: &str) -> Option<usize> {
    FILE_EXTENSION.find(name).map(|m| m.start())
}

/// Anime-style leading `[Group]`; returns the group and where the title starts.
pub fn leading_group(name: &str) -> Option<(String, usize)> {
    let caps = LEADING_GROUP.captures(name)?;
    let group = caps.name("group")?.as_str().trim();
    if group.is_empty() {
        return None;
    }
    Some((group.to_string(), caps.get(0)?.end()))
}

/// Keyword-derived fields found after the title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extras {
    pub language: Vec<String>,
    pub website: String,
    pub region: String,
    pub proper: bool,
    pub repack: bool,
}

/// Look up words within `range` in the language, streaming and region tables.
pub fn extract_extras(lexer: &Lexer, range: Range<usize>) -> Extras {
    let mut extras = Extras::default();

    for (token, span) in lexer.tokens() {
        if span.start < range.start || span.end > range.end {
            continue;
        }
        let Token::Word(word) = token else {
            continue;
        };
        let key = word.to_ascii_lowercase();

        if let Some(language) = LANGUAGES.get(key.as_str()) {
            if !extras.language.iter().any(|l| l == language) {
                extras.language.push(language.to_string());
            }
        } else if let Some(website) = WEBSITES.get(key.as_str()) {
            if extras.website.is_empty() {
                extras.website = website.to_string();
            }
        } else if let Some(region) = REGIONS.get(key.as_str()) {
            if extras.region.is_empty() {
                extras.region = region.to_string();
            }
        } else if key == "proper" {
            extras.proper = true;
        } else if key == "repack" || key == "rerepack" {
            extras.repack = true;
        }
    }

    extras
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(input: &str) -> Option<i32> {
        let lexer = Lexer::new(input);
        let marker = crate::parser::episode::extract(&lexer).start;
        let resolution = TagDictionary::global()
            .scan_first(TagCategory::Resolution, input)
            .map(|m| m.span.start);
        extract_year(&lexer, 0, marker, resolution, &ParserConfig::default()).map(|(y, _)| y)
    }

    #[test]
    fn test_movie_year() {
        assert_eq!(year("That Movie 2020 2160p BluRay DD5.1 x264-GROUP1"), Some(2020));
        assert_eq!(year("Blade.Runner.2049.2017.1080p.BluRay"), Some(2017));
        assert_eq!(year("2012.2009.1080p.BluRay"), Some(2009));
        assert_eq!(year("1917.1080p.BluRay"), None);
    }

    #[test]
    fn test_tv_year_adjacent_to_marker() {
        assert_eq!(year("Show.2019.S01E01.1080p"), Some(2019));
        assert_eq!(year("Show (2005) S01E01 720p"), Some(2005));
        assert_eq!(year("Show.S01E01.1080p"), None);
    }

    #[test]
    fn test_year_window() {
        let config = ParserConfig::builder().min_year(2000).build();
        let lexer = Lexer::new("Old Movie 1950 720p");
        assert_eq!(extract_year(&lexer, 0, None, None, &config), None);
    }

    #[test]
    fn test_extract_date() {
        let date = extract_date(&Lexer::new("Late.Show.2024.03.15.720p.WEB")).unwrap();
        assert_eq!((date.year, date.month, date.day), (2024, 3, 15));
        assert!(extract_date(&Lexer::new("Movie.2024.1080p")).is_none());
        assert!(extract_date(&Lexer::new("Show.2024.13.40.720p")).is_none());
    }

    #[test]
    fn test_extract_group() {
        let dict = TagDictionary::global();
        let name = "That Movie 2020 2160p BluRay DD5.1 x264-GROUP1";
        assert_eq!(extract_group(dict, name, 11).map(|(g, _)| g), Some("GROUP1".to_string()));
        assert_eq!(
            extract_group(dict, "Show.S01E01.720p.HDTV.x264-ift.mkv", 5).map(|(g, _)| g),
            Some("ift".to_string())
        );
        assert_eq!(extract_group(dict, "Movie.2020.1080p.WEB-DL", 6), None);
        assert_eq!(extract_group(dict, "Spider-Man", 11), None);
        assert_eq!(
            extract_group(dict, "Ünïcödé.Fïlm.2020.1080p.BluRay.x264-GRÜP", 12).map(|(g, _)| g),
            Some("GRÜP".to_string())
        );
    }

    #[test]
    fn test_extension_start() {
        assert_eq!(extension_start("Some.Name-GROUP[rartv].mkv"), Some(22));
        assert_eq!(extension_start("Show.S01E01.720p.HDTV.x264-ift.MP4"), Some(30));
        assert_eq!(extension_start("Some.Name-GROUP"), None);
    }

    #[test]
    fn test_leading_group() {
        assert_eq!(
            leading_group("[SubGroup] Anime Title - 01 [1080p]"),
            Some(("SubGroup".to_string(), 11))
        );
        assert_eq!(leading_group("[2020] Movie"), None);
        assert_eq!(leading_group("Movie [2020]"), None);
    }

    #[test]
    fn test_extract_extras() {
        let input = "Movie.2020.MULTi.FRENCH.1080p.AMZN.WEB-DL.PROPER-GRP";
        let lexer = Lexer::new(input);
        let extras = extract_extras(&lexer, 6..input.len());
        assert_eq!(extras.language, vec!["MULTi", "FRENCH"]);
        assert_eq!(extras.website, "AMZN");
        assert!(extras.proper);
        assert!(!extras.repack);
    }
}
