//! Title cleanup and the music artist/album split.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static FEATURING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[\(\[]\s*(?:feat|ft)\.?\s[^\)\]]*[\)\]]").expect("valid featuring regex")
});

static TRAILING_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:\([^\)]*\)|\[[^\]]*\])\s*$").expect("valid bracket regex"));

/// Replace separators with spaces.
///
/// Scene names (no spaces) use dots and underscores as separators. Names
/// that already contain spaces keep their dots ("Vol. 2", "Mr. Robot").
pub fn normalize(name: &str) -> String {
    let replaced: String = if name.contains(' ') {
        name.replace('_', " ")
    } else {
        name.replace(['.', '_'], " ")
    };
    WHITESPACE.replace_all(replaced.trim(), " ").into_owned()
}

/// Turn the raw title slice of a release name into a display title.
pub fn clean(raw: &str, keep_dots: bool) -> String {
    let replaced: String = if keep_dots {
        raw.replace('_', " ")
    } else {
        raw.replace(['.', '_'], " ")
    };
    let collapsed = WHITESPACE.replace_all(&replaced, " ");
    collapsed
        .trim_end_matches([' ', '-', '(', '[', '{'])
        .trim_start_matches([' ', '-'])
        .to_string()
}

/// Split `Artist - Album` at the first " - ".
///
/// Featuring credits and trailing bracket groups are removed from the album.
pub fn split_music(title: &str) -> Option<(String, String)> {
    let (artists, album) = title.split_once(" - ")?;
    let artists = artists.trim();
    if artists.is_empty() {
        return None;
    }

    let mut album = FEATURING.replace_all(album, "").into_owned();
    while TRAILING_BRACKETS.is_match(&album) {
        let stripped = TRAILING_BRACKETS.replace(&album, "").into_owned();
        if stripped.trim().is_empty() {
            break;
        }
        album = stripped;
    }

    Some((artists.to_string(), album.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize("The.Matrix.1999.1080p.BluRay.x264-GROUP"),
            "The Matrix 1999 1080p BluRay x264-GROUP"
        );
        assert_eq!(normalize("Mr. Robot S01E01 720p"), "Mr. Robot S01E01 720p");
        assert_eq!(normalize("Some_Show__S01"), "Some Show S01");
    }

    #[test]
    fn test_clean_trims_separators() {
        assert_eq!(clean("Breaking.Bad.", false), "Breaking Bad");
        assert_eq!(clean("Show (", true), "Show");
        assert_eq!(clean("Show - ", true), "Show");
        assert_eq!(clean("(500) Days of Summer ", true), "(500) Days of Summer");
    }

    #[test]
    fn test_split_music() {
        assert_eq!(
            split_music("Busta Rhymes - BEACH BALL (feat. BIA)"),
            Some(("Busta Rhymes".to_string(), "BEACH BALL".to_string()))
        );
        assert_eq!(
            split_music("Artist - Album (Deluxe Edition) [Remastered]"),
            Some(("Artist".to_string(), "Album".to_string()))
        );
        assert_eq!(split_music("No Separator Here"), None);
        assert_eq!(split_music(" - Album"), None);
    }
}
