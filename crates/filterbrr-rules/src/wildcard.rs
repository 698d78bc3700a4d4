//! Glob-style wildcard patterns.
//!
//! `*` matches any run of characters, `?` exactly one, and `|` separates
//! alternatives. Everything else is literal. Patterns are compiled to
//! anchored, case-insensitive regexes through the [`PatternCache`].

use crate::cache::PatternCache;

/// Whether `pattern` uses wildcard syntax.
pub fn is_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?', '|'])
}

/// Translate a wildcard pattern into regex source.
pub fn to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 12);
    out.push_str("(?is)^(?:");
    for (i, alternative) in pattern.split('|').enumerate() {
        if i > 0 {
            out.push('|');
        }
        let mut literal = String::new();
        for c in alternative.chars() {
            match c {
                '*' | '?' => {
                    out.push_str(&regex::escape(&literal));
                    literal.clear();
                    out.push_str(if c == '*' { ".*" } else { "." });
                }
                c => literal.push(c),
            }
        }
        out.push_str(&regex::escape(&literal));
    }
    out.push_str(")$");
    out
}

/// Match `text` against a single wildcard pattern.
pub fn is_match(cache: &PatternCache, pattern: &str, text: &str) -> bool {
    match pattern {
        "" => text.is_empty(),
        "*" => true,
        _ => match cache.compile(&to_regex(pattern)) {
            Ok(re) => re.is_match(text),
            Err(err) => {
                tracing::warn!(pattern, error = %err, "could not compile wildcard");
                false
            }
        },
    }
}

/// Match `text` against any of `patterns`.
pub fn match_any<P: AsRef<str>>(cache: &PatternCache, patterns: &[P], text: &str) -> bool {
    patterns.iter().any(|p| is_match(cache, p.as_ref(), text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, text: &str) -> bool {
        is_match(&PatternCache::disabled(), pattern, text)
    }

    #[test]
    fn test_is_wildcard() {
        assert!(is_wildcard("*tv*"));
        assert!(is_wildcard("S0?"));
        assert!(is_wildcard("movies|tv"));
        assert!(!is_wildcard("Movies"));
    }

    #[test]
    fn test_to_regex_escapes_metacharacters() {
        assert_eq!(to_regex("a.b*"), r"(?is)^(?:a\.b.*)$");
        assert_eq!(to_regex("(x)?"), r"(?is)^(?:\(x\).)$");
    }

    #[test]
    fn test_star_and_question_mark() {
        assert!(matches("*tv*", "TV/HD"));
        assert!(matches("*2160p*", "That Movie 2020 2160p BluRay"));
        assert!(matches("S0?", "s01"));
        assert!(!matches("S0?", "S010"));
        assert!(!matches("*tv*", "Movies"));
    }

    #[test]
    fn test_anchored() {
        assert!(!matches("movie", "That Movie 2020"));
        assert!(matches("that movie*", "That Movie 2020"));
    }

    #[test]
    fn test_alternatives() {
        assert!(matches("movies*|tv*", "TV/SD"));
        assert!(!matches("movies*|tv*", "Music"));
    }

    #[test]
    fn test_empty_and_star() {
        assert!(matches("", ""));
        assert!(!matches("", "x"));
        assert!(matches("*", ""));
    }

    #[test]
    fn test_match_any() {
        let cache = PatternCache::disabled();
        assert!(match_any(&cache, &["*.mkv", "*.mp4"], "video.MP4"));
        assert!(!match_any::<&str>(&cache, &[], "video.mp4"));
    }
}
