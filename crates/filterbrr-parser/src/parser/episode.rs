//! Season and episode extraction.
//!
//! Recognises `S01E02` (and multi-episode `S01E02E03`), `1x02`, season-only
//! `S01`, the spelled-out `Season N` / `Episode N` words and `EpN`.

use crate::lexer::{Lexer, Token};

/// Season/episode numbers and where the first marker starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeInfo {
    pub season: i32,
    pub episode: i32,
    /// Byte offset of the first season or episode marker.
    pub start: Option<usize>,
}

impl EpisodeInfo {
    fn mark(&mut self, start: usize) {
        self.start = Some(self.start.map_or(start, |s| s.min(start)));
    }
}

/// Parse `S01E05`, `S1E1E2` or `S01E12v2` into (season, first episode).
pub fn parse_season_episode(text: &str) -> Option<(i32, i32)> {
    let lower = text.to_ascii_lowercase();
    let rest = lower.strip_prefix('s')?;
    let mut parts = rest.split('e');
    let season = parts.next()?.parse().ok()?;
    let episode = parts
        .next()?
        .split('v')
        .next()?
        .parse()
        .ok()?;
    Some((season, episode))
}

/// Parse `1x05` into (season, episode).
pub fn parse_season_episode_x(text: &str) -> Option<(i32, i32)> {
    let (season, episode) = text.split_once(['x', 'X'])?;
    Some((season.parse().ok()?, episode.parse().ok()?))
}

fn number_after(lexer: &Lexer, idx: usize) -> Option<(i32, usize)> {
    let next = lexer.next_significant(idx)?;
    match &lexer.tokens()[next].0 {
        Token::Number(n) | Token::Year(n) if n.len() <= 4 => Some((n.parse().ok()?, next)),
        _ => None,
    }
}

/// Extract season and episode numbers; the first marker of each kind wins.
pub fn extract(lexer: &Lexer) -> EpisodeInfo {
    let mut info = EpisodeInfo::default();
    let tokens = lexer.tokens();

    for (idx, (token, span)) in tokens.iter().enumerate() {
        match token {
            Token::SeasonEpisode(text) => {
                if let Some((season, episode)) = parse_season_episode(text) {
                    if info.season == 0 && info.episode == 0 {
                        info.season = season;
                        info.episode = episode;
                    }
                    info.mark(span.start);
                }
            }
            Token::SeasonEpisodeX(text) => {
                if let Some((season, episode)) = parse_season_episode_x(text) {
                    if info.season == 0 && info.episode == 0 {
                        info.season = season;
                        info.episode = episode;
                    }
                    info.mark(span.start);
                }
            }
            Token::SeasonOnly(text) => {
                if let Ok(season) = text[1..].parse::<i32>() {
                    if info.season == 0 {
                        info.season = season;
                    }
                    info.mark(span.start);
                }
            }
            Token::SeasonWord(_) => {
                if let Some((season, _)) = number_after(lexer, idx) {
                    if info.season == 0 {
                        info.season = season;
                    }
                    info.mark(span.start);
                }
            }
            Token::EpisodeWord(_) => {
                if let Some((episode, _)) = number_after(lexer, idx) {
                    if info.episode == 0 {
                        info.episode = episode;
                    }
                    info.mark(span.start);
                }
            }
            Token::EpNumber(text) => {
                if let Ok(episode) = text[2..].parse::<i32>() {
                    if info.episode == 0 {
                        info.episode = episode;
                    }
                    info.mark(span.start);
                }
            }
            _ => {}
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> EpisodeInfo {
        extract(&Lexer::new(input))
    }

    #[test]
    fn test_parse_season_episode() {
        assert_eq!(parse_season_episode("S01E05"), Some((1, 5)));
        assert_eq!(parse_season_episode("s1e1"), Some((1, 1)));
        assert_eq!(parse_season_episode("S01E01E02"), Some((1, 1)));
        assert_eq!(parse_season_episode("S01E12v2"), Some((1, 12)));
        assert_eq!(parse_season_episode("X01E01"), None);
    }

    #[test]
    fn test_standard_episode() {
        let info = run("Breaking.Bad.S01E01.720p.BluRay.x264-DEMAND");
        assert_eq!(info.season, 1);
        assert_eq!(info.episode, 1);
        assert_eq!(info.start, Some(13));
    }

    #[test]
    fn test_x_format() {
        let info = run("Show.1x02.HDTV");
        assert_eq!((info.season, info.episode), (1, 2));
    }

    #[test]
    fn test_season_pack() {
        let info = run("Show.S03.1080p.WEB-DL-GRP");
        assert_eq!((info.season, info.episode), (3, 0));
        assert_eq!(info.start, Some(5));
    }

    #[test]
    fn test_spelled_out_words() {
        let info = run("Show Season 2 Episode 7 720p");
        assert_eq!((info.season, info.episode), (2, 7));
        assert_eq!(info.start, Some(5));

        let info = run("Show Ep06 1080p");
        assert_eq!((info.season, info.episode), (0, 6));
    }

    #[test]
    fn test_movie_has_no_episode() {
        let info = run("That Movie 2020 2160p BluRay DD5.1 x264-GROUP1");
        assert_eq!(info, EpisodeInfo::default());
    }
}
