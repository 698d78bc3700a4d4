//! Token types for the Logos-based lexer.

use logos::Logos;

/// Token types recognized by the lexer.
///
/// Only the structural parts of a release name get their own variant:
/// season/episode markers, years and delimiters. Quality tags are classified
/// by the tag dictionary instead and lex as plain words.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")]
pub enum Token<'src> {
    /// Season and episode identifier (e.g., S01E05, S1E1, S01E01E02, S01E12v2)
    #[regex(r"(?i)S[0-9]{1,4}E[0-9]{1,4}(?:E[0-9]{1,4})*(?:v[0-9]+)?", priority = 10)]
    SeasonEpisode(&'src str),

    /// Season x episode format (e.g., 1x05, 01x05)
    #[regex(r"[0-9]{1,2}x[0-9]{1,3}", priority = 9)]
    SeasonEpisodeX(&'src str),

    /// Season-only identifier (e.g., S01, S1) for full season releases
    #[regex(r"(?i)S[0-9]{1,4}", priority = 8)]
    SeasonOnly(&'src str),

    /// Spelled-out "Season" keyword
    #[regex(r"(?i)Season", priority = 7)]
    SeasonWord(&'src str),

    /// Spelled-out "Episode" keyword
    #[regex(r"(?i)Episode", priority = 7)]
    EpisodeWord(&'src str),

    /// Abbreviated episode (e.g., Ep06, Ep1)
    #[regex(r"(?i)Ep[0-9]{1,4}", priority = 9)]
    EpNumber(&'src str),

    /// Year (1900-2099)
    #[regex(r"(19|20)[0-9]{2}", priority = 5)]
    Year(&'src str),

    /// Dot delimiter
    #[token(".")]
    Dot,

    /// Hyphen delimiter
    #[token("-")]
    Hyphen,

    /// Underscore delimiter
    #[token("_")]
    Underscore,

    /// Opening square bracket
    #[token("[")]
    BracketOpen,

    /// Closing square bracket
    #[token("]")]
    BracketClose,

    /// Opening parenthesis
    #[token("(")]
    ParenOpen,

    /// Closing parenthesis
    #[token(")")]
    ParenClose,

    /// Generic word token (lower priority than specific patterns)
    #[regex(r"[a-zA-Z][a-zA-Z0-9'&+]*", priority = 1)]
    Word(&'src str),

    /// Numeric token
    #[regex(r"[0-9]+", priority = 2)]
    Number(&'src str),
}

impl Token<'_> {
    /// Whether this token separates words.
    pub fn is_delimiter(&self) -> bool {
        matches!(self, Token::Dot | Token::Hyphen | Token::Underscore)
    }

    /// Whether this token marks a season or an episode.
    pub fn is_episode_marker(&self) -> bool {
        matches!(
            self,
            Token::SeasonEpisode(_)
                | Token::SeasonEpisodeX(_)
                | Token::SeasonOnly(_)
                | Token::SeasonWord(_)
                | Token::EpisodeWord(_)
                | Token::EpNumber(_)
        )
    }
}
