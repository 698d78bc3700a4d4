//! Logos-based lexer for release names.
//!
//! This module provides tokenization using the [logos](https://docs.rs/logos) crate,
//! which generates a fast lexer from regex patterns at compile time.

mod token;
pub use token::Token;

use logos::Logos;
use std::ops::Range;

/// A lexer that tokenizes release names using Logos.
///
/// Characters no pattern accepts (punctuation, non-ASCII letters) are
/// dropped; spans still point into the original input.
pub struct Lexer<'src> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
    input: &'src str,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given input.
    ///
    /// Tokenizes the entire input string immediately using Logos.
    pub fn new(input: &'src str) -> Self {
        let tokens: Vec<_> = Token::lexer(input)
            .spanned()
            .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
            .collect();
        Self { tokens, input }
    }

    /// Get all tokens with their spans.
    pub fn tokens(&self) -> &[(Token<'src>, Range<usize>)] {
        &self.tokens
    }

    /// Get the original input string.
    pub fn input(&self) -> &'src str {
        self.input
    }

    /// Index of the next non-delimiter token after `idx`.
    pub fn next_significant(&self, idx: usize) -> Option<usize> {
        (idx + 1..self.tokens.len()).find(|&i| !self.tokens[i].0.is_delimiter())
    }

    /// Index of the previous non-delimiter token before `idx`.
    pub fn prev_significant(&self, idx: usize) -> Option<usize> {
        (0..idx).rev().find(|&i| !self.tokens[i].0.is_delimiter())
    }
}
