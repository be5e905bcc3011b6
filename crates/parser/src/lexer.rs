//! Logos-based lexer for the relation text DSL.
//!
//! The lexer is not used by [`parse_relation`](crate::parse_relation); it
//! exists for editors and the web front end, which highlight the source
//! without building a relation.
//!
//! # Example input
//!
//! ```text
//! // employees
//! E, N, D, M
//! E -> N, D
//! D --> M
//! ```

use core::ops::Range;

/// All token kinds produced by the DSL lexer.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(::logos::Logos, Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A line comment starting with `//` and running to end of line.
    #[regex(r"//[^\n]*", allow_greedy = true)]
    Comment,

    /// Dependency arrow: one or more `-` followed by `>`.
    #[regex(r"-+>")]
    Arrow,

    /// Attribute separator `,`.
    #[token(",")]
    Comma,

    /// An attribute name.
    #[regex(r"[A-Za-z0-9_]+")]
    Ident,

    /// A newline (`\n` or `\r\n`).
    #[regex(r"\r?\n")]
    Newline,

    /// Spaces or tabs.
    #[regex(r"[ \t]+")]
    Whitespace,
}

/// A single token with its kind and the byte-offset span in the source.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range `start..end` into the original input string.
    pub span: Range<usize>,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Return the source text for this token given the original input.
    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.clone()]
    }
}

/// Tokenize `input` and return all valid tokens.
///
/// Characters the lexer cannot recognise are skipped.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    use logos::Logos as _;
    TokenKind::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|kind| Token { kind, span }))
        .collect()
}

/// Tokenize `input` and return tokens paired with their source text slices.
#[must_use]
pub fn tokenize_with_text(input: &str) -> Vec<(Token, &str)> {
    use logos::Logos as _;
    TokenKind::lexer(input)
        .spanned()
        .filter_map(|(result, span)| {
            result.ok().map(|kind| {
                let text = &input[span.clone()];
                (Token { kind, span }, text)
            })
        })
        .collect()
}
