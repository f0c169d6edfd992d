#![warn(missing_docs)]
//! `textedit-lang` - data-driven language configuration helpers for `textedit-core`.
//!
//! This crate intentionally stays lightweight and does **not** depend on any parsing or
//! highlighting systems. It provides small structs that hosts can use to configure
//! editing features (auto-pairing, smart newline, block analysis) in a language-aware way.

/// A single open/close delimiter pair (e.g. `(` / `)` or `"` / `"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterPair {
    /// Opening delimiter.
    pub open: char,
    /// Closing delimiter.
    pub close: char,
}

impl DelimiterPair {
    /// Create a new delimiter pair.
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// Returns `true` if the opener and closer are the same character (quotes).
    pub fn is_symmetric(&self) -> bool {
        self.open == self.close
    }
}

/// Pairing table used for auto-closing and for smart newline expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairConfig {
    /// Configured pairs, in lookup order.
    pub pairs: Vec<DelimiterPair>,
}

impl PairConfig {
    /// Create a pairing table from `(open, close)` tuples.
    pub fn new(pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(open, close)| DelimiterPair::new(open, close))
                .collect(),
        }
    }

    /// Brackets and quotes: `()`, `[]`, `{}`, `""`, `''`, `` ` ` ``.
    pub fn brackets_and_quotes() -> Self {
        Self::new([
            ('(', ')'),
            ('[', ']'),
            ('{', '}'),
            ('"', '"'),
            ('\'', '\''),
            ('`', '`'),
        ])
    }

    /// A table with no pairs (disables pairing-dependent behavior).
    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Returns the closer for `open`, if `open` starts a configured pair.
    pub fn closer_for(&self, open: char) -> Option<char> {
        self.pairs.iter().find(|p| p.open == open).map(|p| p.close)
    }

    /// Returns `true` if `ch` closes some configured pair.
    pub fn is_closer(&self, ch: char) -> bool {
        self.pairs.iter().any(|p| p.close == ch)
    }

    /// Returns `true` if `open`/`close` form a configured pair.
    pub fn is_pair(&self, open: char, close: char) -> bool {
        self.pairs.iter().any(|p| p.open == open && p.close == close)
    }

    /// Returns `true` if no pairs are configured.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for PairConfig {
    fn default() -> Self {
        Self::brackets_and_quotes()
    }
}

/// How block ranges are derived from document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockSyntax {
    /// Nesting of bracket pairs (code).
    Brackets(Vec<DelimiterPair>),
    /// Nesting of open/close tags (markup).
    Markup,
}

impl BlockSyntax {
    /// Curly braces, square brackets and parentheses.
    pub fn code() -> Self {
        Self::Brackets(vec![
            DelimiterPair::new('{', '}'),
            DelimiterPair::new('[', ']'),
            DelimiterPair::new('(', ')'),
        ])
    }
}

impl Default for BlockSyntax {
    fn default() -> Self {
        Self::code()
    }
}

/// Language-level configuration bundle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguageConfig {
    /// Auto-pairing / smart newline table.
    pub pairs: PairConfig,
    /// Block analysis syntax.
    pub blocks: BlockSyntax,
}

impl LanguageConfig {
    /// Configuration for brace-structured source code.
    pub fn code() -> Self {
        Self::default()
    }

    /// Configuration for tag-structured markup (HTML/XML). `<` is not auto-paired.
    pub fn markup() -> Self {
        Self {
            pairs: PairConfig::new([('(', ')'), ('[', ']'), ('{', '}'), ('"', '"'), ('\'', '\'')]),
            blocks: BlockSyntax::Markup,
        }
    }

    /// Plain text: no pairing, bracket blocks only.
    pub fn plain_text() -> Self {
        Self {
            pairs: PairConfig::empty(),
            blocks: BlockSyntax::code(),
        }
    }
}
