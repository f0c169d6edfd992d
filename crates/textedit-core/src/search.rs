//! Text search helpers.
//!
//! Searches run line by line over the buffer and report **character** columns (not byte
//! offsets). Matches never span a newline. Supported modes:
//!
//! - plain substring search, case-insensitive for the buffer-level
//!   [`crate::Buffer::search_all`]
//! - regex search
//! - optional whole-word matching

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Options that control how search is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, matches only whole words (alphanumeric and `_`).
    pub whole_word: bool,
    /// If `true`, treats the query as a regex pattern.
    pub regex: bool,
}

impl SearchOptions {
    /// Case-insensitive literal substring search.
    pub const fn plain() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            regex: false,
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
            regex: false,
        }
    }
}

/// A match inside one line: `line`, starting character `column`, and `length` in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchHit {
    /// Zero-based line index.
    pub line: usize,
    /// Character column where the match starts.
    pub column: usize,
    /// Match length in characters.
    pub length: usize,
}

impl SearchHit {
    /// Start position of the match.
    pub fn start(&self) -> crate::Position {
        crate::Position::new(self.line, self.column)
    }

    /// Exclusive end position of the match.
    pub fn end(&self) -> crate::Position {
        crate::Position::new(self.line, self.column + self.length)
    }
}

/// Search errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The provided regex pattern failed to compile.
    #[error("Invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),
}

#[derive(Debug)]
struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }

    fn char_at(&self, text: &str, char_offset: usize) -> Option<char> {
        if char_offset >= self.char_count() {
            return None;
        }
        let start = self.char_to_byte[char_offset];
        let end = self.char_to_byte[char_offset + 1];
        text.get(start..end)?.chars().next()
    }
}

/// A compiled query that can be run against many lines.
#[derive(Debug)]
pub(crate) struct LineMatcher {
    pattern: Pattern,
    whole_word: bool,
}

/// Plain queries are matched with `str::match_indices`; only regex queries compile.
#[derive(Debug)]
enum Pattern {
    Regex(Regex),
    Literal { needle: String, case_sensitive: bool },
}

impl LineMatcher {
    pub(crate) fn new(query: &str, options: SearchOptions) -> Result<Self, SearchError> {
        let pattern = if options.regex {
            let re = RegexBuilder::new(query)
                .case_insensitive(!options.case_sensitive)
                .build()?;
            Pattern::Regex(re)
        } else if options.case_sensitive {
            Pattern::Literal {
                needle: query.to_string(),
                case_sensitive: true,
            }
        } else {
            Pattern::Literal {
                needle: fold_case(query),
                case_sensitive: false,
            }
        };

        Ok(Self {
            pattern,
            whole_word: options.whole_word,
        })
    }

    /// All non-empty matches in `text`, as `(start_char, len_chars)`.
    pub(crate) fn find_all(&self, text: &str) -> Vec<(usize, usize)> {
        let index = CharIndex::new(text);
        let spans: Vec<(usize, usize)> = match &self.pattern {
            Pattern::Regex(re) => re
                .find_iter(text)
                .map(|m| (index.byte_to_char(m.start()), index.byte_to_char(m.end())))
                .collect(),
            Pattern::Literal {
                needle,
                case_sensitive: true,
            } => literal_spans(text, &index, needle),
            Pattern::Literal { needle, .. } => {
                // Folding maps char to char, so columns in the folded line match the original.
                let folded = fold_case(text);
                literal_spans(&folded, &CharIndex::new(&folded), needle)
            }
        };

        spans
            .into_iter()
            .filter(|&(start, end)| start < end)
            .filter(|&(start, end)| !self.whole_word || is_whole_word(text, &index, start, end))
            .map(|(start, end)| (start, end - start))
            .collect()
    }
}

fn literal_spans(haystack: &str, index: &CharIndex, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack
        .match_indices(needle)
        .map(|(at, m)| (index.byte_to_char(at), index.byte_to_char(at + m.len())))
        .collect()
}

/// Lowercase every char that lowercases to exactly one char; leave the rest alone.
fn fold_case(text: &str) -> String {
    text.chars()
        .map(|ch| {
            let mut lower = ch.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(folded), None) => folded,
                _ => ch,
            }
        })
        .collect()
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn is_whole_word(text: &str, index: &CharIndex, start: usize, end: usize) -> bool {
    let before = if start == 0 {
        None
    } else {
        index.char_at(text, start - 1)
    };
    let after = index.char_at(text, end);

    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Run `query` over every line, returning hits in document order.
///
/// An empty query yields no hits.
pub fn search_lines<S: AsRef<str>>(
    lines: &[S],
    query: &str,
    options: SearchOptions,
) -> Result<Vec<SearchHit>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let matcher = LineMatcher::new(query, options)?;
    let hits = lines
        .iter()
        .enumerate()
        .flat_map(|(line, text)| {
            matcher
                .find_all(text.as_ref())
                .into_iter()
                .map(move |(column, length)| SearchHit {
                    line,
                    column,
                    length,
                })
        })
        .collect();

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_search_ignores_case() {
        let hits = search_lines(&["Hello hello", "HELLO"], "hello", SearchOptions::plain())
            .expect("literal query");
        let columns: Vec<(usize, usize)> = hits.iter().map(|h| (h.line, h.column)).collect();
        assert_eq!(columns, vec![(0, 0), (0, 6), (1, 0)]);
    }

    #[test]
    fn whole_word_skips_embedded_matches() {
        let options = SearchOptions {
            whole_word: true,
            ..SearchOptions::default()
        };
        let hits = search_lines(&["foobar foo barfoo"], "foo", options).expect("literal query");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].column, 7);
    }

    #[test]
    fn columns_are_char_based() {
        let hits = search_lines(&["héllo wörld"], "wö", SearchOptions::plain()).expect("query");
        assert_eq!(hits[0].column, 6);
        assert_eq!(hits[0].length, 2);
    }

    #[test]
    fn invalid_regex_is_reported() {
        let options = SearchOptions {
            regex: true,
            ..SearchOptions::default()
        };
        let err = search_lines(&["x"], "(", options).unwrap_err();
        assert!(matches!(err, SearchError::InvalidRegex(_)));
    }

    #[test]
    fn case_sensitive_literal_respects_case() {
        let hits = search_lines(&["Hello hello"], "Hello", SearchOptions::default())
            .expect("literal query");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].column, 0);
    }

    #[test]
    fn long_literal_query_matches() {
        let term = "ab".repeat(20_000);
        let line = format!("x{}", term.to_uppercase());
        let hits = search_lines(&[line.as_str()], &term, SearchOptions::plain()).expect("query");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].column, 1);
        assert_eq!(hits[0].length, 40_000);
    }

    #[test]
    fn literal_query_treats_metacharacters_verbatim() {
        let hits = search_lines(&["a.b axb (a.b)"], "a.b", SearchOptions::plain()).expect("query");
        let columns: Vec<usize> = hits.iter().map(|h| h.column).collect();
        assert_eq!(columns, vec![0, 9]);
    }
}
