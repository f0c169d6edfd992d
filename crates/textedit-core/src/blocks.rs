//! Derived block analysis.
//!
//! Finds multi-line structural blocks (bracket nesting for code, tag nesting for markup) for
//! folding gutters and indent guides. The result is recomputed from the current lines on every
//! call and never cached.

use crate::Buffer;
use regex::Regex;
use std::cmp::Reverse;
use textedit_lang::{BlockSyntax, DelimiterPair};
use tracing::warn;

/// A block spanning `start_line..=end_line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRange {
    /// Line of the opener.
    pub start_line: usize,
    /// Line of the closer.
    pub end_line: usize,
    /// Nesting depth at the opener (0 = outermost).
    pub indent_level: usize,
}

/// HTML elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const TAG_PATTERN: &str = r"<(/?)([A-Za-z][A-Za-z0-9:_.-]*)\b[^>]*?(/?)>";
const COMMENT_PATTERN: &str = r"<!--.*?-->";

/// Compute the block ranges of `buffer` under `syntax`, sorted by start line (outer blocks
/// before inner blocks starting on the same line).
pub fn find_blocks(buffer: &Buffer, syntax: &BlockSyntax) -> Vec<BlockRange> {
    let mut blocks = match syntax {
        BlockSyntax::Brackets(pairs) => bracket_blocks(buffer, pairs),
        BlockSyntax::Markup => markup_blocks(buffer),
    };
    blocks.retain(|b| b.end_line > b.start_line);
    blocks.sort_by_key(|b| (b.start_line, Reverse(b.end_line)));
    blocks
}

fn bracket_blocks(buffer: &Buffer, pairs: &[DelimiterPair]) -> Vec<BlockRange> {
    // Quotes open and close with the same character and cannot nest.
    let pairs: Vec<&DelimiterPair> = pairs.iter().filter(|p| !p.is_symmetric()).collect();
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut blocks = Vec::new();

    for (line_index, line) in buffer.lines().iter().enumerate() {
        for ch in line.chars() {
            if let Some(pair) = pairs.iter().find(|p| p.open == ch) {
                stack.push((pair.close, line_index));
            } else if pairs.iter().any(|p| p.close == ch) {
                let Some(depth) = stack.iter().rposition(|(close, _)| *close == ch) else {
                    continue;
                };
                let (_, start_line) = stack[depth];
                stack.truncate(depth);
                blocks.push(BlockRange {
                    start_line,
                    end_line: line_index,
                    indent_level: depth,
                });
            }
        }
    }
    blocks
}

fn markup_blocks(buffer: &Buffer) -> Vec<BlockRange> {
    let (tag_re, comment_re) = match (Regex::new(TAG_PATTERN), Regex::new(COMMENT_PATTERN)) {
        (Ok(tag), Ok(comment)) => (tag, comment),
        (Err(err), _) | (_, Err(err)) => {
            warn!(error = %err, "markup block pattern failed to compile");
            return Vec::new();
        }
    };

    let mut stack: Vec<(String, usize)> = Vec::new();
    let mut blocks = Vec::new();

    for (line_index, line) in buffer.lines().iter().enumerate() {
        let line = comment_re.replace_all(line, "");
        for caps in tag_re.captures_iter(&line) {
            let closing = !caps[1].is_empty();
            let self_closing = !caps[3].is_empty();
            let name = caps[2].to_ascii_lowercase();

            if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
                continue;
            }
            if !closing {
                stack.push((name, line_index));
                continue;
            }

            let Some(depth) = stack.iter().rposition(|(open, _)| *open == name) else {
                continue;
            };
            let start_line = stack[depth].1;
            stack.truncate(depth);
            blocks.push(BlockRange {
                start_line,
                end_line: line_index,
                indent_level: depth,
            });
        }
    }
    blocks
}
