//! Splitting label-file text into per-sentence blocks.

use crate::defaults::{COMMENT_MARKER, SENTENCE_DELIMITER};

/// The lines of one sentence, between two `.` delimiter lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawLabelBlock<'a> {
    lines: Vec<&'a str>,
}

impl<'a> RawLabelBlock<'a> {
    /// Wrap the raw text of a single block.
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
        }
    }

    /// Split a whole label file on delimiter lines.
    ///
    /// The text after the last delimiter always forms a final block, which
    /// is empty for a well-terminated file.
    pub fn split_all(contents: &'a str) -> Vec<Self> {
        let mut blocks = Vec::new();
        let mut current = Vec::new();
        for line in contents.lines() {
            if line == SENTENCE_DELIMITER {
                blocks.push(Self {
                    lines: std::mem::take(&mut current),
                });
            } else {
                current.push(line);
            }
        }
        blocks.push(Self { lines: current });
        blocks
    }

    /// Lines that carry content: comments and blank lines removed.
    pub fn content_lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.lines
            .iter()
            .copied()
            .filter(|line| !line.starts_with(COMMENT_MARKER))
            .filter(|line| !line.trim().is_empty())
    }

    /// True when the block holds nothing but comments and whitespace.
    pub fn is_blank(&self) -> bool {
        self.content_lines().next().is_none()
    }
}
