#![allow(clippy::module_inception)]

use serde::Serialize;

pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod mode;
pub mod render;

extern crate regex;

/// A location inside lexed text: `(line, byte offset)`.
///
/// The offset is relative to the text handed to the lexer, so for a single
/// line it is the column and for a whole document it is the absolute offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position(pub usize, pub usize);

impl Position {
    pub fn line(&self) -> usize {
        self.0
    }

    pub fn offset(&self) -> usize {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end.1 - self.start.1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Finds the line holding `position` (a byte offset into `content`).
///
/// Returns the one-based line number, the line text (newline included) and
/// the byte offset of `position` within that line.
pub fn get_line_at_position(content: &str, position: usize) -> Option<(usize, &str, usize)> {
    if position >= content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&position) {
            return Some((line_number, line, position - start));
        }

        start = end;
        line_number += 1;
    }

    None
}
