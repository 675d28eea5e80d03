// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Source position tracking for parsing

use std::fmt;
use std::ops::Range;

/// A position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in characters)
    pub column: usize,
    /// Byte offset from the start of the source
    pub offset: usize,
}

impl Position {
    /// Create a new position
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Position of the first character of a source
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }

    /// Advance past a character, handling newlines
    pub fn advance(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    pub fn span_to(&self, end: Position) -> Span {
        Span::new(*self, end)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// A span of source code between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Byte range covered by this span
    pub fn range(&self) -> Range<usize> {
        self.start.offset..self.end.offset
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(f, "{}-{}", self.start, self.end.column)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Cursor over a source string that keeps line, column and byte offset in sync
#[derive(Debug, Clone)]
pub struct PositionTracker<'a> {
    source: &'a str,
    position: Position,
}

impl<'a> PositionTracker<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, position: Position::start() }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Peek at the current character without advancing
    pub fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Peek at the character after the current one
    pub fn peek_second(&self) -> Option<char> {
        self.remaining().chars().nth(1)
    }

    /// Advance by one character and return it
    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position.advance(ch);
        Some(ch)
    }

    /// Consume the current character if it equals `expected`
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    /// Consume characters while the predicate holds
    pub fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while let Some(ch) = self.peek_char() {
            if !predicate(ch) {
                break;
            }
            self.next_char();
        }
    }

    /// Skip whitespace and return the number of characters skipped
    pub fn skip_whitespace(&mut self) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.next_char();
            count += 1;
        }
        count
    }

    /// Remaining source text
    pub fn remaining(&self) -> &'a str {
        &self.source[self.position.offset..]
    }

    /// Source text between a start position and the current position
    pub fn slice_from(&self, start: Position) -> &'a str {
        &self.source[start.offset..self.position.offset]
    }
}
