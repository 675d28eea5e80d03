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

//! Parser traits and interfaces

use super::common::{ParseResult, Position, Token};

/// Core trait for parsers producing a program representation
///
/// The registry only depends on this seam, so a full grammar parser can replace
/// the built-in declaration scanner.
pub trait Parser<T> {
    /// Parse the input and return the parsed result
    fn parse(&mut self, input: &str) -> ParseResult<T>;

    /// Get the parser name for debugging
    fn name(&self) -> &'static str;
}

/// Trait for lexical analyzers (tokenizers)
pub trait Lexer {
    /// Get the next token from the input, `Eof` once exhausted
    fn next_token(&mut self) -> ParseResult<Token>;

    /// Get the current position
    fn position(&self) -> Position;

    /// Check if there are more tokens
    fn has_more_tokens(&self) -> bool;
}
