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

//! Parser error types and handling

use super::Position;
use std::fmt;
use thiserror::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Main error type for parsing operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error
    pub kind: ParseErrorKind,
    /// Position where the error occurred
    pub position: Position,
    /// Human-readable error message
    pub message: String,
    /// Additional context, usually the location being parsed
    pub context: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Position, message: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            message: message.into(),
            context: None,
        }
    }

    /// Attach context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{} at line {}, column {}: {}", self.kind.description(), self.position.line, self.position.column, self.message)
    }

    /// Get detailed error information for debugging
    pub fn debug_message(&self) -> String {
        let mut msg = format!("[{}] {}", self.kind.code(), self.user_message());
        if let Some(context) = &self.context {
            msg.push_str(&format!("\nContext: {}", context));
        }
        msg
    }

    pub fn syntax_error(position: Position, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::SyntaxError, position, message)
    }

    pub fn unexpected_token(position: Position, found: &str, expected: Option<&str>) -> Self {
        let message = match expected {
            Some(exp) => format!("Found '{}', expected {}", found, exp),
            None => format!("Unexpected token '{}'", found),
        };
        Self::new(ParseErrorKind::UnexpectedToken, position, message)
    }

    pub fn unexpected_eof(position: Position, expected: &str) -> Self {
        Self::new(ParseErrorKind::UnexpectedEof, position, format!("Unexpected end of file, expected {}", expected))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

/// Categories of parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Grammar violations such as unbalanced braces
    #[error("Syntax error")]
    SyntaxError,

    #[error("Unexpected token")]
    UnexpectedToken,

    #[error("Unexpected end of file")]
    UnexpectedEof,

    #[error("Invalid character")]
    InvalidCharacter,

    #[error("Invalid escape sequence")]
    InvalidEscapeSequence,

    #[error("Unterminated string")]
    UnterminatedString,

    #[error("Unterminated comment")]
    UnterminatedComment,
}

impl ParseErrorKind {
    /// Short error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::SyntaxError => "E002",
            ParseErrorKind::UnexpectedToken => "E004",
            ParseErrorKind::UnexpectedEof => "E006",
            ParseErrorKind::InvalidCharacter => "E007",
            ParseErrorKind::InvalidEscapeSequence => "E010",
            ParseErrorKind::UnterminatedString => "E011",
            ParseErrorKind::UnterminatedComment => "E012",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ParseErrorKind::SyntaxError => "Syntax error",
            ParseErrorKind::UnexpectedToken => "Unexpected token",
            ParseErrorKind::UnexpectedEof => "Unexpected end of file",
            ParseErrorKind::InvalidCharacter => "Invalid character",
            ParseErrorKind::InvalidEscapeSequence => "Invalid escape sequence",
            ParseErrorKind::UnterminatedString => "Unterminated string literal",
            ParseErrorKind::UnterminatedComment => "Unterminated comment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_creation() {
        let pos = Position::new(10, 5, 120);
        let error = ParseError::new(ParseErrorKind::SyntaxError, pos, "Test error");

        assert_eq!(error.kind, ParseErrorKind::SyntaxError);
        assert_eq!(error.position, pos);
        assert_eq!(error.message, "Test error");
        assert!(error.context.is_none());
    }

    #[test]
    fn test_error_with_context() {
        let error = ParseError::syntax_error(Position::start(), "Test error").with_context("./Foo.cdc");
        assert_eq!(error.context.as_deref(), Some("./Foo.cdc"));
        assert!(error.debug_message().contains("Context: ./Foo.cdc"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ParseErrorKind::SyntaxError.code(), "E002");
        assert_eq!(ParseErrorKind::UnexpectedToken.code(), "E004");
        assert_eq!(ParseErrorKind::UnterminatedComment.code(), "E012");
    }

    #[test]
    fn test_error_messages() {
        let error = ParseError::unexpected_token(Position::new(3, 8, 40), "}", Some("identifier"));

        let user_msg = error.to_string();
        assert!(user_msg.contains("line 3"));
        assert!(user_msg.contains("column 8"));
        assert!(user_msg.contains("Found '}', expected identifier"));

        let debug_msg = error.debug_message();
        assert!(debug_msg.starts_with("[E004]"));
    }
}
