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

//! Common parsing utilities and types

pub mod error;
pub mod position;
pub mod token;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use position::{Position, PositionTracker, Span};
pub use token::{Keyword, Token, TokenType};

/// Identifier character classes shared by the lexer and scanner
pub mod utils {
    pub fn is_identifier_start(ch: char) -> bool {
        ch == '_' || ch.is_alphabetic()
    }

    pub fn is_identifier_continue(ch: char) -> bool {
        ch == '_' || ch.is_alphanumeric()
    }
}
