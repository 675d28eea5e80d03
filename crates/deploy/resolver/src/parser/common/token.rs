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

//! Token definitions for Cadence source

use super::position::Span;
use std::fmt;

/// A token in the source code
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of token
    pub token_type: TokenType,
    /// The source text that produced this token
    pub lexeme: String,
    /// Where the token sits in the source
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self { token_type, lexeme, span }
    }

    /// Check if this token is the given keyword
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.token_type, TokenType::Keyword(kw) if kw == keyword)
    }

    /// Check if this token is the given punctuation symbol
    pub fn is_symbol(&self, symbol: char) -> bool {
        matches!(self.token_type, TokenType::Symbol(c) if c == symbol)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.token_type, TokenType::Eof)
    }

    /// Get the keyword if this token is a keyword
    pub fn as_keyword(&self) -> Option<Keyword> {
        match self.token_type {
            TokenType::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Identifier text, if this token is an identifier
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.token_type {
            TokenType::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.token_type, self.lexeme)
    }
}

/// Types of tokens the declaration scanner cares about
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    /// String literal with escapes decoded
    StringLiteral(String),
    /// Numeric literal, kept as written (`42`, `0x01`, `1_000`)
    NumberLiteral(String),
    Identifier(String),
    Keyword(Keyword),
    /// Any single ASCII punctuation character
    Symbol(char),
    Eof,
}

impl TokenType {
    /// Hex address literals such as `0x01` are valid import locations
    pub fn is_address_literal(&self) -> bool {
        match self {
            TokenType::NumberLiteral(text) => text.starts_with("0x") || text.starts_with("0X"),
            _ => false,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::StringLiteral(_) => write!(f, "string literal"),
            TokenType::NumberLiteral(_) => write!(f, "number literal"),
            TokenType::Identifier(_) => write!(f, "identifier"),
            TokenType::Keyword(kw) => write!(f, "keyword {kw}"),
            TokenType::Symbol(_) => write!(f, "symbol"),
            TokenType::Eof => write!(f, "end of file"),
        }
    }
}

/// Cadence keywords relevant to declaration scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Import,
    From,
    Contract,
    Resource,
    Struct,
    Event,
    Enum,
    Attachment,
    Interface,
    Pub,
    Priv,
    Access,
}

impl Keyword {
    /// Look up a keyword from an identifier-shaped word
    pub fn from_word(word: &str) -> Option<Self> {
        let keyword = match word {
            "import" => Keyword::Import,
            "from" => Keyword::From,
            "contract" => Keyword::Contract,
            "resource" => Keyword::Resource,
            "struct" => Keyword::Struct,
            "event" => Keyword::Event,
            "enum" => Keyword::Enum,
            "attachment" => Keyword::Attachment,
            "interface" => Keyword::Interface,
            "pub" => Keyword::Pub,
            "priv" => Keyword::Priv,
            "access" => Keyword::Access,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Import => "import",
            Keyword::From => "from",
            Keyword::Contract => "contract",
            Keyword::Resource => "resource",
            Keyword::Struct => "struct",
            Keyword::Event => "event",
            Keyword::Enum => "enum",
            Keyword::Attachment => "attachment",
            Keyword::Interface => "interface",
            Keyword::Pub => "pub",
            Keyword::Priv => "priv",
            Keyword::Access => "access",
        }
    }

    /// Soft keywords that are still valid identifiers
    ///
    /// `import from from "./from.cdc"` is legal Cadence.
    pub fn is_contextual(&self) -> bool {
        matches!(self, Keyword::From | Keyword::Attachment)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
