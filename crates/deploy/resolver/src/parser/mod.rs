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

//! Source parsing for deployable contracts
//!
//! - `common`: positions, tokens and parse errors
//! - `cadence`: lexer and top-level declaration scanner
//! - `source`: adapter extracting the declared name and string imports

pub mod cadence;
pub mod common;
pub mod source;
pub mod traits;

pub use cadence::{CadenceParser, Program};
pub use common::{ParseError, ParseErrorKind, ParseResult, Position, Span};
pub use source::{SourceImport, SourceUnit};
pub use traits::Parser;
