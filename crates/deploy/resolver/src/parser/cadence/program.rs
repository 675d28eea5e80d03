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

//! Top-level declarations of a Cadence program

use crate::parser::common::Span;
use std::fmt;

/// Kind of a composite or interface declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    Contract,
    Resource,
    Structure,
    Event,
    Enum,
    Attachment,
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompositeKind::Contract => "contract",
            CompositeKind::Resource => "resource",
            CompositeKind::Structure => "struct",
            CompositeKind::Event => "event",
            CompositeKind::Enum => "enum",
            CompositeKind::Attachment => "attachment",
        };
        f.write_str(name)
    }
}

/// A composite (`contract Foo`) or interface (`contract interface Foo`) declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: CompositeKind,
    pub is_interface: bool,
    pub identifier: String,
    /// Span of the declaration keyword through the identifier
    pub span: Span,
}

/// Where an import points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportLocation {
    /// `import "./Foo.cdc"` or `import Foo from "./Foo.cdc"`
    String(String),
    /// `import Foo from 0x01`
    Address(String),
    /// `import Crypto`
    Identifier(String),
}

impl ImportLocation {
    pub fn as_string_location(&self) -> Option<&str> {
        match self {
            ImportLocation::String(location) => Some(location),
            _ => None,
        }
    }
}

impl fmt::Display for ImportLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportLocation::String(location) => write!(f, "\"{}\"", location),
            ImportLocation::Address(address) | ImportLocation::Identifier(address) => f.write_str(address),
        }
    }
}

/// An import declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// Imported names, empty for `import "Loc"`
    pub identifiers: Vec<String>,
    pub location: ImportLocation,
    /// Span of the location token as written in the source, quotes included
    pub location_span: Span,
}

/// Parsed program: only the top-level declarations the resolver needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub imports: Vec<ImportDeclaration>,
}

impl Program {
    /// Concrete composite declarations (contracts, resources, structs, ...)
    pub fn composite_declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(|d| !d.is_interface)
    }

    pub fn interface_declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(|d| d.is_interface)
    }

    pub fn import_declarations(&self) -> &[ImportDeclaration] {
        &self.imports
    }
}
