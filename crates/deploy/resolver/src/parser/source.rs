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

//! Extracts the facts the resolver needs from a parsed program

use super::cadence::{CompositeKind, Program};
use super::common::Span;

/// A string-literal import of a source unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImport {
    pub location: String,
    /// Byte span of the quoted literal in the source
    pub span: Span,
}

/// Name and imports of a deployable source unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub name: String,
    pub imports: Vec<SourceImport>,
}

impl SourceUnit {
    /// Number of top-level composite and interface declarations
    pub fn declaration_count(program: &Program) -> usize {
        program.composite_declarations().count() + program.interface_declarations().count()
    }

    /// Build the unit from a program already checked to hold one declaration
    pub fn from_program(program: &Program) -> Self {
        Self {
            name: contract_name(program),
            imports: string_imports(program),
        }
    }
}

/// First contract declaration, then first contract interface, else empty
fn contract_name(program: &Program) -> String {
    program
        .composite_declarations()
        .find(|d| d.kind == CompositeKind::Contract)
        .or_else(|| program.interface_declarations().find(|d| d.kind == CompositeKind::Contract))
        .map(|d| d.identifier.clone())
        .unwrap_or_default()
}

/// Address and identifier imports are already concrete and need no resolution
fn string_imports(program: &Program) -> Vec<SourceImport> {
    program
        .import_declarations()
        .iter()
        .filter_map(|import| {
            import.location.as_string_location().map(|location| SourceImport {
                location: location.to_string(),
                span: import.location_span,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::cadence::CadenceParser;

    fn unit(source: &str) -> SourceUnit {
        let program = CadenceParser::new().parse_program(source).unwrap();
        SourceUnit::from_program(&program)
    }

    #[test]
    fn test_contract_name() {
        assert_eq!(unit("pub contract Foo {}").name, "Foo");
        assert_eq!(unit("pub contract interface IFoo {}").name, "IFoo");
    }

    #[test]
    fn test_non_contract_declaration_has_empty_name() {
        assert_eq!(unit("pub resource R {}").name, "");
        assert_eq!(unit("pub struct interface S {}").name, "");
    }

    #[test]
    fn test_declaration_count() {
        let parser = CadenceParser::new();
        let count = |source: &str| SourceUnit::declaration_count(&parser.parse_program(source).unwrap());

        assert_eq!(count(""), 0);
        assert_eq!(count("contract A {}"), 1);
        assert_eq!(count("contract interface A {}"), 1);
        assert_eq!(count("contract A {} contract interface B {}"), 2);
        assert_eq!(count("contract A { resource R {} }"), 1);
    }

    #[test]
    fn test_only_string_imports_are_kept() {
        let source = r#"
            import "A"
            import B from 0x01
            import Crypto
            import C from "./C.cdc"
            import "A"
            contract D {}
        "#;
        let imports = unit(source).imports;
        let locations: Vec<_> = imports.iter().map(|i| i.location.as_str()).collect();
        assert_eq!(locations, vec!["A", "./C.cdc", "A"]);
        assert_eq!(&source[imports[1].span.range()], "\"./C.cdc\"");
        assert_ne!(imports[0].span, imports[2].span);
    }
}
