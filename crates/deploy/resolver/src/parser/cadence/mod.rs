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

//! Cadence declaration scanner
//!
//! Not a full Cadence grammar: the scanner checks bracket balance and picks out
//! the top-level import and composite/interface declarations, which is all the
//! deployment resolver needs from a program.

pub mod lexer;
pub mod program;

pub use lexer::CadenceLexer;
pub use program::{CompositeKind, Declaration, ImportDeclaration, ImportLocation, Program};

use super::common::{Keyword, ParseError, ParseResult, Position, Token, TokenType};
use super::traits::Parser;

/// Parser turning Cadence source into a [`Program`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CadenceParser;

impl CadenceParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse Cadence source code into its top-level declarations
    pub fn parse_program(&self, input: &str) -> ParseResult<Program> {
        let tokens = CadenceLexer::new(input).tokenize()?;
        DeclarationScanner::new(&tokens).scan()
    }
}

impl Parser<Program> for CadenceParser {
    fn parse(&mut self, input: &str) -> ParseResult<Program> {
        self.parse_program(input)
    }

    fn name(&self) -> &'static str {
        "CadenceParser"
    }
}

/// Walks the token stream, tracking bracket nesting
struct DeclarationScanner<'t> {
    tokens: &'t [Token],
    current: usize,
    nesting: Vec<(char, Position)>,
    program: Program,
}

impl<'t> DeclarationScanner<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            current: 0,
            nesting: Vec::new(),
            program: Program::default(),
        }
    }

    fn scan(mut self) -> ParseResult<Program> {
        loop {
            let token = self.advance();
            match &token.token_type {
                TokenType::Eof => break,
                TokenType::Symbol(open @ ('{' | '(' | '[')) => self.nesting.push((*open, token.span.start)),
                TokenType::Symbol(close @ ('}' | ')' | ']')) => self.close(*close, token)?,
                TokenType::Keyword(Keyword::Import) if self.at_top_level() => self.scan_import()?,
                TokenType::Keyword(keyword) if self.at_top_level() => {
                    if let Some(kind) = composite_kind(*keyword) {
                        self.scan_declaration(kind, token)?;
                    }
                }
                _ => {}
            }
        }

        if let Some((open, position)) = self.nesting.last() {
            return Err(ParseError::syntax_error(*position, format!("Unclosed '{}'", open)));
        }

        Ok(self.program)
    }

    fn at_top_level(&self) -> bool {
        self.nesting.is_empty()
    }

    fn peek(&self) -> &'t Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    /// Return the current token and move on; sticks at `Eof`
    fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if !token.is_eof() {
            self.current += 1;
        }
        token
    }

    fn close(&mut self, close: char, token: &Token) -> ParseResult<()> {
        let expected = match close {
            '}' => '{',
            ')' => '(',
            _ => '[',
        };
        match self.nesting.pop() {
            Some((open, _)) if open == expected => Ok(()),
            Some((open, position)) => Err(ParseError::syntax_error(
                token.span.start,
                format!("Mismatched '{}', '{}' opened at {} is still open", close, open, position),
            )),
            None => Err(ParseError::syntax_error(token.span.start, format!("Unmatched '{}'", close))),
        }
    }

    /// `import "Loc"`, `import A, B from <location>` or `import A`
    fn scan_import(&mut self) -> ParseResult<()> {
        let next = self.peek();
        match &next.token_type {
            TokenType::StringLiteral(location) => {
                self.advance();
                self.push_import(Vec::new(), ImportLocation::String(location.clone()), next);
                return Ok(());
            }
            token_type if token_type.is_address_literal() => {
                self.advance();
                self.push_import(Vec::new(), ImportLocation::Address(next.lexeme.clone()), next);
                return Ok(());
            }
            _ => {}
        }

        let first = self.expect_identifier("imported identifier or location")?;
        let mut identifiers = vec![first.to_string()];
        while self.peek().is_symbol(',') {
            self.advance();
            identifiers.push(self.expect_identifier("imported identifier")?.to_string());
        }

        if !self.peek().is_keyword(Keyword::From) {
            if identifiers.len() > 1 {
                return Err(self.unexpected("'from'"));
            }
            let tokens = self.tokens;
            let name_token = &tokens[self.current - 1];
            let location = ImportLocation::Identifier(identifiers[0].clone());
            self.push_import(identifiers, location, name_token);
            return Ok(());
        }
        self.advance();

        let location_token = self.advance();
        let location = match &location_token.token_type {
            TokenType::StringLiteral(location) => ImportLocation::String(location.clone()),
            token_type if token_type.is_address_literal() => ImportLocation::Address(location_token.lexeme.clone()),
            TokenType::Identifier(name) => ImportLocation::Identifier(name.clone()),
            TokenType::Eof => return Err(ParseError::unexpected_eof(location_token.span.start, "import location")),
            _ => {
                return Err(ParseError::unexpected_token(location_token.span.start, &location_token.lexeme, Some("import location")));
            }
        };
        self.push_import(identifiers, location, location_token);
        Ok(())
    }

    fn push_import(&mut self, identifiers: Vec<String>, location: ImportLocation, location_token: &Token) {
        self.program.imports.push(ImportDeclaration {
            identifiers,
            location,
            location_span: location_token.span,
        });
    }

    /// `contract Foo` or `contract interface Foo`, the kind keyword is consumed
    fn scan_declaration(&mut self, kind: CompositeKind, kind_token: &Token) -> ParseResult<()> {
        let is_interface = self.peek().is_keyword(Keyword::Interface);
        if is_interface {
            self.advance();
        }

        let identifier = self.expect_identifier("declaration name")?.to_string();
        let end = self.tokens[self.current - 1].span.end;
        self.program.declarations.push(Declaration {
            kind,
            is_interface,
            identifier,
            span: kind_token.span.start.span_to(end),
        });
        Ok(())
    }

    fn expect_identifier(&mut self, expected: &str) -> ParseResult<&'t str> {
        let token = self.peek();
        let name = match token.as_identifier() {
            Some(name) => name,
            None if token.as_keyword().is_some_and(|keyword| keyword.is_contextual()) => token.lexeme.as_str(),
            None => return Err(self.unexpected(expected)),
        };
        self.advance();
        Ok(name)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        if token.is_eof() {
            ParseError::unexpected_eof(token.span.start, expected)
        } else {
            ParseError::unexpected_token(token.span.start, &token.lexeme, Some(expected))
        }
    }
}

fn composite_kind(keyword: Keyword) -> Option<CompositeKind> {
    let kind = match keyword {
        Keyword::Contract => CompositeKind::Contract,
        Keyword::Resource => CompositeKind::Resource,
        Keyword::Struct => CompositeKind::Structure,
        Keyword::Event => CompositeKind::Event,
        Keyword::Enum => CompositeKind::Enum,
        Keyword::Attachment => CompositeKind::Attachment,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::common::ParseErrorKind;

    fn parse(input: &str) -> ParseResult<Program> {
        CadenceParser::new().parse_program(input)
    }

    #[test]
    fn test_parser_name() {
        assert_eq!(CadenceParser::new().name(), "CadenceParser");
    }

    #[test]
    fn test_empty_program() {
        let program = parse("").unwrap();
        assert!(program.declarations.is_empty());
        assert!(program.imports.is_empty());
    }

    #[test]
    fn test_contract_with_imports() {
        let source = r#"
            import FungibleToken from "./FungibleToken.cdc"
            import "NonFungibleToken"
            import Crypto
            import MetadataViews, ViewResolver from 0x1d7e57aa55817448

            access(all) contract Kibble: FungibleToken {
                access(all) resource Vault {}
                access(all) event TokensMinted(amount: UFix64)
                init() {}
            }
        "#;
        let program = parse(source).unwrap();

        assert_eq!(program.declarations.len(), 1);
        let declaration = &program.declarations[0];
        assert_eq!(declaration.kind, CompositeKind::Contract);
        assert!(!declaration.is_interface);
        assert_eq!(declaration.identifier, "Kibble");

        let locations: Vec<_> = program.imports.iter().map(|i| i.location.clone()).collect();
        assert_eq!(
            locations,
            vec![
                ImportLocation::String("./FungibleToken.cdc".to_string()),
                ImportLocation::String("NonFungibleToken".to_string()),
                ImportLocation::Identifier("Crypto".to_string()),
                ImportLocation::Address("0x1d7e57aa55817448".to_string()),
            ]
        );
        assert_eq!(program.imports[0].identifiers, vec!["FungibleToken"]);
        assert!(program.imports[1].identifiers.is_empty());
        assert_eq!(program.imports[3].identifiers, vec!["MetadataViews", "ViewResolver"]);
    }

    #[test]
    fn test_location_span_points_at_literal() {
        let source = "import Foo from \"./Foo.cdc\"\npub contract Bar {}";
        let program = parse(source).unwrap();
        let span = program.imports[0].location_span;
        assert_eq!(&source[span.range()], "\"./Foo.cdc\"");
        assert_eq!(span.start.line, 1);
    }

    #[test]
    fn test_contract_interface() {
        let program = parse("pub contract interface Token { pub resource interface Provider {} }").unwrap();
        assert_eq!(program.interface_declarations().count(), 1);
        assert_eq!(program.composite_declarations().count(), 0);
        assert_eq!(program.declarations[0].identifier, "Token");
    }

    #[test]
    fn test_multiple_top_level_declarations() {
        let program = parse("contract A {}\ncontract B {}\nresource R {}").unwrap();
        let names: Vec<_> = program.declarations.iter().map(|d| d.identifier.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "R"]);
    }

    #[test]
    fn test_nested_imports_are_ignored() {
        let program = parse("contract A { fun f() { let s = \"import\" } }").unwrap();
        assert!(program.imports.is_empty());
    }

    #[test]
    fn test_keyword_from_as_identifier() {
        let program = parse("import from from \"./from.cdc\"").unwrap();
        assert_eq!(program.imports[0].identifiers, vec!["from"]);
        assert_eq!(program.imports[0].location, ImportLocation::String("./from.cdc".to_string()));
    }

    #[test]
    fn test_unbalanced_braces() {
        let err = parse("contract A {").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::SyntaxError);
        assert!(err.message.contains("Unclosed '{'"));

        let err = parse("contract A {}}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::SyntaxError);
        assert!(err.message.contains("Unmatched '}'"));

        let err = parse("contract A { fun f( }").unwrap_err();
        assert!(err.message.contains("Mismatched"));
    }

    #[test]
    fn test_malformed_imports() {
        let err = parse("import").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);

        let err = parse("import Foo from").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);

        let err = parse("import Foo from {").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);

        let err = parse("import A, B \"x\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_declaration_without_name() {
        let err = parse("contract {}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.position.column, 10);
    }

    #[test]
    fn test_lexical_error_propagates() {
        let err = parse("contract A { let s = \"unterminated }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
    }
}
