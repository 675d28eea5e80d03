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

//! Cadence lexical analyzer (tokenizer)
//!
//! Produces the token stream the declaration scanner walks. Comments and
//! whitespace are skipped; only literals, identifiers, keywords and single
//! punctuation symbols are emitted.

use crate::parser::common::{
    Keyword, ParseError, ParseErrorKind, ParseResult, Position, PositionTracker, Span, Token, TokenType, utils,
};
use crate::parser::traits::Lexer;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Cadence lexical analyzer
pub struct CadenceLexer<'a> {
    tracker: PositionTracker<'a>,
    at_end: bool,
}

impl<'a> CadenceLexer<'a> {
    /// A leading byte order mark is skipped; offsets still count its bytes
    pub fn new(input: &'a str) -> Self {
        let mut tracker = PositionTracker::new(input);
        if tracker.peek_char() == Some(BYTE_ORDER_MARK) {
            tracker.next_char();
        }
        Self { tracker, at_end: false }
    }

    /// Tokenize the entire input, the last token is always `Eof`
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            self.tracker.skip_whitespace();
            match (self.tracker.peek_char(), self.tracker.peek_second()) {
                (Some('/'), Some('/')) => self.tracker.eat_while(|c| c != '\n'),
                (Some('/'), Some('*')) => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Block comments nest in Cadence
    fn skip_block_comment(&mut self) -> ParseResult<()> {
        let start = self.tracker.position();
        self.tracker.next_char();
        self.tracker.next_char();

        let mut depth = 1usize;
        while depth > 0 {
            match self.tracker.next_char() {
                Some('/') if self.tracker.eat('*') => depth += 1,
                Some('*') if self.tracker.eat('/') => depth -= 1,
                Some(_) => {}
                None => {
                    return Err(ParseError::new(ParseErrorKind::UnterminatedComment, start, "Unterminated block comment"));
                }
            }
        }
        Ok(())
    }

    fn scan_token(&mut self) -> ParseResult<Token> {
        self.skip_trivia()?;
        let start = self.tracker.position();

        let Some(ch) = self.tracker.peek_char() else {
            return Ok(Token::new(TokenType::Eof, String::new(), Span::new(start, start)));
        };

        match ch {
            '"' => self.scan_string_literal(start),
            c if c.is_ascii_digit() => self.scan_number(start),
            c if utils::is_identifier_start(c) => self.scan_identifier_or_keyword(start),
            c if c.is_ascii_punctuation() => {
                self.tracker.next_char();
                Ok(self.make_token(TokenType::Symbol(c), start))
            }
            other => Err(ParseError::new(
                ParseErrorKind::InvalidCharacter,
                start,
                format!("Unexpected character '{}'", other.escape_default()),
            )),
        }
    }

    fn make_token(&self, token_type: TokenType, start: Position) -> Token {
        let lexeme = self.tracker.slice_from(start).to_string();
        Token::new(token_type, lexeme, start.span_to(self.tracker.position()))
    }

    /// Scan a string literal; the token lexeme keeps the quotes
    fn scan_string_literal(&mut self, start: Position) -> ParseResult<Token> {
        self.tracker.next_char();
        let mut value = String::new();

        loop {
            match self.tracker.next_char() {
                Some('"') => break,
                Some('\\') => {
                    let escape_pos = self.tracker.position();
                    let escaped = match self.tracker.next_char() {
                        Some('0') => '\0',
                        Some('\\') => '\\',
                        Some('t') => '\t',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('"') => '"',
                        Some('\'') => '\'',
                        Some('u') => self.scan_unicode_escape(escape_pos)?,
                        Some(other) => {
                            return Err(ParseError::new(
                                ParseErrorKind::InvalidEscapeSequence,
                                escape_pos,
                                format!("Invalid escape sequence: \\{}", other),
                            ));
                        }
                        None => {
                            return Err(ParseError::new(ParseErrorKind::UnterminatedString, start, "Unterminated string literal"));
                        }
                    };
                    value.push(escaped);
                }
                Some('\n') | None => {
                    return Err(ParseError::new(ParseErrorKind::UnterminatedString, start, "Unterminated string literal"));
                }
                Some(other) => value.push(other),
            }
        }

        Ok(self.make_token(TokenType::StringLiteral(value), start))
    }

    /// `\u{1F600}` style escape, the `u` is already consumed
    fn scan_unicode_escape(&mut self, escape_pos: Position) -> ParseResult<char> {
        let invalid = |message: &str| ParseError::new(ParseErrorKind::InvalidEscapeSequence, escape_pos, message.to_string());

        if !self.tracker.eat('{') {
            return Err(invalid("Unicode escape must be of the form \\u{XXXX}"));
        }
        let digits_start = self.tracker.position();
        self.tracker.eat_while(|c| c.is_ascii_hexdigit());
        let digits = self.tracker.slice_from(digits_start);
        if !self.tracker.eat('}') || digits.is_empty() || digits.len() > 8 {
            return Err(invalid("Unicode escape must be of the form \\u{XXXX}"));
        }

        u32::from_str_radix(digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| invalid("Unicode escape is not a valid scalar value"))
    }

    /// Scan number literal, including `0x`, `0b` and `0o` prefixed forms
    fn scan_number(&mut self, start: Position) -> ParseResult<Token> {
        let prefixed = self.tracker.peek_char() == Some('0') && matches!(self.tracker.peek_second(), Some('x' | 'X' | 'b' | 'o'));

        if prefixed {
            self.tracker.next_char();
            self.tracker.next_char();
            self.tracker.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        } else {
            self.tracker.eat_while(|c| c.is_ascii_digit() || c == '_');
            // Fixed-point literals such as `1.5`
            if self.tracker.peek_char() == Some('.') && self.tracker.peek_second().is_some_and(|c| c.is_ascii_digit()) {
                self.tracker.next_char();
                self.tracker.eat_while(|c| c.is_ascii_digit() || c == '_');
            }
        }

        let text = self.tracker.slice_from(start).to_string();
        Ok(self.make_token(TokenType::NumberLiteral(text), start))
    }

    fn scan_identifier_or_keyword(&mut self, start: Position) -> ParseResult<Token> {
        self.tracker.eat_while(utils::is_identifier_continue);
        let word = self.tracker.slice_from(start);

        let token_type = match Keyword::from_word(word) {
            Some(keyword) => TokenType::Keyword(keyword),
            None => TokenType::Identifier(word.to_string()),
        };
        Ok(self.make_token(token_type, start))
    }
}

impl Lexer for CadenceLexer<'_> {
    fn next_token(&mut self) -> ParseResult<Token> {
        let token = self.scan_token()?;
        self.at_end = token.is_eof();
        Ok(token)
    }

    fn position(&self) -> Position {
        self.tracker.position()
    }

    fn has_more_tokens(&self) -> bool {
        !self.at_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_types(input: &str) -> Vec<TokenType> {
        CadenceLexer::new(input).tokenize().unwrap().into_iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(token_types(""), vec![TokenType::Eof]);
        assert_eq!(token_types("  \n\t "), vec![TokenType::Eof]);
    }

    #[test]
    fn test_import_statement() {
        let tokens = token_types(r#"import FungibleToken from "./FungibleToken.cdc""#);
        assert_eq!(
            tokens,
            vec![
                TokenType::Keyword(Keyword::Import),
                TokenType::Identifier("FungibleToken".to_string()),
                TokenType::Keyword(Keyword::From),
                TokenType::StringLiteral("./FungibleToken.cdc".to_string()),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_string_span_covers_quotes() {
        let source = r#"import "Foo""#;
        let tokens = CadenceLexer::new(source).tokenize().unwrap();
        let literal = &tokens[1];
        assert_eq!(literal.lexeme, "\"Foo\"");
        assert_eq!(&source[literal.span.range()], "\"Foo\"");
    }

    #[test]
    fn test_string_escapes() {
        let tokens = token_types(r#""a\"b\n\u{41}""#);
        assert_eq!(tokens[0], TokenType::StringLiteral("a\"b\nA".to_string()));
    }

    #[test]
    fn test_invalid_escape() {
        let err = CadenceLexer::new(r#""\q""#).tokenize().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidEscapeSequence);

        let err = CadenceLexer::new(r#""\u{zz}""#).tokenize().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidEscapeSequence);
    }

    #[test]
    fn test_unterminated_string() {
        let err = CadenceLexer::new("\"abc").tokenize().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);

        let err = CadenceLexer::new("\"abc\n\"").tokenize().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);

        let err = CadenceLexer::new("\"abc\\").tokenize().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
    }

    #[test]
    fn test_comments_are_skipped() {
        let input = "// import \"A\"\n/* outer /* inner */ still comment */ contract";
        assert_eq!(token_types(input), vec![TokenType::Keyword(Keyword::Contract), TokenType::Eof]);
    }

    #[test]
    fn test_unterminated_comment() {
        let err = CadenceLexer::new("/* /* */").tokenize().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedComment);
        assert_eq!(err.position, Position::start());
    }

    #[test]
    fn test_numbers() {
        let tokens = token_types("0x01 42 1_000 1.5 0b101");
        assert_eq!(
            tokens,
            vec![
                TokenType::NumberLiteral("0x01".to_string()),
                TokenType::NumberLiteral("42".to_string()),
                TokenType::NumberLiteral("1_000".to_string()),
                TokenType::NumberLiteral("1.5".to_string()),
                TokenType::NumberLiteral("0b101".to_string()),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_symbols_and_identifiers() {
        let tokens = token_types("access(all) resource Vault: @{Provider}");
        assert_eq!(tokens[0], TokenType::Keyword(Keyword::Access));
        assert_eq!(tokens[1], TokenType::Symbol('('));
        assert_eq!(tokens[2], TokenType::Identifier("all".to_string()));
        assert_eq!(tokens[3], TokenType::Symbol(')'));
        assert_eq!(tokens[4], TokenType::Keyword(Keyword::Resource));
        assert_eq!(tokens[6], TokenType::Symbol(':'));
        assert_eq!(tokens[7], TokenType::Symbol('@'));
    }

    #[test]
    fn test_invalid_character() {
        let err = CadenceLexer::new("contract Foo § {}").tokenize().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidCharacter);
        assert_eq!(err.position.column, 14);
    }

    #[test]
    fn test_lexer_trait_tracks_end() {
        let mut lexer = CadenceLexer::new("Foo");
        assert!(lexer.has_more_tokens());
        assert_eq!(lexer.next_token().unwrap().as_identifier(), Some("Foo"));
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(!lexer.has_more_tokens());
        assert_eq!(lexer.position().offset, 3);
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let source = "\u{feff}import \"B\"\npub contract A {}";
        let tokens = CadenceLexer::new(source).tokenize().unwrap();
        assert!(tokens[0].is_keyword(Keyword::Import));
        assert_eq!(&source[tokens[1].span.range()], "\"B\"");

        let err = CadenceLexer::new("pub \u{feff}").tokenize().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidCharacter);
    }
}
