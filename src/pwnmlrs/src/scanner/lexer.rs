// pwnmlrs/src/scanner/lexer.rs

//! Low-level lexical analysis for namelist tokens.

use super::token::{Token, TokenType};
use crate::error::{NmlError, Result};

/// Low-level lexer for namelist tokens. Whitespace is consumed silently.
pub struct Lexer {
    input: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
    comment_tokens: Vec<char>,
}

impl Lexer {
    /// Create a new lexer for the given input.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            comment_tokens: vec!['!', '#'],
        }
    }

    /// Number lines starting at `line` instead of 1.
    pub fn with_first_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Line the lexer is currently positioned on.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Scan the next token.
    pub fn scan_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;

        if self.is_at_end() {
            return Ok(Token::new(TokenType::Eof, String::new(), line, column));
        }

        let start = self.current;
        let c = self.advance();

        let token_type = match c {
            '&' | '$' => return Ok(self.scan_group_marker(start, line, column)),
            '/' => TokenType::GroupEnd,
            '=' => TokenType::Assign,
            ',' => TokenType::Comma,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '+' | '-' => return self.scan_signed(start, line, column),
            '\'' | '"' => return self.scan_string(c, start, line, column),
            '.' => return self.scan_decimal_or_logical(start, line, column),
            _ if c.is_ascii_alphabetic() || c == '_' => {
                self.scan_identifier_continuation();
                TokenType::Identifier
            }
            _ if c.is_ascii_digit() => return self.scan_number(start, line, column),
            _ if self.comment_tokens.contains(&c) => {
                while self.peek() != Some('\n') && !self.is_at_end() {
                    self.advance();
                }
                TokenType::Comment
            }
            _ => TokenType::Invalid,
        };

        Ok(Token::new(token_type, self.lexeme(start), line, column))
    }

    fn scan_group_marker(&mut self, start: usize, line: usize, column: usize) -> Token {
        self.scan_identifier_continuation();
        let lexeme = self.lexeme(start);
        let name = &lexeme[1..];
        let token_type = if name.is_empty() {
            TokenType::Invalid
        } else if name.eq_ignore_ascii_case("end") {
            TokenType::GroupEnd
        } else {
            TokenType::GroupStart
        };
        Token::new(token_type, lexeme, line, column)
    }

    fn scan_identifier_continuation(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn scan_signed(&mut self, start: usize, line: usize, column: usize) -> Result<Token> {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => self.scan_number(start, line, column),
            Some('.') if self.peek_ahead(1).map_or(false, |c| c.is_ascii_digit()) => {
                self.advance();
                self.scan_number(start, line, column)
            }
            _ => Ok(Token::new(
                TokenType::Invalid,
                self.lexeme(start),
                line,
                column,
            )),
        }
    }

    fn scan_number(&mut self, start: usize, line: usize, column: usize) -> Result<Token> {
        let mut is_real = self.input[start..self.current].contains(&'.');

        self.consume_digits();

        // `30.` is a complete real literal
        if self.peek() == Some('.') {
            is_real = true;
            self.advance();
            self.consume_digits();
        }

        if matches!(self.peek(), Some('e' | 'E' | 'd' | 'D')) {
            is_real = true;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if !self.peek().map_or(false, |c| c.is_ascii_digit()) {
                return Err(NmlError::parse_error(
                    format!("invalid exponent in number '{}'", self.lexeme(start)),
                    line,
                    column,
                ));
            }
            self.consume_digits();
        }

        // kind specifier, e.g. 1.0_dp
        if self.peek() == Some('_') {
            self.advance();
            self.scan_identifier_continuation();
        }

        let token_type = if is_real {
            TokenType::Real
        } else {
            TokenType::Integer
        };
        Ok(Token::new(token_type, self.lexeme(start), line, column))
    }

    fn scan_decimal_or_logical(&mut self, start: usize, line: usize, column: usize) -> Result<Token> {
        if self.peek().map_or(false, |c| c.is_ascii_digit()) {
            return self.scan_number(start, line, column);
        }

        if self.peek().map_or(false, |c| c.is_ascii_alphabetic()) {
            self.scan_identifier_continuation();
            if self.peek() == Some('.') {
                self.advance();
            }
            let lexeme = self.lexeme(start);
            let lower = lexeme.to_lowercase();
            if lower.starts_with(".t") || lower.starts_with(".f") {
                return Ok(Token::new(TokenType::Logical, lexeme, line, column));
            }
            return Ok(Token::new(TokenType::Invalid, lexeme, line, column));
        }

        Ok(Token::new(
            TokenType::Invalid,
            self.lexeme(start),
            line,
            column,
        ))
    }

    fn scan_string(&mut self, quote: char, start: usize, line: usize, column: usize) -> Result<Token> {
        loop {
            if self.is_at_end() || self.peek() == Some('\n') {
                return Err(NmlError::UnterminatedString { line, column });
            }
            let c = self.advance();
            if c == quote {
                if self.peek() == Some(quote) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        Ok(Token::new(TokenType::String, self.lexeme(start), line, column))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn consume_digits(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn lexeme(&self, start: usize) -> String {
        self.input[start..self.current].iter().collect()
    }

    fn advance(&mut self) -> char {
        let c = self.input[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.current).copied()
    }

    fn peek_ahead(&self, distance: usize) -> Option<char> {
        self.input.get(self.current + distance).copied()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;

    fn types(input: &str) -> Vec<TokenType> {
        scan(input)
            .unwrap()
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn test_simple_group() {
        assert_eq!(
            types("&control calculation='scf', nstep=5 /"),
            vec![
                TokenType::GroupStart,
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::String,
                TokenType::Comma,
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::Integer,
                TokenType::GroupEnd,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let tokens = scan("30. -1.5d-3 .5 +2 7_8").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| (t.token_type, t.lexeme.as_str())).collect();
        assert_eq!(
            kinds,
            vec![
                (TokenType::Real, "30."),
                (TokenType::Real, "-1.5d-3"),
                (TokenType::Real, ".5"),
                (TokenType::Integer, "+2"),
                (TokenType::Integer, "7_8"),
                (TokenType::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_logicals_and_end_markers() {
        assert_eq!(
            types(".true. .F. &end $END"),
            vec![
                TokenType::Logical,
                TokenType::Logical,
                TokenType::GroupEnd,
                TokenType::GroupEnd,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_dropped() {
        assert_eq!(
            types("nat = 2 ! two atoms\n# hash comment\n/"),
            vec![
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::Integer,
                TokenType::GroupEnd,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_string_with_escaped_quote() {
        let tokens = scan("title = 'it''s here'").unwrap();
        assert_eq!(tokens[2].token_type, TokenType::String);
        assert_eq!(tokens[2].lexeme, "'it''s here'");
    }

    #[test]
    fn test_unterminated_string() {
        let err = scan("title = 'oops\n/").unwrap_err();
        assert!(matches!(err, NmlError::UnterminatedString { line: 1, column: 9 }));
    }

    #[test]
    fn test_line_tracking() {
        let mut lexer = Lexer::new("&system\n  nat = 2\n/").with_first_line(10);
        let mut last = lexer.scan_token().unwrap();
        while last.token_type != TokenType::GroupEnd {
            last = lexer.scan_token().unwrap();
        }
        assert_eq!(last.line, 12);
        assert_eq!(lexer.line(), 12);
    }
}
