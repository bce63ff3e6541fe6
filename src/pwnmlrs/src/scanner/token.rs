// pwnmlrs/src/scanner/token.rs

//! Token types for namelist lexical analysis.

use std::fmt;

/// A token in a namelist group.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of token
    pub token_type: TokenType,
    /// The raw text of the token
    pub lexeme: String,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, line: usize, column: usize) -> Self {
        Self {
            token_type,
            lexeme,
            line,
            column,
        }
    }

    /// True for tokens that can stand on the right-hand side of `=`.
    pub fn is_value(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Integer
                | TokenType::Real
                | TokenType::Logical
                | TokenType::String
                | TokenType::Identifier
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.token_type, self.lexeme)
    }
}

/// Types of tokens that can appear inside a namelist group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// Group start, `&name` or `$name`
    GroupStart,
    /// Group end, `/`, `&end` or `$end`
    GroupEnd,
    /// Assignment operator (=)
    Assign,
    /// Comma separator (,)
    Comma,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Identifier (variable names, bare words)
    Identifier,
    /// Integer literal
    Integer,
    /// Real number literal
    Real,
    /// Logical literal (.true., .false.)
    Logical,
    /// Quoted string literal
    String,
    /// Comment
    Comment,
    /// End of input
    Eof,
    /// Invalid token
    Invalid,
}
