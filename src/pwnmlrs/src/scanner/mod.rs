// pwnmlrs/src/scanner/mod.rs

//! Lexical scanner for namelist groups.

pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenType};

use crate::error::Result;

/// Scan a string into tokens, dropping comments.
pub fn scan(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.scan_token()?;
        match token.token_type {
            TokenType::Comment => continue,
            TokenType::Eof => {
                tokens.push(token);
                break;
            }
            _ => tokens.push(token),
        }
    }
    Ok(tokens)
}
