// pwnmlrs/src/parser.rs

//! Line-oriented parser splitting an input deck into namelist and card records.
//!
//! Namelist groups are tokenized with the [`Lexer`]; everything after the
//! groups is read line by line, a new card starting on every line whose first
//! word is a known card name.

use crate::error::{NmlError, Result};
use crate::records::{CardRecord, DeckRecords, NamelistRecord, CARD_NAMES};
use crate::scanner::{Lexer, Token, TokenType};
use crate::value::{parse_integer, parse_logical, parse_real, unquote, FortranValue};
use log::warn;

/// Parser for a complete input deck.
pub struct DeckParser<'a> {
    input: &'a str,
    card_names: Vec<String>,
}

impl<'a> DeckParser<'a> {
    /// Create a parser recognising the default card names.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            card_names: CARD_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Recognise additional card names.
    pub fn with_card_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref().to_lowercase();
            if !self.card_names.contains(&name) {
                self.card_names.push(name);
            }
        }
        self
    }

    /// Parse the input into records.
    pub fn parse(&self) -> Result<DeckRecords> {
        let mut records = DeckRecords::default();
        let mut card: Option<CardBuilder> = None;

        let mut offsets = Vec::new();
        let mut offset = 0;
        let lines: Vec<&str> = self
            .input
            .split_inclusive('\n')
            .map(|line| {
                offsets.push(offset);
                offset += line.len();
                line.trim_end_matches(['\n', '\r'])
            })
            .collect();

        let mut idx = 0;
        while idx < lines.len() {
            let line_number = idx + 1;
            let trimmed = lines[idx].trim();

            if trimmed.starts_with('&') || trimmed.starts_with('$') {
                if let Some(builder) = card.take() {
                    records.cards.push(builder.finish());
                }
                let (group, end_line) = self.parse_group(offsets[idx], line_number)?;
                if records.namelist(&group.name).is_some() {
                    return Err(NmlError::DuplicateGroup {
                        name: group.name,
                        line: line_number,
                    });
                }
                records.namelists.push(group);
                idx = end_line;
                continue;
            }

            idx += 1;

            if trimmed.is_empty() || trimmed.starts_with('!') || trimmed.starts_with('#') {
                continue;
            }

            let mut words = trimmed.splitn(2, char::is_whitespace);
            let first = words.next().unwrap_or_default().to_lowercase();
            if self.card_names.contains(&first) {
                if let Some(builder) = card.take() {
                    records.cards.push(builder.finish());
                }
                card = Some(CardBuilder {
                    name: first,
                    subtitle: parse_subtitle(words.next().unwrap_or_default()),
                    lines: Vec::new(),
                    line: line_number,
                });
            } else if let Some(builder) = card.as_mut() {
                builder.lines.push(lines[idx - 1].trim_end().to_string());
            } else {
                let column = lines[idx - 1].len() - lines[idx - 1].trim_start().len() + 1;
                return Err(NmlError::parse_error(
                    format!("unexpected '{}' outside of a namelist or card", trimmed),
                    line_number,
                    column,
                ));
            }
        }

        if let Some(builder) = card.take() {
            records.cards.push(builder.finish());
        }
        Ok(records)
    }

    /// Parse one group starting at byte `offset`. Returns the record and the
    /// line on which the group ends.
    fn parse_group(&self, offset: usize, first_line: usize) -> Result<(NamelistRecord, usize)> {
        let mut lexer = Lexer::new(&self.input[offset..]).with_first_line(first_line);

        let header = next_significant(&mut lexer)?;
        if header.token_type != TokenType::GroupStart {
            return Err(NmlError::parse_error(
                format!("expected namelist name, found '{}'", header.lexeme),
                header.line,
                header.column,
            ));
        }
        let mut group = NamelistRecord::new(&header.lexeme[1..], header.line);

        let mut tokens = Vec::new();
        let end = loop {
            let token = next_significant(&mut lexer)?;
            match token.token_type {
                TokenType::GroupEnd => break token,
                TokenType::Eof => {
                    return Err(NmlError::UnterminatedGroup {
                        group: group.name,
                        line: first_line,
                    })
                }
                _ => tokens.push(token),
            }
        };

        // only the rest of the closing line belongs to this group
        match lexer.scan_token() {
            Ok(trailing)
                if trailing.line == end.line
                    && !matches!(trailing.token_type, TokenType::Eof | TokenType::Comment) =>
            {
                return Err(NmlError::parse_error(
                    format!("unexpected '{}' after end of namelist", trailing.lexeme),
                    trailing.line,
                    trailing.column,
                ));
            }
            Err(err) if err.line() == Some(end.line) => return Err(err),
            _ => {}
        }

        let mut pos = 0;
        while pos < tokens.len() {
            let token = &tokens[pos];
            match token.token_type {
                TokenType::Comma => pos += 1,
                TokenType::Identifier => {
                    let (key, next) = parse_key(&tokens, pos)?;
                    let (values, next) = collect_values(&tokens, next);
                    pos = next;
                    match values.len() {
                        0 => {
                            return Err(NmlError::MissingValue {
                                group: group.name,
                                variable: key,
                            })
                        }
                        1 => {
                            let value = token_value(values[0])?;
                            if group.set(&key, value).is_some() {
                                warn!("{}: '{}' assigned more than once, keeping the last value", group.name, key);
                            }
                        }
                        count => {
                            return Err(NmlError::MultipleValues {
                                group: group.name,
                                variable: key,
                                count,
                            })
                        }
                    }
                }
                _ => {
                    return Err(NmlError::parse_error(
                        format!("expected variable name, found '{}'", token.lexeme),
                        token.line,
                        token.column,
                    ))
                }
            }
        }

        Ok((group, end.line))
    }
}

struct CardBuilder {
    name: String,
    subtitle: Option<String>,
    lines: Vec<String>,
    line: usize,
}

impl CardBuilder {
    fn finish(self) -> CardRecord {
        let body = if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.join("\n"))
        };
        CardRecord {
            name: self.name,
            subtitle: self.subtitle,
            body,
            line: self.line,
        }
    }
}

fn next_significant(lexer: &mut Lexer) -> Result<Token> {
    loop {
        let token = lexer.scan_token()?;
        if token.token_type != TokenType::Comment {
            return Ok(token);
        }
    }
}

/// `name` or `name(i, j)` followed by `=`. Returns the normalised key and the
/// position after `=`.
fn parse_key(tokens: &[Token], start: usize) -> Result<(String, usize)> {
    let mut key = tokens[start].lexeme.to_lowercase();
    let mut pos = start + 1;

    if tokens.get(pos).map(|t| t.token_type) == Some(TokenType::LeftParen) {
        let mut indices = Vec::new();
        pos += 1;
        loop {
            match tokens.get(pos) {
                Some(t) if t.token_type == TokenType::RightParen => break,
                Some(t) if t.token_type == TokenType::Comma => {}
                Some(t) if matches!(t.token_type, TokenType::Integer | TokenType::Identifier) => {
                    indices.push(t.lexeme.to_lowercase())
                }
                Some(t) => {
                    return Err(NmlError::parse_error(
                        format!("invalid index '{}' for '{}'", t.lexeme, key),
                        t.line,
                        t.column,
                    ))
                }
                None => {
                    let t = &tokens[start];
                    return Err(NmlError::parse_error(
                        format!("unclosed index for '{}'", key),
                        t.line,
                        t.column,
                    ));
                }
            }
            pos += 1;
        }
        if indices.is_empty() {
            let t = &tokens[start];
            return Err(NmlError::parse_error(
                format!("empty index for '{}'", key),
                t.line,
                t.column,
            ));
        }
        key = format!("{}({})", key, indices.join(","));
        pos += 1;
    }

    match tokens.get(pos) {
        Some(t) if t.token_type == TokenType::Assign => Ok((key, pos + 1)),
        Some(t) => Err(NmlError::parse_error(
            format!("expected '=' after '{}', found '{}'", key, t.lexeme),
            t.line,
            t.column,
        )),
        None => {
            let t = &tokens[start];
            Err(NmlError::parse_error(
                format!("expected '=' after '{}'", key),
                t.line,
                t.column,
            ))
        }
    }
}

/// Value tokens up to the next `key =` or the end of the group.
fn collect_values(tokens: &[Token], start: usize) -> (Vec<&Token>, usize) {
    let mut values = Vec::new();
    let mut pos = start;
    while let Some(token) = tokens.get(pos) {
        if token.token_type == TokenType::Comma {
            pos += 1;
            continue;
        }
        let starts_key = token.token_type == TokenType::Identifier
            && matches!(
                tokens.get(pos + 1).map(|t| t.token_type),
                Some(TokenType::Assign | TokenType::LeftParen)
            );
        if starts_key || !token.is_value() {
            break;
        }
        values.push(token);
        pos += 1;
    }
    (values, pos)
}

fn token_value(token: &Token) -> Result<FortranValue> {
    let value = match token.token_type {
        TokenType::Integer => parse_integer(&token.lexeme)?,
        TokenType::Real => parse_real(&token.lexeme)?,
        TokenType::Logical => parse_logical(&token.lexeme)?,
        TokenType::String => FortranValue::Character(unquote(&token.lexeme)),
        TokenType::Identifier => FortranValue::Character(token.lexeme.clone()),
        _ => {
            return Err(NmlError::parse_error(
                format!("invalid value '{}'", token.lexeme),
                token.line,
                token.column,
            ))
        }
    };
    Ok(value)
}

/// Strip comments and `{}`/`()` delimiters from the text after a card name.
fn parse_subtitle(rest: &str) -> Option<String> {
    let text = rest.split(['!', '#']).next().unwrap_or_default().trim();
    let text = text
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .or_else(|| text.strip_prefix('(').and_then(|t| t.strip_suffix(')')))
        .unwrap_or(text)
        .trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
