// pwscfrs/src/card.rs

use pwnmlrs::CardRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload of a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardValue {
    /// Free-form lines, written verbatim
    Text(String),
    /// Rows of whitespace-separated fields
    Table(Vec<Vec<String>>),
}

impl CardValue {
    /// The payload as it is written below the card header.
    pub fn to_text(&self) -> String {
        match self {
            CardValue::Text(text) => text.trim_end().to_string(),
            CardValue::Table(rows) => rows
                .iter()
                .map(|row| row.join(" "))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl From<&str> for CardValue {
    fn from(value: &str) -> Self {
        CardValue::Text(value.to_string())
    }
}

impl From<String> for CardValue {
    fn from(value: String) -> Self {
        CardValue::Text(value)
    }
}

impl From<Vec<Vec<String>>> for CardValue {
    fn from(rows: Vec<Vec<String>>) -> Self {
        CardValue::Table(rows)
    }
}

/// A named data block with an optional subtitle.
///
/// The name is fixed at construction; subtitle and value are freely mutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    name: String,
    pub subtitle: Option<String>,
    pub value: Option<CardValue>,
}

impl Card {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            subtitle: None,
            value: None,
        }
    }

    pub fn with_subtitle<S: Into<String>>(mut self, subtitle: S) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_value<V: Into<CardValue>>(mut self, value: V) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Body text as written, `None` when the card has no value.
    pub fn body(&self) -> Option<String> {
        self.value.as_ref().map(CardValue::to_text)
    }

    /// Forget subtitle and value.
    pub fn clear(&mut self) {
        self.subtitle = None;
        self.value = None;
    }

    pub fn is_empty(&self) -> bool {
        self.subtitle.is_none() && self.value.is_none()
    }

    /// True when both cards would be written identically.
    pub fn same_content(&self, other: &Card) -> bool {
        self.name == other.name && self.subtitle == other.subtitle && self.body() == other.body()
    }
}

impl From<CardRecord> for Card {
    fn from(record: CardRecord) -> Self {
        Self {
            name: record.name.to_lowercase(),
            subtitle: record.subtitle,
            value: record.body.map(CardValue::Text),
        }
    }
}
