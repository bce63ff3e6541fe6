// pwnmlrs/src/records.rs

//! Raw section records produced by the deck parser.

use crate::value::FortranValue;
use serde::{Deserialize, Serialize};

/// Card names recognised by default. Headers are matched case-insensitively.
pub const CARD_NAMES: &[&str] = &[
    "atomic_species",
    "atomic_positions",
    "k_points",
    "additional_k_points",
    "cell_parameters",
    "occupations",
    "constraints",
    "atomic_velocities",
    "atomic_forces",
    "solvents",
    "hubbard",
];

/// One `&name ... /` group, with its assignments in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamelistRecord {
    /// Lowercase group name
    pub name: String,
    /// Lowercase keys and their values, in file order
    pub entries: Vec<(String, FortranValue)>,
    /// Line of the group header (1-based)
    pub line: usize,
}

impl NamelistRecord {
    pub fn new<S: Into<String>>(name: S, line: usize) -> Self {
        Self {
            name: name.into().to_lowercase(),
            entries: Vec::new(),
            line,
        }
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&FortranValue> {
        let key = key.to_lowercase();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Insert or replace a value. Returns the previous value if any.
    pub fn set(&mut self, key: &str, value: FortranValue) -> Option<FortranValue> {
        let key = key.to_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }
}

/// One card: a header line with an optional subtitle and the lines below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Lowercase card name
    pub name: String,
    /// Text after the card name, without `{}`/`()` delimiters
    pub subtitle: Option<String>,
    /// Body lines joined with `\n`; `None` if the card has no body
    pub body: Option<String>,
    /// Line of the card header (1-based)
    pub line: usize,
}

/// Everything found in one input deck, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckRecords {
    pub namelists: Vec<NamelistRecord>,
    pub cards: Vec<CardRecord>,
}

impl DeckRecords {
    pub fn namelist(&self, name: &str) -> Option<&NamelistRecord> {
        let name = name.to_lowercase();
        self.namelists.iter().find(|n| n.name == name)
    }

    pub fn card(&self, name: &str) -> Option<&CardRecord> {
        let name = name.to_lowercase();
        self.cards.iter().find(|c| c.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.namelists.is_empty() && self.cards.is_empty()
    }
}
