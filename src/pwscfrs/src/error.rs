// pwscfrs/src/error.rs

use crate::schema::SectionKind;
use pwnmlrs::NmlError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors raised while reading, editing, or writing an input deck.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The deck is syntactically invalid. A deck that failed to read is left
    /// partially cleared and should be re-read or discarded.
    #[error("Error parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: NmlError,
    },

    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    #[error("Section '{name}' is a {existing}, it cannot also be used as a {requested}")]
    NameCollision {
        name: String,
        existing: SectionKind,
        requested: SectionKind,
    },

    #[error("Found two cards with the same name: '{0}'")]
    DuplicateCard(String),

    #[error("Card '{0}' is handled internally and cannot be set directly")]
    ReservedName(String),

    /// A card under this name would be read back as part of the previous card.
    #[error("Unrecognised card name '{0}'")]
    UnknownCard(String),

    #[error("No specie defined for {0}: no way to get pseudopotential")]
    MissingSpecies(String),

    #[error("No pseudopotential found for {specie}: '{pseudo}'")]
    MissingPseudopotential { specie: String, pseudo: String },

    #[error("Invalid value {value} for {section}.{key}: expected {expected}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        expected: String,
    },

    #[error("Key '{key}' not found in namelist '{section}'")]
    KeyNotFound { section: String, key: String },
}
