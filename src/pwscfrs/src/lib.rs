// pwscfrs/src/lib.rs

//! Input decks for PWscf (`pw.x`).
//!
//! A [`Deck`] holds the namelists and cards a schema declares, plus any
//! other sections found in a file, under one name space. Reading a file
//! fills schema fields and registers the rest as extensions; writing merges
//! everything back, binds an optional [`Structure`] and regenerates the
//! `ATOMIC_SPECIES` card from the registered species.

pub mod card;
pub mod cli;
pub mod config;
pub mod constants;
pub mod deck;
pub mod error;
pub mod namelist;
pub mod paths;
pub mod registry;
pub mod schema;
pub mod species;
pub mod structure;

// Re-export commonly used types
pub use card::{Card, CardValue};
pub use config::JobConfig;
pub use deck::{Deck, Pwscf};
pub use error::{DeckError, Result};
pub use namelist::Namelist;
pub use pwnmlrs::{FortranValue, WriteOptions};
pub use registry::{Registration, Resolved, SectionRegistry};
pub use schema::{PwscfSchema, Schema, SectionKind};
pub use species::{PseudoLocator, Specie};
pub use structure::{Atom, Structure};
