// pwnmlrs/src/lib.rs

//! Reader and writer for PWscf-style input decks.
//!
//! An input deck is a sequence of Fortran namelist groups (`&name ... /`)
//! followed by free-form cards: a header line naming the card, with an
//! optional subtitle, and a body running to the next card. This crate
//! provides:
//! - Tokenization of namelist groups into scalar [`FortranValue`]s
//! - Splitting a deck into [`NamelistRecord`]s and [`CardRecord`]s
//! - Output of groups and cards through [`DeckWriter`]

pub mod error;
pub mod formatting;
pub mod parser;
pub mod records;
pub mod scanner;
pub mod value;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub use error::{NmlError, Result};
pub use formatting::{DeckWriter, WriteOptions};
pub use parser::DeckParser;
pub use records::{CardRecord, DeckRecords, NamelistRecord, CARD_NAMES};
pub use value::FortranValue;

/// Parse an input deck from a file path.
///
/// # Examples
///
/// ```no_run
/// fn main() -> Result<(), pwnmlrs::NmlError> {
///     let deck = pwnmlrs::read("pw.in")?;
///     println!("{} namelists, {} cards", deck.namelists.len(), deck.cards.len());
///     Ok(())
/// }
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> Result<DeckRecords> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    reads(&contents)
}

/// Parse an input deck from a string.
///
/// # Examples
///
/// ```
/// fn main() -> Result<(), pwnmlrs::NmlError> {
///     let deck = pwnmlrs::reads("&control calculation='scf' /\nK_POINTS gamma\n")?;
///     assert_eq!(deck.cards[0].name, "k_points");
///     Ok(())
/// }
/// ```
pub fn reads(content: &str) -> Result<DeckRecords> {
    DeckParser::new(content).parse()
}

/// Render records as deck text.
pub fn writes(records: &DeckRecords, options: &WriteOptions) -> String {
    let mut writer = DeckWriter::new(options);
    for group in &records.namelists {
        writer.namelist(
            &group.name,
            group.entries.iter().map(|(k, v)| (k.as_str(), v)),
        );
    }
    for card in &records.cards {
        writer.card(&card.name, card.subtitle.as_deref(), card.body.as_deref());
    }
    writer.finish()
}

/// Write records to a file.
pub fn write<P: AsRef<Path>>(records: &DeckRecords, path: P, options: &WriteOptions) -> Result<()> {
    let path = path.as_ref();
    if !options.force && path.exists() {
        return Err(NmlError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        )));
    }
    let mut file = File::create(path)?;
    write_to_writer(records, &mut file, options)
}

/// Write records to any writer implementing the Write trait.
pub fn write_to_writer<W: Write>(
    records: &DeckRecords,
    writer: &mut W,
    options: &WriteOptions,
) -> Result<()> {
    writer.write_all(writes(records, options).as_bytes())?;
    Ok(())
}

#[cfg(feature = "json")]
/// Convert parsed records to a JSON string.
pub fn to_json(records: &DeckRecords) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
