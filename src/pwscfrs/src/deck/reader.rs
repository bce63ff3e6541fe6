// pwscfrs/src/deck/reader.rs

use super::Deck;
use crate::card::Card;
use crate::error::{DeckError, Result};
use crate::paths::absolute_path;
use crate::schema::Schema;
use log::{debug, info};
use pwnmlrs::{DeckParser, DeckRecords};
use std::path::{Path, PathBuf};

impl<S: Schema> Deck<S> {
    /// Read a deck from `path` into `self`.
    ///
    /// With `clear`, every section is emptied first; otherwise values from the
    /// file are merged into what is already there. Namelists and cards named
    /// like a schema field fill that field, the rest become extension
    /// sections. Reserved cards are dropped. On error the deck may be left
    /// partially read and should be discarded.
    pub fn read<P: AsRef<Path>>(&mut self, path: P, clear: bool) -> Result<()> {
        if clear {
            self.clear();
        }

        let path = absolute_path(path.as_ref())?;
        if !path.is_file() {
            return Err(DeckError::FileNotFound(path));
        }
        info!("Reading input deck {}", path.display());
        let content = fs_err::read_to_string(&path)?;
        self.read_records(&content, path)
    }

    /// Read a deck from a string. See [`Deck::read`].
    pub fn read_str(&mut self, content: &str, clear: bool) -> Result<()> {
        if clear {
            self.clear();
        }
        self.read_records(content, PathBuf::from("<string>"))
    }

    /// Open a new deck from `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut deck = Self::new();
        deck.read(path, true)?;
        Ok(deck)
    }

    fn read_records(&mut self, content: &str, path: PathBuf) -> Result<()> {
        let records = DeckParser::new(content)
            .with_card_names(S::card_names())
            .parse()
            .map_err(|source| DeckError::Parse { path, source })?;
        self.reconcile(records)
    }

    fn reconcile(&mut self, records: DeckRecords) -> Result<()> {
        let DeckRecords { namelists, cards } = records;

        for record in namelists {
            match self.schema_mut().namelist_mut(&record.name) {
                Some(namelist) => {
                    debug!("Merging namelist {} into schema field", record.name);
                    for (key, value) in record.entries {
                        namelist.set(&key, value)?;
                    }
                }
                None => {
                    debug!("Registering extension namelist {}", record.name);
                    self.sections_mut()
                        .register_extension_namelist(&record.name, record.entries)?;
                }
            }
        }

        for record in cards {
            let card = Card::from(record);
            if S::is_reserved(card.name()) {
                debug!("Skipping card {}, it is generated on write", card.name());
                continue;
            }
            match self.schema_mut().card_mut(card.name()) {
                Some(field) => {
                    field.subtitle = card.subtitle;
                    field.value = card.value;
                }
                None => {
                    debug!("Registering extension card {}", card.name());
                    let name = card.name().to_string();
                    self.sections_mut()
                        .register_extension_card(&name, card.value, card.subtitle)?;
                }
            }
        }
        Ok(())
    }
}
