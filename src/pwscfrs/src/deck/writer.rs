// pwscfrs/src/deck/writer.rs

use super::Deck;
use crate::card::Card;
use crate::constants::{ATOMIC_SPECIES, CONTROL, PSEUDO_DIR_KEY};
use crate::error::{DeckError, Result};
use crate::namelist::Namelist;
use crate::paths::{absolute_path, write_atomically};
use crate::schema::Schema;
use crate::species::{atomic_species_card, FilesystemLocator, PseudoLocator};
use crate::structure::{self, Structure};
use linked_hash_map::LinkedHashMap;
use log::{debug, info};
use pwnmlrs::{DeckWriter, WriteOptions};
use std::io::Write;
use std::path::Path;

/// Sections as they will be written.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub namelists: LinkedHashMap<String, Namelist>,
    pub cards: Vec<Card>,
}

impl Snapshot {
    pub fn render(&self, options: &WriteOptions) -> String {
        let mut writer = DeckWriter::new(options);
        for namelist in self.namelists.values() {
            writer.namelist(namelist.name(), namelist.iter());
        }
        for card in &self.cards {
            writer.card(card.name(), card.subtitle.as_deref(), card.body().as_deref());
        }
        writer.finish()
    }
}

impl<S: Schema> Deck<S> {
    /// Copy every section that would be written, binding `structure` if given.
    ///
    /// The deck itself is not modified.
    pub fn snapshot<L>(&self, structure: Option<&Structure>, locator: &L) -> Result<Snapshot>
    where
        L: PseudoLocator + ?Sized,
    {
        let mut namelists = self.sections().effective_namelists();
        let mut cards = self.sections().effective_cards()?;

        if let Some(structure) = structure {
            structure::bind(structure, &mut namelists, &mut cards)?;
            let pseudo_dir = namelists
                .get(CONTROL)
                .and_then(|control| control.try_get(PSEUDO_DIR_KEY))
                .and_then(|value| value.as_str())
                .map(str::to_string);
            let species = atomic_species_card(structure, self.species(), pseudo_dir.as_deref(), locator)?;
            cards.retain(|card| card.name() != ATOMIC_SPECIES);
            cards.push(species);
            debug!("Bound structure with {} atoms", structure.len());
        }

        Ok(Snapshot { namelists, cards })
    }

    /// Render the deck as text, looking pseudopotentials up on disk.
    pub fn write(&self, structure: Option<&Structure>, options: &WriteOptions) -> Result<String> {
        self.write_with_locator(structure, options, &FilesystemLocator)
    }

    pub fn write_with_locator<L>(
        &self,
        structure: Option<&Structure>,
        options: &WriteOptions,
        locator: &L,
    ) -> Result<String>
    where
        L: PseudoLocator + ?Sized,
    {
        Ok(self.snapshot(structure, locator)?.render(options))
    }

    /// Write the deck to `path`.
    ///
    /// The text goes to a temporary file next to `path` which replaces it
    /// only once fully written. Nothing is created if rendering fails.
    pub fn write_to_path<P: AsRef<Path>>(
        &self,
        path: P,
        structure: Option<&Structure>,
        options: &WriteOptions,
    ) -> Result<()> {
        self.write_to_path_with_locator(path, structure, options, &FilesystemLocator)
    }

    pub fn write_to_path_with_locator<P, L>(
        &self,
        path: P,
        structure: Option<&Structure>,
        options: &WriteOptions,
        locator: &L,
    ) -> Result<()>
    where
        P: AsRef<Path>,
        L: PseudoLocator + ?Sized,
    {
        let text = self.write_with_locator(structure, options, locator)?;
        let path = absolute_path(path.as_ref())?;
        if !options.force && path.exists() {
            return Err(DeckError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }

        write_atomically(&path, &text)?;
        info!("Wrote input deck {}", path.display());
        Ok(())
    }

    /// Write the deck to an open sink.
    pub fn write_to_writer<W: Write>(
        &self,
        writer: &mut W,
        structure: Option<&Structure>,
        options: &WriteOptions,
    ) -> Result<()> {
        let text = self.write(structure, options)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }
}
