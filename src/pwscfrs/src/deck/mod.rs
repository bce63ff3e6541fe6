// pwscfrs/src/deck/mod.rs

//! In-memory input deck: schema fields, extension sections and species.

pub mod reader;
pub mod writer;

use crate::card::{Card, CardValue};
use crate::error::Result;
use crate::namelist::Namelist;
use crate::registry::{Registration, SectionRegistry};
use crate::schema::{PwscfSchema, Schema};
use crate::species::Specie;
use linked_hash_map::LinkedHashMap;
use log::debug;
use pwnmlrs::FortranValue;

/// A complete input deck governed by the schema `S`.
#[derive(Debug, Clone, Default)]
pub struct Deck<S: Schema> {
    sections: SectionRegistry<S>,
    species: LinkedHashMap<String, Specie>,
}

/// Deck for `pw.x`.
pub type Pwscf = Deck<PwscfSchema>;

impl<S: Schema> Deck<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> &S {
        self.sections.schema()
    }

    pub fn schema_mut(&mut self) -> &mut S {
        self.sections.schema_mut()
    }

    pub fn sections(&self) -> &SectionRegistry<S> {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut SectionRegistry<S> {
        &mut self.sections
    }

    /// Register the pseudopotential for atoms labelled `name`. Last call wins.
    pub fn add_specie<P: Into<Specie>>(&mut self, name: &str, specie: P) {
        let specie = specie.into();
        debug!("Adding specie {} with pseudopotential {}", name, specie.pseudo);
        self.species.insert(name.to_string(), specie);
    }

    pub fn species(&self) -> &LinkedHashMap<String, Specie> {
        &self.species
    }

    pub fn species_mut(&mut self) -> &mut LinkedHashMap<String, Specie> {
        &mut self.species
    }

    /// Create or update a card. See [`SectionRegistry::register_extension_card`].
    pub fn add_card<V: Into<CardValue>>(
        &mut self,
        name: &str,
        value: Option<V>,
        subtitle: Option<&str>,
    ) -> Result<Registration> {
        self.sections.register_extension_card(
            name,
            value.map(Into::into),
            subtitle.map(str::to_string),
        )
    }

    /// Create or replace a namelist. See [`SectionRegistry::register_extension_namelist`].
    pub fn add_namelist<I, K, V>(&mut self, name: &str, entries: I) -> Result<&mut Namelist>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FortranValue>,
    {
        self.sections.register_extension_namelist(name, entries)
    }

    pub fn namelist(&self, name: &str) -> Result<&Namelist> {
        self.sections.namelist(name)
    }

    pub fn namelist_mut(&mut self, name: &str) -> Result<&mut Namelist> {
        self.sections.namelist_mut(name)
    }

    pub fn card(&self, name: &str) -> Result<&Card> {
        self.sections.card(name)
    }

    pub fn card_mut(&mut self, name: &str) -> Result<&mut Card> {
        self.sections.card_mut(name)
    }

    /// Forget every section value. Species are kept.
    pub fn clear(&mut self) {
        self.sections.clear();
    }
}
