// pwscfrs/src/registry.rs

//! One name space for schema fields and extension sections.
//!
//! A name is looked up in three tiers: schema fields first, then extension
//! namelists, then extension cards. Registration follows the same order, so
//! a schema field is never shadowed by an extension of the same name.

use crate::card::{Card, CardValue};
use crate::error::{DeckError, Result};
use crate::namelist::{normalize_key, Namelist};
use crate::schema::{Schema, SectionKind};
use linked_hash_map::LinkedHashMap;
use linked_hash_set::LinkedHashSet;
use log::{debug, warn};
use pwnmlrs::FortranValue;

/// A section found by [`SectionRegistry::resolve`].
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    SchemaNamelist(&'a Namelist),
    SchemaCard(&'a Card),
    ExtensionNamelist(&'a Namelist),
    ExtensionCard(&'a Card),
}

impl<'a> Resolved<'a> {
    pub fn kind(&self) -> SectionKind {
        match self {
            Resolved::SchemaNamelist(_) | Resolved::ExtensionNamelist(_) => SectionKind::Namelist,
            Resolved::SchemaCard(_) | Resolved::ExtensionCard(_) => SectionKind::Card,
        }
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, Resolved::SchemaNamelist(_) | Resolved::SchemaCard(_))
    }

    pub fn as_namelist(&self) -> Option<&'a Namelist> {
        match *self {
            Resolved::SchemaNamelist(n) | Resolved::ExtensionNamelist(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_card(&self) -> Option<&'a Card> {
        match *self {
            Resolved::SchemaCard(c) | Resolved::ExtensionCard(c) => Some(c),
            _ => None,
        }
    }
}

/// Mutable counterpart of [`Resolved`].
#[derive(Debug)]
pub enum ResolvedMut<'a> {
    SchemaNamelist(&'a mut Namelist),
    SchemaCard(&'a mut Card),
    ExtensionNamelist(&'a mut Namelist),
    ExtensionCard(&'a mut Card),
}

impl<'a> ResolvedMut<'a> {
    pub fn into_namelist(self) -> Option<&'a mut Namelist> {
        match self {
            ResolvedMut::SchemaNamelist(n) | ResolvedMut::ExtensionNamelist(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_card(self) -> Option<&'a mut Card> {
        match self {
            ResolvedMut::SchemaCard(c) | ResolvedMut::ExtensionCard(c) => Some(c),
            _ => None,
        }
    }
}

/// Where a card registration ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Schema,
    Extension,
    /// The name is reserved and the card was dropped
    Ignored,
}

/// Schema fields plus the namelists and cards registered at run time.
#[derive(Debug, Clone, Default)]
pub struct SectionRegistry<S: Schema> {
    schema: S,
    namelists: LinkedHashMap<String, Namelist>,
    cards: LinkedHashMap<String, Card>,
}

impl<S: Schema> SectionRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut S {
        &mut self.schema
    }

    /// Look `name` up: schema, then extension namelists, then extension cards.
    pub fn resolve(&self, name: &str) -> Result<Resolved<'_>> {
        let key = normalize_key(name);
        if let Some(namelist) = self.schema.namelist(&key) {
            return Ok(Resolved::SchemaNamelist(namelist));
        }
        if let Some(card) = self.schema.card(&key) {
            return Ok(Resolved::SchemaCard(card));
        }
        if let Some(namelist) = self.namelists.get(&key) {
            return Ok(Resolved::ExtensionNamelist(namelist));
        }
        if let Some(card) = self.cards.get(&key) {
            return Ok(Resolved::ExtensionCard(card));
        }
        Err(DeckError::UnknownSection(name.to_string()))
    }

    pub fn resolve_mut(&mut self, name: &str) -> Result<ResolvedMut<'_>> {
        let key = normalize_key(name);
        if let Some(field) = S::field(&key) {
            let resolved = match field.kind {
                SectionKind::Namelist => self.schema.namelist_mut(&key).map(ResolvedMut::SchemaNamelist),
                SectionKind::Card => self.schema.card_mut(&key).map(ResolvedMut::SchemaCard),
            };
            if let Some(resolved) = resolved {
                return Ok(resolved);
            }
        }
        if let Some(namelist) = self.namelists.get_mut(&key) {
            return Ok(ResolvedMut::ExtensionNamelist(namelist));
        }
        if let Some(card) = self.cards.get_mut(&key) {
            return Ok(ResolvedMut::ExtensionCard(card));
        }
        Err(DeckError::UnknownSection(name.to_string()))
    }

    /// The namelist called `name`, wherever it lives.
    pub fn namelist(&self, name: &str) -> Result<&Namelist> {
        match self.resolve(name)? {
            Resolved::SchemaNamelist(n) | Resolved::ExtensionNamelist(n) => Ok(n),
            _ => Err(DeckError::UnknownSection(name.to_string())),
        }
    }

    pub fn namelist_mut(&mut self, name: &str) -> Result<&mut Namelist> {
        self.resolve_mut(name)?
            .into_namelist()
            .ok_or_else(|| DeckError::UnknownSection(name.to_string()))
    }

    /// The card called `name`, wherever it lives.
    pub fn card(&self, name: &str) -> Result<&Card> {
        match self.resolve(name)? {
            Resolved::SchemaCard(c) | Resolved::ExtensionCard(c) => Ok(c),
            _ => Err(DeckError::UnknownSection(name.to_string())),
        }
    }

    pub fn card_mut(&mut self, name: &str) -> Result<&mut Card> {
        self.resolve_mut(name)?
            .into_card()
            .ok_or_else(|| DeckError::UnknownSection(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// Upsert a namelist.
    ///
    /// A schema namelist of the same name is cleared and refilled in place.
    /// Otherwise the extension namelist is created or replaced.
    pub fn register_extension_namelist<I, K, V>(&mut self, name: &str, entries: I) -> Result<&mut Namelist>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FortranValue>,
    {
        let key = normalize_key(name);
        if let Ok(existing) = self.resolve(&key) {
            if existing.kind() == SectionKind::Card {
                return Err(DeckError::NameCollision {
                    name: key,
                    existing: SectionKind::Card,
                    requested: SectionKind::Namelist,
                });
            }
        }

        if self.schema.namelist(&key).is_some() {
            debug!("Namelist '{}' is a schema field, overwriting it", key);
            let namelist = self
                .schema
                .namelist_mut(&key)
                .ok_or_else(|| DeckError::UnknownSection(key.clone()))?;
            namelist.clear();
            namelist.extend(entries)?;
            return Ok(namelist);
        }

        let namelist = Namelist::from_entries(&key, entries)?;
        if self.namelists.insert(key.clone(), namelist).is_some() {
            debug!("Replacing extension namelist '{}'", key);
        }
        self.namelists
            .get_mut(&key)
            .ok_or(DeckError::UnknownSection(key))
    }

    /// Upsert a card.
    ///
    /// A schema card of the same name gets the new subtitle and value in
    /// place. Reserved names are logged and dropped. Only names the reader
    /// recognises as card headers are accepted.
    pub fn register_extension_card(
        &mut self,
        name: &str,
        value: Option<CardValue>,
        subtitle: Option<String>,
    ) -> Result<Registration> {
        let key = normalize_key(name);
        if S::is_reserved(&key) {
            warn!("{}", DeckError::ReservedName(key));
            return Ok(Registration::Ignored);
        }
        if let Ok(existing) = self.resolve(&key) {
            if existing.kind() == SectionKind::Namelist {
                return Err(DeckError::NameCollision {
                    name: key,
                    existing: SectionKind::Namelist,
                    requested: SectionKind::Card,
                });
            }
        }
        if !S::is_card_name(&key) {
            return Err(DeckError::UnknownCard(key));
        }

        if let Some(card) = self.schema.card_mut(&key) {
            card.subtitle = subtitle;
            card.value = value;
            return Ok(Registration::Schema);
        }

        let mut card = Card::new(&key);
        card.subtitle = subtitle;
        card.value = value;
        self.cards.insert(key, card);
        Ok(Registration::Extension)
    }

    pub fn extension_namelists(&self) -> &LinkedHashMap<String, Namelist> {
        &self.namelists
    }

    pub fn extension_cards(&self) -> &LinkedHashMap<String, Card> {
        &self.cards
    }

    /// Copies of every namelist, schema fields first.
    pub fn effective_namelists(&self) -> LinkedHashMap<String, Namelist> {
        let mut merged = LinkedHashMap::new();
        for namelist in self.schema.namelists() {
            merged.insert(namelist.name().to_string(), namelist.clone());
        }
        for (name, namelist) in &self.namelists {
            merged.insert(name.clone(), namelist.clone());
        }
        merged
    }

    /// Copies of every card with content, schema fields first.
    pub fn effective_cards(&self) -> Result<Vec<Card>> {
        let schema_cards = self
            .schema
            .cards()
            .into_iter()
            .filter(|card| !card.is_empty())
            .cloned();
        merge_cards(schema_cards.chain(self.cards.values().cloned()))
    }

    /// Names of every section that resolves, schema fields first.
    pub fn names(&self) -> LinkedHashSet<String> {
        let mut names = LinkedHashSet::new();
        for field in S::fields() {
            names.insert_if_absent(field.name.to_string());
        }
        for name in self.namelists.keys().chain(self.cards.keys()) {
            names.insert_if_absent(name.clone());
        }
        names
    }

    /// Empty every schema field and both extension registries.
    pub fn clear(&mut self) {
        self.schema.clear();
        self.namelists.clear();
        self.cards.clear();
    }
}

/// Collect cards, failing on the first name seen twice.
pub fn merge_cards<I: IntoIterator<Item = Card>>(cards: I) -> Result<Vec<Card>> {
    let mut seen = LinkedHashSet::new();
    let mut merged = Vec::new();
    for card in cards {
        if !seen.insert_if_absent(card.name().to_string()) {
            return Err(DeckError::DuplicateCard(card.name().to_string()));
        }
        merged.push(card);
    }
    Ok(merged)
}
