// pwscfrs/src/schema.rs

//! Sections every deck carries, declared ahead of time.

use crate::card::Card;
use crate::constants::{ATOMIC_SPECIES, CONTROL, SYSTEM};
use crate::namelist::{normalize_key, KeySpec, Namelist, ValueKind};
use std::fmt;

/// Whether a section is a namelist group or a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Namelist,
    Card,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Namelist => write!(f, "namelist"),
            SectionKind::Card => write!(f, "card"),
        }
    }
}

/// One entry of a schema's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: SectionKind,
    /// Synonyms addressing the same field
    pub aliases: &'static [&'static str],
}

/// A fixed set of namelist and card fields bound to concrete storage.
///
/// Implementors list their fields in `fields()` and hand out the storage
/// for each listed name. A field never disappears: `clear` empties content
/// but keeps every instance.
pub trait Schema: Default + Clone + fmt::Debug {
    /// Fields in output order.
    fn fields() -> &'static [FieldDescriptor];

    fn namelist(&self, name: &str) -> Option<&Namelist>;
    fn namelist_mut(&mut self, name: &str) -> Option<&mut Namelist>;
    fn card(&self, name: &str) -> Option<&Card>;
    fn card_mut(&mut self, name: &str) -> Option<&mut Card>;

    /// Names that may appear in a file but are derived at write time.
    fn reserved_cards() -> &'static [&'static str] {
        &[]
    }

    /// Canonical field for `name` or one of its synonyms.
    fn field(name: &str) -> Option<&'static FieldDescriptor> {
        let name = normalize_key(name);
        Self::fields()
            .iter()
            .find(|f| f.name == name || f.aliases.contains(&name.as_str()))
    }

    /// Every card name a reader recognises as a header: the format's own
    /// cards, schema cards with their synonyms and reserved cards.
    fn card_names() -> Vec<&'static str> {
        let schema_cards = Self::fields()
            .iter()
            .filter(|f| f.kind == SectionKind::Card)
            .flat_map(|f| std::iter::once(f.name).chain(f.aliases.iter().copied()));
        let mut names = pwnmlrs::CARD_NAMES.to_vec();
        for name in schema_cards.chain(Self::reserved_cards().iter().copied()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    fn is_card_name(name: &str) -> bool {
        let name = normalize_key(name);
        Self::card_names().contains(&name.as_str())
    }

    fn is_reserved(name: &str) -> bool {
        let name = normalize_key(name);
        Self::reserved_cards().contains(&name.as_str())
    }

    /// Schema namelists in field order.
    fn namelists(&self) -> Vec<&Namelist> {
        Self::fields()
            .iter()
            .filter(|f| f.kind == SectionKind::Namelist)
            .filter_map(|f| self.namelist(f.name))
            .collect()
    }

    /// Schema cards in field order.
    fn cards(&self) -> Vec<&Card> {
        Self::fields()
            .iter()
            .filter(|f| f.kind == SectionKind::Card)
            .filter_map(|f| self.card(f.name))
            .collect()
    }

    /// Forget every value, keeping the field instances.
    fn clear(&mut self) {
        for field in Self::fields() {
            match field.kind {
                SectionKind::Namelist => {
                    if let Some(namelist) = self.namelist_mut(field.name) {
                        namelist.clear();
                    }
                }
                SectionKind::Card => {
                    if let Some(card) = self.card_mut(field.name) {
                        card.clear();
                    }
                }
            }
        }
    }
}

pub const CALCULATIONS: &[&str] = &["scf", "nscf", "bands", "relax", "md", "vc-relax", "vc-md"];

pub const CONTROL_KEYS: &[KeySpec] = &[
    KeySpec {
        name: "calculation",
        kind: ValueKind::Enumerated(CALCULATIONS),
        aliases: &[],
        help: "A string describing the task to be performed",
    },
    KeySpec {
        name: "title",
        kind: ValueKind::Character,
        aliases: &[],
        help: "Reprinted on output",
    },
    KeySpec {
        name: "verbosity",
        kind: ValueKind::Enumerated(&["high", "low"]),
        aliases: &[],
        help: "Amount of information printed on output",
    },
    KeySpec {
        name: "prefix",
        kind: ValueKind::Character,
        aliases: &[],
        help: "Prepended to input/output filenames",
    },
    KeySpec {
        name: "pseudo_dir",
        kind: ValueKind::Character,
        aliases: &[],
        help: "Directory containing pseudopotential files",
    },
];

pub const SYSTEM_KEYS: &[KeySpec] = &[KeySpec {
    name: "nbnd",
    kind: ValueKind::Integer,
    aliases: &[],
    help: "Number of electronic states (bands) to be calculated",
}];

pub const ELECTRONS_KEYS: &[KeySpec] = &[KeySpec {
    name: "electron_maxstep",
    kind: ValueKind::Integer,
    aliases: &["itermax"],
    help: "Maximum number of iterations in a scf step",
}];

const PWSCF_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        name: CONTROL,
        kind: SectionKind::Namelist,
        aliases: &[],
    },
    FieldDescriptor {
        name: SYSTEM,
        kind: SectionKind::Namelist,
        aliases: &[],
    },
    FieldDescriptor {
        name: "electrons",
        kind: SectionKind::Namelist,
        aliases: &[],
    },
    FieldDescriptor {
        name: "k_points",
        kind: SectionKind::Card,
        aliases: &["kpoints"],
    },
];

/// Sections of a pw.x input deck.
#[derive(Debug, Clone, PartialEq)]
pub struct PwscfSchema {
    pub control: Namelist,
    pub system: Namelist,
    pub electrons: Namelist,
    pub k_points: Card,
}

impl Default for PwscfSchema {
    fn default() -> Self {
        Self {
            control: Namelist::with_specs(CONTROL, CONTROL_KEYS),
            system: Namelist::with_specs(SYSTEM, SYSTEM_KEYS),
            electrons: Namelist::with_specs("electrons", ELECTRONS_KEYS),
            k_points: Card::new("k_points").with_subtitle("gamma"),
        }
    }
}

impl Schema for PwscfSchema {
    fn fields() -> &'static [FieldDescriptor] {
        PWSCF_FIELDS
    }

    fn namelist(&self, name: &str) -> Option<&Namelist> {
        match Self::field(name)?.name {
            CONTROL => Some(&self.control),
            SYSTEM => Some(&self.system),
            "electrons" => Some(&self.electrons),
            _ => None,
        }
    }

    fn namelist_mut(&mut self, name: &str) -> Option<&mut Namelist> {
        match Self::field(name)?.name {
            CONTROL => Some(&mut self.control),
            SYSTEM => Some(&mut self.system),
            "electrons" => Some(&mut self.electrons),
            _ => None,
        }
    }

    fn card(&self, name: &str) -> Option<&Card> {
        match Self::field(name)?.name {
            "k_points" => Some(&self.k_points),
            _ => None,
        }
    }

    fn card_mut(&mut self, name: &str) -> Option<&mut Card> {
        match Self::field(name)?.name {
            "k_points" => Some(&mut self.k_points),
            _ => None,
        }
    }

    fn reserved_cards() -> &'static [&'static str] {
        &[ATOMIC_SPECIES]
    }
}
