// pwscfrs/src/structure.rs

//! Periodic cell and atoms, and how they are written into a deck.

use crate::card::{Card, CardValue};
use crate::constants::{ATOMIC_POSITIONS, CELL_PARAMETERS, SYSTEM};
use crate::error::Result;
use crate::namelist::Namelist;
use linked_hash_map::LinkedHashMap;
use linked_hash_set::LinkedHashSet;
use log::debug;
use serde::{Deserialize, Serialize};

/// An atom of a given kind at a Cartesian position, in units of the cell scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub kind: String,
    pub position: [f64; 3],
}

fn default_scale() -> f64 {
    1.0
}

/// Lattice vectors (rows of `cell`) and atoms. Lengths are multiplied by
/// `scale` to give Angstrom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub cell: [[f64; 3]; 3],
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub atoms: Vec<Atom>,
}

impl Structure {
    pub fn new(cell: [[f64; 3]; 3]) -> Self {
        Self {
            cell,
            scale: default_scale(),
            atoms: Vec::new(),
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn add_atom<S: Into<String>>(&mut self, kind: S, position: [f64; 3]) -> &mut Self {
        self.atoms.push(Atom {
            kind: kind.into(),
            position,
        });
        self
    }

    /// Distinct atom kinds in first-seen order.
    pub fn kinds(&self) -> LinkedHashSet<String> {
        let mut kinds = LinkedHashSet::new();
        for atom in &self.atoms {
            kinds.insert_if_absent(atom.kind.clone());
        }
        kinds
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    fn cell_parameters(&self) -> Card {
        let rows = self
            .cell
            .iter()
            .map(|row| row.iter().map(|x| format_coordinate(x * self.scale)).collect())
            .collect::<Vec<Vec<String>>>();
        Card::new(CELL_PARAMETERS)
            .with_subtitle("angstrom")
            .with_value(CardValue::Table(rows))
    }

    fn atomic_positions(&self) -> Card {
        let rows = self
            .atoms
            .iter()
            .map(|atom| {
                std::iter::once(atom.kind.clone())
                    .chain(atom.position.iter().map(|x| format_coordinate(x * self.scale)))
                    .collect()
            })
            .collect::<Vec<Vec<String>>>();
        Card::new(ATOMIC_POSITIONS)
            .with_subtitle("angstrom")
            .with_value(CardValue::Table(rows))
    }
}

fn format_coordinate(value: f64) -> String {
    format!("{:.10}", value)
}

// Cell given explicitly; these describe a Bravais lattice instead
const LATTICE_KEYS: &[&str] = &["a", "b", "c", "cosab", "cosac", "cosbc"];

/// Write `structure` into deck sections.
///
/// The `system` namelist gets `ibrav = 0`, `nat` and `ntyp`; cards for the
/// cell and the positions replace any cards of the same name.
pub fn bind(
    structure: &Structure,
    namelists: &mut LinkedHashMap<String, Namelist>,
    cards: &mut Vec<Card>,
) -> Result<()> {
    if !namelists.contains_key(SYSTEM) {
        namelists.insert(SYSTEM.to_string(), Namelist::new(SYSTEM));
    }
    if let Some(system) = namelists.get_mut(SYSTEM) {
        let stale: Vec<String> = system
            .keys()
            .into_iter()
            .filter(|k| k.starts_with("celldm(") || LATTICE_KEYS.contains(&k.as_str()))
            .collect();
        for key in stale {
            debug!("Dropping system.{} in favour of explicit cell parameters", key);
            system.remove(&key);
        }
        system.set("ibrav", 0)?;
        system.set("nat", structure.len())?;
        system.set("ntyp", structure.kinds().len())?;
    }

    for card in [structure.cell_parameters(), structure.atomic_positions()] {
        cards.retain(|existing| existing.name() != card.name());
        cards.push(card);
    }
    Ok(())
}
