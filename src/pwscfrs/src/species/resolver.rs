// pwscfrs/src/species/resolver.rs

use super::locator::PseudoLocator;
use super::periodic_table::atomic_mass;
use super::specie::Specie;
use crate::card::{Card, CardValue};
use crate::constants::{ATOMIC_SPECIES, DEFAULT_MASS};
use crate::error::{DeckError, Result};
use crate::structure::Structure;
use linked_hash_map::LinkedHashMap;
use log::{debug, error};
use pwnmlrs::FortranValue;

/// Build the `ATOMIC_SPECIES` card for the atom kinds of `structure`.
///
/// One `label mass pseudo` line per distinct kind, in first-seen order.
/// The mass is the specie's override, else the periodic-table mass of the
/// label, else 1.
pub fn atomic_species_card<L>(
    structure: &Structure,
    species: &LinkedHashMap<String, Specie>,
    pseudo_dir: Option<&str>,
    locator: &L,
) -> Result<Card>
where
    L: PseudoLocator + ?Sized,
{
    let mut rows = Vec::new();
    for label in structure.kinds() {
        let specie = match species.get(&label) {
            Some(specie) => specie,
            None => {
                let err = DeckError::MissingSpecies(label);
                error!("{}", err);
                return Err(err);
            }
        };

        if locator.locate(&specie.pseudo, pseudo_dir).is_none() {
            let err = DeckError::MissingPseudopotential {
                specie: label,
                pseudo: specie.pseudo.clone(),
            };
            error!("{} (pseudo_dir: {:?})", err, pseudo_dir);
            return Err(err);
        }

        let mass = specie
            .mass
            .or_else(|| atomic_mass(&label))
            .unwrap_or(DEFAULT_MASS);
        debug!("Specie {}: mass {}, pseudo {}", label, mass, specie.pseudo);
        rows.push(vec![
            label,
            FortranValue::Real(mass).to_fortran_string(),
            specie.pseudo.clone(),
        ]);
    }
    Ok(Card::new(ATOMIC_SPECIES).with_value(CardValue::Table(rows)))
}
