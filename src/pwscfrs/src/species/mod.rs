// pwscfrs/src/species/mod.rs

pub mod locator;
pub mod periodic_table;
pub mod resolver;
pub mod specie;

pub use locator::{FilesystemLocator, PseudoLocator};
pub use periodic_table::atomic_mass;
pub use resolver::atomic_species_card;
pub use specie::Specie;
