// pwscfrs/src/constants.rs

/// Card derived from the structure and the species registry at write time.
pub const ATOMIC_SPECIES: &str = "atomic_species";
pub const ATOMIC_POSITIONS: &str = "atomic_positions";
pub const CELL_PARAMETERS: &str = "cell_parameters";

pub const CONTROL: &str = "control";
pub const SYSTEM: &str = "system";
pub const PSEUDO_DIR_KEY: &str = "pseudo_dir";

/// Environment variable searched for pseudopotential files.
pub const PSEUDO_ENV_VAR: &str = "ESPRESSO_PSEUDO";
/// Fallback pseudopotential directory, relative to the home directory.
pub const HOME_PSEUDO_DIR: &str = "espresso/pseudo";

/// Mass written for species with neither an override nor a periodic-table entry.
pub const DEFAULT_MASS: f64 = 1.0;
