// pwscfrs/src/species/specie.rs

use serde::{Deserialize, Serialize};

/// Pseudopotential and optional mass registered for one atom label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specie {
    /// Pseudopotential file name, resolved against `pseudo_dir`
    pub pseudo: String,
    /// Overrides the periodic-table mass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
}

impl Specie {
    pub fn new<S: Into<String>>(pseudo: S) -> Self {
        Self {
            pseudo: pseudo.into(),
            mass: None,
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }
}

impl From<&str> for Specie {
    fn from(pseudo: &str) -> Self {
        Self::new(pseudo)
    }
}

impl From<String> for Specie {
    fn from(pseudo: String) -> Self {
        Self::new(pseudo)
    }
}
