// pwscfrs/src/config/species.rs

use crate::species::Specie;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A specie entry of a job file.
///
/// Either a bare pseudopotential name, `Si: Si.pz-vbc.UPF`, or a mapping
/// with an optional mass, `Si: {pseudo: Si.pz-vbc.UPF, mass: 28.0855}`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecieConfig(Specie);

impl SpecieConfig {
    pub fn specie(&self) -> &Specie {
        &self.0
    }
}

impl From<SpecieConfig> for Specie {
    fn from(config: SpecieConfig) -> Self {
        config.0
    }
}

impl<'de> Deserialize<'de> for SpecieConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum SpecieValue {
            Pseudo(String),
            Full(Specie),
        }

        let specie = match SpecieValue::deserialize(deserializer)? {
            SpecieValue::Pseudo(pseudo) => Specie::new(pseudo),
            SpecieValue::Full(specie) => specie,
        };
        if specie.pseudo.trim().is_empty() {
            return Err(D::Error::custom("pseudopotential name must not be empty"));
        }
        if let Some(mass) = specie.mass.filter(|m| *m <= 0.0) {
            return Err(D::Error::custom(format!("mass must be > 0, got {}", mass)));
        }
        Ok(Self(specie))
    }
}

impl Serialize for SpecieConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0.mass {
            None => serializer.serialize_str(&self.0.pseudo),
            Some(_) => self.0.serialize(serializer),
        }
    }
}
