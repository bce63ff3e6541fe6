// pwscfrs/src/namelist.rs

use crate::error::{DeckError, Result};
use linked_hash_map::LinkedHashMap;
use pwnmlrs::FortranValue;
use std::fmt;

/// Type accepted by a described namelist key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    /// Integers are widened to reals
    Real,
    Logical,
    Character,
    /// A string restricted to the given lowercase choices, matched caselessly
    Enumerated(&'static [&'static str]),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Real => write!(f, "real"),
            ValueKind::Logical => write!(f, "logical"),
            ValueKind::Character => write!(f, "character"),
            ValueKind::Enumerated(choices) => write!(f, "one of [{}]", choices.join(", ")),
        }
    }
}

/// Declares a known key of a schema namelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec {
    pub name: &'static str,
    pub kind: ValueKind,
    /// Synonyms resolved to `name`
    pub aliases: &'static [&'static str],
    pub help: &'static str,
}

impl KeySpec {
    fn check(&self, section: &str, value: FortranValue) -> Result<FortranValue> {
        let invalid = |value: &FortranValue| DeckError::InvalidValue {
            section: section.to_string(),
            key: self.name.to_string(),
            value: value.to_fortran_string(),
            expected: self.kind.to_string(),
        };
        match (self.kind, value) {
            (ValueKind::Integer, v @ FortranValue::Integer(_)) => Ok(v),
            (ValueKind::Real, FortranValue::Integer(i)) => Ok(FortranValue::Real(i as f64)),
            (ValueKind::Real, v @ FortranValue::Real(_)) => Ok(v),
            (ValueKind::Logical, v @ FortranValue::Logical(_)) => Ok(v),
            (ValueKind::Character, v @ FortranValue::Character(_)) => Ok(v),
            (ValueKind::Enumerated(choices), FortranValue::Character(s)) => {
                let lower = s.to_lowercase();
                match choices.iter().find(|c| **c == lower) {
                    Some(choice) => Ok(FortranValue::character(*choice)),
                    None => Err(invalid(&FortranValue::Character(s))),
                }
            }
            (_, v) => Err(invalid(&v)),
        }
    }
}

/// Normalise a key: lowercase, no whitespace (`CellDM (1)` becomes `celldm(1)`).
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// A namelist group: settings keyed by name, kept in insertion order.
///
/// Keys listed in the namelist's [`KeySpec`]s are type checked on `set` and
/// their aliases resolve to the same entry. Other keys are accepted as given.
#[derive(Debug, Clone)]
pub struct Namelist {
    name: String,
    values: LinkedHashMap<String, FortranValue>,
    specs: &'static [KeySpec],
}

impl Namelist {
    /// Create an empty namelist without key descriptors.
    pub fn new(name: &str) -> Self {
        Self::with_specs(name, &[])
    }

    pub fn with_specs(name: &str, specs: &'static [KeySpec]) -> Self {
        Self {
            name: name.to_lowercase(),
            values: LinkedHashMap::new(),
            specs,
        }
    }

    /// Create a namelist from key/value pairs.
    pub fn from_entries<I, K, V>(name: &str, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FortranValue>,
    {
        let mut namelist = Self::new(name);
        namelist.extend(entries)?;
        Ok(namelist)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specs(&self) -> &'static [KeySpec] {
        self.specs
    }

    fn spec(&self, key: &str) -> Option<&'static KeySpec> {
        self.specs
            .iter()
            .find(|s| s.name == key || s.aliases.contains(&key))
    }

    fn canonical_key(&self, key: &str) -> String {
        let key = normalize_key(key);
        match self.spec(&key) {
            Some(spec) => spec.name.to_string(),
            None => key,
        }
    }

    /// Set a value. An existing key keeps its position.
    pub fn set<V: Into<FortranValue>>(&mut self, key: &str, value: V) -> Result<()> {
        let key = self.canonical_key(key);
        let value = match self.spec(&key) {
            Some(spec) => spec.check(&self.name, value.into())?,
            None => value.into(),
        };
        match self.values.get_mut(&key) {
            Some(existing) => *existing = value,
            None => {
                self.values.insert(key, value);
            }
        }
        Ok(())
    }

    /// Set every pair in `entries`, stopping at the first invalid value.
    pub fn extend<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FortranValue>,
    {
        for (key, value) in entries {
            self.set(key.as_ref(), value)?;
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<&FortranValue> {
        self.try_get(key).ok_or_else(|| DeckError::KeyNotFound {
            section: self.name.clone(),
            key: key.to_string(),
        })
    }

    pub fn try_get(&self, key: &str) -> Option<&FortranValue> {
        self.values.get(&self.canonical_key(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.try_get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<FortranValue> {
        let key = self.canonical_key(key);
        self.values.remove(&key)
    }

    /// Remove every value. Name and key descriptors are kept.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FortranValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PartialEq for Namelist {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.values == other.values
    }
}
