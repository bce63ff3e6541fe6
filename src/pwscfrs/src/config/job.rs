// pwscfrs/src/config/job.rs

use crate::card::CardValue;
use crate::config::species::SpecieConfig;
use crate::constants::PSEUDO_DIR_KEY;
use crate::deck::Pwscf;
use crate::error::DeckError;
use crate::structure::Structure;
use anyhow::Context;
use linked_hash_map::LinkedHashMap;
use log::{debug, info};
use pwnmlrs::FortranValue;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Subtitle and body of a card set from a job file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub value: Option<CardValue>,
}

/// Job description parsed from a YAML file.
///
/// ```yaml
/// template: si.scf.in
/// pseudo_dir: ./pseudo
/// species:
///   Si: Si.pz-vbc.UPF
/// namelists:
///   control: {calculation: relax}
/// cards:
///   k_points: {subtitle: automatic, value: "4 4 4 1 1 1"}
/// structure:
///   cell: [[0.0, 0.5, 0.5], [0.5, 0.0, 0.5], [0.5, 0.5, 0.0]]
///   scale: 5.43
///   atoms:
///     - {kind: Si, position: [0.0, 0.0, 0.0]}
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    /// Deck read before the overrides below are applied
    #[serde(default)]
    template: Option<PathBuf>,
    #[serde(default)]
    pseudo_dir: Option<String>,
    #[serde(default)]
    species: LinkedHashMap<String, SpecieConfig>,
    #[serde(default)]
    namelists: LinkedHashMap<String, LinkedHashMap<String, FortranValue>>,
    #[serde(default)]
    cards: LinkedHashMap<String, CardConfig>,
    #[serde(default)]
    structure: Option<Structure>,
    /// Where `generate` writes the deck when no output is given on the command line
    #[serde(default)]
    output: Option<PathBuf>,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

impl JobConfig {
    pub fn structure(&self) -> Option<&Structure> {
        self.structure.as_ref()
    }

    pub fn output(&self) -> Option<PathBuf> {
        self.output.as_ref().map(|p| self.base_dir.join(p))
    }

    pub fn template(&self) -> Option<PathBuf> {
        self.template.as_ref().map(|p| self.base_dir.join(p))
    }

    /// Assemble the deck described by this job.
    ///
    /// The template is read first; `pseudo_dir`, namelists, cards and species
    /// are then applied on top of it.
    pub fn build_deck(&self) -> anyhow::Result<Pwscf> {
        let mut deck = Pwscf::new();
        if let Some(template) = self.template() {
            deck.read(&template, true)
                .context(format!("Error reading template {}", template.display()))?;
        }

        if let Some(pseudo_dir) = &self.pseudo_dir {
            deck.schema_mut().control.set(PSEUDO_DIR_KEY, pseudo_dir.as_str())?;
        }

        for (name, entries) in &self.namelists {
            let entries = entries.iter().map(|(k, v)| (k.as_str(), v.clone()));
            match deck.namelist_mut(name) {
                Ok(namelist) => {
                    debug!("Updating namelist {}", name);
                    namelist
                        .extend(entries)
                        .context(format!("Error in namelist '{}'", name))?;
                }
                Err(DeckError::UnknownSection(_)) => {
                    deck.add_namelist(name, entries)
                        .context(format!("Error in namelist '{}'", name))?;
                }
                Err(e) => return Err(e).context(format!("Error in namelist '{}'", name)),
            }
        }

        for (name, card) in &self.cards {
            deck.add_card(name, card.value.clone(), card.subtitle.as_deref())
                .context(format!("Error in card '{}'", name))?;
        }

        for (name, specie) in &self.species {
            deck.add_specie(name, specie.specie().clone());
        }

        info!(
            "Built deck with {} namelists and {} species",
            deck.sections().effective_namelists().len(),
            deck.species().len()
        );
        Ok(deck)
    }
}

impl TryFrom<&Path> for JobConfig {
    type Error = anyhow::Error;

    fn try_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs_err::read_to_string(path)
            .context(format!("Error reading {} to string.", path.display()))?;

        let mut config = serde_saphyr::from_str::<JobConfig>(&content)
            .context(format!("Error parsing YAML file: {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }
}

impl TryFrom<&PathBuf> for JobConfig {
    type Error = anyhow::Error;

    fn try_from(path: &PathBuf) -> anyhow::Result<Self> {
        Self::try_from(path.as_path())
    }
}
