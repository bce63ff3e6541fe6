// pwscfrs/src/cli/inspect.rs

use crate::deck::Pwscf;
use crate::registry::Resolved;
use anyhow::Context;
use linked_hash_map::LinkedHashMap;
use pwnmlrs::FortranValue;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct NamelistSummary {
    pub name: String,
    pub extension: bool,
    pub values: LinkedHashMap<String, FortranValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardSummary {
    pub name: String,
    pub extension: bool,
    pub subtitle: Option<String>,
    pub lines: usize,
}

/// What a deck contains after reconciliation with the schema.
#[derive(Debug, Clone, Serialize)]
pub struct DeckSummary {
    pub path: PathBuf,
    pub namelists: Vec<NamelistSummary>,
    pub cards: Vec<CardSummary>,
}

impl DeckSummary {
    pub fn new(path: &Path, deck: &Pwscf) -> anyhow::Result<Self> {
        let sections = deck.sections();
        let mut namelists = Vec::new();
        let mut cards = Vec::new();
        for name in sections.names() {
            let resolved = sections.resolve(&name)?;
            let extension = !resolved.is_schema();
            match resolved {
                Resolved::SchemaNamelist(n) | Resolved::ExtensionNamelist(n) => {
                    namelists.push(NamelistSummary {
                        name: n.name().to_string(),
                        extension,
                        values: n.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
                    })
                }
                Resolved::SchemaCard(c) | Resolved::ExtensionCard(c) => cards.push(CardSummary {
                    name: c.name().to_string(),
                    extension,
                    subtitle: c.subtitle.clone(),
                    lines: c.body().map_or(0, |b| b.lines().count()),
                }),
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
            namelists,
            cards,
        })
    }
}

impl fmt::Display for DeckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.path.display())?;
        for namelist in &self.namelists {
            let tag = if namelist.extension { " (extension)" } else { "" };
            writeln!(f, "  &{}{}: {} values", namelist.name, tag, namelist.values.len())?;
            for (key, value) in &namelist.values {
                writeln!(f, "      {} = {}", key, value)?;
            }
        }
        for card in &self.cards {
            let tag = if card.extension { " (extension)" } else { "" };
            writeln!(
                f,
                "  {}{}{}: {} lines",
                card.name.to_uppercase(),
                card.subtitle
                    .as_deref()
                    .map(|s| format!(" {{{}}}", s))
                    .unwrap_or_default(),
                tag,
                card.lines
            )?;
        }
        Ok(())
    }
}

/// Print what a deck contains, as text or as JSON.
pub fn inspect_deck(input: &Path, json: bool) -> anyhow::Result<()> {
    let deck = Pwscf::from_path(input).context(format!("Error reading {}", input.display()))?;
    let summary = DeckSummary::new(input, &deck)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let mut deck = Pwscf::new();
        deck.read_str(
            "&control\n calculation = 'scf'\n/\n&ions\n/\nATOMIC_POSITIONS crystal\n Si 0 0 0\n Si 0.25 0.25 0.25\n",
            true,
        )
        .unwrap();
        let summary = DeckSummary::new(Path::new("si.in"), &deck).unwrap();

        let names: Vec<_> = summary.namelists.iter().map(|n| (n.name.as_str(), n.extension)).collect();
        assert_eq!(
            names,
            vec![("control", false), ("system", false), ("electrons", false), ("ions", true)]
        );
        assert_eq!(summary.cards.len(), 2);
        assert_eq!(summary.cards[1].name, "atomic_positions");
        assert_eq!(summary.cards[1].lines, 2);
        assert!(summary.cards[1].extension);

        let text = summary.to_string();
        assert!(text.contains("  ATOMIC_POSITIONS {crystal} (extension): 2 lines"));
        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["namelists"][0]["values"]["calculation"], "scf");
    }
}
