// pwscfrs/src/cli/normalize.rs

use crate::card::Card;
use crate::constants::ATOMIC_SPECIES;
use crate::deck::Pwscf;
use crate::paths::{absolute_path, write_atomically};
use crate::schema::{PwscfSchema, Schema};
use crate::species::FilesystemLocator;
use anyhow::Context;
use log::info;
use pwnmlrs::{DeckParser, WriteOptions};
use std::path::Path;

/// Re-read a deck and write it back in canonical form.
///
/// No structure is available here, so the file's own `ATOMIC_SPECIES` card
/// is carried over unchanged instead of being regenerated.
pub fn normalize_deck(input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let text = normalized_text(input)?;

    match output {
        Some(path) => {
            let path = absolute_path(path)?;
            write_atomically(&path, &text).context(format!("Error writing {}", path.display()))?;
            eprintln!("✓ Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn normalized_text(input: &Path) -> anyhow::Result<String> {
    let input = absolute_path(input)?;
    let deck = Pwscf::from_path(&input).context(format!("Error reading {}", input.display()))?;
    let mut snapshot = deck.snapshot(None, &FilesystemLocator)?;

    let content =
        fs_err::read_to_string(&input).context(format!("Error reading {}", input.display()))?;
    let raw = DeckParser::new(&content)
        .with_card_names(PwscfSchema::card_names())
        .parse()
        .context(format!("Error parsing {}", input.display()))?;
    if let Some(species) = raw.cards.into_iter().find(|c| c.name == ATOMIC_SPECIES) {
        info!("Keeping ATOMIC_SPECIES from {}", input.display());
        snapshot.cards.push(Card::from(species));
    }
    Ok(snapshot.render(&WriteOptions::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_path_is_expanded() {
        let dir = tempfile::tempdir().unwrap();
        fs_err::write(
            dir.path().join("si.in"),
            "&control\n prefix = 'si'\n/\nATOMIC_SPECIES\n Si 28.086 Si.upf\nKPOINTS gamma\n",
        )
        .unwrap();
        std::env::set_var("PWSCFRS_NORMALIZE_DIR", dir.path());

        let text = normalized_text(Path::new("$PWSCFRS_NORMALIZE_DIR/si.in")).unwrap();
        assert!(text.contains("    prefix = 'si'\n"));
        assert!(text.contains("K_POINTS gamma\n"));
        assert!(text.ends_with("ATOMIC_SPECIES\n Si 28.086 Si.upf\n"));

        let output = dir.path().join("out.in");
        normalize_deck(Path::new("${PWSCFRS_NORMALIZE_DIR}/si.in"), Some(&output)).unwrap();
        assert_eq!(fs_err::read_to_string(&output).unwrap(), text);
    }
}
