// pwscfrs/src/cli/generate.rs

use crate::config::JobConfig;
use anyhow::Context;
use pwnmlrs::WriteOptions;
use std::path::Path;

/// Build the deck described by a job file and write it out.
///
/// `output` takes precedence over the job's own `output`; with neither, the
/// deck is printed to stdout.
pub fn generate_deck(config_path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let config = JobConfig::try_from(config_path)?;
    let deck = config.build_deck()?;
    let options = WriteOptions::default();

    match output.map(Path::to_path_buf).or_else(|| config.output()) {
        Some(path) => {
            deck.write_to_path(&path, config.structure(), &options)
                .context(format!("Error writing {}", path.display()))?;
            eprintln!("✓ Wrote {}", path.display());
        }
        None => {
            let text = deck
                .write(config.structure(), &options)
                .context("Error rendering input deck")?;
            print!("{}", text);
        }
    }
    Ok(())
}
