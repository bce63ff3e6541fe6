// pwscfrs/src/species/locator.rs

use crate::constants::{HOME_PSEUDO_DIR, PSEUDO_ENV_VAR};
use crate::paths::{expand_path, home_dir};
use log::debug;
use std::env;
use std::path::PathBuf;

/// Finds the file behind a pseudopotential name.
pub trait PseudoLocator {
    /// Path of the first existing file for `pseudo`, if any.
    fn locate(&self, pseudo: &str, pseudo_dir: Option<&str>) -> Option<PathBuf>;
}

impl<F> PseudoLocator for F
where
    F: Fn(&str, Option<&str>) -> Option<PathBuf>,
{
    fn locate(&self, pseudo: &str, pseudo_dir: Option<&str>) -> Option<PathBuf> {
        self(pseudo, pseudo_dir)
    }
}

/// Searches the places pw.x itself looks in: the path as given, the current
/// directory, `pseudo_dir`, `$ESPRESSO_PSEUDO` and `~/espresso/pseudo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemLocator;

impl FilesystemLocator {
    fn candidates(pseudo: &str, pseudo_dir: Option<&str>) -> Vec<PathBuf> {
        let pseudo_path = expand_path(pseudo);
        if pseudo_path.is_absolute() {
            return vec![pseudo_path];
        }

        let mut dirs = Vec::new();
        if let Ok(cwd) = env::current_dir() {
            dirs.push(cwd);
        }
        if let Some(dir) = pseudo_dir.filter(|d| !d.trim().is_empty()) {
            dirs.push(expand_path(dir.trim()));
        }
        if let Some(dir) = env::var_os(PSEUDO_ENV_VAR).filter(|d| !d.is_empty()) {
            dirs.push(PathBuf::from(dir));
        }
        if let Some(home) = home_dir() {
            dirs.push(home.join(HOME_PSEUDO_DIR));
        }
        dirs.into_iter().map(|dir| dir.join(&pseudo_path)).collect()
    }
}

impl PseudoLocator for FilesystemLocator {
    fn locate(&self, pseudo: &str, pseudo_dir: Option<&str>) -> Option<PathBuf> {
        let found = Self::candidates(pseudo, pseudo_dir)
            .into_iter()
            .find(|candidate| candidate.is_file());
        debug!("Pseudopotential '{}' resolved to {:?}", pseudo, found);
        found
    }
}
