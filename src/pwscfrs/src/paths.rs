// pwscfrs/src/paths.rs

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Expand a leading `~` and any `$VAR` / `${VAR}` references.
///
/// Unset variables are left untouched.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(expand_home(&expand_vars(path)))
}

/// Expand `path` and make it absolute against the current directory.
pub fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    let expanded = expand_path(&path.to_string_lossy());
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(env::current_dir()?.join(expanded))
    }
}

/// Replace `path` with `contents` through a temporary file in the same
/// directory. On error the target is left as it was.
pub fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

fn expand_home(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return path.to_string(),
    };
    match home_dir() {
        Some(home) => format!("{}{}", home.display(), rest),
        None => path.to_string(),
    }
}

fn expand_vars(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };
        match env::var(name).ok().filter(|_| !name.is_empty()) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[idx..idx + 1 + consumed]),
        }
        rest = &after[consumed..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_vars() {
        env::set_var("PWSCFRS_TEST_PSEUDO", "/opt/pseudo");
        assert_eq!(
            expand_path("$PWSCFRS_TEST_PSEUDO/Si.upf"),
            PathBuf::from("/opt/pseudo/Si.upf")
        );
        assert_eq!(
            expand_path("${PWSCFRS_TEST_PSEUDO}_v2"),
            PathBuf::from("/opt/pseudo_v2")
        );
    }

    #[test]
    fn test_unset_vars_are_kept() {
        assert_eq!(
            expand_path("$PWSCFRS_SURELY_UNSET/x"),
            PathBuf::from("$PWSCFRS_SURELY_UNSET/x")
        );
        assert_eq!(expand_path("cost$"), PathBuf::from("cost$"));
        assert_eq!(expand_path("${open"), PathBuf::from("${open"));
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = home_dir() {
            assert_eq!(expand_path("~/pseudo"), home.join("pseudo"));
        }
        assert_eq!(expand_path("a~b"), PathBuf::from("a~b"));
    }

    #[test]
    fn test_write_atomically_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pw.in");
        fs_err::write(&path, "old").unwrap();
        write_atomically(&path, "new").unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs_err::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomically_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_atomically(&dir.path().join("no/such/pw.in"), "x").is_err());
    }

    #[test]
    fn test_absolute_path() {
        let path = absolute_path(Path::new("pw.in")).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("pw.in"));
    }
}
