//! The `tempyrc` file: a plain `key=value` file in the user's config directory.

use directories::BaseDirs;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::{RawConfig, ResolvedConfig},
    error::{Result, TempyError},
};

const RC_FILE_NAME: &str = "tempyrc";

/// Written when no rc file exists yet.
const SKELETON: &str = "\
# tempy configuration
#
# location=new york city
# units=imperial
# api_key=<your weatherapi.com key>
#
# Leave api_key empty to use the public proxy (rate limited).
location=
units=
api_key=
";

pub struct RcStore;

impl RcStore {
    /// `tempyrc` inside the platform config directory
    /// (`~/.config` on Linux, `%APPDATA%` on Windows).
    pub fn default_path() -> Result<PathBuf> {
        let dirs = BaseDirs::new().ok_or_else(|| TempyError::ConfigPath { path: PathBuf::from("~") })?;
        Ok(dirs.config_dir().join(RC_FILE_NAME))
    }

    /// Read the rc file at `path`, seeding it from the skeleton on first run.
    pub fn load(path: &Path) -> Result<RawConfig> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Self::parse(&contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Self::seed(path)?;
                Ok(RawConfig::default())
            }
            Err(err) => Err(TempyError::io(path, err)),
        }
    }

    /// Parse rc file contents. Comments, blank lines, malformed lines and
    /// unknown keys are skipped; later lines override earlier ones.
    pub fn parse(contents: &str) -> RawConfig {
        let mut cfg = RawConfig::default();

        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                tracing::debug!(line, "skipping rc line without '='");
                continue;
            };

            let key = key.trim().to_lowercase();
            if !cfg.set(&key, value.trim().to_lowercase()) {
                tracing::debug!(%key, "ignoring unknown rc option");
            }
        }

        cfg
    }

    /// Write a resolved configuration back to `path`.
    pub fn save(path: &Path, config: &ResolvedConfig) -> Result<()> {
        Self::ensure_parent(path)?;

        let raw = RawConfig::from(config);
        let mut contents = String::from("# tempy configuration\n");
        for key in RawConfig::OPTIONS {
            contents.push_str(&format!("{key}={}\n", raw.get(key).unwrap_or_default()));
        }

        fs::write(path, contents).map_err(|err| TempyError::io(path, err))?;
        tracing::debug!(path = %path.display(), "saved rc file");
        Ok(())
    }

    fn seed(path: &Path) -> Result<()> {
        Self::ensure_parent(path)?;
        fs::write(path, SKELETON).map_err(|err| TempyError::io(path, err))?;
        tracing::debug!(path = %path.display(), "created rc file from skeleton");
        Ok(())
    }

    /// Create the rc file's directory, but only one level deep.
    fn ensure_parent(path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => return Ok(()),
        };

        if parent.is_dir() {
            return Ok(());
        }

        match parent.parent() {
            Some(grandparent) if !grandparent.as_os_str().is_empty() && !grandparent.is_dir() => {
                return Err(TempyError::ConfigPath { path: grandparent.to_path_buf() });
            }
            _ => {}
        }

        fs::create_dir(parent).map_err(|err| TempyError::io(parent, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn raw(location: &str, units: &str, api_key: &str) -> RawConfig {
        RawConfig { location: location.into(), units: units.into(), api_key: api_key.into() }
    }

    #[test]
    fn parses_recognized_keys_trimmed_and_lowercased() {
        let cfg = RcStore::parse("location = NYC\n  units=Imperial  \napi_key=JLSKDJFAKLEJAEGLKW\n");
        assert_eq!(cfg, raw("nyc", "imperial", "jlskdjfaklejaeglkw"));
    }

    #[test]
    fn omitted_keys_are_empty() {
        assert_eq!(RcStore::parse("units=metric\n"), raw("", "metric", ""));
        assert_eq!(RcStore::parse(""), RawConfig::default());
    }

    #[test]
    fn comments_and_unknown_keys_are_skipped() {
        let contents = "\
# location=paris
   # units=metric
invalid=option
units=imperial
api_key=jlskdjfaklejaegLKW
garbage line
";
        assert_eq!(RcStore::parse(contents), raw("", "imperial", "jlskdjfaklejaeglkw"));
    }

    #[test]
    fn last_occurrence_wins() {
        assert_eq!(RcStore::parse("location=a\nlocation=b\n").location, "b");
    }

    #[test]
    fn splits_on_first_equals_only() {
        assert_eq!(RcStore::parse("api_key=abc=def\n").api_key, "abc=def");
    }

    #[test]
    fn load_reads_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tempyrc");
        fs::write(&path, "location=nyc\nunits=metric\n").unwrap();

        assert_eq!(RcStore::load(&path).unwrap(), raw("nyc", "metric", ""));
    }

    #[test]
    fn load_creates_parent_and_skeleton() {
        let dir = tempdir().unwrap();
        let parent = dir.path().join("new_path");
        let path = parent.join("tempyrc");

        let cfg = RcStore::load(&path).unwrap();

        assert_eq!(cfg, RawConfig::default());
        assert!(parent.is_dir());
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, SKELETON);
        assert_eq!(RcStore::parse(&written), RawConfig::default());
    }

    #[test]
    fn load_refuses_recursive_directory_creation() {
        let dir = tempdir().unwrap();
        let grandparent = dir.path().join("new_path_1");
        let path = grandparent.join("new_path_2").join("tempyrc");

        let err = RcStore::load(&path).unwrap_err();

        match err {
            TempyError::ConfigPath { path } => assert_eq!(path, grandparent),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!grandparent.exists());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tempyrc");
        let resolved = ResolvedConfig {
            location: "new york city".into(),
            units: crate::config::Units::Metric,
            api_key: None,
        };

        RcStore::save(&path, &resolved).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("location=new york city\nunits=metric\napi_key=\n"));
        assert_eq!(RcStore::load(&path).unwrap(), raw("new york city", "metric", ""));
    }

    #[test]
    fn default_path_ends_with_rc_name() {
        if let Ok(path) = RcStore::default_path() {
            assert!(path.ends_with(RC_FILE_NAME));
        }
    }
}
