// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem `ConfigStore` for droplet tools.
//!
//! Each key is one `<key>.json` file in a single directory, by default the
//! platform config dir (`~/.config/droplet-viewer` on Linux). The directory
//! is created on first save, and saves go through a temporary file plus a
//! rename so an interrupted write never leaves half a prefs file behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use droplet_app_core::config::{ConfigError, ConfigStore};

/// Stores prefs blobs as JSON files in one directory.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    dir: PathBuf,
}

impl FsConfigStore {
    /// Store in the per-user config directory for the droplet viewer.
    pub fn user() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "droplet-viewer")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::in_dir(proj.config_dir()))
    }

    /// Store in `dir`. Nothing touches the filesystem until the first save.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the prefs files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, ConfigError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ConfigError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Option<Vec<u8>>, ConfigError> {
        match fs::read(self.path_for(key)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, data)?;
        if let Err(err) = fs::rename(&staging, &path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "droplet-config-fs-{}-{name}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn missing_file_loads_as_none_without_creating_dir() {
        let dir = scratch("missing");
        let store = FsConfigStore::in_dir(&dir);
        assert!(store.load_raw("absent").unwrap().is_none());
        assert!(!dir.exists());
    }

    #[test]
    fn save_creates_dir_and_replaces_file() {
        let dir = scratch("save").join("nested");
        let store = FsConfigStore::in_dir(&dir);
        store.save_raw("viewer", b"{}").unwrap();
        store.save_raw("viewer", b"{\"board\":{}}").unwrap();

        assert_eq!(
            store.load_raw("viewer").unwrap().as_deref(),
            Some(&b"{\"board\":{}}"[..])
        );
        let names: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("viewer.json")]);
        fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let store = FsConfigStore::in_dir(scratch("keys"));
        for key in ["", "../viewer", "a/b", "prefs.json"] {
            assert!(matches!(
                store.save_raw(key, b"{}"),
                Err(ConfigError::InvalidKey(_))
            ));
        }
        assert!(store.path_for("demo-2_b").is_ok());
    }
}
