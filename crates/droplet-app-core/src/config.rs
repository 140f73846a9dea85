// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Prefs persistence: a raw blob store port and the service that reads and
//! writes [`ViewerPrefs`] through it.
//!
//! Stored prefs are pretty JSON. Whatever is read back is sanitized before it
//! reaches the caller, and the same holds for what is written.

use std::borrow::Cow;

use thiserror::Error;

use crate::prefs::{ViewerPrefs, VIEWER_PREFS_KEY};

/// Storage port for raw prefs blobs, keyed by logical name.
pub trait ConfigStore {
    /// Blob stored under `key`, or `None` when nothing was ever saved.
    fn load_raw(&self, key: &str) -> Result<Option<Vec<u8>>, ConfigError>;
    /// Replace the blob stored under `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failures while reading or writing prefs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no per-user config directory.
    #[error("no config directory for this platform")]
    NoConfigDir,
    /// Key is empty or would escape the store (path separators, dots).
    #[error("invalid config key `{0}`")]
    InvalidKey(String),
    /// Reading or writing the backing store failed.
    #[error("config i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// Stored blob is not a prefs document.
    #[error("prefs are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads and saves [`ViewerPrefs`] under one key of a [`ConfigStore`].
pub struct PrefsService<S> {
    store: S,
    key: Cow<'static, str>,
}

impl<S> PrefsService<S> {
    /// Service using the standard `"viewer"` key.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            key: Cow::Borrowed(VIEWER_PREFS_KEY),
        }
    }

    /// Service using a custom key (e.g. a named profile).
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: Cow::Owned(key.into()),
        }
    }

    /// Key the prefs live under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ConfigStore> PrefsService<S> {
    /// Saved prefs, sanitized. `Ok(None)` when nothing (or only whitespace)
    /// was saved.
    pub fn load(&self) -> Result<Option<ViewerPrefs>, ConfigError> {
        let Some(bytes) = self.store.load_raw(&self.key)? else {
            return Ok(None);
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let prefs: ViewerPrefs = serde_json::from_slice(&bytes)?;
        Ok(Some(prefs.sanitized()))
    }

    /// Sanitize and persist `prefs`.
    pub fn save(&self, prefs: &ViewerPrefs) -> Result<(), ConfigError> {
        let mut data = serde_json::to_vec_pretty(&prefs.clone().sanitized())?;
        data.push(b'\n');
        self.store.save_raw(&self.key, &data)
    }
}
