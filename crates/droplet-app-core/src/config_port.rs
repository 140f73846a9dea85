// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config port shared by droplet tools.

use crate::config::{ConfigStore, PrefsService};
use crate::prefs::ViewerPrefs;
use tracing::warn;

/// Config-facing port for loading/saving viewer preferences.
pub trait ConfigPort {
    /// Load viewer preferences (returns None if missing or unreadable).
    fn load_prefs(&self) -> Option<ViewerPrefs>;
    /// Persist viewer preferences (best-effort; failures are logged).
    fn save_prefs(&self, prefs: &ViewerPrefs);
}

impl<S: ConfigStore> ConfigPort for PrefsService<S> {
    fn load_prefs(&self) -> Option<ViewerPrefs> {
        match self.load() {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(%err, key = self.key(), "ignoring unreadable viewer prefs");
                None
            }
        }
    }

    fn save_prefs(&self, prefs: &ViewerPrefs) {
        if let Err(err) = self.save(prefs) {
            warn!(%err, key = self.key(), "failed to save viewer prefs");
        }
    }
}
