//! Durable storage for the visitor's language preference.
//!
//! A single language code survives across sessions until overwritten. The
//! store never surfaces errors: a preference that cannot be read or written
//! only costs the visitor a re-detection on the next visit.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.toml";
const APP_DIR: &str = "essential-oils-site";

/// Client-side storage for the selected language code.
pub trait PreferenceStore {
    /// Previously persisted language code, if any. Membership in the
    /// supported set is checked by the caller, not the store.
    fn load(&self) -> Option<String>;

    /// Persist the code, overwriting any earlier value.
    fn save(&mut self, code: &str);
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    language: Option<String>,
}

/// Preference store backed by a TOML file in the user's config directory.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: Option<PathBuf>,
}

impl FilePreferenceStore {
    /// Store under the platform config directory
    /// (e.g. `~/.config/essential-oils-site/settings.toml`).
    pub fn new() -> Self {
        let path = dirs::config_dir().map(|mut dir| {
            dir.push(APP_DIR);
            dir.push(SETTINGS_FILE);
            dir
        });
        if path.is_none() {
            tracing::warn!("no config directory available, language preference will not persist");
        }
        FilePreferenceStore { path }
    }

    /// Store at an explicit path, mainly for tests.
    pub fn at_path(path: &Path) -> Self {
        FilePreferenceStore {
            path: Some(path.to_path_buf()),
        }
    }

    fn read_preferences(path: &Path) -> Preferences {
        let Ok(content) = fs::read_to_string(path) else {
            return Preferences::default();
        };
        // A malformed file reads as no preference rather than an error.
        toml::from_str(&content).unwrap_or_default()
    }
}

impl Default for FilePreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Option<String> {
        let path = self.path.as_deref()?;
        Self::read_preferences(path).language
    }

    fn save(&mut self, code: &str) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        let preferences = Preferences {
            language: Some(code.to_string()),
        };
        if let Some(parent) = path.parent() {
            if let Err(error) = fs::create_dir_all(parent) {
                tracing::warn!(%error, "failed to create preference directory");
                return;
            }
        }
        let content = match toml::to_string_pretty(&preferences) {
            Ok(content) => content,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize preferences");
                return;
            }
        };
        if let Err(error) = fs::write(path, content) {
            tracing::warn!(%error, "failed to write language preference");
        }
    }
}

/// In-memory store for tests and embedders with their own persistence.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    language: Option<String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(code: &str) -> Self {
        MemoryPreferenceStore {
            language: Some(code.to_string()),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<String> {
        self.language.clone()
    }

    fn save(&mut self, code: &str) {
        self.language = Some(code.to_string());
    }
}
