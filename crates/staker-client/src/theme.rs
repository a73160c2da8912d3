//! Theme preference: one persisted string key, dark by default.
//!
//! A small process-wide store with explicit init-from-storage and explicit
//! write-on-change. No other component gets write access to the preference.

use std::collections::HashMap;
use std::path::PathBuf;

use parking_lot::Mutex;

/// Storage key for the theme choice.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Absence or an unrecognized value defaults to dark.
    pub fn from_stored(value: Option<&str>) -> Theme {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Key/value persistence for local preferences.
pub trait PreferenceStorage: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    /// Best-effort write; failures are logged, never surfaced.
    fn write(&self, key: &str, value: &str);
}

/// JSON-file-backed preferences.
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> HashMap<String, String> {
        let Ok(contents) = std::fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        match serde_json::from_str(&contents) {
            Ok(map) => map,
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "preference file unreadable, starting fresh");
                HashMap::new()
            }
        }
    }
}

impl PreferenceStorage for FilePreferences {
    fn read(&self, key: &str) -> Option<String> {
        self.load().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        let mut map = self.load();
        map.insert(key.to_string(), value.to_string());
        let serialized = match serde_json::to_string_pretty(&map) {
            Ok(s) => s,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize preferences");
                return;
            }
        };
        if let Err(error) = std::fs::write(&self.path, serialized) {
            tracing::warn!(path = %self.path.display(), %error, "failed to persist preference");
        }
    }
}

/// In-memory preferences for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryPreferences {
    map: Mutex<HashMap<String, String>>,
}

impl PreferenceStorage for MemoryPreferences {
    fn read(&self, key: &str) -> Option<String> {
        self.map.lock().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.map.lock().insert(key.to_string(), value.to_string());
    }
}

/// The process-wide theme store.
pub struct ThemeStore<S: PreferenceStorage> {
    storage: S,
    current: Mutex<Theme>,
}

impl<S: PreferenceStorage> ThemeStore<S> {
    /// Read the persisted choice once at startup.
    pub fn init(storage: S) -> Self {
        let current = Theme::from_stored(storage.read(THEME_KEY).as_deref());
        tracing::debug!(theme = current.as_str(), "theme initialized");
        Self {
            storage,
            current: Mutex::new(current),
        }
    }

    pub fn current(&self) -> Theme {
        *self.current.lock()
    }

    pub fn set(&self, theme: Theme) {
        let mut current = self.current.lock();
        if *current != theme {
            *current = theme;
            self.storage.write(THEME_KEY, theme.as_str());
        }
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_preference_defaults_to_dark() {
        let store = ThemeStore::init(MemoryPreferences::default());
        assert_eq!(store.current(), Theme::Dark);
    }

    #[test]
    fn test_unrecognized_value_defaults_to_dark() {
        let storage = MemoryPreferences::default();
        storage.write(THEME_KEY, "sepia");
        let store = ThemeStore::init(storage);
        assert_eq!(store.current(), Theme::Dark);
    }

    #[test]
    fn test_init_reads_persisted_light() {
        let storage = MemoryPreferences::default();
        storage.write(THEME_KEY, "light");
        let store = ThemeStore::init(storage);
        assert_eq!(store.current(), Theme::Light);
    }

    #[test]
    fn test_toggle_writes_on_change() {
        let store = ThemeStore::init(MemoryPreferences::default());
        assert_eq!(store.toggle(), Theme::Light);
        assert_eq!(store.storage.read(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(store.storage.read(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_preferences_round_trip() {
        let dir = std::env::temp_dir().join("staker-client-theme-test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("preferences.json");
        let _ = std::fs::remove_file(&path);

        let prefs = FilePreferences::new(&path);
        assert_eq!(prefs.read(THEME_KEY), None);
        prefs.write(THEME_KEY, "light");
        assert_eq!(prefs.read(THEME_KEY).as_deref(), Some("light"));

        // a fresh handle sees the persisted value
        let reopened = FilePreferences::new(&path);
        assert_eq!(reopened.read(THEME_KEY).as_deref(), Some("light"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_fails_soft() {
        let dir = std::env::temp_dir().join("staker-client-theme-test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("corrupt.json");
        std::fs::write(&path, "not json at all").unwrap();

        let prefs = FilePreferences::new(&path);
        assert_eq!(prefs.read(THEME_KEY), None);
        prefs.write(THEME_KEY, "dark");
        assert_eq!(prefs.read(THEME_KEY).as_deref(), Some("dark"));

        let _ = std::fs::remove_file(&path);
    }
}
