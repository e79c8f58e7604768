//! Theme preference state.
//!
//! # Responsibility
//! - Own the single dark-mode flag for the application lifetime.
//! - Persist every change to local preference storage.
//! - Mirror the flag onto one application-wide mode marker.
//!
//! # Invariants
//! - Initialization order: persisted value, then system preference, then light.
//! - Persisted values are the literal strings `"true"` / `"false"`.
//! - The marker is applied exactly once per state change, initial load included.
//! - No cross-process synchronization; other processes see changes on next load.

mod store;

pub use store::{
    MemoryPreferenceStore, PreferenceError, PreferenceResult, PreferenceStore,
    SqlitePreferenceStore, PREFERENCE_SCHEMA_VERSION,
};

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Preference key holding the dark-mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Resolved visual mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Where the initial flag value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    Persisted,
    System,
    Default,
}

impl ThemeSource {
    fn as_str(self) -> &'static str {
        match self {
            Self::Persisted => "persisted",
            Self::System => "system",
            Self::Default => "default",
        }
    }
}

/// Probe for the environment's "prefers dark" signal.
///
/// `None` means the environment offers no signal.
pub trait SystemAppearance {
    fn prefers_dark(&self) -> Option<bool>;
}

impl<F> SystemAppearance for F
where
    F: Fn() -> Option<bool>,
{
    fn prefers_dark(&self) -> Option<bool> {
        self()
    }
}

/// Application-wide visual-mode marker (root style scope).
pub trait ModeMarker {
    fn apply(&mut self, mode: ThemeMode);
}

/// Root-level flag set for dark mode and cleared for light mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RootModeFlag {
    dark: bool,
}

impl RootModeFlag {
    pub fn is_set(&self) -> bool {
        self.dark
    }
}

impl ModeMarker for RootModeFlag {
    fn apply(&mut self, mode: ThemeMode) {
        self.dark = mode.is_dark();
    }
}

/// Theme state failure.
#[derive(Debug)]
pub enum ThemeError {
    /// New value is active in memory but was not persisted.
    Persist(PreferenceError),
}

impl Display for ThemeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persist(err) => write!(f, "failed to persist theme preference: {err}"),
        }
    }
}

impl Error for ThemeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
        }
    }
}

/// Explicit theme context owned by the application root.
pub struct ThemeContext<S: PreferenceStore, M: ModeMarker> {
    dark_mode: bool,
    source: ThemeSource,
    store: S,
    marker: M,
}

impl<S: PreferenceStore, M: ModeMarker> ThemeContext<S, M> {
    /// Resolves the initial mode and applies it to the marker.
    ///
    /// Never fails: an unreadable or unrecognized persisted value is logged
    /// and resolution continues with the system probe.
    pub fn load(store: S, mut marker: M, appearance: &dyn SystemAppearance) -> Self {
        let (dark_mode, source) = match read_persisted(&store) {
            Some(value) => (value, ThemeSource::Persisted),
            None => match appearance.prefers_dark() {
                Some(value) => (value, ThemeSource::System),
                None => (false, ThemeSource::Default),
            },
        };

        marker.apply(ThemeMode::from_dark(dark_mode));
        info!(
            "event=theme_load module=theme status=ok mode={} source={}",
            ThemeMode::from_dark(dark_mode).as_str(),
            source.as_str()
        );

        Self {
            dark_mode,
            source,
            store,
            marker,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark_mode
    }

    pub fn mode(&self) -> ThemeMode {
        ThemeMode::from_dark(self.dark_mode)
    }

    /// Source of the initial value.
    pub fn source(&self) -> ThemeSource {
        self.source
    }

    pub fn marker(&self) -> &M {
        &self.marker
    }

    /// Flips the flag, updates the marker and persists the new value.
    ///
    /// Returns the new flag. On a storage failure the new value stays active
    /// for this process and the error is returned.
    pub fn toggle(&mut self) -> Result<bool, ThemeError> {
        self.dark_mode = !self.dark_mode;
        self.marker.apply(self.mode());

        let value = if self.dark_mode { "true" } else { "false" };
        if let Err(err) = self.store.set(DARK_MODE_KEY, value) {
            warn!(
                "event=theme_toggle module=theme status=error mode={} error={}",
                self.mode().as_str(),
                err
            );
            return Err(ThemeError::Persist(err));
        }

        info!(
            "event=theme_toggle module=theme status=ok mode={}",
            self.mode().as_str()
        );
        Ok(self.dark_mode)
    }
}

fn read_persisted(store: &impl PreferenceStore) -> Option<bool> {
    match store.get(DARK_MODE_KEY) {
        Ok(Some(value)) => match value.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => {
                warn!("event=theme_load module=theme status=ignored reason=unrecognized_value");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!("event=theme_load module=theme status=error error={err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        MemoryPreferenceStore, PreferenceError, PreferenceResult, PreferenceStore, RootModeFlag,
        ThemeContext, ThemeError, ThemeSource, DARK_MODE_KEY,
    };
    use std::cell::Cell;

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn get(&self, _key: &str) -> PreferenceResult<Option<String>> {
            Err(PreferenceError::Unavailable("read-only".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> PreferenceResult<()> {
            Err(PreferenceError::Unavailable("read-only".to_string()))
        }
    }

    #[test]
    fn persisted_value_wins_over_system_preference() {
        let store = MemoryPreferenceStore::with_entry(DARK_MODE_KEY, "true");
        let theme = ThemeContext::load(&store, RootModeFlag::default(), &|| Some(false));
        assert!(theme.is_dark());
        assert_eq!(theme.source(), ThemeSource::Persisted);
        assert!(theme.marker().is_set());
    }

    #[test]
    fn system_preference_used_when_nothing_persisted() {
        let store = MemoryPreferenceStore::new();
        let theme = ThemeContext::load(&store, RootModeFlag::default(), &|| Some(true));
        assert!(theme.is_dark());
        assert_eq!(theme.source(), ThemeSource::System);
    }

    #[test]
    fn defaults_to_light_without_any_signal() {
        let store = MemoryPreferenceStore::new();
        let theme = ThemeContext::load(&store, RootModeFlag::default(), &|| None);
        assert!(!theme.is_dark());
        assert_eq!(theme.source(), ThemeSource::Default);
        assert!(!theme.marker().is_set());
    }

    #[test]
    fn unrecognized_persisted_value_falls_through_to_system() {
        let store = MemoryPreferenceStore::with_entry(DARK_MODE_KEY, "yes");
        let theme = ThemeContext::load(&store, RootModeFlag::default(), &|| Some(true));
        assert_eq!(theme.source(), ThemeSource::System);
    }

    #[test]
    fn system_probe_not_consulted_when_persisted() {
        let store = MemoryPreferenceStore::with_entry(DARK_MODE_KEY, "false");
        let probed = Cell::new(false);
        let probe = || {
            probed.set(true);
            Some(true)
        };
        let theme = ThemeContext::load(&store, RootModeFlag::default(), &probe);
        assert!(!theme.is_dark());
        assert!(!probed.get());
    }

    #[test]
    fn toggle_flips_marks_and_persists() {
        let store = MemoryPreferenceStore::new();
        let mut theme = ThemeContext::load(&store, RootModeFlag::default(), &|| None);

        assert!(theme.toggle().unwrap());
        assert!(theme.marker().is_set());
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

        assert!(!theme.toggle().unwrap());
        assert!(!theme.marker().is_set());
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn storage_failure_keeps_new_value_in_memory() {
        let mut theme = ThemeContext::load(FailingStore, RootModeFlag::default(), &|| Some(false));
        assert_eq!(theme.source(), ThemeSource::System);

        let err = theme.toggle().expect_err("write must fail");
        assert!(matches!(err, ThemeError::Persist(_)));
        assert!(theme.is_dark());
        assert!(theme.marker().is_set());
    }
}
