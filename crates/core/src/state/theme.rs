use folio_protocol::ThemeMode;
use tracing::{debug, warn};

use super::settings::{SettingsStore, THEME_KEY};
use super::store::{Store, SubscriptionId};

/// Process-wide light/dark mode, persisted through a [`SettingsStore`].
pub struct ThemeStore {
    state: Store<ThemeMode>,
    settings: Box<dyn SettingsStore>,
    key: String,
}

impl ThemeStore {
    /// Resolve the initial mode from the stored preference under
    /// [`THEME_KEY`].
    pub fn load(settings: Box<dyn SettingsStore>) -> Self {
        Self::load_with_key(settings, THEME_KEY)
    }

    /// Like [`load`](Self::load) with a custom settings key.
    ///
    /// An absent, unreadable or unrecognised preference yields
    /// [`ThemeMode::Light`].
    pub fn load_with_key(settings: Box<dyn SettingsStore>, key: &str) -> Self {
        let initial = match settings.get(key) {
            Ok(Some(stored)) => stored.parse().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring stored theme preference");
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                warn!(error = %e, "theme preference unavailable; using default");
                ThemeMode::default()
            }
        };
        debug!(mode = %initial, "theme store loaded");
        Self {
            state: Store::new(initial),
            settings,
            key: key.to_owned(),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.state.get()
    }

    /// Flip the mode, persist it, then notify subscribers.
    ///
    /// Exactly one settings write happens per call. A failed write is logged
    /// and the in-memory mode still changes.
    pub fn toggle(&mut self) -> ThemeMode {
        let next = self.state.get().toggled();
        if let Err(e) = self.settings.set(&self.key, next.as_str()) {
            warn!(error = %e, "failed to persist theme preference");
        }
        debug!(mode = %next, "theme toggled");
        self.state.set(next);
        next
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ThemeMode) + 'static) -> SubscriptionId {
        self.state.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    pub fn settings(&self) -> &dyn SettingsStore {
        self.settings.as_ref()
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("state", &self.state)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::state::settings::{MemorySettings, SettingsError};

    /// Shares its counters with the test after being boxed into the store.
    #[derive(Clone, Default)]
    struct SharedSettings {
        inner: Rc<RefCell<MemorySettings>>,
    }

    impl SettingsStore for SharedSettings {
        fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
            self.inner.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
            self.inner.borrow_mut().set(key, value)
        }
    }

    struct BrokenSettings;

    impl SettingsStore for BrokenSettings {
        fn get(&self, _key: &str) -> Result<Option<String>, SettingsError> {
            Err(SettingsError::Unavailable("quota exceeded".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), SettingsError> {
            Err(SettingsError::Unavailable("quota exceeded".into()))
        }
    }

    #[test]
    fn defaults_to_light_without_preference() {
        let store = ThemeStore::load(Box::new(MemorySettings::new()));
        assert_eq!(store.mode(), ThemeMode::Light);
    }

    #[test]
    fn restores_stored_preference() {
        let store = ThemeStore::load(Box::new(MemorySettings::with_value(THEME_KEY, "dark")));
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn garbage_preference_falls_back_to_light() {
        let store = ThemeStore::load(Box::new(MemorySettings::with_value(THEME_KEY, "purple")));
        assert_eq!(store.mode(), ThemeMode::Light);
    }

    #[test]
    fn toggle_twice_restores_mode_with_one_write_each() {
        let shared = SharedSettings::default();
        let mut store = ThemeStore::load(Box::new(shared.clone()));

        assert_eq!(store.toggle(), ThemeMode::Dark);
        assert_eq!(shared.inner.borrow().writes(), 1);
        assert_eq!(
            shared.inner.borrow().get(THEME_KEY).ok().flatten().as_deref(),
            Some("dark")
        );

        assert_eq!(store.toggle(), ThemeMode::Light);
        assert_eq!(shared.inner.borrow().writes(), 2);
        assert_eq!(store.mode(), ThemeMode::Light);
    }

    #[test]
    fn subscribers_see_new_mode_before_toggle_returns() {
        let seen = Rc::new(Cell::new(None));
        let mut store = ThemeStore::load(Box::new(MemorySettings::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |mode| sink.set(Some(*mode)));

        let mode = store.toggle();
        assert_eq!(seen.get(), Some(mode));
    }

    #[test]
    fn broken_storage_is_not_fatal() {
        let mut store = ThemeStore::load(Box::new(BrokenSettings));
        assert_eq!(store.mode(), ThemeMode::Light);
        assert_eq!(store.toggle(), ThemeMode::Dark);
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn custom_key_is_used() {
        let shared = SharedSettings::default();
        let mut store = ThemeStore::load_with_key(Box::new(shared.clone()), "folio.theme");
        store.toggle();
        assert_eq!(
            shared.inner.borrow().get("folio.theme").ok().flatten().as_deref(),
            Some("dark")
        );
    }
}
