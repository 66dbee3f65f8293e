use folio_core::state::{SettingsError, SettingsStore};

/// Settings backed by the browser's `localStorage`.
///
/// Private browsing modes may refuse access entirely; every call then
/// reports [`SettingsError::Unavailable`] and the caller falls back to
/// defaults.
#[derive(Debug, Default)]
pub struct LocalStorageSettings;

impl LocalStorageSettings {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, SettingsError> {
        let window =
            web_sys::window().ok_or_else(|| SettingsError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| SettingsError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| SettingsError::Unavailable("localStorage disabled".into()))
    }
}

impl SettingsStore for LocalStorageSettings {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| SettingsError::Unavailable(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| SettingsError::Unavailable(format!("{e:?}")))
    }
}
