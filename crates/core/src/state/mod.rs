pub mod locale;
pub mod settings;
pub mod store;
pub mod theme;

pub use locale::LocaleStore;
pub use settings::{JsonFileSettings, MemorySettings, SettingsError, SettingsStore, THEME_KEY};
pub use store::{Store, SubscriptionId};
pub use theme::ThemeStore;
