use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Key under which the theme preference is stored.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings storage unavailable: {0}")]
    Unavailable(String),
    #[error("settings io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("settings file {} is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// String key-value persistence surface.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// In-memory settings. Counts writes so callers can audit persistence.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
    writes: usize,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = BTreeMap::new();
        values.insert(key.to_owned(), value.to_owned());
        Self { values, writes: 0 }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }
}

/// Settings kept as a flat JSON object in one file.
///
/// A missing file reads as empty. Every `set` rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileSettings {
    path: PathBuf,
}

impl JsonFileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, SettingsError> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_slice(&data).map_err(|source| SettingsError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for JsonFileSettings {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        // Unreadable contents are discarded on write.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_owned(), value.to_owned());

        let io_err = |source: std::io::Error| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_vec_pretty(&values).map_err(|source| {
            SettingsError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(io_err)
    }
}
