//! Site configuration.
//!
//! Every field has a default, so an absent file or a partial JSON object is
//! valid. Native frontends read the path from [`CONFIG_ENV`] or a CLI flag.

use std::path::{Path, PathBuf};

use folio_protocol::{Locale, SectionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::THEME_KEY;
use crate::visibility::RootMargin;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be within 0..=1, got {value}")]
    Threshold { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

/// Resume document per locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumePaths {
    pub primary: String,
    pub secondary: String,
}

impl ResumePaths {
    pub fn for_locale(&self, locale: Locale) -> &str {
        match locale {
            Locale::Primary => &self.primary,
            Locale::Secondary => &self.secondary,
        }
    }
}

impl Default for ResumePaths {
    fn default() -> Self {
        Self {
            primary: "/cv/Curriculum_Simon_WD.pdf".into(),
            secondary: "/cv/CV Simon E_WD.pdf".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Settings key for the theme preference.
    pub settings_key: String,
    /// Visibility threshold for every section except `home`.
    pub default_threshold: f64,
    pub home_threshold: f64,
    pub root_margin: RootMargin,
    pub freeze_once_visible: bool,
    /// Minimum spacing between geometry reads when polling.
    pub poll_interval_ms: f64,
    /// How long a contact submission result stays on screen.
    pub status_dismiss_ms: f64,
    pub contact_endpoint: String,
    /// Scroll offset past which the header switches to its compact style.
    pub scrolled_offset_px: f64,
    pub resume: ResumePaths,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            settings_key: THEME_KEY.into(),
            default_threshold: 0.3,
            home_threshold: 0.5,
            root_margin: RootMargin::NONE,
            freeze_once_visible: false,
            poll_interval_ms: 100.0,
            status_dismiss_ms: 3000.0,
            contact_endpoint: "https://formspree.io/f/xbloeygr".into(),
            scrolled_offset_px: 20.0,
            resume: ResumePaths::default(),
        }
    }
}

impl SiteConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// Load from the file named by [`CONFIG_ENV`], or the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("default_threshold", self.default_threshold),
            ("home_threshold", self.home_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Threshold { field, value });
            }
        }
        for (field, value) in [
            ("poll_interval_ms", self.poll_interval_ms),
            ("status_dismiss_ms", self.status_dismiss_ms),
            ("scrolled_offset_px", self.scrolled_offset_px),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    pub fn threshold_for(&self, section: SectionId) -> f64 {
        match section {
            SectionId::Home => self.home_threshold,
            _ => self.default_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_page() {
        let config = SiteConfig::default();
        assert_eq!(config.threshold_for(SectionId::Home), 0.5);
        assert_eq!(config.threshold_for(SectionId::Contact), 0.3);
        assert_eq!(config.settings_key, "theme");
        assert_eq!(config.status_dismiss_ms, 3000.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SiteConfig::from_json(r#"{ "home_threshold": 0.6, "root_margin": "-10% 0px" }"#);
        let Ok(config) = config else {
            panic!("config should parse: {config:?}");
        };
        assert_eq!(config.home_threshold, 0.6);
        assert_eq!(config.default_threshold, 0.3);
        assert_eq!(
            String::from(config.root_margin),
            "-10% 0px -10% 0px"
        );
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = SiteConfig::from_json(r#"{ "default_threshold": 1.5 }"#);
        assert!(matches!(
            err,
            Err(ConfigError::Threshold {
                field: "default_threshold",
                ..
            })
        ));
    }

    #[test]
    fn rejects_bad_margin() {
        assert!(matches!(
            SiteConfig::from_json(r#"{ "root_margin": "wide" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_default() {
        let path = std::env::temp_dir().join("folio-config-does-not-exist.json");
        let config = SiteConfig::load(&path);
        assert!(matches!(config, Ok(c) if c == SiteConfig::default()));
    }

    #[test]
    fn resume_follows_locale() {
        let resume = ResumePaths::default();
        assert!(resume.for_locale(Locale::Primary).contains("Curriculum"));
        assert!(resume.for_locale(Locale::Secondary).contains("CV"));
    }
}
