//! Navigation state for a single-page portfolio.
//!
//! Sections report their visibility through [`visibility`] sensors, the
//! [`navigation`] resolver folds those reports into the active section, and
//! the [`state`] stores carry theme and locale to every consumer.
//! [`Portfolio`] wires all of it together for a frontend.

pub mod config;
pub mod contact;
pub mod i18n;
pub mod navigation;
pub mod page;
pub mod state;
pub mod visibility;

pub use config::{ConfigError, SiteConfig};
pub use page::Portfolio;
