use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::section::SectionId;
use crate::theme::{ThemeMode, ThemeToken};

/// Where a navigation element is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// The horizontal bar shown on wide viewports.
    Bar,
    /// The collapsible panel shown on narrow viewports.
    Panel,
}

/// A single, stateless instruction for drawing the navigation shell.
///
/// The core emits a `Vec<ShellCommand>` per frame. Renderers consume this
/// list sequentially; each command carries all the data it needs, with
/// labels already resolved for the current locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShellCommand {
    /// Open the header. `scrolled` selects the compact, opaque variant.
    BeginHeader {
        scrolled: bool,
        background: ThemeToken,
    },

    /// Brand link pointing at the first section.
    Brand { href: String, color: ThemeToken },

    /// One section link.
    NavLink {
        section: SectionId,
        label: String,
        href: String,
        active: bool,
        color: ThemeToken,
        placement: Placement,
    },

    /// Theme switch. `current` is the mode in effect; the control shows the
    /// icon of the mode it switches to.
    ThemeToggle {
        current: ThemeMode,
        aria_label: String,
        color: ThemeToken,
    },

    /// Language switch showing the badge of the current locale.
    LocaleToggle {
        current: Locale,
        badge: String,
        aria_label: String,
    },

    /// Downloadable resume for the current locale.
    ResumeLink {
        label: String,
        href: String,
        placement: Placement,
    },

    /// Hamburger button for narrow viewports.
    MenuButton { open: bool, aria_label: String },

    /// Begin the collapsible link panel. Only emitted while the menu is open.
    BeginPanel,

    /// End the collapsible link panel.
    EndPanel,

    /// Close the header.
    EndHeader,
}

impl ShellCommand {
    /// The section this command links to, if any.
    pub fn section(&self) -> Option<SectionId> {
        match self {
            ShellCommand::NavLink { section, .. } => Some(*section),
            _ => None,
        }
    }
}
