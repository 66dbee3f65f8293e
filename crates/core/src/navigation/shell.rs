use folio_protocol::{Locale, Placement, SectionId, ShellCommand, ThemeMode, ThemeToken};
use tracing::debug;

use crate::config::ResumePaths;
use crate::i18n::{self, TextKey};
use crate::state::{LocaleStore, ThemeStore};

/// A user action raised by the navigation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    ToggleTheme,
    ToggleLocale,
    /// Follow a section link (including the brand link to `home`).
    JumpTo(SectionId),
    ToggleMenu,
    /// Follow the resume download link.
    OpenResume,
}

/// What the frontend has to do after an intent was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEffect {
    ThemeChanged(ThemeMode),
    LocaleChanged(Locale),
    /// Navigate to an anchor; the platform does the scrolling.
    Navigate(String),
    /// Open a document in a new tab/window.
    Open(String),
    MenuToggled(bool),
}

/// Read-only state the shell reflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavContext {
    pub active: SectionId,
    pub theme: ThemeMode,
    pub locale: Locale,
}

/// The header: section links, theme and locale switches, resume link and
/// the narrow-viewport menu panel.
///
/// Owns only ephemeral UI state. The panel starts closed, opens and closes
/// on explicit toggles, and is force-closed whenever a link is followed.
#[derive(Debug, Clone)]
pub struct NavigationShell {
    menu_open: bool,
    scrolled: bool,
    scrolled_offset: f64,
    resume: ResumePaths,
}

impl NavigationShell {
    pub fn new(scrolled_offset: f64, resume: ResumePaths) -> Self {
        Self {
            menu_open: false,
            scrolled: false,
            scrolled_offset,
            resume,
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Track the page scroll offset. Returns whether the header style flipped.
    pub fn set_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > self.scrolled_offset;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn dispatch(
        &mut self,
        intent: NavIntent,
        theme: &mut ThemeStore,
        locale: &mut LocaleStore,
    ) -> NavEffect {
        debug!(?intent, "navigation intent");
        match intent {
            NavIntent::ToggleTheme => NavEffect::ThemeChanged(theme.toggle()),
            NavIntent::ToggleLocale => NavEffect::LocaleChanged(locale.toggle()),
            NavIntent::JumpTo(section) => {
                self.menu_open = false;
                NavEffect::Navigate(section.anchor())
            }
            NavIntent::ToggleMenu => {
                self.menu_open = !self.menu_open;
                NavEffect::MenuToggled(self.menu_open)
            }
            NavIntent::OpenResume => {
                self.menu_open = false;
                NavEffect::Open(self.resume.for_locale(locale.locale()).to_owned())
            }
        }
    }

    pub fn render(&self, ctx: &NavContext) -> Vec<ShellCommand> {
        let mut out = Vec::with_capacity(32);
        out.push(ShellCommand::BeginHeader {
            scrolled: self.scrolled,
            background: if self.scrolled {
                ThemeToken::HeaderScrolledBackground
            } else {
                ThemeToken::HeaderBackground
            },
        });
        out.push(ShellCommand::Brand {
            href: SectionId::Home.anchor(),
            color: ThemeToken::Brand,
        });

        self.push_links(&mut out, ctx, Placement::Bar);
        out.push(ShellCommand::ThemeToggle {
            current: ctx.theme,
            aria_label: i18n::theme_toggle_label(ctx.theme),
            color: match ctx.theme {
                ThemeMode::Dark => ThemeToken::ToggleIconSun,
                ThemeMode::Light => ThemeToken::ToggleIcon,
            },
        });
        out.push(ShellCommand::LocaleToggle {
            current: ctx.locale,
            badge: ctx.locale.badge().to_owned(),
            aria_label: i18n::text(ctx.locale, TextKey::LanguageToggle).to_owned(),
        });
        out.push(ShellCommand::ResumeLink {
            label: i18n::text(ctx.locale, TextKey::Resume).to_owned(),
            href: self.resume.for_locale(ctx.locale).to_owned(),
            placement: Placement::Bar,
        });
        out.push(ShellCommand::MenuButton {
            open: self.menu_open,
            aria_label: i18n::text(ctx.locale, TextKey::MenuToggle).to_owned(),
        });

        if self.menu_open {
            out.push(ShellCommand::BeginPanel);
            self.push_links(&mut out, ctx, Placement::Panel);
            out.push(ShellCommand::ResumeLink {
                label: i18n::text(ctx.locale, TextKey::ResumeDownload).to_owned(),
                href: self.resume.for_locale(ctx.locale).to_owned(),
                placement: Placement::Panel,
            });
            out.push(ShellCommand::EndPanel);
        }

        out.push(ShellCommand::EndHeader);
        out
    }

    fn push_links(&self, out: &mut Vec<ShellCommand>, ctx: &NavContext, placement: Placement) {
        for section in SectionId::ALL {
            let active = section == ctx.active;
            out.push(ShellCommand::NavLink {
                section,
                label: i18n::section_label(ctx.locale, section).to_owned(),
                href: section.anchor(),
                active,
                color: if active {
                    ThemeToken::NavLinkActive
                } else {
                    ThemeToken::NavLink
                },
                placement,
            });
        }
    }
}
