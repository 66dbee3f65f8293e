use folio_protocol::{Locale, SectionId, ShellCommand, ThemeMode};

use crate::config::SiteConfig;
use crate::contact::ContactForm;
use crate::navigation::{
    ActiveSectionResolver, NavContext, NavEffect, NavIntent, NavigationShell, SectionRegistry,
};
use crate::state::{LocaleStore, SettingsStore, ThemeStore};
use crate::visibility::{IntersectionSample, ObserverHost, RegionHandle};

/// The whole page: one lifecycle object created at start-up and handed to
/// the frontend, which owns the platform side (layout, observation host,
/// settings backend).
pub struct Portfolio {
    config: SiteConfig,
    theme: ThemeStore,
    locale: LocaleStore,
    registry: SectionRegistry,
    resolver: ActiveSectionResolver,
    shell: NavigationShell,
    contact: ContactForm,
}

impl Portfolio {
    pub fn new(config: SiteConfig, settings: Box<dyn SettingsStore>) -> Self {
        let theme = ThemeStore::load_with_key(settings, &config.settings_key);
        Self {
            registry: SectionRegistry::new(&config),
            shell: NavigationShell::new(config.scrolled_offset_px, config.resume.clone()),
            contact: ContactForm::new(config.status_dismiss_ms),
            resolver: ActiveSectionResolver::new(),
            locale: LocaleStore::new(),
            theme,
            config,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Attach every section's sensor to the region returned by `region_for`.
    pub fn mount<F>(&mut self, region_for: F, host: &mut dyn ObserverHost)
    where
        F: FnMut(SectionId) -> Option<RegionHandle>,
    {
        self.registry.mount(region_for, host);
    }

    /// Re-attach one section, e.g. after its element was replaced.
    pub fn attach(
        &mut self,
        section: SectionId,
        target: Option<RegionHandle>,
        host: &mut dyn ObserverHost,
    ) {
        self.registry.attach(section, target, host);
    }

    pub fn unmount(&mut self, host: &mut dyn ObserverHost) {
        self.registry.unmount(host);
    }

    /// Deliver one observation callback. Returns the new active section
    /// when it changed.
    pub fn record(
        &mut self,
        sample: &IntersectionSample,
        host: &mut dyn ObserverHost,
    ) -> Option<SectionId> {
        let before = self.resolver.active();
        self.registry.record(sample, host, &mut self.resolver)?;
        let after = self.resolver.active();
        (after != before).then_some(after)
    }

    pub fn active_section(&self) -> SectionId {
        self.resolver.active()
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme.mode()
    }

    pub fn locale(&self) -> Locale {
        self.locale.locale()
    }

    /// For subscribing to theme changes.
    pub fn theme_store(&mut self) -> &mut ThemeStore {
        &mut self.theme
    }

    /// For subscribing to locale changes.
    pub fn locale_store(&mut self) -> &mut LocaleStore {
        &mut self.locale
    }

    pub fn resolver(&mut self) -> &mut ActiveSectionResolver {
        &mut self.resolver
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn shell(&self) -> &NavigationShell {
        &self.shell
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    pub fn dispatch(&mut self, intent: NavIntent) -> NavEffect {
        self.shell.dispatch(intent, &mut self.theme, &mut self.locale)
    }

    /// Returns whether the header style changed.
    pub fn set_scroll(&mut self, scroll_y: f64) -> bool {
        self.shell.set_scroll(scroll_y)
    }

    pub fn nav_context(&self) -> NavContext {
        NavContext {
            active: self.resolver.active(),
            theme: self.theme.mode(),
            locale: self.locale.locale(),
        }
    }

    pub fn shell_commands(&self) -> Vec<ShellCommand> {
        self.shell.render(&self.nav_context())
    }

    /// Advance time-based state. Returns whether anything visible changed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.contact.tick(now_ms)
    }
}

impl std::fmt::Debug for Portfolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Portfolio")
            .field("active", &self.resolver.active())
            .field("theme", &self.theme.mode())
            .field("locale", &self.locale.locale())
            .field("menu_open", &self.shell.is_menu_open())
            .finish_non_exhaustive()
    }
}
