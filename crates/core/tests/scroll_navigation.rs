//! Integration test: lay out the seven sections on a tall page, scroll a
//! viewport over it through the polling host, and check the active section,
//! the rendered shell and the theme/locale stores together.

use folio_core::navigation::NavIntent;
use folio_core::state::{MemorySettings, THEME_KEY};
use folio_core::visibility::{GeometryPoller, Rect, RegionHandle};
use folio_core::{Portfolio, SiteConfig};
use folio_protocol::{Locale, SectionId, ShellCommand, ThemeMode};

const VIEWPORT_W: f64 = 1000.0;
const VIEWPORT_H: f64 = 800.0;

/// Section heights in page order: home, about, skills, projects,
/// experience, education, contact.
const HEIGHTS: [f64; 7] = [800.0, 800.0, 600.0, 800.0, 700.0, 600.0, 900.0];

fn region(id: SectionId) -> RegionHandle {
    RegionHandle(id.index() as u64)
}

fn bounds(target: RegionHandle) -> Option<Rect> {
    let idx = target.0 as usize;
    let top: f64 = HEIGHTS.iter().take(idx).sum();
    HEIGHTS
        .get(idx)
        .map(|h| Rect::new(0.0, top, VIEWPORT_W, *h))
}

struct Page {
    portfolio: Portfolio,
    host: GeometryPoller,
    clock_ms: f64,
}

impl Page {
    fn mount(settings: MemorySettings) -> Self {
        let config = SiteConfig::default();
        let mut host = GeometryPoller::new(config.poll_interval_ms);
        let mut portfolio = Portfolio::new(config, Box::new(settings));
        portfolio.mount(|id| Some(region(id)), &mut host);
        Self {
            portfolio,
            host,
            clock_ms: 0.0,
        }
    }

    /// Scroll to `y` and deliver one geometry read. Returns every active
    /// section change in delivery order.
    fn scroll_to(&mut self, y: f64) -> Vec<SectionId> {
        self.clock_ms += 250.0;
        self.portfolio.set_scroll(y);
        let viewport = Rect::new(0.0, y, VIEWPORT_W, VIEWPORT_H);
        let samples = self.host.poll(self.clock_ms, viewport, bounds);
        samples
            .iter()
            .filter_map(|s| self.portfolio.record(s, &mut self.host))
            .collect()
    }
}

#[test]
fn skills_then_projects() {
    let mut page = Page::mount(MemorySettings::new());
    assert_eq!(page.portfolio.active_section(), SectionId::Home);

    // Top of the page: home fills the viewport, about only touches its edge.
    assert!(page.scroll_to(0.0).is_empty());
    assert_eq!(page.portfolio.active_section(), SectionId::Home);
    assert!(page.portfolio.registry().is_visible(SectionId::Home));
    assert!(!page.portfolio.registry().is_visible(SectionId::About));

    // Viewport 1500..2300: skills fully in view, projects at 12.5%.
    assert_eq!(page.scroll_to(1500.0), vec![SectionId::Skills]);

    // Viewport 2000..2800: skills still at 33%, projects crosses 30%.
    assert_eq!(page.scroll_to(2000.0), vec![SectionId::Projects]);
    assert!(page.portfolio.registry().is_visible(SectionId::Skills));
    assert_eq!(page.portfolio.active_section(), SectionId::Projects);
}

#[test]
fn scrolling_back_keeps_stale_section() {
    let mut page = Page::mount(MemorySettings::new());
    page.scroll_to(1500.0);
    page.scroll_to(2000.0);

    // Projects leaves view, skills never left so nothing transitions to true.
    assert!(page.scroll_to(1500.0).is_empty());
    assert_eq!(page.portfolio.active_section(), SectionId::Projects);

    // Home re-enters view and claims the highlight.
    assert_eq!(page.scroll_to(0.0), vec![SectionId::Home]);
}

#[test]
fn jump_to_bottom_lands_on_contact() {
    let mut page = Page::mount(MemorySettings::new());
    let total: f64 = HEIGHTS.iter().sum();
    let changes = page.scroll_to(total - VIEWPORT_H);
    assert_eq!(changes.last(), Some(&SectionId::Contact));

    let cmds = page.portfolio.shell_commands();
    let active: Vec<_> = cmds
        .iter()
        .filter_map(|c| match c {
            ShellCommand::NavLink { section, active: true, .. } => Some(*section),
            _ => None,
        })
        .collect();
    assert_eq!(active, vec![SectionId::Contact]);
    assert!(matches!(
        cmds.first(),
        Some(ShellCommand::BeginHeader { scrolled: true, .. })
    ));
}

#[test]
fn section_without_region_never_activates() {
    let config = SiteConfig::default();
    let mut host = GeometryPoller::new(0.0);
    let mut portfolio = Portfolio::new(config, Box::new(MemorySettings::new()));
    portfolio.mount(
        |id| (id != SectionId::Contact).then(|| region(id)),
        &mut host,
    );
    assert_eq!(host.observed_count(), 6);
    assert!(!host.is_observing(region(SectionId::Contact)));

    // Viewport 4100..4900: education at 33%, contact at 67% but unobserved.
    let viewport = Rect::new(0.0, 4100.0, VIEWPORT_W, VIEWPORT_H);
    for sample in host.poll(0.0, viewport, bounds) {
        portfolio.record(&sample, &mut host);
    }
    assert_eq!(portfolio.active_section(), SectionId::Education);
    assert!(!portfolio.registry().is_visible(SectionId::Contact));
}

#[test]
fn unmount_stops_all_observation() {
    let mut page = Page::mount(MemorySettings::new());
    page.portfolio.unmount(&mut page.host);
    assert_eq!(page.host.observed_count(), 0);
    assert!(page.scroll_to(2000.0).is_empty());
    assert_eq!(page.portfolio.active_section(), SectionId::Home);
}

#[test]
fn theme_starts_light_and_persists_dark() {
    let mut page = Page::mount(MemorySettings::new());
    assert_eq!(page.portfolio.theme(), ThemeMode::Light);

    page.portfolio.dispatch(NavIntent::ToggleTheme);
    assert_eq!(page.portfolio.theme(), ThemeMode::Dark);
    let stored = page
        .portfolio
        .theme_store()
        .settings()
        .get(THEME_KEY)
        .ok()
        .flatten();
    assert_eq!(stored.as_deref(), Some("dark"));
}

#[test]
fn locale_ignores_settings_and_relabels_shell() {
    let mut settings = MemorySettings::with_value(THEME_KEY, "dark");
    let _ = folio_core::state::SettingsStore::set(&mut settings, "locale", "en");
    let mut page = Page::mount(settings);
    assert_eq!(page.portfolio.theme(), ThemeMode::Dark);
    assert_eq!(page.portfolio.locale(), Locale::Primary);

    page.portfolio.dispatch(NavIntent::ToggleLocale);
    let labels: Vec<_> = page
        .portfolio
        .shell_commands()
        .into_iter()
        .filter_map(|c| match c {
            ShellCommand::NavLink { label, .. } => Some(label),
            _ => None,
        })
        .collect();
    assert_eq!(labels[0], "Home");
    assert_eq!(labels[6], "Contact");
}
