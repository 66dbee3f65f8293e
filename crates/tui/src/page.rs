use chrono::{Datelike, Local};
use crossterm::event::KeyCode;
use folio_core::Portfolio;
use folio_core::i18n::{self, TextKey};
use folio_core::navigation::{NavEffect, NavIntent};
use folio_core::visibility::{GeometryPoller, Rect, RegionHandle};
use folio_protocol::{Locale, SectionId};
use tracing::{debug, info};

/// Pixel height one terminal row stands for when reporting scroll offsets.
const ROW_PX: f64 = 16.0;
const SCROLL_STEP: f64 = 3.0;

/// Rows of one section in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBlock {
    pub id: SectionId,
    pub top: f64,
    pub height: f64,
    pub lines: Vec<String>,
}

impl SectionBlock {
    pub fn bounds(&self, width: f64) -> Rect {
        Rect::new(0.0, self.top, width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The scrollable page as laid out in terminal rows.
///
/// Sections are stacked top to bottom, each at least one screen tall.
/// The poller measures them against the visible rows and feeds the
/// results into the portfolio.
pub struct TerminalPage {
    portfolio: Portfolio,
    poller: GeometryPoller,
    blocks: Vec<SectionBlock>,
    scroll: f64,
    width: u16,
    rows: u16,
    notice: Option<String>,
}

impl TerminalPage {
    pub fn new(mut portfolio: Portfolio, width: u16, rows: u16) -> Self {
        let mut poller = GeometryPoller::new(portfolio.config().poll_interval_ms);
        portfolio.mount(|id| Some(region(id)), &mut poller);
        let mut page = Self {
            portfolio,
            poller,
            blocks: Vec::new(),
            scroll: 0.0,
            width,
            rows,
            notice: None,
        };
        page.relayout();
        page
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn blocks(&self) -> &[SectionBlock] {
        &self.blocks
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    /// Message from the last resume request, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn resize(&mut self, width: u16, rows: u16) {
        if (width, rows) != (self.width, self.rows) {
            self.width = width;
            self.rows = rows;
            self.relayout();
        }
    }

    fn relayout(&mut self) {
        let locale = self.portfolio.locale();
        let width = usize::from(self.width.max(1));
        let mut top = 0.0;
        self.blocks = SectionId::ALL
            .iter()
            .map(|&id| {
                let lines = section_lines(locale, id, width);
                let height = (lines.len() as f64 + 2.0).max(f64::from(self.rows));
                let block = SectionBlock {
                    id,
                    top,
                    height,
                    lines,
                };
                top += height;
                block
            })
            .collect();
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
    }

    fn document_height(&self) -> f64 {
        self.blocks.last().map_or(0.0, |b| b.top + b.height)
    }

    fn max_scroll(&self) -> f64 {
        (self.document_height() - f64::from(self.rows)).max(0.0)
    }

    pub fn viewport(&self) -> Rect {
        Rect::new(0.0, self.scroll, f64::from(self.width), f64::from(self.rows))
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll(self.scroll + delta);
    }

    fn set_scroll(&mut self, scroll: f64) {
        self.scroll = scroll.clamp(0.0, self.max_scroll());
        self.portfolio.set_scroll(self.scroll * ROW_PX);
    }

    fn follow_anchor(&mut self, anchor: &str) {
        let target = SectionId::from_anchor(anchor)
            .and_then(|id| self.blocks.get(id.index()))
            .map(|b| b.top);
        if let Some(top) = target {
            self.set_scroll(top);
        }
    }

    pub fn dispatch(&mut self, intent: NavIntent) {
        match self.portfolio.dispatch(intent) {
            NavEffect::Navigate(anchor) => self.follow_anchor(&anchor),
            NavEffect::LocaleChanged(_) => self.relayout(),
            NavEffect::Open(path) => {
                info!(%path, "resume requested");
                self.notice = Some(path);
            }
            NavEffect::ThemeChanged(_) | NavEffect::MenuToggled(_) => {}
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Flow {
        let page = f64::from(self.rows.saturating_sub(1).max(1));
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(SCROLL_STEP),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-SCROLL_STEP),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::Home | KeyCode::Char('g') => self.set_scroll(0.0),
            KeyCode::End | KeyCode::Char('G') => self.set_scroll(self.max_scroll()),
            KeyCode::Char('t') => self.dispatch(NavIntent::ToggleTheme),
            KeyCode::Char('l') => self.dispatch(NavIntent::ToggleLocale),
            KeyCode::Char('m') => self.dispatch(NavIntent::ToggleMenu),
            KeyCode::Char('r') => self.dispatch(NavIntent::OpenResume),
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                if let Some(&id) = SectionId::ALL.get(index) {
                    self.dispatch(NavIntent::JumpTo(id));
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Measure the sections and feed the results to the portfolio.
    /// Returns whether the active section changed.
    pub fn refresh(&mut self, now_ms: f64) -> bool {
        let viewport = self.viewport();
        let Self {
            portfolio,
            poller,
            blocks,
            ..
        } = self;
        let width = viewport.w;
        let samples = poller.poll(now_ms, viewport, |handle| {
            blocks.get(handle.0 as usize).map(|b| b.bounds(width))
        });
        let mut changed = false;
        for sample in samples {
            if let Some(active) = portfolio.record(&sample, poller) {
                debug!(section = %active, "active section");
                changed = true;
            }
        }
        portfolio.tick(now_ms);
        changed
    }
}

fn region(id: SectionId) -> RegionHandle {
    RegionHandle(id.index() as u64)
}

fn section_lines(locale: Locale, id: SectionId, width: usize) -> Vec<String> {
    let title = i18n::section_title(locale, id);
    let mut lines = vec![
        title.to_string(),
        "─".repeat(title.chars().count().min(width)),
        String::new(),
    ];
    lines.extend(wrap(i18n::section_summary(locale, id), width));
    if id == SectionId::Contact {
        lines.push(String::new());
        lines.push(i18n::text(locale, TextKey::ContactInfo).to_string());
        lines.extend(wrap(i18n::text(locale, TextKey::Availability), width));
        lines.extend(footer_lines(locale, Local::now().year(), width));
    }
    lines
}

/// The page footer, appended below the last section.
fn footer_lines(locale: Locale, year: i32, width: usize) -> Vec<String> {
    let links = SectionId::ALL
        .into_iter()
        .map(|id| i18n::section_label(locale, id))
        .collect::<Vec<_>>()
        .join(" · ");
    let mut lines = vec![String::new(), "─".repeat(width.min(40)), String::new()];
    lines.extend(wrap(i18n::text(locale, TextKey::FooterAbout), width));
    lines.push(String::new());
    lines.push(i18n::text(locale, TextKey::FooterQuickLinks).to_string());
    lines.extend(wrap(&links, width));
    lines.push(String::new());
    lines.extend(wrap(i18n::text(locale, TextKey::FooterMadeWith), width));
    lines.extend(wrap(&i18n::copyright(locale, year), width));
    lines
}

/// Greedy word wrap on character counts.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() { 0 } else { 1 } + word.chars().count();
        if !line.is_empty() && line.chars().count() + needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::SiteConfig;
    use folio_core::state::MemorySettings;
    use folio_protocol::ThemeMode;

    fn page() -> TerminalPage {
        let portfolio = Portfolio::new(SiteConfig::default(), Box::new(MemorySettings::new()));
        TerminalPage::new(portfolio, 100, 20)
    }

    #[test]
    fn sections_fill_at_least_a_screen() {
        let page = page();
        assert_eq!(page.blocks().len(), 7);
        for pair in page.blocks().windows(2) {
            assert!(pair[0].height >= 20.0);
            assert_eq!(pair[0].top + pair[0].height, pair[1].top);
        }
    }

    #[test]
    fn number_keys_jump_and_activate() {
        let mut page = page();
        page.refresh(0.0);
        assert_eq!(page.portfolio().active_section(), SectionId::Home);

        assert_eq!(page.handle_key(KeyCode::Char('3')), Flow::Continue);
        assert_eq!(page.scroll(), page.blocks()[2].top);
        assert!(page.refresh(200.0));
        assert_eq!(page.portfolio().active_section(), SectionId::Skills);
    }

    #[test]
    fn polls_are_throttled() {
        let mut page = page();
        page.refresh(0.0);
        page.handle_key(KeyCode::Char('7'));
        assert!(!page.refresh(50.0));
        assert!(page.refresh(150.0));
        assert_eq!(page.portfolio().active_section(), SectionId::Contact);
    }

    #[test]
    fn toggles_and_quit() {
        let mut page = page();
        page.handle_key(KeyCode::Char('t'));
        assert_eq!(page.portfolio().theme(), ThemeMode::Dark);
        page.handle_key(KeyCode::Char('l'));
        assert_eq!(page.portfolio().locale(), Locale::Secondary);
        assert_eq!(page.blocks()[0].lines[0], "Web Developer");
        page.handle_key(KeyCode::Char('m'));
        assert!(page.portfolio().shell().is_menu_open());
        page.handle_key(KeyCode::Char('1'));
        assert!(!page.portfolio().shell().is_menu_open());
        assert_eq!(page.handle_key(KeyCode::Char('q')), Flow::Quit);
    }

    #[test]
    fn resume_request_leaves_a_notice() {
        let mut page = page();
        page.handle_key(KeyCode::Char('r'));
        assert_eq!(page.notice(), Some("/cv/Curriculum_Simon_WD.pdf"));
    }

    #[test]
    fn scroll_is_clamped() {
        let mut page = page();
        page.handle_key(KeyCode::Char('k'));
        assert_eq!(page.scroll(), 0.0);
        page.handle_key(KeyCode::End);
        let last = &page.blocks()[6];
        assert_eq!(page.scroll(), last.top + last.height - 20.0);
        assert!(page.portfolio().shell().is_scrolled());
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap("one two three four", 9),
            vec!["one two".to_string(), "three".into(), "four".into()]
        );
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn contact_block_ends_with_footer() {
        let lines = section_lines(Locale::Secondary, SectionId::Contact, 200);
        assert!(lines.iter().any(|l| l == "Contact Information"));
        assert!(lines.iter().any(|l| l == "Quick Links"));
        assert!(lines.iter().any(|l| l.starts_with("Home · About")));
        let year = format!("© {}", Local::now().year());
        assert!(lines.last().is_some_and(|l| l.starts_with(&year)));
    }

    #[test]
    fn footer_is_translated() {
        let lines = footer_lines(Locale::Primary, 2025, 200);
        assert!(lines.iter().any(|l| l == "Enlaces Rápidos"));
        assert!(lines.iter().any(|l| l.starts_with("Diseñado y desarrollado")));
        assert!(lines.last().is_some_and(|l| l.starts_with("© 2025")));
    }
}
