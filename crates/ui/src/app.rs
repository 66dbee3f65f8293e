use std::time::Duration;

use chrono::{Datelike, Local};
use eframe::egui;
use folio_core::Portfolio;
use folio_core::contact::{ContactError, Field, SubmitStatus};
use folio_core::i18n::{self, TextKey};
use folio_core::navigation::{NavEffect, NavIntent};
use folio_core::visibility::{GeometryPoller, Rect, RegionHandle};
use folio_protocol::{SectionId, ThemeToken};
use tracing::{debug, info};

use crate::relay::{self, PendingResult};
use crate::renderer;
use crate::theme::{self, FONT_DISPLAY, NARROW_BREAKPOINT};

fn region(id: SectionId) -> RegionHandle {
    RegionHandle(id.index() as u64)
}

fn to_rect(rect: egui::Rect) -> Rect {
    Rect::new(
        f64::from(rect.min.x),
        f64::from(rect.min.y),
        f64::from(rect.width()),
        f64::from(rect.height()),
    )
}

/// Main application state.
pub struct FolioApp {
    portfolio: Portfolio,
    poller: GeometryPoller,
    /// Section rects from the last frame, in screen coordinates.
    regions: [Option<egui::Rect>; 7],
    /// Section rects and viewport at the last geometry read.
    measured: Option<([Option<egui::Rect>; 7], egui::Rect)>,
    /// Section to bring to the top on the next frame.
    pending_jump: Option<SectionId>,
    /// Contact relay result from a background submission.
    pending_result: PendingResult,
    form_error: Option<ContactError>,
}

impl FolioApp {
    pub fn new(cc: &eframe::CreationContext<'_>, portfolio: Portfolio) -> Self {
        Self::with_context(&cc.egui_ctx, portfolio)
    }

    pub(crate) fn with_context(ctx: &egui::Context, mut portfolio: Portfolio) -> Self {
        ctx.set_visuals(theme::visuals(portfolio.theme()));
        theme::apply_typography(ctx);

        let repaint = ctx.clone();
        portfolio.theme_store().subscribe(move |mode| {
            repaint.set_visuals(theme::visuals(*mode));
        });

        let mut poller = GeometryPoller::new(portfolio.config().poll_interval_ms);
        portfolio.mount(|id| Some(region(id)), &mut poller);

        Self {
            portfolio,
            poller,
            regions: [None; 7],
            measured: None,
            pending_jump: None,
            pending_result: PendingResult::default(),
            form_error: None,
        }
    }

    fn handle(&mut self, intent: NavIntent, ctx: &egui::Context) {
        match self.portfolio.dispatch(intent) {
            NavEffect::Navigate(anchor) => {
                self.pending_jump = SectionId::from_anchor(&anchor);
            }
            NavEffect::Open(path) => {
                info!(%path, "opening resume");
                ctx.open_url(egui::OpenUrl::new_tab(path));
            }
            NavEffect::ThemeChanged(_) | NavEffect::LocaleChanged(_) | NavEffect::MenuToggled(_) => {}
        }
    }

    fn collect_relay_result(&mut self, now_ms: f64) {
        let pending = {
            let mut lock = self
                .pending_result
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            lock.take()
        };
        if let Some(result) = pending {
            self.portfolio.contact_mut().finish_submit(result, now_ms);
        }
    }

    fn submit_contact(&mut self, ctx: &egui::Context) {
        match self.portfolio.contact_mut().begin_submit() {
            Ok(payload) => {
                self.form_error = None;
                let endpoint = self.portfolio.config().contact_endpoint.clone();
                relay::spawn_submit(endpoint, payload, self.pending_result.clone(), ctx.clone());
            }
            Err(e) => {
                debug!(error = %e, "contact form rejected");
                self.form_error = Some(e);
            }
        }
    }

    fn section_body(&mut self, ui: &mut egui::Ui, id: SectionId) {
        let mode = self.portfolio.theme();
        let locale = self.portfolio.locale();

        let title_size = if id == SectionId::Home {
            FONT_DISPLAY
        } else {
            theme::FONT_TITLE
        };
        ui.label(
            egui::RichText::new(i18n::section_title(locale, id))
                .size(title_size)
                .strong()
                .color(theme::resolve(ThemeToken::SectionTitle, mode)),
        );
        let (rule, _) = ui.allocate_exact_size(egui::vec2(80.0, 4.0), egui::Sense::hover());
        ui.painter()
            .rect_filled(rule, 2.0, theme::resolve(ThemeToken::SectionRule, mode));
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new(i18n::section_summary(locale, id))
                .color(theme::resolve(ThemeToken::TextSecondary, mode)),
        );

        if id == SectionId::Contact {
            ui.add_space(16.0);
            ui.label(
                egui::RichText::new(i18n::text(locale, TextKey::ContactInfo))
                    .strong()
                    .color(theme::resolve(ThemeToken::TextPrimary, mode)),
            );
            ui.label(
                egui::RichText::new(i18n::text(locale, TextKey::Availability))
                    .color(theme::resolve(ThemeToken::TextSecondary, mode)),
            );
            ui.add_space(16.0);
            self.contact_form(ui);
        }
    }

    fn footer(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let mode = self.portfolio.theme();
        let locale = self.portfolio.locale();
        let muted = theme::resolve(ThemeToken::TextSecondary, mode);

        ui.separator();
        ui.label(egui::RichText::new(i18n::text(locale, TextKey::FooterAbout)).color(muted));
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(i18n::text(locale, TextKey::FooterQuickLinks))
                .strong()
                .color(theme::resolve(ThemeToken::TextPrimary, mode)),
        );
        ui.horizontal_wrapped(|ui| {
            for id in SectionId::ALL {
                if ui.link(i18n::section_label(locale, id)).clicked() {
                    self.handle(NavIntent::JumpTo(id), ctx);
                }
            }
        });
        ui.add_space(8.0);
        ui.label(egui::RichText::new(i18n::text(locale, TextKey::FooterMadeWith)).color(muted));
        ui.label(
            egui::RichText::new(i18n::copyright(locale, Local::now().year()))
                .small()
                .color(muted),
        );
    }

    fn contact_form(&mut self, ui: &mut egui::Ui) {
        let mode = self.portfolio.theme();
        let locale = self.portfolio.locale();

        ui.label(
            egui::RichText::new(i18n::text(locale, TextKey::ContactFormTitle))
                .strong()
                .color(theme::resolve(ThemeToken::TextPrimary, mode)),
        );
        for field in Field::ALL {
            ui.label(field.label(locale));
            let value = self.portfolio.contact_mut().field_mut(field);
            let edit = if field == Field::Message {
                egui::TextEdit::multiline(value).desired_rows(5)
            } else {
                egui::TextEdit::singleline(value)
            };
            ui.add(
                edit.hint_text(field.placeholder(locale))
                    .desired_width(f32::INFINITY),
            );
        }

        let contact = self.portfolio.contact();
        let submitting = contact.status() == SubmitStatus::Submitting;
        let label = if submitting {
            i18n::text(locale, TextKey::ContactSending)
        } else {
            i18n::text(locale, TextKey::ContactSend)
        };
        let send = egui::Button::new(
            egui::RichText::new(label).color(theme::resolve(ThemeToken::AccentText, mode)),
        )
        .fill(theme::resolve(ThemeToken::AccentFill, mode));
        if ui.add_enabled(!submitting, send).clicked() {
            self.submit_contact(ui.ctx());
        }

        let banner = match self.portfolio.contact().status() {
            SubmitStatus::Success => Some((
                ThemeToken::StatusSuccessBackground,
                ThemeToken::StatusSuccessText,
            )),
            SubmitStatus::Error => Some((
                ThemeToken::StatusErrorBackground,
                ThemeToken::StatusErrorText,
            )),
            SubmitStatus::Idle | SubmitStatus::Submitting => None,
        };
        if let (Some((fill, text)), Some(message)) =
            (banner, self.portfolio.contact().status_text(locale))
        {
            egui::Frame::new()
                .fill(theme::resolve(fill, mode))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6))
                .show(ui, |ui| {
                    ui.colored_label(theme::resolve(text, mode), message);
                });
        }
        if self.form_error.is_some() {
            ui.colored_label(
                theme::resolve(ThemeToken::StatusErrorText, mode),
                i18n::text(locale, TextKey::ContactInvalid),
            );
        }
    }

    /// One frame of the page. Split from `eframe::App::update` so it can
    /// run against a bare `egui::Context`.
    pub(crate) fn show(&mut self, ctx: &egui::Context) {
        let now_ms = ctx.input(|i| i.time) * 1000.0;
        self.collect_relay_result(now_ms);
        self.portfolio.tick(now_ms);
        if let Some(at) = self.portfolio.contact().dismiss_at() {
            let remaining = (at - now_ms).max(0.0);
            ctx.request_repaint_after(Duration::from_secs_f64(remaining / 1000.0));
        }

        let mode = self.portfolio.theme();
        let commands = self.portfolio.shell_commands();
        let header = egui::Frame::new()
            .fill(renderer::header_fill(&commands, mode))
            .inner_margin(egui::Margin::symmetric(16, 8));
        let mut intents = Vec::new();
        egui::TopBottomPanel::top("header")
            .frame(header)
            .show(ctx, |ui| {
                let narrow = ui.max_rect().width() < NARROW_BREAKPOINT;
                intents = renderer::render_shell(ui, &commands, mode, narrow);
            });
        for intent in intents {
            self.handle(intent, ctx);
        }

        let jump = self.pending_jump.take();
        let mut regions = [None; 7];
        let page = egui::Frame::new().fill(theme::resolve(ThemeToken::Background, mode));
        let output = egui::CentralPanel::default()
            .frame(page)
            .show(ctx, |ui| {
                let section_height = ui.available_height();
                egui::ScrollArea::vertical()
                    .id_salt("page")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for id in SectionId::ALL {
                            let response = egui::Frame::new()
                                .inner_margin(egui::Margin::same(24))
                                .show(ui, |ui| {
                                    ui.set_min_height(section_height);
                                    ui.set_width(ui.available_width());
                                    self.section_body(ui, id);
                                })
                                .response;
                            regions[id.index()] = Some(response.rect);
                            if jump == Some(id) {
                                ui.scroll_to_rect(response.rect, Some(egui::Align::TOP));
                            }
                        }
                        egui::Frame::new()
                            .inner_margin(egui::Margin::same(24))
                            .show(ui, |ui| self.footer(ui, ctx));
                    })
            })
            .inner;
        self.regions = regions;
        self.portfolio.set_scroll(f64::from(output.state.offset.y));

        if let Some(wait) = self.poll_sections(now_ms, output.inner_rect) {
            ctx.request_repaint_after(wait);
        }
    }

    /// Feed the current layout to the poller. When the read is throttled
    /// and the layout moved since the last read, returns how long until a
    /// frame should measure again.
    fn poll_sections(&mut self, now_ms: f64, viewport: egui::Rect) -> Option<Duration> {
        let layout = (self.regions, viewport);
        if let Some(wait_ms) = self.poller.throttled_for(now_ms) {
            return (self.measured != Some(layout))
                .then(|| Duration::from_secs_f64(wait_ms / 1000.0));
        }

        let known = self.regions;
        let samples = self.poller.poll_now(now_ms, to_rect(viewport), |handle| {
            usize::try_from(handle.0)
                .ok()
                .and_then(|i| known.get(i).copied().flatten())
                .map(to_rect)
        });
        self.measured = Some(layout);
        for sample in samples {
            if let Some(active) = self.portfolio.record(&sample, &mut self.poller) {
                debug!(section = %active, "active section");
            }
        }
        None
    }

    #[cfg(test)]
    pub(crate) fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    #[cfg(test)]
    pub(crate) fn pending_jump(&self) -> Option<SectionId> {
        self.pending_jump
    }
}

impl eframe::App for FolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::SiteConfig;
    use folio_core::state::MemorySettings;
    use folio_protocol::ThemeMode;

    fn app(ctx: &egui::Context) -> FolioApp {
        let portfolio = Portfolio::new(SiteConfig::default(), Box::new(MemorySettings::new()));
        FolioApp::with_context(ctx, portfolio)
    }

    fn frame(ctx: &egui::Context, app: &mut FolioApp, time: f64) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(1200.0, 800.0),
            )),
            time: Some(time),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.show(ctx));
    }

    #[test]
    fn first_frames_measure_every_section() {
        let ctx = egui::Context::default();
        let mut app = app(&ctx);
        frame(&ctx, &mut app, 0.0);
        assert!(app.regions.iter().all(Option::is_some));
        assert_eq!(app.portfolio().active_section(), SectionId::Home);
        assert!(app.portfolio().registry().is_visible(SectionId::Home));
        assert!(!app.portfolio().registry().is_visible(SectionId::Contact));
    }

    #[test]
    fn theme_subscription_restyles_the_context() {
        let ctx = egui::Context::default();
        let mut app = app(&ctx);
        assert!(!ctx.style().visuals.dark_mode);
        app.handle(NavIntent::ToggleTheme, &ctx);
        assert_eq!(app.portfolio().theme(), ThemeMode::Dark);
        assert!(ctx.style().visuals.dark_mode);
    }

    #[test]
    fn links_queue_a_jump_and_close_the_menu() {
        let ctx = egui::Context::default();
        let mut app = app(&ctx);
        app.handle(NavIntent::ToggleMenu, &ctx);
        assert!(app.portfolio().shell().is_menu_open());
        app.handle(NavIntent::JumpTo(SectionId::Projects), &ctx);
        assert_eq!(app.pending_jump(), Some(SectionId::Projects));
        assert!(!app.portfolio().shell().is_menu_open());
    }

    #[test]
    fn empty_form_is_rejected_without_sending() {
        let ctx = egui::Context::default();
        let mut app = app(&ctx);
        app.submit_contact(&ctx);
        assert_eq!(app.form_error, Some(ContactError::Missing(Field::Name)));
        assert_eq!(app.portfolio().contact().status(), SubmitStatus::Idle);
    }

    #[test]
    fn relay_result_is_picked_up_on_the_next_frame() {
        let ctx = egui::Context::default();
        let mut app = app(&ctx);
        let form = app.portfolio.contact_mut();
        form.set_field(Field::Name, "Ada");
        form.set_field(Field::Email, "ada@example.com");
        form.set_field(Field::Subject, "Hi");
        form.set_field(Field::Message, "Hello there");
        assert!(form.begin_submit().is_ok());

        if let Ok(mut slot) = app.pending_result.lock() {
            *slot = Some(Ok(()));
        }
        frame(&ctx, &mut app, 1.0);
        assert_eq!(app.portfolio().contact().status(), SubmitStatus::Success);
        assert_eq!(app.portfolio().contact().dismiss_at(), Some(4000.0));
    }

    #[test]
    fn repaints_only_while_the_layout_moves() {
        let ctx = egui::Context::default();
        let mut app = app(&ctx);
        frame(&ctx, &mut app, 0.0);
        let (_, viewport) = app.measured.expect("first frame reads geometry");

        assert_eq!(app.poll_sections(10.0, viewport), None);
        let moved = viewport.translate(egui::vec2(0.0, -40.0));
        let wait = app.poll_sections(10.0, moved);
        assert!(wait.is_some_and(|d| d > Duration::ZERO && d <= Duration::from_millis(100)));

        assert_eq!(app.poll_sections(200.0, moved), None);
        assert_eq!(app.measured.map(|(_, v)| v), Some(moved));
    }
}
