//! Browser bridge for the portfolio page.
//!
//! A page script creates one [`Folio`], calls `mount()` once the
//! `<section id=…>` elements exist, and drives the header through the
//! exported methods. Visibility comes from native `IntersectionObserver`s;
//! the theme preference lives in `localStorage`.

mod observer;
mod relay;
mod storage;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_core::contact::{ContactPayload, Field};
use folio_core::navigation::{NavEffect, NavIntent};
use folio_core::visibility::IntersectionSample;
use folio_core::{Portfolio, SiteConfig};
use folio_protocol::{Locale, SectionId, ThemeMode};
use wasm_bindgen::prelude::*;

use observer::DomObserverHost;
pub use relay::post_contact;
pub use storage::LocalStorageSettings;

struct Bridge {
    portfolio: Portfolio,
    host: DomObserverHost,
    on_section: Option<js_sys::Function>,
}

impl Bridge {
    fn deliver(bridge: &Weak<RefCell<Bridge>>, sample: IntersectionSample) {
        let Some(bridge) = bridge.upgrade() else {
            return;
        };
        let (active, listener) = {
            let Ok(mut guard) = bridge.try_borrow_mut() else {
                web_sys::console::warn_1(&"folio: dropped re-entrant visibility update".into());
                return;
            };
            let Bridge {
                portfolio,
                host,
                on_section,
            } = &mut *guard;
            let Some(active) = portfolio.record(&sample, host) else {
                return;
            };
            (active, on_section.clone())
        };
        // The listener may call back into the handle.
        if let Some(listener) = listener
            && let Err(e) = listener.call1(&JsValue::NULL, &JsValue::from_str(active.as_str()))
        {
            web_sys::console::error_1(&e);
        }
    }
}

fn apply_theme(document: &web_sys::Document, mode: ThemeMode) {
    if let Some(root) = document.document_element() {
        let dark = mode == ThemeMode::Dark;
        if let Err(e) = root.class_list().toggle_with_force("dark", dark) {
            web_sys::console::warn_1(&e);
        }
    }
}

fn apply_lang(document: &web_sys::Document, locale: Locale) {
    if let Some(root) = document.document_element()
        && let Err(e) = root.set_attribute("lang", locale.code())
    {
        web_sys::console::warn_1(&e);
    }
}

fn parse_section(id: &str) -> Result<SectionId, JsError> {
    SectionId::from_anchor(id).ok_or_else(|| JsError::new(&format!("unknown section: {id}")))
}

/// Handle to the page state, owned by the page script.
#[wasm_bindgen]
pub struct Folio {
    bridge: Rc<RefCell<Bridge>>,
}

#[wasm_bindgen]
impl Folio {
    /// Create the page state. `config_json` overrides the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Folio, JsError> {
        console_error_panic_hook::set_once();

        let config = match config_json {
            Some(text) => SiteConfig::from_json(&text)?,
            None => SiteConfig::default(),
        };
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsError::new("no document"))?;

        let mut portfolio = Portfolio::new(config, Box::new(LocalStorageSettings::new()));
        apply_theme(&document, portfolio.theme());
        apply_lang(&document, portfolio.locale());
        let doc = document.clone();
        portfolio
            .theme_store()
            .subscribe(move |mode| apply_theme(&doc, *mode));
        let doc = document.clone();
        portfolio
            .locale_store()
            .subscribe(move |locale| apply_lang(&doc, *locale));

        let bridge = Rc::new_cyclic(|weak: &Weak<RefCell<Bridge>>| {
            let weak = weak.clone();
            let deliver: Rc<dyn Fn(IntersectionSample)> =
                Rc::new(move |sample| Bridge::deliver(&weak, sample));
            RefCell::new(Bridge {
                portfolio,
                host: DomObserverHost::new(document, deliver),
                on_section: None,
            })
        });
        Ok(Folio { bridge })
    }

    /// Start observing every `<section>` whose id matches a page section.
    /// Sections missing from the document simply never become active.
    pub fn mount(&self) {
        let mut guard = self.bridge.borrow_mut();
        let Bridge {
            portfolio, host, ..
        } = &mut *guard;
        host.prune();
        let mut regions = Vec::with_capacity(SectionId::ALL.len());
        for id in SectionId::ALL {
            let region = host.register(id.as_str());
            if region.is_none() {
                web_sys::console::warn_1(&format!("folio: no element with id '{id}'").into());
            }
            regions.push(region);
        }
        portfolio.mount(|id| regions.get(id.index()).copied().flatten(), host);
        web_sys::console::log_1(
            &format!("folio: observing {} sections", host.observing()).into(),
        );
    }

    /// Stop all observation.
    pub fn unmount(&self) {
        let mut guard = self.bridge.borrow_mut();
        let Bridge {
            portfolio, host, ..
        } = &mut *guard;
        portfolio.unmount(host);
        host.clear();
    }

    /// Call `listener(sectionId)` whenever the active section changes.
    pub fn on_section_change(&self, listener: js_sys::Function) {
        self.bridge.borrow_mut().on_section = Some(listener);
    }

    pub fn active_section(&self) -> String {
        self.bridge.borrow().portfolio.active_section().to_string()
    }

    pub fn theme(&self) -> String {
        self.bridge.borrow().portfolio.theme().to_string()
    }

    pub fn locale(&self) -> String {
        self.bridge.borrow().portfolio.locale().code().to_string()
    }

    /// Flip the theme; returns the new mode.
    pub fn toggle_theme(&self) -> String {
        match self.dispatch(NavIntent::ToggleTheme) {
            NavEffect::ThemeChanged(mode) => mode.to_string(),
            _ => self.theme(),
        }
    }

    /// Flip the language; returns the new locale code.
    pub fn toggle_locale(&self) -> String {
        match self.dispatch(NavIntent::ToggleLocale) {
            NavEffect::LocaleChanged(locale) => locale.code().to_string(),
            _ => self.locale(),
        }
    }

    /// Open or close the narrow-viewport menu; returns whether it is open.
    pub fn toggle_menu(&self) -> bool {
        match self.dispatch(NavIntent::ToggleMenu) {
            NavEffect::MenuToggled(open) => open,
            _ => self.bridge.borrow().portfolio.shell().is_menu_open(),
        }
    }

    /// Close the menu and return the anchor to navigate to.
    pub fn jump_to(&self, section: &str) -> Result<String, JsError> {
        let id = parse_section(section)?;
        match self.dispatch(NavIntent::JumpTo(id)) {
            NavEffect::Navigate(href) => Ok(href),
            _ => Ok(id.anchor()),
        }
    }

    /// Close the menu and return the resume path for the current language.
    pub fn open_resume(&self) -> String {
        match self.dispatch(NavIntent::OpenResume) {
            NavEffect::Open(path) => path,
            _ => String::new(),
        }
    }

    /// Report the page's scroll offset; returns whether the header style
    /// changed.
    pub fn set_scroll(&self, scroll_y: f64) -> bool {
        self.bridge.borrow_mut().portfolio.set_scroll(scroll_y)
    }

    /// The header as a JSON array of shell commands.
    pub fn shell_json(&self) -> Result<String, JsError> {
        let commands = self.bridge.borrow().portfolio.shell_commands();
        Ok(serde_json::to_string(&commands)?)
    }

    /// Validate and send the contact form. `payload_json` carries `name`,
    /// `email`, `subject` and `message`. Resolves to the resulting status
    /// text, or rejects when validation fails.
    pub fn submit_contact(&self, payload_json: &str) -> Result<js_sys::Promise, JsError> {
        let fields: ContactPayload = serde_json::from_str(payload_json)?;
        let (payload, endpoint) = {
            let mut guard = self.bridge.borrow_mut();
            let form = guard.portfolio.contact_mut();
            form.set_field(Field::Name, fields.name);
            form.set_field(Field::Email, fields.email);
            form.set_field(Field::Subject, fields.subject);
            form.set_field(Field::Message, fields.message);
            let payload = form.begin_submit()?;
            (payload, guard.portfolio.config().contact_endpoint.clone())
        };

        let bridge = Rc::clone(&self.bridge);
        Ok(wasm_bindgen_futures::future_to_promise(async move {
            let result = post_contact(&endpoint, &payload).await;
            if let Err(e) = &result {
                web_sys::console::warn_1(&format!("folio: contact relay failed: {e}").into());
            }
            let mut guard = bridge.borrow_mut();
            let locale = guard.portfolio.locale();
            let form = guard.portfolio.contact_mut();
            form.finish_submit(result, js_sys::Date::now());
            Ok(JsValue::from_str(form.status_text(locale).unwrap_or_default()))
        }))
    }

    /// Advance timers; returns whether the contact status was cleared.
    pub fn tick(&self, now_ms: f64) -> bool {
        self.bridge.borrow_mut().portfolio.tick(now_ms)
    }

    /// Current contact status line, if any.
    pub fn contact_status(&self) -> Option<String> {
        let guard = self.bridge.borrow();
        let locale = guard.portfolio.locale();
        guard
            .portfolio
            .contact()
            .status_text(locale)
            .map(str::to_string)
    }
}

impl Folio {
    fn dispatch(&self, intent: NavIntent) -> NavEffect {
        self.bridge.borrow_mut().portfolio.dispatch(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_anchors() {
        assert!(matches!(parse_section("skills"), Ok(SectionId::Skills)));
        assert!(matches!(parse_section("#contact"), Ok(SectionId::Contact)));
    }
}
