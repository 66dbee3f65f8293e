use folio_protocol::Locale;
use tracing::debug;

use super::store::{Store, SubscriptionId};

/// Process-wide display language. Always starts at [`Locale::Primary`] and
/// is never persisted.
#[derive(Debug)]
pub struct LocaleStore {
    state: Store<Locale>,
}

impl LocaleStore {
    pub fn new() -> Self {
        Self {
            state: Store::new(Locale::Primary),
        }
    }

    pub fn locale(&self) -> Locale {
        self.state.get()
    }

    pub fn toggle(&mut self) -> Locale {
        let next = self.state.get().toggled();
        debug!(locale = next.code(), "locale toggled");
        self.state.set(next);
        next
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Locale) + 'static) -> SubscriptionId {
        self.state.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }
}

impl Default for LocaleStore {
    fn default() -> Self {
        Self::new()
    }
}
