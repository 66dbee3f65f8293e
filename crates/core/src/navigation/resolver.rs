use folio_protocol::SectionId;
use tracing::debug;

type Listener = Box<dyn FnMut(SectionId)>;

/// Folds per-section visibility transitions into the single section
/// highlighted in navigation.
///
/// Last transition wins: a section that turns visible becomes active even
/// if another section is still visible. A section turning hidden never
/// changes the active section, so fast scrolling can leave a stale value
/// until the next section reports in. Whether a section is currently
/// visible is owned by its sensor; the resolver only sees the hidden to
/// visible edges.
pub struct ActiveSectionResolver {
    active: SectionId,
    listeners: Vec<Listener>,
}

impl ActiveSectionResolver {
    pub fn new() -> Self {
        Self {
            active: SectionId::ALL[0],
            listeners: Vec::new(),
        }
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    /// Called with the new active section whenever it changes.
    pub fn on_change(&mut self, listener: impl FnMut(SectionId) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply one hidden to visible transition. Returns the new active
    /// section when the transition changed it.
    pub fn activate(&mut self, section: SectionId) -> Option<SectionId> {
        if self.active == section {
            return None;
        }

        debug!(from = %self.active, to = %section, "active section changed");
        self.active = section;
        for listener in &mut self.listeners {
            listener(section);
        }
        Some(section)
    }
}

impl Default for ActiveSectionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActiveSectionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveSectionResolver")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
