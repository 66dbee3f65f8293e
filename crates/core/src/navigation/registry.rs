use folio_protocol::SectionId;
use tracing::trace;

use super::resolver::ActiveSectionResolver;
use crate::config::SiteConfig;
use crate::visibility::{
    IntersectionSample, ObserverHost, RegionHandle, SensorOptions, VisibilitySensor,
};

/// One anchorable page region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub threshold: f64,
}

#[derive(Debug)]
struct Entry {
    section: Section,
    sensor: VisibilitySensor,
}

/// The fixed, ordered set of page sections, each with its own sensor.
///
/// Sensors own each section's visibility. Their hidden to visible edges are
/// routed into an [`ActiveSectionResolver`] tagged with the owning section.
#[derive(Debug)]
pub struct SectionRegistry {
    entries: Vec<Entry>,
}

impl SectionRegistry {
    pub fn new(config: &SiteConfig) -> Self {
        let entries = SectionId::ALL
            .into_iter()
            .map(|id| {
                let section = Section {
                    id,
                    threshold: config.threshold_for(id),
                };
                let sensor = VisibilitySensor::new(SensorOptions {
                    threshold: section.threshold,
                    root_margin: config.root_margin,
                    freeze_once_visible: config.freeze_once_visible,
                });
                Entry { section, sensor }
            })
            .collect();
        Self { entries }
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.entries.iter().map(|e| &e.section)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attach every section to the region the frontend laid out for it.
    pub fn mount<F>(&mut self, mut region_for: F, host: &mut dyn ObserverHost)
    where
        F: FnMut(SectionId) -> Option<RegionHandle>,
    {
        for entry in &mut self.entries {
            let target = region_for(entry.section.id);
            entry.sensor.attach(target, host);
        }
    }

    /// Attach (or re-attach) a single section.
    pub fn attach(
        &mut self,
        section: SectionId,
        target: Option<RegionHandle>,
        host: &mut dyn ObserverHost,
    ) {
        if let Some(entry) = self.entry_mut(section) {
            entry.sensor.attach(target, host);
        }
    }

    /// Stop every sensor. Nothing is routed afterwards.
    pub fn unmount(&mut self, host: &mut dyn ObserverHost) {
        for entry in &mut self.entries {
            entry.sensor.detach(host);
        }
    }

    pub fn section_for(&self, target: RegionHandle) -> Option<SectionId> {
        self.entries
            .iter()
            .find(|e| e.sensor.target() == Some(target))
            .map(|e| e.section.id)
    }

    pub fn is_visible(&self, section: SectionId) -> bool {
        self.entry(section).is_some_and(|e| e.sensor.is_visible())
    }

    /// Deliver one observation callback. Returns the visibility change it
    /// caused, after forwarding it to `resolver`.
    pub fn record(
        &mut self,
        sample: &IntersectionSample,
        host: &mut dyn ObserverHost,
        resolver: &mut ActiveSectionResolver,
    ) -> Option<(SectionId, bool)> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.sensor.target() == Some(sample.target))?;
        let visible = entry.sensor.record(sample, host)?;
        let id = entry.section.id;
        trace!(section = %id, visible, ratio = sample.ratio, "section visibility changed");
        if visible {
            resolver.activate(id);
        }
        Some((id, visible))
    }

    fn entry(&self, section: SectionId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.section.id == section)
    }

    fn entry_mut(&mut self, section: SectionId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.section.id == section)
    }
}
