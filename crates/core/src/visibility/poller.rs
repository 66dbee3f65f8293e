use std::collections::BTreeMap;

use super::geometry::{Rect, RootMargin, intersect};
use super::sensor::{IntersectionSample, ObserverHost, RegionHandle, SensorOptions};

/// Default minimum spacing between two geometry reads.
pub const DEFAULT_POLL_INTERVAL_MS: f64 = 100.0;

/// [`ObserverHost`] for platforms without a native intersection primitive.
///
/// Frontends report scroll and resize events by calling [`poll`](Self::poll)
/// with the current viewport and region bounds. Reads closer together than
/// the interval are dropped; [`poll_now`](Self::poll_now) bypasses the
/// throttle (first layout, resize).
#[derive(Debug, Clone)]
pub struct GeometryPoller {
    interval_ms: f64,
    last_poll_ms: Option<f64>,
    observed: BTreeMap<RegionHandle, RootMargin>,
}

impl GeometryPoller {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_poll_ms: None,
            observed: BTreeMap::new(),
        }
    }

    pub fn is_observing(&self, target: RegionHandle) -> bool {
        self.observed.contains_key(&target)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Measure every observed region unless the last read was too recent.
    ///
    /// `bounds` returns `None` for regions that have no layout yet; those
    /// are reported as not intersecting.
    pub fn poll<F>(&mut self, now_ms: f64, viewport: Rect, bounds: F) -> Vec<IntersectionSample>
    where
        F: Fn(RegionHandle) -> Option<Rect>,
    {
        if self.throttled_for(now_ms).is_some() {
            return Vec::new();
        }
        self.poll_now(now_ms, viewport, bounds)
    }

    /// Time left before [`poll`](Self::poll) reads geometry again, or
    /// `None` if it would read now.
    pub fn throttled_for(&self, now_ms: f64) -> Option<f64> {
        let last = self.last_poll_ms?;
        let wait = self.interval_ms - (now_ms - last);
        (wait > 0.0).then_some(wait)
    }

    pub fn poll_now<F>(&mut self, now_ms: f64, viewport: Rect, bounds: F) -> Vec<IntersectionSample>
    where
        F: Fn(RegionHandle) -> Option<Rect>,
    {
        self.last_poll_ms = Some(now_ms);
        self.observed
            .iter()
            .map(|(&target, margin)| match bounds(target) {
                Some(rect) => {
                    let hit = intersect(rect, viewport, margin);
                    IntersectionSample {
                        target,
                        intersecting: hit.intersecting,
                        ratio: hit.ratio,
                    }
                }
                None => IntersectionSample {
                    target,
                    intersecting: false,
                    ratio: 0.0,
                },
            })
            .collect()
    }
}

impl Default for GeometryPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL_MS)
    }
}

impl ObserverHost for GeometryPoller {
    fn observe(&mut self, target: RegionHandle, options: &SensorOptions) {
        self.observed.insert(target, options.root_margin);
    }

    fn unobserve(&mut self, target: RegionHandle) {
        self.observed.remove(&target);
    }
}
