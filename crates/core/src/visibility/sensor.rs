use tracing::{debug, warn};

use super::geometry::RootMargin;

/// Opaque handle for one observable page region, assigned by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorOptions {
    /// Fraction of the target's area that must be inside the root, `0..=1`.
    pub threshold: f64,
    pub root_margin: RootMargin,
    /// Stop reporting after the first `true`.
    pub freeze_once_visible: bool,
}

impl Default for SensorOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: RootMargin::NONE,
            freeze_once_visible: false,
        }
    }
}

impl SensorOptions {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    /// Whether a measurement counts as "visible" under these options.
    pub fn is_visible(&self, sample: &IntersectionSample) -> bool {
        if !sample.intersecting {
            return false;
        }
        if self.threshold > 0.0 {
            sample.ratio >= self.threshold
        } else {
            true
        }
    }
}

/// One observation callback for a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionSample {
    pub target: RegionHandle,
    pub intersecting: bool,
    pub ratio: f64,
}

/// The platform's intersection-observation capability.
///
/// Browsers back this with `IntersectionObserver`; other frontends use
/// [`GeometryPoller`](super::poller::GeometryPoller).
pub trait ObserverHost {
    /// Whether the platform can observe intersections at all.
    fn supports_intersection(&self) -> bool {
        true
    }

    fn observe(&mut self, target: RegionHandle, options: &SensorOptions);

    fn unobserve(&mut self, target: RegionHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Never attached, or attached without a target.
    Idle,
    /// The host cannot observe; the sensor stays hidden.
    Unsupported,
    Observing(RegionHandle),
    /// Became visible with `freeze_once_visible`; no further output.
    Frozen,
    Detached,
}

/// Reports whether one region is substantially in view.
///
/// Output is a stream of changes: [`record`](Self::record) returns `Some`
/// only when the visible value flips. The sensor starts hidden and never
/// reports before the host delivers a real measurement.
#[derive(Debug, Clone)]
pub struct VisibilitySensor {
    options: SensorOptions,
    phase: Phase,
    visible: bool,
}

impl VisibilitySensor {
    pub fn new(options: SensorOptions) -> Self {
        Self {
            options,
            phase: Phase::Idle,
            visible: false,
        }
    }

    pub fn options(&self) -> &SensorOptions {
        &self.options
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The region currently being observed.
    pub fn target(&self) -> Option<RegionHandle> {
        match self.phase {
            Phase::Observing(target) => Some(target),
            _ => None,
        }
    }

    /// Start observing `target`. Re-attaching releases any previous target.
    ///
    /// A missing target is not an error: the sensor stays hidden and the
    /// host is never touched.
    pub fn attach(&mut self, target: Option<RegionHandle>, host: &mut dyn ObserverHost) {
        self.release(host);
        self.visible = false;

        let Some(target) = target else {
            debug!("visibility sensor attached without a target");
            self.phase = Phase::Idle;
            return;
        };
        if !host.supports_intersection() {
            warn!(?target, "intersection observation unsupported; region reported hidden");
            self.phase = Phase::Unsupported;
            return;
        }
        host.observe(target, &self.options);
        self.phase = Phase::Observing(target);
    }

    /// Feed one observation callback. Returns the new value when it changed.
    pub fn record(
        &mut self,
        sample: &IntersectionSample,
        host: &mut dyn ObserverHost,
    ) -> Option<bool> {
        let Phase::Observing(target) = self.phase else {
            return None;
        };
        if sample.target != target {
            return None;
        }

        let visible = self.options.is_visible(sample);
        if self.options.freeze_once_visible && visible {
            host.unobserve(target);
            self.phase = Phase::Frozen;
        }
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }

    /// Stop observing. No value is reported after this returns.
    pub fn detach(&mut self, host: &mut dyn ObserverHost) {
        self.release(host);
        self.phase = Phase::Detached;
    }

    fn release(&mut self, host: &mut dyn ObserverHost) {
        if let Phase::Observing(target) = self.phase {
            host.unobserve(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        unsupported: bool,
        observed: Vec<RegionHandle>,
        unobserved: Vec<RegionHandle>,
    }

    impl ObserverHost for RecordingHost {
        fn supports_intersection(&self) -> bool {
            !self.unsupported
        }

        fn observe(&mut self, target: RegionHandle, _options: &SensorOptions) {
            self.observed.push(target);
        }

        fn unobserve(&mut self, target: RegionHandle) {
            self.unobserved.push(target);
        }
    }

    const REGION: RegionHandle = RegionHandle(7);

    fn sample(ratio: f64) -> IntersectionSample {
        IntersectionSample {
            target: REGION,
            intersecting: ratio > 0.0,
            ratio,
        }
    }

    #[test]
    fn reports_threshold_crossings_only() {
        let mut host = RecordingHost::default();
        let mut sensor = VisibilitySensor::new(SensorOptions::with_threshold(0.3));
        sensor.attach(Some(REGION), &mut host);
        assert_eq!(host.observed, vec![REGION]);
        assert!(!sensor.is_visible());

        assert_eq!(sensor.record(&sample(0.1), &mut host), None);
        assert_eq!(sensor.record(&sample(0.3), &mut host), Some(true));
        assert_eq!(sensor.record(&sample(0.9), &mut host), None);
        assert_eq!(sensor.record(&sample(0.29), &mut host), Some(false));
        assert_eq!(sensor.record(&sample(0.0), &mut host), None);
    }

    #[test]
    fn zero_threshold_means_any_intersection() {
        let mut host = RecordingHost::default();
        let mut sensor = VisibilitySensor::new(SensorOptions::default());
        sensor.attach(Some(REGION), &mut host);
        let edge = IntersectionSample {
            target: REGION,
            intersecting: true,
            ratio: 0.0,
        };
        assert_eq!(sensor.record(&edge, &mut host), Some(true));
    }

    #[test]
    fn freeze_once_visible_stops_after_first_true() {
        let mut host = RecordingHost::default();
        let mut sensor = VisibilitySensor::new(SensorOptions {
            freeze_once_visible: true,
            ..SensorOptions::with_threshold(0.5)
        });
        sensor.attach(Some(REGION), &mut host);

        assert_eq!(sensor.record(&sample(0.2), &mut host), None);
        assert_eq!(sensor.record(&sample(0.6), &mut host), Some(true));
        assert_eq!(host.unobserved, vec![REGION]);

        assert_eq!(sensor.record(&sample(0.0), &mut host), None);
        assert_eq!(sensor.record(&sample(0.6), &mut host), None);
        assert!(sensor.is_visible());

        sensor.detach(&mut host);
        assert_eq!(host.unobserved.len(), 1, "frozen sensor is already released");
    }

    #[test]
    fn missing_target_never_touches_host() {
        let mut host = RecordingHost::default();
        let mut sensor = VisibilitySensor::new(SensorOptions::with_threshold(0.3));
        sensor.attach(None, &mut host);

        assert_eq!(sensor.record(&sample(1.0), &mut host), None);
        assert!(!sensor.is_visible());
        sensor.detach(&mut host);
        assert!(host.observed.is_empty());
        assert!(host.unobserved.is_empty());
    }

    #[test]
    fn late_target_starts_observation() {
        let mut host = RecordingHost::default();
        let mut sensor = VisibilitySensor::new(SensorOptions::with_threshold(0.3));
        sensor.attach(None, &mut host);
        sensor.attach(Some(REGION), &mut host);
        assert_eq!(sensor.target(), Some(REGION));
        assert_eq!(sensor.record(&sample(0.5), &mut host), Some(true));
    }

    #[test]
    fn unsupported_host_degrades_to_hidden() {
        let mut host = RecordingHost {
            unsupported: true,
            ..RecordingHost::default()
        };
        let mut sensor = VisibilitySensor::new(SensorOptions::with_threshold(0.3));
        sensor.attach(Some(REGION), &mut host);
        assert!(host.observed.is_empty());
        assert_eq!(sensor.record(&sample(1.0), &mut host), None);
        assert!(!sensor.is_visible());
    }

    #[test]
    fn detached_sensor_is_silent() {
        let mut host = RecordingHost::default();
        let mut sensor = VisibilitySensor::new(SensorOptions::with_threshold(0.3));
        sensor.attach(Some(REGION), &mut host);
        sensor.detach(&mut host);
        assert_eq!(host.unobserved, vec![REGION]);
        assert_eq!(sensor.record(&sample(1.0), &mut host), None);
    }

    #[test]
    fn ignores_samples_for_other_regions() {
        let mut host = RecordingHost::default();
        let mut sensor = VisibilitySensor::new(SensorOptions::with_threshold(0.3));
        sensor.attach(Some(REGION), &mut host);
        let other = IntersectionSample {
            target: RegionHandle(99),
            intersecting: true,
            ratio: 1.0,
        };
        assert_eq!(sensor.record(&other, &mut host), None);
    }

    #[test]
    fn reattach_releases_previous_target() {
        let mut host = RecordingHost::default();
        let mut sensor = VisibilitySensor::new(SensorOptions::with_threshold(0.3));
        sensor.attach(Some(REGION), &mut host);
        sensor.attach(Some(RegionHandle(8)), &mut host);
        assert_eq!(host.unobserved, vec![REGION]);
        assert_eq!(host.observed, vec![REGION, RegionHandle(8)]);
    }
}
