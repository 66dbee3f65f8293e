pub mod geometry;
pub mod poller;
pub mod sensor;

pub use geometry::{Intersection, MarginLength, MarginParseError, Rect, RootMargin, intersect};
pub use poller::GeometryPoller;
pub use sensor::{IntersectionSample, ObserverHost, RegionHandle, SensorOptions, VisibilitySensor};
