//! Viewport visibility tracking.
//!
//! The module is split the same way as any platform-backed subsystem:
//! - **Geometry**: pure rectangle and intersection-ratio math
//! - **Observer**: the [`ViewportObserver`] platform seam and its implementations
//! - **Tracker**: [`RevealTracker`], the latch every section and grid cell reads

pub mod geometry;
pub mod observer;
pub mod tracker;

pub use geometry::Rect;
pub use observer::{IntersectionEntry, NoIntersectionSupport, PollingObserver, ViewportObserver};
pub use tracker::{RevealOptions, RevealTracker};
