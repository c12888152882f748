//! Platform seam for viewport-intersection notifications.
//!
//! The [`ViewportObserver`] trait is what a [`RevealTracker`] acquires and
//! releases observations through. Two implementations ship with the crate:
//!
//! | Observer | Behaviour |
//! |---|---|
//! | [`PollingObserver`] | Keeps a bounding box per target and reports intersections when polled with the current viewport |
//! | [`NoIntersectionSupport`] | Reports the capability as missing; trackers fail open |
//!
//! A browser binding would wrap a native intersection API behind the same
//! trait and forward its callbacks as [`IntersectionEntry`] batches.
//!
//! [`RevealTracker`]: super::RevealTracker

use super::geometry::{Rect, intersection_ratio};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// One intersection notification for one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry<K> {
    pub target: K,
    /// Visible fraction of the target's area, 0.0 to 1.0.
    pub ratio: f64,
    /// Whether the target touches the (margin-expanded) root at all.
    pub is_intersecting: bool,
}

impl<K> IntersectionEntry<K> {
    pub fn intersecting(target: K, ratio: f64) -> Self {
        Self {
            target,
            ratio,
            is_intersecting: true,
        }
    }

    pub fn outside(target: K) -> Self {
        Self {
            target,
            ratio: 0.0,
            is_intersecting: false,
        }
    }
}

/// Observation handle owned by a tracker.
pub trait ViewportObserver<K> {
    /// Whether the platform can report intersections at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Start delivering notifications for `target`.
    fn observe(&mut self, target: K);

    /// Stop delivering notifications for `target`.
    fn unobserve(&mut self, target: K);
}

/// Bounding-box polling observer.
///
/// Callers feed target bounds with [`set_bounds`](Self::set_bounds) whenever
/// layout changes, then [`poll`](Self::poll) with the viewport rectangle on
/// scroll or resize. Bounds for unobserved targets are dropped.
#[derive(Debug)]
pub struct PollingObserver<K> {
    margin: f64,
    observed: HashSet<K>,
    bounds: HashMap<K, Rect>,
}

impl<K: Copy + Eq + Hash> PollingObserver<K> {
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            observed: HashSet::new(),
            bounds: HashMap::new(),
        }
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Record a target's layout box. Ignored unless the target is observed.
    pub fn set_bounds(&mut self, target: K, rect: Rect) {
        if self.observed.contains(&target) {
            self.bounds.insert(target, rect);
        }
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Compute one entry per observed target with known bounds.
    pub fn poll(&self, viewport: &Rect) -> Vec<IntersectionEntry<K>> {
        self.bounds
            .iter()
            .filter(|(target, _)| self.observed.contains(target))
            .map(|(&target, rect)| match intersection_ratio(rect, viewport, self.margin) {
                Some(ratio) => IntersectionEntry::intersecting(target, ratio),
                None => IntersectionEntry::outside(target),
            })
            .collect()
    }
}

impl<K: Copy + Eq + Hash> ViewportObserver<K> for PollingObserver<K> {
    fn observe(&mut self, target: K) {
        self.observed.insert(target);
    }

    fn unobserve(&mut self, target: K) {
        self.observed.remove(&target);
        self.bounds.remove(&target);
    }
}

/// Platform without intersection reporting.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIntersectionSupport;

impl<K> ViewportObserver<K> for NoIntersectionSupport {
    fn is_supported(&self) -> bool {
        false
    }

    fn observe(&mut self, _target: K) {}

    fn unobserve(&mut self, _target: K) {}
}
