//! Latch-on-first-intersection reveal tracking.
//!
//! A [`RevealTracker`] owns the set of registered render targets and, for
//! each, a one-way "revealed" latch. The latch flips the first time the target
//! intersects the viewport by at least [`RevealOptions::threshold`] of its
//! area, and then stays set until [`reset`](RevealTracker::reset) or until the
//! target is unregistered.
//!
//! The tracker never touches the render surface. Callers read
//! [`is_revealed`](RevealTracker::is_revealed) and toggle their own classes.
//!
//! ## Resource discipline
//!
//! Registering acquires an observation from the [`ViewportObserver`];
//! unregistering releases it. Every observation still held is released when
//! the tracker is cleared or dropped, so a torn-down section leaves nothing
//! behind that could deliver late notifications.
//!
//! ## Missing platform support
//!
//! When the observer reports no intersection capability, every target reads
//! as revealed. Content is never hidden because the platform cannot tell us
//! it scrolled into view.

use super::geometry::Rect;
use super::observer::{IntersectionEntry, PollingObserver, ViewportObserver};
use std::collections::HashSet;
use std::hash::Hash;
use tracing::debug;

/// Default visible fraction for grid cells.
pub const DEFAULT_THRESHOLD: f64 = 0.1;
/// Default root margin in CSS pixels for grid cells.
pub const DEFAULT_MARGIN: f64 = 50.0;

/// When a target counts as revealed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Minimum visible fraction of the target's area, 0.0 to 1.0.
    pub threshold: f64,
    /// Pixels added around the viewport so reveals fire slightly early.
    pub margin: f64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl RevealOptions {
    /// Whether a notification satisfies this threshold.
    pub fn accepts<K>(&self, entry: &IntersectionEntry<K>) -> bool {
        entry.is_intersecting && entry.ratio >= self.threshold
    }
}

#[derive(Debug)]
pub struct RevealTracker<K, O>
where
    K: Copy + Eq + Hash,
    O: ViewportObserver<K>,
{
    options: RevealOptions,
    observer: O,
    registered: HashSet<K>,
    revealed: HashSet<K>,
}

impl<K: Copy + Eq + Hash> RevealTracker<K, PollingObserver<K>> {
    /// Tracker backed by bounding-box polling, margin taken from `options`.
    pub fn polling(options: RevealOptions) -> Self {
        Self::new(options, PollingObserver::new(options.margin))
    }

    /// Record a target's layout box for the next [`poll`](Self::poll).
    pub fn set_bounds(&mut self, target: K, rect: Rect) {
        self.observer.set_bounds(target, rect);
    }

    /// Check every registered target against `viewport`.
    ///
    /// Returns the number of targets newly revealed by this poll.
    pub fn poll(&mut self, viewport: &Rect) -> usize {
        let entries = self.observer.poll(viewport);
        self.handle_entries(entries)
    }
}

impl<K, O> RevealTracker<K, O>
where
    K: Copy + Eq + Hash,
    O: ViewportObserver<K>,
{
    pub fn new(options: RevealOptions, observer: O) -> Self {
        Self {
            options,
            observer,
            registered: HashSet::new(),
            revealed: HashSet::new(),
        }
    }

    pub fn options(&self) -> RevealOptions {
        self.options
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Begin observing `target`. No-op if it is already registered.
    pub fn register(&mut self, target: K) {
        if self.registered.insert(target) {
            self.observer.observe(target);
        }
    }

    /// Stop observing `target` and forget its latch.
    pub fn unregister(&mut self, target: K) {
        if self.registered.remove(&target) {
            self.observer.unobserve(target);
            self.revealed.remove(&target);
        }
    }

    pub fn is_registered(&self, target: K) -> bool {
        self.registered.contains(&target)
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    /// Latched status. Always `true` when intersection support is missing.
    pub fn is_revealed(&self, target: K) -> bool {
        !self.observer.is_supported() || self.revealed.contains(&target)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Clear every latch. Registrations are kept.
    pub fn reset(&mut self) {
        self.revealed.clear();
    }

    /// Release every observation and clear every latch.
    pub fn clear(&mut self) {
        for target in self.registered.drain() {
            self.observer.unobserve(target);
        }
        self.revealed.clear();
    }

    /// Apply a batch of notifications.
    ///
    /// Entries for targets that are not registered are stale and ignored.
    /// Re-observing an already revealed target is a no-op, so batch order
    /// never changes the result. Returns the number of newly revealed targets.
    pub fn handle_entries(&mut self, entries: impl IntoIterator<Item = IntersectionEntry<K>>) -> usize {
        let mut newly = 0;
        for entry in entries {
            if !self.registered.contains(&entry.target) || !self.options.accepts(&entry) {
                continue;
            }
            if self.revealed.insert(entry.target) {
                newly += 1;
            }
        }
        if newly > 0 {
            debug!(newly, total = self.revealed.len(), "targets revealed");
        }
        newly
    }
}

impl<K, O> Drop for RevealTracker<K, O>
where
    K: Copy + Eq + Hash,
    O: ViewportObserver<K>,
{
    fn drop(&mut self) {
        self.clear();
    }
}
