//! Testimonial carousel: index, autoplay, hover pause and swipe gestures.
//!
//! ## State
//!
//! A carousel with no testimonials holds no [`CarouselState`] and no timer,
//! and renders nothing. Otherwise `current_index` is always in `0..len`.
//!
//! ## Autoplay
//!
//! With two or more testimonials and no hover pause, one repeating timer is
//! armed on the page [`Scheduler`]. The timer is cancelled and re-armed
//! whenever the pause flag or the testimonial count changes, so at most one
//! autoplay timer exists per carousel. A firing whose id is not the live
//! timer is stale and ignored.
//!
//! ## Gestures
//!
//! ```text
//! distance = origin - current
//! distance >  threshold   → next      (leftward swipe)
//! distance < -threshold   → previous  (rightward swipe)
//! otherwise               → no change
//! ```
//!
//! The gesture is cleared after every end, whatever the outcome. An end with
//! no recorded start or move does nothing. Manual navigation (dots, swipes)
//! is always allowed, paused or not.

use crate::scheduler::{Scheduler, TimerId};
use crate::types::{Rating, Testimonial};
use maud::{Markup, html};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);
/// Minimum horizontal travel, in pixels, for a touch to count as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselOptions {
    pub autoplay_interval: Duration,
    pub swipe_threshold: f64,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarouselState {
    pub current_index: usize,
    pub paused: bool,
    pub gesture_origin: Option<f64>,
    pub gesture_current: Option<f64>,
}

/// How a finished touch gesture was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Next,
    Previous,
    None,
}

/// Classify a gesture's horizontal travel against `threshold`.
pub fn classify_swipe(origin: f64, current: f64, threshold: f64) -> Swipe {
    let distance = origin - current;
    if distance > threshold {
        Swipe::Next
    } else if distance < -threshold {
        Swipe::Previous
    } else {
        Swipe::None
    }
}

#[derive(Debug)]
pub struct Carousel {
    testimonials: Vec<Testimonial>,
    options: CarouselOptions,
    state: Option<CarouselState>,
    autoplay: Option<TimerId>,
    torn_down: bool,
}

impl Carousel {
    /// Build the carousel and arm autoplay when there is something to rotate.
    pub fn new(
        testimonials: Vec<Testimonial>,
        options: CarouselOptions,
        scheduler: &mut Scheduler,
    ) -> Self {
        let state = (!testimonials.is_empty()).then(CarouselState::default);
        let mut carousel = Self {
            testimonials,
            options,
            state,
            autoplay: None,
            torn_down: false,
        };
        carousel.rearm(scheduler);
        carousel
    }

    pub fn len(&self) -> usize {
        self.testimonials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.testimonials.is_empty()
    }

    pub fn state(&self) -> Option<&CarouselState> {
        self.state.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.current_index)
    }

    pub fn current(&self) -> Option<&Testimonial> {
        self.current_index().and_then(|i| self.testimonials.get(i))
    }

    pub fn is_paused(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.paused)
    }

    /// Live autoplay timer, if armed.
    pub fn autoplay_timer(&self) -> Option<TimerId> {
        self.autoplay
    }

    /// Dot indicators are shown only when there is more than one testimonial.
    pub fn shows_dots(&self) -> bool {
        self.len() > 1
    }

    /// Replace the testimonial list.
    ///
    /// The current index is kept when still in range, otherwise it returns
    /// to the first testimonial. Autoplay is re-armed for the new count.
    pub fn set_testimonials(&mut self, testimonials: Vec<Testimonial>, scheduler: &mut Scheduler) {
        let len = testimonials.len();
        self.testimonials = testimonials;
        self.state = match (self.state.take(), len) {
            (_, 0) => None,
            (Some(mut state), len) => {
                if state.current_index >= len {
                    state.current_index = 0;
                }
                Some(state)
            }
            (None, _) => Some(CarouselState::default()),
        };
        debug!(count = len, "carousel testimonials replaced");
        self.rearm(scheduler);
    }

    /// Autoplay firing. Returns whether the index advanced.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.autoplay != Some(id) || self.is_paused() || self.len() <= 1 {
            return false;
        }
        self.step(1);
        true
    }

    pub fn hover_enter(&mut self, scheduler: &mut Scheduler) {
        self.set_paused(true, scheduler);
    }

    pub fn hover_leave(&mut self, scheduler: &mut Scheduler) {
        self.set_paused(false, scheduler);
    }

    fn set_paused(&mut self, paused: bool, scheduler: &mut Scheduler) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.paused == paused {
            return;
        }
        state.paused = paused;
        debug!(paused, "carousel pause changed");
        self.rearm(scheduler);
    }

    pub fn touch_start(&mut self, x: f64) {
        if let Some(state) = self.state.as_mut() {
            state.gesture_origin = Some(x);
            state.gesture_current = None;
        }
    }

    pub fn touch_move(&mut self, x: f64) {
        if let Some(state) = self.state.as_mut() {
            state.gesture_current = Some(x);
        }
    }

    /// Resolve the gesture and clear it.
    pub fn touch_end(&mut self) -> Swipe {
        let threshold = self.options.swipe_threshold;
        let Some(state) = self.state.as_mut() else {
            return Swipe::None;
        };
        let origin = state.gesture_origin.take();
        let current = state.gesture_current.take();
        let swipe = match (origin, current) {
            (Some(origin), Some(current)) => classify_swipe(origin, current, threshold),
            _ => Swipe::None,
        };
        match swipe {
            Swipe::Next => self.next(),
            Swipe::Previous => self.previous(),
            Swipe::None => {}
        }
        swipe
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    /// Jump to dot `index`. Returns `false` when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        let len = self.len();
        match self.state.as_mut() {
            Some(state) if index < len => {
                state.current_index = index;
                true
            }
            _ => false,
        }
    }

    /// Cancel autoplay for good. Later hover or list changes never re-arm it;
    /// the carousel stays usable for manual navigation.
    pub fn teardown(&mut self, scheduler: &mut Scheduler) {
        self.torn_down = true;
        self.cancel_autoplay(scheduler);
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn cancel_autoplay(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.autoplay.take() {
            scheduler.cancel(id);
        }
    }

    fn step(&mut self, delta: isize) {
        let len = self.len();
        if let Some(state) = self.state.as_mut() {
            let len = len as isize;
            let next = (state.current_index as isize + delta).rem_euclid(len);
            state.current_index = next as usize;
        }
    }

    fn rearm(&mut self, scheduler: &mut Scheduler) {
        self.cancel_autoplay(scheduler);
        if !self.torn_down && self.len() > 1 && !self.is_paused() {
            self.autoplay = Some(scheduler.schedule_repeating(self.options.autoplay_interval));
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Testimonials section. Empty markup when there are no testimonials.
    pub fn render(&self, revealed: bool) -> Markup {
        let Some(current) = self.current() else {
            return html! {};
        };
        let current_index = self.current_index().unwrap_or_default();
        html! {
            section.testimonials-section id="testimonials" {
                div.testimonials-container.visible[revealed] {
                    h2.testimonials-title { "Client Testimonials" }
                    p.testimonials-subtitle {
                        "Hear from our clients about their experience and the impact our photography has made"
                    }
                    div.testimonial-carousel {
                        div.testimonial-card data-id=(current.id) {
                            div.quote-icon { "\u{201C}" }
                            p.testimonial-text { (current.testimonial_text) }
                            div.testimonial-author {
                                div.author-avatar { (current.initial()) }
                                div.author-info {
                                    p.author-name { (current.client_name) }
                                    (render_stars(current.rating))
                                }
                            }
                        }
                    }
                    @if self.shows_dots() {
                        div.testimonial-dots {
                            @for index in 0..self.len() {
                                button.dot.active[index == current_index]
                                    data-index=(index)
                                    aria-label={ "Go to testimonial " (index + 1) } {}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_stars(rating: Rating) -> Markup {
    html! {
        div.rating {
            @for star in 0..Rating::MAX {
                span.star.filled[star < rating.get()] { "★" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn carousel(n: usize, scheduler: &mut Scheduler) -> Carousel {
        Carousel::new(testimonials(n), CarouselOptions::default(), scheduler)
    }

    fn swipe(carousel: &mut Carousel, from: f64, to: f64) -> Swipe {
        carousel.touch_start(from);
        carousel.touch_move(to);
        carousel.touch_end()
    }

    /// Advance the clock and route firings the way the page dispatcher does.
    fn run(carousel: &mut Carousel, scheduler: &mut Scheduler, elapsed: Duration) -> usize {
        let fired = scheduler.advance(elapsed);
        fired.into_iter().filter(|&id| carousel.on_timer(id)).count()
    }

    #[test]
    fn autoplay_advances_and_wraps() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(3, &mut scheduler);
        assert_eq!(run(&mut c, &mut scheduler, Duration::from_millis(15_000)), 3);
        assert_eq!(c.current_index(), Some(0));
        run(&mut c, &mut scheduler, Duration::from_millis(5_000));
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn empty_carousel_has_no_state_timer_or_output() {
        let mut scheduler = Scheduler::new();
        let c = carousel(0, &mut scheduler);
        assert!(c.state().is_none());
        assert_eq!(scheduler.armed_count(), 0);
        assert!(c.render(true).into_string().is_empty());
    }

    #[test]
    fn single_testimonial_never_autoplays_or_shows_dots() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(1, &mut scheduler);
        assert_eq!(scheduler.armed_count(), 0);
        assert_eq!(run(&mut c, &mut scheduler, Duration::from_secs(60)), 0);
        assert!(!c.shows_dots());
        assert!(!c.render(true).into_string().contains("testimonial-dots"));
    }

    #[test]
    fn hover_pauses_and_resumes_with_single_timer() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(3, &mut scheduler);
        c.hover_enter(&mut scheduler);
        assert_eq!(scheduler.armed_count(), 0);
        assert_eq!(run(&mut c, &mut scheduler, Duration::from_secs(20)), 0);

        c.hover_leave(&mut scheduler);
        c.hover_leave(&mut scheduler);
        assert_eq!(scheduler.armed_count(), 1);
        assert_eq!(run(&mut c, &mut scheduler, Duration::from_millis(5_000)), 1);
    }

    #[test]
    fn stale_timer_firing_is_ignored() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(3, &mut scheduler);
        let old = c.autoplay_timer().unwrap();
        c.hover_enter(&mut scheduler);
        c.hover_leave(&mut scheduler);
        assert_ne!(c.autoplay_timer(), Some(old));
        assert!(!c.on_timer(old));
        assert_eq!(c.current_index(), Some(0));
    }

    #[test]
    fn manual_navigation_allowed_while_paused() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(4, &mut scheduler);
        c.hover_enter(&mut scheduler);
        assert!(c.select(3));
        assert_eq!(swipe(&mut c, 200.0, 140.0), Swipe::Next);
        assert_eq!(c.current_index(), Some(0));
    }

    #[test]
    fn leftward_swipe_advances() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(3, &mut scheduler);
        assert_eq!(swipe(&mut c, 200.0, 140.0), Swipe::Next);
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn rightward_swipe_goes_back_and_wraps() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(3, &mut scheduler);
        assert_eq!(swipe(&mut c, 140.0, 200.0), Swipe::Previous);
        assert_eq!(c.current_index(), Some(2));
    }

    #[test]
    fn short_swipe_is_ignored() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(3, &mut scheduler);
        assert_eq!(swipe(&mut c, 150.0, 120.0), Swipe::None);
        assert_eq!(swipe(&mut c, 150.0, 100.0), Swipe::None);
        assert_eq!(c.current_index(), Some(0));
    }

    #[test]
    fn gesture_cleared_after_end() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(3, &mut scheduler);
        swipe(&mut c, 300.0, 100.0);
        let state = c.state().unwrap();
        assert_eq!(state.gesture_origin, None);
        assert_eq!(state.gesture_current, None);

        // End with no start: no-op
        assert_eq!(c.touch_end(), Swipe::None);
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn tap_without_move_is_not_a_swipe() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(3, &mut scheduler);
        c.touch_start(300.0);
        assert_eq!(c.touch_end(), Swipe::None);
        assert_eq!(c.current_index(), Some(0));
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(2, &mut scheduler);
        assert!(!c.select(2));
        assert_eq!(c.current_index(), Some(0));
    }

    #[test]
    fn index_stays_in_range_under_mixed_operations() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(5, &mut scheduler);
        for step in 0..200usize {
            match step % 6 {
                0 => c.next(),
                1 => {
                    c.previous();
                    c.previous();
                }
                2 => {
                    c.select(step % 5);
                }
                3 => {
                    swipe(&mut c, 0.0, (step as f64) * 7.0 - 300.0);
                }
                4 => {
                    run(&mut c, &mut scheduler, Duration::from_millis(2_600));
                }
                _ => c.hover_enter(&mut scheduler),
            }
            if step % 11 == 0 {
                c.hover_leave(&mut scheduler);
            }
            let index = c.current_index().unwrap();
            assert!(index < 5, "index {index} out of range at step {step}");
            assert!(scheduler.armed_count() <= 1);
        }
    }

    #[test]
    fn shrinking_list_resets_out_of_range_index() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(5, &mut scheduler);
        c.select(4);
        c.set_testimonials(testimonials(2), &mut scheduler);
        assert_eq!(c.current_index(), Some(0));
        assert_eq!(scheduler.armed_count(), 1);

        c.set_testimonials(testimonials(1), &mut scheduler);
        assert_eq!(scheduler.armed_count(), 0);

        c.set_testimonials(Vec::new(), &mut scheduler);
        assert!(c.state().is_none());
        assert_eq!(scheduler.armed_count(), 0);
    }

    #[test]
    fn teardown_cancels_autoplay() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(3, &mut scheduler);
        c.teardown(&mut scheduler);
        assert_eq!(scheduler.armed_count(), 0);
        assert!(c.autoplay_timer().is_none());
    }

    #[test]
    fn torn_down_carousel_never_rearms() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(3, &mut scheduler);
        c.teardown(&mut scheduler);
        c.hover_enter(&mut scheduler);
        c.hover_leave(&mut scheduler);
        c.set_testimonials(testimonials(4), &mut scheduler);
        assert_eq!(scheduler.armed_count(), 0);
        assert_eq!(run(&mut c, &mut scheduler, Duration::from_secs(30)), 0);
        assert_eq!(c.current_index(), Some(0));

        // Manual navigation still works
        c.next();
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn render_marks_active_dot_and_stars() {
        let mut scheduler = Scheduler::new();
        let mut c = carousel(3, &mut scheduler);
        c.select(1);
        let html = c.render(false).into_string();
        assert!(html.contains(r#"class="dot active" data-index="1""#));
        assert!(html.contains(r#"aria-label="Go to testimonial 3""#));
        assert!(html.contains(r#"class="testimonials-container""#));
        assert_eq!(html.matches(r#"class="star filled""#).count(), 4);
        assert_eq!(html.matches(r#"class="star""#).count(), 1);
    }
}
