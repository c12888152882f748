//! # Simple Folio
//!
//! The view-state engine behind a single-page photography portfolio: a hero
//! banner, a filterable photo grid with a full-screen lightbox, an about
//! section, a rotating testimonial carousel, and a contact form that posts to
//! a remote service.
//!
//! # Architecture: Data In, Events Through
//!
//! ```text
//! 1. Load      ApiClient  →  PortfolioData     (three concurrent GETs, all-or-nothing)
//! 2. Build     Page::new  →  grid, carousel, sections, form, timers
//! 3. Interact  Event      →  Page::dispatch    (run to completion, one event at a time)
//! ```
//!
//! Data flows down exactly once: the page hands immutable photo and
//! testimonial lists to the grid and carousel, which own all further
//! interaction state. The only thing that flows back out is a contact
//! submission.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Service records (`Photo`, `Testimonial`, `About`), categories, ratings, fallbacks |
//! | [`viewport`] | Visibility geometry, the observer seam, and the latching `RevealTracker` |
//! | [`scheduler`] | Virtual-clock timer queue shared by every component on the page |
//! | [`grid`] | Category filter, per-cell reveals, and the exclusive lightbox |
//! | [`carousel`] | Testimonial index, autoplay, hover pause, and swipe gestures |
//! | [`contact`] | Contact form submission state machine |
//! | [`client`] | Async HTTP client for the remote portfolio service |
//! | [`page`] | Page container, event dispatcher, hero and about sections |
//! | [`config`] | `config.toml` loading, validation, merging, and environment override |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## No Real Clock, No Real DOM
//!
//! Components never sleep, spawn, or query layout. Timers live on a
//! [`scheduler::Scheduler`] whose clock only moves when the host says so, and
//! visibility comes either from layout boxes fed to a polling observer or
//! from notifications a host-side observer delivers. Every interaction
//! sequence, including the awkward ones (a category switch racing a late
//! visibility notification, a hover landing between two autoplay ticks), is
//! reproducible in a plain `#[test]`.
//!
//! ## Stale Callbacks Are Identified, Not Raced
//!
//! Anything that can arrive late carries an identity the receiver can check.
//! Grid cells are keyed by `(epoch, index)` and a filter change starts a new
//! epoch; timers are `TimerId`s and an owner ignores any id that is not its
//! live one. Nothing needs a lock or a cancellation token.
//!
//! ## Maud for Markup
//!
//! Each component renders itself with [Maud](https://maud.lambda.xyz/). The
//! markup carries state as class toggles (`active`, `visible`) and `data-*`
//! attributes only; styling is somebody else's problem.

pub mod carousel;
pub mod client;
pub mod config;
pub mod contact;
pub mod grid;
pub mod output;
pub mod page;
pub mod scheduler;
pub mod types;
pub mod viewport;

#[cfg(test)]
pub(crate) mod test_helpers;
