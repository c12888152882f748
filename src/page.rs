//! Page container and event dispatcher.
//!
//! [`Page`] owns everything the portfolio page shows once data has arrived:
//! the fetched records, the [`PhotoGrid`], the [`Carousel`], the section
//! reveal latches, the [`ContactForm`], and the one [`Scheduler`] every timer
//! lives on. Components never reach into each other; the page hands them
//! immutable data at construction and routes events afterwards.
//!
//! ## Run to completion
//!
//! All input arrives as an [`Event`] through [`Page::dispatch`]. Each event
//! is handled completely before the next one is looked at. Time is an event
//! too: [`Event::Tick`] drains due timers one at a time, routing each id to
//! its owner before asking the scheduler for the next, so a handler that
//! cancels a timer stops it within the same tick.
//!
//! ```text
//! host loop ──Event──▶ Page::dispatch ─┬─▶ PhotoGrid   (filter, lightbox, cell reveals)
//!                                      ├─▶ Carousel    (hover, touch, dots, autoplay)
//!                                      ├─▶ sections    (about / testimonials / contact reveals)
//!                                      ├─▶ hero        (one-shot fade-in timer)
//!                                      └─▶ ContactForm (field edits)
//! ```
//!
//! Contact submission is the only operation that awaits I/O, so it has its
//! own entry points instead of an event.

use crate::carousel::{Carousel, Swipe};
use crate::client::{ApiClient, ServiceError};
use crate::config::FolioConfig;
use crate::contact::{ContactError, ContactField, ContactForm};
use crate::grid::{CellKey, LightboxRegion, PhotoGrid};
use crate::scheduler::{Scheduler, TimerId};
use crate::types::{CategoryFilter, ContactSubmission, PLACEHOLDER_PORTRAIT_IMAGE, PortfolioData};
use crate::viewport::{IntersectionEntry, PollingObserver, Rect, RevealTracker};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Event as MdEvent, Parser, html as md_html};
use std::time::Duration;
use tracing::debug;

/// Fraction of scroll distance applied to the about image.
pub const PARALLAX_FACTOR: f64 = 0.3;
/// Delay before the hero content fades in.
pub const HERO_FADE_DELAY: Duration = Duration::from_millis(100);

/// Vertical offset, in pixels, of the about image for the current scroll.
///
/// Negative above the section, zero when the section top is at the top of
/// the viewport.
pub fn parallax_offset(scroll_y: f64, section_top: f64) -> f64 {
    (scroll_y - section_top) * PARALLAX_FACTOR
}

/// Page sections that reveal on scroll as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Testimonials,
    Contact,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::About, Section::Testimonials, Section::Contact];
}

/// Input routed through [`Page::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Virtual time passed.
    Tick(Duration),
    /// The viewport moved. `viewport.y` is the scroll position.
    Scroll(Rect),
    /// Layout box of visible grid cell `index`.
    CellLayout { index: usize, rect: Rect },
    /// Layout box of a section root.
    SectionLayout { section: Section, rect: Rect },
    /// Notifications from a host-side observer for grid cells.
    CellIntersections(Vec<IntersectionEntry<CellKey>>),
    /// Notifications from a host-side observer for section roots.
    SectionIntersections(Vec<IntersectionEntry<Section>>),
    SelectCategory(CategoryFilter),
    /// Click on visible grid cell `index`.
    OpenPhoto(usize),
    LightboxClick(LightboxRegion),
    CarouselHoverEnter,
    CarouselHoverLeave,
    TouchStart(f64),
    TouchMove(f64),
    TouchEnd,
    /// Click on carousel dot `index`.
    SelectTestimonial(usize),
    ContactInput { field: ContactField, value: String },
}

pub struct Page {
    data: PortfolioData,
    grid: PhotoGrid,
    carousel: Carousel,
    sections: RevealTracker<Section, PollingObserver<Section>>,
    contact: ContactForm,
    scheduler: Scheduler,
    hero_timer: Option<TimerId>,
    hero_visible: bool,
    scroll_y: f64,
    about_top: f64,
    torn_down: bool,
}

impl Page {
    /// Build the page from fetched data and arm the initial timers.
    pub fn new(data: PortfolioData, config: &FolioConfig) -> Self {
        let mut scheduler = Scheduler::new();
        let hero_timer = Some(scheduler.schedule_once(HERO_FADE_DELAY));
        let grid = PhotoGrid::polling(data.photos.clone(), config.reveal.cell_options());
        let carousel = Carousel::new(
            data.testimonials.clone(),
            config.carousel.options(),
            &mut scheduler,
        );
        let mut sections = RevealTracker::polling(config.reveal.section_options());
        for section in Section::ALL {
            sections.register(section);
        }
        Self {
            data,
            grid,
            carousel,
            sections,
            contact: ContactForm::new(),
            scheduler,
            hero_timer,
            hero_visible: false,
            scroll_y: 0.0,
            about_top: 0.0,
            torn_down: false,
        }
    }

    /// Fetch everything and build the page. A failed load yields a page of
    /// fallbacks.
    pub async fn load(client: &ApiClient, config: &FolioConfig) -> Self {
        Self::new(client.load_portfolio_or_empty().await, config)
    }

    pub fn data(&self) -> &PortfolioData {
        &self.data
    }

    pub fn grid(&self) -> &PhotoGrid {
        &self.grid
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn hero_visible(&self) -> bool {
        self.hero_visible
    }

    pub fn is_section_revealed(&self, section: Section) -> bool {
        self.sections.is_revealed(section)
    }

    /// Current about image offset.
    pub fn parallax(&self) -> f64 {
        parallax_offset(self.scroll_y, self.about_top)
    }

    /// Route one event. Everything is ignored after [`teardown`](Self::teardown).
    pub fn dispatch(&mut self, event: Event) {
        if self.torn_down {
            debug!(?event, "ignoring event after teardown");
            return;
        }
        match event {
            Event::Tick(elapsed) => self.tick(elapsed),
            Event::Scroll(viewport) => {
                self.scroll_y = viewport.y;
                self.grid.poll(&viewport);
                self.sections.poll(&viewport);
            }
            Event::CellLayout { index, rect } => self.grid.set_cell_bounds(index, rect),
            Event::SectionLayout { section, rect } => {
                if section == Section::About {
                    self.about_top = rect.y;
                }
                self.sections.set_bounds(section, rect);
            }
            Event::CellIntersections(entries) => {
                self.grid.handle_intersections(entries);
            }
            Event::SectionIntersections(entries) => {
                self.sections.handle_entries(entries);
            }
            Event::SelectCategory(filter) => self.grid.set_category(filter),
            Event::OpenPhoto(index) => {
                self.grid.open_cell(index);
            }
            Event::LightboxClick(region) => {
                self.grid.click_lightbox(region);
            }
            Event::CarouselHoverEnter => self.carousel.hover_enter(&mut self.scheduler),
            Event::CarouselHoverLeave => self.carousel.hover_leave(&mut self.scheduler),
            Event::TouchStart(x) => self.carousel.touch_start(x),
            Event::TouchMove(x) => self.carousel.touch_move(x),
            Event::TouchEnd => {
                if self.carousel.touch_end() != Swipe::None {
                    debug!(index = ?self.carousel.current_index(), "carousel swiped");
                }
            }
            Event::SelectTestimonial(index) => {
                self.carousel.select(index);
            }
            Event::ContactInput { field, value } => {
                self.contact.set_field(field, value);
            }
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        let deadline = self.scheduler.now() + elapsed;
        while let Some(id) = self.scheduler.pop_due(deadline) {
            if self.hero_timer == Some(id) {
                self.hero_timer = None;
                self.hero_visible = true;
                debug!("hero faded in");
            } else if !self.carousel.on_timer(id) {
                debug!(?id, "ignoring stale timer");
            }
        }
        self.scheduler.advance_to(deadline);
    }

    /// Start a contact submission. Pair with [`finish_contact`](Self::finish_contact).
    pub fn begin_contact_submit(&mut self) -> Result<ContactSubmission, ContactError> {
        self.contact.begin_submit()
    }

    pub fn finish_contact(&mut self, outcome: Result<(), ServiceError>) {
        self.contact.finish(outcome);
    }

    /// Validate, post, and record the outcome of a contact inquiry.
    ///
    /// Service failures are recorded on the form, not returned.
    pub async fn submit_contact(&mut self, client: &ApiClient) -> Result<(), ContactError> {
        let submission = self.begin_contact_submit()?;
        let outcome = client.submit_contact(&submission).await;
        self.finish_contact(outcome);
        Ok(())
    }

    /// Cancel every timer and release every observation. Idempotent.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.grid.teardown();
        self.carousel.teardown(&mut self.scheduler);
        self.sections.clear();
        if let Some(id) = self.hero_timer.take() {
            self.scheduler.cancel(id);
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub fn render(&self) -> Markup {
        let title = format!("{} Photography", self.data.photographer_name());
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (title) }
                }
                body {
                    (self.render_hero())
                    (self.grid.render())
                    (self.render_about())
                    (self.carousel.render(self.is_section_revealed(Section::Testimonials)))
                    (self.contact.render(self.is_section_revealed(Section::Contact)))
                    footer.site-footer {
                        p { "© " (self.data.photographer_name()) " Photography" }
                    }
                }
            }
        }
    }

    fn render_hero(&self) -> Markup {
        let background = format!("background-image: url(\"{}\")", self.data.hero_image());
        html! {
            section.hero-section id="home" style=(background) {
                div.hero-overlay {}
                div.hero-content.visible[self.hero_visible] {
                    h1.hero-title { (self.data.photographer_name()) }
                    p.hero-tagline { (self.data.tagline()) }
                    a.hero-cta href="#gallery" { "View Portfolio" }
                }
            }
        }
    }

    fn render_about(&self) -> Markup {
        let portrait = self
            .data
            .about
            .as_ref()
            .map(|a| a.portrait_image.as_str())
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(PLACEHOLDER_PORTRAIT_IMAGE);
        let transform = format!("transform: translateY({}px)", self.parallax());

        let mut bio_html = String::new();
        md_html::push_html(&mut bio_html, bio_events(self.data.bio()));

        html! {
            section.about-section id="about" {
                div.about-container.visible[self.is_section_revealed(Section::About)] {
                    div.about-image-wrapper {
                        img.about-image src=(portrait) alt=(self.data.photographer_name()) style=(transform);
                    }
                    div.about-content {
                        h2.about-title { "About" }
                        h3.about-name { (self.data.photographer_name()) }
                        div.about-bio { (PreEscaped(bio_html)) }
                    }
                }
            }
        }
    }
}

/// Markdown events for remote bio text. Raw HTML is demoted to text so it
/// renders escaped.
fn bio_events(bio: &str) -> impl Iterator<Item = MdEvent<'_>> {
    Parser::new(bio).map(|event| match event {
        MdEvent::Html(raw) | MdEvent::InlineHtml(raw) => MdEvent::Text(raw),
        other => other,
    })
}
