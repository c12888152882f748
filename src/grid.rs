//! Filterable photo grid with an exclusive lightbox.
//!
//! [`PhotoGrid`] owns the selected category, the derived list of visible
//! photos, the per-cell reveal latches (through a [`RevealTracker`]) and the
//! single lightbox slot.
//!
//! ## Cells and epochs
//!
//! A rendered cell is identified by its position in the *current* filtered
//! collection. Positions are reused across filters (cell 0 under "Portrait"
//! is a different photo from cell 0 under "All"), so every cell key carries
//! the collection's epoch. Changing the filter bumps the epoch, releases the
//! previous epoch's observations, and registers the new cells. A late
//! notification for a previous-epoch cell finds no registration and is
//! dropped instead of revealing whatever photo now sits at that position.
//!
//! ## Lightbox
//!
//! At most one photo is open. Opening another replaces it. A filter change
//! keeps the open photo if it is still visible under the new filter and
//! closes it otherwise. Clicks on the lightbox are classified by
//! [`LightboxRegion`]: backdrop and close button dismiss, content does not.

use crate::types::{CategoryFilter, Photo};
use crate::viewport::{
    IntersectionEntry, PollingObserver, Rect, RevealOptions, RevealTracker, ViewportObserver,
};
use maud::{Markup, html};
use tracing::debug;

/// A rendered grid cell: position within the collection of one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub epoch: u64,
    pub index: usize,
}

/// The grid's user-facing selection state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridSelection {
    pub selected_category: CategoryFilter,
    pub lightbox_photo: Option<Photo>,
}

/// Where a click on the open lightbox landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxRegion {
    Backdrop,
    CloseButton,
    /// The image and caption. Clicks here are contained.
    Content,
}

/// Photos matching `filter`, in original order.
pub fn filter_photos(photos: &[Photo], filter: CategoryFilter) -> Vec<&Photo> {
    photos.iter().filter(|p| filter.matches(p.category)).collect()
}

#[derive(Debug)]
pub struct PhotoGrid<O = PollingObserver<CellKey>>
where
    O: ViewportObserver<CellKey>,
{
    photos: Vec<Photo>,
    selection: GridSelection,
    /// Indices into `photos` of the visible subset, in original order.
    visible: Vec<usize>,
    epoch: u64,
    reveal: RevealTracker<CellKey, O>,
}

impl PhotoGrid<PollingObserver<CellKey>> {
    /// Grid with a bounding-box polling tracker.
    pub fn polling(photos: Vec<Photo>, options: RevealOptions) -> Self {
        Self::new(photos, RevealTracker::polling(options))
    }

    /// Record the layout box of visible cell `index`.
    pub fn set_cell_bounds(&mut self, index: usize, rect: Rect) {
        if let Some(key) = self.cell_key(index) {
            self.reveal.set_bounds(key, rect);
        }
    }

    /// Check every current cell against `viewport`. Returns newly revealed count.
    pub fn poll(&mut self, viewport: &Rect) -> usize {
        self.reveal.poll(viewport)
    }
}

impl<O: ViewportObserver<CellKey>> PhotoGrid<O> {
    /// Build the grid showing all photos and register every cell.
    pub fn new(photos: Vec<Photo>, reveal: RevealTracker<CellKey, O>) -> Self {
        let mut grid = Self {
            photos,
            selection: GridSelection::default(),
            visible: Vec::new(),
            epoch: 0,
            reveal,
        };
        grid.rebuild_cells();
        grid
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn selection(&self) -> &GridSelection {
        &self.selection
    }

    pub fn selected_category(&self) -> CategoryFilter {
        self.selection.selected_category
    }

    pub fn lightbox_photo(&self) -> Option<&Photo> {
        self.selection.lightbox_photo.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn reveal(&self) -> &RevealTracker<CellKey, O> {
        &self.reveal
    }

    /// Photos rendered under the current filter, in original order.
    pub fn visible_photos(&self) -> Vec<&Photo> {
        self.visible.iter().map(|&i| &self.photos[i]).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Key of visible cell `index` in the current epoch.
    pub fn cell_key(&self, index: usize) -> Option<CellKey> {
        (index < self.visible.len()).then_some(CellKey {
            epoch: self.epoch,
            index,
        })
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.cell_key(index)
            .is_some_and(|key| self.reveal.is_revealed(key))
    }

    /// Select a category.
    ///
    /// Always starts a new cell epoch: every latch is cleared and the cells
    /// are re-registered, even when re-selecting the current category. The
    /// lightbox survives only if its photo is still visible.
    pub fn set_category(&mut self, filter: CategoryFilter) {
        debug!(from = ?self.selection.selected_category, to = ?filter, "grid category changed");
        self.selection.selected_category = filter;
        self.rebuild_cells();
        self.retain_lightbox();
    }

    /// Replace the source photo list.
    ///
    /// Treated as a collection change: latches reset and cells re-register.
    /// An open lightbox stays open, refreshed to the new record, only if a
    /// photo with the same id is still visible.
    pub fn replace_photos(&mut self, photos: Vec<Photo>) {
        debug!(count = photos.len(), "grid photos replaced");
        self.photos = photos;
        self.rebuild_cells();
        self.retain_lightbox();
    }

    /// Open `photo` in the lightbox, replacing any open photo.
    ///
    /// Returns `false` when the same photo is already open.
    pub fn open_lightbox(&mut self, photo: &Photo) -> bool {
        if self
            .selection
            .lightbox_photo
            .as_ref()
            .is_some_and(|open| open.id == photo.id)
        {
            return false;
        }
        debug!(id = %photo.id, "lightbox opened");
        self.selection.lightbox_photo = Some(photo.clone());
        true
    }

    /// Open the photo in visible cell `index`. Returns `false` if out of range.
    pub fn open_cell(&mut self, index: usize) -> bool {
        match self.visible.get(index) {
            Some(&i) => {
                let photo = self.photos[i].clone();
                self.open_lightbox(&photo);
                true
            }
            None => false,
        }
    }

    pub fn close_lightbox(&mut self) {
        if self.selection.lightbox_photo.take().is_some() {
            debug!("lightbox closed");
        }
    }

    /// Route a click on the open lightbox. Returns whether it closed.
    pub fn click_lightbox(&mut self, region: LightboxRegion) -> bool {
        match region {
            LightboxRegion::Backdrop | LightboxRegion::CloseButton => {
                let was_open = self.selection.lightbox_photo.is_some();
                self.close_lightbox();
                was_open
            }
            LightboxRegion::Content => false,
        }
    }

    /// Apply intersection notifications for grid cells.
    pub fn handle_intersections(
        &mut self,
        entries: impl IntoIterator<Item = IntersectionEntry<CellKey>>,
    ) -> usize {
        self.reveal.handle_entries(entries)
    }

    /// Release every cell observation.
    pub fn teardown(&mut self) {
        self.reveal.clear();
    }

    fn rebuild_cells(&mut self) {
        self.reveal.clear();
        self.epoch += 1;
        let filter = self.selection.selected_category;
        self.visible = self
            .photos
            .iter()
            .enumerate()
            .filter(|(_, p)| filter.matches(p.category))
            .map(|(i, _)| i)
            .collect();
        for index in 0..self.visible.len() {
            self.reveal.register(CellKey {
                epoch: self.epoch,
                index,
            });
        }
    }

    fn retain_lightbox(&mut self) {
        let Some(open_id) = self.selection.lightbox_photo.as_ref().map(|p| p.id.clone()) else {
            return;
        };
        let current = self
            .visible
            .iter()
            .map(|&i| &self.photos[i])
            .find(|p| p.id == open_id)
            .cloned();
        if current.is_none() {
            debug!(id = %open_id, "lightbox photo filtered out, closing");
        }
        self.selection.lightbox_photo = current;
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Filter pills, masonry cells and, when open, the lightbox overlay.
    pub fn render(&self) -> Markup {
        let selected = self.selection.selected_category;
        html! {
            section.gallery-section id="gallery" {
                div.gallery-container {
                    h2.gallery-title { "Portfolio Gallery" }
                    p.gallery-subtitle {
                        "Explore our diverse collection of photographic works spanning various styles and subjects"
                    }
                    div.category-filters {
                        @for filter in CategoryFilter::OPTIONS {
                            button.filter-pill.active[filter == selected] data-category=(filter_value(filter)) {
                                (filter.label())
                            }
                        }
                    }
                    div.masonry-grid {
                        @for (index, photo) in self.visible_photos().into_iter().enumerate() {
                            div.photo-card.visible[self.is_revealed(index)] data-cell=(index) {
                                img.photo-image src=(photo.image_data) alt=(photo.title) loading="lazy";
                                div.photo-overlay {
                                    h3.photo-title { (photo.title) }
                                    p.photo-category { (photo.category.as_str()) }
                                }
                            }
                        }
                    }
                }
                @if let Some(photo) = &self.selection.lightbox_photo {
                    (render_lightbox(photo))
                }
            }
        }
    }
}

fn filter_value(filter: CategoryFilter) -> &'static str {
    match filter {
        CategoryFilter::All => "all",
        CategoryFilter::Only(c) => c.as_str(),
    }
}

fn render_lightbox(photo: &Photo) -> Markup {
    html! {
        div.lightbox data-region="backdrop" {
            button.lightbox-close data-region="close" aria-label="Close" { "×" }
            div.lightbox-content data-region="content" {
                img src=(photo.image_data) alt=(photo.title);
                div.lightbox-info {
                    h3 { (photo.title) }
                    p { (photo.description) }
                }
            }
        }
    }
}
