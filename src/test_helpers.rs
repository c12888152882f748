//! Shared test utilities for the simple-folio test suite.
//!
//! Fixture builders for service records and layout boxes, so component tests
//! read as scenarios rather than struct literals.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut grid = PhotoGrid::polling(mixed_photos(), RevealOptions::default());
//! grid.set_cell_bounds(0, rect_at(0.0));
//! grid.poll(&viewport());
//! assert!(grid.is_revealed(0));
//! ```

use crate::types::{About, Category, Photo, Rating, Testimonial};
use crate::viewport::Rect;

// =========================================================================
// Service records
// =========================================================================

/// A non-featured photo whose fields are derived from `id`.
pub fn photo(id: &str, category: Category) -> Photo {
    Photo {
        id: id.to_string(),
        title: format!("Photo {id}"),
        category,
        image_data: format!("data:image/jpeg;base64,{id}"),
        description: format!("Description of {id}"),
        featured: false,
    }
}

/// Seven photos covering every category, interleaved.
///
/// Portrait: 3, Wedding: 2, Landscape: 1, Commercial: 1.
pub fn mixed_photos() -> Vec<Photo> {
    use Category::*;
    vec![
        photo("p1", Portrait),
        photo("w1", Wedding),
        photo("p2", Portrait),
        photo("l1", Landscape),
        photo("c1", Commercial),
        photo("w2", Wedding),
        photo("p3", Portrait),
    ]
}

/// A four-star testimonial.
pub fn testimonial(id: &str, client_name: &str) -> Testimonial {
    Testimonial {
        id: id.to_string(),
        client_name: client_name.to_string(),
        testimonial_text: format!("Testimonial {id}"),
        rating: Rating::try_from(4_i64).unwrap(),
    }
}

/// `n` four-star testimonials with ids `t0..tn`.
pub fn testimonials(n: usize) -> Vec<Testimonial> {
    (0..n)
        .map(|i| testimonial(&format!("t{i}"), &format!("Client {i}")))
        .collect()
}

pub fn about() -> About {
    About {
        photographer_name: "Jane Doe".to_string(),
        tagline: "Light and Shadow".to_string(),
        bio_text: "I photograph **people**.\n\nBased in Lisbon.".to_string(),
        portrait_image: "data:image/jpeg;base64,portrait".to_string(),
    }
}

// =========================================================================
// Layout
// =========================================================================

/// A 300x400 cell box at vertical offset `y`.
pub fn rect_at(y: f64) -> Rect {
    Rect::new(0.0, y, 300.0, 400.0)
}

/// A 1000x800 viewport at the top of the page.
pub fn viewport() -> Rect {
    Rect::new(0.0, 0.0, 1000.0, 800.0)
}
