//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is a content inventory: every entity leads with its positional
//! index and title, and secondary facts (description, rating, flags) follow
//! as indented context lines. Wire ids and image payloads are never printed;
//! image data is usually an inline data URI and would flood the terminal.
//!
//! # Output Format
//!
//! ## Fetch
//!
//! ```text
//! Photos
//! Portrait (2 photos)
//!     001 Golden Hour
//!         Description: Natural light session in the park
//!     002 Studio Classic
//! Wedding (1 photos)
//!     001 First Dance
//!         Featured
//!
//! Testimonials
//! 001 Sarah Johnson ★★★★★
//!     "An amazing experience from start to finish..."
//!
//! About
//!     Name: Jane Doe
//!     Tagline: Light and Shadow
//!     Bio: I photograph people.
//! ```
//!
//! ## Contact
//!
//! ```text
//! Thank you for your inquiry! I'll get back to you soon.
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::contact::ContactForm;
use crate::types::{Category, PortfolioData, Rating, Testimonial};

const DESCRIPTION_MAX: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Five stars, the first `rating` filled.
fn stars(rating: Rating) -> String {
    (0..Rating::MAX)
        .map(|i| if i < rating.get() { '★' } else { '☆' })
        .collect()
}

fn testimonial_lines(index: usize, testimonial: &Testimonial) -> Vec<String> {
    vec![
        format!(
            "{} {} {}",
            format_index(index),
            testimonial.client_name,
            stars(testimonial.rating)
        ),
        format!(
            "{}\"{}\"",
            indent(1),
            truncate_desc(&testimonial.testimonial_text, DESCRIPTION_MAX)
        ),
    ]
}

// ============================================================================
// Fetch output
// ============================================================================

/// Format the fetched portfolio as an inventory.
///
/// Photos are grouped by category in filter order; empty categories are
/// skipped. Fallback values are shown for missing about content.
pub fn format_portfolio(data: &PortfolioData) -> Vec<String> {
    let mut lines = vec!["Photos".to_string()];
    if data.photos.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for category in Category::ALL {
        let photos: Vec<_> = data.photos.iter().filter(|p| p.category == category).collect();
        if photos.is_empty() {
            continue;
        }
        lines.push(format!("{} ({} photos)", category.label(), photos.len()));
        for (i, photo) in photos.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), photo.title));
            if photo.featured {
                lines.push(format!("{}Featured", indent(2)));
            }
            if !photo.description.is_empty() {
                lines.push(format!(
                    "{}Description: {}",
                    indent(2),
                    truncate_desc(&photo.description, DESCRIPTION_MAX)
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push("Testimonials".to_string());
    if data.testimonials.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, testimonial) in data.testimonials.iter().enumerate() {
        lines.extend(testimonial_lines(i + 1, testimonial));
    }

    lines.push(String::new());
    lines.push("About".to_string());
    if data.about.is_none() {
        lines.push(format!("{}(not loaded, showing defaults)", indent(1)));
    }
    lines.push(format!("{}Name: {}", indent(1), data.photographer_name()));
    lines.push(format!("{}Tagline: {}", indent(1), data.tagline()));
    lines.push(format!(
        "{}Bio: {}",
        indent(1),
        truncate_desc(data.bio(), DESCRIPTION_MAX)
    ));
    lines
}

pub fn print_portfolio(data: &PortfolioData) {
    for line in format_portfolio(data) {
        println!("{}", line);
    }
}

// ============================================================================
// Contact output
// ============================================================================

/// The form's status message, or nothing when no submission resolved.
pub fn format_contact_status(form: &ContactForm) -> Vec<String> {
    form.status()
        .map(|status| vec![status.message().to_string()])
        .unwrap_or_default()
}

pub fn print_contact_status(form: &ContactForm) {
    for line in format_contact_status(form) {
        println!("{}", line);
    }
}
