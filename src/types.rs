//! Portfolio data shared by every section.
//!
//! These records are fetched once from the remote service and handed down to
//! the grid and carousel as immutable collections. Field names follow the
//! service's camelCase JSON; keys the service adds (`order`, `createdAt`, ...)
//! are ignored on deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name shown in the hero and about sections when no about record exists.
pub const DEFAULT_PHOTOGRAPHER_NAME: &str = "Your Name";
/// Hero tagline fallback.
pub const DEFAULT_TAGLINE: &str = "Capturing Life's Beautiful Moments";
/// About bio fallback.
pub const DEFAULT_BIO: &str = "Professional photographer capturing moments that matter. \
With years of experience and a passion for visual storytelling, I create images \
that resonate with emotion and authenticity.";
/// Dark 1920x1080 placeholder used when no photo is featured.
pub const PLACEHOLDER_HERO_IMAGE: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='1920' height='1080'%3E%3Crect fill='%23171717' width='1920' height='1080'/%3E%3C/svg%3E";
/// Dark 600x800 placeholder for the about portrait.
pub const PLACEHOLDER_PORTRAIT_IMAGE: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='600' height='800'%3E%3Crect fill='%23262626' width='600' height='800'/%3E%3C/svg%3E";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category '{0}' (expected all, portrait, wedding, landscape or commercial)")]
pub struct CategoryParseError(pub String);

/// The fixed set of photo categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Portrait,
    Wedding,
    Landscape,
    Commercial,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Portrait,
        Category::Wedding,
        Category::Landscape,
        Category::Commercial,
    ];

    /// Wire name, as sent by the service (`"portrait"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Portrait => "portrait",
            Category::Wedding => "wedding",
            Category::Landscape => "landscape",
            Category::Commercial => "commercial",
        }
    }

    /// Display label for filter controls (`"Portrait"`).
    pub fn label(self) -> &'static str {
        match self {
            Category::Portrait => "Portrait",
            Category::Wedding => "Wedding",
            Category::Landscape => "Landscape",
            Category::Commercial => "Commercial",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Grid filter selection: everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Filter controls in display order.
    pub const OPTIONS: [CategoryFilter; 5] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Portrait),
        CategoryFilter::Only(Category::Wedding),
        CategoryFilter::Only(Category::Landscape),
        CategoryFilter::Only(Category::Commercial),
    ];

    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.label(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// A portfolio photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub title: String,
    pub category: Category,
    /// Image reference: a URL or a `data:` URI.
    pub image_data: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
}

/// The hero image: first photo flagged as featured, if any.
pub fn featured_photo(photos: &[Photo]) -> Option<&Photo> {
    photos.iter().find(|p| p.featured)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("rating {0} is outside 0-5")]
pub struct RatingError(pub i64);

/// Star rating, 0 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if v <= Self::MAX => Ok(Rating(v)),
            _ => Err(RatingError(value)),
        }
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        i64::from(rating.0)
    }
}

/// A client testimonial. Sequence order is carousel order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub client_name: String,
    pub testimonial_text: String,
    pub rating: Rating,
}

impl Testimonial {
    /// Avatar initial: first character of the client name, uppercased.
    pub fn initial(&self) -> String {
        self.client_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Photographer profile for the hero and about sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    #[serde(default)]
    pub photographer_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub bio_text: String,
    #[serde(default)]
    pub portrait_image: String,
}

/// Body of the contact write endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

/// Everything the page container fetches before building the sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioData {
    pub photos: Vec<Photo>,
    pub testimonials: Vec<Testimonial>,
    pub about: Option<About>,
}

impl PortfolioData {
    /// Photographer name, falling back when the record or field is empty.
    pub fn photographer_name(&self) -> &str {
        non_empty_or(
            self.about.as_ref().map(|a| a.photographer_name.as_str()),
            DEFAULT_PHOTOGRAPHER_NAME,
        )
    }

    pub fn tagline(&self) -> &str {
        non_empty_or(self.about.as_ref().map(|a| a.tagline.as_str()), DEFAULT_TAGLINE)
    }

    pub fn bio(&self) -> &str {
        non_empty_or(self.about.as_ref().map(|a| a.bio_text.as_str()), DEFAULT_BIO)
    }

    /// Hero background: featured photo or placeholder.
    pub fn hero_image(&self) -> &str {
        featured_photo(&self.photos)
            .map(|p| p.image_data.as_str())
            .unwrap_or(PLACEHOLDER_HERO_IMAGE)
    }
}

fn non_empty_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}
