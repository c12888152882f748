//! Pure rectangle math for intersection checks (unit testable, no state).
//!
//! Coordinates are CSS pixels with the origin at the top-left of the page or
//! viewport; `y` grows downward. Intersections are edge-inclusive: two
//! rectangles that share only an edge still intersect, with zero area.

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grow the rectangle by `margin` on every side (negative shrinks).
    pub fn expand(&self, margin: f64) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            width: (self.width + 2.0 * margin).max(0.0),
            height: (self.height + 2.0 * margin).max(0.0),
        }
    }

    /// Overlapping region, or `None` when the rectangles are apart.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// Fraction of `target` visible inside `root` grown by `margin`.
///
/// Returns `None` when the target lies entirely outside. A zero-area target
/// that touches the root counts as fully visible (ratio 1.0).
pub fn intersection_ratio(target: &Rect, root: &Rect, margin: f64) -> Option<f64> {
    let visible = target.intersection(&root.expand(margin))?;
    let total = target.area();
    if total == 0.0 {
        return Some(1.0);
    }
    Some((visible.area() / total).clamp(0.0, 1.0))
}
