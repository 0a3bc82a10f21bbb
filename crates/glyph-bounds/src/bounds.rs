//! # Rectangles and metric records
//!
//! - A **point** is 1/72 of an inch; every length here is in points
//! - The y axis points up, the baseline of the (first) line is at `y = 0`
//! - Descent and leading are positive distances, not coordinates

use serde::Serialize;

/// An axis-aligned rectangle
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct BoundsRect {
    /// Left edge
    pub origin_x: f32,
    /// Bottom edge
    pub origin_y: f32,
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl BoundsRect {
    /// The empty rectangle at the origin
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rectangle
    pub const fn new(origin_x: f32, origin_y: f32, width: f32, height: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    /// Create a rectangle from its lower-left and upper-right corners
    pub fn from_corners((x_min, y_min): (f32, f32), (x_max, y_max): (f32, f32)) -> Self {
        Self::new(x_min, y_min, x_max - x_min, y_max - y_min)
    }

    /// Right edge
    pub fn max_x(&self) -> f32 {
        self.origin_x + self.width
    }

    /// Top edge
    pub fn max_y(&self) -> f32 {
        self.origin_y + self.height
    }

    /// Whether the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The smallest rectangle containing both `self` and `other`
    ///
    /// Empty rectangles do not contribute.
    pub fn union(&self, other: &Self) -> Self {
        match (self.is_empty(), other.is_empty()) {
            (true, _) => *other,
            (false, true) => *self,
            (false, false) => Self::from_corners(
                (
                    self.origin_x.min(other.origin_x),
                    self.origin_y.min(other.origin_y),
                ),
                (self.max_x().max(other.max_x()), self.max_y().max(other.max_y())),
            ),
        }
    }
}

/// Typographic metrics of a single laid-out line
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the line
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line
    pub descent: f32,
    /// Extra space below the line
    pub leading: f32,
    /// Sum of the advances, including tracking
    pub advance_width: f32,
}

impl LineMetrics {
    /// `ascent + descent + leading`
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }
}

/// Font-wide vertical metrics at a particular size
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct FontMetricsSnapshot {
    /// Nominal height above the baseline
    pub ascent: f32,
    /// Nominal depth below the baseline (positive)
    pub descent: f32,
    /// Recommended gap between lines
    pub leading: f32,
    /// Height of flat capital letters
    pub cap_height: f32,
    /// Height of flat lowercase letters
    pub x_height: f32,
    /// `ascent + descent + leading`
    pub line_height: f32,
}

impl FontMetricsSnapshot {
    /// Create a snapshot, deriving the line height
    pub fn new(ascent: f32, descent: f32, leading: f32, cap_height: f32, x_height: f32) -> Self {
        Self {
            ascent,
            descent,
            leading,
            cap_height,
            x_height,
            line_height: ascent + descent + leading,
        }
    }
}

/// The final bounding box of a piece of text
///
/// The origin and height always come from the ink, because decorative
/// fonts overshoot their nominal ascent and descent and may start left
/// of the pen position. The width is never narrower than the advance
/// width, because trailing whitespace still takes up room.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReconciledBounds(pub BoundsRect);

impl ReconciledBounds {
    /// Merge typographic and glyph-path bounds
    ///
    /// ```
    /// # use glyph_bounds::{BoundsRect, ReconciledBounds};
    /// let typographic = BoundsRect::new(0.0, 0.0, 100.0, 28.0);
    /// let ink = BoundsRect::new(-2.0, -3.0, 95.0, 30.0);
    /// let bounds = ReconciledBounds::from_parts(&typographic, &ink);
    /// assert_eq!(bounds.rect(), BoundsRect::new(-2.0, -3.0, 100.0, 30.0));
    /// ```
    pub fn from_parts(typographic: &BoundsRect, glyph_path: &BoundsRect) -> Self {
        Self(BoundsRect {
            origin_x: glyph_path.origin_x,
            origin_y: glyph_path.origin_y,
            width: typographic.width.max(glyph_path.width),
            height: glyph_path.height,
        })
    }

    /// The reconciled rectangle
    pub fn rect(&self) -> BoundsRect {
        self.0
    }
}

/// All three rectangles computed for a piece of text
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct TextBounds {
    /// Bounds from line advances and font metrics ("standard bounds")
    pub typographic: BoundsRect,
    /// Bounds of the glyph outlines ("precise bounds")
    pub glyph_path: BoundsRect,
    /// The merge of both
    pub reconciled: ReconciledBounds,
}

#[cfg(test)]
mod tests {
    use super::{BoundsRect, FontMetricsSnapshot, ReconciledBounds};

    #[test]
    fn test_union() {
        let a = BoundsRect::new(0.0, -2.0, 10.0, 12.0);
        let b = BoundsRect::new(8.0, 0.0, 4.0, 14.0);
        assert_eq!(a.union(&b), BoundsRect::new(0.0, -2.0, 12.0, 16.0));
        assert_eq!(BoundsRect::ZERO.union(&b), b);
        assert_eq!(a.union(&BoundsRect::new(50.0, 50.0, 0.0, 0.0)), a);
    }

    #[test]
    fn test_reconcile_keeps_ink_origin() {
        let typographic = BoundsRect::new(0.0, 0.0, 100.0, 28.0);
        let ink = BoundsRect::new(-2.0, -3.0, 95.0, 30.0);
        let bounds = ReconciledBounds::from_parts(&typographic, &ink).rect();
        assert_eq!(bounds, BoundsRect::new(-2.0, -3.0, 100.0, 30.0));
    }

    #[test]
    fn test_reconcile_wide_swash() {
        let typographic = BoundsRect::new(0.0, 0.0, 60.0, 28.0);
        let ink = BoundsRect::new(-7.5, -12.0, 81.0, 55.0);
        let bounds = ReconciledBounds::from_parts(&typographic, &ink).rect();
        assert_eq!(bounds.width, 81.0);
        assert_eq!(bounds.height, 55.0);
        assert_eq!((bounds.origin_x, bounds.origin_y), (-7.5, -12.0));
    }

    #[test]
    fn test_line_height() {
        let m = FontMetricsSnapshot::new(18.0, 5.5, 0.5, 16.0, 11.0);
        assert_eq!(m.line_height, 24.0);
    }
}
