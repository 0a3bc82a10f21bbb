#![warn(missing_docs)]
//! # Glyph bounds
//!
//! This crate measures how far text set in a particular font really
//! extends. It answers two questions:
//!
//! - Which character of a candidate set reaches highest above the
//!   baseline, and which one reaches lowest below it? See [`scan`].
//! - What is the bounding box of a string, taking into account both the
//!   nominal font metrics (ascent, descent, leading, advance widths) and
//!   the actual ink of the glyph outlines? See [`reconcile`].
//!
//! Neither question is answered by looking at font files directly. All
//! measurements go through a [`ShapingOracle`], an external text layout
//! engine that knows how to turn a font name, a size and a short string
//! into metrics and rectangles.
//!
//! All lengths are in points, with the y axis pointing up and the origin
//! at the start of the baseline.

pub mod bounds;
pub mod oracle;
pub mod reconcile;
pub mod scan;

pub use bounds::{BoundsRect, FontMetricsSnapshot, LineMetrics, ReconciledBounds, TextBounds};
pub use oracle::{OracleError, ShapingOracle};
pub use reconcile::{LayoutWidth, TextBoundsReconciler};
pub use scan::{ExtremePair, GlyphExtremeScanner, GlyphMetric, ScanReport, DEFAULT_CANDIDATES};

/// Find the top-most and bottom-most glyph among `candidates`
///
/// Shorthand for [`GlyphExtremeScanner::scan`].
pub fn scan<O, I>(oracle: &O, font: &O::Font, candidates: I) -> ExtremePair
where
    O: ShapingOracle + ?Sized,
    I: IntoIterator<Item = char>,
{
    GlyphExtremeScanner::new(oracle).scan(font, candidates)
}

/// Compute the reconciled bounds of a single unconstrained line of text
///
/// Shorthand for [`TextBoundsReconciler::reconcile`].
pub fn reconcile<O>(
    oracle: &O,
    font: &O::Font,
    text: &str,
    tracking: f32,
) -> Result<ReconciledBounds, OracleError>
where
    O: ShapingOracle + ?Sized,
{
    TextBoundsReconciler::new(oracle).reconcile(font, text, tracking)
}
