//! # Bounds reconciliation
//!
//! Text has two different extents. The *typographic* one comes from the
//! line advances and the font's ascent, descent and leading. The *glyph
//! path* one is the ink. Script fonts routinely draw outside of the
//! former, and whitespace never shows up in the latter.

use log::debug;
use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::{
    bounds::{BoundsRect, LineMetrics, ReconciledBounds, TextBounds},
    oracle::{OracleError, ShapingOracle},
};

/// Horizontal room available for laying out text
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum LayoutWidth {
    /// Lines only break at line terminators such as `'\n'`
    #[default]
    Unbounded,
    /// Lines additionally wrap at break opportunities to fit the width
    Constrained(f32),
}

impl From<Option<f32>> for LayoutWidth {
    fn from(value: Option<f32>) -> Self {
        match value {
            Some(width) if width.is_finite() => Self::Constrained(width),
            _ => Self::Unbounded,
        }
    }
}

/// Computes typographic, glyph-path and reconciled bounds of text
pub struct TextBoundsReconciler<'o, O: ?Sized> {
    oracle: &'o O,
}

impl<'o, O: ShapingOracle + ?Sized> TextBoundsReconciler<'o, O> {
    /// Create a new reconciler
    pub fn new(oracle: &'o O) -> Self {
        Self { oracle }
    }

    /// The reconciled bounds of `text` on unbounded lines
    pub fn reconcile(
        &self,
        font: &O::Font,
        text: &str,
        tracking: f32,
    ) -> Result<ReconciledBounds, OracleError> {
        self.reconcile_within(font, text, tracking, LayoutWidth::Unbounded)
    }

    /// The reconciled bounds of `text` laid out within `width`
    pub fn reconcile_within(
        &self,
        font: &O::Font,
        text: &str,
        tracking: f32,
        width: LayoutWidth,
    ) -> Result<ReconciledBounds, OracleError> {
        self.measure(font, text, tracking, width)
            .map(|bounds| bounds.reconciled)
    }

    /// Compute all three rectangles
    pub fn measure(
        &self,
        font: &O::Font,
        text: &str,
        tracking: f32,
        width: LayoutWidth,
    ) -> Result<TextBounds, OracleError> {
        let typographic = self.typographic_bounds(font, text, tracking, width)?;
        let glyph_path = self.glyph_path_bounds(font, text, tracking)?;
        let reconciled = ReconciledBounds::from_parts(&typographic, &glyph_path);
        debug!(
            "Bounds for {:?}: typographic {:?}, glyph path {:?}",
            text, typographic, glyph_path
        );
        Ok(TextBounds {
            typographic,
            glyph_path,
            reconciled,
        })
    }

    /// Widest line advance by summed line heights
    pub fn typographic_bounds(
        &self,
        font: &O::Font,
        text: &str,
        tracking: f32,
        width: LayoutWidth,
    ) -> Result<BoundsRect, OracleError> {
        let mut bounds = BoundsRect::ZERO;
        for (_line, metrics) in self.lines(font, text, tracking, width)? {
            if bounds.width < metrics.advance_width {
                bounds.width = metrics.advance_width;
            }
            bounds.height += metrics.line_height();
        }
        Ok(bounds)
    }

    /// The ink of `text` on a single line
    pub fn glyph_path_bounds(
        &self,
        font: &O::Font,
        text: &str,
        tracking: f32,
    ) -> Result<BoundsRect, OracleError> {
        self.oracle.glyph_path_bounds(font, text, tracking)
    }

    /// Break `text` into lines and measure each of them
    ///
    /// Break opportunities follow the Unicode line breaking algorithm.
    /// Mandatory breaks always end a line; with a constrained width, lines
    /// also wrap greedily at the allowed ones. A segment that does not fit
    /// on an empty line gets a line of its own. Whitespace before a wrap
    /// point is dropped, elsewhere it is kept and takes up room.
    pub fn lines<'t>(
        &self,
        font: &O::Font,
        text: &'t str,
        tracking: f32,
        width: LayoutWidth,
    ) -> Result<Vec<(&'t str, LineMetrics)>, OracleError> {
        let mut lines = Vec::new();
        let mut start = 0;
        // the longest line so far that ends at an allowed break
        let mut fitted: Option<(&'t str, usize, LineMetrics)> = None;

        for (end, opportunity) in linebreaks(text) {
            let mandatory = opportunity == BreakOpportunity::Mandatory;
            let max_width = match width {
                LayoutWidth::Constrained(max_width) => max_width,
                LayoutWidth::Unbounded if mandatory => f32::INFINITY,
                LayoutWidth::Unbounded => continue,
            };

            let mut line = line_at(text, start, end, mandatory);
            let mut metrics = self.oracle.measure_line(font, line, tracking)?;
            if metrics.advance_width > max_width {
                if let Some((fitted_line, next, fitted_metrics)) = fitted.take() {
                    lines.push((fitted_line, fitted_metrics));
                    start = next;
                    line = line_at(text, start, end, mandatory);
                    metrics = self.oracle.measure_line(font, line, tracking)?;
                }
            }

            if mandatory {
                lines.push((line, metrics));
                start = end;
                fitted = None;
            } else {
                fitted = Some((line, end, metrics));
            }
        }

        if text.chars().next_back().map_or(true, is_line_terminator) {
            let metrics = self.oracle.measure_line(font, "", tracking)?;
            lines.push((&text[text.len()..], metrics));
        }
        Ok(lines)
    }
}

/// Characters that force a line break
fn is_line_terminator(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// The line from `start` up to the break at `end`
fn line_at(text: &str, start: usize, end: usize, mandatory: bool) -> &str {
    let line = &text[start..end];
    if mandatory {
        line.trim_end_matches(is_line_terminator)
    } else {
        line.trim_end()
    }
}

#[cfg(test)]
mod tests {
    use super::{line_at, LayoutWidth};

    #[test]
    fn test_line_at() {
        assert_eq!(line_at("ab  cd", 0, 4, false), "ab");
        assert_eq!(line_at("ab \r\ncd", 0, 5, true), "ab ");
        assert_eq!(line_at("ab\u{2028}cd", 0, 5, true), "ab");
        assert_eq!(line_at("ab cd ", 3, 6, true), "cd ");
    }

    #[test]
    fn test_layout_width_from_option() {
        assert_eq!(LayoutWidth::from(None), LayoutWidth::Unbounded);
        assert_eq!(LayoutWidth::from(Some(f32::INFINITY)), LayoutWidth::Unbounded);
        assert_eq!(LayoutWidth::from(Some(120.0)), LayoutWidth::Constrained(120.0));
    }
}
