//! # The shaping oracle
//!
//! A shaping oracle is whatever text layout engine is available on the
//! platform. This crate never looks inside a font, it only asks the
//! oracle.

use displaydoc::Display;
use thiserror::Error;

use crate::bounds::{BoundsRect, FontMetricsSnapshot, LineMetrics};

/// Error returned by a [`ShapingOracle`]
#[derive(Debug, Display, Error)]
pub enum OracleError {
    /// Font `{name}` could not be resolved
    FontNotFound {
        /// The name that was asked for
        name: String,
    },
    /// Query for {text:?} failed: {reason}
    QueryFailed {
        /// The text that was being measured
        text: String,
        /// Why the engine could not answer
        reason: String,
    },
}

impl OracleError {
    /// Create a [`OracleError::QueryFailed`] for the given text
    pub fn query_failed(text: &str, reason: impl Into<String>) -> Self {
        Self::QueryFailed {
            text: text.to_owned(),
            reason: reason.into(),
        }
    }
}

/// An external text layout engine that answers metric queries
///
/// Every query takes `&self`, so a single oracle can serve many
/// measurements at once. Anything that changes which names resolve to
/// which font (e.g. installing a font file) must happen before the
/// queries start and is not part of this trait.
pub trait ShapingOracle {
    /// An opaque handle for a font at a particular size
    type Font;

    /// Resolve `name` at `size` points
    ///
    /// Fails with [`OracleError::FontNotFound`], never substitutes a
    /// fallback font.
    fn create_font(&self, name: &str, size: f32) -> Result<Self::Font, OracleError>;

    /// Typographic metrics of one line of `text`
    ///
    /// `tracking` is extra space (in points) between consecutive
    /// characters and is included in the advance width.
    fn measure_line(
        &self,
        font: &Self::Font,
        text: &str,
        tracking: f32,
    ) -> Result<LineMetrics, OracleError>;

    /// The tight bounds of the glyph outlines of `text`, laid out on one
    /// line starting at the origin
    fn glyph_path_bounds(
        &self,
        font: &Self::Font,
        text: &str,
        tracking: f32,
    ) -> Result<BoundsRect, OracleError>;

    /// Font-wide vertical metrics
    fn font_metrics(&self, font: &Self::Font) -> Result<FontMetricsSnapshot, OracleError>;
}

impl<O: ShapingOracle + ?Sized> ShapingOracle for &O {
    type Font = O::Font;

    fn create_font(&self, name: &str, size: f32) -> Result<Self::Font, OracleError> {
        (**self).create_font(name, size)
    }

    fn measure_line(
        &self,
        font: &Self::Font,
        text: &str,
        tracking: f32,
    ) -> Result<LineMetrics, OracleError> {
        (**self).measure_line(font, text, tracking)
    }

    fn glyph_path_bounds(
        &self,
        font: &Self::Font,
        text: &str,
        tracking: f32,
    ) -> Result<BoundsRect, OracleError> {
        (**self).glyph_path_bounds(font, text, tracking)
    }

    fn font_metrics(&self, font: &Self::Font) -> Result<FontMetricsSnapshot, OracleError> {
        (**self).font_metrics(font)
    }
}
