//! Measuring a text, optionally with the extreme glyphs of the font appended

use glyph_bounds::{
    ExtremePair, FontMetricsSnapshot, GlyphExtremeScanner, LayoutWidth, OracleError,
    ShapingOracle, TextBounds, TextBoundsReconciler, DEFAULT_CANDIDATES,
};
use log::info;
use serde::Serialize;

/// What to measure
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    /// The text as given by the user
    pub text: &'a str,
    /// Extra space between characters, in points
    pub tracking: f32,
    /// Line wrapping
    pub width: LayoutWidth,
    /// Scan these candidates and append the extremes to the text
    pub extremes: Option<&'a str>,
}

impl<'a> Request<'a> {
    /// A plain request for a single unwrapped line
    pub fn new(text: &'a str, tracking: f32) -> Self {
        Self {
            text,
            tracking,
            width: LayoutWidth::Unbounded,
            extremes: None,
        }
    }

    /// Append the extremes of `candidates` (or the default set)
    pub fn with_extremes(mut self, candidates: Option<&'a str>) -> Self {
        self.extremes = Some(candidates.unwrap_or(DEFAULT_CANDIDATES));
        self
    }
}

/// Everything known about a measured text
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    /// The font name
    pub font: String,
    /// The font size in points
    pub size: f32,
    /// The text that was measured, including appended extremes
    pub text: String,
    /// Extra space between characters, in points
    pub tracking: f32,
    /// The extremes, if a scan was run
    pub extremes: Option<ExtremePair>,
    /// Standard, precise and reconciled bounds
    pub bounds: TextBounds,
    /// Metrics of the font at this size
    pub metrics: FontMetricsSnapshot,
}

/// Run the scan (if requested) and the bounds computation
pub fn measure<O>(
    oracle: &O,
    font: &O::Font,
    font_name: &str,
    size: f32,
    request: &Request<'_>,
) -> Result<Measurement, OracleError>
where
    O: ShapingOracle + ?Sized,
{
    let extremes = request
        .extremes
        .map(|candidates| GlyphExtremeScanner::new(oracle).scan(font, candidates.chars()));
    let text = match &extremes {
        Some(pair) => {
            let text = pair.append_to(request.text);
            info!("Measuring text with extremes appended: {:?}", text);
            text
        }
        None => request.text.to_owned(),
    };

    let bounds =
        TextBoundsReconciler::new(oracle).measure(font, &text, request.tracking, request.width)?;
    let metrics = oracle.font_metrics(font)?;
    Ok(Measurement {
        font: font_name.to_owned(),
        size,
        text,
        tracking: request.tracking,
        extremes,
        bounds,
        metrics,
    })
}
