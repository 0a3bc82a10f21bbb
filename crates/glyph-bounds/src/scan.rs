//! # Extreme glyph scan
//!
//! Lays out every candidate character on its own and records how far its
//! ink reaches above and below the baseline.

use log::{debug, warn};
use serde::Serialize;

use crate::oracle::{OracleError, ShapingOracle};

/// The candidates used when the caller does not supply any
pub const DEFAULT_CANDIDATES: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+-=[]{}|;:'\",.<>?/~`";

/// Separator placed between a text and the extreme characters appended to it
pub const EXTREMES_SEPARATOR: &str = " | ";

/// Vertical excursion of a single character
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct GlyphMetric {
    /// The character that was measured
    pub character: char,
    /// Top edge of the ink relative to the baseline
    pub ascent_above_baseline: f32,
    /// Bottom edge of the ink below the baseline (positive downwards)
    pub descent_below_baseline: f32,
}

impl GlyphMetric {
    /// The floor value: a space that does not extend anywhere
    pub const FLOOR: Self = Self {
        character: ' ',
        ascent_above_baseline: 0.0,
        descent_below_baseline: 0.0,
    };
}

/// The characters reaching furthest up and furthest down
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ExtremePair {
    /// Highest `ascent_above_baseline` of the scan
    pub top_most: GlyphMetric,
    /// Highest `descent_below_baseline` of the scan
    pub bottom_most: GlyphMetric,
}

impl Default for ExtremePair {
    fn default() -> Self {
        Self {
            top_most: GlyphMetric::FLOOR,
            bottom_most: GlyphMetric::FLOOR,
        }
    }
}

impl ExtremePair {
    /// The top-most character and its height above the baseline
    pub fn top(&self) -> (char, f32) {
        (self.top_most.character, self.top_most.ascent_above_baseline)
    }

    /// The bottom-most character and its depth below the baseline
    pub fn bottom(&self) -> (char, f32) {
        (
            self.bottom_most.character,
            self.bottom_most.descent_below_baseline,
        )
    }

    /// Fold one more measurement into the pair
    ///
    /// Only a strictly greater value replaces the current extreme, so the
    /// earliest character wins a tie.
    pub fn update(&mut self, metric: GlyphMetric) {
        if metric.ascent_above_baseline > self.top_most.ascent_above_baseline {
            self.top_most = metric;
        }
        if metric.descent_below_baseline > self.bottom_most.descent_below_baseline {
            self.bottom_most = metric;
        }
    }

    /// Append the extreme characters to `text`
    ///
    /// Characters that already occur in `text` and floor entries are not
    /// added. If nothing is left to add, `text` is returned as is.
    ///
    /// ```
    /// # use glyph_bounds::{ExtremePair, GlyphMetric};
    /// let pair = ExtremePair {
    ///     top_most: GlyphMetric { character: 'f', ascent_above_baseline: 30.0, descent_below_baseline: 9.0 },
    ///     bottom_most: GlyphMetric { character: 'g', ascent_above_baseline: 11.0, descent_below_baseline: 12.0 },
    /// };
    /// assert_eq!(pair.append_to("Hello World"), "Hello World | fg");
    /// assert_eq!(pair.append_to("fig"), "fig");
    /// ```
    pub fn append_to(&self, text: &str) -> String {
        let mut extra = String::new();
        let candidates = [
            (self.top_most.character, self.top_most.ascent_above_baseline),
            (
                self.bottom_most.character,
                self.bottom_most.descent_below_baseline,
            ),
        ];
        for (c, value) in candidates {
            if value > 0.0 && !text.contains(c) && !extra.contains(c) {
                extra.push(c);
            }
        }
        if extra.is_empty() {
            text.to_owned()
        } else {
            format!("{}{}{}", text, EXTREMES_SEPARATOR, extra)
        }
    }
}

/// Result of [`GlyphExtremeScanner::scan_detailed`]
#[derive(Debug, Default)]
pub struct ScanReport {
    /// The extremes over all characters that could be measured
    pub extremes: ExtremePair,
    /// One entry per measured character, in input order
    pub metrics: Vec<GlyphMetric>,
    /// Characters the oracle could not measure
    pub skipped: Vec<(char, OracleError)>,
}

/// Finds the characters that extend furthest above and below the baseline
pub struct GlyphExtremeScanner<'o, O: ?Sized> {
    oracle: &'o O,
}

impl<'o, O: ShapingOracle + ?Sized> GlyphExtremeScanner<'o, O> {
    /// Create a new scanner
    pub fn new(oracle: &'o O) -> Self {
        Self { oracle }
    }

    /// Measure a single character
    pub fn measure(&self, font: &O::Font, character: char) -> Result<GlyphMetric, OracleError> {
        let mut buf = [0u8; 4];
        let text = character.encode_utf8(&mut buf);
        let bounds = self.oracle.glyph_path_bounds(font, text, 0.0)?;
        Ok(GlyphMetric {
            character,
            ascent_above_baseline: bounds.origin_y + bounds.height,
            descent_below_baseline: -bounds.origin_y,
        })
    }

    /// Find the top-most and bottom-most character among `candidates`
    ///
    /// Characters the oracle fails to measure are skipped.
    pub fn scan<I>(&self, font: &O::Font, candidates: I) -> ExtremePair
    where
        I: IntoIterator<Item = char>,
    {
        self.scan_detailed(font, candidates).extremes
    }

    /// Like [`Self::scan`], but keep every measurement
    pub fn scan_detailed<I>(&self, font: &O::Font, candidates: I) -> ScanReport
    where
        I: IntoIterator<Item = char>,
    {
        let mut report = ScanReport::default();
        for c in candidates {
            match self.measure(font, c) {
                Ok(metric) => {
                    debug!(
                        "Char: {:?} - Above baseline: {:.2}, Below baseline: {:.2}",
                        c, metric.ascent_above_baseline, metric.descent_below_baseline
                    );
                    report.extremes.update(metric);
                    report.metrics.push(metric);
                }
                Err(e) => {
                    warn!("Skipping {:?}: {}", c, e);
                    report.skipped.push((c, e));
                }
            }
        }
        report
    }
}
