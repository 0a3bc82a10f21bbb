#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use glyph_bounds::{BoundsRect, FontMetricsSnapshot, LineMetrics, OracleError, ShapingOracle};

/// Font handle of the [`MockOracle`]
#[derive(Debug, Clone, PartialEq)]
pub struct MockFont {
    pub name: String,
    pub size: f32,
}

/// A deterministic in-memory oracle
///
/// Every character has a fixed advance and fixed ink bounds, strings
/// are laid out left to right.
#[derive(Default)]
pub struct MockOracle {
    pub fonts: Vec<String>,
    pub ink: HashMap<char, BoundsRect>,
    pub advance: HashMap<char, f32>,
    pub text_ink: HashMap<String, BoundsRect>,
    pub failing: HashSet<char>,
    pub line: LineMetrics,
}

impl MockOracle {
    pub fn new() -> Self {
        Self {
            fonts: vec!["Mock Script".to_owned()],
            line: LineMetrics {
                ascent: 18.0,
                descent: 6.0,
                leading: 2.0,
                advance_width: 0.0,
            },
            ..Self::default()
        }
    }

    pub fn with_glyph(mut self, c: char, advance: f32, ink: BoundsRect) -> Self {
        self.advance.insert(c, advance);
        self.ink.insert(c, ink);
        self
    }

    /// Override the ink bounds reported for a whole string
    pub fn with_text_ink(mut self, text: &str, ink: BoundsRect) -> Self {
        self.text_ink.insert(text.to_owned(), ink);
        self
    }

    pub fn failing_on(mut self, c: char) -> Self {
        self.failing.insert(c);
        self
    }

    pub fn font(&self) -> MockFont {
        self.create_font("Mock Script", 24.0).unwrap()
    }

    fn check(&self, text: &str) -> Result<(), OracleError> {
        match text.chars().find(|c| self.failing.contains(c)) {
            Some(c) => Err(OracleError::query_failed(text, format!("no glyph for {:?}", c))),
            None => Ok(()),
        }
    }

    fn advance_of(&self, c: char) -> f32 {
        self.advance.get(&c).copied().unwrap_or(10.0)
    }
}

impl ShapingOracle for MockOracle {
    type Font = MockFont;

    fn create_font(&self, name: &str, size: f32) -> Result<MockFont, OracleError> {
        if self.fonts.iter().any(|f| f == name) {
            Ok(MockFont {
                name: name.to_owned(),
                size,
            })
        } else {
            Err(OracleError::FontNotFound {
                name: name.to_owned(),
            })
        }
    }

    fn measure_line(
        &self,
        _font: &MockFont,
        text: &str,
        tracking: f32,
    ) -> Result<LineMetrics, OracleError> {
        self.check(text)?;
        let count = text.chars().count();
        let advances: f32 = text.chars().map(|c| self.advance_of(c)).sum();
        let gaps = count.saturating_sub(1) as f32;
        Ok(LineMetrics {
            advance_width: advances + gaps * tracking,
            ..self.line
        })
    }

    fn glyph_path_bounds(
        &self,
        _font: &MockFont,
        text: &str,
        tracking: f32,
    ) -> Result<BoundsRect, OracleError> {
        self.check(text)?;
        if let Some(ink) = self.text_ink.get(text) {
            return Ok(*ink);
        }
        let mut pen = 0.0;
        let mut bounds = BoundsRect::ZERO;
        for c in text.chars() {
            if let Some(ink) = self.ink.get(&c) {
                let placed = BoundsRect {
                    origin_x: ink.origin_x + pen,
                    ..*ink
                };
                bounds = bounds.union(&placed);
            }
            pen += self.advance_of(c) + tracking;
        }
        Ok(bounds)
    }

    fn font_metrics(&self, _font: &MockFont) -> Result<FontMetricsSnapshot, OracleError> {
        Ok(FontMetricsSnapshot::new(
            self.line.ascent,
            self.line.descent,
            self.line.leading,
            14.0,
            9.0,
        ))
    }
}

/// Ink box of a glyph standing on (or hanging below) the baseline
pub fn ink(origin_y: f32, height: f32) -> BoundsRect {
    BoundsRect::new(0.5, origin_y, 8.0, height)
}
