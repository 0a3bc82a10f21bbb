//! # A shaping oracle for TrueType/OpenType fonts
//!
//! [`TtfOracle`] answers the queries of [`glyph_bounds::ShapingOracle`]
//! from the tables of registered font files, using `ttf-parser`. Layout
//! is simple: one glyph per character, advances from `hmtx`, pair
//! kerning from `GPOS` or `kern`, and the tracking between characters.
//! Fonts are found and matched by name and style with `fontdb`.

mod kerning;
pub mod registry;

pub use fontdb::ID;
pub use kerning::KerningInfo;
pub use registry::{family_of, source_path, FaceData, FontRegistry, RegisterError};

use std::fmt;

use glyph_bounds::{BoundsRect, FontMetricsSnapshot, LineMetrics, OracleError, ShapingOracle};
use log::trace;
use ttf_parser::{Face, GlyphId};

/// Handle for a registered face at a particular size
///
/// The handle holds its own copy of the face data, so it stays usable
/// however the registry changes afterwards.
#[derive(Clone)]
pub struct TtfFont {
    id: ID,
    face: FaceData,
    name: String,
    size: f32,
}

#[rustfmt::skip]
impl TtfFont {
    /// The registry entry the font was created from
    pub fn id(&self) -> ID { self.id }
    /// The face data
    pub fn face_data(&self) -> &FaceData { &self.face }
    /// The name the font was created with
    pub fn name(&self) -> &str { &self.name }
    /// The size in points
    pub fn size(&self) -> f32 { self.size }
}

impl fmt::Debug for TtfFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtfFont")
            .field("id", &self.id)
            .field("index", &self.face.index())
            .field("name", &self.name)
            .field("size", &self.size)
            .finish()
    }
}

/// A glyph placed on the line
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PositionedGlyph {
    /// The character this glyph was mapped from
    pub character: char,
    /// The glyph in the face
    pub glyph: GlyphId,
    /// Pen position (in points) where the glyph origin goes
    pub x: f32,
    /// Horizontal advance (in points) without kerning and tracking
    pub advance: f32,
}

/// A line of positioned glyphs
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineLayout {
    /// The glyphs, in logical order
    pub glyphs: Vec<PositionedGlyph>,
    /// The pen position after the last glyph
    pub advance_width: f32,
}

/// A [`ShapingOracle`] backed by a [`FontRegistry`]
#[derive(Default)]
pub struct TtfOracle {
    registry: FontRegistry,
}

impl From<FontRegistry> for TtfOracle {
    fn from(registry: FontRegistry) -> Self {
        Self { registry }
    }
}

impl TtfOracle {
    /// Create a new oracle over `registry`
    pub fn new(registry: FontRegistry) -> Self {
        Self { registry }
    }

    /// Get the registry
    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    /// Get the registry for registering more fonts
    pub fn registry_mut(&mut self) -> &mut FontRegistry {
        &mut self.registry
    }

    fn parse<'f>(&self, font: &'f TtfFont, text: &str) -> Result<Face<'f>, OracleError> {
        font.face
            .face()
            .map_err(|e| OracleError::query_failed(text, e.to_string()))
    }

    /// Place the glyphs of `text` on a line
    ///
    /// Control characters take up no space.
    pub fn layout(&self, font: &TtfFont, text: &str, tracking: f32) -> Result<LineLayout, OracleError> {
        let face = self.parse(font, text)?;
        Ok(layout_face(&face, font.size, text, tracking))
    }
}

fn scale(face: &Face<'_>, size: f32) -> f32 {
    size / f32::from(face.units_per_em())
}

fn layout_face(face: &Face<'_>, size: f32, text: &str, tracking: f32) -> LineLayout {
    let scale = scale(face, size);
    let kerning = Some(KerningInfo::new(face)).filter(|k| !k.is_empty());

    let mut layout = LineLayout::default();
    let mut pen = 0.0;
    let mut prev: Option<GlyphId> = None;
    for character in text.chars().filter(|c| !c.is_control()) {
        let glyph = face.glyph_index(character).unwrap_or(GlyphId(0));
        if let Some(prev) = prev {
            if let Some(kern) = kerning.as_ref().and_then(|k| k.find(prev, glyph)) {
                pen += f32::from(kern) * scale;
            }
            pen += tracking;
        }
        let advance = f32::from(face.glyph_hor_advance(glyph).unwrap_or(0)) * scale;
        layout.glyphs.push(PositionedGlyph {
            character,
            glyph,
            x: pen,
            advance,
        });
        pen += advance;
        prev = Some(glyph);
    }
    layout.advance_width = pen;
    layout
}

/// Ink bounds of a single glyph, in points, relative to its origin
fn glyph_ink(face: &Face<'_>, glyph: GlyphId, scale: f32) -> Option<BoundsRect> {
    let rect = face.glyph_bounding_box(glyph)?;
    Some(BoundsRect::from_corners(
        (f32::from(rect.x_min) * scale, f32::from(rect.y_min) * scale),
        (f32::from(rect.x_max) * scale, f32::from(rect.y_max) * scale),
    ))
}

/// Ink top of the glyph for `c`
fn ink_top(face: &Face<'_>, c: char, scale: f32) -> Option<f32> {
    let glyph = face.glyph_index(c)?;
    glyph_ink(face, glyph, scale).map(|ink| ink.max_y())
}

impl ShapingOracle for TtfOracle {
    type Font = TtfFont;

    fn create_font(&self, name: &str, size: f32) -> Result<TtfFont, OracleError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(OracleError::query_failed(
                "",
                format!("invalid font size {}", size),
            ));
        }
        let not_found = || OracleError::FontNotFound {
            name: name.to_owned(),
        };
        let id = self.registry.resolve(name).ok_or_else(not_found)?;
        let face = self.registry.load(id).ok_or_else(not_found)?;
        if let Some(info) = self.registry.face(id) {
            trace!(
                "Font {:?} resolved to {:?} ({:?} {:?})",
                name,
                info.post_script_name,
                info.weight,
                info.style
            );
        }
        Ok(TtfFont {
            id,
            face,
            name: name.to_owned(),
            size,
        })
    }

    fn measure_line(
        &self,
        font: &TtfFont,
        text: &str,
        tracking: f32,
    ) -> Result<LineMetrics, OracleError> {
        let face = self.parse(font, text)?;
        let scale = scale(&face, font.size);
        let layout = layout_face(&face, font.size, text, tracking);
        Ok(LineMetrics {
            ascent: f32::from(face.ascender()) * scale,
            descent: -f32::from(face.descender()) * scale,
            leading: f32::from(face.line_gap()) * scale,
            advance_width: layout.advance_width,
        })
    }

    fn glyph_path_bounds(
        &self,
        font: &TtfFont,
        text: &str,
        tracking: f32,
    ) -> Result<BoundsRect, OracleError> {
        let face = self.parse(font, text)?;
        let scale = scale(&face, font.size);
        let layout = layout_face(&face, font.size, text, tracking);

        let mut bounds = BoundsRect::ZERO;
        for placed in &layout.glyphs {
            if let Some(ink) = glyph_ink(&face, placed.glyph, scale) {
                let ink = BoundsRect {
                    origin_x: ink.origin_x + placed.x,
                    ..ink
                };
                bounds = bounds.union(&ink);
            }
        }
        trace!("Glyph path bounds of {:?}: {:?}", text, bounds);
        Ok(bounds)
    }

    fn font_metrics(&self, font: &TtfFont) -> Result<FontMetricsSnapshot, OracleError> {
        let face = self.parse(font, "")?;
        let scale = scale(&face, font.size);
        let ascent = f32::from(face.ascender()) * scale;
        let cap_height = face
            .capital_height()
            .filter(|&h| h > 0)
            .map(|h| f32::from(h) * scale)
            .or_else(|| ink_top(&face, 'H', scale))
            .unwrap_or(ascent * 0.7);
        let x_height = face
            .x_height()
            .filter(|&h| h > 0)
            .map(|h| f32::from(h) * scale)
            .or_else(|| ink_top(&face, 'x', scale))
            .unwrap_or(ascent * 0.5);
        Ok(FontMetricsSnapshot::new(
            ascent,
            -f32::from(face.descender()) * scale,
            f32::from(face.line_gap()) * scale,
            cap_height,
            x_height,
        ))
    }
}
