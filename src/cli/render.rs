//! # Bounds diagram
//!
//! Draws the measured rectangles, the labelled font metric lines and
//! the text itself into a PNG. Geometry lives in [`DiagramLayout`],
//! pixels are written by [`BoundsDiagram`].

use std::path::Path;

use color_eyre::eyre::{self, eyre, WrapErr};
use glyph_bounds::BoundsRect;
use image::{ImageFormat, Rgba, RgbaImage};
use log::{debug, info};
use ttf_oracle::{LineLayout, TtfFont, TtfOracle};

use super::measure::Measurement;

/// Space around the drawing, in points
pub const PADDING: f32 = 10.0;
/// Extra space left of the drawing for the line labels, in points
pub const LABEL_GUTTER: f32 = 48.0;
/// Size of the line labels, in points
pub const LABEL_SIZE: f32 = 7.0;
/// Largest width or height of a diagram, in pixels
pub const MAX_SIDE: u32 = 16_384;

const PAGE: Rgba<u8> = Rgba([242, 242, 242, 255]);
const RECONCILED_FILL: Rgba<u8> = Rgba([229, 229, 255, 255]);
const RECONCILED_STROKE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const TYPOGRAPHIC_STROKE: Rgba<u8> = Rgba([0, 204, 0, 255]);
const BASELINE: Rgba<u8> = Rgba([0, 0, 0, 255]);
const FONT_LINE: Rgba<u8> = Rgba([64, 64, 255, 255]);
const HEIGHT_LINE: Rgba<u8> = Rgba([255, 153, 153, 255]);
const EXTREME_LINE: Rgba<u8> = Rgba([204, 0, 204, 255]);
const ORIGIN: Rgba<u8> = Rgba([255, 0, 0, 255]);
const INK: [u8; 3] = [0, 0, 0];

/// A labelled horizontal line across the diagram
#[derive(Debug, Clone, PartialEq)]
pub struct MetricLine {
    /// The text next to the line
    pub label: String,
    /// Height above the baseline, in points
    pub y: f32,
    /// Line and label color
    pub color: Rgba<u8>,
}

impl MetricLine {
    fn new(label: impl Into<String>, y: f32, color: Rgba<u8>) -> Self {
        Self {
            label: label.into(),
            y,
            color,
        }
    }
}

/// The metric lines of `m`, drawn in this order
pub fn metric_lines(m: &Measurement) -> Vec<MetricLine> {
    let metrics = &m.metrics;
    let mut lines = vec![
        MetricLine::new("Cap Height", metrics.cap_height, HEIGHT_LINE),
        MetricLine::new("x-Height", metrics.x_height, HEIGHT_LINE),
        MetricLine::new("Ascent", metrics.ascent, FONT_LINE),
        MetricLine::new("Descent", -metrics.descent, FONT_LINE),
    ];
    if let Some(extremes) = &m.extremes {
        let (top, height) = extremes.top();
        let (bottom, depth) = extremes.bottom();
        lines.push(MetricLine::new(format!("Top '{}'", top), height, EXTREME_LINE));
        lines.push(MetricLine::new(format!("Bottom '{}'", bottom), -depth, EXTREME_LINE));
    }
    lines.push(MetricLine::new("Baseline", 0.0, BASELINE));
    lines
}

/// Maps points (y up, pen start at the origin) to pixels (y down)
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DiagramLayout {
    scale: f32,
    min_x: f32,
    max_y: f32,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl DiagramLayout {
    /// Fit everything that will be drawn for `m`
    ///
    /// Fails if `scale` is not positive or the image would have a side
    /// longer than [`MAX_SIDE`] pixels.
    pub fn new(m: &Measurement, scale: f32) -> eyre::Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(eyre!("Invalid scale {}", scale));
        }
        let content = Self::content(m);
        let width = Self::side(content.width + 2.0 * PADDING + LABEL_GUTTER, scale)?;
        let height = Self::side(content.height + 2.0 * PADDING, scale)?;
        Ok(Self {
            scale,
            min_x: content.origin_x,
            max_y: content.max_y(),
            width,
            height,
        })
    }

    fn side(points: f32, scale: f32) -> eyre::Result<u32> {
        let pixels = (points * scale).ceil().max(1.0);
        if pixels.is_finite() && pixels <= MAX_SIDE as f32 {
            Ok(pixels as u32)
        } else {
            Err(eyre!(
                "A diagram of {} points at scale {} exceeds {} pixels, use a smaller --scale",
                points,
                scale,
                MAX_SIDE
            ))
        }
    }

    /// The area covered by rectangles and metric lines, in points
    pub fn content(m: &Measurement) -> BoundsRect {
        let mut rects = vec![
            typographic_box(m),
            m.bounds.glyph_path,
            m.bounds.reconciled.rect(),
        ];
        let mut levels = vec![0.0, m.metrics.ascent, -m.metrics.descent];
        if let Some(extremes) = &m.extremes {
            levels.push(extremes.top().1);
            levels.push(-extremes.bottom().1);
        }
        rects.retain(|r| r.width > 0.0 || r.height > 0.0);

        let min_x = rects.iter().map(|r| r.origin_x).fold(0.0, f32::min);
        let max_x = rects.iter().map(BoundsRect::max_x).fold(0.0, f32::max);
        let min_y = rects
            .iter()
            .map(|r| r.origin_y)
            .chain(levels.iter().copied())
            .fold(f32::INFINITY, f32::min);
        let max_y = rects
            .iter()
            .map(BoundsRect::max_y)
            .chain(levels.iter().copied())
            .fold(f32::NEG_INFINITY, f32::max);
        BoundsRect::from_corners((min_x, min_y), (max_x, max_y))
    }

    /// Pixels per point
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Pixel column of the horizontal position `x`
    pub fn px_x(&self, x: f32) -> f32 {
        (x - self.min_x + PADDING + LABEL_GUTTER) * self.scale
    }

    /// Pixel row of the vertical position `y`
    pub fn px_y(&self, y: f32) -> f32 {
        (self.max_y - y + PADDING) * self.scale
    }

    /// Pixel corners (left, top, right, bottom) of `rect`
    pub fn px_rect(&self, rect: &BoundsRect) -> (i64, i64, i64, i64) {
        (
            self.px_x(rect.origin_x).round() as i64,
            self.px_y(rect.max_y()).round() as i64,
            self.px_x(rect.max_x()).round() as i64,
            self.px_y(rect.origin_y).round() as i64,
        )
    }
}

/// The standard bounds, hanging from the ascent of the first line
fn typographic_box(m: &Measurement) -> BoundsRect {
    let typo = m.bounds.typographic;
    BoundsRect::new(0.0, m.metrics.ascent - typo.height, typo.width, typo.height)
}

/// A drawing in progress
pub struct BoundsDiagram {
    layout: DiagramLayout,
    image: RgbaImage,
}

impl BoundsDiagram {
    /// Create an empty page
    pub fn new(layout: DiagramLayout) -> Self {
        let image = RgbaImage::from_pixel(layout.width, layout.height, PAGE);
        Self { layout, image }
    }

    /// The page
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && x < i64::from(self.layout.width) && y < i64::from(self.layout.height)
        {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    fn hline(&mut self, y: f32, color: Rgba<u8>) {
        let y = self.layout.px_y(y).round() as i64;
        for x in 0..i64::from(self.layout.width) {
            self.put(x, y, color);
        }
    }

    fn fill_rect(&mut self, rect: &BoundsRect, color: Rgba<u8>) {
        let (left, top, right, bottom) = self.layout.px_rect(rect);
        for y in top..bottom {
            for x in left..right {
                self.put(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: &BoundsRect, color: Rgba<u8>) {
        let (left, top, right, bottom) = self.layout.px_rect(rect);
        for x in left..=right {
            self.put(x, top, color);
            self.put(x, bottom, color);
        }
        for y in top..=bottom {
            self.put(left, y, color);
            self.put(right, y, color);
        }
    }

    fn cross(&mut self, x: f32, y: f32, color: Rgba<u8>) {
        let cx = self.layout.px_x(x).round() as i64;
        let cy = self.layout.px_y(y).round() as i64;
        let arm = (2.0 * self.layout.scale).round() as i64;
        for d in -arm..=arm {
            self.put(cx + d, cy, color);
            self.put(cx, cy + d, color);
        }
    }

    /// Draw the rectangles and metric lines of `m`
    pub fn draw_bounds(&mut self, m: &Measurement) {
        let reconciled = m.bounds.reconciled.rect();
        self.fill_rect(&reconciled, RECONCILED_FILL);

        for line in metric_lines(m) {
            self.hline(line.y, line.color);
        }

        self.stroke_rect(&typographic_box(m), TYPOGRAPHIC_STROKE);
        self.stroke_rect(&reconciled, RECONCILED_STROKE);
    }

    /// Blend the glyphs of `line` onto the page
    pub fn draw_text(&mut self, font: &fontdue::Font, size: f32, line: &LineLayout) {
        let px_size = size * self.layout.scale;
        let baseline = self.layout.px_y(0.0).round() as i64;
        for placed in &line.glyphs {
            let (metrics, coverage) = font.rasterize_indexed(placed.glyph.0, px_size);
            let left = self.layout.px_x(placed.x).round() as i64;
            self.draw_coverage(left, baseline, &metrics, &coverage, INK);
        }
    }

    /// Write the name of every metric line just above it, in the gutter
    pub fn draw_labels(&mut self, font: &fontdue::Font, m: &Measurement) {
        let px_size = LABEL_SIZE * self.layout.scale;
        let gap = self.layout.scale.ceil() as i64;
        for line in metric_lines(m) {
            let baseline = self.layout.px_y(line.y).round() as i64 - gap;
            let mut pen = (2.0 * self.layout.scale).round();
            let Rgba([r, g, b, _]) = line.color;
            for c in line.label.chars() {
                let (metrics, coverage) = font.rasterize(c, px_size);
                self.draw_coverage(pen as i64, baseline, &metrics, &coverage, [r, g, b]);
                pen += metrics.advance_width;
            }
        }
    }

    fn draw_coverage(
        &mut self,
        pen_x: i64,
        baseline: i64,
        metrics: &fontdue::Metrics,
        coverage: &[u8],
        color: [u8; 3],
    ) {
        let left = pen_x + i64::from(metrics.xmin);
        let top = baseline - i64::from(metrics.ymin) - metrics.height as i64;
        for (row, chunk) in coverage.chunks(metrics.width.max(1)).enumerate() {
            for (col, &alpha) in chunk.iter().enumerate() {
                if alpha == 0 {
                    continue;
                }
                let (x, y) = (left + col as i64, top + row as i64);
                if let Some(mixed) = self.blend(x, y, alpha, color) {
                    self.put(x, y, mixed);
                }
            }
        }
    }

    fn blend(&self, x: i64, y: i64, alpha: u8, color: [u8; 3]) -> Option<Rgba<u8>> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        let Rgba([r, g, b, a]) = *self.image.get_pixel_checked(x, y)?;
        let mix = |bg: u8, fg: u8| {
            let alpha = u32::from(alpha);
            ((u32::from(bg) * (255 - alpha) + u32::from(fg) * alpha) / 255) as u8
        };
        Some(Rgba([mix(r, color[0]), mix(g, color[1]), mix(b, color[2]), a]))
    }

    /// Mark the pen start
    pub fn draw_origin(&mut self) {
        self.cross(0.0, 0.0, ORIGIN);
    }

    /// Write the page as a PNG file
    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .wrap_err_with(|| format!("Failed to write PNG `{}`", path.display()))
    }
}

/// Draw the diagram for `m` and save it to `out`
///
/// Text and labels are set in the measured font.
pub fn render(
    oracle: &TtfOracle,
    font: &TtfFont,
    m: &Measurement,
    scale: f32,
    out: &Path,
) -> eyre::Result<()> {
    let layout = DiagramLayout::new(m, scale)?;
    debug!("Diagram layout: {:?}", layout);

    let face = font.face_data();
    let settings = fontdue::FontSettings {
        collection_index: face.index(),
        ..fontdue::FontSettings::default()
    };
    let raster_font = fontdue::Font::from_bytes(face.data(), settings)
        .map_err(|e| eyre!("Failed to load font for drawing: {}", e))?;
    let line = oracle.layout(font, &m.text, m.tracking)?;

    let mut diagram = BoundsDiagram::new(layout);
    diagram.draw_bounds(m);
    diagram.draw_text(&raster_font, font.size(), &line);
    diagram.draw_labels(&raster_font, m);
    diagram.draw_origin();
    diagram.save(out)?;
    info!("PNG created successfully at: {}", out.display());
    Ok(())
}
