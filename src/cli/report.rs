//! Console output
use glyph_bounds::{BoundsRect, ScanReport};
use prettytable::{format, row, Cell, Row, Table};
use ttf_oracle::{family_of, source_path, FontRegistry};

use super::measure::Measurement;

/// Print a table of all registered faces
pub fn print_faces(registry: &FontRegistry) {
    if registry.is_empty() {
        println!("No fonts registered. Pass --font-dir, --font-file or --font-url.");
        return;
    }

    let mut face_table = Table::new();
    face_table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    face_table.set_titles(row!["family", "postscript", "weight", "style", "index", "file"]);
    let mut faces: Vec<_> = registry.faces().collect();
    faces.sort_by(|a, b| {
        family_of(a)
            .cmp(family_of(b))
            .then(a.weight.cmp(&b.weight))
            .then_with(|| a.post_script_name.cmp(&b.post_script_name))
    });
    for face in faces {
        face_table.add_row(Row::new(vec![
            Cell::new(family_of(face)),
            Cell::new(&face.post_script_name),
            Cell::new(&format!("{}", face.weight.0)),
            Cell::new(&format!("{:?}", face.style)),
            Cell::new(&format!("{}", face.index)),
            Cell::new(
                &source_path(face)
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
        ]));
    }
    face_table.printstd();

    println!("\nAvailable fonts:");
    for family in registry.families() {
        println!("  {}", family);
    }
}

/// Print one row per measured character and the extremes
pub fn print_scan(report: &ScanReport, font_name: &str, size: f32) {
    let mut char_table = Table::new();
    char_table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    char_table.set_titles(row!["char", "above", "below", "height"]);
    for metric in &report.metrics {
        char_table.add_row(Row::new(vec![
            Cell::new(&format!("{:?}", metric.character)),
            Cell::new(&format!("{:8.2}", metric.ascent_above_baseline)),
            Cell::new(&format!("{:8.2}", metric.descent_below_baseline)),
            Cell::new(&format!(
                "{:8.2}",
                metric.ascent_above_baseline + metric.descent_below_baseline
            )),
        ]));
    }
    char_table.printstd();

    if !report.skipped.is_empty() {
        println!("\nSkipped characters:");
        for (c, e) in &report.skipped {
            println!("  {:?}: {}", c, e);
        }
    }

    let (top, height) = report.extremes.top();
    let (bottom, depth) = report.extremes.bottom();
    println!("\nResults for font '{}' at {}pt:", font_name, size);
    println!(
        "Top-most glyph: {:?} extends {:.2} points above baseline",
        top, height
    );
    println!(
        "Bottom-most glyph: {:?} extends {:.2} points below baseline",
        bottom, depth
    );
}

/// The `render` invocation that shows the extremes of a scan
pub fn suggest_render(font_arg: &str, size: f32, report: &ScanReport) -> String {
    let (top, _) = report.extremes.top();
    let (bottom, _) = report.extremes.bottom();
    format!(
        "glyph-bounds {} -s {} render -t \"{}Hello{}World\"",
        font_arg, size, top, bottom
    )
}

fn print_rect(rect: &BoundsRect) {
    println!(
        "  Origin: ({:.2}, {:.2})",
        rect.origin_x, rect.origin_y
    );
    println!("  Size: {:.2} × {:.2} points", rect.width, rect.height);
}

/// Print the bounds and metrics of a measurement
pub fn print_measurement(m: &Measurement) {
    println!("\nAnalyzing font '{}' at {}pt:", m.font, m.size);
    println!("\nInput text: {:?}", m.text);
    println!("Tracking: {} points", m.tracking);

    if let Some(extremes) = &m.extremes {
        let (top, height) = extremes.top();
        let (bottom, depth) = extremes.bottom();
        println!("\nExtreme characters:");
        println!(
            "• Top-most glyph: {:?} extends {:.2} points above baseline",
            top, height
        );
        println!(
            "• Bottom-most glyph: {:?} extends {:.2} points below baseline",
            bottom, depth
        );
    }

    let bounds = &m.bounds;
    println!("\nBounds measurements:");
    println!("• Standard bounds (line advances and font metrics):");
    println!(
        "  Width: {:.2} points, Height: {:.2} points",
        bounds.typographic.width, bounds.typographic.height
    );
    println!("\n• Precise glyph bounds (with overhangs):");
    print_rect(&bounds.glyph_path);
    println!("\n• Reconciled bounds:");
    print_rect(&bounds.reconciled.rect());

    let metrics = &m.metrics;
    println!("\nFont metrics:");
    println!("• Ascent: {:.2} points", metrics.ascent);
    println!("• Descent: {:.2} points", metrics.descent);
    println!("• Leading: {:.2} points", metrics.leading);
    println!("• Cap Height: {:.2} points", metrics.cap_height);
    println!("• x-Height: {:.2} points", metrics.x_height);
    println!("• Line Height: {:.2} points", metrics.line_height);
}

#[cfg(test)]
mod tests {
    use glyph_bounds::{ExtremePair, GlyphMetric, ScanReport};

    use super::suggest_render;

    #[test]
    fn test_suggestion() {
        let report = ScanReport {
            extremes: ExtremePair {
                top_most: GlyphMetric {
                    character: 'f',
                    ascent_above_baseline: 30.0,
                    descent_below_baseline: 9.0,
                },
                bottom_most: GlyphMetric {
                    character: 'g',
                    ascent_above_baseline: 11.0,
                    descent_below_baseline: 12.0,
                },
            },
            ..ScanReport::default()
        };
        assert_eq!(
            suggest_render("-f \"Zapfino\"", 36.0, &report),
            "glyph-bounds -f \"Zapfino\" -s 36 render -t \"fHellogWorld\""
        );
    }
}
