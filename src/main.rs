//! # Glyph bounds tool
#![warn(missing_docs)]

use color_eyre::eyre;
use glyph_bounds::{GlyphExtremeScanner, LayoutWidth, DEFAULT_CANDIDATES};
use glyph_bounds_tool::cli::{
    font::Session,
    init,
    measure::{measure, Measurement, Request},
    opt::{default_output, Command, Options, TextOptions},
    render::render,
    report::{print_faces, print_measurement, print_scan, suggest_render},
};
use ttf_oracle::TtfFont;

fn run_measure(session: &Session, font: &TtfFont, opt: &TextOptions) -> eyre::Result<Measurement> {
    let mut request = Request::new(&opt.text, opt.tracking);
    request.width = LayoutWidth::from(opt.width);
    if opt.auto_extremes {
        request = request.with_extremes(None);
    }
    let m = measure(&session.oracle, font, &session.font_name, session.size, &request)?;
    print_measurement(&m);
    Ok(m)
}

fn main() -> eyre::Result<()> {
    let opt: Options = init()?;
    let session = Session::new(&opt.fonts)?;

    match opt.command {
        Command::List => {
            print_faces(session.oracle.registry());
        }
        Command::Scan(scan) => {
            let font = session.font()?;
            let candidates = scan.chars.as_deref().unwrap_or(DEFAULT_CANDIDATES);
            let report =
                GlyphExtremeScanner::new(&session.oracle).scan_detailed(&font, candidates.chars());
            print_scan(&report, &session.font_name, session.size);
            println!("\nTo generate a PNG visualization with these characters, run:");
            println!("{}", suggest_render(&session.font_arg(), session.size, &report));
        }
        Command::Measure(text) => {
            let font = session.font()?;
            run_measure(&session, &font, &text)?;
        }
        Command::Render(render_opt) => {
            let font = session.font()?;
            let m = run_measure(&session, &font, &render_opt.text)?;
            let out = render_opt.out.clone().unwrap_or_else(|| {
                default_output(&session.font_name, session.size, render_opt.text.tracking)
            });
            render(&session.oracle, &font, &m, render_opt.scale, &out)?;
        }
    }
    Ok(())
}
