use std::{
    io,
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use thiserror::*;

/// Default font name
pub const DEFAULT_FONT: &str = "Helvetica";
/// Default font size in points
pub const DEFAULT_SIZE: f32 = 24.0;
/// Default sample text
pub const DEFAULT_TEXT: &str = "Hello World";

#[derive(Parser, Debug)]
#[clap(name = "glyph-bounds", version)]
/// Measure the exact bounds of text set in a font
pub struct Options {
    #[clap(flatten)]
    pub fonts: FontOptions,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the registered font families
    List,
    /// Find the glyphs reaching highest above and lowest below the baseline
    Scan(ScanOptions),
    /// Print the standard, precise and reconciled bounds of a text
    Measure(TextOptions),
    /// Like `measure`, and draw the bounds into a PNG file
    Render(RenderOptions),
}

/// Where fonts come from and which one to use
#[derive(Args, Debug, Clone)]
pub struct FontOptions {
    /// The font name (ignored if `--font-file` or `--font-url` is given)
    #[clap(long, short = 'f', default_value = DEFAULT_FONT, global = true)]
    pub font: String,

    /// A font file to register; its family name is used as the font
    #[clap(long = "font-file", short = 'u', global = true)]
    pub font_file: Option<PathBuf>,

    /// A font file to download and register; its family name is used as the font
    #[clap(long = "font-url", global = true)]
    pub font_url: Option<String>,

    /// Folders to search for font files (repeatable)
    #[clap(long = "font-dir", short = 'd', global = true)]
    pub font_dirs: Vec<PathBuf>,

    /// Do not register the fonts installed on this machine
    #[clap(long = "no-system-fonts", global = true)]
    pub no_system_fonts: bool,

    /// Font size in points
    #[clap(long, short = 's', default_value_t = DEFAULT_SIZE, global = true)]
    pub size: f32,
}

impl FontOptions {
    /// Whether the fonts installed on this machine are registered
    pub fn system_fonts(&self) -> bool {
        !self.no_system_fonts
    }
}

#[derive(Args, Debug, Clone)]
pub struct ScanOptions {
    /// The characters to analyze (default: ASCII letters, digits and punctuation)
    #[clap(long, short = 'c')]
    pub chars: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct TextOptions {
    /// The text to measure
    #[clap(long, short = 't', default_value = DEFAULT_TEXT)]
    pub text: String,

    /// Extra space between characters, in points
    #[clap(long, short = 'k', default_value_t = 0.0, allow_negative_numbers = true)]
    pub tracking: f32,

    /// Wrap lines to this width, in points
    #[clap(long, short = 'w')]
    pub width: Option<f32>,

    /// Append the top-most and bottom-most glyphs of the font to the text
    #[clap(long = "auto-extremes", short = 'x')]
    pub auto_extremes: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RenderOptions {
    #[clap(flatten)]
    pub text: TextOptions,

    /// Where to store the PNG (default: `<family>_<size>pt_tracking<tracking>pt.png`)
    #[clap(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Pixels per point
    #[clap(long, default_value_t = 4.0)]
    pub scale: f32,
}

/// The default output file name for a diagram
///
/// ```
/// # use glyph_bounds_tool::cli::opt::default_output;
/// assert_eq!(
///     default_output("Apple Chancery", 24.0, 0.5).to_str(),
///     Some("Apple_Chancery_24pt_tracking0.5pt.png"),
/// );
/// ```
pub fn default_output(family: &str, size: f32, tracking: f32) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}pt_tracking{}pt.png",
        family.replace(' ', "_"),
        size,
        tracking
    ))
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO Error")]
    Io(#[from] io::Error),
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::SpannedError),
}

fn default_size() -> f32 {
    DEFAULT_SIZE
}

fn default_text() -> String {
    DEFAULT_TEXT.to_owned()
}

fn default_true() -> bool {
    true
}

/// A single measurement of a batch script
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Font name
    pub font: String,
    /// Font size in points
    #[serde(default = "default_size")]
    pub size: f32,
    /// The text to measure
    #[serde(default = "default_text")]
    pub text: String,
    /// Extra space between characters, in points
    #[serde(default)]
    pub tracking: f32,
    /// Wrap lines to this width, in points
    #[serde(default)]
    pub width: Option<f32>,
    /// Append the extreme glyphs to the text
    #[serde(default)]
    pub auto_extremes: bool,
    /// Candidates for the extreme glyph scan
    #[serde(default)]
    pub chars: Option<String>,
    /// Draw the bounds into this PNG file
    #[serde(default)]
    pub png: Option<PathBuf>,
}

/// A list of measurements to run in one go
#[derive(Debug, Clone, Deserialize)]
pub struct BatchScript {
    /// Folders to search for font files
    #[serde(default)]
    pub font_dirs: Vec<PathBuf>,

    /// Font files to register
    #[serde(default)]
    pub font_files: Vec<PathBuf>,

    /// Font files to download and register
    #[serde(default)]
    pub font_urls: Vec<String>,

    /// Register the fonts installed on this machine
    #[serde(default = "default_true")]
    pub system_fonts: bool,

    /// Where to write the results (RON)
    #[serde(default)]
    pub report: Option<PathBuf>,

    /// The measurements
    pub jobs: Vec<Job>,
}

impl BatchScript {
    /// Parse a script
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        Ok(ron::from_str(text)?)
    }

    /// Load a script, resolving relative paths against its folder
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path)?;
        let mut script = Self::parse(&text)?;
        if let Some(folder) = path.parent() {
            script.resolve_paths(folder);
        }
        Ok(script)
    }

    /// Make all relative paths relative to `folder`
    pub fn resolve_paths(&mut self, folder: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = folder.join(&*p);
            }
        };
        self.font_dirs.iter_mut().for_each(resolve);
        self.font_files.iter_mut().for_each(resolve);
        self.report.iter_mut().for_each(resolve);
        for job in &mut self.jobs {
            job.png.iter_mut().for_each(resolve);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use clap::Parser;

    use super::{BatchScript, Command, Options, DEFAULT_FONT, DEFAULT_TEXT};

    #[test]
    fn test_defaults() {
        let opt = Options::try_parse_from(["glyph-bounds", "measure"]).unwrap();
        assert_eq!(opt.fonts.font, DEFAULT_FONT);
        assert_eq!(opt.fonts.size, 24.0);
        assert!(opt.fonts.font_file.is_none());
        assert!(opt.fonts.font_url.is_none());
        assert!(opt.fonts.system_fonts());
        match opt.command {
            Command::Measure(text) => {
                assert_eq!(text.text, DEFAULT_TEXT);
                assert_eq!(text.tracking, 0.0);
                assert_eq!(text.width, None);
                assert!(!text.auto_extremes);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_render_args() {
        let opt = Options::try_parse_from([
            "glyph-bounds",
            "render",
            "-f",
            "Zapfino",
            "-s",
            "36",
            "-t",
            "Hello",
            "-k",
            "-1.5",
            "-x",
            "-d",
            "fonts",
            "-d",
            "more-fonts",
        ])
        .unwrap();
        assert_eq!(opt.fonts.font, "Zapfino");
        assert_eq!(opt.fonts.size, 36.0);
        assert_eq!(
            opt.fonts.font_dirs,
            vec![PathBuf::from("fonts"), PathBuf::from("more-fonts")]
        );
        match opt.command {
            Command::Render(render) => {
                assert_eq!(render.text.text, "Hello");
                assert_eq!(render.text.tracking, -1.5);
                assert!(render.text.auto_extremes);
                assert_eq!(render.out, None);
                assert_eq!(render.scale, 4.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_scan_chars() {
        let opt =
            Options::try_parse_from(["glyph-bounds", "scan", "-c", "ABCDEF123", "-u", "x.ttf"])
                .unwrap();
        assert_eq!(opt.fonts.font_file, Some(PathBuf::from("x.ttf")));
        match opt.command {
            Command::Scan(scan) => assert_eq!(scan.chars.as_deref(), Some("ABCDEF123")),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_font_url_without_system_fonts() {
        let opt = Options::try_parse_from([
            "glyph-bounds",
            "measure",
            "--font-url",
            "https://example.com/fonts/GreatVibes-Regular.ttf",
            "--no-system-fonts",
        ])
        .unwrap();
        assert_eq!(
            opt.fonts.font_url.as_deref(),
            Some("https://example.com/fonts/GreatVibes-Regular.ttf")
        );
        assert!(!opt.fonts.system_fonts());
    }

    #[test]
    fn test_batch_script_opts_out_of_system_fonts() {
        let script = BatchScript::parse(
            r#"(system_fonts: false, font_urls: ["https://example.com/a.ttf"], jobs: [(font: "A")])"#,
        )
        .unwrap();
        assert!(!script.system_fonts);
        assert_eq!(script.font_urls, vec!["https://example.com/a.ttf".to_owned()]);
    }

    #[test]
    fn test_missing_command() {
        assert!(Options::try_parse_from(["glyph-bounds"]).is_err());
    }

    #[test]
    fn test_batch_script() {
        let mut script = BatchScript::parse(
            r#"(
                font_dirs: ["fonts"],
                report: Some("out/report.ron"),
                jobs: [
                    (font: "Zapfino", size: 36.0, text: "Hello", tracking: 1.5,
                     auto_extremes: true, png: Some("zapfino.png")),
                    (font: "Apple Chancery"),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(script.jobs.len(), 2);
        assert!(script.system_fonts);
        assert!(script.font_urls.is_empty());
        let second = &script.jobs[1];
        assert_eq!(second.size, 24.0);
        assert_eq!(second.text, DEFAULT_TEXT);
        assert_eq!(second.tracking, 0.0);
        assert!(second.png.is_none());

        script.resolve_paths(Path::new("/work"));
        assert_eq!(script.font_dirs, vec![PathBuf::from("/work/fonts")]);
        assert_eq!(script.report, Some(PathBuf::from("/work/out/report.ron")));
        assert_eq!(script.jobs[0].png, Some(PathBuf::from("/work/zapfino.png")));
    }

    #[test]
    fn test_load_resolves_against_script_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.ron");
        std::fs::write(
            &path,
            r#"(font_files: ["fonts/Script.ttf", "/abs/Other.otf"], jobs: [(font: "Script")])"#,
        )
        .unwrap();
        let script = BatchScript::load(&path).unwrap();
        assert_eq!(
            script.font_files,
            vec![dir.path().join("fonts/Script.ttf"), PathBuf::from("/abs/Other.otf")]
        );
        assert!(BatchScript::load(&dir.path().join("missing.ron")).is_err());
    }

    #[test]
    fn test_batch_script_needs_jobs() {
        assert!(BatchScript::parse("(font_dirs: [])").is_err());
    }
}
