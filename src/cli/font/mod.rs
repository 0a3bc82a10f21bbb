use std::path::PathBuf;

use color_eyre::eyre::{self, eyre, WrapErr};
use glyph_bounds::{OracleError, ShapingOracle};
use log::{info, warn};
use ttf_oracle::{FontRegistry, TtfFont, TtfOracle};

use crate::cli::opt::FontOptions;

/// Where to look for fonts
#[derive(Debug, Default, Clone, Copy)]
pub struct FontSources<'a> {
    /// Folders to search recursively
    pub dirs: &'a [PathBuf],
    /// Individual files; failing to load one of these is an error
    pub files: &'a [PathBuf],
    /// Fonts to download; failing to load one of these is an error
    pub urls: &'a [String],
    /// Whether to register the fonts installed on this machine
    pub system: bool,
}

/// Download a font file
pub fn download_font(url: &str) -> eyre::Result<Vec<u8>> {
    info!("Downloading font from {}", url);
    let response = reqwest::blocking::get(url)
        .wrap_err_with(|| format!("Failed to fetch font URL `{}`", url))?;
    if !response.status().is_success() {
        return Err(eyre!(
            "Failed to fetch font URL `{}` (Status: {})",
            url,
            response.status()
        ));
    }
    let bytes = response
        .bytes()
        .wrap_err_with(|| format!("Failed to read font from `{}`", url))?;
    Ok(bytes.to_vec())
}

impl<'a> FontSources<'a> {
    /// Register all fonts, returning the family names of the explicit
    /// files followed by those of the URLs
    pub fn load(&self, registry: &mut FontRegistry) -> eyre::Result<Vec<String>> {
        let mut families = Vec::with_capacity(self.files.len() + self.urls.len());
        for file in self.files {
            let family = registry
                .register_file(file)
                .wrap_err_with(|| format!("Failed to register font file `{}`", file.display()))?;
            families.push(family);
        }

        for url in self.urls {
            let data = download_font(url)?;
            let family = registry
                .register_font(data)
                .wrap_err_with(|| format!("Failed to register font from `{}`", url))?;
            info!("Registered font '{}' from {}", family, url);
            families.push(family);
        }

        for dir in self.dirs {
            if !dir.is_dir() {
                warn!("Font folder '{}' does not exist", dir.display());
                continue;
            }
            let count = registry.register_dir(dir);
            info!("Registered {} font faces from '{}'", count, dir.display());
        }

        if self.system {
            let count = registry.load_system_fonts();
            info!("Registered {} system font faces", count);
        }
        Ok(families)
    }
}

/// The oracle and the font name chosen on the command line
pub struct Session {
    /// The oracle with all fonts registered
    pub oracle: TtfOracle,
    /// The name of the font to measure
    pub font_name: String,
    /// The font file given with `--font-file`
    pub font_file: Option<PathBuf>,
    /// The font URL given with `--font-url`
    pub font_url: Option<String>,
    /// The font size in points
    pub size: f32,
}

impl Session {
    /// Register fonts as requested by `opt`
    ///
    /// If a font file or URL is given, its family name replaces `--font`.
    pub fn new(opt: &FontOptions) -> eyre::Result<Self> {
        let files: Vec<PathBuf> = opt.font_file.iter().cloned().collect();
        let urls: Vec<String> = opt.font_url.iter().cloned().collect();
        let sources = FontSources {
            dirs: &opt.font_dirs,
            files: &files,
            urls: &urls,
            system: opt.system_fonts(),
        };
        let mut registry = FontRegistry::new();
        let families = sources.load(&mut registry)?;

        let font_name = match families.into_iter().next() {
            Some(family) => {
                info!("Using font name from file: {}", family);
                family
            }
            None => opt.font.clone(),
        };
        Ok(Self {
            oracle: TtfOracle::new(registry),
            font_name,
            font_file: opt.font_file.clone(),
            font_url: opt.font_url.clone(),
            size: opt.size,
        })
    }

    /// Create the font handle
    pub fn font(&self) -> eyre::Result<TtfFont> {
        open_font(&self.oracle, &self.font_name, self.size)
    }

    /// The option that selects this font again
    pub fn font_arg(&self) -> String {
        match (&self.font_file, &self.font_url) {
            (Some(path), _) => format!("-u {:?}", path.display().to_string()),
            (None, Some(url)) => format!("--font-url {:?}", url),
            (None, None) => format!("-f {:?}", self.font_name),
        }
    }
}

/// Create a font, pointing to `list` when it is not registered
pub fn open_font(oracle: &TtfOracle, name: &str, size: f32) -> eyre::Result<TtfFont> {
    match oracle.create_font(name, size) {
        Ok(font) => Ok(font),
        Err(OracleError::FontNotFound { name }) => Err(eyre!(
            "Font '{}' is not registered ({} faces known). \
             Use the `list` command to see available fonts, or pass --font-file / --font-dir",
            name,
            oracle.registry().len()
        )),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use ttf_oracle::FontRegistry;

    use super::{download_font, Session};
    use crate::cli::opt::{Options, DEFAULT_FONT};

    fn session(args: &[&str]) -> color_eyre::Result<Session> {
        let opt = Options::try_parse_from(args.iter().copied()).unwrap();
        Session::new(&opt.fonts)
    }

    #[test]
    fn test_system_fonts_by_default() {
        let session = session(&["glyph-bounds", "list"]).unwrap();
        let installed = FontRegistry::new().load_system_fonts();
        assert_eq!(session.oracle.registry().len(), installed);
        assert_eq!(session.font_name, DEFAULT_FONT);
        assert_eq!(session.font_arg(), "-f \"Helvetica\"");
    }

    #[test]
    fn test_no_system_fonts() {
        let session = session(&["glyph-bounds", "--no-system-fonts", "list"]).unwrap();
        assert!(session.oracle.registry().is_empty());
        let err = session.font().unwrap_err();
        assert!(err.to_string().contains("`list`"));
    }

    #[test]
    fn test_bad_font_url() {
        assert!(download_font("not a url").is_err());
        let result = session(&[
            "glyph-bounds",
            "--no-system-fonts",
            "--font-url",
            "not a url",
            "list",
        ]);
        assert!(result.is_err());
    }
}
