//! # Font registration
//!
//! Registration is the only place where the set of resolvable font names
//! changes. It takes `&mut self`, so it is over before any measurement
//! that borrows the registry can begin.
//!
//! Discovery and style matching are done by a [`fontdb::Database`].

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use fontdb::{Database, FaceInfo, Family, Query, Source, Stretch, Style, Weight, ID};
use log::{debug, info};
use thiserror::Error;
use ttf_parser::Face;

#[derive(Debug, Error)]
/// Error when registering a font
pub enum RegisterError {
    /// The IO failed
    #[error("Failed to read '{}'", path.display())]
    Io {
        /// The file that was read
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },
    /// The parsing failed
    #[error("Parsing face {index} failed: {source}")]
    Parse {
        /// Index of the face in the collection
        index: u32,
        /// The underlying error
        source: ttf_parser::FaceParsingError,
    },
    /// The data contains no usable faces
    #[error("No named font faces found")]
    NoFaces,
}

/// The bytes of one face, detached from the registry
#[derive(Clone)]
pub struct FaceData {
    data: Arc<[u8]>,
    index: u32,
}

#[rustfmt::skip]
impl FaceData {
    /// The font data (possibly a whole collection)
    pub fn data(&self) -> &[u8] { &self.data }
    /// Index of the face within [`Self::data`]
    pub fn index(&self) -> u32 { self.index }
    /// Parse the face
    pub fn face(&self) -> Result<Face<'_>, ttf_parser::FaceParsingError> { Face::parse(&self.data, self.index) }
}

/// The first (English, if present) family name of a face
pub fn family_of(face: &FaceInfo) -> &str {
    face.families
        .first()
        .map(|(name, _)| name.as_str())
        .unwrap_or_default()
}

/// The file a face was loaded from, if any
pub fn source_path(face: &FaceInfo) -> Option<&Path> {
    match &face.source {
        Source::Binary(_) => None,
        Source::File(path) | Source::SharedFile(path, _) => Some(path.as_path()),
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// `name` with a trailing "Regular" removed
fn base_name(name: &str) -> Option<&str> {
    let split = name.len().checked_sub("regular".len() + 1)?;
    let (base, suffix) = (name.get(..split)?, name.get(split..)?);
    let suffix = suffix.to_lowercase();
    if suffix == "-regular" || suffix == " regular" {
        Some(base.trim_end())
    } else {
        None
    }
}

/// Check that every face in `data` parses
fn validate(data: &[u8]) -> Result<(), RegisterError> {
    let count = ttf_parser::fonts_in_collection(data).unwrap_or(1);
    if count == 0 {
        return Err(RegisterError::NoFaces);
    }
    for index in 0..count {
        Face::parse(data, index).map_err(|source| RegisterError::Parse { index, source })?;
    }
    Ok(())
}

/// The fonts that can be resolved by name
#[derive(Default)]
pub struct FontRegistry {
    db: Database,
}

impl FontRegistry {
    /// Create a new, empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// All registered faces
    pub fn faces(&self) -> impl Iterator<Item = &FaceInfo> + '_ {
        self.db.faces()
    }

    /// Get a specific face
    pub fn face(&self, id: ID) -> Option<&FaceInfo> {
        self.db.face(id)
    }

    /// The number of registered faces
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Whether no face has been registered
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// All family names, sorted and without duplicates
    pub fn families(&self) -> Vec<&str> {
        let mut families: Vec<&str> = self.db.faces().map(family_of).collect();
        families.sort_unstable();
        families.dedup();
        families
    }

    /// The regular upright face of `family`
    ///
    /// The family name must match exactly. Without a regular face, the
    /// closest style wins.
    pub fn query_family(&self, family: &str) -> Option<ID> {
        self.db.query(&Query {
            families: &[Family::Name(family)],
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        })
    }

    /// Find the face for `name`
    ///
    /// A family name selects the regular upright face of that family.
    /// Family and PostScript names match case-insensitively. A trailing
    /// "Regular" is ignored if nothing matches the whole name.
    pub fn resolve(&self, name: &str) -> Option<ID> {
        let name = name.trim();
        self.resolve_exact(name)
            .or_else(|| base_name(name).and_then(|base| self.resolve_exact(base)))
    }

    fn resolve_exact(&self, name: &str) -> Option<ID> {
        let family = self
            .db
            .faces()
            .flat_map(|face| face.families.iter())
            .map(|(family, _)| family.as_str())
            .find(|family| same_name(family, name));
        if let Some(id) = family.and_then(|family| self.query_family(family)) {
            return Some(id);
        }
        self.db
            .faces()
            .find(|face| same_name(&face.post_script_name, name))
            .map(|face| face.id)
    }

    /// Copy out the bytes of a face
    pub fn load(&self, id: ID) -> Option<FaceData> {
        self.db.with_face_data(id, |data, index| FaceData {
            data: Arc::from(data),
            index,
        })
    }

    /// Register font data, returning the family name of its first face
    ///
    /// Collections register every face they contain.
    pub fn register_font(&mut self, data: Vec<u8>) -> Result<String, RegisterError> {
        validate(&data)?;
        self.register(Source::Binary(Arc::new(data)))
    }

    /// Read and register a font file
    pub fn register_file(&mut self, path: &Path) -> Result<String, RegisterError> {
        let data = std::fs::read(path).map_err(|source| RegisterError::Io {
            path: path.to_owned(),
            source,
        })?;
        validate(&data)?;
        let family = self.register(Source::File(path.to_owned()))?;
        info!("Registered font '{}' from '{}'", family, path.display());
        Ok(family)
    }

    fn register(&mut self, source: Source) -> Result<String, RegisterError> {
        let ids = self.db.load_font_source(source);
        for &id in ids.iter() {
            if let Some(face) = self.db.face(id) {
                debug!(
                    "Face {:?}: family {:?}, PostScript name {:?}, {:?} {:?}",
                    id,
                    family_of(face),
                    face.post_script_name,
                    face.weight,
                    face.style
                );
            }
        }
        ids.first()
            .and_then(|&id| self.db.face(id))
            .map(|face| family_of(face).to_owned())
            .ok_or(RegisterError::NoFaces)
    }

    /// Register every font file below `dir`
    ///
    /// Files that cannot be read or parsed are skipped with a warning.
    /// Returns the number of faces that were registered.
    pub fn register_dir(&mut self, dir: &Path) -> usize {
        let before = self.db.len();
        self.db.load_fonts_dir(dir);
        self.db.len() - before
    }

    /// Register the fonts installed on this machine
    ///
    /// Returns the number of faces that were registered.
    pub fn load_system_fonts(&mut self) -> usize {
        let before = self.db.len();
        self.db.load_system_fonts();
        self.db.len() - before
    }
}
