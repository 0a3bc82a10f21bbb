//! # Glyph bounds tool
//!
//! Command line front-end for the `glyph-bounds` crate, measuring text
//! set in TrueType/OpenType fonts.

pub mod cli;
