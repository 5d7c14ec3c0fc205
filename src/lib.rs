//! id3scan - ID3v2.3 tag reader
//!
//! Reads the ID3v2 tag at the start of an MP3 file into a map of decoded
//! frames (text, attached picture, comment, user URL) and builds a
//! [`TagRecord`] with stable field names from it.
//!
//! A source without an `"ID3"` header is not an error: every entry point
//! returns `Ok(None)` for it. All other problems come back as [`TagError`]
//! and no partial result is returned alongside them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub mod error;
pub mod field_mapping;
pub mod id3;
pub mod options;
pub mod record;
pub mod utils;

pub use error::{Result, TagError};
pub use field_mapping::{FieldMappings, StandardField};
pub use id3::{Comment, DecodedFrame, FrameMap, Id3Tag, Picture, PictureType, TagHeader, UrlLink};
pub use options::ParseOptions;
pub use record::TagRecord;

/// Read a tag from a byte source positioned at its start.
pub fn read_tag<R: Read>(reader: &mut R) -> Result<Option<Id3Tag>> {
    read_tag_with(reader, &ParseOptions::default())
}

pub fn read_tag_with<R: Read>(reader: &mut R, options: &ParseOptions) -> Result<Option<Id3Tag>> {
    Id3Tag::read(reader, options)
}

/// Parse a tag from an in-memory copy of the file's leading bytes.
pub fn parse_tag(source: &[u8]) -> Result<Option<Id3Tag>> {
    parse_tag_with(source, &ParseOptions::default())
}

pub fn parse_tag_with(source: &[u8], options: &ParseOptions) -> Result<Option<Id3Tag>> {
    Id3Tag::parse(source, options)
}

/// Open `path` and read its tag.
pub fn read_tag_from_path<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Option<Id3Tag>> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading tag");
    let mut reader = BufReader::new(File::open(path)?);
    read_tag_with(&mut reader, options)
}
