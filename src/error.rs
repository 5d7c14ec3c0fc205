// Error types for tag parsing

use thiserror::Error;

/// Everything that can go wrong while reading an ID3v2 tag.
///
/// A file without an ID3v2 header is not an error: the entry points return
/// `Ok(None)` for that case.
#[derive(Debug, Error)]
pub enum TagError {
    /// An error originating from the underlying byte source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A fixed-width field was given fewer bytes than it needs.
    #[error("Invalid length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },

    /// The header announces a version other than ID3v2.3.
    #[error("Unsupported ID3 version: 2.{major}.{revision}")]
    UnsupportedVersion { major: u8, revision: u8 },

    /// The source ended inside the 10-byte tag header.
    #[error("Truncated header: expected 10 bytes, found {found}")]
    TruncatedHeader { found: usize },

    /// The header declares more tag bytes than the source holds.
    #[error("Truncated tag: header declares {declared} bytes, only {available} available")]
    TruncatedTag { declared: u32, available: usize },

    /// A frame's declared size runs past the end of the tag region.
    #[error("Malformed frame {frame_id}: size {size} exceeds the {remaining} bytes left in the tag")]
    MalformedFrame {
        frame_id: String,
        size: u32,
        remaining: usize,
    },

    /// A text frame with no body, not even the encoding byte.
    #[error("Empty frame: {frame_id}")]
    EmptyFrame { frame_id: String },

    #[error("Malformed APIC frame: {0}")]
    MalformedPicture(&'static str),

    #[error("Malformed COMM frame: {0}")]
    MalformedComment(&'static str),

    #[error("Malformed WXXX frame: {0}")]
    MalformedUrl(&'static str),
}

/// A convenience `Result` alias using [`TagError`].
pub type Result<T> = std::result::Result<T, TagError>;
