// ID3v2 tag header

use std::io::Read;

use serde::Serialize;

use crate::error::{Result, TagError};
use crate::id3::synchsafe;
use crate::options::ParseOptions;
use crate::utils::io::{read_limited, read_up_to};

/// Size of the fixed tag header, and of every frame header.
pub const HEADER_SIZE: usize = 10;

/// The fixed 10-byte header at the start of an ID3v2 tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagHeader {
    /// (major, revision), e.g. `(3, 0)` for ID3v2.3.0
    pub version: (u8, u8),
    pub flags: u8,
    /// Size of the frame region, excluding this header
    pub tag_size: u32,
}

impl TagHeader {
    const ID: [u8; 3] = *b"ID3";

    /// Parse a header from the start of `bytes`.
    ///
    /// Returns `Ok(None)` when the source does not start with `"ID3"`,
    /// whatever its length.
    pub fn parse(bytes: &[u8], options: &ParseOptions) -> Result<Option<Self>> {
        if !bytes.starts_with(&Self::ID) {
            return Ok(None);
        }
        if bytes.len() < HEADER_SIZE {
            return Err(TagError::TruncatedHeader { found: bytes.len() });
        }

        let (major, revision) = (bytes[3], bytes[4]);
        if !options.accepts_version(major) {
            return Err(TagError::UnsupportedVersion { major, revision });
        }

        let header = TagHeader {
            version: (major, revision),
            flags: bytes[5],
            tag_size: synchsafe::decode(&bytes[6..HEADER_SIZE])?,
        };
        tracing::debug!(
            version = %header.version_string(),
            tag_size = header.tag_size,
            "found ID3v2 header"
        );
        Ok(Some(header))
    }

    /// Read a header from `reader`, leaving it positioned at the first frame.
    pub fn read<R: Read>(reader: &mut R, options: &ParseOptions) -> Result<Option<Self>> {
        let mut buffer = [0u8; HEADER_SIZE];
        let n = read_up_to(reader, &mut buffer)?;
        Self::parse(&buffer[..n], options)
    }

    /// Slice the frame region `[10, 10 + tag_size)` out of the whole source.
    pub fn tag_region<'a>(&self, source: &'a [u8]) -> Result<&'a [u8]> {
        let available = source.len().saturating_sub(HEADER_SIZE);
        let end = HEADER_SIZE + self.tag_size as usize;
        source.get(HEADER_SIZE..end).ok_or(TagError::TruncatedTag {
            declared: self.tag_size,
            available,
        })
    }

    /// Read the frame region from a reader positioned just past the header.
    pub fn read_tag_region<R: Read>(&self, reader: &mut R) -> Result<Vec<u8>> {
        let region = read_limited(reader, self.tag_size as usize)?;
        if region.len() < self.tag_size as usize {
            return Err(TagError::TruncatedTag {
                declared: self.tag_size,
                available: region.len(),
            });
        }
        Ok(region)
    }

    /// Human-readable version, e.g. `"ID3v2.3"`
    pub fn version_string(&self) -> String {
        format!("ID3v2.{}", self.version.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn header(version: u8, size: [u8; 4]) -> Vec<u8> {
        let mut bytes = b"ID3".to_vec();
        bytes.extend_from_slice(&[version, 0, 0]);
        bytes.extend_from_slice(&size);
        bytes
    }

    #[test]
    fn parses_v23_header() {
        let bytes = header(3, [0, 0, 0x02, 0x01]);
        let parsed = TagHeader::parse(&bytes, &ParseOptions::default()).unwrap().unwrap();
        assert_eq!(parsed.version, (3, 0));
        assert_eq!(parsed.tag_size, 257);
        assert_eq!(parsed.version_string(), "ID3v2.3");
    }

    #[test]
    fn missing_identifier_is_absent() {
        let options = ParseOptions::default();
        assert!(TagHeader::parse(b"", &options).unwrap().is_none());
        assert!(TagHeader::parse(b"ID", &options).unwrap().is_none());
        assert!(TagHeader::parse(b"RIFF\x00\x00\x00\x00\x00\x00\x00", &options).unwrap().is_none());
    }

    #[test]
    fn short_header_is_truncated() {
        match TagHeader::parse(b"ID3\x03\x00", &ParseOptions::default()) {
            Err(TagError::TruncatedHeader { found: 5 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn other_versions_are_rejected_with_their_number() {
        for version in [2u8, 4] {
            let bytes = header(version, [0; 4]);
            match TagHeader::parse(&bytes, &ParseOptions::default()) {
                Err(TagError::UnsupportedVersion { major, .. }) => assert_eq!(major, version),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn lenient_options_accept_v24() {
        let bytes = header(4, [0; 4]);
        let options = ParseOptions::default().with_strict_versions(false);
        assert!(TagHeader::parse(&bytes, &options).unwrap().is_some());
    }

    #[test]
    fn region_must_fit_in_source() {
        let mut bytes = header(3, [0, 0, 0, 5]);
        bytes.extend_from_slice(&[1, 2, 3]);
        let parsed = TagHeader::parse(&bytes, &ParseOptions::default()).unwrap().unwrap();
        match parsed.tag_region(&bytes) {
            Err(TagError::TruncatedTag { declared: 5, available: 3 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }

        bytes.extend_from_slice(&[4, 5, 0xFF]);
        assert_eq!(parsed.tag_region(&bytes).unwrap(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn reader_advances_past_header() {
        let mut bytes = header(3, [0, 0, 0, 2]);
        bytes.extend_from_slice(&[9, 8]);
        let mut cursor = Cursor::new(bytes);
        let parsed = TagHeader::read(&mut cursor, &ParseOptions::default()).unwrap().unwrap();
        assert_eq!(cursor.position(), HEADER_SIZE as u64);
        assert_eq!(parsed.read_tag_region(&mut cursor).unwrap(), vec![9, 8]);
    }
}
