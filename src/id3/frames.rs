// ID3v2.3 frame walking and per-frame decoding

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, TagError};
use crate::id3::comment::Comment;
use crate::id3::header::HEADER_SIZE;
use crate::id3::picture::Picture;
use crate::id3::synchsafe;
use crate::id3::url::UrlLink;
use crate::options::ParseOptions;
use crate::utils::encoding::{decode_text, TextEncoding};

/// Frame identifiers with a dedicated decoder
pub mod frame_ids {
    pub const TITLE: &str = "TIT2";
    pub const ALBUM: &str = "TALB";
    pub const PUBLISHER: &str = "TPUB";
    pub const GENRE: &str = "TCON";
    pub const YEAR: &str = "TYER";
    pub const TRACK: &str = "TRCK";
    pub const DISC: &str = "TPOS";
    pub const ARTIST: &str = "TPE1";
    pub const ALBUM_ARTIST: &str = "TPE2";
    pub const COMPOSER: &str = "TCOM";
    pub const USER_TEXT: &str = "TXXX";
    pub const PICTURE: &str = "APIC";
    pub const COMMENT: &str = "COMM";
    pub const USER_URL: &str = "WXXX";
}

/// Decoded frames keyed by frame identifier, in identifier order
pub type FrameMap = BTreeMap<String, DecodedFrame>;

/// The 10-byte header in front of every frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub frame_id: String,
    /// Body length, excluding this header
    pub frame_size: u32,
    pub flags: u16,
}

impl FrameHeader {
    /// Parse a frame header from the first 10 bytes of `bytes`.
    ///
    /// Returns `Ok(None)` when the identifier is not four uppercase ASCII
    /// letters or digits, which marks the start of padding.
    pub fn parse(bytes: &[u8]) -> Result<Option<Self>> {
        let header = bytes.get(..HEADER_SIZE).ok_or(TagError::InvalidLength {
            expected: HEADER_SIZE,
            found: bytes.len(),
        })?;

        let id = &header[..4];
        if !is_valid_frame_id(id) {
            return Ok(None);
        }

        Ok(Some(FrameHeader {
            // Validated as ASCII above.
            frame_id: id.iter().map(|&b| b as char).collect(),
            frame_size: synchsafe::decode(&header[4..8])?,
            flags: u16::from_be_bytes([header[8], header[9]]),
        }))
    }
}

/// Content of one frame after decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodedFrame {
    Text(String),
    Picture(Picture),
    Comment(Comment),
    Url(UrlLink),
    /// Identifier without a decoder. Never stored in a [`FrameMap`].
    Skipped,
}

impl DecodedFrame {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DecodedFrame::Text(text) => Some(text),
            _ => None,
        }
    }
}

fn is_valid_frame_id(id: &[u8]) -> bool {
    id.len() == 4 && id.iter().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// `T` plus three alphanumerics, except the user-defined `TXXX`.
pub fn is_text_frame(frame_id: &str) -> bool {
    let bytes = frame_id.as_bytes();
    bytes.len() == 4
        && bytes[0] == b'T'
        && bytes[1..].iter().all(u8::is_ascii_alphanumeric)
        && frame_id != frame_ids::USER_TEXT
}

/// Decode a text information frame body: `[encoding][text]`.
pub fn decode_text_frame(frame_id: &str, body: &[u8]) -> Result<String> {
    let (&encoding, text) = body.split_first().ok_or_else(|| TagError::EmptyFrame {
        frame_id: frame_id.to_string(),
    })?;
    Ok(decode_text(text, TextEncoding::from_byte(encoding)))
}

/// Where a frame body sits, for decoders that look beyond their own body
struct FrameContext<'a> {
    tag: &'a [u8],
    body_offset: usize,
    options: &'a ParseOptions,
}

fn decode_frame(frame_id: &str, body: &[u8], context: &FrameContext<'_>) -> Result<DecodedFrame> {
    let decoded = match frame_id {
        frame_ids::PICTURE => DecodedFrame::Picture(Picture::parse_in_tag(
            body,
            context.tag,
            context.body_offset,
            context.options,
        )?),
        frame_ids::COMMENT => DecodedFrame::Comment(Comment::parse(body)?),
        frame_ids::USER_URL => DecodedFrame::Url(UrlLink::parse(body)?),
        id if is_text_frame(id) => DecodedFrame::Text(decode_text_frame(id, body)?),
        _ => DecodedFrame::Skipped,
    };
    Ok(decoded)
}

/// Walk the frame region front to back and decode every recognised frame.
///
/// The walk stops quietly at trailing padding: fewer than 10 bytes left, or
/// an identifier that is not a plausible frame id. It fails when a frame's
/// declared size runs past the region or a decoder rejects a body. When an
/// identifier occurs more than once the last occurrence wins.
pub fn walk_frames(tag: &[u8], options: &ParseOptions) -> Result<FrameMap> {
    let mut frames = FrameMap::new();
    let mut pos = 0;

    while tag.len() - pos >= HEADER_SIZE {
        let Some(header) = FrameHeader::parse(&tag[pos..])? else {
            tracing::trace!(offset = pos, padding = tag.len() - pos, "reached padding");
            break;
        };

        let body_offset = pos + HEADER_SIZE;
        let remaining = tag.len() - body_offset;
        let size = header.frame_size as usize;
        if size > remaining {
            return Err(TagError::MalformedFrame {
                frame_id: header.frame_id,
                size: header.frame_size,
                remaining,
            });
        }

        let body = &tag[body_offset..body_offset + size];
        pos = body_offset + size;

        let context = FrameContext {
            tag,
            body_offset,
            options,
        };
        match decode_frame(&header.frame_id, body, &context)? {
            DecodedFrame::Skipped => {
                tracing::trace!(frame_id = %header.frame_id, size, "skipping frame");
            }
            decoded => {
                tracing::debug!(frame_id = %header.frame_id, size, "decoded frame");
                if frames.insert(header.frame_id.clone(), decoded).is_some() {
                    tracing::debug!(frame_id = %header.frame_id, "duplicate frame, keeping the last one");
                }
            }
        }
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frame(id: &str, body: &[u8]) -> Vec<u8> {
        let mut bytes = id.as_bytes().to_vec();
        bytes.extend_from_slice(&synchsafe::encode(body.len() as u32));
        bytes.extend_from_slice(&[0, 0]);
        bytes.extend_from_slice(body);
        bytes
    }

    fn walk(tag: &[u8]) -> Result<FrameMap> {
        walk_frames(tag, &ParseOptions::default())
    }

    #[test]
    fn decodes_latin1_title() {
        let tag = frame("TIT2", b"\x00Hello\x00");
        let frames = walk(&tag).unwrap();
        assert_eq!(frames["TIT2"], DecodedFrame::Text("Hello".into()));
    }

    #[test]
    fn decodes_utf16_title_with_bom() {
        let tag = frame("TIT2", &[1, 0xFF, 0xFE, b'H', 0, b'i', 0]);
        let frames = walk(&tag).unwrap();
        assert_eq!(frames["TIT2"].as_text(), Some("Hi"));
    }

    #[test]
    fn unknown_frames_do_not_stop_the_walk() {
        let mut tag = frame("XXXX", b"\x01\x02\x03");
        tag.extend(frame("TXXX", b"\x00desc\x00value"));
        tag.extend(frame("PRIV", b"owner\x00\xFF\xFF"));
        tag.extend(frame("TALB", b"\x00Album"));

        let frames = walk(&tag).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames["TALB"].as_text(), Some("Album"));
    }

    #[test]
    fn padding_ends_the_walk() {
        let mut tag = frame("TPE1", b"\x00Artist");
        tag.extend_from_slice(&[0u8; 32]);
        assert_eq!(walk(&tag).unwrap().len(), 1);

        let mut tag = frame("TPE1", b"\x00Artist");
        tag.extend_from_slice(&[0u8; 9]);
        assert_eq!(walk(&tag).unwrap().len(), 1);
    }

    #[test]
    fn lowercase_identifier_is_treated_as_padding() {
        let mut tag = frame("TIT2", b"\x00One");
        tag.extend(frame("tit2", b"\x00Two"));
        tag.extend(frame("TALB", b"\x00Three"));
        let frames = walk(&tag).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames["TIT2"].as_text(), Some("One"));
    }

    #[test]
    fn oversized_frame_is_malformed() {
        let mut tag = b"TIT2".to_vec();
        tag.extend_from_slice(&synchsafe::encode(100));
        tag.extend_from_slice(&[0, 0]);
        tag.extend_from_slice(b"\x00short");

        match walk(&tag) {
            Err(TagError::MalformedFrame { frame_id, size: 100, remaining: 6 }) => assert_eq!(frame_id, "TIT2"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_text_frame_fails() {
        let tag = frame("TIT2", b"");
        assert!(matches!(walk(&tag), Err(TagError::EmptyFrame { .. })));
    }

    #[test]
    fn last_duplicate_wins() {
        let mut tag = frame("TIT2", b"\x00First");
        tag.extend(frame("TIT2", b"\x00Second"));
        assert_eq!(walk(&tag).unwrap()["TIT2"].as_text(), Some("Second"));
    }

    #[test]
    fn dispatches_structured_frames() {
        let mut tag = frame("COMM", b"\x00engshort\x00full text");
        tag.extend(frame("WXXX", b"\x00\x00http://example.org"));
        tag.extend(frame("APIC", b"\x00image/png\x00\x03\x00\x89PNG"));

        let frames = walk(&tag).unwrap();
        assert!(matches!(&frames["COMM"], DecodedFrame::Comment(c) if c.text == "full text"));
        assert!(matches!(&frames["WXXX"], DecodedFrame::Url(u) if u.url == "http://example.org"));
        assert!(matches!(&frames["APIC"], DecodedFrame::Picture(p) if p.data == b"\x89PNG"));
    }

    #[test]
    fn text_frame_classification() {
        assert!(is_text_frame("TIT2"));
        assert!(is_text_frame("TYER"));
        assert!(!is_text_frame("TXXX"));
        assert!(!is_text_frame("APIC"));
        assert!(!is_text_frame("TIT"));
    }

    #[test]
    fn frame_header_rejects_short_input() {
        assert!(matches!(
            FrameHeader::parse(b"TIT2\x00"),
            Err(TagError::InvalidLength { expected: 10, found: 5 })
        ));
    }

    proptest! {
        #[test]
        fn oversized_sizes_never_read_out_of_bounds(
            declared in 0u32..0x0FFF_FFFF,
            body in prop::collection::vec(any::<u8>(), 0..64),
        ) {
            let mut tag = b"TCON".to_vec();
            tag.extend_from_slice(&synchsafe::encode(declared));
            tag.extend_from_slice(&[0, 0]);
            tag.extend_from_slice(&body);

            let result = walk(&tag);
            if declared as usize > body.len() {
                let is_malformed = matches!(result, Err(TagError::MalformedFrame { .. }));
                prop_assert!(is_malformed);
            }
        }
    }
}
