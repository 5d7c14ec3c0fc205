// APIC (attached picture) frame

use std::ops::Range;

use base64::Engine;
use serde::{Serialize, Serializer};

use crate::error::{Result, TagError};
use crate::options::ParseOptions;
use crate::utils::encoding::{decode_latin1, decode_text, split_terminated, TextEncoding};

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// Picture types according to the ID3v2 APIC definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureType {
    Other = 0,
    FileIcon = 1,
    OtherFileIcon = 2,
    CoverFront = 3,
    CoverBack = 4,
    LeafletPage = 5,
    Media = 6,
    LeadArtist = 7,
    Artist = 8,
    Conductor = 9,
    Band = 10,
    Composer = 11,
    Lyricist = 12,
    RecordingLocation = 13,
    DuringRecording = 14,
    DuringPerformance = 15,
    VideoScreenCapture = 16,
    BrightColouredFish = 17,
    Illustration = 18,
    BandLogo = 19,
    PublisherLogo = 20,
}

impl PictureType {
    /// Map a picture-type code. Codes outside the defined table return `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        let kind = match code {
            0 => PictureType::Other,
            1 => PictureType::FileIcon,
            2 => PictureType::OtherFileIcon,
            3 => PictureType::CoverFront,
            4 => PictureType::CoverBack,
            5 => PictureType::LeafletPage,
            6 => PictureType::Media,
            7 => PictureType::LeadArtist,
            8 => PictureType::Artist,
            9 => PictureType::Conductor,
            10 => PictureType::Band,
            11 => PictureType::Composer,
            12 => PictureType::Lyricist,
            13 => PictureType::RecordingLocation,
            14 => PictureType::DuringRecording,
            15 => PictureType::DuringPerformance,
            16 => PictureType::VideoScreenCapture,
            17 => PictureType::BrightColouredFish,
            18 => PictureType::Illustration,
            19 => PictureType::BandLogo,
            20 => PictureType::PublisherLogo,
            _ => return None,
        };
        Some(kind)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PictureType::Other => "Other",
            PictureType::FileIcon => "File icon",
            PictureType::OtherFileIcon => "Other file icon",
            PictureType::CoverFront => "Cover (front)",
            PictureType::CoverBack => "Cover (back)",
            PictureType::LeafletPage => "Leaflet page",
            PictureType::Media => "Media",
            PictureType::LeadArtist => "Lead artist",
            PictureType::Artist => "Artist",
            PictureType::Conductor => "Conductor",
            PictureType::Band => "Band",
            PictureType::Composer => "Composer",
            PictureType::Lyricist => "Lyricist",
            PictureType::RecordingLocation => "Recording location",
            PictureType::DuringRecording => "During recording",
            PictureType::DuringPerformance => "During performance",
            PictureType::VideoScreenCapture => "Video screen capture",
            PictureType::BrightColouredFish => "Bright coloured fish",
            PictureType::Illustration => "Illustration",
            PictureType::BandLogo => "Band logo",
            PictureType::PublisherLogo => "Publisher logo",
        }
    }
}

/// Decoded APIC frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Picture {
    pub mime_type: String,
    /// Raw picture-type code, see [`PictureType::from_code`]
    pub picture_type: u8,
    pub description: String,
    #[serde(serialize_with = "serialize_base64")]
    pub data: Vec<u8>,
}

impl Picture {
    /// Decode an APIC body:
    /// `[encoding][mime type]\0[picture type][description]\0[image bytes]`.
    ///
    /// The MIME type is always single-byte text. The description terminator
    /// follows the frame's encoding. Image bytes are passed through unchecked
    /// for every MIME type.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let (&encoding, rest) = body
            .split_first()
            .ok_or(TagError::MalformedPicture("empty body"))?;
        let encoding = TextEncoding::from_byte(encoding);

        let (mime_type, rest) = split_terminated(rest, TextEncoding::Latin1)
            .ok_or(TagError::MalformedPicture("unterminated MIME type"))?;
        let (&picture_type, rest) = rest
            .split_first()
            .ok_or(TagError::MalformedPicture("missing picture type"))?;
        let (description, data) = split_terminated(rest, encoding)
            .ok_or(TagError::MalformedPicture("unterminated description"))?;

        Ok(Picture {
            mime_type: decode_latin1(mime_type),
            picture_type,
            description: decode_text(description, encoding),
            data: data.to_vec(),
        })
    }

    /// Decode an APIC body that sits at `body_offset` inside `tag`.
    ///
    /// With [`ParseOptions::recover_jpeg_span`] set, a JPEG payload is
    /// re-sliced from its SOI marker to the last EOI marker anywhere later in
    /// the tag. The result may extend past the declared frame length. Files
    /// written with a wrong APIC size still yield the whole image this way,
    /// and an embedded EXIF thumbnail cannot end the image early.
    pub fn parse_in_tag(
        body: &[u8],
        tag: &[u8],
        body_offset: usize,
        options: &ParseOptions,
    ) -> Result<Self> {
        let mut picture = Self::parse(body)?;

        if options.recover_jpeg_span && picture.is_jpeg() {
            let image_offset = body_offset + body.len() - picture.data.len();
            match jpeg_span(tag, image_offset) {
                Some(span) => {
                    if span.len() != picture.data.len() {
                        tracing::debug!(
                            declared = picture.data.len(),
                            recovered = span.len(),
                            "re-sliced JPEG artwork from markers"
                        );
                    }
                    picture.data = tag[span].to_vec();
                }
                None => tracing::warn!("JPEG artwork lacks SOI/EOI markers, keeping declared bytes"),
            }
        }

        Ok(picture)
    }

    pub fn is_jpeg(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case("image/jpeg") || self.mime_type.eq_ignore_ascii_case("image/jpg")
    }

    pub fn kind(&self) -> Option<PictureType> {
        PictureType::from_code(self.picture_type)
    }

    /// File extension matching the MIME type
    pub fn extension(&self) -> &'static str {
        match self.mime_type.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "image/bmp" => "bmp",
            "image/tiff" => "tiff",
            _ => "bin",
        }
    }
}

/// Span of a JPEG image that must start at `image_offset` and ends at the
/// last EOI marker in the rest of the tag.
fn jpeg_span(tag: &[u8], image_offset: usize) -> Option<Range<usize>> {
    let region = tag.get(image_offset..)?;
    if !region.starts_with(&JPEG_SOI) {
        return None;
    }
    let eoi = region.windows(2).rposition(|pair| pair == JPEG_EOI)?;
    Some(image_offset..image_offset + eoi + JPEG_EOI.len())
}

fn serialize_base64<T, S>(data: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: Serializer,
{
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(data.as_ref()))
}
