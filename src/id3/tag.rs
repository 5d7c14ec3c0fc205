// A complete ID3v2 tag: header plus decoded frames

use std::io::Read;

use serde::Serialize;

use crate::error::Result;
use crate::id3::frames::{walk_frames, DecodedFrame, FrameMap};
use crate::id3::header::TagHeader;
use crate::options::ParseOptions;
use crate::record::TagRecord;

/// ID3v2 tag structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Id3Tag {
    pub header: TagHeader,
    pub frames: FrameMap,
}

impl Id3Tag {
    /// Parse a tag from an in-memory buffer that starts at the file's first byte.
    pub fn parse(source: &[u8], options: &ParseOptions) -> Result<Option<Self>> {
        let Some(header) = TagHeader::parse(source, options)? else {
            return Ok(None);
        };
        let region = header.tag_region(source)?;
        let frames = walk_frames(region, options)?;
        Ok(Some(Id3Tag { header, frames }))
    }

    /// Read a tag from `reader`, consuming the header and the tag region only.
    pub fn read<R: Read>(reader: &mut R, options: &ParseOptions) -> Result<Option<Self>> {
        let Some(header) = TagHeader::read(reader, options)? else {
            return Ok(None);
        };
        let region = header.read_tag_region(reader)?;
        let frames = walk_frames(&region, options)?;
        Ok(Some(Id3Tag { header, frames }))
    }

    pub fn frame(&self, frame_id: &str) -> Option<&DecodedFrame> {
        self.frames.get(frame_id)
    }

    /// Build the user-facing record from the frame map.
    pub fn record(&self) -> TagRecord {
        TagRecord::from_frames(&self.frames)
    }
}
