// User-facing tag record built from the decoded frame map

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::field_mapping::{FieldMappings, StandardField, ValueConverter};
use crate::id3::frames::{DecodedFrame, FrameMap};
use crate::id3::{Comment, Picture};

/// Metadata record with stable field names.
///
/// Text frames without a field of their own are kept in `extra`, keyed by
/// frame identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    pub album: Option<String>,
    /// Distinct lead artist, album artist and composer names, sorted
    pub artists: Vec<String>,
    pub artwork: Option<Picture>,
    pub comments: Option<Comment>,
    pub disc_number: Option<u32>,
    pub disc_total: Option<u32>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub title: Option<String>,
    pub track_number: Option<u32>,
    pub track_total: Option<u32>,
    pub url: Option<String>,
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl TagRecord {
    pub fn from_frames(frames: &FrameMap) -> Self {
        let mut record = TagRecord::default();
        let mut artists = BTreeSet::new();

        for (frame_id, frame) in frames {
            let Some(field) = FieldMappings::from_id3v2(frame_id) else {
                if let DecodedFrame::Text(text) = frame {
                    record.extra.insert(frame_id.clone(), text.clone());
                }
                continue;
            };

            match (field, frame) {
                (field, DecodedFrame::Text(text)) if field.is_artist() => {
                    if !text.is_empty() {
                        artists.insert(text.clone());
                    }
                }
                (StandardField::Title, DecodedFrame::Text(text)) => record.title = Some(text.clone()),
                (StandardField::Album, DecodedFrame::Text(text)) => record.album = Some(text.clone()),
                (StandardField::Publisher, DecodedFrame::Text(text)) => record.publisher = Some(text.clone()),
                (StandardField::Genre, DecodedFrame::Text(text)) => record.genre = Some(text.clone()),
                (StandardField::Year, DecodedFrame::Text(text)) => {
                    record.year = ValueConverter::parse_year(text);
                    if record.year.is_none() {
                        tracing::warn!(value = %text, "year is not a number");
                    }
                }
                (StandardField::TrackNumber, DecodedFrame::Text(text)) => {
                    (record.track_number, record.track_total) = ValueConverter::parse_position(text);
                    if record.track_number.is_none() {
                        tracing::warn!(value = %text, "track number is not a number");
                    }
                }
                (StandardField::DiscNumber, DecodedFrame::Text(text)) => {
                    (record.disc_number, record.disc_total) = ValueConverter::parse_position(text);
                }
                (StandardField::Artwork, DecodedFrame::Picture(picture)) => record.artwork = Some(picture.clone()),
                (StandardField::Comments, DecodedFrame::Comment(comment)) => record.comments = Some(comment.clone()),
                (StandardField::Url, DecodedFrame::Url(link)) => record.url = Some(link.url.clone()),
                (field, _) => {
                    tracing::debug!(frame_id = %frame_id, field = field.as_str(), "frame kind does not fit its field");
                }
            }
        }

        record.artists = artists.into_iter().collect();
        record
    }
}
