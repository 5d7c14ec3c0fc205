// Frame identifier to field name mapping
//
// Raw ID3v2 frame identifiers are stable but cryptic. This module gives each
// supported frame a user-facing field name and converts the few values that
// are numeric in the presentation layer.

use crate::id3::frames::frame_ids;

/// Fields of the user-facing tag record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardField {
    Title,
    Album,
    Publisher,
    Genre,
    Year,
    TrackNumber,
    DiscNumber,
    Artist1,
    Artist2,
    Composer,
    Artwork,
    Comments,
    Url,
}

impl StandardField {
    /// Every field, in frame-table order
    pub const ALL: [StandardField; 13] = [
        StandardField::Title,
        StandardField::Album,
        StandardField::Publisher,
        StandardField::Genre,
        StandardField::Year,
        StandardField::TrackNumber,
        StandardField::DiscNumber,
        StandardField::Artist1,
        StandardField::Artist2,
        StandardField::Composer,
        StandardField::Artwork,
        StandardField::Comments,
        StandardField::Url,
    ];

    /// Get standard field name (lowercase)
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardField::Title => "title",
            StandardField::Album => "album",
            StandardField::Publisher => "publisher",
            StandardField::Genre => "genre",
            StandardField::Year => "year",
            StandardField::TrackNumber => "track_number",
            StandardField::DiscNumber => "disc_number",
            StandardField::Artist1 => "artist1",
            StandardField::Artist2 => "artist2",
            StandardField::Composer => "composer",
            StandardField::Artwork => "artwork",
            StandardField::Comments => "comments",
            StandardField::Url => "url",
        }
    }

    /// Parse from a field name, ignoring case
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(name))
    }

    /// Fields merged into the record's artist list
    pub fn is_artist(&self) -> bool {
        matches!(self, StandardField::Artist1 | StandardField::Artist2 | StandardField::Composer)
    }
}

/// ID3v2.3 frame identifier mappings
pub struct FieldMappings;

impl FieldMappings {
    /// Get the frame identifier backing a standard field
    pub fn to_id3v2(field: StandardField) -> &'static str {
        match field {
            StandardField::Title => frame_ids::TITLE,
            StandardField::Album => frame_ids::ALBUM,
            StandardField::Publisher => frame_ids::PUBLISHER,
            StandardField::Genre => frame_ids::GENRE,
            StandardField::Year => frame_ids::YEAR,
            StandardField::TrackNumber => frame_ids::TRACK,
            StandardField::DiscNumber => frame_ids::DISC,
            StandardField::Artist1 => frame_ids::ARTIST,
            StandardField::Artist2 => frame_ids::ALBUM_ARTIST,
            StandardField::Composer => frame_ids::COMPOSER,
            StandardField::Artwork => frame_ids::PICTURE,
            StandardField::Comments => frame_ids::COMMENT,
            StandardField::Url => frame_ids::USER_URL,
        }
    }

    /// Convert a frame identifier to its standard field, if it has one
    pub fn from_id3v2(frame_id: &str) -> Option<StandardField> {
        let field = match frame_id {
            frame_ids::TITLE => StandardField::Title,
            frame_ids::ALBUM => StandardField::Album,
            frame_ids::PUBLISHER => StandardField::Publisher,
            frame_ids::GENRE => StandardField::Genre,
            frame_ids::YEAR => StandardField::Year,
            frame_ids::TRACK => StandardField::TrackNumber,
            frame_ids::DISC => StandardField::DiscNumber,
            frame_ids::ARTIST => StandardField::Artist1,
            frame_ids::ALBUM_ARTIST => StandardField::Artist2,
            frame_ids::COMPOSER => StandardField::Composer,
            frame_ids::PICTURE => StandardField::Artwork,
            frame_ids::COMMENT => StandardField::Comments,
            frame_ids::USER_URL => StandardField::Url,
            _ => return None,
        };
        Some(field)
    }
}

/// Converters for the numeric fields
pub struct ValueConverter;

impl ValueConverter {
    /// Split a `"position/total"` value such as `"3/12"`.
    ///
    /// Each half is parsed independently; a part that is not a number comes
    /// back as `None`.
    pub fn parse_position(value: &str) -> (Option<u32>, Option<u32>) {
        let mut parts = value.splitn(2, '/');
        let position = parts.next().and_then(|p| p.trim().parse().ok());
        let total = parts.next().and_then(|t| t.trim().parse().ok());
        (position, total)
    }

    pub fn parse_year(value: &str) -> Option<i32> {
        value.trim().parse().ok()
    }
}
