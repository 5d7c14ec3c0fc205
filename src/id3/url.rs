// WXXX (user-defined URL link) frame

use serde::Serialize;

use crate::error::{Result, TagError};
use crate::utils::encoding::{decode_latin1, decode_text, split_terminated, TextEncoding};

/// Decoded WXXX frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlLink {
    pub description: String,
    pub url: String,
}

impl UrlLink {
    /// Decode a WXXX body: `[encoding][description]\0[url]`.
    /// The URL itself is always single-byte text.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let (&encoding, rest) = body
            .split_first()
            .ok_or(TagError::MalformedUrl("empty body"))?;
        let encoding = TextEncoding::from_byte(encoding);

        let (description, url) = split_terminated(rest, encoding)
            .ok_or(TagError::MalformedUrl("unterminated description"))?;

        Ok(UrlLink {
            description: decode_text(description, encoding),
            url: decode_latin1(url),
        })
    }
}
