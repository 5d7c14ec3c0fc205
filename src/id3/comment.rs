// COMM (comment) frame

use serde::Serialize;

use crate::error::{Result, TagError};
use crate::utils::encoding::{decode_latin1, decode_text, split_terminated, TextEncoding};

/// Decoded COMM frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// ISO 639-2 language code, e.g. `"eng"`
    pub language: String,
    pub description: String,
    pub text: String,
}

impl Comment {
    /// Decode a COMM body:
    /// `[encoding][language: 3 bytes][description]\0[text]`.
    pub fn parse(body: &[u8]) -> Result<Self> {
        if body.len() < 4 {
            return Err(TagError::MalformedComment("shorter than 4 bytes"));
        }

        let encoding = TextEncoding::from_byte(body[0]);
        let (description, text) = split_terminated(&body[4..], encoding)
            .ok_or(TagError::MalformedComment("unterminated description"))?;

        Ok(Comment {
            language: decode_latin1(&body[1..4]),
            description: decode_text(description, encoding),
            text: decode_text(text, encoding),
        })
    }
}
