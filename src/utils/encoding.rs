// Text encoding utilities for ID3v2 frame payloads

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8};

/// Text encodings selectable by the first byte of a text-bearing frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Latin1 = 0,
    Utf16 = 1,
    Utf16BE = 2,
    Utf8 = 3,
}

impl TextEncoding {
    /// Map an encoding selector byte. Unknown selectors fall back to Latin-1,
    /// which never fails to decode.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => TextEncoding::Latin1,
            1 => TextEncoding::Utf16,
            2 => TextEncoding::Utf16BE,
            3 => TextEncoding::Utf8,
            other => {
                tracing::warn!(encoding = other, "unknown text encoding, decoding as Latin-1");
                TextEncoding::Latin1
            }
        }
    }

    /// Width of the null terminator in this encoding
    pub fn terminator_width(self) -> usize {
        match self {
            TextEncoding::Utf16 | TextEncoding::Utf16BE => 2,
            TextEncoding::Latin1 | TextEncoding::Utf8 => 1,
        }
    }
}

/// Decode `data` and clean the result.
///
/// Latin-1 text loses every NUL and control character other than tabs and
/// line breaks. The 16-bit and UTF-8 paths only lose trailing terminators.
pub fn decode_text(data: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Latin1 => decode_latin1(data),
        TextEncoding::Utf16 => {
            let text = match data {
                [0xFF, 0xFE, rest @ ..] => UTF_16LE.decode_without_bom_handling(rest).0,
                [0xFE, 0xFF, rest @ ..] => UTF_16BE.decode_without_bom_handling(rest).0,
                _ => UTF_16LE.decode_without_bom_handling(data).0,
            };
            trim_terminators(&text)
        }
        TextEncoding::Utf16BE => {
            let data = data.strip_prefix(&[0xFE, 0xFF]).unwrap_or(data);
            trim_terminators(&UTF_16BE.decode_without_bom_handling(data).0)
        }
        TextEncoding::Utf8 => {
            let data = data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data);
            trim_terminators(&UTF_8.decode_without_bom_handling(data).0)
        }
    }
}

/// Decode ISO-8859-1 text, keeping printable characters and line whitespace.
/// Bytes 0x80-0x9F are C1 controls and are dropped.
pub fn decode_latin1(data: &[u8]) -> String {
    encoding_rs::mem::decode_latin1(data)
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

fn trim_terminators(text: &str) -> String {
    text.trim_end_matches('\0').to_string()
}

/// Split `data` at the first null terminator for `encoding`.
///
/// Returns the text before the terminator and the bytes after it, or `None`
/// when no terminator exists. For 16-bit encodings only a `00 00` pair on an
/// even offset counts, so the low zero byte of a character like `'A'`
/// (`41 00`) followed by a high zero byte is never mistaken for the end.
pub fn split_terminated(data: &[u8], encoding: TextEncoding) -> Option<(&[u8], &[u8])> {
    let end = match encoding.terminator_width() {
        2 => data
            .chunks_exact(2)
            .position(|pair| pair == [0, 0])
            .map(|index| index * 2),
        _ => data.iter().position(|&b| b == 0),
    }?;

    let width = encoding.terminator_width();
    Some((&data[..end], &data[end + width..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_strips_nulls_and_controls() {
        assert_eq!(decode_text(b"Hel\x00lo\x01\x00", TextEncoding::Latin1), "Hello");
    }

    #[test]
    fn latin1_keeps_accented_letters() {
        assert_eq!(decode_text(b"Caf\xE9", TextEncoding::Latin1), "Café");
    }

    #[test]
    fn latin1_drops_c1_controls() {
        assert_eq!(decode_text(b"a\x80b\x9Fc\x85d", TextEncoding::Latin1), "abcd");
        assert_eq!(decode_text(b"\xA0\xFF", TextEncoding::Latin1), "\u{A0}\u{FF}");
    }

    #[test]
    fn utf16_drops_little_endian_bom() {
        let data = [0xFF, 0xFE, b'H', 0x00, b'i', 0x00, 0x00, 0x00];
        assert_eq!(decode_text(&data, TextEncoding::Utf16), "Hi");
    }

    #[test]
    fn utf16_honours_big_endian_bom() {
        let data = [0xFE, 0xFF, 0x00, b'H', 0x00, b'i'];
        assert_eq!(decode_text(&data, TextEncoding::Utf16), "Hi");
    }

    #[test]
    fn utf16_without_bom_is_little_endian() {
        let data = [b'O', 0x00, b'k', 0x00];
        assert_eq!(decode_text(&data, TextEncoding::Utf16), "Ok");
    }

    #[test]
    fn utf16be_and_utf8() {
        assert_eq!(decode_text(&[0x00, b'A', 0x00, 0x00], TextEncoding::Utf16BE), "A");
        assert_eq!(decode_text("naïve\0".as_bytes(), TextEncoding::Utf8), "naïve");
    }

    #[test]
    fn unknown_selector_falls_back_to_latin1() {
        assert_eq!(TextEncoding::from_byte(9), TextEncoding::Latin1);
    }

    #[test]
    fn single_byte_split() {
        let (text, rest) = split_terminated(b"desc\x00tail", TextEncoding::Latin1).unwrap();
        assert_eq!(text, b"desc");
        assert_eq!(rest, b"tail");
        assert!(split_terminated(b"no end", TextEncoding::Utf8).is_none());
    }

    #[test]
    fn wide_split_requires_aligned_pair() {
        // "A" then "\u{100}" : 41 00 | 00 01 | 00 00 | FF
        // An unaligned scan would stop at offset 1.
        let data = [0x41, 0x00, 0x00, 0x01, 0x00, 0x00, 0xFF];
        let (text, rest) = split_terminated(&data, TextEncoding::Utf16).unwrap();
        assert_eq!(text, &[0x41, 0x00, 0x00, 0x01]);
        assert_eq!(rest, &[0xFF]);
    }

    #[test]
    fn wide_split_without_terminator() {
        assert!(split_terminated(&[0x41, 0x00, 0x42], TextEncoding::Utf16).is_none());
        assert!(split_terminated(&[0x41, 0x00, 0x00], TextEncoding::Utf16BE).is_none());
    }
}
