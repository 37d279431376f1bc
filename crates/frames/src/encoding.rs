//! Text encodings selected by an ID3v2 encoding byte.
//!
//! | Byte | Encoding    | Terminator | Versions   |
//! |------|-------------|------------|------------|
//! | 0    | ISO-8859-1  | `00`       | all        |
//! | 1    | UTF-16 +BOM | `00 00`    | all        |
//! | 2    | UTF-16BE    | `00 00`    | v2.4       |
//! | 3    | UTF-8       | `00`       | v2.4       |
//!
//! Decoding is strict about the byte-level shape (odd UTF-16 lengths,
//! unpaired surrogates and invalid UTF-8 are rejected) but lenient about the
//! version: a v2.3 tag that says UTF-8 still decodes.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::config::{UTF16_BE_BOM, UTF16_LE_BOM};
use crate::version::Version;

/// The text encoding of the string fields that follow an encoding selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum TextEncoding {
    /// ISO-8859-1 (Latin-1), one byte per character.
    Latin1 = 0,
    /// UTF-16 with a byte order mark on every string.
    Utf16 = 1,
    /// UTF-16 big-endian without BOM.
    Utf16Be = 2,
    /// UTF-8.
    Utf8 = 3,
}

impl TextEncoding {
    /// Every encoding, in selector-byte order.
    pub const ALL: [TextEncoding; 4] = [
        TextEncoding::Latin1,
        TextEncoding::Utf16,
        TextEncoding::Utf16Be,
        TextEncoding::Utf8,
    ];

    /// Map a selector byte to an encoding.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Latin1),
            1 => Some(Self::Utf16),
            2 => Some(Self::Utf16Be),
            3 => Some(Self::Utf8),
            _ => None,
        }
    }

    /// The selector byte written before encoded strings.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Human-readable name used in frame rendering.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Utf16 => "UTF-16",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf8 => "UTF-8",
        }
    }

    /// `true` if the ID3 standard allows this encoding in `version`.
    #[must_use]
    pub const fn supported_in(self, version: Version) -> bool {
        match self {
            Self::Latin1 | Self::Utf16 => true,
            Self::Utf16Be | Self::Utf8 => matches!(version, Version::V24),
        }
    }

    /// Byte width of a code unit, and therefore of the terminator.
    #[must_use]
    pub const fn unit_width(self) -> usize {
        match self {
            Self::Latin1 | Self::Utf8 => 1,
            Self::Utf16 | Self::Utf16Be => 2,
        }
    }

    /// Zero terminator for this encoding.
    #[must_use]
    pub const fn terminator(self) -> &'static [u8] {
        match self {
            Self::Latin1 | Self::Utf8 => &[0],
            Self::Utf16 | Self::Utf16Be => &[0, 0],
        }
    }

    /// Split `data` at the first terminator.
    ///
    /// Returns the string bytes and whatever follows the terminator. Without a
    /// terminator the whole slice is string and the rest is empty. UTF-16
    /// terminators only match on code-unit boundaries.
    #[must_use]
    pub fn split_terminated(self, data: &[u8]) -> (&[u8], &[u8]) {
        let end = match self.unit_width() {
            1 => data.iter().position(|&b| b == 0),
            _ => data
                .chunks_exact(2)
                .position(|unit| unit == [0, 0])
                .and_then(|units| units.checked_mul(2)),
        };
        match end {
            Some(end) => {
                let (text, tail) = data.split_at(end);
                let rest = tail.get(self.unit_width()..).unwrap_or_default();
                (text, rest)
            }
            None => (data, &[]),
        }
    }

    /// Decode string bytes (without terminator).
    ///
    /// Returns `None` if the bytes are not well-formed in this encoding.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Latin1 => Some(decode_latin1(bytes)),
            Self::Utf8 => core::str::from_utf8(bytes).ok().map(String::from),
            Self::Utf16Be => decode_utf16(bytes, true),
            Self::Utf16 => {
                if let Some(le) = bytes.strip_prefix(&UTF16_LE_BOM) {
                    decode_utf16(le, false)
                } else if let Some(be) = bytes.strip_prefix(&UTF16_BE_BOM) {
                    decode_utf16(be, true)
                } else {
                    // No BOM: most writers that omit it are little-endian.
                    decode_utf16(bytes, false)
                }
            }
        }
    }

    /// Append `text` to `out` in this encoding, without terminator.
    ///
    /// # Errors
    ///
    /// Returns the first character that cannot be represented. Only
    /// ISO-8859-1 can fail; `out` may then hold a partial string.
    pub fn encode_into(self, text: &str, out: &mut Vec<u8>) -> Result<(), char> {
        match self {
            Self::Latin1 => {
                for ch in text.chars() {
                    let byte = u8::try_from(u32::from(ch)).map_err(|_| ch)?;
                    out.push(byte);
                }
            }
            Self::Utf8 => out.extend_from_slice(text.as_bytes()),
            Self::Utf16 => {
                out.extend_from_slice(&UTF16_LE_BOM);
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
            }
            Self::Utf16Be => {
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
            }
        }
        Ok(())
    }

    /// `true` if every character of `text` is representable.
    #[must_use]
    pub fn can_encode(self, text: &str) -> bool {
        match self {
            Self::Latin1 => text.chars().all(|ch| u32::from(ch) <= 0xFF),
            Self::Utf16 | Self::Utf16Be | Self::Utf8 => true,
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every byte maps to the code point of the same value.
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

fn decode_utf16(bytes: &[u8], big_endian: bool) -> Option<String> {
    let units = bytes.chunks_exact(2);
    if !units.remainder().is_empty() {
        return None;
    }
    let units = units.filter_map(|unit| {
        let pair: [u8; 2] = unit.try_into().ok()?;
        Some(if big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        })
    });
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    fn encoded(encoding: TextEncoding, text: &str) -> Vec<u8> {
        let mut out = Vec::new();
        encoding.encode_into(text, &mut out).unwrap();
        out
    }

    #[test]
    fn selector_bytes_roundtrip() {
        for encoding in TextEncoding::ALL {
            assert_eq!(TextEncoding::from_byte(encoding.to_byte()), Some(encoding));
        }
        assert_eq!(TextEncoding::from_byte(4), None);
        assert_eq!(TextEncoding::from_byte(0xFF), None);
    }

    #[test]
    fn utf8_and_utf16be_are_v24_only() {
        assert!(TextEncoding::Latin1.supported_in(Version::V22));
        assert!(TextEncoding::Utf16.supported_in(Version::V23));
        assert!(!TextEncoding::Utf8.supported_in(Version::V23));
        assert!(!TextEncoding::Utf16Be.supported_in(Version::V22));
        assert!(TextEncoding::Utf8.supported_in(Version::V24));
    }

    #[test]
    fn latin1_rejects_wide_characters() {
        let mut out = Vec::new();
        assert_eq!(TextEncoding::Latin1.encode_into("a☃", &mut out), Err('☃'));
        assert!(!TextEncoding::Latin1.can_encode("☃"));
        assert!(TextEncoding::Latin1.can_encode("Ünïcödé"));
    }

    #[test]
    fn latin1_maps_high_bytes_to_code_points() {
        assert_eq!(TextEncoding::Latin1.decode(&[0x41, 0xE9]).unwrap(), "Aé");
        assert_eq!(encoded(TextEncoding::Latin1, "Aé"), vec![0x41, 0xE9]);
    }

    #[test]
    fn utf16_writes_little_endian_bom() {
        assert_eq!(encoded(TextEncoding::Utf16, "A"), vec![0xFF, 0xFE, 0x41, 0x00]);
        assert_eq!(encoded(TextEncoding::Utf16Be, "A"), vec![0x00, 0x41]);
    }

    #[test]
    fn utf16_honours_either_bom() {
        assert_eq!(
            TextEncoding::Utf16.decode(&[0xFE, 0xFF, 0x00, 0x41]).unwrap(),
            "A"
        );
        assert_eq!(
            TextEncoding::Utf16.decode(&[0xFF, 0xFE, 0x41, 0x00]).unwrap(),
            "A"
        );
        // Missing BOM falls back to little-endian.
        assert_eq!(TextEncoding::Utf16.decode(&[0x41, 0x00]).unwrap(), "A");
    }

    #[test]
    fn utf16_rejects_odd_lengths_and_lone_surrogates() {
        assert!(TextEncoding::Utf16Be.decode(&[0x00, 0x41, 0x00]).is_none());
        assert!(TextEncoding::Utf16Be.decode(&[0xD8, 0x00]).is_none());
    }

    #[test]
    fn utf8_rejects_invalid_sequences() {
        assert!(TextEncoding::Utf8.decode(&[0xC3, 0x28]).is_none());
        assert_eq!(TextEncoding::Utf8.decode("☃".as_bytes()).unwrap(), "☃");
    }

    #[test]
    fn utf16_supplementary_plane_roundtrips() {
        let bytes = encoded(TextEncoding::Utf16, "𝄞");
        assert_eq!(bytes.len(), 6);
        assert_eq!(TextEncoding::Utf16.decode(&bytes).unwrap(), "𝄞");
    }

    #[test]
    fn split_single_byte_terminator() {
        let (text, rest) = TextEncoding::Latin1.split_terminated(b"abc\0def");
        assert_eq!(text, b"abc");
        assert_eq!(rest, b"def");

        let (text, rest) = TextEncoding::Utf8.split_terminated(b"abc");
        assert_eq!(text, b"abc");
        assert!(rest.is_empty());
    }

    #[test]
    fn split_utf16_terminator_respects_unit_alignment() {
        // 0x41 0x00 | 0x00 0x42 must not match at offset 1.
        let data = [0x41, 0x00, 0x00, 0x42, 0x00, 0x00, 0x43, 0x00];
        let (text, rest) = TextEncoding::Utf16Be.split_terminated(&data);
        assert_eq!(text, &data[..4]);
        assert_eq!(rest, &[0x43, 0x00]);
    }

    #[test]
    fn split_empty_string_before_terminator() {
        let (text, rest) = TextEncoding::Utf16.split_terminated(&[0, 0, 1, 0]);
        assert!(text.is_empty());
        assert_eq!(rest, &[1, 0]);
    }
}
