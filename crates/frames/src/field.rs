//! Field codecs.
//!
//! A frame payload is a fixed sequence of [`Field`]s. Each field's
//! [`FieldKind`] knows how to validate a candidate [`FieldValue`], read one
//! value off the front of a byte slice, write it back and render it for
//! display. Kinds are a closed set; `Sequence` and `Pairs` nest exactly one
//! level deep.
//!
//! ```text
//!   TXXX payload          03 'd' 'e' 's' 'c' 00 'v' 'a' 'l' 'u' 'e'
//!   Encoding              ^^
//!   EncodedText (desc)       ^^^^^^^^^^^^^^^^^^
//!   EncodedText (value)                        ^^^^^^^^^^^^^^^^^^^^^  final: no terminator
//! ```

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::config::{MAX_INTEGER_BYTES, MIN_COUNTER_BYTES, RENDER_BINARY_LIMIT};
use crate::encoding::{decode_latin1, TextEncoding};
use crate::error::{FrameDecodeError, ValidationError};

/// One named field of a frame schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Field name, unique within its schema.
    pub name: &'static str,
    /// Codec used for the field's bytes.
    pub kind: FieldKind,
}

impl Field {
    /// Create a field descriptor.
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    /// Check `value` against this field's codec.
    ///
    /// # Errors
    ///
    /// See [`FieldKind::validate`].
    pub fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        self.kind.validate(self.name, value)
    }
}

/// The codec of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Text encoding selector byte.
    Encoding,
    /// Text in the frame's current encoding.
    EncodedText,
    /// ASCII URL, zero-terminated.
    Url,
    /// ISO-8859-1 string, zero-terminated (MIME types, owners, e-mails).
    Latin1,
    /// Exactly `n` ISO-8859-1 characters, no terminator.
    Fixed(usize),
    /// One unsigned byte.
    Byte,
    /// One byte naming an attached picture's role.
    PictureType,
    /// `n`-byte big-endian unsigned integer.
    Integer(usize),
    /// Big-endian unsigned integer filling the rest of the payload.
    Counter,
    /// Raw bytes filling the rest of the payload.
    Binary,
    /// Zero or more values of the inner kind until the payload is exhausted.
    Sequence(&'static FieldKind),
    /// Zero or more `(a, b)` pairs until the payload is exhausted.
    Pairs(&'static FieldKind, &'static FieldKind),
}

/// A decoded or caller-supplied field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// Value of an [`FieldKind::Encoding`] field.
    Encoding(TextEncoding),
    /// Any text-valued field.
    Text(String),
    /// Byte, picture type, integer or counter.
    Int(u64),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Value of a [`FieldKind::Sequence`] field.
    Seq(Vec<FieldValue>),
    /// Value of a [`FieldKind::Pairs`] field.
    Pairs(Vec<(FieldValue, FieldValue)>),
}

impl FieldValue {
    /// A single text value.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// A list of text values, the shape of a text frame's `text` field.
    pub fn texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Seq(texts.into_iter().map(|t| Self::Text(t.into())).collect())
    }

    /// A list of text pairs, the shape of a credits field.
    pub fn pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        Self::Pairs(
            pairs
                .into_iter()
                .map(|(a, b)| (Self::Text(a.into()), Self::Text(b.into())))
                .collect(),
        )
    }

    /// The text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The integer, if this is an integer value.
    #[must_use]
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The bytes, if this is a binary value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The encoding, if this is an encoding selector value.
    #[must_use]
    pub fn as_encoding(&self) -> Option<TextEncoding> {
        match self {
            Self::Encoding(encoding) => Some(*encoding),
            _ => None,
        }
    }

    /// The elements, if this is a sequence.
    #[must_use]
    pub fn as_seq(&self) -> Option<&[FieldValue]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// The pairs, if this is a pair list.
    #[must_use]
    pub fn as_pairs(&self) -> Option<&[(FieldValue, FieldValue)]> {
        match self {
            Self::Pairs(pairs) => Some(pairs),
            _ => None,
        }
    }

    fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        Self::Int(value.into())
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<TextEncoding> for FieldValue {
    fn from(encoding: TextEncoding) -> Self {
        Self::Encoding(encoding)
    }
}

/// Why a single field could not be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EncodeFault {
    /// Text needs a wider encoding; the frame retries with the next one.
    Unrepresentable,
    /// The value does not fit the codec at all.
    Invalid,
}

/// Largest value an `width`-byte big-endian integer can hold.
fn integer_max(width: usize) -> u64 {
    let bits = u32::try_from(width.saturating_mul(8)).unwrap_or(u32::MAX);
    u64::MAX
        .checked_shr(u64::BITS.saturating_sub(bits))
        .unwrap_or(0)
}

fn read_be(field: &'static str, bytes: &[u8]) -> Result<u64, FrameDecodeError> {
    bytes.iter().try_fold(0u64, |acc, &byte| {
        acc.checked_mul(256)
            .and_then(|v| v.checked_add(u64::from(byte)))
            .ok_or(FrameDecodeError::IntegerOverflow { field })
    })
}

fn take<'a>(
    field: &'static str,
    data: &'a [u8],
    len: usize,
) -> Result<(&'a [u8], &'a [u8]), FrameDecodeError> {
    match (data.get(..len), data.get(len..)) {
        (Some(head), Some(rest)) => Ok((head, rest)),
        _ => Err(FrameDecodeError::Truncated { field }),
    }
}

fn encode_latin1(text: &str, out: &mut Vec<u8>) -> Result<(), EncodeFault> {
    TextEncoding::Latin1
        .encode_into(text, out)
        .map_err(|_| EncodeFault::Invalid)
}

fn shape(field: &'static str, expected: &'static str) -> ValidationError {
    ValidationError::Shape { field, expected }
}

fn reject_nul(field: &'static str, text: &str) -> Result<(), ValidationError> {
    if text.contains('\0') {
        return Err(ValidationError::Character { field, code: 0 });
    }
    Ok(())
}

fn reject_above(field: &'static str, text: &str, max: u32) -> Result<(), ValidationError> {
    match text.chars().map(u32::from).find(|&code| code > max) {
        Some(code) => Err(ValidationError::Character { field, code }),
        None => Ok(()),
    }
}

impl FieldKind {
    /// Check `value` against this codec without touching any bytes.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Shape`] for a value of the wrong variant,
    /// [`ValidationError::Character`] for text the field can never store,
    /// [`ValidationError::OutOfRange`] for integers wider than the field and
    /// [`ValidationError::Length`] for fixed-width text of the wrong length.
    pub fn validate(self, field: &'static str, value: &FieldValue) -> Result<(), ValidationError> {
        match (self, value) {
            (Self::Encoding, FieldValue::Encoding(_)) => Ok(()),
            (Self::Encoding, _) => Err(shape(field, "a text encoding")),
            (Self::EncodedText, FieldValue::Text(text)) => reject_nul(field, text),
            (Self::Url, FieldValue::Text(text)) => {
                reject_nul(field, text)?;
                reject_above(field, text, 0x7F)
            }
            (Self::Latin1, FieldValue::Text(text)) => {
                reject_nul(field, text)?;
                reject_above(field, text, 0xFF)
            }
            (Self::Fixed(len), FieldValue::Text(text)) => {
                reject_above(field, text, 0xFF)?;
                let actual = text.chars().count();
                if actual == len {
                    Ok(())
                } else {
                    Err(ValidationError::Length {
                        field,
                        expected: len,
                        actual,
                    })
                }
            }
            (Self::EncodedText | Self::Url | Self::Latin1 | Self::Fixed(_), _) => {
                Err(shape(field, "text"))
            }
            (Self::Byte | Self::PictureType, FieldValue::Int(value)) => {
                let max = u64::from(u8::MAX);
                if *value > max {
                    return Err(ValidationError::OutOfRange {
                        field,
                        value: *value,
                        max,
                    });
                }
                Ok(())
            }
            (Self::Integer(width), FieldValue::Int(value)) => {
                let max = integer_max(width);
                if *value > max {
                    return Err(ValidationError::OutOfRange {
                        field,
                        value: *value,
                        max,
                    });
                }
                Ok(())
            }
            (Self::Counter, FieldValue::Int(_)) => Ok(()),
            (Self::Byte | Self::PictureType | Self::Integer(_) | Self::Counter, _) => {
                Err(shape(field, "an integer"))
            }
            (Self::Binary, FieldValue::Bytes(_)) => Ok(()),
            (Self::Binary, _) => Err(shape(field, "bytes")),
            (Self::Sequence(inner), FieldValue::Seq(items)) => items
                .iter()
                .try_for_each(|item| inner.validate(field, item)),
            (Self::Sequence(_), _) => Err(shape(field, "a list")),
            (Self::Pairs(first, second), FieldValue::Pairs(pairs)) => {
                pairs.iter().try_for_each(|(a, b)| {
                    first.validate(field, a)?;
                    second.validate(field, b)
                })
            }
            (Self::Pairs(..), _) => Err(shape(field, "a list of pairs")),
        }
    }

    /// Read one value off the front of `data`.
    ///
    /// `encoding` is the frame's current text encoding, set by an earlier
    /// [`FieldKind::Encoding`] field. Returns the value and the unconsumed
    /// bytes.
    ///
    /// # Errors
    ///
    /// Any [`FrameDecodeError`] except `TrailingData` and `Encrypted`, which
    /// are frame-level conditions.
    pub fn decode<'a>(
        self,
        field: &'static str,
        encoding: Option<TextEncoding>,
        data: &'a [u8],
    ) -> Result<(FieldValue, &'a [u8]), FrameDecodeError> {
        match self {
            Self::Encoding => {
                let (&byte, rest) = data
                    .split_first()
                    .ok_or(FrameDecodeError::Truncated { field })?;
                let encoding =
                    TextEncoding::from_byte(byte).ok_or(FrameDecodeError::UnknownEncoding(byte))?;
                Ok((FieldValue::Encoding(encoding), rest))
            }
            Self::EncodedText => {
                let encoding = encoding.ok_or(FrameDecodeError::NoEncoding { field })?;
                let (bytes, rest) = encoding.split_terminated(data);
                let text = encoding
                    .decode(bytes)
                    .ok_or(FrameDecodeError::MalformedText { field, encoding })?;
                Ok((FieldValue::Text(text), rest))
            }
            // URLs in the wild are not always ASCII; read them as ISO-8859-1
            // so they survive a round trip.
            Self::Url | Self::Latin1 => {
                let (bytes, rest) = TextEncoding::Latin1.split_terminated(data);
                Ok((FieldValue::Text(decode_latin1(bytes)), rest))
            }
            Self::Fixed(len) => {
                let (bytes, rest) = take(field, data, len)?;
                Ok((FieldValue::Text(decode_latin1(bytes)), rest))
            }
            Self::Byte | Self::PictureType => {
                let (&byte, rest) = data
                    .split_first()
                    .ok_or(FrameDecodeError::Truncated { field })?;
                Ok((FieldValue::Int(byte.into()), rest))
            }
            Self::Integer(width) => {
                let (bytes, rest) = take(field, data, width)?;
                Ok((FieldValue::Int(read_be(field, bytes)?), rest))
            }
            Self::Counter => Ok((FieldValue::Int(read_be(field, data)?), &[])),
            Self::Binary => Ok((FieldValue::Bytes(data.to_vec()), &[])),
            Self::Sequence(inner) => {
                let mut items = Vec::new();
                let mut rest = data;
                while !rest.is_empty() {
                    let (item, tail) = inner.decode(field, encoding, rest)?;
                    if tail.len() == rest.len() {
                        break;
                    }
                    items.push(item);
                    rest = tail;
                }
                Ok((FieldValue::Seq(items), rest))
            }
            Self::Pairs(first, second) => {
                let mut pairs = Vec::new();
                let mut rest = data;
                while !rest.is_empty() {
                    let (a, tail) = first.decode(field, encoding, rest)?;
                    let (b, tail) = second.decode(field, encoding, tail)?;
                    if tail.len() == rest.len() {
                        break;
                    }
                    pairs.push((a, b));
                    rest = tail;
                }
                Ok((FieldValue::Pairs(pairs), rest))
            }
        }
    }

    /// `false` if `value` holds encoded text that `encoding` cannot represent.
    ///
    /// Lets the encoder skip a candidate encoding before building a payload.
    pub(crate) fn fits(self, encoding: TextEncoding, value: &FieldValue) -> bool {
        match (self, value) {
            (Self::EncodedText, FieldValue::Text(text)) => encoding.can_encode(text),
            (Self::Sequence(kind), FieldValue::Seq(items)) => {
                items.iter().all(|item| kind.fits(encoding, item))
            }
            (Self::Pairs(first, second), FieldValue::Pairs(pairs)) => pairs
                .iter()
                .all(|(a, b)| first.fits(encoding, a) && second.fits(encoding, b)),
            _ => true,
        }
    }

    /// Append `value` to `out`.
    ///
    /// `last` marks the final field of the payload: its text is written
    /// without a terminator. Inside a final `Sequence`, only the last element
    /// drops its terminator, and only when it is non-empty.
    pub(crate) fn encode(
        self,
        encoding: Option<TextEncoding>,
        value: &FieldValue,
        last: bool,
        out: &mut Vec<u8>,
    ) -> Result<(), EncodeFault> {
        match (self, value) {
            (Self::Encoding, FieldValue::Encoding(encoding)) => {
                out.push(encoding.to_byte());
            }
            (Self::EncodedText, FieldValue::Text(text)) => {
                let encoding = encoding.ok_or(EncodeFault::Invalid)?;
                encoding
                    .encode_into(text, out)
                    .map_err(|_| EncodeFault::Unrepresentable)?;
                if !last {
                    out.extend_from_slice(encoding.terminator());
                }
            }
            (Self::Url | Self::Latin1, FieldValue::Text(text)) => {
                encode_latin1(text, out)?;
                if !last {
                    out.push(0);
                }
            }
            (Self::Fixed(len), FieldValue::Text(text)) => {
                let start = out.len();
                encode_latin1(text, out)?;
                if out.len().checked_sub(start) != Some(len) {
                    return Err(EncodeFault::Invalid);
                }
            }
            (Self::Byte | Self::PictureType, FieldValue::Int(value)) => {
                out.push(u8::try_from(*value).map_err(|_| EncodeFault::Invalid)?);
            }
            (Self::Integer(width), FieldValue::Int(value)) => {
                if *value > integer_max(width) {
                    return Err(EncodeFault::Invalid);
                }
                let bytes = value.to_be_bytes();
                let padding = width.saturating_sub(MAX_INTEGER_BYTES);
                out.resize(out.len().saturating_add(padding), 0);
                let skip = MAX_INTEGER_BYTES.saturating_sub(width);
                out.extend_from_slice(bytes.get(skip..).unwrap_or_default());
            }
            (Self::Counter, FieldValue::Int(value)) => {
                let bytes = value.to_be_bytes();
                let zeros = usize::try_from(value.leading_zeros() / 8).unwrap_or(0);
                let width = MAX_INTEGER_BYTES
                    .saturating_sub(zeros)
                    .max(MIN_COUNTER_BYTES);
                let skip = MAX_INTEGER_BYTES.saturating_sub(width);
                out.extend_from_slice(bytes.get(skip..).unwrap_or_default());
            }
            (Self::Binary, FieldValue::Bytes(bytes)) => out.extend_from_slice(bytes),
            (Self::Sequence(inner), FieldValue::Seq(items)) => {
                let mut items = items.iter().peekable();
                while let Some(item) = items.next() {
                    let final_item = last && items.peek().is_none() && !item.is_empty_text();
                    inner.encode(encoding, item, final_item, out)?;
                }
            }
            (Self::Pairs(first, second), FieldValue::Pairs(pairs)) => {
                let mut pairs = pairs.iter().peekable();
                while let Some((a, b)) = pairs.next() {
                    first.encode(encoding, a, false, out)?;
                    let final_item = last && pairs.peek().is_none() && !b.is_empty_text();
                    second.encode(encoding, b, final_item, out)?;
                }
            }
            _ => return Err(EncodeFault::Invalid),
        }
        Ok(())
    }

    /// Render a value for display. Unset values render as `None`.
    #[must_use]
    pub fn render(self, value: Option<&FieldValue>) -> String {
        let Some(value) = value else {
            return "None".into();
        };
        match (self, value) {
            (Self::PictureType, FieldValue::Int(code)) => {
                match u8::try_from(*code).ok().and_then(picture_type_name) {
                    Some(name) => format!("{code} ({name})"),
                    None => code.to_string(),
                }
            }
            (Self::Sequence(inner), FieldValue::Seq(items)) => {
                let items: Vec<String> = items.iter().map(|v| inner.render(Some(v))).collect();
                format!("[{}]", items.join(", "))
            }
            (Self::Pairs(first, second), FieldValue::Pairs(pairs)) => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(a, b)| format!("({}, {})", first.render(Some(a)), second.render(Some(b))))
                    .collect();
                format!("[{}]", pairs.join(", "))
            }
            _ => render_value(value),
        }
    }

    /// `true` for kinds that consume the rest of the payload.
    #[must_use]
    pub const fn is_greedy(self) -> bool {
        matches!(
            self,
            Self::Counter | Self::Binary | Self::Sequence(_) | Self::Pairs(..)
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding => f.write_str("encoding"),
            Self::EncodedText => f.write_str("text"),
            Self::Url => f.write_str("url"),
            Self::Latin1 => f.write_str("latin1"),
            Self::Fixed(len) => write!(f, "fixed({len})"),
            Self::Byte => f.write_str("byte"),
            Self::PictureType => f.write_str("picture-type"),
            Self::Integer(width) => write!(f, "int({width})"),
            Self::Counter => f.write_str("counter"),
            Self::Binary => f.write_str("binary"),
            Self::Sequence(inner) => write!(f, "[{inner}]"),
            Self::Pairs(a, b) => write!(f, "[({a}, {b})]"),
        }
    }
}

/// Render a value without reference to its field kind.
pub(crate) fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Encoding(encoding) => encoding.name().into(),
        FieldValue::Text(text) => quote(text),
        FieldValue::Int(value) => value.to_string(),
        FieldValue::Bytes(bytes) => render_bytes(bytes),
        FieldValue::Seq(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        FieldValue::Pairs(pairs) => {
            let pairs: Vec<String> = pairs
                .iter()
                .map(|(a, b)| format!("({}, {})", render_value(a), render_value(b)))
                .collect();
            format!("[{}]", pairs.join(", "))
        }
    }
}

/// `'text'` with control characters and quotes escaped.
pub(crate) fn quote(text: &str) -> String {
    format!("'{}'", text.escape_debug())
}

/// `b'...'` with non-printable bytes escaped; long data is elided.
pub(crate) fn render_bytes(bytes: &[u8]) -> String {
    if bytes.len() <= RENDER_BINARY_LIMIT {
        return format!("b'{}'", bytes.escape_ascii());
    }
    let head = bytes.get(..RENDER_BINARY_LIMIT / 2).unwrap_or_default();
    format!("b'{}'... ({} bytes)", head.escape_ascii(), bytes.len())
}

/// Display name of an attached picture type code.
#[must_use]
pub fn picture_type_name(code: u8) -> Option<&'static str> {
    const NAMES: [&str; 21] = [
        "Other",
        "File icon",
        "Other file icon",
        "Cover (front)",
        "Cover (back)",
        "Leaflet page",
        "Media",
        "Lead artist",
        "Artist",
        "Conductor",
        "Band",
        "Composer",
        "Lyricist",
        "Recording location",
        "During recording",
        "During performance",
        "Screen capture",
        "A bright coloured fish",
        "Illustration",
        "Band logotype",
        "Publisher logotype",
    ];
    NAMES.get(usize::from(code)).copied()
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

    const TEXTS: FieldKind = FieldKind::Sequence(&FieldKind::EncodedText);
    const CREDITS: FieldKind = FieldKind::Pairs(&FieldKind::EncodedText, &FieldKind::EncodedText);

    fn encode(kind: FieldKind, enc: TextEncoding, value: &FieldValue, last: bool) -> Vec<u8> {
        let mut out = Vec::new();
        kind.encode(Some(enc), value, last, &mut out).unwrap();
        out
    }

    #[test]
    fn encoding_selector_rejects_unknown_byte() {
        let err = FieldKind::Encoding.decode("encoding", None, &[7, 1]).unwrap_err();
        assert_eq!(err, FrameDecodeError::UnknownEncoding(7));
        let (value, rest) = FieldKind::Encoding.decode("encoding", None, &[3, 1]).unwrap();
        assert_eq!(value, FieldValue::Encoding(TextEncoding::Utf8));
        assert_eq!(rest, &[1]);
    }

    #[test]
    fn encoded_text_needs_an_encoding() {
        let err = FieldKind::EncodedText.decode("text", None, b"a").unwrap_err();
        assert_eq!(err, FrameDecodeError::NoEncoding { field: "text" });
    }

    #[test]
    fn malformed_utf8_is_a_field_error() {
        let err = FieldKind::EncodedText
            .decode("text", Some(TextEncoding::Utf8), &[0xC3, 0x28])
            .unwrap_err();
        assert_eq!(
            err,
            FrameDecodeError::MalformedText {
                field: "text",
                encoding: TextEncoding::Utf8
            }
        );
    }

    #[test]
    fn sequence_of_empty_payload_is_empty() {
        let (value, rest) = TEXTS.decode("text", Some(TextEncoding::Latin1), &[]).unwrap();
        assert_eq!(value, FieldValue::Seq(Vec::new()));
        assert!(rest.is_empty());
    }

    #[test]
    fn sequence_trailing_terminator_yields_single_element() {
        let (value, _) = TEXTS
            .decode("text", Some(TextEncoding::Latin1), b"a\0")
            .unwrap();
        assert_eq!(value, FieldValue::texts(["a"]));
    }

    #[test]
    fn sequence_separates_elements_and_drops_final_terminator() {
        let value = FieldValue::texts(["a", "b"]);
        assert_eq!(encode(TEXTS, TextEncoding::Latin1, &value, true), b"a\0b");
        let (decoded, _) = TEXTS
            .decode("text", Some(TextEncoding::Latin1), b"a\0b")
            .unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn sequence_keeps_terminator_after_empty_final_element() {
        let value = FieldValue::texts(["a", ""]);
        let bytes = encode(TEXTS, TextEncoding::Latin1, &value, true);
        assert_eq!(bytes, b"a\0\0");
        let (decoded, _) = TEXTS
            .decode("text", Some(TextEncoding::Latin1), &bytes)
            .unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn utf16_sequence_roundtrips() {
        let value = FieldValue::texts(["x", "☃"]);
        let bytes = encode(TEXTS, TextEncoding::Utf16, &value, true);
        let (decoded, rest) = TEXTS
            .decode("text", Some(TextEncoding::Utf16), &bytes)
            .unwrap();
        assert_eq!(decoded, value);
        assert!(rest.is_empty());
    }

    #[test]
    fn credit_pairs_roundtrip() {
        let value = FieldValue::pairs([("producer", "A"), ("mix", "B")]);
        let bytes = encode(CREDITS, TextEncoding::Latin1, &value, true);
        assert_eq!(bytes, b"producer\0A\0mix\0B");
        let (decoded, _) = CREDITS
            .decode("people", Some(TextEncoding::Latin1), &bytes)
            .unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn latin1_text_reports_unrepresentable_characters() {
        let mut out = Vec::new();
        let fault = FieldKind::EncodedText
            .encode(
                Some(TextEncoding::Latin1),
                &FieldValue::text("☃"),
                true,
                &mut out,
            )
            .unwrap_err();
        assert_eq!(fault, EncodeFault::Unrepresentable);
    }

    #[test]
    fn fixed_width_text_truncation() {
        let err = FieldKind::Fixed(3).decode("language", None, b"en").unwrap_err();
        assert_eq!(err, FrameDecodeError::Truncated { field: "language" });
        let (value, rest) = FieldKind::Fixed(3).decode("language", None, b"engx").unwrap();
        assert_eq!(value, FieldValue::text("eng"));
        assert_eq!(rest, b"x");
    }

    #[test]
    fn integers_are_big_endian() {
        let (value, rest) = FieldKind::Integer(3).decode("n", None, &[1, 0, 0, 9]).unwrap();
        assert_eq!(value, FieldValue::Int(0x01_0000));
        assert_eq!(rest, &[9]);
        assert_eq!(
            encode(FieldKind::Integer(2), TextEncoding::Latin1, &FieldValue::Int(0x1234), false),
            vec![0x12, 0x34]
        );
    }

    #[test]
    fn counter_is_at_least_four_bytes() {
        assert_eq!(
            encode(FieldKind::Counter, TextEncoding::Latin1, &FieldValue::Int(5), true),
            vec![0, 0, 0, 5]
        );
        assert_eq!(
            encode(FieldKind::Counter, TextEncoding::Latin1, &FieldValue::Int(1 << 40), true),
            vec![1, 0, 0, 0, 0, 0]
        );
        let (value, _) = FieldKind::Counter.decode("count", None, &[]).unwrap();
        assert_eq!(value, FieldValue::Int(0));
    }

    #[test]
    fn counter_wider_than_64_bits_overflows() {
        let err = FieldKind::Counter.decode("count", None, &[1; 9]).unwrap_err();
        assert_eq!(err, FrameDecodeError::IntegerOverflow { field: "count" });
    }

    #[test]
    fn validation_rejects_wrong_shapes() {
        assert_eq!(
            FieldKind::Binary.validate("data", &FieldValue::text("x")),
            Err(ValidationError::Shape {
                field: "data",
                expected: "bytes"
            })
        );
        assert!(FieldKind::Encoding
            .validate("encoding", &FieldValue::Int(0))
            .is_err());
        assert!(TEXTS.validate("text", &FieldValue::texts(["ok"])).is_ok());
        assert!(TEXTS.validate("text", &FieldValue::Seq(vec![FieldValue::Int(1)])).is_err());
    }

    #[test]
    fn validation_checks_character_ranges() {
        assert_eq!(
            FieldKind::Url.validate("url", &FieldValue::text("http://☃")),
            Err(ValidationError::Character {
                field: "url",
                code: 0x2603
            })
        );
        assert!(FieldKind::Latin1.validate("mime", &FieldValue::text("é")).is_ok());
        assert!(FieldKind::EncodedText
            .validate("text", &FieldValue::text("a\0b"))
            .is_err());
    }

    #[test]
    fn validation_checks_widths() {
        assert_eq!(
            FieldKind::Fixed(3).validate("language", &FieldValue::text("en")),
            Err(ValidationError::Length {
                field: "language",
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            FieldKind::Integer(2).validate("n", &FieldValue::Int(0x1_0000)),
            Err(ValidationError::OutOfRange {
                field: "n",
                value: 0x1_0000,
                max: 0xFFFF
            })
        );
        assert!(FieldKind::Byte.validate("rating", &FieldValue::Int(255)).is_ok());
        assert!(FieldKind::Byte.validate("rating", &FieldValue::Int(256)).is_err());
    }

    #[test]
    fn integer_max_covers_every_width() {
        assert_eq!(integer_max(0), 0);
        assert_eq!(integer_max(1), 0xFF);
        assert_eq!(integer_max(3), 0xFF_FFFF);
        assert_eq!(integer_max(8), u64::MAX);
        assert_eq!(integer_max(12), u64::MAX);
    }

    #[test]
    fn rendering() {
        assert_eq!(FieldKind::EncodedText.render(None), "None");
        assert_eq!(
            FieldKind::Encoding.render(Some(&FieldValue::Encoding(TextEncoding::Utf16))),
            "UTF-16"
        );
        assert_eq!(
            FieldKind::PictureType.render(Some(&FieldValue::Int(3))),
            "3 (Cover (front))"
        );
        assert_eq!(TEXTS.render(Some(&FieldValue::texts(["a", "b"]))), "['a', 'b']");
        assert_eq!(
            FieldKind::Binary.render(Some(&FieldValue::Bytes(vec![0x41, 0x00]))),
            "b'A\\x00'"
        );
    }

    #[test]
    fn long_binary_is_elided() {
        let rendered = render_bytes(&[b'x'; 40]);
        assert_eq!(rendered, "b'xxxxxxxxxxxxxxxx'... (40 bytes)");
    }

    #[test]
    fn fits_checks_only_encoded_text() {
        let snowman = FieldValue::texts(["a", "☃"]);
        assert!(!TEXTS.fits(TextEncoding::Latin1, &snowman));
        assert!(TEXTS.fits(TextEncoding::Utf16, &snowman));

        let credits = FieldValue::Pairs(vec![(FieldValue::text("role"), FieldValue::text("☃"))]);
        assert!(!CREDITS.fits(TextEncoding::Latin1, &credits));
        assert!(CREDITS.fits(TextEncoding::Utf8, &credits));

        // Latin-1 fields are validated on assignment, not per encoding.
        assert!(FieldKind::Latin1.fits(TextEncoding::Latin1, &FieldValue::text("☃")));
        assert!(FieldKind::Binary.fits(TextEncoding::Latin1, &FieldValue::Bytes(vec![0xFF])));
    }
}
