//! Frame object model.
//!
//! A [`Frame`] is one decoded or caller-built frame: identifier, flags and
//! a body. A known body holds one value slot per schema field, in schema
//! order; slots are `None` only until first assignment. Unknown and Error
//! bodies keep the original payload so nothing is ever lost.
//!
//! # Decode
//!
//! ```text
//!   id, raw flags, payload
//!        │
//!        ├─ id not registered for version ──► Unknown { data }
//!        ├─ encrypted flag ─────────────────► Error { data, Encrypted }
//!        ├─ field codec fails ──────────────► Error { data, cause }
//!        └─ all fields decoded ─────────────► Known { schema, values }
//! ```
//!
//! Compressed and unsynchronised payloads must be restored by the tag
//! container before they reach [`Frame::decode`].
//!
//! # Encode
//!
//! Frames whose schema starts with an encoding selector try the stored
//! encoding first, then each encoding of the preference order the target
//! version supports. The frame itself is never modified.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::config::Context;
use crate::diagnostics::{Warning, WarningSink};
use crate::encoding::TextEncoding;
use crate::error::{EncodingError, FrameDecodeError, ValidationError};
use crate::field::{quote, render_bytes, EncodeFault, Field, FieldKind, FieldValue};
use crate::flags::{FrameFlag, FrameFlags};
use crate::registry;
use crate::schema::FrameSchema;
use crate::version::Version;

/// A 3- or 4-character frame identifier.
///
/// Identifiers built with [`FrameId::new`] contain only `A-Z` and `0-9`.
/// [`FrameId::lossy`] accepts whatever a tag header holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(heapless::String<4>);

impl FrameId {
    /// Parse a well-formed identifier.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidId`] unless `id` is 3 or 4 characters from
    /// `A-Z0-9`.
    pub fn new(id: &str) -> Result<Self, ValidationError> {
        let well_formed = matches!(id.len(), 3 | 4)
            && id
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if !well_formed {
            return Err(ValidationError::InvalidId(id.into()));
        }
        let mut inner = heapless::String::new();
        inner
            .push_str(id)
            .map_err(|_| ValidationError::InvalidId(id.into()))?;
        Ok(Self(inner))
    }

    /// Keep at most four characters of `id`, replacing anything that is not
    /// printable ASCII with `?`.
    ///
    /// A longer `id` ends in `?`, so truncation never yields a registered
    /// identifier (`"TIT2X"` becomes `"TIT?"`).
    #[must_use]
    pub fn lossy(id: &str) -> Self {
        let mut chars = id
            .chars()
            .map(|ch| if ch.is_ascii_graphic() { ch } else { '?' });
        let mut inner = heapless::String::new();
        for ch in chars.by_ref().take(4) {
            if inner.push(ch).is_err() {
                break;
            }
        }
        if chars.next().is_some() {
            inner.pop();
            // Cannot fail: one character was just removed.
            let _ = inner.push('?');
        }
        Self(inner)
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for FrameId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for FrameId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for FrameId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// What a frame holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameBody {
    /// A registered frame type with one slot per schema field.
    Known {
        /// Layout of the frame type.
        schema: &'static FrameSchema,
        /// Field values in schema order.
        values: Vec<Option<FieldValue>>,
    },
    /// Identifier not registered for the tag's version.
    Unknown {
        /// Original payload.
        data: Vec<u8>,
    },
    /// Decoding failed; the payload is kept as-is.
    Error {
        /// Original payload.
        data: Vec<u8>,
        /// Why decoding failed.
        error: FrameDecodeError,
    },
}

/// One ID3v2 frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub(crate) id: FrameId,
    pub(crate) flags: FrameFlags,
    pub(crate) body: FrameBody,
}

/// Why one encode pass failed.
enum Failure {
    Unrepresentable,
    Missing(&'static str),
    Invalid(&'static str),
}

impl Frame {
    // ── Construction ────────────────────────────────────────────────────────

    /// Build a frame of `schema` from `(field name, value)` pairs.
    ///
    /// Every value is validated; fields not mentioned stay unset.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownField`] for a name the schema lacks, or the
    /// field codec's validation error.
    pub fn construct<'n, I>(schema: &'static FrameSchema, values: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (&'n str, FieldValue)>,
    {
        let mut frame = Self::empty(schema)?;
        for (name, value) in values {
            frame.set(name, value)?;
        }
        Ok(frame)
    }

    /// An empty frame of the type registered as `id` in `version`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidId`] or [`ValidationError::UnknownFrame`].
    pub fn new(id: &str, version: Version) -> Result<Self, ValidationError> {
        FrameId::new(id)?;
        let schema = registry::resolve(id, version).ok_or_else(|| ValidationError::UnknownFrame {
            id: id.into(),
            version,
        })?;
        Self::empty(schema)
    }

    /// A text frame holding `texts`, encoding left to the encoder.
    ///
    /// # Errors
    ///
    /// As [`Frame::new`], or [`ValidationError::UnknownField`] if `id` is
    /// not a text frame.
    pub fn text<I, S>(id: &str, version: Version, texts: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut frame = Self::new(id, version)?;
        frame.set("text", FieldValue::texts(texts))?;
        Ok(frame)
    }

    /// A URL link frame.
    ///
    /// # Errors
    ///
    /// As [`Frame::new`], or a validation error for a non-ASCII URL.
    pub fn url(id: &str, version: Version, url: &str) -> Result<Self, ValidationError> {
        let mut frame = Self::new(id, version)?;
        frame.set("url", FieldValue::text(url))?;
        Ok(frame)
    }

    /// An Unknown Frame carrying `data` verbatim.
    #[must_use]
    pub fn unknown(id: FrameId, data: Vec<u8>) -> Self {
        Self {
            id,
            flags: FrameFlags::EMPTY,
            body: FrameBody::Unknown { data },
        }
    }

    /// Override the identifier, e.g. for an experimental frame that reuses a
    /// registered layout.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidId`].
    pub fn with_id(mut self, id: &str) -> Result<Self, ValidationError> {
        self.id = FrameId::new(id)?;
        Ok(self)
    }

    /// Replace the flag set.
    #[must_use]
    pub fn with_flags(mut self, flags: FrameFlags) -> Self {
        self.flags = flags;
        self
    }

    fn empty(schema: &'static FrameSchema) -> Result<Self, ValidationError> {
        Ok(Self {
            id: FrameId::new(schema.id)?,
            flags: FrameFlags::EMPTY,
            body: FrameBody::Known {
                schema,
                values: core::iter::repeat_with(|| None)
                    .take(schema.fields.len())
                    .collect(),
            },
        })
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    /// Frame identifier.
    #[must_use]
    pub fn id(&self) -> &FrameId {
        &self.id
    }

    /// Flag set.
    #[must_use]
    pub fn flags(&self) -> &FrameFlags {
        &self.flags
    }

    /// Mutable flag set.
    pub fn flags_mut(&mut self) -> &mut FrameFlags {
        &mut self.flags
    }

    /// Frame body.
    #[must_use]
    pub fn body(&self) -> &FrameBody {
        &self.body
    }

    /// Schema of a known frame.
    #[must_use]
    pub fn schema(&self) -> Option<&'static FrameSchema> {
        match self.body {
            FrameBody::Known { schema, .. } => Some(schema),
            _ => None,
        }
    }

    /// `true` for an Unknown Frame.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self.body, FrameBody::Unknown { .. })
    }

    /// `true` for an Error Frame.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.body, FrameBody::Error { .. })
    }

    /// Why an Error Frame failed to decode.
    #[must_use]
    pub fn decode_error(&self) -> Option<&FrameDecodeError> {
        match &self.body {
            FrameBody::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Stored payload of an Unknown or Error Frame.
    #[must_use]
    pub fn raw_data(&self) -> Option<&[u8]> {
        match &self.body {
            FrameBody::Unknown { data } | FrameBody::Error { data, .. } => Some(data),
            FrameBody::Known { .. } => None,
        }
    }

    /// Fields paired with their current values.
    pub fn fields(&self) -> impl Iterator<Item = (&'static Field, Option<&FieldValue>)> + '_ {
        let (fields, values) = match &self.body {
            FrameBody::Known { schema, values } => (schema.fields, values.as_slice()),
            FrameBody::Unknown { .. } | FrameBody::Error { .. } => (&[][..], &[][..]),
        };
        fields.iter().zip(values.iter().map(Option::as_ref))
    }

    /// Value of the field called `name`, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields()
            .find(|(field, _)| field.name == name)
            .and_then(|(_, value)| value)
    }

    /// Assign the field called `name` after validating `value`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Opaque`] for Unknown/Error frames,
    /// [`ValidationError::UnknownField`], or the codec's validation error.
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), ValidationError> {
        let (field, slot) = self.slot(name)?;
        field.validate(&value)?;
        *slot = Some(value);
        Ok(())
    }

    /// Clear the field called `name`, returning its old value.
    ///
    /// # Errors
    ///
    /// As [`Frame::set`].
    pub fn unset(&mut self, name: &str) -> Result<Option<FieldValue>, ValidationError> {
        let (_, slot) = self.slot(name)?;
        Ok(slot.take())
    }

    fn slot(&mut self, name: &str) -> Result<(&'static Field, &mut Option<FieldValue>), ValidationError> {
        let FrameBody::Known { schema, values } = &mut self.body else {
            return Err(ValidationError::Opaque(self.id.clone()));
        };
        let unknown = || ValidationError::UnknownField {
            frame: self.id.clone(),
            field: name.into(),
        };
        let index = schema.field_index(name).ok_or_else(unknown)?;
        match (schema.fields.get(index), values.get_mut(index)) {
            (Some(field), Some(slot)) => Ok((field, slot)),
            _ => Err(unknown()),
        }
    }

    /// The stored text encoding, `None` if left to the encoder.
    #[must_use]
    pub fn encoding(&self) -> Option<TextEncoding> {
        self.get("encoding").and_then(FieldValue::as_encoding)
    }

    /// Strings of a text frame's `text` list.
    #[must_use]
    pub fn text_values(&self) -> Vec<&str> {
        self.get("text")
            .and_then(FieldValue::as_seq)
            .map(|items| items.iter().filter_map(FieldValue::as_text).collect())
            .unwrap_or_default()
    }

    // ── Decode ──────────────────────────────────────────────────────────────

    /// Decode one frame payload. Never fails.
    ///
    /// `raw_flags` are the two header flag bytes as a big-endian integer
    /// (0 for v2.2). A payload that cannot be decoded becomes an Error Frame
    /// holding the original bytes; an unregistered identifier becomes an
    /// Unknown Frame.
    pub fn decode<S>(id: &str, raw_flags: u16, payload: &[u8], ctx: &Context, sink: &mut S) -> Self
    where
        S: WarningSink + ?Sized,
    {
        let version = ctx.version;
        let flags = FrameFlags::from_bits(raw_flags, version);
        let strict = FrameId::new(id).ok();
        let frame_id = strict.clone().unwrap_or_else(|| FrameId::lossy(id));

        if flags.unknown_bits() != 0 {
            sink.warn(Warning::UnknownFlags {
                id: frame_id.clone(),
                bits: flags.unknown_bits(),
            });
        }

        let Some(schema) = strict.and_then(|_| registry::resolve(id, version)) else {
            tracing::debug!(frame = %frame_id, %version, len = payload.len(), "unknown frame");
            return Self::unknown(frame_id, payload.to_vec()).with_flags(flags);
        };

        if schema.untested {
            sink.warn(Warning::UntestedFrame { id: frame_id.clone() });
        }

        let decoded = if flags.contains(FrameFlag::Encrypted) {
            Err(FrameDecodeError::Encrypted)
        } else {
            decode_fields(schema, payload)
        };

        let body = match decoded {
            Ok(values) => {
                tracing::debug!(frame = %frame_id, %version, len = payload.len(), "decoded frame");
                FrameBody::Known { schema, values }
            }
            Err(error) => {
                tracing::debug!(frame = %frame_id, %version, %error, "frame kept as error frame");
                FrameBody::Error {
                    data: payload.to_vec(),
                    error,
                }
            }
        };
        Self {
            id: frame_id,
            flags,
            body,
        }
    }

    // ── Encode ──────────────────────────────────────────────────────────────

    /// Encode the payload for `ctx.version`.
    ///
    /// # Errors
    ///
    /// [`EncodingError::Unrepresentable`] when no encoding in the fallback
    /// order can hold the text, [`EncodingError::MissingField`] for unset
    /// fields, [`EncodingError::InvalidValue`] for values the codec cannot
    /// write, and [`EncodingError::Unpreserved`] for opaque frames when
    /// unknown frames are not preserved.
    pub fn encode<S>(&self, ctx: &Context, sink: &mut S) -> Result<Vec<u8>, EncodingError>
    where
        S: WarningSink + ?Sized,
    {
        let (schema, values) = match &self.body {
            FrameBody::Known { schema, values } => (*schema, values.as_slice()),
            FrameBody::Unknown { data } | FrameBody::Error { data, .. } => {
                if ctx.options.preserve_unknown {
                    return Ok(data.clone());
                }
                return Err(EncodingError::Unpreserved {
                    frame: self.id.clone(),
                });
            }
        };

        if schema.bozo {
            sink.warn(Warning::DiscouragedFrame {
                id: self.id.clone(),
            });
        }

        if !schema.starts_with_encoding() {
            return encode_fields(schema, values, None).map_err(|failure| self.failure(failure, 0));
        }

        // A fixed encoding is honoured as stored; only the fallback order is
        // limited to what the target version supports.
        let version = ctx.version;
        let fixed = self.encoding();
        let fallback = ctx
            .options
            .preferred_for(version)
            .iter()
            .copied()
            .filter(|e| e.supported_in(version) && Some(*e) != fixed);

        let mut tried = 0usize;
        for encoding in fixed.into_iter().chain(fallback) {
            tried = tried.saturating_add(1);
            if !fits(schema, values, encoding) {
                tracing::debug!(frame = %self.id, %encoding, "text not representable, trying next encoding");
                continue;
            }
            match encode_fields(schema, values, Some(encoding)) {
                Ok(bytes) => {
                    tracing::debug!(frame = %self.id, %version, %encoding, len = bytes.len(), "encoded frame");
                    return Ok(bytes);
                }
                Err(Failure::Unrepresentable) => {
                    tracing::debug!(frame = %self.id, %encoding, "text not representable, trying next encoding");
                }
                Err(failure) => return Err(self.failure(failure, tried)),
            }
        }
        Err(EncodingError::Unrepresentable {
            frame: self.id.clone(),
            tried,
        })
    }

    fn failure(&self, failure: Failure, tried: usize) -> EncodingError {
        let frame = self.id.clone();
        match failure {
            Failure::Unrepresentable => EncodingError::Unrepresentable { frame, tried },
            Failure::Missing(field) => EncodingError::MissingField { frame, field },
            Failure::Invalid(field) => EncodingError::InvalidValue { frame, field },
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────────

    /// One-line rendering without the flag marker, e.g. `TIT2(UTF-8 'Hello')`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}({})", self.id, self.render_fields())
    }

    /// `'!'` for Error Frames, `'?'` for unknown flags, `' '` otherwise.
    #[must_use]
    pub fn marker(&self) -> char {
        if self.is_error() {
            '!'
        } else if self.flags.contains(FrameFlag::Unknown) {
            '?'
        } else {
            ' '
        }
    }

    fn render_fields(&self) -> String {
        let (schema, values) = match &self.body {
            FrameBody::Known { schema, values } => (*schema, values),
            FrameBody::Unknown { data } => return render_bytes(data),
            FrameBody::Error { data, error } => {
                return format!("ERROR, {error}, {}", render_bytes(data));
            }
        };
        if schema.is_text_list() {
            let encoding = self.encoding().map_or("auto", TextEncoding::name);
            let texts = match self.get("text").and_then(FieldValue::as_seq) {
                Some(items) => items
                    .iter()
                    .map(|item| item.as_text().map_or_else(|| String::from("None"), quote))
                    .collect::<Vec<_>>()
                    .join(", "),
                None => String::from("None"),
            };
            if texts.is_empty() {
                return encoding.into();
            }
            return format!("{encoding} {texts}");
        }
        if schema.is_url() {
            return FieldKind::Url.render(values.first().and_then(Option::as_ref));
        }
        schema
            .fields
            .iter()
            .zip(values)
            .map(|(field, value)| field.kind.render(value.as_ref()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.marker(), self.summary())
    }
}

fn decode_fields(
    schema: &FrameSchema,
    payload: &[u8],
) -> Result<Vec<Option<FieldValue>>, FrameDecodeError> {
    let mut values = Vec::with_capacity(schema.fields.len());
    let mut encoding = None;
    let mut rest = payload;
    for field in schema.fields {
        let (value, tail) = field.kind.decode(field.name, encoding, rest)?;
        if let FieldValue::Encoding(selected) = value {
            encoding = Some(selected);
        }
        values.push(Some(value));
        rest = tail;
    }
    // Zero bytes after the last field are padding.
    if rest.iter().any(|&b| b != 0) {
        return Err(FrameDecodeError::TrailingData(rest.len()));
    }
    Ok(values)
}

fn fits(schema: &FrameSchema, values: &[Option<FieldValue>], encoding: TextEncoding) -> bool {
    schema
        .fields
        .iter()
        .zip(values)
        .all(|(field, slot)| slot.as_ref().map_or(true, |value| field.kind.fits(encoding, value)))
}

fn encode_fields(
    schema: &FrameSchema,
    values: &[Option<FieldValue>],
    encoding: Option<TextEncoding>,
) -> Result<Vec<u8>, Failure> {
    let mut out = Vec::new();
    let mut fields = schema.fields.iter().zip(values).peekable();
    while let Some((field, slot)) = fields.next() {
        let last = fields.peek().is_none();
        let selector;
        let value = if field.kind == FieldKind::Encoding {
            selector = FieldValue::Encoding(encoding.ok_or(Failure::Invalid(field.name))?);
            &selector
        } else {
            slot.as_ref().ok_or(Failure::Missing(field.name))?
        };
        field
            .kind
            .encode(encoding, value, last, &mut out)
            .map_err(|fault| match fault {
                EncodeFault::Unrepresentable => Failure::Unrepresentable,
                EncodeFault::Invalid => Failure::Invalid(field.name),
            })?;
    }
    Ok(out)
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
    use crate::config::CodecOptions;
    use crate::diagnostics::Warning;

    fn ctx(version: Version) -> Context {
        Context::new(version)
    }

    fn decode(id: &str, payload: &[u8], version: Version) -> (Frame, Vec<Warning>) {
        let mut warnings = Vec::new();
        let frame = Frame::decode(id, 0, payload, &ctx(version), &mut warnings);
        (frame, warnings)
    }

    #[test]
    fn frame_id_validation() {
        assert!(FrameId::new("TIT2").is_ok());
        assert!(FrameId::new("TT2").is_ok());
        assert!(FrameId::new("tit2").is_err());
        assert!(FrameId::new("TI").is_err());
        assert!(FrameId::new("TITLE").is_err());
        assert_eq!(FrameId::lossy("ab\u{1}cdef").as_str(), "ab??");
        assert_eq!(FrameId::lossy("ab\u{1}").as_str(), "ab?");
        assert_eq!(FrameId::lossy("TIT2X").as_str(), "TIT?");
    }

    #[test]
    fn decodes_text_frame() {
        let (frame, warnings) = decode("TIT2", b"\x03Hello", Version::V24);
        assert_eq!(frame.summary(), "TIT2(UTF-8 'Hello')");
        assert_eq!(frame.to_string(), " TIT2(UTF-8 'Hello')");
        assert_eq!(frame.text_values(), vec!["Hello"]);
        assert_eq!(frame.encoding(), Some(TextEncoding::Utf8));
        assert!(warnings.is_empty());
    }

    #[test]
    fn unregistered_identifier_is_unknown_frame() {
        let (frame, _) = decode("XYZW", b"\x01\x02", Version::V23);
        assert!(frame.is_unknown());
        assert_eq!(frame.raw_data(), Some(&b"\x01\x02"[..]));
        assert_eq!(frame.summary(), "XYZW(b'\\x01\\x02')");
        let bytes = frame.encode(&ctx(Version::V23), &mut ()).unwrap();
        assert_eq!(bytes, b"\x01\x02");
    }

    #[test]
    fn identifier_from_the_wrong_version_is_unknown() {
        let (frame, _) = decode("TDRC", b"\x002020", Version::V23);
        assert!(frame.is_unknown());
    }

    #[test]
    fn bad_encoding_byte_becomes_error_frame() {
        let (frame, _) = decode("TIT2", b"\x09abc", Version::V24);
        assert!(frame.is_error());
        assert_eq!(
            frame.decode_error(),
            Some(&FrameDecodeError::UnknownEncoding(9))
        );
        assert_eq!(frame.raw_data(), Some(&b"\x09abc"[..]));
        assert_eq!(
            frame.to_string(),
            "!TIT2(ERROR, unknown text encoding 0x09, b'\\tabc')"
        );
    }

    #[test]
    fn encrypted_frames_are_not_decoded() {
        let mut warnings = Vec::new();
        let frame = Frame::decode("TIT2", 0x0040, b"\x00abc", &ctx(Version::V23), &mut warnings);
        assert_eq!(frame.decode_error(), Some(&FrameDecodeError::Encrypted));
        assert!(frame.flags().contains(FrameFlag::Encrypted));
    }

    #[test]
    fn trailing_padding_is_ignored_but_data_is_not() {
        let (frame, _) = decode("PCNT", b"\x00\x00\x00\x07", Version::V23);
        assert_eq!(frame.get("count"), Some(&FieldValue::Int(7)));

        let (frame, _) = decode("UFID", b"owner\0id", Version::V23);
        assert_eq!(frame.get("data"), Some(&FieldValue::Bytes(b"id".to_vec())));

        let (frame, _) = decode("COMM", b"\x00engdesc\0text\0\0", Version::V23);
        assert_eq!(frame.get("text"), Some(&FieldValue::text("text")));

        let (frame, _) = decode("COMM", b"\x00engdesc\0text\0junk", Version::V23);
        assert_eq!(
            frame.decode_error(),
            Some(&FrameDecodeError::TrailingData(4))
        );
    }

    #[test]
    fn unknown_flags_warn_and_mark() {
        let mut warnings = Vec::new();
        let frame = Frame::decode("TIT2", 0x0010, b"\x00a", &ctx(Version::V23), &mut warnings);
        assert_eq!(frame.marker(), '?');
        assert_eq!(
            warnings,
            vec![Warning::UnknownFlags {
                id: FrameId::new("TIT2").unwrap(),
                bits: 0x0010
            }]
        );
    }

    #[test]
    fn untested_frames_warn() {
        let (frame, warnings) = decode("ETCO", b"\x01\x02\x03", Version::V23);
        assert!(!frame.is_error());
        assert_eq!(
            warnings,
            vec![Warning::UntestedFrame {
                id: FrameId::new("ETCO").unwrap()
            }]
        );
    }

    #[test]
    fn construct_validates_values() {
        let schema = registry::lookup("WOAR").unwrap();
        let err = Frame::construct(schema, [("url", FieldValue::text("http://☃"))]).unwrap_err();
        assert!(matches!(err, ValidationError::Character { .. }));

        let err = Frame::construct(schema, [("nope", FieldValue::text("x"))]).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownField { .. }));
    }

    #[test]
    fn set_revalidates() {
        let mut frame = Frame::new("POPM", Version::V24).unwrap();
        assert!(frame.set("rating", FieldValue::Int(300)).is_err());
        frame.set("rating", FieldValue::Int(255)).unwrap();
        assert_eq!(frame.get("rating"), Some(&FieldValue::Int(255)));
        assert_eq!(frame.unset("rating").unwrap(), Some(FieldValue::Int(255)));
        assert_eq!(frame.get("rating"), None);
    }

    #[test]
    fn opaque_frames_reject_assignment() {
        let mut frame = Frame::unknown(FrameId::new("XXXX").unwrap(), vec![1]);
        assert!(matches!(
            frame.set("data", FieldValue::Bytes(vec![2])),
            Err(ValidationError::Opaque(_))
        ));
    }

    #[test]
    fn new_rejects_unregistered_identifiers() {
        assert!(matches!(
            Frame::new("TYER", Version::V24),
            Err(ValidationError::UnknownFrame { .. })
        ));
        assert!(matches!(
            Frame::new("ty", Version::V24),
            Err(ValidationError::InvalidId(_))
        ));
    }

    #[test]
    fn encode_prefers_latin1_then_wider() {
        let frame = Frame::text("TIT2", Version::V23, ["abc"]).unwrap();
        assert_eq!(frame.encode(&ctx(Version::V23), &mut ()).unwrap(), b"\x00abc");

        let frame = Frame::text("TIT2", Version::V24, ["☃"]).unwrap();
        let bytes = frame.encode(&ctx(Version::V24), &mut ()).unwrap();
        assert_eq!(bytes, "\x03☃".as_bytes());
        assert_eq!(frame.encoding(), None);
    }

    #[test]
    fn fixed_encoding_is_used_when_supported() {
        let mut frame = Frame::text("TIT2", Version::V23, ["a"]).unwrap();
        frame
            .set("encoding", FieldValue::Encoding(TextEncoding::Utf16))
            .unwrap();
        let bytes = frame.encode(&ctx(Version::V23), &mut ()).unwrap();
        assert_eq!(bytes, b"\x01\xFF\xFEa\x00");
    }

    #[test]
    fn fixed_encoding_is_kept_in_older_versions() {
        let mut frame = Frame::text("TIT2", Version::V24, ["abc"]).unwrap();
        frame
            .set("encoding", FieldValue::Encoding(TextEncoding::Utf8))
            .unwrap();
        let bytes = frame.encode(&ctx(Version::V23), &mut ()).unwrap();
        assert_eq!(bytes, b"\x03abc");
        let decoded = Frame::decode("TIT2", 0, &bytes, &ctx(Version::V23), &mut ());
        assert_eq!(decoded.encoding(), Some(TextEncoding::Utf8));
        assert_eq!(decoded.text_values(), vec!["abc"]);
    }

    #[test]
    fn fixed_latin1_with_wide_text_falls_back() {
        let mut frame = Frame::text("TIT2", Version::V23, ["☃"]).unwrap();
        frame
            .set("encoding", FieldValue::Encoding(TextEncoding::Latin1))
            .unwrap();
        let bytes = frame.encode(&ctx(Version::V23), &mut ()).unwrap();
        assert_eq!(bytes[0], 1);
        assert_eq!(frame.encoding(), Some(TextEncoding::Latin1));
    }

    #[test]
    fn exhausted_fallback_is_an_error() {
        let mut options = CodecOptions::default();
        options.preferred_encodings.push(TextEncoding::Latin1).unwrap();
        let ctx = Context::new(Version::V23).with_options(options);
        let frame = Frame::text("TIT2", Version::V23, ["☃"]).unwrap();
        assert_eq!(
            frame.encode(&ctx, &mut ()),
            Err(EncodingError::Unrepresentable {
                frame: FrameId::new("TIT2").unwrap(),
                tried: 1
            })
        );
    }

    #[test]
    fn missing_fields_fail_encoding() {
        let frame = Frame::new("COMM", Version::V23).unwrap();
        assert_eq!(
            frame.encode(&ctx(Version::V23), &mut ()),
            Err(EncodingError::MissingField {
                frame: FrameId::new("COMM").unwrap(),
                field: "language"
            })
        );
    }

    #[test]
    fn unpreserved_unknown_frames_fail_encoding() {
        let frame = Frame::unknown(FrameId::new("XXXX").unwrap(), vec![1]);
        let ctx = Context::new(Version::V24).with_options(CodecOptions {
            preserve_unknown: false,
            ..CodecOptions::default()
        });
        assert!(matches!(
            frame.encode(&ctx, &mut ()),
            Err(EncodingError::Unpreserved { .. })
        ));
    }

    #[test]
    fn bozo_frames_warn_on_encode() {
        let schema = registry::lookup("LINK").unwrap();
        let frame = Frame::construct(schema, [("data", FieldValue::Bytes(b"x".to_vec()))]).unwrap();
        let mut warnings = Vec::new();
        frame.encode(&ctx(Version::V24), &mut warnings).unwrap();
        assert_eq!(
            warnings,
            vec![Warning::DiscouragedFrame {
                id: FrameId::new("LINK").unwrap()
            }]
        );
    }

    #[test]
    fn rendering_variants() {
        let frame = Frame::url("WOAR", Version::V23, "http://a.b").unwrap();
        assert_eq!(frame.summary(), "WOAR('http://a.b')");

        let frame = Frame::text("TPE1", Version::V24, ["a", "b"]).unwrap();
        assert_eq!(frame.summary(), "TPE1(auto 'a', 'b')");

        let (frame, _) = decode("POPM", b"me@x\0\x80\x00\x00\x00\x02", Version::V23);
        assert_eq!(frame.summary(), "POPM('me@x', 128, 2)");

        let frame = Frame::new("PCNT", Version::V23).unwrap();
        assert_eq!(frame.summary(), "PCNT(None)");
    }

    #[test]
    fn experimental_identifier_override() {
        let frame = Frame::text("TIT2", Version::V24, ["x"])
            .unwrap()
            .with_id("XSOP")
            .unwrap();
        assert_eq!(frame.id(), "XSOP");
        assert_eq!(frame.summary(), "XSOP(auto 'x')");
    }
}
