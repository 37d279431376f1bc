//! Codec configuration and constants
//!
//! Per-tag options arrive from the tag container through [`Context`]. All
//! tunable constants of the codec live here rather than at their use sites.

use crate::encoding::TextEncoding;
use crate::version::Version;

/// Fallback order when a frame's text must be re-encoded in v2.2/v2.3.
///
/// Narrowest first: ISO-8859-1 keeps Western text one byte per character.
pub const PREFERRED_ENCODINGS_V22_V23: &[TextEncoding] =
    &[TextEncoding::Latin1, TextEncoding::Utf16];

/// Fallback order when a frame's text must be re-encoded in v2.4.
pub const PREFERRED_ENCODINGS_V24: &[TextEncoding] = &[TextEncoding::Latin1, TextEncoding::Utf8];

/// Play counters are written with at least this many bytes.
pub const MIN_COUNTER_BYTES: usize = 4;

/// Widest fixed-width integer field a schema may declare.
pub const MAX_INTEGER_BYTES: usize = 8;

/// Byte order mark written before every UTF-16 string.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// Big-endian byte order mark, accepted on decode.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Binary fields longer than this are elided in frame renderings.
pub const RENDER_BINARY_LIMIT: usize = 32;

/// Per-tag options supplied by the tag container.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodecOptions {
    /// Re-emit unknown and undecodable frames verbatim on encode.
    ///
    /// When `false`, encoding such a frame fails with
    /// [`EncodingError::Unpreserved`](crate::error::EncodingError::Unpreserved)
    /// and the container decides whether to drop it.
    pub preserve_unknown: bool,
    /// Encoding fallback order. Empty means the version default
    /// ([`PREFERRED_ENCODINGS_V22_V23`] or [`PREFERRED_ENCODINGS_V24`]).
    pub preferred_encodings: heapless::Vec<TextEncoding, 4>,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            preserve_unknown: true,
            preferred_encodings: heapless::Vec::new(),
        }
    }
}

impl CodecOptions {
    /// The encoding fallback order to use for `version`.
    #[must_use]
    pub fn preferred_for(&self, version: Version) -> &[TextEncoding] {
        if !self.preferred_encodings.is_empty() {
            return &self.preferred_encodings;
        }
        match version {
            Version::V22 | Version::V23 => PREFERRED_ENCODINGS_V22_V23,
            Version::V24 => PREFERRED_ENCODINGS_V24,
        }
    }
}

/// Everything a decode or encode call needs to know about the owning tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Sub-version of the tag being read or written.
    pub version: Version,
    /// Per-tag options.
    pub options: CodecOptions,
}

impl Context {
    /// Context for `version` with default options.
    #[must_use]
    pub fn new(version: Version) -> Self {
        Self {
            version,
            options: CodecOptions::default(),
        }
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }
}
