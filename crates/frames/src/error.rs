//! Error taxonomy.
//!
//! | Error                     | Scope       | Raised by                          |
//! |---------------------------|-------------|------------------------------------|
//! | [`ValidationError`]       | one call    | construction, field assignment     |
//! | [`FrameDecodeError`]      | one frame   | stored inside an Error Frame       |
//! | [`EncodingError`]         | one call    | [`Frame::encode`](crate::Frame::encode) |
//! | [`IncompatibleFrameError`]| one call    | [`Frame::to_version`](crate::Frame::to_version) |
//!
//! A `FrameDecodeError` is never returned from a decode call: the frame that
//! failed becomes an Error Frame and the rest of the tag carries on.

use alloc::string::String;
use thiserror::Error;

use crate::encoding::TextEncoding;
use crate::frame::FrameId;
use crate::version::Version;

/// A value was rejected before any bytes were touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The identifier is not 3 or 4 characters from `A-Z0-9`.
    #[error("invalid frame identifier '{0}'")]
    InvalidId(String),
    /// No schema is registered for the identifier in this version.
    #[error("no frame {id} is defined in {version}")]
    UnknownFrame {
        /// Requested identifier.
        id: String,
        /// Requested version.
        version: Version,
    },
    /// The frame has no field with this name.
    #[error("frame {frame} has no field '{field}'")]
    UnknownField {
        /// Frame identifier.
        frame: FrameId,
        /// Requested field name.
        field: String,
    },
    /// Unknown and Error frames have no schema fields to assign.
    #[error("frame {0} has no schema")]
    Opaque(FrameId),
    /// The value has the wrong shape for the field.
    #[error("field '{field}' expects {expected}")]
    Shape {
        /// Field name.
        field: &'static str,
        /// Description of the accepted shape.
        expected: &'static str,
    },
    /// The text holds a character the field can never store.
    #[error("field '{field}' cannot hold character U+{code:04X}")]
    Character {
        /// Field name.
        field: &'static str,
        /// Offending code point.
        code: u32,
    },
    /// A numeric value does not fit the field width.
    #[error("field '{field}' value {value} exceeds {max}")]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: u64,
        /// Largest value the field can store.
        max: u64,
    },
    /// A fixed-length text field got the wrong number of characters.
    #[error("field '{field}' must be exactly {expected} characters, got {actual}")]
    Length {
        /// Field name.
        field: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
}

/// Why one frame's payload could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameDecodeError {
    /// The encoding selector byte is not 0..=3.
    #[error("unknown text encoding 0x{0:02X}")]
    UnknownEncoding(u8),
    /// A fixed-width field ran past the end of the payload.
    #[error("field '{field}' is truncated")]
    Truncated {
        /// Field name.
        field: &'static str,
    },
    /// String bytes are not well-formed in the active encoding.
    #[error("field '{field}' is not valid {encoding}")]
    MalformedText {
        /// Field name.
        field: &'static str,
        /// Encoding the bytes were read as.
        encoding: TextEncoding,
    },
    /// An encoded string appeared before any encoding selector.
    #[error("field '{field}' has no text encoding")]
    NoEncoding {
        /// Field name.
        field: &'static str,
    },
    /// An integer field holds a value wider than 64 bits.
    #[error("field '{field}' overflows 64 bits")]
    IntegerOverflow {
        /// Field name.
        field: &'static str,
    },
    /// Non-zero bytes remained after the last field.
    #[error("{0} unexpected trailing bytes")]
    TrailingData(usize),
    /// The frame header marks the payload as encrypted.
    #[error("frame is encrypted")]
    Encrypted,
}

/// A frame could not be turned into bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// No encoding in the fallback order can represent the frame's text.
    #[error("frame {frame}: text is not representable in any of {tried} encodings")]
    Unrepresentable {
        /// Frame identifier.
        frame: FrameId,
        /// Number of encodings attempted.
        tried: usize,
    },
    /// A field other than the encoding selector was never assigned.
    #[error("frame {frame}: field '{field}' is unset")]
    MissingField {
        /// Frame identifier.
        frame: FrameId,
        /// Field name.
        field: &'static str,
    },
    /// A stored value does not fit its field codec.
    #[error("frame {frame}: field '{field}' holds a value its codec cannot write")]
    InvalidValue {
        /// Frame identifier.
        frame: FrameId,
        /// Field name.
        field: &'static str,
    },
    /// Unknown/Error frame while [`CodecOptions::preserve_unknown`](crate::CodecOptions)
    /// is off.
    #[error("frame {frame} is opaque and unknown frames are not preserved")]
    Unpreserved {
        /// Frame identifier.
        frame: FrameId,
    },
}

/// No equivalent of the frame exists in the requested version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("frame {frame} cannot be converted to {version} format")]
pub struct IncompatibleFrameError {
    /// Frame identifier.
    pub frame: FrameId,
    /// Requested target version.
    pub version: Version,
}
