//! ID3v2 frame specification and versioning engine.
//!
//! Decodes the payload of a single ID3v2 frame into a structured, queryable
//! [`Frame`], re-encodes it deterministically, and translates frames between
//! ID3v2.2, v2.3 and v2.4. Locating the tag inside an audio file, parsing
//! frame headers and splicing bytes back into the file belong to the tag
//! container that drives this crate.
//!
//! # Modules
//!
//! - [`encoding`]: `TextEncoding` selector byte and its text codecs
//! - [`field`]: `FieldKind` codecs and the `FieldValue` they produce
//! - [`schema`]: `FrameSchema` and `MergePolicy`
//! - [`registry`]: static table of every known frame type
//! - [`frame`]: `Frame` construction, decode, encode and rendering
//! - [`flags`]: per-version frame header flag bits
//! - [`merge`]: duplicate-frame collapsing
//! - [`translate`]: cross-version frame conversion
//! - [`diagnostics`]: advisory `Warning`s and the `WarningSink` seam
//! - [`error`]: error taxonomy
//! - [`config`]: `CodecOptions`, `Context` and codec constants
//! - [`synchsafe`]: 28-bit synchsafe integers used by tag headers
//!
//! # Example
//!
//! ```
//! use frames::{Context, Frame, Version, Warning};
//!
//! let ctx = Context::new(Version::V24);
//! let mut warnings: Vec<Warning> = Vec::new();
//!
//! let frame = Frame::decode("TIT2", 0, b"\x03Hello", &ctx, &mut warnings);
//! assert_eq!(frame.summary(), "TIT2(UTF-8 'Hello')");
//!
//! let v22 = frame.to_version(Version::V22).unwrap();
//! assert_eq!(v22.id(), "TT2");
//!
//! assert_eq!(frame.encode(&ctx, &mut warnings).unwrap(), b"\x03Hello");
//! assert!(warnings.is_empty());
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

extern crate alloc;

pub mod config;
pub mod diagnostics;
pub mod encoding;
pub mod error;
pub mod field;
pub mod flags;
pub mod frame;
pub mod merge;
pub mod registry;
pub mod schema;
pub mod synchsafe;
pub mod translate;
pub mod version;

// Top-level re-exports for convenience
pub use config::{CodecOptions, Context};
pub use diagnostics::{TracingSink, Warning, WarningSink};
pub use encoding::TextEncoding;
pub use error::{EncodingError, FrameDecodeError, IncompatibleFrameError, ValidationError};
pub use field::{Field, FieldKind, FieldValue};
pub use flags::{FrameFlag, FrameFlags};
pub use frame::{Frame, FrameBody, FrameId};
pub use merge::merge;
pub use registry::{known_ids, resolve};
pub use schema::{FrameSchema, MergePolicy};
pub use version::{Version, VersionSet};
