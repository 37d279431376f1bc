//! Frame header flags.
//!
//! The two flag bytes of a frame header mean different things in v2.3 and
//! v2.4, and v2.2 has none. [`FrameFlags`] stores flags by meaning and maps
//! to and from raw bits per version. Bits the version does not define are
//! kept verbatim under the [`FrameFlag::Unknown`] marker.
//!
//! ```text
//!   bit     15 14 13 12 .. 7  6  5  4  3  2  1  0
//!   v2.3     T  F  R         C  E  G
//!   v2.4        T  F  R         G        C  E  U  D
//! ```

use core::fmt;

use crate::version::Version;

/// One frame header flag, independent of its bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameFlag {
    /// Discard the frame if the tag is altered.
    TagAlterPreservation,
    /// Discard the frame if the audio is altered.
    FileAlterPreservation,
    /// The frame should not be changed.
    ReadOnly,
    /// The payload is zlib-compressed.
    Compressed,
    /// The payload is encrypted.
    Encrypted,
    /// The frame carries a group identifier.
    Grouped,
    /// The payload is unsynchronised (v2.4).
    Unsynchronised,
    /// A data length indicator precedes the payload (v2.4).
    DataLengthIndicator,
    /// The header carried bits the decoder did not recognise.
    Unknown,
}

impl FrameFlag {
    /// Every flag, in display order.
    pub const ALL: [FrameFlag; 9] = [
        FrameFlag::TagAlterPreservation,
        FrameFlag::FileAlterPreservation,
        FrameFlag::ReadOnly,
        FrameFlag::Compressed,
        FrameFlag::Encrypted,
        FrameFlag::Grouped,
        FrameFlag::Unsynchronised,
        FrameFlag::DataLengthIndicator,
        FrameFlag::Unknown,
    ];

    const fn mask(self) -> u16 {
        match self {
            Self::TagAlterPreservation => 0x001,
            Self::FileAlterPreservation => 0x002,
            Self::ReadOnly => 0x004,
            Self::Compressed => 0x008,
            Self::Encrypted => 0x010,
            Self::Grouped => 0x020,
            Self::Unsynchronised => 0x040,
            Self::DataLengthIndicator => 0x080,
            Self::Unknown => 0x100,
        }
    }

    /// Short lowercase name used in renderings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TagAlterPreservation => "tag_alter",
            Self::FileAlterPreservation => "file_alter",
            Self::ReadOnly => "read_only",
            Self::Compressed => "compressed",
            Self::Encrypted => "encrypted",
            Self::Grouped => "grouped",
            Self::Unsynchronised => "unsynchronised",
            Self::DataLengthIndicator => "data_length",
            Self::Unknown => "unknown",
        }
    }
}

const V23_LAYOUT: &[(FrameFlag, u16)] = &[
    (FrameFlag::TagAlterPreservation, 0x8000),
    (FrameFlag::FileAlterPreservation, 0x4000),
    (FrameFlag::ReadOnly, 0x2000),
    (FrameFlag::Compressed, 0x0080),
    (FrameFlag::Encrypted, 0x0040),
    (FrameFlag::Grouped, 0x0020),
];

const V24_LAYOUT: &[(FrameFlag, u16)] = &[
    (FrameFlag::TagAlterPreservation, 0x4000),
    (FrameFlag::FileAlterPreservation, 0x2000),
    (FrameFlag::ReadOnly, 0x1000),
    (FrameFlag::Grouped, 0x0040),
    (FrameFlag::Compressed, 0x0008),
    (FrameFlag::Encrypted, 0x0004),
    (FrameFlag::Unsynchronised, 0x0002),
    (FrameFlag::DataLengthIndicator, 0x0001),
];

const fn layout(version: Version) -> &'static [(FrameFlag, u16)] {
    match version {
        Version::V22 => &[],
        Version::V23 => V23_LAYOUT,
        Version::V24 => V24_LAYOUT,
    }
}

/// The flag set of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameFlags {
    set: u16,
    unknown_bits: u16,
    unknown_origin: Option<Version>,
}

impl FrameFlags {
    /// No flags.
    pub const EMPTY: Self = Self {
        set: 0,
        unknown_bits: 0,
        unknown_origin: None,
    };

    /// Interpret raw header bits for `version`.
    ///
    /// Unrecognised bits set [`FrameFlag::Unknown`] and are kept for
    /// re-encoding in the same version.
    #[must_use]
    pub fn from_bits(raw: u16, version: Version) -> Self {
        let mut flags = Self::EMPTY;
        let mut remaining = raw;
        for &(flag, bit) in layout(version) {
            if raw & bit != 0 {
                flags.insert(flag);
                remaining &= !bit;
            }
        }
        if remaining != 0 {
            flags.insert(FrameFlag::Unknown);
            flags.unknown_bits = remaining;
            flags.unknown_origin = Some(version);
        }
        flags
    }

    /// Raw header bits for `version`.
    ///
    /// Flags the version cannot express are dropped. Unknown bits are
    /// re-emitted only for the version they were read from.
    #[must_use]
    pub fn to_bits(&self, version: Version) -> u16 {
        let known = layout(version)
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .fold(0u16, |bits, (_, bit)| bits | bit);
        if self.unknown_origin == Some(version) {
            known | self.unknown_bits
        } else {
            known
        }
    }

    /// `true` if `flag` is set.
    #[must_use]
    pub const fn contains(&self, flag: FrameFlag) -> bool {
        self.set & flag.mask() != 0
    }

    /// Set `flag`.
    pub fn insert(&mut self, flag: FrameFlag) {
        self.set |= flag.mask();
    }

    /// Clear `flag`. Clearing [`FrameFlag::Unknown`] also forgets the raw bits.
    pub fn remove(&mut self, flag: FrameFlag) {
        self.set &= !flag.mask();
        if flag == FrameFlag::Unknown {
            self.unknown_bits = 0;
            self.unknown_origin = None;
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, flag: FrameFlag) -> Self {
        self.insert(flag);
        self
    }

    /// `true` if no flag is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.set == 0
    }

    /// Raw bits the decoder did not recognise.
    #[must_use]
    pub const fn unknown_bits(&self) -> u16 {
        self.unknown_bits
    }

    /// Set flags in display order.
    pub fn iter(&self) -> impl Iterator<Item = FrameFlag> + '_ {
        FrameFlag::ALL.into_iter().filter(|&flag| self.contains(flag))
    }
}

impl fmt::Display for FrameFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, flag) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(flag.name())?;
        }
        f.write_str("}")
    }
}
