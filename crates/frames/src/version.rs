//! ID3v2 sub-versions and the version sets attached to frame schemas.

use core::fmt;

/// One of the three mutually incompatible ID3v2 sub-versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Version {
    /// ID3v2.2: three-character frame identifiers, no frame flags.
    V22 = 2,
    /// ID3v2.3
    V23 = 3,
    /// ID3v2.4: adds UTF-16BE and UTF-8 text encodings.
    V24 = 4,
}

impl Version {
    /// All versions, oldest first.
    pub const ALL: [Version; 3] = [Version::V22, Version::V23, Version::V24];

    /// Map the major revision byte of a tag header (2, 3 or 4) to a version.
    #[must_use]
    pub const fn from_major(major: u8) -> Option<Self> {
        match major {
            2 => Some(Self::V22),
            3 => Some(Self::V23),
            4 => Some(Self::V24),
            _ => None,
        }
    }

    /// The major revision number (2, 3 or 4).
    #[must_use]
    pub const fn major(self) -> u8 {
        self as u8
    }

    /// Length of a frame identifier in this version.
    #[must_use]
    pub const fn id_len(self) -> usize {
        match self {
            Self::V22 => 3,
            Self::V23 | Self::V24 => 4,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::V22 => 0b001,
            Self::V23 => 0b010,
            Self::V24 => 0b100,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID3v2.{}", self.major())
    }
}

/// The set of versions a frame schema is defined in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VersionSet(u8);

impl VersionSet {
    /// ID3v2.2 only.
    pub const V22: Self = Self(0b001);
    /// ID3v2.3 only.
    pub const V23: Self = Self(0b010);
    /// ID3v2.4 only.
    pub const V24: Self = Self(0b100);
    /// ID3v2.3 and ID3v2.4.
    pub const V23_V24: Self = Self(0b110);
    /// Every version.
    pub const ALL: Self = Self(0b111);

    /// `true` if `version` is a member of the set.
    #[must_use]
    pub const fn contains(self, version: Version) -> bool {
        self.0 & version.bit() != 0
    }

    /// `true` if any of `versions` is a member of the set.
    #[must_use]
    pub fn contains_any(self, versions: &[Version]) -> bool {
        versions.iter().any(|&v| self.contains(v))
    }

    /// `true` if the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members of the set, oldest first.
    pub fn iter(self) -> impl Iterator<Item = Version> {
        Version::ALL.into_iter().filter(move |&v| self.contains(v))
    }
}

impl From<Version> for VersionSet {
    fn from(version: Version) -> Self {
        Self(version.bit())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn from_major_maps_known_revisions() {
        assert_eq!(Version::from_major(2), Some(Version::V22));
        assert_eq!(Version::from_major(3), Some(Version::V23));
        assert_eq!(Version::from_major(4), Some(Version::V24));
        assert_eq!(Version::from_major(5), None);
        assert_eq!(Version::from_major(0), None);
    }

    #[test]
    fn id_len_is_three_only_for_v22() {
        assert_eq!(Version::V22.id_len(), 3);
        assert_eq!(Version::V23.id_len(), 4);
        assert_eq!(Version::V24.id_len(), 4);
    }

    #[test]
    fn display_names_the_revision() {
        assert_eq!(Version::V23.to_string(), "ID3v2.3");
    }

    #[test]
    fn multi_version_membership_checks_every_member() {
        let set = VersionSet::V23_V24;
        assert!(!set.contains(Version::V22));
        assert!(set.contains(Version::V23));
        assert!(set.contains(Version::V24));
        assert!(set.contains_any(&[Version::V22, Version::V24]));
        assert!(!set.contains_any(&[Version::V22]));
        assert!(!set.contains_any(&[]));
    }

    #[test]
    fn named_sets_list_their_members() {
        assert_eq!(VersionSet::ALL.iter().collect::<Vec<_>>(), Version::ALL);
        assert_eq!(
            VersionSet::V23_V24.iter().collect::<Vec<_>>(),
            vec![Version::V23, Version::V24]
        );
        assert_eq!(VersionSet::from(Version::V22), VersionSet::V22);
        assert!(!VersionSet::V22.is_empty());
        assert!(VersionSet::default().is_empty());
    }
}
