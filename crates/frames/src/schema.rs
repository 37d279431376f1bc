//! Frame schemas: the static description of one frame type.

use crate::field::{Field, FieldKind};
use crate::version::{Version, VersionSet};

/// What [`merge`](crate::merge) does with several frames of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MergePolicy {
    /// Several instances are legal; keep them all.
    KeepAll,
    /// Single-instance frame; keep the last and warn.
    KeepLast,
    /// Free-text list; concatenate the text lists into one frame.
    ConcatText,
}

/// Layout and metadata of one frame type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSchema {
    /// Canonical identifier, 3 characters for v2.2 and 4 otherwise.
    pub id: &'static str,
    /// Short human-readable description.
    pub description: &'static str,
    /// Versions the identifier is defined in.
    pub versions: VersionSet,
    /// Payload fields in wire order.
    pub fields: &'static [Field],
    /// Duplicate handling.
    pub merge_policy: MergePolicy,
    /// Three-letter counterpart used when writing v2.2.
    pub v22: Option<&'static str>,
    /// Four-letter schema a v2.2 frame is copied into when upgraded.
    pub parent: Option<&'static str>,
    /// Decoding has not been verified against real files.
    pub untested: bool,
    /// Readers virtually never support this frame type.
    pub bozo: bool,
}

impl FrameSchema {
    /// A single-instance schema with no links and no advisory markers.
    #[must_use]
    pub const fn new(
        id: &'static str,
        description: &'static str,
        versions: VersionSet,
        fields: &'static [Field],
    ) -> Self {
        Self {
            id,
            description,
            versions,
            fields,
            merge_policy: MergePolicy::KeepLast,
            v22: None,
            parent: None,
            untested: false,
            bozo: false,
        }
    }

    /// Allow several instances per tag.
    #[must_use]
    pub const fn allow_duplicates(mut self) -> Self {
        self.merge_policy = MergePolicy::KeepAll;
        self
    }

    /// Merge duplicates by concatenating their text lists.
    #[must_use]
    pub const fn concat_text(mut self) -> Self {
        self.merge_policy = MergePolicy::ConcatText;
        self
    }

    /// Link the three-letter v2.2 counterpart.
    #[must_use]
    pub const fn with_v22(mut self, id: &'static str) -> Self {
        self.v22 = Some(id);
        self
    }

    /// Link the schema this v2.2 frame upgrades into.
    #[must_use]
    pub const fn with_parent(mut self, id: &'static str) -> Self {
        self.parent = Some(id);
        self
    }

    /// Mark decoding as unverified.
    #[must_use]
    pub const fn untested(mut self) -> Self {
        self.untested = true;
        self
    }

    /// Mark the frame type as discouraged.
    #[must_use]
    pub const fn bozo(mut self) -> Self {
        self.bozo = true;
        self
    }

    /// `true` if the schema is defined in `version`.
    #[must_use]
    pub const fn in_version(&self, version: Version) -> bool {
        self.versions.contains(version)
    }

    /// `true` if the schema is defined in any of `versions`.
    #[must_use]
    pub fn in_any_version(&self, versions: &[Version]) -> bool {
        self.versions.contains_any(versions)
    }

    /// Position of the field called `name`.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// `true` if the payload starts with an encoding selector.
    #[must_use]
    pub fn starts_with_encoding(&self) -> bool {
        matches!(self.fields.first(), Some(f) if f.kind == FieldKind::Encoding)
    }

    /// `true` for the plain text-list layout shared by `T***` frames.
    #[must_use]
    pub fn is_text_list(&self) -> bool {
        matches!(
            self.fields,
            [enc, text] if enc.kind == FieldKind::Encoding
                && text.kind == FieldKind::Sequence(&FieldKind::EncodedText)
        )
    }

    /// `true` for the single-URL layout shared by `W***` frames.
    #[must_use]
    pub fn is_url(&self) -> bool {
        matches!(self.fields, [url] if url.kind == FieldKind::Url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    static TEXT: [Field; 2] = [
        Field::new("encoding", FieldKind::Encoding),
        Field::new("text", FieldKind::Sequence(&FieldKind::EncodedText)),
    ];

    #[test]
    fn builders_set_markers() {
        let schema = FrameSchema::new("TEST", "test", VersionSet::V23_V24, &TEXT)
            .concat_text()
            .with_v22("TST")
            .untested();
        assert_eq!(schema.merge_policy, MergePolicy::ConcatText);
        assert_eq!(schema.v22, Some("TST"));
        assert!(schema.untested);
        assert!(!schema.bozo);
        assert!(schema.is_text_list());
        assert!(!schema.is_url());
    }

    #[test]
    fn version_membership_uses_the_full_set() {
        let schema = FrameSchema::new("TEST", "test", VersionSet::V23_V24, &TEXT);
        assert!(!schema.in_version(Version::V22));
        assert!(schema.in_version(Version::V23));
        assert!(schema.in_version(Version::V24));
        assert!(schema.in_any_version(&[Version::V22, Version::V24]));
    }

    #[test]
    fn field_lookup() {
        let schema = FrameSchema::new("TEST", "test", VersionSet::ALL, &TEXT);
        assert_eq!(schema.field_index("text"), Some(1));
        assert_eq!(schema.field_index("nope"), None);
        assert!(schema.starts_with_encoding());
    }
}
