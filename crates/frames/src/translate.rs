//! Cross-version frame conversion.
//!
//! ```text
//!   schema valid in target ─────────────► clone
//!   target is v2.2, schema has v22 link ► copy into the 3-letter schema
//!   schema is v2.2, parent valid ───────► copy into the 4-letter schema
//!   otherwise ──────────────────────────► IncompatibleFrameError
//! ```

use alloc::vec::Vec;

use crate::error::IncompatibleFrameError;
use crate::frame::{Frame, FrameBody, FrameId};
use crate::registry;
use crate::schema::FrameSchema;
use crate::version::Version;

impl Frame {
    /// Convert the frame to its equivalent in `target`.
    ///
    /// Unknown and Error frames carry no schema; they move only between
    /// versions with the same identifier width (v2.3 and v2.4).
    ///
    /// # Errors
    ///
    /// [`IncompatibleFrameError`] if the frame type has no equivalent in
    /// `target`.
    pub fn to_version(&self, target: Version) -> Result<Frame, IncompatibleFrameError> {
        let incompatible = || IncompatibleFrameError {
            frame: self.id.clone(),
            version: target,
        };

        let Some(schema) = self.schema() else {
            return if self.id.as_str().len() == target.id_len() {
                Ok(self.clone())
            } else {
                Err(incompatible())
            };
        };

        if schema.in_version(target) {
            return Ok(self.clone());
        }
        let counterpart = if target == Version::V22 {
            registry::counterpart_v22(schema)
        } else if schema.in_version(Version::V22) {
            registry::parent(schema).filter(|parent| parent.in_version(target))
        } else {
            None
        };
        let counterpart = counterpart.ok_or_else(incompatible)?;
        let converted = self.copy_into(counterpart).ok_or_else(incompatible)?;
        tracing::debug!(from = %self.id, to = %converted.id, %target, "frame translated");
        Ok(converted)
    }

    /// Copy field values into `target`, matching fields by name and kind.
    ///
    /// `None` if any target field has no same-named, same-kind source field.
    fn copy_into(&self, target: &'static FrameSchema) -> Option<Frame> {
        let values = target
            .fields
            .iter()
            .map(|field| {
                self.fields()
                    .find(|(source, _)| source.name == field.name && source.kind == field.kind)
                    .map(|(_, value)| value.cloned())
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Frame {
            id: FrameId::new(target.id).ok()?,
            flags: self.flags,
            body: FrameBody::Known {
                schema: target,
                values,
            },
        })
    }
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
    use crate::config::Context;
    use crate::field::{Field, FieldKind, FieldValue};
    use crate::flags::{FrameFlag, FrameFlags};
    use crate::version::VersionSet;

    #[test]
    fn identity_when_valid() {
        let frame = Frame::text("TIT2", Version::V23, ["a"]).unwrap();
        assert_eq!(frame.to_version(Version::V24).unwrap(), frame);
    }

    #[test]
    fn down_to_v22_follows_counterpart() {
        let frame = Frame::decode("TIT2", 0, b"\x03Hello", &Context::new(Version::V24), &mut ());
        let v22 = frame.to_version(Version::V22).unwrap();
        assert_eq!(v22.id(), "TT2");
        assert_eq!(v22.text_values(), vec!["Hello"]);
        assert_eq!(v22.encoding(), frame.encoding());
    }

    #[test]
    fn up_from_v22_follows_parent() {
        let frame = Frame::text("TYE", Version::V22, ["1999"]).unwrap();
        let v23 = frame.to_version(Version::V23).unwrap();
        assert_eq!(v23.id(), "TYER");
        assert_eq!(v23.text_values(), vec!["1999"]);
        assert_eq!(
            frame.to_version(Version::V24),
            Err(IncompatibleFrameError {
                frame: FrameId::new("TYE").unwrap(),
                version: Version::V24
            })
        );
    }

    #[test]
    fn frames_without_counterpart_are_incompatible() {
        let frame = Frame::text("TDRC", Version::V24, ["2020"]).unwrap();
        let err = frame.to_version(Version::V23).unwrap_err();
        assert_eq!(err.to_string(), "frame TDRC cannot be converted to ID3v2.3 format");
        assert!(frame.to_version(Version::V22).is_err());
    }

    #[test]
    fn flags_survive_translation() {
        let flags = FrameFlags::EMPTY.with(FrameFlag::ReadOnly);
        let frame = Frame::text("TALB", Version::V23, ["x"])
            .unwrap()
            .with_flags(flags);
        assert_eq!(frame.to_version(Version::V22).unwrap().flags(), &flags);
    }

    #[test]
    fn opaque_frames_need_matching_identifier_width() {
        let frame = Frame::unknown(FrameId::new("XXXX").unwrap(), vec![1]);
        assert_eq!(frame.to_version(Version::V24).unwrap(), frame);
        assert!(frame.to_version(Version::V22).is_err());
    }

    #[test]
    fn translation_is_idempotent() {
        let frame = Frame::text("TT2", Version::V22, ["t"]).unwrap();
        let once = frame.to_version(Version::V24).unwrap();
        let twice = once.to_version(Version::V24).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn mismatched_fields_refuse_to_copy() {
        static FIELDS: [Field; 1] = [Field::new("text", FieldKind::Binary)];
        static ODD: FrameSchema = FrameSchema::new("TST", "odd", VersionSet::V22, &FIELDS);
        let frame = Frame::text("TIT2", Version::V24, ["a"]).unwrap();
        assert!(frame.copy_into(&ODD).is_none());
        let copied = frame.copy_into(registry::lookup("TT2").unwrap()).unwrap();
        assert_eq!(copied.get("text"), Some(&FieldValue::texts(["a"])));
    }
}
