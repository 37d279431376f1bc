//! Duplicate-frame collapsing.

use alloc::vec;
use alloc::vec::Vec;

use crate::diagnostics::{Warning, WarningSink};
use crate::field::FieldValue;
use crate::flags::FrameFlags;
use crate::frame::{Frame, FrameBody, FrameId};
use crate::schema::{FrameSchema, MergePolicy};

/// Collapse duplicates according to each frame type's [`MergePolicy`].
///
/// Frames are grouped by identifier and each group of two or more is merged:
///
/// - `KeepAll` returns the group unchanged.
/// - `KeepLast` keeps the last frame and emits one
///   [`Warning::DuplicateCollapsed`].
/// - `ConcatText` builds one fresh frame, without flags or a fixed encoding,
///   whose text list is every input list concatenated in order.
///
/// A merged group takes the position of its first member. Unknown and Error
/// frames are never collapsed and keep their input positions.
pub fn merge<S>(frames: Vec<Frame>, sink: &mut S) -> Vec<Frame>
where
    S: WarningSink + ?Sized,
{
    if frames.len() <= 1 {
        return frames;
    }

    let mut groups: Vec<(FrameId, &'static FrameSchema, Vec<Frame>)> = Vec::new();
    let mut slots = Vec::with_capacity(frames.len());
    for frame in frames {
        let Some(schema) = frame.schema() else {
            slots.push(Slot::Opaque(frame));
            continue;
        };
        match groups.iter_mut().position(|(id, _, _)| *id == frame.id) {
            Some(index) => {
                if let Some((_, _, members)) = groups.get_mut(index) {
                    members.push(frame);
                }
            }
            None => {
                slots.push(Slot::Group(groups.len()));
                groups.push((frame.id.clone(), schema, vec![frame]));
            }
        }
    }

    let mut collapsed: Vec<Vec<Frame>> = groups
        .into_iter()
        .map(|(id, schema, members)| collapse(id, schema, members, sink))
        .collect();

    let mut merged = Vec::new();
    for slot in slots {
        match slot {
            Slot::Opaque(frame) => merged.push(frame),
            Slot::Group(index) => {
                if let Some(members) = collapsed.get_mut(index) {
                    merged.append(members);
                }
            }
        }
    }
    merged
}

/// Output position: an Unknown/Error frame, or the first member of a group.
enum Slot {
    Opaque(Frame),
    Group(usize),
}

fn collapse<S>(
    id: FrameId,
    schema: &'static FrameSchema,
    members: Vec<Frame>,
    sink: &mut S,
) -> Vec<Frame>
where
    S: WarningSink + ?Sized,
{
    if members.len() <= 1 {
        return members;
    }
    match schema.merge_policy {
        MergePolicy::KeepAll => members,
        MergePolicy::KeepLast => {
            let dropped = members.len().saturating_sub(1);
            sink.warn(Warning::DuplicateCollapsed {
                id: id.clone(),
                dropped,
            });
            tracing::debug!(frame = %id, dropped, "duplicate frames collapsed");
            members.into_iter().last().into_iter().collect()
        }
        MergePolicy::ConcatText => concat_text(id, schema, members),
    }
}

fn concat_text(id: FrameId, schema: &'static FrameSchema, members: Vec<Frame>) -> Vec<Frame> {
    let Some(index) = schema.field_index("text") else {
        return members;
    };
    let texts: Vec<FieldValue> = members
        .into_iter()
        .filter_map(|frame| match frame.body {
            FrameBody::Known { mut values, .. } => values.get_mut(index).and_then(Option::take),
            FrameBody::Unknown { .. } | FrameBody::Error { .. } => None,
        })
        .flat_map(|value| match value {
            FieldValue::Seq(items) => items,
            other => vec![other],
        })
        .collect();

    let mut values: Vec<Option<FieldValue>> = vec![None; schema.fields.len()];
    if let Some(slot) = values.get_mut(index) {
        *slot = Some(FieldValue::Seq(texts));
    }
    vec![Frame {
        id,
        flags: FrameFlags::EMPTY,
        body: FrameBody::Known { schema, values },
    }]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::Context;
    use crate::flags::FrameFlag;
    use crate::version::Version;

    fn text(id: &str, texts: &[&str]) -> Frame {
        Frame::text(id, Version::V24, texts.iter().copied()).unwrap()
    }

    #[test]
    fn short_lists_are_unchanged() {
        let mut warnings: Vec<Warning> = Vec::new();
        assert!(merge(Vec::new(), &mut warnings).is_empty());
        let one = vec![text("TIT2", &["a"])];
        assert_eq!(merge(one.clone(), &mut warnings), one);
        assert!(warnings.is_empty());
    }

    #[test]
    fn text_frames_concatenate_in_order() {
        let mut first = text("TPE1", &["a", "b"]);
        first.flags_mut().insert(FrameFlag::ReadOnly);
        let frames = vec![first, text("TPE1", &["c"])];
        let mut warnings: Vec<Warning> = Vec::new();
        let merged = merge(frames, &mut warnings);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text_values(), vec!["a", "b", "c"]);
        assert!(merged[0].flags().is_empty());
        assert_eq!(merged[0].encoding(), None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn single_instance_frames_keep_last() {
        let ctx = Context::new(Version::V23);
        let frames = vec![
            Frame::decode("PCNT", 0, &[0, 0, 0, 1], &ctx, &mut ()),
            Frame::decode("PCNT", 0, &[0, 0, 0, 2], &ctx, &mut ()),
            Frame::decode("PCNT", 0, &[0, 0, 0, 3], &ctx, &mut ()),
        ];
        let mut warnings: Vec<Warning> = Vec::new();
        let merged = merge(frames, &mut warnings);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].get("count"), Some(&FieldValue::Int(3)));
        assert_eq!(
            warnings,
            vec![Warning::DuplicateCollapsed {
                id: FrameId::new("PCNT").unwrap(),
                dropped: 2
            }]
        );
    }

    #[test]
    fn duplicate_tolerant_frames_are_kept() {
        let ctx = Context::new(Version::V23);
        let frames = vec![
            Frame::decode("COMM", 0, b"\x00engaa\0x", &ctx, &mut ()),
            Frame::decode("COMM", 0, b"\x00engbb\0y", &ctx, &mut ()),
        ];
        let merged = merge(frames.clone(), &mut ());
        assert_eq!(merged, frames);
    }

    #[test]
    fn opaque_frames_are_never_collapsed() {
        let id = FrameId::new("XXXX").unwrap();
        let frames = vec![
            Frame::unknown(id.clone(), vec![1]),
            text("TIT2", &["a"]),
            Frame::unknown(id, vec![2]),
        ];
        let merged = merge(frames, &mut ());
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].raw_data(), Some(&[1u8][..]));
        assert_eq!(merged[1].id(), "TIT2");
        assert_eq!(merged[2].raw_data(), Some(&[2u8][..]));
    }

    #[test]
    fn opaque_frames_keep_their_positions_around_merged_groups() {
        let ctx = Context::new(Version::V23);
        let frames = vec![
            text("TPE1", &["a"]),
            Frame::decode("TALB", 0, b"\x07bad", &ctx, &mut ()),
            text("TIT2", &["t"]),
            text("TPE1", &["b"]),
            Frame::unknown(FrameId::new("XXXX").unwrap(), vec![9]),
        ];
        let merged = merge(frames, &mut ());
        assert_eq!(merged.len(), 4);
        assert_eq!(merged[0].text_values(), vec!["a", "b"]);
        assert!(merged[1].is_error());
        assert_eq!(merged[2].id(), "TIT2");
        assert!(merged[3].is_unknown());
    }

    #[test]
    fn mixed_identifiers_are_grouped() {
        let frames = vec![
            text("TIT2", &["a"]),
            text("TPE1", &["x"]),
            text("TIT2", &["b"]),
        ];
        let merged = merge(frames, &mut ());
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text_values(), vec!["a", "b"]);
        assert_eq!(merged[1].text_values(), vec!["x"]);
    }
}
