//! Cross-version translation over the whole registry.

// Test files use unwrap/indexing for readable assertions.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

mod common;

use common::{all_schemas, sample_frame};
use frames::registry;
use frames::{Context, Frame, IncompatibleFrameError, Version};

#[test]
fn linked_schemas_translate_down_and_back_up() {
    for schema in all_schemas().filter(|s| s.v22.is_some()) {
        let frame = sample_frame(schema);
        let down = frame.to_version(Version::V22).unwrap();
        assert_eq!(Some(down.id().as_str()), schema.v22);

        let native = schema.versions.iter().next().unwrap();
        let up = down.to_version(native).unwrap();
        assert_eq!(up, frame, "{}", schema.id);
    }
}

#[test]
fn translation_is_idempotent_for_every_schema() {
    for schema in all_schemas() {
        let frame = sample_frame(schema);
        for target in Version::ALL {
            if let Ok(once) = frame.to_version(target) {
                let twice = once.to_version(target).unwrap();
                assert_eq!(once, twice, "{} to {target}", schema.id);
                assert!(once.schema().unwrap().in_version(target));
            }
        }
    }
}

#[test]
fn translated_frames_encode_in_the_target_version() {
    for schema in all_schemas() {
        let frame = sample_frame(schema);
        for target in Version::ALL {
            let Ok(converted) = frame.to_version(target) else {
                continue;
            };
            let ctx = Context::new(target);
            let bytes = converted.encode(&ctx, &mut ()).unwrap();
            let decoded = Frame::decode(converted.id().as_str(), 0, &bytes, &ctx, &mut ());
            assert_eq!(decoded, converted, "{} to {target}", schema.id);
        }
    }
}

#[test]
fn version_specific_frames_are_incompatible_elsewhere() {
    let year = Frame::text("TYE", Version::V22, ["1999"]).unwrap();
    assert_eq!(year.to_version(Version::V23).unwrap().id(), "TYER");
    assert_eq!(
        year.to_version(Version::V24).unwrap_err(),
        IncompatibleFrameError {
            frame: year.id().clone(),
            version: Version::V24,
        }
    );

    let recorded = Frame::text("TDRC", Version::V24, ["2001"]).unwrap();
    assert!(recorded.to_version(Version::V23).is_err());
    assert!(recorded.to_version(Version::V22).is_err());
}

#[test]
fn unlinked_v22_frames_stay_in_v22() {
    let picture = registry::lookup("PIC").unwrap();
    let frame = sample_frame(picture);
    assert!(frame.to_version(Version::V23).is_err());
    assert_eq!(frame.to_version(Version::V22).unwrap(), frame);
}

#[test]
fn every_v22_schema_with_a_parent_upgrades() {
    for schema in all_schemas().filter(|s| s.parent.is_some()) {
        let frame = sample_frame(schema);
        let parent = registry::parent(schema).unwrap();
        let target = parent.versions.iter().next().unwrap();
        let up = frame.to_version(target).unwrap();
        assert_eq!(up.id(), parent.id);
    }
}
