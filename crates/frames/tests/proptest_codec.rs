//! Property-based tests for the frame codec.
//! Arbitrary header and payload bytes must never bring a decode down.

// Test files use unwrap/indexing for readable assertions.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use frames::registry::known_ids;
use frames::{Context, Frame, Version};
use proptest::prelude::*;

fn version() -> impl Strategy<Value = Version> {
    prop::sample::select(Version::ALL.to_vec())
}

/// Identifiers the registry knows for some version, plus arbitrary noise.
fn frame_id() -> impl Strategy<Value = String> {
    let known: Vec<String> = Version::ALL
        .iter()
        .flat_map(|&version| known_ids(version))
        .map(String::from)
        .collect();
    prop_oneof![
        3 => prop::sample::select(known),
        1 => "[A-Z0-9]{3,4}",
        1 => ".{0,6}",
    ]
}

fn text_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(r"[^\x00]{1,12}", 1..4)
}

proptest::proptest! {
    /// Decoding never panics, whatever the identifier, flags or payload.
    #[test]
    fn decode_never_panics(
        id in frame_id(),
        flags in any::<u16>(),
        payload in prop::collection::vec(any::<u8>(), 0..64),
        version in version(),
    ) {
        let ctx = Context::new(version);
        let frame = Frame::decode(&id, flags, &payload, &ctx, &mut ());
        let _ = frame.to_string();
        // May return Err but must not panic
        let _ = frame.encode(&ctx, &mut ());
        for target in Version::ALL {
            let _ = frame.to_version(target);
        }
    }

    /// Opaque frames always carry the exact payload they were read from.
    #[test]
    fn failed_decodes_keep_their_payload(
        id in frame_id(),
        payload in prop::collection::vec(any::<u8>(), 0..64),
        version in version(),
    ) {
        let frame = Frame::decode(&id, 0, &payload, &Context::new(version), &mut ());
        if let Some(data) = frame.raw_data() {
            prop_assert_eq!(data, payload.as_slice());
        }
    }

    /// Text lists without NULs survive encode then decode in every version.
    #[test]
    fn text_lists_roundtrip(texts in text_list(), version in version()) {
        let id = if version == Version::V22 { "TT2" } else { "TIT2" };
        let ctx = Context::new(version);
        let frame = Frame::text(id, version, texts.iter().cloned()).unwrap();
        let bytes = frame.encode(&ctx, &mut ()).unwrap();
        let decoded = Frame::decode(id, 0, &bytes, &ctx, &mut ());
        prop_assert!(!decoded.is_error(), "{decoded}");
        prop_assert_eq!(decoded.text_values(), texts.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
