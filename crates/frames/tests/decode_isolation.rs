//! Tag-level behaviour: one bad frame never takes the others down.

// Test files use unwrap/indexing for readable assertions.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use frames::{merge, Context, Frame, FrameFlag, TextEncoding, Version, Warning};

/// Decode `(id, flags, payload)` triples the way a tag container would.
fn decode_tag(frames: &[(&str, u16, &[u8])], version: Version) -> (Vec<Frame>, Vec<Warning>) {
    let ctx = Context::new(version);
    let mut warnings = Vec::new();
    let decoded = frames
        .iter()
        .map(|(id, flags, payload)| Frame::decode(id, *flags, payload, &ctx, &mut warnings))
        .collect();
    (decoded, warnings)
}

#[test]
fn one_malformed_frame_is_isolated() {
    let bad: &[u8] = b"\x07garbage";
    let (frames, _) = decode_tag(
        &[
            ("TIT2", 0, b"\x00Title"),
            ("TPE1", 0, b"\x01\xFF\xFEA\x00"),
            ("COMM", 0, b"\x00engdesc\0comment"),
            ("TALB", 0, bad),
        ],
        Version::V23,
    );
    assert_eq!(frames.len(), 4);
    assert_eq!(frames.iter().filter(|f| f.is_error()).count(), 1);
    assert!(frames[..3].iter().all(|f| !f.is_error() && !f.is_unknown()));
    let error = &frames[3];
    assert_eq!(error.raw_data(), Some(bad));
    assert!(error.to_string().starts_with("!TALB(ERROR, "));
}

#[test]
fn malformed_utf16_is_isolated() {
    let (frames, _) = decode_tag(
        &[
            ("TIT2", 0, b"\x01\xFF\xFE\x00\xD8"),
            ("TPE1", 0, b"\x00ok"),
        ],
        Version::V23,
    );
    assert!(frames[0].is_error());
    assert_eq!(frames[1].text_values(), vec!["ok"]);
}

#[test]
fn duplicate_single_instance_frames_keep_the_last() {
    let (frames, mut warnings) = decode_tag(
        &[
            ("PCNT", 0, &[0, 0, 0, 1]),
            ("PCNT", 0, &[0, 0, 0, 9]),
        ],
        Version::V24,
    );
    let merged = merge(frames, &mut warnings);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].get("count").and_then(|v| v.as_int()), Some(9));
    assert_eq!(
        warnings
            .iter()
            .filter(|w| matches!(w, Warning::DuplicateCollapsed { .. }))
            .count(),
        1
    );
}

#[test]
fn duplicate_text_frames_concatenate() {
    let (frames, mut warnings) = decode_tag(
        &[
            ("TPE1", 0, b"\x00Alice\0Bob"),
            ("TPE1", 0, b"\x03Carol"),
        ],
        Version::V24,
    );
    let merged = merge(frames, &mut warnings);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].text_values(), vec!["Alice", "Bob", "Carol"]);
    assert_eq!(merged[0].encoding(), None);
    assert!(warnings.is_empty());

    // The merged frame picks an encoding on its own.
    let bytes = merged[0].encode(&Context::new(Version::V24), &mut ()).unwrap();
    assert_eq!(bytes[0], TextEncoding::Latin1.to_byte());
}

#[test]
fn unknown_frames_survive_untouched() {
    let payload: &[u8] = &[0x00, 0xFF, 0x10, 0x00];
    let (frames, warnings) = decode_tag(&[("XHD3", 0, payload), ("ABC", 0, payload)], Version::V23);
    assert!(warnings.is_empty());
    for frame in &frames {
        assert!(frame.is_unknown());
        assert_eq!(frame.raw_data(), Some(payload));
        let bytes = frame.encode(&Context::new(Version::V23), &mut ()).unwrap();
        assert_eq!(bytes, payload);
    }
}

#[test]
fn garbage_identifiers_become_unknown_frames() {
    let (frames, _) = decode_tag(&[("a\u{0}b", 0, b"xyz")], Version::V24);
    assert!(frames[0].is_unknown());
    assert_eq!(frames[0].id().as_str(), "a?b");
}

#[test]
fn overlong_identifiers_never_alias_registered_frames() {
    let (frames, _) = decode_tag(&[("TIT2X", 0, b"\x00abc")], Version::V23);
    let frame = &frames[0];
    assert!(frame.is_unknown());
    assert_eq!(frame.id().as_str(), "TIT?");
    assert!(frames::resolve(frame.id().as_str(), Version::V23).is_none());
    assert_eq!(frame.raw_data(), Some(&b"\x00abc"[..]));
}

#[test]
fn unknown_flag_bits_are_reported_and_kept() {
    let (frames, warnings) = decode_tag(&[("TIT2", 0x0100, b"\x00a")], Version::V24);
    let frame = &frames[0];
    assert!(frame.flags().contains(FrameFlag::Unknown));
    assert_eq!(frame.flags().to_bits(Version::V24), 0x0100);
    assert!(frame.to_string().starts_with("?TIT2("));
    assert_eq!(warnings.len(), 1);
}

#[test]
fn frames_move_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Frame>();

    let frame = Frame::text("TIT2", Version::V24, ["threaded"]).unwrap();
    let handle = std::thread::spawn(move || frame.encode(&Context::new(Version::V24), &mut ()));
    assert_eq!(handle.join().unwrap().unwrap(), b"\x00threaded");
}
