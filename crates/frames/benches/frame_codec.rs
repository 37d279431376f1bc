//! Criterion benchmarks for the frame codec.
//!
//! Run: cargo bench -p frames --bench frame_codec
//!
//! Results show:
//!   decode_text        — one TIT2 payload in each encoding
//!   encode_fallback    — text that needs a wider encoding than Latin-1
//!   decode_picture_*k  — APIC frames with large image payloads
//!   merge_*            — duplicate collapsing over a whole tag

#![allow(
    clippy::unwrap_used, // benchmark helpers use unwrap for brevity
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation, // synthetic payload bytes wrap on purpose
    missing_docs,        // criterion_group! macro generates undocumented items
)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use frames::{Context, Frame, TextEncoding, Version, merge};
use std::hint::black_box;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn text_payload(encoding: TextEncoding, text: &str) -> Vec<u8> {
    let mut payload = vec![encoding.to_byte()];
    encoding.encode_into(text, &mut payload).unwrap();
    payload
}

fn picture_payload(image_len: usize) -> Vec<u8> {
    let mut payload = b"\x00image/jpeg\0\x03cover\0".to_vec();
    payload.extend((0..image_len).map(|i| (i % 251) as u8));
    payload
}

/// A tag's worth of frames with some duplicate text and counter frames.
fn tag_frames(count: usize) -> Vec<Frame> {
    let ctx = Context::new(Version::V24);
    (0..count)
        .map(|n| match n % 4 {
            0 => Frame::text("TPE1", Version::V24, [format!("Artist {n}")]).unwrap(),
            1 => Frame::decode("PCNT", 0, &(n as u32).to_be_bytes(), &ctx, &mut ()),
            2 => Frame::decode("COMM", 0, b"\x00engdesc\0text", &ctx, &mut ()),
            _ => Frame::text("TIT2", Version::V24, ["Title"]).unwrap(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_decode_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_text");
    let ctx = Context::new(Version::V24);
    for encoding in [
        TextEncoding::Latin1,
        TextEncoding::Utf16,
        TextEncoding::Utf16Be,
        TextEncoding::Utf8,
    ] {
        let payload = text_payload(encoding, "A reasonably long track title");
        group.bench_with_input(
            BenchmarkId::from_parameter(encoding.name()),
            &payload,
            |b, payload| b.iter(|| Frame::decode("TIT2", 0, black_box(payload), &ctx, &mut ())),
        );
    }
    group.finish();
}

fn bench_encode_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_fallback");
    let frame = Frame::text("TIT2", Version::V23, ["Ünïcödé ☃ title"]).unwrap();
    for version in [Version::V23, Version::V24] {
        let ctx = Context::new(version);
        group.bench_function(BenchmarkId::from_parameter(version), |b| {
            b.iter(|| black_box(&frame).encode(&ctx, &mut ()).unwrap());
        });
    }
    group.finish();
}

fn bench_decode_picture(c: &mut Criterion) {
    let ctx = Context::new(Version::V23);
    for kib in [64usize, 512, 2048] {
        let payload = picture_payload(kib * 1024);
        let mut group = c.benchmark_group(format!("decode_picture_{kib}k"));
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_function("APIC", |b| {
            b.iter(|| Frame::decode("APIC", 0, black_box(&payload), &ctx, &mut ()));
        });
        group.finish();
    }
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for count in [16usize, 128, 1024] {
        let frames = tag_frames(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &frames, |b, frames| {
            b.iter(|| merge(black_box(frames.clone()), &mut ()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_decode_text,
    bench_encode_fallback,
    bench_decode_picture,
    bench_merge
);
criterion_main!(benches);
