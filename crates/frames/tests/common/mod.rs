//! Sample values shared by the integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use frames::registry;
use frames::{FieldKind, FieldValue, Frame, FrameSchema, TextEncoding};

/// A representative value for one field kind, ISO-8859-1 safe.
pub fn sample_value(kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Encoding => FieldValue::Encoding(TextEncoding::Latin1),
        FieldKind::EncodedText => FieldValue::text("sample"),
        FieldKind::Url => FieldValue::text("http://example.com/"),
        FieldKind::Latin1 => FieldValue::text("image/png"),
        FieldKind::Fixed(len) => FieldValue::text("e".repeat(len)),
        FieldKind::Byte => FieldValue::Int(7),
        FieldKind::PictureType => FieldValue::Int(3),
        FieldKind::Integer(1) => FieldValue::Int(0x01),
        FieldKind::Integer(_) => FieldValue::Int(0x0102),
        FieldKind::Counter => FieldValue::Int(0x01_0000_0000),
        FieldKind::Binary => FieldValue::Bytes(vec![0x00, 0x01, 0x02, 0xFF]),
        FieldKind::Sequence(inner) => FieldValue::Seq(vec![sample_value(*inner), sample_value(*inner)]),
        FieldKind::Pairs(a, b) => FieldValue::Pairs(vec![
            (sample_value(*a), sample_value(*b)),
            (sample_value(*a), sample_value(*b)),
        ]),
    }
}

/// A frame of `schema` with every field set to its sample value.
pub fn sample_frame(schema: &'static FrameSchema) -> Frame {
    let values = schema
        .fields
        .iter()
        .map(|field| (field.name, sample_value(field.kind)));
    Frame::construct(schema, values).unwrap()
}

/// Every registered schema.
pub fn all_schemas() -> impl Iterator<Item = &'static FrameSchema> {
    registry::schemas()
}
