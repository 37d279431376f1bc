//! Static table of every known frame type.
//!
//! One [`FrameSchema`] per identifier. Three-letter v2.2 schemas carry a
//! `parent` link to the four-letter schema they upgrade into, and the
//! four-letter schema links back through `v22`. Linked schemas share one
//! field list so values copy across field by field.

use crate::field::{Field, FieldKind};
use crate::schema::FrameSchema;
use crate::version::{Version, VersionSet};

// ── Field lists ─────────────────────────────────────────────────────────────

const ENCODING: Field = Field::new("encoding", FieldKind::Encoding);
const DATA: Field = Field::new("data", FieldKind::Binary);

const TEXT: &[Field] = &[
    ENCODING,
    Field::new("text", FieldKind::Sequence(&FieldKind::EncodedText)),
];
const URL: &[Field] = &[Field::new("url", FieldKind::Url)];
const USER_TEXT: &[Field] = &[
    ENCODING,
    Field::new("description", FieldKind::EncodedText),
    Field::new("value", FieldKind::EncodedText),
];
const USER_URL: &[Field] = &[
    ENCODING,
    Field::new("description", FieldKind::EncodedText),
    Field::new("url", FieldKind::Url),
];
const CREDITS: &[Field] = &[
    ENCODING,
    Field::new(
        "people",
        FieldKind::Pairs(&FieldKind::EncodedText, &FieldKind::EncodedText),
    ),
];
const COMMENT: &[Field] = &[
    ENCODING,
    Field::new("language", FieldKind::Fixed(3)),
    Field::new("description", FieldKind::EncodedText),
    Field::new("text", FieldKind::EncodedText),
];
const PICTURE: &[Field] = &[
    ENCODING,
    Field::new("mime", FieldKind::Latin1),
    Field::new("picture_type", FieldKind::PictureType),
    Field::new("description", FieldKind::EncodedText),
    DATA,
];
const PICTURE_V22: &[Field] = &[
    ENCODING,
    Field::new("format", FieldKind::Fixed(3)),
    Field::new("picture_type", FieldKind::PictureType),
    Field::new("description", FieldKind::EncodedText),
    DATA,
];
const OBJECT: &[Field] = &[
    ENCODING,
    Field::new("mime", FieldKind::Latin1),
    Field::new("filename", FieldKind::EncodedText),
    Field::new("description", FieldKind::EncodedText),
    DATA,
];
const OWNER_DATA: &[Field] = &[Field::new("owner", FieldKind::Latin1), DATA];
const COUNTER: &[Field] = &[Field::new("count", FieldKind::Counter)];
const POPULARIMETER: &[Field] = &[
    Field::new("email", FieldKind::Latin1),
    Field::new("rating", FieldKind::Byte),
    Field::new("count", FieldKind::Counter),
];
const BINARY: &[Field] = &[DATA];
const TERMS: &[Field] = &[
    ENCODING,
    Field::new("language", FieldKind::Fixed(3)),
    Field::new("text", FieldKind::EncodedText),
];
const GROUP_ID: &[Field] = &[
    Field::new("owner", FieldKind::Latin1),
    Field::new("symbol", FieldKind::Byte),
    DATA,
];
const ENCRYPTION: &[Field] = &[
    Field::new("owner", FieldKind::Latin1),
    Field::new("method", FieldKind::Byte),
    DATA,
];
const SEEK: &[Field] = &[Field::new("offset", FieldKind::Integer(4))];
const SIGNATURE: &[Field] = &[
    Field::new("group", FieldKind::Byte),
    Field::new("signature", FieldKind::Binary),
];
const TIMED: &[Field] = &[Field::new("format", FieldKind::Byte), DATA];
const LOOKUP_TABLE: &[Field] = &[
    Field::new("frames", FieldKind::Integer(2)),
    Field::new("bytes", FieldKind::Integer(3)),
    Field::new("milliseconds", FieldKind::Integer(3)),
    Field::new("bits_for_bytes", FieldKind::Byte),
    Field::new("bits_for_milliseconds", FieldKind::Byte),
    DATA,
];
const BUFFER: &[Field] = &[
    Field::new("size", FieldKind::Integer(3)),
    Field::new("info", FieldKind::Byte),
    Field::new("offset", FieldKind::Binary),
];
const REVERB: &[Field] = &[
    Field::new("left", FieldKind::Integer(2)),
    Field::new("right", FieldKind::Integer(2)),
    Field::new("bounce_left", FieldKind::Byte),
    Field::new("bounce_right", FieldKind::Byte),
    Field::new("feedback_ll", FieldKind::Byte),
    Field::new("feedback_lr", FieldKind::Byte),
    Field::new("feedback_rr", FieldKind::Byte),
    Field::new("feedback_rl", FieldKind::Byte),
    Field::new("premix_lr", FieldKind::Byte),
    Field::new("premix_rl", FieldKind::Byte),
];
const VOLUME_V24: &[Field] = &[Field::new("identification", FieldKind::Latin1), DATA];
const EQUALISATION: &[Field] = &[Field::new("adjustment_bits", FieldKind::Byte), DATA];
const EQUALISATION_V24: &[Field] = &[
    Field::new("method", FieldKind::Byte),
    Field::new("identification", FieldKind::Latin1),
    DATA,
];
const POSITION: &[Field] = &[
    Field::new("format", FieldKind::Byte),
    Field::new("position", FieldKind::Binary),
];
const AUDIO_ENCRYPTION: &[Field] = &[
    Field::new("owner", FieldKind::Latin1),
    Field::new("preview_start", FieldKind::Integer(2)),
    Field::new("preview_length", FieldKind::Integer(2)),
    DATA,
];
const OWNERSHIP: &[Field] = &[
    ENCODING,
    Field::new("price", FieldKind::Latin1),
    Field::new("date", FieldKind::Fixed(8)),
    Field::new("seller", FieldKind::EncodedText),
];
const COMMERCIAL: &[Field] = &[
    ENCODING,
    Field::new("price", FieldKind::Latin1),
    Field::new("valid_until", FieldKind::Fixed(8)),
    Field::new("contact_url", FieldKind::Latin1),
    Field::new("received_as", FieldKind::Byte),
    Field::new("seller", FieldKind::EncodedText),
    Field::new("description", FieldKind::EncodedText),
    Field::new("mime", FieldKind::Latin1),
    Field::new("logo", FieldKind::Binary),
];
const SEEK_POINTS: &[Field] = &[
    Field::new("start", FieldKind::Integer(4)),
    Field::new("length", FieldKind::Integer(4)),
    Field::new("points", FieldKind::Integer(2)),
    Field::new("bits", FieldKind::Byte),
    DATA,
];

// ── Schema helpers ──────────────────────────────────────────────────────────

const fn text(id: &'static str, description: &'static str, versions: VersionSet) -> FrameSchema {
    FrameSchema::new(id, description, versions, TEXT).concat_text()
}

const fn text22(id: &'static str, description: &'static str, parent: &'static str) -> FrameSchema {
    text(id, description, VersionSet::V22).with_parent(parent)
}

const fn url(id: &'static str, description: &'static str) -> FrameSchema {
    FrameSchema::new(id, description, VersionSet::V23_V24, URL)
}

const fn url22(id: &'static str, description: &'static str, parent: &'static str) -> FrameSchema {
    FrameSchema::new(id, description, VersionSet::V22, URL).with_parent(parent)
}

const fn v22(
    id: &'static str,
    description: &'static str,
    fields: &'static [Field],
    parent: &'static str,
) -> FrameSchema {
    FrameSchema::new(id, description, VersionSet::V22, fields).with_parent(parent)
}

const V23: VersionSet = VersionSet::V23;
const V24: VersionSet = VersionSet::V24;
const V34: VersionSet = VersionSet::V23_V24;

// ── Table ───────────────────────────────────────────────────────────────────

static SCHEMAS: &[FrameSchema] = &[
    // Text information, v2.3 and v2.4
    text("TALB", "Album/Movie/Show title", V34).with_v22("TAL"),
    text("TBPM", "BPM (beats per minute)", V34).with_v22("TBP"),
    text("TCOM", "Composer", V34).with_v22("TCM"),
    text("TCON", "Content type", V34).with_v22("TCO"),
    text("TCOP", "Copyright message", V34).with_v22("TCR"),
    text("TDLY", "Playlist delay", V34).with_v22("TDY"),
    text("TENC", "Encoded by", V34).with_v22("TEN"),
    text("TEXT", "Lyricist/Text writer", V34).with_v22("TXT"),
    text("TFLT", "File type", V34).with_v22("TFT"),
    text("TIT1", "Content group description", V34).with_v22("TT1"),
    text("TIT2", "Title/songname/content description", V34).with_v22("TT2"),
    text("TIT3", "Subtitle/Description refinement", V34).with_v22("TT3"),
    text("TKEY", "Initial key", V34).with_v22("TKE"),
    text("TLAN", "Language(s)", V34).with_v22("TLA"),
    text("TLEN", "Length", V34).with_v22("TLE"),
    text("TMED", "Media type", V34).with_v22("TMT"),
    text("TOAL", "Original album/movie/show title", V34).with_v22("TOT"),
    text("TOFN", "Original filename", V34).with_v22("TOF"),
    text("TOLY", "Original lyricist(s)/text writer(s)", V34).with_v22("TOL"),
    text("TOPE", "Original artist(s)/performer(s)", V34).with_v22("TOA"),
    text("TOWN", "File owner/licensee", V34),
    text("TPE1", "Lead performer(s)/Soloist(s)", V34).with_v22("TP1"),
    text("TPE2", "Band/orchestra/accompaniment", V34).with_v22("TP2"),
    text("TPE3", "Conductor/performer refinement", V34).with_v22("TP3"),
    text("TPE4", "Interpreted, remixed, or otherwise modified by", V34).with_v22("TP4"),
    text("TPOS", "Part of a set", V34).with_v22("TPA"),
    text("TPUB", "Publisher", V34).with_v22("TPB"),
    text("TRCK", "Track number/Position in set", V34).with_v22("TRK"),
    text("TRSN", "Internet radio station name", V34),
    text("TRSO", "Internet radio station owner", V34),
    text("TSRC", "ISRC (international standard recording code)", V34).with_v22("TRC"),
    text("TSSE", "Software/Hardware and settings used for encoding", V34).with_v22("TSS"),
    // Text information, v2.3 only
    text("TDAT", "Date", V23).with_v22("TDA"),
    text("TIME", "Time", V23).with_v22("TIM"),
    text("TORY", "Original release year", V23).with_v22("TOR"),
    text("TRDA", "Recording dates", V23).with_v22("TRD"),
    text("TSIZ", "Size", V23).with_v22("TSI"),
    text("TYER", "Year", V23).with_v22("TYE"),
    // Text information, v2.4 only
    text("TDEN", "Encoding time", V24),
    text("TDOR", "Original release time", V24),
    text("TDRC", "Recording time", V24),
    text("TDRL", "Release time", V24),
    text("TDTG", "Tagging time", V24),
    text("TMOO", "Mood", V24),
    text("TPRO", "Produced notice", V24),
    text("TSOA", "Album sort order", V24),
    text("TSOP", "Performer sort order", V24),
    text("TSOT", "Title sort order", V24),
    text("TSST", "Set subtitle", V24),
    FrameSchema::new("TXXX", "User defined text information frame", V34, USER_TEXT)
        .allow_duplicates()
        .with_v22("TXX"),
    // Credits
    FrameSchema::new("IPLS", "Involved people list", V23, CREDITS).with_v22("IPL"),
    FrameSchema::new("TIPL", "Involved people list", V24, CREDITS),
    FrameSchema::new("TMCL", "Musician credits list", V24, CREDITS),
    // URL links
    url("WCOM", "Commercial information").allow_duplicates().with_v22("WCM"),
    url("WCOP", "Copyright/Legal information").with_v22("WCP"),
    url("WOAF", "Official audio file webpage").with_v22("WAF"),
    url("WOAR", "Official artist/performer webpage").allow_duplicates().with_v22("WAR"),
    url("WOAS", "Official audio source webpage").with_v22("WAS"),
    url("WORS", "Official internet radio station homepage"),
    url("WPAY", "Payment"),
    url("WPUB", "Publishers official webpage").with_v22("WPB"),
    FrameSchema::new("WXXX", "User defined URL link frame", V34, USER_URL)
        .allow_duplicates()
        .with_v22("WXX"),
    // Other v2.3/v2.4 frames
    FrameSchema::new("COMM", "Comments", V34, COMMENT).allow_duplicates().with_v22("COM"),
    FrameSchema::new("USLT", "Unsynchronised lyric/text transcription", V34, COMMENT)
        .allow_duplicates()
        .with_v22("ULT"),
    FrameSchema::new("APIC", "Attached picture", V34, PICTURE).allow_duplicates(),
    FrameSchema::new("GEOB", "General encapsulated object", V34, OBJECT)
        .allow_duplicates()
        .with_v22("GEO"),
    FrameSchema::new("UFID", "Unique file identifier", V34, OWNER_DATA)
        .allow_duplicates()
        .with_v22("UFI"),
    FrameSchema::new("PRIV", "Private frame", V34, OWNER_DATA).allow_duplicates(),
    FrameSchema::new("PCNT", "Play counter", V34, COUNTER).with_v22("CNT"),
    FrameSchema::new("POPM", "Popularimeter", V34, POPULARIMETER)
        .allow_duplicates()
        .with_v22("POP"),
    FrameSchema::new("MCDI", "Music CD identifier", V34, BINARY).with_v22("MCI"),
    FrameSchema::new("USER", "Terms of use", V34, TERMS)
        .allow_duplicates()
        .untested(),
    FrameSchema::new("GRID", "Group identification registration", V34, GROUP_ID)
        .allow_duplicates()
        .untested(),
    FrameSchema::new("ENCR", "Encryption method registration", V34, ENCRYPTION)
        .allow_duplicates()
        .untested(),
    FrameSchema::new("SEEK", "Seek frame", V24, SEEK).untested(),
    FrameSchema::new("SIGN", "Signature frame", V24, SIGNATURE)
        .allow_duplicates()
        .untested(),
    FrameSchema::new("ETCO", "Event timing codes", V34, TIMED)
        .with_v22("ETC")
        .untested(),
    FrameSchema::new("SYTC", "Synchronised tempo codes", V34, TIMED)
        .with_v22("STC")
        .untested(),
    FrameSchema::new("MLLT", "MPEG location lookup table", V34, LOOKUP_TABLE)
        .with_v22("MLL")
        .untested(),
    FrameSchema::new("RBUF", "Recommended buffer size", V34, BUFFER)
        .with_v22("BUF")
        .bozo(),
    FrameSchema::new("RVRB", "Reverb", V34, REVERB).with_v22("REV").bozo(),
    FrameSchema::new("RVAD", "Relative volume adjustment", V23, BINARY).with_v22("RVA"),
    FrameSchema::new("RVA2", "Relative volume adjustment (2)", V24, VOLUME_V24)
        .allow_duplicates(),
    FrameSchema::new("EQUA", "Equalization", V23, EQUALISATION)
        .with_v22("EQU")
        .bozo(),
    FrameSchema::new("EQU2", "Equalisation (2)", V24, EQUALISATION_V24)
        .allow_duplicates()
        .bozo(),
    FrameSchema::new("LINK", "Linked information", V34, BINARY)
        .allow_duplicates()
        .bozo(),
    FrameSchema::new("POSS", "Position synchronisation frame", V34, POSITION).bozo(),
    FrameSchema::new("AENC", "Audio encryption", V34, AUDIO_ENCRYPTION)
        .allow_duplicates()
        .with_v22("CRA")
        .untested(),
    FrameSchema::new("OWNE", "Ownership frame", V34, OWNERSHIP).untested(),
    FrameSchema::new("COMR", "Commercial frame", V34, COMMERCIAL)
        .allow_duplicates()
        .untested(),
    FrameSchema::new("ASPI", "Audio seek point index", V24, SEEK_POINTS).untested(),
    // v2.2 text information
    text22("TAL", "Album/Movie/Show title", "TALB"),
    text22("TBP", "BPM (Beats Per Minute)", "TBPM"),
    text22("TCM", "Composer", "TCOM"),
    text22("TCO", "Content type", "TCON"),
    text22("TCR", "Copyright message", "TCOP"),
    text22("TDA", "Date", "TDAT"),
    text22("TDY", "Playlist delay", "TDLY"),
    text22("TEN", "Encoded by", "TENC"),
    text22("TFT", "File type", "TFLT"),
    text22("TIM", "Time", "TIME"),
    text22("TKE", "Initial key", "TKEY"),
    text22("TLA", "Language(s)", "TLAN"),
    text22("TLE", "Length", "TLEN"),
    text22("TMT", "Media type", "TMED"),
    text22("TOA", "Original artist(s)/performer(s)", "TOPE"),
    text22("TOF", "Original filename", "TOFN"),
    text22("TOL", "Original Lyricist(s)/text writer(s)", "TOLY"),
    text22("TOR", "Original release year", "TORY"),
    text22("TOT", "Original album/Movie/Show title", "TOAL"),
    text22("TP1", "Lead artist(s)/Lead performer(s)/Soloist(s)/Performing group", "TPE1"),
    text22("TP2", "Band/Orchestra/Accompaniment", "TPE2"),
    text22("TP3", "Conductor/Performer refinement", "TPE3"),
    text22("TP4", "Interpreted, remixed, or otherwise modified by", "TPE4"),
    text22("TPA", "Part of a set", "TPOS"),
    text22("TPB", "Publisher", "TPUB"),
    text22("TRC", "ISRC (International Standard Recording Code)", "TSRC"),
    text22("TRD", "Recording dates", "TRDA"),
    text22("TRK", "Track number/Position in set", "TRCK"),
    text22("TSI", "Size", "TSIZ"),
    text22("TSS", "Software/hardware and settings used for encoding", "TSSE"),
    text22("TT1", "Content group description", "TIT1"),
    text22("TT2", "Title/Songname/Content description", "TIT2"),
    text22("TT3", "Subtitle/Description refinement", "TIT3"),
    text22("TXT", "Lyricist/text writer", "TEXT"),
    text22("TYE", "Year", "TYER"),
    v22("TXX", "User defined text information frame", USER_TEXT, "TXXX").allow_duplicates(),
    v22("IPL", "Involved people list", CREDITS, "IPLS"),
    // v2.2 URL links
    url22("WAF", "Official audio file webpage", "WOAF"),
    url22("WAR", "Official artist/performer webpage", "WOAR").allow_duplicates(),
    url22("WAS", "Official audio source webpage", "WOAS"),
    url22("WCM", "Commercial information", "WCOM").allow_duplicates(),
    url22("WCP", "Copyright/Legal information", "WCOP"),
    url22("WPB", "Publishers official webpage", "WPUB"),
    v22("WXX", "User defined URL link frame", USER_URL, "WXXX").allow_duplicates(),
    // Other v2.2 frames
    v22("COM", "Comments", COMMENT, "COMM").allow_duplicates(),
    v22("ULT", "Unsychronised lyric/text transcription", COMMENT, "USLT").allow_duplicates(),
    FrameSchema::new("PIC", "Attached picture", VersionSet::V22, PICTURE_V22).allow_duplicates(),
    v22("GEO", "General encapsulated object", OBJECT, "GEOB").allow_duplicates(),
    v22("UFI", "Unique file identifier", OWNER_DATA, "UFID").allow_duplicates(),
    v22("CNT", "Play counter", COUNTER, "PCNT"),
    v22("POP", "Popularimeter", POPULARIMETER, "POPM").allow_duplicates(),
    v22("MCI", "Music CD Identifier", BINARY, "MCDI"),
    v22("BUF", "Recommended buffer size", BUFFER, "RBUF").bozo(),
    v22("REV", "Reverb", REVERB, "RVRB").bozo(),
    v22("RVA", "Relative volume adjustment", BINARY, "RVAD"),
    v22("EQU", "Equalization", EQUALISATION, "EQUA").bozo(),
    FrameSchema::new("LNK", "Linked information", VersionSet::V22, BINARY)
        .allow_duplicates()
        .bozo(),
    v22("CRA", "Audio encryption", AUDIO_ENCRYPTION, "AENC")
        .allow_duplicates()
        .untested(),
    v22("ETC", "Event timing codes", TIMED, "ETCO").untested(),
    v22("STC", "Synced tempo codes", TIMED, "SYTC").untested(),
    v22("MLL", "MPEG location lookup table", LOOKUP_TABLE, "MLLT").untested(),
];

// ── Lookup ──────────────────────────────────────────────────────────────────

/// Every registered schema, in table order.
pub fn schemas() -> impl Iterator<Item = &'static FrameSchema> {
    SCHEMAS.iter()
}

/// The schema registered under `id` in any version.
#[must_use]
pub fn lookup(id: &str) -> Option<&'static FrameSchema> {
    SCHEMAS.iter().find(|schema| schema.id == id)
}

/// The schema for `id` if it is defined in `version`.
///
/// `None` is not an error: the caller keeps the frame as an Unknown Frame.
#[must_use]
pub fn resolve(id: &str, version: Version) -> Option<&'static FrameSchema> {
    lookup(id).filter(|schema| schema.in_version(version))
}

/// Identifiers of every frame type defined in `version`.
pub fn known_ids(version: Version) -> impl Iterator<Item = &'static str> {
    SCHEMAS
        .iter()
        .filter(move |schema| schema.in_version(version))
        .map(|schema| schema.id)
}

/// The three-letter counterpart of a v2.3/v2.4 schema.
#[must_use]
pub fn counterpart_v22(schema: &FrameSchema) -> Option<&'static FrameSchema> {
    schema.v22.and_then(lookup)
}

/// The four-letter schema a v2.2 schema upgrades into.
#[must_use]
pub fn parent(schema: &FrameSchema) -> Option<&'static FrameSchema> {
    schema.parent.and_then(lookup)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::schema::MergePolicy;

    #[test]
    fn identifiers_are_unique() {
        let mut seen = HashSet::new();
        for schema in schemas() {
            assert!(seen.insert(schema.id), "duplicate schema {}", schema.id);
        }
    }

    #[test]
    fn identifier_width_matches_versions() {
        for schema in schemas() {
            assert!(!schema.versions.is_empty(), "{} has no version", schema.id);
            for version in schema.versions.iter() {
                assert_eq!(schema.id.len(), version.id_len(), "{}", schema.id);
            }
            assert!(crate::frame::FrameId::new(schema.id).is_ok(), "{}", schema.id);
        }
    }

    #[test]
    fn v22_links_are_symmetric_and_share_fields() {
        for schema in schemas() {
            if let Some(counterpart) = counterpart_v22(schema) {
                assert!(counterpart.in_version(Version::V22), "{}", schema.id);
                assert_eq!(counterpart.parent, Some(schema.id), "{}", schema.id);
                assert_eq!(counterpart.fields, schema.fields, "{}", schema.id);
            }
            if let Some(parent) = parent(schema) {
                assert!(schema.in_version(Version::V22), "{}", schema.id);
                assert_eq!(parent.v22, Some(schema.id), "{}", schema.id);
            }
            if schema.v22.is_some() {
                assert!(counterpart_v22(schema).is_some(), "{}", schema.id);
            }
            if schema.parent.is_some() {
                assert!(parent(schema).is_some(), "{}", schema.id);
            }
        }
    }

    #[test]
    fn greedy_fields_come_last() {
        for schema in schemas() {
            if let Some((_, init)) = schema.fields.split_last() {
                for field in init {
                    assert!(
                        !field.kind.is_greedy(),
                        "{}.{} consumes the payload but is not last",
                        schema.id,
                        field.name
                    );
                }
            }
        }
    }

    #[test]
    fn encoded_text_follows_an_encoding_selector() {
        fn uses_encoding(kind: FieldKind) -> bool {
            match kind {
                FieldKind::EncodedText => true,
                FieldKind::Sequence(inner) => uses_encoding(*inner),
                FieldKind::Pairs(a, b) => uses_encoding(*a) || uses_encoding(*b),
                _ => false,
            }
        }

        for schema in schemas() {
            if schema.fields.iter().any(|f| uses_encoding(f.kind)) {
                assert!(schema.starts_with_encoding(), "{}", schema.id);
            }
        }
    }

    #[test]
    fn field_names_are_unique_within_a_schema() {
        for schema in schemas() {
            let names: HashSet<_> = schema.fields.iter().map(|f| f.name).collect();
            assert_eq!(names.len(), schema.fields.len(), "{}", schema.id);
        }
    }

    #[test]
    fn resolve_respects_versions() {
        assert!(resolve("TIT2", Version::V23).is_some());
        assert!(resolve("TIT2", Version::V22).is_none());
        assert!(resolve("TDRC", Version::V23).is_none());
        assert!(resolve("TDRC", Version::V24).is_some());
        assert!(resolve("TYER", Version::V24).is_none());
        assert!(resolve("TT2", Version::V22).is_some());
        assert!(resolve("ZZZZ", Version::V24).is_none());
    }

    #[test]
    fn known_ids_cover_each_version() {
        let v22: Vec<_> = known_ids(Version::V22).collect();
        assert!(v22.contains(&"TT2"));
        assert!(v22.iter().all(|id| id.len() == 3));
        let v24: Vec<_> = known_ids(Version::V24).collect();
        assert!(v24.contains(&"TDRC"));
        assert!(!v24.contains(&"TYER"));
    }

    #[test]
    fn merge_policies() {
        assert_eq!(lookup("TIT2").unwrap().merge_policy, MergePolicy::ConcatText);
        assert_eq!(lookup("COMM").unwrap().merge_policy, MergePolicy::KeepAll);
        assert_eq!(lookup("TXXX").unwrap().merge_policy, MergePolicy::KeepAll);
        assert_eq!(lookup("PCNT").unwrap().merge_policy, MergePolicy::KeepLast);
    }

    #[test]
    fn markers() {
        assert!(lookup("RVRB").unwrap().bozo);
        assert!(lookup("ETCO").unwrap().untested);
        assert!(!lookup("TIT2").unwrap().untested);
    }
}
