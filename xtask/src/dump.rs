//! xtask dump — decode the ID3v2 tag of MP3 files and print every frame.
//!
//! Only the container work the frame engine leaves to its caller lives here:
//! tag header, extended header, unsynchronisation and frame splitting.
//! Compressed frames are printed as opaque frames; zlib is not part of the
//! frame engine.

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use colored::Colorize;
use frames::synchsafe;
use frames::{merge, Context, Frame, FrameFlag, FrameFlags, FrameId, Version, Warning};
use walkdir::WalkDir;

const TAG_HEADER_LEN: usize = 10;
const FLAG_UNSYNC: u8 = 0x80;
const FLAG_EXTENDED: u8 = 0x40;
const DATA_LENGTH_LEN: usize = 4;

/// The 10-byte header in front of every ID3v2 tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TagHeader {
    pub version: Version,
    pub flags: u8,
    /// Tag size without the header.
    pub size: usize,
}

/// One frame as cut out of the tag body, before the engine sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawFrame {
    pub id: String,
    pub flags: u16,
    pub payload: Vec<u8>,
}

/// Entry point called from main.rs
pub fn run(paths: &[PathBuf], limit: Option<usize>) -> Result<()> {
    let files = collect_mp3s(paths)?;
    let limit = limit.unwrap_or(usize::MAX);

    let mut failed = 0usize;
    let mut dumped = 0usize;
    for path in files.iter().take(limit) {
        println!("{}", path.display().to_string().bold());
        if let Err(err) = dump_file(path) {
            failed = failed.saturating_add(1);
            eprintln!("  {} {err:#}", "✗".red());
        }
        dumped = dumped.saturating_add(1);
        println!();
    }

    let summary = format!("{dumped} files, {failed} unreadable");
    if failed == 0 {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
    }
    Ok(())
}

fn dump_file(path: &Path) -> Result<()> {
    let Some((header, body)) = read_tag(path)? else {
        println!("  {}", "no ID3v2 tag".dimmed());
        return Ok(());
    };
    println!("  {} ({} bytes)", header.version, header.size);

    let (frames, warnings) = decode_tag(&header, &body)?;
    for frame in &frames {
        let line = frame.to_string();
        if frame.is_error() {
            println!("  {}", line.red());
        } else if frame.is_unknown() {
            println!("  {}", line.dimmed());
        } else {
            println!("  {line}");
        }
    }
    for warning in &warnings {
        println!("  {} {warning}", "warning:".yellow());
    }
    Ok(())
}

/// Every `.mp3` file named directly or found under a named directory.
pub(crate) fn collect_mp3s(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in paths {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            let is_mp3 = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("mp3"));
            if entry.file_type().is_file() && is_mp3 {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

/// Tag header and body of `path`, or `None` if the file has no ID3v2 tag.
pub(crate) fn read_tag(path: &Path) -> Result<Option<(TagHeader, Vec<u8>)>> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut head = [0u8; TAG_HEADER_LEN];
    if file.read_exact(&mut head).is_err() {
        return Ok(None);
    }
    let Some(header) = parse_header(&head)? else {
        return Ok(None);
    };
    let mut body = vec![0u8; header.size];
    file.read_exact(&mut body)
        .with_context(|| format!("tag of {} bytes is truncated", header.size))?;
    Ok(Some((header, body)))
}

pub(crate) fn parse_header(bytes: &[u8; TAG_HEADER_LEN]) -> Result<Option<TagHeader>> {
    let [b'I', b'D', b'3', major, _revision, flags, s0, s1, s2, s3] = *bytes else {
        return Ok(None);
    };
    let version =
        Version::from_major(major).with_context(|| format!("unsupported ID3v2.{major} tag"))?;
    let size = synchsafe::decode([s0, s1, s2, s3]).context("corrupt tag size")?;
    Ok(Some(TagHeader {
        version,
        flags,
        size: usize::try_from(size)?,
    }))
}

/// Decode and merge every frame of a tag body.
pub(crate) fn decode_tag(header: &TagHeader, body: &[u8]) -> Result<(Vec<Frame>, Vec<Warning>)> {
    // v2.4 unsynchronises per frame; older versions the whole body.
    let body: Cow<'_, [u8]> = if header.version != Version::V24 && header.flags & FLAG_UNSYNC != 0 {
        Cow::Owned(remove_unsync(body))
    } else {
        Cow::Borrowed(body)
    };
    let mut area: &[u8] = &body;
    if header.flags & FLAG_EXTENDED != 0 {
        area = skip_extended_header(area, header.version)?;
    }

    let ctx = Context::new(header.version);
    let mut warnings = Vec::new();
    let decoded: Vec<Frame> = split_frames(area, header.version)
        .iter()
        .map(|raw| decode_frame(raw, header, &ctx, &mut warnings))
        .collect();
    tracing::debug!(version = %header.version, frames = decoded.len(), "tag split");
    let frames = merge(decoded, &mut warnings);
    Ok((frames, warnings))
}

fn decode_frame(
    raw: &RawFrame,
    header: &TagHeader,
    ctx: &Context,
    warnings: &mut Vec<Warning>,
) -> Frame {
    let flags = FrameFlags::from_bits(raw.flags, header.version);
    if flags.contains(FrameFlag::Compressed) {
        return Frame::unknown(FrameId::lossy(&raw.id), raw.payload.clone()).with_flags(flags);
    }

    let mut payload = raw.payload.as_slice();
    let resynced;
    if header.version == Version::V24 {
        if flags.contains(FrameFlag::DataLengthIndicator) {
            payload = payload.get(DATA_LENGTH_LEN..).unwrap_or_default();
        }
        if flags.contains(FrameFlag::Unsynchronised) || header.flags & FLAG_UNSYNC != 0 {
            resynced = remove_unsync(payload);
            payload = &resynced;
        }
    }
    Frame::decode(&raw.id, raw.flags, payload, ctx, warnings)
}

/// Undo unsynchronisation: drop every `00` that follows an `FF`.
pub(crate) fn remove_unsync(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut after_ff = false;
    for &byte in data {
        if !(after_ff && byte == 0) {
            out.push(byte);
        }
        after_ff = byte == 0xFF;
    }
    out
}

fn skip_extended_header(body: &[u8], version: Version) -> Result<&[u8]> {
    let (size_bytes, _) = body
        .split_first_chunk::<4>()
        .context("truncated extended header")?;
    let skip = match version {
        // The same bit means whole-tag compression in v2.2.
        Version::V22 => anyhow::bail!("compressed ID3v2.2 tags are not supported"),
        // Size excludes its own four bytes.
        Version::V23 => u32::from_be_bytes(*size_bytes)
            .checked_add(4)
            .context("extended header size overflows")?,
        Version::V24 => synchsafe::decode(*size_bytes).context("corrupt extended header size")?,
    };
    body.get(usize::try_from(skip)?..)
        .context("extended header overruns the tag")
}

/// Cut a tag body into frames, stopping at padding or a frame that overruns.
pub(crate) fn split_frames(mut body: &[u8], version: Version) -> Vec<RawFrame> {
    let header_len = match version {
        Version::V22 => 6,
        Version::V23 | Version::V24 => 10,
    };
    let mut frames = Vec::new();
    while let Some((header, rest)) = body.split_at_checked(header_len) {
        if header.first().map_or(true, |&b| b == 0) {
            break;
        }
        let Some((id, tail)) = header.split_at_checked(version.id_len()) else {
            break;
        };
        let (size, flags) = match (version, tail) {
            (Version::V22, &[a, b, c]) => (u32::from_be_bytes([0, a, b, c]), 0),
            (Version::V23, &[a, b, c, d, f0, f1]) => {
                (u32::from_be_bytes([a, b, c, d]), u16::from_be_bytes([f0, f1]))
            }
            // Some writers put plain big-endian sizes in v2.4 tags.
            (Version::V24, &[a, b, c, d, f0, f1]) => (
                synchsafe::decode([a, b, c, d])
                    .unwrap_or_else(|_| u32::from_be_bytes([a, b, c, d])),
                u16::from_be_bytes([f0, f1]),
            ),
            _ => break,
        };
        let id = String::from_utf8_lossy(id).into_owned();
        let Some((payload, next)) = usize::try_from(size)
            .ok()
            .and_then(|size| rest.split_at_checked(size))
        else {
            tracing::warn!(frame = %id, size, available = rest.len(), "frame overruns the tag");
            break;
        };
        frames.push(RawFrame {
            id,
            flags,
            payload: payload.to_vec(),
        });
        body = next;
    }
    frames
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn frame_v23(id: &str, flags: u16, payload: &[u8]) -> Vec<u8> {
        let mut out = id.as_bytes().to_vec();
        out.extend_from_slice(&u32::try_from(payload.len()).unwrap().to_be_bytes());
        out.extend_from_slice(&flags.to_be_bytes());
        out.extend_from_slice(payload);
        out
    }

    fn frame_v24(id: &str, flags: u16, payload: &[u8]) -> Vec<u8> {
        let mut out = id.as_bytes().to_vec();
        let size = synchsafe::encode(u32::try_from(payload.len()).unwrap()).unwrap();
        out.extend_from_slice(&size);
        out.extend_from_slice(&flags.to_be_bytes());
        out.extend_from_slice(payload);
        out
    }

    fn header(version: Version, flags: u8, body: &[u8]) -> TagHeader {
        TagHeader {
            version,
            flags,
            size: body.len(),
        }
    }

    fn tag_file(major: u8, flags: u8, body: &[u8]) -> Vec<u8> {
        let mut out = vec![b'I', b'D', b'3', major, 0, flags];
        out.extend_from_slice(&synchsafe::encode(u32::try_from(body.len()).unwrap()).unwrap());
        out.extend_from_slice(body);
        out
    }

    /// Insert a `00` after every `FF`.
    fn unsync(data: &[u8]) -> Vec<u8> {
        data.iter()
            .flat_map(|&b| if b == 0xFF { vec![b, 0] } else { vec![b] })
            .collect()
    }

    #[test]
    fn tag_file_decodes_and_merges() {
        let mut body = Vec::new();
        body.extend(frame_v23("TIT2", 0, b"\x00Title"));
        body.extend(frame_v23("TPE1", 0, b"\x00A"));
        body.extend(frame_v23("PCNT", 0, &[0, 0, 0, 1]));
        body.extend(frame_v23("TPE1", 0, b"\x00B"));
        body.extend(frame_v23("PCNT", 0, &[0, 0, 0, 2]));
        body.extend([0u8; 16]);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("song.mp3");
        let mut file = tag_file(3, 0, &body);
        file.extend_from_slice(b"\xFF\xFBaudio");
        std::fs::write(&path, file).unwrap();

        let (header, body) = read_tag(&path).unwrap().unwrap();
        assert_eq!(header.version, Version::V23);
        let (frames, warnings) = decode_tag(&header, &body).unwrap();
        let ids: Vec<&str> = frames.iter().map(|f| f.id().as_str()).collect();
        assert_eq!(ids, ["TIT2", "TPE1", "PCNT"]);
        assert_eq!(frames[1].text_values(), vec!["A", "B"]);
        assert_eq!(frames[2].get("count").and_then(|v| v.as_int()), Some(2));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn files_without_a_tag_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bare.mp3");
        std::fs::write(&path, b"\xFF\xFB\x90\x00 plain mpeg audio").unwrap();
        assert!(read_tag(&path).unwrap().is_none());

        let short = dir.path().join("short.mp3");
        std::fs::write(&short, b"ID3").unwrap();
        assert!(read_tag(&short).unwrap().is_none());
    }

    #[test]
    fn unsupported_major_versions_fail() {
        let mut head = [0u8; TAG_HEADER_LEN];
        head[..6].copy_from_slice(b"ID3\x05\x00\x00");
        assert!(parse_header(&head).is_err());
    }

    #[test]
    fn tag_unsynchronisation_is_reversed() {
        let body = unsync(&frame_v23("TIT2", 0, b"\x00a\xFFb"));
        let header = header(Version::V23, FLAG_UNSYNC, &body);
        let (frames, _) = decode_tag(&header, &body).unwrap();
        assert_eq!(frames[0].text_values(), vec!["a\u{FF}b"]);
    }

    #[test]
    fn extended_headers_are_skipped() {
        let mut body = vec![0, 0, 0, 6, 0, 0, 0, 0, 0, 0];
        body.extend(frame_v23("TALB", 0, b"\x00Album"));
        let header = header(Version::V23, FLAG_EXTENDED, &body);
        let (frames, _) = decode_tag(&header, &body).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].text_values(), vec!["Album"]);
    }

    #[test]
    fn v22_frames_have_short_headers() {
        let mut body = b"TT2\x00\x00\x06\x00Hello".to_vec();
        body.extend(b"TP1\x00\x00\x02\x00X");
        let frames = split_frames(&body, Version::V22);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].id, "TT2");
        assert_eq!(frames[1].payload, b"\x00X");
    }

    #[test]
    fn v24_frame_flags_are_honoured() {
        let mut payload = synchsafe::encode(3).unwrap().to_vec();
        payload.extend(unsync(b"\x00\xFFx"));
        let body = frame_v24("TIT2", 0x0003, &payload);
        let header = header(Version::V24, 0, &body);
        let (frames, _) = decode_tag(&header, &body).unwrap();
        assert_eq!(frames[0].text_values(), vec!["\u{FF}x"]);
    }

    #[test]
    fn compressed_frames_stay_opaque() {
        let body = frame_v23("TIT2", 0x0080, b"\x00\x00\x00\x05zlib!");
        let header = header(Version::V23, 0, &body);
        let (frames, _) = decode_tag(&header, &body).unwrap();
        assert!(frames[0].is_unknown());
        assert_eq!(frames[0].raw_data(), Some(&b"\x00\x00\x00\x05zlib!"[..]));
    }

    #[test]
    fn overrunning_frames_stop_the_split() {
        let mut body = frame_v23("TIT2", 0, b"\x00ok");
        body.extend(b"TALB\x00\x00\x01\x00\x00\x00short");
        let frames = split_frames(&body, Version::V23);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn only_mp3_files_are_collected() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("album");
        std::fs::create_dir(&sub).unwrap();
        for name in ["a.mp3", "b.MP3", "c.flac"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::write(sub.join("d.mp3"), b"").unwrap();

        let files = collect_mp3s(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.extension().unwrap() != "flac"));
    }

    #[test]
    fn resync_keeps_lone_zero_bytes() {
        assert_eq!(remove_unsync(&[0xFF, 0x00, 0x00, 0xFF, 0xE0]), [0xFF, 0x00, 0xFF, 0xE0]);
    }
}
