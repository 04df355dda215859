use std::collections::BTreeMap;
use std::io::Cursor;

use serde::Deserialize;

use super::tuple::parse_tuple;
use crate::error::DespriteError;

/// Sheet plist schema version, taken from the `metadata.format` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    V2,
    V3,
}

/// Normalized sheet metadata, independent of the source schema version.
#[derive(Debug, Clone)]
pub struct AtlasMetadata {
    pub format: SchemaVersion,
    /// Atlas image file name, relative to the sheet plist
    pub texture_file_name: String,
    pub frames: BTreeMap<String, FrameRecord>,
}

impl AtlasMetadata {
    /// Atlas base name without extension, used as the default output
    /// directory for frame keys that carry no path of their own.
    pub fn texture_stem(&self) -> String {
        std::path::Path::new(&self.texture_file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sprites")
            .to_string()
    }
}

/// One frame as stored in the sheet, already parsed to numbers.
#[derive(Debug, Clone, Copy)]
pub struct FrameRecord {
    /// Atlas rect [x, y, a, b] as stored. For rotated frames a and b are
    /// swapped relative to the sprite's final visual width and height.
    pub rect: [i32; 4],
    /// Frame is packed rotated 90 degrees in the atlas
    pub rotated: bool,
    /// Trim offset (x, y) recorded when transparent borders were removed
    pub offset: (i32, i32),
    /// Untrimmed canvas size (width, height)
    pub source_size: (i32, i32),
}

// Format 2 field names (cocos2d classic).
#[derive(Deserialize)]
struct RawFrameV2 {
    frame: String,
    offset: String,
    #[serde(default)]
    rotated: bool,
    #[serde(rename = "sourceSize")]
    source_size: String,
}

// Format 3 renames the same fields.
#[derive(Deserialize)]
struct RawFrameV3 {
    #[serde(rename = "textureRect")]
    frame: String,
    #[serde(rename = "spriteOffset")]
    offset: String,
    #[serde(default, rename = "textureRotated")]
    rotated: bool,
    #[serde(rename = "sourceSize")]
    source_size: String,
}

#[derive(Deserialize)]
struct RawMetadata {
    #[serde(rename = "textureFileName")]
    texture_file_name: String,
}

#[derive(Deserialize)]
struct RawSheetV2 {
    frames: BTreeMap<String, RawFrameV2>,
    metadata: RawMetadata,
}

#[derive(Deserialize)]
struct RawSheetV3 {
    frames: BTreeMap<String, RawFrameV3>,
    metadata: RawMetadata,
}

/// Decode a sheet plist into normalized metadata.
///
/// The format version is sniffed from the raw document before committing to
/// a field mapping; the same bytes are then deserialized with the matching
/// schema. Tuple strings are parsed per frame, so a single malformed field
/// aborts the decode with the offending frame key in the error.
pub fn decode_sheet(bytes: &[u8]) -> Result<AtlasMetadata, DespriteError> {
    let value = plist::Value::from_reader(Cursor::new(bytes))?;
    let format = value
        .as_dictionary()
        .and_then(|doc| doc.get("metadata"))
        .and_then(|meta| meta.as_dictionary())
        .and_then(|meta| meta.get("format"))
        .and_then(|format| format.as_unsigned_integer())
        .ok_or(DespriteError::MissingFormat)?;

    match format {
        2 => {
            let raw: RawSheetV2 = plist::from_bytes(bytes)?;
            let frames = decode_frames(raw.frames, |f| (f.frame, f.offset, f.rotated, f.source_size))?;
            Ok(AtlasMetadata {
                format: SchemaVersion::V2,
                texture_file_name: raw.metadata.texture_file_name,
                frames,
            })
        }
        3 => {
            let raw: RawSheetV3 = plist::from_bytes(bytes)?;
            let frames = decode_frames(raw.frames, |f| (f.frame, f.offset, f.rotated, f.source_size))?;
            Ok(AtlasMetadata {
                format: SchemaVersion::V3,
                texture_file_name: raw.metadata.texture_file_name,
                frames,
            })
        }
        other => Err(DespriteError::UnsupportedFormat(other)),
    }
}

fn decode_frames<R>(
    raw: BTreeMap<String, R>,
    fields: impl Fn(R) -> (String, String, bool, String),
) -> Result<BTreeMap<String, FrameRecord>, DespriteError> {
    raw.into_iter()
        .map(|(key, frame)| {
            let (rect, offset, rotated, source_size) = fields(frame);
            let rect = parse_tuple::<4>(&key, "frame", &rect)?;
            let [ox, oy] = parse_tuple::<2>(&key, "offset", &offset)?;
            let [sw, sh] = parse_tuple::<2>(&key, "sourceSize", &source_size)?;
            Ok((
                key,
                FrameRecord {
                    rect,
                    rotated,
                    offset: (ox, oy),
                    source_size: (sw, sh),
                },
            ))
        })
        .collect()
}
