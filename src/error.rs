use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DespriteError {
    #[error("Failed to read settings file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write settings file '{path}': {source}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Sheet plist not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Failed to parse plist document: {0}")]
    PlistParse(#[from] plist::Error),

    #[error("Sheet metadata is missing its format version")]
    MissingFormat,

    #[error("Unsupported sheet format version {0} (expected 2 or 3)")]
    UnsupportedFormat(u64),

    #[error("Frame '{key}': malformed {field} tuple '{value}'")]
    MalformedTuple {
        key: String,
        field: &'static str,
        value: String,
    },

    #[error("Frame '{key}': atlas rect {rect:?} does not fit the {width}x{height} atlas")]
    RectOutOfBounds {
        key: String,
        rect: [i32; 4],
        width: u32,
        height: u32,
    },

    #[error("Animation '{animation}': frame index {index} is out of range (frame list has {len})")]
    FrameIndexOutOfRange {
        animation: String,
        index: i64,
        len: usize,
    },

    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to copy frame '{from}' to '{to}': {source}")]
    FrameCopy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to delete consumed frame '{path}': {source}")]
    FrameDelete {
        path: PathBuf,
        source: std::io::Error,
    },
}
