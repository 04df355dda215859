mod aniinfo;
mod sheet;
mod tuple;

pub use aniinfo::{Animation, AnimationIndex, decode_aniinfo};
pub use sheet::{AtlasMetadata, FrameRecord, SchemaVersion, decode_sheet};
