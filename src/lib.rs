pub mod anim;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod metadata;

pub use anim::group_animations;
pub use cli::CliArgs;
pub use config::DespriteConfig;
pub use error::DespriteError;
pub use extract::{BaseDir, ExtractionResult, Extractor};
pub use geometry::{CropPlan, OutputMode};
pub use metadata::{AnimationIndex, AtlasMetadata, FrameRecord, SchemaVersion};
