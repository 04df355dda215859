use clap::Parser;
use std::path::PathBuf;

/// Command surface is a single positional path so the binary works as a
/// drag-and-drop target: the sheet plist, the atlas image, or the
/// `_aniinfo` plist are all accepted and resolved to the sheet plist.
#[derive(Parser, Debug)]
#[command(name = "desprite")]
#[command(version, about = "Sprite extractor for Cocos2d/TexturePacker plist atlases", long_about = None)]
pub struct CliArgs {
    /// Path to the sheet .plist, its atlas image, or its _aniinfo.plist
    pub input: Option<PathBuf>,
}
