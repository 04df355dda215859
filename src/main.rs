use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use desprite::cli::CliArgs;
use desprite::config::{DespriteConfig, load_or_init};
use desprite::error::DespriteError;
use desprite::extract::{BaseDir, Extractor};
use desprite::geometry::OutputMode;
use desprite::{group_animations, metadata};

const CONFIG_FILE: &str = "desprite.json";
const ANIINFO_SUFFIX: &str = "_aniinfo.plist";

#[allow(clippy::print_stdout)]
fn main() {
    // The settings are probed up front so the pause behavior is known even
    // when the run fails before it would normally load them
    let config = load_or_init(Path::new(CONFIG_FILE));
    let close_when_done = config.as_ref().map(|c| c.close_when_done).unwrap_or(false);

    match run(config) {
        Ok(()) => println!("Done!"),
        Err(e) => println!("{e:#}"),
    }

    if !close_when_done {
        println!("Press Enter to exit...");
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
    }
    // The process exits 0 either way: the binary is a drag-and-drop target
    // for non-technical users and reports failure through the printed
    // message, not the exit status
}

fn run(config: Result<DespriteConfig, DespriteError>) -> Result<()> {
    let config = config?;

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = CliArgs::parse();
    let Some(input) = cli.input else {
        bail!(
            "No file specified. Drag a file onto the executable itself or pass a path as a command-line argument."
        );
    };

    let sheet_path = resolve_sheet_path(&input);
    if !sheet_path.exists() {
        return Err(DespriteError::InputNotFound(sheet_path).into());
    }

    let bytes = fs::read(&sheet_path)
        .with_context(|| format!("failed to read sheet plist: {}", sheet_path.display()))?;
    let metadata = metadata::decode_sheet(&bytes)?;

    let sheet_dir = sheet_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let atlas_path = sheet_dir.join(&metadata.texture_file_name);
    let atlas = image::ImageReader::open(&atlas_path)
        .map_err(|e| DespriteError::ImageLoad {
            path: atlas_path.clone(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| DespriteError::ImageLoad {
            path: atlas_path.clone(),
            source: e,
        })?
        .into_rgba8();

    let mode = if config.crop_sprites {
        OutputMode::CroppedOnly
    } else {
        OutputMode::FullCanvas
    };
    let base = BaseDir::Metadata
        .resolve(&sheet_path)
        .context("failed to resolve the output base directory")?;

    let extractor = Extractor::new(base.clone(), mode);
    let results = extractor.extract(&atlas, &metadata)?;
    info!("Extracted {} sprites", results.len());

    if config.group_by_animation {
        let aniinfo_path = aniinfo_sibling(&sheet_path);
        if !aniinfo_path.exists() {
            info!("Could not find animation list, skipping grouping...");
            return Ok(());
        }
        let bytes = fs::read(&aniinfo_path).with_context(|| {
            format!("failed to read animation list: {}", aniinfo_path.display())
        })?;
        let index = metadata::decode_aniinfo(&bytes)?;
        group_animations(&index, &metadata.texture_stem(), &base)?;
    }

    Ok(())
}

/// Map whatever was dropped on the binary to the sheet plist: the atlas
/// image swaps its suffix, the animation list strips its `_aniinfo`
/// suffix, anything else is taken as the sheet itself.
fn resolve_sheet_path(input: &Path) -> PathBuf {
    let name = input.to_string_lossy();
    if let Some(stem) = name.strip_suffix(".png") {
        PathBuf::from(format!("{stem}.plist"))
    } else if let Some(stem) = name.strip_suffix(ANIINFO_SUFFIX) {
        PathBuf::from(format!("{stem}.plist"))
    } else {
        input.to_path_buf()
    }
}

fn aniinfo_sibling(sheet_path: &Path) -> PathBuf {
    let name = sheet_path.to_string_lossy();
    match name.strip_suffix(".plist") {
        Some(stem) => PathBuf::from(format!("{stem}{ANIINFO_SUFFIX}")),
        None => sheet_path.to_path_buf(),
    }
}
