use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::DespriteError;
use crate::metadata::AnimationIndex;

/// Synthetic "all frames" entries emitted alongside real animations; they
/// reference every frame and must not drive grouping.
const RESERVED_ALL: &[&str] = &["__all__", "_all"];

/// Regroup extracted frame files into per-animation numbered sequences.
///
/// For every animation, each referenced frame file is copied next to its
/// source as `<main_dir>_<animation>_<seq>.<ext>` with a 1-based sequence
/// number padded to four digits. Sources are deleted only after all
/// animations are processed, because one frame may appear in several
/// animations (deletion tolerates already-missing files).
///
/// `main_dir` is the atlas base name: bare frame names resolve under it,
/// frame names carrying a path separator resolve against `base` directly.
pub fn group_animations(
    index: &AnimationIndex,
    main_dir: &str,
    base: &Path,
) -> Result<(), DespriteError> {
    let dir_prefix = main_dir.replace(['/', '\\'], "_");
    let mut used: BTreeSet<PathBuf> = BTreeSet::new();

    for (name, animation) in &index.animations {
        if RESERVED_ALL.contains(&name.as_str()) {
            continue;
        }
        info!("{name}");

        for (position, &frame_index) in animation.frame_list.iter().enumerate() {
            let frame_key = usize::try_from(frame_index)
                .ok()
                .and_then(|i| index.frame_list.get(i))
                .ok_or_else(|| DespriteError::FrameIndexOutOfRange {
                    animation: name.clone(),
                    index: frame_index,
                    len: index.frame_list.len(),
                })?;

            let (source, dest_dir) = if frame_key.contains('/') {
                let source = base.join(frame_key);
                let dest_dir = source
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| base.to_path_buf());
                (source, dest_dir)
            } else {
                let dest_dir = base.join(main_dir);
                (dest_dir.join(frame_key), dest_dir)
            };

            let extension = Path::new(frame_key)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{e}"))
                .unwrap_or_default();
            let dest = dest_dir.join(format!(
                "{}_{}_{:04}{}",
                dir_prefix,
                name.replace(' ', "_"),
                position + 1,
                extension
            ));

            fs::copy(&source, &dest).map_err(|e| DespriteError::FrameCopy {
                from: source.clone(),
                to: dest,
                source: e,
            })?;
            used.insert(source);
        }
    }

    for path in used {
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(DespriteError::FrameDelete { path, source: e }),
        }
    }

    Ok(())
}
