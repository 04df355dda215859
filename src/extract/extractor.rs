use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops;
use log::info;

use crate::error::DespriteError;
use crate::geometry::{self, CropPlan, OutputMode};
use crate::metadata::AtlasMetadata;

/// Where extracted sprites are written, relative to what.
///
/// The drag-and-drop workflow historically anchored output either next to
/// the executable or next to the sheet being processed; the strategy is
/// picked once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseDir {
    /// Directory containing the running executable
    Executable,
    /// Directory containing the sheet plist
    Metadata,
}

impl BaseDir {
    pub fn resolve(self, sheet_path: &Path) -> std::io::Result<PathBuf> {
        match self {
            BaseDir::Metadata => Ok(sheet_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf()),
            BaseDir::Executable => {
                let exe = std::env::current_exe()?;
                Ok(exe
                    .parent()
                    .unwrap_or(Path::new("."))
                    .to_path_buf())
            }
        }
    }
}

/// One sprite file produced by the extractor.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub key: String,
    pub path: PathBuf,
}

/// Walks the frame list, crops each region out of the atlas image and
/// writes the resulting sprite to disk.
pub struct Extractor {
    base: PathBuf,
    mode: OutputMode,
}

impl Extractor {
    pub fn new(base: PathBuf, mode: OutputMode) -> Self {
        Self { base, mode }
    }

    /// Extract every frame of `metadata` from `atlas`.
    ///
    /// Frame keys containing a path separator are written at that relative
    /// path; bare keys are nested under a directory named after the atlas
    /// image. Existing files are overwritten, so reruns are idempotent.
    /// Any I/O failure aborts the run.
    pub fn extract(
        &self,
        atlas: &RgbaImage,
        metadata: &AtlasMetadata,
    ) -> Result<Vec<ExtractionResult>, DespriteError> {
        let main_dir = metadata.texture_stem();
        let mut results = Vec::with_capacity(metadata.frames.len());

        for (key, frame) in &metadata.frames {
            info!("{key}");
            let Some(plan) = geometry::resolve(frame, self.mode) else {
                continue;
            };

            let sprite = render(atlas, &plan, key)?;

            let relative = if key.contains('/') {
                PathBuf::from(key)
            } else {
                Path::new(&main_dir).join(key)
            };
            let path = self.base.join(relative);

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| DespriteError::OutputWrite {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
            sprite.save(&path).map_err(|e| DespriteError::ImageSave {
                path: path.clone(),
                source: e,
            })?;

            results.push(ExtractionResult {
                key: key.clone(),
                path,
            });
        }

        Ok(results)
    }
}

/// Crop one frame's region out of the atlas and apply the plan: optional
/// canvas composition, then rotation correction (90 degrees CCW) last so
/// geometry and pixels are undone the same way.
fn render(atlas: &RgbaImage, plan: &CropPlan, key: &str) -> Result<RgbaImage, DespriteError> {
    let out_of_bounds = || DespriteError::RectOutOfBounds {
        key: key.to_string(),
        rect: [plan.x, plan.y, plan.width, plan.height],
        width: atlas.width(),
        height: atlas.height(),
    };

    let x = u32::try_from(plan.x).map_err(|_e| out_of_bounds())?;
    let y = u32::try_from(plan.y).map_err(|_e| out_of_bounds())?;
    let width = u32::try_from(plan.width).map_err(|_e| out_of_bounds())?;
    let height = u32::try_from(plan.height).map_err(|_e| out_of_bounds())?;

    // crop_imm clamps to the atlas bounds, same as the region intersection
    // the sheets were produced against
    let cropped = imageops::crop_imm(atlas, x, y, width, height).to_image();

    match plan.paste {
        None => Ok(apply_rotation(cropped, plan.rotated)),
        Some(paste) => {
            let canvas_w = u32::try_from(paste.canvas_width).map_err(|_e| out_of_bounds())?;
            let canvas_h = u32::try_from(paste.canvas_height).map_err(|_e| out_of_bounds())?;
            let mut canvas = RgbaImage::new(canvas_w, canvas_h);
            imageops::replace(&mut canvas, &cropped, i64::from(paste.x), i64::from(paste.y));
            Ok(apply_rotation(canvas, plan.rotated))
        }
    }
}

fn apply_rotation(image: RgbaImage, rotated: bool) -> RgbaImage {
    if rotated {
        // Frames are packed rotated 90 degrees clockwise; rotate270 is the
        // counter-clockwise quarter turn that restores them
        imageops::rotate270(&image)
    } else {
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{FrameRecord, SchemaVersion};
    use image::Rgba;
    use std::collections::BTreeMap;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn atlas_with_region(x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) -> RgbaImage {
        let mut atlas = RgbaImage::new(128, 128);
        for py in y..y + h {
            for px in x..x + w {
                atlas.put_pixel(px, py, color);
            }
        }
        atlas
    }

    fn metadata_with(frames: Vec<(&str, FrameRecord)>) -> AtlasMetadata {
        AtlasMetadata {
            format: SchemaVersion::V2,
            texture_file_name: "hero.png".to_string(),
            frames: frames
                .into_iter()
                .map(|(k, f)| (k.to_string(), f))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn frame(rect: [i32; 4], rotated: bool, offset: (i32, i32), source_size: (i32, i32)) -> FrameRecord {
        FrameRecord {
            rect,
            rotated,
            offset,
            source_size,
        }
    }

    #[test]
    fn test_cropped_output_under_atlas_directory() {
        let dir = tempfile::tempdir().unwrap();
        let atlas = atlas_with_region(10, 20, 50, 60, RED);
        let meta = metadata_with(vec![(
            "hero.png",
            frame([10, 20, 50, 60], false, (0, 0), (50, 60)),
        )]);

        let extractor = Extractor::new(dir.path().to_path_buf(), OutputMode::CroppedOnly);
        let results = extractor.extract(&atlas, &meta).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, dir.path().join("hero").join("hero.png"));

        let out = image::open(&results[0].path).unwrap().into_rgba8();
        assert_eq!(out.dimensions(), (50, 60));
        assert_eq!(*out.get_pixel(0, 0), RED);
        assert_eq!(*out.get_pixel(49, 59), RED);
    }

    #[test]
    fn test_key_with_separator_is_not_nested() {
        let dir = tempfile::tempdir().unwrap();
        let atlas = atlas_with_region(0, 0, 16, 16, RED);
        let meta = metadata_with(vec![(
            "walk/frame1.png",
            frame([0, 0, 16, 16], false, (0, 0), (16, 16)),
        )]);

        let extractor = Extractor::new(dir.path().to_path_buf(), OutputMode::CroppedOnly);
        let results = extractor.extract(&atlas, &meta).unwrap();

        assert_eq!(results[0].path, dir.path().join("walk").join("frame1.png"));
        assert!(!dir.path().join("hero").exists());
    }

    #[test]
    fn test_degenerate_frame_produces_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let atlas = RgbaImage::new(128, 128);
        let meta = metadata_with(vec![(
            "dot.png",
            frame([0, 0, 3, 3], false, (0, 0), (3, 3)),
        )]);

        let extractor = Extractor::new(dir.path().to_path_buf(), OutputMode::CroppedOnly);
        let results = extractor.extract(&atlas, &meta).unwrap();

        assert!(results.is_empty());
        assert!(!dir.path().join("hero").join("dot.png").exists());
    }

    #[test]
    fn test_full_canvas_paste_placement() {
        let dir = tempfile::tempdir().unwrap();
        let atlas = atlas_with_region(10, 20, 50, 60, RED);
        let meta = metadata_with(vec![(
            "hero.png",
            frame([10, 20, 50, 60], false, (0, -5), (60, 70)),
        )]);

        let extractor = Extractor::new(dir.path().to_path_buf(), OutputMode::FullCanvas);
        let results = extractor.extract(&atlas, &meta).unwrap();

        let out = image::open(&results[0].path).unwrap().into_rgba8();
        assert_eq!(out.dimensions(), (60, 70));
        // paste point: ((60-50)/2 + 0, (70-60)/2 + (-5)*-1) = (5, 10)
        assert_eq!(*out.get_pixel(5, 10), RED);
        assert_eq!(*out.get_pixel(54, 69), RED);
        assert_eq!(*out.get_pixel(4, 10), CLEAR);
        assert_eq!(*out.get_pixel(5, 9), CLEAR);
        assert_eq!(*out.get_pixel(55, 10), CLEAR);
    }

    #[test]
    fn test_rotated_frame_is_restored_counter_clockwise() {
        let dir = tempfile::tempdir().unwrap();
        // Region is 20 wide x 10 tall in the atlas; the stored rect records
        // the final orientation as 10x20 with the dimensions swapped
        let mut atlas = atlas_with_region(0, 0, 20, 10, RED);
        atlas.put_pixel(19, 0, GREEN);

        let meta = metadata_with(vec![(
            "spin.png",
            frame([0, 0, 10, 20], true, (0, 0), (10, 20)),
        )]);

        let extractor = Extractor::new(dir.path().to_path_buf(), OutputMode::CroppedOnly);
        let results = extractor.extract(&atlas, &meta).unwrap();

        let out = image::open(&results[0].path).unwrap().into_rgba8();
        assert_eq!(out.dimensions(), (10, 20));
        // 90 degrees CCW: the region's top-right corner becomes top-left
        assert_eq!(*out.get_pixel(0, 0), GREEN);
        assert_eq!(*out.get_pixel(0, 19), RED);
    }

    #[test]
    fn test_rerun_overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let atlas = atlas_with_region(0, 0, 16, 16, RED);
        let meta = metadata_with(vec![(
            "hero.png",
            frame([0, 0, 16, 16], false, (0, 0), (16, 16)),
        )]);

        let extractor = Extractor::new(dir.path().to_path_buf(), OutputMode::CroppedOnly);
        extractor.extract(&atlas, &meta).unwrap();
        let results = extractor.extract(&atlas, &meta).unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].path.exists());
    }

    #[test]
    fn test_base_dir_metadata_resolves_to_sheet_parent() {
        let resolved = BaseDir::Metadata
            .resolve(Path::new("assets/hero.plist"))
            .unwrap();
        assert_eq!(resolved, Path::new("assets"));

        let resolved = BaseDir::Metadata.resolve(Path::new("hero.plist")).unwrap();
        assert_eq!(resolved, Path::new("."));
    }
}
