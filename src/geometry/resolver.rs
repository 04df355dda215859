use crate::metadata::FrameRecord;

/// What the extractor writes for each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// The trimmed pixels only, at their packed size
    CroppedOnly,
    /// The trimmed pixels re-centered on a transparent canvas of the
    /// original untrimmed size
    FullCanvas,
}

/// Placement of the cropped pixels on the untrimmed canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PastePlan {
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub x: i32,
    pub y: i32,
}

/// Everything the extractor needs to turn one atlas region into a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropPlan {
    /// Crop origin in atlas space
    pub x: i32,
    pub y: i32,
    /// Crop size. For rotated frames this is already the swapped (final
    /// visual) orientation, which is also how the region sits in the atlas
    /// before rotation correction.
    pub width: i32,
    pub height: i32,
    /// Pixels must be rotated 90 degrees counter-clockwise after cropping
    /// (and after canvas composition, for full-canvas output)
    pub rotated: bool,
    /// Present only for full-canvas output
    pub paste: Option<PastePlan>,
}

/// Compute the crop geometry for one frame.
///
/// Returns `None` for degenerate frames (both final width and height under
/// 4 pixels), which are skipped without producing a file.
///
/// For full-canvas output the trim offset is re-applied around the canvas
/// center. The offset axes swap and the vertical flip disappears when the
/// frame is rotated, because rotation changes which trim axis maps to
/// which screen axis; this mirrors the behavior of the tools that produce
/// these sheets and must not be normalized.
pub fn resolve(frame: &FrameRecord, mode: OutputMode) -> Option<CropPlan> {
    let [x, y, a, b] = frame.rect;
    let (width, height) = if frame.rotated { (b, a) } else { (a, b) };

    if width < 4 && height < 4 {
        return None;
    }

    let paste = match mode {
        OutputMode::CroppedOnly => None,
        OutputMode::FullCanvas => {
            let (ox, oy) = frame.offset;
            let (offset_x, offset_y, flip) = if frame.rotated {
                (oy, ox, 1)
            } else {
                (ox, oy, -1)
            };
            let (real_width, real_height) = frame.source_size;
            Some(PastePlan {
                canvas_width: real_width,
                canvas_height: real_height,
                x: (real_width - width) / 2 + offset_x,
                y: (real_height - height) / 2 + offset_y * flip,
            })
        }
    };

    Some(CropPlan {
        x,
        y,
        width,
        height,
        rotated: frame.rotated,
        paste,
    })
}
