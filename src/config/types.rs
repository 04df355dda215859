use serde::{Deserialize, Serialize};

/// Persisted settings file structure.
///
/// Loaded from `desprite.json` in the working directory; written there with
/// these defaults when the file does not exist yet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DespriteConfig {
    /// Write sprites at their trimmed size instead of restoring the
    /// original untrimmed canvas
    pub crop_sprites: bool,
    /// Regroup extracted frames into per-animation sequences when an
    /// animation list is present
    pub group_by_animation: bool,
    /// Skip the interactive pause before the process exits
    pub close_when_done: bool,
}

impl Default for DespriteConfig {
    fn default() -> Self {
        Self {
            crop_sprites: true,
            group_by_animation: true,
            close_when_done: false,
        }
    }
}
