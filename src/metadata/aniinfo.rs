use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::DespriteError;

/// One animation: playback rate plus ordered indices into the shared
/// frame-name list.
#[derive(Debug, Clone, Deserialize)]
pub struct Animation {
    #[serde(default, rename = "FPS")]
    pub fps: f64,
    #[serde(default, rename = "FrameList")]
    pub frame_list: Vec<i64>,
}

/// Parsed `_aniinfo` plist: animation name -> frame index sequence, plus
/// the frame-name list those indices point into.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimationIndex {
    #[serde(rename = "animationlist")]
    pub animations: BTreeMap<String, Animation>,
    #[serde(rename = "framelist")]
    pub frame_list: Vec<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub texture: String,
}

pub fn decode_aniinfo(bytes: &[u8]) -> Result<AnimationIndex, DespriteError> {
    plist::from_bytes(bytes).map_err(DespriteError::from)
}
