use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "CAMPAIGN_EDITOR_CONFIG";

/// Editor settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Multiplier applied to tile pixel sizes when building a frame.
    pub render_scale: f32,
    /// Directory tileset `source` paths are resolved against.
    /// `None` resolves them against the map file's own directory.
    pub base_dir: Option<PathBuf>,
    /// Tile types that never produce an interactive region.
    pub excluded_tags: Vec<String>,
    /// Substring (case-insensitive) that marks an object as a door.
    pub door_tag: String,
    /// Region tag reported for door objects.
    pub door_region_tag: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            render_scale: 2.0,
            base_dir: None,
            excluded_tags: vec!["wall".to_owned()],
            door_tag: "door".to_owned(),
            door_region_tag: "Door".to_owned(),
        }
    }
}

impl EditorConfig {
    /// Reads a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path).map_err(|e| MapError::read(path, e))?;
        serde_json::from_str(&txt).map_err(|source| MapError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads the file named by [`CONFIG_ENV`], or returns the defaults when unset.
    pub fn from_env() -> Result<Self, MapError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                tracing::debug!(path = ?path, "loading editor config");
                Self::from_file(PathBuf::from(path))
            }
            None => Ok(Self::default()),
        }
    }

    /// The part of the config the render-pass builder consumes.
    pub fn frame_options(&self) -> FrameOptions {
        FrameOptions {
            scale: self.render_scale,
            excluded_tags: self.excluded_tags.clone(),
            door_tag: self.door_tag.clone(),
            door_region_tag: self.door_region_tag.clone(),
        }
    }
}

/// Parameters of a single render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOptions {
    /// Render scale applied to every destination rectangle.
    pub scale: f32,
    /// Tile types skipped when collecting interactive regions.
    pub excluded_tags: Vec<String>,
    /// Lower-case substring identifying door objects.
    pub door_tag: String,
    /// Tag attached to door regions.
    pub door_region_tag: String,
}

impl Default for FrameOptions {
    fn default() -> Self {
        EditorConfig::default().frame_options()
    }
}

impl FrameOptions {
    /// Defaults with a different render scale.
    pub fn with_scale(scale: f32) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }
}
