use std::path::Path;

use macroquad::math::Vec2;

use crate::config::EditorConfig;
use crate::door::{self, DoorLink};
use crate::error::MapError;
use crate::loader::atlas::AtlasDecoder;
use crate::loader::json_loader::{load_map, LoadedMap};
use crate::render::{build_frame, Frame, InteractiveRegion, Selection};

/// The map currently on display, with the regions of its last frame and the
/// user's selection.
///
/// All state is owned here and changed only through these methods.
pub struct MapSession<D: AtlasDecoder> {
    decoder: D,
    config: EditorConfig,
    current: Option<LoadedMap<D::Handle>>,
    regions: Vec<InteractiveRegion>,
    selection: Selection,
}

impl<D: AtlasDecoder> MapSession<D> {
    pub fn new(decoder: D, config: EditorConfig) -> Self {
        Self {
            decoder,
            config,
            current: None,
            regions: Vec::new(),
            selection: Selection::default(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn current(&self) -> Option<&LoadedMap<D::Handle>> {
        self.current.as_ref()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|m| m.path.as_path())
    }

    /// Shows the map at `path`.
    ///
    /// Loading the path already on display does nothing. An empty path
    /// clears the session. A failed load keeps whatever was shown before.
    pub fn load(&mut self, path: &str) -> Result<Option<&LoadedMap<D::Handle>>, MapError> {
        if path.is_empty() {
            self.clear();
            return Ok(None);
        }
        if self.current_path() == Some(Path::new(path)) {
            return Ok(self.current.as_ref());
        }
        self.replace(path)
    }

    /// Loads `path` again even if it is already on display.
    pub fn reload(&mut self) -> Result<Option<&LoadedMap<D::Handle>>, MapError> {
        match self.current.as_ref().map(|m| m.path.clone()) {
            Some(path) => self.replace(path),
            None => Ok(None),
        }
    }

    fn replace(&mut self, path: impl AsRef<Path>) -> Result<Option<&LoadedMap<D::Handle>>, MapError> {
        let loaded = load_map(path.as_ref(), self.config.base_dir.as_deref(), &mut self.decoder)?;
        tracing::info!(path = %loaded.path.display(), "map loaded");
        self.regions.clear();
        self.selection.clear();
        self.current = Some(loaded);
        Ok(self.current.as_ref())
    }

    /// Drops the current map, its regions and the selection.
    pub fn clear(&mut self) {
        self.current = None;
        self.regions.clear();
        self.selection.clear();
    }

    /// Builds a frame for the current map and keeps its regions for hit-testing.
    pub fn build_frame(&mut self) -> Result<Frame, MapError> {
        let Some(loaded) = self.current.as_ref() else {
            self.regions.clear();
            return Ok(Frame::default());
        };
        let frame = build_frame(&loaded.map, &self.config.frame_options())?;
        self.regions = frame.regions.clone();
        Ok(frame)
    }

    pub fn regions(&self) -> &[InteractiveRegion] {
        &self.regions
    }

    /// Selects the region under `point` in frame coordinates.
    pub fn click(&mut self, point: Vec2) -> Option<&InteractiveRegion> {
        self.selection.update(point, &self.regions)
    }

    pub fn selection(&self) -> Option<&InteractiveRegion> {
        self.selection.get()
    }

    /// Links a door and reloads the displayed map when it is the one edited.
    pub fn link_door(
        &mut self,
        source_map: &str,
        source_door_id: u32,
        dest_map_file: &str,
        dest_door_id: u32,
    ) -> Result<DoorLink, MapError> {
        let link = door::link_door(source_map, &self.config, source_door_id, dest_map_file, dest_door_id)?;
        if self.current_path() == Some(Path::new(source_map)) {
            self.reload()?;
        }
        Ok(link)
    }
}
