// Fixture campaign written into a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tiled_campaign_editor::{AtlasDecoder, MapError};

pub const DUNGEON_TILESET: &str = r#"{
  "name": "dungeon",
  "image": "dungeon.png",
  "imagewidth": 80,
  "imageheight": 32,
  "tilewidth": 16,
  "tileheight": 16,
  "tilecount": 10,
  "margin": 0,
  "spacing": 0,
  "tiles": [
    {"id": 1, "type": "wall"},
    {"id": 4, "type": "Chest"}
  ]
}"#;

pub const CAVE_MAP: &str = r#"{
  "compressionlevel": -1,
  "width": 2,
  "height": 1,
  "tilewidth": 16,
  "tileheight": 16,
  "infinite": false,
  "orientation": "orthogonal",
  "renderorder": "right-down",
  "tiledversion": "1.8.2",
  "version": "1.8",
  "nextobjectid": 9,
  "layers": [
    {"type": "tilelayer", "id": 1, "name": "ground", "width": 2, "height": 1,
     "opacity": 1, "visible": true, "x": 0, "y": 0, "data": [0, 5]},
    {"type": "objectgroup", "id": 2, "name": "doors", "draworder": "topdown",
     "opacity": 1, "visible": true, "x": 0, "y": 0,
     "objects": [
       {"id": 7, "name": "exit", "type": "door", "x": 16, "y": 0,
        "width": 16, "height": 16, "rotation": 0, "visible": true},
       {"id": 8, "name": "sign", "type": "doorway-sign", "x": 0, "y": 0,
        "width": 8, "height": 8, "rotation": 0, "visible": true}
     ]},
    {"type": "objectgroup", "id": 3, "name": "props",
     "objects": [
       {"id": 2, "name": "chest", "type": "chest", "x": 0, "y": 0, "width": 16, "height": 16},
       {"id": 5, "name": "gate", "type": "DOOR_MAIN", "x": 0, "y": 0, "width": 16, "height": 16}
     ]}
  ],
  "tilesets": [{"firstgid": 1, "source": "dungeon.json"}]
}"#;

pub const TOWN_MAP: &str = r#"{
  "width": 1,
  "height": 1,
  "tilewidth": 16,
  "tileheight": 16,
  "layers": [
    {"type": "tilelayer", "name": "ground", "data": [1]},
    {"type": "objectgroup", "name": "doors", "objects": [
      {"id": 3, "name": "gate", "type": "Door", "x": 0, "y": 0, "width": 16, "height": 16}
    ]}
  ],
  "tilesets": [{"firstgid": 1, "source": "dungeon.json"}]
}"#;

pub struct Campaign {
    pub dir: TempDir,
}

impl Campaign {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("dungeon.json"), DUNGEON_TILESET).unwrap();
        fs::write(dir.path().join("cave.json"), CAVE_MAP).unwrap();
        fs::write(dir.path().join("town.json"), TOWN_MAP).unwrap();
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn path_str(&self, name: &str) -> String {
        self.path(name).to_string_lossy().into_owned()
    }
}

/// Hands back the atlas path instead of decoding it.
#[derive(Default)]
pub struct CountingDecoder {
    pub decoded: usize,
}

impl AtlasDecoder for CountingDecoder {
    type Handle = PathBuf;

    fn decode(&mut self, path: &Path) -> Result<PathBuf, MapError> {
        self.decoded += 1;
        Ok(path.to_path_buf())
    }
}
