use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::MapError;
use crate::spatial::{resolve, ResolvedTile};
use crate::tileset::ResolvedTileset;

/// A parsed map document.
///
/// Fields the editor does not interpret (`orientation`, `renderorder`,
/// `version`, ...) are kept in `extra` so that saving writes them back.
/// `resolved` is rebuilt on every load and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiledMap {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    /// Draw order: array order.
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub tilesets: Vec<TilesetRef>,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
    #[serde(skip)]
    pub(crate) resolved: Vec<ResolvedTileset>,
}

/// A layer is either a grid of tiles or a list of objects, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Layer {
    #[serde(rename = "tilelayer")]
    Tiles(TileLayer),
    #[serde(rename = "objectgroup")]
    Objects(ObjectLayer),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    #[serde(default)]
    pub name: String,
    /// Raw cell values, row-major; flip flags live in the top three bits.
    pub data: Vec<u32>,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectLayer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub objects: Vec<TileObject>,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

/// An object placed on an object layer. Positions are in map pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileObject {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    /// Semantic tag; for linked doors this holds the encoded link.
    /// Tiled 1.9 and later write it as `class`; it is saved back as `type`.
    #[serde(rename = "type", alias = "class", default)]
    pub kind: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

fn default_true() -> bool {
    true
}

/// Reference from a map to an external tileset document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilesetRef {
    #[serde(rename = "firstgid")]
    pub first_gid: u32,
    /// Tileset document path, relative to the tileset base directory.
    pub source: String,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

impl TileObject {
    /// Whether the object's type contains `tag`, ignoring case.
    pub fn is_tagged(&self, tag: &str) -> bool {
        self.kind.to_lowercase().contains(&tag.to_lowercase())
    }
}

impl TiledMap {
    /// Tilesets resolved by the last load, in declaration order.
    pub fn resolved_tilesets(&self) -> &[ResolvedTileset] {
        &self.resolved
    }

    /// Finds the tileset owning `gid` (flip flags must already be cleared).
    pub fn resolve(&self, gid: u32) -> Result<ResolvedTile<'_>, MapError> {
        resolve(&self.resolved, gid)
    }

    /// Number of cells each tile layer must carry.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub(crate) fn validate(&self) -> Result<(), MapError> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(MapError::InvalidMap(format!(
                "tile size must be non-zero, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        let expected = self.cell_count();
        for layer in self.tile_layers() {
            if layer.data.len() != expected {
                return Err(MapError::InvalidLayerSize {
                    layer: layer.name.clone(),
                    expected,
                    actual: layer.data.len(),
                });
            }
        }
        Ok(())
    }

    pub fn tile_layers(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Tiles(t) => Some(t),
            Layer::Objects(_) => None,
        })
    }

    pub fn object_layers(&self) -> impl Iterator<Item = &ObjectLayer> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Objects(o) => Some(o),
            Layer::Tiles(_) => None,
        })
    }

    /// All objects, in layer-then-object declaration order.
    pub fn objects(&self) -> impl Iterator<Item = &TileObject> {
        self.object_layers().flat_map(|l| l.objects.iter())
    }

    /// First object with this id across every object layer.
    pub fn object_mut(&mut self, id: u32) -> Option<&mut TileObject> {
        self.layers
            .iter_mut()
            .filter_map(|l| match l {
                Layer::Objects(o) => Some(o),
                Layer::Tiles(_) => None,
            })
            .flat_map(|l| l.objects.iter_mut())
            .find(|o| o.id == id)
    }
}
