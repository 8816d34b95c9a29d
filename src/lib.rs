#![warn(missing_docs)]

//! Tiled JSON map engine for an RPG campaign editor: loading, per-frame draw
//! lists, hit-testing and cross-map door links.

mod config;
pub mod door;
mod error;
pub mod loader {
    //! Map and tileset documents, atlas decoding and saving.
    pub mod atlas;
    pub mod json_loader;
}
pub mod manifest;
mod map;
pub mod render;
pub mod spatial;
mod tiled_map;
mod tileset;

pub use config::{EditorConfig, FrameOptions, CONFIG_ENV};
pub use door::{door_ids_of, door_links_of, link_door, unlink_door, DoorLink};
pub use error::{ErrorKind, MapError};
pub use loader::atlas::{AtlasDecoder, ImageDecoder, TextureDecoder};
pub use loader::json_loader::{load_map, load_map_only, save_map, LoadedMap};
pub use manifest::MapManifest;
pub use map::MapSession;
pub use render::{build_frame, pick, DrawOp, Frame, InteractiveRegion, Selection};
pub use tiled_map::{Layer, ObjectLayer, TileLayer, TileObject, TiledMap, TilesetRef};
pub use tileset::{ResolvedTileset, TileDef, Tileset};
