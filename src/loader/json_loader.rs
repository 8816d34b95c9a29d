use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::MapError;
use crate::loader::atlas::AtlasDecoder;
use crate::tiled_map::TiledMap;
use crate::tileset::{ResolvedTileset, Tileset};

/// A map ready for rendering: the document, its resolved tilesets and one
/// decoded atlas per tileset, keyed by `first_gid`.
#[derive(Debug)]
pub struct LoadedMap<H> {
    pub path: PathBuf,
    pub map: TiledMap,
    pub atlases: HashMap<u32, H>,
}

impl<H> LoadedMap<H> {
    pub fn atlas(&self, first_gid: u32) -> Option<&H> {
        self.atlases.get(&first_gid)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, MapError> {
    let txt = std::fs::read_to_string(path).map_err(|e| MapError::read(path, e))?;
    tracing::debug!(path = %path.display(), bytes = txt.len(), "read document");
    serde_json::from_str(&txt).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn map_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"))
}

/// Parses a map and its tilesets without decoding any image.
///
/// Tileset `source` paths resolve against `base_dir`, or against the map's
/// own directory when `base_dir` is `None`.
pub fn load_map_only(path: impl AsRef<Path>, base_dir: Option<&Path>) -> Result<TiledMap, MapError> {
    let p = path.as_ref();
    if p.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(MapError::InvalidMap(format!(
            "Map file must be a JSON file: {}",
            p.display()
        )));
    }

    let mut map: TiledMap = read_json(p)?;
    map.validate()?;

    let base = base_dir.map(Path::to_path_buf).unwrap_or_else(|| map_dir(p));

    let mut resolved = Vec::with_capacity(map.tilesets.len());
    for ts in &map.tilesets {
        if !ts.source.ends_with(".json") {
            return Err(MapError::InvalidMap(format!(
                "External tileset must be JSON: {}",
                ts.source
            )));
        }
        let ts_path = base.join(&ts.source);
        let tileset: Tileset = read_json(&ts_path)?;
        tileset.validate(&ts_path)?;
        resolved.push(ResolvedTileset::new(ts.first_gid, ts_path, tileset));
    }
    map.resolved = resolved;

    tracing::debug!(
        path = %p.display(),
        layers = map.layers.len(),
        tilesets = map.resolved.len(),
        "parsed map"
    );
    Ok(map)
}

/// Parses a map, its tilesets, and decodes every atlas through `decoder`.
pub fn load_map<D: AtlasDecoder>(
    path: impl AsRef<Path>,
    base_dir: Option<&Path>,
    decoder: &mut D,
) -> Result<LoadedMap<D::Handle>, MapError> {
    let p = path.as_ref();
    let map = load_map_only(p, base_dir)?;

    let mut atlases = HashMap::with_capacity(map.resolved.len());
    for ts in &map.resolved {
        let handle = decoder.decode(&ts.atlas_path())?;
        atlases.insert(ts.first_gid, handle);
    }

    Ok(LoadedMap {
        path: p.to_path_buf(),
        map,
        atlases,
    })
}

/// Writes the map document back, pretty-printed, replacing the file.
/// Derived tileset data is never written.
pub fn save_map(path: impl AsRef<Path>, map: &TiledMap) -> Result<(), MapError> {
    let p = path.as_ref();
    let txt = serde_json::to_string_pretty(map).map_err(|source| MapError::Json {
        path: p.to_path_buf(),
        source,
    })?;
    std::fs::write(p, txt).map_err(|source| MapError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %p.display(), "saved map");
    Ok(())
}
