use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MapError;

/// External tileset document: one atlas image sliced into a regular grid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tileset {
    #[serde(default)]
    pub name: String,
    /// Atlas image, relative to the tileset document.
    pub image: String,
    #[serde(rename = "imagewidth")]
    pub image_width: u32,
    #[serde(rename = "imageheight")]
    pub image_height: u32,
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    /// Border around the whole atlas.
    #[serde(default)]
    pub margin: u32,
    /// Gap between tiles. Parsed but not applied to atlas coordinates.
    #[serde(default)]
    pub spacing: u32,
    #[serde(rename = "tilecount", default)]
    pub tile_count: u32,
    #[serde(default)]
    pub tiles: Vec<TileDef>,
}

/// Per-tile metadata keyed by the tileset-local id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TileDef {
    pub id: u32,
    /// Semantic tag such as `door`, `wall` or `chest`.
    #[serde(rename = "type", alias = "class", default)]
    pub kind: Option<String>,
}

impl Tileset {
    /// Number of atlas columns: `floor((imagewidth - 2 * margin) / tilewidth)`.
    pub fn columns(&self) -> u32 {
        if self.tile_width == 0 {
            return 0;
        }
        self.margin
            .checked_mul(2)
            .and_then(|border| self.image_width.checked_sub(border))
            .map_or(0, |inner| inner / self.tile_width)
    }

    pub(crate) fn validate(&self, path: &Path) -> Result<(), MapError> {
        let invalid = |reason: &str| MapError::InvalidTileset {
            path: path.to_path_buf(),
            reason: reason.to_owned(),
        };
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(invalid("tile size must be non-zero"));
        }
        if self.columns() == 0 {
            return Err(invalid("image is narrower than one tile"));
        }
        for def in self.tiles.iter().filter(|t| t.kind.as_deref() == Some("")) {
            tracing::warn!(tileset = %path.display(), tile = def.id, "tile has an empty type and is not selectable");
        }
        Ok(())
    }

    /// Lower-cased semantic tag of a local tile, skipping excluded tags.
    ///
    /// When several definitions share an id, the last one wins.
    pub fn tile_tag(&self, local_id: u32, excluded: &[String]) -> Option<String> {
        self.tiles
            .iter()
            .rev()
            .filter(|t| t.id == local_id)
            .filter_map(|t| t.kind.as_deref())
            .find(|kind| !excluded.iter().any(|ex| ex == kind))
            .filter(|kind| !kind.is_empty())
            .map(str::to_lowercase)
    }
}

/// A tileset bound to the map that references it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTileset {
    pub first_gid: u32,
    /// Resolved path of the tileset document.
    pub path: PathBuf,
    pub columns: u32,
    pub tileset: Tileset,
}

impl ResolvedTileset {
    pub(crate) fn new(first_gid: u32, path: PathBuf, tileset: Tileset) -> Self {
        Self {
            first_gid,
            path,
            columns: tileset.columns(),
            tileset,
        }
    }

    /// Atlas image path: the tileset document's directory joined with its `image`.
    pub fn atlas_path(&self) -> PathBuf {
        self.path
            .parent()
            .map(|dir| dir.join(&self.tileset.image))
            .unwrap_or_else(|| PathBuf::from(&self.tileset.image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tileset(json: &str) -> Tileset {
        serde_json::from_str(json).expect("tileset json")
    }

    const DUNGEON: &str = r#"{
        "name": "dungeon",
        "image": "dungeon.png",
        "imagewidth": 84, "imageheight": 52,
        "tilewidth": 16, "tileheight": 16,
        "margin": 2, "spacing": 0, "tilecount": 15,
        "tiles": [
            {"id": 0, "type": "Wall"},
            {"id": 1, "type": "wall"},
            {"id": 2, "type": "Chest"},
            {"id": 3, "class": "door"},
            {"id": 4, "type": ""},
            {"id": 5, "type": "table"},
            {"id": 5, "type": "Altar"}
        ]
    }"#;

    #[test]
    fn columns_discount_margin() {
        // (84 - 4) / 16
        assert_eq!(tileset(DUNGEON).columns(), 5);
    }

    #[test]
    fn tile_tag_lowercases_and_excludes_exact_matches() {
        let ts = tileset(DUNGEON);
        let excluded = vec!["wall".to_string()];
        assert_eq!(ts.tile_tag(2, &excluded).as_deref(), Some("chest"));
        assert_eq!(ts.tile_tag(1, &excluded), None);
        assert_eq!(ts.tile_tag(0, &excluded).as_deref(), Some("wall"));
        assert_eq!(ts.tile_tag(3, &excluded).as_deref(), Some("door"));
        assert_eq!(ts.tile_tag(4, &excluded), None);
        assert_eq!(ts.tile_tag(9, &excluded), None);
    }

    #[test]
    fn last_definition_wins() {
        let ts = tileset(DUNGEON);
        assert_eq!(ts.tile_tag(5, &[]).as_deref(), Some("altar"));
    }

    #[test]
    fn atlas_path_replaces_document_name() {
        let resolved = ResolvedTileset::new(
            1,
            PathBuf::from("Adventure/Tilesets/dungeon/dungeon.json"),
            tileset(DUNGEON),
        );
        assert_eq!(
            resolved.atlas_path(),
            PathBuf::from("Adventure/Tilesets/dungeon/dungeon.png")
        );
    }

    #[test]
    fn empty_tile_type_does_not_fail_validation() {
        let ts = tileset(DUNGEON);
        assert!(ts.validate(Path::new("dungeon.json")).is_ok());
        assert_eq!(ts.tile_tag(4, &[]), None);
    }

    #[test]
    fn oversized_margin_is_rejected_not_overflowed() {
        let mut ts = tileset(DUNGEON);
        ts.margin = 3_000_000_000;
        assert_eq!(ts.columns(), 0);
        let err = ts.validate(Path::new("wide.json")).unwrap_err();
        assert!(matches!(err, MapError::InvalidTileset { .. }));

        ts.margin = 50;
        assert_eq!(ts.columns(), 0);
    }

    #[test]
    fn zero_width_tiles_are_rejected() {
        let mut ts = tileset(DUNGEON);
        ts.tile_width = 0;
        let err = ts.validate(Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, MapError::InvalidTileset { .. }));
    }
}
