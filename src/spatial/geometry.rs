use macroquad::math::Rect;

use crate::error::MapError;
use crate::spatial::gid::ResolvedTile;
use crate::tiled_map::TiledMap;

/// Atlas-space rectangle of a (flag-free) global id.
///
/// Columns and rows step by the tileset's tile size; the rectangle takes the
/// map's tile size. Spacing is not applied.
pub fn source_rect(gid: u32, map: &TiledMap) -> Result<Rect, MapError> {
    let tile = map.resolve(gid)?;
    Ok(atlas_rect(&tile, map.tile_width, map.tile_height))
}

pub(crate) fn atlas_rect(tile: &ResolvedTile<'_>, width: u32, height: u32) -> Rect {
    let owner = tile.tileset;
    let ts = &owner.tileset;

    let columns = owner.columns.max(1);
    let col = (tile.local_id % columns) as f32;
    let row = (tile.local_id / columns) as f32;
    let margin = ts.margin as f32;
    let sx = col * ts.tile_width as f32 + margin;
    let sy = row * ts.tile_height as f32 + margin;

    Rect::new(sx, sy, width as f32, height as f32)
}
