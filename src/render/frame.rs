use macroquad::math::{vec2, Affine2, Rect};

use crate::config::FrameOptions;
use crate::error::MapError;
use crate::spatial::{atlas_rect, transform_for, TileId};
use crate::tiled_map::{Layer, TiledMap};

/// One textured quad: `source` in the atlas keyed by `atlas` (the owning
/// tileset's `first_gid`), drawn at `dest` under `transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub atlas: u32,
    pub source: Rect,
    pub dest: Rect,
    pub transform: Affine2,
}

/// A selectable screen-space rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveRegion {
    /// Lower-cased tile type, or the door region tag for door objects.
    pub tag: String,
    /// Global tile id for tiles, object id for doors.
    pub id: u32,
    pub rect: Rect,
}

/// Output of one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub draw_ops: Vec<DrawOp>,
    pub regions: Vec<InteractiveRegion>,
}

/// Walks every layer in declaration order and collects draw ops and
/// interactive regions. Holds no state between calls.
pub fn build_frame(map: &TiledMap, opts: &FrameOptions) -> Result<Frame, MapError> {
    let mut frame = Frame::default();
    let scale = opts.scale;
    let tw = map.tile_width as f32;
    let th = map.tile_height as f32;
    let width = map.width.max(1) as usize;

    for layer in &map.layers {
        match layer {
            Layer::Tiles(tiles) => {
                for (idx, &raw) in tiles.data.iter().enumerate() {
                    let id = TileId(raw);
                    if id.is_empty() {
                        continue;
                    }
                    let gid = id.clean();
                    let tile = map.resolve(gid)?;

                    let col = (idx % width) as f32;
                    let row = (idx / width) as f32;
                    let pos = vec2(col * tw, row * th);
                    let dest = Rect::new(pos.x * scale, pos.y * scale, tw * scale, th * scale);

                    frame.draw_ops.push(DrawOp {
                        atlas: tile.tileset.first_gid,
                        source: atlas_rect(&tile, map.tile_width, map.tile_height),
                        dest,
                        transform: transform_for(id.flags(), pos, scale, tw, th),
                    });

                    if let Some(tag) = tile.tileset.tileset.tile_tag(tile.local_id, &opts.excluded_tags) {
                        frame.regions.push(InteractiveRegion { tag, id: gid, rect: dest });
                    }
                }
            }
            Layer::Objects(objects) => {
                for obj in objects.objects.iter().filter(|o| o.is_tagged(&opts.door_tag)) {
                    frame.regions.push(InteractiveRegion {
                        tag: opts.door_region_tag.clone(),
                        id: obj.id,
                        rect: Rect::new(
                            obj.x as f32 * scale,
                            obj.y as f32 * scale,
                            obj.width as f32 * scale,
                            obj.height as f32 * scale,
                        ),
                    });
                }
            }
        }
    }

    tracing::trace!(
        ops = frame.draw_ops.len(),
        regions = frame.regions.len(),
        "built frame"
    );
    Ok(frame)
}
