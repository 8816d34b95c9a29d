//! Tile-id resolution and per-tile geometry.

mod flip;
mod geometry;
mod gid;

pub use flip::{transform_for, FlipStep, FLIP_ORDER};
pub use geometry::source_rect;
pub(crate) use geometry::atlas_rect;
pub use gid::{resolve, FlipFlags, ResolvedTile, TileId, FLIP_D, FLIP_H, FLIP_V, GID_MASK};
