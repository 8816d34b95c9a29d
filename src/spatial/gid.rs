use bitflags::bitflags;

use crate::error::MapError;
use crate::tileset::ResolvedTileset;

pub const FLIP_H: u32 = 0x8000_0000; // bit 31
pub const FLIP_V: u32 = 0x4000_0000; // bit 30
pub const FLIP_D: u32 = 0x2000_0000; // bit 29
pub const GID_MASK: u32 = 0x1FFF_FFFF; // low 29 bits

bitflags! {
    /// Flip bits carried in the top of a raw cell value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FlipFlags: u32 {
        const HORIZONTAL = FLIP_H;
        const VERTICAL   = FLIP_V;
        const DIAGONAL   = FLIP_D;
    }
}

/// Raw cell value as stored in a tile layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

impl TileId {
    #[inline] pub fn raw(self) -> u32 { self.0 }
    #[inline] pub fn clean(self) -> u32 { self.0 & GID_MASK }
    #[inline] pub fn flags(self) -> FlipFlags { FlipFlags::from_bits_truncate(self.0) }
    #[inline] pub fn is_empty(self) -> bool { self.clean() == 0 }
}

/// A global id bound to the tileset that owns it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTile<'m> {
    pub gid: u32,
    pub local_id: u32,
    pub tileset: &'m ResolvedTileset,
}

/// Owner of `gid` is the tileset with the largest `first_gid <= gid`,
/// whatever order the tilesets were declared in. A gid past the owner's
/// `tilecount` belongs to no tile. A tileset without a `tilecount` has no
/// upper bound.
pub fn resolve(tilesets: &[ResolvedTileset], gid: u32) -> Result<ResolvedTile<'_>, MapError> {
    if gid == 0 {
        return Err(MapError::UnresolvedGid { gid });
    }
    let owner = tilesets
        .iter()
        .filter(|ts| ts.first_gid <= gid)
        .max_by_key(|ts| ts.first_gid)
        .ok_or(MapError::UnresolvedGid { gid })?;

    let local_id = gid - owner.first_gid;
    let count = owner.tileset.tile_count;
    if count > 0 && local_id >= count {
        return Err(MapError::UnresolvedGid { gid });
    }
    Ok(ResolvedTile {
        gid,
        local_id,
        tileset: owner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tileset::Tileset;
    use std::path::PathBuf;

    fn ts(first_gid: u32) -> ResolvedTileset {
        let tileset: Tileset = serde_json::from_value(serde_json::json!({
            "image": "a.png", "imagewidth": 64, "imageheight": 64,
            "tilewidth": 16, "tileheight": 16, "tilecount": 16
        }))
        .unwrap();
        ResolvedTileset::new(first_gid, PathBuf::from(format!("ts{first_gid}.json")), tileset)
    }

    #[test]
    fn greatest_first_gid_wins_regardless_of_declaration_order() {
        let sets = vec![ts(41), ts(1), ts(17)];
        for (gid, owner, local) in [(1, 1, 0), (16, 1, 15), (17, 17, 0), (32, 17, 15), (41, 41, 0), (56, 41, 15)] {
            let r = resolve(&sets, gid).unwrap();
            assert_eq!(r.tileset.first_gid, owner, "gid {gid}");
            assert_eq!(r.local_id, local, "gid {gid}");
        }
    }

    #[test]
    fn below_every_range_is_a_resolution_error() {
        let sets = vec![ts(5)];
        assert!(matches!(resolve(&sets, 4), Err(MapError::UnresolvedGid { gid: 4 })));
        assert!(matches!(resolve(&sets, 0), Err(MapError::UnresolvedGid { gid: 0 })));
        assert!(resolve(&[], 1).is_err());
    }

    #[test]
    fn gid_past_tilecount_is_unresolved() {
        // each fixture tileset holds 16 tiles
        let sets = vec![ts(1), ts(41)];
        assert_eq!(resolve(&sets, 16).unwrap().local_id, 15);
        assert!(matches!(resolve(&sets, 17), Err(MapError::UnresolvedGid { gid: 17 })));
        assert!(resolve(&sets, 40).is_err());
        assert!(matches!(resolve(&sets, GID_MASK), Err(MapError::UnresolvedGid { .. })));
    }

    #[test]
    fn missing_tilecount_leaves_range_open() {
        let mut open = ts(1);
        open.tileset.tile_count = 0;
        assert_eq!(resolve(&[open], 500).unwrap().local_id, 499);
    }

    #[test]
    fn stripping_flags_is_idempotent() {
        let sets = vec![ts(1), ts(17)];
        let raw = TileId(FLIP_H | FLIP_D | 20);
        let once = TileId(raw.clean());
        assert_eq!(once.clean(), TileId(once.clean()).clean());
        let a = resolve(&sets, once.clean()).unwrap();
        let b = resolve(&sets, TileId(once.clean()).clean()).unwrap();
        assert_eq!((a.gid, a.local_id, a.tileset.first_gid), (b.gid, b.local_id, b.tileset.first_gid));
    }

    #[test]
    fn all_flags_can_combine() {
        let id = TileId(FLIP_H | FLIP_V | FLIP_D | 5);
        assert_eq!(id.clean(), 5);
        assert_eq!(id.flags(), FlipFlags::all());
        assert!(TileId(FLIP_V).is_empty());
    }
}
