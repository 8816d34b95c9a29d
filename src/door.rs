//! Cross-map door links.
//!
//! A door object's `type` holds either its bare tag (`door`) or, once linked,
//! `tag:mapFile:doorId`. There is no separate link table.

use std::fmt;
use std::path::Path;

use crate::config::EditorConfig;
use crate::error::MapError;
use crate::loader::json_loader::{load_map_only, save_map};

const SEP: char = ':';

/// A parsed `tag:mapFile:doorId` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorLink {
    pub tag: String,
    pub map_file: String,
    pub door_id: u32,
}

impl DoorLink {
    pub fn new(tag: impl Into<String>, map_file: impl Into<String>, door_id: u32) -> Self {
        Self {
            tag: tag.into(),
            map_file: map_file.into(),
            door_id,
        }
    }

    /// Parses a linked door type. Returns `None` for a bare or malformed tag.
    pub fn parse(kind: &str) -> Option<Self> {
        let mut parts = kind.splitn(3, SEP);
        let tag = parts.next()?;
        let map_file = parts.next()?;
        let door_id = parts.next()?.parse().ok()?;
        if tag.is_empty() || map_file.is_empty() {
            return None;
        }
        Some(Self::new(tag, map_file, door_id))
    }
}

impl fmt::Display for DoorLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEP}{}{SEP}{}", self.tag, self.map_file, self.door_id)
    }
}

/// The tag of a door type with any link stripped.
pub fn base_tag(kind: &str) -> &str {
    kind.split(SEP).next().unwrap_or(kind)
}

/// Links door `source_door_id` of the map at `source_map` to door
/// `dest_door_id` of `dest_map_file`, then saves the source map.
///
/// The link is rebuilt from the door's base tag, so linking an already
/// linked door replaces its previous link.
pub fn link_door(
    source_map: impl AsRef<Path>,
    cfg: &EditorConfig,
    source_door_id: u32,
    dest_map_file: &str,
    dest_door_id: u32,
) -> Result<DoorLink, MapError> {
    let path = source_map.as_ref();
    let mut map = load_map_only(path, cfg.base_dir.as_deref())?;

    let door = map
        .object_mut(source_door_id)
        .ok_or_else(|| MapError::ObjectNotFound {
            path: path.to_path_buf(),
            object_id: source_door_id,
        })?;

    let link = DoorLink::new(base_tag(&door.kind), dest_map_file, dest_door_id);
    if DoorLink::parse(&door.kind).is_some() {
        tracing::warn!(door = source_door_id, previous = %door.kind, "replacing existing door link");
    }
    door.kind = link.to_string();

    save_map(path, &map)?;
    tracing::info!(map = %path.display(), door = source_door_id, link = %link, "linked door");
    Ok(link)
}

/// Restores door `door_id` to its bare tag and saves the map.
pub fn unlink_door(map_path: impl AsRef<Path>, cfg: &EditorConfig, door_id: u32) -> Result<(), MapError> {
    let path = map_path.as_ref();
    let mut map = load_map_only(path, cfg.base_dir.as_deref())?;

    let door = map.object_mut(door_id).ok_or_else(|| MapError::ObjectNotFound {
        path: path.to_path_buf(),
        object_id: door_id,
    })?;
    door.kind = base_tag(&door.kind).to_owned();

    save_map(path, &map)?;
    tracing::info!(map = %path.display(), door = door_id, "unlinked door");
    Ok(())
}

/// Ids of every object whose type contains the door tag (any case), in
/// layer-then-object order.
pub fn door_ids_of(map_path: impl AsRef<Path>, cfg: &EditorConfig) -> Result<Vec<u32>, MapError> {
    Ok(door_links_of(map_path, cfg)?
        .into_iter()
        .map(|(id, _)| id)
        .collect())
}

/// Every door with its current link, if any.
pub fn door_links_of(
    map_path: impl AsRef<Path>,
    cfg: &EditorConfig,
) -> Result<Vec<(u32, Option<DoorLink>)>, MapError> {
    let map = load_map_only(map_path, cfg.base_dir.as_deref())?;
    Ok(map
        .objects()
        .filter(|o| o.is_tagged(&cfg.door_tag))
        .map(|o| (o.id, DoorLink::parse(&o.kind)))
        .collect())
}

/// File name under which a map is referenced from a door link.
pub fn link_file_name(map_path: &Path) -> Option<String> {
    map_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_encodes_links() {
        let link = DoorLink::parse("door:town.json:3").unwrap();
        assert_eq!(link, DoorLink::new("door", "town.json", 3));
        assert_eq!(link.to_string(), "door:town.json:3");
    }

    #[test]
    fn bare_and_broken_tags_are_not_links() {
        assert_eq!(DoorLink::parse("door"), None);
        assert_eq!(DoorLink::parse("door:town.json"), None);
        assert_eq!(DoorLink::parse("door:town.json:x"), None);
        assert_eq!(DoorLink::parse(":town.json:3"), None);
        // the result of appending twice
        assert_eq!(DoorLink::parse("door:a.json:1:b.json:2"), None);
    }

    #[test]
    fn base_tag_drops_link() {
        assert_eq!(base_tag("door:town.json:3"), "door");
        assert_eq!(base_tag("Door"), "Door");
        assert_eq!(base_tag(""), "");
    }

    #[test]
    fn link_file_name_is_the_last_component() {
        assert_eq!(
            link_file_name(Path::new("Adventure/Maps/town.json")).as_deref(),
            Some("town.json")
        );
    }
}
