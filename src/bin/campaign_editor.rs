use std::path::Path;

use anyhow::{bail, Context};
use tiled_campaign_editor::door::link_file_name;
use tiled_campaign_editor::{door_ids_of, door_links_of, link_door, unlink_door, EditorConfig, ErrorKind, MapManifest};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  campaign_editor doors <map.json>
  campaign_editor link <src-map.json> <src-door-id> <dest-map.json> <dest-door-id>
  campaign_editor unlink <map.json> <door-id>
  campaign_editor manifest <campaign.json> list|package|add <map>|remove <map>|front <map>";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EditorConfig::from_env().context("Loading editor config")?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["doors", map] => doors(&config, map),
        ["link", src, src_id, dest, dest_id] => {
            let src_id: u32 = src_id.parse().context("Source door id must be a number")?;
            let dest_id: u32 = dest_id.parse().context("Destination door id must be a number")?;
            let dest_doors = door_ids_of(dest, &config).with_context(|| format!("Reading doors of {dest}"))?;
            if !dest_doors.contains(&dest_id) {
                bail!("{dest} has no door {dest_id} (doors: {dest_doors:?})");
            }
            let dest_name = link_file_name(Path::new(dest)).context("Destination map has no file name")?;
            let link = link_door(src, &config, src_id, &dest_name, dest_id)
                .with_context(|| format!("Linking door {src_id} of {src}"))?;
            println!("{src}#{src_id} -> {link}");
            Ok(())
        }
        ["unlink", map, id] => {
            let id: u32 = id.parse().context("Door id must be a number")?;
            unlink_door(map, &config, id).with_context(|| format!("Unlinking door {id} of {map}"))?;
            Ok(())
        }
        ["manifest", file, rest @ ..] => manifest(file, rest),
        _ => bail!(USAGE),
    }
}

fn doors(config: &EditorConfig, map: &str) -> anyhow::Result<()> {
    for (id, link) in door_links_of(map, config).with_context(|| format!("Reading doors of {map}"))? {
        match link {
            Some(link) => println!("{id}\t-> {}#{}", link.map_file, link.door_id),
            None => println!("{id}\t(unlinked)"),
        }
    }
    Ok(())
}

fn manifest(file: &str, rest: &[&str]) -> anyhow::Result<()> {
    let mut manifest = match MapManifest::from_file(file) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => MapManifest::new(),
        Err(e) => return Err(e).with_context(|| format!("Reading manifest {file}")),
    };

    match rest {
        ["list"] => {
            for entry in manifest.entries() {
                println!("{entry}");
            }
            return Ok(());
        }
        ["package"] => {
            let base = Path::new(file).parent().unwrap_or(Path::new("."));
            for path in manifest.write_for_packaging(file, base)? {
                println!("{}", path.display());
            }
            return Ok(());
        }
        ["add", map] => manifest.append(*map)?,
        ["remove", map] => manifest.remove(map)?,
        ["front", map] => manifest.move_to_front(map)?,
        _ => bail!(USAGE),
    }
    manifest.save(file).with_context(|| format!("Writing manifest {file}"))?;
    Ok(())
}
