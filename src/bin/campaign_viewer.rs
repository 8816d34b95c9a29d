use std::path::Path;

use macroquad::prelude::*;
use tiled_campaign_editor::render::draw::{draw_frame, draw_selection};
use tiled_campaign_editor::{EditorConfig, MapManifest, MapSession, TextureDecoder};
use tracing_subscriber::EnvFilter;

fn window_conf() -> Conf {
    Conf {
        window_title: "Campaign Viewer".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

/// Map paths from the command line; `--manifest <file>` expands to its entries.
fn map_list(args: &[String]) -> Result<Vec<String>, String> {
    match args {
        [flag, file] if flag == "--manifest" => {
            let manifest = MapManifest::from_file(file).map_err(|e| e.to_string())?;
            let base = Path::new(file).parent().unwrap_or(Path::new("."));
            Ok(manifest
                .packaging_paths(base)
                .into_iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect())
        }
        [] => Err("usage: campaign_viewer <map.json>... | --manifest <campaign.json>".into()),
        maps => Ok(maps.to_vec()),
    }
}

fn show(session: &mut MapSession<TextureDecoder>, path: &str) -> Option<String> {
    match session.load(path) {
        Ok(_) => None,
        Err(e) => {
            tracing::error!(path, error = %e, "failed to load map");
            Some(e.to_string())
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EditorConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default config");
        EditorConfig::default()
    });
    let args: Vec<String> = std::env::args().skip(1).collect();
    let maps = match map_list(&args) {
        Ok(maps) if !maps.is_empty() => maps,
        Ok(_) => {
            tracing::error!("manifest is empty");
            return;
        }
        Err(e) => {
            tracing::error!("{e}");
            return;
        }
    };

    let mut session = MapSession::new(TextureDecoder, config);
    let mut current = 0usize;
    let mut message = show(&mut session, &maps[current]);

    loop {
        let step = if is_key_pressed(KeyCode::Tab) || is_key_pressed(KeyCode::Right) {
            Some(1)
        } else if is_key_pressed(KeyCode::Left) {
            Some(maps.len() - 1)
        } else {
            None
        };
        if let Some(step) = step {
            current = (current + step) % maps.len();
            message = show(&mut session, &maps[current]);
        }

        clear_background(BLACK);

        match session.build_frame() {
            Ok(frame) => {
                if let Some(loaded) = session.current() {
                    draw_frame(&frame, &loaded.atlases);
                }
            }
            Err(e) => message = Some(e.to_string()),
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            session.click(vec2(x, y));
        }

        if let Some(sel) = session.selection() {
            draw_selection(sel);
            draw_text(&format!("{} #{}", sel.tag, sel.id), 20.0, screen_height() - 20.0, 24.0, WHITE);
        }
        draw_text(&maps[current], 20.0, 30.0, 24.0, WHITE);
        if let Some(msg) = &message {
            draw_text(msg, 20.0, 60.0, 24.0, RED);
        }

        next_frame().await;
    }
}
