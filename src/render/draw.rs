use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use macroquad::color::{Color, WHITE};
use macroquad::math::{vec2, Affine2};
use macroquad::shapes::draw_rectangle_lines;
use macroquad::texture::{draw_texture_ex, DrawTextureParams, Texture2D};

use super::frame::{Frame, InteractiveRegion};

const SELECTION_COLOR: Color = Color::new(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0, 1.0);

/// A flip transform expressed as the flip and rotation parameters
/// `draw_texture_ex` understands. Rotation pivots on the destination centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub flip_x: bool,
    pub flip_y: bool,
    pub rotation: f32,
}

/// Splits the linear part of a flip transform into mirror flags followed by
/// a quarter turn. Only the eight axis-aligned orientations are expected.
pub fn orientation(t: Affine2) -> Orientation {
    let m = t.matrix2;
    if m.x_axis.x.abs() >= m.x_axis.y.abs() {
        Orientation {
            flip_x: m.x_axis.x < 0.0,
            flip_y: m.y_axis.y < 0.0,
            rotation: 0.0,
        }
    } else {
        // rot(90) * diag(fx, fy) = [[0, -fy], [fx, 0]]
        Orientation {
            flip_x: m.x_axis.y < 0.0,
            flip_y: m.y_axis.x > 0.0,
            rotation: FRAC_PI_2,
        }
    }
}

/// Draws every op of `frame`. Ops whose atlas is missing are skipped.
///
/// Diagonal flips on non-square cells turn about the cell centre.
pub fn draw_frame(frame: &Frame, atlases: &HashMap<u32, Texture2D>) {
    for op in &frame.draw_ops {
        let Some(tex) = atlases.get(&op.atlas) else {
            continue;
        };
        let o = orientation(op.transform);

        draw_texture_ex(
            tex,
            op.dest.x,
            op.dest.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(op.dest.w, op.dest.h)),
                source: Some(op.source),
                rotation: o.rotation,
                flip_x: o.flip_x,
                flip_y: o.flip_y,
                ..Default::default()
            },
        );
    }
}

/// Outlines the selected region.
pub fn draw_selection(region: &InteractiveRegion) {
    let r = region.rect;
    if r.w > 0.0 && r.h > 0.0 {
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, SELECTION_COLOR);
    }
}
