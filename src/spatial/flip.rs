use macroquad::math::{vec2, Affine2, Vec2};

use super::gid::FlipFlags;

/// One elementary flip about a cell's own axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipStep {
    /// Transpose about the cell's diagonal.
    Diagonal,
    /// Mirror about the vertical centerline.
    Horizontal,
    /// Mirror about the horizontal centerline.
    Vertical,
}

/// Order in which set flags are applied; matches the authoring tool.
pub const FLIP_ORDER: [FlipStep; 3] = [FlipStep::Diagonal, FlipStep::Horizontal, FlipStep::Vertical];

impl FlipStep {
    pub fn flag(self) -> FlipFlags {
        match self {
            FlipStep::Diagonal => FlipFlags::DIAGONAL,
            FlipStep::Horizontal => FlipFlags::HORIZONTAL,
            FlipStep::Vertical => FlipFlags::VERTICAL,
        }
    }

    /// The step as an affine map in scaled screen space. `pos` is the cell's
    /// unscaled pixel position.
    pub fn affine(self, pos: Vec2, scale: f32, tile_w: f32, tile_h: f32) -> Affine2 {
        match self {
            FlipStep::Diagonal => Affine2::from_cols(
                vec2(0.0, 1.0),
                vec2(1.0, 0.0),
                vec2(scale * (pos.x - pos.y), scale * (pos.y - pos.x)),
            ),
            FlipStep::Horizontal => Affine2::from_cols(
                vec2(-1.0, 0.0),
                vec2(0.0, 1.0),
                vec2(2.0 * scale * pos.x + scale * tile_w, 0.0),
            ),
            FlipStep::Vertical => Affine2::from_cols(
                vec2(1.0, 0.0),
                vec2(0.0, -1.0),
                vec2(0.0, 2.0 * scale * pos.y + scale * tile_h),
            ),
        }
    }

    /// Applies `steps` in sequence, each one after everything before it.
    pub fn compose(steps: &[FlipStep], pos: Vec2, scale: f32, tile_w: f32, tile_h: f32) -> Affine2 {
        steps.iter().fold(Affine2::IDENTITY, |acc, step| {
            step.affine(pos, scale, tile_w, tile_h) * acc
        })
    }
}

/// Transform that draws a cell with `flags` correctly oriented.
pub fn transform_for(flags: FlipFlags, pos: Vec2, scale: f32, tile_w: f32, tile_h: f32) -> Affine2 {
    let steps: Vec<FlipStep> = FLIP_ORDER
        .iter()
        .copied()
        .filter(|step| flags.contains(step.flag()))
        .collect();
    FlipStep::compose(&steps, pos, scale, tile_w, tile_h)
}
