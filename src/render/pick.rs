use macroquad::math::Vec2;

use super::frame::InteractiveRegion;

impl InteractiveRegion {
    /// Open-interval containment: points on an edge are outside.
    pub fn contains(&self, p: Vec2) -> bool {
        let r = &self.rect;
        p.x > r.x && p.x < r.x + r.w && p.y > r.y && p.y < r.y + r.h
    }
}

/// Region under `point`; when regions overlap the last one wins.
pub fn pick(point: Vec2, regions: &[InteractiveRegion]) -> Option<&InteractiveRegion> {
    regions.iter().rev().find(|r| r.contains(point))
}

/// The currently selected region, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    current: Option<InteractiveRegion>,
}

impl Selection {
    /// Selects the region under `point`, or clears the selection on a miss.
    pub fn update(&mut self, point: Vec2, regions: &[InteractiveRegion]) -> Option<&InteractiveRegion> {
        self.current = pick(point, regions).cloned();
        self.current.as_ref()
    }

    pub fn get(&self) -> Option<&InteractiveRegion> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
