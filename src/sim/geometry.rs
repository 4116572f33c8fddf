//! Distance and containment helpers shared by the simulation
//!
//! Stateless. Positions are scene-space `Vec2`s with y pointing down.

use glam::Vec2;

/// True if `p` lies strictly inside the circle of `radius` around `center`
#[inline]
pub fn within_radius(p: Vec2, center: Vec2, radius: f32) -> bool {
    p.distance_squared(center) < radius * radius
}

/// Project `p` back onto the circle of `max_distance` around `anchor` if it lies outside.
///
/// The angle from the anchor is preserved. Points already inside are returned unchanged.
pub fn clamp_to_radius(p: Vec2, anchor: Vec2, max_distance: f32) -> Vec2 {
    let offset = p - anchor;
    let dist = offset.length();
    if dist > max_distance {
        let angle = offset.y.atan2(offset.x);
        anchor + crate::polar_to_cartesian(max_distance, angle)
    } else {
        p
    }
}

/// Clamp a point into the rectangle `[min, max]`
#[inline]
pub fn clamp_to_bounds(p: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    p.clamp(min, max)
}

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Half-open containment, matching pixel hit-testing
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}
