//! World-space axis-aligned bounds used by the broad phase.

use crate::math::vec2::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Creates a new AABB, ordering the corners so that `min <= max`.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        AABB { min: min.min(max), max: min.max(max) }
    }

    /// Inclusive overlap test: boxes sharing only an edge still overlap.
    pub fn overlaps(&self, other: &AABB) -> bool {
        let x_overlap = self.max.x >= other.min.x && self.min.x <= other.max.x;
        let y_overlap = self.max.y >= other.min.y && self.min.y <= other.max.y;
        x_overlap && y_overlap
    }

    /// Expands this AABB to contain `other`.
    pub fn merge(&mut self, other: &AABB) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Returns the bound shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> AABB {
        AABB { min: self.min + delta, max: self.max + delta }
    }

    /// Union of this bound and the same bound moved by `motion`.
    pub fn swept(&self, motion: Vec2) -> AABB {
        let mut swept = *self;
        swept.merge(&self.translated(motion));
        swept
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}
