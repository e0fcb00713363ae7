//! Block-aligned bounding boxes.

use glam::{IVec3, Vec3};

use crate::types::BlockPos;

/// Axis-aligned box of whole blocks, `min` and `max` both inclusive.
///
/// A single block at `p` is `BlockBox { min: p, max: p }`; its render
/// extent is the unit cube `[p, p + 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockBox {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl BlockBox {
    /// Create a box from inclusive corners. Callers must keep `min <= max`
    /// on every axis; use [`BlockBox::try_new`] for unchecked input.
    pub fn new(min: BlockPos, max: BlockPos) -> Self {
        Self { min, max }
    }

    /// Create a box from inclusive corners, rejecting inverted axes.
    pub fn try_new(min: BlockPos, max: BlockPos) -> Option<Self> {
        if min.cmple(max).all() {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Box covering exactly one block.
    pub fn from_block(pos: BlockPos) -> Self {
        Self { min: pos, max: pos }
    }

    /// Cube of blocks within `radius` of `center` on every axis.
    pub fn around(center: BlockPos, radius: i32) -> Self {
        let r = IVec3::splat(radius);
        Self {
            min: center - r,
            max: center + r,
        }
    }

    /// Number of blocks along each axis.
    pub fn extent(&self) -> IVec3 {
        self.max - self.min + IVec3::ONE
    }

    /// Total number of blocks covered.
    pub fn volume(&self) -> u64 {
        let e = self.extent();
        e.x as u64 * e.y as u64 * e.z as u64
    }

    /// Check if a block lies inside the box.
    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.cmpge(self.min).all() && pos.cmple(self.max).all()
    }

    /// Check if `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &BlockBox) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Grow the box to include a block.
    pub fn include(&mut self, pos: BlockPos) {
        self.min = self.min.min(pos);
        self.max = self.max.max(pos);
    }

    /// Return the smallest box containing both.
    pub fn union(&self, other: &BlockBox) -> BlockBox {
        BlockBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Render-space corners: `(min, max + 1)` as floats.
    pub fn render_bounds(&self) -> (Vec3, Vec3) {
        (self.min.as_vec3(), (self.max + IVec3::ONE).as_vec3())
    }

    /// Center of the render-space box.
    pub fn center(&self) -> Vec3 {
        let (min, max) = self.render_bounds();
        (min + max) * 0.5
    }
}
