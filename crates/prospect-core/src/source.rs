//! Interfaces the scanner consumes from, and exposes to, its host.

use glam::Vec3;

use crate::bounds::BlockBox;
use crate::types::{BlockPos, MaterialId, VoxelState};

/// Read access to the host's voxel data. Queries are total: positions
/// outside loaded space report [`VoxelState::AIR`].
pub trait VoxelSource {
    /// State of the voxel at `pos`.
    fn state_at(&self, pos: BlockPos) -> VoxelState;

    /// Exclusive upper bound of the world's vertical axis.
    fn height_limit(&self) -> i32;
}

/// Read access to the host's material registry.
pub trait MaterialRegistry {
    /// Every state the registry knows about.
    fn known_states(&self) -> Vec<VoxelState>;

    /// Category/tag names associated with a state, in registry order.
    fn names_for(&self, state: VoxelState) -> Vec<&str>;

    /// Base material a state belongs to.
    fn base_material(&self, state: VoxelState) -> MaterialId;

    /// Registered name of a material, if any.
    fn material_name(&self, material: MaterialId) -> Option<&str>;

    /// Names of the properties a state carries.
    fn property_names(&self, state: VoxelState) -> Vec<&str>;

    /// Value of a named property on a state.
    fn property(&self, state: VoxelState, name: &str) -> Option<&str>;
}

/// Read surface of a reportable scan result.
pub trait ScanResult {
    /// Bounding box of every block merged into this result.
    fn bounds(&self) -> BlockBox;

    /// Whether this result is still externally visible. Merged-away
    /// results stay readable but must be skipped by renderers.
    fn is_root(&self) -> bool;

    /// World-space center used for distance and focus calculations.
    fn position(&self) -> Vec3 {
        self.bounds().center()
    }
}
