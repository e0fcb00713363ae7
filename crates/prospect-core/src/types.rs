use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Newtype for base material identifiers. A material owns one or more
/// voxel states (one per property combination).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MaterialId(pub u16);

/// Opaque identity of a single voxel state: material plus property values.
///
/// Issued by the host registry. The scanner only compares and hashes it;
/// material and property lookups always go back through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct VoxelState(pub u32);

impl VoxelState {
    /// Sentinel state returned by world sources for empty or unloaded space.
    pub const AIR: VoxelState = VoxelState(0);
}

/// World coordinate in voxel-space.
pub type BlockPos = IVec3;
