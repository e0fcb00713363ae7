use glam::IVec3;
use prospect_core::VoxelState;

/// Side length of a chunk in voxels.
pub const CHUNK_SIZE: u32 = 16;

/// Total voxels per chunk (16^3).
pub const VOXELS_PER_CHUNK: u32 = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

/// Dense block storage for one chunk.
#[derive(Debug, Clone)]
pub struct Chunk {
    states: Vec<VoxelState>,
    /// Count of non-air voxels.
    solid: u32,
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunk {
    /// Create an all-air chunk.
    pub fn new() -> Self {
        Self {
            states: vec![VoxelState::AIR; VOXELS_PER_CHUNK as usize],
            solid: 0,
        }
    }

    fn index(local: IVec3) -> usize {
        let cs = CHUNK_SIZE as i32;
        (local.x + local.y * cs + local.z * cs * cs) as usize
    }

    /// State at a local offset (each axis in 0..CHUNK_SIZE).
    pub fn get(&self, local: IVec3) -> VoxelState {
        self.states[Self::index(local)]
    }

    /// Replace the state at a local offset.
    pub fn set(&mut self, local: IVec3, state: VoxelState) {
        let slot = &mut self.states[Self::index(local)];
        match (*slot == VoxelState::AIR, state == VoxelState::AIR) {
            (true, false) => self.solid += 1,
            (false, true) => self.solid -= 1,
            _ => {}
        }
        *slot = state;
    }

    /// Whether every voxel is air.
    pub fn is_empty(&self) -> bool {
        self.solid == 0
    }

    pub fn solid_count(&self) -> u32 {
        self.solid
    }
}
