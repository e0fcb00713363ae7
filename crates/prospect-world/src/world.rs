use std::collections::HashMap;

use prospect_core::{BlockBox, BlockPos, VoxelSource, VoxelState};

use crate::chunk::Chunk;
use crate::math::{world_to_chunk, world_to_local, ChunkCoord};

/// Default exclusive vertical limit of a world.
pub const DEFAULT_HEIGHT_LIMIT: i32 = 256;

/// Sparse chunked voxel store. Unloaded space reads as air.
pub struct VoxelWorld {
    chunks: HashMap<ChunkCoord, Chunk>,
    height_limit: i32,
}

impl Default for VoxelWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxelWorld {
    pub fn new() -> Self {
        Self::with_height_limit(DEFAULT_HEIGHT_LIMIT)
    }

    pub fn with_height_limit(height_limit: i32) -> Self {
        Self {
            chunks: HashMap::new(),
            height_limit,
        }
    }

    /// Set the state at a world position, loading its chunk if needed.
    /// Writes outside `0..height_limit` are ignored; a chunk left entirely
    /// air is unloaded.
    pub fn set_state(&mut self, pos: BlockPos, state: VoxelState) {
        if pos.y < 0 || pos.y >= self.height_limit {
            return;
        }
        let coord = world_to_chunk(pos);
        if state == VoxelState::AIR && !self.chunks.contains_key(&coord) {
            return;
        }
        let chunk = self.chunks.entry(coord).or_default();
        chunk.set(world_to_local(pos), state);
        if chunk.is_empty() {
            self.chunks.remove(&coord);
        }
    }

    /// Fill every block of `area` with `state`.
    pub fn fill(&mut self, area: BlockBox, state: VoxelState) {
        for z in area.min.z..=area.max.z {
            for x in area.min.x..=area.max.x {
                for y in area.min.y..=area.max.y {
                    self.set_state(BlockPos::new(x, y, z), state);
                }
            }
        }
    }

    /// Number of loaded chunks.
    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total non-air voxels across loaded chunks.
    pub fn solid_count(&self) -> u64 {
        self.chunks.values().map(|c| c.solid_count() as u64).sum()
    }
}

impl VoxelSource for VoxelWorld {
    fn state_at(&self, pos: BlockPos) -> VoxelState {
        self.chunks
            .get(&world_to_chunk(pos))
            .map(|chunk| chunk.get(world_to_local(pos)))
            .unwrap_or(VoxelState::AIR)
    }

    fn height_limit(&self) -> i32 {
        self.height_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;

    #[test]
    fn test_unloaded_space_is_air() {
        let world = VoxelWorld::new();
        assert_eq!(world.state_at(IVec3::new(100, 5, -100)), VoxelState::AIR);
        assert_eq!(world.loaded_count(), 0);
    }

    #[test]
    fn test_set_and_get_across_chunks() {
        let mut world = VoxelWorld::new();
        world.set_state(IVec3::new(-1, 3, 0), VoxelState(2));
        world.set_state(IVec3::new(16, 3, 0), VoxelState(3));
        assert_eq!(world.state_at(IVec3::new(-1, 3, 0)), VoxelState(2));
        assert_eq!(world.state_at(IVec3::new(16, 3, 0)), VoxelState(3));
        assert_eq!(world.loaded_count(), 2);
    }

    #[test]
    fn test_writes_outside_height_ignored() {
        let mut world = VoxelWorld::with_height_limit(32);
        world.set_state(IVec3::new(0, 32, 0), VoxelState(2));
        world.set_state(IVec3::new(0, -1, 0), VoxelState(2));
        assert_eq!(world.loaded_count(), 0);
        assert_eq!(world.height_limit(), 32);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut world = VoxelWorld::new();
        let area = BlockBox::new(IVec3::ZERO, IVec3::new(3, 3, 3));
        world.fill(area, VoxelState(4));
        assert_eq!(world.solid_count(), 64);
        world.fill(area, VoxelState::AIR);
        assert_eq!(world.solid_count(), 0);
        assert_eq!(world.loaded_count(), 0, "all-air chunks are unloaded");
    }
}
