use glam::IVec3;
use prospect_core::BlockPos;

use crate::chunk::CHUNK_SIZE;

/// Chunk coordinate in chunk-space (each unit = CHUNK_SIZE voxels).
pub type ChunkCoord = IVec3;

/// Convert a world-space voxel coordinate to its containing chunk coordinate.
pub fn world_to_chunk(world: BlockPos) -> ChunkCoord {
    let cs = CHUNK_SIZE as i32;
    IVec3::new(
        world.x.div_euclid(cs),
        world.y.div_euclid(cs),
        world.z.div_euclid(cs),
    )
}

/// Convert a world-space voxel coordinate to its local offset within a chunk.
pub fn world_to_local(world: BlockPos) -> IVec3 {
    let cs = CHUNK_SIZE as i32;
    IVec3::new(
        world.x.rem_euclid(cs),
        world.y.rem_euclid(cs),
        world.z.rem_euclid(cs),
    )
}

/// Deterministic 32-bit hash of a position and seed.
pub fn position_hash(pos: BlockPos, seed: u64) -> u32 {
    let mut h = seed
        ^ (pos.x as u32 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (pos.y as u32 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
        ^ (pos.z as u32 as u64).wrapping_mul(0x1656_67B1_9E37_79F9);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    (h >> 16) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_chunk_negative() {
        assert_eq!(world_to_chunk(IVec3::new(-1, 0, 0)), IVec3::new(-1, 0, 0));
        assert_eq!(world_to_chunk(IVec3::new(-16, 0, 0)), IVec3::new(-1, 0, 0));
        assert_eq!(world_to_chunk(IVec3::new(-17, 0, 0)), IVec3::new(-2, 0, 0));
        assert_eq!(world_to_chunk(IVec3::new(15, 16, 31)), IVec3::new(0, 1, 1));
    }

    #[test]
    fn test_position_hash_varies() {
        let a = position_hash(IVec3::new(1, 2, 3), 7);
        let b = position_hash(IVec3::new(3, 2, 1), 7);
        let c = position_hash(IVec3::new(1, 2, 3), 8);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, position_hash(IVec3::new(1, 2, 3), 7));
    }
}
