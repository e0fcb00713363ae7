use glam::IVec3;
use prospect_core::{BlockBox, BlockPos, VoxelSource, VoxelState};

use crate::math::position_hash;
use crate::palette::StandardBlocks;
use crate::world::VoxelWorld;

/// Average surface height in world-space voxel Y coordinate.
const SURFACE_LEVEL: i32 = 64;

/// Side length of the cells ore veins are seeded in.
const VEIN_CELL: i32 = 4;

/// Terrain generator: simplex heightmap surface over stone with clustered
/// ore veins, bedrock at the bottom.
pub struct TerrainGenerator {
    /// Permutation table for simplex noise (doubled for wrapping).
    perm: [u8; 512],
    seed: u64,
}

impl TerrainGenerator {
    pub fn new(seed: u64) -> Self {
        let perm = Self::build_permutation(seed);
        Self { perm, seed }
    }

    /// Generate every column of `area` into `world`.
    ///
    /// Layers per column:
    /// - Bedrock at y=0
    /// - Stone (with granite/diorite/andesite pockets) up to height-4, ores embedded
    /// - Dirt from height-3 to height-1, grass at height
    /// - Air above
    pub fn generate(&self, world: &mut VoxelWorld, blocks: &StandardBlocks, area: BlockBox) {
        let top = world.height_limit() - 1;
        for z in area.min.z..=area.max.z {
            for x in area.min.x..=area.max.x {
                let height = self.terrain_height(x, z).min(top);
                let y_min = area.min.y.max(0);
                let y_max = area.max.y.min(height);
                for y in y_min..=y_max {
                    let pos = IVec3::new(x, y, z);
                    world.set_state(pos, self.block_at(blocks, pos, height));
                }
            }
        }
        log::debug!(
            "Generated terrain for {:?}..{:?} ({} chunks loaded)",
            area.min,
            area.max,
            world.loaded_count()
        );
    }

    /// Block placed at `pos` in a column of the given surface height.
    pub fn block_at(&self, blocks: &StandardBlocks, pos: BlockPos, height: i32) -> VoxelState {
        if pos.y > height {
            blocks.air
        } else if pos.y == 0 {
            blocks.bedrock
        } else if pos.y == height {
            blocks.grass
        } else if pos.y > height - 4 {
            blocks.dirt
        } else if let Some(ore) = self.ore_at(blocks, pos) {
            ore
        } else {
            self.stone_at(blocks, pos)
        }
    }

    /// Ore vein membership. Veins are seeded per VEIN_CELL³ cell; about a
    /// third of a seeded cell's blocks become ore, so veins come in clumps.
    fn ore_at(&self, blocks: &StandardBlocks, pos: BlockPos) -> Option<VoxelState> {
        let cell = pos.div_euclid(IVec3::splat(VEIN_CELL));
        let cell_hash = position_hash(cell, self.seed ^ 0x0E0E);
        if cell_hash % 100 >= 6 {
            return None;
        }
        let ores = blocks.ores();
        // Deeper cells may seed rarer ores.
        let depth_tiers = ((SURFACE_LEVEL - pos.y) / 10).clamp(1, ores.len() as i32) as u32;
        let ore = ores[((cell_hash >> 8) % depth_tiers) as usize];
        if position_hash(pos, self.seed ^ 0x0A0A) % 3 == 0 {
            Some(ore)
        } else {
            None
        }
    }

    fn stone_at(&self, blocks: &StandardBlocks, pos: BlockPos) -> VoxelState {
        let n = self.simplex2d(pos.x as f64 * 0.08 + pos.y as f64 * 0.3, pos.z as f64 * 0.08);
        if n > 0.6 {
            blocks.granite
        } else if n < -0.6 {
            blocks.diorite
        } else if n.abs() < 0.02 {
            blocks.andesite
        } else {
            blocks.stone
        }
    }

    /// Compute terrain height at a world-space (x, z) position using 3-octave simplex noise.
    pub fn terrain_height(&self, wx: i32, wz: i32) -> i32 {
        let x = wx as f64;
        let z = wz as f64;

        let scale = 0.02;
        let mut h = 0.0f64;
        h += self.simplex2d(x * scale, z * scale) * 8.0;
        h += self.simplex2d(x * scale * 2.0 + 100.0, z * scale * 2.0 + 100.0) * 4.0;
        h += self.simplex2d(x * scale * 4.0 + 200.0, z * scale * 4.0 + 200.0) * 2.0;

        (SURFACE_LEVEL as f64 + h).round() as i32
    }

    /// 2D simplex noise. Returns value in [-1, 1].
    fn simplex2d(&self, x: f64, z: f64) -> f64 {
        const F2: f64 = 0.5 * (1.7320508075688772 - 1.0); // (sqrt(3)-1)/2
        const G2: f64 = (3.0 - 1.7320508075688772) / 6.0; // (3-sqrt(3))/6

        let s = (x + z) * F2;
        let i = (x + s).floor();
        let j = (z + s).floor();

        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = z - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i32 & 255) as usize;
        let jj = (j as i32 & 255) as usize;

        let gi0 = self.perm[ii + self.perm[jj] as usize] as usize % 8;
        let gi1 = self.perm[ii + i1 + self.perm[jj + j1] as usize] as usize % 8;
        let gi2 = self.perm[ii + 1 + self.perm[jj + 1] as usize] as usize % 8;

        let n0 = Self::corner_contribution(gi0, x0, y0);
        let n1 = Self::corner_contribution(gi1, x1, y1);
        let n2 = Self::corner_contribution(gi2, x2, y2);

        70.0 * (n0 + n1 + n2)
    }

    fn corner_contribution(gi: usize, x: f64, y: f64) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            0.0
        } else {
            let t = t * t;
            t * t * Self::grad2d(gi, x, y)
        }
    }

    fn grad2d(hash: usize, x: f64, y: f64) -> f64 {
        const GRAD: [[f64; 2]; 8] = [
            [1.0, 1.0],
            [-1.0, 1.0],
            [1.0, -1.0],
            [-1.0, -1.0],
            [1.0, 0.0],
            [-1.0, 0.0],
            [0.0, 1.0],
            [0.0, -1.0],
        ];
        let g = &GRAD[hash % 8];
        g[0] * x + g[1] * y
    }

    fn build_permutation(seed: u64) -> [u8; 512] {
        let mut p: [u8; 256] = [0; 256];
        for (i, val) in p.iter_mut().enumerate() {
            *val = i as u8;
        }

        // Fisher-Yates shuffle with seed
        let mut rng = seed;
        for i in (1..256).rev() {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let j = (rng >> 33) as usize % (i + 1);
            p.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for (i, val) in perm.iter_mut().enumerate() {
            *val = p[i & 255];
        }
        perm
    }
}
