pub mod chunk;
pub mod math;
pub mod palette;
pub mod terrain;
pub mod world;

pub use palette::{BlockPalette, PaletteError, StandardBlocks};
pub use terrain::TerrainGenerator;
pub use world::VoxelWorld;
