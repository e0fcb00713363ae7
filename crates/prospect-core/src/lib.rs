pub mod bounds;
pub mod constants;
pub mod error;
pub mod material;
pub mod predicate;
pub mod source;
pub mod types;

pub use bounds::BlockBox;
pub use error::ScanError;
pub use material::{MaterialClass, MaterialClassifier};
pub use predicate::{ModuleKind, Predicate};
pub use source::{MaterialRegistry, ScanResult, VoxelSource};
pub use types::{BlockPos, MaterialId, VoxelState};
