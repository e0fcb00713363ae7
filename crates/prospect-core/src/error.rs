use glam::Vec3;
use thiserror::Error;

use crate::types::BlockPos;

/// Errors raised when a scan is configured incorrectly.
#[derive(Debug, Error, PartialEq)]
pub enum ScanError {
    #[error("scan requires at least one predicate")]
    NoPredicates,

    #[error("module not supported by the block scanner: {0}")]
    UnsupportedModule(String),

    #[error("invalid scan radius {0} (must be finite, non-negative and at most 1048576)")]
    InvalidRadius(f32),

    #[error("scan center {0} is not finite or too close to the edge of the world")]
    InvalidCenter(Vec3),

    #[error("scan accepts at most one target-state predicate")]
    MultipleTargets,

    #[error("invalid scan box: min {min} exceeds max {max}")]
    InvalidScanBox { min: BlockPos, max: BlockPos },

    #[error("scan must be spread over at least one step")]
    InvalidStepCount,
}
