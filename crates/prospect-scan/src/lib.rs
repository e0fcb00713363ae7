//! Incremental block scanner: walks a box around an observer a slice per
//! tick, filters voxels through the active predicates and merges adjacent
//! matches into clusters.

pub mod cluster;
pub mod cursor;
pub mod matcher;
pub mod radius;
pub mod session;

pub use cluster::{ClusterId, ClusterMerger, Integration, ScanCluster};
pub use cursor::ScanCursor;
pub use matcher::{MatchClass, MatchEvaluator};
pub use radius::ScanRadii;
pub use session::{ScanRequest, ScanSession, SessionState};
