//! Shared constants for the scanner and its collaborators.
//! Values that are also configurable only serve as defaults for
//! `ScanSettings`.

/// Render color for matches without an entry in the color table.
pub const DEFAULT_COLOR: u32 = 0x4466CC;

/// Minimum alpha applied to every rendered result.
pub const BASE_ALPHA: f32 = 0.25;

/// Alpha hint for clusters found by a target-state predicate.
pub const STATE_SCANNED_ALPHA: f32 = 0.7;

/// Alpha hint for clusters found by a category predicate.
pub const CATEGORY_SCANNED_ALPHA: f32 = 0.0;

/// Radius multiplier applied when a category predicate is active.
pub const ORE_RADIUS_MULTIPLIER: f32 = 0.25;

/// Radius multiplier applied when a target-state predicate is active.
pub const BLOCK_RADIUS_MULTIPLIER: f32 = 0.5;

/// Largest base radius a scan box is built for.
pub const MAX_SCAN_RADIUS: f32 = 1_048_576.0;

/// Chebyshev radius searched for existing clusters around a new match.
pub const CLUSTER_MERGE_RADIUS: i32 = 2;

/// Property names compared by default when scanning for a target state.
pub const COMPARED_PROPERTY_NAMES: [&str; 2] = ["variant", "type"];

/// Prefix of auto-detected ore tags (`ore` followed by an uppercase letter).
pub const RARE_TAG_PREFIX: &str = "ore";

/// Host module names understood by the cost lookup.
pub const MODULE_BLOCK: &str = "module_block";
pub const MODULE_ORE_COMMON: &str = "module_ore_common";
pub const MODULE_ORE_RARE: &str = "module_ore_rare";
