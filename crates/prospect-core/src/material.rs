use std::collections::{HashMap, HashSet};

use crate::constants::DEFAULT_COLOR;
use crate::types::{MaterialId, VoxelState};

/// Category membership and render color of a single voxel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaterialClass {
    pub common: bool,
    pub rare: bool,
    /// 0xRRGGBB color from the color table, if one of the state's names has one.
    pub color: Option<u32>,
}

impl MaterialClass {
    /// Whether this entry carries any information worth storing.
    pub fn is_notable(&self) -> bool {
        self.common || self.rare || self.color.is_some()
    }
}

/// Precomputed state → category lookup built from the material registry.
///
/// Read-only while any scan holds it. Rebuilding produces a new table;
/// sessions keep whichever snapshot they were started with.
#[derive(Debug, Clone)]
pub struct MaterialClassifier {
    classes: HashMap<VoxelState, MaterialClass>,
    /// Base materials never evaluated by any predicate.
    blocked: HashSet<MaterialId>,
    default_color: u32,
}

impl Default for MaterialClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR)
    }
}

impl MaterialClassifier {
    pub fn new(default_color: u32) -> Self {
        Self {
            classes: HashMap::new(),
            blocked: HashSet::new(),
            default_color,
        }
    }

    /// Record the class of a state. Entries with no category and no
    /// color are dropped.
    pub fn insert(&mut self, state: VoxelState, class: MaterialClass) {
        if class.is_notable() {
            self.classes.insert(state, class);
        } else {
            self.classes.remove(&state);
        }
    }

    /// Exclude a base material from scanning.
    pub fn block_material(&mut self, material: MaterialId) {
        self.blocked.insert(material);
    }

    /// Class of a state; unknown states are neither common nor rare.
    pub fn class_of(&self, state: VoxelState) -> MaterialClass {
        self.classes.get(&state).copied().unwrap_or_default()
    }

    pub fn is_common(&self, state: VoxelState) -> bool {
        self.classes.get(&state).is_some_and(|c| c.common)
    }

    pub fn is_rare(&self, state: VoxelState) -> bool {
        self.classes.get(&state).is_some_and(|c| c.rare)
    }

    pub fn color(&self, state: VoxelState) -> Option<u32> {
        self.classes.get(&state).and_then(|c| c.color)
    }

    /// Color for rendering, falling back to the table's default color.
    pub fn color_or_default(&self, state: VoxelState) -> u32 {
        self.color(state).unwrap_or(self.default_color)
    }

    pub fn default_color(&self) -> u32 {
        self.default_color
    }

    pub fn is_blocked(&self, material: MaterialId) -> bool {
        self.blocked.contains(&material)
    }

    /// Number of blocked base materials.
    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// Get counts for logging: (common, rare, colored)
    pub fn counts(&self) -> (usize, usize, usize) {
        let mut common = 0;
        let mut rare = 0;
        let mut colored = 0;
        for class in self.classes.values() {
            common += class.common as usize;
            rare += class.rare as usize;
            colored += class.color.is_some() as usize;
        }
        (common, rare, colored)
    }

    /// Number of stored states.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
