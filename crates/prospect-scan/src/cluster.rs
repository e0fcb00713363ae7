use std::collections::HashMap;

use glam::{IVec3, Vec4};
use prospect_core::constants::CLUSTER_MERGE_RADIUS;
use prospect_core::{BlockBox, BlockPos, MaterialClassifier, ScanResult, VoxelState};

use crate::matcher::MatchClass;

/// Index of a cluster in its merger's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub usize);

/// A group of same-state blocks found near each other.
///
/// Clusters merged into another stay in the arena with a parent link; only
/// roots are reported.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanCluster {
    id: ClusterId,
    state: VoxelState,
    class: MatchClass,
    bounds: BlockBox,
    alpha_hint: f32,
    parent: Option<ClusterId>,
}

impl ScanCluster {
    pub fn id(&self) -> ClusterId {
        self.id
    }

    pub fn state(&self) -> VoxelState {
        self.state
    }

    /// Rule the seeding block matched under.
    pub fn class(&self) -> MatchClass {
        self.class
    }

    pub fn alpha_hint(&self) -> f32 {
        self.alpha_hint
    }

    pub fn parent(&self) -> Option<ClusterId> {
        self.parent
    }

    /// RGBA for drawing: the state's color, alpha floored at `base_alpha`.
    pub fn render_color(&self, classifier: &MaterialClassifier, base_alpha: f32) -> Vec4 {
        let rgb = classifier.color_or_default(self.state);
        Vec4::new(
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
            base_alpha.max(self.alpha_hint),
        )
    }
}

impl ScanResult for ScanCluster {
    fn bounds(&self) -> BlockBox {
        self.bounds
    }

    fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// What [`ClusterMerger::integrate`] did with a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integration {
    /// No same-state neighbor; a new root was created and emitted.
    Created(ClusterId),
    /// Joined an existing cluster, absorbing `absorbed` other roots.
    Joined { root: ClusterId, absorbed: usize },
}

/// Union-find over scan clusters keyed by block position.
#[derive(Debug, Default)]
pub struct ClusterMerger {
    clusters: Vec<ScanCluster>,
    index: HashMap<BlockPos, ClusterId>,
    roots: usize,
}

impl ClusterMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a matched block.
    ///
    /// Same-state clusters within [`CLUSTER_MERGE_RADIUS`] on every axis are
    /// unified under the first one found (y, then x, then z order). If none
    /// exist a new root is created and passed to `emit`.
    pub fn integrate<F: FnMut(&ScanCluster)>(
        &mut self,
        pos: BlockPos,
        state: VoxelState,
        class: MatchClass,
        alpha_hint: f32,
        mut emit: F,
    ) -> Integration {
        let r = CLUSTER_MERGE_RADIUS;
        let mut root: Option<ClusterId> = None;
        let mut absorbed = 0;

        for dy in -r..=r {
            for dx in -r..=r {
                for dz in -r..=r {
                    let Some(&neighbor) = self.index.get(&(pos + IVec3::new(dx, dy, dz))) else {
                        continue;
                    };
                    if self.clusters[neighbor.0].state != state {
                        continue;
                    }
                    let neighbor_root = self.find_root(neighbor);
                    match root {
                        None => {
                            self.clusters[neighbor_root.0].bounds.include(pos);
                            self.index.insert(pos, neighbor_root);
                            root = Some(neighbor_root);
                        }
                        Some(root) if root != neighbor_root => {
                            self.absorb(root, neighbor_root);
                            absorbed += 1;
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        if let Some(root) = root {
            return Integration::Joined { root, absorbed };
        }

        let id = ClusterId(self.clusters.len());
        self.clusters.push(ScanCluster {
            id,
            state,
            class,
            bounds: BlockBox::from_block(pos),
            alpha_hint,
            parent: None,
        });
        self.index.insert(pos, id);
        self.roots += 1;
        emit(&self.clusters[id.0]);
        Integration::Created(id)
    }

    fn absorb(&mut self, root: ClusterId, child: ClusterId) {
        let child_bounds = self.clusters[child.0].bounds;
        let merged = self.clusters[root.0].bounds.union(&child_bounds);
        self.clusters[root.0].bounds = merged;
        self.clusters[child.0].parent = Some(root);
        self.roots -= 1;
    }

    /// Root of `id`'s cluster, compressing the path on the way.
    pub fn find_root(&mut self, id: ClusterId) -> ClusterId {
        let root = self.root_of(id);
        let mut current = id;
        while let Some(parent) = self.clusters[current.0].parent {
            if parent == root {
                break;
            }
            self.clusters[current.0].parent = Some(root);
            current = parent;
        }
        root
    }

    /// Root of `id`'s cluster without modifying links.
    pub fn root_of(&self, id: ClusterId) -> ClusterId {
        let mut current = id;
        while let Some(parent) = self.clusters[current.0].parent {
            current = parent;
        }
        current
    }

    pub fn get(&self, id: ClusterId) -> Option<&ScanCluster> {
        self.clusters.get(id.0)
    }

    /// Cluster last recorded at `pos`, root or not.
    pub fn cluster_at(&self, pos: BlockPos) -> Option<ClusterId> {
        self.index.get(&pos).copied()
    }

    /// Every cluster ever created, in creation order.
    pub fn clusters(&self) -> &[ScanCluster] {
        &self.clusters
    }

    /// Clusters that have not been merged away.
    pub fn roots(&self) -> impl Iterator<Item = &ScanCluster> {
        self.clusters.iter().filter(|c| c.parent.is_none())
    }

    pub fn root_count(&self) -> usize {
        self.roots
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of positions recorded in the lookup index.
    pub fn indexed_positions(&self) -> usize {
        self.index.len()
    }

    pub fn clear(&mut self) {
        self.clusters.clear();
        self.index.clear();
        self.roots = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ORE: VoxelState = VoxelState(5);
    const OTHER: VoxelState = VoxelState(6);

    fn add(merger: &mut ClusterMerger, pos: IVec3, state: VoxelState) -> (Integration, usize) {
        let mut emitted = 0;
        let result = merger.integrate(pos, state, MatchClass::Category, 0.0, |_| emitted += 1);
        (result, emitted)
    }

    #[test]
    fn test_neighbors_join_distant_block_starts_new_root() {
        let mut merger = ClusterMerger::new();
        let (first, n) = add(&mut merger, IVec3::new(0, 0, 0), ORE);
        assert_eq!(first, Integration::Created(ClusterId(0)));
        assert_eq!(n, 1);

        let (second, n) = add(&mut merger, IVec3::new(1, 0, 0), ORE);
        assert_eq!(
            second,
            Integration::Joined {
                root: ClusterId(0),
                absorbed: 0
            }
        );
        assert_eq!(n, 0);
        let root = merger.get(ClusterId(0)).unwrap();
        assert_eq!(root.bounds(), BlockBox::new(IVec3::ZERO, IVec3::new(1, 0, 0)));

        // (4,0,0) is 3 blocks from the nearest member
        let (third, n) = add(&mut merger, IVec3::new(4, 0, 0), ORE);
        assert_eq!(third, Integration::Created(ClusterId(1)));
        assert_eq!(n, 1);
        assert_eq!(merger.root_count(), 2);
    }

    #[test]
    fn test_bridge_block_merges_two_roots() {
        let mut merger = ClusterMerger::new();
        add(&mut merger, IVec3::new(0, 0, 0), ORE);
        add(&mut merger, IVec3::new(5, 0, 0), ORE);
        assert_eq!(merger.root_count(), 2);

        let (bridge, n) = add(&mut merger, IVec3::new(2, 0, 0), ORE);
        assert_eq!(n, 0);
        assert_eq!(
            bridge,
            Integration::Joined {
                root: ClusterId(0),
                absorbed: 0
            }
        );
        // 2 is within reach of 0 but not of 5; a block at 3 touches both
        let (bridge, _) = add(&mut merger, IVec3::new(3, 0, 0), ORE);
        assert_eq!(
            bridge,
            Integration::Joined {
                root: ClusterId(0),
                absorbed: 1
            }
        );
        assert_eq!(merger.root_count(), 1);
        assert_eq!(merger.root_of(ClusterId(1)), ClusterId(0));
        assert!(!merger.get(ClusterId(1)).unwrap().is_root());
        assert_eq!(
            merger.get(ClusterId(0)).unwrap().bounds(),
            BlockBox::new(IVec3::ZERO, IVec3::new(5, 0, 0))
        );
    }

    #[test]
    fn test_different_states_never_merge() {
        let mut merger = ClusterMerger::new();
        add(&mut merger, IVec3::ZERO, ORE);
        let (result, n) = add(&mut merger, IVec3::new(1, 0, 0), OTHER);
        assert_eq!(result, Integration::Created(ClusterId(1)));
        assert_eq!(n, 1);
        assert_eq!(merger.root_count(), 2);
    }

    #[test]
    fn test_chain_resolves_to_single_root() {
        let mut merger = ClusterMerger::new();
        // members spaced 3 apart, then bridged in reverse
        for x in [0, 3, 6, 9] {
            add(&mut merger, IVec3::new(x, 0, 0), ORE);
        }
        for x in [8, 5, 2] {
            add(&mut merger, IVec3::new(x, 0, 0), ORE);
        }
        assert_eq!(merger.root_count(), 1);
        let root = merger.root_of(ClusterId(0));
        for id in 0..4 {
            assert_eq!(merger.root_of(ClusterId(id)), root);
            assert_eq!(merger.find_root(ClusterId(id)), root);
        }
        let bounds = merger.get(root).unwrap().bounds();
        assert_eq!(bounds, BlockBox::new(IVec3::ZERO, IVec3::new(9, 0, 0)));
    }

    #[test]
    fn test_render_color_floors_alpha() {
        let mut classifier = MaterialClassifier::new(0xFF8000);
        classifier.insert(
            ORE,
            prospect_core::MaterialClass {
                common: true,
                rare: false,
                color: Some(0x00FF00),
            },
        );
        let mut merger = ClusterMerger::new();
        merger.integrate(IVec3::ZERO, ORE, MatchClass::Category, 0.0, |_| {});
        merger.integrate(IVec3::new(9, 9, 9), OTHER, MatchClass::TargetState, 0.7, |_| {});

        let ore = merger.get(ClusterId(0)).unwrap().render_color(&classifier, 0.25);
        assert_eq!(ore, Vec4::new(0.0, 1.0, 0.0, 0.25));
        let other = merger.get(ClusterId(1)).unwrap().render_color(&classifier, 0.25);
        assert_eq!(other.x, 1.0);
        assert!((other.y - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(other.w, 0.7);
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut merger = ClusterMerger::new();
        add(&mut merger, IVec3::ZERO, ORE);
        merger.clear();
        assert!(merger.is_empty());
        assert_eq!(merger.indexed_positions(), 0);
        let (result, _) = add(&mut merger, IVec3::new(1, 0, 0), ORE);
        assert_eq!(result, Integration::Created(ClusterId(0)));
    }

    proptest! {
        #[test]
        fn prop_roots_cover_their_members(
            blocks in proptest::collection::hash_set((0i32..12, 0i32..4, 0i32..12), 1..60),
        ) {
            let mut merger = ClusterMerger::new();
            let mut emitted = 0usize;
            let mut owner = Vec::new();
            for &(x, y, z) in &blocks {
                let pos = IVec3::new(x, y, z);
                let state = if (x + z) % 2 == 0 { ORE } else { OTHER };
                let before: Vec<BlockBox> = merger.roots().map(|c| c.bounds()).collect();
                merger.integrate(pos, state, MatchClass::Category, 0.0, |_| emitted += 1);
                owner.push((pos, state));

                // bounds only grow: every old root box is inside its current root's box
                for old in &before {
                    prop_assert!(merger.roots().any(|c| c.bounds().contains_box(old)));
                }
            }

            prop_assert_eq!(emitted, merger.len());
            prop_assert_eq!(merger.roots().count(), merger.root_count());
            for (pos, state) in owner {
                let id = merger.cluster_at(pos).unwrap();
                let root = merger.get(merger.root_of(id)).unwrap();
                prop_assert!(root.is_root());
                prop_assert_eq!(root.state(), state);
                prop_assert!(root.bounds().contains(pos));
            }
        }
    }
}
