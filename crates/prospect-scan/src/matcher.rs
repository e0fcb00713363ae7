use std::sync::Arc;

use glam::Vec3;
use prospect_core::{
    BlockPos, MaterialClassifier, MaterialId, MaterialRegistry, Predicate, VoxelState,
};

use crate::radius::ScanRadii;

/// Which rule a voxel matched under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchClass {
    /// Same base material and compared properties as the target.
    TargetState,
    /// Classified common or rare by the active classifier.
    Category,
}

#[derive(Debug, Clone)]
struct TargetMatcher {
    material: MaterialId,
    /// Property name and the target's value for it.
    compared: Vec<(String, Option<String>)>,
}

impl TargetMatcher {
    fn matches<R: MaterialRegistry + ?Sized>(&self, state: VoxelState, registry: &R) -> bool {
        registry.base_material(state) == self.material
            && self
                .compared
                .iter()
                .all(|(name, value)| registry.property(state, name) == value.as_deref())
    }
}

/// Decides whether a voxel matches one of a scan's predicates.
///
/// Target-state matching takes priority over category matching; each rule
/// is gated by its own squared radius.
#[derive(Debug, Clone)]
pub struct MatchEvaluator {
    target: Option<TargetMatcher>,
    scan_common: bool,
    scan_rare: bool,
    center: Vec3,
    sq_radius: f32,
    sq_ore_radius: f32,
    classifier: Arc<MaterialClassifier>,
}

impl MatchEvaluator {
    /// Resolve `predicates` against the registry. Target property values
    /// are captured once here.
    pub fn new<R: MaterialRegistry + ?Sized>(
        predicates: &[Predicate],
        registry: &R,
        classifier: Arc<MaterialClassifier>,
        center: Vec3,
        radii: &ScanRadii,
    ) -> Self {
        let mut target = None;
        let mut scan_common = false;
        let mut scan_rare = false;

        for predicate in predicates {
            match predicate {
                Predicate::TargetState { state, compared } => {
                    let compared = compared
                        .iter()
                        .map(|name| (name.clone(), registry.property(*state, name).map(str::to_owned)))
                        .collect();
                    target = Some(TargetMatcher {
                        material: registry.base_material(*state),
                        compared,
                    });
                }
                Predicate::CommonCategory => scan_common = true,
                Predicate::RareCategory => scan_rare = true,
            }
        }

        Self {
            target,
            scan_common,
            scan_rare,
            center,
            sq_radius: radii.sq_base(),
            sq_ore_radius: radii.sq_ore(),
            classifier,
        }
    }

    /// Squared distance from the scan center to the middle of block `pos`.
    pub fn distance_sq(&self, pos: BlockPos) -> f32 {
        self.center.distance_squared(pos.as_vec3() + Vec3::splat(0.5))
    }

    pub fn sq_radius(&self) -> f32 {
        self.sq_radius
    }

    pub fn classifier(&self) -> &MaterialClassifier {
        &self.classifier
    }

    /// Classify the voxel at `pos`. Blacklisted base materials never match.
    pub fn evaluate<R: MaterialRegistry + ?Sized>(
        &self,
        pos: BlockPos,
        state: VoxelState,
        registry: &R,
    ) -> Option<MatchClass> {
        if self.classifier.is_blocked(registry.base_material(state)) {
            return None;
        }
        let dist_sq = self.distance_sq(pos);

        if let Some(target) = &self.target {
            if dist_sq <= self.sq_radius && target.matches(state, registry) {
                return Some(MatchClass::TargetState);
            }
        }

        if (self.scan_common || self.scan_rare) && dist_sq <= self.sq_ore_radius {
            let common = self.scan_common && self.classifier.is_common(state);
            let rare = self.scan_rare && self.classifier.is_rare(state);
            if common || rare {
                return Some(MatchClass::Category);
            }
        }
        None
    }
}
