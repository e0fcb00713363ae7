use crate::constants::{COMPARED_PROPERTY_NAMES, MODULE_BLOCK, MODULE_ORE_COMMON, MODULE_ORE_RARE};
use crate::error::ScanError;
use crate::source::MaterialRegistry;
use crate::types::VoxelState;

/// One class of voxel a scan searches for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Voxels of the target's base material whose `compared` properties
    /// equal the target's. An empty list matches any property combination.
    TargetState {
        state: VoxelState,
        compared: Vec<String>,
    },
    /// Voxels the classifier marks as common ore.
    CommonCategory,
    /// Voxels the classifier marks as rare ore.
    RareCategory,
}

impl Predicate {
    /// Target-state predicate comparing the target's own `variant`/`type`
    /// properties, if it has them.
    pub fn target_state<R: MaterialRegistry + ?Sized>(state: VoxelState, registry: &R) -> Self {
        let compared = registry
            .property_names(state)
            .into_iter()
            .filter(|name| COMPARED_PROPERTY_NAMES.contains(name))
            .map(str::to_owned)
            .collect();
        Predicate::TargetState { state, compared }
    }

    /// Host module kind this predicate is requested through.
    pub fn kind(&self) -> ModuleKind {
        match self {
            Predicate::TargetState { .. } => ModuleKind::Block,
            Predicate::CommonCategory => ModuleKind::OreCommon,
            Predicate::RareCategory => ModuleKind::OreRare,
        }
    }
}

/// Scanner modules a host can install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Block,
    OreCommon,
    OreRare,
}

impl ModuleKind {
    /// Parse a host module name.
    pub fn from_name(name: &str) -> Result<Self, ScanError> {
        match name {
            MODULE_BLOCK => Ok(ModuleKind::Block),
            MODULE_ORE_COMMON => Ok(ModuleKind::OreCommon),
            MODULE_ORE_RARE => Ok(ModuleKind::OreRare),
            other => Err(ScanError::UnsupportedModule(other.to_owned())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModuleKind::Block => MODULE_BLOCK,
            ModuleKind::OreCommon => MODULE_ORE_COMMON,
            ModuleKind::OreRare => MODULE_ORE_RARE,
        }
    }

    /// Whether this module scans by ore category rather than exact state.
    pub fn is_category(self) -> bool {
        matches!(self, ModuleKind::OreCommon | ModuleKind::OreRare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_name_roundtrip() {
        for kind in [ModuleKind::Block, ModuleKind::OreCommon, ModuleKind::OreRare] {
            assert_eq!(ModuleKind::from_name(kind.name()), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_module_rejected() {
        assert_eq!(
            ModuleKind::from_name("module_entity"),
            Err(ScanError::UnsupportedModule("module_entity".into()))
        );
    }

    #[test]
    fn test_predicate_kinds() {
        let target = Predicate::TargetState {
            state: VoxelState(4),
            compared: vec![],
        };
        assert_eq!(target.kind(), ModuleKind::Block);
        assert_eq!(Predicate::CommonCategory.kind(), ModuleKind::OreCommon);
        assert_eq!(Predicate::RareCategory.kind(), ModuleKind::OreRare);
        assert!(!ModuleKind::Block.is_category());
        assert!(ModuleKind::OreRare.is_category());
    }
}
