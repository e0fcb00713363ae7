use prospect_core::constants::{
    BASE_ALPHA, BLOCK_RADIUS_MULTIPLIER, DEFAULT_COLOR, ORE_RADIUS_MULTIPLIER, STATE_SCANNED_ALPHA,
};
use prospect_core::{ModuleKind, Predicate, ScanError};
use serde::{Deserialize, Serialize};

use crate::loader::{load_settings_from_str, LoadError};

/// Energy drawn per scan for each installed module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyCosts {
    pub module_block: u32,
    pub module_ore_common: u32,
    pub module_ore_rare: u32,
}

impl Default for EnergyCosts {
    fn default() -> Self {
        Self {
            module_block: 100,
            module_ore_common: 25,
            module_ore_rare: 75,
        }
    }
}

impl EnergyCosts {
    pub fn cost_for(&self, kind: ModuleKind) -> u32 {
        match kind {
            ModuleKind::Block => self.module_block,
            ModuleKind::OreCommon => self.module_ore_common,
            ModuleKind::OreRare => self.module_ore_rare,
        }
    }

    /// Cost of a module identified by its host name.
    pub fn cost_for_module(&self, name: &str) -> Result<u32, ScanError> {
        ModuleKind::from_name(name).map(|kind| self.cost_for(kind))
    }

    /// Summed cost of every predicate in a scan request.
    pub fn total(&self, predicates: &[Predicate]) -> Result<u32, ScanError> {
        if predicates.is_empty() {
            return Err(ScanError::NoPredicates);
        }
        Ok(predicates
            .iter()
            .map(|p| self.cost_for(p.kind()))
            .fold(0u32, u32::saturating_add))
    }
}

/// Multipliers turning the requested scan radius into per-predicate radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusMultipliers {
    /// Applied to category (common/rare) predicates.
    pub ore: f32,
    /// Applied to target-state predicates.
    pub block: f32,
}

impl Default for RadiusMultipliers {
    fn default() -> Self {
        Self {
            ore: ORE_RADIUS_MULTIPLIER,
            block: BLOCK_RADIUS_MULTIPLIER,
        }
    }
}

/// Alpha values handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaConstants {
    /// Floor applied to every result's alpha.
    pub base: f32,
    /// Hint attached to target-state matches.
    pub state_scanned: f32,
}

impl Default for AlphaConstants {
    fn default() -> Self {
        Self {
            base: BASE_ALPHA,
            state_scanned: STATE_SCANNED_ALPHA,
        }
    }
}

/// Complete scanner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Base material names that are never evaluated.
    pub block_blacklist: Vec<String>,
    /// Category names that disqualify a state from both categories.
    pub ore_blacklist: Vec<String>,
    pub common_ores: Vec<String>,
    pub rare_ores: Vec<String>,
    /// `name = 0xRRGGBB` entries.
    pub ore_colors: Vec<String>,
    pub energy: EnergyCosts,
    pub radius: RadiusMultipliers,
    pub alpha: AlphaConstants,
    pub default_color: u32,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            block_blacklist: Vec::new(),
            ore_blacklist: Vec::new(),
            common_ores: Vec::new(),
            rare_ores: Vec::new(),
            ore_colors: Vec::new(),
            energy: EnergyCosts::default(),
            radius: RadiusMultipliers::default(),
            alpha: AlphaConstants::default(),
            default_color: DEFAULT_COLOR,
        }
    }
}

/// Default settings shipped in `data/settings.ron`.
pub const BUILTIN_SETTINGS_RON: &str = include_str!("../../../data/settings.ron");

impl ScanSettings {
    /// Parse the settings bundled with the workspace.
    pub fn builtin() -> Result<Self, LoadError> {
        load_settings_from_str(BUILTIN_SETTINGS_RON)
    }
}
