use std::collections::HashMap;

use prospect_core::{MaterialId, MaterialRegistry, VoxelState};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("material ID space exhausted registering '{0}'")]
    TooManyMaterials(String),
    #[error("voxel state ID space exhausted")]
    TooManyStates,
    #[error("unknown material {0:?}")]
    UnknownMaterial(MaterialId),
}

struct MaterialEntry {
    name: String,
    states: Vec<VoxelState>,
}

struct StateEntry {
    material: MaterialId,
    properties: Vec<(String, String)>,
    /// Category/tag names, in registration order.
    names: Vec<String>,
}

/// In-memory material registry. Material 0 / state 0 is always air.
pub struct BlockPalette {
    materials: Vec<MaterialEntry>,
    states: Vec<StateEntry>,
    by_name: HashMap<String, MaterialId>,
}

impl Default for BlockPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockPalette {
    /// Palette holding only air (material 0, state 0).
    pub fn new() -> Self {
        let air = StateEntry {
            material: MaterialId(0),
            properties: Vec::new(),
            names: Vec::new(),
        };
        Self {
            materials: vec![MaterialEntry {
                name: "minecraft:air".to_owned(),
                states: vec![VoxelState::AIR],
            }],
            states: vec![air],
            by_name: HashMap::from([("minecraft:air".to_owned(), MaterialId(0))]),
        }
    }

    /// Register a material. Registering an existing name returns its ID.
    pub fn add_material(&mut self, name: &str) -> Result<MaterialId, PaletteError> {
        if let Some(&id) = self.by_name.get(name) {
            return Ok(id);
        }
        let raw = u16::try_from(self.materials.len())
            .map_err(|_| PaletteError::TooManyMaterials(name.to_owned()))?;
        let id = MaterialId(raw);
        self.materials.push(MaterialEntry {
            name: name.to_owned(),
            states: Vec::new(),
        });
        self.by_name.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Register one property combination of a material with its tag names.
    pub fn add_state(
        &mut self,
        material: MaterialId,
        properties: &[(&str, &str)],
        names: &[&str],
    ) -> Result<VoxelState, PaletteError> {
        let entry = self
            .materials
            .get_mut(material.0 as usize)
            .ok_or(PaletteError::UnknownMaterial(material))?;
        let raw = u32::try_from(self.states.len()).map_err(|_| PaletteError::TooManyStates)?;
        let state = VoxelState(raw);
        entry.states.push(state);
        self.states.push(StateEntry {
            material,
            properties: properties
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            names: names.iter().map(|n| n.to_string()).collect(),
        });
        Ok(state)
    }

    /// Register a material with a single state.
    pub fn add_simple(&mut self, name: &str, names: &[&str]) -> Result<VoxelState, PaletteError> {
        let material = self.add_material(name)?;
        self.add_state(material, &[], names)
    }

    pub fn material_by_name(&self, name: &str) -> Option<MaterialId> {
        self.by_name.get(name).copied()
    }

    /// States registered for a material.
    pub fn states_of(&self, material: MaterialId) -> &[VoxelState] {
        self.materials
            .get(material.0 as usize)
            .map(|m| m.states.as_slice())
            .unwrap_or(&[])
    }

    /// Number of registered states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    fn entry(&self, state: VoxelState) -> Option<&StateEntry> {
        self.states.get(state.0 as usize)
    }

    /// A vanilla-like palette with stone variants and common ores.
    pub fn standard() -> Result<(Self, StandardBlocks), PaletteError> {
        let mut p = Self::new();

        let stone = p.add_material("minecraft:stone")?;
        let stone_plain = p.add_state(stone, &[("variant", "stone")], &["stone"])?;
        let granite = p.add_state(stone, &[("variant", "granite")], &["stone"])?;
        let diorite = p.add_state(stone, &[("variant", "diorite")], &["stone"])?;
        let andesite = p.add_state(stone, &[("variant", "andesite")], &["stone"])?;

        let dirt = p.add_simple("minecraft:dirt", &["dirt"])?;
        let grass = p.add_simple("minecraft:grass", &["grass"])?;
        let bedrock = p.add_simple("minecraft:bedrock", &[])?;

        let coal_ore = p.add_simple("minecraft:coal_ore", &["oreCoal"])?;
        let iron_ore = p.add_simple("minecraft:iron_ore", &["oreIron"])?;
        let gold_ore = p.add_simple("minecraft:gold_ore", &["oreGold"])?;
        let diamond_ore = p.add_simple("minecraft:diamond_ore", &["oreDiamond"])?;
        let lapis_ore = p.add_simple("minecraft:lapis_ore", &["oreLapis"])?;

        let redstone = p.add_material("minecraft:redstone_ore")?;
        let redstone_ore = p.add_state(redstone, &[("lit", "false")], &["oreRedstone"])?;
        let redstone_ore_lit = p.add_state(redstone, &[("lit", "true")], &["oreRedstone"])?;

        let glowstone = p.add_simple("minecraft:glowstone", &["glowstone"])?;

        let blocks = StandardBlocks {
            air: VoxelState::AIR,
            stone: stone_plain,
            granite,
            diorite,
            andesite,
            dirt,
            grass,
            bedrock,
            coal_ore,
            iron_ore,
            gold_ore,
            diamond_ore,
            lapis_ore,
            redstone_ore,
            redstone_ore_lit,
            glowstone,
        };
        Ok((p, blocks))
    }
}

impl MaterialRegistry for BlockPalette {
    fn known_states(&self) -> Vec<VoxelState> {
        (0..self.states.len() as u32).map(VoxelState).collect()
    }

    fn names_for(&self, state: VoxelState) -> Vec<&str> {
        self.entry(state)
            .map(|e| e.names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn base_material(&self, state: VoxelState) -> MaterialId {
        self.entry(state).map(|e| e.material).unwrap_or_default()
    }

    fn material_name(&self, material: MaterialId) -> Option<&str> {
        self.materials
            .get(material.0 as usize)
            .map(|m| m.name.as_str())
    }

    fn property_names(&self, state: VoxelState) -> Vec<&str> {
        self.entry(state)
            .map(|e| e.properties.iter().map(|(k, _)| k.as_str()).collect())
            .unwrap_or_default()
    }

    fn property(&self, state: VoxelState, name: &str) -> Option<&str> {
        self.entry(state)?
            .properties
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Handles to the states registered by [`BlockPalette::standard`].
#[derive(Debug, Clone, Copy)]
pub struct StandardBlocks {
    pub air: VoxelState,
    pub stone: VoxelState,
    pub granite: VoxelState,
    pub diorite: VoxelState,
    pub andesite: VoxelState,
    pub dirt: VoxelState,
    pub grass: VoxelState,
    pub bedrock: VoxelState,
    pub coal_ore: VoxelState,
    pub iron_ore: VoxelState,
    pub gold_ore: VoxelState,
    pub diamond_ore: VoxelState,
    pub lapis_ore: VoxelState,
    pub redstone_ore: VoxelState,
    pub redstone_ore_lit: VoxelState,
    pub glowstone: VoxelState,
}

impl StandardBlocks {
    /// Ore states placed by the terrain generator, shallowest first.
    pub fn ores(&self) -> [VoxelState; 6] {
        [
            self.coal_ore,
            self.iron_ore,
            self.redstone_ore,
            self.lapis_ore,
            self.gold_ore,
            self.diamond_ore,
        ]
    }
}
