use std::fmt;

use glam::Vec3;
use prospect_core::{BlockBox, MaterialRegistry, Predicate};
use prospect_world::StandardBlocks;

/// Observer position shared by every scene: underground, inside the ore layers.
pub const OBSERVER: Vec3 = Vec3::new(8.5, 40.5, 8.5);

/// Which predicates a scene scans for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateMix {
    Target,
    Common,
    Rare,
    CommonRare,
    All,
}

impl PredicateMix {
    pub const ALL: [PredicateMix; 5] = [
        PredicateMix::Target,
        PredicateMix::Common,
        PredicateMix::Rare,
        PredicateMix::CommonRare,
        PredicateMix::All,
    ];

    /// Predicates for this mix. Target scans look for plain stone, the
    /// densest state in generated terrain.
    pub fn predicates<R: MaterialRegistry + ?Sized>(
        self,
        registry: &R,
        blocks: &StandardBlocks,
    ) -> Vec<Predicate> {
        let target = || Predicate::target_state(blocks.stone, registry);
        match self {
            PredicateMix::Target => vec![target()],
            PredicateMix::Common => vec![Predicate::CommonCategory],
            PredicateMix::Rare => vec![Predicate::RareCategory],
            PredicateMix::CommonRare => vec![Predicate::CommonCategory, Predicate::RareCategory],
            PredicateMix::All => vec![
                target(),
                Predicate::CommonCategory,
                Predicate::RareCategory,
            ],
        }
    }
}

impl fmt::Display for PredicateMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PredicateMix::Target => "target",
            PredicateMix::Common => "common",
            PredicateMix::Rare => "rare",
            PredicateMix::CommonRare => "common+rare",
            PredicateMix::All => "all",
        };
        f.write_str(name)
    }
}

/// Configuration for a single benchmark scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub name: String,
    pub radius: f32,
    pub mix: PredicateMix,
}

impl SceneConfig {
    /// Terrain generated for this scene. Covers the scan box for radius
    /// multipliers up to 1.
    pub fn world_area(&self) -> BlockBox {
        BlockBox::around(OBSERVER.floor().as_ivec3(), self.radius.ceil() as i32)
    }
}

/// Return the standard suite: radius 16, 32 and 64 with every predicate mix.
pub fn standard_scenes() -> Vec<SceneConfig> {
    [16.0f32, 32.0, 64.0]
        .into_iter()
        .flat_map(|radius| {
            PredicateMix::ALL.into_iter().map(move |mix| SceneConfig {
                name: format!("r{radius}-{mix}"),
                radius,
                mix,
            })
        })
        .collect()
}
