use std::collections::HashSet;
use std::sync::Arc;

use glam::{IVec3, Vec3};
use prospect_core::{BlockBox, MaterialRegistry, Predicate, ScanResult, VoxelSource};
use prospect_rules::{ClassifierCache, ScanSettings};
use prospect_scan::{ScanRequest, ScanSession, SessionState};
use prospect_world::{BlockPalette, StandardBlocks, TerrainGenerator, VoxelWorld};

const CENTER: Vec3 = Vec3::new(8.5, 30.5, 8.5);

fn generated_world() -> (VoxelWorld, BlockPalette, StandardBlocks) {
    let (palette, blocks) = BlockPalette::standard().expect("standard palette");
    let mut world = VoxelWorld::new();
    let area = BlockBox::new(IVec3::new(-24, 0, -24), IVec3::new(40, 80, 40));
    TerrainGenerator::new(42).generate(&mut world, &blocks, area);
    // a known vein next to the observer
    world.fill(
        BlockBox::new(IVec3::new(6, 30, 10), IVec3::new(8, 30, 10)),
        blocks.iron_ore,
    );
    (world, palette, blocks)
}

fn run_to_completion(
    session: &mut ScanSession,
    world: &VoxelWorld,
    palette: &BlockPalette,
) -> (usize, Vec<prospect_scan::ClusterId>) {
    let mut ticks = 0;
    let mut emitted = Vec::new();
    while session.advance(world, palette, |c| emitted.push(c.id())) > 0 {
        ticks += 1;
        assert!(ticks < 10_000, "scan never finished");
    }
    (ticks, emitted)
}

#[test]
fn test_ore_scan_covers_every_match() {
    let (world, palette, blocks) = generated_world();
    let settings = ScanSettings::builtin().expect("builtin settings parse");
    let mut cache = ClassifierCache::new();
    cache.rebuild(&palette, &settings);
    let classifier = cache.snapshot();

    let mut session = ScanSession::from_settings(Arc::clone(&classifier), &settings);
    let request = ScanRequest {
        predicates: vec![Predicate::CommonCategory, Predicate::RareCategory],
        center: CENTER,
        radius: 48.0,
        total_steps: 20,
    };
    session.initialize(&world, &palette, &request).expect("valid request");
    let (ticks, emitted) = run_to_completion(&mut session, &world, &palette);

    assert!(ticks <= 20);
    assert_eq!(session.state(), SessionState::Exhausted);
    let bounds = session.bounds().expect("scan configured");
    assert_eq!(session.visited(), bounds.volume());

    // every emitted id is unique and is every cluster ever created
    let unique: HashSet<_> = emitted.iter().copied().collect();
    assert_eq!(unique.len(), emitted.len());
    assert_eq!(emitted.len(), session.merger().len());

    let radii = session.radii().expect("scan configured");
    let mut expected = Vec::new();
    for z in bounds.min.z..=bounds.max.z {
        for x in bounds.min.x..=bounds.max.x {
            for y in bounds.min.y..=bounds.max.y {
                let pos = IVec3::new(x, y, z);
                let d2 = CENTER.distance_squared(pos.as_vec3() + Vec3::splat(0.5));
                if d2 > radii.sq_base() || d2 > radii.sq_ore() {
                    continue;
                }
                let state = world.state_at(pos);
                if classifier.is_blocked(palette.base_material(state)) {
                    continue;
                }
                if classifier.is_common(state) || classifier.is_rare(state) {
                    expected.push((pos, state));
                }
            }
        }
    }
    assert!(expected.len() >= 3);

    let roots: Vec<_> = session.results().collect();
    for (pos, state) in &expected {
        assert!(
            roots
                .iter()
                .any(|r| r.state() == *state && r.bounds().contains(*pos)),
            "match at {pos:?} not covered by any result"
        );
    }
    for root in &roots {
        assert!(root.is_root());
        assert!(classifier.is_common(root.state()) || classifier.is_rare(root.state()));
    }

    let vein = roots
        .iter()
        .find(|r| r.bounds().contains(IVec3::new(7, 30, 10)))
        .expect("planted vein found");
    assert_eq!(vein.state(), blocks.iron_ore);
    assert!(vein.bounds().contains_box(&BlockBox::new(
        IVec3::new(6, 30, 10),
        IVec3::new(8, 30, 10)
    )));
}

#[test]
fn test_bedrock_never_reported() {
    let (world, palette, blocks) = generated_world();
    let settings = ScanSettings::builtin().expect("builtin settings parse");
    let mut cache = ClassifierCache::new();
    cache.rebuild(&palette, &settings);

    let mut session = ScanSession::from_settings(cache.snapshot(), &settings);
    let request = ScanRequest {
        predicates: vec![Predicate::target_state(blocks.bedrock, &palette)],
        center: Vec3::new(0.5, 1.5, 0.5),
        radius: 16.0,
        total_steps: 5,
    };
    session.initialize(&world, &palette, &request).expect("valid request");
    run_to_completion(&mut session, &world, &palette);
    assert_eq!(session.results().count(), 0);
}

#[test]
fn test_rebuild_does_not_affect_running_scan() {
    let (world, palette, _) = generated_world();
    let settings = ScanSettings::builtin().expect("builtin settings parse");
    let mut cache = ClassifierCache::new();
    cache.rebuild(&palette, &settings);

    let mut session = ScanSession::from_settings(cache.snapshot(), &settings);
    let request = ScanRequest {
        predicates: vec![Predicate::CommonCategory],
        center: CENTER,
        radius: 32.0,
        total_steps: 10,
    };
    session.initialize(&world, &palette, &request).expect("valid request");
    session.advance(&world, &palette, |_| {});

    // an empty table would classify nothing
    cache.rebuild(&palette, &ScanSettings::default());
    session.set_classifier(cache.snapshot());
    run_to_completion(&mut session, &world, &palette);
    assert!(session.results().any(|r| r.bounds().contains(IVec3::new(7, 30, 10))));

    // the next scan picks up the new table
    session.initialize(&world, &palette, &request).expect("valid request");
    run_to_completion(&mut session, &world, &palette);
    assert_eq!(session.results().count(), 0);
}

#[test]
fn test_reset_mid_scan_then_restart() {
    let (world, palette, _) = generated_world();
    let settings = ScanSettings::builtin().expect("builtin settings parse");
    let mut cache = ClassifierCache::new();
    cache.rebuild(&palette, &settings);

    let mut session = ScanSession::from_settings(cache.snapshot(), &settings);
    let request = ScanRequest {
        predicates: vec![Predicate::CommonCategory],
        center: CENTER,
        radius: 32.0,
        total_steps: 8,
    };
    session.initialize(&world, &palette, &request).expect("valid request");
    session.advance(&world, &palette, |_| {});
    session.reset();
    assert_eq!(session.advance(&world, &palette, |_| {}), 0);
    assert_eq!(session.results().count(), 0);

    session.initialize(&world, &palette, &request).expect("valid request");
    let (ticks, _) = run_to_completion(&mut session, &world, &palette);
    assert!(ticks <= 8);
    assert!(session.results().count() >= 1);
}
