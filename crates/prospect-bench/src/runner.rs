use std::error::Error;
use std::time::Instant;

use prospect_core::ScanError;
use prospect_rules::validator::validate_settings;
use prospect_rules::{ClassifierCache, ScanSettings};
use prospect_scan::{ScanRequest, ScanSession};
use prospect_world::{BlockPalette, StandardBlocks, TerrainGenerator, VoxelWorld};

use crate::scenes::{SceneConfig, OBSERVER};

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub voxels_visited: u64,
    /// Results still visible at the end of the scan.
    pub roots: usize,
    /// Clusters that were merged into another.
    pub merged: usize,
    pub tick_count: u32,
    pub timings: TimingSeries,
}

/// Runs scan scenes over generated terrain.
pub struct BenchmarkRunner {
    tick_count: u32,
    seed: u64,
    settings: ScanSettings,
    palette: BlockPalette,
    blocks: StandardBlocks,
    cache: ClassifierCache,
}

impl BenchmarkRunner {
    /// Load the bundled settings and build the classifier once for all scenes.
    pub fn new(tick_count: u32, seed: u64) -> Result<Self, Box<dyn Error>> {
        let settings = ScanSettings::builtin()?;
        if let Err(errors) = validate_settings(&settings) {
            for e in &errors {
                log::warn!("Settings validation: {e}");
            }
        }

        let (palette, blocks) = BlockPalette::standard()?;
        let mut cache = ClassifierCache::new();
        let report = cache.rebuild(&palette, &settings);
        log::info!(
            "Classifier ready: {} states in {:.2}ms",
            report.states_scanned,
            report.elapsed_ms
        );

        Ok(Self {
            tick_count,
            seed,
            settings,
            palette,
            blocks,
            cache,
        })
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, config: &SceneConfig) -> Result<BenchmarkResult, ScanError> {
        log::info!(
            "Running scene '{}' (radius {}, {})...",
            config.name,
            config.radius,
            config.mix
        );

        let mut world = VoxelWorld::new();
        TerrainGenerator::new(self.seed).generate(&mut world, &self.blocks, config.world_area());
        log::info!(
            "  Generated {} solid voxels across {} chunks",
            world.solid_count(),
            world.loaded_count()
        );

        let mut session = ScanSession::from_settings(self.cache.snapshot(), &self.settings);
        let request = ScanRequest {
            predicates: config.mix.predicates(&self.palette, &self.blocks),
            center: OBSERVER,
            radius: config.radius,
            total_steps: self.tick_count,
        };
        session.initialize(&world, &self.palette, &request)?;

        let mut frame_times = Vec::with_capacity(self.tick_count as usize + 1);
        loop {
            let frame_start = Instant::now();
            let visited = session.advance(&world, &self.palette, |_| {});
            let elapsed = frame_start.elapsed().as_secs_f64() * 1000.0;
            if visited == 0 {
                break;
            }
            frame_times.push(elapsed);
        }

        let timings = compute_timings(&frame_times);
        let roots = session.results().count();
        let merged = session.merger().len() - roots;
        log::info!(
            "  Done: {} results ({} merged), mean={:.3}ms, p95={:.3}ms, p99={:.3}ms",
            roots,
            merged,
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms
        );

        Ok(BenchmarkResult {
            scene_name: config.name.clone(),
            voxels_visited: session.visited(),
            roots,
            merged,
            tick_count: frame_times.len() as u32,
            timings,
        })
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
