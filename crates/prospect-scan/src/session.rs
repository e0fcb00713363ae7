use std::sync::Arc;

use glam::{Vec3, Vec4};
use prospect_core::constants::CATEGORY_SCANNED_ALPHA;
use prospect_core::{
    BlockBox, MaterialClassifier, MaterialRegistry, Predicate, ScanError, VoxelSource,
};
use prospect_rules::{AlphaConstants, RadiusMultipliers, ScanSettings};

use crate::cluster::{ClusterId, ClusterMerger, ScanCluster};
use crate::cursor::ScanCursor;
use crate::matcher::{MatchClass, MatchEvaluator};
use crate::radius::ScanRadii;

/// Lifecycle of a [`ScanSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No scan configured, or the last one was reset.
    Uninitialized,
    /// Configured, no tick run yet.
    Initialized,
    /// At least one tick run, blocks remain.
    Advancing,
    /// Every block of the box was visited.
    Exhausted,
}

/// Parameters of one scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub predicates: Vec<Predicate>,
    /// Observer position.
    pub center: Vec3,
    /// Requested radius before multipliers.
    pub radius: f32,
    /// Number of ticks the scan should be spread over.
    pub total_steps: u32,
}

struct ActiveScan {
    cursor: ScanCursor,
    evaluator: MatchEvaluator,
    radii: ScanRadii,
}

/// One incremental scan around an observer.
///
/// The session is driven by calling [`advance`](Self::advance) once per
/// host tick. New clusters are reported through the callback as soon as
/// their first block is found; later growth and merges show up on the
/// clusters themselves.
pub struct ScanSession {
    classifier: Arc<MaterialClassifier>,
    multipliers: RadiusMultipliers,
    alpha: AlphaConstants,
    state: SessionState,
    scan: Option<ActiveScan>,
    merger: ClusterMerger,
}

impl ScanSession {
    pub fn new(
        classifier: Arc<MaterialClassifier>,
        multipliers: RadiusMultipliers,
        alpha: AlphaConstants,
    ) -> Self {
        Self {
            classifier,
            multipliers,
            alpha,
            state: SessionState::Uninitialized,
            scan: None,
            merger: ClusterMerger::new(),
        }
    }

    pub fn from_settings(classifier: Arc<MaterialClassifier>, settings: &ScanSettings) -> Self {
        Self::new(classifier, settings.radius, settings.alpha)
    }

    /// Replace the classifier used by scans initialized from now on. A scan
    /// already running keeps its snapshot.
    pub fn set_classifier(&mut self, classifier: Arc<MaterialClassifier>) {
        self.classifier = classifier;
    }

    /// Configure a new scan, discarding any previous one.
    pub fn initialize<W, R>(
        &mut self,
        world: &W,
        registry: &R,
        request: &ScanRequest,
    ) -> Result<(), ScanError>
    where
        W: VoxelSource + ?Sized,
        R: MaterialRegistry + ?Sized,
    {
        self.reset();

        let radii = ScanRadii::compute(&request.predicates, request.radius, &self.multipliers)?;
        let cursor = ScanCursor::new(
            radii.scan_box(request.center)?,
            world.height_limit(),
            request.total_steps,
        )?;
        let evaluator = MatchEvaluator::new(
            &request.predicates,
            registry,
            Arc::clone(&self.classifier),
            request.center,
            &radii,
        );

        log::debug!(
            "Scan initialized: {} predicates, radius {:.2} (ore {:.2}), box {:?}..{:?}, {} blocks/tick",
            request.predicates.len(),
            radii.base,
            radii.ore,
            cursor.bounds().min,
            cursor.bounds().max,
            cursor.steps_per_tick()
        );

        let exhausted = cursor.is_exhausted();
        self.scan = Some(ActiveScan {
            cursor,
            evaluator,
            radii,
        });
        self.state = if exhausted {
            SessionState::Exhausted
        } else {
            SessionState::Initialized
        };
        Ok(())
    }

    /// Run one tick's worth of the scan. Returns the number of blocks
    /// visited, 0 once exhausted or when no scan is configured.
    pub fn advance<W, R, F>(&mut self, world: &W, registry: &R, mut emit: F) -> usize
    where
        W: VoxelSource + ?Sized,
        R: MaterialRegistry + ?Sized,
        F: FnMut(&ScanCluster),
    {
        if self.state == SessionState::Exhausted {
            return 0;
        }
        let Some(scan) = self.scan.as_mut() else {
            return 0;
        };
        self.state = SessionState::Advancing;

        let budget = scan.cursor.steps_per_tick();
        let mut visited = 0;
        while visited < budget && scan.cursor.advance() {
            visited += 1;
            let pos = scan.cursor.position();
            if scan.evaluator.distance_sq(pos) > scan.evaluator.sq_radius() {
                continue;
            }
            let state = world.state_at(pos);
            let Some(class) = scan.evaluator.evaluate(pos, state, registry) else {
                continue;
            };
            let alpha = match class {
                MatchClass::TargetState => self.alpha.state_scanned,
                MatchClass::Category => CATEGORY_SCANNED_ALPHA,
            };
            self.merger.integrate(pos, state, class, alpha, &mut emit);
        }

        if scan.cursor.is_exhausted() {
            self.state = SessionState::Exhausted;
            log::debug!(
                "Scan exhausted after {} blocks, {} results ({} clusters total)",
                scan.cursor.visited(),
                self.merger.root_count(),
                self.merger.len()
            );
        }
        visited
    }

    /// Drop the configured scan and every result.
    pub fn reset(&mut self) {
        self.scan = None;
        self.merger.clear();
        self.state = SessionState::Uninitialized;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == SessionState::Exhausted
    }

    /// Blocks visited by the current scan.
    pub fn visited(&self) -> u64 {
        self.scan.as_ref().map_or(0, |s| s.cursor.visited())
    }

    /// Box of the current scan, clipped to the world height.
    pub fn bounds(&self) -> Option<BlockBox> {
        self.scan.as_ref().map(|s| s.cursor.bounds())
    }

    pub fn radii(&self) -> Option<ScanRadii> {
        self.scan.as_ref().map(|s| s.radii)
    }

    /// Externally visible results: clusters that were not merged away.
    pub fn results(&self) -> impl Iterator<Item = &ScanCluster> {
        self.merger.roots()
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&ScanCluster> {
        self.merger.get(id)
    }

    pub fn root_of(&self, id: ClusterId) -> ClusterId {
        self.merger.root_of(id)
    }

    pub fn merger(&self) -> &ClusterMerger {
        &self.merger
    }

    /// Draw color of a result under the classifier its scan started with.
    pub fn render_color(&self, cluster: &ScanCluster) -> Vec4 {
        let classifier = self
            .scan
            .as_ref()
            .map_or(&*self.classifier, |s| s.evaluator.classifier());
        cluster.render_color(classifier, self.alpha.base)
    }
}
