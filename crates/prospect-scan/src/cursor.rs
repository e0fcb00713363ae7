use glam::IVec3;
use prospect_core::{BlockBox, BlockPos, ScanError};

/// Resumable walk over every block of a box, a bounded slice per tick.
///
/// Order is z outermost, then x, then y (fastest). The vertical range is
/// clipped to the world's height limit. Once exhausted the cursor stays
/// exhausted.
#[derive(Debug, Clone)]
pub struct ScanCursor {
    bounds: BlockBox,
    pos: BlockPos,
    steps_per_tick: usize,
    visited: u64,
    exhausted: bool,
}

impl ScanCursor {
    /// Prepare a walk over `bounds` spread across `total_steps` ticks.
    pub fn new(bounds: BlockBox, height_limit: i32, total_steps: u32) -> Result<Self, ScanError> {
        // the walk steps one block past each face, so the limits stay out of range
        let at_limit = bounds.min.cmpeq(IVec3::MIN).any() || bounds.max.cmpeq(IVec3::MAX).any();
        if at_limit || BlockBox::try_new(bounds.min, bounds.max).is_none() {
            return Err(ScanError::InvalidScanBox {
                min: bounds.min,
                max: bounds.max,
            });
        }
        if total_steps == 0 {
            return Err(ScanError::InvalidStepCount);
        }

        let top = bounds.max.y.min(height_limit.saturating_sub(1));
        let clipped = BlockBox {
            min: bounds.min,
            max: IVec3::new(bounds.max.x, top, bounds.max.z),
        };
        let exhausted = clipped.min.y > clipped.max.y;
        let steps_per_tick = if exhausted {
            0
        } else {
            clipped.volume().div_ceil(total_steps as u64).max(1) as usize
        };

        Ok(Self {
            bounds: clipped,
            // -1 so the first advance lands on min.y
            pos: IVec3::new(clipped.min.x, clipped.min.y - 1, clipped.min.z),
            steps_per_tick,
            visited: 0,
            exhausted,
        })
    }

    /// Move to the next block. Returns false once every block was visited.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let min = self.bounds.min;
        let max = self.bounds.max;

        self.pos.y += 1;
        if self.pos.y > max.y {
            self.pos.y = min.y;
            self.pos.x += 1;
            if self.pos.x > max.x {
                self.pos.x = min.x;
                self.pos.z += 1;
                if self.pos.z > max.z {
                    self.exhausted = true;
                    self.steps_per_tick = 0;
                    return false;
                }
            }
        }
        self.visited += 1;
        true
    }

    /// Block the cursor currently points at. Only meaningful after a
    /// successful [`advance`](Self::advance).
    pub fn position(&self) -> BlockPos {
        self.pos
    }

    /// Blocks to visit per tick; 0 once exhausted.
    pub fn steps_per_tick(&self) -> usize {
        self.steps_per_tick
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Blocks visited so far.
    pub fn visited(&self) -> u64 {
        self.visited
    }

    /// Box being walked, after clipping to the height limit.
    pub fn bounds(&self) -> BlockBox {
        self.bounds
    }
}
