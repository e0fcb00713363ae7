use glam::{IVec3, Vec3};
use prospect_core::constants::MAX_SCAN_RADIUS;
use prospect_core::{BlockBox, Predicate, ScanError};
use prospect_rules::RadiusMultipliers;

/// Distances a scan is gated by, derived from the requested radius and the
/// kinds of predicate it carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanRadii {
    /// Outer radius: sizes the scan box and culls every voxel.
    pub base: f32,
    /// Radius within which category predicates may match.
    pub ore: f32,
}

impl ScanRadii {
    /// Combine `radius` with the multipliers of the predicate kinds present.
    ///
    /// Category-only scans use the ore multiplier, target-only scans the
    /// block multiplier, and mixed scans the larger of the two. The ore
    /// radius always uses the ore multiplier. At most one target-state
    /// predicate is accepted.
    pub fn compute(
        predicates: &[Predicate],
        radius: f32,
        multipliers: &RadiusMultipliers,
    ) -> Result<Self, ScanError> {
        if predicates.is_empty() {
            return Err(ScanError::NoPredicates);
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(ScanError::InvalidRadius(radius));
        }

        let targets = predicates.iter().filter(|p| !p.kind().is_category()).count();
        if targets > 1 {
            return Err(ScanError::MultipleTargets);
        }

        let has_category = predicates.iter().any(|p| p.kind().is_category());
        let has_target = targets == 1;
        let factor = match (has_category, has_target) {
            (true, true) => multipliers.ore.max(multipliers.block),
            (true, false) => multipliers.ore,
            _ => multipliers.block,
        };

        let radii = Self {
            base: radius * factor,
            ore: radius * multipliers.ore,
        };
        if !radii.base.is_finite() || radii.base < 0.0 || radii.base > MAX_SCAN_RADIUS {
            return Err(ScanError::InvalidRadius(radii.base));
        }
        Ok(radii)
    }

    pub fn sq_base(&self) -> f32 {
        self.base * self.base
    }

    pub fn sq_ore(&self) -> f32 {
        self.ore * self.ore
    }

    /// Block-aligned box enclosing the base sphere around `center`.
    ///
    /// Fails when the radius exceeds [`MAX_SCAN_RADIUS`] or the box would
    /// not fit in block coordinates.
    pub fn scan_box(&self, center: Vec3) -> Result<BlockBox, ScanError> {
        if !self.base.is_finite() || self.base < 0.0 || self.base > MAX_SCAN_RADIUS {
            return Err(ScanError::InvalidRadius(self.base));
        }
        let floored = center.floor();
        // i32::MAX as f32 rounds up to 2^31, so the bound is exclusive
        if !floored.is_finite() || floored.abs().max_element() >= i32::MAX as f32 {
            return Err(ScanError::InvalidCenter(center));
        }

        checked_cube(floored.as_ivec3(), self.base.ceil() as i32)
            .ok_or(ScanError::InvalidCenter(center))
    }
}

fn checked_cube(c: IVec3, r: i32) -> Option<BlockBox> {
    let min = IVec3::new(c.x.checked_sub(r)?, c.y.checked_sub(r)?, c.z.checked_sub(r)?);
    let max = IVec3::new(c.x.checked_add(r)?, c.y.checked_add(r)?, c.z.checked_add(r)?);
    Some(BlockBox::new(min, max))
}
