//! Brush parameters

/// Allowed brush radius in world units.
pub const RADIUS_RANGE: (f32, f32) = (0.05, 500.0);
/// Allowed brush density.
pub const DENSITY_RANGE: (f32, f32) = (0.05, 1.0);
/// Allowed brush smoothness.
pub const SMOOTHNESS_RANGE: (f32, f32) = (0.0, 1.0);

/// Paint candidates per unit of radius at full density.
pub const SAMPLES_PER_UNIT_RADIUS: f32 = 60.0;

/// Radius change per unit of scroll.
pub const RADIUS_SCROLL_STEP: f32 = 3.0;
/// Density change per unit of scroll.
pub const DENSITY_SCROLL_STEP: f32 = 0.2;

/// Circular brush footprint and falloff.
///
/// Fields are plain values; nothing stops a caller from storing something
/// outside the ranges above. Sampling and selection only cap the values
/// (see [`BrushState::limited`]); they never widen a small radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushState {
    /// Disc radius in world units
    pub radius: f32,
    /// Fraction of candidates (paint) or points (erase) affected
    pub density: f32,
    /// Edge falloff: 0 = hard disc, 1 = fully tapered
    pub smoothness: f32,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            radius: 5.0,
            density: 0.5,
            smoothness: 0.5,
        }
    }
}

impl BrushState {
    pub fn new(radius: f32, density: f32, smoothness: f32) -> Self {
        Self { radius, density, smoothness }
    }

    /// Copy with every field clamped into its range.
    pub fn clamped(&self) -> Self {
        Self {
            radius: self.radius.clamp(RADIUS_RANGE.0, RADIUS_RANGE.1),
            density: self.density.clamp(DENSITY_RANGE.0, DENSITY_RANGE.1),
            smoothness: self.smoothness.clamp(SMOOTHNESS_RANGE.0, SMOOTHNESS_RANGE.1),
        }
    }

    /// Copy with the radius capped at its maximum and density and smoothness
    /// kept within `[0, 1]`.
    ///
    /// Unlike [`clamped`](Self::clamped) nothing is raised to a minimum, so a
    /// radius below `RADIUS_RANGE.0` keeps its footprint and candidate count.
    pub fn limited(&self) -> Self {
        Self {
            radius: self.radius.min(RADIUS_RANGE.1),
            density: self.density.clamp(0.0, DENSITY_RANGE.1),
            smoothness: self.smoothness.clamp(SMOOTHNESS_RANGE.0, SMOOTHNESS_RANGE.1),
        }
    }

    /// Number of paint candidates drawn per stroke: never fewer than one.
    pub fn candidate_count(&self) -> usize {
        (self.radius * (SAMPLES_PER_UNIT_RADIUS * self.density)).max(1.0) as usize
    }

    /// Grow or shrink the radius by a scroll amount, staying in range.
    pub fn adjust_radius(&mut self, scroll_delta: f32) {
        self.radius = (self.radius + scroll_delta * RADIUS_SCROLL_STEP)
            .clamp(RADIUS_RANGE.0, RADIUS_RANGE.1);
    }

    /// Raise or lower the density by a scroll amount, staying in range.
    pub fn adjust_density(&mut self, scroll_delta: f32) {
        self.density = (self.density + scroll_delta * DENSITY_SCROLL_STEP)
            .clamp(DENSITY_RANGE.0, DENSITY_RANGE.1);
    }
}
