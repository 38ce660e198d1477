//! Erase pass: probabilistic selection of stored points under the brush.

use rand::Rng;

use crate::core::types::Vec3;
use crate::surface::SurfaceHit;
use super::state::BrushState;

/// Pick indices of `points` to remove for a brush centered on `hit`.
///
/// A point at distance `d` is picked when `d < radius`, a density roll
/// succeeds, and a falloff roll beats `(d / radius) * smoothness`. Rolls are
/// only drawn once the preceding test has passed. The result is ascending and
/// refers to positions in `points`; a non-positive radius picks nothing.
pub fn select<R: Rng>(
    points: &[Vec3],
    hit: &SurfaceHit,
    brush: &BrushState,
    rng: &mut R,
) -> Vec<usize> {
    if !(brush.radius > 0.0 && brush.radius.is_finite()) {
        return Vec::new();
    }
    let brush = brush.limited();
    let radius = brush.radius;

    points
        .iter()
        .enumerate()
        .filter(|(_, point)| {
            let d = point.distance(hit.position);
            d < radius
                && rng.gen_range(0.0f32..1.0) < brush.density
                && rng.gen_range(0.0f32..1.0) > (d / radius) * brush.smoothness
        })
        .map(|(i, _)| i)
        .collect()
}
