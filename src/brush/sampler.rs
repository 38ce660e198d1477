//! Paint pass: stochastic disc sampling with surface probes.

use rand::Rng;

use crate::core::types::{Quat, Vec3};
use crate::grass::SourceVertex;
use crate::math::Ray;
use crate::surface::{SurfaceHit, SurfaceQuery};
use super::state::BrushState;

/// Scatter paint candidates around `hit` and project them onto `surface`.
///
/// Each candidate draws a normalized radius `r`. With probability
/// `smoothness * r` it is dropped, which thins the disc toward its edge.
/// Survivors are placed at distance `radius * r` from the hit in a random
/// direction within the tangent plane, lifted along the normal by
/// `radius / 2 * (1 - r)`, and probed straight down against the surface for
/// at most `radius`. Probes that miss contribute nothing.
///
/// Returns at most `brush.candidate_count()` vertices, possibly none.
/// A non-positive radius or a degenerate normal yields nothing.
pub fn sample<S, R>(
    hit: &SurfaceHit,
    brush: &BrushState,
    surface: &S,
    rng: &mut R,
) -> Vec<SourceVertex>
where
    S: SurfaceQuery + ?Sized,
    R: Rng,
{
    if !(brush.radius > 0.0 && brush.radius.is_finite()) {
        return Vec::new();
    }
    let normal = hit.normal.normalize_or_zero();
    if normal == Vec3::ZERO {
        return Vec::new();
    }

    let brush = brush.limited();
    let radius = brush.radius;
    let candidates = brush.candidate_count();
    let tangent = normal.any_orthonormal_vector();

    let mut placed = Vec::with_capacity(candidates);
    for _ in 0..candidates {
        let r: f32 = rng.gen_range(0.0f32..1.0);
        if rng.gen_range(0.0f32..1.0) < brush.smoothness * r {
            continue;
        }

        let angle = rng.gen_range(0.0f32..360.0).to_radians();
        let direction = Quat::from_axis_angle(normal, angle) * tangent;
        let origin = hit.position
            + direction * (radius * r)
            + normal * (radius * 0.5 * (1.0 - r));

        let probe = Ray::new(origin, -normal);
        if let Some(found) = surface.raycast(&probe, radius) {
            placed.push(SourceVertex {
                position: found.position,
                normal: found.normal,
            });
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Plane;
    use crate::surface::{FnSurface, PlaneSurface};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ground_hit() -> SurfaceHit {
        SurfaceHit {
            position: Vec3::ZERO,
            normal: Vec3::Y,
            distance: 0.0,
        }
    }

    #[test]
    fn test_flat_plane_full_density() {
        let ground = PlaneSurface::horizontal(0.0);
        let brush = BrushState::new(10.0, 1.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let placed = sample(&ground_hit(), &brush, &ground, &mut rng);
        assert_eq!(placed.len(), 600);
        for v in &placed {
            assert_eq!(v.position.y, 0.0);
            assert_eq!(v.normal, Vec3::Y);
            assert!(v.position.length() < 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_zero_smoothness_rejects_nothing() {
        let ground = PlaneSurface::horizontal(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for &(radius, density) in &[(3.0, 0.5), (0.4, 0.05), (47.5, 0.8)] {
            let brush = BrushState::new(radius, density, 0.0);
            let placed = sample(&ground_hit(), &brush, &ground, &mut rng);
            assert_eq!(placed.len(), brush.candidate_count());
        }
    }

    #[test]
    fn test_count_never_exceeds_candidates() {
        let ground = PlaneSurface::horizontal(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for step in 0..20 {
            let t = step as f32 / 19.0;
            let brush = BrushState::new(0.05 + t * 30.0, 0.05 + t * 0.95, 1.0 - t);
            let placed = sample(&ground_hit(), &brush, &ground, &mut rng);
            assert!(placed.len() <= brush.candidate_count());
        }
    }

    #[test]
    fn test_full_smoothness_tapers_toward_edge() {
        let ground = PlaneSurface::horizontal(0.0);
        let brush = BrushState::new(10.0, 1.0, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut buckets = [0usize; 5];
        for _ in 0..20 {
            for v in sample(&ground_hit(), &brush, &ground, &mut rng) {
                let ring = (v.position.length() / brush.radius * 5.0) as usize;
                buckets[ring.min(4)] += 1;
            }
        }

        for pair in buckets.windows(2) {
            assert!(pair[0] >= pair[1], "radial density not tapering: {buckets:?}");
        }
        // Acceptance is 1 - r, so roughly half the candidates survive
        let total: usize = buckets.iter().sum();
        assert!((5000..7000).contains(&total), "unexpected survivor count {total}");
    }

    #[test]
    fn test_deterministic_under_seed() {
        let ground = PlaneSurface::horizontal(0.0);
        let brush = BrushState::new(4.0, 0.7, 0.6);

        let a = sample(&ground_hit(), &brush, &ground, &mut ChaCha8Rng::seed_from_u64(9));
        let b = sample(&ground_hit(), &brush, &ground, &mut ChaCha8Rng::seed_from_u64(9));
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_surface_yields_nothing() {
        let nothing = FnSurface(|_: &Ray, _: f32| -> Option<SurfaceHit> { None });
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let placed = sample(&ground_hit(), &BrushState::default(), &nothing, &mut rng);
        assert!(placed.is_empty());
    }

    #[test]
    fn test_probe_limited_to_radius() {
        // The real surface sits far below the brush hit
        let pit = PlaneSurface::horizontal(-100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let placed = sample(&ground_hit(), &BrushState::new(5.0, 1.0, 0.0), &pit, &mut rng);
        assert!(placed.is_empty());
    }

    #[test]
    fn test_probes_start_above_and_point_down() {
        let brush = BrushState::new(2.0, 0.5, 0.3);
        let probe_check = FnSurface(|ray: &Ray, max: f32| -> Option<SurfaceHit> {
            assert_eq!(ray.direction, Vec3::NEG_Y);
            assert_eq!(max, 2.0);
            assert!(ray.origin.y >= 0.0 && ray.origin.y <= 1.0);
            None
        });
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        sample(&ground_hit(), &brush, &probe_check, &mut rng);
    }

    #[test]
    fn test_tilted_surface_stays_in_plane() {
        let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        let center = Vec3::new(3.0, -2.0, 1.0);
        let plane = Plane::from_point_normal(center, normal);
        let slope = PlaneSurface::new(plane);
        let hit = SurfaceHit { position: center, normal, distance: 0.0 };
        let brush = BrushState::new(6.0, 0.5, 0.5);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let placed = sample(&hit, &brush, &slope, &mut rng);
        assert!(!placed.is_empty());
        for v in &placed {
            assert!(plane.distance_to_point(v.position).abs() < 1e-3);
            assert!(v.position.distance(center) < brush.radius + 1e-3);
            assert!((v.normal - normal).length() < 1e-5);
        }
    }

    #[test]
    fn test_non_positive_radius_yields_nothing() {
        let ground = PlaneSurface::horizontal(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for radius in [0.0, -3.0, f32::NAN] {
            let brush = BrushState::new(radius, 1.0, 0.0);
            assert!(sample(&ground_hit(), &brush, &ground, &mut rng).is_empty());
        }
    }

    #[test]
    fn test_small_radius_keeps_its_footprint() {
        let ground = PlaneSurface::horizontal(0.0);
        let brush = BrushState::new(0.01, 1.0, 0.0);
        assert_eq!(brush.candidate_count(), 1);

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let placed = sample(&ground_hit(), &brush, &ground, &mut rng);
            assert_eq!(placed.len(), 1);
            assert!(placed[0].position.length() < 0.01 + 1e-6);
        }
    }

    #[test]
    fn test_degenerate_normal_yields_nothing() {
        let ground = PlaneSurface::horizontal(0.0);
        let hit = SurfaceHit { normal: Vec3::ZERO, ..ground_hit() };
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        assert!(sample(&hit, &BrushState::default(), &ground, &mut rng).is_empty());
    }
}
