//! Ray/surface intersection.
//!
//! Brush strokes never touch scene geometry directly. Everything they need
//! from the scene is a first-hit raycast, expressed by [`SurfaceQuery`].
//! Hosts plug in their own physics or BVH through [`FnSurface`]; the crate
//! ships an infinite plane and a triangle mesh for standalone use and tests.

pub mod mesh;
pub mod plane;

pub use mesh::TriangleMesh;
pub use plane::PlaneSurface;

use crate::core::types::Vec3;
use crate::math::Ray;

/// Result of a successful raycast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    /// World-space hit point
    pub position: Vec3,
    /// Unit surface normal, facing the ray origin
    pub normal: Vec3,
    /// Distance from the ray origin along the ray direction
    pub distance: f32,
}

/// First-hit raycast against scene geometry.
pub trait SurfaceQuery {
    /// Nearest hit with distance in `[0, max_distance]`, or `None` on a miss.
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit>;
}

impl<T: SurfaceQuery + ?Sized> SurfaceQuery for &T {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit> {
        (**self).raycast(ray, max_distance)
    }
}

impl<T: SurfaceQuery + ?Sized> SurfaceQuery for Box<T> {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit> {
        (**self).raycast(ray, max_distance)
    }
}

/// Several surfaces queried as one scene: the nearest hit wins.
impl<S: SurfaceQuery> SurfaceQuery for [S] {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit> {
        self.iter()
            .filter_map(|surface| surface.raycast(ray, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Adapts a raycast closure into a [`SurfaceQuery`].
///
/// ```
/// use grassbrush::math::Ray;
/// use grassbrush::surface::{FnSurface, SurfaceHit, SurfaceQuery};
/// use glam::Vec3;
///
/// let floor = FnSurface(|ray: &Ray, max: f32| {
///     let t = -ray.origin.y / ray.direction.y;
///     (t >= 0.0 && t <= max).then(|| SurfaceHit {
///         position: ray.at(t),
///         normal: Vec3::Y,
///         distance: t,
///     })
/// });
/// let hit = floor.raycast(&Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y), 10.0);
/// assert_eq!(hit.map(|h| h.distance), Some(2.0));
/// ```
pub struct FnSurface<F>(pub F);

impl<F> SurfaceQuery for FnSurface<F>
where
    F: Fn(&Ray, f32) -> Option<SurfaceHit>,
{
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit> {
        (self.0)(ray, max_distance)
    }
}
