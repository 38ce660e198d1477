//! Infinite plane surface.

use crate::core::types::Vec3;
use crate::math::{Plane, Ray};
use super::{SurfaceHit, SurfaceQuery};

/// Double-sided infinite plane.
#[derive(Clone, Copy, Debug)]
pub struct PlaneSurface {
    plane: Plane,
}

impl PlaneSurface {
    pub fn new(plane: Plane) -> Self {
        Self { plane }
    }

    /// Ground plane `y = height` facing +Y
    pub fn horizontal(height: f32) -> Self {
        Self::new(Plane::new(Vec3::Y, -height))
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }
}

impl SurfaceQuery for PlaneSurface {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit> {
        let t = self.plane.intersect_ray(ray)?;
        if !(0.0..=max_distance).contains(&t) {
            return None;
        }
        let normal = if self.plane.normal.dot(ray.direction) > 0.0 {
            -self.plane.normal
        } else {
            self.plane.normal
        };
        Some(SurfaceHit {
            position: ray.at(t),
            normal,
            distance: t,
        })
    }
}
