//! Infinite plane

use crate::core::types::Vec3;
use super::ray::Ray;

/// A plane defined by normal and distance from origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Plane through `point` with the given (normalized) normal
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        Self { normal, distance: -normal.dot(point) }
    }

    /// Signed distance from point to plane (positive = in front)
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Ray parameter where the ray crosses the plane.
    /// `None` when the ray is parallel to the plane.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        Some(-self.distance_to_point(ray.origin) / denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_point() {
        let plane = Plane::from_point_normal(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        assert_eq!(plane.distance_to_point(Vec3::new(5.0, 3.0, -1.0)), 1.0);
        assert_eq!(plane.distance_to_point(Vec3::new(0.0, 0.0, 0.0)), -2.0);
    }

    #[test]
    fn test_intersect_ray() {
        let plane = Plane::new(Vec3::Y, 0.0);
        let ray = Ray::new(Vec3::new(1.0, 4.0, 1.0), Vec3::NEG_Y);
        assert_eq!(plane.intersect_ray(&ray), Some(4.0));

        let parallel = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(plane.intersect_ray(&parallel).is_none());
    }
}
