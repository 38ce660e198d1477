//! Indexed triangle mesh surface.

use rayon::prelude::*;

use crate::core::types::Vec3;
use crate::core::{Error, Result};
use crate::math::{Aabb, Ray};
use super::{SurfaceHit, SurfaceQuery};

/// Triangle count above which a raycast scans triangles in parallel.
const PARALLEL_THRESHOLD: usize = 2048;

/// Padding applied to the bounds before the slab test.
const BOUNDS_MARGIN: f32 = 1e-3;

/// Determinant below which a ray is treated as parallel to a triangle.
const PARALLEL_EPSILON: f32 = 1e-12;

/// Largest grid resolution whose vertex indices still fit in `u32`.
pub const MAX_GRID_RESOLUTION: u32 = 65_534;

/// Vertex and triangle counts of a grid with `cells` cells per edge.
fn grid_counts(cells: u32) -> (usize, usize) {
    let cells = cells as usize;
    let verts_per_edge = cells + 1;
    (verts_per_edge * verts_per_edge, cells * cells * 2)
}

/// Static triangle mesh with cached bounds.
///
/// Triangles are double-sided: hits report the geometric face normal
/// flipped toward the ray origin.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    bounds: Aabb,
}

impl TriangleMesh {
    /// Build a mesh, validating that every index refers to a vertex.
    pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        let bounds = Aabb::from_points(&positions)
            .ok_or_else(|| Error::InvalidMesh("mesh has no vertices".into()))?;

        let vertex_count = positions.len();
        if let Some((tri, index)) = triangles.iter().enumerate().find_map(|(i, tri)| {
            tri.iter()
                .find(|&&index| index as usize >= vertex_count)
                .map(|&index| (i, index))
        }) {
            return Err(Error::InvalidMesh(format!(
                "triangle {tri} references vertex {index}, mesh has {vertex_count} vertices"
            )));
        }

        Ok(Self { positions, triangles, bounds })
    }

    /// Heightfield grid centered on the origin in XZ.
    ///
    /// `size` is the edge length, `resolution` the number of cells per edge
    /// (clamped to `1..=MAX_GRID_RESOLUTION`). `height(x, z)` gives the Y of
    /// each vertex.
    pub fn grid(size: f32, resolution: u32, height: impl Fn(f32, f32) -> f32) -> Self {
        let cells = resolution.clamp(1, MAX_GRID_RESOLUTION);
        let (vertex_count, triangle_count) = grid_counts(cells);
        let verts_per_edge = cells + 1;
        let step = size / cells as f32;
        let half = size * 0.5;

        let mut positions = Vec::with_capacity(vertex_count);
        for j in 0..verts_per_edge {
            for i in 0..verts_per_edge {
                let x = -half + i as f32 * step;
                let z = -half + j as f32 * step;
                positions.push(Vec3::new(x, height(x, z), z));
            }
        }

        // Wound so that a flat grid faces +Y
        let mut triangles = Vec::with_capacity(triangle_count);
        for j in 0..cells {
            for i in 0..cells {
                let v00 = j * verts_per_edge + i;
                let v10 = v00 + 1;
                let v01 = v00 + verts_per_edge;
                let v11 = v01 + 1;
                triangles.push([v00, v01, v10]);
                triangles.push([v10, v01, v11]);
            }
        }

        let bounds = Aabb::from_points(&positions).unwrap_or_default();
        Self { positions, triangles, bounds }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Möller–Trumbore intersection. Returns ray parameter and face normal.
    fn intersect_triangle(&self, ray: &Ray, tri: &[u32; 3]) -> Option<(f32, Vec3)> {
        let a = self.positions[tri[0] as usize];
        let b = self.positions[tri[1] as usize];
        let c = self.positions[tri[2] as usize];

        let e1 = b - a;
        let e2 = c - a;
        let p = ray.direction.cross(e2);
        let det = e1.dot(p);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = ray.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(e1);
        let v = ray.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = e2.dot(q) * inv_det;
        let normal = e1.cross(e2).normalize_or_zero();
        Some((t, normal))
    }
}

impl SurfaceQuery for TriangleMesh {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit> {
        let (t_near, _) = ray.intersects_aabb(&self.bounds.inflated(BOUNDS_MARGIN))?;
        if t_near > max_distance {
            return None;
        }

        let in_range = |tri: &[u32; 3]| {
            self.intersect_triangle(ray, tri)
                .filter(|(t, _)| (0.0..=max_distance).contains(t))
        };

        let (t, normal) = if self.triangles.len() > PARALLEL_THRESHOLD {
            self.triangles
                .par_iter()
                .filter_map(in_range)
                .min_by(|a, b| a.0.total_cmp(&b.0))?
        } else {
            self.triangles
                .iter()
                .filter_map(in_range)
                .min_by(|a, b| a.0.total_cmp(&b.0))?
        };

        let normal = if normal.dot(ray.direction) > 0.0 { -normal } else { normal };
        Some(SurfaceHit {
            position: ray.at(t),
            normal,
            distance: t,
        })
    }
}
