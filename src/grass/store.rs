//! Placed grass points.
//!
//! Brush strokes talk to storage through [`PointStore`]. Removal works by
//! index, and indices only mean something for the exact store contents they
//! were computed from, so every snapshot carries the store revision and a
//! [`RemovalSet`] is rejected once the store has moved on.

use bytemuck::{Pod, Zeroable};

use crate::core::types::Vec3;
use crate::core::{Error, Result};

/// A placed grass instance: surface point and surface normal.
///
/// Laid out for direct upload as a GPU storage buffer element (24 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SourceVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Positions of every stored point, captured at one revision.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSnapshot {
    pub positions: Vec<Vec3>,
    pub revision: u64,
}

/// Indices to remove, bound to the revision they were selected against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemovalSet {
    indices: Vec<usize>,
    revision: u64,
}

impl RemovalSet {
    /// Indices are sorted and deduplicated.
    pub fn new(mut indices: Vec<usize>, revision: u64) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { indices, revision }
    }

    /// Ascending, unique indices
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Storage for placed points, mutated only through add and remove.
pub trait PointStore {
    /// Positions of all points plus the current revision.
    fn snapshot(&self) -> PointSnapshot;

    /// Append points. Order among the new points is not significant.
    fn add(&mut self, vertices: Vec<SourceVertex>);

    /// Remove the points at the given indices. Returns how many were removed.
    fn remove(&mut self, set: &RemovalSet) -> Result<usize>;
}

/// In-memory point store.
#[derive(Clone, Debug, Default)]
pub struct GrassStore {
    vertices: Vec<SourceVertex>,
    revision: u64,
}

impl GrassStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[SourceVertex] {
        &self.vertices
    }

    /// Current revision. Changes whenever the contents change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Raw bytes of the vertex array for GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Remove every point.
    pub fn clear(&mut self) {
        if !self.vertices.is_empty() {
            self.vertices.clear();
            self.revision += 1;
        }
    }
}

impl PointStore for GrassStore {
    fn snapshot(&self) -> PointSnapshot {
        PointSnapshot {
            positions: self.vertices.iter().map(|v| v.position).collect(),
            revision: self.revision,
        }
    }

    fn add(&mut self, vertices: Vec<SourceVertex>) {
        if vertices.is_empty() {
            return;
        }
        self.vertices.extend(vertices);
        self.revision += 1;
    }

    fn remove(&mut self, set: &RemovalSet) -> Result<usize> {
        if set.revision() != self.revision {
            return Err(Error::StaleSelection {
                selected: set.revision(),
                current: self.revision,
            });
        }
        let len = self.vertices.len();
        if let Some(&index) = set.indices().last().filter(|&&i| i >= len) {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        if set.is_empty() {
            return Ok(0);
        }

        let mut doomed = set.indices().iter().peekable();
        let mut position = 0;
        self.vertices.retain(|_| {
            let remove = doomed.next_if_eq(&&position).is_some();
            position += 1;
            !remove
        });
        self.revision += 1;

        Ok(set.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32) -> SourceVertex {
        SourceVertex {
            position: Vec3::new(x, 0.0, 0.0),
            normal: Vec3::Y,
        }
    }

    fn filled(count: usize) -> GrassStore {
        let mut store = GrassStore::new();
        store.add((0..count).map(|i| vertex(i as f32)).collect());
        store
    }

    #[test]
    fn test_source_vertex_layout() {
        assert_eq!(std::mem::size_of::<SourceVertex>(), 24);
        let store = filled(3);
        assert_eq!(store.as_bytes().len(), 72);
    }

    #[test]
    fn test_add_bumps_revision() {
        let mut store = GrassStore::new();
        assert_eq!(store.revision(), 0);
        store.add(vec![vertex(1.0)]);
        assert_eq!(store.revision(), 1);
        store.add(Vec::new());
        assert_eq!(store.revision(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_snapshot_matches_positions() {
        let store = filled(4);
        let snap = store.snapshot();
        assert_eq!(snap.revision, store.revision());
        assert_eq!(snap.positions.len(), 4);
        assert_eq!(snap.positions[2], Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_remove_preserves_order_of_survivors() {
        let mut store = filled(6);
        let set = RemovalSet::new(vec![4, 1, 1, 0], store.revision());
        assert_eq!(set.indices(), &[0, 1, 4]);

        let removed = store.remove(&set).unwrap();
        assert_eq!(removed, 3);
        let xs: Vec<f32> = store.vertices().iter().map(|v| v.position.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_remove_rejects_stale_selection() {
        let mut store = filled(3);
        let set = RemovalSet::new(vec![0], store.revision());
        store.add(vec![vertex(9.0)]);

        assert!(matches!(
            store.remove(&set),
            Err(Error::StaleSelection { selected: 1, current: 2 })
        ));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_remove_rejects_out_of_bounds() {
        let mut store = filled(3);
        let set = RemovalSet::new(vec![1, 3], store.revision());
        assert!(matches!(
            store.remove(&set),
            Err(Error::IndexOutOfBounds { index: 3, len: 3 })
        ));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_empty_removal_keeps_revision() {
        let mut store = filled(2);
        let revision = store.revision();
        assert_eq!(store.remove(&RemovalSet::new(Vec::new(), revision)).unwrap(), 0);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_clear() {
        let mut store = filled(5);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.revision(), 2);
    }
}
