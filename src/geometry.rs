//! Per-iteration geometry records layered over a growable vertex arena.
//!
//! Every generation of an L-System contributes one [`IterationRecord`]: a
//! range of points in the shared [`VertexArena`] plus a transform that
//! normalizes that generation's bounding box into a canonical cube, so
//! successive generations render at the same on-screen scale.

use crate::error::{LsysError, Result};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Longest-axis extent of the canonical cube every iteration is normalized
/// into. The cube is centered on the origin.
pub const CANONICAL_EXTENT: f32 = 1.9;

/// Default ceiling on the total size of stored geometry, in bytes.
pub const DEFAULT_MAX_BYTES: usize = 16 * 1024 * 1024;

/// Where one iteration's geometry lives in the shared point list, plus the
/// transform that maps its bounding box into the canonical cube.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Offset of the iteration's first point.
    pub first: usize,
    /// Number of points (always even; two points per segment).
    pub count: usize,
    /// Normalizing transform: uniform scale plus recentering translation.
    pub transform: Mat4,
}

/// Growable flat point storage with an explicit capacity policy.
///
/// Capacity grows by doubling, or to the exact requirement when doubling is
/// not enough; contents are copy-extended and never shrink.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VertexArena {
    points: Vec<Vec3>,
}

impl VertexArena {
    /// Ensures capacity for `additional` more points.
    fn ensure(&mut self, additional: usize) {
        let needed = self.points.len() + additional;
        if needed <= self.points.capacity() {
            return;
        }
        let target = (self.points.capacity() * 2).max(needed);
        self.points.reserve_exact(target - self.points.len());
    }

    fn extend_from(&mut self, new_points: &[Vec3]) {
        self.ensure(new_points.len());
        self.points.extend_from_slice(new_points);
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Read view of every stored point.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

/// Owns the vertex arena and the per-iteration records layered over it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeometryStore {
    arena: VertexArena,
    records: Vec<IterationRecord>,
    max_bytes: usize,
}

impl Default for GeometryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BYTES)
    }
}

impl GeometryStore {
    /// Creates an empty store that refuses to grow past `max_bytes`.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            arena: VertexArena::default(),
            records: Vec::new(),
            max_bytes,
        }
    }

    /// Appends one iteration's points and returns its record.
    ///
    /// The record's transform maps the points' axis-aligned bounding box
    /// onto the canonical cube.
    ///
    /// # Errors
    ///
    /// [`LsysError::CapacityExceeded`] when the new total would cross the
    /// byte ceiling. Stored state is untouched on failure.
    pub fn append(&mut self, points: &[Vec3]) -> Result<IterationRecord> {
        let needed = (self.arena.len() + points.len()) * size_of::<Vec3>();
        if needed > self.max_bytes {
            return Err(LsysError::CapacityExceeded {
                needed,
                max: self.max_bytes,
            });
        }

        let record = IterationRecord {
            first: self.arena.len(),
            count: points.len(),
            transform: normalizing_transform(points),
        };
        self.arena.extend_from(points);
        self.records.push(record);
        Ok(record)
    }

    /// The record for one iteration, if it exists.
    pub fn record(&self, iteration: usize) -> Option<&IterationRecord> {
        self.records.get(iteration)
    }

    /// All iteration records, oldest first.
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Read view of every stored point across all iterations.
    pub fn points(&self) -> &[Vec3] {
        self.arena.points()
    }

    /// Total number of stored points.
    pub fn point_count(&self) -> usize {
        self.arena.len()
    }

    /// The byte ceiling this store enforces.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }
}

/// Uniform scale-and-recenter matrix mapping the points' axis-aligned
/// bounding box onto the canonical cube.
///
/// Degenerate boxes (no points, or zero extent on every axis) map to the
/// identity instead of dividing by zero.
fn normalizing_transform(points: &[Vec3]) -> Mat4 {
    let Some(&first) = points.first() else {
        return Mat4::IDENTITY;
    };

    let mut min = first;
    let mut max = first;
    for &point in points {
        min = min.min(point);
        max = max.max(point);
    }

    let span = (max - min).max_element();
    if span <= 0.0 {
        return Mat4::IDENTITY;
    }

    let scale = CANONICAL_EXTENT / span;
    let translation = -(min + max) * scale / 2.0;
    Mat4::from_translation(translation) * Mat4::from_scale(Vec3::splat(scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_append_leaves_store_untouched() {
        let mut store = GeometryStore::new(2 * size_of::<Vec3>());
        store.append(&[Vec3::ZERO, Vec3::Y]).unwrap();

        let err = store.append(&[Vec3::ZERO, Vec3::X]).unwrap_err();
        assert!(matches!(err, LsysError::CapacityExceeded { .. }));
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.point_count(), 2);
    }

    #[test]
    fn empty_iteration_gets_identity_transform() {
        let mut store = GeometryStore::default();
        let record = store.append(&[]).unwrap();
        assert_eq!(record.count, 0);
        assert_eq!(record.transform, Mat4::IDENTITY);
    }

    #[test]
    fn arena_capacity_doubles_or_fits_exactly() {
        let mut arena = VertexArena::default();
        arena.extend_from(&[Vec3::ZERO; 4]);
        let before = arena.points.capacity();

        arena.extend_from(&[Vec3::ZERO; 1]);
        assert!(arena.points.capacity() >= before.max(5));

        // A burst larger than double lands on the exact requirement.
        let huge = vec![Vec3::ZERO; arena.points.capacity() * 3];
        arena.extend_from(&huge);
        assert!(arena.points.capacity() >= arena.points.len());
    }
}
