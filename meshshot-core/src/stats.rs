/// Descriptive statistics snapshot for a mesh
use nalgebra::{Point3, Vector3};

use crate::bounds::BoundingBox;
use crate::error::MeshResult;
use crate::geometry::Mesh;

/// Counts and extents of a mesh at the time it was measured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub face_count: usize,
    pub min: Point3<f64>,
    pub max: Point3<f64>,
    /// Bounding-box midpoint
    pub center: Point3<f64>,
    /// Arithmetic mean of all vertex positions
    pub centroid: Point3<f64>,
    /// `max - min` per axis
    pub size: Vector3<f64>,
}

impl MeshStats {
    /// Measure a mesh. Fails with `EmptyMesh` when there are no vertices.
    pub fn report(mesh: &Mesh) -> MeshResult<Self> {
        let bbox = BoundingBox::compute(mesh.vertices())?;
        Ok(Self::with_bounds(mesh, &bbox))
    }

    /// Measure a mesh whose bounds were already computed
    pub fn with_bounds(mesh: &Mesh, bbox: &BoundingBox) -> Self {
        let sum = mesh
            .vertices()
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.position.coords);
        let centroid = Point3::from(sum / mesh.vertex_count().max(1) as f64);

        Self {
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
            min: bbox.min,
            max: bbox.max,
            center: bbox.center,
            centroid,
            size: bbox.size(),
        }
    }
}
