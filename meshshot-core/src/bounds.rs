/// Symmetric cubic bounding envelope used for equal-aspect framing
use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, MeshResult};
use crate::geometry::Vertex;

/// Per-axis extent of a vertex set plus its cubic framing envelope.
///
/// `half_extent` is half of the largest axis range and is applied to every
/// axis, so anisotropic meshes are framed without distortion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
    pub center: Point3<f64>,
    pub half_extent: f64,
}

impl BoundingBox {
    /// Compute the envelope of a vertex set. Fails for an empty set.
    pub fn compute(vertices: &[Vertex]) -> MeshResult<Self> {
        let first = vertices.first().ok_or(MeshError::EmptyMesh)?.position;
        let (min, max) = vertices
            .iter()
            .fold((first, first), |(min, max), v| {
                (min.inf(&v.position), max.sup(&v.position))
            });

        let size = max - min;
        Ok(Self {
            min,
            max,
            center: nalgebra::center(&min, &max),
            half_extent: size.max() / 2.0,
        })
    }

    /// Actual per-axis range, `max - min`
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Axis limits `center ± half_extent`, identical span on x, y and z
    pub fn axis_limits(&self) -> [(f64, f64); 3] {
        let h = self.half_extent;
        [
            (self.center.x - h, self.center.x + h),
            (self.center.y - h, self.center.y + h),
            (self.center.z - h, self.center.z + h),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_cube_envelope() {
        let cube = Mesh::cube(1.0);
        let bbox = BoundingBox::compute(cube.vertices()).unwrap();
        assert_relative_eq!(bbox.half_extent, 0.5);
        assert_relative_eq!(bbox.center, Point3::origin());
    }

    #[test]
    fn test_cube_with_half_unit_corners() {
        // 8 corners at ±0.5 per axis is a unit cube with range 1 on every axis
        let vertices: Vec<Vertex> = (0..8)
            .map(|i| {
                let s = |bit: usize| if i & bit == 0 { -0.5 } else { 0.5 };
                Vertex::new(s(1), s(2), s(4))
            })
            .collect();
        let bbox = BoundingBox::compute(&vertices).unwrap();
        assert_relative_eq!(bbox.size(), Vector3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(bbox.half_extent, 0.5);
        assert_relative_eq!(bbox.center, Point3::origin());
    }

    #[test]
    fn test_anisotropic_uses_largest_axis() {
        let vertices = vec![Vertex::new(0.0, 0.0, 0.0), Vertex::new(10.0, 2.0, 1.0)];
        let bbox = BoundingBox::compute(&vertices).unwrap();
        assert_relative_eq!(bbox.half_extent, 5.0);
        assert_relative_eq!(bbox.center, Point3::new(5.0, 1.0, 0.5));

        let [x, y, z] = bbox.axis_limits();
        assert_relative_eq!(x.1 - x.0, 10.0);
        assert_relative_eq!(y.1 - y.0, 10.0);
        assert_relative_eq!(z.1 - z.0, 10.0);
        assert_relative_eq!(y.0, -4.0);
    }

    #[test]
    fn test_single_point_has_zero_extent() {
        let bbox = BoundingBox::compute(&[Vertex::new(1.0, 2.0, 3.0)]).unwrap();
        assert_eq!(bbox.half_extent, 0.0);
        assert_eq!(bbox.center, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_empty_fails() {
        assert!(matches!(
            BoundingBox::compute(&[]),
            Err(MeshError::EmptyMesh)
        ));
    }
}
