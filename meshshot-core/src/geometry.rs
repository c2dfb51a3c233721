/// Geometry primitives for indexed triangle meshes
use nalgebra::Point3;

use crate::error::{MeshError, MeshResult};

/// A mesh vertex position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f64>,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }
}

/// A triangle as three zero-based indices into the mesh vertex list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 3],
}

impl Face {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { indices: [a, b, c] }
    }

    /// The three edges of the triangle, in winding order
    pub fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.indices;
        [(a, b), (b, c), (c, a)]
    }
}

/// An indexed triangle mesh.
///
/// Every face index is guaranteed to be in range for `vertices`; the mesh
/// is immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh, rejecting faces that reference missing vertices
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> MeshResult<Self> {
        let vertex_count = vertices.len();
        for (i, face) in faces.iter().enumerate() {
            if let Some(&bad) = face.indices.iter().find(|&&idx| idx >= vertex_count) {
                return Err(MeshError::Index {
                    line: i + 1,
                    index: bad as i64,
                    vertex_count,
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Assemble a mesh from parts whose indices were already range-checked
    pub(crate) fn from_checked(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Create an axis-aligned cube centered on the origin, 8 vertices and 12 faces
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Vertex::new(-h, -h, -h),
            Vertex::new(h, -h, -h),
            Vertex::new(h, h, -h),
            Vertex::new(-h, h, -h),
            Vertex::new(-h, -h, h),
            Vertex::new(h, -h, h),
            Vertex::new(h, h, h),
            Vertex::new(-h, h, h),
        ];
        let faces = vec![
            // Bottom
            Face::new(0, 2, 1),
            Face::new(0, 3, 2),
            // Top
            Face::new(4, 5, 6),
            Face::new(4, 6, 7),
            // Front
            Face::new(0, 1, 5),
            Face::new(0, 5, 4),
            // Back
            Face::new(3, 7, 6),
            Face::new(3, 6, 2),
            // Left
            Face::new(0, 4, 7),
            Face::new(0, 7, 3),
            // Right
            Face::new(1, 2, 6),
            Face::new(1, 6, 5),
        ];
        Self::from_checked(vertices, faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let cube = Mesh::cube(1.0);
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 12);
        assert!(Mesh::new(cube.vertices().to_vec(), cube.faces().to_vec()).is_ok());
    }

    #[test]
    fn test_out_of_range_face_rejected() {
        let vertices = vec![Vertex::new(0.0, 0.0, 0.0), Vertex::new(1.0, 0.0, 0.0)];
        let err = Mesh::new(vertices, vec![Face::new(0, 1, 2)]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::Index {
                index: 2,
                vertex_count: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_face_edges_wrap() {
        let face = Face::new(4, 7, 9);
        assert_eq!(face.edges(), [(4, 7), (7, 9), (9, 4)]);
    }
}
