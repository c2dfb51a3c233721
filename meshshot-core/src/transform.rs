/// Model transformations that place a mesh into the canonical view volume
use nalgebra::{Matrix4, Vector3};

use crate::bounds::BoundingBox;

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Map the cubic envelope `center ± half_extent` onto `[-1, 1]` on every axis.
    ///
    /// A zero-extent envelope (a single point) is translated only.
    pub fn framing_matrix(bbox: &BoundingBox) -> Matrix4<f64> {
        let scale = if bbox.half_extent > 0.0 {
            1.0 / bbox.half_extent
        } else {
            1.0
        };
        Self::scale_matrix(scale, scale, scale)
            * Self::translation_matrix(-bbox.center.x, -bbox.center.y, -bbox.center.z)
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f64>,
        view: &Matrix4<f64>,
        projection: &Matrix4<f64>,
    ) -> Matrix4<f64> {
        projection * view * model
    }
}
