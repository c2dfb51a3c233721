/// Stateless orbit camera and orthographic projection
use nalgebra::{Matrix4, Point3, Vector3};

use crate::transform::Transform;

/// Distance from the eye to the origin of the framed view volume
const EYE_DISTANCE: f64 = 10.0;

/// Half-width of the orthographic frustum. The framed mesh lives in `[-1, 1]^3`,
/// whose circumscribed sphere has radius √3, so any orientation stays in view.
const FRAME_RADIUS: f64 = 1.732_050_807_568_877_2;

/// One of the fixed camera angles used for multi-angle inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPreset {
    Isometric,
    Front,
    Side,
    Top,
}

impl ViewPreset {
    /// Presets in grid order: row-major, isometric first
    pub const ALL: [ViewPreset; 4] = [Self::Isometric, Self::Front, Self::Side, Self::Top];

    /// `(elevation, azimuth)` in degrees
    pub fn angles(self) -> (f64, f64) {
        match self {
            Self::Isometric => (30.0, 45.0),
            Self::Front => (0.0, 0.0),
            Self::Side => (0.0, 90.0),
            Self::Top => (90.0, 0.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Isometric => "Isometric View",
            Self::Front => "Front View",
            Self::Side => "Side View",
            Self::Top => "Top View",
        }
    }
}

/// Camera orbiting the origin with z as world up.
///
/// Elevation and azimuth are in degrees; each render builds its own camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub elevation: f64,
    pub azimuth: f64,
    pub aspect: f64,
}

impl Camera {
    pub fn new(elevation: f64, azimuth: f64) -> Self {
        Self {
            elevation,
            azimuth,
            aspect: 1.0,
        }
    }

    pub fn preset(preset: ViewPreset) -> Self {
        let (elevation, azimuth) = preset.angles();
        Self::new(elevation, azimuth)
    }

    /// Match the frustum to a viewport so pixels stay square
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.aspect = width.max(1) as f64 / height.max(1) as f64;
        self
    }

    /// Unit vector from the origin toward the eye
    pub fn eye_direction(&self) -> Vector3<f64> {
        let (e, a) = (self.elevation.to_radians(), self.azimuth.to_radians());
        Vector3::new(e.cos() * a.cos(), e.cos() * a.sin(), e.sin())
    }

    /// Screen-up vector, the elevation derivative of the eye direction.
    /// Stays well defined when looking straight down the z axis.
    pub fn up_vector(&self) -> Vector3<f64> {
        let (e, a) = (self.elevation.to_radians(), self.azimuth.to_radians());
        Vector3::new(-e.sin() * a.cos(), -e.sin() * a.sin(), e.cos())
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f64> {
        let eye = Point3::from(self.eye_direction() * EYE_DISTANCE);
        Matrix4::look_at_rh(&eye, &Point3::origin(), &self.up_vector())
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        let (half_w, half_h) = if self.aspect >= 1.0 {
            (FRAME_RADIUS * self.aspect, FRAME_RADIUS)
        } else {
            (FRAME_RADIUS, FRAME_RADIUS / self.aspect)
        };
        Matrix4::new_orthographic(
            -half_w,
            half_w,
            -half_h,
            half_h,
            EYE_DISTANCE - 2.0 * FRAME_RADIUS,
            EYE_DISTANCE + 2.0 * FRAME_RADIUS,
        )
    }

    /// Combined model-view-projection for a given model matrix
    pub fn mvp(&self, model: &Matrix4<f64>) -> Matrix4<f64> {
        Transform::mvp_matrix(model, &self.view_matrix(), &self.projection_matrix())
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `(x, y, depth)` with depth increasing away from the eye, or
    /// `None` when the point falls outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f64>,
        mvp: &Matrix4<f64>,
        width: u32,
        height: u32,
    ) -> Option<(f64, f64, f64)> {
        let ndc = mvp.transform_point(point);

        if ndc.x.abs() > 1.0 + 1e-9 || ndc.y.abs() > 1.0 + 1e-9 || ndc.z.abs() > 1.0 + 1e-9 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f64;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f64;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::preset(ViewPreset::Isometric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn project(camera: &Camera, p: Point3<f64>) -> (f64, f64, f64) {
        let mvp = camera.mvp(&Matrix4::identity());
        camera.project_to_screen(&p, &mvp, 100, 100).unwrap()
    }

    #[test]
    fn test_preset_angles() {
        assert_eq!(ViewPreset::Isometric.angles(), (30.0, 45.0));
        assert_eq!(ViewPreset::Front.angles(), (0.0, 0.0));
        assert_eq!(ViewPreset::Side.angles(), (0.0, 90.0));
        assert_eq!(ViewPreset::Top.angles(), (90.0, 0.0));
    }

    #[test]
    fn test_up_is_orthogonal_to_eye() {
        for preset in ViewPreset::ALL {
            let camera = Camera::preset(preset);
            assert_relative_eq!(camera.eye_direction().dot(&camera.up_vector()), 0.0, epsilon = 1e-12);
            assert_relative_eq!(camera.up_vector().norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_origin_projects_to_center() {
        for preset in ViewPreset::ALL {
            let (x, y, _) = project(&Camera::preset(preset), Point3::origin());
            assert_relative_eq!(x, 50.0, epsilon = 1e-9);
            assert_relative_eq!(y, 50.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_front_view_axes() {
        let camera = Camera::preset(ViewPreset::Front);
        // Looking down -x: +z is up on screen, +y is to the right
        let (_, y_up, _) = project(&camera, Point3::new(0.0, 0.0, 1.0));
        let (x_right, _, _) = project(&camera, Point3::new(0.0, 1.0, 0.0));
        assert!(y_up < 50.0);
        assert!(x_right > 50.0);

        // Nearer the eye means smaller depth
        let (_, _, near) = project(&camera, Point3::new(1.0, 0.0, 0.0));
        let (_, _, far) = project(&camera, Point3::new(-1.0, 0.0, 0.0));
        assert!(near < far);
    }

    #[test]
    fn test_top_view_is_well_defined() {
        let camera = Camera::preset(ViewPreset::Top);
        let view = camera.view_matrix();
        assert!(view.iter().all(|v| v.is_finite()));
        let (_, _, near) = project(&camera, Point3::new(0.0, 0.0, 1.0));
        let (_, _, far) = project(&camera, Point3::new(0.0, 0.0, -1.0));
        assert!(near < far);
    }

    #[test]
    fn test_framed_cube_corners_stay_in_view() {
        for preset in ViewPreset::ALL {
            let camera = Camera::preset(preset).with_viewport(160, 90);
            let mvp = camera.mvp(&Matrix4::identity());
            for i in 0..8 {
                let s = |bit: i32| if i & bit == 0 { -1.0 } else { 1.0 };
                let corner = Point3::new(s(1), s(2), s(4));
                assert!(camera.project_to_screen(&corner, &mvp, 160, 90).is_some());
            }
        }
    }
}
