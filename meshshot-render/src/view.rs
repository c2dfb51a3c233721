/// Single-camera mesh views.
///
/// A `ViewComposer` renders one mesh from one camera in one mode. Every
/// view is framed on the mesh's cubic envelope, so all three axes share the
/// same span regardless of how anisotropic the mesh is.
use image::{Rgb, RgbImage};
use log::debug;
use meshshot_core::{BoundingBox, Camera, Mesh, Transform};
use nalgebra::Point3;

use crate::colormap::ColorScheme;
use crate::renderer::{Rasterizer, ScreenPoint};

const VERTEX_COLOR: Rgb<u8> = Rgb([220, 30, 30]);
const VERTEX_ALPHA: f32 = 0.6;
const EDGE_COLOR: Rgb<u8> = Rgb([30, 60, 220]);
const EDGE_ALPHA: f32 = 0.3;
const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
/// Fraction of a face's color kept when it is seen edge-on
const AMBIENT: f64 = 0.35;

/// How a view draws the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Shaded, color-mapped triangles
    Surface,
    /// Vertex markers plus triangle edges. Edges are drawn for at most
    /// `max_faces` faces when a cap is given; vertices are never capped.
    Wireframe { max_faces: Option<usize> },
}

/// A finished view and what went into it
#[derive(Debug, Clone)]
pub struct RenderedView {
    pub image: RgbImage,
    pub camera: Camera,
    pub mode: RenderMode,
    pub title: String,
    /// Faces filled (surface) or outlined (wireframe)
    pub faces_drawn: usize,
    /// Vertex markers drawn; always zero for surface views
    pub points_drawn: usize,
}

/// Renders meshes into fixed-size views
#[derive(Debug, Clone)]
pub struct ViewComposer {
    width: u32,
    height: u32,
    background: Rgb<u8>,
    surface_alpha: f32,
    /// Alpha of the triangle outlines drawn over surface faces, if any
    surface_edge_alpha: Option<f32>,
}

impl ViewComposer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            background: Rgb([255, 255, 255]),
            surface_alpha: 0.8,
            surface_edge_alpha: None,
        }
    }

    pub fn with_background(mut self, color: Rgb<u8>) -> Self {
        self.background = color;
        self
    }

    pub fn with_surface_alpha(mut self, alpha: f32) -> Self {
        self.surface_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Outline each surface face in black at `alpha`; `None` disables outlines
    pub fn with_surface_edges(mut self, alpha: Option<f32>) -> Self {
        self.surface_edge_alpha = alpha.map(|a| a.clamp(0.0, 1.0));
        self
    }

    /// Render `mesh` as seen from `(elevation, azimuth)` degrees
    pub fn render(
        &self,
        mesh: &Mesh,
        bbox: &BoundingBox,
        elevation: f64,
        azimuth: f64,
        scheme: ColorScheme,
        mode: RenderMode,
    ) -> RenderedView {
        self.render_with_camera(mesh, bbox, Camera::new(elevation, azimuth), scheme, mode)
    }

    pub fn render_with_camera(
        &self,
        mesh: &Mesh,
        bbox: &BoundingBox,
        camera: Camera,
        scheme: ColorScheme,
        mode: RenderMode,
    ) -> RenderedView {
        let camera = camera.with_viewport(self.width, self.height);
        let model = Transform::framing_matrix(bbox);
        let mvp = camera.mvp(&model);

        let framed: Vec<Point3<f64>> = mesh
            .vertices()
            .iter()
            .map(|v| model.transform_point(&v.position))
            .collect();
        let screen: Vec<Option<ScreenPoint>> = mesh
            .vertices()
            .iter()
            .map(|v| camera.project_to_screen(&v.position, &mvp, self.width, self.height))
            .collect();

        let mut raster = Rasterizer::new(self.width, self.height, self.background);
        let (faces_drawn, points_drawn) = match mode {
            RenderMode::Surface => (
                self.draw_surface(&mut raster, mesh, &camera, &framed, &screen, scheme),
                0,
            ),
            RenderMode::Wireframe { max_faces } => {
                self.draw_wireframe(&mut raster, mesh, &screen, max_faces)
            }
        };
        debug!(
            "rendered {:?} view at elev={} azim={}: {} faces, {} points",
            mode, camera.elevation, camera.azimuth, faces_drawn, points_drawn
        );

        RenderedView {
            image: raster.into_image(),
            camera,
            mode,
            title: String::new(),
            faces_drawn,
            points_drawn,
        }
    }

    /// Painter's-order surface fill. Returns the number of faces drawn.
    fn draw_surface(
        &self,
        raster: &mut Rasterizer,
        mesh: &Mesh,
        camera: &Camera,
        framed: &[Point3<f64>],
        screen: &[Option<ScreenPoint>],
        scheme: ColorScheme,
    ) -> usize {
        let view_dir = camera.eye_direction();

        let mut visible: Vec<([ScreenPoint; 3], f64, Rgb<u8>)> = Vec::with_capacity(mesh.face_count());
        for face in mesh.faces() {
            let [a, b, c] = face.indices;
            let (Some(pa), Some(pb), Some(pc)) = (screen[a], screen[b], screen[c]) else {
                continue;
            };
            let depth = (pa.2 + pb.2 + pc.2) / 3.0;

            // Framed z lies in [-1, 1]; color by mean height like a height map
            let (fa, fb, fc) = (framed[a], framed[b], framed[c]);
            let height = ((fa.z + fb.z + fc.z) / 3.0 + 1.0) / 2.0;
            let brightness = (fb - fa)
                .cross(&(fc - fa))
                .try_normalize(1e-12)
                .map_or(1.0, |n| n.dot(&view_dir).abs());
            let shade = AMBIENT + (1.0 - AMBIENT) * brightness;

            let base = scheme.sample(height);
            let color = Rgb(base.0.map(|c| (c as f64 * shade).round() as u8));
            visible.push(([pa, pb, pc], depth, color));
        }

        // Farthest first so nearer faces blend over them
        visible.sort_by(|a, b| b.1.total_cmp(&a.1));
        for (coords, _, color) in &visible {
            raster.fill_triangle(coords, *color, self.surface_alpha);
            if let Some(alpha) = self.surface_edge_alpha {
                let [a, b, c] = *coords;
                for (from, to) in [(a, b), (b, c), (c, a)] {
                    raster.draw_line(from, to, OUTLINE_COLOR, alpha);
                }
            }
        }
        visible.len()
    }

    /// Returns `(faces outlined, vertices marked)`
    fn draw_wireframe(
        &self,
        raster: &mut Rasterizer,
        mesh: &Mesh,
        screen: &[Option<ScreenPoint>],
        max_faces: Option<usize>,
    ) -> (usize, usize) {
        let radius = (self.width.min(self.height) as f64 / 600.0).max(0.5);

        let mut points = 0;
        for p in screen.iter().flatten() {
            raster.draw_point(*p, radius, VERTEX_COLOR, VERTEX_ALPHA);
            points += 1;
        }

        let cap = max_faces.unwrap_or(usize::MAX);
        let mut faces = 0;
        for face in mesh.faces().iter().take(cap) {
            for (from, to) in face.edges() {
                if let (Some(p0), Some(p1)) = (screen[from], screen[to]) {
                    raster.draw_line(p0, p1, EDGE_COLOR, EDGE_ALPHA);
                }
            }
            faces += 1;
        }
        (faces, points)
    }
}
