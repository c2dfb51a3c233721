/// Multi-view grids: the four canonical angles of one mesh, and the
/// surface/wireframe comparison across all loaded shapes.
use image::{imageops, Rgb, RgbImage};
use meshshot_core::{BoundingBox, Camera, Mesh, ViewPreset};

use crate::colormap::ColorScheme;
use crate::config::RenderSettings;
use crate::pipeline::ShapeRecord;
use crate::view::{RenderMode, RenderedView, ViewComposer};

/// Cell size of the four-view grid, in inches (a 16x12 figure split 2x2)
pub const MULTI_VIEW_CELL_INCHES: (f64, f64) = (8.0, 6.0);
/// Cell size of the comparison grid, in inches
pub const COMPARISON_CELL_INCHES: (f64, f64) = (6.0, 6.0);

/// Row-major grid of rendered views.
///
/// The shape is fixed at construction; a 2xN grid stays two rows even for N = 1.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<RenderedView>,
}

impl Grid {
    /// Returns `None` unless `cells.len() == rows * cols`
    pub fn new(rows: usize, cols: usize, cells: Vec<RenderedView>) -> Option<Self> {
        (cells.len() == rows * cols).then_some(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&RenderedView> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    pub fn row(&self, row: usize) -> Option<&[RenderedView]> {
        if row >= self.rows {
            return None;
        }
        Some(&self.cells[row * self.cols..(row + 1) * self.cols])
    }

    pub fn cells(&self) -> &[RenderedView] {
        &self.cells
    }

    /// Stitch the cells into a single image with `gap` pixels between and around them
    pub fn to_image(&self, background: Rgb<u8>, gap: u32) -> RgbImage {
        let col_widths: Vec<u32> = (0..self.cols)
            .map(|c| {
                (0..self.rows)
                    .filter_map(|r| self.cell(r, c))
                    .map(|v| v.image.width())
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let row_heights: Vec<u32> = (0..self.rows)
            .map(|r| {
                self.row(r)
                    .into_iter()
                    .flatten()
                    .map(|v| v.image.height())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let width = col_widths.iter().sum::<u32>() + gap * (self.cols as u32 + 1);
        let height = row_heights.iter().sum::<u32>() + gap * (self.rows as u32 + 1);
        let mut canvas = RgbImage::from_pixel(width.max(1), height.max(1), background);

        let mut y = gap;
        for (r, row_height) in row_heights.iter().enumerate() {
            let mut x = gap;
            for (c, col_width) in col_widths.iter().enumerate() {
                if let Some(view) = self.cell(r, c) {
                    imageops::replace(&mut canvas, &view.image, x as i64, y as i64);
                }
                x += col_width + gap;
            }
            y += row_height + gap;
        }
        canvas
    }
}

/// Four surface views of one mesh at the canonical presets
pub struct MultiViewLayout {
    composer: ViewComposer,
}

impl MultiViewLayout {
    pub fn new(settings: &RenderSettings) -> Self {
        let (w, h) = settings.pixels(MULTI_VIEW_CELL_INCHES);
        Self {
            composer: settings.composer(w, h),
        }
    }

    /// 2x2 grid: isometric, front / side, top
    pub fn compose(&self, mesh: &Mesh, bbox: &BoundingBox) -> Grid {
        let cells = ViewPreset::ALL
            .iter()
            .zip(ColorScheme::VIEW_SCHEMES)
            .map(|(&preset, scheme)| {
                let mut view = self.composer.render_with_camera(
                    mesh,
                    bbox,
                    Camera::preset(preset),
                    scheme,
                    RenderMode::Surface,
                );
                view.title = preset.label().to_string();
                view
            })
            .collect();
        Grid {
            rows: 2,
            cols: 2,
            cells,
        }
    }
}

/// Surface row over wireframe row, one column per shape
pub struct ComparisonGridBuilder {
    composer: ViewComposer,
    max_wireframe_faces: Option<usize>,
}

impl ComparisonGridBuilder {
    pub fn new(settings: &RenderSettings) -> Self {
        let (w, h) = settings.pixels(COMPARISON_CELL_INCHES);
        Self {
            composer: settings.composer(w, h),
            max_wireframe_faces: settings.max_wireframe_faces,
        }
    }

    pub fn with_max_wireframe_faces(mut self, cap: Option<usize>) -> Self {
        self.max_wireframe_faces = cap;
        self
    }

    /// Build the 2xN comparison. `None` when there are no shapes.
    pub fn compose(&self, shapes: &[ShapeRecord]) -> Option<Grid> {
        if shapes.is_empty() {
            return None;
        }
        let camera = Camera::preset(ViewPreset::Isometric);

        let surfaces = shapes.iter().map(|shape| {
            let mut view = self.composer.render_with_camera(
                &shape.mesh,
                &shape.bbox,
                camera,
                ColorScheme::Viridis,
                RenderMode::Surface,
            );
            view.title = format!("{} - Surface", shape.display_name);
            view
        });
        let wireframes = shapes.iter().map(|shape| {
            let mut view = self.composer.render_with_camera(
                &shape.mesh,
                &shape.bbox,
                camera,
                ColorScheme::Viridis,
                RenderMode::Wireframe {
                    max_faces: self.max_wireframe_faces,
                },
            );
            view.title = format!("{} - Wireframe", shape.display_name);
            view
        });

        Grid::new(2, shapes.len(), surfaces.chain(wireframes).collect())
    }
}
