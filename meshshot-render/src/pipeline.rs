/// Batch orchestration.
///
/// `BatchPipeline` walks the configured manifest in order. Each entry is
/// loaded, measured, reported and rendered on its own: a missing file is
/// skipped, and a malformed one is recorded as a failure for that shape
/// only. Once every entry has been handled, the comparison grid is written
/// over all shapes that made it through.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::{ImageFormat, RgbImage};
use log::{debug, error, info, warn};
use meshshot_core::{load_obj, BoundingBox, Camera, Mesh, MeshResult, MeshStats};

use crate::colormap::ColorScheme;
use crate::config::{ManifestEntry, PipelineConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::layout::{ComparisonGridBuilder, MultiViewLayout};
use crate::report::{ConsoleReporter, Reporter};
use crate::view::RenderMode;

/// Figure size of the standalone surface and wireframe images, in inches
pub const SINGLE_VIEW_INCHES: (f64, f64) = (12.0, 10.0);
/// Viewpoint of the standalone images, `(elevation, azimuth)` degrees
pub const SINGLE_VIEW_ANGLES: (f64, f64) = (30.0, -60.0);
pub const COMPARISON_FILE: &str = "all_shapes_comparison.png";
/// Alpha of the faint triangle outlines on the standalone surface image
pub const SURFACE_EDGE_ALPHA: f32 = 0.15;

/// A loaded mesh ready for rendering
#[derive(Debug, Clone)]
pub struct ShapeRecord {
    pub display_name: String,
    pub mesh: Mesh,
    pub bbox: BoundingBox,
}

impl ShapeRecord {
    /// Fails with `EmptyMesh` when the mesh has no vertices
    pub fn new(display_name: impl Into<String>, mesh: Mesh) -> MeshResult<Self> {
        let bbox = BoundingBox::compute(mesh.vertices())?;
        Ok(Self {
            display_name: display_name.into(),
            mesh,
            bbox,
        })
    }
}

/// A shape that was loaded and fully rendered
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedShape {
    pub display_name: String,
    pub path: PathBuf,
    pub stats: MeshStats,
}

/// A manifest entry (or the comparison) that could not be completed
#[derive(Debug)]
pub struct ShapeFailure {
    pub display_name: String,
    pub path: PathBuf,
    pub error: PipelineError,
}

/// Outcome of one batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Every image written, in write order
    pub written: Vec<PathBuf>,
    pub loaded: Vec<LoadedShape>,
    pub skipped: Vec<ManifestEntry>,
    pub failures: Vec<ShapeFailure>,
    pub comparison: Option<PathBuf>,
}

/// Runs the load/report/render flow over a manifest
pub struct BatchPipeline {
    config: PipelineConfig,
    reporter: Box<dyn Reporter>,
}

impl BatchPipeline {
    /// Pipeline that reports to stdout
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_reporter(config, ConsoleReporter::stdout())
    }

    pub fn with_reporter(config: PipelineConfig, reporter: impl Reporter + 'static) -> Self {
        Self {
            config,
            reporter: Box::new(reporter),
        }
    }

    /// Process every manifest entry, then the comparison.
    ///
    /// Only failing to create the output directory aborts the run; all
    /// per-shape problems end up in the returned report.
    pub fn run(&mut self) -> PipelineResult<BatchReport> {
        let output_dir = self.config.output_dir.clone();
        fs::create_dir_all(&output_dir).map_err(|source| PipelineError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;
        info!(
            "processing {} manifest entries into {}",
            self.config.manifest.len(),
            output_dir.display()
        );

        let mut report = BatchReport::default();
        let mut shapes = Vec::new();

        for entry in self.config.manifest.clone() {
            let shape = match self.load(&entry) {
                Ok(shape) => shape,
                Err(e) if e.is_missing_file() => {
                    warn!("{} not found, skipping {}", entry.path.display(), entry.display_name);
                    self.reporter.shape_skipped(&entry);
                    report.skipped.push(entry);
                    continue;
                }
                Err(e) => {
                    self.fail(&mut report, &entry.display_name, &entry.path, e);
                    continue;
                }
            };

            let stats = MeshStats::with_bounds(&shape.mesh, &shape.bbox);
            self.reporter.shape_loaded(&entry, &stats);

            match self.render_shape(&entry, &shape, &mut report.written) {
                Ok(()) => {
                    report.loaded.push(LoadedShape {
                        display_name: entry.display_name.clone(),
                        path: entry.path.clone(),
                        stats,
                    });
                    shapes.push(shape);
                }
                Err(e) => self.fail(&mut report, &entry.display_name, &entry.path, e),
            }
        }

        if shapes.is_empty() {
            debug!("no shapes loaded, skipping comparison");
        } else {
            let path = output_dir.join(COMPARISON_FILE);
            match self.render_comparison(&shapes, &path) {
                Ok(()) => {
                    report.written.push(path.clone());
                    report.comparison = Some(path);
                }
                Err(e) => self.fail(&mut report, "comparison", &path, e),
            }
        }

        self.reporter.finished(&report);
        Ok(report)
    }

    fn load(&self, entry: &ManifestEntry) -> PipelineResult<ShapeRecord> {
        info!("loading {} from {}", entry.display_name, entry.path.display());
        let mesh = load_obj(&entry.path)?;
        Ok(ShapeRecord::new(entry.display_name.clone(), mesh)?)
    }

    fn fail(&mut self, report: &mut BatchReport, name: &str, path: &Path, error: PipelineError) {
        error!("{name}: {error}");
        self.reporter.shape_failed(name, &error);
        report.failures.push(ShapeFailure {
            display_name: name.to_string(),
            path: path.to_path_buf(),
            error,
        });
    }

    /// Standalone surface, four-view grid, and optionally a full wireframe
    fn render_shape(
        &self,
        entry: &ManifestEntry,
        shape: &ShapeRecord,
        written: &mut Vec<PathBuf>,
    ) -> PipelineResult<()> {
        let settings = &self.config.render;
        let stem = entry.file_stem();
        let started = Instant::now();

        let (w, h) = settings.pixels(SINGLE_VIEW_INCHES);
        let composer = settings.composer(w, h);
        let (elevation, azimuth) = SINGLE_VIEW_ANGLES;
        let camera = Camera::new(elevation, azimuth);

        let surface = composer
            .clone()
            .with_surface_edges(Some(SURFACE_EDGE_ALPHA))
            .render_with_camera(
            &shape.mesh,
            &shape.bbox,
            camera,
            ColorScheme::Viridis,
            RenderMode::Surface,
        );
        written.push(self.save(&surface.image, &format!("{stem}_surface.png"))?);

        let grid = MultiViewLayout::new(settings).compose(&shape.mesh, &shape.bbox);
        let image = grid.to_image(settings.background(), settings.grid_gap());
        written.push(self.save(&image, &format!("{stem}_multiple_views.png"))?);

        if settings.write_wireframe {
            let wireframe = composer.render_with_camera(
                &shape.mesh,
                &shape.bbox,
                camera,
                ColorScheme::Viridis,
                RenderMode::Wireframe { max_faces: None },
            );
            written.push(self.save(&wireframe.image, &format!("{stem}_wireframe.png"))?);
        }

        debug!("rendered {} in {:.2?}", shape.display_name, started.elapsed());
        Ok(())
    }

    fn render_comparison(&self, shapes: &[ShapeRecord], path: &Path) -> PipelineResult<()> {
        let settings = &self.config.render;
        let Some(grid) = ComparisonGridBuilder::new(settings).compose(shapes) else {
            return Ok(());
        };
        info!("writing comparison of {} shapes", grid.cols());
        let image = grid.to_image(settings.background(), settings.grid_gap());
        write_png(&image, path)
    }

    fn save(&self, image: &RgbImage, file_name: &str) -> PipelineResult<PathBuf> {
        let path = self.config.output_dir.join(file_name);
        write_png(image, &path)?;
        Ok(path)
    }
}

fn write_png(image: &RgbImage, path: &Path) -> PipelineResult<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| PipelineError::Image {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullReporter;
    use meshshot_core::MeshError;

    #[test]
    fn test_shape_record_requires_vertices() {
        let empty = Mesh::default();
        assert!(matches!(
            ShapeRecord::new("Empty", empty),
            Err(MeshError::EmptyMesh)
        ));
        let cube = ShapeRecord::new("Cube", Mesh::cube(4.0)).unwrap();
        assert_eq!(cube.bbox.half_extent, 2.0);
    }

    #[test]
    fn test_unwritable_output_dir_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"not a directory").unwrap();

        let config = PipelineConfig::new(Vec::new(), blocker.join("results"));
        let mut pipeline = BatchPipeline::with_reporter(config, NullReporter);
        assert!(matches!(pipeline.run(), Err(PipelineError::OutputDir { .. })));
    }

    #[test]
    fn test_empty_manifest_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("results");
        let mut pipeline =
            BatchPipeline::with_reporter(PipelineConfig::new(Vec::new(), &out), NullReporter);
        let report = pipeline.run().unwrap();

        assert!(out.is_dir());
        assert!(report.written.is_empty());
        assert!(report.comparison.is_none());
    }
}
