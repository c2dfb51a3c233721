/// Batch rasterizer for text meshes
///
/// Loads each configured mesh, reports its statistics, and writes a
/// standalone surface image, a four-view grid, and a cross-shape comparison.
pub mod colormap;
pub mod config;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod report;
pub mod view;

pub use colormap::ColorScheme;
pub use config::{ManifestEntry, PipelineConfig, RenderSettings};
pub use error::{PipelineError, PipelineResult};
pub use layout::{ComparisonGridBuilder, Grid, MultiViewLayout};
pub use pipeline::{BatchPipeline, BatchReport, LoadedShape, ShapeFailure, ShapeRecord};
pub use renderer::Rasterizer;
pub use report::{ConsoleReporter, NullReporter, Reporter};
pub use view::{RenderMode, RenderedView, ViewComposer};
