/// Meshshot - render statistics and preview images for a batch of meshes
///
/// With no arguments, loads sphere_mesh.obj, cube_mesh.obj and gyroid_mesh.obj
/// from the working directory and writes images to ./results.
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use meshshot_render::{BatchPipeline, ManifestEntry, PipelineConfig, RenderSettings};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to write images into (created if missing)
    #[arg(short, long, value_name = "DIR", default_value = "results")]
    output_dir: PathBuf,

    /// Mesh to render, as PATH=NAME. Repeat for several; replaces the default set
    #[arg(short, long = "shape", value_name = "PATH=NAME")]
    shapes: Vec<ManifestEntry>,

    /// Output resolution in pixels per inch of figure size
    #[arg(long, default_value_t = 300)]
    dpi: u32,

    /// Faces outlined in comparison wireframes
    #[arg(long, value_name = "N", default_value_t = 500, conflicts_with = "no_edge_cap")]
    max_wireframe_faces: usize,

    /// Outline every face in comparison wireframes
    #[arg(long)]
    no_edge_cap: bool,

    /// Also write an uncapped wireframe image per shape
    #[arg(short, long)]
    wireframe: bool,
}

impl Args {
    fn into_config(self) -> PipelineConfig {
        let manifest = if self.shapes.is_empty() {
            PipelineConfig::default().manifest
        } else {
            self.shapes
        };
        let render = RenderSettings {
            dpi: self.dpi,
            max_wireframe_faces: (!self.no_edge_cap).then_some(self.max_wireframe_faces),
            write_wireframe: self.wireframe,
            ..RenderSettings::default()
        };
        PipelineConfig::new(manifest, self.output_dir).with_render(render)
    }
}

fn main() -> ExitCode {
    // Keep logging setup in the binary so the libraries stay unopinionated.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config();
    let mut pipeline = BatchPipeline::new(config);

    match pipeline.run() {
        Ok(report) if report.failures.is_empty() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
