/// Errors raised while running a batch
use std::path::PathBuf;

use meshshot_core::MeshError;
use thiserror::Error;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("failed to write image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// A missing input only skips its shape
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::Mesh(e) if e.is_missing_file())
    }
}
