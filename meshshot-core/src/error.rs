/// Error taxonomy for mesh loading and bounding
use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh operations
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while loading or measuring a mesh
#[derive(Debug, Error)]
pub enum MeshError {
    /// The input file does not exist or cannot be opened
    #[error("mesh file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// A `v` or `f` line is short a token or carries a non-numeric token
    #[error("malformed line {line}: {message}")]
    Format { line: usize, message: String },

    /// A face references a vertex outside `[0, vertex_count)` after 1-based conversion.
    /// `line` is the source line, or the 1-based face ordinal for meshes built in memory.
    #[error("face on line {line} references vertex {index}, mesh has {vertex_count} vertices")]
    Index {
        line: usize,
        index: i64,
        vertex_count: usize,
    },

    /// Bounds are undefined for a mesh without vertices
    #[error("mesh has no vertices")]
    EmptyMesh,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Whether the error only means the input was absent
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::MissingFile { .. })
    }
}
