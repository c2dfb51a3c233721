/// Meshshot Core Library - Shared geometry and projection logic
///
/// This library provides the stateless core of the mesh rendering pipeline:
/// text mesh parsing, bounding and statistics, framing transforms, and the
/// orbit camera used to project meshes onto an image plane.

pub mod bounds;
pub mod error;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod stats;
pub mod transform;

// Re-export commonly used types
pub use bounds::BoundingBox;
pub use error::{MeshError, MeshResult};
pub use geometry::{Face, Mesh, Vertex};
pub use obj::{load_obj, parse_obj};
pub use projection::{Camera, ViewPreset};
pub use stats::MeshStats;
pub use transform::Transform;
