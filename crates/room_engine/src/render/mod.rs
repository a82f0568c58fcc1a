//! Rendering-side primitives
//!
//! The editor does not own a GPU renderer; the viewport host does. This
//! module holds what both the host and the exporter need: the camera model
//! used for ray casting and CPU-side procedural meshes.

pub mod camera;
pub mod mesh;

pub use camera::{ray_from_pointer, Camera};
pub use mesh::MeshData;
