//! Procedural geometry synthesis and scene assembly
//!
//! [`synthesize`] is the single mapping from an element's type tags to
//! concrete geometry. Both consumers go through it:
//!
//! - the live view ([`build_live_scene`]) which adds selection decorations
//! - the exporter ([`build_export_scene`]) which never does
//!
//! Concrete geometry is expressed as a small [`SceneNode`] tree per element:
//! a group node carrying the element transform with one child per primitive,
//! light, or imported asset root.

mod assemble;
mod catalog;
mod geometry;
mod live;
mod node;
mod synthesizer;

pub use assemble::{build_export_scene, element_node, element_world_bounds, EXPORT_ROOT_NAME};
pub use geometry::{ElementGeometry, GeometryPart, LightSpec, MaterialSpec, PrimitiveSpec, Shape};
pub use live::{build_live_scene, selection_ring, SELECTION_RING_NAME, SELECTION_TINT};
pub use node::{MeshPrimitive, PointLight, SceneNode};
pub use synthesizer::synthesize;
