//! # Room Engine
//!
//! Interactive room layout editing: place furniture, walls and lights, move
//! and turn them with the pointer, bring in external models, and export the
//! finished room as a binary glTF file.
//!
//! ## Features
//!
//! - **Gesture machine**: ray/plane dragging and modifier rotation with a
//!   single active gesture and camera-orbit arbitration
//! - **Procedural furniture**: deterministic geometry from element type tags
//! - **GLB import**: any glTF 2.0 binary, normalized to a fixed size
//! - **GLB export**: byte-for-byte reproducible output with point lights
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use room_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = EditorSession::new(EditorConfig::default())?;
//!     let camera = session.default_camera(16.0 / 9.0);
//!
//!     let sofa = session.add_from_library("sofa-1")?;
//!     session.pointer_down_on(PointerTarget::Element(sofa), Vec2::zeros(), Modifiers::empty());
//!     session.pointer_move(Vec2::new(0.2, 0.0));
//!     session.pointer_up();
//!     session.tick(&camera);
//!
//!     session.export_to_dir(".")?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod spatial;
pub mod render;
pub mod input;
pub mod model;
pub mod interaction;
pub mod scene;
pub mod assets;
pub mod editor;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{export_scene, AssetImporter, AssetLibrary, ExportError, ImportError},
        config::{Config, EditorConfig},
        editor::{EditorError, EditorSession, PropertyPanel, SessionEvent},
        foundation::math::{Transform, Vec2, Vec3},
        input::{ModifierKey, Modifiers},
        interaction::{InteractionContext, PointerEvent, PointerTarget, TransformCommit},
        model::{Color, DesignElement, ElementId, ElementKind, Project, Subtype},
        render::Camera,
        scene::{build_export_scene, synthesize, SceneNode},
    };
}
