//! Element model
//!
//! The persistent side of the editor: placed elements, the ordered project
//! that owns them, and the catalogue new elements are created from.
//!
//! Elements never reference each other. The only back-reference anywhere
//! in the editor is the transient selection held by
//! [`crate::interaction::InteractionContext`].

mod color;
mod element;
mod ids;
pub mod library;
mod project;

pub use color::{Color, ColorError};
pub use element::{DesignElement, ElementKind, Subtype};
pub use ids::{ElementId, IdGenerator};
pub use library::{LibraryItem, FURNITURE_LIBRARY};
pub use project::{Project, ProjectError};
