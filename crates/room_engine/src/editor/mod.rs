//! Editing session
//!
//! [`EditorSession`] owns everything one open room needs: the project, the
//! interaction state, the gesture machine, imported assets and background
//! jobs. Hosts feed it pointer events and call [`EditorSession::tick`] once
//! per frame; the [`PropertyPanel`] edits the selected element by value.

mod panel;
mod session;

pub use panel::{Axis, PropertyPanel, INTENSITY_MAX, INTENSITY_STEP, ROTATE_STEP};
pub use session::{EditorSession, SessionEvent, TickReport, DEFAULT_PROJECT_NAME};

use crate::assets::{ExportError, ImportError};
use crate::config::ConfigError;
use crate::model::{ColorError, ProjectError};

/// Errors surfaced by the editing session
#[derive(thiserror::Error, Debug)]
pub enum EditorError {
    /// No catalogue entry with this key
    #[error("Unknown library item '{0}'")]
    UnknownLibraryItem(String),

    /// Nothing is selected for a panel edit
    #[error("No element selected")]
    NothingSelected,

    /// Element model error
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Panel color field could not be parsed
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Drag payload could not be encoded
    #[error("Failed to encode drag payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A worker thread could not be started
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
