//! Import and export errors

/// Why an asset could not be imported
///
/// Import failures never touch the project; the element is appended only
/// after a fully successful import.
#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    /// The file name does not carry the supported extension
    #[error("Please select a GLB file. ('{0}' is not supported)")]
    UnsupportedExtension(String),

    /// The bytes are not a readable binary glTF asset
    #[error("Failed to parse asset: {0}")]
    ParseFailure(String),

    /// The asset has no measurable extent
    #[error("Asset has no measurable size (largest dimension {max_dimension})")]
    DegenerateAsset {
        /// Largest bounding-box side found (zero or non-finite)
        max_dimension: f32,
    },
}

impl ImportError {
    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedExtension(_) => "Please select a GLB file.".to_string(),
            Self::ParseFailure(_) | Self::DegenerateAsset { .. } => {
                format!("Failed to import model. {self}")
            }
        }
    }
}

impl From<gltf::Error> for ImportError {
    fn from(err: gltf::Error) -> Self {
        Self::ParseFailure(err.to_string())
    }
}

/// Why a scene could not be exported
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// The scene could not be encoded
    #[error("Failed to serialize scene: {0}")]
    SerializationFailure(String),

    /// Nothing to export
    #[error("Project has no elements to export")]
    EmptyProject,

    /// Writing the exported file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationFailure(err.to_string())
    }
}

impl From<gltf::Error> for ExportError {
    fn from(err: gltf::Error) -> Self {
        Self::SerializationFailure(err.to_string())
    }
}
