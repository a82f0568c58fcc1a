//! Scene export

use super::{write_glb, AssetLibrary, ExportError};
use crate::model::DesignElement;
use crate::scene::build_export_scene;

/// Export elements as a GLB byte buffer
///
/// The scene is rebuilt from the element list through the same synthesis
/// path as the live view, without selection decorations. Read-only with
/// respect to the elements; exporting twice yields identical bytes.
pub fn export_scene(elements: &[DesignElement], assets: &AssetLibrary) -> Result<Vec<u8>, ExportError> {
    let root = build_export_scene(elements, assets);
    let bytes = write_glb(&root)?;
    log::info!("Exported {} elements ({} bytes)", elements.len(), bytes.len());
    Ok(bytes)
}
