//! Asset import and export
//!
//! The editor reads and writes glTF 2.0 binary (`.glb`) files:
//!
//! - [`AssetImporter`] parses an external asset, measures it, and wraps it as
//!   a uniformly scaled `custom-asset` element
//! - [`export_scene`] rebuilds the scene from the element list and writes it
//!   as a GLB byte buffer
//! - [`AssetJobs`] runs either on a worker thread so the interaction tick
//!   never waits on I/O
//!
//! Imported assets live in the [`AssetLibrary`]; elements refer to them by
//! [`AssetHandle`] so the original bytes stay retrievable.

mod error;
mod export;
mod glb;
mod import;
mod jobs;

pub use error::{ExportError, ImportError};
pub use export::export_scene;
pub use glb::{write_glb, GLB_VERSION};
pub use import::{
    AssetImporter, ParsedAsset, DEFAULT_NORMALIZED_SIZE, IMPORTED_ID_PREFIX, IMPORT_EXTENSION, MAX_NODE_DEPTH,
};
pub use jobs::{AssetJobs, JobOutcome};

use std::sync::Arc;

use crate::foundation::collections::{HandleMap, TypedHandle};
use crate::scene::SceneNode;
use crate::spatial::Aabb;

/// Handle to an imported asset
pub type AssetHandle = TypedHandle<ImportedAsset>;

/// An imported asset: its original bytes plus the converted node tree
#[derive(Debug, Clone)]
pub struct ImportedAsset {
    /// Display name (file name or root node name)
    pub name: String,
    /// The original file bytes
    pub source: Arc<[u8]>,
    /// Converted scene root, in the asset's own units
    pub root: SceneNode,
    /// Bounds of `root` before normalization
    pub bounds: Aabb,
}

/// Storage for imported assets
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    assets: HandleMap<ImportedAsset>,
}

impl AssetLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an asset
    pub fn insert(&mut self, asset: ImportedAsset) -> AssetHandle {
        let name = asset.name.clone();
        let handle = self.assets.insert(asset);
        log::debug!("Stored asset '{}' as {:?}", name, handle);
        handle
    }

    /// Look up an asset
    pub fn get(&self, handle: AssetHandle) -> Option<&ImportedAsset> {
        self.assets.get(handle)
    }

    /// Drop an asset; elements still pointing at it fall back to a box
    pub fn remove(&mut self, handle: AssetHandle) -> Option<ImportedAsset> {
        self.assets.remove(handle)
    }

    /// Number of stored assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
