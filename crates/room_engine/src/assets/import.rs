//! Binary glTF import with scale normalization

use std::collections::HashSet;
use std::sync::Arc;

use gltf::buffer::Data as BufferData;

use super::{AssetLibrary, ImportError, ImportedAsset};
use crate::foundation::math::{Mat4, Quat, Quaternion, Vec3};
use crate::model::{Color, DesignElement, ElementKind, IdGenerator, Subtype};
use crate::render::MeshData;
use crate::scene::{MaterialSpec, PointLight, SceneNode};
use crate::spatial::Aabb;

/// Largest dimension of an imported asset after normalization
pub const DEFAULT_NORMALIZED_SIZE: f32 = 2.0;

/// The only accepted import extension
pub const IMPORT_EXTENSION: &str = "glb";

/// Id prefix for imported elements
pub const IMPORTED_ID_PREFIX: &str = "imported";

/// Deepest node nesting accepted on import
pub const MAX_NODE_DEPTH: usize = 256;

/// A parsed and measured asset, not yet stored or placed
#[derive(Debug, Clone)]
pub struct ParsedAsset {
    /// Converted asset, ready for the library
    pub asset: ImportedAsset,
    /// Uniform scale that brings the largest dimension to the target size
    pub scale: f32,
}

impl ParsedAsset {
    /// Bounds after the element's uniform scale is applied
    pub fn normalized_bounds(&self) -> Aabb {
        Aabb::new(self.asset.bounds.min * self.scale, self.asset.bounds.max * self.scale)
    }

    /// Store the asset and wrap it as a new element at the origin
    pub fn into_element(self, library: &mut AssetLibrary, ids: &mut IdGenerator) -> DesignElement {
        let scale = self.scale;
        let handle = library.insert(self.asset);
        DesignElement::new(ids.next_id(IMPORTED_ID_PREFIX), ElementKind::Furniture, Some(Subtype::CustomAsset))
            .with_scale(Vec3::repeat(scale))
            .with_asset(handle)
    }
}

/// Imports `.glb` assets as `custom-asset` elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetImporter {
    normalized_size: f32,
}

impl Default for AssetImporter {
    fn default() -> Self {
        Self::new(DEFAULT_NORMALIZED_SIZE)
    }
}

impl AssetImporter {
    /// Importer normalizing assets to the given largest dimension
    pub fn new(normalized_size: f32) -> Self {
        Self { normalized_size }
    }

    /// Target largest dimension
    pub fn normalized_size(&self) -> f32 {
        self.normalized_size
    }

    /// Reject file names without the `.glb` extension (case-insensitive)
    pub fn check_file_name(&self, file_name: &str) -> Result<(), ImportError> {
        let accepted = std::path::Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(IMPORT_EXTENSION));
        if accepted {
            Ok(())
        } else {
            log::warn!("Rejected import of '{}': not a .{} file", file_name, IMPORT_EXTENSION);
            Err(ImportError::UnsupportedExtension(file_name.to_string()))
        }
    }

    /// Parse and measure an asset without touching any shared state
    pub fn parse(&self, bytes: &[u8]) -> Result<ParsedAsset, ImportError> {
        let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
        let buffers = gltf::import_buffers(&document, None, blob)?;

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| ImportError::ParseFailure("asset contains no scene".to_string()))?;

        let name = scene.name().unwrap_or("asset").to_string();
        let mut root = SceneNode::group(name.clone());
        let mut walk = NodeWalk::new(&buffers);
        for node in scene.nodes() {
            root.children.push(walk.convert(&node)?);
        }

        let bounds = root.bounds(&Mat4::identity());
        let max_dimension = bounds.map_or(0.0, |b| b.max_dimension());
        let Some(bounds) = bounds.filter(|_| max_dimension.is_finite() && max_dimension > 0.0) else {
            return Err(ImportError::DegenerateAsset { max_dimension });
        };
        let scale = self.normalized_size / max_dimension;

        log::info!(
            "Parsed asset '{}': {} bytes, largest dimension {:.3}, scale {:.4}",
            name,
            bytes.len(),
            max_dimension,
            scale
        );

        Ok(ParsedAsset {
            asset: ImportedAsset {
                name,
                source: Arc::from(bytes),
                root,
                bounds,
            },
            scale,
        })
    }

    /// Parse an asset, store it, and return the element wrapping it
    ///
    /// The caller appends the element to the project. Nothing is stored
    /// unless parsing and measuring both succeed.
    pub fn import(
        &self,
        bytes: &[u8],
        library: &mut AssetLibrary,
        ids: &mut IdGenerator,
    ) -> Result<DesignElement, ImportError> {
        Ok(self.parse(bytes)?.into_element(library, ids))
    }
}

impl From<&crate::config::AssetConfig> for AssetImporter {
    fn from(config: &crate::config::AssetConfig) -> Self {
        if !config.import_extension.eq_ignore_ascii_case(IMPORT_EXTENSION) {
            log::warn!(
                "Only .{} import is supported, ignoring configured extension '{}'",
                IMPORT_EXTENSION,
                config.import_extension
            );
        }
        Self::new(config.normalized_size)
    }
}

/// Converts a glTF node hierarchy, rejecting anything that is not a tree
struct NodeWalk<'a> {
    buffers: &'a [BufferData],
    visited: HashSet<usize>,
    ancestors: Vec<usize>,
}

impl<'a> NodeWalk<'a> {
    fn new(buffers: &'a [BufferData]) -> Self {
        Self {
            buffers,
            visited: HashSet::new(),
            ancestors: Vec::new(),
        }
    }

    fn convert(&mut self, node: &gltf::Node<'_>) -> Result<SceneNode, ImportError> {
        let index = node.index();
        if self.ancestors.contains(&index) {
            return Err(ImportError::ParseFailure(format!("cyclic node hierarchy at node {index}")));
        }
        if !self.visited.insert(index) {
            return Err(ImportError::ParseFailure(format!("node {index} has more than one parent")));
        }
        if self.ancestors.len() >= MAX_NODE_DEPTH {
            return Err(ImportError::ParseFailure(format!(
                "node hierarchy deeper than {MAX_NODE_DEPTH} levels"
            )));
        }

        let mut converted = convert_node(node, self.buffers);
        self.ancestors.push(index);
        let children = node.children().map(|child| self.convert(&child)).collect::<Result<Vec<_>, _>>();
        self.ancestors.pop();
        converted.children = children?;
        Ok(converted)
    }
}

/// Convert one node without its children
fn convert_node(node: &gltf::Node<'_>, buffers: &[BufferData]) -> SceneNode {
    let name = node
        .name()
        .map_or_else(|| format!("node-{}", node.index()), str::to_string);
    let (translation, rotation, scale) = node.transform().decomposed();
    let rotation = Quat::try_new(
        Quaternion::new(rotation[3], rotation[0], rotation[1], rotation[2]),
        f32::EPSILON,
    )
    .unwrap_or_else(Quat::identity);

    let mut converted = SceneNode::group(name)
        .with_translation(Vec3::from(translation))
        .with_rotation(rotation)
        .with_scale(Vec3::from(scale));

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!("Skipping non-triangle primitive in mesh {}", mesh.index());
                continue;
            }
            if let Some(data) = read_primitive(&primitive, buffers) {
                converted = converted.with_primitive(Arc::new(data), convert_material(&primitive.material()));
            }
        }
    }

    if let Some(light) = node.light() {
        if matches!(light.kind(), gltf::khr_lights_punctual::Kind::Point) {
            converted = converted.with_light(PointLight {
                color: Color::from_linear(light.color()),
                intensity: light.intensity(),
            });
        }
    }
    converted
}

fn read_primitive(primitive: &gltf::Primitive<'_>, buffers: &[BufferData]) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    let mut normals: Vec<[f32; 3]> = reader.read_normals().map(Iterator::collect).unwrap_or_default();
    if normals.len() != positions.len() {
        normals.clear();
    }
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..u32::try_from(positions.len()).ok()?).collect(),
    };
    Some(MeshData::new(positions, normals, indices))
}

fn convert_material(material: &gltf::Material<'_>) -> MaterialSpec {
    let pbr = material.pbr_metallic_roughness();
    let [r, g, b, a] = pbr.base_color_factor();
    let emissive = material.emissive_factor();
    let glows = emissive.iter().any(|&c| c > 0.0);
    MaterialSpec {
        base_color: Color::from_linear([r, g, b]),
        emissive: glows.then(|| Color::from_linear(emissive)),
        emissive_intensity: if glows { 1.0 } else { 0.0 },
        roughness: pbr.roughness_factor(),
        metalness: pbr.metallic_factor(),
        opacity: a,
    }
}
