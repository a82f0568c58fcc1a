//! Binary glTF (GLB) writer
//!
//! The document is built from `gltf::json` types and framed with
//! [`gltf::binary::Glb`]. Positions and normals are `f32` VEC3, indices are
//! `u32`, and everything lives in a single embedded buffer. Output depends
//! only on the input tree, so writing the same tree twice gives identical
//! bytes.

use std::borrow::Cow;
use std::collections::BTreeMap;

use gltf::binary::{Glb, Header};
use gltf::json::{self, validation::Checked, validation::USize64, Index};

use super::ExportError;
use crate::scene::{MaterialSpec, MeshPrimitive, SceneNode};

/// Container version written
pub const GLB_VERSION: u32 = 2;

const LIGHTS_EXTENSION: &str = "KHR_lights_punctual";
const GENERATOR: &str = concat!("room_engine ", env!("CARGO_PKG_VERSION"));

fn to_u32(value: usize, what: &str) -> Result<u32, ExportError> {
    u32::try_from(value).map_err(|_| ExportError::SerializationFailure(format!("too many {what} for GLB")))
}

fn next_index<T>(items: &[T], what: &str) -> Result<Index<T>, ExportError> {
    Ok(Index::new(to_u32(items.len(), what)?))
}

fn finite<const N: usize>(values: [f32; N], node: &str) -> Result<[f32; N], ExportError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(values)
    } else {
        Err(ExportError::SerializationFailure(format!(
            "node '{node}' has a non-finite transform"
        )))
    }
}

fn finite_vertices(values: &[[f32; 3]], node: &str) -> Result<(), ExportError> {
    if values.iter().flatten().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ExportError::SerializationFailure(format!(
            "mesh '{node}' has non-finite vertex data"
        )))
    }
}

/// Collects the glTF document and binary data while walking a scene tree
struct GlbBuilder {
    root: json::Root,
    lights: Vec<json::extensions::scene::khr_lights_punctual::Light>,
    bin: Vec<u8>,
}

impl GlbBuilder {
    fn new() -> Self {
        Self {
            root: json::Root {
                asset: json::Asset {
                    generator: Some(GENERATOR.to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
            lights: Vec::new(),
            bin: Vec::new(),
        }
    }

    fn push_view(&mut self, bytes: &[u8], target: json::buffer::Target) -> Result<Index<json::buffer::View>, ExportError> {
        let index = next_index(&self.root.buffer_views, "buffer views")?;
        let byte_offset = self.bin.len();
        self.bin.extend_from_slice(bytes);
        self.root.buffer_views.push(json::buffer::View {
            buffer: Index::new(0),
            byte_length: USize64::from(bytes.len()),
            byte_offset: Some(USize64::from(byte_offset)),
            byte_stride: None,
            name: None,
            target: Some(Checked::Valid(target)),
            extensions: None,
            extras: Default::default(),
        });
        Ok(index)
    }

    fn push_accessor(
        &mut self,
        buffer_view: Index<json::buffer::View>,
        count: usize,
        component_type: json::accessor::ComponentType,
        type_: json::accessor::Type,
        bounds: Option<([f32; 3], [f32; 3])>,
    ) -> Result<Index<json::Accessor>, ExportError> {
        let index = next_index(&self.root.accessors, "accessors")?;
        let (min, max) = match bounds {
            Some((min, max)) => (Some(json::Value::from(min.to_vec())), Some(json::Value::from(max.to_vec()))),
            None => (None, None),
        };
        self.root.accessors.push(json::Accessor {
            buffer_view: Some(buffer_view),
            byte_offset: None,
            count: USize64::from(count),
            component_type: Checked::Valid(json::accessor::GenericComponentType(component_type)),
            extensions: None,
            extras: Default::default(),
            type_: Checked::Valid(type_),
            min,
            max,
            name: None,
            normalized: false,
            sparse: None,
        });
        Ok(index)
    }

    fn push_vec3_accessor(&mut self, values: &[[f32; 3]], with_bounds: bool) -> Result<Index<json::Accessor>, ExportError> {
        let bytes: Vec<u8> = values.iter().flatten().flat_map(|v| v.to_le_bytes()).collect();
        let buffer_view = self.push_view(&bytes, json::buffer::Target::ArrayBuffer)?;

        let bounds = with_bounds.then(|| {
            let mut min = [f32::INFINITY; 3];
            let mut max = [f32::NEG_INFINITY; 3];
            for value in values {
                for axis in 0..3 {
                    min[axis] = min[axis].min(value[axis]);
                    max[axis] = max[axis].max(value[axis]);
                }
            }
            (min, max)
        });

        self.push_accessor(
            buffer_view,
            values.len(),
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec3,
            bounds,
        )
    }

    fn push_index_accessor(&mut self, indices: &[u32]) -> Result<Index<json::Accessor>, ExportError> {
        let bytes: Vec<u8> = indices.iter().flat_map(|i| i.to_le_bytes()).collect();
        let buffer_view = self.push_view(&bytes, json::buffer::Target::ElementArrayBuffer)?;
        self.push_accessor(
            buffer_view,
            indices.len(),
            json::accessor::ComponentType::U32,
            json::accessor::Type::Scalar,
            None,
        )
    }

    fn push_material(&mut self, material: &MaterialSpec) -> Result<Index<json::Material>, ExportError> {
        let index = next_index(&self.root.materials, "materials")?;
        let [r, g, b] = material.base_color.to_linear();
        let emissive = material
            .emissive
            .filter(|_| material.emissive_intensity > 0.0)
            .map_or([0.0; 3], |color| {
                color.to_linear().map(|c| (c * material.emissive_intensity).clamp(0.0, 1.0))
            });
        let alpha_mode = if material.opacity < 1.0 {
            json::material::AlphaMode::Blend
        } else {
            json::material::AlphaMode::Opaque
        };

        self.root.materials.push(json::Material {
            alpha_mode: Checked::Valid(alpha_mode),
            pbr_metallic_roughness: json::material::PbrMetallicRoughness {
                base_color_factor: json::material::PbrBaseColorFactor([r, g, b, material.opacity.clamp(0.0, 1.0)]),
                metallic_factor: json::material::StrengthFactor(material.metalness.clamp(0.0, 1.0)),
                roughness_factor: json::material::StrengthFactor(material.roughness.clamp(0.0, 1.0)),
                ..Default::default()
            },
            emissive_factor: json::material::EmissiveFactor(emissive),
            ..Default::default()
        });
        Ok(index)
    }

    fn push_mesh(&mut self, name: &str, primitives: &[MeshPrimitive]) -> Result<Option<Index<json::Mesh>>, ExportError> {
        let mut defs = Vec::new();
        for primitive in primitives.iter().filter(|p| !p.data.is_empty()) {
            let data = &primitive.data;
            finite_vertices(&data.positions, name)?;
            finite_vertices(&data.normals, name)?;

            let mut attributes = BTreeMap::new();
            let position = self.push_vec3_accessor(&data.positions, true)?;
            attributes.insert(Checked::Valid(json::mesh::Semantic::Positions), position);
            if data.normals.len() == data.positions.len() {
                let normal = self.push_vec3_accessor(&data.normals, false)?;
                attributes.insert(Checked::Valid(json::mesh::Semantic::Normals), normal);
            }
            let indices = self.push_index_accessor(&data.indices)?;
            let material = self.push_material(&primitive.material)?;
            defs.push(json::mesh::Primitive {
                attributes,
                extensions: None,
                extras: Default::default(),
                indices: Some(indices),
                material: Some(material),
                mode: Checked::Valid(json::mesh::Mode::Triangles),
                targets: None,
            });
        }
        if defs.is_empty() {
            return Ok(None);
        }
        let index = next_index(&self.root.meshes, "meshes")?;
        self.root.meshes.push(json::Mesh {
            extensions: None,
            extras: Default::default(),
            name: Some(name.to_string()),
            primitives: defs,
            weights: None,
        });
        Ok(Some(index))
    }

    fn push_light(&mut self, name: &str, light: crate::scene::PointLight) -> Result<json::extensions::scene::Node, ExportError> {
        use json::extensions::scene::khr_lights_punctual::{KhrLightsPunctual, Light, Type};

        let index = next_index(&self.lights, "lights")?;
        self.lights.push(Light {
            color: light.color.to_linear(),
            extensions: None,
            extras: Default::default(),
            intensity: light.intensity,
            name: Some(name.to_string()),
            range: None,
            spot: None,
            type_: Checked::Valid(Type::Point),
        });
        Ok(json::extensions::scene::Node {
            khr_lights_punctual: Some(KhrLightsPunctual { light: index }),
            ..Default::default()
        })
    }

    /// Emit a node and its subtree, returning the node index
    fn push_node(&mut self, node: &SceneNode) -> Result<Index<json::Node>, ExportError> {
        let index = next_index(&self.root.nodes, "nodes")?;
        // Reserve the slot so parents precede children.
        self.root.nodes.push(json::Node::default());

        let translation: [f32; 3] = finite(node.translation.into(), &node.name)?;
        let q = node.rotation.quaternion();
        let rotation: [f32; 4] = finite([q.i, q.j, q.k, q.w], &node.name)?;
        let scale: [f32; 3] = finite(node.scale.into(), &node.name)?;

        let mesh = self.push_mesh(&node.name, &node.primitives)?;
        let extensions = node
            .light
            .map(|light| self.push_light(&node.name, light))
            .transpose()?;

        let children = node
            .children
            .iter()
            .map(|child| self.push_node(child))
            .collect::<Result<Vec<_>, _>>()?;

        self.root.nodes[index.value()] = json::Node {
            children: (!children.is_empty()).then_some(children),
            extensions,
            mesh,
            name: Some(node.name.clone()),
            rotation: (rotation != [0.0, 0.0, 0.0, 1.0]).then_some(json::scene::UnitQuaternion(rotation)),
            scale: (scale != [1.0; 3]).then_some(scale),
            translation: (translation != [0.0; 3]).then_some(translation),
            ..Default::default()
        };
        Ok(index)
    }

    fn finish(mut self, scene_name: String, roots: Vec<Index<json::Node>>) -> Result<Vec<u8>, ExportError> {
        if !self.bin.is_empty() {
            self.root.buffers.push(json::Buffer {
                byte_length: USize64::from(self.bin.len()),
                name: None,
                uri: None,
                extensions: None,
                extras: Default::default(),
            });
        }
        if !self.lights.is_empty() {
            self.root.extensions_used.push(LIGHTS_EXTENSION.to_string());
            self.root.extensions = Some(json::extensions::root::Root {
                khr_lights_punctual: Some(json::extensions::root::KhrLightsPunctual { lights: self.lights }),
                ..Default::default()
            });
        }
        self.root.scenes.push(json::Scene {
            extensions: None,
            extras: Default::default(),
            name: Some(scene_name),
            nodes: roots,
        });
        self.root.scene = Some(Index::new(0));

        let json = self.root.to_vec()?;
        let length = padded_len(12 + 8 + json.len()) + if self.bin.is_empty() { 0 } else { padded_len(8 + self.bin.len()) };
        let glb = Glb {
            header: Header {
                magic: *b"glTF",
                version: GLB_VERSION,
                length: to_u32(length, "bytes")?,
            },
            json: Cow::Owned(json),
            bin: (!self.bin.is_empty()).then_some(Cow::Owned(self.bin)),
        };
        Ok(glb.to_vec()?)
    }
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(4) * 4
}

/// Serialize a scene root as a GLB buffer
///
/// The root's children become the glTF scene's root nodes; the root's own
/// transform is not written.
pub fn write_glb(root: &SceneNode) -> Result<Vec<u8>, ExportError> {
    let mut builder = GlbBuilder::new();
    let roots = root
        .children
        .iter()
        .map(|child| builder.push_node(child))
        .collect::<Result<Vec<_>, _>>()?;
    builder.finish(root.name.clone(), roots)
}
