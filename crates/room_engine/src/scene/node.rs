//! Scene nodes handed to the viewport host and the exporter

use std::sync::Arc;

use super::geometry::MaterialSpec;
use crate::foundation::math::{Mat4, Point3, Quat, Vec3};
use crate::model::Color;
use crate::render::MeshData;
use crate::spatial::{bounding_box, Aabb};

/// One drawable surface of a node
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPrimitive {
    /// Triangles, shared between live and export trees
    pub data: Arc<MeshData>,
    /// Surface
    pub material: MaterialSpec,
}

/// Point light attached to a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Light color
    pub color: Color,
    /// Intensity
    pub intensity: f32,
}

/// A node with a local TRS transform
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Node name
    pub name: String,
    /// Local translation
    pub translation: Vec3,
    /// Local rotation
    pub rotation: Quat,
    /// Local scale
    pub scale: Vec3,
    /// Surfaces drawn at this node
    pub primitives: Vec<MeshPrimitive>,
    /// Light emitted at this node
    pub light: Option<PointLight>,
    /// Child nodes
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Empty group node with an identity transform
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            primitives: Vec::new(),
            light: None,
            children: Vec::new(),
        }
    }

    /// Builder: set translation
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Builder: set rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: add a surface
    pub fn with_primitive(mut self, data: Arc<MeshData>, material: MaterialSpec) -> Self {
        self.primitives.push(MeshPrimitive { data, material });
        self
    }

    /// Builder: attach a point light
    pub fn with_light(mut self, light: PointLight) -> Self {
        self.light = Some(light);
        self
    }

    /// Builder: add a child
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Local transform matrix (translation * rotation * scale)
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.translation)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Bounds of every vertex below this node, in the parent's space
    /// premultiplied by `parent`
    ///
    /// Lights and empty groups contribute nothing; `None` means the subtree
    /// has no geometry at all.
    pub fn bounds(&self, parent: &Mat4) -> Option<Aabb> {
        let world = parent * self.local_matrix();
        let own = bounding_box(self.primitives.iter().flat_map(|primitive| {
            primitive
                .data
                .positions
                .iter()
                .map(move |p| world.transform_point(&Point3::from(*p)).coords)
        }));
        self.children
            .iter()
            .filter_map(|child| child.bounds(&world))
            .fold(own, |acc, b| Some(acc.map_or(b, |a| a.union(&b))))
    }

    /// Find a descendant (or self) by name
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}
