//! Concrete geometry descriptions produced by the synthesizer

use crate::assets::AssetHandle;
use crate::model::Color;
use crate::render::MeshData;

/// Radial resolution for cylinders and cones
pub const RADIAL_SEGMENTS: u32 = 32;

/// A parametric primitive shape, centred on its local origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box
    Box {
        /// Size along X
        width: f32,
        /// Size along Y
        height: f32,
        /// Size along Z
        depth: f32,
    },
    /// Cylinder or frustum along Y
    Cylinder {
        /// Top radius
        radius_top: f32,
        /// Bottom radius
        radius_bottom: f32,
        /// Height along Y
        height: f32,
        /// Segments around the axis
        radial_segments: u32,
    },
    /// Cone along Y, apex up
    Cone {
        /// Base radius
        radius: f32,
        /// Height along Y
        height: f32,
        /// Segments around the axis
        radial_segments: u32,
    },
    /// UV sphere
    Sphere {
        /// Radius
        radius: f32,
        /// Segments around the equator
        width_segments: u32,
        /// Segments pole to pole
        height_segments: u32,
    },
    /// Flat annulus in the XY plane
    Ring {
        /// Inner radius
        inner_radius: f32,
        /// Outer radius
        outer_radius: f32,
        /// Segments around the ring
        theta_segments: u32,
    },
}

impl Shape {
    /// Box shorthand
    pub const fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Box { width, height, depth }
    }

    /// Straight cylinder shorthand
    pub const fn cylinder(radius: f32, height: f32) -> Self {
        Self::Cylinder {
            radius_top: radius,
            radius_bottom: radius,
            height,
            radial_segments: RADIAL_SEGMENTS,
        }
    }

    /// Triangle mesh for this shape
    pub fn mesh(&self) -> MeshData {
        match *self {
            Self::Box { width, height, depth } => MeshData::cuboid(width, height, depth),
            Self::Cylinder { radius_top, radius_bottom, height, radial_segments } => {
                MeshData::cylinder(radius_top, radius_bottom, height, radial_segments)
            }
            Self::Cone { radius, height, radial_segments } => MeshData::cone(radius, height, radial_segments),
            Self::Sphere { radius, width_segments, height_segments } => {
                MeshData::sphere(radius, width_segments, height_segments)
            }
            Self::Ring { inner_radius, outer_radius, theta_segments } => {
                MeshData::ring(inner_radius, outer_radius, theta_segments)
            }
        }
    }
}

/// Surface parameters for a primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSpec {
    /// Base color
    pub base_color: Color,
    /// Emissive color, if any
    pub emissive: Option<Color>,
    /// Emissive strength multiplier
    pub emissive_intensity: f32,
    /// Roughness factor
    pub roughness: f32,
    /// Metalness factor
    pub metalness: f32,
    /// Opacity; below 1 the surface is blended
    pub opacity: f32,
}

impl MaterialSpec {
    /// The editor's standard surface (roughness 0.7, metalness 0.2)
    pub const fn standard(base_color: Color) -> Self {
        Self {
            base_color,
            emissive: None,
            emissive_intensity: 0.0,
            roughness: 0.7,
            metalness: 0.2,
            opacity: 1.0,
        }
    }

    /// A fully rough, non-metallic surface that glows in its own color
    pub const fn glowing(base_color: Color, emissive: Color, emissive_intensity: f32) -> Self {
        Self {
            base_color,
            emissive: Some(emissive),
            emissive_intensity,
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
        }
    }

    /// The same surface, glowing in `emissive`
    pub const fn with_emission(self, emissive: Color, emissive_intensity: f32) -> Self {
        Self {
            emissive: Some(emissive),
            emissive_intensity,
            ..self
        }
    }

    /// Unlit translucent overlay surface
    pub const fn overlay(base_color: Color, opacity: f32) -> Self {
        Self {
            base_color,
            emissive: None,
            emissive_intensity: 0.0,
            roughness: 1.0,
            metalness: 0.0,
            opacity,
        }
    }
}

/// One placed primitive within an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveSpec {
    /// Part name, used as the node name on export
    pub name: &'static str,
    /// Shape
    pub shape: Shape,
    /// Offset from the element origin
    pub offset: [f32; 3],
    /// Surface
    pub material: MaterialSpec,
}

/// A point light within an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSpec {
    /// Part name
    pub name: &'static str,
    /// Light color
    pub color: Color,
    /// Intensity
    pub intensity: f32,
    /// Offset from the element origin
    pub offset: [f32; 3],
}

/// A single piece of an element's geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryPart {
    /// Parametric primitive
    Primitive(PrimitiveSpec),
    /// Point light
    PointLight(LightSpec),
    /// Root node of an imported asset
    Asset(AssetHandle),
}

/// Everything an element renders or exports, in element-local space
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementGeometry {
    /// Parts in a fixed order
    pub parts: Vec<GeometryPart>,
}

impl ElementGeometry {
    /// Geometry made of the given parts
    pub fn new(parts: Vec<GeometryPart>) -> Self {
        Self { parts }
    }

    /// Iterate primitive parts
    pub fn primitives(&self) -> impl Iterator<Item = &PrimitiveSpec> {
        self.parts.iter().filter_map(|part| match part {
            GeometryPart::Primitive(spec) => Some(spec),
            _ => None,
        })
    }

    /// Iterate light parts
    pub fn lights(&self) -> impl Iterator<Item = &LightSpec> {
        self.parts.iter().filter_map(|part| match part {
            GeometryPart::PointLight(light) => Some(light),
            _ => None,
        })
    }
}
