//! Literal primitive tables for the built-in furniture
//!
//! Dimensions, offsets and colors are fixed; changing them changes what
//! every saved project looks like.

use super::geometry::{GeometryPart, LightSpec, MaterialSpec, PrimitiveSpec, Shape, RADIAL_SEGMENTS};
use crate::model::{Color, Subtype};

const WOOD: Color = Color::rgb(0x8b, 0x45, 0x13);
const CHARCOAL: Color = Color::rgb(0x4a, 0x4a, 0x4a);
const IRON: Color = Color::rgb(0x2c, 0x2c, 0x2c);
const CHOCOLATE: Color = Color::rgb(0xd2, 0x69, 0x1e);
const LINEN: Color = Color::rgb(0xf5, 0xf5, 0xdc);
const WARM_LIGHT: Color = Color::rgb(0xff, 0xf5, 0xe0);

/// Wall panel color
pub const WALL_COLOR: Color = Color::rgb(0xe5, 0xe5, 0xe5);

/// Wall panel footprint
pub const WALL_SHAPE: Shape = Shape::cuboid(4.0, 2.4, 0.2);

/// Light marker sphere
pub const LIGHT_MARKER_SHAPE: Shape = Shape::Sphere {
    radius: 0.2,
    width_segments: 32,
    height_segments: 32,
};

/// Emissive strength of a light marker
pub const LIGHT_MARKER_GLOW: f32 = 0.5;

const fn part(name: &'static str, shape: Shape, offset: [f32; 3], color: Color) -> GeometryPart {
    GeometryPart::Primitive(PrimitiveSpec {
        name,
        shape,
        offset,
        material: MaterialSpec::standard(color),
    })
}

const SOFA: &[GeometryPart] = &[
    part("base", Shape::cuboid(2.0, 0.4, 1.0), [0.0, 0.3, 0.0], WOOD),
    part("back", Shape::cuboid(2.0, 0.6, 0.2), [0.0, 0.8, -0.4], WOOD),
    part("arm-left", Shape::cuboid(0.2, 0.4, 1.0), [-0.9, 0.6, 0.0], WOOD),
    part("arm-right", Shape::cuboid(0.2, 0.4, 1.0), [0.9, 0.6, 0.0], WOOD),
];

const CHAIR_LEG: Shape = Shape::cylinder(0.05, 0.4);

const CHAIR: &[GeometryPart] = &[
    part("seat", Shape::cuboid(0.5, 0.1, 0.5), [0.0, 0.4, 0.0], CHARCOAL),
    part("back", Shape::cuboid(0.5, 0.8, 0.1), [0.0, 0.9, -0.2], CHARCOAL),
    part("leg-back-left", CHAIR_LEG, [-0.2, 0.2, -0.2], IRON),
    part("leg-back-right", CHAIR_LEG, [0.2, 0.2, -0.2], IRON),
    part("leg-front-left", CHAIR_LEG, [-0.2, 0.2, 0.2], IRON),
    part("leg-front-right", CHAIR_LEG, [0.2, 0.2, 0.2], IRON),
];

const TABLE_LEG: Shape = Shape::cylinder(0.05, 0.7);

const TABLE: &[GeometryPart] = &[
    part("top", Shape::cuboid(1.2, 0.1, 0.8), [0.0, 0.7, 0.0], CHOCOLATE),
    part("leg-back-left", TABLE_LEG, [-0.5, 0.35, -0.3], WOOD),
    part("leg-back-right", TABLE_LEG, [0.5, 0.35, -0.3], WOOD),
    part("leg-front-left", TABLE_LEG, [-0.5, 0.35, 0.3], WOOD),
    part("leg-front-right", TABLE_LEG, [0.5, 0.35, 0.3], WOOD),
];

const BED: &[GeometryPart] = &[
    part("mattress", Shape::cuboid(2.0, 0.4, 1.6), [0.0, 0.3, 0.0], LINEN),
    part("headboard", Shape::cuboid(2.0, 1.0, 0.2), [0.0, 0.8, -0.7], WOOD),
    part("frame", Shape::cuboid(2.1, 0.2, 1.7), [0.0, 0.1, 0.0], WOOD),
];

const LAMP: &[GeometryPart] = &[
    part(
        "base",
        Shape::Cylinder {
            radius_top: 0.2,
            radius_bottom: 0.3,
            height: 0.1,
            radial_segments: RADIAL_SEGMENTS,
        },
        [0.0, 0.1, 0.0],
        IRON,
    ),
    part("pole", Shape::cylinder(0.03, 1.4), [0.0, 0.8, 0.0], IRON),
    GeometryPart::Primitive(PrimitiveSpec {
        name: "shade",
        shape: Shape::Cone {
            radius: 0.2,
            height: 0.3,
            radial_segments: RADIAL_SEGMENTS,
        },
        offset: [0.0, 1.4, 0.0],
        material: MaterialSpec::standard(Color::WHITE).with_emission(Color::WHITE, 0.2),
    }),
    GeometryPart::PointLight(LightSpec {
        name: "bulb",
        color: WARM_LIGHT,
        intensity: 0.5,
        offset: [0.0, 1.3, 0.0],
    }),
];

/// Fallback for anything the synthesizer does not recognise
pub const FALLBACK: &[GeometryPart] = &[part("box", Shape::cuboid(1.0, 1.0, 1.0), [0.0; 3], Color::WHITE)];

/// Primitive table for a furniture subtype
///
/// `None` for subtypes that are not built from primitives.
pub fn furniture_parts(subtype: Subtype) -> Option<&'static [GeometryPart]> {
    match subtype {
        Subtype::Sofa => Some(SOFA),
        Subtype::Chair => Some(CHAIR),
        Subtype::Table => Some(TABLE),
        Subtype::Bed => Some(BED),
        Subtype::Lamp => Some(LAMP),
        Subtype::Light | Subtype::CustomAsset => None,
    }
}
