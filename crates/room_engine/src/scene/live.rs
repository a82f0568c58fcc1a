//! Live view: synthesized geometry plus selection decorations

use std::sync::Arc;

use super::assemble::geometry_node;
use super::geometry::{GeometryPart, MaterialSpec, Shape};
use super::node::SceneNode;
use super::synthesizer::synthesize;
use crate::assets::AssetLibrary;
use crate::foundation::math::Vec3;
use crate::interaction::InteractionContext;
use crate::model::{Color, DesignElement, ElementKind, Project};

/// Tint applied to the selected element's primitives
pub const SELECTION_TINT: Color = Color::rgb(0x90, 0xcd, 0xf4);

/// Node name of the selection ring overlay
pub const SELECTION_RING_NAME: &str = "selection-ring";

const RING_OPACITY: f32 = 0.5;
const RING_SEGMENTS: u32 = 32;

/// Selection ring for an element kind, in element-local space
pub fn selection_ring(kind: ElementKind) -> SceneNode {
    let (inner_radius, outer_radius, height) = match kind {
        ElementKind::Light => (0.3, 0.4, -0.3),
        ElementKind::Wall => (2.0, 2.1, -1.3),
        ElementKind::Furniture | ElementKind::Window | ElementKind::Door => (1.2, 1.3, -0.1),
    };
    let shape = Shape::Ring {
        inner_radius,
        outer_radius,
        theta_segments: RING_SEGMENTS,
    };
    SceneNode::group(SELECTION_RING_NAME)
        .with_translation(Vec3::new(0.0, height, 0.0))
        .with_primitive(Arc::new(shape.mesh()), MaterialSpec::overlay(SELECTION_TINT, RING_OPACITY))
}

fn live_node(element: &DesignElement, selected: bool, assets: &AssetLibrary) -> SceneNode {
    let mut geometry = synthesize(element);
    if !selected {
        return geometry_node(element, &geometry, assets);
    }

    for part in &mut geometry.parts {
        if let GeometryPart::Primitive(spec) = part {
            spec.material.base_color = SELECTION_TINT;
        }
    }
    let mut node = geometry_node(element, &geometry, assets);
    node.children.push(selection_ring(element.kind));
    node
}

/// Build the nodes the viewport host should draw this frame
pub fn build_live_scene(project: &Project, context: &InteractionContext, assets: &AssetLibrary) -> Vec<SceneNode> {
    project
        .iter()
        .map(|element| live_node(element, context.is_selected(&element.id), assets))
        .collect()
}
