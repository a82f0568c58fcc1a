//! Turning synthesized geometry into scene nodes

use std::sync::Arc;

use super::catalog;
use super::geometry::{ElementGeometry, GeometryPart};
use super::node::{PointLight, SceneNode};
use super::synthesizer::synthesize;
use crate::assets::AssetLibrary;
use crate::foundation::math::{Mat4, Vec3};
use crate::model::DesignElement;
use crate::spatial::Aabb;

/// Name of the root node of an exported scene
pub const EXPORT_ROOT_NAME: &str = "Scene";

/// Group node for one element: its transform, with one child per part
pub fn element_node(element: &DesignElement, assets: &AssetLibrary) -> SceneNode {
    geometry_node(element, &synthesize(element), assets)
}

pub(crate) fn geometry_node(
    element: &DesignElement,
    geometry: &ElementGeometry,
    assets: &AssetLibrary,
) -> SceneNode {
    let transform = element.transform();
    let mut group = SceneNode::group(element.id.as_str())
        .with_translation(transform.position)
        .with_rotation(transform.quaternion())
        .with_scale(transform.scale);

    for part in &geometry.parts {
        match part {
            GeometryPart::Primitive(spec) => group.children.push(
                SceneNode::group(spec.name)
                    .with_translation(Vec3::from(spec.offset))
                    .with_primitive(Arc::new(spec.shape.mesh()), spec.material),
            ),
            GeometryPart::PointLight(light) => group.children.push(
                SceneNode::group(light.name)
                    .with_translation(Vec3::from(light.offset))
                    .with_light(PointLight {
                        color: light.color,
                        intensity: light.intensity,
                    }),
            ),
            GeometryPart::Asset(handle) => match assets.get(*handle) {
                Some(asset) => group.children.push(asset.root.clone()),
                None => {
                    log::warn!("Element '{}' references a missing asset, using fallback box", element.id);
                    let fallback = ElementGeometry::new(catalog::FALLBACK.to_vec());
                    group.children.extend(geometry_node(element, &fallback, assets).children);
                }
            },
        }
    }
    group
}

/// World-space bounds of an element's synthesized geometry
pub fn element_world_bounds(element: &DesignElement, assets: &AssetLibrary) -> Option<Aabb> {
    element_node(element, assets).bounds(&Mat4::identity())
}

/// Build the export-only scene root for a list of elements
///
/// Elements appear in the given order. Nothing from the live view (tint,
/// selection ring) is involved.
pub fn build_export_scene(elements: &[DesignElement], assets: &AssetLibrary) -> SceneNode {
    let mut root = SceneNode::group(EXPORT_ROOT_NAME);
    root.children = elements.iter().map(|element| element_node(element, assets)).collect();
    root
}
