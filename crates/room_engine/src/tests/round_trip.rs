//! Export, parse the file back with the `gltf` crate, and compare geometry
//!
//! Every exported element must come back with the same world-space bounds
//! the live view computes for it, and point lights must survive through the
//! `KHR_lights_punctual` extension.

use std::sync::Arc;

use crate::assets::{export_scene, AssetImporter, AssetLibrary};
use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::model::library::FURNITURE_LIBRARY;
use crate::model::{Color, DesignElement, IdGenerator};
use crate::render::MeshData;
use crate::scene::{element_world_bounds, MaterialSpec, SceneNode};
use crate::spatial::{bounding_box, Aabb};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::write_glb;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn collect_points(
        node: &gltf::Node<'_>,
        parent: &Mat4,
        buffers: &[gltf::buffer::Data],
        points: &mut Vec<Vec3>,
    ) {
        let world = parent * Mat4::from(node.transform().matrix());
        if let Some(mesh) = node.mesh() {
            for primitive in mesh.primitives() {
                let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
                for p in reader.read_positions().unwrap() {
                    points.push(world.transform_point(&Point3::from(p)).coords);
                }
            }
        }
        for child in node.children() {
            collect_points(&child, &world, buffers, points);
        }
    }

    fn reparsed_bounds(bytes: &[u8]) -> Vec<(String, Option<Aabb>)> {
        let (document, buffers, _) = gltf::import_slice(bytes).unwrap();
        let scene = document.default_scene().unwrap();
        scene
            .nodes()
            .map(|node| {
                let mut points = Vec::new();
                collect_points(&node, &Mat4::identity(), &buffers, &mut points);
                (node.name().unwrap_or_default().to_string(), bounding_box(points))
            })
            .collect()
    }

    fn assert_bounds_match(elements: &[DesignElement], assets: &AssetLibrary) {
        let bytes = export_scene(elements, assets).unwrap();
        let reparsed = reparsed_bounds(&bytes);
        assert_eq!(reparsed.len(), elements.len());

        for (element, (name, bounds)) in elements.iter().zip(&reparsed) {
            assert_eq!(name, element.id.as_str());
            let expected = element_world_bounds(element, assets).unwrap();
            let actual = bounds.unwrap();
            assert_relative_eq!(actual.min, expected.min, epsilon = EPSILON);
            assert_relative_eq!(actual.max, expected.max, epsilon = EPSILON);
        }
    }

    fn library_elements() -> Vec<DesignElement> {
        let mut ids = IdGenerator::new();
        FURNITURE_LIBRARY.iter().map(|item| item.instantiate(&mut ids)).collect()
    }

    #[test]
    fn test_library_items_round_trip() {
        assert_bounds_match(&library_elements(), &AssetLibrary::new());
    }

    #[test]
    fn test_transformed_items_round_trip() {
        let elements: Vec<_> = library_elements()
            .into_iter()
            .enumerate()
            .map(|(i, element)| {
                let step = i as f32;
                element
                    .with_position(Vec3::new(step - 3.0, 0.5 * step, 2.0 - step))
                    .with_rotation(Vec3::new(0.1 * step, 0.7 * step, -0.2 * step))
                    .with_scale(Vec3::new(1.0 + 0.1 * step, 1.0, 2.0 - 0.1 * step))
            })
            .collect();
        assert_bounds_match(&elements, &AssetLibrary::new());
    }

    #[test]
    fn test_imported_asset_round_trip() {
        let model = SceneNode::group("Scene").with_child(
            SceneNode::group("body")
                .with_translation(Vec3::new(0.0, 1.0, 0.0))
                .with_primitive(Arc::new(MeshData::cuboid(3.0, 2.0, 1.0)), MaterialSpec::standard(Color::WHITE))
                .with_child(
                    SceneNode::group("knob")
                        .with_translation(Vec3::new(1.5, 0.0, 0.0))
                        .with_primitive(Arc::new(MeshData::sphere(0.25, 8, 6)), MaterialSpec::standard(Color::WHITE)),
                ),
        );
        let mut assets = AssetLibrary::new();
        let mut ids = IdGenerator::new();
        let element = AssetImporter::default()
            .import(&write_glb(&model).unwrap(), &mut assets, &mut ids)
            .unwrap()
            .with_position(Vec3::new(1.0, 0.0, 1.0))
            .with_rotation(Vec3::new(0.0, 0.4, 0.0));

        let bounds = element_world_bounds(&element, &assets).unwrap();
        let unrotated = element_world_bounds(&element.clone().with_rotation(Vec3::zeros()), &assets).unwrap();
        assert_relative_eq!(unrotated.max_dimension(), 2.0, epsilon = EPSILON);
        assert!(bounds.max_dimension() > 0.0);

        assert_bounds_match(&[element], &assets);
    }

    #[test]
    fn test_lights_survive_export() {
        let elements = library_elements();
        let bytes = export_scene(&elements, &AssetLibrary::new()).unwrap();
        let gltf = gltf::Gltf::from_slice(&bytes).unwrap();

        assert!(gltf.document.extensions_used().any(|ext| ext == "KHR_lights_punctual"));
        // The ceiling light and the floor lamp bulb
        let lights: Vec<_> = gltf.document.lights().unwrap().collect();
        assert_eq!(lights.len(), 2);
        for light in &lights {
            assert!(matches!(light.kind(), gltf::khr_lights_punctual::Kind::Point));
        }

        let ceiling = gltf.document.nodes().find(|n| n.name() == Some("light-2")).unwrap();
        let bulb = ceiling.children().find_map(|child| child.light()).unwrap();
        assert_relative_eq!(bulb.intensity(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(bulb.color()[0], 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_colors_written_linear() {
        let mut ids = IdGenerator::new();
        let wall = FURNITURE_LIBRARY[0].instantiate(&mut ids);
        let bytes = export_scene(&[wall], &AssetLibrary::new()).unwrap();
        let gltf = gltf::Gltf::from_slice(&bytes).unwrap();
        let material = gltf.document.materials().next().unwrap();
        let [r, _, _, a] = material.pbr_metallic_roughness().base_color_factor();
        assert_relative_eq!(r, Color::rgb(0xe5, 0xe5, 0xe5).to_linear()[0], epsilon = EPSILON);
        assert_relative_eq!(a, 1.0, epsilon = EPSILON);
    }
}
