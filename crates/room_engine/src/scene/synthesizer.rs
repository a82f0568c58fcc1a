//! Element to geometry mapping

use super::catalog::{self, LIGHT_MARKER_GLOW, LIGHT_MARKER_SHAPE, WALL_COLOR, WALL_SHAPE};
use super::geometry::{ElementGeometry, GeometryPart, LightSpec, MaterialSpec, PrimitiveSpec};
use crate::model::library::DEFAULT_LIGHT_INTENSITY;
use crate::model::{Color, DesignElement, ElementKind, Subtype};

/// Map an element to its concrete geometry
///
/// Pure and deterministic: the same element always yields the same parts in
/// the same order. Unrecognised kind/subtype combinations, and custom assets
/// without an asset reference, get a unit box.
pub fn synthesize(element: &DesignElement) -> ElementGeometry {
    match (element.kind, element.subtype) {
        (ElementKind::Wall, _) => ElementGeometry::new(vec![GeometryPart::Primitive(PrimitiveSpec {
            name: "panel",
            shape: WALL_SHAPE,
            offset: [0.0; 3],
            material: MaterialSpec::standard(WALL_COLOR),
        })]),
        (ElementKind::Light, _) => light(element),
        (ElementKind::Furniture, Some(Subtype::CustomAsset)) => match element.asset_reference {
            Some(handle) => ElementGeometry::new(vec![GeometryPart::Asset(handle)]),
            None => fallback(),
        },
        (ElementKind::Furniture, Some(subtype)) => match catalog::furniture_parts(subtype) {
            Some(parts) => ElementGeometry::new(parts.to_vec()),
            None => fallback(),
        },
        (ElementKind::Furniture, None) | (ElementKind::Window | ElementKind::Door, _) => fallback(),
    }
}

fn light(element: &DesignElement) -> ElementGeometry {
    let color = element.color.unwrap_or(Color::WHITE);
    let intensity = element.intensity.unwrap_or(DEFAULT_LIGHT_INTENSITY);
    ElementGeometry::new(vec![
        GeometryPart::Primitive(PrimitiveSpec {
            name: "marker",
            shape: LIGHT_MARKER_SHAPE,
            offset: [0.0; 3],
            material: MaterialSpec::glowing(color, color, LIGHT_MARKER_GLOW),
        }),
        GeometryPart::PointLight(LightSpec {
            name: "light",
            color,
            intensity,
            offset: [0.0; 3],
        }),
    ])
}

fn fallback() -> ElementGeometry {
    ElementGeometry::new(catalog::FALLBACK.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetHandle;
    use crate::scene::Shape;

    fn element(kind: ElementKind, subtype: Option<Subtype>) -> DesignElement {
        DesignElement::new("e-1".into(), kind, subtype)
    }

    fn is_fallback(geometry: &ElementGeometry) -> bool {
        geometry.parts.len() == 1
            && matches!(
                geometry.parts[0],
                GeometryPart::Primitive(PrimitiveSpec {
                    shape: Shape::Box { width, height, depth },
                    ..
                }) if width == 1.0 && height == 1.0 && depth == 1.0
            )
    }

    #[test]
    fn test_wall_is_single_box() {
        let geometry = synthesize(&element(ElementKind::Wall, None));
        assert_eq!(geometry.parts.len(), 1);
        let panel = geometry.primitives().next().unwrap();
        assert_eq!(panel.shape, Shape::cuboid(4.0, 2.4, 0.2));
        assert_eq!(panel.material.base_color, Color::rgb(0xe5, 0xe5, 0xe5));
    }

    #[test]
    fn test_light_has_marker_and_point_light() {
        let light = element(ElementKind::Light, Some(Subtype::Light))
            .with_color(Color::rgb(255, 200, 100))
            .with_intensity(1.7);
        let geometry = synthesize(&light);
        let marker = geometry.primitives().next().unwrap();
        assert!(matches!(marker.shape, Shape::Sphere { radius, .. } if radius == 0.2));
        let point = geometry.lights().next().unwrap();
        assert_eq!(point.color, Color::rgb(255, 200, 100));
        assert_eq!(point.intensity, 1.7);
    }

    #[test]
    fn test_light_defaults() {
        let geometry = synthesize(&element(ElementKind::Light, Some(Subtype::Light)));
        let point = geometry.lights().next().unwrap();
        assert_eq!(point.color, Color::WHITE);
        assert_eq!(point.intensity, DEFAULT_LIGHT_INTENSITY);
    }

    #[test]
    fn test_furniture_part_counts() {
        let count = |subtype| synthesize(&element(ElementKind::Furniture, Some(subtype))).parts.len();
        assert_eq!(count(Subtype::Sofa), 4);
        assert_eq!(count(Subtype::Chair), 6);
        assert_eq!(count(Subtype::Table), 5);
        assert_eq!(count(Subtype::Bed), 3);
        assert_eq!(count(Subtype::Lamp), 4);
    }

    #[test]
    fn test_lamp_carries_its_own_light() {
        let geometry = synthesize(&element(ElementKind::Furniture, Some(Subtype::Lamp)));
        let bulb = geometry.lights().next().unwrap();
        assert_eq!(bulb.color, Color::rgb(0xff, 0xf5, 0xe0));
        assert_eq!(bulb.intensity, 0.5);
        assert_eq!(bulb.offset, [0.0, 1.3, 0.0]);
    }

    #[test]
    fn test_custom_asset_is_asset_root_only() {
        let handle = AssetHandle::null();
        let geometry = synthesize(&element(ElementKind::Furniture, Some(Subtype::CustomAsset)).with_asset(handle));
        assert_eq!(geometry.parts, vec![GeometryPart::Asset(handle)]);
    }

    #[test]
    fn test_unrecognised_combinations_fall_back() {
        assert!(is_fallback(&synthesize(&element(ElementKind::Window, None))));
        assert!(is_fallback(&synthesize(&element(ElementKind::Door, Some(Subtype::Sofa)))));
        assert!(is_fallback(&synthesize(&element(ElementKind::Furniture, None))));
        assert!(is_fallback(&synthesize(&element(ElementKind::Furniture, Some(Subtype::Light)))));
        assert!(is_fallback(&synthesize(&element(ElementKind::Furniture, Some(Subtype::CustomAsset)))));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let kinds = [
            (ElementKind::Wall, None),
            (ElementKind::Light, Some(Subtype::Light)),
            (ElementKind::Furniture, Some(Subtype::Sofa)),
            (ElementKind::Furniture, Some(Subtype::Chair)),
            (ElementKind::Furniture, Some(Subtype::Table)),
            (ElementKind::Furniture, Some(Subtype::Bed)),
            (ElementKind::Furniture, Some(Subtype::Lamp)),
            (ElementKind::Window, None),
        ];
        for (kind, subtype) in kinds {
            let e = element(kind, subtype);
            let first = synthesize(&e);
            let second = synthesize(&e);
            assert_eq!(first, second);
            let meshes_a: Vec<_> = first.primitives().map(|p| p.shape.mesh()).collect();
            let meshes_b: Vec<_> = second.primitives().map(|p| p.shape.mesh()).collect();
            assert_eq!(meshes_a, meshes_b);
        }
    }
}
