//! Pointer hit testing against element bounds and the ground surface

use super::gesture::PointerTarget;
use crate::assets::AssetLibrary;
use crate::model::{DesignElement, Project};
use crate::scene::element_world_bounds;
use crate::spatial::{intersect_plane, Plane, Ray};

/// Name of the ground surface
pub const GROUND_NAME: &str = "ground";

/// Height of the ground surface (just below the floor to avoid z-fighting)
pub const GROUND_HEIGHT: f32 = -0.01;

/// Half the side length of the square ground surface
pub const GROUND_HALF_EXTENT: f32 = 50.0;

/// Find what a pointer ray hits first
///
/// Elements are tested against the world bounds of their synthesized
/// geometry; the nearest hit wins, ties going to the element added first.
/// Missing every element, the ray may still land on the ground.
pub fn pick(ray: &Ray, project: &Project, assets: &AssetLibrary) -> PointerTarget {
    let nearest = project
        .iter()
        .filter_map(|element| {
            let bounds = element_world_bounds(element, assets)?;
            bounds.intersect_ray(ray).map(|distance| (distance, element))
        })
        .fold(None, |best: Option<(f32, &DesignElement)>, (distance, element)| match best {
            Some((best_distance, _)) if best_distance <= distance => best,
            _ => Some((distance, element)),
        });

    if let Some((_, element)) = nearest {
        return PointerTarget::Element(element.id.clone());
    }

    match intersect_plane(ray, &Plane::horizontal(GROUND_HEIGHT)) {
        Some(hit) if hit.x.abs() <= GROUND_HALF_EXTENT && hit.z.abs() <= GROUND_HALF_EXTENT => {
            PointerTarget::Ground
        }
        _ => PointerTarget::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::model::{ElementKind, Subtype};

    fn project() -> Project {
        let mut project = Project::new("p");
        project
            .add(DesignElement::new("far".into(), ElementKind::Furniture, Some(Subtype::Bed))
                .with_position(Vec3::new(0.0, 0.0, -3.0)))
            .unwrap();
        project
            .add(DesignElement::new("near".into(), ElementKind::Furniture, Some(Subtype::Table)))
            .unwrap();
        project
    }

    #[test]
    fn test_nearest_element_wins() {
        let ray = Ray::new(Vec3::new(0.0, 0.5, 10.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert_eq!(pick(&ray, &project(), &AssetLibrary::new()), PointerTarget::Element("near".into()));
    }

    #[test]
    fn test_ground_hit() {
        let ray = Ray::new(Vec3::new(10.0, 5.0, 10.0), Vec3::new(0.0, -1.0, 0.0)).unwrap();
        assert_eq!(pick(&ray, &project(), &AssetLibrary::new()), PointerTarget::Ground);
    }

    #[test]
    fn test_sky_hits_nothing() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 10.0), Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(pick(&ray, &project(), &AssetLibrary::new()), PointerTarget::Nothing);

        let outside = Ray::new(Vec3::new(80.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0)).unwrap();
        assert_eq!(pick(&outside, &project(), &AssetLibrary::new()), PointerTarget::Nothing);
    }
}
