//! Rays, planes and ray-plane intersection

use crate::foundation::math::Vec3;

/// Denominators smaller than this are treated as a ray parallel to a plane
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    ///
    /// The direction is normalized. Returns `None` for a zero-length or
    /// non-finite direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize(f32::EPSILON)?;
        if !(origin.iter().all(|c| c.is_finite()) && direction.iter().all(|c| c.is_finite())) {
            return None;
        }
        Some(Self { origin, direction })
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// An infinite plane `normal · p = distance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Signed distance from the origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Horizontal plane (+Y normal) at the given height
    pub fn horizontal(height: f32) -> Self {
        Self {
            normal: Vec3::y(),
            distance: height,
        }
    }

    /// Signed distance from `point` to the plane
    pub fn signed_distance(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }
}

/// Build a plane through `point` with the given normal
///
/// The normal is normalized; a zero normal falls back to +Y.
pub fn plane_from_normal_and_point(normal: Vec3, point: Vec3) -> Plane {
    let normal = normal.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::y);
    Plane {
        normal,
        distance: normal.dot(&point),
    }
}

/// Intersect a ray with a plane
///
/// Returns `None` when the ray is parallel to the plane or the plane lies
/// behind the ray origin. Callers treat `None` as "no movement this frame".
pub fn intersect_plane(ray: &Ray, plane: &Plane) -> Option<Vec3> {
    let denom = plane.normal.dot(&ray.direction);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (plane.distance - plane.normal.dot(&ray.origin)) / denom;
    if t < 0.0 || !t.is_finite() {
        return None;
    }
    Some(ray.point_at(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -5.0)).unwrap();
        assert_relative_eq!(ray.direction, Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(ray.point_at(2.0), Vec3::new(0.0, 0.0, -2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_zero_direction_rejected() {
        assert!(Ray::new(Vec3::zeros(), Vec3::zeros()).is_none());
    }

    #[test]
    fn test_plane_from_normal_and_point() {
        let plane = plane_from_normal_and_point(Vec3::new(0.0, 2.0, 0.0), Vec3::new(3.0, 1.5, -1.0));
        assert_relative_eq!(plane.normal, Vec3::y(), epsilon = EPSILON);
        assert_relative_eq!(plane.distance, 1.5, epsilon = EPSILON);
        assert_relative_eq!(plane.signed_distance(&Vec3::new(10.0, 1.5, 7.0)), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_intersect_horizontal_plane() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 5.0), Vec3::new(0.0, -1.0, -1.0)).unwrap();
        let hit = intersect_plane(&ray, &Plane::horizontal(0.0)).unwrap();
        assert_relative_eq!(hit, Vec3::new(0.0, 0.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_parallel_ray_has_no_intersection() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert!(intersect_plane(&ray, &Plane::horizontal(0.0)).is_none());
    }

    #[test]
    fn test_plane_behind_ray() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(intersect_plane(&ray, &Plane::horizontal(0.0)).is_none());
    }
}
