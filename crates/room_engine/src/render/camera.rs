//! Camera system
//!
//! Right-handed, Y-up perspective camera. Projection uses the OpenGL clip
//! convention (NDC depth in `[-1, 1]`), matching the pointer NDC produced by
//! [`crate::input::ViewportPointer`].

use crate::config::CameraConfig;
use crate::foundation::math::{Mat4, Point3, Vec2, Vec3, Vec4};
use crate::spatial::Ray;

/// Perspective camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera is looking at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::y(),
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    /// Create the default camera described by configuration
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            target: config.target,
            ..Self::perspective(config.position, config.fov_degrees, aspect, config.near, config.far)
        }
    }

    /// Set camera position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set look-at target
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Update aspect ratio (call on viewport resize)
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Whether the projection parameters can produce an invertible matrix
    pub fn is_valid(&self) -> bool {
        self.aspect.is_finite()
            && self.aspect > 0.0
            && self.fov > 0.0
            && self.fov < std::f32::consts::PI
            && self.near > 0.0
            && self.far > self.near
            && (self.target - self.position).norm() > f32::EPSILON
    }

    /// View matrix (world to camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(self.target),
            &self.up,
        )
    }

    /// Projection matrix (camera to clip)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }
}

/// Cast a ray from the camera through a pointer position in NDC
///
/// Unprojects the pointer at the near and far clip planes; the ray starts at
/// the camera position and points through the unprojected far point.
/// Returns `None` if the camera matrices are degenerate (zero aspect,
/// coincident eye and target).
pub fn ray_from_pointer(ndc: Vec2, camera: &Camera) -> Option<Ray> {
    if !camera.is_valid() {
        return None;
    }
    let inv_view_proj = camera.view_projection_matrix().try_inverse()?;

    let unproject = |z: f32| {
        let h = inv_view_proj * Vec4::new(ndc.x, ndc.y, z, 1.0);
        if h.w.abs() <= f32::EPSILON {
            None
        } else {
            Some(h.xyz() / h.w)
        }
    };

    let world_near = unproject(-1.0)?;
    let world_far = unproject(1.0)?;

    log::trace!("Pointer ray ({:.3}, {:.3}) near {:?} far {:?}", ndc.x, ndc.y, world_near, world_far);
    Ray::new(camera.position, world_far - world_near)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::default();
        let ray = ray_from_pointer(Vec2::zeros(), &camera).unwrap();
        let expected = (camera.target - camera.position).normalize();
        assert_relative_eq!(ray.direction, expected, epsilon = EPSILON);
        assert_relative_eq!(ray.origin, camera.position, epsilon = EPSILON);
    }

    #[test]
    fn test_right_edge_ray_leans_right() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 90.0, 1.0, 0.1, 100.0);
        let ray = ray_from_pointer(Vec2::new(1.0, 0.0), &camera).unwrap();
        // 90 degree fov, square aspect: the right edge is 45 degrees off axis
        assert_relative_eq!(ray.direction, Vec3::new(1.0, 0.0, -1.0).normalize(), epsilon = EPSILON);
    }

    #[test]
    fn test_top_edge_ray_leans_up() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 90.0, 1.0, 0.1, 100.0);
        let ray = ray_from_pointer(Vec2::new(0.0, 1.0), &camera).unwrap();
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn test_degenerate_camera() {
        let mut camera = Camera::default();
        camera.aspect = 0.0;
        assert!(ray_from_pointer(Vec2::zeros(), &camera).is_none());
    }
}
