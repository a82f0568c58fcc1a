//! Math utilities and types
//!
//! Provides the nalgebra aliases used across the editor plus the element
//! transform (position, Euler rotation, non-uniform scale).

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Build a rotation from Euler angles applied in XYZ order
///
/// The resulting matrix is `Rx * Ry * Rz`, which is the convention used by
/// the design documents and by most scene-authoring tools.
pub fn quat_from_euler_xyz(euler: &Vec3) -> Quat {
    Quat::from_axis_angle(&Vec3::x_axis(), euler.x)
        * Quat::from_axis_angle(&Vec3::y_axis(), euler.y)
        * Quat::from_axis_angle(&Vec3::z_axis(), euler.z)
}

/// Transform representing position, Euler rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation as Euler angles in radians (XYZ order)
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Rotation as a unit quaternion
    pub fn quaternion(&self) -> Quat {
        quat_from_euler_xyz(&self.rotation)
    }

    /// Convert to a transformation matrix (translation * rotation * scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.quaternion().to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        self.to_matrix().transform_point(point)
    }
}

/// Common mathematical constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Quarter turn, the step used by the rotate button
    pub const FRAC_PI_4: f32 = std::f32::consts::FRAC_PI_4;

    /// Small epsilon for float comparisons
    pub const EPSILON: f32 = 1e-6;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Rotation3;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_matrix() {
        assert_relative_eq!(Transform::identity().to_matrix(), Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_euler_y_rotation() {
        let q = quat_from_euler_xyz(&Vec3::new(0.0, constants::PI / 2.0, 0.0));
        let rotated = q * Vec3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_euler_order_is_xyz() {
        let euler = Vec3::new(0.3, 0.7, -0.2);
        let q = quat_from_euler_xyz(&euler);
        let expected: Mat3 = (Rotation3::from_axis_angle(&Vec3::x_axis(), 0.3)
            * Rotation3::from_axis_angle(&Vec3::y_axis(), 0.7)
            * Rotation3::from_axis_angle(&Vec3::z_axis(), -0.2))
            .into_inner();
        assert_relative_eq!(*q.to_rotation_matrix().matrix(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_trs_order() {
        let transform = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.0, constants::PI, 0.0),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };
        let p = transform.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(-1.0, 2.0, 3.0), epsilon = EPSILON);
    }
}
