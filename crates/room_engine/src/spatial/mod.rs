//! Spatial primitives and intersection tests
//!
//! The geometric core of pointer manipulation: rays, planes, and axis-aligned
//! bounding boxes. Everything here is pure; no function allocates or logs.

mod aabb;
mod ray;

pub use aabb::{bounding_box, Aabb};
pub use ray::{intersect_plane, plane_from_normal_and_point, Plane, Ray, PARALLEL_EPSILON};
