//! CPU-side triangle meshes and procedural primitive generators
//!
//! Generators follow the usual scene-authoring conventions: every primitive
//! is centred on its local origin, cylinders and cones stand along +Y, and
//! rings lie in the XY plane facing +Z. Triangles wind counter-clockwise
//! when seen from outside.

use std::f32::consts::{PI, TAU};

use crate::foundation::math::Vec3;
use crate::spatial::{bounding_box, Aabb};

/// Indexed triangle list with per-vertex normals
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals, same length as `positions`
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices into `positions`
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create a mesh from raw buffers
    pub fn new(positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self { positions, normals, indices }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no drawable triangles
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    /// Local-space bounds of the vertex positions
    pub fn bounds(&self) -> Option<Aabb> {
        bounding_box(self.positions.iter().map(|p| Vec3::from(*p)))
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let index = self.positions.len() as u32;
        self.positions.push(position.into());
        self.normals.push(normal.into());
        index
    }

    /// Axis-aligned box of the given size, 4 vertices per face
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
        // (normal, u axis, v axis) with u x v == normal
        let faces = [
            (Vec3::x(), -Vec3::z(), Vec3::y()),
            (-Vec3::x(), Vec3::z(), Vec3::y()),
            (Vec3::y(), Vec3::x(), -Vec3::z()),
            (-Vec3::y(), Vec3::x(), Vec3::z()),
            (Vec3::z(), Vec3::x(), Vec3::y()),
            (-Vec3::z(), -Vec3::x(), Vec3::y()),
        ];
        let half = Vec3::new(hx, hy, hz);

        let mut mesh = Self::default();
        for (normal, u, v) in faces {
            let center = normal.component_mul(&half);
            let du = u.component_mul(&half);
            let dv = v.component_mul(&half);
            let a = mesh.push_vertex(center - du - dv, normal);
            let b = mesh.push_vertex(center + du - dv, normal);
            let c = mesh.push_vertex(center + du + dv, normal);
            let d = mesh.push_vertex(center - du + dv, normal);
            mesh.indices.extend_from_slice(&[a, b, c, c, d, a]);
        }
        mesh
    }

    /// Capped cylinder (or frustum) along +Y
    ///
    /// A zero radius skips the corresponding cap, which makes a cone.
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        let segments = radial_segments.max(3);
        let half_height = height * 0.5;
        let slope = if height > 0.0 { (radius_bottom - radius_top) / height } else { 0.0 };

        let mut mesh = Self::default();

        // Side wall: row 0 is the top ring, row 1 the bottom ring.
        let mut rows = [Vec::new(), Vec::new()];
        for (row, (radius, y)) in [(radius_top, half_height), (radius_bottom, -half_height)]
            .into_iter()
            .enumerate()
        {
            for i in 0..=segments {
                let theta = ring_angle(i, segments);
                let (sin, cos) = theta.sin_cos();
                let normal = Vec3::new(sin, slope, cos).normalize();
                rows[row].push(mesh.push_vertex(Vec3::new(radius * sin, y, radius * cos), normal));
            }
        }
        for i in 0..segments as usize {
            let a = rows[0][i];
            let b = rows[1][i];
            let c = rows[1][i + 1];
            let d = rows[0][i + 1];
            if radius_top > 0.0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if radius_bottom > 0.0 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }

        if radius_top > 0.0 {
            mesh.push_cap(radius_top, half_height, segments, true);
        }
        if radius_bottom > 0.0 {
            mesh.push_cap(radius_bottom, -half_height, segments, false);
        }
        mesh
    }

    /// Cone along +Y with the apex at the top
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Self::cylinder(0.0, radius, height, radial_segments)
    }

    fn push_cap(&mut self, radius: f32, y: f32, segments: u32, top: bool) {
        let normal = if top { Vec3::y() } else { -Vec3::y() };
        let center = self.push_vertex(Vec3::new(0.0, y, 0.0), normal);
        let first = self.positions.len();
        for i in 0..=segments {
            let (sin, cos) = ring_angle(i, segments).sin_cos();
            self.push_vertex(Vec3::new(radius * sin, y, radius * cos), normal);
        }
        #[allow(clippy::cast_possible_truncation)]
        let first = first as u32;
        for i in 0..segments {
            let (a, b) = (first + i, first + i + 1);
            if top {
                self.indices.extend_from_slice(&[center, a, b]);
            } else {
                self.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    /// UV sphere; pole rows drop their degenerate triangles
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut mesh = Self::default();
        let mut grid = Vec::with_capacity(height_segments as usize + 1);
        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let row: Vec<u32> = (0..=width_segments)
                .map(|ix| {
                    let u = ix as f32 / width_segments as f32;
                    let (sin_phi, cos_phi) = (u * TAU).sin_cos();
                    let (sin_theta, cos_theta) = (v * PI).sin_cos();
                    let normal = Vec3::new(-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
                    mesh.push_vertex(normal * radius, normal)
                })
                .collect();
            grid.push(row);
        }

        for iy in 0..height_segments as usize {
            for ix in 0..width_segments as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];
                if iy != 0 {
                    mesh.indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments as usize - 1 {
                    mesh.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }
        mesh
    }

    /// Flat annulus in the XY plane facing +Z
    pub fn ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> Self {
        let segments = theta_segments.max(3);
        let normal = Vec3::z();

        let mut mesh = Self::default();
        let mut rows = [Vec::new(), Vec::new()];
        for (row, radius) in [inner_radius, outer_radius].into_iter().enumerate() {
            for i in 0..=segments {
                let (sin, cos) = ring_angle(i, segments).sin_cos();
                rows[row].push(mesh.push_vertex(Vec3::new(radius * cos, radius * sin, 0.0), normal));
            }
        }
        for i in 0..segments as usize {
            let a = rows[0][i];
            let b = rows[1][i];
            let c = rows[1][i + 1];
            let d = rows[0][i + 1];
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
        mesh
    }
}

fn ring_angle(i: u32, segments: u32) -> f32 {
    i as f32 / segments as f32 * TAU
}
