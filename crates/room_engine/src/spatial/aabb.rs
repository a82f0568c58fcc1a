//! Axis-aligned bounding boxes

use crate::foundation::math::Vec3;

use super::Ray;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a bounding box from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given size centred on `center`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Size along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Largest of the three extents
    pub fn max_dimension(&self) -> f32 {
        self.size().max()
    }

    /// Grow to include a point
    pub fn expand_to_include(&mut self, point: &Vec3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    /// Ray intersection test (slab method)
    ///
    /// Returns the entry distance along the ray, or 0 when the origin is
    /// inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = ray.direction.map(|d| if d == 0.0 { f32::INFINITY } else { 1.0 / d });

        let t1 = (self.min - ray.origin).component_mul(&inv_dir);
        let t2 = (self.max - ray.origin).component_mul(&inv_dir);

        let tmin = t1.inf(&t2).max();
        let tmax = t1.sup(&t2).min();

        if tmax >= tmin && tmax >= 0.0 {
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}

/// Axis-aligned bounds of a set of points
///
/// Returns `None` when the iterator is empty.
pub fn bounding_box<I>(points: I) -> Option<Aabb>
where
    I: IntoIterator<Item = Vec3>,
{
    let mut points = points.into_iter();
    let first = points.next()?;
    let mut bounds = Aabb::new(first, first);
    for point in points {
        bounds.expand_to_include(&point);
    }
    Some(bounds)
}
