//! Signed distance fields and the boxes that bound them
//!
//! An implicit shape is described by a function that returns the distance
//! from any point in space to the nearest surface. Negative values are inside,
//! positive values are outside, and zero is exactly on the surface.
//!
//! Every implicit also reports an axis-aligned bounding box. Realization only
//! samples the field inside that box, so a box that does not enclose every
//! point where the distance is `<= 0` silently clips the shape. Nothing in
//! this crate checks that; it is the implementor's contract.

use glam::Vec3;
use std::sync::Arc;

/// The core implicit trait - anything with a signed distance and a bound
pub trait Implicit: Send + Sync {
    /// Calculate the signed distance from point `p` to the surface.
    ///
    /// - Returns negative values for points inside the shape
    /// - Returns positive values for points outside the shape
    /// - Returns zero for points exactly on the surface
    ///
    /// Must be pure. It is called from many threads during realization.
    fn signed_distance(&self, p: Vec3) -> f32;

    /// Bounding box enclosing the zero level set.
    ///
    /// Recomputed on every call, so keep it cheap and independent of any
    /// derived state.
    fn bounding_box(&self) -> Aabb;
}

impl<T: Implicit + ?Sized> Implicit for &T {
    fn signed_distance(&self, p: Vec3) -> f32 {
        (**self).signed_distance(p)
    }

    fn bounding_box(&self) -> Aabb {
        (**self).bounding_box()
    }
}

impl<T: Implicit + ?Sized> Implicit for Box<T> {
    fn signed_distance(&self, p: Vec3) -> f32 {
        (**self).signed_distance(p)
    }

    fn bounding_box(&self) -> Aabb {
        (**self).bounding_box()
    }
}

impl<T: Implicit + ?Sized> Implicit for Arc<T> {
    fn signed_distance(&self, p: Vec3) -> f32 {
        (**self).signed_distance(p)
    }

    fn bounding_box(&self) -> Aabb {
        (**self).bounding_box()
    }
}

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a cube centered at origin
    pub fn cube(half_size: f32) -> Self {
        Self::new(Vec3::splat(-half_size), Vec3::splat(half_size))
    }

    /// Create from center and half-extents
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Expand the bounding box by a margin
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(
            self.min - Vec3::splat(margin),
            self.max + Vec3::splat(margin),
        )
    }

    /// Merge two bounding boxes
    pub fn union(&self, other: &Aabb) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Get the size of the bounding box
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get the center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// True if `p` lies inside or on the box
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// True if every corner is finite and `min <= max` on all axes
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }
}

/// One of the three coordinate axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coord {
    X,
    Y,
    Z,
}

impl Coord {
    /// Unit vector along this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Coord::X => Vec3::X,
            Coord::Y => Vec3::Y,
            Coord::Z => Vec3::Z,
        }
    }

    /// Read this coordinate out of a point
    pub fn of(self, p: Vec3) -> f32 {
        match self {
            Coord::X => p.x,
            Coord::Y => p.y,
            Coord::Z => p.z,
        }
    }
}
