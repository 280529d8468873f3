//! Primitive implicit shapes

use crate::sdf::{Aabb, Implicit};
use glam::Vec3;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Constructor functions (ergonomic API)
// ============================================================================

/// Create a sphere around `center`
pub fn sphere(center: Vec3, radius: f32) -> ImplicitSphere {
    ImplicitSphere::new(center, radius)
}

/// Wrap an arbitrary scalar field with an explicit bound
pub fn generic<F>(field: F, bounds: Aabb) -> ImplicitGeneric
where
    F: Fn(f32, f32, f32) -> f32 + Send + Sync + 'static,
{
    ImplicitGeneric::new(field, bounds)
}

// ============================================================================
// Primitive Structs
// ============================================================================

/// Analytic sphere
///
/// The radius is trusted as supplied. A negative radius inverts the bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImplicitSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl ImplicitSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Implicit for ImplicitSphere {
    fn signed_distance(&self, p: Vec3) -> f32 {
        p.distance(self.center) - self.radius
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_center(self.center, Vec3::splat(self.radius))
    }
}

/// A caller-supplied scalar field and the box it lives in
///
/// Both are returned verbatim. If the field's zero level set leaks out of
/// `bounds`, realization clips it without complaint.
#[derive(Clone)]
pub struct ImplicitGeneric {
    field: Arc<dyn Fn(f32, f32, f32) -> f32 + Send + Sync>,
    bounds: Aabb,
}

impl ImplicitGeneric {
    pub fn new<F>(field: F, bounds: Aabb) -> Self
    where
        F: Fn(f32, f32, f32) -> f32 + Send + Sync + 'static,
    {
        Self {
            field: Arc::new(field),
            bounds,
        }
    }
}

impl fmt::Debug for ImplicitGeneric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplicitGeneric")
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Implicit for ImplicitGeneric {
    fn signed_distance(&self, p: Vec3) -> f32 {
        (self.field)(p.x, p.y, p.z)
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds
    }
}
