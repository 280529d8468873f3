//! The geometry services an implicit shape is realized through
//!
//! Realization turns a signed distance field and a box into a discretized
//! volume; extraction turns that volume into a surface mesh. Shapes only see
//! this trait, so any voxel engine can stand behind it. [`VoxelKernel`] is the
//! reference implementation shipped with this crate.
//!
//! [`VoxelKernel`]: crate::voxels::VoxelKernel

use crate::Result;
use crate::sdf::{Aabb, Implicit};
use std::sync::Arc;

/// Realization and extraction services
pub trait GeometryKernel: Send + Sync {
    /// Discretized volume produced by [`GeometryKernel::realize`]
    type Volume: Send + Sync;
    /// Surface produced by [`GeometryKernel::extract`]
    type Mesh: Send + Sync;

    /// Sample `sdf` over `bounds` at the kernel's chosen resolution.
    ///
    /// A panic inside `sdf` propagates out of this call.
    fn realize(&self, sdf: &dyn Implicit, bounds: Aabb) -> Result<Self::Volume>;

    /// Convert a realized volume into a polygonal surface.
    fn extract(&self, volume: &Self::Volume) -> Result<Self::Mesh>;
}

impl<K: GeometryKernel + ?Sized> GeometryKernel for &K {
    type Volume = K::Volume;
    type Mesh = K::Mesh;

    fn realize(&self, sdf: &dyn Implicit, bounds: Aabb) -> Result<Self::Volume> {
        (**self).realize(sdf, bounds)
    }

    fn extract(&self, volume: &Self::Volume) -> Result<Self::Mesh> {
        (**self).extract(volume)
    }
}

impl<K: GeometryKernel + ?Sized> GeometryKernel for Arc<K> {
    type Volume = K::Volume;
    type Mesh = K::Mesh;

    fn realize(&self, sdf: &dyn Implicit, bounds: Aabb) -> Result<Self::Volume> {
        (**self).realize(sdf, bounds)
    }

    fn extract(&self, volume: &Self::Volume) -> Result<Self::Mesh> {
        (**self).extract(volume)
    }
}
