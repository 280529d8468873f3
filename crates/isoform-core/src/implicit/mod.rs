//! Implicit shapes with lazily realized volume and mesh
//!
//! [`ImplicitShape`] wraps any [`Implicit`] and owns the artifacts derived
//! from it. The volume is realized on first access and the mesh is extracted
//! from that volume on first access. Both are cached for the lifetime of the
//! wrapper, and the wrapped field and bounds never change after construction.
//!
//! ## Example
//!
//! ```rust,ignore
//! use isoform_core::prelude::*;
//!
//! let ball = sphere(Vec3::ZERO, 2.0).realized();
//! let mesh = ball.mesh()?;
//! println!("{} triangles", mesh.triangle_count());
//! ```

pub mod primitives;

use crate::Result;
use crate::kernel::GeometryKernel;
use crate::sdf::{Aabb, Implicit};
use crate::voxels::VoxelKernel;
use glam::Vec3;
use std::sync::OnceLock;

pub use primitives::{ImplicitGeneric, ImplicitSphere, generic, sphere};

/// An implicit together with its memoized volume and mesh
///
/// Distinct shapes share no mutable state, so they can be realized in
/// parallel. Concurrent first access to the *same* shape may run the kernel
/// more than once; only the first stored result is ever observed.
pub struct ImplicitShape<S, K = VoxelKernel>
where
    K: GeometryKernel,
{
    shape: S,
    kernel: K,
    volume: OnceLock<K::Volume>,
    mesh: OnceLock<K::Mesh>,
}

impl<S: Implicit> ImplicitShape<S> {
    /// Wrap a shape using the reference voxel kernel
    pub fn new(shape: S) -> Self {
        Self::with_kernel(shape, VoxelKernel::default())
    }
}

impl<S: Implicit, K: GeometryKernel> ImplicitShape<S, K> {
    /// Wrap a shape that will be realized through `kernel`
    pub fn with_kernel(shape: S, kernel: K) -> Self {
        Self {
            shape,
            kernel,
            volume: OnceLock::new(),
            mesh: OnceLock::new(),
        }
    }

    /// The wrapped implicit
    pub fn shape(&self) -> &S {
        &self.shape
    }

    /// The kernel this shape realizes through
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Signed distance of the wrapped implicit
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.shape.signed_distance(p)
    }

    /// Bounding box of the wrapped implicit, recomputed on every call
    pub fn bounding_box(&self) -> Aabb {
        self.shape.bounding_box()
    }

    /// Discretized volume, realized on first access
    pub fn volume(&self) -> Result<&K::Volume> {
        if let Some(volume) = self.volume.get() {
            return Ok(volume);
        }

        let bounds = self.bounding_box();
        tracing::debug!(min = ?bounds.min, max = ?bounds.max, "realizing implicit volume");
        let volume = self.kernel.realize(&self.shape, bounds)?;

        Ok(self.volume.get_or_init(|| volume))
    }

    /// Surface mesh, extracted from the volume on first access
    pub fn mesh(&self) -> Result<&K::Mesh> {
        if let Some(mesh) = self.mesh.get() {
            return Ok(mesh);
        }

        let volume = self.volume()?;
        tracing::debug!("extracting implicit mesh");
        let mesh = self.kernel.extract(volume)?;

        Ok(self.mesh.get_or_init(|| mesh))
    }

    /// Whether the volume has been realized yet
    pub fn is_realized(&self) -> bool {
        self.volume.get().is_some()
    }

    /// Whether the mesh has been extracted yet
    pub fn is_meshed(&self) -> bool {
        self.mesh.get().is_some()
    }

    /// Drop the cached artifacts and return the wrapped implicit
    pub fn into_inner(self) -> S {
        self.shape
    }
}

impl<S: Implicit, K: GeometryKernel> Implicit for ImplicitShape<S, K> {
    fn signed_distance(&self, p: Vec3) -> f32 {
        self.shape.signed_distance(p)
    }

    fn bounding_box(&self) -> Aabb {
        self.shape.bounding_box()
    }
}

/// Extension trait turning any implicit into a realizable shape
pub trait ImplicitExt: Implicit + Sized {
    /// Wrap with the reference voxel kernel
    fn realized(self) -> ImplicitShape<Self> {
        ImplicitShape::new(self)
    }

    /// Wrap with a custom kernel
    fn realized_with<K: GeometryKernel>(self, kernel: K) -> ImplicitShape<Self, K> {
        ImplicitShape::with_kernel(self, kernel)
    }
}

impl<T: Implicit> ImplicitExt for T {}
