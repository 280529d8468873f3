//! Reference realization: dense sampled grids
//!
//! Uses Rayon for parallel sampling of the distance field.

use crate::kernel::GeometryKernel;
use crate::mesh::{Mesh, surface_nets};
use crate::sdf::{Aabb, Implicit};
use crate::{Error, Result};
use glam::{UVec3, Vec3};
use rayon::prelude::*;

/// Configuration for volume realization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelConfig {
    /// Number of cells along the longest axis of the bounding box
    pub resolution: u32,
    /// Extra cells sampled around the bounding box on every side
    pub padding: u32,
    /// ISO level (distance value for surface extraction)
    pub iso_level: f32,
}

impl Default for VoxelConfig {
    fn default() -> Self {
        Self {
            resolution: 64,
            padding: 1,
            iso_level: 0.0,
        }
    }
}

impl VoxelConfig {
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_iso_level(mut self, iso_level: f32) -> Self {
        self.iso_level = iso_level;
        self
    }
}

/// Distance samples on a uniform grid
///
/// Samples are stored x-fastest, then y, then z.
#[derive(Debug, Clone)]
pub struct Voxels {
    origin: Vec3,
    spacing: f32,
    dims: UVec3,
    values: Vec<f32>,
}

impl Voxels {
    /// Grid position of the first sample
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Distance between neighbouring samples
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Number of samples along each axis
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// All samples in storage order
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat index of grid node `(x, y, z)`
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        let (nx, ny) = (self.dims.x as usize, self.dims.y as usize);
        (z as usize * ny + y as usize) * nx + x as usize
    }

    /// Sampled distance at grid node `(x, y, z)`
    pub fn value(&self, x: u32, y: u32, z: u32) -> f32 {
        self.values[self.index(x, y, z)]
    }

    /// World position of grid node `(x, y, z)`
    pub fn position(&self, x: u32, y: u32, z: u32) -> Vec3 {
        self.origin + UVec3::new(x, y, z).as_vec3() * self.spacing
    }

    /// Box spanned by the sampled grid, padding included
    pub fn bounds(&self) -> Aabb {
        let last = self.dims.saturating_sub(UVec3::ONE);
        Aabb::new(self.origin, self.position(last.x, last.y, last.z))
    }

    /// Number of samples strictly below `iso_level`
    pub fn inside_count(&self, iso_level: f32) -> usize {
        self.values.iter().filter(|&&v| v < iso_level).count()
    }
}

/// Reference kernel: parallel grid sampling plus surface nets
#[derive(Debug, Clone, Default)]
pub struct VoxelKernel {
    pub config: VoxelConfig,
}

impl VoxelKernel {
    pub fn new(config: VoxelConfig) -> Self {
        Self { config }
    }
}

impl GeometryKernel for VoxelKernel {
    type Volume = Voxels;
    type Mesh = Mesh;

    fn realize(&self, sdf: &dyn Implicit, bounds: Aabb) -> Result<Voxels> {
        sample_grid(sdf, bounds, &self.config)
    }

    fn extract(&self, volume: &Voxels) -> Result<Mesh> {
        surface_nets::extract(volume, self.config.iso_level)
    }
}

/// Sample `sdf` on a uniform grid covering `bounds`
pub fn sample_grid(sdf: &dyn Implicit, bounds: Aabb, config: &VoxelConfig) -> Result<Voxels> {
    if config.resolution == 0 {
        return Err(Error::Realization("resolution must be at least 1".into()));
    }
    if !bounds.is_valid() {
        return Err(Error::Realization(format!(
            "bounding box {:?}..{:?} is not finite and ordered",
            bounds.min, bounds.max
        )));
    }

    let size = bounds.size();
    let spacing = size.max_element() / config.resolution as f32;
    if spacing <= 0.0 {
        return Err(Error::Realization("bounding box has zero extent".into()));
    }

    let cells = (size / spacing).ceil().as_uvec3().max(UVec3::ONE);
    let dims = cells + UVec3::ONE + UVec3::splat(2 * config.padding);
    let origin = bounds.expand(config.padding as f32 * spacing).min;

    let (nx, ny) = (dims.x as usize, dims.y as usize);
    let total = nx * ny * dims.z as usize;

    let values: Vec<f32> = (0..total)
        .into_par_iter()
        .map(|idx| {
            let x = idx % nx;
            let y = (idx / nx) % ny;
            let z = idx / (nx * ny);
            let p = origin + Vec3::new(x as f32, y as f32, z as f32) * spacing;
            sdf.signed_distance(p)
        })
        .collect();

    tracing::debug!(?dims, spacing, samples = total, "sampled voxel grid");

    Ok(Voxels {
        origin,
        spacing,
        dims,
        values,
    })
}
