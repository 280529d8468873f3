//! # Isoform Core
//!
//! Implicit shapes and line modulations for procedural geometry.
//!
//! Shapes are signed distance functions with a bounding box. They are only
//! realized into a sampled volume, and meshed from that volume, when those
//! artifacts are first asked for. Line modulations are 1D profiles over a
//! length ratio in `[0, 1]` that a distance function can sample to vary a
//! parameter along the shape.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use isoform_core::prelude::*;
//!
//! // Radius swells from 1 to 2 and back along Z
//! let radius = LineModulation::from_values(vec![1.0, 2.0, 1.0], vec![0.0, 0.5, 1.0])?;
//! radius.validate()?;
//!
//! let bounds = Aabb::new(Vec3::new(-2.0, -2.0, 0.0), Vec3::new(2.0, 2.0, 4.0));
//! let tube = generic(
//!     move |x, y, z| {
//!         let ratio = (z / 4.0).clamp(0.0, 1.0);
//!         let r = radius.evaluate(ratio).expect("radius profile was validated");
//!         Vec2::new(x, y).length() - r
//!     },
//!     bounds,
//! )
//! .realized();
//!
//! let mesh = tube.mesh()?;
//! ```
//!
//! ## Units and Conventions
//!
//! - **Distances**: Arbitrary units, matching the bounding box
//! - **Precision**: All evaluation uses `f32`
//! - **Sign**: Negative inside, zero on the surface, positive outside

pub mod implicit;
pub mod kernel;
pub mod mesh;
pub mod modulation;
pub mod sdf;
pub mod voxels;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // Implicit shapes
    pub use crate::implicit::{
        ImplicitExt, ImplicitGeneric, ImplicitShape, ImplicitSphere, generic, sphere,
    };
    pub use crate::sdf::{Aabb, Coord, Implicit};

    // Realization
    pub use crate::kernel::GeometryKernel;
    pub use crate::mesh::{Mesh, Vertex};
    pub use crate::voxels::{VoxelConfig, VoxelKernel, Voxels};

    // Modulation
    pub use crate::modulation::{LineModulation, ModulationKind, Operator, PointTable, ValueTable};

    // Math (re-export glam)
    pub use glam::{Vec2, Vec3};

    // Error handling
    pub use crate::{Error, Result};
}
