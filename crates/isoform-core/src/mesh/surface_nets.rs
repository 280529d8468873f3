//! Naive surface nets over a sampled grid
//!
//! Every cell whose corners straddle the iso level gets one vertex at the
//! mean of its edge crossings. Every grid edge that straddles the iso level
//! gets one quad joining the four cells around it. Cells are processed in
//! parallel; quads are stitched serially.

use super::{Mesh, Vertex};
use crate::voxels::Voxels;
use crate::{Error, Result};
use glam::{UVec3, Vec3};
use rayon::prelude::*;

/// Corner offsets of a cell, bit `i` of the index selects axis `i`
const CORNERS: [UVec3; 8] = [
    UVec3::new(0, 0, 0),
    UVec3::new(1, 0, 0),
    UVec3::new(0, 1, 0),
    UVec3::new(1, 1, 0),
    UVec3::new(0, 0, 1),
    UVec3::new(1, 0, 1),
    UVec3::new(0, 1, 1),
    UVec3::new(1, 1, 1),
];

const AXES: [UVec3; 3] = [UVec3::X, UVec3::Y, UVec3::Z];

/// The twelve cell edges as corner index pairs
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Extract the `iso_level` surface of `voxels`
///
/// Triangles wind counter-clockwise seen from outside (where the field is
/// above `iso_level`), and vertex normals point along the field gradient.
pub fn extract(voxels: &Voxels, iso_level: f32) -> Result<Mesh> {
    let dims = voxels.dims();
    if dims.min_element() < 2 {
        return Err(Error::Extraction(format!(
            "grid {dims:?} has no cells to extract from"
        )));
    }

    let cells = dims - UVec3::ONE;
    let (cx, cy) = (cells.x as usize, cells.y as usize);
    let total_cells = cx * cy * cells.z as usize;

    // === Phase 1: one vertex per sign-changing cell ===
    let cell_vertices: Vec<Option<Vertex>> = (0..total_cells)
        .into_par_iter()
        .map(|idx| {
            let cell = UVec3::new(
                (idx % cx) as u32,
                ((idx / cx) % cy) as u32,
                (idx / (cx * cy)) as u32,
            );
            cell_vertex(voxels, cell, iso_level)
        })
        .collect();

    let mut mesh = Mesh::new();
    let mut slots = vec![u32::MAX; total_cells];
    for (slot, vertex) in slots.iter_mut().zip(cell_vertices) {
        if let Some(vertex) = vertex {
            *slot = mesh.vertices.len() as u32;
            mesh.vertices.push(vertex);
        }
    }

    // === Phase 2: one quad per sign-changing interior edge ===
    let cell_index =
        |c: UVec3| (c.z as usize * cy + c.y as usize) * cx + c.x as usize;

    for axis in 0..3 {
        let u = (axis + 1) % 3;
        let v = (axis + 2) % 3;
        let ea = AXES[axis];
        let eu = AXES[u];
        let ev = AXES[v];

        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    let node = UVec3::new(x, y, z);
                    let far = node + ea;
                    // Edge must stay inside the grid and have a cell on each side
                    if far[axis] >= dims[axis]
                        || node[u] == 0
                        || node[v] == 0
                        || node[u] >= cells[u]
                        || node[v] >= cells[v]
                    {
                        continue;
                    }

                    let inside_near = voxels.value(node.x, node.y, node.z) < iso_level;
                    let inside_far = voxels.value(far.x, far.y, far.z) < iso_level;
                    if inside_near == inside_far {
                        continue;
                    }

                    // Counter-clockwise around +axis
                    let quad = [
                        slots[cell_index(node - eu - ev)],
                        slots[cell_index(node - ev)],
                        slots[cell_index(node)],
                        slots[cell_index(node - eu)],
                    ];
                    if quad.contains(&u32::MAX) {
                        continue;
                    }

                    if inside_near {
                        mesh.indices
                            .extend_from_slice(&[quad[0], quad[1], quad[2], quad[0], quad[2], quad[3]]);
                    } else {
                        mesh.indices
                            .extend_from_slice(&[quad[0], quad[2], quad[1], quad[0], quad[3], quad[2]]);
                    }
                }
            }
        }
    }

    tracing::debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "extracted surface"
    );

    Ok(mesh)
}

/// Vertex for a single cell, `None` if the surface does not cross it
fn cell_vertex(voxels: &Voxels, cell: UVec3, iso_level: f32) -> Option<Vertex> {
    let corner_values = CORNERS.map(|o| {
        let n = cell + o;
        voxels.value(n.x, n.y, n.z)
    });

    let inside = corner_values.map(|d| d < iso_level);
    if inside.iter().all(|&i| i) || inside.iter().all(|&i| !i) {
        return None;
    }

    let mut sum = Vec3::ZERO;
    let mut crossings = 0.0f32;
    for (a, b) in EDGES {
        if inside[a] == inside[b] {
            continue;
        }
        let (da, db) = (corner_values[a], corner_values[b]);
        let t = if (db - da).abs() > 1e-6 {
            ((iso_level - da) / (db - da)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        sum += CORNERS[a].as_vec3().lerp(CORNERS[b].as_vec3(), t);
        crossings += 1.0;
    }

    let local = sum / crossings;
    let position = voxels.origin() + (cell.as_vec3() + local) * voxels.spacing();

    // Field gradient from the differences across each pair of opposite faces
    let mut gradient = Vec3::ZERO;
    for (i, o) in CORNERS.iter().enumerate() {
        let sign = o.as_vec3() * 2.0 - Vec3::ONE;
        gradient += sign * corner_values[i];
    }

    Some(Vertex::new(position, gradient.normalize_or_zero()))
}
