//! Triangle meshes extracted from realized volumes

pub mod surface_nets;

use crate::sdf::Aabb;
use glam::Vec3;

/// A vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// A triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over triangles as vertex positions
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize].position(),
                self.vertices[tri[1] as usize].position(),
                self.vertices[tri[2] as usize].position(),
            ]
        })
    }

    /// Tight box around all vertices, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Aabb> {
        let point = |v: &Vertex| Aabb::new(v.position(), v.position());
        let first = point(self.vertices.first()?);
        Some(
            self.vertices
                .iter()
                .fold(first, |b, v| b.union(&point(v))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        let vertices = vec![
            Vertex::new(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO),
            Vertex::new(Vec3::new(1.0, 1.0, 0.0), Vec3::ZERO),
            Vertex::new(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO),
        ];
        Mesh {
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn counts_and_bounds() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles().count(), 2);

        let b = mesh.bounds();
        assert_eq!(b, Some(Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0))));
        assert!(Mesh::new().bounds().is_none());
    }
}
