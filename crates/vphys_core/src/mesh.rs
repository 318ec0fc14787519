//! Indexed triangle meshes from `m_meshes` shape entries.
//!
//! Unlike hulls, mesh shapes already store explicit triangles: a flat
//! `i32` index array (three per triangle) into a `float[3]` vertex array.

use vphys_math::{Bounds, Triangle, Vec3};

use crate::blob::{decode, decode_points, DecodeResult, TailPolicy};
use crate::hull::{IndexKind, ReconstructError, ReconstructResult};

/// A decoded collision mesh.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<i32>,
}

impl Mesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<i32>) -> Self {
        Self { positions, indices }
    }

    /// Decode a mesh from its `m_Triangles` and `m_Vertices` byte arrays.
    pub fn from_blobs(triangles: &str, vertices: &str, tail: TailPolicy) -> DecodeResult<Self> {
        let mesh = Self {
            indices: decode::<i32>(triangles, tail)?,
            positions: decode_points(vertices, tail)?,
        };

        log::debug!(
            "Decoded mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.positions)
    }

    fn position(&self, index: i32) -> ReconstructResult<Vec3> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.positions.get(i))
            .copied()
            .ok_or(ReconstructError::IndexOutOfRange {
                kind: IndexKind::Vertex,
                index: index as i64,
                len: self.positions.len(),
            })
    }

    /// Look up every index triple.
    ///
    /// Fails on the first out-of-range index, or if the index count is not
    /// a multiple of three.
    pub fn triangles(&self) -> ReconstructResult<Vec<Triangle>> {
        if self.indices.len() % 3 != 0 {
            return Err(ReconstructError::PartialTriangle(self.indices.len()));
        }

        self.indices
            .chunks_exact(3)
            .map(|tri| {
                Ok(Triangle::new(
                    self.position(tri[0])?,
                    self.position(tri[1])?,
                    self.position(tri[2])?,
                ))
            })
            .collect()
    }
}
