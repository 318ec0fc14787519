//! Convex hull reconstruction from a compact half-edge encoding.
//!
//! A physics hull stores its topology as three byte arrays:
//!
//! ```text
//! m_VertexPositions: float[3] per vertex
//! m_Faces:           u8 per face, the half-edge that starts the face loop
//! m_Edges:           [next, twin, origin, face] per half-edge, all u8
//! ```
//!
//! Each face loop is triangulated as a fan anchored at the start edge's
//! origin. Hull faces are convex and planar, so the fan is exact.

use std::fmt;

use thiserror::Error;
use vphys_math::{Bounds, Triangle, Vec3};

use crate::blob::{decode, decode_points, DecodeResult, Record, TailPolicy};

/// Default upper bound on half-edge steps per face.
pub const DEFAULT_MAX_FACE_EDGES: usize = 10_000;

/// Which table an out-of-range index pointed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexKind {
    Vertex,
    HalfEdge,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Vertex => f.write_str("vertex"),
            IndexKind::HalfEdge => f.write_str("half-edge"),
        }
    }
}

/// Errors that can occur while turning shape data into triangles.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconstructError {
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange { kind: IndexKind, index: i64, len: usize },

    #[error("Face {face} (start edge {start_edge}) did not close after {steps} steps")]
    LoopBoundExceeded {
        face: usize,
        start_edge: usize,
        steps: usize,
    },

    #[error("Triangle index count {0} is not a multiple of 3")]
    PartialTriangle(usize),
}

/// Result type for reconstruction operations.
pub type ReconstructResult<T> = Result<T, ReconstructError>;

/// One half-edge record, as stored in `m_Edges`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HalfEdge {
    /// Next half-edge around the same face
    pub next: u8,

    /// Opposite half-edge (unused by triangulation)
    pub twin: u8,

    /// Vertex this half-edge starts at
    pub origin: u8,

    /// Face this half-edge belongs to
    pub face: u8,
}

impl HalfEdge {
    pub fn new(next: u8, twin: u8, origin: u8, face: u8) -> Self {
        Self {
            next,
            twin,
            origin,
            face,
        }
    }
}

impl Record for HalfEdge {
    fn from_le(raw: Self) -> Self {
        raw
    }
}

/// A decoded convex hull.
#[derive(Clone, Debug, Default)]
pub struct Hull {
    /// Vertex positions
    pub vertices: Vec<Vec3>,

    /// Start half-edge of each face
    pub faces: Vec<u8>,

    /// Half-edge table
    pub edges: Vec<HalfEdge>,
}

/// Triangles produced from one hull.
#[derive(Clone, Debug, Default)]
pub struct HullTriangulation {
    pub triangles: Vec<Triangle>,

    /// Faces whose loop never closed; they contribute no triangles
    pub aborted_faces: Vec<ReconstructError>,
}

impl Hull {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<u8>, edges: Vec<HalfEdge>) -> Self {
        Self {
            vertices,
            faces,
            edges,
        }
    }

    /// Decode a hull from its three byte-array fields.
    pub fn from_blobs(vertices: &str, faces: &str, edges: &str, tail: TailPolicy) -> DecodeResult<Self> {
        let hull = Self {
            vertices: decode_points(vertices, tail)?,
            faces: decode::<u8>(faces, tail)?,
            edges: decode::<HalfEdge>(edges, tail)?,
        };

        log::debug!(
            "Decoded hull: {} vertices, {} faces, {} half-edges",
            hull.vertices.len(),
            hull.faces.len(),
            hull.edges.len()
        );

        Ok(hull)
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.vertices)
    }

    fn edge(&self, index: usize) -> ReconstructResult<&HalfEdge> {
        self.edges.get(index).ok_or(ReconstructError::IndexOutOfRange {
            kind: IndexKind::HalfEdge,
            index: index as i64,
            len: self.edges.len(),
        })
    }

    fn vertex(&self, index: u8) -> ReconstructResult<Vec3> {
        self.vertices
            .get(index as usize)
            .copied()
            .ok_or(ReconstructError::IndexOutOfRange {
                kind: IndexKind::Vertex,
                index: index as i64,
                len: self.vertices.len(),
            })
    }

    /// Fan-triangulate every face.
    ///
    /// An out-of-range index fails the whole hull. A face loop that revisits
    /// an edge or runs past `max_face_edges` steps is skipped and recorded in
    /// [`HullTriangulation::aborted_faces`].
    pub fn triangulate(&self, max_face_edges: usize) -> ReconstructResult<HullTriangulation> {
        let mut result = HullTriangulation {
            triangles: Vec::with_capacity(self.edges.len()),
            aborted_faces: Vec::new(),
        };

        for (face, &start) in self.faces.iter().enumerate() {
            let first = result.triangles.len();

            match self.triangulate_face(face, start as usize, max_face_edges, &mut result.triangles) {
                Ok(()) => {}
                Err(e @ ReconstructError::LoopBoundExceeded { .. }) => {
                    log::warn!("Skipping hull face: {}", e);
                    result.triangles.truncate(first);
                    result.aborted_faces.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(result)
    }

    /// Emit the fan for one face loop into `out`.
    fn triangulate_face(
        &self,
        face: usize,
        start: usize,
        max_steps: usize,
        out: &mut Vec<Triangle>,
    ) -> ReconstructResult<()> {
        let start_edge = self.edge(start)?;
        let anchor = self.vertex(start_edge.origin)?;

        let mut visited = vec![false; self.edges.len()];
        visited[start] = true;

        let mut edge = start_edge.next as usize;
        let mut steps = 0usize;

        while edge != start {
            let current = self.edge(edge)?;
            steps += 1;

            if visited[edge] || steps > max_steps {
                return Err(ReconstructError::LoopBoundExceeded {
                    face,
                    start_edge: start,
                    steps,
                });
            }
            visited[edge] = true;

            let next = current.next as usize;
            if next == start {
                break;
            }

            let next_origin = self.edge(next)?.origin;
            out.push(Triangle::new(
                anchor,
                self.vertex(current.origin)?,
                self.vertex(next_origin)?,
            ));
            edge = next;
        }

        Ok(())
    }
}
