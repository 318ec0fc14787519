//! Shared test data.

use vphys_math::Vec3;

use crate::hull::{HalfEdge, Hull};

/// Hex text for a byte slice, as it appears inside `#[ .. ]`.
pub fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Hex text for packed `float[3]` points.
pub fn points_hex(points: &[[f32; 3]]) -> String {
    let bytes: Vec<u8> = points
        .iter()
        .flatten()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    hex(&bytes)
}

/// Hex text for packed `i32` values.
pub fn ints_hex(values: &[i32]) -> String {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    hex(&bytes)
}

pub const TETRA_POINTS: [[f32; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Faces (0,1,2) (0,3,1) (1,3,2) (2,3,0); face `f` owns half-edges 3f..3f+2.
pub const TETRA_FACES: [u8; 4] = [0, 3, 6, 9];

/// `[next, twin, origin, face]` per half-edge.
pub const TETRA_EDGES: [[u8; 4]; 12] = [
    [1, 5, 0, 0],
    [2, 8, 1, 0],
    [0, 11, 2, 0],
    [4, 10, 0, 1],
    [5, 6, 3, 1],
    [3, 0, 1, 1],
    [7, 4, 1, 2],
    [8, 9, 3, 2],
    [6, 1, 2, 2],
    [10, 7, 2, 3],
    [11, 3, 3, 3],
    [9, 2, 0, 3],
];

pub fn tetrahedron() -> Hull {
    Hull::new(
        TETRA_POINTS.iter().copied().map(Vec3::from_array).collect(),
        TETRA_FACES.to_vec(),
        TETRA_EDGES
            .iter()
            .map(|e| HalfEdge::new(e[0], e[1], e[2], e[3]))
            .collect(),
    )
}

/// Byte-array fields of the tetrahedron: (vertices, faces, edges).
pub fn tetrahedron_hex() -> (String, String, String) {
    let edges: Vec<u8> = TETRA_EDGES.iter().flatten().copied().collect();
    (points_hex(&TETRA_POINTS), hex(&TETRA_FACES), hex(&edges))
}

/// A single planar `n`-gon face with edges `0 -> 1 -> .. -> n-1 -> 0`.
pub fn polygon_hull(n: u8) -> Hull {
    let vertices = (0..n)
        .map(|i| {
            let angle = i as f32 / n as f32 * std::f32::consts::TAU;
            Vec3::new(angle.cos(), angle.sin(), 0.0)
        })
        .collect();
    let edges = (0..n).map(|i| HalfEdge::new((i + 1) % n, 0, i, 0)).collect();

    Hull::new(vertices, vec![0], edges)
}

/// A `.vphys`-style document with the given attribute groups, hulls and meshes.
///
/// `hulls` and `meshes` are pre-rendered shape entries (the text inside `{ }`).
pub fn vphys_document(groups: &[&str], hulls: &[String], meshes: &[String]) -> String {
    let attrs: String = groups
        .iter()
        .map(|g| format!("\t\t{{ m_CollisionGroupString = \"{}\" }},\n", g))
        .collect();
    let hulls: String = hulls.iter().map(|h| format!("\t\t\t\t\t{{\n{}\n\t\t\t\t\t}},\n", h)).collect();
    let meshes: String = meshes.iter().map(|m| format!("\t\t\t\t\t{{\n{}\n\t\t\t\t\t}},\n", m)).collect();

    format!(
        "<!-- kv3 encoding:text:version{{e21c7f3c-8a33-41c5-9977-a76d3a32aa0d}} format:vphys:version{{bc7c4d0c-e3f8-4d4f-b4e5-3e0ac8a3ee66}} -->\n\
{{\n\
\tm_parts =\n\
\t[\n\
\t\t{{\n\
\t\t\tm_rnShape =\n\
\t\t\t{{\n\
\t\t\t\tm_hulls =\n\
\t\t\t\t[\n{hulls}\t\t\t\t]\n\
\t\t\t\tm_meshes =\n\
\t\t\t\t[\n{meshes}\t\t\t\t]\n\
\t\t\t}}\n\
\t\t}},\n\
\t]\n\
\tm_collisionAttributes =\n\
\t[\n{attrs}\t]\n\
}}\n"
    )
}

/// A hull shape entry using the tetrahedron.
pub fn tetra_hull_entry(attribute: i32, vertex_field: &str) -> String {
    let (vertices, faces, edges) = tetrahedron_hex();
    format!(
        "m_nCollisionAttributeIndex = {attribute}\n\
m_Hull =\n\
{{\n\
\t{vertex_field} = #[ {vertices} ]\n\
\tm_Faces = #[ {faces} ]\n\
\tm_Edges = #[ {edges} ]\n\
}}"
    )
}

/// A mesh shape entry with four vertices and two triangles `(0,1,2) (2,1,3)`.
pub fn quad_mesh_entry(attribute: i32) -> String {
    let vertices = points_hex(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ]);
    let triangles = ints_hex(&[0, 1, 2, 2, 1, 3]);
    format!(
        "m_nCollisionAttributeIndex = {attribute}\n\
m_Mesh =\n\
{{\n\
\tm_Triangles = #[ {triangles} ]\n\
\tm_Vertices = #[ {vertices} ]\n\
}}"
    )
}
