//! Triangle record for the `.tri` output format.
//!
//! A `.tri` file is a bare sequence of triangles, each stored as nine
//! little-endian `f32` values (P1.xyz, P2.xyz, P3.xyz). There is no header
//! and no padding, so `file_len / TRIANGLE_BYTES` is the triangle count.

use crate::Vec3;

/// Size of one triangle in the binary output.
pub const TRIANGLE_BYTES: usize = 36;

/// A triangle with three corner points.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Triangle {
    pub p1: [f32; 3],
    pub p2: [f32; 3],
    pub p3: [f32; 3],
}

impl Triangle {
    /// Create a triangle from three points.
    pub fn new(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self {
            p1: p1.to_array(),
            p2: p2.to_array(),
            p3: p3.to_array(),
        }
    }

    /// Corner points as `Vec3`s.
    pub fn points(&self) -> [Vec3; 3] {
        [
            Vec3::from_array(self.p1),
            Vec3::from_array(self.p2),
            Vec3::from_array(self.p3),
        ]
    }

    /// The nine coordinates in output order.
    pub fn as_floats(&self) -> &[f32; 9] {
        bytemuck::cast_ref(self)
    }

    /// Unnormalized face normal, `(p2 - p1) x (p3 - p1)`.
    pub fn normal(&self) -> Vec3 {
        let [a, b, c] = self.points();
        (b - a).cross(c - a)
    }

    /// Surface area.
    pub fn area(&self) -> f32 {
        self.normal().length() * 0.5
    }

    /// Encode as 36 little-endian bytes.
    pub fn to_le_bytes(&self) -> [u8; TRIANGLE_BYTES] {
        let mut out = [0u8; TRIANGLE_BYTES];
        for (chunk, value) in out.chunks_exact_mut(4).zip(self.as_floats()) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        out
    }

    /// Decode from 36 little-endian bytes. Returns `None` on a short slice.
    pub fn from_le_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < TRIANGLE_BYTES {
            return None;
        }

        let mut floats = [0.0f32; 9];
        for (value, chunk) in floats.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Some(bytemuck::cast(floats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_order() {
        let tri = Triangle::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        assert_eq!(
            tri.as_floats(),
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );
    }

    #[test]
    fn test_le_layout() {
        let tri = Triangle::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, Vec3::ZERO);
        let bytes = tri.to_le_bytes();

        // 1.0f32 == 0x3F800000
        assert_eq!(&bytes[0..4], &[0x00, 0x00, 0x80, 0x3F]);
        assert!(bytes[4..].iter().all(|&b| b == 0));
        assert_eq!(Triangle::from_le_bytes(&bytes), Some(tri));
    }

    #[test]
    fn test_short_slice() {
        assert_eq!(Triangle::from_le_bytes(&[0u8; 35]), None);
    }

    #[test]
    fn test_area() {
        let tri = Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        );
        assert!((tri.area() - 2.0).abs() < 0.001);
        assert!((tri.normal().normalize().z - 1.0).abs() < 0.001);
    }
}
