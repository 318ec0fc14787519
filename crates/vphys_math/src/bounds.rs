use serde::Serialize;

use crate::{Triangle, Vec3};

/// Axis-aligned bounding box of a point set.
///
/// An empty box has `min > max` on every axis, so growing it by any point
/// yields that point's degenerate box.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// A box that contains nothing.
    pub const EMPTY: Bounds = Bounds {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Smallest box containing all `points`.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut bounds = Self::EMPTY;
        for p in points {
            bounds.grow(*p);
        }
        bounds
    }

    /// Extend the box to contain `p`.
    pub fn grow(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Extend the box to contain every corner of `tri`.
    pub fn grow_triangle(&mut self, tri: &Triangle) {
        for p in tri.points() {
            self.grow(p);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Box extent per axis (zero for an empty box).
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let b = Bounds::default();
        assert!(b.is_empty());
        assert_eq!(b.size(), Vec3::ZERO);
    }

    #[test]
    fn test_from_points() {
        let points = [
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];
        let b = Bounds::from_points(&points);

        assert!(!b.is_empty());
        assert!((b.min.x - (-1.0)).abs() < 0.001);
        assert!((b.max.y - 5.0).abs() < 0.001);
        assert!((b.size().z - 9.0).abs() < 0.001);
        assert!((b.center().x - 1.5).abs() < 0.001);
    }

    #[test]
    fn test_grow_triangle() {
        let mut b = Bounds::EMPTY;
        b.grow_triangle(&Triangle::new(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
        ));
        assert_eq!(b.min, Vec3::ZERO);
        assert_eq!(b.max, Vec3::new(1.0, 0.0, 2.0));
    }
}
