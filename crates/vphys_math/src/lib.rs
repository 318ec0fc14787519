// Re-export glam for convenience
pub use glam::*;

// Output geometry types
mod bounds;
mod triangle;
pub use bounds::Bounds;
pub use triangle::{Triangle, TRIANGLE_BYTES};
