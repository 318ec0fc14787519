//! Triangle accumulation and `.tri` output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use vphys_math::{Bounds, Triangle, TRIANGLE_BYTES};

/// Collects triangles in emission order and writes them as a `.tri` stream.
#[derive(Clone, Debug, Default)]
pub struct TriangleSink {
    triangles: Vec<Triangle>,
    bounds: Bounds,
}

impl TriangleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, triangle: Triangle) {
        self.bounds.grow_triangle(&triangle);
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Bounds of every point pushed so far.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Write all triangles, 36 bytes each, no header.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for triangle in &self.triangles {
            writer.write_all(&triangle.to_le_bytes())?;
        }
        writer.flush()
    }

    /// The whole `.tri` stream in memory.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.triangles.len() * TRIANGLE_BYTES);
        for triangle in &self.triangles {
            bytes.extend_from_slice(&triangle.to_le_bytes());
        }
        bytes
    }

    /// Create (or truncate) `path` and write the `.tri` stream to it.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        log::info!("Wrote {} triangles to {}", self.len(), path.display());
        Ok(())
    }
}

impl Extend<Triangle> for TriangleSink {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        for triangle in iter {
            self.push(triangle);
        }
    }
}

/// Read a `.tri` stream back. Trailing bytes short of a full triangle are ignored.
pub fn read_triangles(bytes: &[u8]) -> Vec<Triangle> {
    bytes
        .chunks_exact(TRIANGLE_BYTES)
        .filter_map(Triangle::from_le_bytes)
        .collect()
}
