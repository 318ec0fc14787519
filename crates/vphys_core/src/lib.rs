//! vphys core - KV3 parsing and collision geometry extraction.
//!
//! This crate provides:
//!
//! - **KV3 support**: text parsing into a generic tree with dotted-path queries
//! - **Byte arrays**: hex blob decoding into fixed-size records
//! - **Shape rebuilding**: half-edge hulls and indexed meshes to triangles
//! - **Conversion**: `.vphys` document to flat `.tri` triangle stream
//!
//! # Example
//!
//! ```ignore
//! use vphys_core::{convert_file, output_path, ConvertOptions};
//!
//! let report = convert_file("prop.vphys", output_path("prop.vphys"), &ConvertOptions::default())?;
//! println!("Wrote {} triangles", report.triangles);
//! ```

pub mod blob;
pub mod collision;
pub mod convert;
pub mod hull;
pub mod kv3;
pub mod mesh;
pub mod options;
pub mod sink;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use convert::{
    convert_document, convert_file, convert_str, output_path, Conversion, ConversionReport,
    ConvertError, ConvertResult, ShapeError,
};
pub use hull::{HalfEdge, Hull};
pub use kv3::{parse_kv3, Document, Value};
pub use mesh::Mesh;
pub use options::ConvertOptions;
pub use sink::TriangleSink;
