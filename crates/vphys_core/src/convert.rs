//! High-level `.vphys` to `.tri` conversion.
//!
//! This module walks the shape lists of a parsed physics document, rebuilds
//! geometry for every shape in an accepted collision group and collects the
//! triangles in a [`TriangleSink`].
//!
//! Shapes are independent: a shape that fails to decode or reconstruct is
//! skipped and recorded in the [`ConversionReport`], and the remaining shapes
//! are still converted. Only I/O, configuration and document parse errors
//! abort a run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use vphys_math::Bounds;

use crate::blob::DecodeError;
use crate::collision::AttributeFilter;
use crate::hull::{Hull, ReconstructError};
use crate::kv3::{parse_kv3, Document, ParseError};
use crate::mesh::Mesh;
use crate::options::ConvertOptions;
use crate::sink::TriangleSink;

/// Errors that abort a whole conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that skip a single shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Reconstruction error: {0}")]
    Reconstruct(#[from] ReconstructError),

    #[error("Invalid collision attribute index: {0}")]
    InvalidAttributeIndex(String),

    #[error("Missing field: {0}")]
    MissingField(String),
}

/// The two shape lists of `m_rnShape`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Hull,
    Mesh,
}

impl ShapeKind {
    fn list_key(self) -> &'static str {
        match self {
            ShapeKind::Hull => "m_hulls",
            ShapeKind::Mesh => "m_meshes",
        }
    }
}

/// A shape that was selected but produced no geometry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkippedShape {
    pub kind: ShapeKind,
    pub part: usize,
    pub index: usize,
    pub reason: String,
}

/// Summary of one conversion run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConversionReport {
    /// Collision attribute entries in the document
    pub collision_attributes: usize,

    /// Attribute indices in accepted groups
    pub retained_attributes: Vec<i64>,

    /// Parts whose shapes were scanned
    pub parts: usize,

    pub hulls_total: usize,
    pub hulls_converted: usize,
    pub meshes_total: usize,
    pub meshes_converted: usize,

    /// Triangles emitted
    pub triangles: usize,

    /// Hull faces dropped because their half-edge loop never closed
    pub aborted_faces: usize,

    pub skipped: Vec<SkippedShape>,

    /// Bounds of the emitted triangles, if any
    pub bounds: Option<Bounds>,
}

/// Triangles plus the report that describes them.
#[derive(Clone, Debug, Default)]
pub struct Conversion {
    pub sink: TriangleSink,
    pub report: ConversionReport,
}

/// Convert a parsed document.
pub fn convert_document(doc: &Document, options: &ConvertOptions) -> Conversion {
    ShapeConverter::new(doc, options).run()
}

/// Parse and convert `.vphys` text.
pub fn convert_str(content: &str, options: &ConvertOptions) -> ConvertResult<Conversion> {
    let doc = parse_kv3(content)?;
    Ok(convert_document(&doc, options))
}

/// Default output path: the input path with a `.tri` extension.
pub fn output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    input.as_ref().with_extension("tri")
}

/// Convert `input` and write the triangles to `output`.
///
/// The output file is written even when no triangles were produced.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> ConvertResult<ConversionReport> {
    let input = input.as_ref();
    log::info!("Converting {}", input.display());

    let content = std::fs::read_to_string(input)?;
    let conversion = convert_str(&content, options)?;
    conversion.sink.write_file(output)?;

    Ok(conversion.report)
}

/// Internal driver that walks the shape lists of one document.
struct ShapeConverter<'a> {
    doc: &'a Document,
    options: &'a ConvertOptions,
    filter: AttributeFilter,
    sink: TriangleSink,
    report: ConversionReport,
}

impl<'a> ShapeConverter<'a> {
    fn new(doc: &'a Document, options: &'a ConvertOptions) -> Self {
        let filter = AttributeFilter::from_document(doc, options);
        let report = ConversionReport {
            collision_attributes: filter.total(),
            retained_attributes: filter.retained().collect(),
            ..Default::default()
        };

        Self {
            doc,
            options,
            filter,
            sink: TriangleSink::new(),
            report,
        }
    }

    fn run(mut self) -> Conversion {
        let parts = self.part_count();
        self.report.parts = parts;

        // All hulls first, then all meshes
        for kind in [ShapeKind::Hull, ShapeKind::Mesh] {
            for part in 0..parts {
                self.process_list(kind, part);
            }
        }

        self.report.triangles = self.sink.len();
        if !self.sink.is_empty() {
            self.report.bounds = Some(self.sink.bounds());
        }

        log::info!(
            "Converted {}/{} hulls and {}/{} meshes into {} triangles",
            self.report.hulls_converted,
            self.report.hulls_total,
            self.report.meshes_converted,
            self.report.meshes_total,
            self.report.triangles
        );

        Conversion {
            sink: self.sink,
            report: self.report,
        }
    }

    /// Number of parts to scan.
    fn part_count(&self) -> usize {
        if !self.options.all_parts {
            return 1;
        }

        let mut parts = 0;
        while self.doc.contains(&format!("m_parts[{}]", parts)) {
            parts += 1;
        }
        parts
    }

    /// Walk one shape list until the first entry without an attribute index.
    fn process_list(&mut self, kind: ShapeKind, part: usize) {
        let doc = self.doc;
        let mut index = 0;

        loop {
            let base = format!("m_parts[{}].m_rnShape.{}[{}]", part, kind.list_key(), index);
            let attribute = doc.resolve(&format!("{}.m_nCollisionAttributeIndex", base));
            if attribute.is_empty() {
                break;
            }

            match kind {
                ShapeKind::Hull => self.report.hulls_total += 1,
                ShapeKind::Mesh => self.report.meshes_total += 1,
            }

            match self.process_shape(kind, &base, attribute) {
                Ok(true) => match kind {
                    ShapeKind::Hull => self.report.hulls_converted += 1,
                    ShapeKind::Mesh => self.report.meshes_converted += 1,
                },
                Ok(false) => {}
                Err(e) => {
                    log::warn!("Skipping {:?} {} of part {}: {}", kind, index, part, e);
                    self.report.skipped.push(SkippedShape {
                        kind,
                        part,
                        index,
                        reason: e.to_string(),
                    });
                }
            }

            index += 1;
        }

        log::debug!("Part {}: {} {:?} entries", part, index, kind);
    }

    /// Convert one shape entry. Returns `Ok(false)` if its attribute was not selected.
    fn process_shape(&mut self, kind: ShapeKind, base: &str, attribute: &str) -> Result<bool, ShapeError> {
        let attribute: i64 = attribute
            .trim()
            .parse()
            .map_err(|_| ShapeError::InvalidAttributeIndex(attribute.to_string()))?;

        if !self.filter.contains(attribute) {
            log::debug!("{} uses attribute {}, not selected", base, attribute);
            return Ok(false);
        }

        match kind {
            ShapeKind::Hull => self.process_hull(base)?,
            ShapeKind::Mesh => self.process_mesh(base)?,
        }
        Ok(true)
    }

    /// Path of `shape.name` if the document has it.
    fn require(&self, shape: &str, name: &str) -> Result<String, ShapeError> {
        let path = format!("{}.{}", shape, name);
        if self.doc.contains(&path) {
            Ok(path)
        } else {
            Err(ShapeError::MissingField(path))
        }
    }

    fn process_hull(&mut self, base: &str) -> Result<(), ShapeError> {
        let doc = self.doc;
        let shape = format!("{}.m_Hull", base);

        let vertices = self
            .require(&shape, "m_VertexPositions")
            .or_else(|_| self.require(&shape, "m_Vertices"))?;
        let faces = self.require(&shape, "m_Faces")?;
        let edges = self.require(&shape, "m_Edges")?;

        let hull = Hull::from_blobs(
            doc.resolve(&vertices),
            doc.resolve(&faces),
            doc.resolve(&edges),
            self.options.tail_policy,
        )?;
        let result = hull.triangulate(self.options.max_face_edges)?;

        let bounds = hull.bounds();
        log::debug!(
            "{}: {} faces -> {} triangles, size {:?} at {:?}",
            base,
            hull.face_count(),
            result.triangles.len(),
            bounds.size(),
            bounds.center()
        );

        self.report.aborted_faces += result.aborted_faces.len();
        self.sink.extend(result.triangles);
        Ok(())
    }

    fn process_mesh(&mut self, base: &str) -> Result<(), ShapeError> {
        let doc = self.doc;
        let shape = format!("{}.m_Mesh", base);

        let triangles = self.require(&shape, "m_Triangles")?;
        let vertices = self.require(&shape, "m_Vertices")?;

        let mesh = Mesh::from_blobs(
            doc.resolve(&triangles),
            doc.resolve(&vertices),
            self.options.tail_policy,
        )?;
        let triangles = mesh.triangles()?;

        log::debug!(
            "{}: {} triangles, size {:?}",
            base,
            triangles.len(),
            mesh.bounds().size()
        );

        self.sink.extend(triangles);
        Ok(())
    }
}
