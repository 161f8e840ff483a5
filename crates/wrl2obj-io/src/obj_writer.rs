//! OBJ writer for converted error geometry.
//!
//! Output layout:
//!
//! ```text
//! # This is a converted tool.exe WRL file. Import with settings Y forward and Z up
//! v x y z            one per vertex, all separators, in document order
//! ...
//! o Error geometry: <label>
//! f a b c            faces of the first separator
//! l a b              then its line segments
//! o Error geometry: <label>
//! ...
//! ```
//!
//! OBJ indices are 1-based and global to the file, so each separator's local
//! indices are shifted by the number of vertices written before it.
//!
//! # Example
//!
//! ```ignore
//! use wrl2obj_io::{ObjWriter, Writer};
//!
//! let mut writer = ObjWriter::new();
//! writer.add_document(&document)?;
//! writer.write("errors.obj")?;
//! ```

use std::io::Write;
use std::path::Path;

use tracing::{debug, info, warn};
use wrl2obj_core::classify::classify;
use wrl2obj_core::document::{Document, IndexGroup, Point3, Separator};
use wrl2obj_core::status::{StatusResult, WrlError};

use crate::traits::Writer;

/// Comment written as the first line of every converted file.
pub const OBJ_HEADER: &str =
    "# This is a converted tool.exe WRL file. Import with settings Y forward and Z up";

/// Prefix of every object name.
pub const OBJECT_PREFIX: &str = "Error geometry: ";

/// Topology of one separator, already shifted into the global index space.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjObject {
    pub label: String,
    pub faces: Vec<[usize; 3]>,
    pub lines: Vec<[usize; 2]>,
}

/// OBJ format writer.
///
/// Documents are converted in [`Writer::add_document`]; nothing is written
/// until [`Writer::write_to`], which emits every vertex before any object.
#[derive(Debug, Clone)]
pub struct ObjWriter {
    vertices: Vec<Point3>,
    objects: Vec<ObjObject>,
    /// Global index the next vertex will receive.
    next_vertex: usize,
}

impl Default for ObjWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjWriter {
    /// Create a new OBJ writer.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            objects: Vec::new(),
            next_vertex: 1,
        }
    }

    /// Convert a document and queue it for output.
    ///
    /// On error the writer is left exactly as it was.
    pub fn add_document(&mut self, document: &Document) -> StatusResult<()> {
        let mut base = self.next_vertex;
        let mut objects = Vec::with_capacity(document.num_separators());

        for (index, separator) in document.separators().iter().enumerate() {
            let (object, next) = emit_separator(index, separator, base)?;
            debug!(
                separator = index,
                vertices = separator.num_vertices(),
                faces = object.faces.len(),
                lines = object.lines.len(),
                label = %object.label,
                "converted separator"
            );
            objects.push(object);
            base = next;
        }

        for separator in document.separators() {
            self.vertices.extend(separator.coords().iter().cloned());
        }
        self.objects.extend(objects);
        self.next_vertex = base;

        info!(
            separators = document.num_separators(),
            vertices = self.vertex_count(),
            faces = self.face_count(),
            lines = self.line_count(),
            "converted WRL document"
        );
        Ok(())
    }

    /// Write the OBJ text to a sink.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> StatusResult<()> {
        writeln!(sink, "{}", OBJ_HEADER)?;

        for v in &self.vertices {
            writeln!(sink, "v {} {} {}", v[0], v[1], v[2])?;
        }

        for object in &self.objects {
            writeln!(sink, "o {}{}", OBJECT_PREFIX, object.label)?;
            for [a, b, c] in &object.faces {
                writeln!(sink, "f {} {} {}", a, b, c)?;
            }
            for [a, b] in &object.lines {
                writeln!(sink, "l {} {}", a, b)?;
            }
        }
        Ok(())
    }

    /// Render the OBJ text into a string.
    pub fn to_obj_string(&self) -> StatusResult<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| WrlError::Io(e.to_string()))
    }

    pub fn objects(&self) -> &[ObjObject] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

/// Convert one separator whose first vertex has global index `base`.
///
/// Returns the object and the global index of the next separator's first
/// vertex.
pub fn emit_separator(
    index: usize,
    separator: &Separator,
    base: usize,
) -> StatusResult<(ObjObject, usize)> {
    if separator.material.is_some() && separator.binding.is_none() {
        warn!(separator = index, "material without a material binding");
    }

    let num_vertices = separator.num_vertices();
    let faces = separator
        .faces()
        .iter()
        .enumerate()
        .map(|(ordinal, group)| rebase::<3>(group, base, num_vertices, index, "face", ordinal))
        .collect::<StatusResult<Vec<_>>>()?;
    let lines = separator
        .lines()
        .iter()
        .enumerate()
        .map(|(ordinal, group)| rebase::<2>(group, base, num_vertices, index, "line", ordinal))
        .collect::<StatusResult<Vec<_>>>()?;

    let object = ObjObject {
        label: classify(separator.binding, separator.diffuse_colors()),
        faces,
        lines,
    };
    Ok((object, base + num_vertices))
}

/// Shift a local index group by `base`, checking arity and range.
fn rebase<const N: usize>(
    group: &IndexGroup,
    base: usize,
    num_vertices: usize,
    separator: usize,
    kind: &str,
    ordinal: usize,
) -> StatusResult<[usize; N]> {
    if group.len() != N {
        return Err(WrlError::structural(format!(
            "separator {}: {} {} has {} indices, expected {}",
            separator,
            kind,
            ordinal,
            group.len(),
            N
        )));
    }

    let mut out = [0usize; N];
    for (slot, &local) in out.iter_mut().zip(group) {
        if local >= num_vertices {
            return Err(WrlError::structural(format!(
                "separator {}: {} {} references vertex {} but the separator has {} vertices",
                separator, kind, ordinal, local, num_vertices
            )));
        }
        *slot = local + base;
    }
    Ok(out)
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Writer for ObjWriter {
    fn new() -> Self {
        Self::default()
    }

    fn add_document(&mut self, document: &Document) -> StatusResult<()> {
        ObjWriter::add_document(self, document)
    }

    fn write_to<W: Write>(&self, sink: &mut W) -> StatusResult<()> {
        ObjWriter::write_to(self, sink)
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn face_count(&self) -> usize {
        self.objects.iter().map(|o| o.faces.len()).sum()
    }

    fn line_count(&self) -> usize {
        self.objects.iter().map(|o| o.lines.len()).sum()
    }
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Convert a document and write it to an OBJ file.
pub fn write_obj<P: AsRef<Path>>(path: P, document: &Document) -> StatusResult<()> {
    let mut writer = ObjWriter::new();
    writer.add_document(document)?;
    Writer::write(&writer, path)
}
