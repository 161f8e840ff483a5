//! WRL writer that reproduces the level compiler's layout.
//!
//! Floats are written with their original lexeme, index lists are flattened
//! with `-1` terminators and wrapped over several lines when long, and the
//! transparency array keeps the compiler's `transparency[` spelling.

use std::io::Write;

use wrl2obj_core::document::{Document, IndexGroup, Point3, Scalar, Separator};
use wrl2obj_core::status::StatusResult;

use crate::index_groups::encode_index_groups;
use crate::traits::Writer;
use crate::wrl_reader::WRL_HEADER;

/// Index values per line before a `coordIndex` list is wrapped.
const INDICES_PER_LINE: usize = 12;

/// WRL format writer.
#[derive(Debug, Clone, Default)]
pub struct WrlWriter {
    separators: Vec<Separator>,
}

impl WrlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_document(&mut self, document: &Document) -> StatusResult<()> {
        self.separators.extend(document.separators().iter().cloned());
        Ok(())
    }

    pub fn write_to<W: Write>(&self, sink: &mut W) -> StatusResult<()> {
        writeln!(sink, "{}", WRL_HEADER)?;
        for separator in &self.separators {
            write_separator(sink, separator)?;
        }
        Ok(())
    }

    /// Render the WRL text into a string.
    pub fn to_wrl_string(&self) -> StatusResult<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

fn write_separator<W: Write>(sink: &mut W, separator: &Separator) -> StatusResult<()> {
    writeln!(sink, "Separator {{")?;

    if let Some(coords) = &separator.coords {
        writeln!(sink, "  Coordinate3 {{")?;
        write_points(sink, "point", coords)?;
        writeln!(sink, "  }}")?;
    }

    if let Some(binding) = separator.binding {
        writeln!(sink, "  MaterialBinding {{")?;
        writeln!(sink, "    value {}", binding)?;
        writeln!(sink, "  }}")?;
    }

    if let Some(material) = &separator.material {
        writeln!(sink, "  Material {{")?;
        write_points(sink, "diffuseColor", &material.diffuse_colors)?;
        writeln!(sink, "    transparency[ {} ]", join_scalars(&material.transparencies))?;
        writeln!(sink, "  }}")?;
    }

    if let Some(lines) = &separator.indexed_lines {
        write_index_set(sink, "IndexedLineSet", lines)?;
    }

    if let Some(faces) = &separator.indexed_faces {
        write_index_set(sink, "IndexedFaceSet", faces)?;
    }

    writeln!(sink, "}}")?;
    Ok(())
}

fn write_points<W: Write>(sink: &mut W, field: &str, points: &[Point3]) -> StatusResult<()> {
    writeln!(sink, "    {} [", field)?;
    for p in points {
        writeln!(sink, "      {} {} {},", p[0], p[1], p[2])?;
    }
    writeln!(sink, "    ]")?;
    Ok(())
}

fn write_index_set<W: Write>(sink: &mut W, node: &str, groups: &[IndexGroup]) -> StatusResult<()> {
    writeln!(sink, "  {} {{", node)?;
    let values = encode_index_groups(groups);
    if values.len() <= INDICES_PER_LINE {
        writeln!(sink, "    coordIndex [ {} ]", join(&values))?;
    } else {
        writeln!(sink, "    coordIndex [")?;
        for chunk in values.chunks(INDICES_PER_LINE) {
            writeln!(sink, "      {},", join(chunk))?;
        }
        writeln!(sink, "    ]")?;
    }
    writeln!(sink, "  }}")?;
    Ok(())
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_scalars(values: &[Scalar]) -> String {
    values
        .iter()
        .map(Scalar::text)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Writer for WrlWriter {
    fn new() -> Self {
        Self::default()
    }

    fn add_document(&mut self, document: &Document) -> StatusResult<()> {
        WrlWriter::add_document(self, document)
    }

    fn write_to<W: Write>(&self, sink: &mut W) -> StatusResult<()> {
        WrlWriter::write_to(self, sink)
    }

    fn vertex_count(&self) -> usize {
        self.separators.iter().map(Separator::num_vertices).sum()
    }

    fn face_count(&self) -> usize {
        self.separators.iter().map(|s| s.faces().len()).sum()
    }

    fn line_count(&self) -> usize {
        self.separators.iter().map(|s| s.lines().len()).sum()
    }
}
