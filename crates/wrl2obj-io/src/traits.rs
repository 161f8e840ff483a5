//! Common traits for readers and writers.
//!
//! These traits define consistent interfaces for all format implementations.
//!
//! # Usage
//!
//! Import the trait to access its methods:
//!
//! ```ignore
//! use wrl2obj_io::{Reader, Writer, ObjWriter, WrlReader};
//!
//! let document = WrlReader::open("errors.wrl")?.read_document()?;
//! let mut writer = ObjWriter::new();
//! writer.add_document(&document)?;  // Calls trait method
//! writer.write("errors.obj")?;
//! ```
//!
//! This enables generic functions:
//!
//! ```ignore
//! fn save<W: Writer>(mut w: W, document: &Document, path: &str) -> StatusResult<()> {
//!     w.add_document(document)?;
//!     w.write(path)
//! }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use wrl2obj_core::document::Document;
use wrl2obj_core::status::StatusResult;

/// Common interface for document writers.
///
/// Writers buffer everything added to them and only touch the sink in
/// [`Writer::write_to`], so a failed `add_document` never leaves partial
/// output behind.
pub trait Writer: Sized {
    /// Create a new writer instance.
    fn new() -> Self;

    /// Add a document to be written.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if the document cannot be represented in this format
    fn add_document(&mut self, document: &Document) -> StatusResult<()>;

    /// Write everything added so far to a sink.
    fn write_to<W: Write>(&self, sink: &mut W) -> StatusResult<()>;

    /// Write everything added so far to a file.
    fn write<P: AsRef<Path>>(&self, path: P) -> StatusResult<()> {
        let file = File::create(path)?;
        let mut sink = BufWriter::new(file);
        self.write_to(&mut sink)?;
        sink.flush()?;
        Ok(())
    }

    /// Get the number of vertices added.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces added.
    fn face_count(&self) -> usize {
        0
    }

    /// Get the number of line segments added.
    fn line_count(&self) -> usize {
        0
    }
}

/// Common interface for document readers.
///
/// ```ignore
/// use wrl2obj_io::{Reader, WrlReader};
///
/// fn load<R: Reader>(path: &str) -> StatusResult<Document> {
///     let mut reader = R::open(path)?;
///     reader.read_document()
/// }
/// ```
pub trait Reader: Sized {
    /// Open a file for reading.
    fn open<P: AsRef<Path>>(path: P) -> StatusResult<Self>;

    /// Parse the whole source into a document.
    fn read_document(&mut self) -> StatusResult<Document>;
}
