//! WRL to OBJ I/O library.
//!
//! Reads the VRML 1.0 debug geometry written by the level compiler and
//! converts it to OBJ so flagged geometry can be inspected in a 3D editor.
//! Each WRL separator becomes one OBJ object named after the error its
//! color encodes.
//!
//! # Supported Formats
//!
//! | Format           | Read | Write |
//! |------------------|------|-------|
//! | WRL (tool subset)| ✓    | ✓     |
//! | OBJ              | -    | ✓     |
//!
//! # Unified Trait API
//!
//! Readers implement [`Reader`] and writers implement [`Writer`]:
//!
//! ```ignore
//! use wrl2obj_io::{ObjWriter, Reader, WrlReader, Writer};
//!
//! let document = WrlReader::open("errors.wrl")?.read_document()?;
//! let mut obj = ObjWriter::new();
//! obj.add_document(&document)?;
//! obj.write("errors.obj")?;
//! ```
//!
//! # One-call conversion
//!
//! ```ignore
//! use std::io;
//!
//! wrl2obj_io::convert(io::stdin().lock(), &mut io::stdout().lock())?;
//! wrl2obj_io::convert_file("errors.wrl", "errors.obj")?;
//! ```

use std::io::{Read, Write};
use std::path::Path;

pub mod index_groups;
pub mod obj_writer;
pub mod traits;
pub mod wrl_reader;
pub mod wrl_writer;

pub use index_groups::{decode_index_groups, encode_index_groups, IndexGroupError};
pub use obj_writer::{ObjObject, ObjWriter, OBJ_HEADER};
pub use traits::{Reader, Writer};
pub use wrl_reader::{parse_wrl, WrlReader, WRL_HEADER};
pub use wrl_writer::WrlWriter;

use wrl2obj_core::status::StatusResult;

/// Convert WRL text read from `source` into OBJ text written to `sink`.
///
/// The source is read and converted in full before the first byte is
/// written, so a parse or structural error leaves `sink` untouched.
pub fn convert<R: Read, W: Write>(source: R, sink: &mut W) -> StatusResult<()> {
    let document = WrlReader::from_reader(source)?.read_document()?;
    let mut writer = ObjWriter::new();
    writer.add_document(&document)?;
    writer.write_to(sink)?;
    sink.flush()?;
    Ok(())
}

/// Convert a WRL file into an OBJ file.
///
/// The output file is only created once conversion has succeeded.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> StatusResult<()> {
    let document = WrlReader::open(input)?.read_document()?;
    let mut writer = ObjWriter::new();
    writer.add_document(&document)?;
    Writer::write(&writer, output)
}
