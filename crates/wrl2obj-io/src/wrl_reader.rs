//! WRL reader for the VRML 1.0 subset written by the level compiler.
//!
//! The accepted grammar is fixed:
//!
//! ```text
//! document  = "#VRML V1.0 ascii" { separator } EOF
//! separator = "Separator" "{"
//!               [ "Coordinate3" "{" "point" "[" points "]" "}" ]
//!               [ "MaterialBinding" "{" "value" ( "PER_VERTEX" | "PER_FACE" ) "}" ]
//!               [ "Material" "{" "diffuseColor" "[" points "]"
//!                                "transparency" "[" floats "]" "}" ]
//!               [ "IndexedLineSet" "{" "coordIndex" "[" indices "]" "}" ]
//!               [ "IndexedFaceSet" "{" "coordIndex" "[" indices "]" "}" ]
//!             "}"
//! points    = { float float float "," } [ float float float ]
//! floats    = { float "," } [ float ]
//! indices   = { integer "," } [ integer ]     (groups closed by -1)
//! float     = [ "-" ] digit { digit } "." digit { digit }
//! ```
//!
//! Whitespace, including newlines, may appear between any two tokens.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;
use wrl2obj_core::document::{
    Document, IndexGroup, Material, MaterialBinding, Point3, Scalar, Separator,
};
use wrl2obj_core::status::{StatusResult, WrlError};

use crate::index_groups::decode_index_groups;
use crate::traits::Reader;

/// First line of every WRL file the level compiler writes.
pub const WRL_HEADER: &str = "#VRML V1.0 ascii";

/// WRL format reader.
///
/// The whole source is read into memory before parsing starts.
#[derive(Debug, Clone)]
pub struct WrlReader {
    text: String,
}

impl WrlReader {
    /// Open a WRL file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> StatusResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self { text })
    }

    /// Read the full contents of a stream, e.g. stdin.
    pub fn from_reader<R: Read>(mut source: R) -> StatusResult<Self> {
        let mut text = String::new();
        source.read_to_string(&mut text)?;
        Ok(Self { text })
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Parse the source into a document.
    pub fn read_document(&mut self) -> StatusResult<Document> {
        parse_wrl(&self.text)
    }
}

impl Reader for WrlReader {
    fn open<P: AsRef<Path>>(path: P) -> StatusResult<Self> {
        WrlReader::open(path)
    }

    fn read_document(&mut self) -> StatusResult<Document> {
        WrlReader::read_document(self)
    }
}

/// Parse WRL text into a document.
pub fn parse_wrl(text: &str) -> StatusResult<Document> {
    let document = Parser::new(text).document()?;
    debug!(
        separators = document.num_separators(),
        vertices = document.num_vertices(),
        "parsed WRL document"
    );
    Ok(document)
}

// ============================================================================
// Cursor
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Mark {
    line: usize,
    column: usize,
}

#[inline]
fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n')
}

#[inline]
fn is_word_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Byte cursor that tracks line and column for error messages.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance(&mut self) {
        if self.peek() == Some(b'\n') {
            self.line += 1;
            self.line_start = self.pos + 1;
        }
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, is_whitespace) {
            self.advance();
        }
    }

    /// Skips whitespace and reports whether the input is exhausted.
    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.bytes.len()
    }

    fn mark(&self) -> Mark {
        Mark {
            line: self.line,
            column: self.pos - self.line_start + 1,
        }
    }

    /// Consumes `literal` if it comes next.
    ///
    /// A literal ending in a word character does not match when the input
    /// continues with another word character, so `Material` never matches
    /// the front of `MaterialBinding`.
    fn eat(&mut self, literal: &str) -> bool {
        self.skip_whitespace();
        let lit = literal.as_bytes();
        let end = self.pos + lit.len();
        if self.bytes.get(self.pos..end) != Some(lit) {
            return false;
        }
        let needs_boundary = lit.last().map_or(false, |&c| is_word_char(c));
        if needs_boundary && self.bytes.get(end).map_or(false, |&c| is_word_char(c)) {
            return false;
        }
        for _ in 0..lit.len() {
            self.advance();
        }
        true
    }

    fn take_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
        self.pos - start
    }

    /// Short preview of the upcoming token for error messages.
    fn preview(&self) -> String {
        let rest = &self.bytes[self.pos.min(self.bytes.len())..];
        if rest.is_empty() {
            return "end of input".to_string();
        }
        let len = rest
            .iter()
            .take(24)
            .position(|&c| is_whitespace(c))
            .unwrap_or_else(|| rest.len().min(24));
        format!("'{}'", String::from_utf8_lossy(&rest[..len.max(1)]))
    }

    fn slice(&self, start: usize) -> &'a str {
        // Only ever called on spans of ASCII digits, '-' and '.'.
        std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or_default()
    }
}

// ============================================================================
// Parser
// ============================================================================

struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            cursor: Cursor::new(text),
        }
    }

    fn error_at(&self, mark: Mark, message: impl Into<String>) -> WrlError {
        WrlError::syntax(mark.line, mark.column, message)
    }

    fn unexpected(&mut self, expected: &str) -> WrlError {
        self.cursor.skip_whitespace();
        let found = self.cursor.preview();
        self.error_at(
            self.cursor.mark(),
            format!("expected {}, found {}", expected, found),
        )
    }

    fn expect(&mut self, literal: &str) -> StatusResult<()> {
        if self.cursor.eat(literal) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", literal)))
        }
    }

    fn document(&mut self) -> StatusResult<Document> {
        self.expect(WRL_HEADER)?;

        let mut separators = Vec::new();
        while self.cursor.eat("Separator") {
            separators.push(self.separator()?);
        }

        if !self.cursor.at_end() {
            return Err(self.unexpected("'Separator' or end of input"));
        }
        Ok(Document::new(separators))
    }

    fn separator(&mut self) -> StatusResult<Separator> {
        self.expect("{")?;
        let mut separator = Separator::new();

        if self.cursor.eat("Coordinate3") {
            self.expect("{")?;
            self.expect("point")?;
            separator.coords = Some(self.bracketed(Self::point)?);
            self.expect("}")?;
        }

        if self.cursor.eat("MaterialBinding") {
            self.expect("{")?;
            self.expect("value")?;
            separator.binding = Some(self.binding()?);
            self.expect("}")?;
        }

        if self.cursor.eat("Material") {
            self.expect("{")?;
            self.expect("diffuseColor")?;
            let diffuse_colors = self.bracketed(Self::point)?;
            self.expect("transparency")?;
            let transparencies = self.bracketed(Self::float)?;
            self.expect("}")?;
            separator.material = Some(Material {
                diffuse_colors,
                transparencies,
            });
        }

        if self.cursor.eat("IndexedLineSet") {
            separator.indexed_lines = Some(self.index_set()?);
        }

        if self.cursor.eat("IndexedFaceSet") {
            separator.indexed_faces = Some(self.index_set()?);
        }

        if !self.cursor.eat("}") {
            return Err(self.unexpected("a separator block or '}'"));
        }
        Ok(separator)
    }

    fn binding(&mut self) -> StatusResult<MaterialBinding> {
        for binding in [MaterialBinding::PerVertex, MaterialBinding::PerFace] {
            if self.cursor.eat(binding.name()) {
                return Ok(binding);
            }
        }
        Err(self.unexpected("'PER_VERTEX' or 'PER_FACE'"))
    }

    /// `{ coordIndex [ ... ] }` of an IndexedLineSet or IndexedFaceSet.
    fn index_set(&mut self) -> StatusResult<Vec<IndexGroup>> {
        self.expect("{")?;
        self.expect("coordIndex")?;
        let values = self.bracketed(|p| {
            p.cursor.skip_whitespace();
            let mark = p.cursor.mark();
            Ok((p.integer()?, mark))
        })?;
        self.expect("}")?;

        let flat: Vec<i64> = values.iter().map(|(v, _)| *v).collect();
        decode_index_groups(&flat).map_err(|err| {
            let mark = values[err.position()].1;
            self.error_at(mark, err.to_string())
        })
    }

    /// `[ item, item, ... ]` with an optional trailing comma.
    fn bracketed<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> StatusResult<T>,
    ) -> StatusResult<Vec<T>> {
        self.expect("[")?;
        let mut items = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.peek() == Some(b']') {
                break;
            }
            items.push(item(self)?);
            if !self.cursor.eat(",") {
                break;
            }
        }
        self.expect("]")?;
        Ok(items)
    }

    fn point(&mut self) -> StatusResult<Point3> {
        Ok([self.float()?, self.float()?, self.float()?])
    }

    fn float(&mut self) -> StatusResult<Scalar> {
        self.cursor.skip_whitespace();
        let mark = self.cursor.mark();
        let start = self.cursor.pos;

        if self.cursor.peek() == Some(b'-') {
            self.cursor.advance();
        }
        let whole = self.cursor.take_digits();
        let has_point = self.cursor.peek() == Some(b'.');
        if has_point {
            self.cursor.advance();
        }
        let fraction = self.cursor.take_digits();

        if whole == 0 || !has_point || fraction == 0 {
            self.cursor.pos = start;
            return Err(self.unexpected("a float such as 1.000000"));
        }

        let text = self.cursor.slice(start);
        Scalar::parse(text).ok_or_else(|| self.error_at(mark, format!("malformed float '{}'", text)))
    }

    fn integer(&mut self) -> StatusResult<i64> {
        self.cursor.skip_whitespace();
        let mark = self.cursor.mark();
        let start = self.cursor.pos;

        if self.cursor.peek() == Some(b'-') {
            self.cursor.advance();
        }
        if self.cursor.take_digits() == 0 {
            self.cursor.pos = start;
            return Err(self.unexpected("an index or -1"));
        }

        let text = self.cursor.slice(start);
        text.parse::<i64>()
            .map_err(|_| self.error_at(mark, format!("malformed index '{}'", text)))
    }
}
