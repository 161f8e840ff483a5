//! In-memory form of a level-compiler WRL file.
//!
//! A [`Document`] is an ordered list of [`Separator`] groups. Each group owns
//! its vertices, optional material data and topology; indices inside a group
//! are local to that group and 0-based.

use std::fmt;
use std::str::FromStr;

/// A float as it appeared in the source text.
///
/// The lexeme is kept so vertices can be written back out without being
/// reformatted; the parsed value is used wherever arithmetic is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    text: String,
    value: f64,
}

impl Scalar {
    /// Builds a scalar from a lexeme, returning `None` if it is not a number.
    pub fn parse(text: &str) -> Option<Self> {
        let value = text.parse::<f64>().ok()?;
        Some(Self {
            text: text.to_string(),
            value,
        })
    }

    /// Builds a scalar from a value, rendered with six fractional digits.
    pub fn from_value(value: f64) -> Self {
        Self {
            text: format!("{:.6}", value),
            value,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A whitespace-separated `x y z` triplet; also used for RGB colors.
pub type Point3 = [Scalar; 3];

/// Local vertex indices of one line segment or face.
pub type IndexGroup = Vec<usize>;

/// How diffuse colors map onto a separator's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialBinding {
    PerVertex,
    PerFace,
}

impl MaterialBinding {
    /// Returns the keyword used for this binding in WRL text.
    pub const fn name(self) -> &'static str {
        match self {
            MaterialBinding::PerVertex => "PER_VERTEX",
            MaterialBinding::PerFace => "PER_FACE",
        }
    }
}

impl fmt::Display for MaterialBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MaterialBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PER_VERTEX" => Ok(MaterialBinding::PerVertex),
            "PER_FACE" => Ok(MaterialBinding::PerFace),
            other => Err(format!("unknown material binding '{}'", other)),
        }
    }
}

/// The `Material` block of a separator.
///
/// The two arrays are independent: a `PER_FACE` material carries a single
/// transparency regardless of how many colors it lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    pub diffuse_colors: Vec<Point3>,
    pub transparencies: Vec<Scalar>,
}

/// One geometry group; one per error reported by the level compiler.
///
/// Each block is optional. `None` means the block was absent, which is kept
/// distinct from a present but empty block so a document re-serializes to
/// the same structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Separator {
    pub coords: Option<Vec<Point3>>,
    pub binding: Option<MaterialBinding>,
    pub material: Option<Material>,
    pub indexed_lines: Option<Vec<IndexGroup>>,
    pub indexed_faces: Option<Vec<IndexGroup>>,
}

impl Separator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices of this group, empty when there is no `Coordinate3` block.
    pub fn coords(&self) -> &[Point3] {
        self.coords.as_deref().unwrap_or(&[])
    }

    /// Diffuse colors, empty when there is no `Material` block.
    pub fn diffuse_colors(&self) -> &[Point3] {
        self.material
            .as_ref()
            .map(|m| m.diffuse_colors.as_slice())
            .unwrap_or(&[])
    }

    /// Transparencies, empty when there is no `Material` block.
    pub fn transparencies(&self) -> &[Scalar] {
        self.material
            .as_ref()
            .map(|m| m.transparencies.as_slice())
            .unwrap_or(&[])
    }

    pub fn lines(&self) -> &[IndexGroup] {
        self.indexed_lines.as_deref().unwrap_or(&[])
    }

    pub fn faces(&self) -> &[IndexGroup] {
        self.indexed_faces.as_deref().unwrap_or(&[])
    }

    pub fn num_vertices(&self) -> usize {
        self.coords().len()
    }
}

/// A parsed WRL file. Separator order is significant: it fixes both the
/// order of objects in the OBJ output and each group's vertex offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    separators: Vec<Separator>,
}

impl Document {
    pub fn new(separators: Vec<Separator>) -> Self {
        Self { separators }
    }

    pub fn separators(&self) -> &[Separator] {
        &self.separators
    }

    pub fn num_separators(&self) -> usize {
        self.separators.len()
    }

    /// Total vertices over all separators.
    pub fn num_vertices(&self) -> usize {
        self.separators.iter().map(Separator::num_vertices).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.separators.is_empty()
    }
}

impl From<Vec<Separator>> for Document {
    fn from(separators: Vec<Separator>) -> Self {
        Self::new(separators)
    }
}
