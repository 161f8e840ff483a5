//! WRL to OBJ Core Library
//!
//! Data model, error types and error-color classification for the debug
//! geometry (`.wrl`) files written by the level compiler.

pub mod classify;
pub mod document;
pub mod status;

pub use classify::{classify, UNKNOWN_LABEL};
pub use document::{Document, IndexGroup, Material, MaterialBinding, Point3, Scalar, Separator};
pub use status::{StatusResult, WrlError};
